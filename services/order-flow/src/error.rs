use shared::utils::http_client::HttpClientError;
use thiserror::Error;

// Type alias untuk Result dengan AppError
pub type AppResult<T = ()> = Result<T, AppError>;

// Error taxonomy untuk order workflow:
// - Validation: error per-field, block step berikutnya, tidak pernah fatal
// - MissingReference: referensi id yang sudah tidak ada (alamat, driver)
// - Service: panggilan backend/collaborator gagal, retryable
// - NotFound: data tidak ditemukan di directory
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    #[error("Referensi tidak ditemukan: {0}")]
    MissingReference(String),

    #[error("Service error: {0}")]
    Service(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn missing_reference(msg: impl Into<String>) -> Self {
        Self::MissingReference(msg.into())
    }

    pub fn service(msg: impl Into<String>) -> Self {
        Self::Service(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    // Error service bersifat transient: step sebelumnya tetap utuh,
    // user boleh retry tanpa input ulang
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Service(_))
    }
}

// Konversi dari HttpClientError ke AppError
impl From<HttpClientError> for AppError {
    fn from(err: HttpClientError) -> Self {
        match err {
            HttpClientError::NotFound(msg) => AppError::NotFound(msg),
            _ => {
                tracing::warn!("Backend API error: {}", err);
                AppError::Service(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_is_retryable() {
        assert!(AppError::service("timeout").is_retryable());
        assert!(!AppError::validation("amount", "harus diisi").is_retryable());
        assert!(!AppError::missing_reference("addr-9").is_retryable());
    }

    #[test]
    fn test_http_error_maps_to_service() {
        let err: AppError = HttpClientError::RequestFailed("500".to_string()).into();
        assert!(err.is_retryable());

        let err: AppError = HttpClientError::NotFound("order-9".to_string()).into();
        assert!(!err.is_retryable());
    }
}
