use reqwest::{multipart, Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpClientError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Backend API tidak tersedia: {0}")]
    ServiceUnavailable(String),

    #[error("Response parsing error: {0}")]
    ParseError(String),

    #[error("Data tidak ditemukan: {0}")]
    NotFound(String),
}

// Client generik untuk backend API (JSON request/response)
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    // Buat client untuk base URL tertentu
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| HttpClientError::ServiceUnavailable(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // GET request
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, HttpClientError> {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| HttpClientError::RequestFailed(e.to_string()))?;

        self.handle_response(response).await
    }

    // POST request dengan JSON body
    pub async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, HttpClientError> {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| HttpClientError::RequestFailed(e.to_string()))?;

        self.handle_response(response).await
    }

    // PUT request dengan JSON body
    pub async fn put<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, HttpClientError> {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!("PUT {}", url);

        let response = self
            .client
            .put(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| HttpClientError::RequestFailed(e.to_string()))?;

        self.handle_response(response).await
    }

    // PATCH request dengan JSON body (partial update)
    pub async fn patch<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, HttpClientError> {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!("PATCH {}", url);

        let response = self
            .client
            .patch(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| HttpClientError::RequestFailed(e.to_string()))?;

        self.handle_response(response).await
    }

    // DELETE request
    pub async fn delete(&self, endpoint: &str) -> Result<(), HttpClientError> {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!("DELETE {}", url);

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| HttpClientError::RequestFailed(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else if response.status() == StatusCode::NOT_FOUND {
            Err(HttpClientError::NotFound(url))
        } else {
            Err(HttpClientError::RequestFailed(
                format!("Status: {}", response.status())
            ))
        }
    }

    // Upload file via multipart form-data
    pub async fn post_file<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        field_name: &str,
        bytes: Vec<u8>,
        filename: &str,
    ) -> Result<T, HttpClientError> {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!("POST (multipart) {}", url);

        let form = multipart::Form::new().part(
            field_name.to_string(),
            multipart::Part::bytes(bytes).file_name(filename.to_string()),
        );

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| HttpClientError::RequestFailed(e.to_string()))?;

        self.handle_response(response).await
    }

    // Handle response dan parse JSON
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<T, HttpClientError> {
        let status = response.status();

        match status {
            StatusCode::OK | StatusCode::CREATED => {
                response
                    .json::<T>()
                    .await
                    .map_err(|e| HttpClientError::ParseError(e.to_string()))
            }
            StatusCode::NOT_FOUND => {
                Err(HttpClientError::NotFound("Resource tidak ditemukan".to_string()))
            }
            _ => {
                let error_text = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                Err(HttpClientError::RequestFailed(error_text))
            }
        }
    }
}
