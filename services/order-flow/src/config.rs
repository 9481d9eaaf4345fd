use std::env;

use crate::error::{AppError, AppResult};
use crate::services::DataSources;

// Mode data source: remote API backend atau in-memory (demo/offline)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSourceMode {
    Remote,
    Memory,
}

impl DataSourceMode {
    pub fn as_str(&self) -> &str {
        match self {
            DataSourceMode::Remote => "remote",
            DataSourceMode::Memory => "memory",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "remote" => Some(DataSourceMode::Remote),
            "memory" | "mock" => Some(DataSourceMode::Memory),
            _ => None,
        }
    }
}

// Konfigurasi aplikasi dari environment variables
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub data_source: DataSourceMode,
    pub request_timeout_secs: u64,
    pub default_rate_per_km: f64,
    pub default_gst_rate: f64,
    pub environment: String,
}

impl AppConfig {
    // Load konfigurasi dari environment dengan default yang aman
    pub fn from_env() -> Result<Self, String> {
        let api_base_url = env::var("API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8080/api".to_string());

        let data_source = env::var("DATA_SOURCE")
            .ok()
            .and_then(|s| DataSourceMode::from_str(&s))
            .unwrap_or(DataSourceMode::Memory);

        let request_timeout_secs = env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);

        let default_rate_per_km = env::var("DEFAULT_RATE_PER_KM")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(15.0);

        let default_gst_rate = env::var("DEFAULT_GST_RATE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(18.0);

        if !(0.0..=100.0).contains(&default_gst_rate) {
            return Err("DEFAULT_GST_RATE harus antara 0 dan 100".to_string());
        }

        let environment = env::var("RUST_ENV")
            .unwrap_or_else(|_| "development".to_string());

        Ok(AppConfig {
            api_base_url,
            data_source,
            request_timeout_secs,
            default_rate_per_km,
            default_gst_rate,
            environment,
        })
    }

    // Helper cek production mode
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

// Application state yang di-share ke wizard dan demo binary
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub sources: DataSources,
}

impl AppState {
    // Inisialisasi application state sesuai data source mode
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let sources = match config.data_source {
            DataSourceMode::Remote => DataSources::remote(&config)
                .map_err(|e| AppError::internal(format!("Gagal inisialisasi API client: {}", e)))?,
            DataSourceMode::Memory => DataSources::in_memory(),
        };

        Ok(AppState { config, sources })
    }

    // Inisialisasi application state dari environment
    pub fn from_env() -> AppResult<Self> {
        let config = AppConfig::from_env().map_err(AppError::internal)?;
        Self::new(config)
    }

    // Untuk test: state dengan sources yang disuntik manual
    pub fn with_sources(config: AppConfig, sources: DataSources) -> Self {
        AppState { config, sources }
    }
}
