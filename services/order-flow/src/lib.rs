// ARMADA LINK - Order Flow
// Core workflow pembuatan order logistik: domain models, data source layer
// (remote API / in-memory), dan wizard multi-step dengan billing turunan.

pub mod config;
pub mod domain;
pub mod error;
pub mod services;
pub mod wizard;

pub use config::{AppConfig, AppState, DataSourceMode};
pub use error::{AppError, AppResult};
