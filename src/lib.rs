pub mod auth;
pub mod client;
pub mod configuration;
pub mod core;
pub mod document;
pub mod quotation;
pub mod settings;
pub mod uploads;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Config Error:{0}")]
    ConfigError(String),

    #[error("Service error")]
    ServiceError,
}
