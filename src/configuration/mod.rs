use crate::quotation::types::ChargeConfig;
use serde::Deserialize;
use std::fs;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Deserialization error:{0}")]
    DeserializationError(String),
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Backing file for the pricing settings store
    #[serde(default = "default_settings_file")]
    pub settings_file: String,
    /// Starting charge rates shown to the user before they adjust anything
    #[serde(default)]
    pub default_charges: ChargeConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_settings_file() -> String {
    "pricing_settings.json".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            log_level: default_log_level(),
            settings_file: default_settings_file(),
            default_charges: ChargeConfig::default(),
        }
    }
}

impl Config {
    /// A missing config file is fine and yields the defaults; a present but
    /// unparseable one is a deployment mistake worth surfacing.
    pub fn new(config_file: &str) -> Result<Self, ConfigError> {
        match fs::read_to_string(config_file) {
            Ok(config_str) => serde_json::from_str(&config_str)
                .map_err(|e| ConfigError::DeserializationError(e.to_string())),
            Err(_) => Ok(Config::default()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Context {
    pub config: Config,
}

impl Context {
    pub fn new(config_file: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            config: Config::new(config_file)?,
        })
    }
}
