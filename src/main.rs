use dotenvy::dotenv;
use printquote::auth::GuestAuth;
use printquote::configuration::Context;
use printquote::core::{AppState, HttpServer};
use printquote::settings::SettingsStore;
use printquote::AppError;
use std::str::FromStr;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenv().ok();
    let context = Context::new("config.json").map_err(|e| AppError::ConfigError(e.to_string()))?;

    let log_level = Level::from_str(&context.config.log_level).unwrap_or(Level::INFO);
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::new(log_level.to_string()))
        .init();
    tracing::info!("Starting PrintQuote Service");

    let settings = Arc::new(SettingsStore::open(&context.config.settings_file));
    let state = AppState {
        settings,
        auth: Arc::new(GuestAuth),
        default_charges: context.config.default_charges.clone(),
    };

    HttpServer::start(context.config.server.port, state)
        .await
        .map_err(|_| AppError::ServiceError)
}
