//! Waifu API server binary.

use std::net::AddrParseError;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;

use waifu_api::adapters::http::{api_router, with_middleware, ApiState};
use waifu_api::adapters::model::{HttpCompletionGateway, HttpGatewayConfig};
use waifu_api::adapters::sqlite::SqliteTranscriptStore;
use waifu_api::adapters::translation::{
    GoogleTranslationBridge, GoogleTranslationConfig, PassthroughTranslationBridge,
};
use waifu_api::application::ProcessTurnHandler;
use waifu_api::config::{AppConfig, ConfigError, TranslationConfig, TranslationProvider};
use waifu_api::domain::dialog::PromptAssembler;
use waifu_api::ports::{
    GatewayError, StoreError, TranscriptStore, TranslationBridge, TranslationError,
};
use waifu_api::telemetry;

/// Anything that stops the server from starting.
#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to install tracing subscriber: {0}")]
    Tracing(#[from] tracing_subscriber::util::TryInitError),

    #[error("Invalid bind address: {0}")]
    Address(#[from] AddrParseError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Translation(#[from] TranslationError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    config.validate().map_err(ConfigError::from)?;
    telemetry::init_tracing(&config.server)?;

    tracing::info!(
        environment = ?config.server.environment,
        model_url = %config.model.url,
        translation = ?config.translation.provider,
        serialize_turns = config.dialog.serialize_turns,
        "Starting waifu-api"
    );

    let sqlite = SqliteTranscriptStore::connect(&config.database).await?;
    if config.database.run_migrations {
        sqlite.migrate().await?;
    }
    let store: Arc<dyn TranscriptStore> = Arc::new(sqlite);

    let gateway = HttpCompletionGateway::new(HttpGatewayConfig::from(&config.model))?;
    let translator = translation_bridge(&config.translation)?;

    let turns = ProcessTurnHandler::new(
        store.clone(),
        Arc::new(gateway),
        translator,
        PromptAssembler::new(config.dialog.prompt_budget(), config.model.default_genre.clone()),
        config.dialog.input_limits(),
    )
    .with_unavailable_message(config.model.unavailable_message.clone())
    .with_turn_serialization(config.dialog.serialize_turns);

    let state = ApiState::new(store, Arc::new(turns), &config.dialog);
    let app = with_middleware(api_router(state), &config.server);

    let addr = config.server.bind_address()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn translation_bridge(
    config: &TranslationConfig,
) -> Result<Arc<dyn TranslationBridge>, TranslationError> {
    match config.provider {
        TranslationProvider::None => Ok(Arc::new(PassthroughTranslationBridge::new())),
        TranslationProvider::Google => {
            let google = GoogleTranslationConfig::from_config(config)?;
            Ok(Arc::new(GoogleTranslationBridge::new(google)?))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
