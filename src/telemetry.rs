//! Tracing subscriber setup.
//!
//! `RUST_LOG` wins over the configured log level. Production emits JSON
//! lines; every other environment gets human-readable output.

use std::io;

use tracing_subscriber::filter::Directive;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::ServerConfig;

/// Log format picked from the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    pub fn for_server(config: &ServerConfig) -> Self {
        if config.is_production() {
            Self::Json
        } else {
            Self::Pretty
        }
    }
}

/// Builds the filter from `RUST_LOG`, falling back to `default_level`.
pub fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level))
        .add_directive(quiet("hyper=warn"))
        .add_directive(quiet("reqwest=warn"))
}

fn quiet(directive: &str) -> Directive {
    directive
        .parse()
        .unwrap_or_else(|_| tracing::Level::WARN.into())
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(config: &ServerConfig) -> Result<(), TryInitError> {
    let registry = tracing_subscriber::registry().with(env_filter(&config.log_level));

    match LogFormat::for_server(config) {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_target(true).with_writer(io::stdout))
            .try_init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().with_target(true).with_writer(io::stdout))
            .try_init(),
    }
}
