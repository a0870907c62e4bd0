// Copyright 2025 Sushanth (https://github.com/sushanthpy)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Clilog Server
//!
//! Read-only HTTP API over a newline-delimited JSON command log.

pub mod api;
pub mod config;

use anyhow::Result;
use axum::{routing::get, Router};
use clilog_core::{FileLogSource, LogAnalyzer};
use crate::config::{LogFormat, ServerConfig};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::AppState;

/// Install the global tracing subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing(format: LogFormat) {
    let registry = tracing_subscriber::registry().with(
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "clilog_server=info,tower_http=info".into()),
    );

    let result = match format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).try_init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
    };

    if let Err(e) = result {
        eprintln!("tracing subscriber already installed: {e}");
    }
}

/// Build the application router
pub fn build_router(state: AppState, enable_cors: bool) -> Router {
    let router = Router::new()
        .route("/api/health", get(api::health_check))
        .route("/api/cli-logs", get(api::list_cli_logs))
        .route("/api/analytics/summary", get(api::get_summary))
        .route("/api/command-activity", get(api::get_command_activity))
        .route("/api/performance", get(api::get_performance))
        .route("/api/errors/summary", get(api::get_error_summary))
        .with_state(state);

    router
        .layer(if enable_cors {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            CorsLayer::new()
        })
        .layer(TraceLayer::new_for_http())
}

pub async fn run_server(config: ServerConfig) -> Result<()> {
    init_tracing(config.server.log_format);

    tracing::info!("Starting Clilog Server");
    tracing::info!("Configuration: {:#?}", config);

    config.validate()?;

    let source = FileLogSource::new(&config.source.log_path);
    if !source.path().exists() {
        tracing::warn!(
            "Log file {:?} does not exist yet; endpoints will return 404 until it does",
            source.path()
        );
    }

    let analyzer = LogAnalyzer::with_options(config.analytics.clone());
    let state = AppState::new(Arc::new(source), analyzer);
    let app = build_router(state, config.server.enable_cors);

    let addr = config.socket_addr()?;
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.socket_addr().unwrap().port(), 8000);
    }
}
