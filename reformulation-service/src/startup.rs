//! Application startup and lifecycle management.

use crate::config::ReformulationConfig;
use crate::handlers::{health_check, metrics, readiness_check, reformulate_question};
use crate::services::providers::openai::{OpenAiConfig, OpenAiTextProvider};
use crate::services::providers::unavailable::UnavailableProvider;
use crate::services::TextProvider;
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware,
    tracing::{request_id_middleware, REQUEST_ID_HEADER},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Shared application state.
///
/// The provider is built once at startup and shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub config: ReformulationConfig,
    pub text_provider: Arc<dyn TextProvider>,
}

/// Build the model provider for this configuration.
///
/// Without a credential the configuration error is logged and every call
/// fails with `Unavailable` instead of the process refusing to start.
pub fn build_text_provider(config: &ReformulationConfig) -> Arc<dyn TextProvider> {
    let api_key = match config.api_key() {
        Ok(key) => key.to_string(),
        Err(e) => {
            tracing::error!(error = %e, "Configuration error, model provider disabled");
            return Arc::new(UnavailableProvider::new(e.to_string()));
        }
    };

    let provider = OpenAiTextProvider::new(OpenAiConfig {
        api_key,
        model: config.openai.model.clone(),
        base_url: config.openai.base_url.clone(),
    });

    match provider {
        Ok(provider) => {
            tracing::info!(model = %provider.model(), "Initialized OpenAI text provider");
            Arc::new(provider)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize OpenAI text provider");
            Arc::new(UnavailableProvider::new(e.to_string()))
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/reformular", post(reformulate_question))
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics))
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: ReformulationConfig) -> Result<Self, AppError> {
        let text_provider = build_text_provider(&config);
        Self::build_with_provider(config, text_provider).await
    }

    /// Build the application around an already constructed provider.
    pub async fn build_with_provider(
        config: ReformulationConfig,
        text_provider: Arc<dyn TextProvider>,
    ) -> Result<Self, AppError> {
        // Port 0 binds a random port (used by tests)
        let addr = config.common.socket_addr();
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(port = port, "Reformulation service listening");

        Ok(Self {
            port,
            listener,
            state: AppState {
                config,
                text_provider,
            },
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })
    }
}
