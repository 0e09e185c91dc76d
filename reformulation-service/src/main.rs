use reformulation_service::config::ReformulationConfig;
use reformulation_service::services::metrics::init_metrics;
use reformulation_service::startup::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = ReformulationConfig::load().map_err(|e| {
        // Logging is configured from this same config, so report on stderr.
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    init_tracing(
        "reformulation-service",
        &config.log_level,
        config.otlp_endpoint.as_deref(),
    );

    if let Err(e) = init_metrics() {
        tracing::warn!(error = %e, "Prometheus recorder not installed, /metrics will be empty");
    }

    tracing::info!(
        environment = %config.environment,
        model = %config.openai.model,
        "Starting reformulation service"
    );

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    app.run_until_stopped().await
}
