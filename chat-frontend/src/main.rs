use chat_frontend::config::Settings;
use chat_frontend::startup::Application;
use dotenvy::dotenv;
use service_core::observability::logging::init_tracing;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    let otlp_endpoint = std::env::var("OTLP_ENDPOINT").ok();
    init_tracing("chat-frontend", "info", otlp_endpoint.as_deref());

    chat_frontend::services::metrics::init_metrics()?;

    let app = Application::build(settings).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        anyhow::anyhow!("Startup error: {}", e)
    })?;

    info!("Server is running on http://localhost:{}", app.port());
    app.run_until_stopped().await?;

    Ok(())
}
