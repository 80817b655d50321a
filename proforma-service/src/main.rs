use proforma_service::{config::Config, Application};
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    init_tracing(&config.service_name, &config.log_level, config.otlp_endpoint());

    let application = Application::build(config).await?;
    application.run_until_stopped().await?;

    Ok(())
}
