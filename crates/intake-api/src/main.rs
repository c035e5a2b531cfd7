use intake_api::setup;
use intake_core::Config;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration; a missing bucket or secret is startup-fatal.
    let config = Config::from_env()?;

    let state = setup::initialize_state(&config).await?;
    let router = setup::setup_routes(state);

    setup::start_server(&config, router).await?;

    Ok(())
}
