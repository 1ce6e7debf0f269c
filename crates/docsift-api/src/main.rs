use docsift_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (directories, engine startup, routes)
    let (state, router) = docsift_api::setup::initialize_app(config.clone()).await?;

    // Start the server
    docsift_api::setup::server::start_server(&config, state, router).await?;

    Ok(())
}
