use catalog_service::{api, config, errors::Result};
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Resolve configuration (config.toml + HOST/PORT/DATABASE_URL)
    let app_config = config::load_app_configuration()
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;
    info!(
        host = %app_config.server.host,
        port = app_config.server.port,
        "Configuration loaded."
    );

    // 4. Open the store and make sure the productos table exists
    let database = config::database::init_database(&app_config.database.url)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    // 5. Serve until shutdown
    api::serve(&app_config, database)
        .await
        .inspect_err(|e| error!("Server error: {}", e))
}
