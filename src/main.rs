//! eventforge backend
//!
//! Main application entry point: loads configuration, wires the document
//! store and services, then waits for shutdown. The HTTP routing layer is an
//! external consumer of the assembled [`ServiceFactory`].

use std::sync::Arc;

use tracing::info;

use eventforge::services::text::HttpTextAnalyzer;
use eventforge::store::postgres::{create_pool, run_migrations, PostgresStore};
use eventforge::{utils::logging, ServiceFactory, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // The guard keeps the file log writer alive until shutdown
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting eventforge backend...");

    // Initialize the document store backend
    info!("Connecting to database...");
    let pool = create_pool(&settings.database).await?;
    run_migrations(&pool).await?;
    let store = Arc::new(PostgresStore::new(pool));

    // Initialize the text analysis client
    let analyzer = Arc::new(HttpTextAnalyzer::new(settings.text_analysis.clone())?);

    // Wire services with explicit dependencies
    info!("Initializing services...");
    let _services = ServiceFactory::new(store, analyzer, settings)?;

    info!("eventforge backend is ready");

    tokio::signal::ctrl_c().await?;
    info!("eventforge backend has been shut down.");

    Ok(())
}
