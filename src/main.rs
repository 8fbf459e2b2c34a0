use std::sync::Arc;

use my_well_self::api::routes::create_routes;
use my_well_self::api::AppState;
use my_well_self::config::{AppConfig, StoreSeeder};
use my_well_self::services::{AssessmentPipelineService, GenerationService, OpenAiClient};
use my_well_self::storage::{MemStorage, Storage};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    // The store is non-persistent; every start reseeds the demo data
    let store: Arc<dyn Storage> = Arc::new(MemStorage::new());
    StoreSeeder::new(store.clone()).seed_all().await?;

    let client = OpenAiClient::with_base_url(
        config.openai_api_key.clone(),
        config.openai_base_url.clone(),
    )?;
    let generation = Arc::new(GenerationService::new(client));
    let pipeline = Arc::new(AssessmentPipelineService::new(
        store.clone(),
        generation.clone(),
    ));

    let app = create_routes(AppState {
        store,
        generation,
        pipeline,
    });

    // Start the server
    let listener = TcpListener::bind(config.server_address()).await?;
    info!(
        "My Well Self server starting on http://{}",
        config.server_address()
    );
    info!(
        "Health check available at http://{}/health",
        config.server_address()
    );

    axum::serve(listener, app).await?;

    Ok(())
}
