use anyhow::Context;
use hrdocs::config::AppConfig;
use hrdocs::db::favorite_repository::MongoFavoriteRepository;
use hrdocs::demo_seeder;
use hrdocs::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hrdocs=info,tower_http=info".into()),
        )
        .init();

    tracing::info!("Starting HR document catalog server...");

    let config = AppConfig::from_env().context("Failed to load configuration")?;

    // Connect to MongoDB. The driver connects lazily, so an unreachable
    // server only shows up in request errors and the /test diagnostics.
    let mongo_client = mongodb::Client::with_uri_str(config.mongo_uri())
        .await
        .context("Failed to create MongoDB client")?;
    let mongo_db = mongo_client.database(config.database());

    tracing::info!(
        "Using MongoDB at {} (database '{}')",
        config.redacted_mongo_uri(),
        config.database()
    );

    if let Err(e) = MongoFavoriteRepository::new(&mongo_db).ensure_indexes().await {
        tracing::warn!("Failed to create favorite indexes: {}", e);
    }

    let app_state = AppState::from_mongo(&mongo_db, config.explicit_settings());

    if config.seed_demo_data {
        demo_seeder::seed_demo_data(app_state.document_repo.as_ref()).await;
    }

    let app = hrdocs::app::router(app_state);

    // Start the server
    let addr = config.socket_addr();
    tracing::info!("Listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
