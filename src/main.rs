use devnet_api::config;
use devnet_api::database::manager::DatabaseManager;
use devnet_api::routes;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting Devnet API in {:?} mode", config.environment);

    // Apply schema if the database is reachable; the health endpoint reports
    // a degraded state otherwise
    if let Err(e) = DatabaseManager::ensure_schema().await {
        tracing::warn!("schema setup skipped: {}", e);
    }

    let app = routes::app();

    // Allow tests or deployments to override port via env
    let port = std::env::var("DEVNET_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(5000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Devnet API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
