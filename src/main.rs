use registrar::{app, ensure_database_exists, ensure_tables, seed, AppState, Config};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("registrar=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env();
    tracing::info!(database_url = %config.database_url, "starting");

    ensure_database_exists(&config.database_url).await?;
    let pool = config.connect().await?;
    ensure_tables(&pool).await?;
    seed(&pool).await?;

    let state = AppState { pool };
    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state)).await?;
    Ok(())
}
