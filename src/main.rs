use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use income_dashboard::auth::hash_password;
use income_dashboard::db::{create_pool, PgCredentialStore};
use income_dashboard::{router, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "income_dashboard=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // `income-dashboard hash-password <password>` prints a value for users.password_hash
    let args: Vec<String> = std::env::args().skip(1).collect();
    if let [command, password] = args.as_slice() {
        if command == "hash-password" {
            println!("{}", hash_password(password)?);
            return Ok(());
        }
    }

    tracing::info!("Starting Income Dashboard...");

    // Load configuration
    let config = Config::from_env()?;

    tracing::info!(
        "Environment: {}, Server: {}, Data: {:?}",
        config.environment,
        config.server_address(),
        config.data_dir
    );

    // Create database connection pool
    let pool = create_pool(&config.database).await?;

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Migrations complete");

    let addr: SocketAddr = config.server_address().parse()?;
    let state = AppState::new(config, Arc::new(PgCredentialStore::new(pool)))?;
    let app = router(state);

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
