use habitlog_api::server::{self, AppState};
use habitlog_api::{config, database};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("starting habitlog-api in {:?} mode", config.environment);

    // Unreachable storage at boot is the only condition that ends the
    // process; once serving, storage faults fail single requests.
    let pool = match database::connect(&config.database).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = database::init_schema(&pool).await {
        tracing::error!("schema initialization failed: {}", e);
        std::process::exit(1);
    }

    server::serve(AppState { db: pool }).await;
}
