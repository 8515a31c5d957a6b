use std::env;
use std::str::FromStr;

use dotenvy::dotenv;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use uuid::Uuid;

use festreg::database::qr_pool_repo;

// Replenishes the QR code pool; run this before registration opens and again
// whenever final approval starts reporting pool_exhausted.
#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let connect_options = SqliteConnectOptions::from_str(&db_url)
        .expect("DATABASE_URL is not a valid sqlite url");
    let pool = SqlitePoolOptions::new()
        .connect_with(connect_options)
        .await
        .expect("cannot connect to database");

    let count: usize = env::var("QR_SEED_COUNT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(500);
    let prefix = env::var("QR_CODE_PREFIX").unwrap_or_else(|_| "FEST".to_string());

    let entries: Vec<(String, String)> = (0..count)
        .map(|_| {
            let id = Uuid::new_v4().to_string();
            let code = format!("{}-{}", prefix, Uuid::new_v4());
            (id, code)
        })
        .collect();

    match qr_pool_repo::insert_entries(&pool, &entries).await {
        Ok(inserted) => {
            println!("qr pool seed: requested={}, inserted={}", count, inserted);
        }
        Err(e) => {
            eprintln!("qr pool seed failed: {}", e);
            std::process::exit(1);
        }
    }
}
