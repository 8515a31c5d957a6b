use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use dotenvy::dotenv;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower_http::catch_panic::CatchPanicLayer;
use tracing::info;

use festreg::config::Config;
use festreg::state::AppState;
use festreg::web::middleware::auth as auth_middleware;
use festreg::web::routes::{approval, roster};

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    // busy_timeout makes concurrent BEGIN IMMEDIATE attempts wait instead of
    // failing instantly; past the timeout they surface as ConcurrentConflict.
    let connect_options = SqliteConnectOptions::from_str(&db_url)
        .expect("DATABASE_URL is not a valid sqlite url")
        .busy_timeout(Duration::from_secs(5));
    let pool = SqlitePoolOptions::new()
        .connect_with(connect_options)
        .await
        .expect("cannot connect to database");

    let state = AppState::new(pool, Config::load());

    let protected_routes = Router::new()
        .route(
            "/colleges/:college_id/final-approval",
            post(approval::final_approval_handler),
        )
        .route(
            "/colleges/:college_id/approval-status",
            get(approval::approval_status_handler),
        )
        .route(
            "/colleges/:college_id/participants",
            get(approval::participants_handler),
        )
        .route(
            "/colleges/:college_id/accompanists",
            post(roster::create_accompanist_handler),
        )
        .route(
            "/colleges/:college_id/accompanists/:accompanist_id/remove",
            post(roster::remove_accompanist_handler),
        )
        .route(
            "/applications/:application_id/review",
            post(roster::review_application_handler),
        )
        .layer(middleware::from_fn(auth_middleware::require_principal));

    let app = Router::new()
        .route("/health", get(roster::health_handler))
        .merge(protected_routes)
        .layer(CatchPanicLayer::new())
        .with_state(state);

    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .expect("cannot parse host/port");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("cannot bind listener");
    info!(addr = %listener.local_addr().unwrap(), "festreg backend listening");

    axum::serve(listener, app).await.unwrap();
}
