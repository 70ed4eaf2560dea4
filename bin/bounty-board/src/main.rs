//! # Bounty-Board Binary
//!
//! The entry point that assembles the application based on compile-time features.

use actix_web::{web, App, HttpServer};
use bb_api::handlers::AppState;
use bb_api::middleware;
use std::sync::Arc;

// Feature-gated imports: swap backends without touching the wiring below.
#[cfg(feature = "db-sqlite")]
use bb_db_sqlite::SqliteBountyRepo;

#[cfg(feature = "auth-token")]
use bb_auth_token::TokenAuthProvider;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:bounty_board.db".to_string());
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());

    // 1. Initialize Database Implementation
    #[cfg(feature = "db-sqlite")]
    let repo: Arc<dyn bb_core::traits::BountyRepo> = Arc::new(
        SqliteBountyRepo::new(&database_url)
            .await
            .expect("Failed to init SQLite"),
    );

    // 2. Initialize Auth Implementation
    #[cfg(feature = "auth-token")]
    let auth = TokenAuthProvider::new(repo.clone());

    // 3. Wrap in AppState (dynamic dispatch keeps the handlers backend-agnostic)
    let state = web::Data::new(AppState {
        repo,
        auth: Arc::new(auth),
    });

    log::info!("🚀 Bounty board listening on http://{bind_addr}");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::standard_middleware())
            .wrap(middleware::cors_policy())
            .configure(bb_api::configure_routes)
    })
    .bind(bind_addr)?
    .run()
    .await
}
