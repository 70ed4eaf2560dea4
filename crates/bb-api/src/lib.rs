//! # bb-api
//!
//! The web routing and orchestration layer for the bounty board.

pub mod handlers;
pub mod middleware;

use actix_web::web;

/// Configures the REST routes.
///
/// # Developer Note
/// We use a scoped configuration to allow the main binary to mount
/// the API under different paths if needed (e.g., /api/v1/).
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("")
            .route("/", web::get().to(handlers::index))
            // Bounty browsing and creation
            .route("/bounties", web::get().to(handlers::list_bounties))
            .route("/bounties", web::post().to(handlers::create_bounty))
            .route("/bounties/{id}", web::get().to(handlers::get_bounty))
            // Work submitted against bounties
            .route("/submissions", web::get().to(handlers::list_submissions))
            .route("/submissions", web::post().to(handlers::create_submission))
            // Per-user aggregates
            .route("/stats", web::get().to(handlers::stats))
            .route("/leaderboard", web::get().to(handlers::leaderboard)),
    );
}
