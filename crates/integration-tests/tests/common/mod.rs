#![allow(dead_code)]

use actix_web::web;
use bb_api::handlers::AppState;
use bb_auth_token::{hash_token, TokenAuthProvider};
use bb_core::models::User;
use bb_core::traits::BountyRepo;
use bb_db_sqlite::SqliteBountyRepo;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// Bearer token seeded for the demo user in every harness.
pub const DEMO_TOKEN: &str = "itest-demo-token";

pub struct Harness {
    /// Direct repository handle for seeding beyond what the API exposes.
    pub repo: Arc<SqliteBountyRepo>,
    pub state: web::Data<AppState>,
    pub demo: User,
}

/// Fresh in-memory database with a single authenticated demo user.
pub async fn harness() -> Harness {
    let repo = Arc::new(
        SqliteBountyRepo::new("sqlite::memory:")
            .await
            .expect("in-memory sqlite"),
    );

    let demo = User {
        id: Uuid::now_v7(),
        email: "demo@example.com".into(),
        username: "demo_user".into(),
        avatar: None,
        wallet_address: Some("0x1234567890123456789012345678901234567890".into()),
        earnings: 19.0,
        created_at: Utc::now(),
    };
    repo.create_user(demo.clone(), Some(hash_token(DEMO_TOKEN)))
        .await
        .expect("seed demo user");

    let shared: Arc<dyn BountyRepo> = repo.clone();
    let state = web::Data::new(AppState {
        repo: shared.clone(),
        auth: Arc::new(TokenAuthProvider::new(shared)),
    });

    Harness { repo, state, demo }
}

/// Registers another user, optionally with an API token of their own.
pub async fn add_user(
    harness: &Harness,
    email: &str,
    username: &str,
    earnings: f64,
    token: Option<&str>,
) -> User {
    let user = User {
        id: Uuid::now_v7(),
        email: email.into(),
        username: username.into(),
        avatar: None,
        wallet_address: None,
        earnings,
        created_at: Utc::now(),
    };
    harness
        .repo
        .create_user(user.clone(), token.map(hash_token))
        .await
        .expect("seed user");
    user
}

pub fn bearer() -> (&'static str, String) {
    ("Authorization", format!("Bearer {DEMO_TOKEN}"))
}

pub fn bearer_for(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}
