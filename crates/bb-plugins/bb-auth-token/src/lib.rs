//! # bb-auth-token
//!
//! Bearer-token implementation of `AuthProvider`. Clients hold an opaque
//! token; only its SHA-256 digest is stored on the user row, so a leaked
//! database never yields usable credentials.

use async_trait::async_trait;
use bb_core::models::User;
use bb_core::traits::{AuthProvider, BountyRepo};
use sha2::{Digest, Sha256};
use std::sync::Arc;

/// Hex digest of a raw API token, as stored in `users.token_hash`.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

pub struct TokenAuthProvider {
    repo: Arc<dyn BountyRepo>,
}

impl TokenAuthProvider {
    pub fn new(repo: Arc<dyn BountyRepo>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl AuthProvider for TokenAuthProvider {
    /// Resolves a bearer token to its owner. Unknown tokens resolve to
    /// `None`; the HTTP layer decides how to surface that.
    async fn resolve_token(&self, token: &str) -> anyhow::Result<Option<User>> {
        if token.is_empty() {
            return Ok(None);
        }
        self.repo.find_user_by_token_hash(&hash_token(token)).await
    }
}
