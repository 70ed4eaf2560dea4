//! # Core Traits (Ports)
//!
//! Any backend must implement these traits to be used by the binary.

use crate::models::{
    Bounty, BountyFilter, BountyWithRelations, LeaderboardEntry, Submission, SubmissionFilter,
    SubmissionWithRelations, User, UserStats,
};
use async_trait::async_trait;
use uuid::Uuid;

/// Data persistence contract for users, bounties, and submissions.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait BountyRepo: Send + Sync {
    // Bounty operations
    async fn list_bounties(&self, filter: BountyFilter)
        -> anyhow::Result<Vec<BountyWithRelations>>;
    async fn get_bounty(&self, id: Uuid) -> anyhow::Result<Option<BountyWithRelations>>;
    async fn create_bounty(&self, bounty: Bounty) -> anyhow::Result<BountyWithRelations>;

    // Submission operations
    async fn list_submissions(
        &self,
        filter: SubmissionFilter,
    ) -> anyhow::Result<Vec<SubmissionWithRelations>>;
    async fn create_submission(
        &self,
        submission: Submission,
    ) -> anyhow::Result<SubmissionWithRelations>;

    // User operations
    /// Inserts a user row. `token_hash` is the SHA-256 hex digest of the
    /// user's API token; `None` leaves the account without API access.
    async fn create_user(&self, user: User, token_hash: Option<String>) -> anyhow::Result<()>;
    async fn find_user_by_token_hash(&self, token_hash: &str) -> anyhow::Result<Option<User>>;

    // Aggregation
    async fn user_stats(&self, user_id: Uuid) -> anyhow::Result<UserStats>;
    async fn leaderboard(&self, limit: i64) -> anyhow::Result<Vec<LeaderboardEntry>>;
}

/// Acting-user resolution contract.
///
/// Mutations never trust a client-asserted user id; they go through this
/// port with the client-held bearer token instead.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Resolves a bearer token to the user it belongs to. Unknown or
    /// revoked tokens resolve to `None`.
    async fn resolve_token(&self, token: &str) -> anyhow::Result<Option<User>>;
}
