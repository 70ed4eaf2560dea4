//! # Domain Models
//!
//! These structs represent the core entities of the bounty board.
//! We use UUID v7 for time-ordered, globally unique identification, and
//! camelCase serde names to match the wire contract the UI consumes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Reward denomination applied when a bounty does not name one.
pub const DEFAULT_REWARD_CURRENCY: &str = "APT";

/// A registered participant.
///
/// `earnings` is a stored balance maintained by external settlement; it is
/// not derived from submission approvals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub avatar: Option<String>,
    pub wallet_address: Option<String>,
    pub earnings: f64,
    pub created_at: DateTime<Utc>,
}

/// Classification tag on a bounty. Wire format is lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BountyCategory {
    Design,
    Video,
    Content,
    Development,
    Social,
    Educational,
}

impl BountyCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Design => "design",
            Self::Video => "video",
            Self::Content => "content",
            Self::Development => "development",
            Self::Social => "social",
            Self::Educational => "educational",
        }
    }
}

impl std::str::FromStr for BountyCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "design" => Ok(Self::Design),
            "video" => Ok(Self::Video),
            "content" => Ok(Self::Content),
            "development" => Ok(Self::Development),
            "social" => Ok(Self::Social),
            "educational" => Ok(Self::Educational),
            other => Err(AppError::ValidationError(format!(
                "unknown category: {other}"
            ))),
        }
    }
}

/// Lifecycle state of a bounty. No transition logic is enforced here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BountyStatus {
    Open,
    InReview,
    Completed,
    Cancelled,
}

impl BountyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::InReview => "IN_REVIEW",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl std::str::FromStr for BountyStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OPEN" => Ok(Self::Open),
            "IN_REVIEW" => Ok(Self::InReview),
            "COMPLETED" => Ok(Self::Completed),
            "CANCELLED" => Ok(Self::Cancelled),
            other => Err(AppError::ValidationError(format!("unknown status: {other}"))),
        }
    }
}

/// Review state of a submission. Transitions are administrative and happen
/// outside this service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionStatus {
    Pending,
    Approved,
    Rejected,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "APPROVED" => Ok(Self::Approved),
            "REJECTED" => Ok(Self::Rejected),
            other => Err(AppError::ValidationError(format!("unknown status: {other}"))),
        }
    }
}

/// A task posted with a monetary reward, owned by a creator and open for
/// submissions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounty {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub reward: f64,
    pub reward_currency: String,
    pub category: BountyCategory,
    pub project: String,
    pub status: BountyStatus,
    pub due_date: Option<DateTime<Utc>>,
    /// Advisory completion indicator, 0–100.
    pub progress: i64,
    /// Ordered labels; stored as a JSON array in the database.
    pub tags: Vec<String>,
    pub creator_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Work submitted by a user against a specific bounty.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: Uuid,
    pub bounty_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub status: SubmissionStatus,
    pub created_at: DateTime<Utc>,
}

/// Creator/submitter projection embedded in listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub username: String,
    pub avatar: Option<String>,
}

/// Bounty projection embedded under submissions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BountySummary {
    pub id: Uuid,
    pub title: String,
    pub reward: f64,
    pub reward_currency: String,
}

/// A submission joined with its submitter, as embedded under a bounty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionWithUser {
    #[serde(flatten)]
    pub submission: Submission,
    pub user: UserSummary,
}

/// A bounty with everything the listing endpoints embed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BountyWithRelations {
    #[serde(flatten)]
    pub bounty: Bounty,
    pub creator: UserSummary,
    pub submissions: Vec<SubmissionWithUser>,
}

/// A submission joined with both its bounty and submitter, as returned by
/// the submissions endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionWithRelations {
    #[serde(flatten)]
    pub submission: Submission,
    pub bounty: BountySummary,
    pub user: UserSummary,
}

/// Listing predicate for bounties. `None` means no constraint on that
/// field; the API layer maps the `all` sentinel to `None`.
#[derive(Debug, Clone, Default)]
pub struct BountyFilter {
    pub category: Option<BountyCategory>,
    pub status: Option<BountyStatus>,
    /// Case-insensitive substring, OR-combined across title, description,
    /// and project.
    pub search: Option<String>,
}

/// Listing predicate for submissions.
#[derive(Debug, Clone, Default)]
pub struct SubmissionFilter {
    pub bounty_id: Option<Uuid>,
    pub status: Option<SubmissionStatus>,
}

/// Per-user dashboard aggregates, recomputed on every call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub earnings: f64,
    pub tasks_count: i64,
    pub recent_submissions: Vec<SubmissionWithRelations>,
    pub recent_bounties: Vec<Bounty>,
}

/// One leaderboard row: users ranked by earnings, ties broken by approved
/// submission count.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub user: UserSummary,
    pub earnings: f64,
    pub completed_count: i64,
}
