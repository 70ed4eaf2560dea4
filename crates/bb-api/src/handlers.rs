//! # bb-api Handlers
//!
//! This module coordinates the flow between HTTP requests and Core traits.

use actix_web::http::{header, StatusCode};
use actix_web::{web, HttpRequest, HttpResponse, ResponseError};
use bb_core::error::AppError;
use bb_core::models::{
    Bounty, BountyCategory, BountyFilter, BountyStatus, Submission, SubmissionFilter,
    SubmissionStatus, User, DEFAULT_REWARD_CURRENCY,
};
use bb_core::traits::{AuthProvider, BountyRepo};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;
use serde_json::json;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

/// Rows returned by /leaderboard when the caller does not ask for a count.
const DEFAULT_LEADERBOARD_LIMIT: i64 = 10;

/// State shared across all Actix-web workers.
pub struct AppState {
    pub repo: Arc<dyn BountyRepo>,
    pub auth: Arc<dyn AuthProvider>,
}

/// Wire-level error. Every failure renders as `{"error": <message>}` with
/// the status derived from the underlying [`AppError`] variant.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            AppError::NotFound(..) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.0.to_string() }))
    }
}

/// Maps a persistence failure onto a fixed-message 500, logging the cause.
fn internal(message: &'static str) -> impl FnOnce(anyhow::Error) -> ApiError {
    move |err| {
        log::error!("{message}: {err:#}");
        ApiError(AppError::Internal(message.to_string()))
    }
}

/// Resolves the acting user from the `Authorization: Bearer` header.
async fn acting_user(state: &AppState, req: &HttpRequest) -> Result<User, ApiError> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError(AppError::Unauthorized("missing bearer token".to_string())))?;

    let token = header_value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError(AppError::Unauthorized("missing bearer token".to_string())))?;

    state
        .auth
        .resolve_token(token)
        .await
        .map_err(internal("failed to resolve token"))?
        .ok_or_else(|| ApiError(AppError::Unauthorized("unknown or revoked token".to_string())))
}

/// Maps an optional filter parameter onto a typed value. Absent, blank,
/// and the `all` sentinel all mean "no filter on this field".
fn parse_filter<T: FromStr<Err = AppError>>(raw: &Option<String>) -> Result<Option<T>, ApiError> {
    match raw.as_deref().map(str::trim) {
        None | Some("") | Some("all") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(ApiError),
    }
}

fn parse_uuid(field: &str, raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| ApiError(AppError::ValidationError(format!("{field} must be a UUID"))))
}

fn require(field: &str, value: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Accepts a JSON number or a numeric string. Anything that does not parse
/// to a finite, non-negative float is rejected; NaN never reaches storage.
fn parse_reward(raw: &serde_json::Value) -> Result<f64, AppError> {
    let reward = match raw {
        serde_json::Value::Number(number) => number.as_f64(),
        serde_json::Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| AppError::ValidationError("reward must be a number".to_string()))?;

    if !reward.is_finite() || reward < 0.0 {
        return Err(AppError::ValidationError(
            "reward must be a non-negative number".to_string(),
        ));
    }
    Ok(reward)
}

/// Accepts RFC 3339 timestamps or plain `YYYY-MM-DD` dates (midnight UTC).
/// Absent or blank means no deadline.
fn parse_due_date(raw: Option<&str>) -> Result<Option<DateTime<Utc>>, AppError> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(value) => value,
    };

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(timestamp.with_timezone(&Utc)));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(Some(date.and_time(NaiveTime::MIN).and_utc()));
    }

    Err(AppError::ValidationError(format!(
        "dueDate is not a recognized date: {raw}"
    )))
}

/// A simple service banner for "/".
pub async fn index() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "service": "bounty-board",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "ok",
    }))
}

#[derive(Debug, Deserialize)]
pub struct BountyListQuery {
    pub category: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
}

/// Lists bounties newest-first, with creator and submission embeds.
/// Filters AND together; the search term ORs across title, description,
/// and project.
pub async fn list_bounties(
    data: web::Data<AppState>,
    query: web::Query<BountyListQuery>,
) -> Result<HttpResponse, ApiError> {
    let filter = BountyFilter {
        category: parse_filter(&query.category)?,
        status: parse_filter(&query.status)?,
        search: query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_string),
    };

    let bounties = data
        .repo
        .list_bounties(filter)
        .await
        .map_err(internal("failed to fetch bounties"))?;

    Ok(HttpResponse::Ok().json(bounties))
}

pub async fn get_bounty(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_uuid("id", &path.into_inner())?;

    let bounty = data
        .repo
        .get_bounty(id)
        .await
        .map_err(internal("failed to fetch bounty"))?
        .ok_or_else(|| ApiError(AppError::NotFound("Bounty".to_string(), id.to_string())))?;

    Ok(HttpResponse::Ok().json(bounty))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBountyRequest {
    pub title: String,
    pub description: String,
    /// Number or numeric string; the UI sends whatever its form state holds.
    pub reward: serde_json::Value,
    pub category: String,
    pub project: String,
    #[serde(default)]
    pub due_date: Option<String>,
    /// Pre-split by the caller; comma-splitting is a UI concern.
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub reward_currency: Option<String>,
}

/// Creates a bounty owned by the acting user. Responds 201 with the
/// created bounty, creator embedded.
pub async fn create_bounty(
    data: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<CreateBountyRequest>,
) -> Result<HttpResponse, ApiError> {
    let creator = acting_user(&data, &req).await?;

    let bounty = Bounty {
        id: Uuid::now_v7(),
        title: require("title", &body.title)?,
        description: require("description", &body.description)?,
        reward: parse_reward(&body.reward)?,
        reward_currency: body
            .reward_currency
            .as_deref()
            .map(str::trim)
            .filter(|currency| !currency.is_empty())
            .unwrap_or(DEFAULT_REWARD_CURRENCY)
            .to_string(),
        category: body.category.parse::<BountyCategory>()?,
        project: require("project", &body.project)?,
        status: BountyStatus::Open,
        due_date: parse_due_date(body.due_date.as_deref())?,
        progress: 0,
        tags: body.tags.clone(),
        creator_id: creator.id,
        created_at: Utc::now(),
    };

    let created = data
        .repo
        .create_bounty(bounty)
        .await
        .map_err(internal("failed to create bounty"))?;

    Ok(HttpResponse::Created().json(created))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionListQuery {
    pub bounty_id: Option<String>,
    pub status: Option<String>,
}

/// Lists submissions newest-first, with bounty and submitter embeds.
pub async fn list_submissions(
    data: web::Data<AppState>,
    query: web::Query<SubmissionListQuery>,
) -> Result<HttpResponse, ApiError> {
    let bounty_id = match query.bounty_id.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(parse_uuid("bountyId", raw)?),
    };
    let filter = SubmissionFilter {
        bounty_id,
        status: parse_filter(&query.status)?,
    };

    let submissions = data
        .repo
        .list_submissions(filter)
        .await
        .map_err(internal("failed to fetch submissions"))?;

    Ok(HttpResponse::Ok().json(submissions))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubmissionRequest {
    pub bounty_id: String,
    pub content: String,
}

/// Records work submitted by the acting user against an existing bounty.
/// Repeat submissions to the same bounty are allowed.
pub async fn create_submission(
    data: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<CreateSubmissionRequest>,
) -> Result<HttpResponse, ApiError> {
    let user = acting_user(&data, &req).await?;
    let bounty_id = parse_uuid("bountyId", &body.bounty_id)?;

    let bounty_exists = data
        .repo
        .get_bounty(bounty_id)
        .await
        .map_err(internal("failed to create submission"))?
        .is_some();
    if !bounty_exists {
        return Err(ApiError(AppError::NotFound(
            "Bounty".to_string(),
            bounty_id.to_string(),
        )));
    }

    let submission = Submission {
        id: Uuid::now_v7(),
        bounty_id,
        user_id: user.id,
        content: require("content", &body.content)?,
        status: SubmissionStatus::Pending,
        created_at: Utc::now(),
    };

    let created = data
        .repo
        .create_submission(submission)
        .await
        .map_err(internal("failed to create submission"))?;

    Ok(HttpResponse::Created().json(created))
}

/// Dashboard aggregates for the acting user.
pub async fn stats(data: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse, ApiError> {
    let user = acting_user(&data, &req).await?;

    let stats = data
        .repo
        .user_stats(user.id)
        .await
        .map_err(internal("failed to fetch stats"))?;

    Ok(HttpResponse::Ok().json(stats))
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<i64>,
}

/// Users ranked by earnings; approved submission counts break ties.
pub async fn leaderboard(
    data: web::Data<AppState>,
    query: web::Query<LeaderboardQuery>,
) -> Result<HttpResponse, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_LEADERBOARD_LIMIT).clamp(1, 100);

    let entries = data
        .repo
        .leaderboard(limit)
        .await
        .map_err(internal("failed to fetch leaderboard"))?;

    Ok(HttpResponse::Ok().json(entries))
}
