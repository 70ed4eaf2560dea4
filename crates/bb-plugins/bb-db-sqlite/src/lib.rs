//! # bb-db-sqlite Implementation
//!
//! This module implements the data mapping between the SQLite relational
//! model and the `bb-core` domain models.

use async_trait::async_trait;
use bb_core::models::{
    Bounty, BountyFilter, BountySummary, BountyWithRelations, LeaderboardEntry, Submission,
    SubmissionFilter, SubmissionStatus, SubmissionWithRelations, SubmissionWithUser, User,
    UserStats, UserSummary,
};
use bb_core::traits::BountyRepo;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use std::str::FromStr;
use uuid::Uuid;

/// Schema applied idempotently at pool construction. Foreign keys carry the
/// referential integrity; the application layer never re-checks them.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS users (
        id              BLOB PRIMARY KEY,
        email           TEXT NOT NULL UNIQUE,
        username        TEXT NOT NULL,
        avatar          TEXT,
        wallet_address  TEXT,
        earnings        REAL NOT NULL DEFAULT 0,
        token_hash      TEXT UNIQUE,
        created_at      TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS bounties (
        id              BLOB PRIMARY KEY,
        title           TEXT NOT NULL,
        description     TEXT NOT NULL,
        reward          REAL NOT NULL,
        reward_currency TEXT NOT NULL,
        category        TEXT NOT NULL,
        project         TEXT NOT NULL,
        status          TEXT NOT NULL,
        due_date        TEXT,
        progress        INTEGER NOT NULL DEFAULT 0,
        tags            TEXT NOT NULL DEFAULT '[]',
        creator_id      BLOB NOT NULL REFERENCES users(id),
        created_at      TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS submissions (
        id              BLOB PRIMARY KEY,
        bounty_id       BLOB NOT NULL REFERENCES bounties(id),
        user_id         BLOB NOT NULL REFERENCES users(id),
        content         TEXT NOT NULL,
        status          TEXT NOT NULL,
        created_at      TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_bounties_created_at ON bounties(created_at)",
    "CREATE INDEX IF NOT EXISTS idx_submissions_bounty ON submissions(bounty_id)",
    "CREATE INDEX IF NOT EXISTS idx_submissions_user ON submissions(user_id)",
];

pub struct SqliteBountyRepo {
    pool: SqlitePool,
}

// Helpers for UUID conversion
fn uuid_to_blob(id: Uuid) -> Vec<u8> {
    id.as_bytes().to_vec()
}

fn blob_to_uuid(blob: &[u8]) -> Uuid {
    Uuid::from_slice(blob).unwrap_or_default()
}

fn user_from_row(row: &SqliteRow) -> User {
    User {
        id: blob_to_uuid(row.get::<Vec<u8>, _>("id").as_slice()),
        email: row.get("email"),
        username: row.get("username"),
        avatar: row.get("avatar"),
        wallet_address: row.get("wallet_address"),
        earnings: row.get("earnings"),
        created_at: row.get("created_at"),
    }
}

fn bounty_from_row(row: &SqliteRow) -> anyhow::Result<Bounty> {
    Ok(Bounty {
        id: blob_to_uuid(row.get::<Vec<u8>, _>("id").as_slice()),
        title: row.get("title"),
        description: row.get("description"),
        reward: row.get("reward"),
        reward_currency: row.get("reward_currency"),
        category: row.get::<String, _>("category").parse()?,
        project: row.get("project"),
        status: row.get::<String, _>("status").parse()?,
        due_date: row.get("due_date"),
        progress: row.get("progress"),
        tags: serde_json::from_str(&row.get::<String, _>("tags")).unwrap_or_default(),
        creator_id: blob_to_uuid(row.get::<Vec<u8>, _>("creator_id").as_slice()),
        created_at: row.get("created_at"),
    })
}

fn submission_from_row(row: &SqliteRow) -> anyhow::Result<Submission> {
    Ok(Submission {
        id: blob_to_uuid(row.get::<Vec<u8>, _>("id").as_slice()),
        bounty_id: blob_to_uuid(row.get::<Vec<u8>, _>("bounty_id").as_slice()),
        user_id: blob_to_uuid(row.get::<Vec<u8>, _>("user_id").as_slice()),
        content: row.get("content"),
        status: row.get::<String, _>("status").parse()?,
        created_at: row.get("created_at"),
    })
}

/// Maps a row from the submissions/users/bounties three-way join.
fn submission_with_relations_from_row(row: &SqliteRow) -> anyhow::Result<SubmissionWithRelations> {
    let submission = submission_from_row(row)?;
    Ok(SubmissionWithRelations {
        bounty: BountySummary {
            id: submission.bounty_id,
            title: row.get("bounty_title"),
            reward: row.get("bounty_reward"),
            reward_currency: row.get("bounty_reward_currency"),
        },
        user: UserSummary {
            id: submission.user_id,
            username: row.get("username"),
            avatar: row.get("avatar"),
        },
        submission,
    })
}

impl SqliteBountyRepo {
    /// Connects, creating the database file if needed, and applies the
    /// schema.
    pub async fn new(url: &str) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        // A :memory: database is private to its connection; a single
        // connection keeps every statement on the same schema.
        let max_connections = if url.contains(":memory:") { 1 } else { 5 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        let repo = Self { pool };
        repo.migrate().await?;
        Ok(repo)
    }

    async fn migrate(&self) -> anyhow::Result<()> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        log::debug!("sqlite schema up to date");
        Ok(())
    }

    /// Assembles a bounty row (already joined with its creator) and its
    /// submissions.
    async fn bounty_with_relations(&self, row: &SqliteRow) -> anyhow::Result<BountyWithRelations> {
        let bounty = bounty_from_row(row)?;
        let submissions = self.submissions_for_bounty(bounty.id).await?;
        Ok(BountyWithRelations {
            creator: UserSummary {
                id: bounty.creator_id,
                username: row.get("username"),
                avatar: row.get("avatar"),
            },
            bounty,
            submissions,
        })
    }

    async fn submissions_for_bounty(
        &self,
        bounty_id: Uuid,
    ) -> anyhow::Result<Vec<SubmissionWithUser>> {
        let rows = sqlx::query(
            "SELECT s.*, u.username, u.avatar FROM submissions s \
             JOIN users u ON u.id = s.user_id \
             WHERE s.bounty_id = ? ORDER BY s.created_at DESC",
        )
        .bind(uuid_to_blob(bounty_id))
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                let submission = submission_from_row(row)?;
                Ok(SubmissionWithUser {
                    user: UserSummary {
                        id: submission.user_id,
                        username: row.get("username"),
                        avatar: row.get("avatar"),
                    },
                    submission,
                })
            })
            .collect()
    }

    async fn get_submission(&self, id: Uuid) -> anyhow::Result<Option<SubmissionWithRelations>> {
        let row = sqlx::query(
            "SELECT s.*, u.username, u.avatar, \
             b.title AS bounty_title, b.reward AS bounty_reward, \
             b.reward_currency AS bounty_reward_currency \
             FROM submissions s \
             JOIN users u ON u.id = s.user_id \
             JOIN bounties b ON b.id = s.bounty_id \
             WHERE s.id = ?",
        )
        .bind(uuid_to_blob(id))
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(submission_with_relations_from_row).transpose()
    }
}

#[async_trait]
impl BountyRepo for SqliteBountyRepo {
    /// Newest-first listing with dynamic predicates. Category and status
    /// match exactly; the search term matches case-insensitively across
    /// title, description, and project.
    async fn list_bounties(
        &self,
        filter: BountyFilter,
    ) -> anyhow::Result<Vec<BountyWithRelations>> {
        let mut sql = String::from(
            "SELECT b.*, u.username, u.avatar FROM bounties b \
             JOIN users u ON u.id = b.creator_id WHERE 1=1",
        );
        if filter.category.is_some() {
            sql.push_str(" AND b.category = ?");
        }
        if filter.status.is_some() {
            sql.push_str(" AND b.status = ?");
        }
        if filter.search.is_some() {
            sql.push_str(
                " AND (LOWER(b.title) LIKE ? OR LOWER(b.description) LIKE ? \
                 OR LOWER(b.project) LIKE ?)",
            );
        }
        sql.push_str(" ORDER BY b.created_at DESC");

        let mut query = sqlx::query(&sql);
        if let Some(category) = filter.category {
            query = query.bind(category.as_str());
        }
        if let Some(status) = filter.status {
            query = query.bind(status.as_str());
        }
        if let Some(search) = &filter.search {
            let pattern = format!("%{}%", search.to_lowercase());
            query = query.bind(pattern.clone()).bind(pattern.clone()).bind(pattern);
        }

        let rows = query.fetch_all(&self.pool).await?;
        let mut bounties = Vec::with_capacity(rows.len());
        for row in &rows {
            bounties.push(self.bounty_with_relations(row).await?);
        }
        Ok(bounties)
    }

    async fn get_bounty(&self, id: Uuid) -> anyhow::Result<Option<BountyWithRelations>> {
        let row = sqlx::query(
            "SELECT b.*, u.username, u.avatar FROM bounties b \
             JOIN users u ON u.id = b.creator_id WHERE b.id = ?",
        )
        .bind(uuid_to_blob(id))
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.bounty_with_relations(&row).await?)),
            None => Ok(None),
        }
    }

    async fn create_bounty(&self, bounty: Bounty) -> anyhow::Result<BountyWithRelations> {
        sqlx::query(
            "INSERT INTO bounties (id, title, description, reward, reward_currency, \
             category, project, status, due_date, progress, tags, creator_id, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(uuid_to_blob(bounty.id))
        .bind(&bounty.title)
        .bind(&bounty.description)
        .bind(bounty.reward)
        .bind(&bounty.reward_currency)
        .bind(bounty.category.as_str())
        .bind(&bounty.project)
        .bind(bounty.status.as_str())
        .bind(bounty.due_date)
        .bind(bounty.progress)
        .bind(serde_json::to_string(&bounty.tags)?)
        .bind(uuid_to_blob(bounty.creator_id))
        .bind(bounty.created_at)
        .execute(&self.pool)
        .await?;

        self.get_bounty(bounty.id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("bounty {} missing after insert", bounty.id))
    }

    async fn list_submissions(
        &self,
        filter: SubmissionFilter,
    ) -> anyhow::Result<Vec<SubmissionWithRelations>> {
        let mut sql = String::from(
            "SELECT s.*, u.username, u.avatar, \
             b.title AS bounty_title, b.reward AS bounty_reward, \
             b.reward_currency AS bounty_reward_currency \
             FROM submissions s \
             JOIN users u ON u.id = s.user_id \
             JOIN bounties b ON b.id = s.bounty_id WHERE 1=1",
        );
        if filter.bounty_id.is_some() {
            sql.push_str(" AND s.bounty_id = ?");
        }
        if filter.status.is_some() {
            sql.push_str(" AND s.status = ?");
        }
        sql.push_str(" ORDER BY s.created_at DESC");

        let mut query = sqlx::query(&sql);
        if let Some(bounty_id) = filter.bounty_id {
            query = query.bind(uuid_to_blob(bounty_id));
        }
        if let Some(status) = filter.status {
            query = query.bind(status.as_str());
        }

        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(submission_with_relations_from_row).collect()
    }

    async fn create_submission(
        &self,
        submission: Submission,
    ) -> anyhow::Result<SubmissionWithRelations> {
        sqlx::query(
            "INSERT INTO submissions (id, bounty_id, user_id, content, status, created_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(uuid_to_blob(submission.id))
        .bind(uuid_to_blob(submission.bounty_id))
        .bind(uuid_to_blob(submission.user_id))
        .bind(&submission.content)
        .bind(submission.status.as_str())
        .bind(submission.created_at)
        .execute(&self.pool)
        .await?;

        self.get_submission(submission.id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("submission {} missing after insert", submission.id))
    }

    async fn create_user(&self, user: User, token_hash: Option<String>) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO users (id, email, username, avatar, wallet_address, \
             earnings, token_hash, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(uuid_to_blob(user.id))
        .bind(&user.email)
        .bind(&user.username)
        .bind(&user.avatar)
        .bind(&user.wallet_address)
        .bind(user.earnings)
        .bind(token_hash)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_user_by_token_hash(&self, token_hash: &str) -> anyhow::Result<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE token_hash = ?")
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(user_from_row))
    }

    /// Recomputed on every call; `earnings` is the stored balance, not a
    /// sum over approved submissions.
    async fn user_stats(&self, user_id: Uuid) -> anyhow::Result<UserStats> {
        let earnings = sqlx::query("SELECT earnings FROM users WHERE id = ?")
            .bind(uuid_to_blob(user_id))
            .fetch_optional(&self.pool)
            .await?
            .map(|row| row.get("earnings"))
            .unwrap_or(0.0);

        let tasks_count = sqlx::query("SELECT COUNT(*) AS task_count FROM bounties WHERE creator_id = ?")
            .bind(uuid_to_blob(user_id))
            .fetch_one(&self.pool)
            .await?
            .get("task_count");

        let submission_rows = sqlx::query(
            "SELECT s.*, u.username, u.avatar, \
             b.title AS bounty_title, b.reward AS bounty_reward, \
             b.reward_currency AS bounty_reward_currency \
             FROM submissions s \
             JOIN users u ON u.id = s.user_id \
             JOIN bounties b ON b.id = s.bounty_id \
             WHERE s.user_id = ? ORDER BY s.created_at DESC LIMIT 5",
        )
        .bind(uuid_to_blob(user_id))
        .fetch_all(&self.pool)
        .await?;
        let recent_submissions = submission_rows
            .iter()
            .map(submission_with_relations_from_row)
            .collect::<anyhow::Result<Vec<_>>>()?;

        let bounty_rows = sqlx::query(
            "SELECT * FROM bounties WHERE creator_id = ? ORDER BY created_at DESC LIMIT 5",
        )
        .bind(uuid_to_blob(user_id))
        .fetch_all(&self.pool)
        .await?;
        let recent_bounties = bounty_rows
            .iter()
            .map(bounty_from_row)
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(UserStats {
            earnings,
            tasks_count,
            recent_submissions,
            recent_bounties,
        })
    }

    async fn leaderboard(&self, limit: i64) -> anyhow::Result<Vec<LeaderboardEntry>> {
        let rows = sqlx::query(
            "SELECT u.id, u.username, u.avatar, u.earnings, \
             (SELECT COUNT(*) FROM submissions s \
              WHERE s.user_id = u.id AND s.status = ?) AS completed_count \
             FROM users u \
             ORDER BY u.earnings DESC, completed_count DESC LIMIT ?",
        )
        .bind(SubmissionStatus::Approved.as_str())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .enumerate()
            .map(|(index, row)| LeaderboardEntry {
                rank: index + 1,
                user: UserSummary {
                    id: blob_to_uuid(row.get::<Vec<u8>, _>("id").as_slice()),
                    username: row.get("username"),
                    avatar: row.get("avatar"),
                },
                earnings: row.get("earnings"),
                completed_count: row.get("completed_count"),
            })
            .collect())
    }
}
