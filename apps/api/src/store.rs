//! Record stores — where users and job postings come from.
//!
//! The matcher only sees the `UserStore` / `JobStore` traits. `PgStore` is the
//! production backend; tests swap in `memory::MemoryStore`.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::job::JobRow;
use crate::models::user::UserRow;

/// Lookup of a single user record by id.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user(&self, user_id: Uuid) -> Result<Option<UserRow>>;
}

/// Bulk fetch of every open job posting, in a stable order.
#[async_trait]
pub trait JobStore: Send + Sync {
    async fn list_jobs(&self) -> Result<Vec<JobRow>>;
}

/// PostgreSQL-backed store. Cloning shares the underlying pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_user(&self, user_id: Uuid) -> Result<Option<UserRow>> {
        let user = sqlx::query_as::<_, UserRow>(
            "SELECT id, resume_url, created_at FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }
}

#[async_trait]
impl JobStore for PgStore {
    async fn list_jobs(&self) -> Result<Vec<JobRow>> {
        // Ranking ties keep this order, so it must be deterministic.
        let jobs = sqlx::query_as::<_, JobRow>(
            r#"
            SELECT id, title, COALESCE(description, '') AS description, created_at
            FROM jobs
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(jobs)
    }
}
