use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    /// Location of the candidate's resume PDF. Users who never uploaded one have none.
    pub resume_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    /// The resume URL, treating a blank string the same as a missing one.
    pub fn resume_url(&self) -> Option<&str> {
        self.resume_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}
