use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A reviewer's scored assessment of one article. Created when a coordinator
/// assigns the reviewer; score and completion date stay null until the
/// reviewer records the result.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Evaluation {
    pub id: Uuid,
    pub article_id: Uuid,
    pub reviewer_id: Uuid,
    pub score: Option<i16>,
    pub comments: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Evaluation {
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}
