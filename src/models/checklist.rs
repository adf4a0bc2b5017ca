use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerType {
    YesNo,
    Scale,
    Text,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistQuestion {
    pub text: String,
    pub answer_type: AnswerType,
    #[serde(default)]
    pub required: bool,
}

/// A reusable, ordered set of review questions attached to an event.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Checklist {
    pub id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    pub description: String,
    pub questions: Json<Vec<ChecklistQuestion>>,
    pub created_at: DateTime<Utc>,
}
