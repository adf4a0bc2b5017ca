use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Review lifecycle of a submitted article. Transitions are closed; see
/// [`ArticleStatus::can_transition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ArticleStatus {
    Submitted,
    UnderReview,
    RevisionRequested,
    Approved,
    Rejected,
    Published,
}

impl ArticleStatus {
    /// The transition table. `submitted -> under_review` happens when a
    /// reviewer is assigned; `revision_requested -> under_review` when the
    /// author submits a new version.
    pub fn can_transition(self, next: ArticleStatus) -> bool {
        use ArticleStatus::*;
        matches!(
            (self, next),
            (Submitted, UnderReview)
                | (UnderReview, RevisionRequested)
                | (UnderReview, Approved)
                | (UnderReview, Rejected)
                | (RevisionRequested, UnderReview)
                | (Approved, Published)
        )
    }
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Article {
    pub id: Uuid,
    pub title: String,
    #[sqlx(rename = "abstract")]
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub theme_area: String,
    pub keywords: Vec<String>,
    pub status: ArticleStatus,
    pub event_id: Uuid,
    pub author_ids: Vec<Uuid>,
    pub submitter_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Article {
    pub fn has_author(&self, user_id: Uuid) -> bool {
        self.author_ids.contains(&user_id)
    }
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct ArticleVersion {
    pub id: Uuid,
    pub article_id: Uuid,
    pub version_number: i32,
    pub file_path: String,
    pub submitted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::ArticleStatus::*;

    #[test]
    fn review_flow_transitions() {
        assert!(Submitted.can_transition(UnderReview));
        assert!(UnderReview.can_transition(RevisionRequested));
        assert!(RevisionRequested.can_transition(UnderReview));
        assert!(UnderReview.can_transition(Approved));
        assert!(UnderReview.can_transition(Rejected));
        assert!(Approved.can_transition(Published));
    }

    #[test]
    fn illegal_transitions() {
        assert!(!Submitted.can_transition(Published));
        assert!(!Submitted.can_transition(Approved));
        assert!(!Rejected.can_transition(Published));
        assert!(!Published.can_transition(UnderReview));
        assert!(!UnderReview.can_transition(UnderReview));
    }
}
