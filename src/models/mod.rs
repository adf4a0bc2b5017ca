pub mod article;
pub mod audit_entry;
pub mod checklist;
pub mod event;
pub mod evaluation;
pub mod user;

pub use article::{Article, ArticleStatus, ArticleVersion};
pub use audit_entry::{AuditAction, AuditEntry};
pub use checklist::{AnswerType, Checklist, ChecklistQuestion};
pub use evaluation::Evaluation;
pub use event::{Event, EventStatus};
pub use user::User;
