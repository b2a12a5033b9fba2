use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    Note,
    StatusChange,
    ArchiveChange,
    FieldChange,
}

/// Append-only audit-trail entry attached to a submission. Never mutated
/// after insertion.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionEvent {
    pub id: i64,
    pub submission_id: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub note: Option<String>,
    pub field: Option<String>,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub created_at: DateTime<Utc>,
}
