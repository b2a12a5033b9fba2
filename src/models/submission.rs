use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, utoipa::ToSchema,
)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum SubmissionStatus {
    Pending,
    Reviewing,
    Accepted,
    Rejected,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Pending => "PENDING",
            SubmissionStatus::Reviewing => "REVIEWING",
            SubmissionStatus::Accepted => "ACCEPTED",
            SubmissionStatus::Rejected => "REJECTED",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, utoipa::ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
    Other,
}

impl Gender {
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Female => "Kadın",
            Gender::Male => "Erkek",
            Gender::Other => "Belirtmek istemiyor",
        }
    }
}

/// One applicant's job-application record. Created only through the public
/// intake endpoint, mutated only through the admin surface.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: String,
    pub full_name: String,
    pub subject: String,
    pub message: String,
    pub consent: bool,
    /// Non-null exactly when `consent` is true.
    pub consent_at: Option<DateTime<Utc>>,
    pub phone: Option<String>,
    pub gender: Option<Gender>,
    pub birth_date: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub position_applied: Option<String>,
    /// Canonical work-type column, comma-joined for multi-select forms.
    pub employment_type: Option<String>,
    pub shift_availability: Option<String>,
    pub education_level: Option<String>,
    pub foreign_languages: Option<String>,
    pub salary_expectation: Option<String>,
    pub insurance_preference: Option<String>,
    pub part_time_days: Option<String>,
    pub part_time_start: Option<String>,
    pub part_time_end: Option<String>,
    pub prev_company: Option<String>,
    pub prev_title: Option<String>,
    pub prev_duration: Option<String>,
    pub prev_reason: Option<String>,
    pub status: SubmissionStatus,
    pub archived: bool,
    pub created_at: DateTime<Utc>,
}
