use super::{trim_optional_string, trim_string};
use crate::models::submission::Gender;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// Applicant intake payload. Only full name, message and consent are
/// required; every other field is normalized to None when blank.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitPayload {
    #[serde(default, deserialize_with = "trim_string")]
    #[validate(length(min = 2, message = "full name must be at least 2 characters"))]
    pub full_name: String,

    #[serde(default, deserialize_with = "trim_string")]
    #[validate(length(min = 2, message = "message must be at least 2 characters"))]
    pub message: String,

    #[serde(default)]
    pub consent: bool,

    #[serde(default, deserialize_with = "trim_optional_string")]
    pub subject: Option<String>,

    #[serde(default, deserialize_with = "trim_optional_string")]
    pub phone: Option<String>,

    pub gender: Option<Gender>,

    #[serde(default, deserialize_with = "trim_optional_string")]
    pub birth_date: Option<String>,

    #[serde(default, deserialize_with = "trim_optional_string")]
    pub address: Option<String>,

    #[serde(default, deserialize_with = "trim_optional_string")]
    pub city: Option<String>,

    #[serde(default, deserialize_with = "trim_optional_string")]
    pub district: Option<String>,

    #[serde(default, deserialize_with = "trim_optional_string")]
    pub position_applied: Option<String>,

    // "workType" is the legacy wire name for the same column.
    #[serde(default, deserialize_with = "trim_optional_string", alias = "workType")]
    pub employment_type: Option<String>,

    #[serde(default, deserialize_with = "trim_optional_string")]
    pub shift_availability: Option<String>,

    #[serde(default, deserialize_with = "trim_optional_string")]
    pub education_level: Option<String>,

    #[serde(default, deserialize_with = "trim_optional_string")]
    pub foreign_languages: Option<String>,

    #[serde(default, deserialize_with = "trim_optional_string")]
    pub salary_expectation: Option<String>,

    #[serde(default, deserialize_with = "trim_optional_string")]
    pub insurance_preference: Option<String>,

    #[serde(default, deserialize_with = "trim_optional_string")]
    pub part_time_days: Option<String>,

    #[serde(default, deserialize_with = "trim_optional_string")]
    pub part_time_start: Option<String>,

    #[serde(default, deserialize_with = "trim_optional_string")]
    pub part_time_end: Option<String>,

    #[serde(default, deserialize_with = "trim_optional_string")]
    pub prev_company: Option<String>,

    #[serde(default, deserialize_with = "trim_optional_string")]
    pub prev_title: Option<String>,

    #[serde(default, deserialize_with = "trim_optional_string")]
    pub prev_duration: Option<String>,

    #[serde(default, deserialize_with = "trim_optional_string")]
    pub prev_reason: Option<String>,
}

impl SubmitPayload {
    /// Subject line for the stored row and the notification email.
    pub fn subject_line(&self) -> String {
        match &self.position_applied {
            Some(position) => format!("İş Başvurusu - {}", position),
            None => self
                .subject
                .clone()
                .unwrap_or_else(|| "İş Başvurusu".to_string()),
        }
    }
}
