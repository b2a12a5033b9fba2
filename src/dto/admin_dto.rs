use super::trim_optional_string;
use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::models::submission::{Gender, SubmissionStatus};

pub const MAX_PAGE_SIZE: u32 = 100;
pub const DEFAULT_PAGE_SIZE: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Filter predicate shared by the admin list and the export endpoints.
#[derive(Debug, Clone, Default)]
pub struct SubmissionFilter {
    pub q: Option<String>,
    pub gender: Option<Gender>,
    pub work_type: Option<String>,
    pub status: Option<SubmissionStatus>,
    pub archived: Option<bool>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(default, deserialize_with = "trim_optional_string")]
    pub q: Option<String>,
    pub gender: Option<Gender>,
    #[serde(default, deserialize_with = "trim_optional_string")]
    pub work_type: Option<String>,
    pub status: Option<SubmissionStatus>,
    pub archived: Option<bool>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub order: SortOrder,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl ListQuery {
    pub fn filter(&self) -> SubmissionFilter {
        SubmissionFilter {
            q: self.q.clone(),
            gender: self.gender,
            work_type: self.work_type.clone(),
            status: self.status,
            archived: self.archived,
            from: self.from,
            to: self.to,
        }
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.page_size.clamp(1, MAX_PAGE_SIZE))
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page.max(1) - 1) * self.limit()
    }
}

/// Whitelisted mutable fields; anything else on the wire is ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubmissionPayload {
    pub status: Option<SubmissionStatus>,
    pub archived: Option<bool>,
    #[serde(default, deserialize_with = "trim_optional_string")]
    pub position_applied: Option<String>,
    #[serde(default, deserialize_with = "trim_optional_string")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddNotePayload {
    #[serde(deserialize_with = "super::trim_string")]
    #[validate(length(min = 2, message = "note must be at least 2 characters"))]
    pub note: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginPayload {
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Xlsx,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportQuery {
    #[serde(default)]
    pub format: ExportFormat,
    #[serde(default, deserialize_with = "trim_optional_string")]
    pub q: Option<String>,
    pub gender: Option<Gender>,
    #[serde(default, deserialize_with = "trim_optional_string")]
    pub work_type: Option<String>,
    pub status: Option<SubmissionStatus>,
    pub archived: Option<bool>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub order: SortOrder,
}

impl ExportQuery {
    pub fn filter(&self) -> SubmissionFilter {
        SubmissionFilter {
            q: self.q.clone(),
            gender: self.gender,
            work_type: self.work_type.clone(),
            status: self.status,
            archived: self.archived,
            from: self.from,
            to: self.to,
        }
    }
}
