use chrono::{DateTime, NaiveTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use uuid::Uuid;

use crate::dto::admin_dto::{SortOrder, SubmissionFilter, UpdateSubmissionPayload};
use crate::dto::submit_dto::SubmitPayload;
use crate::error::{Error, Result};
use crate::models::event::{EventType, SubmissionEvent};
use crate::models::submission::{Submission, SubmissionStatus};

/// Upper bound for the export endpoint, which serves the full filtered set
/// instead of a page.
pub const EXPORT_MAX_ROWS: i64 = 10_000;

#[derive(Clone)]
pub struct SubmissionService {
    pool: SqlitePool,
}

impl SubmissionService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, payload: SubmitPayload) -> Result<Submission> {
        let now = Utc::now();
        let subject = payload.subject_line();
        let submission = Submission {
            id: Uuid::new_v4().to_string(),
            full_name: payload.full_name,
            subject,
            message: payload.message,
            consent: payload.consent,
            consent_at: payload.consent.then_some(now),
            phone: payload.phone,
            gender: payload.gender,
            birth_date: payload.birth_date,
            address: payload.address,
            city: payload.city,
            district: payload.district,
            position_applied: payload.position_applied,
            employment_type: payload.employment_type,
            shift_availability: payload.shift_availability,
            education_level: payload.education_level,
            foreign_languages: payload.foreign_languages,
            salary_expectation: payload.salary_expectation,
            insurance_preference: payload.insurance_preference,
            part_time_days: payload.part_time_days,
            part_time_start: payload.part_time_start,
            part_time_end: payload.part_time_end,
            prev_company: payload.prev_company,
            prev_title: payload.prev_title,
            prev_duration: payload.prev_duration,
            prev_reason: payload.prev_reason,
            status: SubmissionStatus::Pending,
            archived: false,
            created_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO submissions (
                id, full_name, subject, message, consent, consent_at, phone, gender,
                birth_date, address, city, district, position_applied, employment_type,
                shift_availability, education_level, foreign_languages, salary_expectation,
                insurance_preference, part_time_days, part_time_start, part_time_end,
                prev_company, prev_title, prev_duration, prev_reason, status, archived,
                created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&submission.id)
        .bind(&submission.full_name)
        .bind(&submission.subject)
        .bind(&submission.message)
        .bind(submission.consent)
        .bind(submission.consent_at)
        .bind(&submission.phone)
        .bind(submission.gender)
        .bind(&submission.birth_date)
        .bind(&submission.address)
        .bind(&submission.city)
        .bind(&submission.district)
        .bind(&submission.position_applied)
        .bind(&submission.employment_type)
        .bind(&submission.shift_availability)
        .bind(&submission.education_level)
        .bind(&submission.foreign_languages)
        .bind(&submission.salary_expectation)
        .bind(&submission.insurance_preference)
        .bind(&submission.part_time_days)
        .bind(&submission.part_time_start)
        .bind(&submission.part_time_end)
        .bind(&submission.prev_company)
        .bind(&submission.prev_title)
        .bind(&submission.prev_duration)
        .bind(&submission.prev_reason)
        .bind(submission.status)
        .bind(submission.archived)
        .bind(submission.created_at)
        .execute(&self.pool)
        .await?;

        Ok(submission)
    }

    /// Returns the requested page and the total count over the full
    /// filtered set, so pagination stays correct.
    pub async fn list(
        &self,
        filter: &SubmissionFilter,
        order: SortOrder,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Submission>, i64)> {
        let mut count_query = QueryBuilder::new("SELECT COUNT(*) FROM submissions");
        push_filters(&mut count_query, filter);
        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut query = QueryBuilder::new("SELECT * FROM submissions");
        push_filters(&mut query, filter);
        query.push(match order {
            SortOrder::Asc => " ORDER BY created_at ASC, id ASC",
            SortOrder::Desc => " ORDER BY created_at DESC, id DESC",
        });
        query.push(" LIMIT ");
        query.push_bind(limit);
        query.push(" OFFSET ");
        query.push_bind(offset);

        let items = query
            .build_query_as::<Submission>()
            .fetch_all(&self.pool)
            .await?;

        Ok((items, total))
    }

    /// Fetches a submission with its timeline, oldest event first.
    pub async fn get(&self, id: &str) -> Result<(Submission, Vec<SubmissionEvent>)> {
        let submission = sqlx::query_as::<_, Submission>("SELECT * FROM submissions WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound(format!("submission {} not found", id)))?;

        let events = sqlx::query_as::<_, SubmissionEvent>(
            "SELECT * FROM submission_events WHERE submission_id = ? ORDER BY created_at ASC, id ASC",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok((submission, events))
    }

    /// Applies the whitelisted patch and appends one audit event per field
    /// that actually changed, all in a single transaction.
    pub async fn update(&self, id: &str, patch: &UpdateSubmissionPayload) -> Result<Submission> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, Submission>("SELECT * FROM submissions WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| Error::NotFound(format!("submission {} not found", id)))?;

        let mut updated = existing.clone();
        if let Some(status) = patch.status {
            updated.status = status;
        }
        if let Some(archived) = patch.archived {
            updated.archived = archived;
        }
        if let Some(position) = &patch.position_applied {
            updated.position_applied = Some(position.clone());
        }
        if let Some(phone) = &patch.phone {
            updated.phone = Some(phone.clone());
        }

        let now = Utc::now();
        if updated.status != existing.status {
            insert_event(
                &mut tx,
                id,
                EventType::StatusChange,
                None,
                Some("status"),
                Some(existing.status.as_str()),
                Some(updated.status.as_str()),
                now,
            )
            .await?;
        }
        if updated.archived != existing.archived {
            insert_event(
                &mut tx,
                id,
                EventType::ArchiveChange,
                None,
                Some("archived"),
                Some(bool_str(existing.archived)),
                Some(bool_str(updated.archived)),
                now,
            )
            .await?;
        }
        if updated.position_applied != existing.position_applied {
            insert_event(
                &mut tx,
                id,
                EventType::FieldChange,
                None,
                Some("positionApplied"),
                existing.position_applied.as_deref(),
                updated.position_applied.as_deref(),
                now,
            )
            .await?;
        }
        if updated.phone != existing.phone {
            insert_event(
                &mut tx,
                id,
                EventType::FieldChange,
                None,
                Some("phone"),
                existing.phone.as_deref(),
                updated.phone.as_deref(),
                now,
            )
            .await?;
        }

        sqlx::query(
            "UPDATE submissions SET status = ?, archived = ?, position_applied = ?, phone = ? WHERE id = ?",
        )
        .bind(updated.status)
        .bind(updated.archived)
        .bind(&updated.position_applied)
        .bind(&updated.phone)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Removes the submission and its events. The cascade is explicit so it
    /// does not depend on the connection's foreign-key pragma.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM submission_events WHERE submission_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM submissions WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("submission {} not found", id)));
        }

        tx.commit().await?;
        Ok(())
    }

    /// Appends a NOTE event without touching the submission row.
    pub async fn add_note(&self, id: &str, note: &str) -> Result<SubmissionEvent> {
        let exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM submissions WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        if exists == 0 {
            return Err(Error::NotFound(format!("submission {} not found", id)));
        }

        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO submission_events (submission_id, event_type, note, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(id)
        .bind(EventType::Note)
        .bind(note)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(SubmissionEvent {
            id: result.last_insert_rowid(),
            submission_id: id.to_string(),
            event_type: EventType::Note,
            note: Some(note.to_string()),
            field: None,
            old_value: None,
            new_value: None,
            created_at: now,
        })
    }
}

fn push_filters(query: &mut QueryBuilder<'_, Sqlite>, filter: &SubmissionFilter) {
    query.push(" WHERE 1 = 1");
    if let Some(q) = &filter.q {
        let pattern = format!("%{}%", q.to_lowercase());
        query.push(" AND (LOWER(full_name) LIKE ");
        query.push_bind(pattern.clone());
        query.push(" OR LOWER(IFNULL(phone, '')) LIKE ");
        query.push_bind(pattern.clone());
        query.push(" OR LOWER(IFNULL(position_applied, '')) LIKE ");
        query.push_bind(pattern.clone());
        query.push(" OR LOWER(message) LIKE ");
        query.push_bind(pattern);
        query.push(")");
    }
    if let Some(gender) = filter.gender {
        query.push(" AND gender = ");
        query.push_bind(gender);
    }
    if let Some(work_type) = &filter.work_type {
        // employment_type is comma-joined for multi-select forms
        query.push(" AND IFNULL(employment_type, '') LIKE ");
        query.push_bind(format!("%{}%", work_type));
    }
    if let Some(status) = filter.status {
        query.push(" AND status = ");
        query.push_bind(status);
    }
    if let Some(archived) = filter.archived {
        query.push(" AND archived = ");
        query.push_bind(archived);
    }
    if let Some(from) = filter.from {
        query.push(" AND created_at >= ");
        query.push_bind(from.and_time(NaiveTime::MIN).and_utc());
    }
    if let Some(to) = filter.to {
        if let Some(next_day) = to.succ_opt() {
            query.push(" AND created_at < ");
            query.push_bind(next_day.and_time(NaiveTime::MIN).and_utc());
        }
    }
}

#[allow(clippy::too_many_arguments)]
async fn insert_event(
    conn: &mut SqliteConnection,
    submission_id: &str,
    event_type: EventType,
    note: Option<&str>,
    field: Option<&str>,
    old_value: Option<&str>,
    new_value: Option<&str>,
    created_at: DateTime<Utc>,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO submission_events (submission_id, event_type, note, field, old_value, new_value, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(submission_id)
    .bind(event_type)
    .bind(note)
    .bind(field)
    .bind(old_value)
    .bind(new_value)
    .bind(created_at)
    .execute(conn)
    .await?;
    Ok(())
}

fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
