use reqwest::Client;
use serde_json::json;

use crate::error::{Error, Result};
use crate::models::submission::Submission;
use crate::services::export_service::ExportService;

/// Outbound notification mailer (Resend-compatible HTTP API). Callers spawn
/// sends as detached tasks; a failed send must never fail the request that
/// triggered it.
#[derive(Clone)]
pub struct MailerService {
    client: Client,
    api_url: String,
    api_key: Option<String>,
    from: String,
    to: Vec<String>,
}

impl MailerService {
    pub fn new(api_url: String, api_key: Option<String>, from: String, to: Vec<String>) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            api_url,
            api_key,
            from,
            to,
        }
    }

    pub async fn send_new_submission(&self, submission: &Submission) -> Result<()> {
        let Some(api_key) = &self.api_key else {
            tracing::debug!("mailer disabled, skipping notification email");
            return Ok(());
        };
        if self.to.is_empty() {
            tracing::debug!("no MAIL_TO recipients configured, skipping notification email");
            return Ok(());
        }

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&json!({
                "from": self.from,
                "to": self.to,
                "subject": format!("Yeni Başvuru: {}", submission.subject),
                "html": Self::render_new_submission(submission),
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Internal(format!(
                "email API returned {}",
                response.status()
            )));
        }
        tracing::info!(id = %submission.id, "notification email sent");
        Ok(())
    }

    fn render_new_submission(submission: &Submission) -> String {
        let mut rows = String::new();
        let mut row = |label: &str, value: &str| {
            rows.push_str(&format!(
                "<tr><td style=\"padding:6px 8px;font-weight:600\">{}</td><td style=\"padding:6px 8px\">{}</td></tr>",
                label,
                if value.is_empty() { "-" } else { value },
            ));
        };

        row("Ad Soyad", &esc(&submission.full_name));
        row("Telefon", &esc(submission.phone.as_deref().unwrap_or("")));
        row("Cinsiyet", ExportService::gender_label(submission.gender));
        row(
            "Pozisyon",
            &esc(submission.position_applied.as_deref().unwrap_or("")),
        );
        row(
            "Çalışma Türü",
            &esc(submission.employment_type.as_deref().unwrap_or("")),
        );
        row(
            "Vardiya",
            &esc(submission.shift_availability.as_deref().unwrap_or("")),
        );
        row(
            "Eğitim",
            &esc(submission.education_level.as_deref().unwrap_or("")),
        );
        row(
            "Yabancı Dil",
            &esc(submission.foreign_languages.as_deref().unwrap_or("")),
        );
        row(
            "Önceki İşletme",
            &esc(submission.prev_company.as_deref().unwrap_or("")),
        );
        row(
            "Görev/Ünvan",
            &esc(submission.prev_title.as_deref().unwrap_or("")),
        );
        row(
            "Çalışma Süresi",
            &esc(submission.prev_duration.as_deref().unwrap_or("")),
        );
        row(
            "Ayrılma Sebebi",
            &esc(submission.prev_reason.as_deref().unwrap_or("")),
        );
        row("Ek Not", &esc(&submission.message));
        row("Kayıt ID", &esc(&submission.id));

        format!(
            "<div style=\"font-family:ui-sans-serif,system-ui\"><h2>Yeni Başvuru 📝</h2>\
             <div style=\"color:#6b7280;margin-bottom:12px\">{}</div>\
             <table style=\"border-collapse:collapse;width:100%;border:1px solid #e5e7eb\"><tbody>{}</tbody></table></div>",
            submission.created_at.format("%d.%m.%Y %H:%M UTC"),
            rows,
        )
    }
}

fn esc(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
