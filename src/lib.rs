pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::{mailer_service::MailerService, submission_service::SubmissionService};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub submission_service: SubmissionService,
    pub mailer_service: MailerService,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        let config = crate::config::get_config();

        let submission_service = SubmissionService::new(pool.clone());
        let mailer_service = MailerService::new(
            config.mail_api_url.clone(),
            config.mail_api_key.clone(),
            config.mail_from.clone(),
            config.mail_to.clone(),
        );

        Self {
            pool,
            submission_service,
            mailer_service,
        }
    }
}
