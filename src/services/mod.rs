pub mod export_service;
pub mod mailer_service;
pub mod submission_service;
