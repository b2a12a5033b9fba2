use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: String,
    pub admin_password: Option<String>,
    pub session_secret: Option<String>,
    /// No admin password configured means the admin surface is left open on
    /// purpose: a misconfigured deployment must not lock staff out.
    pub auth_disabled: bool,
    pub mail_api_url: String,
    pub mail_api_key: Option<String>,
    pub mail_from: String,
    pub mail_to: Vec<String>,
    pub submit_rps: u32,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let admin_password = env::var("ADMIN_PASSWORD").ok().filter(|v| !v.is_empty());
        let auth_disabled = admin_password.is_none();

        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            database_url: get_env("DATABASE_URL")?,
            session_secret: env::var("SESSION_SECRET").ok().filter(|v| !v.is_empty()),
            admin_password,
            auth_disabled,
            mail_api_url: env::var("MAIL_API_URL")
                .unwrap_or_else(|_| "https://api.resend.com/emails".to_string()),
            mail_api_key: env::var("MAIL_API_KEY").ok().filter(|v| !v.is_empty()),
            mail_from: env::var("MAIL_FROM")
                .unwrap_or_else(|_| "Başvuru Formu <basvuru@localgroup.example>".to_string()),
            mail_to: env::var("MAIL_TO")
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|addr| !addr.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            submit_rps: get_env_parse_or("SUBMIT_RPS", 5)?,
        })
    }

    /// Key material for signing admin session cookies. Falls back to the
    /// admin password so a single env var is enough for small deployments.
    pub fn session_key(&self) -> Option<&[u8]> {
        self.session_secret
            .as_deref()
            .or(self.admin_password.as_deref())
            .map(str::as_bytes)
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
