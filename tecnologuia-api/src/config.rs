use serde::Deserialize;
use tecnologuia_shared::clients::email::SmtpSettings;

pub const DEV_JWT_SECRET: &str = "development-secret-change-in-production";

/// Runtime configuration, read from the process environment (and `.env`)
/// under the same variable names the frontend deployment already uses.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default = "default_pg_host")]
    pub pg_host: String,
    #[serde(default = "default_pg_port")]
    pub pg_port: u16,
    #[serde(default = "default_pg_database")]
    pub pg_database: String,
    #[serde(default = "default_pg_user")]
    pub pg_user: String,
    #[serde(default = "default_pg_password")]
    pub pg_password: String,
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    #[serde(default = "default_jwt_ttl")]
    pub jwt_ttl_secs: i64,
    #[serde(default = "default_reset_ttl")]
    pub reset_token_ttl_secs: i64,
    #[serde(default)]
    pub email_user: String,
    #[serde(default)]
    pub email_pass: String,
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default = "default_reset_url_base")]
    pub reset_url_base: String,
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
    #[serde(default)]
    pub app_env: Option<String>,
    #[serde(default)]
    pub node_env: Option<String>,
}

fn default_port() -> u16 { 3000 }
fn default_pg_host() -> String { "localhost".into() }
fn default_pg_port() -> u16 { 5432 }
fn default_pg_database() -> String { "tecnologuia".into() }
fn default_pg_user() -> String { "postgres".into() }
fn default_pg_password() -> String { "admin".into() }
fn default_jwt_secret() -> String { DEV_JWT_SECRET.into() }
fn default_jwt_ttl() -> i64 { 3600 }
fn default_reset_ttl() -> i64 { 3600 }
fn default_smtp_host() -> String { "smtp.gmail.com".into() }
fn default_smtp_port() -> u16 { 587 }
fn default_reset_url_base() -> String { "https://tecnologuia.onrender.com/reset-password".into() }
fn default_cors_origin() -> String { "http://localhost:5173".into() }

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                return Err(e.into());
            }
        }
        Self::from_env(config::Environment::default())
    }

    pub fn from_env(source: config::Environment) -> anyhow::Result<Self> {
        let config = config::Config::builder()
            .add_source(source)
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// `DATABASE_URL` when set, otherwise a URL assembled from the `PG_*` parts.
    pub fn database_url(&self) -> String {
        match self.database_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => format!(
                "postgres://{}:{}@{}:{}/{}",
                self.pg_user, self.pg_password, self.pg_host, self.pg_port, self.pg_database
            ),
        }
    }

    pub fn environment(&self) -> &str {
        self.app_env
            .as_deref()
            .or(self.node_env.as_deref())
            .unwrap_or("development")
    }

    pub fn is_production(&self) -> bool {
        self.environment().eq_ignore_ascii_case("production")
    }

    pub fn uses_dev_jwt_secret(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET
    }

    /// SMTP settings, or `None` when no mailbox credentials are configured.
    pub fn smtp_settings(&self) -> Option<SmtpSettings> {
        if self.email_user.trim().is_empty() {
            return None;
        }
        Some(SmtpSettings {
            host: self.smtp_host.clone(),
            port: self.smtp_port,
            username: self.email_user.clone(),
            password: self.email_pass.clone(),
            from_name: "Tecnologuia".into(),
        })
    }

    pub fn reset_link(&self, token: &str) -> String {
        format!("{}?token={token}", self.reset_url_base.trim_end_matches('?'))
    }
}
