use chrono::Duration;
use jsonwebtoken::{DecodingKey, EncodingKey};
use lettre::{AsyncSmtpTransport, Tokio1Executor, transport::smtp::authentication::Credentials};
use std::{ops::Deref, path::PathBuf, sync::Arc};

pub const DEFAULT_TEAM_ID_PREFIX: &str = "Xctf26te";
const DEFAULT_OTP_TTL_MINUTES: i64 = 10;

/// Outbound SMTP identity. Absent when credentials are not configured, in
/// which case mail is written to the log instead.
pub struct Mailer {
    pub from: String,
    pub transport: AsyncSmtpTransport<Tokio1Executor>,
}

pub struct ConfigInner {
    pub db_url: String,
    pub host: String,
    pub port: u16,
    pub allowed_origin: Option<String>,
    pub encoding_key: EncodingKey,
    pub decoding_key: DecodingKey,
    pub admin_password: Option<String>,
    pub team_id_prefix: String,
    pub event_name: String,
    pub public_url: String,
    pub public_dir: PathBuf,
    pub uploads_dir: PathBuf,
    pub otp_ttl: Duration,
    pub mailer: Option<Mailer>,
}

impl ConfigInner {
    /// Local-development settings: SQLite file, no mail, no admin password.
    pub fn defaults(jwt_secret: &str) -> Self {
        Self {
            db_url: "sqlite://hackathon.db?mode=rwc".to_string(),
            host: "0.0.0.0".to_string(),
            port: 3000,
            allowed_origin: None,
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            admin_password: None,
            team_id_prefix: DEFAULT_TEAM_ID_PREFIX.to_string(),
            event_name: "XploitX 2k26".to_string(),
            public_url: "http://localhost:3000".to_string(),
            public_dir: PathBuf::from("public"),
            uploads_dir: PathBuf::from("uploads"),
            otp_ttl: Duration::minutes(DEFAULT_OTP_TTL_MINUTES),
            mailer: None,
        }
    }
}

#[derive(Clone)]
pub struct Config(Arc<ConfigInner>);

fn env_or(key: &str, default: String) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(default)
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Placeholder values shipped in sample `.env` files count as unset.
fn is_placeholder(value: &str) -> bool {
    value.contains("your-email") || value.contains("your-password")
}

impl Config {
    pub fn from_env() -> Config {
        let jwt_secret = std::env::var("JWT_SECRET").expect("JWT_SECRET is not set in .env file");
        let defaults = ConfigInner::defaults(&jwt_secret);

        let mailer = match (env_opt("EMAIL_USER"), env_opt("EMAIL_PASS")) {
            (Some(user), Some(pass)) if !is_placeholder(&user) && !is_placeholder(&pass) => {
                let smtp_host = env_or("SMTP_HOST", "smtp.gmail.com".to_string());
                let smtp_port = env_or("SMTP_PORT", "465".to_string())
                    .parse()
                    .expect("SMTP_PORT is not a number");
                let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&smtp_host)
                    .expect("Failed to create SMTP transport")
                    .port(smtp_port)
                    .credentials(Credentials::new(user.clone(), pass))
                    .build();
                Some(Mailer {
                    from: user,
                    transport,
                })
            }
            _ => {
                tracing::warn!("EMAIL_USER/EMAIL_PASS not set; emails will be logged instead of sent");
                None
            }
        };

        let v = ConfigInner {
            db_url: env_or("DATABASE_URL", defaults.db_url),
            host: env_or("HOST", defaults.host),
            port: env_or("PORT", defaults.port.to_string())
                .parse()
                .expect("PORT is not a number"),
            allowed_origin: env_opt("ALLOWED_ORIGIN"),
            admin_password: env_opt("ADMIN_PASSWORD"),
            team_id_prefix: env_or("TEAM_ID_PREFIX", defaults.team_id_prefix),
            event_name: env_or("EVENT_NAME", defaults.event_name),
            public_url: env_or("PUBLIC_URL", defaults.public_url),
            public_dir: env_opt("PUBLIC_DIR").map_or(defaults.public_dir, PathBuf::from),
            uploads_dir: env_opt("UPLOADS_DIR").map_or(defaults.uploads_dir, PathBuf::from),
            otp_ttl: env_opt("OTP_TTL_MINUTES")
                .map(|v| v.parse().expect("OTP_TTL_MINUTES is not a number"))
                .map_or(defaults.otp_ttl, Duration::minutes),
            mailer,
            ..defaults
        };

        Self(Arc::new(v))
    }

    pub fn get_server_url(&self) -> String {
        format!("{}:{}", self.0.host, self.0.port)
    }
}

impl From<ConfigInner> for Config {
    fn from(inner: ConfigInner) -> Self {
        Self(Arc::new(inner))
    }
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
