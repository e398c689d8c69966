use sea_orm::DatabaseConnection;

use crate::cache::OtpStore;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub conn: DatabaseConnection,
    pub config: Config,
    /// Pre-registration email checks, keyed by email.
    pub email_otps: OtpStore,
    /// Password resets, keyed by team id.
    pub reset_otps: OtpStore,
}

impl AppState {
    pub fn new(conn: DatabaseConnection, config: Config) -> Self {
        let ttl = config.otp_ttl;
        Self {
            conn,
            config,
            email_otps: OtpStore::new(ttl),
            reset_otps: OtpStore::new(ttl),
        }
    }
}
