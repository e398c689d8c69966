use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;

use crate::state::AppState;

/// Periodically evicts expired OTP records from both stores.
pub fn spawn_otp_sweeper(state: AppState, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            let now = Utc::now();
            let evicted = state.email_otps.purge_expired(now) + state.reset_otps.purge_expired(now);
            if evicted > 0 {
                tracing::debug!(evicted, "Purged expired OTP records");
            }
        }
    })
}
