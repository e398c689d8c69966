use std::time::Duration;

use api::{setup_config, setup_db, setup_router};
use app::scheduler::spawn_otp_sweeper;
use app::state::AppState;
use utils::{ensure_dir, ensure_sqlite_file, migrate};

const OTP_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

pub async fn run() -> anyhow::Result<()> {
    let config = setup_config();

    ensure_sqlite_file(&config.db_url)?;
    ensure_dir(&config.uploads_dir)?;

    let conn = setup_db(&config.db_url).await;
    migrate(&conn).await?;

    let state = AppState::new(conn, config.clone());
    let _sweeper = spawn_otp_sweeper(state.clone(), OTP_SWEEP_INTERVAL);
    let router = setup_router(state);

    let listener = tokio::net::TcpListener::bind(config.get_server_url()).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    if config.mailer.is_none() {
        tracing::warn!("Mail delivery disabled, OTPs and confirmations go to the log");
    }

    axum::serve(listener, router).await?;
    Ok(())
}
