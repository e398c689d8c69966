use sea_orm::{DbErr, SqlErr};

use crate::error::TeamError;

pub mod attendance;
pub mod teams;

/// Turns a unique-constraint failure into a client-facing duplicate error.
/// Field-specific duplicates are caught by explicit lookups before writing;
/// this covers the race where two requests pass those lookups together.
pub(crate) fn map_unique_violation(err: DbErr) -> anyhow::Error {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::warn!(%detail, "Unique constraint violated");
            TeamError::Duplicate(
                "Duplicate data found (Email/Team Name) or already registered.".to_string(),
            )
            .into()
        }
        _ => err.into(),
    }
}
