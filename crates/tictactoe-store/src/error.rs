use tictactoe_core::error::DomainError;
use tracing::error;

/// Maps a driver error to `DomainError::Infrastructure`, logging it first.
pub(crate) fn infrastructure(err: sqlx::Error) -> DomainError {
    error!(error = %err, "database operation failed");
    DomainError::Infrastructure(err.to_string())
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}
