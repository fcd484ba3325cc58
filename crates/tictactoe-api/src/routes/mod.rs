//! Route modules organized by bounded context.

pub mod games;
pub mod health;
pub mod players;

use tictactoe_core::repository::MAX_PAGE_SIZE;

/// Resolves optional `skip`/`limit` query values into bounds for a listing.
pub(crate) fn page_bounds(skip: Option<i64>, limit: Option<i64>) -> (i64, i64) {
    (
        skip.unwrap_or(0).max(0),
        limit.unwrap_or(MAX_PAGE_SIZE).clamp(0, MAX_PAGE_SIZE),
    )
}
