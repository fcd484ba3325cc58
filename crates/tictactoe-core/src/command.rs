//! Command abstractions.

use uuid::Uuid;

/// Trait implemented by every state-changing request (starting a game,
/// submitting a move, registering a player).
pub trait Command: Send + Sync + std::fmt::Debug {
    /// Stable name of the command, used as a tracing field.
    fn command_type(&self) -> &'static str;

    /// Correlation ID that ties the command to its log lines.
    fn correlation_id(&self) -> Uuid;
}
