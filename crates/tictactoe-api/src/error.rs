//! Tic-Tac-Toe — API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use tictactoe_core::error::{DomainError, IllegalMove};
use tracing::error;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Database connection or pool error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Embedded schema migrations failed to apply.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),

    /// Tracing subscriber or span exporter could not be installed.
    #[error("telemetry error: {0}")]
    Telemetry(String),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer wrapper around `DomainError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match &self.0 {
            DomainError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            DomainError::GameNotFound(_) => (StatusCode::NOT_FOUND, "game_not_found"),
            DomainError::PlayerNotFound(_) => (StatusCode::NOT_FOUND, "player_not_found"),
            DomainError::IllegalMove(illegal) => match illegal {
                IllegalMove::GameFinished => (StatusCode::CONFLICT, "game_finished"),
                IllegalMove::OutOfTurn { .. } => (StatusCode::CONFLICT, "out_of_turn"),
                IllegalMove::InvalidCoordinate { .. } => {
                    (StatusCode::BAD_REQUEST, "invalid_coordinate")
                }
                IllegalMove::CellOccupied { .. } => (StatusCode::CONFLICT, "cell_occupied"),
            },
            DomainError::CorruptBoard(_) => (StatusCode::INTERNAL_SERVER_ERROR, "corrupt_board"),
            DomainError::ConcurrencyConflict { .. } => {
                (StatusCode::CONFLICT, "concurrency_conflict")
            }
            DomainError::Infrastructure(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "infrastructure_error")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = self.status_and_code();
        if status.is_server_error() {
            error!(error = %self.0, code = error_code, "request failed");
        }

        let body = ErrorBody {
            error: error_code,
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn status_and_code(err: DomainError) -> (StatusCode, &'static str) {
        ApiError(err).status_and_code()
    }

    #[test]
    fn test_not_found_errors_map_to_404() {
        assert_eq!(
            status_and_code(DomainError::GameNotFound(Uuid::new_v4())),
            (StatusCode::NOT_FOUND, "game_not_found")
        );
        assert_eq!(
            status_and_code(DomainError::PlayerNotFound("Alice".into())),
            (StatusCode::NOT_FOUND, "player_not_found")
        );
    }

    #[test]
    fn test_illegal_moves_map_to_their_own_codes() {
        let cases = [
            (IllegalMove::GameFinished, StatusCode::CONFLICT, "game_finished"),
            (
                IllegalMove::OutOfTurn {
                    player: "Bob".into(),
                    expected: "Alice".into(),
                },
                StatusCode::CONFLICT,
                "out_of_turn",
            ),
            (
                IllegalMove::InvalidCoordinate { row: 0, column: 4 },
                StatusCode::BAD_REQUEST,
                "invalid_coordinate",
            ),
            (
                IllegalMove::CellOccupied { row: 1, column: 1 },
                StatusCode::CONFLICT,
                "cell_occupied",
            ),
        ];

        for (illegal, status, code) in cases {
            assert_eq!(status_and_code(illegal.into()), (status, code));
        }
    }

    #[test]
    fn test_concurrency_conflict_maps_to_409() {
        assert_eq!(
            status_and_code(DomainError::ConcurrencyConflict {
                game_id: Uuid::new_v4(),
                expected: 1,
                actual: 2,
            }),
            (StatusCode::CONFLICT, "concurrency_conflict")
        );
    }

    #[test]
    fn test_validation_maps_to_400() {
        assert_eq!(
            status_and_code(DomainError::Validation("bad input".into())),
            (StatusCode::BAD_REQUEST, "validation_error")
        );
    }

    #[test]
    fn test_server_side_failures_map_to_500() {
        assert_eq!(
            status_and_code(DomainError::CorruptBoard("not json".into())),
            (StatusCode::INTERNAL_SERVER_ERROR, "corrupt_board")
        );
        assert_eq!(
            status_and_code(DomainError::Infrastructure("db down".into())),
            (StatusCode::INTERNAL_SERVER_ERROR, "infrastructure_error")
        );
    }

    #[tokio::test]
    async fn test_response_body_carries_code_and_message() {
        let response = ApiError(DomainError::Validation("bad input".into())).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"], "validation_error");
        assert_eq!(json["message"], "validation error: bad input");
    }
}
