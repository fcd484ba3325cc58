//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tictactoe_core::repository::{GameRepository, PlayerRegistry};
use tictactoe_test_support::{FixedClock, InMemoryGameRepository, InMemoryPlayerRegistry};
use tower::ServiceExt;

use tictactoe_api::build_router;
use tictactoe_api::state::AppState;

/// In-memory stores shared across the requests of one test.
pub struct TestApp {
    pub games: Arc<InMemoryGameRepository>,
    pub players: Arc<InMemoryPlayerRegistry>,
    state: AppState,
}

impl TestApp {
    /// Fresh stores and a fixed clock.
    pub fn new() -> Self {
        let games = Arc::new(InMemoryGameRepository::new());
        let players = Arc::new(InMemoryPlayerRegistry::new());
        let game_repository: Arc<dyn GameRepository> = games.clone();
        let player_registry: Arc<dyn PlayerRegistry> = players.clone();
        let state = AppState::new(
            Arc::new(FixedClock::default()),
            game_repository,
            player_registry,
        );
        Self {
            games,
            players,
            state,
        }
    }

    /// The full router, built the same way as the server binary.
    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    /// Send a POST request with a JSON body and return the response.
    pub async fn post_json(
        &self,
        uri: &str,
        body: &serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap();
        self.send(request).await
    }

    /// Send a GET request and return the response.
    pub async fn get_json(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&body_bytes).unwrap_or(serde_json::Value::Null);

        (status, json)
    }

    /// Starts an Alice-vs-Bob game through the API and returns its id.
    pub async fn start_game(&self) -> String {
        let (status, json) = self
            .post_json(
                "/api/v1/games",
                &serde_json::json!({ "players": [{ "name": "Alice" }, { "name": "Bob" }] }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        json["game_id"].as_str().unwrap().to_owned()
    }

    /// Plays `moves` in order, asserting each one is accepted, and returns
    /// the game after the last one.
    pub async fn play(&self, game_id: &str, moves: &[(&str, i32, i32)]) -> serde_json::Value {
        let mut last = serde_json::Value::Null;
        for (player, row, column) in moves {
            let (status, json) = self
                .post_json(
                    &format!("/api/v1/games/{game_id}/moves"),
                    &serde_json::json!({ "player_name": player, "row": row, "column": column }),
                )
                .await;
            assert_eq!(status, StatusCode::CREATED, "move {player} ({row}, {column}): {json}");
            last = json;
        }
        last
    }
}
