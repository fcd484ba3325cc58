//! Integration tests for the game context, driven through the full router.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

const ALICE_TOP_ROW: [(&str, i32, i32); 5] = [
    ("Alice", 1, 1),
    ("Bob", 2, 1),
    ("Alice", 1, 2),
    ("Bob", 2, 2),
    ("Alice", 1, 3),
];

const DRAW: [(&str, i32, i32); 9] = [
    ("Alice", 1, 1),
    ("Bob", 1, 2),
    ("Alice", 1, 3),
    ("Bob", 2, 2),
    ("Alice", 2, 1),
    ("Bob", 2, 3),
    ("Alice", 3, 2),
    ("Bob", 3, 1),
    ("Alice", 3, 3),
];

#[tokio::test]
async fn test_start_game_seats_players_with_default_marks() {
    let app = common::TestApp::new();

    let (status, json) = app
        .post_json(
            "/api/v1/games",
            &json!({ "players": [{ "name": "Alice" }, { "name": "Bob" }] }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["players"][0]["name"], "Alice");
    assert_eq!(json["players"][0]["mark"], "X");
    assert_eq!(json["players"][1]["name"], "Bob");
    assert_eq!(json["players"][1]["mark"], "O");
    assert_eq!(json["next_turn"], "Alice");
    assert_eq!(json["movements_played"], 0);
    assert_eq!(json["finished"], false);
    assert_eq!(
        json["board"],
        json!([[null, null, null], [null, null, null], [null, null, null]])
    );

    // Both names were registered on first use.
    let (_, players) = app.get_json("/api/v1/players").await;
    assert_eq!(players.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_first_move_marks_cell_and_passes_turn() {
    let app = common::TestApp::new();
    let game_id = app.start_game().await;

    let json = app.play(&game_id, &[("Alice", 1, 1)]).await;

    assert_eq!(json["board"][0][0], "X");
    assert_eq!(json["movements_played"], 1);
    assert_eq!(json["next_turn"], "Bob");

    let (status, fetched) = app.get_json(&format!("/api/v1/games/{game_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, json);
}

#[tokio::test]
async fn test_completing_a_row_wins_on_fifth_move() {
    let app = common::TestApp::new();
    let game_id = app.start_game().await;

    let json = app.play(&game_id, &ALICE_TOP_ROW).await;

    assert_eq!(json["winner"], "Alice");
    assert_eq!(json["finished"], true);
    assert_eq!(json["movements_played"], 5);
}

#[tokio::test]
async fn test_full_board_without_a_line_is_a_draw() {
    let app = common::TestApp::new();
    let game_id = app.start_game().await;

    let json = app.play(&game_id, &DRAW).await;

    assert_eq!(json["finished"], true);
    assert_eq!(json["winner"], serde_json::Value::Null);
    assert_eq!(json["movements_played"], 9);
    assert_eq!(
        json["board"],
        json!([["X", "O", "X"], ["X", "O", "O"], ["O", "X", "X"]])
    );
}

#[tokio::test]
async fn test_move_on_finished_game_is_rejected_and_record_unchanged() {
    // Arrange
    let app = common::TestApp::new();
    let game_id = app.start_game().await;
    let finished = app.play(&game_id, &ALICE_TOP_ROW).await;

    // Act
    let (status, json) = app
        .post_json(
            &format!("/api/v1/games/{game_id}/moves"),
            &json!({ "player_name": "Bob", "row": 3, "column": 3 }),
        )
        .await;

    // Assert
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"], "game_finished");
    let (_, after) = app.get_json(&format!("/api/v1/games/{game_id}")).await;
    assert_eq!(after, finished);
    let (_, moves) = app.get_json(&format!("/api/v1/games/{game_id}/moves")).await;
    assert_eq!(moves.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_move_out_of_turn_is_rejected() {
    let app = common::TestApp::new();
    let game_id = app.start_game().await;

    let (status, json) = app
        .post_json(
            &format!("/api/v1/games/{game_id}/moves"),
            &json!({ "player_name": "Bob", "row": 2, "column": 2 }),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"], "out_of_turn");
    let (_, game) = app.get_json(&format!("/api/v1/games/{game_id}")).await;
    assert_eq!(game["movements_played"], 0);
}

#[tokio::test]
async fn test_move_on_occupied_cell_is_rejected() {
    let app = common::TestApp::new();
    let game_id = app.start_game().await;
    app.play(&game_id, &[("Alice", 1, 1), ("Bob", 2, 2)]).await;

    let (status, json) = app
        .post_json(
            &format!("/api/v1/games/{game_id}/moves"),
            &json!({ "player_name": "Alice", "row": 1, "column": 1 }),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"], "cell_occupied");
    assert_eq!(app.games.plays(game_id.parse().unwrap()).len(), 2);
}

#[tokio::test]
async fn test_move_on_unknown_game_returns_404() {
    let app = common::TestApp::new();

    let (status, json) = app
        .post_json(
            &format!("/api/v1/games/{}/moves", Uuid::new_v4()),
            &json!({ "player_name": "Alice", "row": 1, "column": 1 }),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "game_not_found");
}

#[tokio::test]
async fn test_corrupt_stored_board_returns_500() {
    let app = common::TestApp::new();
    let game_id: Uuid = app.start_game().await.parse().unwrap();
    let mut record = app.games.game(game_id).unwrap();
    record.board = "[[\"X\"]]".to_owned();
    app.games.replace(record);

    let (status, json) = app.get_json(&format!("/api/v1/games/{game_id}")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "corrupt_board");
}

#[tokio::test]
async fn test_list_games_splits_open_and_finished() {
    // Arrange
    let app = common::TestApp::new();
    let open_id = app.start_game().await;
    let won_id = app.start_game().await;
    app.play(&won_id, &ALICE_TOP_ROW).await;

    // Act
    let (status, finished) = app.get_json("/api/v1/games?finished=true").await;
    let (_, open) = app.get_json("/api/v1/games?finished=false").await;
    let (_, limited) = app.get_json("/api/v1/games?limit=1").await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(finished.as_array().unwrap().len(), 1);
    assert_eq!(finished[0]["game_id"], won_id);
    assert_eq!(open.as_array().unwrap().len(), 1);
    assert_eq!(open[0]["game_id"], open_id);
    assert_eq!(limited.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_list_moves_reports_one_indexed_coordinates_in_order() {
    let app = common::TestApp::new();
    let game_id = app.start_game().await;
    app.play(&game_id, &[("Alice", 3, 1), ("Bob", 1, 3)]).await;

    let (status, json) = app.get_json(&format!("/api/v1/games/{game_id}/moves")).await;

    assert_eq!(status, StatusCode::OK);
    let moves = json.as_array().unwrap();
    assert_eq!(moves.len(), 2);
    assert_eq!(moves[0]["sequence"], 1);
    assert_eq!(moves[0]["row"], 3);
    assert_eq!(moves[0]["column"], 1);
    assert_eq!(moves[1]["sequence"], 2);
    assert_eq!(moves[1]["row"], 1);
    assert_eq!(moves[1]["column"], 3);
}
