use axum::body::Bytes;
use axum::extract::{Path, State, WebSocketUpgrade};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::game::GameOptions;
use crate::player::actor::PlayerActor;
use crate::routes::AppState;
use crate::websocket::{close, send_error};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameRequest {
    #[serde(default)]
    vs_computer: bool,
}

#[derive(Serialize)]
pub struct CreateGameResponse {
    id: String,
}

/// The body is optional, an empty request creates a game between two players.
pub async fn create(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let options = match parse_create_game_request(&body) {
        Ok(options) => options,
        Err(error) => {
            log::info!("Rejected a CreateGame request. Error: '{error}'.");
            return (StatusCode::UNPROCESSABLE_ENTITY, error.to_string()).into_response();
        }
    };

    match state.game_factory.create_game(options).await {
        Ok(id) => (StatusCode::OK, Json(CreateGameResponse { id })).into_response(),
        Err(error) => (StatusCode::INTERNAL_SERVER_ERROR, error.to_string()).into_response(),
    }
}

fn parse_create_game_request(body: &[u8]) -> Result<GameOptions, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(GameOptions::default());
    }
    let request: CreateGameRequest = serde_json::from_slice(body)?;
    Ok(GameOptions {
        vs_computer: request.vs_computer,
    })
}

pub async fn connect_player_to_websocket(
    State(state): State<Arc<AppState>>,
    Path((game_id, nickname)): Path<(String, String)>,
    websocket_upgrade: WebSocketUpgrade,
) -> Response {
    websocket_upgrade.on_upgrade(move |mut websocket| async move {
        match state.game_factory.get_game(&game_id).await {
            Ok(game) => PlayerActor::create(nickname, game, websocket, state.player_timeout).await,
            Err(error) => {
                send_error(&mut websocket, &error).await;
                close(websocket).await;
            }
        }
    })
}
