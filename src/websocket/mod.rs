pub mod message;

use axum::extract::ws::{Message, WebSocket};

use crate::error::domain_error::DomainError;
use crate::error::Error;
use message::{GameMessage, GameResponse};

pub async fn send_message(websocket: &mut WebSocket, response: &GameResponse) -> Result<(), Error> {
    let message = serde_json::to_string(response).map_err(|error| {
        Error::log_and_create_internal(&format!(
            "Could not serialize the message. Error: '{error}'."
        ))
    })?;

    send_message_string(websocket, &message).await
}

pub async fn send_message_string(websocket: &mut WebSocket, message: &str) -> Result<(), Error> {
    websocket
        .send(Message::Text(message.to_string()))
        .await
        .map_err(|error| Error::WebsocketClosed(error.to_string()))
}

pub async fn send_error(websocket: &mut WebSocket, error: &Error) {
    if let Err(send_failure) = send_message(websocket, &error_to_ws_error(error)).await {
        log::info!("Could not send the error to the player. Error: '{error}', Reason: '{send_failure}'.");
    }
}

pub async fn close(websocket: WebSocket) {
    if let Err(error) = websocket.close().await {
        log::debug!("Could not close the websocket, it was probably closed by the player. Error: '{error}'.");
    }
}

pub fn parse_message(message: &str) -> Result<GameMessage, Error> {
    serde_json::from_str(message)
        .map_err(|error| Error::UnprocessableMessage(error.to_string(), message.to_string()))
}

fn error_to_ws_error(error: &Error) -> GameResponse {
    let (r#type, title) = match error {
        Error::Domain(domain_error) => match domain_error {
            DomainError::GameAlreadyInProgress(_) => {
                ("GAME_ALREADY_IN_PROGRESS", "The game is already in progress")
            }
            DomainError::GameDoesNotExist(_) => ("GAME_DOES_NOT_EXIST", "The game does not exist"),
            DomainError::GameNotInProgress(_) => ("GAME_NOT_IN_PROGRESS", "The game is not in progress"),
            DomainError::CharacterAlreadyTaken(_) => {
                ("CHARACTER_ALREADY_TAKEN", "The character is already taken")
            }
            DomainError::PlayerAlreadyHasCharacter(_, _) => (
                "PLAYER_ALREADY_HAS_CHARACTER",
                "You already selected a character",
            ),
            DomainError::NotEnoughPlayers(_) => ("NOT_ENOUGH_PLAYERS", "Not enough players"),
            DomainError::PlayerAlreadyExists(_) => ("PLAYER_ALREADY_EXISTS", "The player already exists"),
            DomainError::SpectatorCannotStartGame(_) => (
                "SPECTATOR_CANNOT_START_GAME",
                "Spectators cannot start the game",
            ),
            DomainError::SpectatorCannotChooseSquare(_) => (
                "SPECTATOR_CANNOT_CHOOSE_SQUARE",
                "Spectators cannot choose squares",
            ),
            DomainError::NotPlayersTurn(_, _) => ("NOT_PLAYERS_TURN", "It is not your turn"),
            DomainError::SquareAlreadyTaken(_) => ("SQUARE_ALREADY_TAKEN", "The square is already taken"),
            DomainError::InvalidPosition(_) => ("INVALID_POSITION", "The position is not on the board"),
        },
        Error::Internal(_) => ("INTERNAL_SERVER", "Internal Server error"),
        Error::InvalidArgument(_) => ("INVALID_ARGUMENT", "Invalid argument"),
        Error::UnprocessableMessage(_, _) => (
            "UNPROCESSABLE_WEBSOCKET_MESSAGE",
            "The message sent by the player could not be processed",
        ),
        Error::WebsocketClosed(_) => ("WEBSOCKET_CLOSED", "The player websocket is closed"),
    };

    GameResponse::Error {
        r#type: r#type.to_string(),
        title: title.to_string(),
        detail: error.to_string(),
    }
}
