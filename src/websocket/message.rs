use serde::{Deserialize, Serialize};

use crate::game::board::{Board, Square, SquareCharacter, SquareUpdate};
use crate::game::game_fsm::GameFsmState;
use crate::game::position::Position;
use crate::game::win_detector::GameResult;
use crate::game::GameSnapshot;

/// Instructions sent by the browser, e.g. `{"instruction":"choose square","content":4}`.
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(tag = "instruction", content = "content")]
pub enum GameMessage {
    #[serde(rename = "select character")]
    SelectCharacter(SquareCharacter),
    #[serde(rename = "start game")]
    StartGame,
    #[serde(rename = "choose square")]
    ChooseSquare(Position),
    #[serde(rename = "get board")]
    GetBoard,
}

/// Messages sent to the browser, e.g. `{"command":"square","body":{"position":4,"character":"X"}}`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(tag = "command", content = "body")]
pub enum GameResponse {
    #[serde(rename = "result")]
    Result(GameResult),
    #[serde(rename = "game over")]
    GameOver(bool),
    #[serde(rename = "board")]
    Board(Board),
    #[serde(rename = "square")]
    Square(SquareUpdate),
    #[serde(rename = "character selected")]
    CharacterSelected(SquareCharacter),
    #[serde(rename = "game started")]
    GameStarted(bool),
    #[serde(rename = "players", rename_all = "camelCase")]
    Players { x_client: String, o_client: String },
    #[serde(rename = "welcome", rename_all = "camelCase")]
    Welcome {
        is_game_started: bool,
        x_client: String,
        o_client: String,
        board: Board,
        your_character: Square,
    },
    #[serde(rename = "error")]
    Error {
        r#type: String,
        title: String,
        detail: String,
    },
}

impl GameResponse {
    /// Free characters are sent as an empty nickname.
    pub fn players(x_player: Option<String>, o_player: Option<String>) -> GameResponse {
        GameResponse::Players {
            x_client: x_player.unwrap_or_default(),
            o_client: o_player.unwrap_or_default(),
        }
    }

    pub fn welcome(snapshot: GameSnapshot) -> GameResponse {
        GameResponse::Welcome {
            is_game_started: snapshot.state == GameFsmState::Playing,
            x_client: snapshot.x_player.unwrap_or_default(),
            o_client: snapshot.o_player.unwrap_or_default(),
            board: snapshot.board,
            your_character: snapshot.character.into(),
        }
    }
}
