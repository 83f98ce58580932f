use thiserror::Error;

use crate::game::board::SquareCharacter;
use crate::game::game_fsm::GameFsmState;
use crate::game::position::Position;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum DomainError {
    #[error("The game is already in progress. GameId: '{0}'.")]
    GameAlreadyInProgress(String),
    #[error("The game does not exist. GameId: '{0}'.")]
    GameDoesNotExist(String),
    #[error("The game is not in progress. ActualState: '{0}'.")]
    GameNotInProgress(GameFsmState),
    #[error("The character is already taken by another player. Character: '{0}'.")]
    CharacterAlreadyTaken(SquareCharacter),
    #[error("The player already selected a character. Nickname: '{0}', Character: '{1}'.")]
    PlayerAlreadyHasCharacter(String, SquareCharacter),
    #[error("Both characters must be selected to start the game. MissingCharacter: '{0}'.")]
    NotEnoughPlayers(SquareCharacter),
    #[error("A player with the same nickname already exists. Nickname: '{0}'.")]
    PlayerAlreadyExists(String),
    #[error("A spectator cannot start the game. Nickname: '{0}'.")]
    SpectatorCannotStartGame(String),
    #[error("A spectator cannot choose a square. Nickname: '{0}'.")]
    SpectatorCannotChooseSquare(String),
    #[error("It is not the turn of the player. Nickname: '{0}', Turn: '{1}'.")]
    NotPlayersTurn(String, SquareCharacter),
    #[error("The square is already taken. Position: '{0}'.")]
    SquareAlreadyTaken(Position),
    #[error("The position is outside of the board. Position: '{0}'.")]
    InvalidPosition(u8),
}
