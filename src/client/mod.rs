//! Client-side model of a game, kept up to date with the [`GameResponse`]s received over the
//! websocket. It is what a UI needs to draw the board: the squares, the latest move and the
//! winning combination to highlight.

use crate::game::board::{get_empty_board, Board, Square, SquareCharacter, SquareUpdate};
use crate::game::position::Position;
use crate::websocket::message::GameResponse;

#[derive(Clone, Debug, PartialEq)]
pub struct GameView {
    pub board: Board,
    pub latest_square: Option<SquareUpdate>,
    pub winning_combination: Vec<Position>,
    pub winning_character: Square,
    pub is_game_started: bool,
    pub is_game_over: bool,
    pub x_client: String,
    pub o_client: String,
    pub my_character: Option<SquareCharacter>,
    /// Type of the latest error, e.g. `NOT_PLAYERS_TURN`.
    pub last_error: Option<String>,
}

impl Default for GameView {
    fn default() -> Self {
        GameView {
            board: get_empty_board(),
            latest_square: None,
            winning_combination: Vec::default(),
            winning_character: Square::Empty,
            is_game_started: false,
            is_game_over: false,
            x_client: String::default(),
            o_client: String::default(),
            my_character: None,
            last_error: None,
        }
    }
}

impl GameView {
    pub fn apply(&mut self, response: GameResponse) {
        match response {
            GameResponse::Welcome {
                is_game_started,
                x_client,
                o_client,
                board,
                your_character,
            } => {
                self.is_game_started = is_game_started;
                self.x_client = x_client;
                self.o_client = o_client;
                self.board = board;
                self.my_character = your_character.character();
                // A reconnect starts from the server's state, not from the last game seen
                self.is_game_over = false;
                self.latest_square = None;
                self.winning_combination.clear();
                self.winning_character = Square::Empty;
            }
            GameResponse::Players { x_client, o_client } => {
                self.x_client = x_client;
                self.o_client = o_client;
            }
            GameResponse::CharacterSelected(character) => self.my_character = Some(character),
            GameResponse::GameStarted(is_game_started) => {
                self.is_game_started = is_game_started;
                self.is_game_over = false;
                self.board = get_empty_board();
                self.latest_square = None;
                self.winning_combination.clear();
                self.winning_character = Square::Empty;
            }
            GameResponse::Square(update) => {
                self.board.set_square(update.position, update.character);
                self.latest_square = Some(update);
            }
            GameResponse::Board(board) => self.board = board,
            GameResponse::GameOver(is_game_over) => {
                self.is_game_over = is_game_over;
                self.is_game_started = !is_game_over;
            }
            GameResponse::Result(result) => {
                self.winning_combination = result.winning_combination;
                self.winning_character = result.winning_character;
            }
            GameResponse::Error { r#type, .. } => self.last_error = Some(r#type),
        }
    }

    pub fn square(&self, position: Position) -> Square {
        self.board.square(position)
    }

    pub fn is_winning_square(&self, position: Position) -> bool {
        self.winning_combination.contains(&position)
    }

    /// X moves first, so it is X's turn whenever both characters have the same amount of squares.
    pub fn turn(&self) -> SquareCharacter {
        let x_squares = self.board.positions_of(SquareCharacter::X).len();
        let o_squares = self.board.positions_of(SquareCharacter::O).len();
        if x_squares > o_squares {
            SquareCharacter::O
        } else {
            SquareCharacter::X
        }
    }

    pub fn is_my_turn(&self) -> bool {
        self.is_game_started && self.my_character == Some(self.turn())
    }
}
