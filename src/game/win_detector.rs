use serde::{Deserialize, Serialize};

use crate::game::board::{Board, Square, SquareCharacter};
use crate::game::position::Position;

pub type WinningCombination = [Position; 3];

pub const WINNING_COMBINATIONS: [WinningCombination; 8] = [
    // Rows
    [Position::TOP_LEFT, Position::TOP_CENTER, Position::TOP_RIGHT],
    [Position::MIDDLE_LEFT, Position::CENTER, Position::MIDDLE_RIGHT],
    [
        Position::BOTTOM_LEFT,
        Position::BOTTOM_CENTER,
        Position::BOTTOM_RIGHT,
    ],
    // Columns
    [Position::TOP_LEFT, Position::MIDDLE_LEFT, Position::BOTTOM_LEFT],
    [Position::TOP_CENTER, Position::CENTER, Position::BOTTOM_CENTER],
    [
        Position::TOP_RIGHT,
        Position::MIDDLE_RIGHT,
        Position::BOTTOM_RIGHT,
    ],
    // Diagonals
    [Position::TOP_LEFT, Position::CENTER, Position::BOTTOM_RIGHT],
    [Position::TOP_RIGHT, Position::CENTER, Position::BOTTOM_LEFT],
];

/// True when the positions of one player contain at least one full row, column or diagonal.
pub fn has_player_won(player_positions: &[Position]) -> bool {
    winning_combination(player_positions).is_some()
}

/// The first combination of [`WINNING_COMBINATIONS`] fully covered by `player_positions`.
pub fn winning_combination(player_positions: &[Position]) -> Option<WinningCombination> {
    WINNING_COMBINATIONS.into_iter().find(|combination| {
        combination
            .iter()
            .all(|position| player_positions.contains(position))
    })
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    pub winning_combination: Vec<Position>,
    pub winning_character: Square,
    pub has_winner: bool,
}

impl GameResult {
    pub fn from_board(board: &Board) -> GameResult {
        SquareCharacter::ALL
            .into_iter()
            .find_map(|character| {
                winning_combination(&board.positions_of(character)).map(|combination| GameResult {
                    winning_combination: combination.to_vec(),
                    winning_character: character.into(),
                    has_winner: true,
                })
            })
            .unwrap_or_default()
    }
}
