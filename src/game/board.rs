use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::game::position::Position;

/// The marker a player puts on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SquareCharacter {
    X,
    O,
}

impl SquareCharacter {
    pub const ALL: [SquareCharacter; 2] = [SquareCharacter::X, SquareCharacter::O];

    pub fn opponent(&self) -> SquareCharacter {
        match self {
            SquareCharacter::X => SquareCharacter::O,
            SquareCharacter::O => SquareCharacter::X,
        }
    }
}

impl Display for SquareCharacter {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{self:?}")
    }
}

/// Content of a single cell. Serialized as `""`, `"X"` or `"O"`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    #[default]
    #[serde(rename = "")]
    Empty,
    X,
    O,
}

impl Square {
    pub fn character(&self) -> Option<SquareCharacter> {
        match self {
            Square::Empty => None,
            Square::X => Some(SquareCharacter::X),
            Square::O => Some(SquareCharacter::O),
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Square::Empty
    }
}

impl From<SquareCharacter> for Square {
    fn from(character: SquareCharacter) -> Self {
        match character {
            SquareCharacter::X => Square::X,
            SquareCharacter::O => Square::O,
        }
    }
}

impl From<Option<SquareCharacter>> for Square {
    fn from(character: Option<SquareCharacter>) -> Self {
        character.map(Square::from).unwrap_or_default()
    }
}

/// A single square that has just been marked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquareUpdate {
    pub position: Position,
    pub character: SquareCharacter,
}

/// The 9 cells of the game, indexed by [`Position`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board([Square; 9]);

/// Returns a new board where every square is empty.
pub fn get_empty_board() -> Board {
    Board([Square::Empty; 9])
}

impl Board {
    pub fn squares(&self) -> &[Square; 9] {
        &self.0
    }

    pub fn square(&self, position: Position) -> Square {
        self.0[position.index()]
    }

    /// Marks the square, returns `false` and leaves the board untouched if it was already taken.
    pub fn set_square(&mut self, position: Position, character: SquareCharacter) -> bool {
        let square = &mut self.0[position.index()];
        if square.is_empty() {
            *square = character.into();
            true
        } else {
            false
        }
    }

    pub fn positions_of(&self, character: SquareCharacter) -> Vec<Position> {
        let square = Square::from(character);
        Position::ALL
            .into_iter()
            .filter(|position| self.square(*position) == square)
            .collect()
    }

    pub fn empty_positions(&self) -> Vec<Position> {
        Position::ALL
            .into_iter()
            .filter(|position| self.square(*position).is_empty())
            .collect()
    }

    pub fn is_full(&self) -> bool {
        self.0.iter().all(|square| !square.is_empty())
    }
}
