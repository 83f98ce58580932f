use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::error::domain_error::DomainError;

/// One of the 9 cells of the board, numbered row by row from the top-left corner.
///
/// ```text
/// 0 | 1 | 2
/// 3 | 4 | 5
/// 6 | 7 | 8
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Position(u8);

impl Position {
    pub const TOP_LEFT: Position = Position(0);
    pub const TOP_CENTER: Position = Position(1);
    pub const TOP_RIGHT: Position = Position(2);
    pub const MIDDLE_LEFT: Position = Position(3);
    pub const CENTER: Position = Position(4);
    pub const MIDDLE_RIGHT: Position = Position(5);
    pub const BOTTOM_LEFT: Position = Position(6);
    pub const BOTTOM_CENTER: Position = Position(7);
    pub const BOTTOM_RIGHT: Position = Position(8);

    pub const ALL: [Position; 9] = [
        Position::TOP_LEFT,
        Position::TOP_CENTER,
        Position::TOP_RIGHT,
        Position::MIDDLE_LEFT,
        Position::CENTER,
        Position::MIDDLE_RIGHT,
        Position::BOTTOM_LEFT,
        Position::BOTTOM_CENTER,
        Position::BOTTOM_RIGHT,
    ];

    pub fn index(&self) -> usize {
        self.0.into()
    }
}

impl TryFrom<u8> for Position {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if usize::from(value) < Position::ALL.len() {
            Ok(Position(value))
        } else {
            Err(DomainError::InvalidPosition(value))
        }
    }
}

impl From<Position> for u8 {
    fn from(position: Position) -> Self {
        position.0
    }
}

impl Display for Position {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}
