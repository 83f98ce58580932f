pub mod actor;

use crate::game::board::SquareCharacter;

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub nickname: String,
    /// `None` while the player is only watching the game.
    pub character: Option<SquareCharacter>,
    pub is_connected: bool,
}

impl Player {
    pub fn new(nickname: &str) -> Self {
        Player {
            nickname: nickname.to_string(),
            character: None,
            is_connected: true,
        }
    }

    pub fn is_spectator(&self) -> bool {
        self.character.is_none()
    }
}
