pub mod actor;
pub mod actor_client;
pub mod board;
pub mod game_fsm;
pub mod position;
pub mod random;
pub mod win_detector;

use rust_fsm::StateMachine;

use crate::error::domain_error::DomainError;
use crate::error::Error;
use crate::game::board::{get_empty_board, Board, SquareCharacter, SquareUpdate};
use crate::game::game_fsm::{GameFsm, GameFsmInput, GameFsmState};
use crate::game::position::Position;
use crate::game::random::get_random_item;
use crate::game::win_detector::{has_player_won, GameResult};
use crate::player::Player;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GameOptions {
    /// The server plays `O` with random moves.
    pub vs_computer: bool,
}

/// What a player needs to know about the game when joining it.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSnapshot {
    pub state: GameFsmState,
    pub board: Board,
    pub x_player: Option<String>,
    pub o_player: Option<String>,
    pub character: Option<SquareCharacter>,
}

pub struct Game {
    id: String,
    fsm: StateMachine<GameFsm>,
    board: Board,
    players: Vec<Player>,
    turn: SquareCharacter,
    latest_square: Option<SquareUpdate>,
    computer_character: Option<SquareCharacter>,
}

impl Game {
    pub const COMPUTER_NICKNAME: &'static str = "Computer";
    const STARTING_CHARACTER: SquareCharacter = SquareCharacter::X;

    pub fn new(id: &str, options: GameOptions) -> Self {
        Self {
            id: id.to_string(),
            fsm: StateMachine::default(),
            board: get_empty_board(),
            players: Vec::default(),
            turn: Game::STARTING_CHARACTER,
            latest_square: None,
            computer_character: options
                .vs_computer
                .then_some(Game::STARTING_CHARACTER.opponent()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> &GameFsmState {
        self.fsm.state()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn turn(&self) -> SquareCharacter {
        self.turn
    }

    pub fn latest_square(&self) -> Option<SquareUpdate> {
        self.latest_square
    }

    pub fn is_started(&self) -> bool {
        self.state() == &GameFsmState::Playing
    }

    pub fn is_game_over(&self) -> bool {
        self.state() == &GameFsmState::GameOver
    }

    pub fn result(&self) -> GameResult {
        GameResult::from_board(&self.board)
    }

    /// Nickname of whoever plays `character`, the computer included.
    pub fn character_holder(&self, character: SquareCharacter) -> Option<&str> {
        if self.computer_character == Some(character) {
            return Some(Game::COMPUTER_NICKNAME);
        }
        self.players
            .iter()
            .find(|player| player.character == Some(character))
            .map(|player| player.nickname.as_str())
    }

    pub fn snapshot(&self, nickname: &str) -> GameSnapshot {
        GameSnapshot {
            state: self.state().clone(),
            board: self.board.clone(),
            x_player: self
                .character_holder(SquareCharacter::X)
                .map(str::to_string),
            o_player: self
                .character_holder(SquareCharacter::O)
                .map(str::to_string),
            character: self
                .get_player(nickname)
                .and_then(|player| player.character),
        }
    }

    pub fn all_players_are_disconnected(&self) -> bool {
        self.players.iter().all(|player| !player.is_connected)
    }

    pub fn add_player(&mut self, nickname: &str) -> Result<(), Error> {
        if self.computer_character.is_some() && nickname == Game::COMPUTER_NICKNAME {
            return Err(DomainError::PlayerAlreadyExists(nickname.to_string()).into());
        }

        if let Some(player) = self.get_player_mut(nickname) {
            if player.is_connected {
                return Err(DomainError::PlayerAlreadyExists(nickname.to_string()).into());
            }
            player.is_connected = true;
        } else {
            self.players.push(Player::new(nickname));
        }
        Ok(())
    }

    /// Returns the character released by the player, if any.
    ///
    /// Characters are kept while a game is being played, so the player can reconnect and go on.
    pub fn disconnect_player(&mut self, nickname: &str) -> Result<Option<SquareCharacter>, Error> {
        let is_playing = self.is_started();
        match self.get_player_mut(nickname) {
            Some(player) => {
                player.is_connected = false;
                if is_playing {
                    Ok(None)
                } else {
                    Ok(player.character.take())
                }
            }
            None => Err(Error::log_and_create_internal(&format!(
                "Tried to disconnect player '{nickname}' but it does not exist."
            ))),
        }
    }

    pub fn select_character(
        &mut self,
        nickname: &str,
        character: SquareCharacter,
    ) -> Result<(), Error> {
        if self.is_started() {
            return Err(DomainError::GameAlreadyInProgress(self.id.clone()).into());
        }
        if self.character_holder(character).is_some() {
            return Err(DomainError::CharacterAlreadyTaken(character).into());
        }

        let player = self.get_existing_player_mut(nickname)?;
        if let Some(selected) = player.character {
            return Err(DomainError::PlayerAlreadyHasCharacter(nickname.to_string(), selected).into());
        }
        player.character = Some(character);
        Ok(())
    }

    pub fn start_game(&mut self, nickname: &str) -> Result<(), Error> {
        if self.get_existing_player_mut(nickname)?.is_spectator() {
            return Err(DomainError::SpectatorCannotStartGame(nickname.to_string()).into());
        }
        if self.is_started() {
            return Err(DomainError::GameAlreadyInProgress(self.id.clone()).into());
        }
        if let Some(missing) = SquareCharacter::ALL
            .into_iter()
            .find(|character| !self.is_character_held_by_connected_player(*character))
        {
            return Err(DomainError::NotEnoughPlayers(missing).into());
        }

        self.process_event(&GameFsmInput::StartGame)?;
        self.board = get_empty_board();
        self.turn = Game::STARTING_CHARACTER;
        self.latest_square = None;
        Ok(())
    }

    /// Marks the square for the player and, in a game against the computer, plays its answer.
    pub fn choose_square(
        &mut self,
        nickname: &str,
        position: Position,
    ) -> Result<Vec<SquareUpdate>, Error> {
        if !self.is_started() {
            return Err(DomainError::GameNotInProgress(self.state().clone()).into());
        }
        let character = self
            .get_existing_player_mut(nickname)?
            .character
            .ok_or_else(|| DomainError::SpectatorCannotChooseSquare(nickname.to_string()))?;
        if character != self.turn {
            return Err(DomainError::NotPlayersTurn(nickname.to_string(), self.turn).into());
        }

        let mut updates = vec![self.mark_square(position, character)?];

        if let Some(computer_character) = self.computer_character {
            if self.is_started() && self.turn == computer_character {
                let empty_positions = self.board.empty_positions();
                let computer_position = *get_random_item(&empty_positions)?;
                log::debug!(
                    "Computer chose a square. GameId: '{}', Position: '{computer_position}'.",
                    self.id
                );
                updates.push(self.mark_square(computer_position, computer_character)?);
            }
        }

        Ok(updates)
    }

    fn mark_square(
        &mut self,
        position: Position,
        character: SquareCharacter,
    ) -> Result<SquareUpdate, Error> {
        if !self.board.set_square(position, character) {
            return Err(DomainError::SquareAlreadyTaken(position).into());
        }
        let update = SquareUpdate {
            position,
            character,
        };
        self.latest_square = Some(update);

        if has_player_won(&self.board.positions_of(character)) || self.board.is_full() {
            self.process_event(&GameFsmInput::Finish)?;
            self.release_characters_of_disconnected_players();
        } else {
            self.turn = character.opponent();
        }
        Ok(update)
    }

    fn is_character_held_by_connected_player(&self, character: SquareCharacter) -> bool {
        self.computer_character == Some(character)
            || self
                .players
                .iter()
                .any(|player| player.character == Some(character) && player.is_connected)
    }

    /// Characters kept for reconnection are only useful while the game is being played.
    fn release_characters_of_disconnected_players(&mut self) {
        for player in self.players.iter_mut().filter(|player| !player.is_connected) {
            if let Some(character) = player.character.take() {
                log::info!(
                    "Released character {character} of disconnected player. GameId: '{}', Nickname: '{}'.",
                    self.id,
                    player.nickname
                );
            }
        }
    }

    fn get_player(&self, nickname: &str) -> Option<&Player> {
        self.players
            .iter()
            .find(|player| player.nickname == nickname)
    }

    fn get_player_mut(&mut self, nickname: &str) -> Option<&mut Player> {
        self.players
            .iter_mut()
            .find(|player| player.nickname == nickname)
    }

    fn get_existing_player_mut(&mut self, nickname: &str) -> Result<&mut Player, Error> {
        self.get_player_mut(nickname).ok_or_else(|| {
            Error::log_and_create_internal(&format!(
                "Player '{nickname}' sent a command but it does not exist."
            ))
        })
    }

    fn process_event(&mut self, event: &GameFsmInput) -> Result<(), Error> {
        match self.fsm.consume(event) {
            Ok(_) => Ok(()),
            Err(error) => Err(Error::log_and_create_internal(&format!(
                "The fsm in state {:?} can't transition with an event {:?}. Error: '{error}'.",
                self.fsm.state(),
                event
            ))),
        }
    }
}
