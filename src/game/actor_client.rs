use tokio::sync::broadcast;
use tokio::sync::mpsc::Sender;
use tokio::sync::oneshot::{self, Receiver as OneshotReceiver, Sender as OneshotSender};

use crate::error::Error;
use crate::game::actor::{GameCommand, GameEvent, GameWideEvent};
use crate::game::board::{Board, SquareCharacter};
use crate::game::position::Position;
use crate::game::GameSnapshot;

#[derive(Clone, Debug)]
pub struct GameClient {
    pub(super) game_tx: Sender<GameCommand>,
}

impl GameClient {
    pub async fn add_player(
        &self,
        nickname: &str,
    ) -> Result<(GameSnapshot, GameWideEventReceiver), Error> {
        let (tx, rx): (OneshotSender<GameEvent>, OneshotReceiver<GameEvent>) = oneshot::channel();

        // A failure here means the game is still registered in the GameFactory but its actor
        // already stopped, e.g. the last player left right before somebody tried to join
        self.send_command(
            GameCommand::AddPlayer {
                nickname: nickname.to_string(),
                response_tx: tx,
            },
            "AddPlayer",
        )
        .await?;

        match GameClient::receive_event(rx, "AddPlayer").await? {
            GameEvent::PlayerAdded {
                broadcast_rx,
                snapshot,
            } => Ok((snapshot, GameWideEventReceiver { broadcast_rx })),
            unexpected_event => Err(GameClient::unexpected_event(unexpected_event)),
        }
    }

    pub async fn remove_player(&self, nickname: &str) -> Result<(), Error> {
        self.send_command(
            GameCommand::DisconnectPlayer {
                nickname: nickname.to_string(),
            },
            "DisconnectPlayer",
        )
        .await
    }

    pub async fn select_character(
        &self,
        nickname: &str,
        character: SquareCharacter,
    ) -> Result<SquareCharacter, Error> {
        let (tx, rx): (OneshotSender<GameEvent>, OneshotReceiver<GameEvent>) = oneshot::channel();

        self.send_command(
            GameCommand::SelectCharacter {
                nickname: nickname.to_string(),
                character,
                response_tx: tx,
            },
            "SelectCharacter",
        )
        .await?;

        match GameClient::receive_event(rx, "SelectCharacter").await? {
            GameEvent::CharacterSelected { character } => Ok(character),
            unexpected_event => Err(GameClient::unexpected_event(unexpected_event)),
        }
    }

    pub async fn start_game(&self, nickname: &str) -> Result<(), Error> {
        let (tx, rx): (OneshotSender<GameEvent>, OneshotReceiver<GameEvent>) = oneshot::channel();

        self.send_command(
            GameCommand::StartGame {
                nickname: nickname.to_string(),
                response_tx: tx,
            },
            "StartGame",
        )
        .await?;

        GameClient::receive_ok(rx, "StartGame").await
    }

    pub async fn choose_square(&self, nickname: &str, position: Position) -> Result<(), Error> {
        let (tx, rx): (OneshotSender<GameEvent>, OneshotReceiver<GameEvent>) = oneshot::channel();

        self.send_command(
            GameCommand::ChooseSquare {
                nickname: nickname.to_string(),
                position,
                response_tx: tx,
            },
            "ChooseSquare",
        )
        .await?;

        GameClient::receive_ok(rx, "ChooseSquare").await
    }

    pub async fn get_board(&self, nickname: &str) -> Result<Board, Error> {
        let (tx, rx): (OneshotSender<GameEvent>, OneshotReceiver<GameEvent>) = oneshot::channel();

        self.send_command(
            GameCommand::GetBoard {
                nickname: nickname.to_string(),
                response_tx: tx,
            },
            "GetBoard",
        )
        .await?;

        match GameClient::receive_event(rx, "GetBoard").await? {
            GameEvent::Board { board } => Ok(board),
            unexpected_event => Err(GameClient::unexpected_event(unexpected_event)),
        }
    }

    async fn send_command(&self, command: GameCommand, command_name: &str) -> Result<(), Error> {
        self.game_tx.send(command).await.map_err(|error| {
            Error::log_and_create_internal(&format!(
                "Tried to send GameCommand::{command_name} but GameActor is not listening. Error: {error}."
            ))
        })
    }

    async fn receive_ok(rx: OneshotReceiver<GameEvent>, command_name: &str) -> Result<(), Error> {
        match GameClient::receive_event(rx, command_name).await? {
            GameEvent::Ok => Ok(()),
            unexpected_event => Err(GameClient::unexpected_event(unexpected_event)),
        }
    }

    async fn receive_event(
        rx: OneshotReceiver<GameEvent>,
        command_name: &str,
    ) -> Result<GameEvent, Error> {
        match rx.await {
            Ok(GameEvent::Error { error }) => Err(error),
            Ok(event) => Ok(event),
            Err(_) => Err(Error::log_and_create_internal(&format!(
                "Player sent a GameCommand::{command_name} to Game, but Game channel died."
            ))),
        }
    }

    fn unexpected_event(event: GameEvent) -> Error {
        Error::log_and_create_internal(&format!(
            "Received an unexpected GameEvent. GameEvent: '{event}'."
        ))
    }
}

pub struct GameWideEventReceiver {
    broadcast_rx: broadcast::Receiver<GameWideEvent>,
}

impl GameWideEventReceiver {
    pub async fn next(&mut self) -> Result<GameWideEvent, Error> {
        self.broadcast_rx.recv().await.map_err(|error| {
            Error::log_and_create_internal(&format!(
                "The broadcast channel with the Game has been closed. Error: {error}."
            ))
        })
    }
}
