use std::fmt::{Display, Formatter};
use tokio::sync::mpsc::{self, Receiver, Sender};
use tokio::sync::oneshot::Sender as OneshotSender;

use crate::config::GameSettings;
use crate::error::Error;
use crate::game::actor_client::GameClient;
use crate::game::GameOptions;
use crate::game_factory::actor_client::GameFactoryClient;
use crate::game_factory::GameFactory;

/// Owns the registry of live games. Games register themselves through it when created and
/// unregister when their actor stops.
pub struct GameFactoryActor {
    game_factory: GameFactory,
    command_rx: Receiver<GameFactoryCommand>,
    command_tx: Sender<GameFactoryCommand>,
}

impl GameFactoryActor {
    pub fn spawn(game_settings: GameSettings) -> GameFactoryClient {
        let (command_tx, command_rx): (Sender<GameFactoryCommand>, Receiver<GameFactoryCommand>) =
            mpsc::channel(512);

        tokio::spawn(
            GameFactoryActor {
                game_factory: GameFactory::new(game_settings),
                command_rx,
                command_tx: command_tx.clone(),
            }
            .start(),
        );

        GameFactoryClient {
            game_factory_tx: command_tx,
        }
    }

    async fn start(mut self) {
        while let Some(command) = self.command_rx.recv().await {
            let Some((response, response_tx)) = self.process_command(command) else {
                continue;
            };
            if let Err(response) = response_tx.send(response) {
                log::error!("Sent {response} but the response channel is closed.");
            }
        }
        log::info!("GameFactory channel has been dropped. Stopping game factory actor.");
    }

    fn process_command(
        &mut self,
        command: GameFactoryCommand,
    ) -> Option<(GameFactoryResponse, OneshotSender<GameFactoryResponse>)> {
        match command {
            GameFactoryCommand::CreateGame {
                options,
                response_tx,
            } => {
                // Each game gets its own client so it can unregister itself when it stops
                let game_factory = GameFactoryClient {
                    game_factory_tx: self.command_tx.clone(),
                };
                let game_id = self.game_factory.create_new_game(options, game_factory);
                Some((GameFactoryResponse::GameCreated { game_id }, response_tx))
            }
            GameFactoryCommand::RemoveGame { game_id } => {
                if self.game_factory.remove_game(&game_id).is_some() {
                    log::info!("Game removed. GameId: '{game_id}'.");
                }
                None
            }
            GameFactoryCommand::GetGameActor {
                game_id,
                response_tx,
            } => {
                let response = match self.game_factory.get_game(&game_id) {
                    Ok(game) => GameFactoryResponse::GameActor { game: game.clone() },
                    Err(error) => GameFactoryResponse::Error { error },
                };
                Some((response, response_tx))
            }
        }
    }
}

#[derive(Debug)]
pub(crate) enum GameFactoryCommand {
    CreateGame {
        options: GameOptions,
        response_tx: OneshotSender<GameFactoryResponse>,
    },
    RemoveGame {
        game_id: String,
    },
    GetGameActor {
        game_id: String,
        response_tx: OneshotSender<GameFactoryResponse>,
    },
}

#[derive(Debug)]
pub(crate) enum GameFactoryResponse {
    GameCreated { game_id: String },
    GameActor { game: GameClient },
    Error { error: Error },
}

impl Display for GameFactoryResponse {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GameFactoryResponse::GameCreated { game_id } => {
                write!(formatter, "GameFactoryResponse::GameCreated({game_id})")
            }
            GameFactoryResponse::GameActor { .. } => {
                write!(formatter, "GameFactoryResponse::GameActor")
            }
            GameFactoryResponse::Error { error } => {
                write!(formatter, "GameFactoryResponse::Error('{error}')")
            }
        }
    }
}
