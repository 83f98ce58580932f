use tokio::sync::mpsc::Sender;
use tokio::sync::oneshot::{self, Receiver as OneshotReceiver, Sender as OneshotSender};

use crate::error::Error;
use crate::game::actor_client::GameClient;
use crate::game::GameOptions;
use crate::game_factory::actor::{GameFactoryCommand, GameFactoryResponse};

pub struct GameFactoryClient {
    pub(super) game_factory_tx: Sender<GameFactoryCommand>,
}

impl GameFactoryClient {
    /// Spawns a new game and returns its id.
    pub async fn create_game(&self, options: GameOptions) -> Result<String, Error> {
        let response = self
            .request(
                |response_tx| GameFactoryCommand::CreateGame {
                    options,
                    response_tx,
                },
                "CreateGame",
            )
            .await?;

        match response {
            GameFactoryResponse::GameCreated { game_id } => Ok(game_id),
            unexpected_response => Err(GameFactoryClient::unexpected_response(unexpected_response)),
        }
    }

    pub async fn remove_game(&self, game_id: &str) -> Result<(), Error> {
        self.send_command(
            GameFactoryCommand::RemoveGame {
                game_id: game_id.to_string(),
            },
            "RemoveGame",
        )
        .await
    }

    /// Fails with `GameDoesNotExist` when there is no live game with that id.
    pub async fn get_game(&self, game_id: &str) -> Result<GameClient, Error> {
        let response = self
            .request(
                |response_tx| GameFactoryCommand::GetGameActor {
                    game_id: game_id.to_string(),
                    response_tx,
                },
                "GetGameActor",
            )
            .await?;

        match response {
            GameFactoryResponse::GameActor { game } => Ok(game),
            unexpected_response => Err(GameFactoryClient::unexpected_response(unexpected_response)),
        }
    }

    async fn request<F>(
        &self,
        create_command: F,
        command_name: &str,
    ) -> Result<GameFactoryResponse, Error>
    where
        F: FnOnce(OneshotSender<GameFactoryResponse>) -> GameFactoryCommand,
    {
        let (tx, rx): (
            OneshotSender<GameFactoryResponse>,
            OneshotReceiver<GameFactoryResponse>,
        ) = oneshot::channel();

        self.send_command(create_command(tx), command_name).await?;

        match rx.await {
            Ok(GameFactoryResponse::Error { error }) => Err(error),
            Ok(response) => Ok(response),
            Err(_) => Err(Error::log_and_create_internal(&format!(
                "Sent GameFactoryCommand::{command_name} to the GameFactory actor, but the actor channel died."
            ))),
        }
    }

    async fn send_command(
        &self,
        command: GameFactoryCommand,
        command_name: &str,
    ) -> Result<(), Error> {
        self.game_factory_tx.send(command).await.map_err(|error| {
            Error::log_and_create_internal(&format!(
                "The GameFactory is not alive. Can't send GameFactoryCommand::{command_name}. Error: '{error}'."
            ))
        })
    }

    fn unexpected_response(response: GameFactoryResponse) -> Error {
        Error::log_and_create_internal(&format!(
            "Received an unexpected GameFactoryResponse. GameFactoryResponse: '{response}'."
        ))
    }
}
