use axum::extract::ws::{Message, WebSocket};
use std::time::Duration;
use tokio::select;
use tokio::time::error::Elapsed;
use tokio::time::{timeout_at, Instant};

use crate::error::Error;
use crate::game::actor::GameWideEvent;
use crate::game::actor_client::{GameClient, GameWideEventReceiver};
use crate::metrics::CONNECTED_PLAYERS;
use crate::websocket::message::{GameMessage, GameResponse};
use crate::websocket::{close, parse_message, send_error, send_message, send_message_string};

pub struct PlayerActor {
    nickname: String,
    game: GameClient,
    game_wide_event_receiver: GameWideEventReceiver,
    websocket: WebSocket,
    player_timeout: Duration,
}

impl PlayerActor {
    /// Joins the game and serves the websocket until the player leaves.
    pub async fn create(
        nickname: String,
        game: GameClient,
        mut websocket: WebSocket,
        player_timeout: Duration,
    ) {
        match game.add_player(&nickname).await {
            Ok((snapshot, game_wide_event_receiver)) => {
                let mut player = PlayerActor {
                    nickname,
                    game,
                    game_wide_event_receiver,
                    websocket,
                    player_timeout,
                };
                match send_message(&mut player.websocket, &GameResponse::welcome(snapshot)).await {
                    Ok(()) => player.start().await,
                    Err(error) => {
                        log::info!("Could not welcome player {}. Error: '{error}'.", player.nickname);
                        player.leave().await;
                    }
                }
            }
            Err(error) => {
                send_error(&mut websocket, &error).await;
                close(websocket).await;
            }
        }
    }

    async fn start(mut self) {
        CONNECTED_PLAYERS.inc();
        // Only messages from the player move the deadline, game events do not
        let mut read_deadline = Instant::now() + self.player_timeout;

        loop {
            select! {
                game_wide_event = self.game_wide_event_receiver.next() => {
                    if let Err(error) = self.receive_game_wide_event(game_wide_event).await {
                        send_error(&mut self.websocket, &error).await;
                        if PlayerActor::should_close_websocket(&error) {
                            break;
                        }
                    }
                },
                websocket_message = timeout_at(read_deadline, self.websocket.recv()) => {
                    read_deadline = Instant::now() + self.player_timeout;
                    if let Err(error) = self.receive_websocket_message(websocket_message).await {
                        send_error(&mut self.websocket, &error).await;
                        if PlayerActor::should_close_websocket(&error) {
                            break;
                        }
                    }
                },
            }
        }

        self.leave().await;
        CONNECTED_PLAYERS.dec();
    }

    async fn leave(self) {
        if let Err(error) = self.game.remove_player(&self.nickname).await {
            log::error!(
                "Could not remove player {} from the game. Error: '{error}'.",
                self.nickname
            );
        }
        close(self.websocket).await;
    }

    /// Rule violations and bad messages are reported and the player goes on.
    fn should_close_websocket(error: &Error) -> bool {
        match error {
            Error::Internal(_) => true,
            Error::WebsocketClosed(_) => true,
            Error::Domain(_) => false,
            Error::InvalidArgument(_) => false,
            Error::UnprocessableMessage(_, _) => false,
        }
    }

    async fn receive_game_wide_event(
        &mut self,
        game_wide_event: Result<GameWideEvent, Error>,
    ) -> Result<(), Error> {
        for response in PlayerActor::to_responses(game_wide_event?) {
            send_message(&mut self.websocket, &response).await?;
        }
        Ok(())
    }

    fn to_responses(game_wide_event: GameWideEvent) -> Vec<GameResponse> {
        match game_wide_event {
            GameWideEvent::Players { x_player, o_player } => {
                vec![GameResponse::players(x_player, o_player)]
            }
            GameWideEvent::GameStarted { board } => {
                vec![GameResponse::GameStarted(true), GameResponse::Board(board)]
            }
            GameWideEvent::SquaresChosen { updates, board } => updates
                .into_iter()
                .map(GameResponse::Square)
                .chain([GameResponse::Board(board)])
                .collect(),
            GameWideEvent::GameOver { result } => {
                vec![GameResponse::GameOver(true), GameResponse::Result(result)]
            }
        }
    }

    async fn receive_websocket_message(
        &mut self,
        websocket_message: Result<Option<Result<Message, axum::Error>>, Elapsed>,
    ) -> Result<(), Error> {
        match websocket_message {
            Ok(Some(Ok(Message::Text(text)))) => match text.as_str() {
                "ping" => send_message_string(&mut self.websocket, "pong").await,
                message => self.process_game_message(parse_message(message)?).await,
            },
            // browser said "close"
            Ok(Some(Ok(Message::Close(_)))) => {
                self.log_connection_lost_with_player("browser sent 'Close' websocket frame");
                Err(Error::WebsocketClosed(
                    "browser sent 'Close' websocket frame".to_string(),
                ))
            }
            // websocket was closed
            Ok(None) => {
                self.log_connection_lost_with_player("other end of websocket was closed abruptly");
                Err(Error::WebsocketClosed(
                    "other end of websocket was closed abruptly".to_string(),
                ))
            }
            // timeout without receiving anything from player
            Err(_) => {
                self.log_connection_lost_with_player(
                    "connection timed out; missing 'ping' messages",
                );
                Err(Error::WebsocketClosed(
                    "connection timed out; missing 'ping' messages".to_string(),
                ))
            }
            Ok(Some(Err(error))) => {
                self.log_connection_lost_with_player(&format!("websocket error '{error}'"));
                Err(Error::WebsocketClosed(error.to_string()))
            }
            // axum answers pings on its own
            Ok(Some(Ok(Message::Ping(_) | Message::Pong(_)))) => Ok(()),
            Ok(Some(Ok(Message::Binary(_)))) => Err(Error::UnprocessableMessage(
                "Unsupported message type".to_string(),
                "Binary message".to_string(),
            )),
        }
    }

    async fn process_game_message(&mut self, message: GameMessage) -> Result<(), Error> {
        match message {
            GameMessage::SelectCharacter(character) => {
                let character = self.game.select_character(&self.nickname, character).await?;
                send_message(
                    &mut self.websocket,
                    &GameResponse::CharacterSelected(character),
                )
                .await
            }
            GameMessage::StartGame => self.game.start_game(&self.nickname).await,
            GameMessage::ChooseSquare(position) => {
                self.game.choose_square(&self.nickname, position).await
            }
            GameMessage::GetBoard => {
                let board = self.game.get_board(&self.nickname).await?;
                send_message(&mut self.websocket, &GameResponse::Board(board)).await
            }
        }
    }

    fn log_connection_lost_with_player(&self, reason: &str) {
        log::info!(
            "Connection with player {} lost due to: {}. Stopping player actor.",
            &self.nickname,
            reason,
        );
    }
}
