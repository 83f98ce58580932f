use std::fmt::{Display, Formatter};
use std::time::Duration;
use tokio::sync::oneshot::Sender as OneshotSender;
use tokio::sync::{
    broadcast, mpsc,
    mpsc::{Receiver, Sender},
};
use tokio::time;

use crate::config::GameSettings;
use crate::error::Error;
use crate::game::actor_client::GameClient;
use crate::game::board::{Board, SquareCharacter, SquareUpdate};
use crate::game::position::Position;
use crate::game::win_detector::GameResult;
use crate::game::{Game, GameOptions, GameSnapshot};
use crate::game_factory::actor_client::GameFactoryClient;
use crate::metrics::{ACTIVE_GAMES, FINISHED_GAMES};

type Response = (GameEvent, String, OneshotSender<GameEvent>);

pub struct GameActor {
    game: Game,
    game_rx: Receiver<GameCommand>,
    broadcast_tx: broadcast::Sender<GameWideEvent>,
    game_factory: GameFactoryClient,
    inactivity_timeout: Duration,
}

impl GameActor {
    pub fn spawn(
        id: &str,
        settings: GameSettings,
        options: GameOptions,
        game_factory: GameFactoryClient,
    ) -> GameClient {
        let game = Game::new(id, options);
        let (game_tx, game_rx): (Sender<GameCommand>, Receiver<GameCommand>) = mpsc::channel(128);
        let (broadcast_tx, _): (
            broadcast::Sender<GameWideEvent>,
            broadcast::Receiver<GameWideEvent>,
        ) = broadcast::channel(32);

        tokio::spawn(
            GameActor {
                game,
                game_rx,
                broadcast_tx,
                game_factory,
                inactivity_timeout: settings.inactivity_timeout(),
            }
            .start(),
        );

        GameClient { game_tx }
    }

    async fn start(mut self) {
        ACTIVE_GAMES.inc();

        loop {
            match time::timeout(self.inactivity_timeout, self.game_rx.recv()).await {
                Err(_) => {
                    if self.game.all_players_are_disconnected() {
                        log::info!(
                            "No activity detected in game {} after {} seconds. Stopping game actor.",
                            self.game.id(),
                            self.inactivity_timeout.as_secs()
                        );
                        break;
                    }
                }
                Ok(None) => {
                    log::info!("Game channel has been dropped. Stopping game actor.");
                    break;
                }
                Ok(Some(command)) => {
                    let (response, mut game_wide_events) = self.process_command(command);
                    if let Some((event, nickname, response_tx)) = response {
                        if let Err(error) = response_tx.send(event) {
                            log::error!("Sent GameEvent to Player {nickname} but the response channel is closed. Removing the Player. Error: '{error}'.");
                            game_wide_events.extend(self.disconnect_player(&nickname));
                        }
                    }
                    for game_wide_event in game_wide_events {
                        self.broadcast(game_wide_event);
                    }
                }
            }
        }

        self.stop_game().await;
        ACTIVE_GAMES.dec();
    }

    /// Applies the command to the game. Returns the reply for the sender, if the command
    /// expects one, and the events every player of the game must receive afterwards.
    fn process_command(&mut self, command: GameCommand) -> (Option<Response>, Vec<GameWideEvent>) {
        match command {
            GameCommand::AddPlayer {
                nickname,
                response_tx,
            } => {
                let event = match self.game.add_player(&nickname) {
                    Ok(()) => GameEvent::PlayerAdded {
                        broadcast_rx: self.broadcast_tx.subscribe(),
                        snapshot: self.game.snapshot(&nickname),
                    },
                    Err(error) => GameEvent::Error { error },
                };
                (Some((event, nickname, response_tx)), vec![])
            }
            GameCommand::DisconnectPlayer { nickname } => (None, self.disconnect_player(&nickname)),
            GameCommand::SelectCharacter {
                nickname,
                character,
                response_tx,
            } => match self.game.select_character(&nickname, character) {
                Ok(()) => (
                    Some((
                        GameEvent::CharacterSelected { character },
                        nickname,
                        response_tx,
                    )),
                    vec![self.players_event()],
                ),
                Err(error) => (Some((GameEvent::Error { error }, nickname, response_tx)), vec![]),
            },
            GameCommand::StartGame {
                nickname,
                response_tx,
            } => match self.game.start_game(&nickname) {
                Ok(()) => {
                    log::info!("Game started. GameId: '{}', Nickname: '{nickname}'.", self.game.id());
                    (
                        Some((GameEvent::Ok, nickname, response_tx)),
                        vec![GameWideEvent::GameStarted {
                            board: self.game.board().clone(),
                        }],
                    )
                }
                Err(error) => (Some((GameEvent::Error { error }, nickname, response_tx)), vec![]),
            },
            GameCommand::ChooseSquare {
                nickname,
                position,
                response_tx,
            } => self.choose_square(nickname, position, response_tx),
            GameCommand::GetBoard {
                nickname,
                response_tx,
            } => (
                Some((
                    GameEvent::Board {
                        board: self.game.board().clone(),
                    },
                    nickname,
                    response_tx,
                )),
                vec![],
            ),
        }
    }

    fn choose_square(
        &mut self,
        nickname: String,
        position: Position,
        response_tx: OneshotSender<GameEvent>,
    ) -> (Option<Response>, Vec<GameWideEvent>) {
        let players_before = self.players_event();
        match self.game.choose_square(&nickname, position) {
            Ok(updates) => {
                let mut game_wide_events = vec![GameWideEvent::SquaresChosen {
                    updates,
                    board: self.game.board().clone(),
                }];
                if self.game.is_game_over() {
                    let result = self.game.result();
                    log::info!(
                        "Game over. GameId: '{}', HasWinner: '{}', WinningCharacter: '{:?}'.",
                        self.game.id(),
                        result.has_winner,
                        result.winning_character
                    );
                    FINISHED_GAMES.inc();
                    game_wide_events.push(GameWideEvent::GameOver { result });
                    // Players who left during the game lose their character once it is over
                    let players_after = self.players_event();
                    if players_after != players_before {
                        game_wide_events.push(players_after);
                    }
                }
                (Some((GameEvent::Ok, nickname, response_tx)), game_wide_events)
            }
            Err(error) => (Some((GameEvent::Error { error }, nickname, response_tx)), vec![]),
        }
    }

    fn disconnect_player(&mut self, nickname: &str) -> Vec<GameWideEvent> {
        match self.game.disconnect_player(nickname) {
            Ok(Some(character)) => {
                log::info!(
                    "Player left and released character {character}. GameId: '{}', Nickname: '{nickname}'.",
                    self.game.id()
                );
                vec![self.players_event()]
            }
            _ => vec![],
        }
    }

    fn players_event(&self) -> GameWideEvent {
        GameWideEvent::Players {
            x_player: self
                .game
                .character_holder(SquareCharacter::X)
                .map(str::to_string),
            o_player: self
                .game
                .character_holder(SquareCharacter::O)
                .map(str::to_string),
        }
    }

    fn broadcast(&self, event: GameWideEvent) {
        // Sending only fails when nobody is subscribed, which is fine for a game without players
        if self.broadcast_tx.send(event).is_err() {
            log::debug!(
                "No player is listening to the game events. GameId: '{}'.",
                self.game.id()
            );
        }
    }

    async fn stop_game(self) {
        let game_id = self.game.id();
        if let Err(error) = self.game_factory.remove_game(game_id).await {
            log::error!("The GameFactory channel is closed, can't remove the Game. GameId: '{game_id}', Error: '{error}'.");
        }
    }
}

pub(crate) enum GameCommand {
    AddPlayer {
        nickname: String,
        response_tx: OneshotSender<GameEvent>,
    },
    DisconnectPlayer {
        nickname: String,
    },
    SelectCharacter {
        nickname: String,
        character: SquareCharacter,
        response_tx: OneshotSender<GameEvent>,
    },
    StartGame {
        nickname: String,
        response_tx: OneshotSender<GameEvent>,
    },
    ChooseSquare {
        nickname: String,
        position: Position,
        response_tx: OneshotSender<GameEvent>,
    },
    GetBoard {
        nickname: String,
        response_tx: OneshotSender<GameEvent>,
    },
}

#[derive(Debug)]
pub(crate) enum GameEvent {
    PlayerAdded {
        broadcast_rx: broadcast::Receiver<GameWideEvent>,
        snapshot: GameSnapshot,
    },
    CharacterSelected {
        character: SquareCharacter,
    },
    Board {
        board: Board,
    },
    Ok,
    Error {
        error: Error,
    },
}

impl Display for GameEvent {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{}",
            match self {
                GameEvent::PlayerAdded { .. } => "GameEvent::PlayerAdded".to_string(),
                GameEvent::CharacterSelected { character } =>
                    format!("GameEvent::CharacterSelected({character})"),
                GameEvent::Board { .. } => "GameEvent::Board".to_string(),
                GameEvent::Ok => "GameEvent::Ok".to_string(),
                GameEvent::Error { error } => format!("Error '{error}'"),
            }
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum GameWideEvent {
    Players {
        x_player: Option<String>,
        o_player: Option<String>,
    },
    GameStarted {
        board: Board,
    },
    SquaresChosen {
        updates: Vec<SquareUpdate>,
        board: Board,
    },
    GameOver {
        result: GameResult,
    },
}
