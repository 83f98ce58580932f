use futures_util::StreamExt;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, time::Duration};
use tictacgo::config::Config;
use tictacgo::game::board::SquareCharacter;
use tictacgo::websocket::message::GameResponse;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use super::{test_game::TestGame, test_player::TestPlayer};

static ENVIRONMENT: Lazy<()> = Lazy::new(|| std::env::set_var("ENVIRONMENT", "dev"));

pub struct TestApp {
    pub base_address: String,
    pub inactivity_timeout: Duration,
}

impl TestApp {
    pub async fn spawn_app() -> TestApp {
        TestApp::spawn_app_with_player_timeout(None).await
    }

    pub async fn spawn_app_with_player_timeout(player_timeout_seconds: Option<u64>) -> TestApp {
        Lazy::force(&ENVIRONMENT);

        // Binding to port 0 triggers an OS scan for an available port, this way we can run tests in parallel where each runs its own application
        let random_port_address = SocketAddr::from(([127, 0, 0, 1], 0));
        let listener = TcpListener::bind(random_port_address)
            .await
            .expect("Failed to bind to bind random port.");
        let address = listener.local_addr().unwrap();
        let config = {
            let mut config = Config::get().expect("Failed to read configuration.");
            config.game.inactivity_timeout_seconds = 1;
            if let Some(player_timeout_seconds) = player_timeout_seconds {
                config.game.player_timeout_seconds = player_timeout_seconds;
            }
            config
        };

        let server = tictacgo::startup::create_web_server(config.clone(), listener);
        let _ = tokio::spawn(server);

        TestApp {
            base_address: format!("127.0.0.1:{}", address.port()),
            inactivity_timeout: config.game.inactivity_timeout(),
        }
    }

    pub async fn open_game_websocket(
        &self,
        game_id: &str,
        nickname: &str,
    ) -> Result<WebSocketStream<MaybeTlsStream<TcpStream>>, String> {
        tokio_tungstenite::connect_async(format!(
            "ws://{}/game/{game_id}/player/{nickname}/ws",
            self.base_address
        ))
        .await
        .map(|websocket_stream| websocket_stream.0)
        .map_err(|error| format!("WebSocket could not be created. Error: '{error}'."))
    }

    pub async fn connect_player(&self, game_id: &str, nickname: &str) -> Result<TestPlayer, String> {
        let (tx, rx) = self.open_game_websocket(game_id, nickname).await?.split();

        Ok(TestPlayer {
            nickname: nickname.to_string(),
            tx,
            rx,
        })
    }

    pub async fn create_game_without_players(vs_computer: bool) -> TestGame {
        TestApp::spawn_app().await.create_game(vs_computer).await
    }

    pub async fn create_game(self, vs_computer: bool) -> TestGame {
        let response = reqwest::Client::new()
            .post(format!("http://{}/game", self.base_address))
            .json(&CreateGameRequest { vs_computer })
            .send()
            .await
            .expect("Failed to execute CreateGame request.");
        assert!(response.status().is_success());

        let game_created_response: GameCreatedResponse = response
            .json()
            .await
            .expect("Failed to parse GameCreatedResponse.");
        assert_eq!(game_created_response.id.len(), 5);

        TestGame {
            app: self,
            id: game_created_response.id,
            players: vec![],
        }
    }

    pub async fn create_game_with_characters() -> TestGame {
        TestApp::spawn_app().await.into_game_with_characters().await
    }

    /// `p1` plays X and `p2` plays O. Every event is read so the players start with empty channels.
    pub async fn into_game_with_characters(self) -> TestGame {
        let mut game = self.create_game(false).await;

        game.add_player("p1").await.unwrap();
        game.add_player("p2").await.unwrap();

        assert_eq!(
            game.players[0].select_character(SquareCharacter::X).await,
            Ok(GameResponse::CharacterSelected(SquareCharacter::X))
        );
        let players = GameResponse::players(Some("p1".to_string()), None);
        assert_eq!(game.players[0].receive().await, Ok(players.clone()));
        assert_eq!(game.players[1].receive().await, Ok(players));

        assert_eq!(
            game.players[1].select_character(SquareCharacter::O).await,
            Ok(GameResponse::CharacterSelected(SquareCharacter::O))
        );
        let players = GameResponse::players(Some("p1".to_string()), Some("p2".to_string()));
        assert_eq!(game.players[1].receive().await, Ok(players.clone()));
        assert_eq!(game.players[0].receive().await, Ok(players));

        game
    }

    pub async fn create_started_game() -> TestGame {
        let mut game = TestApp::create_game_with_characters().await;

        game.players[0].start_game().await;
        for player in game.players.iter_mut() {
            player.assert_game_started().await;
        }

        game
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateGameRequest {
    vs_computer: bool,
}

#[derive(Deserialize)]
struct GameCreatedResponse {
    id: String,
}
