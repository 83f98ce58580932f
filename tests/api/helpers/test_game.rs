use tictacgo::websocket::message::GameResponse;

use super::{test_app::TestApp, test_player::TestPlayer};

pub struct TestGame {
    pub app: TestApp,
    pub id: String,
    pub players: Vec<TestPlayer>,
}

impl TestGame {
    /// Opens a websocket for the player and returns the welcome message.
    pub async fn add_player(&mut self, nickname: &str) -> Result<GameResponse, String> {
        let mut player = self.connect(nickname).await?;

        let welcome = player.receive().await?;
        assert!(matches!(welcome, GameResponse::Welcome { .. }));
        self.players.push(player);

        Ok(welcome)
    }

    pub async fn connect(&self, nickname: &str) -> Result<TestPlayer, String> {
        self.app.connect_player(&self.id, nickname).await
    }
}
