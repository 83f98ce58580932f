pub mod actor;
pub mod actor_client;

use rand::distributions::{Alphanumeric, DistString};
use std::collections::HashMap;

use crate::config::GameSettings;
use crate::error::domain_error::DomainError;
use crate::error::Error;
use crate::game::actor::GameActor;
use crate::game::actor_client::GameClient;
use crate::game::GameOptions;
use crate::game_factory::actor_client::GameFactoryClient;

pub struct GameFactory {
    game_channels: HashMap<String, GameClient>,
    game_settings: GameSettings,
}

impl GameFactory {
    const GAME_ID_LENGTH: usize = 5;

    pub fn new(game_settings: GameSettings) -> Self {
        GameFactory {
            game_channels: HashMap::default(),
            game_settings,
        }
    }

    pub fn create_new_game(
        &mut self,
        options: GameOptions,
        game_factory: GameFactoryClient,
    ) -> String {
        let id = self.create_unique_game_id();
        self.game_channels.insert(
            id.clone(),
            GameActor::spawn(&id, self.game_settings.clone(), options, game_factory),
        );
        log::info!(
            "Game created. GameId: '{id}', VsComputer: '{}'.",
            options.vs_computer
        );

        id
    }

    pub fn remove_game(&mut self, game_id: &str) -> Option<GameClient> {
        self.game_channels.remove(game_id)
    }

    pub fn get_game(&self, game_id: &str) -> Result<&GameClient, Error> {
        self.game_channels
            .get(game_id)
            .ok_or_else(|| DomainError::GameDoesNotExist(game_id.to_string()).into())
    }

    /// Ambiguous characters are replaced so ids can be read out loud.
    fn create_unique_game_id(&self) -> String {
        loop {
            let id = Alphanumeric
                .sample_string(&mut rand::thread_rng(), GameFactory::GAME_ID_LENGTH)
                .replace('O', "P")
                .replace('0', "1")
                .replace('I', "J")
                .replace('l', "m");
            if !self.game_channels.contains_key(&id) {
                return id;
            }
        }
    }
}
