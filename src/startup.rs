use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::game_factory::actor::GameFactoryActor;
use crate::metrics::register_metrics;
use crate::routes::{self, AppState};

pub async fn create_web_server(config: Config, listener: TcpListener) -> Result<(), std::io::Error> {
    register_metrics();

    let state = Arc::new(AppState {
        game_factory: GameFactoryActor::spawn(config.game.clone()),
        player_timeout: config.game.player_timeout(),
    });
    let router = routes::create_router(&config).with_state(state);

    log::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await
}
