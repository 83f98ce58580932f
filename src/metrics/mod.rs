use lazy_static::lazy_static;
use prometheus::{IntCounter, IntGauge, Registry};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();
    pub static ref ACTIVE_GAMES: IntGauge =
        IntGauge::new("tictacgo_active_games", "Games with a running actor")
            .expect("metric cannot be created");
    pub static ref CONNECTED_PLAYERS: IntGauge =
        IntGauge::new("tictacgo_connected_players", "Players with an open websocket")
            .expect("metric cannot be created");
    pub static ref FINISHED_GAMES: IntCounter =
        IntCounter::new("tictacgo_finished_games", "Games that ended with a win or a draw")
            .expect("metric cannot be created");
}

/// Safe to call more than once, a collector that is already registered is only logged.
pub fn register_metrics() {
    let collectors: [Box<dyn prometheus::core::Collector>; 3] = [
        Box::new(ACTIVE_GAMES.clone()),
        Box::new(CONNECTED_PLAYERS.clone()),
        Box::new(FINISHED_GAMES.clone()),
    ];

    for collector in collectors {
        if let Err(error) = REGISTRY.register(collector) {
            log::warn!("Collector cannot be registered. Error: '{error}'.");
        }
    }
}
