pub mod client;
pub mod config;
pub mod error;
pub mod game;
pub mod game_factory;
pub mod metrics;
pub mod player;
pub mod routes;
pub mod startup;
pub mod websocket;
