//! Turn-based tile placement word game engine and the backend that hosts it.
//!
//! The engine (`game`, `models`, `dictionary`, `utils`) is synchronous and
//! knows nothing about transport. `websocket` and `routes` adapt it to the hub.

pub mod config;
pub mod dictionary;
pub mod error;
pub mod game;
pub mod models;
pub mod routes;
pub mod utils;
pub mod websocket;

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::mpsc;

use config::Config;
use game::SessionRegistry;
use models::PlayerId;
use websocket::messages::ServerMessage;

/// Application state shared across all handlers
pub struct AppState {
    pub config: Config,
    pub registry: SessionRegistry,
    /// Outbound channel of every connected player, keyed by player id
    pub connections: DashMap<PlayerId, mpsc::Sender<ServerMessage>>,
}

impl AppState {
    pub fn new(config: Config, registry: SessionRegistry) -> Arc<Self> {
        Arc::new(Self {
            config,
            registry,
            connections: DashMap::new(),
        })
    }
}
