use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;

use crate::utils::premium::STANDARD_BOARD_SIZE;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub game: GameConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameConfig {
    pub dictionary_path: String,
    pub max_players: usize,
    pub board_size: usize,
    /// Fixed shuffle seed for reproducible games; OS entropy when unset
    pub shuffle_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            dictionary_path: "./dictionary.txt".to_string(),
            max_players: 4,
            board_size: STANDARD_BOARD_SIZE,
            shuffle_seed: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key/value source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = GameConfig::default();

        let server = ServerConfig {
            host: lookup("HOST")
                .unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("PORT")
                .unwrap_or_else(|| "3000".to_string())
                .parse()
                .context("PORT must be a number")?,
        };

        let board_size: usize = match lookup("BOARD_SIZE") {
            Some(value) => value.parse::<usize>().context("BOARD_SIZE must be a number")?,
            None => defaults.board_size,
        };
        anyhow::ensure!(
            (5..=25).contains(&board_size) && board_size % 2 == 1,
            "BOARD_SIZE must be an odd number between 5 and 25"
        );

        let game = GameConfig {
            dictionary_path: lookup("DICTIONARY_PATH")
                .unwrap_or(defaults.dictionary_path),
            max_players: match lookup("MAX_PLAYERS") {
                Some(value) => value.parse::<usize>().context("MAX_PLAYERS must be a number")?,
                None => defaults.max_players,
            },
            board_size,
            shuffle_seed: lookup("GAME_SHUFFLE_SEED")
                .map(|value| value.parse::<u64>())
                .transpose()
                .context("GAME_SHUFFLE_SEED must be a number")?,
        };

        Ok(Config { server, game })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.server_addr(), "0.0.0.0:3000");
        assert_eq!(config.game.board_size, 15);
        assert_eq!(config.game.max_players, 4);
        assert_eq!(config.game.shuffle_seed, None);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("MAX_PLAYERS", "2"),
            ("GAME_SHUFFLE_SEED", "99"),
            ("DICTIONARY_PATH", "/tmp/words.txt"),
        ])
        .unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.game.max_players, 2);
        assert_eq!(config.game.shuffle_seed, Some(99));
        assert_eq!(config.game.dictionary_path, "/tmp/words.txt");
    }

    #[test]
    fn test_bad_numbers_are_errors() {
        assert!(config_from(&[("PORT", "http")]).is_err());
        assert!(config_from(&[("GAME_SHUFFLE_SEED", "abc")]).is_err());
        assert!(config_from(&[("BOARD_SIZE", "14")]).is_err());
    }
}
