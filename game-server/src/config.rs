use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use game_core::{DEFAULT_MAX_TEAMS, MIN_TEAMS};

pub const DEFAULT_STATE_FILE: &str = "./bluff-state.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Snapshot location; `None` keeps the game in memory only
    pub state_file: Option<PathBuf>,
    /// Word list to play from; `None` uses the built-in catalog
    pub words_file: Option<PathBuf>,
    pub max_teams: usize,
    /// Fixed seed for word draws and answer shuffles
    pub shuffle_seed: Option<u64>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let max_teams = parse_var("MAX_TEAMS", DEFAULT_MAX_TEAMS)?;
        anyhow::ensure!(
            max_teams >= MIN_TEAMS,
            "MAX_TEAMS must be at least {}, got {}",
            MIN_TEAMS,
            max_teams
        );

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT", 8080)?,
            state_file: Some(
                env::var("STATE_FILE")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from(DEFAULT_STATE_FILE)),
            )
            .filter(|path| !path.as_os_str().is_empty()),
            words_file: env::var("WORDS_FILE").ok().map(PathBuf::from),
            max_teams,
            shuffle_seed: optional_var("SHUFFLE_SEED")?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            state_file: Some(PathBuf::from(DEFAULT_STATE_FILE)),
            words_file: None,
            max_teams: DEFAULT_MAX_TEAMS,
            shuffle_seed: None,
        }
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    Ok(optional_var(name)?.unwrap_or(default))
}

fn optional_var<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("Invalid {}: {:?}", name, raw)),
        Err(_) => Ok(None),
    }
}
