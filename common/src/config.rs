use std::{env, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{maze::Speed, timer::DEFAULT_COUNTDOWN_SECS};

pub const DEFAULT_ROWS: usize = 24;
pub const DEFAULT_COLS: usize = 24;
pub const MAX_DIMENSION: usize = 512;

pub const ROWS_VAR: &str = "MAZE_ROWS";
pub const COLS_VAR: &str = "MAZE_COLS";
pub const SPEED_VAR: &str = "MAZE_SPEED";
pub const COUNTDOWN_VAR: &str = "MAZE_COUNTDOWN";
pub const SEED_VAR: &str = "MAZE_SEED";

/// Everything a game needs to know up front. Passed explicitly into the
/// engine rather than read from globals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rows: usize,
    pub cols: usize,
    pub speed: Speed,
    pub countdown_secs: u32,
    pub seed: Option<u64>, // Fixed seed for reproducible mazes.
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            speed: Speed::default(),
            countdown_secs: DEFAULT_COUNTDOWN_SECS,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidNumber { key: &'static str, value: String },
    InvalidSpeed(String),
    ZeroDimension(&'static str),
    TooLarge(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidNumber { key, value } => {
                write!(f, "{key} must be a whole number, got '{value}'")
            }
            ConfigError::InvalidSpeed(value) => write!(
                f,
                "{SPEED_VAR} must be one of slow, medium, fast or instantaneous, got '{value}'"
            ),
            ConfigError::ZeroDimension(key) => write!(f, "{key} must be at least 1"),
            ConfigError::TooLarge(key) => write!(f, "{key} must be at most {MAX_DIMENSION}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Reads the configuration from the environment, after loading a `.env`
    /// file if there is one. Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(value) = lookup(ROWS_VAR) {
            config.rows = parse_number(ROWS_VAR, &value)?;
        }
        if let Some(value) = lookup(COLS_VAR) {
            config.cols = parse_number(COLS_VAR, &value)?;
        }
        if let Some(value) = lookup(SPEED_VAR) {
            config.speed = Speed::from_str(value.trim())
                .map_err(|_| ConfigError::InvalidSpeed(value.clone()))?;
        }
        if let Some(value) = lookup(COUNTDOWN_VAR) {
            config.countdown_secs = parse_number(COUNTDOWN_VAR, &value)?;
        }
        if let Some(value) = lookup(SEED_VAR) {
            config.seed = Some(parse_number(SEED_VAR, &value)?);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [(ROWS_VAR, self.rows), (COLS_VAR, self.cols)] {
            if value == 0 {
                return Err(ConfigError::ZeroDimension(key));
            }
            if value > MAX_DIMENSION {
                return Err(ConfigError::TooLarge(key));
            }
        }
        Ok(())
    }
}

fn parse_number<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber {
            key,
            value: value.to_string(),
        })
}
