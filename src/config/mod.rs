//! Configuration management.
//!
//! GraphQuest reads a small TOML file with two sections: `[game]` for the
//! world file and session parameters, `[logging]` for diagnostics. All
//! values have defaults, so a missing file is only an error when the caller
//! insists on one; values are validated on load.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::engine::{DEFAULT_START_SCENARIO, DEFAULT_START_TIME};

/// Session and world parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// World file to load (`.csv` table or `.json` seed array).
    pub world_file: String,
    /// Scenario id a new session starts in.
    pub start_scenario: String,
    /// Time units a new session starts with.
    pub start_time: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world_file: "data/worlds/demo.csv".to_string(),
            start_scenario: DEFAULT_START_SCENARIO.to_string(),
            start_time: DEFAULT_START_TIME,
        }
    }
}

/// Logging settings; the CLI `-v` flags override the level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// One of error, warn, info, debug, trace.
    pub level: String,
    /// Optional log file path; empty or absent logs to stderr only.
    #[serde(default)]
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load and validate a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| anyhow!("cannot read config {}: {}", path.display(), e))?;
        let config: Config = toml::from_str(&contents)
            .map_err(|e| anyhow!("cannot parse config {}: {}", path.display(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges; called on every load.
    pub fn validate(&self) -> Result<()> {
        if self.game.start_time <= 0 {
            return Err(anyhow!(
                "game.start_time must be positive, got {}",
                self.game.start_time
            ));
        }
        if self.game.start_scenario.trim().is_empty() {
            return Err(anyhow!("game.start_scenario must not be empty"));
        }
        if self.game.world_file.trim().is_empty() {
            return Err(anyhow!("game.world_file must not be empty"));
        }
        Ok(())
    }

    /// Write a commented default configuration to `path`.
    pub fn create_default<P: AsRef<Path>>(path: P) -> Result<()> {
        fs::write(path.as_ref(), DEFAULT_CONFIG_TOML)
            .map_err(|e| anyhow!("cannot write {}: {}", path.as_ref().display(), e))?;
        Ok(())
    }
}

const DEFAULT_CONFIG_TOML: &str = r#"# GraphQuest configuration

[game]
# World file to load: a .csv scenario table or a .json seed array.
world_file = "data/worlds/demo.csv"
# Scenario id a new game starts in.
start_scenario = "1"
# Time units a new game starts with.
start_time = 10

[logging]
# error, warn, info, debug or trace. CLI -v flags override this.
level = "info"
# Uncomment to also append logs to a file.
# file = "graphquest.log"
"#;
