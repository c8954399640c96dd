use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::DISPLAY_FACTOR;
use crate::board::BoardOptions;
use crate::bubbles::PlayerId;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Game settings, read from a JSON file. Every field is optional.
///
/// ```json
/// { "board": { "rows": 4, "cols": 4, "bubble_size": 30.0 }, "player": "blue", "seed": 7 }
/// ```
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board: BoardOptions,
    /// Who clicks on this machine
    pub player: PlayerId,
    /// Fixed seed for particle jitter and flicker, random when absent
    pub seed: Option<u64>,
    /// Window pixels per surface pixel
    pub display_factor: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board: BoardOptions::default(),
            player: PlayerId::default(),
            seed: None,
            display_factor: DISPLAY_FACTOR,
        }
    }
}

impl GameConfig {
    /// Parse a config from JSON text.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] if the text is not a valid config.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(text)?;
        config.display_factor = config.display_factor.max(1);
        Ok(config)
    }

    /// Read the config at `path`, `Ok(None)` if there is no such file.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if the file exists but cannot be read or parsed.
    pub fn read(path: &Path) -> Result<Option<Self>, ConfigError> {
        match fs::read_to_string(path) {
            Ok(text) => Self::from_json(&text).map(Some),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Load the config at `path`, falling back to defaults when it is missing or broken.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::read(path) {
            Ok(Some(config)) => {
                info!("Loaded config from {:?}", path);
                config
            }
            Ok(None) => {
                info!("No config file at {:?}, using defaults", path);
                Self::default()
            }
            Err(e) => {
                warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Random source for the particle effects
    pub fn rng(&self) -> StdRng {
        self.seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64)
    }
}
