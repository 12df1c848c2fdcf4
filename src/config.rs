use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::grid::Grid;

pub const CONFIG_FILE: &str = "snake_vibes.json";
pub const SCORES_FILE: &str = "highscores.json";

/// Tunables for a session. Every field has a default, so a config file only
/// needs to name what it changes.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid_width: i32,
    pub grid_height: i32,
    pub start_length: usize,
    /// Ticks per second at the start of a round.
    pub move_hz_start: f32,
    pub move_hz_max: f32,
    /// Added to the move rate per food eaten.
    pub move_hz_step: f32,
    pub score_per_food: u32,
    pub keep_max: usize,
    pub high_scores_shown: usize,
    pub spawn_attempts: u32,
    /// Longest frame, in seconds, the frame loop hands to the simulation.
    pub max_frame_dt: f32,
    pub scores_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 32,
            grid_height: 24,
            start_length: 2,
            move_hz_start: 8.5,
            move_hz_max: 18.0,
            move_hz_step: 0.25,
            score_per_food: 10,
            keep_max: 50,
            high_scores_shown: 5,
            spawn_attempts: 10_000,
            max_frame_dt: 0.25,
            scores_path: PathBuf::from(SCORES_FILE),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl GameConfig {
    /// Reads `path`, falling back to defaults when the file is missing or
    /// unusable. The result is always normalized.
    pub fn load(path: impl AsRef<Path>) -> GameConfig {
        let path = path.as_ref();
        match read_config(path) {
            Ok(Some(config)) => {
                info!(path = %path.display(), "loaded config");
                config.normalized()
            }
            Ok(None) => GameConfig::default(),
            Err(err) => {
                warn!(error = %err, "using default config");
                GameConfig::default()
            }
        }
    }

    /// Repairs values the simulation cannot run with.
    pub fn normalized(mut self) -> GameConfig {
        self.grid_width = self.grid_width.max(4);
        self.grid_height = self.grid_height.max(4);
        self.start_length = self.start_length.clamp(1, (self.grid_width / 2) as usize);
        if !(self.move_hz_start.is_finite() && self.move_hz_start > 0.0) {
            self.move_hz_start = GameConfig::default().move_hz_start;
        }
        if !(self.move_hz_max.is_finite() && self.move_hz_max >= self.move_hz_start) {
            self.move_hz_max = self.move_hz_start;
        }
        if !(self.move_hz_step.is_finite() && self.move_hz_step >= 0.0) {
            self.move_hz_step = 0.0;
        }
        self.keep_max = self.keep_max.max(1);
        self.spawn_attempts = self.spawn_attempts.max(1);
        if !(self.max_frame_dt.is_finite() && self.max_frame_dt > 0.0) {
            self.max_frame_dt = GameConfig::default().max_frame_dt;
        }
        self
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.grid_width, self.grid_height)
    }
}

fn read_config(path: &Path) -> Result<Option<GameConfig>, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => return Err(ConfigError::Io { path: path.to_path_buf(), source }),
    };
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("snake-vibes-config-{}-{name}.json", std::process::id()))
    }

    #[test]
    fn missing_file_gives_defaults() {
        let path = scratch("missing");
        let _ = fs::remove_file(&path);
        assert_eq!(GameConfig::load(&path), GameConfig::default());
    }

    #[test]
    fn partial_file_overrides_named_fields() {
        let path = scratch("partial");
        fs::write(&path, r#"{ "grid_width": 20, "score_per_food": 5 }"#).unwrap();
        let config = GameConfig::load(&path);
        assert_eq!(config.grid_width, 20);
        assert_eq!(config.score_per_food, 5);
        assert_eq!(config.grid_height, 24);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn malformed_file_gives_defaults() {
        let path = scratch("malformed");
        fs::write(&path, "not json").unwrap();
        assert_eq!(GameConfig::load(&path), GameConfig::default());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn normalized_repairs_impossible_values() {
        let config = GameConfig {
            grid_width: 1,
            grid_height: -3,
            start_length: 40,
            move_hz_start: -2.0,
            move_hz_max: 1.0,
            keep_max: 0,
            spawn_attempts: 0,
            ..GameConfig::default()
        }
        .normalized();
        assert_eq!((config.grid_width, config.grid_height), (4, 4));
        assert_eq!(config.start_length, 2);
        assert_eq!(config.move_hz_start, 8.5);
        assert_eq!(config.move_hz_max, 8.5);
        assert_eq!(config.keep_max, 1);
        assert_eq!(config.spawn_attempts, 1);
    }
}
