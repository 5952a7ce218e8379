// src/config.rs
use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::errors::DuelError;

pub const CONFIG_ENV_VAR: &str = "DATA_DUEL_CONFIG";
pub const HEADLESS_ENV_VAR: &str = "DATA_DUEL_HEADLESS";

/// Tunables for a game session. Every field has a default matching the
/// classic 800×400 arena, so a config file only needs the fields it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub canvas_width: f32,
    pub canvas_height: f32,

    pub player_size: f32,
    /// Pixels per frame, not per second.
    pub player_speed: f32,
    /// Horizontal distance of each player's start position from its edge.
    pub start_margin: f32,

    pub point_radius: f32,
    /// Keeps spawned point centres this far from every edge.
    pub spawn_margin: f32,
    pub spawn_interval: u64,

    pub grid_spacing: f32,

    /// Fixed RNG seed for point placement; entropy-seeded when absent.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800.0,
            canvas_height: 400.0,
            player_size: 30.0,
            player_speed: 5.0,
            start_margin: 50.0,
            point_radius: 10.0,
            spawn_margin: 20.0,
            spawn_interval: 60,
            grid_spacing: 40.0,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn load(path: &Path) -> Result<Self, DuelError> {
        log::info!("Loading config from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self, DuelError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Resolves the config from the first CLI argument, then the
    /// `DATA_DUEL_CONFIG` variable, falling back to the defaults.
    pub fn from_env() -> Result<Self, DuelError> {
        let path = std::env::args()
            .nth(1)
            .or_else(|| std::env::var(CONFIG_ENV_VAR).ok());

        match path {
            Some(path) => Self::load(Path::new(&path)),
            None => {
                log::info!("No config given, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<(), DuelError> {
        let lengths = [
            self.canvas_width,
            self.canvas_height,
            self.player_size,
            self.player_speed,
            self.start_margin,
            self.point_radius,
            self.spawn_margin,
            self.grid_spacing,
        ];
        if lengths.iter().any(|value| !value.is_finite()) {
            return Err(DuelError::ConfigError(
                "sizes, margins and speed must be finite numbers".to_string(),
            ));
        }
        if self.canvas_width <= 0.0 || self.canvas_height <= 0.0 {
            return Err(DuelError::ConfigError(format!(
                "canvas must have a positive size, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        if self.player_size <= 0.0 || self.point_radius <= 0.0 {
            return Err(DuelError::ConfigError(
                "player_size and point_radius must be positive".to_string(),
            ));
        }
        if self.player_speed < 0.0 {
            return Err(DuelError::ConfigError(
                "player_speed cannot be negative".to_string(),
            ));
        }
        if self.spawn_interval == 0 {
            return Err(DuelError::ConfigError(
                "spawn_interval must be non-zero".to_string(),
            ));
        }
        if self.grid_spacing <= 0.0 {
            return Err(DuelError::ConfigError(
                "grid_spacing must be positive".to_string(),
            ));
        }
        if 2.0 * self.start_margin + 2.0 * self.player_size > self.canvas_width
            || self.player_size > self.canvas_height
        {
            return Err(DuelError::ConfigError(
                "players do not fit on the canvas".to_string(),
            ));
        }
        if 2.0 * self.spawn_margin >= self.canvas_width
            || 2.0 * self.spawn_margin >= self.canvas_height
        {
            return Err(DuelError::ConfigError(
                "spawn_margin leaves no room for points".to_string(),
            ));
        }
        Ok(())
    }
}

/// Number of frames to simulate without a window, if requested.
pub fn headless_frames() -> Option<u64> {
    std::env::var(HEADLESS_ENV_VAR).ok()?.parse().ok()
}
