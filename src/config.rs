//! Game tunables.
//!
//! Defaults reproduce the classic 480×640 field. A JSON file can override
//! any subset of fields; missing fields fall back to the defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV: &str = "SKY_SHOOTER_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Field ────────────────────────────────────────────────────────────────
    pub screen_width: f32,
    pub screen_height: f32,

    // ── Player ───────────────────────────────────────────────────────────────
    pub player_width: f32,
    pub player_height: f32,
    /// Distance from the bottom edge to the player's top edge.
    pub player_bottom_offset: f32,
    /// Horizontal pixels per frame while a direction key is held.
    pub player_speed: f32,

    // ── Bullets ──────────────────────────────────────────────────────────────
    pub bullet_width: f32,
    pub bullet_height: f32,
    pub bullet_speed: f32,

    // ── Enemies ──────────────────────────────────────────────────────────────
    pub enemy_size: f32,
    pub enemy_speed: f32,
    /// Frames between spawns.
    pub spawn_period: u64,

    // ── Scoring / pacing ─────────────────────────────────────────────────────
    pub score_per_hit: u32,
    /// Target frame duration for the terminal scheduler (≈60 FPS).
    pub frame_millis: u64,
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 480.0,
            screen_height: 640.0,

            player_width: 50.0,
            player_height: 50.0,
            player_bottom_offset: 60.0,
            player_speed: 5.0,

            bullet_width: 5.0,
            bullet_height: 10.0,
            bullet_speed: 7.0,

            enemy_size: 30.0,
            enemy_speed: 2.0,
            spawn_period: 100,

            score_per_hit: 10,
            frame_millis: 16,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Read and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self, GameError> {
        let json = std::fs::read_to_string(path).map_err(|source| GameError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: GameConfig =
            serde_json::from_str(&json).map_err(|source| GameError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load from `$SKY_SHOOTER_CONFIG` if set, otherwise use defaults.
    pub fn from_env() -> Result<Self, GameError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path)),
            None => {
                log::info!("Using default config");
                Ok(Self::default())
            }
        }
    }

    /// Reject geometry the simulation cannot keep its invariants on.
    pub fn validate(&self) -> Result<(), GameError> {
        let positive = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("player_speed", self.player_speed),
            ("bullet_width", self.bullet_width),
            ("bullet_height", self.bullet_height),
            ("bullet_speed", self.bullet_speed),
            ("enemy_size", self.enemy_size),
            ("enemy_speed", self.enemy_speed),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(GameError::InvalidConfig(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        if self.player_width > self.screen_width {
            return Err(GameError::InvalidConfig(format!(
                "player_width {} exceeds screen_width {}",
                self.player_width, self.screen_width
            )));
        }
        if self.enemy_size > self.screen_width {
            return Err(GameError::InvalidConfig(format!(
                "enemy_size {} exceeds screen_width {}",
                self.enemy_size, self.screen_width
            )));
        }
        if self.spawn_period == 0 {
            return Err(GameError::InvalidConfig("spawn_period must be at least 1".into()));
        }
        Ok(())
    }

    /// Left edge that horizontally centres the player.
    pub fn player_center_x(&self) -> f32 {
        self.screen_width / 2.0 - self.player_width / 2.0
    }

    pub fn player_y(&self) -> f32 {
        self.screen_height - self.player_bottom_offset
    }
}
