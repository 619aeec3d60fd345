//! Tunable game constants and RON loading.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::entities::{
    ARROW_WIDTH, BOSS_HEIGHT, BOSS_WIDTH, CUPID_HEIGHT, CUPID_WIDTH, HUMAN_WIDTH,
};

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "cupid.ron";

/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
pub const CONFIG_ENV_VAR: &str = "CUPID_CONFIG";

/// Errors that can occur when loading the game config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read.
    #[error("Failed to read config '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },

    /// A value makes the game unplayable.
    #[error("Invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Every tunable number of a round. Durations are in seconds, intervals
/// suffixed `_interval` without `_secs` are in ticks.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Play field size in cells (the status bar is drawn outside it)
    pub field_width: u16,
    pub field_height: u16,

    pub round_secs: u32,

    // Spawning
    pub initial_humans: usize,
    pub wave_size: usize,
    pub wave_interval_secs: u32,
    pub boss_at_secs: u32,
    pub lackey_count: usize,
    pub lackey_interval_secs: u32,
    pub power_up_interval_secs: u32,
    pub power_up_idle_secs: u32,

    // Effect windows
    pub wings_secs: u32,
    pub dolphin_secs: u32,
    pub autopilot_secs: u32,
    pub snowflake_secs: u32,

    // Movement
    pub cupid_move_interval: u32,
    pub fast_move_interval: u32,
    pub autopilot_fire_interval: u32,
    pub arrow_speed: u16,
    pub bounce_distance: u16,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: 96,
            field_height: 26,
            round_secs: 60,
            initial_humans: 7,
            wave_size: 3,
            wave_interval_secs: 5,
            boss_at_secs: 30,
            lackey_count: 3,
            lackey_interval_secs: 5,
            power_up_interval_secs: 10,
            power_up_idle_secs: 5,
            wings_secs: 5,
            dolphin_secs: 8,
            autopilot_secs: 3,
            snowflake_secs: 3,
            cupid_move_interval: 2,
            fast_move_interval: 1,
            autopilot_fire_interval: 4,
            arrow_speed: 2,
            bounce_distance: 6,
        }
    }
}

impl GameConfig {
    /// Parse a config from RON text and validate it.
    pub fn from_ron(contents: &str, path: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(contents).map_err(|e| ConfigError::ParseError {
            path: path.to_string(),
            details: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: display.clone(),
            details: e.to_string(),
        })?;
        Self::from_ron(&contents, &display)
    }

    /// Load from `$CUPID_CONFIG` or `cupid.ron`, falling back to defaults.
    pub fn load() -> Self {
        let path = std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                log::info!("Loaded game config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("{e}. Using defaults.");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.field_width < BOSS_WIDTH * 4 {
            return Err(invalid(
                "field_width",
                format!("must be at least {}", BOSS_WIDTH * 4),
            ));
        }
        if self.field_height < BOSS_HEIGHT.max(CUPID_HEIGHT) * 2 {
            return Err(invalid(
                "field_height",
                format!("must be at least {}", BOSS_HEIGHT.max(CUPID_HEIGHT) * 2),
            ));
        }
        if self.field_width <= CUPID_WIDTH + ARROW_WIDTH {
            return Err(invalid("field_width", "no room to shoot".to_string()));
        }
        if self.round_secs == 0 {
            return Err(invalid("round_secs", "must be positive".to_string()));
        }

        let intervals = [
            ("wave_interval_secs", self.wave_interval_secs),
            ("boss_at_secs", self.boss_at_secs),
            ("lackey_interval_secs", self.lackey_interval_secs),
            ("power_up_interval_secs", self.power_up_interval_secs),
            ("cupid_move_interval", self.cupid_move_interval),
            ("fast_move_interval", self.fast_move_interval),
            ("autopilot_fire_interval", self.autopilot_fire_interval),
        ];
        for (field, value) in intervals {
            if value == 0 {
                return Err(invalid(field, "must be positive".to_string()));
            }
        }

        if self.arrow_speed == 0 {
            return Err(invalid("arrow_speed", "must be positive".to_string()));
        }
        // Faster arrows could skip over a human between two ticks
        if self.arrow_speed > HUMAN_WIDTH {
            return Err(invalid(
                "arrow_speed",
                format!("must be at most {HUMAN_WIDTH}"),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}
