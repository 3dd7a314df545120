//! Scene configuration.
//!
//! Every field defaults to the matching constant, so a config file only
//! needs to name what it overrides:
//!
//! ```toml
//! target_kind = "Duck"
//! spawn_interval_ms = 3000.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::TargetKind;
use crate::error::ConfigError;

/// Tuning values fixed for the lifetime of an engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub spawn_interval_ms: f64,
    pub speed: f64,
    pub bounds_limit: f64,
    pub spawn_edge_distance: f64,
    pub spawn_height: f64,
    pub spawn_depth: f64,
    pub target_kind: TargetKind,
    /// Cast the gaze ray every frame.
    pub gaze_enabled: bool,
    /// Geometry/material pool capacity.
    pub pool_capacity: usize,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            speed: TARGET_SPEED,
            bounds_limit: BOUNDS_LIMIT,
            spawn_edge_distance: SPAWN_EDGE_DISTANCE,
            spawn_height: SPAWN_HEIGHT,
            spawn_depth: SPAWN_DEPTH,
            target_kind: TargetKind::default(),
            gaze_enabled: true,
            pool_capacity: RESOURCE_POOL_CAPACITY,
        }
    }
}

impl SceneConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Check that the values describe a playable scene.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.spawn_interval_ms > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "spawn_interval_ms must be positive, got {}",
                self.spawn_interval_ms
            )));
        }
        if !(self.speed > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "speed must be positive, got {}",
                self.speed
            )));
        }
        if !(self.bounds_limit > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "bounds_limit must be positive, got {}",
                self.bounds_limit
            )));
        }
        if !(self.spawn_edge_distance >= 0.0 && self.spawn_edge_distance < self.bounds_limit) {
            return Err(ConfigError::Invalid(format!(
                "spawn_edge_distance must lie in [0, bounds_limit), got {}",
                self.spawn_edge_distance
            )));
        }
        if self.pool_capacity < 2 {
            return Err(ConfigError::Invalid(
                "pool_capacity must hold at least one mesh (2 slots)".into(),
            ));
        }
        Ok(())
    }
}
