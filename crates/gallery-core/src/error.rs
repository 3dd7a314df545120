//! Error types shared by the scene and the engine.

use crate::enums::AssetKind;

/// Failures of the scene-graph host operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// Every geometry/material slot is taken.
    #[error("resource pool exhausted (capacity {capacity})")]
    PoolExhausted { capacity: usize },

    /// The handle does not name a live node.
    #[error("unknown visual handle")]
    UnknownHandle,
}

/// Reasons a due spawn did not produce a target.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SpawnError {
    /// The target kind depends on an asset the host has not loaded yet.
    #[error("asset {0:?} is not loaded yet")]
    AssetNotReady(AssetKind),

    /// Creating the visual failed.
    #[error("visual creation failed: {0}")]
    Scene(#[from] SceneError),
}

/// Configuration loading errors.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is outside its valid range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
