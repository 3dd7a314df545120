//! Enumeration types used throughout the scene.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Which visual a spawned target uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetKind {
    /// Single coloured box mesh. Needs no external asset.
    #[default]
    Cube,
    /// Composite group built from the duck model.
    Duck,
    /// Textured quad.
    Plane,
}

/// Host-loaded assets some target kinds depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetKind {
    DuckModel,
    PlaneTexture,
}

impl TargetKind {
    /// Asset that must be loaded before this kind can spawn.
    pub fn required_asset(self) -> Option<AssetKind> {
        match self {
            TargetKind::Cube => None,
            TargetKind::Duck => Some(AssetKind::DuckModel),
            TargetKind::Plane => Some(AssetKind::PlaneTexture),
        }
    }
}

/// Scene-graph node kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisualKind {
    /// Renderable node owning geometry + material.
    Mesh,
    /// Transform-only node grouping child meshes.
    Group,
}

/// Geometry of a mesh node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Box { half_extents: DVec3 },
    Plane { half_width: f64, half_height: f64 },
}

/// Origin of a hit-test ray.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RaySource {
    /// Viewer's fixed forward axis, cast every frame.
    Gaze,
    /// Tracked controller pose, cast when its trigger starts.
    Controller,
}

/// Session state driven by input commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Nothing spawns until the session starts.
    #[default]
    Idle,
    Active,
    Paused,
}

/// Why a target left the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemovalCause {
    OutOfBounds,
    Hit(RaySource),
}
