//! Events emitted by the engine for the host scene and for diagnostics.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::TargetId;

/// Scene-graph notifications: the only events the host scene consumes.
/// `handle` is the stable bit pattern of the visual's node id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SceneEvent {
    /// A visual subtree was added under the scene root.
    Attached { handle: u64 },
    /// A visual subtree was removed from the scene root.
    Detached { handle: u64 },
}

/// Target lifecycle events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TargetEvent {
    /// A target entered the scene at an edge.
    Spawned {
        id: TargetId,
        kind: TargetKind,
        x: f64,
        direction: f64,
    },
    /// A target left the registry.
    Removed { id: TargetId, cause: RemovalCause },
    /// A spawn was due but could not be performed this frame.
    SpawnSkipped { reason: String },
}
