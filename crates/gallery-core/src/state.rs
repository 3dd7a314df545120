//! Frame snapshot: the visible scene state handed to the render layer
//! after every frame.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{SceneEvent, TargetEvent};
use crate::types::{FrameTime, TargetId};

/// Everything the host needs after a frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub time: FrameTime,
    pub phase: SessionPhase,
    /// Live targets in spawn order.
    pub targets: Vec<TargetView>,
    pub scene_events: Vec<SceneEvent>,
    pub target_events: Vec<TargetEvent>,
    pub counters: LifecycleCounters,
    /// Occupied geometry/material pool slots.
    pub resources_in_use: usize,
    pub gaze_enabled: bool,
    pub controller_connected: bool,
}

/// A live target as seen by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetView {
    pub id: TargetId,
    pub kind: TargetKind,
    /// Stable bit pattern of the target's visual handle.
    pub handle: u64,
    pub position: DVec3,
    pub direction: f64,
}

/// Running totals since the session started.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleCounters {
    pub spawned: u32,
    pub exited_bounds: u32,
    pub hit_by_gaze: u32,
    pub hit_by_controller: u32,
    pub spawns_skipped: u32,
}

impl LifecycleCounters {
    /// Record a removal.
    pub fn record_removal(&mut self, cause: RemovalCause) {
        match cause {
            RemovalCause::OutOfBounds => self.exited_bounds += 1,
            RemovalCause::Hit(RaySource::Gaze) => self.hit_by_gaze += 1,
            RemovalCause::Hit(RaySource::Controller) => self.hit_by_controller += 1,
        }
    }

    /// Targets currently expected to be alive.
    pub fn live(&self) -> u32 {
        self.spawned
            .saturating_sub(self.exited_bounds)
            .saturating_sub(self.hit_by_gaze)
            .saturating_sub(self.hit_by_controller)
    }
}
