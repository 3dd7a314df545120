//! Snapshot system: builds the per-frame `FrameSnapshot` handed to the
//! render layer.
//!
//! Read-only with respect to the registry and scene.

use gallery_core::enums::SessionPhase;
use gallery_core::events::{SceneEvent, TargetEvent};
use gallery_core::state::*;
use gallery_core::types::FrameTime;

use crate::registry::TargetRegistry;
use crate::scene::SceneGraph;

/// Inputs that are not part of the registry or scene.
pub struct SnapshotContext {
    pub time: FrameTime,
    pub phase: SessionPhase,
    pub counters: LifecycleCounters,
    pub gaze_enabled: bool,
    pub controller_connected: bool,
}

/// Build a complete snapshot from the current state and the frame's events.
pub fn build_snapshot(
    registry: &TargetRegistry,
    scene: &SceneGraph,
    context: SnapshotContext,
    scene_events: Vec<SceneEvent>,
    target_events: Vec<TargetEvent>,
) -> FrameSnapshot {
    FrameSnapshot {
        time: context.time,
        phase: context.phase,
        targets: build_targets(registry),
        scene_events,
        target_events,
        counters: context.counters,
        resources_in_use: scene.pool().in_use(),
        gaze_enabled: context.gaze_enabled,
        controller_connected: context.controller_connected,
    }
}

fn build_targets(registry: &TargetRegistry) -> Vec<TargetView> {
    registry
        .iter()
        .filter_map(|target| {
            let handle = target.handle()?;
            Some(TargetView {
                id: target.id(),
                kind: target.kind(),
                handle: handle.to_bits(),
                position: target.position(),
                direction: target.direction(),
            })
        })
        .collect()
}
