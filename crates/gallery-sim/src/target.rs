//! A live target: an owned visual plus straight-line motion along X.

use glam::DVec3;

use gallery_core::enums::TargetKind;
use gallery_core::types::TargetId;

use crate::scene::{SceneGraph, VisualHandle};

/// Where and which way a new target starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPoint {
    pub position: DVec3,
    /// +1 or -1 along X, toward the opposite edge.
    pub direction: f64,
}

#[derive(Debug)]
pub struct Target {
    id: TargetId,
    kind: TargetKind,
    handle: Option<VisualHandle>,
    origin: DVec3,
    position: DVec3,
    direction: f64,
    speed: f64,
    steps: u32,
}

impl Target {
    /// Wrap a visual that is already attached at `point.position`.
    pub fn new(
        id: TargetId,
        kind: TargetKind,
        handle: VisualHandle,
        point: SpawnPoint,
        speed: f64,
    ) -> Self {
        Self {
            id,
            kind,
            handle: Some(handle),
            origin: point.position,
            position: point.position,
            direction: point.direction,
            speed,
            steps: 0,
        }
    }

    /// Advance one frame step. Returns false once the target has left
    /// `|x| <= bounds_limit`, in which case it has been disposed.
    pub fn update(&mut self, scene: &mut SceneGraph, bounds_limit: f64) -> bool {
        let Some(handle) = self.handle else {
            return false;
        };

        // Derived from the step count so that N steps land exactly on
        // origin + N * speed instead of accumulating rounding error.
        self.steps += 1;
        self.position.x = self.origin.x + f64::from(self.steps) * self.speed * self.direction;

        if self.position.x.abs() > bounds_limit {
            self.dispose(scene);
            return false;
        }

        if let Err(err) = scene.set_translation(handle, self.position) {
            log::warn!("target {:?} lost its visual: {err}", self.id);
            self.dispose(scene);
            return false;
        }
        true
    }

    /// Release the visual. Safe to call more than once.
    pub fn dispose(&mut self, scene: &mut SceneGraph) {
        if let Some(handle) = self.handle.take() {
            if let Err(err) = scene.destroy(handle) {
                log::warn!("disposing target {:?}: {err}", self.id);
            }
            log::debug!("target {:?} disposed at x={:.2}", self.id, self.position.x);
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.handle.is_none()
    }

    pub fn id(&self) -> TargetId {
        self.id
    }

    pub fn kind(&self) -> TargetKind {
        self.kind
    }

    pub fn handle(&self) -> Option<VisualHandle> {
        self.handle
    }

    pub fn position(&self) -> DVec3 {
        self.position
    }

    pub fn direction(&self) -> f64 {
        self.direction
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }
}
