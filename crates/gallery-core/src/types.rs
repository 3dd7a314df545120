//! Fundamental geometric and frame-timing types.

use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

use crate::constants::FORWARD;

/// Stable number assigned to a target when it spawns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TargetId(pub u32);

/// Index into the fixed-capacity resource pool (geometry or material).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotId(pub u32);

/// World-space pose of a tracked device or of the viewer's head.
/// Right-handed, y = Up, the viewer looks down -Z at identity orientation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: DVec3,
    pub orientation: DQuat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    /// Origin, looking down -Z.
    pub const IDENTITY: Self = Self {
        position: DVec3::ZERO,
        orientation: DQuat::IDENTITY,
    };

    pub fn new(position: DVec3, orientation: DQuat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Pose at `position` whose forward axis points at `target`.
    pub fn looking_at(position: DVec3, target: DVec3) -> Self {
        let dir = (target - position).normalize_or_zero();
        let orientation = if dir == DVec3::ZERO {
            DQuat::IDENTITY
        } else {
            DQuat::from_rotation_arc(FORWARD, dir)
        };
        Self {
            position,
            orientation,
        }
    }

    /// The fixed forward vector transformed by this pose's orientation.
    pub fn forward(&self) -> DVec3 {
        self.orientation * FORWARD
    }
}

/// A ray used for hit testing. The direction is always normalized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    /// Creates a ray; `direction` is normalized here.
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Ray from a device pose along its forward axis.
    pub fn from_pose(pose: &Pose) -> Self {
        Self::new(pose.position, pose.forward())
    }

    /// Point along the ray at distance `t`.
    pub fn point_at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }
}

/// Frame counter plus the host timestamp the frame was driven with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameTime {
    /// Number of frames processed so far.
    pub frame: u64,
    /// Monotonic host timestamp in milliseconds.
    pub now_ms: f64,
}

impl FrameTime {
    /// Advance to the next frame at `now_ms`.
    pub fn advance(&mut self, now_ms: f64) {
        self.frame += 1;
        self.now_ms = now_ms;
    }
}
