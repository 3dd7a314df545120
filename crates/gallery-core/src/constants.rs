//! Scene constants and tuning parameters.
//!
//! These are the defaults behind `SceneConfig`; a config file may override
//! the tunable ones.

use glam::DVec3;

// --- Spawning ---

/// Minimum time between two spawns (milliseconds).
pub const SPAWN_INTERVAL_MS: f64 = 5000.0;

/// Distance from the centre line at which targets appear (both edges).
pub const SPAWN_EDGE_DISTANCE: f64 = 40.0;

/// Height of the spawn line.
pub const SPAWN_HEIGHT: f64 = 5.0;

/// Depth of the spawn line (negative = in front of the viewer).
pub const SPAWN_DEPTH: f64 = -30.0;

// --- Motion ---

/// Distance a target travels per frame step.
pub const TARGET_SPEED: f64 = 0.1;

/// Targets whose |x| exceeds this are out of the play area.
pub const BOUNDS_LIMIT: f64 = 50.0;

// --- Visuals ---

/// Edge length of the cube target.
pub const CUBE_SIZE: f64 = 1.5;

/// Cube material: HSL saturation / lightness, hue is random per cube.
pub const CUBE_SATURATION: f32 = 0.7;
pub const CUBE_LIGHTNESS: f32 = 0.5;
pub const CUBE_METALNESS: f32 = 0.2;
pub const CUBE_ROUGHNESS: f32 = 0.7;

/// Half size of the textured plane target (width, height).
pub const PLANE_HALF_SIZE: (f64, f64) = (1.5, 1.0);

/// Plane colliders are given a thin depth so rays can hit them edge-on-ish.
pub const PLANE_THICKNESS: f64 = 0.01;

/// Fixed forward axis for gaze and controller rays.
pub const FORWARD: DVec3 = DVec3::NEG_Z;

// --- Resources ---

/// Capacity of the geometry/material pool. Each mesh takes two slots.
pub const RESOURCE_POOL_CAPACITY: usize = 256;

// --- Host loop ---

/// Refresh rate the headless host paces its frames to (Hz).
pub const DISPLAY_REFRESH_HZ: u32 = 90;
