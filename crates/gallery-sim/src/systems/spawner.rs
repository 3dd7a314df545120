//! Spawn gate: decides when a new target should exist.
//!
//! A single timer: the first call always spawns, later calls spawn once
//! more than `interval_ms` has passed since the last successful spawn.
//! A failed spawn leaves the timer untouched so the next frame retries.

use glam::DVec3;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use gallery_core::config::SceneConfig;
use gallery_core::error::SpawnError;

use crate::target::{SpawnPoint, Target};

#[derive(Debug, Clone)]
pub struct Spawner {
    last_spawn_ms: Option<f64>,
    interval_ms: f64,
}

impl Spawner {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            last_spawn_ms: None,
            interval_ms,
        }
    }

    /// Whether a spawn is due at `now_ms`.
    pub fn should_spawn(&self, now_ms: f64) -> bool {
        match self.last_spawn_ms {
            None => true,
            Some(last) => now_ms - last > self.interval_ms,
        }
    }

    /// Run `factory` if a spawn is due. The timer only advances when the
    /// factory succeeds; errors are returned so the caller can report them.
    pub fn maybe_spawn<F>(&mut self, now_ms: f64, factory: F) -> Result<Option<Target>, SpawnError>
    where
        F: FnOnce() -> Result<Target, SpawnError>,
    {
        if !self.should_spawn(now_ms) {
            return Ok(None);
        }
        let target = factory()?;
        self.last_spawn_ms = Some(now_ms);
        Ok(Some(target))
    }

    /// Forget the last spawn; the next call spawns immediately.
    pub fn reset(&mut self) {
        self.last_spawn_ms = None;
    }

    pub fn last_spawn_ms(&self) -> Option<f64> {
        self.last_spawn_ms
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }
}

/// Pick the left or right edge with equal probability; the target heads
/// toward the opposite edge.
pub fn choose_spawn_point(rng: &mut ChaCha8Rng, config: &SceneConfig) -> SpawnPoint {
    let start_x = if rng.gen_bool(0.5) {
        -config.spawn_edge_distance
    } else {
        config.spawn_edge_distance
    };
    let direction = if start_x > 0.0 { -1.0 } else { 1.0 };
    SpawnPoint {
        position: DVec3::new(start_x, config.spawn_height, config.spawn_depth),
        direction,
    }
}
