//! Hit resolver: casts a ray against the live targets' visuals and
//! reports the nearest one it strikes.

use glam::DVec3;
use hecs::Entity;

use gallery_core::types::Ray;

use crate::scene::{SceneGraph, VisualHandle};

/// Nearest intersection found for a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Root handle of the struck target's visual.
    pub handle: VisualHandle,
    /// The mesh node the ray actually hit (may be a child of `handle`).
    pub object: Entity,
    /// Distance from the ray origin along its direction.
    pub distance: f64,
}

/// Test `ray` against every mesh under each handle and return the nearest
/// hit. On equal distance the handle listed first wins. `live_handles` must
/// be taken after the frame's prune so no stale handle is tested.
pub fn resolve(scene: &SceneGraph, ray: &Ray, live_handles: &[VisualHandle]) -> Option<RayHit> {
    if ray.direction == DVec3::ZERO {
        return None;
    }
    let mut nearest: Option<RayHit> = None;
    for &handle in live_handles {
        for object in scene.descendants(handle) {
            let Some((min, max)) = scene.world_aabb(object) else {
                continue;
            };
            let Some(distance) = intersect_aabb(ray, min, max) else {
                continue;
            };
            if nearest.map_or(true, |best| distance < best.distance) {
                nearest = Some(RayHit {
                    handle,
                    object,
                    distance,
                });
            }
        }
    }
    nearest
}

/// Slab test. Returns the entry distance, or 0 when the origin is inside
/// the box; `None` if the box is missed or lies behind the origin.
pub fn intersect_aabb(ray: &Ray, min: DVec3, max: DVec3) -> Option<f64> {
    const EPSILON: f64 = 1e-12;

    let mut t_near = f64::NEG_INFINITY;
    let mut t_far = f64::INFINITY;

    for axis in 0..3 {
        let origin = ray.origin[axis];
        let dir = ray.direction[axis];
        if dir.abs() < EPSILON {
            // Parallel to this slab: must already be between its planes.
            if origin < min[axis] || origin > max[axis] {
                return None;
            }
            continue;
        }
        let inv = 1.0 / dir;
        let mut t0 = (min[axis] - origin) * inv;
        let mut t1 = (max[axis] - origin) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_near = t_near.max(t0);
        t_far = t_far.min(t1);
        if t_near > t_far {
            return None;
        }
    }

    if t_far < 0.0 {
        return None;
    }
    Some(t_near.max(0.0))
}
