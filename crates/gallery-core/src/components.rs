//! Components for scene-graph nodes stored in hecs, and the resource
//! records they reference.
//!
//! Components are plain data. Hierarchy links (`Parent`, `Children`) live
//! next to the scene graph in `gallery-sim` because they hold hecs entities.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::SlotId;

/// Node kind marker.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Visual {
    pub kind: VisualKind,
}

/// Local translation relative to the parent node (or the scene root).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub translation: DVec3,
}

/// Axis-aligned box used for ray tests, centred on the node's world position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    pub half_extents: DVec3,
}

/// Pool slots a mesh node owns until it is destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSlots {
    pub geometry: SlotId,
    pub material: SlotId,
}

/// Marks a node (subtree root) that is attached to the scene root.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Attached;

/// Surface description of a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Linear RGB, 0..1.
    pub color: [f32; 3],
    pub metalness: f32,
    pub roughness: f32,
    /// Texture the material samples, if any.
    pub texture: Option<AssetKind>,
}

impl Material {
    /// Plain coloured material from HSL components (all in 0..1).
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        Self {
            color: hsl_to_rgb(hue, saturation, lightness),
            metalness: 0.0,
            roughness: 1.0,
            texture: None,
        }
    }
}

/// A record held by one pool slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Resource {
    Geometry(Shape),
    Material(Material),
}

fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> [f32; 3] {
    let h = hue.rem_euclid(1.0);
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);
    if s == 0.0 {
        return [l, l, l];
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    [
        hue_channel(p, q, h + 1.0 / 3.0),
        hue_channel(p, q, h),
        hue_channel(p, q, h - 1.0 / 3.0),
    ]
}

fn hue_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
