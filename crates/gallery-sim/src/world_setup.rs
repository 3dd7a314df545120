//! Target factories.
//!
//! Builds the visual for a target kind, attaches it at the spawn point and
//! wraps it in a `Target`. Nothing is left in the scene when this fails.

use glam::DVec3;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use gallery_core::components::Material;
use gallery_core::config::SceneConfig;
use gallery_core::constants::*;
use gallery_core::enums::{Shape, TargetKind};
use gallery_core::error::SpawnError;
use gallery_core::types::TargetId;

use crate::assets::AssetLibrary;
use crate::scene::{SceneGraph, VisualSpec};
use crate::target::{SpawnPoint, Target};

/// Create, attach and wrap a target of `config.target_kind` at `point`.
pub fn spawn_target(
    scene: &mut SceneGraph,
    assets: &AssetLibrary,
    rng: &mut ChaCha8Rng,
    config: &SceneConfig,
    id: TargetId,
    point: SpawnPoint,
) -> Result<Target, SpawnError> {
    let kind = config.target_kind;
    if let Some(asset) = kind.required_asset() {
        assets.require(asset)?;
    }
    let spec = visual_spec(kind, assets, rng, point.direction)?;
    let handle = scene.create_visual(&spec, point.position)?;
    if let Err(err) = scene.attach(handle) {
        let _ = scene.destroy(handle);
        return Err(err.into());
    }
    Ok(Target::new(id, kind, handle, point, config.speed))
}

/// Visual description for a target kind. Cubes get a random hue.
pub fn visual_spec(
    kind: TargetKind,
    assets: &AssetLibrary,
    rng: &mut ChaCha8Rng,
    direction: f64,
) -> Result<VisualSpec, SpawnError> {
    match kind {
        TargetKind::Cube => Ok(VisualSpec::Mesh {
            shape: Shape::Box {
                half_extents: DVec3::splat(CUBE_SIZE * 0.5),
            },
            material: cube_material(rng.gen_range(0.0..1.0)),
        }),
        TargetKind::Duck => {
            // The model faces +X; mirror it so it faces its travel direction.
            let mut parts = assets.duck_parts()?;
            for part in &mut parts {
                part.offset.x *= direction.signum();
            }
            Ok(VisualSpec::Group { parts })
        }
        TargetKind::Plane => {
            let (shape, material) = assets.plane()?;
            Ok(VisualSpec::Mesh { shape, material })
        }
    }
}

fn cube_material(hue: f32) -> Material {
    Material {
        metalness: CUBE_METALNESS,
        roughness: CUBE_ROUGHNESS,
        ..Material::from_hsl(hue, CUBE_SATURATION, CUBE_LIGHTNESS)
    }
}
