//! Readiness of host-loaded assets.
//!
//! Loading and parsing model files is the host's job; it reports
//! completion with `InputCommand::AssetLoaded`. Until then, target kinds
//! that need the asset cannot spawn.

use std::collections::HashSet;

use glam::DVec3;

use gallery_core::components::Material;
use gallery_core::constants::PLANE_HALF_SIZE;
use gallery_core::enums::{AssetKind, Shape};
use gallery_core::error::SpawnError;

use crate::scene::MeshPart;

#[derive(Debug, Default)]
pub struct AssetLibrary {
    loaded: HashSet<AssetKind>,
}

impl AssetLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_loaded(&mut self, asset: AssetKind) {
        if self.loaded.insert(asset) {
            log::info!("asset {asset:?} ready");
        }
    }

    pub fn is_loaded(&self, asset: AssetKind) -> bool {
        self.loaded.contains(&asset)
    }

    /// Fail with `AssetNotReady` unless `asset` is loaded.
    pub fn require(&self, asset: AssetKind) -> Result<(), SpawnError> {
        if self.is_loaded(asset) {
            Ok(())
        } else {
            Err(SpawnError::AssetNotReady(asset))
        }
    }

    /// Meshes of the duck model: body, head and bill.
    pub fn duck_parts(&self) -> Result<Vec<MeshPart>, SpawnError> {
        self.require(AssetKind::DuckModel)?;
        let feathers = Material {
            color: [0.95, 0.85, 0.2],
            metalness: 0.0,
            roughness: 0.8,
            texture: None,
        };
        let bill = Material {
            color: [0.95, 0.45, 0.1],
            ..feathers
        };
        Ok(vec![
            MeshPart {
                offset: DVec3::ZERO,
                shape: Shape::Box {
                    half_extents: DVec3::new(0.8, 0.5, 0.5),
                },
                material: feathers,
            },
            MeshPart {
                offset: DVec3::new(0.6, 0.8, 0.0),
                shape: Shape::Box {
                    half_extents: DVec3::splat(0.35),
                },
                material: feathers,
            },
            MeshPart {
                offset: DVec3::new(1.1, 0.75, 0.0),
                shape: Shape::Box {
                    half_extents: DVec3::new(0.2, 0.08, 0.15),
                },
                material: bill,
            },
        ])
    }

    /// Shape and material of the textured plane.
    pub fn plane(&self) -> Result<(Shape, Material), SpawnError> {
        self.require(AssetKind::PlaneTexture)?;
        let (half_width, half_height) = PLANE_HALF_SIZE;
        Ok((
            Shape::Plane {
                half_width,
                half_height,
            },
            Material {
                color: [1.0, 1.0, 1.0],
                metalness: 0.0,
                roughness: 1.0,
                texture: Some(AssetKind::PlaneTexture),
            },
        ))
    }
}
