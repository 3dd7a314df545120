//! Scene graph the targets' visuals live in.
//!
//! `SceneGraph` is the host boundary the core talks to: it creates visuals
//! (allocating pool slots for their geometry and material), attaches and
//! detaches them under the scene root, and destroys them. Attach/detach
//! are reported back as `SceneEvent`s. Nodes are hecs entities; a visual
//! is either a single mesh or a group of child meshes.

use glam::DVec3;
use hecs::{Entity, World};

use gallery_core::components::*;
use gallery_core::constants::PLANE_THICKNESS;
use gallery_core::enums::{Shape, VisualKind};
use gallery_core::error::SceneError;
use gallery_core::events::SceneEvent;

use crate::resources::ResourcePool;

/// Owning reference to the root node of a visual subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VisualHandle(Entity);

impl VisualHandle {
    pub fn entity(self) -> Entity {
        self.0
    }

    /// Stable id used in events and snapshots.
    pub fn to_bits(self) -> u64 {
        self.0.to_bits().get()
    }
}

/// Parent link of a child mesh.
#[derive(Debug, Clone, Copy)]
pub struct Parent(pub Entity);

/// Child meshes of a group, in creation order.
#[derive(Debug, Clone, Default)]
pub struct Children(pub Vec<Entity>);

/// One mesh of a visual.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshPart {
    /// Offset from the visual's origin.
    pub offset: DVec3,
    pub shape: Shape,
    pub material: Material,
}

/// Description of a visual to create.
#[derive(Debug, Clone, PartialEq)]
pub enum VisualSpec {
    Mesh { shape: Shape, material: Material },
    Group { parts: Vec<MeshPart> },
}

pub struct SceneGraph {
    world: World,
    pool: ResourcePool,
    events: Vec<SceneEvent>,
}

impl SceneGraph {
    pub fn new(pool_capacity: usize) -> Self {
        Self {
            world: World::new(),
            pool: ResourcePool::with_capacity(pool_capacity),
            events: Vec::new(),
        }
    }

    /// Create a detached visual at `translation`.
    ///
    /// Either the whole visual is created or nothing is: a failed pool
    /// allocation rolls back the slots and nodes created so far.
    pub fn create_visual(
        &mut self,
        spec: &VisualSpec,
        translation: DVec3,
    ) -> Result<VisualHandle, SceneError> {
        match spec {
            VisualSpec::Mesh { shape, material } => {
                let slots = self.allocate_slots(*shape, *material)?;
                let entity = self.world.spawn((
                    Visual {
                        kind: VisualKind::Mesh,
                    },
                    Transform { translation },
                    collider_for(*shape),
                    slots,
                ));
                Ok(VisualHandle(entity))
            }
            VisualSpec::Group { parts } => {
                let group = self.world.spawn((
                    Visual {
                        kind: VisualKind::Group,
                    },
                    Transform { translation },
                    Children::default(),
                ));
                for part in parts {
                    let slots = match self.allocate_slots(part.shape, part.material) {
                        Ok(slots) => slots,
                        Err(err) => {
                            self.destroy_subtree(group);
                            return Err(err);
                        }
                    };
                    let child = self.world.spawn((
                        Visual {
                            kind: VisualKind::Mesh,
                        },
                        Transform {
                            translation: part.offset,
                        },
                        collider_for(part.shape),
                        slots,
                        Parent(group),
                    ));
                    if let Ok(mut children) = self.world.get::<&mut Children>(group) {
                        children.0.push(child);
                    }
                }
                Ok(VisualHandle(group))
            }
        }
    }

    /// Add a visual under the scene root. Attaching twice is a no-op.
    pub fn attach(&mut self, handle: VisualHandle) -> Result<(), SceneError> {
        if !self.world.contains(handle.0) {
            return Err(SceneError::UnknownHandle);
        }
        if self.is_attached(handle) {
            return Ok(());
        }
        self.world
            .insert_one(handle.0, Attached)
            .map_err(|_| SceneError::UnknownHandle)?;
        self.events.push(SceneEvent::Attached {
            handle: handle.to_bits(),
        });
        Ok(())
    }

    /// Remove a visual from the scene root. Detaching twice is a no-op.
    pub fn detach(&mut self, handle: VisualHandle) -> Result<(), SceneError> {
        if !self.world.contains(handle.0) {
            return Err(SceneError::UnknownHandle);
        }
        if self.world.remove_one::<Attached>(handle.0).is_ok() {
            self.events.push(SceneEvent::Detached {
                handle: handle.to_bits(),
            });
        }
        Ok(())
    }

    /// Detach a visual, release every slot its meshes own and remove its nodes.
    pub fn destroy(&mut self, handle: VisualHandle) -> Result<(), SceneError> {
        self.detach(handle)?;
        self.destroy_subtree(handle.0);
        Ok(())
    }

    pub fn set_translation(
        &mut self,
        handle: VisualHandle,
        translation: DVec3,
    ) -> Result<(), SceneError> {
        let mut transform = self
            .world
            .get::<&mut Transform>(handle.0)
            .map_err(|_| SceneError::UnknownHandle)?;
        transform.translation = translation;
        Ok(())
    }

    pub fn contains(&self, handle: VisualHandle) -> bool {
        self.world.contains(handle.0)
    }

    pub fn is_attached(&self, handle: VisualHandle) -> bool {
        self.world.satisfies::<&Attached>(handle.0).unwrap_or(false)
    }

    /// World-space position: local translations summed up the parent chain.
    pub fn world_position(&self, entity: Entity) -> Option<DVec3> {
        let mut position = self.world.get::<&Transform>(entity).ok()?.translation;
        let mut current = entity;
        while let Some(parent) = self.parent_of(current) {
            position += self.world.get::<&Transform>(parent).ok()?.translation;
            current = parent;
        }
        Some(position)
    }

    /// World-space box of a node with a collider, as (min, max).
    pub fn world_aabb(&self, entity: Entity) -> Option<(DVec3, DVec3)> {
        let half = self.world.get::<&Collider>(entity).ok()?.half_extents;
        let center = self.world_position(entity)?;
        Some((center - half, center + half))
    }

    /// The handle's root node followed by its descendants, depth first.
    pub fn descendants(&self, handle: VisualHandle) -> Vec<Entity> {
        let mut out = Vec::new();
        if self.world.contains(handle.0) {
            self.collect_subtree(handle.0, &mut out);
        }
        out
    }

    /// Whether `ancestor` is `node` or one of its parents.
    pub fn is_ancestor_or_self(&self, ancestor: Entity, node: Entity) -> bool {
        let mut current = Some(node);
        while let Some(entity) = current {
            if entity == ancestor {
                return true;
            }
            current = self.parent_of(entity);
        }
        false
    }

    /// Events produced since the last drain.
    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn pool(&self) -> &ResourcePool {
        &self.pool
    }

    /// Number of live nodes (meshes and groups).
    pub fn node_count(&self) -> u32 {
        self.world.len()
    }

    fn parent_of(&self, entity: Entity) -> Option<Entity> {
        self.world.get::<&Parent>(entity).ok().map(|p| p.0)
    }

    fn collect_subtree(&self, entity: Entity, out: &mut Vec<Entity>) {
        out.push(entity);
        let children = self
            .world
            .get::<&Children>(entity)
            .map(|c| c.0.clone())
            .unwrap_or_default();
        for child in children {
            self.collect_subtree(child, out);
        }
    }

    fn allocate_slots(
        &mut self,
        shape: Shape,
        material: Material,
    ) -> Result<ResourceSlots, SceneError> {
        let geometry = self.pool.allocate(Resource::Geometry(shape))?;
        let material = match self.pool.allocate(Resource::Material(material)) {
            Ok(slot) => slot,
            Err(err) => {
                self.pool.release(geometry);
                return Err(err);
            }
        };
        Ok(ResourceSlots { geometry, material })
    }

    fn destroy_subtree(&mut self, root: Entity) {
        let mut nodes = Vec::new();
        self.collect_subtree(root, &mut nodes);
        for entity in nodes {
            if let Ok(slots) = self.world.remove_one::<ResourceSlots>(entity) {
                self.pool.release(slots.geometry);
                self.pool.release(slots.material);
            }
            let _ = self.world.despawn(entity);
        }
    }
}

fn collider_for(shape: Shape) -> Collider {
    let half_extents = match shape {
        Shape::Box { half_extents } => half_extents,
        Shape::Plane {
            half_width,
            half_height,
        } => DVec3::new(half_width, half_height, PLANE_THICKNESS * 0.5),
    };
    Collider { half_extents }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube_spec() -> VisualSpec {
        VisualSpec::Mesh {
            shape: Shape::Box {
                half_extents: DVec3::splat(0.5),
            },
            material: Material::from_hsl(0.1, 0.7, 0.5),
        }
    }

    fn pair_spec() -> VisualSpec {
        let part = |x: f64| MeshPart {
            offset: DVec3::new(x, 0.0, 0.0),
            shape: Shape::Box {
                half_extents: DVec3::splat(0.25),
            },
            material: Material::from_hsl(0.2, 0.7, 0.5),
        };
        VisualSpec::Group {
            parts: vec![part(-1.0), part(1.0)],
        }
    }

    #[test]
    fn test_attach_detach_emit_events_once() {
        let mut scene = SceneGraph::new(8);
        let handle = scene.create_visual(&cube_spec(), DVec3::ZERO).unwrap();
        assert!(!scene.is_attached(handle));

        scene.attach(handle).unwrap();
        scene.attach(handle).unwrap();
        assert!(scene.is_attached(handle));
        scene.detach(handle).unwrap();
        scene.detach(handle).unwrap();

        let events = scene.drain_events();
        assert_eq!(
            events,
            vec![
                SceneEvent::Attached {
                    handle: handle.to_bits()
                },
                SceneEvent::Detached {
                    handle: handle.to_bits()
                },
            ]
        );
        assert!(scene.drain_events().is_empty());
    }

    #[test]
    fn test_destroy_releases_all_slots() {
        let mut scene = SceneGraph::new(8);
        let handle = scene.create_visual(&pair_spec(), DVec3::ZERO).unwrap();
        scene.attach(handle).unwrap();
        assert_eq!(scene.pool().in_use(), 4);
        assert_eq!(scene.node_count(), 3);

        scene.destroy(handle).unwrap();
        assert_eq!(scene.pool().in_use(), 0);
        assert_eq!(scene.node_count(), 0);
        assert!(!scene.contains(handle));
        assert_eq!(scene.destroy(handle), Err(SceneError::UnknownHandle));
    }

    #[test]
    fn test_failed_group_creation_rolls_back() {
        // Room for one and a half parts.
        let mut scene = SceneGraph::new(3);
        let err = scene.create_visual(&pair_spec(), DVec3::ZERO).unwrap_err();
        assert_eq!(err, SceneError::PoolExhausted { capacity: 3 });
        assert_eq!(scene.pool().in_use(), 0);
        assert_eq!(scene.node_count(), 0);
        assert!(scene.drain_events().is_empty());
    }

    #[test]
    fn test_child_world_position_follows_group() {
        let mut scene = SceneGraph::new(8);
        let handle = scene
            .create_visual(&pair_spec(), DVec3::new(10.0, 5.0, -30.0))
            .unwrap();
        let nodes = scene.descendants(handle);
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0], handle.entity());

        let right = nodes[2];
        assert_eq!(
            scene.world_position(right),
            Some(DVec3::new(11.0, 5.0, -30.0))
        );
        scene
            .set_translation(handle, DVec3::new(0.0, 5.0, -30.0))
            .unwrap();
        let (min, max) = scene.world_aabb(right).unwrap();
        assert_eq!(min, DVec3::new(0.75, 4.75, -30.25));
        assert_eq!(max, DVec3::new(1.25, 5.25, -29.75));

        // Groups carry no collider of their own.
        assert!(scene.world_aabb(handle.entity()).is_none());
        assert!(scene.is_ancestor_or_self(handle.entity(), right));
        assert!(!scene.is_ancestor_or_self(right, handle.entity()));
    }
}
