//! Target registry: the ordered set of live targets.
//!
//! Insertion order is spawn order. The collection is only mutated through
//! the methods here; every target in it owns an attached visual.

use hecs::Entity;

use gallery_core::types::TargetId;

use crate::scene::{SceneGraph, VisualHandle};
use crate::target::Target;

#[derive(Debug, Default)]
pub struct TargetRegistry {
    targets: Vec<Target>,
}

impl TargetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, target: Target) {
        self.targets.push(target);
    }

    /// Advance every target one step and drop those that left the bounds.
    ///
    /// Walks from the newest to the oldest so removing index `i` never
    /// shifts an element that is still to be visited. Returns the removed
    /// ids in the order they were removed.
    pub fn prune_and_advance(&mut self, scene: &mut SceneGraph, bounds_limit: f64) -> Vec<TargetId> {
        let mut removed = Vec::new();
        for i in (0..self.targets.len()).rev() {
            if !self.targets[i].update(scene, bounds_limit) {
                let target = self.targets.remove(i);
                removed.push(target.id());
            }
        }
        removed
    }

    /// Dispose and remove the target owning `hit_object`: either its root
    /// handle or any node below it. Returns `None` when no target owns it
    /// (e.g. it was already pruned this frame).
    pub fn remove_by_handle(&mut self, scene: &mut SceneGraph, hit_object: Entity) -> Option<TargetId> {
        let index = self.targets.iter().position(|target| {
            target
                .handle()
                .is_some_and(|handle| scene.is_ancestor_or_self(handle.entity(), hit_object))
        })?;
        let mut target = self.targets.remove(index);
        target.dispose(scene);
        Some(target.id())
    }

    /// Handles of all live targets, in spawn order.
    pub fn live_handles(&self) -> Vec<VisualHandle> {
        self.targets.iter().filter_map(Target::handle).collect()
    }

    /// Dispose every target.
    pub fn clear(&mut self, scene: &mut SceneGraph) {
        for mut target in self.targets.drain(..) {
            target.dispose(scene);
        }
    }

    pub fn get(&self, id: TargetId) -> Option<&Target> {
        self.targets.iter().find(|t| t.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Target> {
        self.targets.iter()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
