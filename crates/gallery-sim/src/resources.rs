//! Fixed-capacity pool of geometry and material records.
//!
//! Every mesh node owns one geometry slot and one material slot, released
//! when the node is destroyed. Freed slots go on a free list and are reused
//! by later allocations; a released record itself is never handed out again.

use gallery_core::components::Resource;
use gallery_core::error::SceneError;
use gallery_core::types::SlotId;

#[derive(Debug)]
pub struct ResourcePool {
    slots: Vec<Option<Resource>>,
    free: Vec<u32>,
    capacity: usize,
    in_use: usize,
}

impl ResourcePool {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            capacity,
            in_use: 0,
        }
    }

    /// Store a record, failing when every slot is occupied.
    pub fn allocate(&mut self, resource: Resource) -> Result<SlotId, SceneError> {
        if let Some(index) = self.free.pop() {
            self.slots[index as usize] = Some(resource);
            self.in_use += 1;
            return Ok(SlotId(index));
        }
        if self.slots.len() >= self.capacity {
            return Err(SceneError::PoolExhausted {
                capacity: self.capacity,
            });
        }
        self.slots.push(Some(resource));
        self.in_use += 1;
        Ok(SlotId((self.slots.len() - 1) as u32))
    }

    /// Free a slot. Returns false if it was already free.
    pub fn release(&mut self, slot: SlotId) -> bool {
        match self.slots.get_mut(slot.0 as usize) {
            Some(entry @ Some(_)) => {
                *entry = None;
                self.free.push(slot.0);
                self.in_use -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn get(&self, slot: SlotId) -> Option<&Resource> {
        self.slots.get(slot.0 as usize).and_then(Option::as_ref)
    }

    pub fn in_use(&self) -> usize {
        self.in_use
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn available(&self) -> usize {
        self.capacity - self.in_use
    }
}
