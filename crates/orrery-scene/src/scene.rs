//! The scene collaborator: an ordered top-level child list backed by a
//! stable-id registry.
//!
//! Identity is a generational [`NodeId`], handed out at `add` and never
//! reused for lookup after removal, so activation logic (craft piloting,
//! comet bookkeeping) does not depend on list order or name-tag scanning.

use crate::entity::Entity;
use tracing::trace;

/// Stable handle to a scene node. Survives reordering; goes stale on
/// removal (the slot's generation is bumped).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    entity: Option<Entity>,
}

/// Ordered collection of top-level scene entities.
#[derive(Debug, Default)]
pub struct Scene {
    slots: Vec<Slot>,
    order: Vec<NodeId>,
    free: Vec<u32>,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entity at the end of the child list and returns its id.
    pub fn add(&mut self, entity: Entity) -> NodeId {
        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.entity = Some(entity);
                NodeId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    entity: Some(entity),
                });
                NodeId {
                    index,
                    generation: 0,
                }
            }
        };
        self.order.push(id);
        trace!(?id, "scene add");
        id
    }

    /// Detaches and returns the entity. Stale or unknown ids return `None`.
    pub fn remove(&mut self, id: NodeId) -> Option<Entity> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let entity = slot.entity.take()?;
        slot.generation += 1;
        self.free.push(id.index);
        self.order.retain(|&other| other != id);
        trace!(?id, label = %entity.label, "scene remove");
        Some(entity)
    }

    /// Looks up a live node.
    pub fn get(&self, id: NodeId) -> Option<&Entity> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.entity.as_ref()
    }

    /// Mutable lookup of a live node.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Entity> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.entity.as_mut()
    }

    /// `true` if the id refers to a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Iterates live nodes in insertion order.
    pub fn children(&self) -> impl Iterator<Item = (NodeId, &Entity)> {
        self.order.iter().filter_map(|&id| Some((id, self.get(id)?)))
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
