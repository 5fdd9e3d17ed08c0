//! Entity registry with deferred insertion and removal
//!
//! Entities are registered into a staging area and only join the live set at
//! the next `cleanup()`. Removal is queued the same way. So an entity becomes
//! visible to updates and collision queries from the tick after it was
//! registered, stays visible until the cleanup after it was deregistered, and
//! the live set never changes shape while a tick is iterating it.
//!
//! Iteration order is ascending id, which is registration order.

use std::collections::BTreeMap;

use super::entity::{Entity, EntityId};

/// Where a taken entity came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Live,
    Staged,
}

#[derive(Debug, Clone, Default)]
pub struct Registry {
    live: BTreeMap<EntityId, Entity>,
    staged: BTreeMap<EntityId, Entity>,
    pending_removal: Vec<EntityId>,
    last_id: EntityId,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign the next id and stage the entity for the next cleanup
    pub fn register(&mut self, mut entity: Entity) -> EntityId {
        self.last_id += 1;
        let id = self.last_id;
        entity.id = id;
        self.staged.insert(id, entity);
        id
    }

    /// Queue an id for removal at the next cleanup
    pub fn deregister(&mut self, id: EntityId) {
        if !self.pending_removal.contains(&id) {
            self.pending_removal.push(id);
        }
    }

    /// Promote staged entities, then drop everything queued for removal
    pub fn cleanup(&mut self) {
        self.live.append(&mut self.staged);
        for id in self.pending_removal.drain(..) {
            self.live.remove(&id);
        }
    }

    /// Highest id handed out so far
    pub fn last_id(&self) -> EntityId {
        self.last_id
    }

    /// Live or staged entity
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.live.get(&id).or_else(|| self.staged.get(&id))
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        match self.live.get_mut(&id) {
            Some(entity) => Some(entity),
            None => self.staged.get_mut(&id),
        }
    }

    /// In the live set (visible to this tick)
    pub fn contains(&self, id: EntityId) -> bool {
        self.live.contains_key(&id)
    }

    /// Snapshot of live ids in registration order
    pub fn ids(&self) -> Vec<EntityId> {
        self.live.keys().copied().collect()
    }

    /// Live and staged ids
    pub fn all_ids(&self) -> Vec<EntityId> {
        self.live.keys().chain(self.staged.keys()).copied().collect()
    }

    /// Live entities in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.live.values()
    }

    /// Entities waiting for the next cleanup to go live
    pub fn staged(&self) -> impl Iterator<Item = &Entity> {
        self.staged.values()
    }

    pub fn pending_removal(&self) -> &[EntityId] {
        &self.pending_removal
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Temporarily move an entity out so it can be mutated alongside the
    /// rest of the game state. Pair with `restore`.
    pub fn take(&mut self, id: EntityId) -> Option<(Entity, Slot)> {
        if let Some(entity) = self.live.remove(&id) {
            return Some((entity, Slot::Live));
        }
        self.staged.remove(&id).map(|e| (e, Slot::Staged))
    }

    pub fn restore(&mut self, entity: Entity, slot: Slot) {
        match slot {
            Slot::Live => self.live.insert(entity.id, entity),
            Slot::Staged => self.staged.insert(entity.id, entity),
        };
    }
}
