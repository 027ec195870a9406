//! Handle-indexed body storage
//!
//! The pool is the canonical list of live bodies. Everything else (quadtree
//! nodes, the ship slot in `World`) holds a [`BodyId`], so a change made
//! through one handle is visible everywhere.

use slotmap::{SlotMap, new_key_type};

use super::body::Body;

new_key_type! {
    /// Stable handle to a pooled body. Handles of removed bodies never
    /// resolve again, even after their slot is reused.
    pub struct BodyId;
}

#[derive(Debug, Clone, Default)]
pub struct BodyPool {
    bodies: SlotMap<BodyId, Body>,
}

impl BodyPool {
    pub fn new() -> Self {
        Self {
            bodies: SlotMap::with_key(),
        }
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn insert(&mut self, body: Body) -> BodyId {
        self.bodies.insert(body)
    }

    pub fn remove(&mut self, id: BodyId) -> Option<Body> {
        self.bodies.remove(id)
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.bodies.contains_key(id)
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id)
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(id)
    }

    /// Mutable access to two distinct bodies at once
    pub fn get_pair_mut(&mut self, a: BodyId, b: BodyId) -> Option<(&mut Body, &mut Body)> {
        let [first, second] = self.bodies.get_disjoint_mut([a, b])?;
        Some((first, second))
    }

    /// Live handles in slot order
    pub fn ids(&self) -> Vec<BodyId> {
        self.bodies.keys().collect()
    }

    /// Live bodies in slot order
    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &Body)> {
        self.bodies.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (BodyId, &mut Body)> {
        self.bodies.iter_mut()
    }
}
