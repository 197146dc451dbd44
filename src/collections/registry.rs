//! `ComponentRegistry` — connectivity classes with stable integer ids.
//!
//! Items are registered lazily; each first sighting allocates a fresh
//! singleton component with the next id. Merging two components keeps the
//! lower id, so ids never change except by disappearing. Membership is a
//! partition of the registered items at every instant.
//!
//! Lookups go through a [`DisjointSet`]; member lists are kept per
//! component so a component can be enumerated without scanning every item.

use super::disjoint_set::DisjointSet;
use super::queue::Packet;
use crate::error::{CarveError, Result};
use std::collections::{BTreeMap, HashMap};

/// Integer id of a component, allocated monotonically from zero.
pub type ComponentId = usize;

/// A union-find registry mapping items to component ids and back.
#[derive(Debug, Clone)]
pub struct ComponentRegistry<T> {
    sets: DisjointSet,
    index: HashMap<T, usize>,
    items: Vec<T>,
    /// Component id of each representative element.
    label: Vec<ComponentId>,
    /// Member elements of each live component.
    members: BTreeMap<ComponentId, Vec<usize>>,
    next_id: ComponentId,
}

impl<T: Packet> ComponentRegistry<T> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            sets: DisjointSet::new(),
            index: HashMap::new(),
            items: Vec::new(),
            label: Vec::new(),
            members: BTreeMap::new(),
            next_id: 0,
        }
    }

    /// Registers `item`, returning its component id.
    ///
    /// A repeat sighting is a no-op that returns the existing id.
    pub fn register(&mut self, item: T) -> ComponentId {
        if let Some(&element) = self.index.get(&item) {
            return self.label[self.sets.find(element)];
        }
        let element = self.sets.make_set();
        let id = self.next_id;
        self.next_id += 1;
        self.index.insert(item.clone(), element);
        self.items.push(item);
        self.label.push(id);
        self.members.insert(id, vec![element]);
        id
    }

    /// Component id of a registered item.
    pub fn component_for(&self, item: &T) -> Result<ComponentId> {
        let element = self
            .index
            .get(item)
            .ok_or_else(|| CarveError::UnregisteredItem(format!("{item:?}")))?;
        Ok(self.label[self.sets.find(*element)])
    }

    /// Merges two components; the lower id survives and is returned.
    ///
    /// Merging a component with itself is a no-op.
    pub fn merge(&mut self, id1: ComponentId, id2: ComponentId) -> Result<ComponentId> {
        let first = self.representative(id1)?;
        let second = self.representative(id2)?;
        if id1 == id2 {
            return Ok(id1);
        }
        let (survivor, loser) = if id1 < id2 { (id1, id2) } else { (id2, id1) };

        let root = self
            .sets
            .union(first, second)
            .ok_or(CarveError::UnregisteredComponent(loser))?;
        self.label[root] = survivor;

        let mut absorbed = self.members.remove(&loser).unwrap_or_default();
        let kept = self.members.entry(survivor).or_default();
        if kept.len() < absorbed.len() {
            std::mem::swap(kept, &mut absorbed);
        }
        kept.extend(absorbed);
        Ok(survivor)
    }

    /// Registers both items if needed and reports whether they share a component.
    pub fn are_connected(&mut self, a: T, b: T) -> bool {
        let ia = self.register(a);
        let ib = self.register(b);
        ia == ib
    }

    /// Registers both items if needed and merges their components.
    ///
    /// Returns the surviving id, or `None` if they were already connected.
    pub fn join(&mut self, a: T, b: T) -> Result<Option<ComponentId>> {
        let ia = self.register(a);
        let ib = self.register(b);
        if ia == ib {
            return Ok(None);
        }
        self.merge(ia, ib).map(Some)
    }

    /// Members of a component, in no particular order.
    pub fn members(&self, id: ComponentId) -> Result<Vec<&T>> {
        let elements = self
            .members
            .get(&id)
            .ok_or(CarveError::UnregisteredComponent(id))?;
        Ok(elements.iter().map(|&e| &self.items[e]).collect())
    }

    /// Live component ids in ascending order.
    pub fn component_ids(&self) -> impl Iterator<Item = ComponentId> + '_ {
        self.members.keys().copied()
    }

    /// Number of live components.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Number of registered items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    fn representative(&self, id: ComponentId) -> Result<usize> {
        self.members
            .get(&id)
            .and_then(|elements| elements.first())
            .map(|&element| self.sets.find(element))
            .ok_or(CarveError::UnregisteredComponent(id))
    }
}

impl<T: Packet> Default for ComponentRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}
