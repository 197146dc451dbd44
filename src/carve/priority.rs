//! Priority tables for weighted carving.
//!
//! A single table can hold priorities for arcs, undirected edges, vertices and
//! one global constant. Lookups walk an ordered list of [`PriorityKey`]s and
//! the first defined value wins:
//!
//! | Asking for | Keys tried, in order |
//! |------------|----------------------|
//! | an arc `u -> v` | arc, edge `{u, v}`, vertex `v`, constant |
//! | an edge `{u, v}` | edge, constant |
//! | a vertex `v` | vertex, constant |
//!
//! When nothing matches, the priority queue falls back to its own cached
//! random draw.

use crate::error::{CarveError, Result};
use crate::graph::{Arc, Cell, Edge};
use std::collections::HashMap;

/// One place a priority may be stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriorityKey {
    /// A directed passage.
    Arc(Arc),
    /// An undirected passage.
    Edge(Edge),
    /// A destination cell.
    Vertex(Cell),
    /// The global default.
    Constant,
}

/// Priorities keyed by arc, edge, vertex, or a global constant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Priorities {
    arcs: HashMap<Arc, f64>,
    edges: HashMap<Edge, f64>,
    vertices: HashMap<Cell, f64>,
    constant: Option<f64>,
}

impl Priorities {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the priority of the arc `tail -> head`.
    pub fn with_arc(mut self, tail: Cell, head: Cell, priority: f64) -> Self {
        self.arcs.insert(Arc::new(tail, head), priority);
        self
    }

    /// Sets the priority of the undirected edge `{a, b}`.
    pub fn with_edge(mut self, a: Cell, b: Cell, priority: f64) -> Self {
        self.edges.insert(Edge::new(a, b), priority);
        self
    }

    /// Sets the priority of entering `cell`.
    pub fn with_vertex(mut self, cell: Cell, priority: f64) -> Self {
        self.vertices.insert(cell, priority);
        self
    }

    /// Sets the global default priority.
    pub fn with_constant(mut self, priority: f64) -> Self {
        self.constant = Some(priority);
        self
    }

    /// Returns `true` if no priority of any kind is defined.
    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
            && self.edges.is_empty()
            && self.vertices.is_empty()
            && self.constant.is_none()
    }

    /// The value stored under exactly `key`.
    pub fn get(&self, key: PriorityKey) -> Option<f64> {
        match key {
            PriorityKey::Arc(arc) => self.arcs.get(&arc).copied(),
            PriorityKey::Edge(edge) => self.edges.get(&edge).copied(),
            PriorityKey::Vertex(cell) => self.vertices.get(&cell).copied(),
            PriorityKey::Constant => self.constant,
        }
    }

    /// First defined value among `keys`.
    pub fn resolve(&self, keys: &[PriorityKey]) -> Option<f64> {
        keys.iter().find_map(|&key| self.get(key))
    }

    /// Priority of an arc.
    pub fn for_arc(&self, arc: Arc) -> Option<f64> {
        self.resolve(&[
            PriorityKey::Arc(arc),
            PriorityKey::Edge(arc.edge()),
            PriorityKey::Vertex(arc.head),
            PriorityKey::Constant,
        ])
    }

    /// Priority of an undirected edge.
    pub fn for_edge(&self, edge: Edge) -> Option<f64> {
        self.resolve(&[PriorityKey::Edge(edge), PriorityKey::Constant])
    }

    /// Priority of a vertex.
    pub fn for_vertex(&self, cell: Cell) -> Option<f64> {
        self.resolve(&[PriorityKey::Vertex(cell), PriorityKey::Constant])
    }

    /// Rejects negative (or NaN) priorities.
    pub fn validate(&self) -> Result<()> {
        let negative = |key: String, weight: f64| {
            if weight >= 0.0 {
                Ok(())
            } else {
                Err(CarveError::NegativeWeight { key, weight })
            }
        };
        for (arc, &w) in &self.arcs {
            negative(format!("arc {arc}"), w)?;
        }
        for (edge, &w) in &self.edges {
            negative(format!("edge {edge}"), w)?;
        }
        for (cell, &w) in &self.vertices {
            negative(format!("vertex {cell}"), w)?;
        }
        if let Some(w) = self.constant {
            negative("constant".to_owned(), w)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arc_lookup_falls_back_in_order() {
        let table = Priorities::new()
            .with_arc(0, 1, 1.0)
            .with_edge(0, 1, 5.0)
            .with_edge(0, 2, 10.0)
            .with_vertex(3, 7.0)
            .with_constant(99.0);

        assert_eq!(table.for_arc(Arc::new(0, 1)), Some(1.0));
        assert_eq!(table.for_arc(Arc::new(1, 0)), Some(5.0));
        assert_eq!(table.for_arc(Arc::new(2, 0)), Some(10.0));
        assert_eq!(table.for_arc(Arc::new(1, 3)), Some(7.0));
        assert_eq!(table.for_arc(Arc::new(3, 1)), Some(99.0));
        assert_eq!(table.for_edge(Edge::new(3, 1)), Some(99.0));
        assert_eq!(table.for_vertex(3), Some(7.0));
    }

    #[test]
    fn empty_table_resolves_nothing() {
        let table = Priorities::new();
        assert!(table.is_empty());
        assert_eq!(table.for_arc(Arc::new(0, 1)), None);
    }

    #[test]
    fn negative_priorities_are_rejected() {
        let table = Priorities::new().with_edge(2, 1, -3.0);
        assert_eq!(
            table.validate(),
            Err(CarveError::NegativeWeight {
                key: "edge 1-2".to_owned(),
                weight: -3.0
            })
        );
        assert!(Priorities::new().with_constant(0.0).validate().is_ok());
    }
}
