//! A maze: a grid plus the set of passages carved into it.
//!
//! Passages are append-only during a run. The carve order is preserved so
//! callers can replay exactly what an algorithm did.

use super::grid::{Cell, Edge, Grid};
use crate::error::{CarveError, Result};
use std::collections::HashSet;

/// A grid together with its carved passages.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `link` | \(O(\text{degree})\) | adjacency check against the grid |
/// | `unlink` | \(O(m)\) | preserves carve order of the rest |
/// | `is_linked` | \(O(1)\) | hash lookup |
/// | `component_count` | \(O(n + m)\) | iterative DFS over passages |
#[derive(Debug)]
pub struct Maze {
    grid: Box<dyn Grid>,
    links: Vec<Vec<Cell>>,
    passages: Vec<Edge>,
    lookup: HashSet<Edge>,
}

impl Maze {
    /// Creates a maze with no passages over `grid`.
    pub fn new(grid: impl Grid + 'static) -> Self {
        Self::from_boxed(Box::new(grid))
    }

    /// Creates a maze over an already boxed grid.
    pub fn from_boxed(grid: Box<dyn Grid>) -> Self {
        let len = grid.len();
        Self {
            grid,
            links: vec![Vec::new(); len],
            passages: Vec::new(),
            lookup: HashSet::new(),
        }
    }

    /// The underlying grid.
    pub fn grid(&self) -> &dyn Grid {
        self.grid.as_ref()
    }

    /// Number of cells in the grid.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Returns `true` if the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Fails with [`CarveError::CellOutOfGrid`] unless `cell` is in the grid.
    pub fn check_cell(&self, cell: Cell) -> Result<()> {
        if self.grid.contains(cell) {
            Ok(())
        } else {
            Err(CarveError::CellOutOfGrid {
                cell,
                len: self.len(),
            })
        }
    }

    /// Carves a passage between grid neighbors `a` and `b`.
    pub fn link(&mut self, a: Cell, b: Cell) -> Result<Edge> {
        self.check_cell(a)?;
        self.check_cell(b)?;
        if !self.grid.is_adjacent(a, b) {
            return Err(CarveError::NotAdjacent(a, b));
        }
        let edge = Edge::new(a, b);
        if !self.lookup.insert(edge) {
            return Err(CarveError::AlreadyLinked(a, b));
        }
        self.links[a].push(b);
        self.links[b].push(a);
        self.passages.push(edge);
        tracing::trace!(passage = %edge, "link");
        Ok(edge)
    }

    /// Removes the passage between `a` and `b`. Returns `false` if there was none.
    pub fn unlink(&mut self, a: Cell, b: Cell) -> bool {
        let edge = Edge::new(a, b);
        if !self.lookup.remove(&edge) {
            return false;
        }
        self.links[a].retain(|&c| c != b);
        self.links[b].retain(|&c| c != a);
        self.passages.retain(|&e| e != edge);
        true
    }

    /// Returns `true` if a passage joins `a` and `b`.
    pub fn is_linked(&self, a: Cell, b: Cell) -> bool {
        self.lookup.contains(&Edge::new(a, b))
    }

    /// Passages in carve order.
    pub fn passages(&self) -> &[Edge] {
        &self.passages
    }

    /// Number of carved passages.
    pub fn passage_count(&self) -> usize {
        self.passages.len()
    }

    /// Cells joined to `cell` by a passage, in carve order.
    pub fn linked_neighbors(&self, cell: Cell) -> &[Cell] {
        self.links.get(cell).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of passages at `cell`.
    pub fn degree(&self, cell: Cell) -> usize {
        self.linked_neighbors(cell).len()
    }

    /// Connected components under the current passages.
    ///
    /// Components are listed by their lowest cell; members in DFS discovery order.
    pub fn components(&self) -> Vec<Vec<Cell>> {
        let mut seen = vec![false; self.len()];
        let mut components = Vec::new();
        let mut stack = Vec::new();
        for root in 0..self.len() {
            if seen[root] {
                continue;
            }
            seen[root] = true;
            stack.push(root);
            let mut members = Vec::new();
            while let Some(cell) = stack.pop() {
                members.push(cell);
                for &nbr in &self.links[cell] {
                    if !seen[nbr] {
                        seen[nbr] = true;
                        stack.push(nbr);
                    }
                }
            }
            components.push(members);
        }
        components
    }

    /// Number of connected components under the current passages.
    pub fn component_count(&self) -> usize {
        self.components().len()
    }

    /// Returns `true` if the passages form one spanning tree of the grid.
    pub fn is_spanning_tree(&self) -> bool {
        !self.is_empty()
            && self.passage_count() + 1 == self.len()
            && self.component_count() == 1
    }
}
