//! Grid topologies and passage identifiers.
//!
//! Cells are dense `usize` ids in `0..len`. A [`Grid`] only answers adjacency
//! questions; carving state lives in [`Maze`](super::Maze).
//!
//! Two minimal topologies are provided:
//! - [`RectGrid`]: rows × columns, 4-neighborhood
//! - [`AdjacencyGrid`]: explicit, validated adjacency lists

use crate::error::{CarveError, Result};
use core::fmt;
use serde::Serialize;

/// Dense cell identifier.
pub type Cell = usize;

/// An undirected passage between two cells, stored with `a <= b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Edge {
    a: Cell,
    b: Cell,
}

impl Edge {
    /// Creates the normalized edge joining `x` and `y`.
    pub fn new(x: Cell, y: Cell) -> Self {
        if x <= y {
            Self { a: x, b: y }
        } else {
            Self { a: y, b: x }
        }
    }

    /// Both endpoints, lower id first.
    #[inline]
    pub fn endpoints(&self) -> (Cell, Cell) {
        (self.a, self.b)
    }

    /// The endpoint opposite `cell`, if `cell` is an endpoint.
    pub fn other(&self, cell: Cell) -> Option<Cell> {
        if cell == self.a {
            Some(self.b)
        } else if cell == self.b {
            Some(self.a)
        } else {
            None
        }
    }

    /// Returns `true` if `cell` is an endpoint.
    #[inline]
    pub fn touches(&self, cell: Cell) -> bool {
        self.a == cell || self.b == cell
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.a, self.b)
    }
}

/// A directed passage `tail -> head`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Arc {
    /// Source cell.
    pub tail: Cell,
    /// Destination cell.
    pub head: Cell,
}

impl Arc {
    /// Creates the arc `tail -> head`.
    pub fn new(tail: Cell, head: Cell) -> Self {
        Self { tail, head }
    }

    /// The undirected edge underlying this arc.
    #[inline]
    pub fn edge(&self) -> Edge {
        Edge::new(self.tail, self.head)
    }

    /// The arc in the opposite direction.
    #[inline]
    pub fn reversed(&self) -> Self {
        Self::new(self.head, self.tail)
    }
}

impl fmt::Display for Arc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.tail, self.head)
    }
}

/// Adjacency oracle over dense cell ids.
///
/// `neighbors` must be symmetric and must always enumerate in the same order;
/// carvers that do not shuffle rely on that order for reproducible output.
pub trait Grid: fmt::Debug {
    /// Number of cells.
    fn len(&self) -> usize;

    /// Neighbors of `cell` in fixed enumeration order.
    fn neighbors(&self, cell: Cell) -> Vec<Cell>;

    /// Returns `true` if the grid has no cells.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if `cell` belongs to the grid.
    fn contains(&self, cell: Cell) -> bool {
        cell < self.len()
    }

    /// Returns `true` if `a` and `b` are grid neighbors.
    fn is_adjacent(&self, a: Cell, b: Cell) -> bool {
        self.contains(a) && self.contains(b) && self.neighbors(a).contains(&b)
    }

    /// Every undirected edge exactly once, ordered by lower endpoint then enumeration.
    fn edges(&self) -> Vec<Edge> {
        let mut edges = Vec::new();
        for cell in 0..self.len() {
            for nbr in self.neighbors(cell) {
                if cell < nbr {
                    edges.push(Edge::new(cell, nbr));
                }
            }
        }
        edges
    }

    /// Human-readable cell name used in logs and error messages.
    fn label(&self, cell: Cell) -> String {
        cell.to_string()
    }
}

/// A rectangular grid with the 4-neighborhood.
///
/// Ids are row-major. Neighbors enumerate north, south, east, west.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RectGrid {
    rows: usize,
    cols: usize,
}

impl RectGrid {
    /// Creates a `rows × cols` grid.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Id of the cell at `(row, col)`, if inside the grid.
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    /// `(row, col)` of `cell`.
    pub fn coords(&self, cell: Cell) -> (usize, usize) {
        (cell / self.cols, cell % self.cols)
    }
}

impl Grid for RectGrid {
    fn len(&self) -> usize {
        self.rows * self.cols
    }

    fn neighbors(&self, cell: Cell) -> Vec<Cell> {
        if !self.contains(cell) {
            return Vec::new();
        }
        let (row, col) = self.coords(cell);
        let mut nbrs = Vec::with_capacity(4);
        if row > 0 {
            nbrs.push(cell - self.cols);
        }
        if row + 1 < self.rows {
            nbrs.push(cell + self.cols);
        }
        if col + 1 < self.cols {
            nbrs.push(cell + 1);
        }
        if col > 0 {
            nbrs.push(cell - 1);
        }
        nbrs
    }

    fn label(&self, cell: Cell) -> String {
        let (row, col) = self.coords(cell);
        format!("({row}, {col})")
    }
}

/// A grid given by explicit adjacency lists.
///
/// Lists are validated on construction: every neighbor must be in range, the
/// relation must be symmetric and free of self-loops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyGrid {
    adjacency: Vec<Vec<Cell>>,
}

impl AdjacencyGrid {
    /// Creates a grid from adjacency lists.
    pub fn from_adjacency(adjacency: Vec<Vec<Cell>>) -> Result<Self> {
        let len = adjacency.len();
        for (cell, nbrs) in adjacency.iter().enumerate() {
            for &nbr in nbrs {
                if nbr >= len {
                    return Err(CarveError::CellOutOfGrid { cell: nbr, len });
                }
                if nbr == cell || !adjacency[nbr].contains(&cell) {
                    return Err(CarveError::NotAdjacent(nbr, cell));
                }
            }
        }
        Ok(Self { adjacency })
    }

    /// Creates a grid with `len` cells from an undirected edge list.
    ///
    /// Neighbor order follows the order edges are listed.
    pub fn from_edges(len: usize, edges: &[(Cell, Cell)]) -> Result<Self> {
        let mut adjacency = vec![Vec::new(); len];
        for &(a, b) in edges {
            for cell in [a, b] {
                if cell >= len {
                    return Err(CarveError::CellOutOfGrid { cell, len });
                }
            }
            if a == b {
                return Err(CarveError::NotAdjacent(a, b));
            }
            if !adjacency[a].contains(&b) {
                adjacency[a].push(b);
                adjacency[b].push(a);
            }
        }
        Ok(Self { adjacency })
    }
}

impl Grid for AdjacencyGrid {
    fn len(&self) -> usize {
        self.adjacency.len()
    }

    fn neighbors(&self, cell: Cell) -> Vec<Cell> {
        self.adjacency.get(cell).cloned().unwrap_or_default()
    }
}
