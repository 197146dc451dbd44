//! The graph collaborator: grids, passages and mazes.
//!
//! - `grid`: adjacency oracles and passage identifiers (`Edge`, `Arc`)
//! - `maze`: a grid plus its carved passages

pub mod grid;
pub mod maze;

pub use grid::{AdjacencyGrid, Arc, Cell, Edge, Grid, RectGrid};
pub use maze::Maze;
