//! # `thicket` - Spanning-Tree Maze Carving
//!
//! A toolkit for carving mazes as spanning trees of a grid graph. One run
//! loop drives every algorithm; the algorithms differ only in the hooks they
//! plug into it and in the queue discipline that orders their frontier.
//!
//! ## Key Features
//!
//! - **Queue disciplines**: stack, FIFO, priority (with tie-break modes),
//!   random, median and two stack/queue hybrids behind one front end with
//!   usage statistics
//! - **Growing tree**: DFS, BFS and the Prim family from a single carver
//! - **Union-find carvers**: Kruskal (optionally degree-bounded) and Borůvka
//! - **Cooperative forests**: several growing trees interleaved by a
//!   round-robin or weighted tournament scheduler, then stitched together
//!
//! ## Architecture
//!
//! 1. **Collections** ([`collections`]): queue disciplines, disjoint sets and
//!    the component registry.
//! 2. **Graph** ([`graph`]): the grid contract and the [`Maze`] that records
//!    carved passages.
//! 3. **Engine** ([`engine`]): the [`Algorithm`] hooks, the run loop and the
//!    statistics [`Report`].
//! 4. **Carvers** ([`carve`]) and **schedulers** ([`schedule`]).
//!
//! All randomness flows through one [`Entropy`] handle so a seed reproduces
//! a run exactly.
//!
//! ## Example
//!
//! ```rust
//! use thicket::carve::{GrowingTreeOptions, VertexGrowingTree};
//! use thicket::collections::DisciplineKind;
//! use thicket::{engine, Entropy, Maze, RectGrid};
//!
//! let maze = Maze::new(RectGrid::new(8, 8));
//! let options = GrowingTreeOptions::with_discipline(DisciplineKind::Random);
//! let outcome = engine::run::<VertexGrowingTree>(maze, options, &Entropy::seeded(7)).unwrap();
//!
//! assert!(outcome.maze().is_spanning_tree());
//! assert_eq!(outcome.report().get("passages"), 63);
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_wrap, clippy::cast_precision_loss)]

pub mod carve;
pub mod collections;
pub mod engine;
pub mod error;
pub mod graph;
pub mod rng;
pub mod schedule;

pub use engine::{Algorithm, Outcome, Report, Status};
pub use error::{CarveError, ErrorKind, Result};
pub use graph::{AdjacencyGrid, Arc, Cell, Edge, Grid, Maze, RectGrid};
pub use rng::Entropy;
