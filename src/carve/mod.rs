//! Spanning-tree carvers.
//!
//! Each carver is an [`Algorithm`](crate::engine::Algorithm) with its own
//! options struct; run any of them with [`engine::run`](crate::engine::run).
//!
//! | Carver | Grows | Frontier |
//! |--------|-------|----------|
//! | [`VertexGrowingTree`] | one tree from a start cell | cells |
//! | [`ArcGrowingTree`] | one tree from a start cell | directed passages |
//! | [`Kruskal`] | a forest that merges into one tree | undirected edges |
//! | [`Boruvka`] | a forest, merged a round at a time | every component at once |
//! | [`Forest`] | `k` trees side by side, stitched at the end | one queue per task |

mod boruvka;
mod forest;
mod growing_tree;
mod kruskal;
mod priority;

pub use boruvka::{Boruvka, BoruvkaOptions};
pub use forest::{BorderPolicy, Forest, ForestOptions, TaskSpec, TaskStats, TURN_LOG};
pub use growing_tree::{ArcGrowingTree, GrowingTreeOptions, VertexGrowingTree};
pub use kruskal::{Kruskal, KruskalOptions, Seeding};
pub use priority::{Priorities, PriorityKey};
