//! Containers used by the carvers.
//!
//! Collections are organized by role:
//! - `queue`: interchangeable queue disciplines behind one front end
//! - `disjoint_set`: union-find over dense ids
//! - `registry`: union-find components with stable integer ids

pub mod disjoint_set;
pub mod queue;
pub mod registry;

pub use disjoint_set::DisjointSet;
pub use queue::{
    Discipline, DisciplineKind, Fifo, Lookup, MedianQueue, Packet, PriorityQueue, Queue,
    QueueStats, QueueSummary, RandomQueue, SplitQueue, SplitStack, Stack, TieBreak,
};
pub use registry::{ComponentId, ComponentRegistry};
