//! Error types shared by every carver.
//!
//! Errors fall into three families:
//! - **Configuration**: rejected while parsing options, before any passage is carved.
//! - **Underflow**: a queue was drained past empty, or discarded after a stale peek.
//! - **Connectivity**: the component registry or the maze was asked for something
//!   inconsistent with its current partition.

use crate::graph::{Cell, Edge};
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CarveError>;

/// Coarse classification of a [`CarveError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid options; surfaced before carving starts.
    Configuration,
    /// Queue misuse; a programmer error, never retried.
    Underflow,
    /// Registry or maze inconsistency.
    Connectivity,
}

/// Errors raised by queues, registries, mazes and carvers.
#[derive(Error, Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum CarveError {
    // Configuration errors
    #[error("unknown queue discipline: {0}")]
    UnknownDiscipline(String),

    #[error("unknown tie-break mode: {0:?} (expected stable, antistable or unstable)")]
    UnknownTieBreak(String),

    #[error("unknown scheduler: {0} (expected tournament or round-robin)")]
    UnknownScheduler(String),

    #[error("unknown option value: {0}")]
    UnknownOption(String),

    #[error("cell {cell} is not in the grid (grid has {len} cells)")]
    CellOutOfGrid { cell: Cell, len: usize },

    #[error("seed cell {0} was given to more than one task")]
    DuplicateSeed(Cell),

    #[error("negative priority {weight} for {key}")]
    NegativeWeight { key: String, weight: f64 },

    #[error("split target length must be positive, got {0}")]
    InvalidTarget(usize),

    #[error("task {task} has weight {weight}; task weights must be positive")]
    InvalidWeight { task: usize, weight: u32 },

    #[error("no priority available for {0}")]
    MissingPriority(String),

    #[error("no unclaimed cell left to seed a task")]
    NoFreeCell,

    #[error("at least one task is required")]
    NoTasks,

    // Underflow errors
    #[error("queue underflow")]
    Underflow,

    #[error("discard without a fresh peek: the queue changed since the last top()")]
    StalePeek,

    // Connectivity errors
    #[error("component {0} is not registered")]
    UnregisteredComponent(usize),

    #[error("item {0} is not registered")]
    UnregisteredItem(String),

    #[error("circuit detected at {0}")]
    Circuit(Edge),

    #[error("cells {0} and {1} are not adjacent")]
    NotAdjacent(Cell, Cell),

    #[error("cells {0} and {1} are already linked")]
    AlreadyLinked(Cell, Cell),
}

impl CarveError {
    /// Returns the family this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CarveError::UnknownDiscipline(_)
            | CarveError::UnknownTieBreak(_)
            | CarveError::UnknownScheduler(_)
            | CarveError::UnknownOption(_)
            | CarveError::CellOutOfGrid { .. }
            | CarveError::DuplicateSeed(_)
            | CarveError::NegativeWeight { .. }
            | CarveError::InvalidTarget(_)
            | CarveError::InvalidWeight { .. }
            | CarveError::MissingPriority(_)
            | CarveError::NoFreeCell
            | CarveError::NoTasks => ErrorKind::Configuration,

            CarveError::Underflow | CarveError::StalePeek => ErrorKind::Underflow,

            CarveError::UnregisteredComponent(_)
            | CarveError::UnregisteredItem(_)
            | CarveError::Circuit(_)
            | CarveError::NotAdjacent(..)
            | CarveError::AlreadyLinked(..) => ErrorKind::Connectivity,
        }
    }
}
