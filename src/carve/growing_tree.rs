//! Growing-tree carvers.
//!
//! One algorithm covers depth-first search, breadth-first search and the Prim
//! family: which classic algorithm comes out depends only on the queue
//! discipline.
//!
//! | Carver | Discipline | Result |
//! |--------|------------|--------|
//! | [`VertexGrowingTree`] | stack | DFS ("recursive backtracker") |
//! | [`VertexGrowingTree`] | queue | BFS |
//! | [`VertexGrowingTree`] | random | "simplified" Prim |
//! | [`VertexGrowingTree`] | priority, per-vertex | "vertex" Prim |
//! | [`ArcGrowingTree`] | queue / stack | arc BFS / arc DFS |
//! | [`ArcGrowingTree`] | priority, per-arc | arc Prim |
//!
//! Arc Prim reduces to edge-weighted Prim when both directions of every edge
//! share a priority.

use super::priority::Priorities;
use crate::collections::{DisciplineKind, Lookup, Queue};
use crate::engine::{Algorithm, Report, Run};
use crate::error::{CarveError, Result};
use crate::graph::{Arc, Cell, Maze};
use crate::rng::Entropy;
use serde::Deserialize;
use std::rc::Rc;

/// Options shared by both growing-tree carvers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GrowingTreeOptions {
    /// Frontier discipline.
    pub discipline: DisciplineKind,
    /// Start cell; random if `None`.
    pub start: Option<Cell>,
    /// Pick among candidates at random instead of in enumeration order.
    pub shuffle: bool,
    /// Priorities for priority disciplines.
    #[serde(skip)]
    pub priorities: Priorities,
}

impl Default for GrowingTreeOptions {
    fn default() -> Self {
        Self {
            discipline: DisciplineKind::Stack,
            start: None,
            shuffle: true,
            priorities: Priorities::new(),
        }
    }
}

impl GrowingTreeOptions {
    /// Default options with the given discipline.
    pub fn with_discipline(discipline: DisciplineKind) -> Self {
        Self {
            discipline,
            ..Self::default()
        }
    }
}

/// Validates the start cell, drawing one at random when unspecified.
pub(crate) fn pick_start(maze: &Maze, start: Option<Cell>, entropy: &Entropy) -> Result<Cell> {
    match start {
        Some(cell) => {
            maze.check_cell(cell)?;
            Ok(cell)
        }
        None if maze.is_empty() => Err(CarveError::CellOutOfGrid { cell: 0, len: 0 }),
        None => Ok(entropy.below(maze.len())),
    }
}

/// Vertex-based growing tree: the frontier holds cells.
#[derive(Debug)]
pub struct VertexGrowingTree {
    queue: Queue<Cell>,
    visited: Vec<bool>,
    visited_count: usize,
    start: Cell,
    shuffle: bool,
}

impl VertexGrowingTree {
    /// Cell the tree grew from.
    pub fn start(&self) -> Cell {
        self.start
    }

    /// Number of cells reached.
    pub fn visited_count(&self) -> usize {
        self.visited_count
    }

    /// Frontier queue (drained once the run is done).
    pub fn queue(&self) -> &Queue<Cell> {
        &self.queue
    }

    fn mark(&mut self, cell: Cell) {
        self.visited[cell] = true;
        self.visited_count += 1;
    }
}

impl Algorithm for VertexGrowingTree {
    type Options = GrowingTreeOptions;
    const NAME: &'static str = "growing tree (vertex)";

    fn parse_args(maze: &Maze, options: GrowingTreeOptions, entropy: &Entropy) -> Result<Self> {
        options.priorities.validate()?;
        let start = pick_start(maze, options.start, entropy)?;
        let table = Rc::new(options.priorities);
        let lookup: Lookup<Cell> = Box::new(move |cell: &Cell| table.for_vertex(*cell));
        let queue = Queue::with_lookup(&options.discipline, entropy, lookup)?;
        Ok(Self {
            queue,
            visited: Vec::new(),
            visited_count: 0,
            start,
            shuffle: options.shuffle,
        })
    }

    fn initialize(&mut self, run: &mut Run) -> Result<()> {
        self.visited = vec![false; run.maze().len()];
        Ok(())
    }

    fn configure(&mut self, _run: &mut Run) -> Result<()> {
        self.mark(self.start);
        self.queue.enter(self.start)
    }

    fn visit(&mut self, run: &mut Run) -> Result<()> {
        let cell = *self.queue.top()?;
        let candidates: Vec<Cell> = run
            .maze()
            .grid()
            .neighbors(cell)
            .into_iter()
            .filter(|&nbr| !self.visited[nbr])
            .collect();
        let next = if self.shuffle {
            run.entropy().choose(&candidates).copied()
        } else {
            candidates.first().copied()
        };

        match next {
            Some(nbr) => {
                run.carve(cell, nbr)?;
                self.mark(nbr);
                self.queue.enter(nbr)
            }
            None => {
                self.queue.discard()?;
                Ok(())
            }
        }
    }

    fn more(&self, _run: &Run) -> bool {
        !self.queue.is_empty()
    }

    fn report(&self, report: &mut Report) {
        report.counters.set("visited", self.visited_count as i64);
        report.push_queue(self.queue.summary());
    }
}

/// Arc-based growing tree: the frontier holds directed passages.
#[derive(Debug)]
pub struct ArcGrowingTree {
    queue: Queue<Arc>,
    visited: Vec<bool>,
    visited_count: usize,
    start: Cell,
    shuffle: bool,
    stale: usize,
}

impl ArcGrowingTree {
    /// Cell the tree grew from.
    pub fn start(&self) -> Cell {
        self.start
    }

    /// Number of cells reached.
    pub fn visited_count(&self) -> usize {
        self.visited_count
    }

    /// Arcs popped after their head had already been reached.
    pub fn stale_arcs(&self) -> usize {
        self.stale
    }

    /// Marks `cell` visited and enqueues every arc leaving it toward an unvisited cell.
    fn expand(&mut self, run: &Run, cell: Cell) -> Result<()> {
        self.visited[cell] = true;
        self.visited_count += 1;
        let mut arcs: Vec<Arc> = run
            .maze()
            .grid()
            .neighbors(cell)
            .into_iter()
            .filter(|&nbr| !self.visited[nbr])
            .map(|nbr| Arc::new(cell, nbr))
            .collect();
        if self.shuffle {
            run.entropy().shuffle(&mut arcs);
        }
        for arc in arcs {
            self.queue.enter(arc)?;
        }
        Ok(())
    }
}

impl Algorithm for ArcGrowingTree {
    type Options = GrowingTreeOptions;
    const NAME: &'static str = "growing tree (arc)";

    fn parse_args(maze: &Maze, options: GrowingTreeOptions, entropy: &Entropy) -> Result<Self> {
        options.priorities.validate()?;
        let start = pick_start(maze, options.start, entropy)?;
        let table = Rc::new(options.priorities);
        let lookup: Lookup<Arc> = Box::new(move |arc: &Arc| table.for_arc(*arc));
        let queue = Queue::with_lookup(&options.discipline, entropy, lookup)?;
        Ok(Self {
            queue,
            visited: Vec::new(),
            visited_count: 0,
            start,
            shuffle: options.shuffle,
            stale: 0,
        })
    }

    fn initialize(&mut self, run: &mut Run) -> Result<()> {
        self.visited = vec![false; run.maze().len()];
        Ok(())
    }

    fn configure(&mut self, run: &mut Run) -> Result<()> {
        self.expand(run, self.start)
    }

    fn visit(&mut self, run: &mut Run) -> Result<()> {
        let arc = self.queue.leave()?;
        if self.visited[arc.head] {
            self.stale += 1;
            return Ok(());
        }
        run.carve(arc.tail, arc.head)?;
        self.expand(run, arc.head)
    }

    /// Stale arcs may outlive full coverage, so both conditions are checked.
    fn more(&self, _run: &Run) -> bool {
        !self.queue.is_empty() && self.visited_count < self.visited.len()
    }

    fn report(&self, report: &mut Report) {
        report.counters.set("visited", self.visited_count as i64);
        report.counters.set("stale arcs", self.stale as i64);
        report.push_queue(self.queue.summary());
    }
}
