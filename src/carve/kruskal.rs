//! Kruskal's algorithm and its degree-constrained variant.
//!
//! The registry starts with one component per seed group; every grid edge
//! joining two different groups is queued. Each visit pops one edge and
//! carves it if its endpoints are still apart.
//!
//! ### Seeding
//!
//! | Mode | Initial components |
//! |------|--------------------|
//! | [`Seeding::Scatter`] | one per cell |
//! | [`Seeding::Collect`] | one per group of cells already joined by passages |
//!
//! With a priority discipline (the default) this is the weighted minimum
//! spanning tree. Any other discipline pops edges in its own order; the edge
//! list is shuffled first unless `shuffle` is off.

use super::priority::Priorities;
use crate::collections::{ComponentRegistry, DisciplineKind, Lookup, Queue};
use crate::engine::{Algorithm, Report, Run};
use crate::error::{CarveError, Result};
use crate::graph::{Cell, Edge, Maze};
use crate::rng::Entropy;
use core::str::FromStr;
use serde::Deserialize;
use std::rc::Rc;

/// How the registry is seeded before edges are loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seeding {
    /// Every cell starts alone.
    #[default]
    Scatter,
    /// Cells already joined by passages start together.
    Collect,
}

impl FromStr for Seeding {
    type Err = CarveError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scatter" => Ok(Seeding::Scatter),
            "collect" => Ok(Seeding::Collect),
            _ => Err(CarveError::UnknownOption(s.to_owned())),
        }
    }
}

/// Kruskal options.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct KruskalOptions {
    /// Registry seeding mode.
    pub seeding: Seeding,
    /// Edge queue discipline.
    pub discipline: DisciplineKind,
    /// Shuffle the edge list before loading a non-priority queue.
    pub shuffle: bool,
    /// Degree bound: an edge is rejected once either endpoint's degree
    /// exceeds it. `None` leaves degrees unbounded.
    pub arity: Option<usize>,
    /// Edge weights for the priority discipline.
    #[serde(skip)]
    pub priorities: Priorities,
}

impl Default for KruskalOptions {
    fn default() -> Self {
        Self {
            seeding: Seeding::Scatter,
            discipline: DisciplineKind::priority(),
            shuffle: true,
            arity: None,
            priorities: Priorities::new(),
        }
    }
}

/// Kruskal state and result fields.
#[derive(Debug)]
pub struct Kruskal {
    seeding: Seeding,
    shuffle: bool,
    arity: Option<usize>,
    weighted: bool,
    queue: Queue<Edge>,
    registry: ComponentRegistry<Cell>,
    initial_components: usize,
    cycle_rejections: usize,
    arity_rejections: usize,
}

impl Kruskal {
    /// Components after seeding.
    pub fn initial_components(&self) -> usize {
        self.initial_components
    }

    /// Components when the run stopped.
    pub fn components(&self) -> usize {
        self.registry.len()
    }

    /// Edges discarded because their endpoints were already connected.
    pub fn cycle_rejections(&self) -> usize {
        self.cycle_rejections
    }

    /// Edges discarded by the arity bound.
    pub fn arity_rejections(&self) -> usize {
        self.arity_rejections
    }

    /// The registry, for inspecting the final partition.
    pub fn registry(&self) -> &ComponentRegistry<Cell> {
        &self.registry
    }

    fn over_arity(&self, maze: &Maze, edge: Edge) -> bool {
        let (a, b) = edge.endpoints();
        self.arity
            .is_some_and(|arity| maze.degree(a) > arity || maze.degree(b) > arity)
    }
}

impl Algorithm for Kruskal {
    type Options = KruskalOptions;
    const NAME: &'static str = "Kruskal";

    fn parse_args(_maze: &Maze, options: KruskalOptions, entropy: &Entropy) -> Result<Self> {
        options.priorities.validate()?;
        let weighted = matches!(options.discipline, DisciplineKind::Priority { .. });
        let table = Rc::new(options.priorities);
        let lookup: Lookup<Edge> = Box::new(move |edge: &Edge| table.for_edge(*edge));
        let queue = Queue::with_lookup(&options.discipline, entropy, lookup)?;
        Ok(Self {
            seeding: options.seeding,
            shuffle: options.shuffle,
            arity: options.arity,
            weighted,
            queue,
            registry: ComponentRegistry::new(),
            initial_components: 0,
            cycle_rejections: 0,
            arity_rejections: 0,
        })
    }

    fn initialize(&mut self, run: &mut Run) -> Result<()> {
        match self.seeding {
            Seeding::Scatter => {
                for cell in 0..run.maze().len() {
                    self.registry.register(cell);
                }
            }
            Seeding::Collect => {
                for group in run.maze().components() {
                    let Some((&first, rest)) = group.split_first() else {
                        continue;
                    };
                    self.registry.register(first);
                    for &cell in rest {
                        self.registry.join(first, cell)?;
                    }
                }
            }
        }
        self.initial_components = self.registry.len();
        Ok(())
    }

    fn configure(&mut self, run: &mut Run) -> Result<()> {
        let mut edges: Vec<Edge> = Vec::new();
        for edge in run.maze().grid().edges() {
            let (a, b) = edge.endpoints();
            if !self.registry.are_connected(a, b) {
                edges.push(edge);
            }
        }
        if self.shuffle && !self.weighted {
            run.entropy().shuffle(&mut edges);
        }
        for edge in edges {
            self.queue.enter(edge)?;
        }
        run.set("initial components", self.initial_components as i64);
        tracing::debug!(
            components = self.initial_components,
            edges = self.queue.len(),
            "edges loaded"
        );
        Ok(())
    }

    fn visit(&mut self, run: &mut Run) -> Result<()> {
        let edge = self.queue.leave()?;
        let (a, b) = edge.endpoints();
        if self.registry.are_connected(a, b) {
            self.cycle_rejections += 1;
            return Ok(());
        }
        if self.over_arity(run.maze(), edge) {
            self.arity_rejections += 1;
            tracing::trace!(%edge, "arity rejection");
            return Ok(());
        }
        run.carve(a, b)?;
        self.registry.join(a, b)?;
        Ok(())
    }

    fn more(&self, _run: &Run) -> bool {
        self.registry.len() > 1 && !self.queue.is_empty()
    }

    fn report(&self, report: &mut Report) {
        report.counters.set("final components", self.registry.len() as i64);
        report.counters.set("cycle rejections", self.cycle_rejections as i64);
        if self.arity.is_some() {
            report.counters.set("arity rejections", self.arity_rejections as i64);
        }
        report.push_queue(self.queue.summary());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{run, Outcome};
    use crate::graph::RectGrid;

    fn square_weights() -> Priorities {
        // A=0 B=1 / C=2 D=3
        Priorities::new()
            .with_edge(0, 1, 1.0)
            .with_edge(0, 2, 10.0)
            .with_edge(1, 3, 20.0)
            .with_edge(2, 3, 40.0)
    }

    #[test]
    fn weighted_square_takes_the_three_cheapest_edges() {
        let options = KruskalOptions {
            priorities: square_weights(),
            ..KruskalOptions::default()
        };
        let outcome =
            run::<Kruskal>(Maze::new(RectGrid::new(2, 2)), options, &Entropy::seeded(5)).unwrap();
        assert_eq!(
            outcome.maze().passages(),
            &[Edge::new(0, 1), Edge::new(0, 2), Edge::new(1, 3)]
        );
        assert_eq!(outcome.algorithm().components(), 1);
        assert_eq!(outcome.report().get("initial components"), 4);
    }

    #[test]
    fn collect_keeps_existing_passages() {
        let mut maze = Maze::new(RectGrid::new(1, 4));
        maze.link(0, 1).unwrap();
        maze.link(2, 3).unwrap();
        let options = KruskalOptions {
            seeding: Seeding::Collect,
            ..KruskalOptions::default()
        };
        let outcome = run::<Kruskal>(maze, options, &Entropy::seeded(1)).unwrap();
        assert_eq!(outcome.algorithm().initial_components(), 2);
        assert_eq!(outcome.maze().passage_count(), 3);
        assert!(outcome.maze().is_linked(1, 2));
        assert!(outcome.maze().is_spanning_tree());
    }

    fn bounded(rows: usize, cols: usize, arity: usize) -> Outcome<Kruskal> {
        let options = KruskalOptions {
            discipline: DisciplineKind::Queue,
            shuffle: false,
            arity: Some(arity),
            ..KruskalOptions::default()
        };
        run::<Kruskal>(Maze::new(RectGrid::new(rows, cols)), options, &Entropy::seeded(9)).unwrap()
    }

    #[test]
    fn arity_two_caps_degree_at_three() {
        let outcome = bounded(4, 4, 2);
        let maze = outcome.maze();
        assert!((0..maze.len()).all(|cell| maze.degree(cell) <= 3));
        assert_eq!(
            maze.passage_count() + outcome.algorithm().components(),
            maze.len()
        );
    }

    #[test]
    fn arity_bound_admits_an_endpoint_at_the_bound() {
        let outcome = bounded(1, 3, 1);
        assert_eq!(outcome.maze().passages(), &[Edge::new(0, 1), Edge::new(1, 2)]);
        assert_eq!(outcome.algorithm().components(), 1);
        assert_eq!(outcome.algorithm().arity_rejections(), 0);
    }

    #[test]
    fn zero_arity_carves_a_matching() {
        let outcome = bounded(2, 2, 0);
        let maze = outcome.maze();
        assert!(maze.passage_count() >= 1);
        assert!((0..maze.len()).all(|cell| maze.degree(cell) <= 1));
        assert!(outcome.algorithm().arity_rejections() > 0);
        assert_eq!(
            outcome.report().get("arity rejections"),
            outcome.algorithm().arity_rejections() as i64
        );
    }

    #[test]
    fn seeding_parses_by_name() {
        assert_eq!("Collect".parse::<Seeding>(), Ok(Seeding::Collect));
        assert!("gather".parse::<Seeding>().is_err());
    }
}
