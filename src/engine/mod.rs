//! The algorithm run loop.
//!
//! Every carver implements [`Algorithm`] by filling in hooks; the loop that
//! drives them lives here and is the same for all of them:
//!
//! ```text
//! parse_args -> initialize -> configure -> (visit while more) -> done
//! ```
//!
//! A [`Status`] walks through [`Phase`]s in that order and is consumed into an
//! [`Outcome`] once `more` turns false. The outcome is read-only: it exposes
//! the carved maze, the [`Report`] and the algorithm's own result fields.

mod report;

pub use report::{Counter, Counters, Report};

use crate::error::Result;
use crate::graph::{Cell, Edge, Maze};
use crate::rng::Entropy;

/// Lifecycle of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    /// Options parsed and stored.
    Constructed,
    /// Data structures set up.
    Initialized,
    /// Statistics seeded; ready to visit.
    Configured,
    /// At least one visit has run and more remain.
    Running,
    /// `more` returned false.
    Done,
}

/// Mutable state shared by every hook: the maze, counters and randomness.
#[derive(Debug)]
pub struct Run {
    maze: Maze,
    counters: Counters,
    entropy: Entropy,
}

impl Run {
    fn new(maze: Maze, entropy: Entropy) -> Self {
        Self {
            maze,
            counters: Counters::new(),
            entropy,
        }
    }

    /// The maze being carved.
    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    /// Carves a passage and counts it.
    pub fn carve(&mut self, a: Cell, b: Cell) -> Result<Edge> {
        let edge = self.maze.link(a, b)?;
        self.counters.bump("carved");
        Ok(edge)
    }

    /// Run counters.
    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    /// Adds one to the counter `name`.
    pub fn bump(&mut self, name: &str) {
        self.counters.bump(name);
    }

    /// Overwrites the counter `name`.
    pub fn set(&mut self, name: &str, value: i64) {
        self.counters.set(name, value);
    }

    /// The shared random source.
    pub fn entropy(&self) -> &Entropy {
        &self.entropy
    }
}

/// Hooks that turn the shared run loop into a concrete algorithm.
///
/// Only `parse_args`, `visit` and `more` are mandatory. Hooks never drive
/// the loop themselves.
pub trait Algorithm: Sized {
    /// Caller-facing options.
    type Options;

    /// Name used in spans and reports.
    const NAME: &'static str;

    /// Validates `options` against the maze. Must not carve.
    fn parse_args(maze: &Maze, options: Self::Options, entropy: &Entropy) -> Result<Self>;

    /// Sets up data structures.
    fn initialize(&mut self, _run: &mut Run) -> Result<()> {
        Ok(())
    }

    /// Seeds statistics and optionally performs a first action.
    fn configure(&mut self, _run: &mut Run) -> Result<()> {
        Ok(())
    }

    /// One step of the algorithm.
    fn visit(&mut self, run: &mut Run) -> Result<()>;

    /// Whether another `visit` is needed.
    fn more(&self, run: &Run) -> bool;

    /// Adds algorithm-specific figures to the final report.
    fn report(&self, _report: &mut Report) {}
}

/// A run in progress.
#[derive(Debug)]
pub struct Status<A> {
    algorithm: A,
    run: Run,
    phase: Phase,
}

impl<A: Algorithm> Status<A> {
    /// Parses options, then initializes and configures the algorithm.
    ///
    /// Configuration errors surface here, before anything is carved.
    pub fn new(maze: Maze, options: A::Options, entropy: &Entropy) -> Result<Self> {
        let algorithm = A::parse_args(&maze, options, entropy)?;
        let mut status = Self {
            algorithm,
            run: Run::new(maze, entropy.clone()),
            phase: Phase::Constructed,
        };
        tracing::debug!(algorithm = A::NAME, "constructed");

        status.algorithm.initialize(&mut status.run)?;
        status.phase = Phase::Initialized;
        tracing::debug!(algorithm = A::NAME, "initialized");

        let cells = i64::try_from(status.run.maze.len()).unwrap_or(i64::MAX);
        status.run.set("cells", cells);
        status.run.set("visits", 0);
        status.algorithm.configure(&mut status.run)?;
        status.phase = Phase::Configured;
        tracing::debug!(algorithm = A::NAME, "configured");
        Ok(status)
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The algorithm state.
    pub fn algorithm(&self) -> &A {
        &self.algorithm
    }

    /// The maze as carved so far.
    pub fn maze(&self) -> &Maze {
        &self.run.maze
    }

    /// Split borrow of the algorithm and its run state.
    #[cfg(test)]
    pub(crate) fn parts_mut(&mut self) -> (&mut A, &mut Run) {
        (&mut self.algorithm, &mut self.run)
    }

    /// Performs one visit if more remain. Returns `false` once done.
    pub fn step(&mut self) -> Result<bool> {
        if self.phase == Phase::Done {
            return Ok(false);
        }
        if !self.algorithm.more(&self.run) {
            self.phase = Phase::Done;
            tracing::debug!(algorithm = A::NAME, visits = self.run.counters.get("visits"), "done");
            return Ok(false);
        }
        self.phase = Phase::Running;
        self.algorithm.visit(&mut self.run)?;
        self.run.bump("visits");
        tracing::trace!(algorithm = A::NAME, passages = self.run.maze.passage_count(), "visit");
        Ok(true)
    }

    /// Visits until done and returns the terminal outcome.
    pub fn run(mut self) -> Result<Outcome<A>> {
        while self.step()? {}
        Ok(self.finish())
    }

    fn finish(self) -> Outcome<A> {
        let Self {
            algorithm, mut run, ..
        } = self;
        let passages = i64::try_from(run.maze.passage_count()).unwrap_or(i64::MAX);
        run.set("passages", passages);
        let mut report = Report::new(A::NAME);
        report.counters = run.counters;
        algorithm.report(&mut report);
        Outcome {
            algorithm,
            maze: run.maze,
            report,
        }
    }
}

/// Runs `A` on `maze` to completion.
pub fn run<A: Algorithm>(maze: Maze, options: A::Options, entropy: &Entropy) -> Result<Outcome<A>> {
    let span = tracing::debug_span!("carve", algorithm = A::NAME);
    let _guard = span.enter();
    Status::<A>::new(maze, options, entropy)?.run()
}

/// A finished run. Read-only.
#[derive(Debug)]
pub struct Outcome<A> {
    algorithm: A,
    maze: Maze,
    report: Report,
}

impl<A> Outcome<A> {
    /// The carved maze.
    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    /// Final statistics.
    pub fn report(&self) -> &Report {
        &self.report
    }

    /// Algorithm-specific result fields.
    pub fn algorithm(&self) -> &A {
        &self.algorithm
    }

    /// Takes the carved maze out of the outcome.
    pub fn into_maze(self) -> Maze {
        self.maze
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::RectGrid;

    /// Carves a path along row-major order, one passage per visit.
    #[derive(Debug)]
    struct Snake {
        next: Cell,
        log: Vec<&'static str>,
    }

    impl Algorithm for Snake {
        type Options = Cell;
        const NAME: &'static str = "snake";

        fn parse_args(maze: &Maze, start: Cell, _entropy: &Entropy) -> Result<Self> {
            maze.check_cell(start)?;
            Ok(Self {
                next: start,
                log: vec!["parse_args"],
            })
        }

        fn initialize(&mut self, _run: &mut Run) -> Result<()> {
            self.log.push("initialize");
            Ok(())
        }

        fn configure(&mut self, _run: &mut Run) -> Result<()> {
            self.log.push("configure");
            Ok(())
        }

        fn visit(&mut self, run: &mut Run) -> Result<()> {
            run.carve(self.next, self.next + 1)?;
            self.next += 1;
            Ok(())
        }

        fn more(&self, run: &Run) -> bool {
            self.next + 1 < run.maze().len()
        }

        fn report(&self, report: &mut Report) {
            report.counters.set("end", self.next as i64);
        }
    }

    #[test]
    fn hooks_run_in_fixed_order() {
        let maze = Maze::new(RectGrid::new(1, 4));
        let mut status = Status::<Snake>::new(maze, 0, &Entropy::seeded(0)).unwrap();
        assert_eq!(status.phase(), Phase::Configured);
        assert_eq!(status.algorithm().log, vec!["parse_args", "initialize", "configure"]);

        assert!(status.step().unwrap());
        assert_eq!(status.phase(), Phase::Running);
        assert_eq!(status.maze().passage_count(), 1);

        let outcome = status.run().unwrap();
        assert_eq!(outcome.maze().passage_count(), 3);
        assert!(outcome.maze().is_spanning_tree());
        assert_eq!(outcome.report().get("visits"), 3);
        assert_eq!(outcome.report().get("carved"), 3);
        assert_eq!(outcome.report().get("cells"), 4);
        assert_eq!(outcome.report().get("end"), 3);
    }

    #[test]
    fn parse_errors_precede_carving() {
        let maze = Maze::new(RectGrid::new(1, 4));
        let err = run::<Snake>(maze, 17, &Entropy::seeded(0)).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Configuration);
    }
}
