//! Multi-task forest carving.
//!
//! Several growing-tree searches share one maze. A scheduler picks which task
//! takes the next step; each task has its own frontier queue and discipline
//! and claims cells for itself. Where a task's frontier runs into a cell
//! claimed by another task, the passage between them is remembered as a
//! border edge instead of being carved.
//!
//! When every task has run dry, the border edges are stitched: with one
//! component per task, border edges are accepted greedily while they join two
//! different task trees, until `k - 1` joins are in. The final visit is the
//! stitching pass.
//!
//! If fewer than `k - 1` joins exist (a disconnected grid), the result is a
//! forest and the residual component count says how many trees remain.

use crate::collections::{ComponentRegistry, DisciplineKind, Queue};
use crate::engine::{Algorithm, Report, Run};
use crate::error::{CarveError, Result};
use crate::graph::{Cell, Edge, Maze};
use crate::rng::Entropy;
use crate::schedule::{check_weight, Scheduler, SchedulerKind, TaskId};
use core::str::FromStr;
use serde::Deserialize;
use std::collections::HashSet;

/// Growing turns kept for inspection; later turns are only counted.
pub const TURN_LOG: usize = 64;

/// Order in which border edges are offered to the stitching pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BorderPolicy {
    /// Shuffle border edges first.
    #[default]
    Shuffle,
    /// Offer border edges in discovery order.
    InsertionOrder,
}

impl FromStr for BorderPolicy {
    type Err = CarveError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "shuffle" => Ok(BorderPolicy::Shuffle),
            "insertion-order" | "insertion" | "fifo" => Ok(BorderPolicy::InsertionOrder),
            _ => Err(CarveError::UnknownOption(s.to_owned())),
        }
    }
}

/// One growing-tree task.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TaskSpec {
    /// Frontier discipline.
    pub discipline: DisciplineKind,
    /// Seed cell; a random unclaimed cell if `None`.
    pub seed: Option<Cell>,
    /// Scheduling weight (tournament only, must be positive).
    pub weight: u32,
}

impl Default for TaskSpec {
    fn default() -> Self {
        Self {
            discipline: DisciplineKind::Stack,
            seed: None,
            weight: 1,
        }
    }
}

impl TaskSpec {
    /// A task with the given discipline and seed.
    pub fn new(discipline: DisciplineKind, seed: Option<Cell>) -> Self {
        Self {
            discipline,
            seed,
            weight: 1,
        }
    }
}

/// Forest carving options.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ForestOptions {
    /// The tasks, in id order.
    pub tasks: Vec<TaskSpec>,
    /// Which scheduler interleaves them.
    pub scheduler: SchedulerKind,
    /// Border edge order for stitching.
    pub border: BorderPolicy,
    /// Random neighbor choice within each task.
    pub shuffle: bool,
}

impl Default for ForestOptions {
    fn default() -> Self {
        Self {
            tasks: vec![TaskSpec::default(); 2],
            scheduler: SchedulerKind::RoundRobin,
            border: BorderPolicy::Shuffle,
            shuffle: true,
        }
    }
}

/// Per-task result fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskStats {
    /// Seed cell.
    pub seed: Cell,
    /// Cells claimed, seed included.
    pub claimed: usize,
    /// Frontier entries.
    pub pushes: usize,
    /// Frontier exits.
    pub pops: usize,
}

#[derive(Debug)]
struct Task {
    queue: Queue<Cell>,
    weight: u32,
    stats: TaskStats,
}

/// Forest carving state and result fields.
#[derive(Debug)]
pub struct Forest {
    tasks: Vec<Task>,
    owner: Vec<Option<TaskId>>,
    scheduler: Box<dyn Scheduler>,
    borders: Vec<Edge>,
    seen_borders: HashSet<Edge>,
    policy: BorderPolicy,
    shuffle: bool,
    turns: Vec<TaskId>,
    turn_count: usize,
    stitched: bool,
    accepted: usize,
    residual: usize,
}

impl Forest {
    /// Number of tasks.
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Result fields of one task.
    pub fn task_stats(&self, task: TaskId) -> Option<TaskStats> {
        self.tasks.get(task).map(|t| t.stats)
    }

    /// Owner of `cell`, if claimed.
    pub fn owner(&self, cell: Cell) -> Option<TaskId> {
        self.owner.get(cell).copied().flatten()
    }

    /// Distinct border edges found.
    pub fn border_edges(&self) -> &[Edge] {
        &self.borders
    }

    /// Border edges carved by stitching.
    pub fn accepted_joins(&self) -> usize {
        self.accepted
    }

    /// Trees left after stitching.
    pub fn residual_components(&self) -> usize {
        self.residual
    }

    /// Tasks still scheduled.
    pub fn scheduled(&self) -> usize {
        self.scheduler.len()
    }

    /// Task picked on each of the first [`TURN_LOG`] growing turns, in order.
    pub fn turns(&self) -> &[TaskId] {
        &self.turns
    }

    /// Growing turns taken so far.
    pub fn turn_count(&self) -> usize {
        self.turn_count
    }

    fn retire(&mut self, id: TaskId) {
        if self.scheduler.remove(id) {
            tracing::debug!(task = id, claimed = self.tasks[id].stats.claimed, "task exhausted");
        }
    }

    /// One growing step of task `id`.
    fn grow(&mut self, run: &mut Run, id: TaskId) -> Result<()> {
        if self.turns.len() < TURN_LOG {
            self.turns.push(id);
        }
        self.turn_count += 1;
        let task = &mut self.tasks[id];
        if task.queue.is_empty() {
            self.retire(id);
            return Ok(());
        }
        let cell = *task.queue.top()?;

        let mut candidates = Vec::new();
        for nbr in run.maze().grid().neighbors(cell) {
            match self.owner[nbr] {
                None => candidates.push(nbr),
                Some(other) if other != id => {
                    let edge = Edge::new(cell, nbr);
                    if self.seen_borders.insert(edge) {
                        self.borders.push(edge);
                    }
                }
                Some(_) => {}
            }
        }
        let next = if self.shuffle {
            run.entropy().choose(&candidates).copied()
        } else {
            candidates.first().copied()
        };

        let task = &mut self.tasks[id];
        match next {
            Some(nbr) => {
                run.carve(cell, nbr)?;
                self.owner[nbr] = Some(id);
                task.queue.enter(nbr)?;
                task.stats.claimed += 1;
                task.stats.pushes += 1;
            }
            None => {
                task.queue.discard()?;
                task.stats.pops += 1;
                if task.queue.is_empty() {
                    self.retire(id);
                }
            }
        }
        Ok(())
    }

    /// Joins the task trees through border edges.
    fn stitch(&mut self, run: &mut Run) -> Result<()> {
        let mut registry = ComponentRegistry::new();
        for id in 0..self.tasks.len() {
            registry.register(id);
        }
        let mut offered = self.borders.clone();
        if self.policy == BorderPolicy::Shuffle {
            run.entropy().shuffle(&mut offered);
        }

        let wanted = self.tasks.len().saturating_sub(1);
        for edge in offered {
            if self.accepted == wanted {
                break;
            }
            let (a, b) = edge.endpoints();
            let (Some(ta), Some(tb)) = (self.owner[a], self.owner[b]) else {
                continue;
            };
            if registry.join(ta, tb)?.is_some() {
                run.carve(a, b)?;
                self.accepted += 1;
            }
        }

        self.residual = registry.len();
        self.stitched = true;
        if self.residual > 1 {
            tracing::warn!(
                residual = self.residual,
                borders = self.borders.len(),
                "stitching left the forest fragmented"
            );
        }
        Ok(())
    }
}

/// Rejects duplicate or out-of-grid seeds and draws the missing ones.
fn place_seeds(maze: &Maze, tasks: &[TaskSpec], entropy: &Entropy) -> Result<Vec<Cell>> {
    let mut taken = HashSet::new();
    for seed in tasks.iter().filter_map(|t| t.seed) {
        maze.check_cell(seed)?;
        if !taken.insert(seed) {
            return Err(CarveError::DuplicateSeed(seed));
        }
    }
    let mut seeds = Vec::with_capacity(tasks.len());
    for spec in tasks {
        let seed = match spec.seed {
            Some(seed) => seed,
            None => {
                let free: Vec<Cell> = (0..maze.len()).filter(|c| !taken.contains(c)).collect();
                let seed = *entropy.choose(&free).ok_or(CarveError::NoFreeCell)?;
                taken.insert(seed);
                seed
            }
        };
        seeds.push(seed);
    }
    Ok(seeds)
}

impl Algorithm for Forest {
    type Options = ForestOptions;
    const NAME: &'static str = "forest";

    fn parse_args(maze: &Maze, options: ForestOptions, entropy: &Entropy) -> Result<Self> {
        if options.tasks.is_empty() {
            return Err(CarveError::NoTasks);
        }
        for (id, spec) in options.tasks.iter().enumerate() {
            check_weight(id, spec.weight)?;
        }
        let seeds = place_seeds(maze, &options.tasks, entropy)?;
        let tasks = options
            .tasks
            .iter()
            .zip(seeds)
            .map(|(spec, seed)| {
                Ok(Task {
                    queue: Queue::new(&spec.discipline, entropy)?,
                    weight: spec.weight,
                    stats: TaskStats {
                        seed,
                        claimed: 0,
                        pushes: 0,
                        pops: 0,
                    },
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            tasks,
            owner: Vec::new(),
            scheduler: options.scheduler.build(entropy),
            borders: Vec::new(),
            seen_borders: HashSet::new(),
            policy: options.border,
            shuffle: options.shuffle,
            turns: Vec::new(),
            turn_count: 0,
            stitched: false,
            accepted: 0,
            residual: 0,
        })
    }

    fn initialize(&mut self, run: &mut Run) -> Result<()> {
        self.owner = vec![None; run.maze().len()];
        Ok(())
    }

    fn configure(&mut self, run: &mut Run) -> Result<()> {
        for (id, task) in self.tasks.iter_mut().enumerate() {
            let seed = task.stats.seed;
            self.owner[seed] = Some(id);
            task.queue.enter(seed)?;
            task.stats.claimed = 1;
            task.stats.pushes = 1;
            self.scheduler.add(id, task.weight)?;
        }
        run.set("tasks", self.tasks.len() as i64);
        Ok(())
    }

    fn visit(&mut self, run: &mut Run) -> Result<()> {
        match self.scheduler.next_task() {
            Some(id) => self.grow(run, id),
            None => self.stitch(run),
        }
    }

    fn more(&self, _run: &Run) -> bool {
        !self.stitched
    }

    fn report(&self, report: &mut Report) {
        report.counters.set("border edges", self.borders.len() as i64);
        report.counters.set("accepted joins", self.accepted as i64);
        report.counters.set("residual components", self.residual as i64);
        report.counters.set("turns", self.turn_count as i64);
        for (id, task) in self.tasks.iter().enumerate() {
            report.counters.set(&format!("task {id} claimed"), task.stats.claimed as i64);
            report.counters.set(&format!("task {id} pushes"), task.stats.pushes as i64);
            report.counters.set(&format!("task {id} pops"), task.stats.pops as i64);
            report.push_queue(task.queue.summary());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::run;
    use crate::graph::{AdjacencyGrid, RectGrid};

    fn two_stacks(a: Cell, b: Cell) -> ForestOptions {
        ForestOptions {
            tasks: vec![
                TaskSpec::new(DisciplineKind::Stack, Some(a)),
                TaskSpec::new(DisciplineKind::Stack, Some(b)),
            ],
            shuffle: false,
            border: BorderPolicy::InsertionOrder,
            ..ForestOptions::default()
        }
    }

    #[test]
    fn two_tasks_on_a_corridor_meet_in_the_middle() {
        let maze = Maze::new(RectGrid::new(1, 6));
        let outcome = run::<Forest>(maze, two_stacks(0, 5), &Entropy::seeded(0)).unwrap();
        let forest = outcome.algorithm();

        // Round robin alternates until both sides reach the middle.
        assert_eq!(&forest.turns()[..4], &[0, 1, 0, 1]);
        assert_eq!(forest.border_edges(), &[Edge::new(2, 3)]);
        assert_eq!(forest.accepted_joins(), 1);
        assert_eq!(forest.residual_components(), 1);
        assert_eq!(forest.task_stats(0).unwrap().claimed, 3);
        assert_eq!(forest.task_stats(1).unwrap().claimed, 3);
        assert_eq!(forest.scheduled(), 0);
        assert!(outcome.maze().is_spanning_tree());
    }

    #[test]
    fn turn_log_keeps_a_bounded_prefix() {
        let maze = Maze::new(RectGrid::new(12, 12));
        let outcome = run::<Forest>(maze, two_stacks(0, 143), &Entropy::seeded(0)).unwrap();
        let forest = outcome.algorithm();
        // every cell is claimed once and popped once
        assert!(forest.turn_count() >= 2 * 144 - 2);
        assert_eq!(forest.turns().len(), TURN_LOG);
        assert_eq!(&forest.turns()[..4], &[0, 1, 0, 1]);
        assert_eq!(outcome.report().get("turns"), forest.turn_count() as i64);
    }

    #[test]
    fn disconnected_grid_leaves_residual_trees() {
        let grid = AdjacencyGrid::from_edges(4, &[(0, 1), (2, 3)]).unwrap();
        let outcome =
            run::<Forest>(Maze::new(grid), two_stacks(0, 3), &Entropy::seeded(0)).unwrap();
        assert_eq!(outcome.algorithm().accepted_joins(), 0);
        assert_eq!(outcome.algorithm().residual_components(), 2);
        assert_eq!(outcome.maze().passage_count(), 2);
        assert_eq!(outcome.report().get("residual components"), 2);
    }

    #[test]
    fn seeds_are_validated() {
        let maze = Maze::new(RectGrid::new(2, 2));
        let err = run::<Forest>(maze, two_stacks(1, 1), &Entropy::seeded(0)).unwrap_err();
        assert_eq!(err, CarveError::DuplicateSeed(1));

        let maze = Maze::new(RectGrid::new(1, 2));
        let options = ForestOptions {
            tasks: vec![TaskSpec::default(); 3],
            ..ForestOptions::default()
        };
        let err = run::<Forest>(maze, options, &Entropy::seeded(0)).unwrap_err();
        assert_eq!(err, CarveError::NoFreeCell);

        let maze = Maze::new(RectGrid::new(1, 2));
        let options = ForestOptions {
            tasks: Vec::new(),
            ..ForestOptions::default()
        };
        let err = run::<Forest>(maze, options, &Entropy::seeded(0)).unwrap_err();
        assert_eq!(err, CarveError::NoTasks);
    }

    #[test]
    fn zero_weight_is_rejected() {
        let options = ForestOptions {
            tasks: vec![TaskSpec {
                weight: 0,
                ..TaskSpec::default()
            }],
            scheduler: SchedulerKind::Tournament,
            ..ForestOptions::default()
        };
        let err = run::<Forest>(Maze::new(RectGrid::new(2, 2)), options, &Entropy::seeded(0))
            .unwrap_err();
        assert_eq!(err, CarveError::InvalidWeight { task: 0, weight: 0 });
    }

    #[test]
    fn border_policy_parses() {
        assert_eq!("shuffle".parse::<BorderPolicy>(), Ok(BorderPolicy::Shuffle));
        assert_eq!(
            "insertion-order".parse::<BorderPolicy>(),
            Ok(BorderPolicy::InsertionOrder)
        );
    }
}
