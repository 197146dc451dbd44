//! Cooperative schedulers.
//!
//! A scheduler answers one question per turn: which task runs next? Tasks
//! are plain ids; the caller owns the task state and removes a task once it
//! has nothing left to do. Nothing here is concurrent: exactly one task runs
//! per turn.
//!
//! | Scheduler | Selection | `add` / `remove` | `next_task` |
//! |-----------|-----------|------------------|-------------|
//! | [`Tournament`] | weighted random | \(O(k)\) | \(O(\log k)\), \(O(k)\) after a change |
//! | [`RoundRobin`] | fixed rotation | \(O(1)\) amortized | \(O(1)\) amortized |

mod round_robin;
mod tournament;

pub use round_robin::RoundRobin;
pub use tournament::Tournament;

use crate::error::{CarveError, Result};
use crate::rng::Entropy;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// Identifier of a scheduled task.
pub type TaskId = usize;

/// A mutable set of tasks yielding the next one to run.
pub trait Scheduler: fmt::Debug {
    /// Short name used in reports.
    fn name(&self) -> &'static str;

    /// Adds `task`, or updates its weight if already present.
    ///
    /// Weights must be positive; schedulers that ignore weights still
    /// validate them.
    fn add(&mut self, task: TaskId, weight: u32) -> Result<()>;

    /// Removes `task`. Returns `false` if it was not scheduled.
    fn remove(&mut self, task: TaskId) -> bool;

    /// The next task to run, or `None` once the set is empty.
    fn next_task(&mut self) -> Option<TaskId>;

    /// Returns `true` if `task` is scheduled.
    fn contains(&self, task: TaskId) -> bool;

    /// Number of scheduled tasks.
    fn len(&self) -> usize;

    /// Returns `true` if no task is scheduled.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Rejects zero weights.
pub(crate) fn check_weight(task: TaskId, weight: u32) -> Result<()> {
    if weight == 0 {
        Err(CarveError::InvalidWeight { task, weight })
    } else {
        Ok(())
    }
}

/// Which scheduler to build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchedulerKind {
    /// Deterministic rotation in insertion order.
    #[default]
    RoundRobin,
    /// Weighted random draw.
    Tournament,
}

impl SchedulerKind {
    /// Builds an empty scheduler of this kind.
    pub fn build(self, entropy: &Entropy) -> Box<dyn Scheduler> {
        match self {
            SchedulerKind::RoundRobin => Box::new(RoundRobin::new()),
            SchedulerKind::Tournament => Box::new(Tournament::new(entropy.clone())),
        }
    }
}

impl FromStr for SchedulerKind {
    type Err = CarveError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "round-robin" | "roundrobin" | "rr" => Ok(SchedulerKind::RoundRobin),
            "tournament" | "weighted" => Ok(SchedulerKind::Tournament),
            _ => Err(CarveError::UnknownScheduler(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_parse_and_build() {
        assert_eq!("RR".parse::<SchedulerKind>(), Ok(SchedulerKind::RoundRobin));
        assert_eq!(
            "tournament".parse::<SchedulerKind>(),
            Ok(SchedulerKind::Tournament)
        );
        assert_eq!(
            "lottery".parse::<SchedulerKind>(),
            Err(CarveError::UnknownScheduler("lottery".to_owned()))
        );

        let entropy = Entropy::seeded(0);
        assert_eq!(SchedulerKind::Tournament.build(&entropy).name(), "tournament");
        assert_eq!(SchedulerKind::default().build(&entropy).name(), "round-robin");
    }

    #[test]
    fn every_scheduler_rejects_zero_weight() {
        let entropy = Entropy::seeded(0);
        for kind in [SchedulerKind::RoundRobin, SchedulerKind::Tournament] {
            let mut scheduler = kind.build(&entropy);
            assert_eq!(
                scheduler.add(3, 0),
                Err(CarveError::InvalidWeight { task: 3, weight: 0 })
            );
            assert!(scheduler.is_empty());
        }
    }
}
