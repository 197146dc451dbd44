//! Weighted random selection over lazily rebuilt cumulative weights.

use super::{check_weight, Scheduler, TaskId};
use crate::error::Result;
use crate::rng::Entropy;

/// Draws each turn's task with probability proportional to its weight.
///
/// The cumulative weight table is rebuilt on the first draw after any
/// `add` or `remove`; draws in between are a binary search.
#[derive(Debug, Clone)]
pub struct Tournament {
    tasks: Vec<(TaskId, u32)>,
    cumulative: Vec<u64>,
    dirty: bool,
    entropy: Entropy,
}

impl Tournament {
    /// An empty tournament drawing from `entropy`.
    pub fn new(entropy: Entropy) -> Self {
        Self {
            tasks: Vec::new(),
            cumulative: Vec::new(),
            dirty: false,
            entropy,
        }
    }

    /// Weight of `task`, if scheduled.
    pub fn weight(&self, task: TaskId) -> Option<u32> {
        self.tasks
            .iter()
            .find(|&&(id, _)| id == task)
            .map(|&(_, weight)| weight)
    }

    /// Sum of all weights.
    pub fn total_weight(&self) -> u64 {
        self.tasks.iter().map(|&(_, w)| u64::from(w)).sum()
    }

    fn rebuild(&mut self) {
        self.cumulative.clear();
        let mut running = 0u64;
        for &(_, weight) in &self.tasks {
            running += u64::from(weight);
            self.cumulative.push(running);
        }
        self.dirty = false;
    }
}

impl Scheduler for Tournament {
    fn name(&self) -> &'static str {
        "tournament"
    }

    fn add(&mut self, task: TaskId, weight: u32) -> Result<()> {
        check_weight(task, weight)?;
        match self.tasks.iter_mut().find(|(id, _)| *id == task) {
            Some(entry) => entry.1 = weight,
            None => self.tasks.push((task, weight)),
        }
        self.dirty = true;
        Ok(())
    }

    fn remove(&mut self, task: TaskId) -> bool {
        match self.tasks.iter().position(|&(id, _)| id == task) {
            Some(index) => {
                self.tasks.remove(index);
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    fn next_task(&mut self) -> Option<TaskId> {
        if self.tasks.is_empty() {
            return None;
        }
        if self.dirty {
            self.rebuild();
        }
        let total = *self.cumulative.last()?;
        // Truncation keeps the draw below `total`; the clamp covers uniform() == 1.0 rounding.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let draw = ((self.entropy.uniform() * total as f64) as u64).min(total - 1);
        let index = self.cumulative.partition_point(|&c| c <= draw);
        self.tasks.get(index).map(|&(id, _)| id)
    }

    fn contains(&self, task: TaskId) -> bool {
        self.tasks.iter().any(|&(id, _)| id == task)
    }

    fn len(&self) -> usize {
        self.tasks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn draws_follow_weights() {
        let mut tournament = Tournament::new(Entropy::seeded(11));
        tournament.add(0, 1).unwrap();
        tournament.add(1, 3).unwrap();

        let mut counts: HashMap<TaskId, usize> = HashMap::new();
        for _ in 0..4000 {
            *counts.entry(tournament.next_task().unwrap()).or_default() += 1;
        }
        let heavy = counts[&1] as f64 / 4000.0;
        assert!((0.70..0.80).contains(&heavy), "heavy share {heavy}");
    }

    #[test]
    fn removed_tasks_are_never_drawn() {
        let mut tournament = Tournament::new(Entropy::seeded(2));
        for task in 0..4 {
            tournament.add(task, 2).unwrap();
        }
        assert!(tournament.remove(2));
        assert!(!tournament.remove(2));
        assert_eq!(tournament.total_weight(), 6);
        for _ in 0..200 {
            assert_ne!(tournament.next_task(), Some(2));
        }
        for task in [0, 1, 3] {
            tournament.remove(task);
        }
        assert_eq!(tournament.next_task(), None);
    }

    #[test]
    fn re_adding_updates_the_weight() {
        let mut tournament = Tournament::new(Entropy::seeded(0));
        tournament.add(5, 1).unwrap();
        tournament.add(5, 9).unwrap();
        assert_eq!(tournament.len(), 1);
        assert_eq!(tournament.weight(5), Some(9));
        assert_eq!(tournament.next_task(), Some(5));
    }
}
