//! Deterministic rotation with tombstoned removal.

use super::{check_weight, Scheduler, TaskId};
use crate::error::Result;
use std::collections::HashMap;

/// Hands out tasks in insertion order, wrapping around.
///
/// Removal leaves a tombstone so the rotation keeps its place; once
/// tombstones outnumber live tasks the slot list is compacted and the cursor
/// re-pointed at the same next task.
#[derive(Debug, Clone, Default)]
pub struct RoundRobin {
    slots: Vec<Option<TaskId>>,
    index: HashMap<TaskId, usize>,
    cursor: usize,
}

impl RoundRobin {
    /// An empty rotation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Live tasks in rotation order, starting from slot zero.
    pub fn tasks(&self) -> impl Iterator<Item = TaskId> + '_ {
        self.slots.iter().flatten().copied()
    }

    fn compact(&mut self) {
        let before_cursor = self.slots[..self.cursor.min(self.slots.len())]
            .iter()
            .filter(|slot| slot.is_some())
            .count();
        self.slots.retain(Option::is_some);
        self.index.clear();
        for (position, slot) in self.slots.iter().enumerate() {
            if let Some(task) = *slot {
                self.index.insert(task, position);
            }
        }
        self.cursor = before_cursor;
    }
}

impl Scheduler for RoundRobin {
    fn name(&self) -> &'static str {
        "round-robin"
    }

    /// Weights are validated and otherwise ignored. Re-adding is a no-op.
    fn add(&mut self, task: TaskId, weight: u32) -> Result<()> {
        check_weight(task, weight)?;
        if !self.index.contains_key(&task) {
            self.index.insert(task, self.slots.len());
            self.slots.push(Some(task));
        }
        Ok(())
    }

    fn remove(&mut self, task: TaskId) -> bool {
        let Some(position) = self.index.remove(&task) else {
            return false;
        };
        self.slots[position] = None;
        if self.index.is_empty() {
            self.slots.clear();
            self.cursor = 0;
        } else if self.slots.len() > 2 * self.index.len() {
            self.compact();
        }
        true
    }

    fn next_task(&mut self) -> Option<TaskId> {
        if self.index.is_empty() {
            return None;
        }
        loop {
            if self.cursor >= self.slots.len() {
                self.cursor = 0;
            }
            let slot = self.slots[self.cursor];
            self.cursor += 1;
            if slot.is_some() {
                return slot;
            }
        }
    }

    fn contains(&self, task: TaskId) -> bool {
        self.index.contains_key(&task)
    }

    fn len(&self) -> usize {
        self.index.len()
    }
}
