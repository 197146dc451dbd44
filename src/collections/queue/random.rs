//! `RandomQueue` — removes a uniformly chosen waiting packet.
//!
//! Storage is a plain vector; removal swaps the chosen slot with the last one,
//! so every operation is \(O(1)\). A `peek` commits to its pick until the next
//! push or pop, so `peek` followed by `pop_peeked` removes what was shown.

use super::Discipline;
use crate::error::Result;
use crate::rng::Entropy;

/// Uniformly random removal order.
#[derive(Debug, Clone)]
pub struct RandomQueue<T> {
    items: Vec<T>,
    picked: Option<usize>,
    entropy: Entropy,
}

impl<T> RandomQueue<T> {
    /// Creates an empty queue drawing from `entropy`.
    pub fn new(entropy: Entropy) -> Self {
        Self {
            items: Vec::new(),
            picked: None,
            entropy,
        }
    }

    fn pick(&mut self) -> Option<usize> {
        if self.items.is_empty() {
            return None;
        }
        let index = match self.picked {
            Some(index) => index,
            None => self.entropy.below(self.items.len()),
        };
        self.picked = Some(index);
        Some(index)
    }
}

impl<T: core::fmt::Debug> Discipline<T> for RandomQueue<T> {
    fn name(&self) -> &'static str {
        "random"
    }

    fn push(&mut self, item: T, _priority: Option<f64>) -> Result<()> {
        self.items.push(item);
        self.picked = None;
        Ok(())
    }

    fn pop(&mut self) -> Option<T> {
        self.picked = None;
        let index = self.pick()?;
        self.picked = None;
        Some(self.items.swap_remove(index))
    }

    fn peek(&mut self) -> Option<&T> {
        let index = self.pick()?;
        self.items.get(index)
    }

    fn pop_peeked(&mut self) -> Option<T> {
        let index = self.pick()?;
        self.picked = None;
        Some(self.items.swap_remove(index))
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_every_packet_once() {
        let mut queue = RandomQueue::new(Entropy::seeded(9));
        for i in 0..50 {
            queue.push(i, None).unwrap();
        }
        let mut out = Vec::new();
        while let Some(x) = queue.pop() {
            out.push(x);
        }
        assert_ne!(out, (0..50).collect::<Vec<_>>());
        out.sort_unstable();
        assert_eq!(out, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn peek_commits_to_its_pick() {
        let mut queue = RandomQueue::new(Entropy::seeded(2));
        for i in 0..20 {
            queue.push(i, None).unwrap();
        }
        let shown = *queue.peek().unwrap();
        assert_eq!(queue.peek(), Some(&shown));
        assert_eq!(queue.pop_peeked(), Some(shown));
        assert_eq!(queue.len(), 19);
    }
}
