//! `MedianQueue` — middle in, first out.
//!
//! Waiting packets are split between a deque (the newer half, oldest at its
//! head) and a stack (the older half, newest on top). The split keeps
//! `|stack| <= |deque| <= |stack| + 1`, so the deque head is always the
//! median of the arrival order.

use super::Discipline;
use crate::error::Result;
use std::collections::VecDeque;

/// Middle-in/first-out discipline.
#[derive(Debug, Clone)]
pub struct MedianQueue<T> {
    deque: VecDeque<T>,
    stack: Vec<T>,
}

impl<T> MedianQueue<T> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            deque: VecDeque::new(),
            stack: Vec::new(),
        }
    }

    /// Returns `true` if the length bound between the halves holds.
    pub fn is_balanced(&self) -> bool {
        let (d, s) = (self.deque.len(), self.stack.len());
        s <= d && d <= s + 1
    }
}

impl<T> Default for MedianQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: core::fmt::Debug> Discipline<T> for MedianQueue<T> {
    fn name(&self) -> &'static str {
        "median"
    }

    fn push(&mut self, item: T, _priority: Option<f64>) -> Result<()> {
        self.deque.push_back(item);
        if self.deque.len() > self.stack.len() + 1 {
            if let Some(head) = self.deque.pop_front() {
                self.stack.push(head);
            }
        }
        debug_assert!(self.is_balanced());
        Ok(())
    }

    fn pop(&mut self) -> Option<T> {
        let item = self.deque.pop_front()?;
        if self.deque.len() < self.stack.len() {
            if let Some(top) = self.stack.pop() {
                self.deque.push_front(top);
            }
        }
        debug_assert!(self.is_balanced());
        Some(item)
    }

    fn peek(&mut self) -> Option<&T> {
        self.deque.front()
    }

    fn len(&self) -> usize {
        self.deque.len() + self.stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaves_from_the_middle() {
        let mut queue = MedianQueue::new();
        for i in 1..=5 {
            queue.push(i, None).unwrap();
            assert!(queue.is_balanced());
        }
        // halves: stack [1, 2], deque [3, 4, 5]
        assert_eq!(queue.peek(), Some(&3));
        assert_eq!(queue.pop(), Some(3));
        // stack [1, 2], deque [4, 5]
        assert_eq!(queue.pop(), Some(4));
        // deque fell below the stack: 2 moves back, stack [1], deque [2, 5]
        assert_eq!(queue.pop(), Some(2));
        assert_eq!(queue.pop(), Some(5));
        assert_eq!(queue.pop(), Some(1));
        assert_eq!(queue.pop(), None);
        assert!(queue.is_balanced());
    }
}
