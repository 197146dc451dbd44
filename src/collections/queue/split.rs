//! Stack/queue hybrids with a target length `T`.
//!
//! - [`SplitQueue`]: arrivals wait in a deque; before each departure the stack
//!   is topped up to `T` from the deque head, and the stack top leaves.
//!   `T = 1` is a plain FIFO queue, `T >= n` a plain stack.
//! - [`SplitStack`]: arrivals land on a stack, whose top migrates into a
//!   deque of up to `T` packets; departures leave from the deque head.
//!   `T >= n` is a plain FIFO queue.

use super::Discipline;
use crate::error::Result;
use std::collections::VecDeque;

/// A stack fed from the head of an overflow deque.
#[derive(Debug, Clone)]
pub struct SplitQueue<T> {
    target: usize,
    stack: Vec<T>,
    deque: VecDeque<T>,
}

impl<T> SplitQueue<T> {
    /// Creates an empty queue. A `target` of zero is treated as one.
    pub fn new(target: usize) -> Self {
        Self {
            target: target.max(1),
            stack: Vec::new(),
            deque: VecDeque::new(),
        }
    }

    /// Target stack length.
    pub fn target(&self) -> usize {
        self.target
    }

    fn refill(&mut self) {
        while self.stack.len() < self.target {
            match self.deque.pop_front() {
                Some(item) => self.stack.push(item),
                None => break,
            }
        }
    }
}

impl<T: core::fmt::Debug> Discipline<T> for SplitQueue<T> {
    fn name(&self) -> &'static str {
        "split-queue"
    }

    fn push(&mut self, item: T, _priority: Option<f64>) -> Result<()> {
        self.deque.push_back(item);
        Ok(())
    }

    fn pop(&mut self) -> Option<T> {
        self.refill();
        self.stack.pop()
    }

    fn peek(&mut self) -> Option<&T> {
        self.refill();
        self.stack.last()
    }

    fn len(&self) -> usize {
        self.stack.len() + self.deque.len()
    }
}

/// A deque of up to `T` packets fed from the top of an arrival stack.
#[derive(Debug, Clone)]
pub struct SplitStack<T> {
    target: usize,
    stack: Vec<T>,
    deque: VecDeque<T>,
}

impl<T> SplitStack<T> {
    /// Creates an empty queue. A `target` of zero is treated as one.
    pub fn new(target: usize) -> Self {
        Self {
            target: target.max(1),
            stack: Vec::new(),
            deque: VecDeque::new(),
        }
    }

    /// Target deque length.
    pub fn target(&self) -> usize {
        self.target
    }

    fn settle(&mut self) {
        while self.deque.len() < self.target {
            match self.stack.pop() {
                Some(item) => self.deque.push_back(item),
                None => break,
            }
        }
    }
}

impl<T: core::fmt::Debug> Discipline<T> for SplitStack<T> {
    fn name(&self) -> &'static str {
        "split-stack"
    }

    fn push(&mut self, item: T, _priority: Option<f64>) -> Result<()> {
        self.stack.push(item);
        self.settle();
        Ok(())
    }

    fn pop(&mut self) -> Option<T> {
        let item = self.deque.pop_front()?;
        self.settle();
        Some(item)
    }

    fn peek(&mut self) -> Option<&T> {
        self.deque.front()
    }

    fn len(&self) -> usize {
        self.stack.len() + self.deque.len()
    }
}
