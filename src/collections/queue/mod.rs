//! Queue disciplines: interchangeable removal-order policies.
//!
//! Every discipline sits behind one [`Queue`] front end offering `enter`,
//! `leave`, `top` and `discard`, and every front end keeps [`QueueStats`].
//!
//! | Discipline | Leaves first | Per-op cost |
//! |------------|--------------|-------------|
//! | [`Stack`] | most recent | \(O(1)\) |
//! | [`Fifo`] | least recent | \(O(1)\) |
//! | [`PriorityQueue`] | lowest (priority, tie-break) | \(O(\log n)\) |
//! | [`RandomQueue`] | uniformly chosen | \(O(1)\) |
//! | [`MedianQueue`] | middle of the arrival order | \(O(1)\) |
//! | [`SplitQueue`] | stack over the `T` oldest | \(O(1)\) amortized |
//! | [`SplitStack`] | queue of `T` fed by a stack | \(O(1)\) amortized |

mod basic;
mod median;
mod priority;
mod random;
mod split;
mod stats;

pub use basic::{Fifo, Stack};
pub use median::MedianQueue;
pub use priority::{Lookup, PriorityQueue, TieBreak};
pub use random::RandomQueue;
pub use split::{SplitQueue, SplitStack};
pub use stats::{QueueStats, QueueSummary};

use crate::error::{CarveError, Result};
use crate::rng::Entropy;
use core::fmt;
use core::hash::Hash;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// Anything that can travel through a queue.
pub trait Packet: Clone + Eq + Hash + fmt::Debug {}

impl<T: Clone + Eq + Hash + fmt::Debug> Packet for T {}

/// The storage side of a queue: where packets wait and which one leaves next.
///
/// `peek` takes `&mut self` so a discipline may settle its internal layout (or
/// commit to a random pick) before answering. `pop_peeked` must remove exactly
/// the packet the preceding `peek` returned.
pub trait Discipline<T>: fmt::Debug {
    /// Short discipline name used in reports.
    fn name(&self) -> &'static str;

    /// Adds a packet. `priority` is meaningful only to priority disciplines.
    fn push(&mut self, item: T, priority: Option<f64>) -> Result<()>;

    /// Removes the next packet.
    fn pop(&mut self) -> Option<T>;

    /// Returns the next packet without removing it.
    fn peek(&mut self) -> Option<&T>;

    /// Removes the packet returned by the last `peek`.
    fn pop_peeked(&mut self) -> Option<T> {
        self.pop()
    }

    /// Number of waiting packets.
    fn len(&self) -> usize;

    /// Returns `true` if nothing is waiting.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Which discipline a [`Queue`] should use.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum DisciplineKind {
    /// Last in, first out.
    #[default]
    Stack,
    /// First in, first out.
    Queue,
    /// Binary heap keyed by (priority, tie-break).
    Priority {
        /// Ordering among equal priorities.
        #[serde(default)]
        tiebreak: TieBreak,
        /// Memoize a random priority per packet when no other source applies.
        #[serde(default = "default_cache")]
        cache: bool,
    },
    /// Uniformly random removal.
    Random,
    /// Middle-in, first-out.
    Median,
    /// Stack over the `target` oldest arrivals.
    SplitQueue {
        /// Target stack length.
        target: usize,
    },
    /// Queue of length `target` refilled from a stack.
    SplitStack {
        /// Target deque length.
        target: usize,
    },
}

fn default_cache() -> bool {
    true
}

impl DisciplineKind {
    /// A stable-order priority queue with random-priority caching enabled.
    pub fn priority() -> Self {
        DisciplineKind::Priority {
            tiebreak: TieBreak::Stable,
            cache: true,
        }
    }

    /// Fails on parameters no queue can honor.
    pub fn validate(&self) -> Result<()> {
        match *self {
            DisciplineKind::SplitQueue { target } | DisciplineKind::SplitStack { target }
                if target == 0 =>
            {
                Err(CarveError::InvalidTarget(target))
            }
            _ => Ok(()),
        }
    }
}

impl FromStr for DisciplineKind {
    type Err = CarveError;

    /// Parses names such as `stack`, `fifo`, `priority:antistable`,
    /// `random`, `median` or `split-queue:3`.
    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.trim().to_ascii_lowercase();
        let (name, arg) = match lowered.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (lowered.as_str(), None),
        };
        let target = || -> Result<usize> {
            arg.unwrap_or("1")
                .parse()
                .map_err(|_| CarveError::UnknownDiscipline(s.to_owned()))
        };
        let kind = match name {
            "stack" | "lifo" => DisciplineKind::Stack,
            "queue" | "fifo" => DisciplineKind::Queue,
            "priority" | "heap" => DisciplineKind::Priority {
                tiebreak: arg.map_or(Ok(TieBreak::Stable), str::parse)?,
                cache: true,
            },
            "random" => DisciplineKind::Random,
            "median" => DisciplineKind::Median,
            "split-queue" | "splitqueue" => DisciplineKind::SplitQueue { target: target()? },
            "split-stack" | "splitstack" => DisciplineKind::SplitStack { target: target()? },
            _ => return Err(CarveError::UnknownDiscipline(s.to_owned())),
        };
        kind.validate()?;
        Ok(kind)
    }
}

/// A queue front end: one discipline plus usage statistics and peek tracking.
///
/// `discard` is only valid directly after `top`; any `enter` or `leave` in
/// between makes the peek stale.
pub struct Queue<T> {
    inner: Box<dyn Discipline<T>>,
    stats: QueueStats,
    fresh_peek: bool,
}

impl<T: Packet + 'static> Queue<T> {
    /// Builds a queue of the given kind.
    pub fn new(kind: &DisciplineKind, entropy: &Entropy) -> Result<Self> {
        Self::build(kind, entropy, None)
    }

    /// Builds a queue whose priority discipline (if any) consults `lookup`.
    pub fn with_lookup(kind: &DisciplineKind, entropy: &Entropy, lookup: Lookup<T>) -> Result<Self> {
        Self::build(kind, entropy, Some(lookup))
    }

    fn build(kind: &DisciplineKind, entropy: &Entropy, lookup: Option<Lookup<T>>) -> Result<Self> {
        kind.validate()?;
        let inner: Box<dyn Discipline<T>> = match *kind {
            DisciplineKind::Stack => Box::new(Stack::new()),
            DisciplineKind::Queue => Box::new(Fifo::new()),
            DisciplineKind::Priority { tiebreak, cache } => {
                let mut heap = PriorityQueue::new(tiebreak, entropy.clone()).with_cache(cache);
                if let Some(lookup) = lookup {
                    heap = heap.with_lookup(lookup);
                }
                Box::new(heap)
            }
            DisciplineKind::Random => Box::new(RandomQueue::new(entropy.clone())),
            DisciplineKind::Median => Box::new(MedianQueue::new()),
            DisciplineKind::SplitQueue { target } => Box::new(SplitQueue::new(target)),
            DisciplineKind::SplitStack { target } => Box::new(SplitStack::new(target)),
        };
        Ok(Self::from_boxed(inner))
    }
}

impl<T> Queue<T> {
    /// Wraps a custom discipline.
    pub fn from_discipline(discipline: impl Discipline<T> + 'static) -> Self {
        Self::from_boxed(Box::new(discipline))
    }

    fn from_boxed(inner: Box<dyn Discipline<T>>) -> Self {
        Self {
            inner,
            stats: QueueStats::new(),
            fresh_peek: false,
        }
    }

    /// Discipline name.
    pub fn name(&self) -> &'static str {
        self.inner.name()
    }

    /// Adds a packet.
    pub fn enter(&mut self, packet: T) -> Result<()> {
        self.enter_with(packet, None)
    }

    /// Adds a packet with an explicit priority.
    pub fn enter_with(&mut self, packet: T, priority: Option<f64>) -> Result<()> {
        self.inner.push(packet, priority)?;
        self.fresh_peek = false;
        self.stats.record_entry(self.inner.len());
        Ok(())
    }

    /// Removes and returns the next packet.
    pub fn leave(&mut self) -> Result<T> {
        let packet = self.inner.pop().ok_or(CarveError::Underflow)?;
        self.fresh_peek = false;
        self.stats.record_exit(self.inner.len());
        Ok(packet)
    }

    /// Returns the next packet without removing it and arms `discard`.
    pub fn top(&mut self) -> Result<&T> {
        let packet = self.inner.peek().ok_or(CarveError::Underflow)?;
        self.fresh_peek = true;
        Ok(packet)
    }

    /// Removes the packet returned by the immediately preceding `top`.
    pub fn discard(&mut self) -> Result<T> {
        if self.inner.is_empty() {
            return Err(CarveError::Underflow);
        }
        if !self.fresh_peek {
            return Err(CarveError::StalePeek);
        }
        let packet = self.inner.pop_peeked().ok_or(CarveError::Underflow)?;
        self.fresh_peek = false;
        self.stats.record_exit(self.inner.len());
        Ok(packet)
    }

    /// Number of waiting packets.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if nothing is waiting.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Usage statistics so far.
    pub fn stats(&self) -> &QueueStats {
        &self.stats
    }

    /// Statistics snapshot labelled with the discipline name.
    pub fn summary(&self) -> QueueSummary {
        self.stats.summary(self.name())
    }
}

impl<T> fmt::Debug for Queue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Queue")
            .field("discipline", &self.name())
            .field("len", &self.len())
            .field("fresh_peek", &self.fresh_peek)
            .finish()
    }
}
