//! Borůvka's algorithm.
//!
//! Each visit is one round: every component picks its cheapest outgoing
//! edge, all picked edges are carved at once, and edges that no longer cross
//! components are dropped. Rounds at least halve the component count, so a
//! connected grid finishes in \(O(\log V)\) visits.
//!
//! Weights are `(value, sequence)` pairs. The value comes from the priority
//! table when an edge has one and from the shared random source otherwise;
//! the sequence number makes every weight distinct, which is what keeps the
//! picked edges free of circuits.

use super::priority::Priorities;
use crate::collections::{ComponentId, ComponentRegistry};
use crate::engine::{Algorithm, Report, Run};
use crate::error::{CarveError, Result};
use crate::graph::{Cell, Edge, Maze};
use crate::rng::Entropy;
use core::cmp::Ordering;
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};

/// Borůvka options.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BoruvkaOptions {
    /// Fail on a circuit instead of tallying it.
    pub verify: bool,
    /// Edge weights; unlisted edges get random weights.
    #[serde(skip)]
    pub priorities: Priorities,
}

impl Default for BoruvkaOptions {
    fn default() -> Self {
        Self {
            verify: true,
            priorities: Priorities::new(),
        }
    }
}

/// Totally ordered edge weight.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Weight {
    value: f64,
    seq: usize,
}

impl Weight {
    fn compare(&self, other: &Self) -> Ordering {
        self.value
            .total_cmp(&other.value)
            .then(self.seq.cmp(&other.seq))
    }
}

/// Borůvka state and result fields.
#[derive(Debug)]
pub struct Boruvka {
    verify: bool,
    priorities: Priorities,
    registry: ComponentRegistry<Cell>,
    candidates: Vec<(Edge, Weight)>,
    rounds: usize,
    circuits: usize,
    last_circuit: Option<Edge>,
}

impl Boruvka {
    /// Rounds completed.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Circuits tallied with `verify` off.
    pub fn circuits(&self) -> usize {
        self.circuits
    }

    /// Most recent circuit-closing edge, if any.
    pub fn last_circuit(&self) -> Option<Edge> {
        self.last_circuit
    }

    /// Components remaining.
    pub fn components(&self) -> usize {
        self.registry.len()
    }

    /// Cheapest candidate per component, in candidate order.
    fn select(&self) -> Result<Vec<Edge>> {
        let mut cheapest: HashMap<ComponentId, usize> = HashMap::new();
        for (index, (edge, weight)) in self.candidates.iter().enumerate() {
            let (a, b) = edge.endpoints();
            for component in [self.registry.component_for(&a)?, self.registry.component_for(&b)?] {
                let best = cheapest.entry(component).or_insert(index);
                if weight.compare(&self.candidates[*best].1) == Ordering::Less {
                    *best = index;
                }
            }
        }
        let picked: BTreeSet<usize> = cheapest.into_values().collect();
        Ok(picked.into_iter().map(|i| self.candidates[i].0).collect())
    }

    /// Carves the selected edges, handling any that would close a circuit.
    fn carve_selected(&mut self, run: &mut Run, selected: &[Edge]) -> Result<()> {
        for &edge in selected {
            let (a, b) = edge.endpoints();
            if self.registry.are_connected(a, b) {
                if self.verify {
                    return Err(CarveError::Circuit(edge));
                }
                self.circuits += 1;
                self.last_circuit = Some(edge);
                tracing::warn!(%edge, "circuit tallied");
                continue;
            }
            run.carve(a, b)?;
            self.registry.join(a, b)?;
        }
        Ok(())
    }
}

impl Algorithm for Boruvka {
    type Options = BoruvkaOptions;
    const NAME: &'static str = "Borůvka";

    fn parse_args(_maze: &Maze, options: BoruvkaOptions, _entropy: &Entropy) -> Result<Self> {
        options.priorities.validate()?;
        Ok(Self {
            verify: options.verify,
            priorities: options.priorities,
            registry: ComponentRegistry::new(),
            candidates: Vec::new(),
            rounds: 0,
            circuits: 0,
            last_circuit: None,
        })
    }

    fn initialize(&mut self, run: &mut Run) -> Result<()> {
        for cell in 0..run.maze().len() {
            self.registry.register(cell);
        }
        for edge in run.maze().passages() {
            let (a, b) = edge.endpoints();
            self.registry.join(a, b)?;
        }
        Ok(())
    }

    fn configure(&mut self, run: &mut Run) -> Result<()> {
        for (seq, edge) in run.maze().grid().edges().into_iter().enumerate() {
            let (a, b) = edge.endpoints();
            if self.registry.are_connected(a, b) {
                continue;
            }
            let value = self
                .priorities
                .for_edge(edge)
                .unwrap_or_else(|| run.entropy().uniform());
            self.candidates.push((edge, Weight { value, seq }));
        }
        tracing::debug!(candidates = self.candidates.len(), "weights assigned");
        Ok(())
    }

    fn visit(&mut self, run: &mut Run) -> Result<()> {
        let selected = self.select()?;
        self.carve_selected(run, &selected)?;
        let registry = &mut self.registry;
        self.candidates.retain(|(edge, _)| {
            let (a, b) = edge.endpoints();
            !registry.are_connected(a, b)
        });
        self.rounds += 1;
        tracing::trace!(
            round = self.rounds,
            components = self.registry.len(),
            "round complete"
        );
        Ok(())
    }

    fn more(&self, _run: &Run) -> bool {
        !self.candidates.is_empty()
    }

    fn report(&self, report: &mut Report) {
        report.counters.set("rounds", self.rounds as i64);
        report.counters.set("components", self.registry.len() as i64);
        report.counters.set("circuits", self.circuits as i64);
    }
}
