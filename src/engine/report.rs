//! Named counters and the fixed-format statistics report.

use crate::collections::QueueSummary;
use core::fmt;
use serde::Serialize;

/// One named counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Counter {
    /// Counter name.
    pub name: String,
    /// Current value.
    pub value: i64,
}

/// Insertion-ordered named counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Counters {
    entries: Vec<Counter>,
}

impl Counters {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `by` to `name`, creating it at zero first if needed.
    pub fn add(&mut self, name: &str, by: i64) {
        match self.entries.iter_mut().find(|c| c.name == name) {
            Some(counter) => counter.value += by,
            None => self.entries.push(Counter {
                name: name.to_owned(),
                value: by,
            }),
        }
    }

    /// Adds one to `name`.
    pub fn bump(&mut self, name: &str) {
        self.add(name, 1);
    }

    /// Overwrites `name`.
    pub fn set(&mut self, name: &str, value: i64) {
        match self.entries.iter_mut().find(|c| c.name == name) {
            Some(counter) => counter.value = value,
            None => self.entries.push(Counter {
                name: name.to_owned(),
                value,
            }),
        }
    }

    /// Current value of `name`; unknown counters read as zero.
    pub fn get(&self, name: &str) -> i64 {
        self.entries
            .iter()
            .find(|c| c.name == name)
            .map_or(0, |c| c.value)
    }

    /// Counters in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Counter> {
        self.entries.iter()
    }
}

/// Terminal statistics of one run.
///
/// `Display` renders two right-aligned columns; `to_json` renders the same
/// data for downstream tooling.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Algorithm name.
    pub algorithm: String,
    /// Run counters.
    pub counters: Counters,
    /// Queue usage, one entry per queue the algorithm owned.
    pub queues: Vec<QueueSummary>,
}

impl Report {
    /// An empty report for `algorithm`.
    pub fn new(algorithm: &str) -> Self {
        Self {
            algorithm: algorithm.to_owned(),
            counters: Counters::new(),
            queues: Vec::new(),
        }
    }

    /// Appends a queue summary.
    pub fn push_queue(&mut self, summary: QueueSummary) {
        self.queues.push(summary);
    }

    /// Value of a counter; unknown counters read as zero.
    pub fn get(&self, name: &str) -> i64 {
        self.counters.get(name)
    }

    /// JSON rendering.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>30}  (statistics)", self.algorithm)?;
        for counter in self.counters.iter() {
            writeln!(f, "{:>30}  {:>10}", counter.name, counter.value)?;
        }
        for queue in &self.queues {
            writeln!(f, "{:>30}  {:>10}", "queue", queue.discipline)?;
            writeln!(f, "{:>30}  {:>10}", "entries", queue.entries)?;
            writeln!(f, "{:>30}  {:>10}", "exits", queue.exits)?;
            writeln!(f, "{:>30}  {:>10}", "samples", queue.samples)?;
            writeln!(f, "{:>30}  {:>10.3}", "mean length", queue.mean_len)?;
            writeln!(f, "{:>30}  {:>10.3}", "std deviation", queue.std_dev)?;
            writeln!(f, "{:>30}  {:>10}", "maximum length", queue.max_len)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::QueueStats;

    #[test]
    fn counters_keep_creation_order() {
        let mut counters = Counters::new();
        counters.bump("visits");
        counters.set("cells", 4);
        counters.add("visits", 2);
        let names: Vec<_> = counters.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["visits", "cells"]);
        assert_eq!(counters.get("visits"), 3);
        assert_eq!(counters.get("missing"), 0);
    }

    #[test]
    fn display_and_json() {
        let mut report = Report::new("Kruskal");
        report.counters.set("passages", 3);
        report.push_queue(QueueStats::new().summary("priority"));

        let text = report.to_string();
        assert!(text.lines().next().unwrap().ends_with("Kruskal  (statistics)"));
        assert!(text.contains("passages"));
        assert!(text.contains("maximum length"));

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["algorithm"], "Kruskal");
        assert_eq!(json["counters"][0]["name"], "passages");
        assert_eq!(json["queues"][0]["discipline"], "priority");
    }
}
