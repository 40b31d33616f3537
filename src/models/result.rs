//! Scheduler result (run output) model.
//!
//! A result collects the execution trace and the timing metrics of one
//! scheduling run. The serialized shape matches the fixture format, so a
//! result can be compared field by field against an expected one.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Output of one scheduling run.
///
/// Created empty when a run starts, extended with execution-order entries
/// while simulating, and completed by the metrics step before it is
/// returned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulerResult {
    /// Process names in the order their Gantt segments begin.
    pub execution_order: Vec<String>,
    /// Final waiting time per process.
    pub waiting_times: HashMap<String, i64>,
    /// Final turnaround time per process.
    pub turnaround_times: HashMap<String, i64>,
    /// Mean waiting time over all processes.
    pub average_waiting_time: f64,
    /// Mean turnaround time over all processes.
    pub average_turnaround_time: f64,
    /// Quantum history per process (AG only).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub quantum_history: HashMap<String, Vec<i64>>,
}

impl SchedulerResult {
    /// Creates an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a segment to the execution order.
    pub fn push_segment(&mut self, name: impl Into<String>) {
        self.execution_order.push(name.into());
    }

    /// Number of Gantt segments.
    pub fn segment_count(&self) -> usize {
        self.execution_order.len()
    }

    /// Number of processes with recorded metrics.
    pub fn process_count(&self) -> usize {
        self.turnaround_times.len()
    }

    /// Sum of all waiting times.
    pub fn total_waiting_time(&self) -> i64 {
        self.waiting_times.values().sum()
    }

    /// Sum of all turnaround times.
    pub fn total_turnaround_time(&self) -> i64 {
        self.turnaround_times.values().sum()
    }
}
