//! Process model.
//!
//! A process is one schedulable unit of CPU work. The crate separates the
//! immutable descriptor supplied by the caller ([`ProcessSpec`]) from the
//! mutable state a single simulation run evolves ([`Process`]).
//!
//! # Ownership
//! Every scheduler copies its input into a private [`ProcessTable`]. The
//! table assigns each process a stable index at copy time; all auxiliary
//! bookkeeping (wait counters, queue membership, preemption targets) keys
//! on that index, so two runs never observe each other's mutations.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Quantum assumed for descriptors that omit one.
pub const DEFAULT_QUANTUM: i64 = 4;

fn default_quantum() -> i64 {
    DEFAULT_QUANTUM
}

/// Descriptor of a process to be simulated.
///
/// # Time Representation
/// All times are integer simulation units relative to t=0.
///
/// # Priority Convention
/// **Lower value = more urgent.**
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    /// Unique process name.
    pub name: String,
    /// Time at which the process becomes eligible (>= 0).
    pub arrival: i64,
    /// Total CPU units required (> 0).
    pub burst: i64,
    /// Initial priority (lower = more urgent).
    #[serde(default)]
    pub priority: i32,
    /// Initial quantum. Only the AG scheduler reads it.
    #[serde(default = "default_quantum")]
    pub quantum: i64,
}

impl ProcessSpec {
    /// Creates a descriptor with priority 0 and the default quantum.
    pub fn new(name: impl Into<String>, arrival: i64, burst: i64) -> Self {
        Self {
            name: name.into(),
            arrival,
            burst,
            priority: 0,
            quantum: DEFAULT_QUANTUM,
        }
    }

    /// Sets the initial priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the initial AG quantum.
    pub fn with_quantum(mut self, quantum: i64) -> Self {
        self.quantum = quantum;
        self
    }
}

/// Mutable simulation state of one process within one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    /// Process name (copied from the descriptor).
    pub name: String,
    /// Arrival time.
    pub arrival: i64,
    /// Total CPU units required.
    pub burst: i64,
    /// CPU units still required. Never negative.
    pub remaining: i64,
    /// Current priority; aging may lower it.
    pub priority: i32,
    /// Current quantum; AG requeue rules grow it.
    pub quantum: i64,
    /// Time at which `remaining` first reached 0.
    pub completion_time: Option<i64>,
    /// Quantum values in chronological order (AG only).
    pub quantum_history: Vec<i64>,
}

impl Process {
    /// Creates the initial run state from a descriptor.
    pub fn from_spec(spec: ProcessSpec) -> Self {
        Self {
            remaining: spec.burst,
            arrival: spec.arrival,
            burst: spec.burst,
            priority: spec.priority,
            quantum: spec.quantum,
            name: spec.name,
            completion_time: None,
            quantum_history: Vec::new(),
        }
    }

    /// Whether the process has arrived by `now` and still needs CPU.
    #[inline]
    pub fn is_ready(&self, now: i64) -> bool {
        self.arrival <= now && self.remaining > 0
    }

    /// Whether the process has consumed its entire burst.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }

    /// Consumes `units` of CPU, the slice ending at `end_time`.
    ///
    /// Records the completion time when the remaining work reaches 0 and
    /// returns `true` in that case.
    pub fn execute(&mut self, units: i64, end_time: i64) -> bool {
        debug_assert!(units <= self.remaining, "{} over-executed", self.name);
        self.remaining -= units;
        if self.remaining == 0 && self.completion_time.is_none() {
            self.completion_time = Some(end_time);
            return true;
        }
        false
    }
}

/// Per-run arena of processes, indexed by insertion order.
#[derive(Debug, Clone, Default)]
pub struct ProcessTable {
    processes: Vec<Process>,
}

impl ProcessTable {
    /// Builds a private copy of the given descriptors.
    pub fn new(specs: Vec<ProcessSpec>) -> Self {
        Self {
            processes: specs.into_iter().map(Process::from_spec).collect(),
        }
    }

    /// Number of processes.
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    /// Whether the table holds no processes.
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Iterates processes in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Process> {
        self.processes.iter()
    }

    /// Iterates processes mutably in insertion order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Process> {
        self.processes.iter_mut()
    }

    /// Indices of processes ready at `now`, in insertion order.
    pub fn ready_at(&self, now: i64) -> impl Iterator<Item = usize> + '_ {
        self.processes
            .iter()
            .enumerate()
            .filter(move |(_, p)| p.is_ready(now))
            .map(|(idx, _)| idx)
    }

    /// Indices sorted by arrival time. Stable: equal arrivals keep
    /// insertion order.
    pub fn arrival_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.processes.len()).collect();
        order.sort_by_key(|&idx| self.processes[idx].arrival);
        order
    }
}

impl Index<usize> for ProcessTable {
    type Output = Process;

    fn index(&self, idx: usize) -> &Process {
        &self.processes[idx]
    }
}

impl IndexMut<usize> for ProcessTable {
    fn index_mut(&mut self, idx: usize) -> &mut Process {
        &mut self.processes[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_builder() {
        let spec = ProcessSpec::new("P1", 3, 7).with_priority(2).with_quantum(5);
        assert_eq!(spec.name, "P1");
        assert_eq!(spec.arrival, 3);
        assert_eq!(spec.burst, 7);
        assert_eq!(spec.priority, 2);
        assert_eq!(spec.quantum, 5);
    }

    #[test]
    fn test_spec_deserialize_defaults() {
        let spec: ProcessSpec =
            serde_json::from_str(r#"{"name":"P1","arrival":0,"burst":3}"#).unwrap();
        assert_eq!(spec.priority, 0);
        assert_eq!(spec.quantum, DEFAULT_QUANTUM);
    }

    #[test]
    fn test_execute_records_completion_once() {
        let mut p = Process::from_spec(ProcessSpec::new("P1", 0, 3));
        assert!(!p.execute(2, 2));
        assert_eq!(p.remaining, 1);
        assert_eq!(p.completion_time, None);

        assert!(p.execute(1, 5));
        assert!(p.is_finished());
        assert_eq!(p.completion_time, Some(5));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "P1 over-executed")]
    fn test_execute_beyond_remaining_panics() {
        let mut p = Process::from_spec(ProcessSpec::new("P1", 0, 2));
        p.execute(3, 3);
    }

    #[test]
    fn test_is_ready() {
        let p = Process::from_spec(ProcessSpec::new("P1", 4, 1));
        assert!(!p.is_ready(3));
        assert!(p.is_ready(4));
        assert!(p.is_ready(10));
    }

    #[test]
    fn test_table_arrival_order_is_stable() {
        let table = ProcessTable::new(vec![
            ProcessSpec::new("late", 5, 1),
            ProcessSpec::new("first", 0, 1),
            ProcessSpec::new("second", 0, 1),
        ]);
        assert_eq!(table.arrival_order(), vec![1, 2, 0]);
    }

    #[test]
    fn test_table_ready_at() {
        let mut table = ProcessTable::new(vec![
            ProcessSpec::new("A", 0, 1),
            ProcessSpec::new("B", 2, 1),
            ProcessSpec::new("C", 1, 1),
        ]);
        assert_eq!(table.ready_at(1).collect::<Vec<_>>(), vec![0, 2]);

        table[0].execute(1, 1);
        assert_eq!(table.ready_at(2).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_table_copies_are_independent() {
        let specs = vec![ProcessSpec::new("A", 0, 2)];
        let mut first = ProcessTable::new(specs.clone());
        let second = ProcessTable::new(specs);
        first[0].execute(2, 2);
        assert_eq!(second[0].remaining, 2);
    }
}
