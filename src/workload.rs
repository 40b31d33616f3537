//! Random workload generation.
//!
//! Produces process sets with uniformly drawn arrivals, bursts, priorities
//! and quanta. Generation is driven by a caller-supplied RNG, so a seeded
//! generator reproduces the same workload.

use rand::Rng;
use std::ops::RangeInclusive;

use crate::models::ProcessSpec;

/// Parameters of a random workload.
#[derive(Debug, Clone)]
pub struct WorkloadGenerator {
    /// Number of processes.
    pub count: usize,
    /// Range of arrival times.
    pub arrival: RangeInclusive<i64>,
    /// Range of burst times (lower bound >= 1).
    pub burst: RangeInclusive<i64>,
    /// Range of priorities.
    pub priority: RangeInclusive<i32>,
    /// Range of initial AG quanta (lower bound >= 1).
    pub quantum: RangeInclusive<i64>,
}

impl WorkloadGenerator {
    /// Creates a generator for `count` processes with small default ranges.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            arrival: 0..=20,
            burst: 1..=10,
            priority: 1..=10,
            quantum: 1..=8,
        }
    }

    /// Sets the arrival range.
    pub fn with_arrival(mut self, arrival: RangeInclusive<i64>) -> Self {
        self.arrival = arrival;
        self
    }

    /// Sets the burst range.
    pub fn with_burst(mut self, burst: RangeInclusive<i64>) -> Self {
        self.burst = burst;
        self
    }

    /// Sets the priority range.
    pub fn with_priority(mut self, priority: RangeInclusive<i32>) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the quantum range.
    pub fn with_quantum(mut self, quantum: RangeInclusive<i64>) -> Self {
        self.quantum = quantum;
        self
    }

    /// Draws a workload. Processes are named `P1..Pn`.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Vec<ProcessSpec> {
        (1..=self.count)
            .map(|i| {
                ProcessSpec::new(
                    format!("P{i}"),
                    rng.random_range(self.arrival.clone()),
                    rng.random_range(self.burst.clone()),
                )
                .with_priority(rng.random_range(self.priority.clone()))
                .with_quantum(rng.random_range(self.quantum.clone()))
            })
            .collect()
    }
}
