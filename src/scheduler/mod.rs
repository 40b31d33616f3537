//! CPU scheduling algorithms.
//!
//! Four disjoint policies, each a deterministic discrete-time simulation:
//!
//! | Policy | Type | Preemption |
//! |--------|------|------------|
//! | SJF | [`ShortestJobFirst`] | Every time unit, shortest remaining time |
//! | RR | [`RoundRobin`] | End of each fixed quantum |
//! | Priority | [`PriorityAging`] | Every time unit, lowest priority value, with aging |
//! | AG | [`AgScheduler`] | FCFS, then priority, then SJF phases per quantum |
//!
//! # Ownership
//!
//! [`CpuScheduler::schedule`] takes the process list by value. Each run
//! builds its own [`ProcessTable`](crate::models::ProcessTable), so runs
//! over the same scenario are independent and may execute in parallel.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

mod ag;
pub mod metrics;
mod priority;
mod round_robin;
mod sjf;

pub use ag::{AgScheduler, QuantumPhase, QuantumPhases};
pub use metrics::ProcessMetrics;
pub use priority::PriorityAging;
pub use round_robin::RoundRobin;
pub use sjf::ShortestJobFirst;

use std::collections::VecDeque;
use std::fmt::Debug;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::SchedulerConfig;
use crate::models::{ProcessSpec, ProcessTable, SchedulerResult};

/// A CPU scheduling policy.
///
/// Implementations simulate the whole run over an owned copy of the
/// process list and return the complete result.
pub trait CpuScheduler: Send + Sync + Debug {
    /// Policy label (e.g., "SJF", "RR").
    fn name(&self) -> &'static str;

    /// Simulates the policy until every process completes.
    fn schedule(&self, processes: Vec<ProcessSpec>) -> SchedulerResult;

    /// Policy description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Selector over the built-in policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Policy {
    /// Preemptive Shortest-Job-First.
    #[serde(rename = "SJF")]
    Sjf,
    /// Round Robin.
    #[serde(rename = "RR")]
    RoundRobin,
    /// Preemptive Priority with aging.
    #[serde(rename = "Priority")]
    Priority,
    /// AG three-phase hybrid.
    #[serde(rename = "AG")]
    Ag,
}

impl Policy {
    /// All policies, in fixture reporting order.
    pub const ALL: [Policy; 4] = [
        Policy::Sjf,
        Policy::RoundRobin,
        Policy::Priority,
        Policy::Ag,
    ];

    /// Fixture label of the policy.
    pub fn label(&self) -> &'static str {
        match self {
            Policy::Sjf => "SJF",
            Policy::RoundRobin => "RR",
            Policy::Priority => "Priority",
            Policy::Ag => "AG",
        }
    }

    /// Builds the scheduler for this policy from shared parameters.
    ///
    /// AG ignores the configuration and reads each process's own quantum.
    pub fn scheduler(&self, config: &SchedulerConfig) -> Box<dyn CpuScheduler> {
        match self {
            Policy::Sjf => {
                Box::new(ShortestJobFirst::new().with_context_switch(config.context_switch))
            }
            Policy::RoundRobin => Box::new(
                RoundRobin::new(config.rr_quantum).with_context_switch(config.context_switch),
            ),
            Policy::Priority => Box::new(
                PriorityAging::new(config.aging_interval)
                    .with_context_switch(config.context_switch),
            ),
            Policy::Ag => Box::new(AgScheduler::new()),
        }
    }

    /// Runs this policy over `processes`.
    pub fn run(&self, processes: Vec<ProcessSpec>, config: &SchedulerConfig) -> SchedulerResult {
        let scheduler = self.scheduler(config);
        debug!("{}: running {}", self.label(), scheduler.description());
        scheduler.schedule(processes)
    }
}

/// Admits processes into a FIFO ready queue in arrival order.
///
/// Shared by the queue-based policies (RR and AG).
#[derive(Debug, Clone)]
pub(crate) struct ArrivalFeed {
    order: Vec<usize>,
    next: usize,
}

impl ArrivalFeed {
    /// Creates a feed over the table's processes sorted by arrival.
    pub(crate) fn new(table: &ProcessTable) -> Self {
        Self {
            order: table.arrival_order(),
            next: 0,
        }
    }

    /// Moves every process with arrival <= `now` to the back of `queue`.
    pub(crate) fn admit(&mut self, table: &ProcessTable, now: i64, queue: &mut VecDeque<usize>) {
        while let Some(&idx) = self.order.get(self.next) {
            if table[idx].arrival > now {
                break;
            }
            queue.push_back(idx);
            self.next += 1;
        }
    }

    /// Arrival time of the next process not yet admitted.
    pub(crate) fn next_arrival(&self, table: &ProcessTable) -> Option<i64> {
        self.order.get(self.next).map(|&idx| table[idx].arrival)
    }
}
