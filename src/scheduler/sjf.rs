//! Preemptive Shortest-Job-First (Shortest Remaining Time First).
//!
//! # Algorithm
//!
//! 1. Each time unit, select the ready process with the smallest
//!    remaining time. Ties go to the earliest process in input order.
//! 2. If nothing is ready, the CPU idles for one unit.
//! 3. If the selection differs from the previously running process,
//!    charge the context-switch cost and open a new Gantt segment.
//! 4. Execute one unit.
//!
//! # Complexity
//! O(T * n) where T = simulated time, n = processes.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3.2

use log::{debug, trace};

use super::{metrics, CpuScheduler};
use crate::models::{ProcessSpec, ProcessTable, SchedulerResult};

/// Preemptive SJF scheduler.
///
/// # Example
///
/// ```
/// use u_cpu_sched::models::ProcessSpec;
/// use u_cpu_sched::scheduler::{CpuScheduler, ShortestJobFirst};
///
/// let processes = vec![
///     ProcessSpec::new("A", 0, 5),
///     ProcessSpec::new("B", 1, 3),
/// ];
/// let result = ShortestJobFirst::new().schedule(processes);
/// assert_eq!(result.execution_order, vec!["A", "B", "A"]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortestJobFirst {
    context_switch: i64,
}

impl ShortestJobFirst {
    /// Creates a scheduler with zero context-switch cost.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the context-switch cost.
    pub fn with_context_switch(mut self, cost: i64) -> Self {
        self.context_switch = cost;
        self
    }

    /// Index of the ready process with the least remaining work.
    fn select(table: &ProcessTable, now: i64) -> Option<usize> {
        // min_by_key keeps the first of equal minima
        table.ready_at(now).min_by_key(|&idx| table[idx].remaining)
    }
}

impl CpuScheduler for ShortestJobFirst {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn schedule(&self, processes: Vec<ProcessSpec>) -> SchedulerResult {
        let mut table = ProcessTable::new(processes);
        let mut result = SchedulerResult::new();
        let total = table.len();
        debug!("SJF: scheduling {total} processes, context switch {}", self.context_switch);

        let mut clock: i64 = 0;
        let mut completed = 0;
        let mut last: Option<usize> = None;

        while completed < total {
            let Some(current) = Self::select(&table, clock) else {
                clock += 1;
                continue;
            };

            if last != Some(current) {
                if last.is_some() {
                    clock += self.context_switch;
                    trace!("t={clock}: switch to {}", table[current].name);
                }
                result.push_segment(table[current].name.as_str());
            }

            clock += 1;
            if table[current].execute(1, clock) {
                completed += 1;
            }
            last = Some(current);
        }

        metrics::finalize(&table, &mut result);
        debug!(
            "SJF: done at t={clock}, avg waiting {:.2}, avg turnaround {:.2}",
            result.average_waiting_time, result.average_turnaround_time
        );
        result
    }

    fn description(&self) -> &'static str {
        "Preemptive Shortest Job First"
    }
}
