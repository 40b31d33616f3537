//! AG hybrid scheduler.
//!
//! Each dequeued process runs for up to its own, growing quantum `Q`. The
//! quantum is split into three phases by the number of units `u` already
//! used in the current slice:
//!
//! | Phase | Units | Behaviour |
//! |-------|-------|-----------|
//! | FCFS | `u < q1` | Non-preemptible |
//! | Priority | `q1 <= u < q2` | Preempted by a queued process with strictly lower priority value |
//! | SJF | `u >= q2` | Preempted by a queued process with strictly less remaining time |
//!
//! with `q1 = ceil(Q / 4)` and `q2 = 2 * q1`.
//!
//! # Quantum Update
//!
//! With `r = Q - u` unused units at the end of a slice:
//!
//! | Outcome | New quantum |
//! |---------|-------------|
//! | Completed | history gets a terminal `0` |
//! | Full quantum used | `Q + 2` |
//! | Preempted in Priority phase | `Q + ceil(r / 2)` |
//! | Preempted in SJF phase | `Q + r` |
//!
//! A preempted process goes to the tail of the ready queue and the
//! preempting process moves to its front. There is no context-switch cost.

use std::collections::VecDeque;

use log::{debug, trace};

use super::{metrics, ArrivalFeed, CpuScheduler};
use crate::models::{ProcessSpec, ProcessTable, SchedulerResult};

/// Phase of an AG slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantumPhase {
    /// First-come first-served, non-preemptible.
    Fcfs,
    /// Preemptible by a more urgent queued process.
    Priority,
    /// Preemptible by a shorter queued process.
    ShortestJob,
}

/// Phase boundaries of one AG slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantumPhases {
    /// End (exclusive) of the FCFS phase.
    pub fcfs_end: i64,
    /// End (exclusive) of the Priority phase.
    pub priority_end: i64,
}

impl QuantumPhases {
    /// Computes the boundaries for a quantum.
    pub fn new(quantum: i64) -> Self {
        let quarter = ceil_div(quantum.max(0), 4);
        Self {
            fcfs_end: quarter,
            priority_end: quarter + quarter,
        }
    }

    /// Phase in effect after `used` units of the slice.
    pub fn phase_at(&self, used: i64) -> QuantumPhase {
        if used < self.fcfs_end {
            QuantumPhase::Fcfs
        } else if used < self.priority_end {
            QuantumPhase::Priority
        } else {
            QuantumPhase::ShortestJob
        }
    }
}

/// Ceiling division for non-negative operands.
#[inline]
fn ceil_div(value: i64, divisor: i64) -> i64 {
    (value + divisor - 1) / divisor
}

/// Quantum granted to a process that did not finish its slice.
fn next_quantum(quantum: i64, used: i64, preempted_in: Option<QuantumPhase>) -> i64 {
    let unused = quantum - used;
    match preempted_in {
        Some(QuantumPhase::Priority) => quantum + ceil_div(unused, 2),
        Some(QuantumPhase::ShortestJob) => quantum + unused,
        // The FCFS phase is never preempted
        Some(QuantumPhase::Fcfs) | None => quantum + 2,
    }
}

/// AG three-phase hybrid scheduler.
///
/// Reads each process's own initial quantum and ignores shared
/// parameters.
///
/// # Example
///
/// ```
/// use u_cpu_sched::models::ProcessSpec;
/// use u_cpu_sched::scheduler::{AgScheduler, CpuScheduler};
///
/// let result = AgScheduler::new().schedule(vec![
///     ProcessSpec::new("A", 0, 7).with_quantum(3),
/// ]);
/// assert_eq!(result.execution_order, vec!["A"]);
/// assert_eq!(result.quantum_history["A"], vec![3, 5, 0]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AgScheduler;

impl AgScheduler {
    /// Creates the scheduler.
    pub fn new() -> Self {
        Self
    }

    /// Queued process with the strictly lowest priority value below `current`'s.
    fn more_urgent(
        table: &ProcessTable,
        queue: &VecDeque<usize>,
        current: usize,
    ) -> Option<usize> {
        let threshold = table[current].priority;
        queue
            .iter()
            .copied()
            .filter(|&idx| table[idx].priority < threshold)
            .min_by_key(|&idx| table[idx].priority)
    }

    /// Queued process with the strictly least remaining work below `current`'s.
    fn shorter(
        table: &ProcessTable,
        queue: &VecDeque<usize>,
        current: usize,
    ) -> Option<usize> {
        let threshold = table[current].remaining;
        queue
            .iter()
            .copied()
            .filter(|&idx| table[idx].remaining < threshold)
            .min_by_key(|&idx| table[idx].remaining)
    }
}

impl CpuScheduler for AgScheduler {
    fn name(&self) -> &'static str {
        "AG"
    }

    fn schedule(&self, processes: Vec<ProcessSpec>) -> SchedulerResult {
        let mut table = ProcessTable::new(processes);
        let mut result = SchedulerResult::new();
        let total = table.len();
        debug!("AG: scheduling {total} processes");

        for process in table.iter_mut() {
            process.quantum_history.push(process.quantum);
        }

        let mut feed = ArrivalFeed::new(&table);
        let mut queue: VecDeque<usize> = VecDeque::with_capacity(total);
        let mut clock: i64 = 0;
        let mut completed = 0;
        let mut last: Option<usize> = None;

        feed.admit(&table, clock, &mut queue);

        while completed < total {
            let Some(current) = queue.pop_front() else {
                match feed.next_arrival(&table) {
                    Some(arrival) => {
                        trace!("t={clock}: idle until {arrival}");
                        clock = clock.max(arrival);
                        feed.admit(&table, clock, &mut queue);
                        continue;
                    }
                    None => break,
                }
            };

            if last != Some(current) {
                result.push_segment(table[current].name.as_str());
            }

            let quantum = table[current].quantum;
            let phases = QuantumPhases::new(quantum);
            let mut used: i64 = 0;
            let mut preemption: Option<(QuantumPhase, usize)> = None;

            while used < quantum && !table[current].is_finished() {
                feed.admit(&table, clock, &mut queue);

                let phase = phases.phase_at(used);
                let challenger = match phase {
                    QuantumPhase::Fcfs => None,
                    QuantumPhase::Priority => Self::more_urgent(&table, &queue, current),
                    QuantumPhase::ShortestJob => Self::shorter(&table, &queue, current),
                };
                if let Some(next) = challenger {
                    preemption = Some((phase, next));
                    break;
                }

                clock += 1;
                used += 1;
                table[current].execute(1, clock);
            }

            if table[current].is_finished() {
                table[current].quantum_history.push(0);
                completed += 1;
                trace!("t={clock}: {} finished", table[current].name);
            } else {
                let grown = next_quantum(quantum, used, preemption.map(|(phase, _)| phase));
                let process = &mut table[current];
                process.quantum = grown;
                process.quantum_history.push(grown);
                queue.push_back(current);

                if let Some((phase, next)) = preemption {
                    trace!(
                        "t={clock}: {} preempted in {phase:?} phase by {}, quantum -> {grown}",
                        table[current].name,
                        table[next].name
                    );
                    if let Some(pos) = queue.iter().position(|&idx| idx == next) {
                        queue.remove(pos);
                    }
                    queue.push_front(next);
                } else {
                    trace!(
                        "t={clock}: {} used full quantum, {quantum} -> {grown}",
                        table[current].name
                    );
                }
            }

            last = Some(current);
        }

        metrics::finalize(&table, &mut result);
        metrics::collect_quantum_history(&table, &mut result);
        debug!(
            "AG: done at t={clock}, avg waiting {:.2}, avg turnaround {:.2}",
            result.average_waiting_time, result.average_turnaround_time
        );
        result
    }

    fn description(&self) -> &'static str {
        "AG three-phase hybrid (FCFS, Priority, SJF)"
    }
}
