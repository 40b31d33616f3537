//! Preemptive Priority scheduling with aging.
//!
//! # Algorithm
//!
//! Per simulated step:
//! 1. **Aging**: every ready process whose wait counter reached the aging
//!    interval improves its priority by 1 and resets its counter.
//! 2. **Selection**: lowest priority value; ties go to the earliest
//!    arrival, then to input order.
//! 3. **Transition**: the step is classified by [`Step::between`] and
//!    advanced accordingly (see below).
//!
//! # Wait Accounting
//!
//! | Step | Clock | Wait counters |
//! |------|-------|---------------|
//! | `Idle` | +1 | +1 for every process ready at the new clock |
//! | `Switch` | +cost | +cost if arrived before the switch; `t1 - arrival` if arrived during it |
//! | `Dispatch` / `Run` | +1 | +1 for every other ready process; running process reset to 0 |
//!
//! `Switch` is followed by the same one-unit execution as `Run`.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3.4

use log::{debug, trace};

use super::{metrics, CpuScheduler};
use crate::models::{ProcessSpec, ProcessTable, SchedulerResult};

/// CPU state for one simulated step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Nothing is ready.
    Idle,
    /// First dispatch of the run; no switch cost.
    Dispatch(usize),
    /// A different process than last time was selected.
    Switch(usize),
    /// The previous process keeps the CPU.
    Run(usize),
}

impl Step {
    /// Classifies a step from the previously running and the selected process.
    fn between(previous: Option<usize>, selected: Option<usize>) -> Self {
        match (previous, selected) {
            (_, None) => Step::Idle,
            (None, Some(next)) => Step::Dispatch(next),
            (Some(prev), Some(next)) if prev != next => Step::Switch(next),
            (Some(_), Some(next)) => Step::Run(next),
        }
    }
}

/// Per-process wait counters, indexed like the process table.
#[derive(Debug, Clone)]
struct WaitCounters {
    counters: Vec<i64>,
}

impl WaitCounters {
    fn new(len: usize) -> Self {
        Self {
            counters: vec![0; len],
        }
    }

    /// Promotes every ready process whose counter reached `interval`.
    fn apply_aging(&mut self, table: &mut ProcessTable, now: i64, interval: i64) {
        for (idx, process) in table.iter_mut().enumerate() {
            if process.is_ready(now) && self.counters[idx] >= interval {
                process.priority -= 1;
                self.counters[idx] = 0;
                trace!("t={now}: {} aged to priority {}", process.name, process.priority);
            }
        }
    }

    /// One idle unit ending at `now`.
    fn idle(&mut self, table: &ProcessTable, now: i64) {
        for idx in table.ready_at(now) {
            self.counters[idx] += 1;
        }
    }

    /// A context switch spanning `[start, end)`.
    ///
    /// Processes that arrived by `start` wait the full switch; those
    /// arriving inside it wait from their arrival to `end`.
    fn switch(&mut self, table: &ProcessTable, start: i64, end: i64) {
        for (idx, process) in table.iter().enumerate() {
            if process.is_finished() {
                continue;
            }
            let waited = if process.arrival <= start {
                end - start
            } else if process.arrival <= end {
                end - process.arrival
            } else {
                0
            };
            if waited > 0 {
                self.counters[idx] += waited;
            }
        }
    }

    /// One execution unit of `running` ending at `now`.
    fn run(&mut self, table: &ProcessTable, running: usize, now: i64) {
        for idx in table.ready_at(now) {
            if idx != running {
                self.counters[idx] += 1;
            }
        }
        self.counters[running] = 0;
    }
}

/// Preemptive priority scheduler with aging.
///
/// Lower priority value = more urgent.
#[derive(Debug, Clone, Copy)]
pub struct PriorityAging {
    aging_interval: i64,
    context_switch: i64,
}

impl PriorityAging {
    /// Creates a scheduler with the given aging interval and zero switch cost.
    pub fn new(aging_interval: i64) -> Self {
        Self {
            aging_interval,
            context_switch: 0,
        }
    }

    /// Sets the context-switch cost.
    pub fn with_context_switch(mut self, cost: i64) -> Self {
        self.context_switch = cost;
        self
    }

    /// Index of the most urgent ready process.
    fn select(table: &ProcessTable, now: i64) -> Option<usize> {
        table
            .ready_at(now)
            .min_by_key(|&idx| (table[idx].priority, table[idx].arrival))
    }
}

impl CpuScheduler for PriorityAging {
    fn name(&self) -> &'static str {
        "Priority"
    }

    fn schedule(&self, processes: Vec<ProcessSpec>) -> SchedulerResult {
        let mut table = ProcessTable::new(processes);
        let mut result = SchedulerResult::new();
        let total = table.len();
        debug!(
            "Priority: scheduling {total} processes, aging {}, context switch {}",
            self.aging_interval, self.context_switch
        );

        let mut waits = WaitCounters::new(total);
        let mut clock: i64 = 0;
        let mut completed = 0;
        let mut last: Option<usize> = None;

        while completed < total {
            waits.apply_aging(&mut table, clock, self.aging_interval);

            let current = match Step::between(last, Self::select(&table, clock)) {
                Step::Idle => {
                    clock += 1;
                    waits.idle(&table, clock);
                    continue;
                }
                Step::Switch(next) => {
                    let start = clock;
                    clock += self.context_switch;
                    waits.switch(&table, start, clock);
                    trace!("t={clock}: switch to {}", table[next].name);
                    result.push_segment(table[next].name.as_str());
                    next
                }
                Step::Dispatch(next) => {
                    result.push_segment(table[next].name.as_str());
                    next
                }
                Step::Run(next) => next,
            };

            clock += 1;
            let finished = table[current].execute(1, clock);
            waits.run(&table, current, clock);
            if finished {
                completed += 1;
            }
            last = Some(current);
        }

        metrics::finalize(&table, &mut result);
        debug!(
            "Priority: done at t={clock}, avg waiting {:.2}, avg turnaround {:.2}",
            result.average_waiting_time, result.average_turnaround_time
        );
        result
    }

    fn description(&self) -> &'static str {
        "Preemptive Priority with Aging"
    }
}
