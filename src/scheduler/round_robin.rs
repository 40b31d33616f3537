//! Round Robin scheduler.
//!
//! # Algorithm
//!
//! 1. Sort processes by arrival (stable) and admit those already arrived
//!    into a FIFO ready queue.
//! 2. If the queue is empty, jump the clock to the next arrival. Idle
//!    jumps are not charged a context switch.
//! 3. Dequeue the head. Charge the context-switch cost if it differs from
//!    the previous process.
//! 4. Run it for `min(quantum, remaining)` units in one step.
//! 5. Admit arrivals up to the new clock, then re-enqueue the current
//!    process at the tail if it still has work.
//!
//! Every dequeue opens a Gantt segment, including consecutive slices of
//! the same process.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3.3

use std::collections::VecDeque;

use log::{debug, trace};

use super::{metrics, ArrivalFeed, CpuScheduler};
use crate::models::{ProcessSpec, ProcessTable, SchedulerResult};

/// Round Robin scheduler with a fixed quantum.
#[derive(Debug, Clone, Copy)]
pub struct RoundRobin {
    quantum: i64,
    context_switch: i64,
}

impl RoundRobin {
    /// Creates a scheduler with the given quantum and zero switch cost.
    pub fn new(quantum: i64) -> Self {
        Self {
            quantum,
            context_switch: 0,
        }
    }

    /// Sets the context-switch cost.
    pub fn with_context_switch(mut self, cost: i64) -> Self {
        self.context_switch = cost;
        self
    }
}

impl CpuScheduler for RoundRobin {
    fn name(&self) -> &'static str {
        "RR"
    }

    fn schedule(&self, processes: Vec<ProcessSpec>) -> SchedulerResult {
        let mut table = ProcessTable::new(processes);
        let mut result = SchedulerResult::new();
        let total = table.len();
        debug!(
            "RR: scheduling {total} processes, quantum {}, context switch {}",
            self.quantum, self.context_switch
        );

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

            if let Some(previous) = last {
                if previous != current {
                    clock += self.context_switch;
                }
            }

            let slice = self.quantum.min(table[current].remaining);
            result.push_segment(table[current].name.as_str());
            clock += slice;
            let finished = table[current].execute(slice, clock);
            trace!("t={clock}: {} ran {slice}", table[current].name);

            feed.admit(&table, clock, &mut queue);

            if finished {
                completed += 1;
            } else {
                queue.push_back(current);
            }
            last = Some(current);
        }

        metrics::finalize(&table, &mut result);
        debug!(
            "RR: done at t={clock}, avg waiting {:.2}, avg turnaround {:.2}",
            result.average_waiting_time, result.average_turnaround_time
        );
        result
    }

    fn description(&self) -> &'static str {
        "Round Robin"
    }
}
