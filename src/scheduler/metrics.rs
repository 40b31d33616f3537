//! Per-process timing metrics.
//!
//! Derives the standard CPU scheduling indicators from the final state of
//! a run and writes them into its [`SchedulerResult`].
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Turnaround | completion - arrival |
//! | Waiting | turnaround - burst |
//! | Avg Waiting | mean waiting time over all processes |
//! | Avg Turnaround | mean turnaround time over all processes |
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2: Scheduling Criteria

use crate::models::{Process, ProcessTable, SchedulerResult};

/// Timing indicators of a single finished process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessMetrics {
    /// Time the process finished.
    pub completion_time: i64,
    /// completion - arrival.
    pub turnaround_time: i64,
    /// turnaround - burst.
    pub waiting_time: i64,
}

impl ProcessMetrics {
    /// Computes the indicators of one process.
    pub fn calculate(process: &Process) -> Self {
        debug_assert!(process.is_finished(), "{} did not finish", process.name);
        let completion_time = process.completion_time.unwrap_or_default();
        let turnaround_time = completion_time - process.arrival;
        Self {
            completion_time,
            turnaround_time,
            waiting_time: turnaround_time - process.burst,
        }
    }
}

/// Fills the per-process maps and averages of `result`.
///
/// An empty table yields averages of 0.0.
pub fn finalize(table: &ProcessTable, result: &mut SchedulerResult) {
    let mut total_waiting: i64 = 0;
    let mut total_turnaround: i64 = 0;

    for process in table.iter() {
        let metrics = ProcessMetrics::calculate(process);
        total_waiting += metrics.waiting_time;
        total_turnaround += metrics.turnaround_time;
        result
            .waiting_times
            .insert(process.name.clone(), metrics.waiting_time);
        result
            .turnaround_times
            .insert(process.name.clone(), metrics.turnaround_time);
    }

    let count = table.len();
    if count == 0 {
        result.average_waiting_time = 0.0;
        result.average_turnaround_time = 0.0;
    } else {
        result.average_waiting_time = total_waiting as f64 / count as f64;
        result.average_turnaround_time = total_turnaround as f64 / count as f64;
    }
}

/// Copies every process's quantum history into `result`.
pub fn collect_quantum_history(table: &ProcessTable, result: &mut SchedulerResult) {
    for process in table.iter() {
        result
            .quantum_history
            .insert(process.name.clone(), process.quantum_history.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProcessSpec;

    fn finished_table(rows: &[(&str, i64, i64, i64)]) -> ProcessTable {
        let specs = rows
            .iter()
            .map(|&(name, arrival, burst, _)| ProcessSpec::new(name, arrival, burst))
            .collect();
        let mut table = ProcessTable::new(specs);
        for (idx, &(_, _, burst, completion)) in rows.iter().enumerate() {
            table[idx].execute(burst, completion);
        }
        table
    }

    #[test]
    fn test_process_metrics() {
        let table = finished_table(&[("A", 2, 3, 10)]);
        let m = ProcessMetrics::calculate(&table[0]);
        assert_eq!(m.completion_time, 10);
        assert_eq!(m.turnaround_time, 8);
        assert_eq!(m.waiting_time, 5);
    }

    #[test]
    fn test_finalize_averages() {
        // A: TA 8, W 3; B: TA 3, W 0
        let table = finished_table(&[("A", 0, 5, 8), ("B", 1, 3, 4)]);
        let mut result = SchedulerResult::new();
        finalize(&table, &mut result);

        assert_eq!(result.turnaround_times["A"], 8);
        assert_eq!(result.waiting_times["A"], 3);
        assert_eq!(result.turnaround_times["B"], 3);
        assert_eq!(result.waiting_times["B"], 0);
        assert!((result.average_waiting_time - 1.5).abs() < 1e-10);
        assert!((result.average_turnaround_time - 5.5).abs() < 1e-10);
    }

    #[test]
    fn test_finalize_empty() {
        let mut result = SchedulerResult::new();
        finalize(&ProcessTable::default(), &mut result);
        assert_eq!(result.process_count(), 0);
        assert!((result.average_waiting_time - 0.0).abs() < 1e-10);
        assert!((result.average_turnaround_time - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_collect_quantum_history() {
        let mut table = finished_table(&[("A", 0, 1, 1)]);
        table[0].quantum_history = vec![4, 0];
        let mut result = SchedulerResult::new();
        collect_quantum_history(&table, &mut result);
        assert_eq!(result.quantum_history["A"], vec![4, 0]);
    }
}
