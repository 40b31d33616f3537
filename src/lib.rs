//! CPU scheduling simulator for the U-Engine ecosystem.
//!
//! Simulates single-CPU process scheduling in discrete time and computes
//! per-process and aggregate timing metrics. Nothing here touches real
//! processes, threads or clocks: time is an integer counter advanced by
//! the algorithms themselves.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `ProcessSpec`, `Process`, `ProcessTable`,
//!   `SchedulerResult`
//! - **`scheduler`**: Policies — `ShortestJobFirst`, `RoundRobin`,
//!   `PriorityAging`, `AgScheduler` — and shared metrics
//! - **`config`**: Shared policy parameters and their defaults
//! - **`validation`**: Input integrity checks (duplicate names, bursts, parameters)
//! - **`fixture`**: Expected-result fixtures and tolerant comparison
//! - **`workload`**: Seeded random process sets
//!
//! # Example
//!
//! ```
//! use u_cpu_sched::config::SchedulerConfig;
//! use u_cpu_sched::models::ProcessSpec;
//! use u_cpu_sched::scheduler::Policy;
//!
//! let processes = vec![
//!     ProcessSpec::new("A", 0, 5).with_priority(1),
//!     ProcessSpec::new("B", 1, 3).with_priority(1),
//! ];
//! let config = SchedulerConfig::default();
//!
//! let sjf = Policy::Sjf.run(processes.clone(), &config);
//! assert_eq!(sjf.execution_order, vec!["A", "B", "A"]);
//! assert!((sjf.average_waiting_time - 1.5).abs() < 1e-9);
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

pub mod config;
pub mod fixture;
pub mod models;
pub mod scheduler;
pub mod validation;
pub mod workload;
