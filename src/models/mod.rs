//! CPU scheduling domain models.
//!
//! Provides the process descriptor handed in by callers, the per-run
//! process state every scheduler mutates, and the result aggregate each
//! run produces.
//!
//! # Lifecycle
//!
//! | Type | Created by | Mutated by |
//! |------|-----------|------------|
//! | `ProcessSpec` | Caller / fixture | Never |
//! | `ProcessTable` | Scheduler, per run | That run only |
//! | `SchedulerResult` | Scheduler, per run | That run, then frozen |

mod process;
mod result;

pub use process::{Process, ProcessSpec, ProcessTable, DEFAULT_QUANTUM};
pub use result::SchedulerResult;
