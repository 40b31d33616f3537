//! Shared scheduling parameters.
//!
//! Field names and defaults follow the fixture format: a fixture that
//! omits a parameter runs with the default below.
//!
//! | Field | JSON | Default | Used by |
//! |-------|------|---------|---------|
//! | `context_switch` | `contextSwitch` | 0 | SJF, RR, Priority |
//! | `rr_quantum` | `rrQuantum` | 2 | RR |
//! | `aging_interval` | `agingInterval` | 5 | Priority |

use serde::{Deserialize, Serialize};

/// Default context-switch cost.
pub const DEFAULT_CONTEXT_SWITCH: i64 = 0;
/// Default Round Robin quantum.
pub const DEFAULT_RR_QUANTUM: i64 = 2;
/// Default aging interval.
pub const DEFAULT_AGING_INTERVAL: i64 = 5;

fn default_rr_quantum() -> i64 {
    DEFAULT_RR_QUANTUM
}

fn default_aging_interval() -> i64 {
    DEFAULT_AGING_INTERVAL
}

/// Parameters shared by the non-AG policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulerConfig {
    /// Time charged whenever the running process changes.
    #[serde(default)]
    pub context_switch: i64,
    /// Round Robin time slice.
    #[serde(default = "default_rr_quantum")]
    pub rr_quantum: i64,
    /// Waiting units after which a process's priority improves by 1.
    #[serde(default = "default_aging_interval")]
    pub aging_interval: i64,
}

impl SchedulerConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self {
            context_switch: DEFAULT_CONTEXT_SWITCH,
            rr_quantum: DEFAULT_RR_QUANTUM,
            aging_interval: DEFAULT_AGING_INTERVAL,
        }
    }

    /// Sets the context-switch cost.
    pub fn with_context_switch(mut self, cost: i64) -> Self {
        self.context_switch = cost;
        self
    }

    /// Sets the Round Robin quantum.
    pub fn with_rr_quantum(mut self, quantum: i64) -> Self {
        self.rr_quantum = quantum;
        self
    }

    /// Sets the aging interval.
    pub fn with_aging_interval(mut self, interval: i64) -> Self {
        self.aging_interval = interval;
        self
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = SchedulerConfig::default();
        assert_eq!(config.context_switch, 0);
        assert_eq!(config.rr_quantum, 2);
        assert_eq!(config.aging_interval, 5);
    }

    #[test]
    fn test_config_builder() {
        let config = SchedulerConfig::new()
            .with_context_switch(1)
            .with_rr_quantum(3)
            .with_aging_interval(4);
        assert_eq!(config.context_switch, 1);
        assert_eq!(config.rr_quantum, 3);
        assert_eq!(config.aging_interval, 4);
    }

    #[test]
    fn test_config_partial_json() {
        let config: SchedulerConfig = serde_json::from_str(r#"{"rrQuantum": 3}"#).unwrap();
        assert_eq!(config, SchedulerConfig::new().with_rr_quantum(3));
    }
}
