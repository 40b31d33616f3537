//! Fixture scenarios and result comparison.
//!
//! A fixture pairs a scheduling input with the expected output of one or
//! more policies. Two shapes are accepted:
//!
//! ```json
//! { "input": { "processes": [...] },
//!   "expectedOutput": { "executionOrder": [...], ... } }
//! ```
//!
//! where a bare expected run is an AG expectation, and
//!
//! ```json
//! { "input": { "contextSwitch": 1, "rrQuantum": 2, "agingInterval": 5, "processes": [...] },
//!   "expectedOutput": { "SJF": {...}, "RR": {...}, "Priority": {...} } }
//! ```
//!
//! Execution order, per-process values, and quantum histories must match
//! exactly; averages must agree within [`AVERAGE_EPSILON`].

use std::fmt;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::SchedulerConfig;
use crate::models::{ProcessSpec, SchedulerResult};
use crate::scheduler::Policy;
use crate::validation::{validate_run, ValidationError};

/// Tolerance for average waiting / turnaround comparisons.
pub const AVERAGE_EPSILON: f64 = 0.01;

/// A complete fixture: input plus expectations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    /// Scheduling input.
    pub input: FixtureInput,
    /// Expected output(s).
    pub expected_output: ExpectedOutput,
}

/// Processes and shared parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureInput {
    /// Process descriptors in input order.
    pub processes: Vec<ProcessSpec>,
    /// Policy parameters; missing fields take their defaults.
    #[serde(flatten)]
    pub config: SchedulerConfig,
}

/// Expectations of a fixture.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExpectedOutput {
    /// A single AG expectation.
    Single(ExpectedRun),
    /// Expectations keyed by policy label.
    PerPolicy(PolicyExpectations),
}

/// Per-policy expectations; absent policies are not checked.
///
/// Unknown keys are rejected so that a misspelled label fails to parse
/// instead of leaving every policy unchecked.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyExpectations {
    /// Preemptive SJF.
    #[serde(rename = "SJF", default, skip_serializing_if = "Option::is_none")]
    pub sjf: Option<ExpectedRun>,
    /// Round Robin.
    #[serde(rename = "RR", default, skip_serializing_if = "Option::is_none")]
    pub round_robin: Option<ExpectedRun>,
    /// Priority with aging.
    #[serde(rename = "Priority", default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<ExpectedRun>,
    /// AG hybrid.
    #[serde(rename = "AG", default, skip_serializing_if = "Option::is_none")]
    pub ag: Option<ExpectedRun>,
}

/// Expected result of one policy run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ExpectedRun {
    /// Expected Gantt segment sequence.
    pub execution_order: Vec<String>,
    /// Expected mean waiting time.
    pub average_waiting_time: f64,
    /// Expected mean turnaround time.
    pub average_turnaround_time: f64,
    /// Optional per-process expectations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub process_results: Vec<ExpectedProcess>,
}

/// Expected values for one process. Absent fields are not checked.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectedProcess {
    /// Process name.
    pub name: String,
    /// Expected waiting time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waiting_time: Option<i64>,
    /// Expected turnaround time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turnaround_time: Option<i64>,
    /// Expected quantum history (AG).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantum_history: Option<Vec<i64>>,
}

/// One difference between an actual and an expected result.
#[derive(Debug, Clone, PartialEq)]
pub enum Mismatch {
    /// Gantt segment sequences differ.
    ExecutionOrder {
        expected: Vec<String>,
        actual: Vec<String>,
    },
    /// Average waiting time off by more than the tolerance.
    AverageWaitingTime { expected: f64, actual: f64 },
    /// Average turnaround time off by more than the tolerance.
    AverageTurnaroundTime { expected: f64, actual: f64 },
    /// A per-process waiting time differs.
    WaitingTime {
        name: String,
        expected: i64,
        actual: Option<i64>,
    },
    /// A per-process turnaround time differs.
    TurnaroundTime {
        name: String,
        expected: i64,
        actual: Option<i64>,
    },
    /// A quantum history differs.
    QuantumHistory {
        name: String,
        expected: Vec<i64>,
        actual: Vec<i64>,
    },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::ExecutionOrder { expected, actual } => {
                write!(f, "execution order: expected {expected:?}, got {actual:?}")
            }
            Mismatch::AverageWaitingTime { expected, actual } => {
                write!(f, "average waiting time: expected {expected}, got {actual}")
            }
            Mismatch::AverageTurnaroundTime { expected, actual } => {
                write!(f, "average turnaround time: expected {expected}, got {actual}")
            }
            Mismatch::WaitingTime {
                name,
                expected,
                actual,
            } => write!(f, "{name} waiting time: expected {expected}, got {actual:?}"),
            Mismatch::TurnaroundTime {
                name,
                expected,
                actual,
            } => write!(f, "{name} turnaround time: expected {expected}, got {actual:?}"),
            Mismatch::QuantumHistory {
                name,
                expected,
                actual,
            } => write!(f, "{name} quantum history: expected {expected:?}, got {actual:?}"),
        }
    }
}

/// Errors raised while loading or evaluating a fixture.
#[derive(Debug)]
pub enum FixtureError {
    /// The fixture JSON is malformed.
    Parse(serde_json::Error),
    /// The fixture input fails validation.
    Invalid(Vec<ValidationError>),
    /// The fixture names no policy to check.
    NoExpectations,
}

impl fmt::Display for FixtureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FixtureError::Parse(err) => write!(f, "malformed fixture: {err}"),
            FixtureError::Invalid(errors) => {
                write!(f, "invalid fixture input:")?;
                for err in errors {
                    write!(f, " {err};")?;
                }
                Ok(())
            }
            FixtureError::NoExpectations => write!(f, "fixture has no expectations"),
        }
    }
}

impl std::error::Error for FixtureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FixtureError::Parse(err) => Some(err),
            FixtureError::Invalid(_) | FixtureError::NoExpectations => None,
        }
    }
}

impl From<serde_json::Error> for FixtureError {
    fn from(err: serde_json::Error) -> Self {
        FixtureError::Parse(err)
    }
}

/// Outcome of running one policy of a fixture.
#[derive(Debug, Clone)]
pub struct FixtureOutcome {
    /// Policy that was run.
    pub policy: Policy,
    /// Computed result.
    pub result: SchedulerResult,
    /// Differences from the expectation; empty when it passed.
    pub mismatches: Vec<Mismatch>,
}

impl FixtureOutcome {
    /// Whether the computed result met the expectation.
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Pass/fail tally over a set of outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixtureSummary {
    /// Outcomes without mismatches.
    pub passed: usize,
    /// Outcomes with at least one mismatch.
    pub failed: usize,
}

impl FixtureSummary {
    /// Tallies `outcomes`.
    pub fn from_outcomes(outcomes: &[FixtureOutcome]) -> Self {
        let passed = outcomes.iter().filter(|o| o.passed()).count();
        Self {
            passed,
            failed: outcomes.len() - passed,
        }
    }

    /// Adds another tally, e.g. from the next fixture file.
    pub fn merge(&mut self, other: FixtureSummary) {
        self.passed += other.passed;
        self.failed += other.failed;
    }

    /// Number of outcomes counted.
    pub fn total(&self) -> usize {
        self.passed + self.failed
    }

    /// Whether nothing failed.
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

impl fmt::Display for FixtureSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "passed: {}, failed: {}, total: {}",
            self.passed,
            self.failed,
            self.total()
        )
    }
}

impl Fixture {
    /// Parses a fixture from JSON.
    pub fn from_json(json: &str) -> Result<Self, FixtureError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Expectations to check, in policy order.
    pub fn expectations(&self) -> Vec<(Policy, &ExpectedRun)> {
        match &self.expected_output {
            ExpectedOutput::Single(run) => vec![(Policy::Ag, run)],
            ExpectedOutput::PerPolicy(per_policy) => [
                (Policy::Sjf, per_policy.sjf.as_ref()),
                (Policy::RoundRobin, per_policy.round_robin.as_ref()),
                (Policy::Priority, per_policy.priority.as_ref()),
                (Policy::Ag, per_policy.ag.as_ref()),
            ]
            .into_iter()
            .filter_map(|(policy, run)| run.map(|run| (policy, run)))
            .collect(),
        }
    }

    /// Runs every expected policy and compares its result.
    ///
    /// Each policy runs over its own copy of the input.
    pub fn evaluate(&self) -> Result<Vec<FixtureOutcome>, FixtureError> {
        let expectations = self.expectations();
        if expectations.is_empty() {
            return Err(FixtureError::NoExpectations);
        }
        for (policy, _) in &expectations {
            validate_run(*policy, &self.input.processes, &self.input.config)
                .map_err(FixtureError::Invalid)?;
        }

        let outcomes = expectations
            .into_iter()
            .map(|(policy, expected)| {
                let result = policy.run(self.input.processes.clone(), &self.input.config);
                let mismatches = compare(&result, expected);
                if mismatches.is_empty() {
                    debug!(
                        "{}: fixture passed, {} segments",
                        policy.label(),
                        result.segment_count()
                    );
                } else {
                    for mismatch in &mismatches {
                        warn!("{}: {mismatch}", policy.label());
                    }
                }
                FixtureOutcome {
                    policy,
                    result,
                    mismatches,
                }
            })
            .collect();
        Ok(outcomes)
    }
}

/// Compares a computed result against an expectation.
pub fn compare(actual: &SchedulerResult, expected: &ExpectedRun) -> Vec<Mismatch> {
    let mut mismatches = Vec::new();

    if actual.execution_order != expected.execution_order {
        mismatches.push(Mismatch::ExecutionOrder {
            expected: expected.execution_order.clone(),
            actual: actual.execution_order.clone(),
        });
    }

    if (actual.average_waiting_time - expected.average_waiting_time).abs() > AVERAGE_EPSILON {
        mismatches.push(Mismatch::AverageWaitingTime {
            expected: expected.average_waiting_time,
            actual: actual.average_waiting_time,
        });
    }

    if (actual.average_turnaround_time - expected.average_turnaround_time).abs() > AVERAGE_EPSILON
    {
        mismatches.push(Mismatch::AverageTurnaroundTime {
            expected: expected.average_turnaround_time,
            actual: actual.average_turnaround_time,
        });
    }

    for process in &expected.process_results {
        if let Some(expected_wait) = process.waiting_time {
            let actual_wait = actual.waiting_times.get(&process.name).copied();
            if actual_wait != Some(expected_wait) {
                mismatches.push(Mismatch::WaitingTime {
                    name: process.name.clone(),
                    expected: expected_wait,
                    actual: actual_wait,
                });
            }
        }

        if let Some(expected_turnaround) = process.turnaround_time {
            let actual_turnaround = actual.turnaround_times.get(&process.name).copied();
            if actual_turnaround != Some(expected_turnaround) {
                mismatches.push(Mismatch::TurnaroundTime {
                    name: process.name.clone(),
                    expected: expected_turnaround,
                    actual: actual_turnaround,
                });
            }
        }

        if let Some(expected_history) = &process.quantum_history {
            let actual_history = actual
                .quantum_history
                .get(&process.name)
                .cloned()
                .unwrap_or_default();
            if &actual_history != expected_history {
                mismatches.push(Mismatch::QuantumHistory {
                    name: process.name.clone(),
                    expected: expected_history.clone(),
                    actual: actual_history,
                });
            }
        }
    }

    mismatches
}

#[cfg(test)]
mod tests {
    use super::*;

    const AG_FIXTURE: &str = r#"{
        "input": {
            "processes": [
                {"name": "P1", "arrival": 0, "burst": 17, "priority": 4, "quantum": 7},
                {"name": "P2", "arrival": 2, "burst": 6, "priority": 7, "quantum": 9},
                {"name": "P3", "arrival": 5, "burst": 11, "priority": 3, "quantum": 4},
                {"name": "P4", "arrival": 15, "burst": 4, "priority": 6, "quantum": 6}
            ]
        },
        "expectedOutput": {
            "executionOrder": ["P1", "P2", "P3", "P2", "P1", "P3", "P4", "P3", "P1", "P4"],
            "processResults": [
                {"name": "P1", "waitingTime": 19, "turnaroundTime": 36, "quantumHistory": [7, 10, 14, 0]},
                {"name": "P2", "waitingTime": 4, "turnaroundTime": 10, "quantumHistory": [9, 12, 0]},
                {"name": "P3", "waitingTime": 10, "turnaroundTime": 21, "quantumHistory": [4, 6, 8, 0]},
                {"name": "P4", "waitingTime": 19, "turnaroundTime": 23, "quantumHistory": [6, 8, 0]}
            ],
            "averageWaitingTime": 13.0,
            "averageTurnaroundTime": 22.5
        }
    }"#;

    const GENERAL_FIXTURE: &str = r#"{
        "input": {
            "contextSwitch": 1,
            "rrQuantum": 2,
            "processes": [
                {"name": "A", "arrival": 0, "burst": 5, "priority": 1},
                {"name": "B", "arrival": 1, "burst": 3, "priority": 1},
                {"name": "C", "arrival": 2, "burst": 1, "priority": 1}
            ]
        },
        "expectedOutput": {
            "SJF": {
                "executionOrder": ["A", "B", "C", "B", "A"],
                "averageWaitingTime": 4.6667,
                "averageTurnaroundTime": 7.6667
            },
            "RR": {
                "executionOrder": ["A", "B", "C", "A", "B", "A"],
                "averageWaitingTime": 7.0,
                "averageTurnaroundTime": 10.0
            }
        }
    }"#;

    #[test]
    fn test_parse_ag_fixture() {
        let fixture = Fixture::from_json(AG_FIXTURE).unwrap();
        assert_eq!(fixture.input.processes.len(), 4);
        assert_eq!(fixture.input.config, SchedulerConfig::default());
        let expectations = fixture.expectations();
        assert_eq!(expectations.len(), 1);
        assert_eq!(expectations[0].0, Policy::Ag);
    }

    #[test]
    fn test_ag_fixture_passes() {
        let outcomes = Fixture::from_json(AG_FIXTURE).unwrap().evaluate().unwrap();
        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].passed(), "{:?}", outcomes[0].mismatches);
    }

    #[test]
    fn test_general_fixture_passes() {
        let fixture = Fixture::from_json(GENERAL_FIXTURE).unwrap();
        assert_eq!(fixture.input.config.context_switch, 1);
        assert_eq!(fixture.input.config.aging_interval, 5);
        // Non-AG descriptors take the default quantum
        assert_eq!(fixture.input.processes[0].quantum, 4);

        let outcomes = fixture.evaluate().unwrap();
        let policies: Vec<_> = outcomes.iter().map(|o| o.policy).collect();
        assert_eq!(policies, vec![Policy::Sjf, Policy::RoundRobin]);
        for outcome in &outcomes {
            assert!(outcome.passed(), "{}: {:?}", outcome.policy.label(), outcome.mismatches);
        }
    }

    #[test]
    fn test_compare_reports_mismatches() {
        let mut actual = SchedulerResult::new();
        actual.push_segment("A");
        actual.waiting_times.insert("A".into(), 1);
        actual.average_waiting_time = 1.0;
        actual.quantum_history.insert("A".into(), vec![4, 0]);

        let expected = ExpectedRun {
            execution_order: vec!["B".into()],
            average_waiting_time: 1.005,
            average_turnaround_time: 0.5,
            process_results: vec![ExpectedProcess {
                name: "A".into(),
                waiting_time: Some(1),
                turnaround_time: Some(3),
                quantum_history: Some(vec![4, 6, 0]),
            }],
        };

        let mismatches = compare(&actual, &expected);
        assert_eq!(mismatches.len(), 4);
        assert!(matches!(mismatches[0], Mismatch::ExecutionOrder { .. }));
        assert!(matches!(mismatches[1], Mismatch::AverageTurnaroundTime { .. }));
        assert_eq!(
            mismatches[2],
            Mismatch::TurnaroundTime {
                name: "A".into(),
                expected: 3,
                actual: None
            }
        );
        assert!(matches!(mismatches[3], Mismatch::QuantumHistory { .. }));
    }

    #[test]
    fn test_failing_expectation_detected() {
        let json =
            GENERAL_FIXTURE.replace(r#"["A", "B", "C", "B", "A"]"#, r#"["A", "B", "C"]"#);
        let outcomes = Fixture::from_json(&json).unwrap().evaluate().unwrap();
        assert!(!outcomes[0].passed());
        assert!(outcomes[1].passed());
    }

    #[test]
    fn test_invalid_fixture_rejected() {
        let json = GENERAL_FIXTURE.replace(r#""name": "B""#, r#""name": "A""#);
        let err = Fixture::from_json(&json).unwrap().evaluate().unwrap_err();
        assert!(matches!(err, FixtureError::Invalid(_)));
    }

    #[test]
    fn test_misspelled_expectation_key_rejected() {
        let json = r#"{
            "input": {"processes": [{"name": "A", "arrival": 0, "burst": 2}]},
            "expectedOutput": {
                "executionorder": ["WRONG"],
                "averageWaitingTime": 99.0,
                "averageTurnaroundTime": 99.0
            }
        }"#;
        let err = Fixture::from_json(json).unwrap_err();
        assert!(matches!(err, FixtureError::Parse(_)));

        let json = GENERAL_FIXTURE.replace(r#""RR""#, r#""rr""#);
        assert!(matches!(
            Fixture::from_json(&json).unwrap_err(),
            FixtureError::Parse(_)
        ));
    }

    #[test]
    fn test_empty_expectations_rejected() {
        let json = r#"{
            "input": {"processes": [{"name": "A", "arrival": 0, "burst": 2}]},
            "expectedOutput": {}
        }"#;
        let fixture = Fixture::from_json(json).unwrap();
        assert!(fixture.expectations().is_empty());
        let err = fixture.evaluate().unwrap_err();
        assert!(matches!(err, FixtureError::NoExpectations));
    }

    #[test]
    fn test_summary_tallies_outcomes() {
        let json = GENERAL_FIXTURE.replace(
            r#""averageWaitingTime": 7.0"#,
            r#""averageWaitingTime": 6.0"#,
        );
        let outcomes = Fixture::from_json(&json).unwrap().evaluate().unwrap();
        let mut summary = FixtureSummary::from_outcomes(&outcomes);
        assert_eq!(summary, FixtureSummary { passed: 1, failed: 1 });
        assert!(!summary.all_passed());

        let ag = Fixture::from_json(AG_FIXTURE).unwrap().evaluate().unwrap();
        summary.merge(FixtureSummary::from_outcomes(&ag));
        assert_eq!(summary.total(), 3);
        assert_eq!(summary.to_string(), "passed: 2, failed: 1, total: 3");
    }

    #[test]
    fn test_malformed_fixture() {
        let err = Fixture::from_json(r#"{"input": {}}"#).unwrap_err();
        assert!(matches!(err, FixtureError::Parse(_)));
    }
}
