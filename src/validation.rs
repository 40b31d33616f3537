//! Input validation for scheduling runs.
//!
//! The schedulers assume well-formed input. These checks reject malformed
//! descriptors and parameters before a run is started. Detects:
//! - Empty or duplicate process names
//! - Negative arrival times
//! - Non-positive bursts
//! - Non-positive AG quanta
//! - Out-of-range policy parameters
//!
//! All problems are collected rather than stopping at the first one.

use std::collections::HashSet;
use std::fmt;

use crate::config::SchedulerConfig;
use crate::models::ProcessSpec;
use crate::scheduler::Policy;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A process has an empty name.
    EmptyName,
    /// Two processes share the same name.
    DuplicateName,
    /// A process arrives before t=0.
    NegativeArrival,
    /// A process requires no CPU time (or a negative amount).
    NonPositiveBurst,
    /// An AG process has a quantum of 0 or less.
    NonPositiveQuantum,
    /// A scheduling parameter is out of range.
    InvalidParameter,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validates process descriptors.
///
/// Checks:
/// 1. Every name is non-empty
/// 2. No duplicate names
/// 3. `arrival >= 0`
/// 4. `burst > 0`
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_processes(processes: &[ProcessSpec]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut names = HashSet::new();

    for process in processes {
        if process.name.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyName,
                "Process with empty name",
            ));
        } else if !names.insert(process.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate process name: {}", process.name),
            ));
        }

        if process.arrival < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeArrival,
                format!(
                    "Process '{}' has negative arrival {}",
                    process.name, process.arrival
                ),
            ));
        }

        if process.burst <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                format!(
                    "Process '{}' has non-positive burst {}",
                    process.name, process.burst
                ),
            ));
        }
    }

    into_result(errors)
}

/// Validates parameters for a policy.
///
/// Only the parameters the policy reads are checked:
/// - SJF: `contextSwitch >= 0`
/// - RR: `contextSwitch >= 0`, `rrQuantum > 0`
/// - Priority: `contextSwitch >= 0`, `agingInterval > 0`
/// - AG: none
pub fn validate_config(policy: Policy, config: &SchedulerConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if policy != Policy::Ag && config.context_switch < 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidParameter,
            format!("contextSwitch must be >= 0, got {}", config.context_switch),
        ));
    }
    if policy == Policy::RoundRobin && config.rr_quantum <= 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidParameter,
            format!("rrQuantum must be > 0, got {}", config.rr_quantum),
        ));
    }
    if policy == Policy::Priority && config.aging_interval <= 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidParameter,
            format!("agingInterval must be > 0, got {}", config.aging_interval),
        ));
    }

    into_result(errors)
}

/// Validates both descriptors and parameters for a run of `policy`.
///
/// AG runs additionally require every process quantum to be positive.
pub fn validate_run(
    policy: Policy,
    processes: &[ProcessSpec],
    config: &SchedulerConfig,
) -> ValidationResult {
    let mut errors = Vec::new();

    if let Err(mut errs) = validate_processes(processes) {
        errors.append(&mut errs);
    }
    if let Err(mut errs) = validate_config(policy, config) {
        errors.append(&mut errs);
    }
    if policy == Policy::Ag {
        for process in processes.iter().filter(|p| p.quantum <= 0) {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveQuantum,
                format!(
                    "Process '{}' has non-positive quantum {}",
                    process.name, process.quantum
                ),
            ));
        }
    }

    into_result(errors)
}

fn into_result(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(result: ValidationResult) -> Vec<ValidationErrorKind> {
        result.unwrap_err().into_iter().map(|e| e.kind).collect()
    }

    #[test]
    fn test_valid_processes() {
        let processes = vec![ProcessSpec::new("A", 0, 3), ProcessSpec::new("B", 2, 1)];
        assert!(validate_processes(&processes).is_ok());
    }

    #[test]
    fn test_duplicate_name() {
        let processes = vec![ProcessSpec::new("A", 0, 3), ProcessSpec::new("A", 1, 2)];
        assert_eq!(
            kinds(validate_processes(&processes)),
            vec![ValidationErrorKind::DuplicateName]
        );
    }

    #[test]
    fn test_empty_name() {
        let processes = vec![ProcessSpec::new("", 0, 3)];
        assert_eq!(
            kinds(validate_processes(&processes)),
            vec![ValidationErrorKind::EmptyName]
        );
    }

    #[test]
    fn test_collects_all_errors() {
        let processes = vec![ProcessSpec::new("A", -1, 0)];
        let errors = kinds(validate_processes(&processes));
        assert_eq!(
            errors,
            vec![
                ValidationErrorKind::NegativeArrival,
                ValidationErrorKind::NonPositiveBurst
            ]
        );
    }

    #[test]
    fn test_config_checks_only_used_parameters() {
        let config = SchedulerConfig::new().with_rr_quantum(0).with_aging_interval(0);
        assert!(validate_config(Policy::Sjf, &config).is_ok());
        assert!(validate_config(Policy::Ag, &config).is_ok());
        assert_eq!(
            kinds(validate_config(Policy::RoundRobin, &config)),
            vec![ValidationErrorKind::InvalidParameter]
        );
        assert_eq!(
            kinds(validate_config(Policy::Priority, &config)),
            vec![ValidationErrorKind::InvalidParameter]
        );
    }

    #[test]
    fn test_negative_context_switch() {
        let config = SchedulerConfig::new().with_context_switch(-1);
        assert!(validate_config(Policy::Sjf, &config).is_err());
        assert!(validate_config(Policy::Ag, &config).is_ok());
    }

    #[test]
    fn test_ag_requires_positive_quantum() {
        let processes = vec![ProcessSpec::new("A", 0, 3).with_quantum(0)];
        let config = SchedulerConfig::default();
        assert!(validate_run(Policy::Sjf, &processes, &config).is_ok());
        assert_eq!(
            kinds(validate_run(Policy::Ag, &processes, &config)),
            vec![ValidationErrorKind::NonPositiveQuantum]
        );
    }

    #[test]
    fn test_error_display() {
        let err = ValidationError::new(
            ValidationErrorKind::DuplicateName,
            "Duplicate process name: A",
        );
        assert_eq!(err.to_string(), "DuplicateName: Duplicate process name: A");
    }
}
