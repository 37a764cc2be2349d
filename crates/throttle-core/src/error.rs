//! Error types for throttled execution

use std::fmt;
use thiserror::Error;

/// Result type alias for throttle operations
pub type ThrottleResult<T> = Result<T, ThrottleError>;

/// Main error type for throttled execution
#[derive(Error, Debug)]
pub enum ThrottleError {
    /// Concurrency limit below one
    #[error("Configuration error: max concurrency must be at least 1, got {value}")]
    InvalidConcurrency { value: usize },

    /// A required collaborator was not supplied to the builder
    #[error("Configuration error: runner requires {0}")]
    MissingComponent(&'static str),

    /// Configuration could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// The item sequence was already consumed by an earlier run
    #[error("Configuration error: work items were already consumed by a previous run")]
    ItemsConsumed,

    /// One or more actions failed; every sibling still ran to completion
    #[error("{} of {dispatched} work items failed{}", .failures.len(), first_cause(.failures))]
    ActionsFailed {
        failures: Vec<ItemFailure>,
        dispatched: usize,
    },

    /// The run was cancelled before every unit completed
    #[error("Run cancelled after {completed} of {dispatched} work items completed")]
    Cancelled { completed: usize, dispatched: usize },
}

impl ThrottleError {
    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether this error was raised before any unit was dispatched
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidConcurrency { .. }
                | Self::MissingComponent(_)
                | Self::Config(_)
                | Self::ItemsConsumed
        )
    }

    /// Per-item failures, empty for every variant except `ActionsFailed`
    pub fn failures(&self) -> &[ItemFailure] {
        match self {
            Self::ActionsFailed { failures, .. } => failures,
            _ => &[],
        }
    }
}

fn first_cause(failures: &[ItemFailure]) -> String {
    match failures.first() {
        Some(first) => format!("; first: {}", first),
        None => String::new(),
    }
}

/// A single work item whose action failed
#[derive(Debug)]
pub struct ItemFailure {
    /// Position of the item in the input sequence
    pub index: usize,
    pub error: anyhow::Error,
}

impl ItemFailure {
    pub fn new(index: usize, error: anyhow::Error) -> Self {
        Self { index, error }
    }
}

impl fmt::Display for ItemFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item {}: {:#}", self.index, self.error)
    }
}

impl From<toml::de::Error> for ThrottleError {
    fn from(error: toml::de::Error) -> Self {
        Self::Config(format!("Failed to parse TOML config: {}", error))
    }
}

impl From<serde_json::Error> for ThrottleError {
    fn from(error: serde_json::Error) -> Self {
        Self::Config(format!("Failed to parse JSON config: {}", error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_classification() {
        assert!(ThrottleError::InvalidConcurrency { value: 0 }.is_configuration());
        assert!(ThrottleError::MissingComponent("items").is_configuration());
        assert!(ThrottleError::ItemsConsumed.is_configuration());
        assert!(
            !ThrottleError::Cancelled {
                completed: 1,
                dispatched: 2
            }
            .is_configuration()
        );
    }

    #[test]
    fn test_actions_failed_message() {
        let error = ThrottleError::ActionsFailed {
            failures: vec![
                ItemFailure::new(7, anyhow::anyhow!("disk full")),
                ItemFailure::new(9, anyhow::anyhow!("timeout")),
            ],
            dispatched: 10,
        };

        assert_eq!(
            error.to_string(),
            "2 of 10 work items failed; first: item 7: disk full"
        );
        assert_eq!(error.failures().len(), 2);
    }

    #[test]
    fn test_invalid_concurrency_message() {
        let error = ThrottleError::InvalidConcurrency { value: 0 };
        assert!(error.to_string().contains("at least 1"));
        assert!(error.failures().is_empty());
    }
}
