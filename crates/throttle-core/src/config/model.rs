//! Configuration data model

use crate::error::{ThrottleError, ThrottleResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_MAX_CONCURRENCY: usize = 4;

/// How units are created relative to permit acquisition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchMode {
    /// Spawn one pending unit per item up front; each unit waits for its own permit
    #[default]
    Eager,
    /// Acquire the permit before spawning, so pending units never exceed the limit
    Bounded,
}

impl fmt::Display for DispatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eager => write!(f, "eager"),
            Self::Bounded => write!(f, "bounded"),
        }
    }
}

impl FromStr for DispatchMode {
    type Err = ThrottleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "eager" => Ok(Self::Eager),
            "bounded" => Ok(Self::Bounded),
            other => Err(ThrottleError::config(format!(
                "Unknown dispatch mode '{}' (expected 'eager' or 'bounded')",
                other
            ))),
        }
    }
}

/// Settings for a throttled run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrottleConfig {
    /// Maximum number of actions executing at once
    pub max_concurrency: usize,
    /// Unit creation strategy for throttled runs
    pub dispatch: DispatchMode,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            dispatch: DispatchMode::default(),
        }
    }
}

impl ThrottleConfig {
    pub fn new(max_concurrency: usize) -> Self {
        Self {
            max_concurrency,
            ..Self::default()
        }
    }

    pub fn with_max_concurrency(mut self, max: usize) -> Self {
        self.max_concurrency = max;
        self
    }

    pub fn with_dispatch(mut self, dispatch: DispatchMode) -> Self {
        self.dispatch = dispatch;
        self
    }

    pub fn validate(&self) -> ThrottleResult<()> {
        if self.max_concurrency < 1 {
            return Err(ThrottleError::InvalidConcurrency {
                value: self.max_concurrency,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ThrottleConfig::default();
        assert_eq!(config.max_concurrency, DEFAULT_MAX_CONCURRENCY);
        assert_eq!(config.dispatch, DispatchMode::Eager);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let result = ThrottleConfig::new(0).validate();
        assert!(matches!(
            result,
            Err(ThrottleError::InvalidConcurrency { value: 0 })
        ));
    }

    #[test]
    fn test_dispatch_mode_parsing() {
        assert_eq!("eager".parse::<DispatchMode>().unwrap(), DispatchMode::Eager);
        assert_eq!(
            " Bounded ".parse::<DispatchMode>().unwrap(),
            DispatchMode::Bounded
        );
        assert!("greedy".parse::<DispatchMode>().is_err());
        assert_eq!(DispatchMode::Bounded.to_string(), "bounded");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ThrottleConfig = toml::from_str("dispatch = \"bounded\"").unwrap();
        assert_eq!(config.max_concurrency, DEFAULT_MAX_CONCURRENCY);
        assert_eq!(config.dispatch, DispatchMode::Bounded);
    }
}
