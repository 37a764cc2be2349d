//! Environment variable overrides

use super::model::{DispatchMode, ThrottleConfig};
use crate::error::{ThrottleError, ThrottleResult};
use std::env;

pub const ENV_MAX_CONCURRENCY: &str = "THROTTLE_MAX_CONCURRENCY";
pub const ENV_DISPATCH: &str = "THROTTLE_DISPATCH";

impl ThrottleConfig {
    /// Apply `THROTTLE_*` variables from the process environment
    pub fn apply_env_overrides(&mut self) -> ThrottleResult<()> {
        self.apply_overrides_from(|key| env::var(key).ok())
    }

    /// Apply overrides from any key lookup
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> ThrottleResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_MAX_CONCURRENCY) {
            self.max_concurrency = value.trim().parse().map_err(|_| {
                ThrottleError::config(format!("Invalid {} value '{}'", ENV_MAX_CONCURRENCY, value))
            })?;
        }

        if let Some(value) = lookup(ENV_DISPATCH) {
            self.dispatch = value.parse::<DispatchMode>()?;
        }

        self.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_overrides_applied() {
        let mut config = ThrottleConfig::default();
        config
            .apply_overrides_from(lookup(&[
                (ENV_MAX_CONCURRENCY, "9"),
                (ENV_DISPATCH, "bounded"),
            ]))
            .unwrap();

        assert_eq!(config.max_concurrency, 9);
        assert_eq!(config.dispatch, DispatchMode::Bounded);
    }

    #[test]
    fn test_no_overrides_keeps_values() {
        let mut config = ThrottleConfig::new(2);
        config.apply_overrides_from(lookup(&[])).unwrap();
        assert_eq!(config, ThrottleConfig::new(2));
    }

    #[test]
    fn test_invalid_override_rejected() {
        let mut config = ThrottleConfig::default();
        let error = config
            .apply_overrides_from(lookup(&[(ENV_MAX_CONCURRENCY, "lots")]))
            .unwrap_err();
        assert!(error.to_string().contains(ENV_MAX_CONCURRENCY));

        let error = config
            .apply_overrides_from(lookup(&[(ENV_MAX_CONCURRENCY, "0")]))
            .unwrap_err();
        assert!(matches!(error, ThrottleError::InvalidConcurrency { value: 0 }));
    }
}
