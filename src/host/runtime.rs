//! Static runtime feature sampler.

use std::collections::HashMap;

use crate::filter::Runtime;

/// Runtime with fixed overrides and random sampling for feature checks.
#[derive(Debug, Default, Clone)]
pub struct StaticRuntime {
    values: HashMap<String, u64>,
}

impl StaticRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override `key` with `value`.
    pub fn with_value(mut self, key: impl Into<String>, value: u64) -> Self {
        self.values.insert(key.into(), value);
        self
    }
}

impl Runtime for StaticRuntime {
    fn feature_enabled(&self, key: &str, default_percent: u64) -> bool {
        let percent = self.values.get(key).copied().unwrap_or(default_percent);
        fastrand::u64(0..100) < percent
    }

    fn get_integer(&self, key: &str, default: u64) -> u64 {
        self.values.get(key).copied().unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_enabled_extremes() {
        let runtime = StaticRuntime::new();
        for _ in 0..200 {
            assert!(!runtime.feature_enabled("mongo.fault.fixed_delay.percent", 0));
            assert!(runtime.feature_enabled("mongo.fault.fixed_delay.percent", 100));
        }
    }

    #[test]
    fn overrides_win_over_defaults() {
        let runtime = StaticRuntime::new()
            .with_value("mongo.fault.fixed_delay.percent", 0)
            .with_value("mongo.fault.fixed_delay.duration_ms", 40);

        for _ in 0..200 {
            assert!(!runtime.feature_enabled("mongo.fault.fixed_delay.percent", 100));
        }
        assert_eq!(runtime.get_integer("mongo.fault.fixed_delay.duration_ms", 5), 40);
        assert_eq!(runtime.get_integer("unset", 5), 5);
    }
}
