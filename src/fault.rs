//! Fault-injection policy.
//!
//! # Responsibilities
//! - Turn a validated fault spec into the immutable policy consulted by filters
//!
//! # Design Decisions
//! - Built once per configuration and shared via Arc; never cloned per connection
//! - No validation here: ranges were checked by config::validation

use std::sync::Arc;
use std::time::Duration;

use crate::config::FaultSpec;

/// Fixed-delay fault policy shared by every filter of one configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultPolicy {
    /// No fault injection configured.
    None,
    /// Delay `delay_percent`% of operations by `duration_ms`.
    Active { delay_percent: u32, duration_ms: u64 },
}

impl FaultPolicy {
    /// Returns true if a fault is configured.
    pub fn is_active(&self) -> bool {
        matches!(self, FaultPolicy::Active { .. })
    }

    /// Percentage of operations to delay (0 when inactive).
    pub fn delay_percent(&self) -> u32 {
        match self {
            FaultPolicy::None => 0,
            FaultPolicy::Active { delay_percent, .. } => *delay_percent,
        }
    }

    /// Fixed delay for a faulted operation, if a fault is configured.
    pub fn delay_duration(&self) -> Option<Duration> {
        match self {
            FaultPolicy::None => None,
            FaultPolicy::Active { duration_ms, .. } => Some(Duration::from_millis(*duration_ms)),
        }
    }
}

impl std::fmt::Display for FaultPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FaultPolicy::None => write!(f, "none"),
            FaultPolicy::Active { delay_percent, duration_ms } => {
                write!(f, "delay {}% by {}ms", delay_percent, duration_ms)
            }
        }
    }
}

/// Build the shared policy from the (optional) validated fault spec.
pub fn build(fault: Option<&FaultSpec>) -> Arc<FaultPolicy> {
    let policy = match fault {
        None => FaultPolicy::None,
        Some(spec) => FaultPolicy::Active {
            delay_percent: spec.delay_percent,
            duration_ms: spec.duration_ms,
        },
    };
    Arc::new(policy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fault_is_none() {
        let policy = build(None);
        assert_eq!(*policy, FaultPolicy::None);
        assert!(!policy.is_active());
        assert_eq!(policy.delay_percent(), 0);
        assert_eq!(policy.delay_duration(), None);
    }

    #[test]
    fn fields_copied_verbatim() {
        let spec = FaultSpec { delay_percent: 37, duration_ms: 250 };
        let policy = build(Some(&spec));
        assert_eq!(*policy, FaultPolicy::Active { delay_percent: 37, duration_ms: 250 });
        assert_eq!(policy.delay_percent(), 37);
        assert_eq!(policy.delay_duration(), Some(Duration::from_millis(250)));
        assert_eq!(policy.to_string(), "delay 37% by 250ms");
    }

    #[test]
    fn each_build_is_a_new_allocation() {
        let spec = FaultSpec { delay_percent: 1, duration_ms: 1 };
        let a = build(Some(&spec));
        let b = build(Some(&spec));
        assert_eq!(a, b);
        assert!(!Arc::ptr_eq(&a, &b));
    }
}
