//! Configuration schema definitions.
//!
//! The raw document is an untyped JSON tree handed over by the host's
//! configuration loader. Validation extracts the typed subset defined here.

/// Untyped configuration document as supplied by the host.
pub type ConfigDocument = serde_json::Value;

/// Top-level field naming the metrics namespace.
pub const STAT_PREFIX: &str = "stat_prefix";

/// Top-level field holding the access-log path.
pub const ACCESS_LOG: &str = "access_log";

/// Top-level field holding the fault-injection block.
pub const FAULT: &str = "fault";

/// Fault field: percentage of operations to delay.
pub const DELAY_PERCENT: &str = "delay_percent";

/// Fault field: fixed delay in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Every field allowed at the top level of the document.
pub const TOP_LEVEL_FIELDS: [&str; 3] = [STAT_PREFIX, ACCESS_LOG, FAULT];

/// Every field allowed inside the `fault` object.
pub const FAULT_FIELDS: [&str; 2] = [DELAY_PERCENT, DURATION_MS];

/// Upper bound (inclusive) for `fault.delay_percent`.
pub const MAX_DELAY_PERCENT: u32 = 100;

/// Filter configuration after schema validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedConfig {
    /// Metrics namespace supplied by the operator (without the `mongo.` prefix).
    pub stat_prefix: String,

    /// Optional path of the access log.
    pub access_log_path: Option<String>,

    /// Optional fixed-delay fault specification.
    pub fault: Option<FaultSpec>,
}

/// Fixed-delay fault specification. Both fields are always present together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaultSpec {
    /// Percentage of operations to delay, in `[0, 100]`.
    pub delay_percent: u32,

    /// Delay applied to a faulted operation, in milliseconds.
    pub duration_ms: u64,
}
