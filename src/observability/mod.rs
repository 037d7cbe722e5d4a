//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! config / filter subsystems produce:
//!     → logging.rs (structured log events, access-log lines)
//!     → metrics.rs (factory lifecycle counters, filter scopes)
//!
//! Consumers:
//!     → stdout (fmt layer, filtered by EnvFilter)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured fields on every event (filter, stat_prefix, generation)
//! - Metric updates go through the `metrics` facade; no-ops without a recorder

pub mod logging;
pub mod metrics;
