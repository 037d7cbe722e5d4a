//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Provide an access-log manager that emits lines as tracing events
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Log level configurable via CLI and `RUST_LOG`

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::filter::{AccessLogFile, AccessLogManager};

/// Target used for access-log events.
pub const ACCESS_LOG_TARGET: &str = "access_log";

/// Install the global subscriber. `RUST_LOG` wins over `level` when set.
pub fn init_logging(level: &str) {
    let default_directives = format!("mongo_filter_config={level},{ACCESS_LOG_TARGET}=info");
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directives.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Access-log manager that routes lines into the tracing pipeline.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAccessLogManager;

struct TracingAccessLogFile {
    path: String,
}

impl AccessLogFile for TracingAccessLogFile {
    fn write(&self, line: &str) {
        tracing::info!(target: ACCESS_LOG_TARGET, path = %self.path, "{}", line);
    }
}

impl AccessLogManager for TracingAccessLogManager {
    fn create_access_log(&self, path: &str) -> Arc<dyn AccessLogFile> {
        tracing::debug!(path, "Opened access log");
        Arc::new(TracingAccessLogFile {
            path: path.to_string(),
        })
    }
}
