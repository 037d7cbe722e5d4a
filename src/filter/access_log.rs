//! Access log handle bound at factory-creation time.

use std::fmt;
use std::sync::Arc;

/// Sink for formatted access-log lines.
pub trait AccessLogFile: Send + Sync {
    fn write(&self, line: &str);
}

/// Host component that opens access-log sinks by path.
pub trait AccessLogManager: Send + Sync {
    fn create_access_log(&self, path: &str) -> Arc<dyn AccessLogFile>;
}

/// Access log shared by every filter of one configuration.
pub struct AccessLog {
    path: String,
    file: Arc<dyn AccessLogFile>,
}

impl AccessLog {
    /// Open the sink for `path` through the host's manager.
    pub fn new(path: &str, manager: &dyn AccessLogManager) -> Self {
        Self {
            path: path.to_string(),
            file: manager.create_access_log(path),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Append one line to the log.
    pub fn write(&self, line: &str) {
        self.file.write(line);
    }
}

impl fmt::Debug for AccessLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessLog").field("path", &self.path).finish()
    }
}
