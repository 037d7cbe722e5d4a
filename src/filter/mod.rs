//! Network filter subsystem.
//!
//! # Data Flow
//! ```text
//! ConfigDocument
//!     → factory.rs (validate, build shared fault policy + access log)
//!     → NetworkFilterFactoryCb (closure, built once per configuration)
//!     → listener.rs (current generation, swapped on reload)
//!     → per new connection: closure constructs a ProxyFilter
//!     → FilterManager::add_filter
//! ```
//!
//! # Design Decisions
//! - Host collaborators are traits (context.rs, access_log.rs) so the host owns them
//! - Factories are found through an explicit registry, populated at startup
//! - The closure only reads immutable state; it is shared across worker threads

use std::any::Any;
use std::sync::Arc;

pub mod access_log;
pub mod context;
pub mod factory;
pub mod listener;
pub mod proxy;
pub mod registry;

pub use access_log::{AccessLog, AccessLogFile, AccessLogManager};
pub use context::{Dispatcher, FactoryContext, Runtime, Scope};
pub use factory::{MongoProxyFilterConfigFactory, NamedNetworkFilterConfigFactory};
pub use listener::FilterChainSlot;
pub use proxy::ProxyFilter;
pub use registry::FactoryRegistry;

/// Which direction(s) of the byte stream a filter participates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkFilterType {
    Read,
    Write,
    Both,
}

/// A filter instance installed on one connection.
pub trait NetworkFilter: Send + Sync {
    /// Name of the filter, for logging.
    fn name(&self) -> &str;

    /// Allows hosts and tests to recover the concrete filter type.
    fn as_any(&self) -> &dyn Any;
}

/// Owned filter instance handed to a connection.
pub type NetworkFilterPtr = Box<dyn NetworkFilter>;

/// The connection-side half of a filter chain.
pub trait FilterManager {
    /// Take ownership of one filter instance.
    fn add_filter(&mut self, filter: NetworkFilterPtr);
}

/// Closure invoked once per new connection to install a filter.
pub type NetworkFilterFactoryCb = Arc<dyn Fn(&mut dyn FilterManager) + Send + Sync>;
