//! Host collaborators available while building filter factories.

use std::sync::Arc;
use std::time::Duration;

use crate::filter::access_log::AccessLogManager;

/// Metrics scope. Names passed in are fully qualified.
pub trait Scope: Send + Sync {
    fn increment_counter(&self, name: &str, value: u64);
}

/// Runtime feature-flag sampler consulted at request time.
pub trait Runtime: Send + Sync {
    /// Returns true for roughly `default_percent`% of calls unless `key` is overridden.
    fn feature_enabled(&self, key: &str, default_percent: u64) -> bool;

    /// Integer value for `key`, or `default` when unset.
    fn get_integer(&self, key: &str, default: u64) -> u64;
}

/// Callback posted to a dispatcher.
pub type PostCb = Box<dyn FnOnce() + Send + 'static>;

/// Event loop owning a set of connections.
pub trait Dispatcher: Send + Sync {
    /// Run `cb` on the dispatcher as soon as possible.
    fn post(&self, cb: PostCb);

    /// Run `cb` on the dispatcher after `delay`.
    fn post_delayed(&self, delay: Duration, cb: PostCb);
}

/// Everything a filter factory may take from the host.
///
/// The context outlives every closure built from it; closures hold it by `Arc`.
pub trait FactoryContext: Send + Sync {
    fn scope(&self) -> Arc<dyn Scope>;
    fn runtime(&self) -> Arc<dyn Runtime>;
    fn dispatcher(&self) -> Arc<dyn Dispatcher>;
    fn access_log_manager(&self) -> &dyn AccessLogManager;
}
