//! Per-connection mongo proxy filter instance.
//!
//! Built by the factory closure once per connection. Owns nothing mutable that
//! is shared: the fault policy and access log are read-only handles into the
//! configuration generation that created it.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::fault::FaultPolicy;
use crate::filter::access_log::AccessLog;
use crate::filter::context::{Dispatcher, Runtime, Scope};
use crate::filter::NetworkFilter;

/// Filter name reported to the host.
pub const FILTER_NAME: &str = "mongo_proxy";

/// Mongo wire-protocol proxy filter.
pub struct ProxyFilter {
    stat_prefix: String,
    scope: Arc<dyn Scope>,
    runtime: Arc<dyn Runtime>,
    access_log: Option<Arc<AccessLog>>,
    fault_policy: Arc<FaultPolicy>,
    dispatcher: Arc<dyn Dispatcher>,
}

impl ProxyFilter {
    pub fn new(
        stat_prefix: String,
        scope: Arc<dyn Scope>,
        runtime: Arc<dyn Runtime>,
        access_log: Option<Arc<AccessLog>>,
        fault_policy: Arc<FaultPolicy>,
        dispatcher: Arc<dyn Dispatcher>,
    ) -> Self {
        Self {
            stat_prefix,
            scope,
            runtime,
            access_log,
            fault_policy,
            dispatcher,
        }
    }

    /// Fully qualified prefix, e.g. `mongo.orders.`.
    pub fn stat_prefix(&self) -> &str {
        &self.stat_prefix
    }

    /// Increment `name` under this filter's stat prefix.
    pub fn inc_counter(&self, name: &str) {
        self.scope
            .increment_counter(&format!("{}{}", self.stat_prefix, name), 1);
    }

    pub fn runtime(&self) -> &Arc<dyn Runtime> {
        &self.runtime
    }

    pub fn access_log(&self) -> Option<&Arc<AccessLog>> {
        self.access_log.as_ref()
    }

    pub fn fault_policy(&self) -> &Arc<FaultPolicy> {
        &self.fault_policy
    }

    pub fn dispatcher(&self) -> &Arc<dyn Dispatcher> {
        &self.dispatcher
    }
}

impl NetworkFilter for ProxyFilter {
    fn name(&self) -> &str {
        FILTER_NAME
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Debug for ProxyFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyFilter")
            .field("stat_prefix", &self.stat_prefix)
            .field("access_log", &self.access_log)
            .field("fault_policy", &self.fault_policy)
            .finish_non_exhaustive()
    }
}
