//! Filter factory construction.
//!
//! # Responsibilities
//! - Validate the filter's configuration document
//! - Build the shared fault policy and optional access log once
//! - Return the closure the host calls for every new connection
//!
//! # Design Decisions
//! - Only SchemaError is observable; everything after validation is infallible
//! - Shared objects are captured by Arc, the context by Arc as well since it
//!   outlives every closure built from it
//! - Scope, runtime and dispatcher are resolved from the context per invocation,
//!   so a host may hand out worker-local dispatchers

use std::sync::Arc;

use crate::config::{validate, ConfigDocument, SchemaError};
use crate::fault;
use crate::filter::access_log::AccessLog;
use crate::filter::context::FactoryContext;
use crate::filter::proxy::{ProxyFilter, FILTER_NAME};
use crate::filter::{FilterManager, NetworkFilterFactoryCb, NetworkFilterType};
use crate::observability::metrics;

/// Namespace prepended to every mongo proxy stat prefix.
pub const STAT_NAMESPACE: &str = "mongo";

/// A network filter factory discoverable by name.
pub trait NamedNetworkFilterConfigFactory: Send + Sync {
    /// Discovery name used in listener configuration.
    fn name(&self) -> &'static str;

    fn filter_type(&self) -> NetworkFilterType;

    /// Validate `config` and build the per-connection closure.
    fn create_filter_factory(
        &self,
        config: &ConfigDocument,
        context: Arc<dyn FactoryContext>,
    ) -> Result<NetworkFilterFactoryCb, SchemaError>;
}

/// Factory for the mongo proxy filter.
#[derive(Debug, Default, Clone, Copy)]
pub struct MongoProxyFilterConfigFactory;

impl NamedNetworkFilterConfigFactory for MongoProxyFilterConfigFactory {
    fn name(&self) -> &'static str {
        FILTER_NAME
    }

    fn filter_type(&self) -> NetworkFilterType {
        NetworkFilterType::Both
    }

    fn create_filter_factory(
        &self,
        config: &ConfigDocument,
        context: Arc<dyn FactoryContext>,
    ) -> Result<NetworkFilterFactoryCb, SchemaError> {
        let validated = validate(config).map_err(|e| {
            tracing::warn!(filter = FILTER_NAME, error = %e, "Rejected filter configuration");
            metrics::record_config_rejected(FILTER_NAME, e.kind());
            e
        })?;

        let stat_prefix = format!("{}.{}.", STAT_NAMESPACE, validated.stat_prefix);

        let access_log = validated
            .access_log_path
            .as_deref()
            .map(|path| Arc::new(AccessLog::new(path, context.access_log_manager())));

        let fault_policy = fault::build(validated.fault.as_ref());

        tracing::info!(
            filter = FILTER_NAME,
            stat_prefix = %stat_prefix,
            fault = %fault_policy,
            access_log = ?access_log.as_ref().map(|log| log.path()),
            "Filter factory created"
        );
        metrics::record_factory_created(FILTER_NAME);

        Ok(Arc::new(move |filter_manager: &mut dyn FilterManager| {
            tracing::trace!(filter = FILTER_NAME, stat_prefix = %stat_prefix, "Installing filter");
            filter_manager.add_filter(Box::new(ProxyFilter::new(
                stat_prefix.clone(),
                context.scope(),
                context.runtime(),
                access_log.clone(),
                Arc::clone(&fault_policy),
                context.dispatcher(),
            )));
        }))
    }
}
