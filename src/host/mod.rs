//! In-process host collaborators.
//!
//! # Responsibilities
//! - Provide concrete `Runtime`, `Dispatcher` and `FactoryContext` for the binary
//! - Wire the metrics scope and access-log manager from observability
//!
//! # Design Decisions
//! - Collaborators are built once and shared by Arc across all closures

pub mod dispatcher;
pub mod runtime;

use std::sync::Arc;

use crate::filter::{AccessLogManager, Dispatcher, FactoryContext, Runtime, Scope};
use crate::observability::logging::TracingAccessLogManager;
use crate::observability::metrics::MetricsScope;

pub use dispatcher::TokioDispatcher;
pub use runtime::StaticRuntime;

/// Process-wide factory context.
pub struct ProcessContext {
    scope: Arc<dyn Scope>,
    runtime: Arc<dyn Runtime>,
    dispatcher: Arc<dyn Dispatcher>,
    access_log_manager: Box<dyn AccessLogManager>,
}

impl ProcessContext {
    pub fn new(
        scope: Arc<dyn Scope>,
        runtime: Arc<dyn Runtime>,
        dispatcher: Arc<dyn Dispatcher>,
        access_log_manager: Box<dyn AccessLogManager>,
    ) -> Self {
        Self {
            scope,
            runtime,
            dispatcher,
            access_log_manager,
        }
    }

    /// Context backed by the metrics facade, a static runtime, the current
    /// tokio runtime, and tracing-backed access logs.
    ///
    /// Must be called from within a tokio runtime.
    pub fn from_current_runtime(runtime: StaticRuntime) -> Self {
        Self::new(
            Arc::new(MetricsScope),
            Arc::new(runtime),
            Arc::new(TokioDispatcher::current()),
            Box::new(TracingAccessLogManager),
        )
    }
}

impl FactoryContext for ProcessContext {
    fn scope(&self) -> Arc<dyn Scope> {
        Arc::clone(&self.scope)
    }

    fn runtime(&self) -> Arc<dyn Runtime> {
        Arc::clone(&self.runtime)
    }

    fn dispatcher(&self) -> Arc<dyn Dispatcher> {
        Arc::clone(&self.dispatcher)
    }

    fn access_log_manager(&self) -> &dyn AccessLogManager {
        self.access_log_manager.as_ref()
    }
}
