//! Shared mocks for filter factory tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use mongo_filter_config::filter::context::PostCb;
use mongo_filter_config::filter::{
    AccessLogFile, AccessLogManager, Dispatcher, FactoryContext, FilterManager, NetworkFilterPtr,
    ProxyFilter, Runtime, Scope,
};

/// Connection that keeps every filter added to it.
#[derive(Default)]
pub struct MockConnection {
    pub filters: Vec<NetworkFilterPtr>,
}

impl MockConnection {
    pub fn add_filter_calls(&self) -> usize {
        self.filters.len()
    }

    pub fn proxy_filter(&self, index: usize) -> &ProxyFilter {
        self.filters[index]
            .as_any()
            .downcast_ref::<ProxyFilter>()
            .expect("filter is a ProxyFilter")
    }
}

impl FilterManager for MockConnection {
    fn add_filter(&mut self, filter: NetworkFilterPtr) {
        self.filters.push(filter);
    }
}

/// Scope that remembers counter increments.
#[derive(Default)]
pub struct RecordingScope {
    pub counters: Mutex<Vec<(String, u64)>>,
}

impl Scope for RecordingScope {
    fn increment_counter(&self, name: &str, value: u64) {
        self.counters.lock().unwrap().push((name.to_string(), value));
    }
}

pub struct NullRuntime;

impl Runtime for NullRuntime {
    fn feature_enabled(&self, _key: &str, _default_percent: u64) -> bool {
        false
    }

    fn get_integer(&self, _key: &str, default: u64) -> u64 {
        default
    }
}

pub struct NullDispatcher;

impl Dispatcher for NullDispatcher {
    fn post(&self, _cb: PostCb) {}

    fn post_delayed(&self, _delay: Duration, _cb: PostCb) {}
}

struct NullAccessLogFile;

impl AccessLogFile for NullAccessLogFile {
    fn write(&self, _line: &str) {}
}

/// Access-log manager that records requested paths.
#[derive(Default)]
pub struct MockAccessLogManager {
    pub opened: Mutex<Vec<String>>,
}

impl AccessLogManager for MockAccessLogManager {
    fn create_access_log(&self, path: &str) -> Arc<dyn AccessLogFile> {
        self.opened.lock().unwrap().push(path.to_string());
        Arc::new(NullAccessLogFile)
    }
}

/// Factory context built from the mocks above.
pub struct MockFactoryContext {
    pub scope: Arc<RecordingScope>,
    pub access_log_manager: MockAccessLogManager,
}

impl MockFactoryContext {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            scope: Arc::new(RecordingScope::default()),
            access_log_manager: MockAccessLogManager::default(),
        })
    }

    pub fn opened_logs(&self) -> Vec<String> {
        self.access_log_manager.opened.lock().unwrap().clone()
    }
}

impl FactoryContext for MockFactoryContext {
    fn scope(&self) -> Arc<dyn Scope> {
        self.scope.clone()
    }

    fn runtime(&self) -> Arc<dyn Runtime> {
        Arc::new(NullRuntime)
    }

    fn dispatcher(&self) -> Arc<dyn Dispatcher> {
        Arc::new(NullDispatcher)
    }

    fn access_log_manager(&self) -> &dyn AccessLogManager {
        &self.access_log_manager
    }
}
