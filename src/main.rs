//! Mongo proxy filter configuration tool.
//!
//! Loads a mongo proxy filter configuration, validates it, builds the filter
//! factory and proves it by attaching a filter to a probe connection.
//!
//! # Architecture Overview
//!
//! ```text
//!   config file ──▶ config::loader ──▶ ConfigDocument
//!                                          │
//!                                          ▼
//!   FactoryRegistry["mongo_proxy"] ──▶ create_filter_factory
//!                                          │  validate → fault::build → AccessLog
//!                                          ▼
//!                                 NetworkFilterFactoryCb
//!                                          │
//!                                          ▼
//!                                  FilterChainSlot ◀── watcher (reload)
//!                                          │
//!                       new connection ────┴──▶ ProxyFilter
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use clap::Parser;

use mongo_filter_config::config::loader::load_document;
use mongo_filter_config::config::watcher::ConfigWatcher;
use mongo_filter_config::filter::proxy::FILTER_NAME;
use mongo_filter_config::filter::{
    FactoryContext, FilterChainSlot, FilterManager, NetworkFilterPtr, ProxyFilter,
};
use mongo_filter_config::host::{ProcessContext, StaticRuntime};
use mongo_filter_config::observability::{logging, metrics};
use mongo_filter_config::FactoryRegistry;

#[derive(Parser, Debug)]
#[command(
    name = "mongo-filter-config",
    version,
    about = "Validate and load a mongo proxy filter configuration"
)]
struct Args {
    /// Filter configuration document (JSON, or TOML with a .toml extension).
    #[arg(short, long)]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Expose Prometheus metrics on this address.
    #[arg(long)]
    metrics_address: Option<String>,

    /// Keep running and reload the filter factory when the file changes.
    #[arg(long)]
    watch: bool,
}

/// Connection stand-in that records what the filter chain installed.
#[derive(Default)]
struct ProbeConnection {
    filters: Vec<NetworkFilterPtr>,
}

impl FilterManager for ProbeConnection {
    fn add_filter(&mut self, filter: NetworkFilterPtr) {
        self.filters.push(filter);
    }
}

fn probe(slot: &FilterChainSlot) {
    let mut connection = ProbeConnection::default();
    let generation = slot.install(&mut connection);
    for filter in &connection.filters {
        if let Some(proxy) = filter.as_any().downcast_ref::<ProxyFilter>() {
            tracing::info!(
                generation,
                filter = filter.name(),
                stat_prefix = proxy.stat_prefix(),
                fault = %proxy.fault_policy(),
                "Probe connection received filter"
            );
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    logging::init_logging(&args.log_level);

    tracing::info!("mongo-filter-config v0.1.0 starting");

    if let Some(address) = &args.metrics_address {
        if let Ok(addr) = address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(metrics_address = %address, "Failed to parse metrics address");
        }
    }

    let registry = FactoryRegistry::with_builtin();
    let factory = registry.get(FILTER_NAME)?;
    let context: Arc<dyn FactoryContext> =
        Arc::new(ProcessContext::from_current_runtime(StaticRuntime::new()));

    let doc = load_document(&args.config)?;
    let cb = factory.create_filter_factory(&doc, Arc::clone(&context))?;
    let slot = FilterChainSlot::new(cb);
    probe(&slot);

    if !args.watch {
        return Ok(());
    }

    let (watcher, mut updates) = ConfigWatcher::new(&args.config);
    let _watcher = watcher.run()?;

    loop {
        tokio::select! {
            Some(doc) = updates.recv() => {
                match factory.create_filter_factory(&doc, Arc::clone(&context)) {
                    Ok(cb) => {
                        slot.swap(cb);
                        probe(&slot);
                    }
                    Err(e) => {
                        tracing::error!(
                            error = %e,
                            generation = slot.generation(),
                            "Keeping current filter factory"
                        );
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutdown signal received");
                break;
            }
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
