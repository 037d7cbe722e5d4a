//! Mongo proxy network filter configuration library

pub mod config;
pub mod fault;
pub mod filter;
pub mod host;
pub mod observability;

pub use config::{validate, ConfigDocument, SchemaError, SchemaErrorKind, ValidatedConfig};
pub use fault::FaultPolicy;
pub use filter::{FactoryRegistry, FilterChainSlot, MongoProxyFilterConfigFactory};
