//! Filter configuration subsystem.
//!
//! # Data Flow
//! ```text
//! config document (JSON/TOML)
//!     → loader.rs (parse into an untyped tree)
//!     → validation.rs (closed schema, types, ranges)
//!     → ValidatedConfig (typed, immutable)
//!     → filter::factory builds the shared fault policy and closure
//!
//! On reload:
//!     watcher.rs detects change
//!     → loader.rs re-parses
//!     → factory validates and builds a new generation
//!     → filter::listener swaps it in atomically
//! ```
//!
//! # Design Decisions
//! - Unknown fields are hard failures at every level
//! - A document is accepted in full or rejected in full
//! - No defaults: every recognized field is either given or absent

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use schema::{ConfigDocument, FaultSpec, ValidatedConfig};
pub use validation::{validate, SchemaError, SchemaErrorKind};
