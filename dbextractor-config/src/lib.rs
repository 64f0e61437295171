//! Configuration schema and value objects for database extraction jobs.
//!
//! An extraction job is driven by a JSON document with a `parameters` map.
//! This crate validates such documents against one of three schema
//! variants, applies defaults, and exposes typed value objects over the
//! validated data.
//!
//! # Stages
//! 1. [`definition`] selects the shape: many rows, one row, or connection only
//! 2. [`schema`] checks types, presence, emptiness and minimums, then runs
//!    cross-field rules (query vs. table, incremental fetching)
//! 3. [`value_object`] builds immutable typed views from the validated data
//!
//! Validation is fail-fast: the first violation is returned with its path.
//!
//! # Security Guarantees
//! - Passwords and private keys are never written to logs, `Debug` output or
//!   serialized value objects
//! - Passwords held by value objects are zeroized on drop

pub mod config;
pub mod definition;
pub mod error;
pub mod logging;
pub mod schema;
pub mod value_object;

// Re-export commonly used types
pub use config::Config;
pub use definition::{
    ActionConfigRowDefinition, ConfigDefinition, ConfigRowDefinition, Definition, SchemaKind,
};
pub use error::{ConfigError, Result, StructuralKind};
pub use schema::{Node, NodeKind};
pub use value_object::{
    DatabaseConfig, ExportConfig, IncrementalFetchingConfig, InputTable, SslConnectionConfig,
};
