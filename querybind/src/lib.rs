//! Main querybind crate providing named parameter binding for document queries.
//!
//! This crate is the primary entry point for users of the querybind project.
//! It re-exports the core types for binding named placeholder values into
//! prepared document database queries before execution.
//!
//! # Features
//!
//! - **Typed parameter sets** - Bind strings, integers, floats, booleans,
//!   timestamps, and composite values under names referenced by a query
//! - **Immutable snapshots** - Parameter sets are finalized on construction
//!   and safe to read from any thread without synchronization
//! - **Copy-then-extend** - Derive a new parameter set from an existing one
//!   without mutating the source
//! - **Predictive models** - Register models for prediction calls inside
//!   query expressions
//!
//! # Quick Start
//!
//! ```ignore
//! use querybind::prelude::*;
//!
//! // Bind values under the placeholder names the query references.
//! let params = Parameters::build(|p| {
//!     p.set_string("name", Some("Alice"));
//!     p.set_int("min_age", 21);
//! });
//!
//! // At evaluation time, the execution layer resolves each placeholder.
//! assert_eq!(params.value("name").as_str(), Some("Alice"));
//! assert_eq!(params.value("min_age").as_i32(), Some(21));
//!
//! // Unknown names resolve to null rather than failing.
//! assert!(params.value("unbound").is_null());
//! ```
//!
//! # Reusing a parameter set
//!
//! A finalized set can seed a new one; the copy owns its own entries and the
//! source never changes:
//!
//! ```ignore
//! use querybind::prelude::*;
//!
//! let defaults = Parameters::build(|p| {
//!     p.set_int("limit", 10);
//!     p.set_bool("include_deleted", false);
//! });
//!
//! let page_two = defaults.rebuild(|p| {
//!     p.set_int("offset", 10);
//! });
//!
//! assert_eq!(page_two.value("limit").as_i32(), Some(10));
//! assert!(defaults.value("offset").is_null());
//! ```
//!
//! # Binding from JSON
//!
//! Callers that receive bindings over an API boundary can convert a JSON
//! object directly:
//!
//! ```ignore
//! use querybind::prelude::*;
//! use serde_json::json;
//!
//! let bindings = match json!({ "city": "Oslo", "min_age": 21 }) {
//!     serde_json::Value::Object(map) => map,
//!     _ => unreachable!(),
//! };
//!
//! let params = Parameters::from_json(bindings).unwrap();
//! assert_eq!(params.value("min_age").as_i64(), Some(21));
//! ```

pub mod prelude;

pub use querybind_core::{error, parameters, prediction, value};

// Re-export BSON types for convenience
pub use bson;
