//! Core types for binding named values into prepared document database queries.
//!
//! This crate is the core of the querybind project and provides:
//!
//! - **Value model** ([`value`]) - The closed, tagged set of value types a
//!   query placeholder can be bound to
//! - **Parameter containers** ([`parameters`]) - Immutable named-value sets
//!   with a scoped builder construction idiom
//! - **Predictive models** ([`prediction`]) - Registration of models resolved
//!   by prediction calls in query expressions
//! - **Error handling** ([`error`]) - Error types for value conversions
//!
//! # Example
//!
//! ```ignore
//! use querybind_core::parameters::Parameters;
//!
//! let params = Parameters::build(|p| {
//!     p.set_string("city", Some("Oslo"));
//!     p.set_int("min_age", 21);
//! });
//!
//! // The execution layer looks placeholders up by name.
//! assert_eq!(params.value("city").as_str(), Some("Oslo"));
//! ```

#[allow(unused_extern_crates)]
extern crate self as querybind_core;

pub mod error;
pub mod parameters;
pub mod prediction;
pub mod value;
