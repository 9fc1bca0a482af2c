//! Convenient re-exports of commonly used types from querybind.
//!
//! Import this prelude module to quickly access the most frequently used
//! types without needing to import from multiple sub-modules:
//!
//! ```ignore
//! use querybind::prelude::*;
//! ```
//!
//! This provides access to:
//! - Parameter sets and their builder
//! - The query value model
//! - Predictive model registration
//! - Error types

pub use querybind_core::{
    error::{ValueError, ValueResult},
    parameters::{Parameters, ParametersBuilder},
    prediction::{PredictionRegistry, PredictiveModel},
    value::{Number, Value},
};
