//! Error types and result types for query value conversions.
//!
//! The parameter container itself has no recoverable failure modes; binding a
//! value under a name either succeeds or is a caller contract violation (an
//! empty parameter name), which panics. The fallible surface of this crate is
//! the value-model boundary: converting foreign representations (BSON, plain
//! JSON) into the closed query value model. Use [`ValueResult<T>`] as the
//! return type for those conversions.

use thiserror::Error;

/// Represents all possible errors that can occur when converting a foreign
/// value into the query value model.
///
/// Contract violations (empty parameter names, builder misuse) are not
/// represented here; they panic instead of returning an error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValueError {
    /// The value has a type outside the query value model.
    /// The argument names the offending type (e.g. a BSON `ObjectId`).
    #[error("Unsupported query value type: {0}")]
    Unsupported(&'static str),
    /// An unsigned integer too large to bind as a signed 64-bit query value.
    #[error("Integer {0} is out of range for a query value")]
    IntegerOutOfRange(u64),
    /// A floating point value (NaN or an infinity) that has no plain JSON
    /// representation.
    #[error("Non-finite number {0} cannot be represented in JSON")]
    NonFiniteNumber(f64),
}

/// A specialized `Result` type for query value conversions.
pub type ValueResult<T> = Result<T, ValueError>;
