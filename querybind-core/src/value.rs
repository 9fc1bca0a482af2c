//! The tagged value model shared between parameter sets and the query layer.
//!
//! A query placeholder can be bound to any member of a closed set of variants:
//! null, text, the integer and floating point families, booleans, timestamps,
//! and opaque composite values (BSON arrays and documents). [`Value`] is that
//! closed set; [`Number`] is the generic numeric subset accepted by the
//! untyped numeric setter.
//!
//! # Conversions
//!
//! Values are constructed explicitly per variant or through `From` impls for
//! the native Rust types:
//!
//! ```ignore
//! use querybind_core::value::Value;
//!
//! let name = Value::from("Alice");
//! let age = Value::from(30i64);
//! let missing = Value::Null;
//! ```
//!
//! Two foreign representations interoperate with the model:
//!
//! - **BSON** — the dynamic value model shared with the expression and
//!   execution layers. `Value -> Bson` is infallible (32-bit floats widen to
//!   doubles, BSON has no single-precision type); `Bson -> Value` is fallible
//!   because BSON carries types the query layer does not bind (ObjectId,
//!   binary blobs, regular expressions).
//! - **Plain JSON** — for callers that receive parameter bindings over an API
//!   boundary. JSON numbers bind as `Int64` or `Double`; arrays and objects
//!   bind as composites.

use bson::{Bson, Document, datetime::DateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::{ValueError, ValueResult};

/// A single value bindable to a named query placeholder.
///
/// The set of variants is closed: every value the query layer can bind is one
/// of these, and each variant is constructed and inspected explicitly. An
/// entry bound to `Null` is indistinguishable from an absent entry when it is
/// looked up.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// An explicitly absent value.
    #[default]
    Null,
    /// A text value.
    String(String),
    /// A 32-bit signed integer.
    Int32(i32),
    /// A 64-bit signed integer.
    Int64(i64),
    /// A single-precision floating point value.
    Float(f32),
    /// A double-precision floating point value.
    Double(f64),
    /// A boolean value. Backends without a native boolean type may store this
    /// as zero/non-zero.
    Bool(bool),
    /// A timestamp with millisecond precision.
    DateTime(DateTime),
    /// An opaque container value (a BSON array or document) passed through to
    /// the query layer unchanged.
    Composite(Bson),
}

impl Value {
    /// Returns `true` if this value is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the text content if this value is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the integer if this value is an `Int32`.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Int32(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the integer if this value is an `Int64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int64(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the float if this value is a `Float`.
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Value::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the float if this value is a `Double`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Double(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the boolean if this value is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the timestamp if this value is a `DateTime`.
    pub fn as_date(&self) -> Option<DateTime> {
        match self {
            Value::DateTime(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the wrapped container value if this value is a `Composite`.
    pub fn as_composite(&self) -> Option<&Bson> {
        match self {
            Value::Composite(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the name of this value's variant, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::String(_) => "String",
            Value::Int32(_) => "Int32",
            Value::Int64(_) => "Int64",
            Value::Float(_) => "Float",
            Value::Double(_) => "Double",
            Value::Bool(_) => "Bool",
            Value::DateTime(_) => "DateTime",
            Value::Composite(_) => "Composite",
        }
    }

    /// Converts this value into the shared BSON value model.
    ///
    /// `Float` widens to `Double` because BSON has no single-precision type.
    pub fn to_bson(&self) -> Bson {
        Bson::from(self.clone())
    }

    /// Binds a plain JSON value into the query value model.
    ///
    /// JSON numbers bind as `Int64` when integral and `Double` otherwise;
    /// arrays and objects bind as `Composite`.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::IntegerOutOfRange`] for unsigned integers above
    /// `i64::MAX`.
    pub fn from_json(value: JsonValue) -> ValueResult<Self> {
        Ok(match value {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(value) => Value::Bool(value),
            JsonValue::String(value) => Value::String(value),
            JsonValue::Number(number) => match integral(&number)? {
                Some(int) => Value::Int64(int),
                None => Value::Double(double(&number)?),
            },
            composite @ (JsonValue::Array(_) | JsonValue::Object(_)) => {
                Value::Composite(json_to_bson(composite)?)
            }
        })
    }

    /// Converts this value to a plain JSON value.
    ///
    /// Timestamps render as RFC 3339 strings; composites convert element by
    /// element.
    ///
    /// # Errors
    ///
    /// Returns an error for non-finite floats and for composites containing
    /// BSON types with no plain JSON representation.
    pub fn to_json(&self) -> ValueResult<JsonValue> {
        Ok(match self {
            Value::Null => JsonValue::Null,
            Value::String(value) => JsonValue::String(value.clone()),
            Value::Int32(value) => JsonValue::from(*value),
            Value::Int64(value) => JsonValue::from(*value),
            Value::Float(value) => json_number(f64::from(*value))?,
            Value::Double(value) => json_number(*value)?,
            Value::Bool(value) => JsonValue::Bool(*value),
            Value::DateTime(value) => JsonValue::String(value.to_chrono().to_rfc3339()),
            Value::Composite(value) => bson_to_json(value)?,
        })
    }
}

/// A generic numeric value, for callers that carry numbers without a
/// statically known width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Number {
    /// A 32-bit signed integer.
    Int32(i32),
    /// A 64-bit signed integer.
    Int64(i64),
    /// A single-precision floating point value.
    Float(f32),
    /// A double-precision floating point value.
    Double(f64),
}

impl Number {
    /// Returns this number normalized to `f64`.
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Int32(value) => f64::from(*value),
            Number::Int64(value) => *value as f64,
            Number::Float(value) => f64::from(*value),
            Number::Double(value) => *value,
        }
    }

    /// Returns this number as `i64` if it is one of the integer variants.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Int32(value) => Some(i64::from(*value)),
            Number::Int64(value) => Some(*value),
            _ => None,
        }
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Int32(value)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Int64(value)
    }
}

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Number::Float(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Double(value)
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        match value {
            Number::Int32(value) => Value::Int32(value),
            Number::Int64(value) => Value::Int64(value),
            Number::Float(value) => Value::Float(value),
            Number::Double(value) => Value::Double(value),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int32(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int64(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<DateTime> for Value {
    fn from(value: DateTime) -> Self {
        Value::DateTime(value)
    }
}

impl<Tz: chrono::TimeZone> From<chrono::DateTime<Tz>> for Value {
    fn from(value: chrono::DateTime<Tz>) -> Self {
        Value::DateTime(DateTime::from_chrono(value))
    }
}

impl From<Document> for Value {
    fn from(value: Document) -> Self {
        Value::Composite(Bson::Document(value))
    }
}

impl From<Vec<Bson>> for Value {
    fn from(value: Vec<Bson>) -> Self {
        Value::Composite(Bson::Array(value))
    }
}

/// `None` binds as an explicit `Null`, matching the nullable setters.
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => Value::Null,
        }
    }
}

impl From<Value> for Bson {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Bson::Null,
            Value::String(value) => Bson::String(value),
            Value::Int32(value) => Bson::Int32(value),
            Value::Int64(value) => Bson::Int64(value),
            Value::Float(value) => Bson::Double(f64::from(value)),
            Value::Double(value) => Bson::Double(value),
            Value::Bool(value) => Bson::Boolean(value),
            Value::DateTime(value) => Bson::DateTime(value),
            Value::Composite(value) => value,
        }
    }
}

impl TryFrom<Bson> for Value {
    type Error = ValueError;

    fn try_from(bson: Bson) -> ValueResult<Self> {
        Ok(match bson {
            Bson::Null => Value::Null,
            Bson::String(value) => Value::String(value),
            Bson::Int32(value) => Value::Int32(value),
            Bson::Int64(value) => Value::Int64(value),
            Bson::Double(value) => Value::Double(value),
            Bson::Boolean(value) => Value::Bool(value),
            Bson::DateTime(value) => Value::DateTime(value),
            composite @ (Bson::Array(_) | Bson::Document(_)) => Value::Composite(composite),
            other => return Err(ValueError::Unsupported(bson_type_name(&other))),
        })
    }
}

/// Names a BSON value's type for error messages.
fn bson_type_name(bson: &Bson) -> &'static str {
    match bson {
        Bson::ObjectId(_) => "ObjectId",
        Bson::Binary(_) => "Binary",
        Bson::RegularExpression(_) => "RegularExpression",
        Bson::JavaScriptCode(_) => "JavaScriptCode",
        Bson::JavaScriptCodeWithScope(_) => "JavaScriptCodeWithScope",
        Bson::Timestamp(_) => "Timestamp",
        Bson::Decimal128(_) => "Decimal128",
        Bson::Symbol(_) => "Symbol",
        Bson::DbPointer(_) => "DbPointer",
        Bson::Undefined => "Undefined",
        Bson::MaxKey => "MaxKey",
        Bson::MinKey => "MinKey",
        _ => "Bson",
    }
}

fn integral(number: &serde_json::Number) -> ValueResult<Option<i64>> {
    if let Some(int) = number.as_i64() {
        Ok(Some(int))
    } else if let Some(big) = number.as_u64() {
        Err(ValueError::IntegerOutOfRange(big))
    } else {
        Ok(None)
    }
}

fn double(number: &serde_json::Number) -> ValueResult<f64> {
    number
        .as_f64()
        .ok_or(ValueError::Unsupported("non-numeric JSON number"))
}

fn json_number(value: f64) -> ValueResult<JsonValue> {
    serde_json::Number::from_f64(value)
        .map(JsonValue::Number)
        .ok_or(ValueError::NonFiniteNumber(value))
}

fn json_to_bson(value: JsonValue) -> ValueResult<Bson> {
    Ok(match value {
        JsonValue::Null => Bson::Null,
        JsonValue::Bool(value) => Bson::Boolean(value),
        JsonValue::String(value) => Bson::String(value),
        JsonValue::Number(number) => match integral(&number)? {
            Some(int) => Bson::Int64(int),
            None => Bson::Double(double(&number)?),
        },
        JsonValue::Array(items) => Bson::Array(
            items
                .into_iter()
                .map(json_to_bson)
                .collect::<ValueResult<Vec<_>>>()?,
        ),
        JsonValue::Object(map) => {
            let mut document = Document::new();

            for (key, item) in map {
                document.insert(key, json_to_bson(item)?);
            }

            Bson::Document(document)
        }
    })
}

fn bson_to_json(bson: &Bson) -> ValueResult<JsonValue> {
    Ok(match bson {
        Bson::Null => JsonValue::Null,
        Bson::Boolean(value) => JsonValue::Bool(*value),
        Bson::Int32(value) => JsonValue::from(*value),
        Bson::Int64(value) => JsonValue::from(*value),
        Bson::Double(value) => json_number(*value)?,
        Bson::String(value) => JsonValue::String(value.clone()),
        Bson::DateTime(value) => JsonValue::String(value.to_chrono().to_rfc3339()),
        Bson::Array(items) => JsonValue::Array(
            items
                .iter()
                .map(bson_to_json)
                .collect::<ValueResult<Vec<_>>>()?,
        ),
        Bson::Document(document) => JsonValue::Object(
            document
                .iter()
                .map(|(key, item)| Ok((key.clone(), bson_to_json(item)?)))
                .collect::<ValueResult<serde_json::Map<_, _>>>()?,
        ),
        other => return Err(ValueError::Unsupported(bson_type_name(other))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    #[test]
    fn test_from_native_types() {
        assert_eq!(Value::from("Alice"), Value::String("Alice".to_string()));
        assert_eq!(Value::from(5i32), Value::Int32(5));
        assert_eq!(Value::from(5i64), Value::Int64(5));
        assert_eq!(Value::from(2.5f32), Value::Float(2.5));
        assert_eq!(Value::from(2.5f64), Value::Double(2.5));
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(None::<&str>), Value::Null);
        assert_eq!(Value::from(Some(7i64)), Value::Int64(7));
    }

    #[test]
    fn test_from_chrono_datetime() {
        let moment = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let value = Value::from(moment);

        assert_eq!(value.as_date(), Some(DateTime::from_chrono(moment)));
        assert_eq!(value.as_date().map(|d| d.to_chrono()), Some(moment));
    }

    #[test]
    fn test_accessors_are_per_variant() {
        let value = Value::Int32(5);

        assert_eq!(value.as_i32(), Some(5));
        assert_eq!(value.as_i64(), None);
        assert_eq!(value.as_f64(), None);
        assert!(!value.is_null());
        assert!(Value::Null.is_null());
    }

    #[test]
    fn test_number_normalization() {
        assert_eq!(Number::Int32(5).as_f64(), 5.0);
        assert_eq!(Number::Int64(5).as_f64(), 5.0);
        assert_eq!(Number::Float(2.5).as_f64(), 2.5);
        assert_eq!(Number::Double(2.5).as_i64(), None);
        assert_eq!(Number::Int32(5).as_i64(), Some(5));
        assert_eq!(Value::from(Number::from(2.5f64)), Value::Double(2.5));
    }

    #[test]
    fn test_bson_round_trip() {
        let values = vec![
            Value::Null,
            Value::String("text".to_string()),
            Value::Int32(1),
            Value::Int64(2),
            Value::Double(3.5),
            Value::Bool(true),
            Value::DateTime(DateTime::from_millis(1_700_000_000_000)),
            Value::Composite(Bson::Document(doc! { "nested": [1, 2, 3] })),
        ];

        for value in values {
            let round_tripped = Value::try_from(value.to_bson()).unwrap();
            assert_eq!(round_tripped, value);
        }
    }

    #[test]
    fn test_float_widens_to_double_in_bson() {
        assert_eq!(Value::Float(2.5).to_bson(), Bson::Double(2.5));
    }

    #[test]
    fn test_out_of_model_bson_is_rejected() {
        assert_eq!(
            Value::try_from(Bson::Undefined),
            Err(ValueError::Unsupported("Undefined"))
        );
        assert_eq!(
            Value::try_from(Bson::MaxKey),
            Err(ValueError::Unsupported("MaxKey"))
        );
    }

    #[test]
    fn test_from_json_numbers() {
        assert_eq!(Value::from_json(json!(5)).unwrap(), Value::Int64(5));
        assert_eq!(Value::from_json(json!(2.5)).unwrap(), Value::Double(2.5));
        assert_eq!(
            Value::from_json(json!(u64::MAX)),
            Err(ValueError::IntegerOutOfRange(u64::MAX))
        );
    }

    #[test]
    fn test_from_json_composites() {
        let value = Value::from_json(json!({ "tags": ["a", "b"], "count": 2 })).unwrap();

        assert_eq!(
            value.as_composite(),
            Some(&Bson::Document(doc! { "tags": ["a", "b"], "count": 2i64 }))
        );
    }

    #[test]
    fn test_to_json() {
        assert_eq!(Value::Int32(5).to_json().unwrap(), json!(5));
        assert_eq!(Value::Float(0.5).to_json().unwrap(), json!(0.5));
        assert_eq!(
            Value::Composite(Bson::Array(vec![Bson::Int64(1), Bson::Null]))
                .to_json()
                .unwrap(),
            json!([1, null])
        );
        assert!(matches!(
            Value::Double(f64::NAN).to_json(),
            Err(ValueError::NonFiniteNumber(_))
        ));
    }

    #[test]
    fn test_serde_round_trip() {
        let value = Value::DateTime(DateTime::from_millis(1_700_000_000_000));
        let encoded = serde_json::to_string(&value).unwrap();
        let decoded: Value = serde_json::from_str(&encoded).unwrap();

        assert_eq!(decoded, value);
    }
}
