//! Named parameter containers for prepared document queries.
//!
//! A query expression may reference placeholders by name; before the query
//! runs, each placeholder is bound to a concrete value through a
//! [`Parameters`] set. The set is built once, inside a construction closure
//! that receives a [`ParametersBuilder`], and is immutable afterwards: the
//! execution layer only ever reads it, looking values up by name for every
//! placeholder it evaluates.
//!
//! # Building a parameter set
//!
//! ```ignore
//! use querybind_core::parameters::Parameters;
//!
//! let params = Parameters::build(|p| {
//!     p.set_string("name", Some("Alice"));
//!     p.set_int("min_age", 21);
//! });
//!
//! assert_eq!(params.value("name").as_str(), Some("Alice"));
//! assert!(params.value("unknown").is_null());
//! ```
//!
//! # Copy-then-extend
//!
//! An existing set can seed a new one; the source is deep-copied and never
//! observes the new set's entries:
//!
//! ```ignore
//! let defaults = Parameters::build(|p| { p.set_int("limit", 10); });
//! let narrowed = defaults.rebuild(|p| { p.set_int("limit", 5); });
//!
//! assert_eq!(defaults.value("limit").as_i32(), Some(10));
//! assert_eq!(narrowed.value("limit").as_i32(), Some(5));
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::{
    error::ValueResult,
    value::{Number, Value},
};

static NULL: Value = Value::Null;

/// An immutable set of named values bound to the placeholders of a prepared
/// query.
///
/// Each set exclusively owns its entries. Once constructed it exposes only
/// read access, so sharing a finalized set across threads requires no
/// synchronization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    values: HashMap<String, Value>,
}

impl Parameters {
    /// Creates a parameter set with no entries.
    ///
    /// Looking up any name on an empty set returns [`Value::Null`].
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a parameter set from a fresh, empty map.
    ///
    /// The closure runs synchronously exactly once with a builder bound to
    /// the new map; when it returns, the set is finalized. The builder is
    /// only reachable inside the closure, so it cannot outlive construction.
    pub fn build(configure: impl FnOnce(&mut ParametersBuilder)) -> Self {
        let mut builder = ParametersBuilder {
            values: HashMap::new(),
        };

        configure(&mut builder);

        Parameters {
            values: builder.values,
        }
    }

    /// Builds a new parameter set seeded with a copy of this set's entries.
    ///
    /// The closure may add or overwrite entries on the copy. The entries are
    /// deep-copied, never shared: this set is unchanged no matter what the
    /// closure does.
    pub fn rebuild(&self, configure: impl FnOnce(&mut ParametersBuilder)) -> Self {
        let mut builder = ParametersBuilder {
            values: self.values.clone(),
        };

        configure(&mut builder);

        Parameters {
            values: builder.values,
        }
    }

    /// Returns the value bound under `name`.
    ///
    /// Unknown names resolve to [`Value::Null`]; no error is raised, and the
    /// result is indistinguishable from an entry explicitly bound to null.
    /// The lookup is cheap and side-effect-free, so the execution layer may
    /// call it for every row it evaluates.
    pub fn value(&self, name: &str) -> &Value {
        self.values.get(name).unwrap_or(&NULL)
    }

    /// Returns an iterator over the bound parameter names, in no particular
    /// order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Returns the number of bound entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no entries are bound.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Binds a plain JSON object as a parameter set, one entry per key.
    ///
    /// Values convert through [`Value::from_json`]; see there for the number
    /// binding rules.
    ///
    /// # Errors
    ///
    /// Returns an error if any value falls outside the query value model.
    ///
    /// # Panics
    ///
    /// Panics if the object contains an empty key, like the setters do.
    pub fn from_json(bindings: serde_json::Map<String, JsonValue>) -> ValueResult<Self> {
        let mut converted = Vec::with_capacity(bindings.len());

        for (name, value) in bindings {
            converted.push((name, Value::from_json(value)?));
        }

        Ok(Self::build(|builder| {
            for (name, value) in converted {
                builder.set_value(name, value);
            }
        }))
    }

    /// Converts this parameter set to a plain JSON object.
    ///
    /// # Errors
    ///
    /// Returns an error if any entry has no plain JSON representation.
    pub fn to_json(&self) -> ValueResult<serde_json::Map<String, JsonValue>> {
        self.values
            .iter()
            .map(|(name, value)| Ok((name.clone(), value.to_json()?)))
            .collect()
    }
}

/// Write-only typed access to a parameter map under construction.
///
/// A builder exists only for the duration of a [`Parameters::build`] or
/// [`Parameters::rebuild`] closure. Every setter inserts or overwrites the
/// entry under the given name (the last write for a name wins), returns the
/// builder for chaining, and cannot fail.
///
/// Parameter names must be non-empty; an empty name is a contract violation
/// and panics rather than silently binding an unreachable entry.
#[derive(Debug)]
pub struct ParametersBuilder {
    values: HashMap<String, Value>,
}

impl ParametersBuilder {
    fn insert(&mut self, name: String, value: Value) -> &mut Self {
        assert!(!name.is_empty(), "query parameter names must not be empty");
        self.values.insert(name, value);
        self
    }

    /// Binds any value in the query value model under `name`.
    ///
    /// Accepts [`Value::Null`] (or `None`) to record an explicit unset, and
    /// composite values (BSON arrays and documents) for container-typed
    /// placeholders.
    pub fn set_value(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.insert(name.into(), value.into())
    }

    /// Binds a text value, or null, under `name`.
    pub fn set_string(&mut self, name: impl Into<String>, value: Option<&str>) -> &mut Self {
        self.insert(name.into(), value.map_or(Value::Null, Value::from))
    }

    /// Binds a generic numeric value, or null, under `name`.
    pub fn set_number(&mut self, name: impl Into<String>, value: Option<Number>) -> &mut Self {
        self.insert(name.into(), value.map_or(Value::Null, Value::from))
    }

    /// Binds a 32-bit signed integer under `name`.
    pub fn set_int(&mut self, name: impl Into<String>, value: i32) -> &mut Self {
        self.insert(name.into(), Value::Int32(value))
    }

    /// Binds a 64-bit signed integer under `name`.
    pub fn set_long(&mut self, name: impl Into<String>, value: i64) -> &mut Self {
        self.insert(name.into(), Value::Int64(value))
    }

    /// Binds a single-precision float under `name`.
    pub fn set_float(&mut self, name: impl Into<String>, value: f32) -> &mut Self {
        self.insert(name.into(), Value::Float(value))
    }

    /// Binds a double-precision float under `name`.
    pub fn set_double(&mut self, name: impl Into<String>, value: f64) -> &mut Self {
        self.insert(name.into(), Value::Double(value))
    }

    /// Binds a boolean under `name`.
    pub fn set_bool(&mut self, name: impl Into<String>, value: bool) -> &mut Self {
        self.insert(name.into(), Value::Bool(value))
    }

    /// Binds a timestamp, or null, under `name`.
    ///
    /// The timestamp is stored with millisecond precision.
    pub fn set_date(&mut self, name: impl Into<String>, value: Option<DateTime<Utc>>) -> &mut Self {
        self.insert(name.into(), value.map_or(Value::Null, Value::from))
    }
}
