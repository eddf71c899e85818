use std::fmt;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};

use crate::definition::ArgType;
use crate::error::ParseError;

// Largest magnitude at which every integer is exactly representable in an f64.
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

/// A coerced argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    String(String),
    Number(f64),
    Boolean(bool),
}

impl ArgValue {
    pub fn value_type(&self) -> ArgType {
        match self {
            Self::String(_) => ArgType::String,
            Self::Number(_) => ArgType::Number,
            Self::Boolean(_) => ArgType::Boolean,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

fn exact_integer(n: f64) -> Option<i64> {
    (n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_EXACT_INT).then_some(n as i64)
}

// Integral numbers serialize as integers so that typed extraction into
// integer fields works (`3000`, not `3000.0`).
impl Serialize for ArgValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::String(s) => serializer.serialize_str(s),
            Self::Boolean(b) => serializer.serialize_bool(*b),
            Self::Number(n) => match exact_integer(*n) {
                Some(i) => serializer.serialize_i64(i),
                None => serializer.serialize_f64(*n),
            },
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Number(n) => match exact_integer(*n) {
                Some(i) => write!(f, "{i}"),
                None => write!(f, "{n}"),
            },
        }
    }
}

impl From<&str> for ArgValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<f64> for ArgValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for ArgValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

/// The result of a successful parse: json key -> value, in token order.
///
/// Optional arguments that were not supplied are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ParsedArgs {
    values: IndexMap<String, ArgValue>,
}

impl ParsedArgs {
    pub fn get(&self, field: &str) -> Option<&ArgValue> {
        self.values.get(field)
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(ArgValue::as_str)
    }

    pub fn get_number(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(ArgValue::as_number)
    }

    pub fn get_bool(&self, field: &str) -> Option<bool> {
        self.get(field).and_then(ArgValue::as_bool)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, ArgValue> {
        self.values.iter()
    }

    pub fn into_map(self) -> IndexMap<String, ArgValue> {
        self.values
    }

    /// Shape the mapping into a caller-defined type.
    ///
    /// Required arguments map onto plain fields, optional ones onto `Option<_>`.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, ParseError> {
        serde_json::to_value(self)
            .and_then(serde_json::from_value)
            .map_err(ParseError::Extract)
    }

    pub(crate) fn insert(&mut self, field: String, value: ArgValue) -> Option<ArgValue> {
        self.values.insert(field, value)
    }
}

impl<'a> IntoIterator for &'a ParsedArgs {
    type Item = (&'a String, &'a ArgValue);
    type IntoIter = indexmap::map::Iter<'a, String, ArgValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
