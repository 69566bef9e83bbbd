//! Schema values (`TValue`) and their three projections.
//!
//! A `TValue` describes the shape of a request or response body. Every value can be
//! projected three ways, and all three must stay in lockstep:
//! - [`schema`]: source text of a runtime validator,
//! - [`open_api`]: the OpenAPI type description,
//! - [`default_value`]: source text of an example value satisfying the shape.
//!
//! Each projection is an exhaustive `match` without a wildcard arm, so adding a variant
//! fails to compile until all three handle it.
pub mod default_value;
pub mod openapi_type;
pub mod validator;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub use default_value::default_value;
pub use openapi_type::open_api;
pub use validator::schema;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// Closed, recursive description of a value shape.
///
/// Deserialized through `TValueRepr`, which rejects keys a variant does not declare
/// and any `minItems` above [`MAX_MIN_ITEMS`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", try_from = "TValueRepr")]
pub enum TValue {
    Int,
    Number,
    String,
    Uuid,
    Bool,
    File,
    Enum {
        values: EnumValues,
    },
    Array {
        items: Box<TValue>,
        #[serde(rename = "minItems", default, skip_serializing_if = "Option::is_none")]
        min_items: Option<u32>,
    },
    Object {
        /// Declaration order is significant for every projection.
        properties: IndexMap<String, TValue>,
    },
}

/// Largest `minItems` a definition may declare. The default-value projection renders
/// `minItems + 1` elements, so the bound keeps generated examples to a sane size.
pub const MAX_MIN_ITEMS: u32 = 1024;

/// Wire form of [`TValue`]. Scalars are empty struct variants because serde skips
/// unknown keys on internally tagged unit variants even with `deny_unknown_fields`.
#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", deny_unknown_fields)]
enum TValueRepr {
    Int {},
    Number {},
    String {},
    Uuid {},
    Bool {},
    File {},
    Enum {
        values: EnumValues,
    },
    Array {
        items: Box<TValue>,
        #[serde(rename = "minItems", default)]
        min_items: Option<u32>,
    },
    Object {
        properties: IndexMap<String, TValue>,
    },
}

/// Non-empty, ordered list of enum literals. The first one doubles as the default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct EnumValues {
    first: String,
    rest: Vec<String>,
}

impl EnumValues {
    pub fn new(values: Vec<String>) -> Result<Self> {
        let mut values = values.into_iter();
        let first = values.next().ok_or(Error::EmptyEnum)?;
        Ok(Self { first, rest: values.collect() })
    }
    pub fn first(&self) -> &str {
        &self.first
    }
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.first.as_str()).chain(self.rest.iter().map(String::as_str))
    }
    pub fn to_vec(&self) -> Vec<String> {
        self.iter().map(str::to_owned).collect()
    }
}

impl TryFrom<Vec<String>> for EnumValues {
    type Error = Error;
    fn try_from(values: Vec<String>) -> Result<Self> {
        Self::new(values)
    }
}

impl From<EnumValues> for Vec<String> {
    fn from(values: EnumValues) -> Self {
        let mut out = Vec::with_capacity(values.rest.len() + 1);
        out.push(values.first);
        out.extend(values.rest);
        out
    }
}

impl TryFrom<TValueRepr> for TValue {
    type Error = Error;
    fn try_from(repr: TValueRepr) -> Result<Self> {
        let value = match repr {
            TValueRepr::Int {} => TValue::Int,
            TValueRepr::Number {} => TValue::Number,
            TValueRepr::String {} => TValue::String,
            TValueRepr::Uuid {} => TValue::Uuid,
            TValueRepr::Bool {} => TValue::Bool,
            TValueRepr::File {} => TValue::File,
            TValueRepr::Enum { values } => TValue::Enum { values },
            TValueRepr::Array { min_items: Some(n), .. } if n > MAX_MIN_ITEMS => {
                return Err(Error::MinItemsTooLarge(n));
            }
            TValueRepr::Array { items, min_items } => TValue::Array { items, min_items },
            TValueRepr::Object { properties } => TValue::Object { properties },
        };
        Ok(value)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// FACTORIES
// ————————————————————————————————————————————————————————————————————————————

pub fn int() -> TValue {
    TValue::Int
}

pub fn number() -> TValue {
    TValue::Number
}

pub fn string() -> TValue {
    TValue::String
}

pub fn uuid() -> TValue {
    TValue::Uuid
}

pub fn bool() -> TValue {
    TValue::Bool
}

pub fn file() -> TValue {
    TValue::File
}

/// Fails with [`Error::EmptyEnum`] when `values` is empty.
pub fn enum_<I, S>(values: I) -> Result<TValue>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let values = EnumValues::new(values.into_iter().map(Into::into).collect())?;
    Ok(TValue::Enum { values })
}

pub fn array(items: TValue) -> TValue {
    TValue::Array { items: Box::new(items), min_items: None }
}

pub fn array_min(items: TValue, min_items: u32) -> TValue {
    TValue::Array { items: Box::new(items), min_items: Some(min_items) }
}

pub fn non_empty_array(items: TValue) -> TValue {
    array_min(items, 1)
}

/// Build an object; property order is kept as given. A repeated key keeps its first
/// position and takes the last value.
pub fn object<I, K>(properties: I) -> TValue
where
    I: IntoIterator<Item = (K, TValue)>,
    K: Into<String>,
{
    TValue::Object {
        properties: properties.into_iter().map(|(k, v)| (k.into(), v)).collect(),
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

/// Quote a string as a JSON (and therefore TypeScript) string literal.
pub(crate) fn quote(s: &str) -> String {
    serde_json::Value::from(s).to_string()
}
