//! OpenAPI projection: `TValue` → [`Type`].

use super::TValue;
use crate::openapi::{StringFormat, Type};

/// Describe `value` as an OpenAPI type. Objects list every property as required.
pub fn open_api(value: &TValue) -> Type {
    match value {
        TValue::Int => Type::Integer,
        TValue::Number => Type::Number,
        TValue::String => Type::String { format: None, enum_: None },
        TValue::Uuid => Type::String { format: Some(StringFormat::Uuid), enum_: None },
        TValue::Bool => Type::Boolean,
        TValue::File => Type::String { format: Some(StringFormat::Binary), enum_: None },
        TValue::Enum { values } => Type::String { format: None, enum_: Some(values.to_vec()) },
        TValue::Array { items, min_items } => Type::Array {
            items: Box::new(open_api(items)),
            min_items: *min_items,
        },
        TValue::Object { properties } => Type::Object {
            properties: properties
                .iter()
                .map(|(key, value)| (key.clone(), open_api(value)))
                .collect(),
            required: properties.keys().cloned().collect(),
        },
    }
}
