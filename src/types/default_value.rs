//! Default-value projection: `TValue` → source text of an example value.
//!
//! The example satisfies every structural constraint. Arrays get `minItems + 1`
//! elements so that even unconstrained arrays show one item. Output grows with
//! `minItems`; values read from definition files are capped at
//! [`MAX_MIN_ITEMS`](super::MAX_MIN_ITEMS).

use super::{quote, TValue};

pub const STRING_PLACEHOLDER: &str = "string";
pub const UUID_PLACEHOLDER: &str = "00000000-0000-0000-0000-000000000000";
pub const FILE_PLACEHOLDER: &str = r#"new File([], "file")"#;

/// Render an example for `value`. A missing value renders an empty object.
pub fn default_value(value: Option<&TValue>) -> String {
    match value {
        Some(value) => render(value),
        None => "{}".to_string(),
    }
}

fn render(value: &TValue) -> String {
    match value {
        TValue::Int | TValue::Number => "0".to_string(),
        TValue::String => quote(STRING_PLACEHOLDER),
        TValue::Uuid => quote(UUID_PLACEHOLDER),
        TValue::Bool => "false".to_string(),
        TValue::File => FILE_PLACEHOLDER.to_string(),
        TValue::Enum { values } => quote(values.first()),
        TValue::Array { items, min_items } => {
            let count = min_items
                .map_or(0, |n| usize::try_from(n).unwrap_or(usize::MAX))
                .saturating_add(1);
            let item = render(items);
            format!("[{}]", vec![item; count].join(", "))
        }
        TValue::Object { properties } => {
            let props = properties
                .iter()
                .map(|(key, value)| format!("{}: {}", quote(key), render(value)))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{{{props}}}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::*;

    #[test]
    fn scalars() {
        assert_eq!(default_value(Some(&int())), "0");
        assert_eq!(default_value(Some(&number())), "0");
        assert_eq!(default_value(Some(&string())), r#""string""#);
        assert_eq!(
            default_value(Some(&uuid())),
            r#""00000000-0000-0000-0000-000000000000""#
        );
        assert_eq!(default_value(Some(&bool())), "false");
        assert_eq!(default_value(Some(&file())), r#"new File([], "file")"#);
    }

    #[test]
    fn enum_defaults_to_first_value() {
        assert_eq!(default_value(Some(&enum_(["A", "B"]).unwrap())), r#""A""#);
    }

    #[test]
    fn array_has_min_items_plus_one_elements() {
        assert_eq!(default_value(Some(&array_min(int(), 2))), "[0, 0, 0]");
        assert_eq!(default_value(Some(&array(int()))), "[0]");
        assert_eq!(default_value(Some(&array_min(int(), 0))), "[0]");
        assert_eq!(
            default_value(Some(&non_empty_array(array(bool())))),
            "[[false], [false]]"
        );
    }

    #[test]
    fn array_at_the_limit_renders_every_element() {
        let text = default_value(Some(&array_min(bool(), MAX_MIN_ITEMS)));
        assert_eq!(text.matches("false").count(), MAX_MIN_ITEMS as usize + 1);
        assert!(text.starts_with("[false, ") && text.ends_with(", false]"));
    }

    #[test]
    fn object_defaults_in_declaration_order() {
        let o = object([("ok", bool()), ("count", int()), ("tags", array(string()))]);
        assert_eq!(
            default_value(Some(&o)),
            r#"{"ok": false, "count": 0, "tags": ["string"]}"#
        );
    }

    #[test]
    fn absent_value_is_empty_object() {
        assert_eq!(default_value(None), "{}");
        assert_eq!(default_value(Some(&object::<_, &str>([]))), "{}");
    }
}
