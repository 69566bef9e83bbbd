//! Validator projection: `TValue` → runtime validator source text.

use super::{quote, TValue};

/// Render the validator for `value`. A missing value validates an empty object.
pub fn schema(value: Option<&TValue>) -> String {
    match value {
        Some(value) => render(value),
        None => "S.Struct({})".to_string(),
    }
}

fn render(value: &TValue) -> String {
    match value {
        TValue::Int => "S.Int".to_string(),
        TValue::Number => "S.Number".to_string(),
        TValue::String => "S.String".to_string(),
        TValue::Uuid => "S.UUID".to_string(),
        TValue::Bool => "S.Boolean".to_string(),
        TValue::File => "S.instanceOf(File)".to_string(),
        TValue::Enum { values } => literal(values.iter()),
        TValue::Array { items, min_items } => {
            let base = format!("S.Array({})", render(items));
            match min_items {
                Some(n) if *n > 0 => format!("{base}.pipe(S.minItems({n}))"),
                _ => base,
            }
        }
        TValue::Object { properties } => {
            let props = properties
                .iter()
                .map(|(key, value)| format!("{}: {}", quote(key), render(value)))
                .collect::<Vec<_>>()
                .join(", ");
            format!("S.Struct({{{props}}})")
        }
    }
}

/// `S.Literal("A", "B")` over the given strings.
pub(crate) fn literal<'a>(values: impl Iterator<Item = &'a str>) -> String {
    let values = values.map(quote).collect::<Vec<_>>().join(", ");
    format!("S.Literal({values})")
}
