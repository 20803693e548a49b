//! Handle the coercion of raw parameter values.

use query_engine_descriptor::descriptor::ast::{FilterValue, Scalar};

use crate::translation::parameters::ParameterValue;

/// Coerce a raw parameter into a filter value. Never fails: anything that is not a boolean
/// or a number stays the string it came in as.
pub fn coerce(value: &ParameterValue) -> FilterValue {
    match value {
        ParameterValue::Text(text) => FilterValue::Scalar(coerce_scalar(text)),
        ParameterValue::List(items) => {
            FilterValue::Membership(items.iter().map(|item| coerce_scalar(item)).collect())
        }
        ParameterValue::Object(object) => FilterValue::Opaque(
            object
                .iter()
                .map(|(key, value)| (key.clone(), value.to_json()))
                .collect(),
        ),
    }
}

/// `"true"` and `"false"` become booleans, numbers become numbers.
pub fn coerce_scalar(text: &str) -> Scalar {
    match text {
        "true" => Scalar::Bool(true),
        "false" => Scalar::Bool(false),
        _ => coerce_number(text),
    }
}

/// Numbers become numbers; everything else, booleans included, stays a string.
pub fn coerce_number(text: &str) -> Scalar {
    parse_number(text).map_or_else(|| Scalar::Text(text.to_string()), Scalar::Number)
}

/// The whole string must be an integer or a finite float. No surrounding whitespace.
fn parse_number(text: &str) -> Option<serde_json::Number> {
    if text.is_empty() {
        return None;
    }
    if let Ok(integer) = text.parse::<i64>() {
        return Some(integer.into());
    }
    text.parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
}
