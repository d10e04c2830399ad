//! Expressions accepted by the directive renderer: plain dot paths.

use htmlssr_core::RenderError;
use serde_json::Value as JsonValue;
use std::borrow::Cow;

/// Validates a dot path such as `site.title` or `links.0` and returns it trimmed.
pub(crate) fn parse_path(expression: &str) -> Result<&str, RenderError> {
    let path = expression.trim();
    let valid = !path.is_empty()
        && path.split('.').all(|segment| {
            !segment.is_empty()
                && segment
                    .bytes()
                    .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'$')
        });
    if valid {
        Ok(path)
    } else {
        Err(RenderError::UnsupportedExpression {
            expression: path.to_string(),
        })
    }
}

/// Splits an optional leading `!` off a condition.
pub(crate) fn parse_condition(expression: &str) -> Result<(bool, &str), RenderError> {
    let trimmed = expression.trim();
    match trimmed.strip_prefix('!') {
        Some(rest) => Ok((true, parse_path(rest)?)),
        None => Ok((false, parse_path(trimmed)?)),
    }
}

/// JavaScript truthiness.
pub(crate) fn is_truthy(value: Option<&JsonValue>) -> bool {
    match value {
        None | Some(JsonValue::Null) => false,
        Some(JsonValue::Bool(b)) => *b,
        Some(JsonValue::Number(n)) => n.as_f64().is_none_or(|f| f != 0.0 && !f.is_nan()),
        Some(JsonValue::String(s)) => !s.is_empty(),
        Some(JsonValue::Array(_)) | Some(JsonValue::Object(_)) => true,
    }
}

/// Text shown for a value: strings as-is, `null`/missing as nothing, containers as JSON.
pub(crate) fn display_value(value: Option<&JsonValue>) -> Cow<'_, str> {
    match value {
        None | Some(JsonValue::Null) => Cow::Borrowed(""),
        Some(JsonValue::String(s)) => Cow::Borrowed(s.as_str()),
        Some(other) => Cow::Owned(other.to_string()),
    }
}
