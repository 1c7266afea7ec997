use serde_json::Value;

use crate::foundation::error::{SceneryError, SceneryResult};

fn fail(what: &str) -> SceneryError {
    SceneryError::validation(format!("Spec validation failed: {what}"))
}

/// A required string field: present, a string, and non-empty.
fn is_text(v: Option<&Value>) -> bool {
    v.and_then(Value::as_str).is_some_and(|s| !s.is_empty())
}

/// Present and not `null`, `false`, `0` or `""`.
fn is_truthy(v: Option<&Value>) -> bool {
    match v {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(_) => true,
    }
}

/// Top-level shape check of a visualization document.
///
/// Only required metadata and section presence are checked; nodes and edges are accepted as
/// written and deserialize errors surface later as [`SceneryError::Serde`].
pub fn validate_spec(spec: &Value) -> SceneryResult<()> {
    for field in ["id", "version", "title", "description"] {
        if !is_text(spec.get(field)) {
            return Err(fail(&format!("missing or invalid {field}")));
        }
    }
    if !spec.get("tags").is_some_and(Value::is_array) {
        return Err(fail("tags must be an array"));
    }
    let layers = spec.get("scene").and_then(|s| s.get("layers"));
    if !layers.is_some_and(Value::is_array) {
        return Err(fail("missing or invalid scene definition"));
    }
    let global = spec.get("explanations").and_then(|e| e.get("global"));
    if !is_truthy(global) {
        return Err(fail("missing or invalid explanations"));
    }
    if !is_truthy(spec.get("interactions")) {
        return Err(fail("missing interactions config"));
    }
    if !is_truthy(spec.get("rendering")) {
        return Err(fail("missing rendering config"));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/spec/validate.rs"]
mod tests;
