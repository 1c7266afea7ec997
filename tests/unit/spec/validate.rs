use super::*;
use serde_json::json;

fn valid() -> Value {
    json!({
        "id": "demo",
        "version": "1.0.0",
        "title": "Demo",
        "description": "A demo",
        "tags": ["x"],
        "scene": {"layout": {"type": "grid"}, "layers": []},
        "explanations": {"global": {"title": "T", "content": "C"}},
        "interactions": {"onClick": "select"},
        "rendering": {"canvas": {"width": 800, "height": 600}}
    })
}

fn message_without(field: &str) -> String {
    let mut v = valid();
    v.as_object_mut().unwrap().remove(field);
    validate_spec(&v).unwrap_err().to_string()
}

#[test]
fn accepts_complete_document() {
    assert!(validate_spec(&valid()).is_ok());
}

#[test]
fn each_metadata_field_is_required() {
    for field in ["id", "version", "title", "description"] {
        assert_eq!(
            message_without(field),
            format!("validation error: Spec validation failed: missing or invalid {field}")
        );
    }
}

#[test]
fn empty_or_non_string_metadata_is_rejected() {
    let mut v = valid();
    v["title"] = json!("");
    assert!(validate_spec(&v).unwrap_err().to_string().ends_with("invalid title"));
    v["title"] = json!(3);
    assert!(validate_spec(&v).unwrap_err().to_string().ends_with("invalid title"));
}

#[test]
fn tags_must_be_array() {
    assert!(message_without("tags").ends_with("tags must be an array"));
    let mut v = valid();
    v["tags"] = json!("x");
    assert!(validate_spec(&v).is_err());
}

#[test]
fn sections_are_required() {
    assert!(message_without("scene").ends_with("missing or invalid scene definition"));
    assert!(message_without("explanations").ends_with("missing or invalid explanations"));
    assert!(message_without("interactions").ends_with("missing interactions config"));
    assert!(message_without("rendering").ends_with("missing rendering config"));
}

#[test]
fn scene_layers_must_be_array() {
    let mut v = valid();
    v["scene"] = json!({"layers": {}});
    assert!(validate_spec(&v).is_err());
}

#[test]
fn null_sections_are_rejected_and_empty_objects_accepted() {
    let mut v = valid();
    v["interactions"] = json!({});
    assert!(validate_spec(&v).is_ok());
    v["rendering"] = Value::Null;
    assert!(validate_spec(&v).is_err());
}

#[test]
fn errors_are_validation_errors() {
    let err = validate_spec(&json!({})).unwrap_err();
    assert!(matches!(err, SceneryError::Validation(_)));
}
