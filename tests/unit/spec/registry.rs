use super::*;

fn minimal(id: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "version": "0.1.0",
        "title": "Minimal",
        "description": "Minimal",
        "tags": [],
        "scene": {"layout": {"type": "stack"}, "layers": []},
        "explanations": {"global": {"title": "t", "content": "c"}},
        "interactions": {},
        "rendering": {}
    })
}

#[test]
fn bundled_runtime_loads() {
    let mut reg = SpecRegistry::with_builtins();
    assert!(reg.contains("js-runtime"));
    let spec = reg.load("js-runtime").unwrap();
    assert_eq!(spec.id, "js-runtime");
    assert_eq!(spec.scene.nodes().count(), 7);
    assert_eq!(spec.scene.edges().count(), 3);
    assert!(spec.scene.edges().all(|e| e.animated));
}

#[test]
fn loads_are_cached() {
    let mut reg = SpecRegistry::with_builtins();
    assert!(!reg.is_cached("js-runtime"));
    let a = reg.load("js-runtime").unwrap();
    let b = reg.load("js-runtime").unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert!(reg.is_cached("js-runtime"));

    reg.clear_cache();
    assert!(!reg.is_cached("js-runtime"));
    let c = reg.load("js-runtime").unwrap();
    assert!(!Arc::ptr_eq(&a, &c));
    assert_eq!(a, c);
}

#[test]
fn unknown_id_is_not_found() {
    let mut reg = SpecRegistry::new();
    let err = reg.load("nope").unwrap_err();
    assert_eq!(err.to_string(), "visualization 'nope' not found");
}

#[test]
fn failed_loads_are_not_cached() {
    let mut reg = SpecRegistry::new();
    reg.register_json("broken", "{");
    assert!(reg.load("broken").is_err());
    reg.preload("broken");
    assert!(!reg.is_cached("broken"));
}

#[test]
fn register_replaces_loader_and_cache() {
    let mut reg = SpecRegistry::new();
    reg.register("demo", || Ok(minimal("demo")));
    let first = reg.load("demo").unwrap();
    assert_eq!(first.title, "Minimal");

    reg.register("demo", || {
        let mut v = minimal("demo");
        v["title"] = "Replaced".into();
        Ok(v)
    });
    assert!(!reg.is_cached("demo"));
    assert_eq!(reg.load("demo").unwrap().title, "Replaced");
    assert_eq!(reg.list().len(), 1);
}

#[test]
fn list_keeps_registration_order() {
    let mut reg = SpecRegistry::with_builtins();
    reg.register("css-grid", || Ok(minimal("css-grid")));
    assert_eq!(
        reg.list(),
        vec![
            VisualizationEntry {
                id: "js-runtime".to_string(),
                title: "JavaScript Runtime".to_string(),
            },
            VisualizationEntry {
                id: "event-loop".to_string(),
                title: "Event Loop".to_string(),
            },
            VisualizationEntry {
                id: "css-grid".to_string(),
                title: "CSS Grid".to_string(),
            },
        ]
    );
}

#[test]
fn titles_expand_known_acronyms() {
    assert_eq!(format_title("js-runtime"), "JavaScript Runtime");
    assert_eq!(format_title("ts-type-system"), "TypeScript Type System");
    assert_eq!(format_title("html-parser"), "HTML Parser");
    assert_eq!(format_title("event-loop"), "Event Loop");
}
