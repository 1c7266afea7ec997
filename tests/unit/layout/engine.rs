use super::*;
use serde_json::json;

use crate::foundation::core::Size;

fn scene(layout: serde_json::Value, nodes: serde_json::Value) -> SceneDefinition {
    serde_json::from_value(json!({
        "layout": layout,
        "layers": [{"id": "main", "nodes": nodes}]
    }))
    .unwrap()
}

fn boxes(n: usize) -> serde_json::Value {
    json!((1..=n)
        .map(|i| json!({"id": format!("node{i}"), "type": "box"}))
        .collect::<Vec<_>>())
}

#[test]
fn grid_wraps_after_column_count() {
    let def = scene(json!({"type": "grid", "config": {"columns": 2, "gap": 24}}), boxes(3));
    let out = apply_layout(&def);
    assert_eq!(out.len(), 3);
    assert_eq!(out.bounds("node1"), Some(Bounds::new(40.0, 40.0, 340.0, 200.0)));
    assert_eq!(out.bounds("node2"), Some(Bounds::new(404.0, 40.0, 340.0, 200.0)));
    assert_eq!(out.bounds("node3"), Some(Bounds::new(40.0, 264.0, 340.0, 200.0)));
}

#[test]
fn flow_packs_left_to_right() {
    let def = scene(json!({"type": "flow", "config": {"gap": 24, "padding": 40}}), boxes(2));
    let out = apply_layout(&def);
    let a = out.bounds("node1").unwrap();
    let b = out.bounds("node2").unwrap();
    assert_eq!((a.x, a.y), (40.0, 40.0));
    assert_eq!((b.x, b.y), (364.0, 40.0));
}

#[test]
fn unknown_layout_falls_back_to_stack() {
    let def = scene(json!({"type": "force-directed"}), boxes(2));
    let mut diagnostics = Diagnostics::new();
    let out = apply_layout_with(&def, &LayoutOptions::default(), &mut diagnostics);

    assert_eq!(
        diagnostics.items(),
        &[Diagnostic::UnknownLayout {
            requested: "force-directed".to_string()
        }]
    );
    assert_eq!(out.bounds("node1"), Some(Bounds::new(40.0, 40.0, 300.0, 200.0)));
    assert_eq!(out.bounds("node2"), Some(Bounds::new(40.0, 264.0, 300.0, 200.0)));
}

#[test]
fn layout_does_not_modify_definition() {
    let def = scene(
        json!({"type": "grid", "config": {"columns": 2}}),
        json!([
            {"id": "a", "type": "box", "layout": {"colSpan": 1}},
            {"id": "b", "type": "box"}
        ]),
    );
    let before = def.clone();
    let out = apply_layout(&def);
    assert_eq!(def, before);
    assert_eq!(
        out.get("b").and_then(|p| p.cell),
        Some(GridCell { row: 0, column: 1 })
    );
}

#[test]
fn layout_is_deterministic() {
    let def = scene(
        json!({"type": "grid", "config": {"columns": 3, "masonry": true}}),
        json!([
            {"id": "a", "type": "stack"},
            {"id": "b", "type": "queue"},
            {"id": "c", "type": "heap"},
            {"id": "d", "type": "box", "layout": {"colSpan": 2}},
            {"id": "e", "type": "timeline"}
        ]),
    );
    assert_eq!(apply_layout(&def), apply_layout(&def));
}

#[test]
fn nodes_from_every_layer_are_placed() {
    let def: SceneDefinition = serde_json::from_value(json!({
        "layout": {"type": "stack"},
        "layers": [
            {"id": "bg", "nodes": [{"id": "a", "type": "box"}]},
            {"id": "fg", "nodes": [{"id": "b", "type": "box"}, {"id": "a", "type": "label"}]}
        ]
    }))
    .unwrap();
    let out = apply_layout(&def);
    assert_eq!(out.len(), 2);
    assert_eq!(out.bounds("b").map(|b| b.y), Some(264.0));
}

#[test]
fn viewport_width_selects_responsive_columns() {
    let def = scene(
        json!({"type": "grid", "config": {
            "columns": 3,
            "responsive": {"mobile": {"columns": 1}}
        }}),
        boxes(2),
    );
    let narrow = apply_layout_with(
        &def,
        &LayoutOptions {
            viewport_width: Some(500.0),
        },
        &mut Diagnostics::new(),
    );
    assert_eq!(narrow.bounds("node2").map(|b| (b.x, b.y)), Some((40.0, 264.0)));

    let wide = apply_layout_with(
        &def,
        &LayoutOptions {
            viewport_width: Some(1280.0),
        },
        &mut Diagnostics::new(),
    );
    assert_eq!(wide.bounds("node2").map(|b| (b.x, b.y)), Some((404.0, 40.0)));
}

#[test]
fn explicit_geometry_is_left_to_the_node() {
    let def = scene(
        json!({"type": "flow"}),
        json!([{"id": "a", "type": "box", "size": {"width": 120, "height": 80}}]),
    );
    let out = apply_layout(&def);
    assert_eq!(out.bounds("a").map(|b| b.size()), Some(Size::new(120.0, 80.0)));
}
