use super::*;
use serde_json::json;

#[test]
fn or_auto_accepts_sentinel_and_values() {
    let p: Position = serde_json::from_value(json!("auto")).unwrap();
    assert!(p.is_auto());
    let p: Position = serde_json::from_value(json!({"x": 1.0, "y": 2.0})).unwrap();
    assert_eq!(p.value(), Some(Point::new(1.0, 2.0)));
    assert!(serde_json::from_value::<Position>(json!("center")).is_err());

    assert_eq!(serde_json::to_value(SizeSpec::Auto).unwrap(), json!("auto"));
}

#[test]
fn unknown_tags_are_preserved() {
    let k: LayoutKind = serde_json::from_value(json!("force-directed")).unwrap();
    assert_eq!(k, LayoutKind::Other("force-directed".to_string()));
    assert_eq!(serde_json::to_value(&k).unwrap(), json!("force-directed"));

    let p: PrimitiveKind = serde_json::from_value(json!("code-block")).unwrap();
    assert_eq!(p, PrimitiveKind::CodeBlock);
    assert_eq!(PrimitiveKind::from("sparkle").as_str(), "sparkle");
}

#[test]
fn minimal_node_takes_defaults() {
    let n: NodeDef = serde_json::from_value(json!({"id": "a", "type": "box"})).unwrap();
    assert!(n.position.is_auto());
    assert!(n.size.is_auto());
    assert!(!n.interactive && !n.selectable && !n.draggable);
    assert_eq!(n.col_span(), 1);
    assert_eq!(n.row_span(), 1);
}

#[test]
fn zero_spans_read_as_one() {
    let n: NodeDef = serde_json::from_value(
        json!({"id": "a", "type": "box", "layout": {"colSpan": 0, "rowSpan": 0, "column": 1}}),
    )
    .unwrap();
    assert_eq!(n.col_span(), 1);
    assert_eq!(n.row_span(), 1);
    assert_eq!(n.column_hint(), Some(1));
    assert_eq!(n.row_hint(), None);
}

#[test]
fn scene_definition_parses_camel_case() {
    let def = SceneDefinition::from_json_str(
        r##"{
            "layout": {"type": "grid", "config": {"columns": 3, "rowGap": 8, "columnWidth": 100}},
            "layers": [{
                "id": "main", "name": "Main", "zIndex": 2,
                "nodes": [{"id": "a", "type": "stack"}],
                "edges": [{"id": "e", "from": "a", "to": "b", "type": "line",
                           "style": {"color": "#fff", "width": 1, "dashArray": [2, 2]}}]
            }]
        }"##,
    )
    .unwrap();
    assert_eq!(def.layout.config.columns, Some(3));
    assert_eq!(def.layout.config.row_gap, Some(8.0));
    assert_eq!(def.layout.config.column_width, Some(100.0));
    let layer = &def.layers[0];
    assert_eq!(layer.z_index, 2);
    assert!(layer.visible);
    assert_eq!(layer.edges[0].kind, EdgeKind::Line);
    assert_eq!(layer.edges[0].style.dash_array, Some(vec![2.0, 2.0]));
    assert_eq!(def.theme, ThemeConfig::default());
    assert_eq!(def.nodes().count(), 1);
    assert_eq!(def.edges().count(), 1);
}

#[test]
fn edge_style_defaults() {
    let e: EdgeDef = serde_json::from_value(json!({"id": "e", "from": "a", "to": "b"})).unwrap();
    assert_eq!(e.kind, EdgeKind::Arrow);
    assert_eq!(e.style.color, "#64748b");
    assert_eq!(e.style.width, 2.0);
    assert!(!e.animated);
}

#[test]
fn responsive_columns_pick_breakpoint() {
    let config: LayoutConfig = serde_json::from_value(json!({
        "columns": 3,
        "responsive": {"mobile": {"columns": 1}, "desktop": {"columns": 4}}
    }))
    .unwrap();
    assert_eq!(config.columns_for_width(500.0), Some(1));
    assert_eq!(config.columns_for_width(800.0), Some(3));
    assert_eq!(config.columns_for_width(1024.0), Some(4));
    assert_eq!(LayoutConfig::default().columns_for_width(500.0), None);
}

#[test]
fn canvas_config_mixes_auto_and_numbers() {
    let c: CanvasConfig =
        serde_json::from_value(json!({"width": "auto", "height": 600, "pixelRatio": "auto"}))
            .unwrap();
    assert!(c.width.is_auto());
    assert_eq!(c.height.value(), Some(600.0));
    assert_eq!(c.background_color, "#0a0a0a");
}

#[test]
fn unknown_edge_type_is_kept() {
    let e: EdgeDef =
        serde_json::from_value(json!({"id": "e", "from": "a", "to": "b", "type": "zigzag"}))
            .unwrap();
    assert_eq!(e.kind, EdgeKind::Other("zigzag".to_string()));
    assert_eq!(serde_json::to_value(&e).unwrap()["type"], "zigzag");
    let curve: EdgeDef =
        serde_json::from_value(json!({"id": "e", "from": "a", "to": "b", "type": "curve"}))
            .unwrap();
    assert_eq!(curve.kind, EdgeKind::Curve);
}
