use super::*;
use serde_json::json;

fn node(v: serde_json::Value) -> SceneNode {
    SceneNode::from_spec(&serde_json::from_value(v).unwrap(), "main")
}

fn rects(p: &Primitive) -> Vec<Rect> {
    p.shapes
        .iter()
        .filter_map(|s| match s {
            Shape::Rect { rect, .. } => Some(*rect),
            _ => None,
        })
        .collect()
}

#[test]
fn every_builtin_anchors_at_node_position() {
    let n = node(json!({"id": "a", "type": "box", "position": {"x": 12, "y": 34}}));
    for (kind, factory) in builtins() {
        let p = factory(&n);
        assert_eq!(p.origin, Point::new(12.0, 34.0), "{kind}");
    }
}

#[test]
fn box_lists_title_description_and_items() {
    let n = node(json!({
        "id": "web-apis", "type": "box",
        "size": {"width": 200, "height": 300},
        "content": {
            "title": "Web APIs",
            "description": "Browser-provided",
            "items": [{"id": "t", "label": "setTimeout"}, {"id": "f", "label": "fetch"}]
        }
    }));
    let p = box_primitive(&n);
    assert_eq!(
        p.texts().collect::<Vec<_>>(),
        vec!["Web APIs", "Browser-provided", "setTimeout", "fetch"]
    );
    let r = rects(&p);
    assert_eq!(r[0], Rect::new(0.0, 0.0, 200.0, 300.0));
    assert_eq!(r[1], Rect::new(16.0, 90.0, 184.0, 122.0));
    assert_eq!(r[2].y0, 130.0);
}

#[test]
fn stack_grows_upward_from_bottom() {
    let n = node(json!({
        "id": "s", "type": "stack",
        "size": {"width": 300, "height": 400},
        "content": {"items": [{"id": "1", "label": "main()"}, {"id": "2", "label": "foo()"}]}
    }));
    let p = stack_primitive(&n);
    // Container, then two rects (frame and accent bar) per item, last item first.
    assert_eq!(p.texts().collect::<Vec<_>>(), vec!["foo()", "main()"]);
    let r = rects(&p);
    assert_eq!(r.len(), 5);
    assert_eq!(r[1].y0, 400.0 - 16.0 - 44.0);
    assert_eq!(r[3].y0, 400.0 - 16.0 - 88.0);
}

#[test]
fn queue_draws_arrows_between_cells_that_fit() {
    let n = node(json!({
        "id": "q", "type": "queue",
        "size": {"width": 300, "height": 160},
        "content": {"items": [
            {"id": "1", "label": "a"}, {"id": "2", "label": "b"}, {"id": "3", "label": "c"}
        ]}
    }));
    let p = queue_primitive(&n);
    let arrows = p
        .shapes
        .iter()
        .filter(|s| matches!(s, Shape::Arrow { .. }))
        .count();
    // None after the last cell.
    assert_eq!(arrows, 2);
}

#[test]
fn heap_cells_are_dashed_in_two_columns() {
    let n = node(json!({
        "id": "h", "type": "heap",
        "size": {"width": 300, "height": 200},
        "content": {"items": [
            {"id": "1", "label": "{a}"}, {"id": "2", "label": "{b}"}, {"id": "3", "label": "{c}"}
        ]}
    }));
    let p = heap_primitive(&n);
    let cells: Vec<&Shape> = p
        .shapes
        .iter()
        .filter(|s| matches!(s, Shape::Rect { dash: Some(_), .. }))
        .collect();
    assert_eq!(cells.len(), 3);
    let r = rects(&p);
    assert_eq!(r[1].x0, 16.0);
    assert_eq!(r[2].x0, 16.0 + 126.0 + 8.0);
    assert_eq!(r[3].y0, 80.0 + 68.0);
}

#[test]
fn timeline_numbers_steps() {
    let n = node(json!({
        "id": "t", "type": "timeline",
        "content": {"items": [{"id": "1", "label": "sync"}, {"id": "2", "label": "micro"}]}
    }));
    let p = timeline_primitive(&n);
    assert_eq!(p.texts().collect::<Vec<_>>(), vec!["1", "sync", "2", "micro"]);
    let connectors = p
        .shapes
        .iter()
        .filter(|s| matches!(s, Shape::Line { .. }))
        .count();
    assert_eq!(connectors, 1);
}

#[test]
fn arrow_reads_direction_and_animation_from_data() {
    let n = node(json!({
        "id": "a", "type": "arrow",
        "size": {"width": 100, "height": 20},
        "data": {"direction": "down", "length": 60, "animated": true}
    }));
    let p = arrow_primitive(&n);
    match &p.shapes[0] {
        Shape::Arrow { points, dash, .. } => {
            assert_eq!(points, &vec![Point::new(50.0, 0.0), Point::new(50.0, 60.0)]);
            assert_eq!(dash.as_deref(), Some(&[10.0, 5.0][..]));
        }
        other => panic!("expected arrow, got {other:?}"),
    }
}

#[test]
fn label_backing_only_with_background() {
    let bare = node(json!({"id": "l", "type": "label", "content": {"title": "note"}}));
    assert!(rects(&label_primitive(&bare)).is_empty());

    let backed = node(json!({
        "id": "l", "type": "label",
        "style": {"background": "#fff"},
        "content": {"title": "note"}
    }));
    let p = label_primitive(&backed);
    assert_eq!(rects(&p).len(), 1);
    match &p.shapes[1] {
        Shape::Text { at, .. } => assert_eq!(*at, Point::new(12.0, 8.0)),
        other => panic!("expected text, got {other:?}"),
    }
}

#[test]
fn group_is_dashed_and_unfilled_by_default() {
    let n = node(json!({"id": "g", "type": "group", "content": {"title": "Engine"}}));
    let p = group_primitive(&n);
    match &p.shapes[0] {
        Shape::Rect { fill, dash, .. } => {
            assert!(fill.is_none());
            assert_eq!(dash.as_deref(), Some(&[10.0, 5.0][..]));
        }
        other => panic!("expected rect, got {other:?}"),
    }
    assert_eq!(p.texts().collect::<Vec<_>>(), vec!["Engine"]);
}
