use super::*;
use serde_json::json;

fn node(v: serde_json::Value) -> NodeDef {
    serde_json::from_value(v).unwrap()
}

fn params(config: serde_json::Value) -> GridParams {
    let config: LayoutConfig = serde_json::from_value(config).unwrap();
    GridParams::from_config(&config, &LayoutOptions::default())
}

fn run(nodes: &[NodeDef], p: &GridParams) -> LayoutResult {
    let refs: Vec<&NodeDef> = nodes.iter().collect();
    grid_layout(&refs, p)
}

#[test]
fn defaults_apply_when_config_is_empty() {
    let p = params(json!({}));
    assert_eq!(p.columns, 2);
    assert_eq!(p.column_width, 340.0);
    assert_eq!(p.column_gap, 24.0);
    assert_eq!(p.row_gap, 24.0);
    assert_eq!(p.padding, 40.0);
    assert!(!p.masonry);
}

#[test]
fn explicit_zero_gap_and_padding_are_kept() {
    let p = params(json!({"gap": 0, "padding": 0, "columns": 0, "columnGap": 8}));
    assert_eq!(p.columns, 1);
    assert_eq!(p.padding, 0.0);
    assert_eq!(p.row_gap, 0.0);
    assert_eq!(p.column_gap, 8.0);
}

#[test]
fn auto_size_depends_on_primitive() {
    let p = params(json!({"columns": 3}));
    let stack = node(json!({"id": "s", "type": "stack"}));
    let timeline = node(json!({"id": "t", "type": "timeline"}));
    let wide = node(json!({"id": "w", "type": "box", "layout": {"colSpan": 2}}));
    assert_eq!(resolve_size(&stack, &p), Size::new(340.0, 380.0));
    assert_eq!(resolve_size(&timeline, &p), Size::new(340.0 * 3.0 + 48.0, 240.0));
    assert_eq!(resolve_size(&wide, &p), Size::new(704.0, 200.0));
}

#[test]
fn masonry_fills_shortest_column() {
    let p = params(json!({"columns": 2, "masonry": true}));
    let nodes = vec![
        node(json!({"id": "a", "type": "box", "size": {"width": 340, "height": 100}})),
        node(json!({"id": "b", "type": "box", "size": {"width": 340, "height": 300}})),
        node(json!({"id": "c", "type": "box", "size": {"width": 340, "height": 100}})),
        node(json!({"id": "d", "type": "box", "size": {"width": 340, "height": 100}})),
    ];
    let out = run(&nodes, &p);
    assert_eq!(out.bounds("a").map(|b| (b.x, b.y)), Some((40.0, 40.0)));
    assert_eq!(out.bounds("b").map(|b| (b.x, b.y)), Some((404.0, 40.0)));
    assert_eq!(out.bounds("c").map(|b| (b.x, b.y)), Some((40.0, 164.0)));
    assert_eq!(out.bounds("d").map(|b| (b.x, b.y)), Some((40.0, 288.0)));
    assert!(out.get("a").unwrap().cell.is_none());
}

#[test]
fn masonry_never_moves_a_column_upward() {
    let p = params(json!({"columns": 3, "masonry": true}));
    let nodes: Vec<NodeDef> = (0..9)
        .map(|i| {
            node(json!({
                "id": format!("n{i}"),
                "type": "box",
                "size": {"width": 340, "height": 60 + 37 * (i % 4)}
            }))
        })
        .collect();
    let out = run(&nodes, &p);

    let mut last_bottom = [0.0f64; 3];
    for n in &nodes {
        let b = out.bounds(&n.id).unwrap();
        let col = ((b.x - 40.0) / 364.0).round() as usize;
        assert!(b.y >= last_bottom[col]);
        last_bottom[col] = b.bottom();
    }
}

#[test]
fn masonry_hinted_column_is_respected() {
    let p = params(json!({"columns": 2, "masonry": true}));
    let nodes = vec![
        node(json!({"id": "a", "type": "box"})),
        node(json!({"id": "b", "type": "box", "layout": {"column": 1}})),
    ];
    let out = run(&nodes, &p);
    // Hinted nodes are placed before auto nodes.
    assert_eq!(out.bounds("b").map(|b| (b.x, b.y)), Some((404.0, 40.0)));
    assert_eq!(out.bounds("a").map(|b| (b.x, b.y)), Some((40.0, 40.0)));
}

#[test]
fn standard_grid_places_explicit_cells_first() {
    let p = params(json!({"columns": 2}));
    let nodes = vec![
        node(json!({"id": "a", "type": "box"})),
        node(json!({"id": "b", "type": "box", "layout": {"row": 0, "column": 0}})),
        node(json!({"id": "c", "type": "box"})),
    ];
    let out = run(&nodes, &p);
    assert_eq!(out.get("b").unwrap().cell, Some(GridCell { row: 0, column: 0 }));
    assert_eq!(out.get("a").unwrap().cell, Some(GridCell { row: 0, column: 1 }));
    assert_eq!(out.get("c").unwrap().cell, Some(GridCell { row: 1, column: 0 }));
}

#[test]
fn standard_grid_has_no_overlaps() {
    let p = params(json!({"columns": 3}));
    let nodes = vec![
        node(json!({"id": "a", "type": "box", "layout": {"colSpan": 2}})),
        node(json!({"id": "b", "type": "box", "layout": {"rowSpan": 2}})),
        node(json!({"id": "c", "type": "stack"})),
        node(json!({"id": "d", "type": "queue", "layout": {"colSpan": 3}})),
        node(json!({"id": "e", "type": "box", "layout": {"row": 3, "column": 2}})),
        node(json!({"id": "f", "type": "heap"})),
    ];
    let out = run(&nodes, &p);
    let placed: Vec<Bounds> = nodes.iter().map(|n| out.bounds(&n.id).unwrap()).collect();
    for (i, a) in placed.iter().enumerate() {
        for b in &placed[i + 1..] {
            assert!(!a.overlaps(*b), "{a:?} overlaps {b:?}");
        }
    }
}

#[test]
fn row_height_follows_tallest_node() {
    let p = params(json!({"columns": 2}));
    let nodes = vec![
        node(json!({"id": "a", "type": "box"})),
        node(json!({"id": "b", "type": "stack"})),
        node(json!({"id": "c", "type": "box"})),
    ];
    let out = run(&nodes, &p);
    assert_eq!(out.bounds("a").map(|b| b.height), Some(380.0));
    assert_eq!(out.bounds("c").map(|b| b.y), Some(40.0 + 380.0 + 24.0));
}

#[test]
fn oversized_span_is_clamped_for_auto_placement() {
    let p = params(json!({"columns": 2}));
    let nodes = vec![node(json!({"id": "a", "type": "box", "layout": {"colSpan": 5}}))];
    let out = run(&nodes, &p);
    let b = out.bounds("a").unwrap();
    assert_eq!(b.x, 40.0);
    assert_eq!(b.width, 704.0);
}

#[test]
fn masonry_column_hint_past_the_grid_does_not_panic() {
    let p = params(json!({"columns": 2, "masonry": true}));
    let nodes = vec![
        node(json!({"id": "far", "type": "box", "layout": {"column": 4294967295u32, "colSpan": 2}})),
        node(json!({"id": "a", "type": "box"})),
    ];
    let out = run(&nodes, &p);
    let far = out.bounds("far").unwrap();
    assert!(far.x.is_finite());
    assert_eq!(far.y, 40.0);
    // Off-grid hints leave the real columns untouched.
    assert_eq!(out.bounds("a").map(|b| (b.x, b.y)), Some((40.0, 40.0)));
}

#[test]
fn standard_grid_clips_explicit_span_past_the_edge() {
    let p = params(json!({"columns": 2}));
    let nodes = vec![
        node(json!({"id": "edge", "type": "box", "layout": {"row": 0, "column": 4294967295u32, "colSpan": 3}})),
        node(json!({"id": "a", "type": "box"})),
    ];
    let out = run(&nodes, &p);
    assert!(out.get("edge").is_some());
    assert_eq!(out.get("a").unwrap().cell, Some(GridCell { row: 0, column: 0 }));
}

#[test]
fn huge_row_hint_is_placed_without_dense_rows() {
    let p = params(json!({"columns": 2}));
    let nodes = vec![
        node(json!({"id": "far", "type": "box", "layout": {"row": 400000000, "column": 0}})),
        node(json!({"id": "a", "type": "box"})),
        node(json!({"id": "b", "type": "box"})),
    ];
    let out = run(&nodes, &p);
    let far = out.get("far").unwrap();
    assert_eq!(far.cell, Some(GridCell { row: 400000000, column: 0 }));
    // Row 0 holds the auto nodes; every empty row after it adds only its gap.
    assert_eq!(far.bounds.y, 40.0 + 200.0 + 400000000.0 * 24.0);
    assert_eq!(out.get("a").unwrap().cell, Some(GridCell { row: 0, column: 0 }));
    assert_eq!(out.get("b").unwrap().cell, Some(GridCell { row: 0, column: 1 }));
}

#[test]
fn auto_placement_skips_past_a_tall_explicit_span() {
    let p = params(json!({"columns": 1}));
    let nodes = vec![
        node(json!({"id": "tall", "type": "box", "layout": {"row": 0, "column": 0, "rowSpan": 1000000000}})),
        node(json!({"id": "a", "type": "box"})),
    ];
    let out = run(&nodes, &p);
    assert_eq!(out.get("a").unwrap().cell, Some(GridCell { row: 1000000000, column: 0 }));
    let tall = out.bounds("tall").unwrap();
    let a = out.bounds("a").unwrap();
    assert!(!tall.overlaps(a));
}
