use super::*;
use serde_json::json;

fn boxes(sizes: &[(f64, f64)]) -> Vec<NodeDef> {
    sizes
        .iter()
        .enumerate()
        .map(|(i, (w, h))| {
            serde_json::from_value(json!({
                "id": format!("n{i}"),
                "type": "box",
                "size": {"width": w, "height": h}
            }))
            .unwrap()
        })
        .collect()
}

fn params() -> FlowParams {
    FlowParams::from_config(&LayoutConfig::default())
}

#[test]
fn wraps_when_row_is_full() {
    let nodes = boxes(&[(300.0, 200.0), (300.0, 120.0), (300.0, 200.0), (300.0, 50.0)]);
    let refs: Vec<&NodeDef> = nodes.iter().collect();
    let out = flow_layout(&refs, &params());
    let xy = |id: &str| out.bounds(id).map(|b| (b.x, b.y));
    assert_eq!(xy("n0"), Some((40.0, 40.0)));
    assert_eq!(xy("n1"), Some((364.0, 40.0)));
    assert_eq!(xy("n2"), Some((688.0, 40.0)));
    assert_eq!(xy("n3"), Some((40.0, 264.0)));
}

#[test]
fn node_wider_than_row_gets_own_row() {
    let nodes = boxes(&[(2000.0, 100.0), (100.0, 100.0)]);
    let refs: Vec<&NodeDef> = nodes.iter().collect();
    let out = flow_layout(&refs, &params());
    assert_eq!(out.bounds("n0").map(|b| (b.x, b.y)), Some((40.0, 40.0)));
    assert_eq!(out.bounds("n1").map(|b| (b.x, b.y)), Some((40.0, 164.0)));
}

#[test]
fn auto_size_uses_fallback() {
    let node = NodeDef::new("a", crate::scene::model::PrimitiveKind::Box);
    let out = stack_layout(&[&node]);
    assert_eq!(out.bounds("a"), Some(Bounds::new(40.0, 40.0, 300.0, 200.0)));
}

#[test]
fn stack_keeps_definition_order() {
    let nodes = boxes(&[(100.0, 50.0), (100.0, 70.0), (100.0, 10.0)]);
    let refs: Vec<&NodeDef> = nodes.iter().collect();
    let out = stack_layout(&refs);
    let ys: Vec<f64> = ["n0", "n1", "n2"]
        .iter()
        .map(|id| out.bounds(id).unwrap().y)
        .collect();
    assert_eq!(ys, vec![40.0, 114.0, 208.0]);
}
