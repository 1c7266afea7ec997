use super::*;
use crate::{primitives::Shape, scene::model::NodeDef};

fn node(kind: &str) -> SceneNode {
    SceneNode::from_spec(&NodeDef::new("n", PrimitiveKind::from(kind)), "main")
}

#[test]
fn builtins_cover_eight_kinds() {
    let reg = PrimitiveRegistry::with_builtins();
    assert_eq!(reg.kinds().len(), 8);
    assert!(reg.has(&PrimitiveKind::Timeline));
    assert!(!reg.has(&PrimitiveKind::CodeBlock));
}

#[test]
fn unknown_kind_falls_back_to_box_with_diagnostic() {
    let reg = PrimitiveRegistry::default();
    let mut diagnostics = Diagnostics::new();
    let p = reg.create(&node("sparkle"), &mut diagnostics);

    assert_eq!(p.kind, PrimitiveKind::Other("sparkle".to_string()));
    assert!(matches!(p.shapes.first(), Some(Shape::Rect { .. })));
    assert_eq!(
        diagnostics.items(),
        &[Diagnostic::UnknownPrimitive {
            node: "n".to_string(),
            requested: "sparkle".to_string(),
        }]
    );
}

#[test]
fn registered_factory_wins() {
    let mut reg = PrimitiveRegistry::with_builtins();
    reg.register("code-block", |n: &SceneNode| {
        let mut p = Primitive::new(n.kind().clone(), n.position());
        p.push(Shape::text(n.position(), "fn main() {}", 12.0, "#fff"));
        p
    });
    let mut diagnostics = Diagnostics::new();
    let p = reg.create(&node("code-block"), &mut diagnostics);
    assert!(diagnostics.is_empty());
    assert_eq!(p.texts().collect::<Vec<_>>(), vec!["fn main() {}"]);
}

#[test]
fn empty_registry_still_renders_boxes() {
    let reg = PrimitiveRegistry::new();
    let p = reg.build(&node("stack"));
    assert_eq!(p.kind, PrimitiveKind::Stack);
    assert_eq!(p.shapes.len(), 1);
}
