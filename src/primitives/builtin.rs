use crate::{
    foundation::core::{Point, Rect, Size},
    primitives::{Primitive, Shape},
    scene::model::{NodeStyle, PrimitiveKind},
    scene::node::SceneNode,
};

const INSET: f64 = 16.0;
const TITLE_SIZE: f64 = 16.0;
const BODY_SIZE: f64 = 12.0;
const ITEM_SIZE: f64 = 14.0;
const MUTED: &str = "#a3a3a3";

/// Per-archetype palette used when the node style leaves a color unset.
struct Palette {
    background: &'static str,
    border: &'static str,
    text: &'static str,
    item_fill: &'static str,
    item_text: &'static str,
}

const BOX: Palette = Palette {
    background: "#1f1f1f",
    border: "#404040",
    text: "#fafafa",
    item_fill: "#2a2a2a",
    item_text: "#e5e5e5",
};
const STACK: Palette = Palette {
    background: "#1a1f1a",
    border: "#22c55e",
    text: "#4ade80",
    item_fill: "#1f2b1f",
    item_text: "#86efac",
};
const QUEUE: Palette = Palette {
    background: "#1f1a14",
    border: "#f59e0b",
    text: "#fbbf24",
    item_fill: "#2a2319",
    item_text: "#fcd34d",
};
const HEAP: Palette = Palette {
    background: "#1f1714",
    border: "#f97316",
    text: "#fb923c",
    item_fill: "#2a1f19",
    item_text: "#fdba74",
};
const TIMELINE: Palette = Palette {
    background: "#1a1a2e",
    border: "#6366f1",
    text: "#818cf8",
    item_fill: "#1e1e3f",
    item_text: "#c7d2fe",
};

fn pick<'a>(explicit: &'a Option<String>, fallback: &'a str) -> &'a str {
    explicit.as_deref().unwrap_or(fallback)
}

fn stroke_width(style: &NodeStyle, fallback: f64) -> f64 {
    style.border_width.unwrap_or(fallback)
}

fn corner_radius(style: &NodeStyle, fallback: f64) -> f64 {
    style.border_radius.unwrap_or(fallback)
}

/// Container rect plus optional title/description in the fixed header slots.
fn framed(node: &SceneNode, palette: &Palette) -> Primitive {
    let style = node.style();
    let size = node.size();
    let mut p = Primitive::new(node.kind().clone(), node.position());
    p.push(Shape::Rect {
        rect: Rect::from_origin_size(Point::ZERO, size),
        fill: Some(pick(&style.background, palette.background).to_string()),
        stroke: Some(pick(&style.border, palette.border).to_string()),
        stroke_width: stroke_width(style, 2.0),
        corner_radius: corner_radius(style, 8.0),
        dash: None,
    });
    if let Some(title) = &node.content().title {
        p.push(Shape::Text {
            at: Point::new(INSET, INSET),
            text: title.clone(),
            font_size: TITLE_SIZE,
            bold: true,
            color: pick(&style.text, palette.text).to_string(),
            width: None,
        });
    }
    if let Some(desc) = &node.content().description {
        p.push(Shape::text(Point::new(INSET, 45.0), desc, BODY_SIZE, MUTED));
    }
    p
}

fn item_rect(rect: Rect, fill: &str, stroke: Option<&str>, dash: Option<Vec<f64>>) -> Shape {
    Shape::Rect {
        rect,
        fill: Some(fill.to_string()),
        stroke: stroke.map(str::to_string),
        stroke_width: if stroke.is_some() { 2.0 } else { 0.0 },
        corner_radius: 4.0,
        dash,
    }
}

/// Generic container: header, then items as full-width rows.
pub(crate) fn box_primitive(node: &SceneNode) -> Primitive {
    let style = node.style();
    let size = node.size();
    let content = node.content();
    let mut p = Primitive::new(node.kind().clone(), node.position());
    p.push(Shape::Rect {
        rect: Rect::from_origin_size(Point::ZERO, size),
        fill: Some(pick(&style.background, BOX.background).to_string()),
        stroke: Some(pick(&style.border, BOX.border).to_string()),
        stroke_width: stroke_width(style, 2.0),
        corner_radius: corner_radius(style, 8.0),
        dash: None,
    });

    let inner = size.width - 2.0 * INSET;
    let mut y = 20.0;
    if let Some(title) = &content.title {
        p.push(Shape::Text {
            at: Point::new(INSET, y),
            text: title.clone(),
            font_size: TITLE_SIZE,
            bold: true,
            color: pick(&style.text, BOX.text).to_string(),
            width: Some(inner),
        });
        y += 40.0;
    }
    if let Some(desc) = &content.description {
        p.push(Shape::Text {
            at: Point::new(INSET, y),
            text: desc.clone(),
            font_size: BODY_SIZE,
            bold: false,
            color: MUTED.to_string(),
            width: Some(inner),
        });
        y += 30.0;
    }
    for item in &content.items {
        p.push(item_rect(
            Rect::new(INSET, y, INSET + inner, y + 32.0),
            BOX.item_fill,
            None,
            None,
        ));
        p.push(Shape::text(
            Point::new(INSET + 12.0, y + 8.0),
            &item.label,
            ITEM_SIZE,
            BOX.item_text,
        ));
        y += 40.0;
    }
    p
}

/// LIFO stack: the last item sits at the top, frames grow upward from the bottom edge.
pub(crate) fn stack_primitive(node: &SceneNode) -> Primitive {
    let mut p = framed(node, &STACK);
    let size = node.size();
    let inner = size.width - 2.0 * INSET;
    let mut y = size.height - INSET;
    for item in node.content().items.iter().rev() {
        y -= 44.0;
        p.push(item_rect(
            Rect::new(INSET, y, INSET + inner, y + 40.0),
            STACK.item_fill,
            None,
            None,
        ));
        p.push(item_rect(
            Rect::new(INSET, y, INSET + 4.0, y + 40.0),
            STACK.border,
            None,
            None,
        ));
        p.push(Shape::Text {
            at: Point::new(2.0 * INSET, y + 12.0),
            text: item.label.clone(),
            font_size: ITEM_SIZE,
            bold: true,
            color: STACK.item_text.to_string(),
            width: None,
        });
    }
    p
}

/// FIFO queue: fixed-width cells left to right with arrows between neighbours that fit.
pub(crate) fn queue_primitive(node: &SceneNode) -> Primitive {
    const CELL_W: f64 = 80.0;
    const CELL_H: f64 = 60.0;
    const STEP: f64 = 90.0;
    const TOP: f64 = 80.0;

    let mut p = framed(node, &QUEUE);
    let size = node.size();
    let items = &node.content().items;
    let mut x = INSET;
    for (i, item) in items.iter().enumerate() {
        p.push(item_rect(
            Rect::new(x, TOP, x + CELL_W, TOP + CELL_H),
            QUEUE.item_fill,
            Some(QUEUE.border),
            None,
        ));
        p.push(Shape::Text {
            at: Point::new(x, TOP + 20.0),
            text: item.label.clone(),
            font_size: ITEM_SIZE,
            bold: true,
            color: QUEUE.item_text.to_string(),
            width: Some(CELL_W),
        });
        x += STEP;
        if i + 1 < items.len() && x < size.width - CELL_W {
            let mid = TOP + CELL_H / 2.0;
            p.push(Shape::Arrow {
                points: vec![
                    Point::new(x - STEP + CELL_W + 5.0, mid),
                    Point::new(x - 5.0, mid),
                ],
                stroke: QUEUE.border.to_string(),
                width: 2.0,
                pointer_length: 8.0,
                pointer_width: 8.0,
                dash: None,
            });
        }
    }
    p
}

/// Memory heap: dashed object cells in a two-column grid.
pub(crate) fn heap_primitive(node: &SceneNode) -> Primitive {
    const PER_ROW: usize = 2;
    const CELL_H: f64 = 60.0;
    const GAP: f64 = 8.0;
    const TOP: f64 = 80.0;

    let mut p = framed(node, &HEAP);
    let cell_w = (node.size().width - 48.0) / PER_ROW as f64;
    for (i, item) in node.content().items.iter().enumerate() {
        let row = (i / PER_ROW) as f64;
        let col = (i % PER_ROW) as f64;
        let x = INSET + col * (cell_w + GAP);
        let y = TOP + row * (CELL_H + GAP);
        p.push(item_rect(
            Rect::new(x, y, x + cell_w, y + CELL_H),
            HEAP.item_fill,
            Some(HEAP.border),
            Some(vec![5.0, 5.0]),
        ));
        p.push(Shape::Text {
            at: Point::new(x + 8.0, y + CELL_H / 2.0 - 8.0),
            text: item.label.clone(),
            font_size: BODY_SIZE,
            bold: false,
            color: HEAP.item_text.to_string(),
            width: Some(cell_w - 16.0),
        });
    }
    p
}

/// Numbered steps down a dashed vertical axis.
pub(crate) fn timeline_primitive(node: &SceneNode) -> Primitive {
    const TOP: f64 = 80.0;
    const STEP: f64 = 44.0;

    let mut p = framed(node, &TIMELINE);
    let width = node.size().width;
    let items = &node.content().items;
    let mut y = TOP;
    for (i, item) in items.iter().enumerate() {
        p.push(item_rect(
            Rect::new(INSET + 40.0, y, INSET + 40.0 + (width - 72.0), y + 32.0),
            TIMELINE.item_fill,
            None,
            None,
        ));
        p.push(Shape::Circle {
            center: Point::new(2.0 * INSET, y + 16.0),
            radius: 14.0,
            fill: TIMELINE.border.to_string(),
            stroke: Some(TIMELINE.text.to_string()),
        });
        p.push(Shape::Text {
            at: Point::new(INSET + 6.0, y + 8.0),
            text: (i + 1).to_string(),
            font_size: BODY_SIZE,
            bold: true,
            color: "#ffffff".to_string(),
            width: Some(20.0),
        });
        p.push(Shape::Text {
            at: Point::new(INSET + 48.0, y + 8.0),
            text: item.label.clone(),
            font_size: BODY_SIZE,
            bold: false,
            color: TIMELINE.item_text.to_string(),
            width: Some(width - 88.0),
        });
        if i + 1 < items.len() {
            p.push(Shape::Line {
                points: vec![Point::new(32.0, y + 32.0), Point::new(32.0, y + 44.0)],
                stroke: TIMELINE.text.to_string(),
                width: 2.0,
                dash: Some(vec![4.0, 4.0]),
            });
        }
        y += STEP;
    }
    p
}

/// Standalone arrow; `data.direction` is one of `right` (default), `left`, `down`, `up` and
/// `data.length` overrides the node width.
pub(crate) fn arrow_primitive(node: &SceneNode) -> Primitive {
    let size = node.size();
    let style = node.style();
    let data = node.data();
    let direction = data
        .get("direction")
        .and_then(serde_json::Value::as_str)
        .unwrap_or("right");
    let length = data
        .get("length")
        .and_then(serde_json::Value::as_f64)
        .unwrap_or(size.width);
    let (mx, my) = (size.width / 2.0, size.height / 2.0);
    let horizontal = matches!(direction, "right" | "left");
    let points = match direction {
        "left" => vec![Point::new(length, my), Point::new(0.0, my)],
        "down" => vec![Point::new(mx, 0.0), Point::new(mx, length)],
        "up" => vec![Point::new(mx, length), Point::new(mx, 0.0)],
        _ => vec![Point::new(0.0, my), Point::new(length, my)],
    };
    let animated = data
        .get("animated")
        .and_then(serde_json::Value::as_bool)
        .unwrap_or(false);

    let mut p = Primitive::new(node.kind().clone(), node.position());
    p.push(Shape::Arrow {
        points,
        stroke: pick(&style.border, "#737373").to_string(),
        width: stroke_width(style, 2.0),
        pointer_length: 10.0,
        pointer_width: 10.0,
        dash: animated.then(|| vec![10.0, 5.0]),
    });
    if let Some(title) = &node.content().title {
        let at = if horizontal {
            Point::new(length / 2.0 - 30.0, my + 10.0)
        } else {
            Point::new(mx - 30.0, length / 2.0 + 10.0)
        };
        p.push(Shape::Text {
            at,
            text: title.clone(),
            font_size: 11.0,
            bold: false,
            color: MUTED.to_string(),
            width: Some(60.0),
        });
    }
    p
}

/// Text annotation with an optional backing rect when a background is set.
pub(crate) fn label_primitive(node: &SceneNode) -> Primitive {
    let size = node.size();
    let style = node.style();
    let font_size = style.font_size.unwrap_or(14.0);
    let backed = style.background.is_some();
    let (pad_x, pad_y) = if backed { (12.0, 8.0) } else { (0.0, 0.0) };
    let text_width = size.width - 2.0 * pad_x;

    let mut p = Primitive::new(node.kind().clone(), node.position());
    if let Some(bg) = &style.background {
        p.push(Shape::Rect {
            rect: Rect::from_origin_size(Point::ZERO, size),
            fill: Some(bg.clone()),
            stroke: style.border.clone(),
            stroke_width: stroke_width(style, 1.0),
            corner_radius: corner_radius(style, 4.0),
            dash: None,
        });
    }
    if let Some(title) = &node.content().title {
        p.push(Shape::Text {
            at: Point::new(pad_x, pad_y),
            text: title.clone(),
            font_size,
            bold: style.font_style.as_deref() == Some("bold"),
            color: pick(&style.text, "#1e293b").to_string(),
            width: Some(text_width),
        });
    }
    if let Some(desc) = &node.content().description {
        p.push(Shape::Text {
            at: Point::new(pad_x, pad_y + font_size + 8.0),
            text: desc.clone(),
            font_size: font_size - 2.0,
            bold: false,
            color: "#64748b".to_string(),
            width: Some(text_width),
        });
    }
    p
}

/// Dashed, unfilled container with a title tab straddling the top edge.
pub(crate) fn group_primitive(node: &SceneNode) -> Primitive {
    let size = node.size();
    let style = node.style();
    let border = pick(&style.border, "#3b82f6");

    let mut p = Primitive::new(node.kind().clone(), node.position());
    p.push(Shape::Rect {
        rect: Rect::from_origin_size(Point::ZERO, size),
        fill: style.background.clone(),
        stroke: Some(border.to_string()),
        stroke_width: stroke_width(style, 2.0),
        corner_radius: corner_radius(style, 8.0),
        dash: Some(vec![10.0, 5.0]),
    });
    if let Some(title) = &node.content().title {
        let tab = Size::new(title.chars().count() as f64 * 8.0 + INSET, 24.0);
        p.push(Shape::Rect {
            rect: Rect::from_origin_size(Point::new(INSET, -12.0), tab),
            fill: Some(border.to_string()),
            stroke: None,
            stroke_width: 0.0,
            corner_radius: 4.0,
            dash: None,
        });
        p.push(Shape::Text {
            at: Point::new(24.0, -6.0),
            text: title.clone(),
            font_size: BODY_SIZE,
            bold: true,
            color: "#ffffff".to_string(),
            width: None,
        });
    }
    if let Some(desc) = &node.content().description {
        p.push(Shape::Text {
            at: Point::new(INSET, 20.0),
            text: desc.clone(),
            font_size: 11.0,
            bold: false,
            color: MUTED.to_string(),
            width: Some(size.width - 2.0 * INSET),
        });
    }
    p
}

/// Kinds registered by [`crate::PrimitiveRegistry::with_builtins`], with their factories.
pub(crate) fn builtins() -> [(PrimitiveKind, fn(&SceneNode) -> Primitive); 8] {
    [
        (PrimitiveKind::Box, box_primitive),
        (PrimitiveKind::Stack, stack_primitive),
        (PrimitiveKind::Queue, queue_primitive),
        (PrimitiveKind::Heap, heap_primitive),
        (PrimitiveKind::Timeline, timeline_primitive),
        (PrimitiveKind::Arrow, arrow_primitive),
        (PrimitiveKind::Label, label_primitive),
        (PrimitiveKind::Group, group_primitive),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/primitives/builtin.rs"]
mod tests;
