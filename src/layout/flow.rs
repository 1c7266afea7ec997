use crate::{
    foundation::core::{Bounds, Size},
    layout::{LayoutResult, Placement},
    scene::model::{LayoutConfig, NodeDef},
};

const FALLBACK_SIZE: Size = Size::new(300.0, 200.0);
const STACK_ORIGIN: f64 = 40.0;
const STACK_GAP: f64 = 24.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct FlowParams {
    pub(crate) gap: f64,
    pub(crate) padding: f64,
    pub(crate) max_width: f64,
}

impl FlowParams {
    pub(crate) fn from_config(config: &LayoutConfig) -> Self {
        Self {
            gap: config.gap.unwrap_or(24.0),
            padding: config.padding.unwrap_or(40.0),
            max_width: config.max_width.unwrap_or(1200.0),
        }
    }
}

fn explicit_or_fallback(node: &NodeDef) -> Size {
    node.size.value().unwrap_or(FALLBACK_SIZE)
}

/// Left-to-right packing that wraps once the next node would cross `max_width`.
pub(crate) fn flow_layout(nodes: &[&NodeDef], params: &FlowParams) -> LayoutResult {
    let mut out = LayoutResult::default();
    let mut x = params.padding;
    let mut y = params.padding;
    let mut row_height = 0.0f64;

    for node in nodes {
        let size = explicit_or_fallback(node);
        // A node wider than the row still goes on its own row rather than looping.
        if x + size.width > params.max_width && x > params.padding {
            x = params.padding;
            y += row_height + params.gap;
            row_height = 0.0;
        }
        out.insert(&node.id, Placement::at(Bounds::new(x, y, size.width, size.height)));
        x += size.width + params.gap;
        row_height = row_height.max(size.height);
    }
    out
}

/// Single column stacked top to bottom; also the fallback for unknown layout kinds.
pub(crate) fn stack_layout(nodes: &[&NodeDef]) -> LayoutResult {
    let mut out = LayoutResult::default();
    let mut y = STACK_ORIGIN;
    for node in nodes {
        let size = explicit_or_fallback(node);
        out.insert(
            &node.id,
            Placement::at(Bounds::new(STACK_ORIGIN, y, size.width, size.height)),
        );
        y += size.height + STACK_GAP;
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/layout/flow.rs"]
mod tests;
