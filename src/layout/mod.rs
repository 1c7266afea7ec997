//! Scene layout engine.
//!
//! Converts a [`SceneDefinition`]'s layout strategy into absolute geometry for every node
//! across all layers. Layout never touches the definition: grid cells chosen by
//! auto-placement are reported in [`Placement::cell`].

pub(crate) mod flow;
pub(crate) mod grid;

use std::collections::{BTreeMap, HashSet};

use crate::{
    foundation::core::Bounds,
    foundation::diagnostics::{Diagnostic, Diagnostics},
    scene::model::{LayoutKind, NodeDef, SceneDefinition},
};

/// Row/column cell a node occupies in the standard grid (top-left of its span).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct GridCell {
    /// 0-based row.
    pub row: u32,
    /// 0-based column.
    pub column: u32,
}

/// Layout decision for one node.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Placement {
    /// Absolute scene-space geometry.
    pub bounds: Bounds,
    /// Cell assignment; only the standard grid produces one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell: Option<GridCell>,
}

impl Placement {
    pub(crate) fn at(bounds: Bounds) -> Self {
        Self { bounds, cell: None }
    }
}

/// Node id to placement map produced by [`apply_layout`].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct LayoutResult {
    placements: BTreeMap<String, Placement>,
}

impl LayoutResult {
    pub(crate) fn insert(&mut self, id: &str, placement: Placement) {
        self.placements.insert(id.to_string(), placement);
    }

    /// Placement for a node id.
    pub fn get(&self, id: &str) -> Option<&Placement> {
        self.placements.get(id)
    }

    /// Geometry for a node id.
    pub fn bounds(&self, id: &str) -> Option<Bounds> {
        self.placements.get(id).map(|p| p.bounds)
    }

    /// All placements ordered by node id.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Placement)> {
        self.placements.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of placed nodes.
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// `true` when no node was placed.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

/// Inputs to layout that come from the hosting surface rather than the definition.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayoutOptions {
    /// Viewport width used to pick `responsive` grid column overrides.
    pub viewport_width: Option<f64>,
}

/// Lay out every node of `definition`, discarding diagnostics.
pub fn apply_layout(definition: &SceneDefinition) -> LayoutResult {
    apply_layout_with(definition, &LayoutOptions::default(), &mut Diagnostics::new())
}

/// Lay out every node of `definition`, recording degraded paths in `diagnostics`.
///
/// An unrecognized layout kind is never an error: it selects the default single-column
/// stacking layout and records [`Diagnostic::UnknownLayout`].
#[tracing::instrument(skip_all, fields(kind = %definition.layout.kind))]
pub fn apply_layout_with(
    definition: &SceneDefinition,
    opts: &LayoutOptions,
    diagnostics: &mut Diagnostics,
) -> LayoutResult {
    let nodes = collect_nodes(definition);
    let config = &definition.layout.config;
    let result = match &definition.layout.kind {
        LayoutKind::Grid => {
            let params = grid::GridParams::from_config(config, opts);
            grid::grid_layout(&nodes, &params)
        }
        LayoutKind::Flow => flow::flow_layout(&nodes, &flow::FlowParams::from_config(config)),
        LayoutKind::Stack => flow::stack_layout(&nodes),
        LayoutKind::Other(requested) => {
            diagnostics.push(Diagnostic::UnknownLayout {
                requested: requested.clone(),
            });
            flow::stack_layout(&nodes)
        }
    };
    tracing::debug!(placed = result.len(), "layout resolved");
    result
}

/// All nodes across all layers in definition order, first occurrence of each id only.
fn collect_nodes(definition: &SceneDefinition) -> Vec<&NodeDef> {
    let mut seen = HashSet::<&str>::new();
    definition
        .nodes()
        .filter(|n| seen.insert(n.id.as_str()))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/layout/engine.rs"]
mod tests;
