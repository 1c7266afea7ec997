//! Scenery turns declarative runtime diagrams into laid-out, interactive scenes.
//!
//! A [`VisualizationSpec`] wraps a [`SceneDefinition`] (layers of nodes and edges plus a
//! layout strategy) with metadata, explanation text and rendering hints. Scenery resolves
//! geometry for every node, routes connectors between them and drives a retained-mode
//! [`RenderSurface`].
//!
//! # Pipeline overview
//!
//! 1. **Load**: `JSON -> VisualizationSpec` via [`SpecRegistry`] or
//!    [`VisualizationSpec::from_json_str`] (top-level shape checked by [`validate_spec`])
//! 2. **Layout**: `SceneDefinition -> LayoutResult` ([`apply_layout`]), a pure function
//! 3. **Build**: `SceneDefinition + LayoutResult -> SceneGraph` (nodes first, then edges)
//! 4. **Interact**: selection, hover, layer visibility and position updates on the graph,
//!    flushed to the surface as they happen
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: equal definitions produce identical layouts and routes.
//! - **Degrade, don't fail**: unknown layouts, unknown primitives and dangling edges are
//!   recorded as [`Diagnostic`]s, never returned as errors.
//! - **No globals**: primitive and spec registries are values owned by their caller.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;
mod layout;
mod primitives;
mod render;
mod scene;
mod spec;

pub use foundation::core::{Bounds, Point, Rect, Size, Vec2};
pub use foundation::diagnostics::{Diagnostic, Diagnostics};
pub use foundation::error::{SceneryError, SceneryResult};
pub use layout::{GridCell, LayoutOptions, LayoutResult, Placement, apply_layout, apply_layout_with};
pub use primitives::registry::{PrimitiveFactory, PrimitiveRegistry};
pub use primitives::{Primitive, Shape};
pub use render::headless::{HeadlessElement, HeadlessLayer, HeadlessSurface, SurfaceOp};
pub use render::surface::{
    AnimationSpec, AnimationTicket, Cursor, ElementHandle, Emphasis, LayerHandle, RenderSurface,
};
pub use scene::edge::{
    BEND_THRESHOLD, DASH_FLOW_PATTERN, DASH_FLOW_RATE, DominanceRule, EdgeRoute, LABEL_OFFSET,
    SceneEdge, Side, dash_offset, route_orthogonal,
};
pub use scene::graph::{MissingIdPolicy, PointerEvent, SceneGraph, SceneGraphOptions};
pub use scene::layer::SceneLayer;
pub use scene::model::{
    Breakpoint, CanvasConfig, ContentItem, DESKTOP_MIN_WIDTH, EdgeDef, EdgeKind, EdgeStyle,
    LayerDef, LayoutConfig, LayoutHint, LayoutKind, LayoutSpec, NodeContent, NodeDef, NodeStyle,
    OrAuto, Position, PrimitiveKind, ResponsiveColumns, SceneDefinition, SizeSpec,
    TABLET_MIN_WIDTH, ThemeConfig,
};
pub use scene::node::{DEFAULT_POSITION, DEFAULT_SIZE, NodeUpdate, SceneNode};
pub use spec::model::{
    AnimationTrigger, Complexity, Explanation, ExplanationKind, ExplanationMap, ExplanationView,
    InteractionConfig, RenderingConfig, VisualizationSpec,
};
pub use spec::registry::{SpecLoader, SpecRegistry, VisualizationEntry, format_title};
pub use spec::validate::validate_spec;
