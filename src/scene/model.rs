use std::fmt;

use serde::{Deserialize, Serialize};

use crate::foundation::core::{Point, Size};

/// Either an explicit value or the `"auto"` sentinel.
///
/// Serialized as the bare value or the string `"auto"`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum OrAuto<T> {
    /// Let the active layout strategy decide.
    #[default]
    Auto,
    /// Use exactly this value.
    Value(T),
}

impl<T: Copy> OrAuto<T> {
    /// The explicit value, if any.
    pub fn value(self) -> Option<T> {
        match self {
            Self::Auto => None,
            Self::Value(v) => Some(v),
        }
    }

    /// `true` for the sentinel.
    pub fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }
}

impl<T: Serialize> Serialize for OrAuto<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Auto => serializer.serialize_str("auto"),
            Self::Value(v) => v.serialize(serializer),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for OrAuto<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr<T> {
            Sentinel(String),
            Value(T),
        }

        match Repr::<T>::deserialize(deserializer)? {
            Repr::Sentinel(s) if s == "auto" => Ok(Self::Auto),
            Repr::Sentinel(s) => Err(serde::de::Error::custom(format!(
                "expected \"auto\" or an explicit value, found \"{s}\""
            ))),
            Repr::Value(v) => Ok(Self::Value(v)),
        }
    }
}

/// Node position: explicit `{x, y}` or `"auto"`.
pub type Position = OrAuto<Point>;
/// Node size: explicit `{width, height}` or `"auto"`.
pub type SizeSpec = OrAuto<Size>;

macro_rules! string_tag {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$vmeta:meta])* $variant:ident => $tag:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
            /// A tag this crate does not recognize, preserved verbatim.
            Other(String),
        }

        impl $name {
            /// The tag as written in JSON.
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $tag,)+
                    Self::Other(s) => s.as_str(),
                }
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                match value.as_str() {
                    $($tag => Self::$variant,)+
                    _ => Self::Other(value),
                }
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::from(value.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Other(s) => s,
                    known => known.as_str().to_string(),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

string_tag! {
    /// Visual archetype of a node.
    PrimitiveKind {
        /// Generic container.
        Box => "box",
        /// LIFO stack (call stack).
        Stack => "stack",
        /// FIFO queue (callback queue).
        Queue => "queue",
        /// Memory heap.
        Heap => "heap",
        /// Step-by-step timeline.
        Timeline => "timeline",
        /// Directional connector drawn as a node.
        Arrow => "arrow",
        /// Text annotation.
        Label => "label",
        /// Grouped components.
        Group => "group",
        /// Syntax-highlighted code.
        CodeBlock => "code-block",
        /// Host-provided component.
        Custom => "custom",
    }
}

string_tag! {
    /// Layout strategy selector.
    LayoutKind {
        /// Column grid, optionally masonry.
        Grid => "grid",
        /// Row-wrapping left-to-right packing.
        Flow => "flow",
        /// Single column, top to bottom.
        Stack => "stack",
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// The declarative, data-only description of what to draw.
pub struct SceneDefinition {
    /// Layout strategy and its configuration.
    pub layout: LayoutSpec,
    /// Ordered layers.
    #[serde(default)]
    pub layers: Vec<LayerDef>,
    /// Global cosmetic settings.
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl SceneDefinition {
    /// Parse a scene definition from JSON text.
    pub fn from_json_str(s: &str) -> crate::SceneryResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// All node specs across all layers, in definition order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeDef> {
        self.layers.iter().flat_map(|l| l.nodes.iter())
    }

    /// All edge specs across all layers, in definition order.
    pub fn edges(&self) -> impl Iterator<Item = &EdgeDef> {
        self.layers.iter().flat_map(|l| l.edges.iter())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// Layout strategy discriminant plus its configuration.
pub struct LayoutSpec {
    /// Strategy tag (`grid`, `flow`, `stack`, anything else falls back).
    #[serde(rename = "type")]
    pub kind: LayoutKind,
    /// Strategy parameters; keys a strategy does not use are ignored.
    #[serde(default)]
    pub config: LayoutConfig,
}

impl Default for LayoutSpec {
    fn default() -> Self {
        Self {
            kind: LayoutKind::Grid,
            config: LayoutConfig::default(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Union of the grid and flow configuration keys.
pub struct LayoutConfig {
    /// Grid column count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<u32>,
    /// Grid row count or `"auto"`; rows always grow on demand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<OrAuto<u32>>,
    /// Gap between cells (both axes unless overridden).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap: Option<f64>,
    /// Vertical gap override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_gap: Option<f64>,
    /// Horizontal gap override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_gap: Option<f64>,
    /// Padding around the whole layout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<f64>,
    /// Base width of one grid column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_width: Option<f64>,
    /// Base row height or `"auto"`; rows are always sized to content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_height: Option<OrAuto<f64>>,
    /// Shortest-column-first packing instead of the row/column grid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub masonry: Option<bool>,
    /// Flow layout wrap width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width: Option<f64>,
    /// Per-breakpoint column overrides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsive: Option<ResponsiveColumns>,
}

/// Viewport widths below this use the `mobile` column override.
pub const TABLET_MIN_WIDTH: f64 = 768.0;
/// Viewport widths at or above this use the `desktop` column override.
pub const DESKTOP_MIN_WIDTH: f64 = 1024.0;

impl LayoutConfig {
    /// Column count for a viewport width, honoring `responsive` overrides when present.
    pub fn columns_for_width(&self, viewport_width: f64) -> Option<u32> {
        let responsive = self.responsive.as_ref();
        let bp = if viewport_width < TABLET_MIN_WIDTH {
            responsive.and_then(|r| r.mobile)
        } else if viewport_width < DESKTOP_MIN_WIDTH {
            responsive.and_then(|r| r.tablet)
        } else {
            responsive.and_then(|r| r.desktop)
        };
        bp.map(|b| b.columns).or(self.columns)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
/// Column overrides keyed by viewport class.
pub struct ResponsiveColumns {
    /// Narrow viewports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<Breakpoint>,
    /// Medium viewports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tablet: Option<Breakpoint>,
    /// Wide viewports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desktop: Option<Breakpoint>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// One breakpoint's override.
pub struct Breakpoint {
    /// Column count at this breakpoint.
    pub columns: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// A visibility-toggleable group of nodes and edges.
pub struct LayerDef {
    /// Unique layer id.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Paint order; fixed after construction.
    #[serde(default)]
    pub z_index: i32,
    /// Initial visibility.
    #[serde(default = "default_true")]
    pub visible: bool,
    /// Nodes in this layer.
    #[serde(default)]
    pub nodes: Vec<NodeDef>,
    /// Edges in this layer; endpoints may live in any layer.
    #[serde(default)]
    pub edges: Vec<EdgeDef>,
}

fn default_true() -> bool {
    true
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// One visual element.
pub struct NodeDef {
    /// Id, unique across the whole scene.
    pub id: String,
    /// Primitive archetype.
    #[serde(rename = "type")]
    pub kind: PrimitiveKind,
    /// Explicit position or `"auto"`.
    #[serde(default)]
    pub position: Position,
    /// Explicit size or `"auto"`.
    #[serde(default)]
    pub size: SizeSpec,
    /// Cosmetic attributes.
    #[serde(default)]
    pub style: NodeStyle,
    /// Title, description and items; opaque to the layout engine.
    #[serde(default)]
    pub content: NodeContent,
    /// Receives pointer events.
    #[serde(default)]
    pub interactive: bool,
    /// May become selected.
    #[serde(default)]
    pub selectable: bool,
    /// May be dragged on the surface.
    #[serde(default)]
    pub draggable: bool,
    /// Grid placement hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutHint>,
    /// Opaque data bag.
    #[serde(default)]
    pub data: serde_json::Map<String, serde_json::Value>,
}

impl NodeDef {
    /// Minimal node spec with `auto` geometry; handy for builders and tests.
    pub fn new(id: impl Into<String>, kind: PrimitiveKind) -> Self {
        Self {
            id: id.into(),
            kind,
            position: Position::Auto,
            size: SizeSpec::Auto,
            style: NodeStyle::default(),
            content: NodeContent::default(),
            interactive: false,
            selectable: false,
            draggable: false,
            layout: None,
            data: serde_json::Map::new(),
        }
    }

    /// Column span hint, at least 1.
    pub fn col_span(&self) -> u32 {
        self.layout
            .and_then(|l| l.col_span)
            .unwrap_or(1)
            .max(1)
    }

    /// Row span hint, at least 1.
    pub fn row_span(&self) -> u32 {
        self.layout
            .and_then(|l| l.row_span)
            .unwrap_or(1)
            .max(1)
    }

    /// Explicit row hint.
    pub fn row_hint(&self) -> Option<u32> {
        self.layout.and_then(|l| l.row)
    }

    /// Explicit column hint.
    pub fn column_hint(&self) -> Option<u32> {
        self.layout.and_then(|l| l.column)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// CSS-grid-like placement hint (0-based).
pub struct LayoutHint {
    /// Row index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row: Option<u32>,
    /// Column index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
    /// Rows spanned (default 1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_span: Option<u32>,
    /// Columns spanned (default 1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub col_span: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Cosmetic node attributes.
pub struct NodeStyle {
    /// Border color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,
    /// Fill color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    /// Border width in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,
    /// Corner radius in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f64>,
    /// Text color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Base opacity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// Font size for label primitives.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    /// Font family for label primitives.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// Font style for label primitives.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_style: Option<String>,
    /// Text alignment for label primitives.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
/// Node content payload.
pub struct NodeContent {
    /// Heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Sub-heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Stack frames, queue entries, heap objects, timeline steps.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<ContentItem>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// One labelled entry of a node's content.
pub struct ContentItem {
    /// Item id.
    pub id: String,
    /// Display label.
    pub label: String,
}

string_tag! {
    /// Connector rendering type. All kinds share the orthogonal router.
    #[derive(Default)]
    EdgeKind {
        /// Line with an arrowhead at the target.
        #[default]
        Arrow => "arrow",
        /// Plain line.
        Line => "line",
        /// Curved connector.
        Curve => "curve",
        /// Bezier connector.
        Bezier => "bezier",
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// A directed relationship between two nodes, referenced by id.
pub struct EdgeDef {
    /// Unique edge id.
    pub id: String,
    /// Source node id.
    pub from: String,
    /// Target node id.
    pub to: String,
    /// Rendering type.
    #[serde(rename = "type", default)]
    pub kind: EdgeKind,
    /// Stroke attributes.
    #[serde(default)]
    pub style: EdgeStyle,
    /// Run the dash-flow animation.
    #[serde(default)]
    pub animated: bool,
    /// Optional text near the path midpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl EdgeDef {
    /// Arrow edge with default style.
    pub fn new(id: impl Into<String>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            from: from.into(),
            to: to.into(),
            kind: EdgeKind::Arrow,
            style: EdgeStyle::default(),
            animated: false,
            label: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Stroke attributes of an edge.
pub struct EdgeStyle {
    /// Stroke and arrowhead color.
    #[serde(default = "default_edge_color")]
    pub color: String,
    /// Stroke width in pixels.
    #[serde(default = "default_edge_width")]
    pub width: f64,
    /// Explicit dash pattern.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dash_array: Option<Vec<f64>>,
    /// Stroke opacity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl Default for EdgeStyle {
    fn default() -> Self {
        Self {
            color: default_edge_color(),
            width: default_edge_width(),
            dash_array: None,
            opacity: None,
        }
    }
}

fn default_edge_color() -> String {
    "#64748b".to_string()
}

fn default_edge_width() -> f64 {
    2.0
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Global cosmetic settings.
pub struct ThemeConfig {
    /// Font family.
    #[serde(default = "default_font_family")]
    pub font_family: String,
    /// Base font size.
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    /// Default corner radius.
    #[serde(default = "default_border_radius")]
    pub border_radius: f64,
    /// Base spacing unit.
    #[serde(default = "default_spacing")]
    pub spacing: f64,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            font_family: default_font_family(),
            font_size: default_font_size(),
            border_radius: default_border_radius(),
            spacing: default_spacing(),
        }
    }
}

fn default_font_family() -> String {
    "Inter, sans-serif".to_string()
}

fn default_font_size() -> f64 {
    14.0
}

fn default_border_radius() -> f64 {
    8.0
}

fn default_spacing() -> f64 {
    16.0
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Canvas dimensions; `auto` takes the hosting surface's viewport.
pub struct CanvasConfig {
    /// Width in pixels or `"auto"`.
    #[serde(default)]
    pub width: OrAuto<f64>,
    /// Height in pixels or `"auto"`.
    #[serde(default)]
    pub height: OrAuto<f64>,
    /// Canvas background color.
    #[serde(default = "default_background")]
    pub background_color: String,
    /// Device pixel ratio or `"auto"`.
    #[serde(default)]
    pub pixel_ratio: OrAuto<f64>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: OrAuto::Auto,
            height: OrAuto::Auto,
            background_color: default_background(),
            pixel_ratio: OrAuto::Auto,
        }
    }
}

fn default_background() -> String {
    "#0a0a0a".to_string()
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
