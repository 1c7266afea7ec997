use crate::{
    foundation::core::{Bounds, Point, Rect, Size},
    layout::Placement,
    render::surface::{ElementHandle, Emphasis},
    scene::model::{NodeContent, NodeDef, NodeStyle, Position, PrimitiveKind, SizeSpec},
};

/// Position used when a node is `auto` and no layout decision exists for it.
pub const DEFAULT_POSITION: Point = Point::ZERO;
/// Size used when a node is `auto` and no layout decision exists for it.
pub const DEFAULT_SIZE: Size = Size::new(200.0, 100.0);

/// Partial update merged into a [`SceneNode`]; absent fields are left unchanged.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeUpdate {
    /// New position. `"auto"` is accepted and ignored.
    #[serde(default)]
    pub position: Option<Position>,
    /// New size. `"auto"` is accepted and ignored.
    #[serde(default)]
    pub size: Option<SizeSpec>,
    /// Replacement style.
    #[serde(default)]
    pub style: Option<NodeStyle>,
    /// Replacement content.
    #[serde(default)]
    pub content: Option<NodeContent>,
    /// New interactive flag.
    #[serde(default)]
    pub interactive: Option<bool>,
    /// New selectable flag.
    #[serde(default)]
    pub selectable: Option<bool>,
    /// New draggable flag.
    #[serde(default)]
    pub draggable: Option<bool>,
    /// Keys merged into the data bag.
    #[serde(default)]
    pub data: Option<serde_json::Map<String, serde_json::Value>>,
}

impl NodeUpdate {
    /// Update that only moves the node.
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            position: Some(Position::Value(Point::new(x, y))),
            ..Self::default()
        }
    }
}

/// What changed on a node since the owning graph last synced it to the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Dirty {
    pub(crate) position: bool,
    pub(crate) emphasis: bool,
    pub(crate) visuals: bool,
    pub(crate) interaction: bool,
}

impl Dirty {
    pub(crate) fn any(self) -> bool {
        self.position || self.emphasis || self.visuals || self.interaction
    }
}

/// A constructed node: resolved geometry, content and interaction state.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
    id: String,
    kind: PrimitiveKind,
    layer_id: String,
    position: Point,
    size: Size,
    style: NodeStyle,
    content: NodeContent,
    interactive: bool,
    selectable: bool,
    draggable: bool,
    data: serde_json::Map<String, serde_json::Value>,
    selected: bool,
    hovered: bool,
    emphasis: Emphasis,
    element: Option<ElementHandle>,
    pointer_bound: bool,
    dirty: Dirty,
}

impl SceneNode {
    /// Build from a spec with no layout decision: `auto` takes [`DEFAULT_POSITION`] and
    /// [`DEFAULT_SIZE`].
    pub fn from_spec(spec: &NodeDef, layer_id: &str) -> Self {
        Self::from_spec_with_layout(spec, layer_id, None)
    }

    /// Build from a spec, filling `auto` geometry from the node's layout placement.
    pub fn from_spec_with_layout(
        spec: &NodeDef,
        layer_id: &str,
        placement: Option<&Placement>,
    ) -> Self {
        let laid_out = placement.map(|p| p.bounds);
        let position = spec
            .position
            .value()
            .or_else(|| laid_out.map(|b| b.origin()))
            .unwrap_or(DEFAULT_POSITION);
        let size = spec
            .size
            .value()
            .or_else(|| laid_out.map(|b| b.size()))
            .unwrap_or(DEFAULT_SIZE);

        Self {
            id: spec.id.clone(),
            kind: spec.kind.clone(),
            layer_id: layer_id.to_string(),
            position,
            size,
            style: spec.style.clone(),
            content: spec.content.clone(),
            interactive: spec.interactive,
            selectable: spec.selectable,
            draggable: spec.draggable,
            data: spec.data.clone(),
            selected: false,
            hovered: false,
            emphasis: Emphasis::NORMAL,
            element: None,
            pointer_bound: false,
            dirty: Dirty::default(),
        }
    }

    /// Node id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Primitive archetype.
    pub fn kind(&self) -> &PrimitiveKind {
        &self.kind
    }

    /// Id of the layer this node belongs to.
    pub fn layer_id(&self) -> &str {
        &self.layer_id
    }

    /// Top-left corner in scene coordinates.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Current size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Position and size together.
    pub fn bounds(&self) -> Bounds {
        Bounds::new(
            self.position.x,
            self.position.y,
            self.size.width,
            self.size.height,
        )
    }

    /// [`SceneNode::bounds`] as a `kurbo` rect.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    /// Cosmetic attributes.
    pub fn style(&self) -> &NodeStyle {
        &self.style
    }

    /// Title, description and items.
    pub fn content(&self) -> &NodeContent {
        &self.content
    }

    /// Opaque data bag.
    pub fn data(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.data
    }

    /// Receives pointer events.
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// May become selected.
    pub fn is_selectable(&self) -> bool {
        self.selectable
    }

    /// Dragging enabled on the surface.
    pub fn is_draggable(&self) -> bool {
        self.draggable
    }

    /// Selection state.
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Hover state.
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Visual emphasis currently applied.
    pub fn emphasis(&self) -> Emphasis {
        self.emphasis
    }

    /// Surface element, once the node has been drawn.
    pub fn element(&self) -> Option<ElementHandle> {
        self.element
    }

    /// Move the node. No bounds checking; off-canvas coordinates are kept as given.
    pub fn set_position(&mut self, x: f64, y: f64) {
        self.position = Point::new(x, y);
        self.dirty.position = true;
    }

    /// Resize the node; its primitive is rebuilt on the next sync.
    pub fn set_size(&mut self, width: f64, height: f64) {
        self.size = Size::new(width, height);
        self.dirty.visuals = true;
    }

    /// Merge a partial update. `auto` geometry in the update is ignored.
    pub fn update(&mut self, update: NodeUpdate) {
        if let Some(p) = update.position.and_then(|p| p.value()) {
            self.set_position(p.x, p.y);
        }
        if let Some(s) = update.size.and_then(|s| s.value()) {
            self.set_size(s.width, s.height);
        }
        if let Some(style) = update.style {
            self.style = style;
            self.dirty.visuals = true;
        }
        if let Some(content) = update.content {
            self.content = content;
            self.dirty.visuals = true;
        }
        if let Some(v) = update.interactive {
            if self.interactive != v {
                self.interactive = v;
                self.dirty.interaction = true;
            }
        }
        if let Some(v) = update.selectable {
            self.selectable = v;
        }
        if let Some(v) = update.draggable {
            self.draggable = v;
            self.dirty.visuals = true;
        }
        if let Some(data) = update.data {
            self.data.extend(data);
            self.dirty.visuals = true;
        }
    }

    /// Select the node if it is selectable. Returns whether selection took effect.
    pub fn select(&mut self) -> bool {
        if !self.selectable {
            return false;
        }
        self.selected = true;
        self.set_emphasis(Emphasis::SELECTED);
        true
    }

    /// Clear selection and emphasis.
    pub fn deselect(&mut self) {
        self.selected = false;
        self.set_emphasis(Emphasis::NORMAL);
    }

    /// Mark hovered; emphasis is unchanged while selected.
    pub fn hover(&mut self) {
        self.hovered = true;
        if !self.selected {
            self.set_emphasis(Emphasis::HOVER);
        }
    }

    /// Clear hover; emphasis is unchanged while selected.
    pub fn unhover(&mut self) {
        self.hovered = false;
        if !self.selected {
            self.set_emphasis(Emphasis::NORMAL);
        }
    }

    fn set_emphasis(&mut self, emphasis: Emphasis) {
        self.emphasis = emphasis;
        self.dirty.emphasis = true;
    }

    pub(crate) fn attach(&mut self, element: ElementHandle) {
        self.element = Some(element);
        self.dirty = Dirty::default();
    }

    /// True the first time an interactive node needs its pointer binding.
    pub(crate) fn claim_pointer_binding(&mut self) -> bool {
        if !self.interactive || self.pointer_bound {
            return false;
        }
        self.pointer_bound = true;
        true
    }

    pub(crate) fn take_dirty(&mut self) -> Dirty {
        std::mem::take(&mut self.dirty)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/node.rs"]
mod tests;
