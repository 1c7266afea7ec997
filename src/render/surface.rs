use crate::{
    foundation::core::{Point, Size},
    primitives::Primitive,
};

/// Surface-side layer handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct LayerHandle(pub u32);

/// Surface-side handle to one retained element (a node group or an edge connector).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct ElementHandle(pub u32);

/// Owned handle to a running per-frame animation. Cancel it exactly once.
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct AnimationTicket(pub u32);

/// Pointer cursor shown over the surface container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub enum Cursor {
    /// Platform default arrow.
    #[default]
    Default,
    /// Hand cursor over interactive nodes.
    Pointer,
}

/// Scale/opacity emphasis applied to a node's element.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Emphasis {
    /// Uniform scale around the element origin.
    pub scale: f64,
    /// Element opacity in `[0, 1]`.
    pub opacity: f64,
}

impl Emphasis {
    /// Resting state.
    pub const NORMAL: Self = Self {
        scale: 1.0,
        opacity: 1.0,
    };
    /// Hovered, not selected.
    pub const HOVER: Self = Self {
        scale: 1.02,
        opacity: 0.9,
    };
    /// Selected; dominates hover.
    pub const SELECTED: Self = Self {
        scale: 1.05,
        opacity: 1.0,
    };
}

impl Default for Emphasis {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// Per-frame animation registered against the surface's animation loop.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub enum AnimationSpec {
    /// Advance the element's dash offset by `-rate` pixels per elapsed millisecond.
    DashFlow {
        /// Connector element to animate.
        element: ElementHandle,
        /// Pixels per millisecond.
        rate: f64,
    },
}

/// Retained-mode rendering target for a scene graph.
///
/// The scene graph owns exactly one surface and drives it synchronously; implementations
/// decide how (and whether) anything reaches pixels.
pub trait RenderSurface {
    /// Size of the hosting container, used to resolve `auto` canvas dimensions.
    fn viewport(&self) -> Size;

    /// Create a layer; layers paint in creation order.
    fn create_layer(&mut self, id: &str, z_index: i32, visible: bool) -> LayerHandle;

    /// Show or hide a layer.
    fn set_layer_visible(&mut self, layer: LayerHandle, visible: bool);

    /// Request a redraw of one layer.
    fn batch_draw(&mut self, layer: LayerHandle);

    /// Add an element to a layer at the primitive's origin.
    fn add_element(&mut self, layer: LayerHandle, primitive: &Primitive) -> ElementHandle;

    /// Replace an element's visuals in place, keeping its handle.
    fn update_element(&mut self, element: ElementHandle, primitive: &Primitive);

    /// Move an element's origin.
    fn set_position(&mut self, element: ElementHandle, at: Point);

    /// Apply scale/opacity emphasis.
    fn set_emphasis(&mut self, element: ElementHandle, emphasis: Emphasis);

    /// Toggle surface-level dragging.
    fn set_draggable(&mut self, element: ElementHandle, draggable: bool);

    /// Start delivering click/enter/leave for this element, tagged with the node id.
    fn bind_pointer(&mut self, element: ElementHandle, node_id: &str);

    /// Change the container cursor.
    fn set_cursor(&mut self, cursor: Cursor);

    /// Register a per-frame animation; runs until cancelled or destroyed.
    fn start_animation(&mut self, layer: LayerHandle, spec: AnimationSpec) -> AnimationTicket;

    /// Stop an animation started by [`RenderSurface::start_animation`].
    fn cancel_animation(&mut self, ticket: AnimationTicket);

    /// Release the surface and everything it owns.
    fn destroy(&mut self);
}
