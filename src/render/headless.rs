use std::collections::BTreeMap;

use crate::{
    foundation::core::{Point, Size},
    primitives::Primitive,
    render::surface::{
        AnimationSpec, AnimationTicket, Cursor, ElementHandle, Emphasis, LayerHandle,
        RenderSurface,
    },
};

/// One recorded surface call.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SurfaceOp {
    /// [`RenderSurface::create_layer`].
    CreateLayer {
        /// Assigned handle.
        layer: LayerHandle,
        /// Scene layer id.
        id: String,
    },
    /// [`RenderSurface::set_layer_visible`].
    SetLayerVisible {
        /// Target layer.
        layer: LayerHandle,
        /// New visibility.
        visible: bool,
    },
    /// [`RenderSurface::batch_draw`].
    BatchDraw {
        /// Redrawn layer.
        layer: LayerHandle,
    },
    /// [`RenderSurface::add_element`].
    AddElement {
        /// Owning layer.
        layer: LayerHandle,
        /// Assigned handle.
        element: ElementHandle,
    },
    /// [`RenderSurface::update_element`].
    UpdateElement {
        /// Rebuilt element.
        element: ElementHandle,
    },
    /// [`RenderSurface::set_position`].
    SetPosition {
        /// Moved element.
        element: ElementHandle,
        /// New origin.
        at: Point,
    },
    /// [`RenderSurface::set_emphasis`].
    SetEmphasis {
        /// Target element.
        element: ElementHandle,
        /// New emphasis.
        emphasis: Emphasis,
    },
    /// [`RenderSurface::set_draggable`].
    SetDraggable {
        /// Target element.
        element: ElementHandle,
        /// New flag.
        draggable: bool,
    },
    /// [`RenderSurface::bind_pointer`].
    BindPointer {
        /// Bound element.
        element: ElementHandle,
        /// Node id reported with pointer events.
        node: String,
    },
    /// [`RenderSurface::set_cursor`].
    SetCursor {
        /// New cursor.
        cursor: Cursor,
    },
    /// [`RenderSurface::start_animation`].
    StartAnimation {
        /// Issued ticket id.
        ticket: u32,
    },
    /// [`RenderSurface::cancel_animation`].
    CancelAnimation {
        /// Cancelled ticket id.
        ticket: u32,
    },
    /// [`RenderSurface::destroy`].
    Destroy,
}

/// Retained state of one layer.
#[derive(Clone, Debug, PartialEq)]
pub struct HeadlessLayer {
    /// Scene layer id.
    pub id: String,
    /// Paint order.
    pub z_index: i32,
    /// Current visibility.
    pub visible: bool,
    /// Number of redraws requested.
    pub draws: u32,
    /// Elements in insertion order.
    pub elements: Vec<ElementHandle>,
}

/// Retained state of one element.
#[derive(Clone, Debug, PartialEq)]
pub struct HeadlessElement {
    /// Owning layer.
    pub layer: LayerHandle,
    /// Current visuals.
    pub primitive: Primitive,
    /// Current origin.
    pub position: Point,
    /// Current emphasis.
    pub emphasis: Emphasis,
    /// Dragging enabled.
    pub draggable: bool,
    /// Node id bound for pointer events.
    pub pointer_node: Option<String>,
    /// Dash offset written by running animations.
    pub dash_offset: f64,
}

/// In-memory surface that records every call; used by the CLI and tests.
#[derive(Clone, Debug)]
pub struct HeadlessSurface {
    viewport: Size,
    ops: Vec<SurfaceOp>,
    layers: Vec<HeadlessLayer>,
    elements: Vec<HeadlessElement>,
    animations: BTreeMap<u32, AnimationSpec>,
    next_ticket: u32,
    cursor: Cursor,
    destroy_count: u32,
}

impl HeadlessSurface {
    /// Create a surface whose container has the given size.
    pub fn new(viewport: Size) -> Self {
        Self {
            viewport,
            ops: Vec::new(),
            layers: Vec::new(),
            elements: Vec::new(),
            animations: BTreeMap::new(),
            next_ticket: 0,
            cursor: Cursor::Default,
            destroy_count: 0,
        }
    }

    /// Every call received, in order.
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Layer state by handle.
    pub fn layer(&self, handle: LayerHandle) -> Option<&HeadlessLayer> {
        self.layers.get(handle.0 as usize)
    }

    /// All layers in creation order.
    pub fn layers(&self) -> &[HeadlessLayer] {
        &self.layers
    }

    /// Element state by handle.
    pub fn element(&self, handle: ElementHandle) -> Option<&HeadlessElement> {
        self.elements.get(handle.0 as usize)
    }

    /// Number of animations still running.
    pub fn live_animations(&self) -> usize {
        self.animations.len()
    }

    /// Current container cursor.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// How many times [`RenderSurface::destroy`] was called.
    pub fn destroy_count(&self) -> u32 {
        self.destroy_count
    }

    /// Drive running animations to `time_ms` since they started.
    pub fn tick(&mut self, time_ms: f64) {
        for spec in self.animations.values() {
            match *spec {
                AnimationSpec::DashFlow { element, rate } => {
                    if let Some(el) = self.elements.get_mut(element.0 as usize) {
                        el.dash_offset = -(time_ms * rate);
                    }
                }
            }
        }
    }

    fn element_mut(&mut self, handle: ElementHandle) -> Option<&mut HeadlessElement> {
        self.elements.get_mut(handle.0 as usize)
    }
}

impl Default for HeadlessSurface {
    fn default() -> Self {
        Self::new(Size::new(800.0, 600.0))
    }
}

impl RenderSurface for HeadlessSurface {
    fn viewport(&self) -> Size {
        self.viewport
    }

    fn create_layer(&mut self, id: &str, z_index: i32, visible: bool) -> LayerHandle {
        let layer = LayerHandle(self.layers.len() as u32);
        self.layers.push(HeadlessLayer {
            id: id.to_string(),
            z_index,
            visible,
            draws: 0,
            elements: Vec::new(),
        });
        self.ops.push(SurfaceOp::CreateLayer {
            layer,
            id: id.to_string(),
        });
        layer
    }

    fn set_layer_visible(&mut self, layer: LayerHandle, visible: bool) {
        if let Some(l) = self.layers.get_mut(layer.0 as usize) {
            l.visible = visible;
        }
        self.ops.push(SurfaceOp::SetLayerVisible { layer, visible });
    }

    fn batch_draw(&mut self, layer: LayerHandle) {
        if let Some(l) = self.layers.get_mut(layer.0 as usize) {
            l.draws += 1;
        }
        self.ops.push(SurfaceOp::BatchDraw { layer });
    }

    fn add_element(&mut self, layer: LayerHandle, primitive: &Primitive) -> ElementHandle {
        let element = ElementHandle(self.elements.len() as u32);
        self.elements.push(HeadlessElement {
            layer,
            primitive: primitive.clone(),
            position: primitive.origin,
            emphasis: Emphasis::NORMAL,
            draggable: false,
            pointer_node: None,
            dash_offset: 0.0,
        });
        if let Some(l) = self.layers.get_mut(layer.0 as usize) {
            l.elements.push(element);
        }
        self.ops.push(SurfaceOp::AddElement { layer, element });
        element
    }

    fn update_element(&mut self, element: ElementHandle, primitive: &Primitive) {
        if let Some(el) = self.element_mut(element) {
            el.primitive = primitive.clone();
        }
        self.ops.push(SurfaceOp::UpdateElement { element });
    }

    fn set_position(&mut self, element: ElementHandle, at: Point) {
        if let Some(el) = self.element_mut(element) {
            el.position = at;
        }
        self.ops.push(SurfaceOp::SetPosition { element, at });
    }

    fn set_emphasis(&mut self, element: ElementHandle, emphasis: Emphasis) {
        if let Some(el) = self.element_mut(element) {
            el.emphasis = emphasis;
        }
        self.ops.push(SurfaceOp::SetEmphasis { element, emphasis });
    }

    fn set_draggable(&mut self, element: ElementHandle, draggable: bool) {
        if let Some(el) = self.element_mut(element) {
            el.draggable = draggable;
        }
        self.ops.push(SurfaceOp::SetDraggable { element, draggable });
    }

    fn bind_pointer(&mut self, element: ElementHandle, node_id: &str) {
        if let Some(el) = self.element_mut(element) {
            el.pointer_node = Some(node_id.to_string());
        }
        self.ops.push(SurfaceOp::BindPointer {
            element,
            node: node_id.to_string(),
        });
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
        self.ops.push(SurfaceOp::SetCursor { cursor });
    }

    fn start_animation(&mut self, _layer: LayerHandle, spec: AnimationSpec) -> AnimationTicket {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.animations.insert(ticket, spec);
        self.ops.push(SurfaceOp::StartAnimation { ticket });
        AnimationTicket(ticket)
    }

    fn cancel_animation(&mut self, ticket: AnimationTicket) {
        self.animations.remove(&ticket.0);
        self.ops.push(SurfaceOp::CancelAnimation { ticket: ticket.0 });
    }

    fn destroy(&mut self) {
        self.destroy_count += 1;
        self.animations.clear();
        self.layers.clear();
        self.elements.clear();
        self.ops.push(SurfaceOp::Destroy);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/headless.rs"]
mod tests;
