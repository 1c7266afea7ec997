use crate::{render::surface::LayerHandle, scene::model::LayerDef};

/// A constructed layer: membership and visibility. Z-order is fixed at construction.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneLayer {
    id: String,
    name: String,
    z_index: i32,
    visible: bool,
    nodes: Vec<String>,
    edges: Vec<String>,
    handle: LayerHandle,
}

impl SceneLayer {
    pub(crate) fn new(spec: &LayerDef, handle: LayerHandle) -> Self {
        Self {
            id: spec.id.clone(),
            name: spec.name.clone(),
            z_index: spec.z_index,
            visible: spec.visible,
            nodes: Vec::new(),
            edges: Vec::new(),
            handle,
        }
    }

    /// Layer id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Paint order.
    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    /// Current visibility.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Member node ids in definition order.
    pub fn node_ids(&self) -> &[String] {
        &self.nodes
    }

    /// Member edge ids in definition order; dropped edges never appear.
    pub fn edge_ids(&self) -> &[String] {
        &self.edges
    }

    /// Surface-side handle.
    pub fn handle(&self) -> LayerHandle {
        self.handle
    }

    /// Make the layer visible. Returns whether visibility changed.
    pub fn show(&mut self) -> bool {
        !std::mem::replace(&mut self.visible, true)
    }

    /// Hide the layer. Returns whether visibility changed.
    pub fn hide(&mut self) -> bool {
        std::mem::replace(&mut self.visible, false)
    }

    pub(crate) fn push_node(&mut self, id: &str) {
        self.nodes.push(id.to_string());
    }

    pub(crate) fn push_edge(&mut self, id: &str) {
        self.edges.push(id.to_string());
    }
}
