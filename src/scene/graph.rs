use std::collections::HashMap;

use crate::{
    foundation::core::{Point, Size},
    foundation::diagnostics::{Diagnostic, Diagnostics},
    foundation::error::{SceneryError, SceneryResult},
    layout::{LayoutOptions, LayoutResult, apply_layout_with},
    primitives::registry::PrimitiveRegistry,
    render::surface::{AnimationSpec, Cursor, RenderSurface},
    scene::edge::{DASH_FLOW_RATE, DominanceRule, SceneEdge},
    scene::layer::SceneLayer,
    scene::model::{CanvasConfig, EdgeKind, SceneDefinition},
    scene::node::{NodeUpdate, SceneNode},
};

/// What mutation-by-id operations do when the id does not resolve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingIdPolicy {
    /// Return `Ok(())` and do nothing.
    #[default]
    Ignore,
    /// Return [`SceneryError::NotFound`].
    Report,
}

/// Construction-time configuration of a [`SceneGraph`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneGraphOptions {
    /// Canvas dimensions.
    pub canvas: CanvasConfig,
    /// Behavior of mutations on unknown ids.
    pub missing_ids: MissingIdPolicy,
    /// Edge routing heuristic.
    pub routing: DominanceRule,
}

/// Pointer event forwarded by the host for a node bound with
/// [`RenderSurface::bind_pointer`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PointerEvent {
    /// Click or tap.
    Click {
        /// Node id the element was bound with.
        node: String,
    },
    /// Pointer entered the element.
    Enter {
        /// Node id the element was bound with.
        node: String,
    },
    /// Pointer left the element.
    Leave {
        /// Node id the element was bound with.
        node: String,
    },
}

impl PointerEvent {
    /// Node the event targets.
    pub fn node(&self) -> &str {
        match self {
            Self::Click { node } | Self::Enter { node } | Self::Leave { node } => node,
        }
    }
}

/// Top-level scene: layers, nodes and edges built from a [`SceneDefinition`] onto one
/// render surface.
///
/// Construction runs the layout engine once over every layer, builds every node, then
/// builds every edge in a second pass so endpoints resolve regardless of layer order.
#[derive(Debug)]
pub struct SceneGraph<S: RenderSurface> {
    surface: S,
    registry: PrimitiveRegistry,
    options: SceneGraphOptions,
    canvas: Size,
    layout: LayoutResult,
    layers: Vec<SceneLayer>,
    layer_index: HashMap<String, usize>,
    nodes: Vec<SceneNode>,
    node_index: HashMap<String, usize>,
    edges: Vec<SceneEdge>,
    edge_index: HashMap<String, usize>,
    diagnostics: Diagnostics,
    destroyed: bool,
}

impl<S: RenderSurface> SceneGraph<S> {
    /// Build with the built-in primitive factories.
    pub fn new(
        surface: S,
        definition: &SceneDefinition,
        options: SceneGraphOptions,
    ) -> SceneryResult<Self> {
        Self::with_registry(surface, definition, options, PrimitiveRegistry::with_builtins())
    }

    /// Build with a caller-supplied primitive registry.
    ///
    /// Fails only when the canvas size is not positive; every other problem in the
    /// definition degrades and is reported through [`SceneGraph::diagnostics`].
    #[tracing::instrument(skip_all, fields(layers = definition.layers.len()))]
    pub fn with_registry(
        surface: S,
        definition: &SceneDefinition,
        options: SceneGraphOptions,
        registry: PrimitiveRegistry,
    ) -> SceneryResult<Self> {
        let canvas = resolve_canvas(&options.canvas, surface.viewport())?;
        let mut diagnostics = Diagnostics::new();
        let layout = apply_layout_with(
            definition,
            &LayoutOptions {
                viewport_width: Some(canvas.width),
            },
            &mut diagnostics,
        );

        let mut graph = Self {
            surface,
            registry,
            options,
            canvas,
            layout,
            layers: Vec::new(),
            layer_index: HashMap::new(),
            nodes: Vec::new(),
            node_index: HashMap::new(),
            edges: Vec::new(),
            edge_index: HashMap::new(),
            diagnostics,
            destroyed: false,
        };
        graph.build(definition);
        tracing::debug!(
            layers = graph.layers.len(),
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            diagnostics = graph.diagnostics.len(),
            "scene built"
        );
        Ok(graph)
    }

    fn build(&mut self, definition: &SceneDefinition) {
        // (definition layer, constructed layer) pairs; duplicate layers are skipped.
        let mut built = Vec::with_capacity(definition.layers.len());

        for (def_idx, layer_def) in definition.layers.iter().enumerate() {
            if self.layer_index.contains_key(&layer_def.id) {
                self.diagnostics.push(Diagnostic::Duplicate {
                    entity: "layer",
                    id: layer_def.id.clone(),
                });
                continue;
            }
            let handle =
                self.surface
                    .create_layer(&layer_def.id, layer_def.z_index, layer_def.visible);
            let mut layer = SceneLayer::new(layer_def, handle);

            for node_def in &layer_def.nodes {
                if self.node_index.contains_key(&node_def.id) {
                    self.diagnostics.push(Diagnostic::Duplicate {
                        entity: "node",
                        id: node_def.id.clone(),
                    });
                    continue;
                }
                let mut node = SceneNode::from_spec_with_layout(
                    node_def,
                    layer.id(),
                    self.layout.get(&node_def.id),
                );
                let primitive = self.registry.create(&node, &mut self.diagnostics);
                let element = self.surface.add_element(handle, &primitive);
                if node.is_draggable() {
                    self.surface.set_draggable(element, true);
                }
                if node.claim_pointer_binding() {
                    self.surface.bind_pointer(element, node.id());
                }
                node.attach(element);

                layer.push_node(node.id());
                self.node_index.insert(node.id().to_string(), self.nodes.len());
                self.nodes.push(node);
            }

            self.layer_index
                .insert(layer.id().to_string(), self.layers.len());
            self.layers.push(layer);
            built.push((def_idx, self.layers.len() - 1));
        }

        for (def_idx, layer_idx) in built {
            for edge_def in &definition.layers[def_idx].edges {
                if self.edge_index.contains_key(&edge_def.id) {
                    self.diagnostics.push(Diagnostic::Duplicate {
                        entity: "edge",
                        id: edge_def.id.clone(),
                    });
                    continue;
                }
                let endpoints = (
                    self.node_index.get(&edge_def.from).copied(),
                    self.node_index.get(&edge_def.to).copied(),
                );
                let (from, to) = match endpoints {
                    (Some(from), Some(to)) => (from, to),
                    (None, _) | (_, None) => {
                        let missing = if endpoints.0.is_none() {
                            &edge_def.from
                        } else {
                            &edge_def.to
                        };
                        self.diagnostics.push(Diagnostic::DroppedEdge {
                            edge: edge_def.id.clone(),
                            missing: missing.clone(),
                        });
                        continue;
                    }
                };

                if let EdgeKind::Other(requested) = &edge_def.kind {
                    self.diagnostics.push(Diagnostic::UnknownEdgeKind {
                        edge: edge_def.id.clone(),
                        requested: requested.clone(),
                    });
                }
                let layer = &mut self.layers[layer_idx];
                let mut edge = SceneEdge::new(
                    edge_def,
                    &self.nodes[from],
                    &self.nodes[to],
                    layer.id(),
                    self.options.routing,
                );
                let element = self.surface.add_element(layer.handle(), &edge.primitive());
                edge.attach(element);
                if edge.is_animated() {
                    let ticket = self.surface.start_animation(
                        layer.handle(),
                        AnimationSpec::DashFlow {
                            element,
                            rate: DASH_FLOW_RATE,
                        },
                    );
                    edge.attach_animation(ticket);
                }

                layer.push_edge(edge.id());
                self.edge_index.insert(edge.id().to_string(), self.edges.len());
                self.edges.push(edge);
            }
        }

        for layer in &self.layers {
            self.surface.batch_draw(layer.handle());
        }
    }

    // -- queries --

    /// Node by id.
    pub fn get_node(&self, id: &str) -> Option<&SceneNode> {
        self.node_index.get(id).map(|&i| &self.nodes[i])
    }

    /// Layer by id.
    pub fn get_layer(&self, id: &str) -> Option<&SceneLayer> {
        self.layer_index.get(id).map(|&i| &self.layers[i])
    }

    /// Edge by id.
    pub fn get_edge(&self, id: &str) -> Option<&SceneEdge> {
        self.edge_index.get(id).map(|&i| &self.edges[i])
    }

    /// Every node across all layers, in definition order.
    pub fn get_all_nodes(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes.iter()
    }

    /// Every constructed edge, in definition order.
    pub fn get_all_edges(&self) -> impl Iterator<Item = &SceneEdge> {
        self.edges.iter()
    }

    /// Layers in definition order.
    pub fn get_layers(&self) -> impl Iterator<Item = &SceneLayer> {
        self.layers.iter()
    }

    /// Currently visible layers, in definition order.
    pub fn get_visible_layers(&self) -> impl Iterator<Item = &SceneLayer> {
        self.layers.iter().filter(|l| l.is_visible())
    }

    /// Nodes of one layer; empty for an unknown layer.
    pub fn layer_nodes(&self, layer_id: &str) -> Vec<&SceneNode> {
        self.get_layer(layer_id)
            .map(|l| {
                l.node_ids()
                    .iter()
                    .filter_map(|id| self.get_node(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Edges of one layer; empty for an unknown layer.
    pub fn layer_edges(&self, layer_id: &str) -> Vec<&SceneEdge> {
        self.get_layer(layer_id)
            .map(|l| {
                l.edge_ids()
                    .iter()
                    .filter_map(|id| self.get_edge(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Nodes whose `selected` flag is set.
    pub fn selected_nodes(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes.iter().filter(|n| n.is_selected())
    }

    /// Current positions of an edge's source and target nodes.
    pub fn edge_path(&self, id: &str) -> Option<(Point, Point)> {
        let edge = self.get_edge(id)?;
        let from = self.get_node(edge.from())?;
        let to = self.get_node(edge.to())?;
        Some((from.position(), to.position()))
    }

    /// Degradations recorded during construction.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Layout decisions the scene was built from.
    pub fn layout(&self) -> &LayoutResult {
        &self.layout
    }

    /// Resolved canvas size.
    pub fn canvas_size(&self) -> Size {
        self.canvas
    }

    /// Primitive registry in use.
    pub fn registry(&self) -> &PrimitiveRegistry {
        &self.registry
    }

    /// The render surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The render surface, mutably (e.g. to drive its animation clock).
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// `true` after [`SceneGraph::destroy`].
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    // -- mutations --

    /// Merge `update` into a node and push the change to the surface.
    pub fn update_node(&mut self, id: &str, update: NodeUpdate) -> SceneryResult<()> {
        self.with_node(id, |node| node.update(update))
    }

    /// Move a node. Edges keep their route until [`SceneGraph::reroute_edges`].
    pub fn set_node_position(&mut self, id: &str, x: f64, y: f64) -> SceneryResult<()> {
        self.with_node(id, |node| node.set_position(x, y))
    }

    /// Select a node. `Ok(false)` when the node is not selectable.
    pub fn select_node(&mut self, id: &str) -> SceneryResult<bool> {
        let mut took = false;
        self.with_node(id, |node| took = node.select())?;
        Ok(took)
    }

    /// Clear a node's selection.
    pub fn deselect_node(&mut self, id: &str) -> SceneryResult<()> {
        self.with_node(id, SceneNode::deselect)
    }

    /// Clear every selection.
    pub fn deselect_all(&mut self) {
        if self.destroyed {
            return;
        }
        for idx in 0..self.nodes.len() {
            if self.nodes[idx].is_selected() {
                self.nodes[idx].deselect();
                self.sync_node(idx);
            }
        }
    }

    /// Hover a node.
    pub fn hover_node(&mut self, id: &str) -> SceneryResult<()> {
        self.with_node(id, SceneNode::hover)
    }

    /// Clear a node's hover.
    pub fn unhover_node(&mut self, id: &str) -> SceneryResult<()> {
        self.with_node(id, SceneNode::unhover)
    }

    /// Make a layer visible.
    pub fn show_layer(&mut self, id: &str) -> SceneryResult<()> {
        self.set_layer_visible(id, true)
    }

    /// Hide a layer. Membership is unchanged.
    pub fn hide_layer(&mut self, id: &str) -> SceneryResult<()> {
        self.set_layer_visible(id, false)
    }

    /// Apply a host pointer event. Events for unknown or non-interactive nodes are ignored.
    pub fn handle_pointer(&mut self, event: &PointerEvent) {
        if self.destroyed {
            return;
        }
        let Some(&idx) = self.node_index.get(event.node()) else {
            return;
        };
        if !self.nodes[idx].is_interactive() {
            return;
        }
        match event {
            PointerEvent::Click { .. } => {
                self.nodes[idx].select();
            }
            PointerEvent::Enter { .. } => {
                self.nodes[idx].hover();
                self.surface.set_cursor(Cursor::Pointer);
            }
            PointerEvent::Leave { .. } => {
                self.nodes[idx].unhover();
                self.surface.set_cursor(Cursor::Default);
            }
        }
        self.sync_node(idx);
    }

    /// Recompute every edge route from current node geometry and redraw.
    pub fn reroute_edges(&mut self) {
        if self.destroyed {
            return;
        }
        let rule = self.options.routing;
        for edge in &mut self.edges {
            let (Some(&from), Some(&to)) =
                (self.node_index.get(edge.from()), self.node_index.get(edge.to()))
            else {
                continue;
            };
            edge.reroute(&self.nodes[from], &self.nodes[to], rule);
            if let Some(element) = edge.element() {
                self.surface.update_element(element, &edge.primitive());
            }
        }
        for layer in &self.layers {
            if !layer.edge_ids().is_empty() {
                self.surface.batch_draw(layer.handle());
            }
        }
    }

    /// Cancel every edge animation and release the surface. Later calls do nothing.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        for edge in &mut self.edges {
            edge.teardown(&mut self.surface);
        }
        self.surface.destroy();
        self.destroyed = true;
        tracing::debug!("scene destroyed");
    }

    fn with_node(&mut self, id: &str, f: impl FnOnce(&mut SceneNode)) -> SceneryResult<()> {
        if self.destroyed {
            return Ok(());
        }
        let Some(&idx) = self.node_index.get(id) else {
            return self.missing("node", id);
        };
        f(&mut self.nodes[idx]);
        self.sync_node(idx);
        Ok(())
    }

    fn set_layer_visible(&mut self, id: &str, visible: bool) -> SceneryResult<()> {
        if self.destroyed {
            return Ok(());
        }
        let Some(&idx) = self.layer_index.get(id) else {
            return self.missing("layer", id);
        };
        let layer = &mut self.layers[idx];
        if visible {
            layer.show();
        } else {
            layer.hide();
        }
        self.surface.set_layer_visible(layer.handle(), visible);
        self.surface.batch_draw(layer.handle());
        Ok(())
    }

    /// Push a node's pending changes to the surface and redraw its layer.
    fn sync_node(&mut self, idx: usize) {
        let node = &mut self.nodes[idx];
        let dirty = node.take_dirty();
        if !dirty.any() {
            return;
        }
        let Some(element) = node.element() else {
            return;
        };
        if dirty.visuals {
            let primitive = self.registry.build(node);
            self.surface.update_element(element, &primitive);
            self.surface.set_draggable(element, node.is_draggable());
        }
        if dirty.position {
            self.surface.set_position(element, node.position());
        }
        if dirty.emphasis {
            self.surface.set_emphasis(element, node.emphasis());
        }
        if dirty.interaction && node.claim_pointer_binding() {
            self.surface.bind_pointer(element, node.id());
        }
        if let Some(&layer) = self.layer_index.get(node.layer_id()) {
            self.surface.batch_draw(self.layers[layer].handle());
        }
    }

    fn missing(&self, kind: &'static str, id: &str) -> SceneryResult<()> {
        match self.options.missing_ids {
            MissingIdPolicy::Ignore => {
                tracing::debug!(kind, id, "mutation target not found, ignoring");
                Ok(())
            }
            MissingIdPolicy::Report => Err(SceneryError::not_found(kind, id)),
        }
    }
}

fn resolve_canvas(config: &CanvasConfig, viewport: Size) -> SceneryResult<Size> {
    let width = config.width.value().unwrap_or(viewport.width);
    let height = config.height.value().unwrap_or(viewport.height);
    for (axis, v) in [("width", width), ("height", height)] {
        if !(v.is_finite() && v > 0.0) {
            return Err(SceneryError::validation(format!(
                "canvas {axis} must be a positive number, got {v}"
            )));
        }
    }
    Ok(Size::new(width, height))
}

#[cfg(test)]
#[path = "../../tests/unit/scene/graph.rs"]
mod tests;
