use std::collections::BTreeMap;

use crate::{
    foundation::diagnostics::{Diagnostic, Diagnostics},
    primitives::{Primitive, builtin},
    scene::model::PrimitiveKind,
    scene::node::SceneNode,
};

/// Builds a node's render description from its current state.
pub type PrimitiveFactory = Box<dyn Fn(&SceneNode) -> Primitive>;

/// Mapping from primitive tag to factory.
///
/// Owned by a [`crate::SceneGraph`]; hosts extend it with [`PrimitiveRegistry::register`]
/// before building a scene.
pub struct PrimitiveRegistry {
    factories: BTreeMap<PrimitiveKind, PrimitiveFactory>,
}

impl PrimitiveRegistry {
    /// Registry with no factories. Every node then renders as a `box`.
    pub fn new() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// Registry holding the eight built-in archetypes.
    pub fn with_builtins() -> Self {
        let mut reg = Self::new();
        for (kind, factory) in builtin::builtins() {
            reg.factories.insert(kind, Box::new(factory));
        }
        reg
    }

    /// Add or replace the factory for `kind`.
    pub fn register<F>(&mut self, kind: impl Into<PrimitiveKind>, factory: F)
    where
        F: Fn(&SceneNode) -> Primitive + 'static,
    {
        let kind = kind.into();
        tracing::debug!(kind = %kind, "primitive registered");
        self.factories.insert(kind, Box::new(factory));
    }

    /// `true` when a factory exists for `kind`.
    pub fn has(&self, kind: &PrimitiveKind) -> bool {
        self.factories.contains_key(kind)
    }

    /// Registered kinds in tag order.
    pub fn kinds(&self) -> Vec<PrimitiveKind> {
        self.factories.keys().cloned().collect()
    }

    /// Build `node`'s primitive, falling back to `box` and recording
    /// [`Diagnostic::UnknownPrimitive`] when its kind is unregistered.
    pub fn create(&self, node: &SceneNode, diagnostics: &mut Diagnostics) -> Primitive {
        if !self.has(node.kind()) {
            diagnostics.push(Diagnostic::UnknownPrimitive {
                node: node.id().to_string(),
                requested: node.kind().to_string(),
            });
        }
        self.build(node)
    }

    /// Build `node`'s primitive, falling back to `box` silently.
    pub fn build(&self, node: &SceneNode) -> Primitive {
        match self
            .factories
            .get(node.kind())
            .or_else(|| self.factories.get(&PrimitiveKind::Box))
        {
            Some(factory) => factory(node),
            None => builtin::box_primitive(node),
        }
    }
}

impl Default for PrimitiveRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl std::fmt::Debug for PrimitiveRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrimitiveRegistry")
            .field("kinds", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/primitives/registry.rs"]
mod tests;
