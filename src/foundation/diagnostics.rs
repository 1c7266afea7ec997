use std::fmt;

/// A non-fatal degradation recorded while laying out or building a scene.
///
/// Every recorded diagnostic is also emitted as a `tracing` warning.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The layout kind was not recognized; the default stacking layout was used.
    UnknownLayout {
        /// The layout tag as written in the definition.
        requested: String,
    },
    /// No factory was registered for the node's primitive kind; `box` was used.
    UnknownPrimitive {
        /// Node whose primitive fell back.
        node: String,
        /// The primitive tag as written in the definition.
        requested: String,
    },
    /// An edge endpoint did not resolve to a constructed node; the edge was not built.
    DroppedEdge {
        /// Edge id.
        edge: String,
        /// The endpoint id that failed to resolve.
        missing: String,
    },
    /// The edge type was not recognized; the edge was drawn as an arrow.
    UnknownEdgeKind {
        /// Edge id.
        edge: String,
        /// The edge type as written in the definition.
        requested: String,
    },
    /// A layer, node or edge id appeared more than once; the later occurrence was skipped.
    Duplicate {
        /// `"layer"`, `"node"` or `"edge"`.
        entity: &'static str,
        /// The repeated id.
        id: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownLayout { requested } => {
                write!(f, "unknown layout type '{requested}', using default layout")
            }
            Self::UnknownPrimitive { node, requested } => write!(
                f,
                "primitive type '{requested}' not found in registry for node '{node}', falling back to 'box'"
            ),
            Self::DroppedEdge { edge, missing } => {
                write!(f, "edge '{edge}' dropped: node '{missing}' does not exist")
            }
            Self::UnknownEdgeKind { edge, requested } => {
                write!(f, "unknown edge type '{requested}' for edge '{edge}', drawing as arrow")
            }
            Self::Duplicate { entity, id } => {
                write!(f, "duplicate {entity} id '{id}' skipped")
            }
        }
    }
}

/// Ordered collection of diagnostics.
#[derive(Clone, Debug, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic and emit it as a warning.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        tracing::warn!("{diagnostic}");
        self.items.push(diagnostic);
    }

    /// Recorded diagnostics in the order they occurred.
    pub fn items(&self) -> &[Diagnostic] {
        &self.items
    }

    /// Number of recorded diagnostics.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// `true` when nothing degraded.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Move all diagnostics from `other` onto the end of this collection without re-logging.
    pub fn append(&mut self, other: &mut Diagnostics) {
        self.items.append(&mut other.items);
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/diagnostics.rs"]
mod tests;
