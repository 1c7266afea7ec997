//! Scene definition data model and the live scene built from it.
//!
//! [`model`] holds the serde types of the declarative definition. [`graph::SceneGraph`]
//! is the entry point that turns a definition into [`node::SceneNode`]s,
//! [`edge::SceneEdge`]s and [`layer::SceneLayer`]s on a render surface.

pub(crate) mod edge;
pub(crate) mod graph;
pub(crate) mod layer;
pub(crate) mod model;
pub(crate) mod node;
