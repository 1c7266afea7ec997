//! Visualization documents: the JSON format wrapping a scene definition, its validator, and
//! the registry that loads and caches documents by id.

pub(crate) mod model;
pub(crate) mod registry;
pub(crate) mod validate;
