use std::{collections::HashMap, sync::Arc};

use crate::{
    foundation::error::{SceneryError, SceneryResult},
    spec::model::VisualizationSpec,
};

/// Produces the raw JSON of one visualization on first load.
pub type SpecLoader = Box<dyn Fn() -> SceneryResult<serde_json::Value>>;

const JS_RUNTIME: &str = include_str!("../../data/visualizations/js-runtime.json");
const EVENT_LOOP: &str = include_str!("../../data/visualizations/event-loop.json");

/// Registry entry as listed by [`SpecRegistry::list`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct VisualizationEntry {
    /// Registry id.
    pub id: String,
    /// Human-readable title derived from the id.
    pub title: String,
}

/// Id-to-loader registry with a cache of validated specs.
///
/// Loaders run lazily on the first [`SpecRegistry::load`] of their id; the validated result
/// is cached until [`SpecRegistry::clear_cache`].
#[derive(Default)]
pub struct SpecRegistry {
    loaders: Vec<(String, SpecLoader)>,
    cache: HashMap<String, Arc<VisualizationSpec>>,
}

impl SpecRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the bundled visualizations.
    pub fn with_builtins() -> Self {
        let mut reg = Self::new();
        reg.register_json("js-runtime", JS_RUNTIME);
        reg.register_json("event-loop", EVENT_LOOP);
        reg
    }

    /// Add or replace the loader for `id`. Replacing drops any cached spec for `id`.
    pub fn register<F>(&mut self, id: impl Into<String>, loader: F)
    where
        F: Fn() -> SceneryResult<serde_json::Value> + 'static,
    {
        let id = id.into();
        self.cache.remove(&id);
        let loader: SpecLoader = Box::new(loader);
        match self.loaders.iter_mut().find(|(k, _)| *k == id) {
            Some(slot) => slot.1 = loader,
            None => self.loaders.push((id, loader)),
        }
    }

    /// Register a visualization given as JSON text, parsed on first load.
    pub fn register_json(&mut self, id: impl Into<String>, json: impl Into<String>) {
        let json = json.into();
        self.register(id, move || Ok(serde_json::from_str(&json)?));
    }

    /// `true` when a loader exists for `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.loaders.iter().any(|(k, _)| k == id)
    }

    /// Load, validate and cache a visualization. Later loads return the same `Arc`.
    #[tracing::instrument(skip(self))]
    pub fn load(&mut self, id: &str) -> SceneryResult<Arc<VisualizationSpec>> {
        if let Some(spec) = self.cache.get(id) {
            return Ok(Arc::clone(spec));
        }
        let (_, loader) = self
            .loaders
            .iter()
            .find(|(k, _)| k == id)
            .ok_or_else(|| SceneryError::not_found("visualization", id))?;

        let spec = Arc::new(VisualizationSpec::from_json_value(loader()?)?);
        tracing::debug!(title = %spec.title, "visualization loaded");
        self.cache.insert(id.to_string(), Arc::clone(&spec));
        Ok(spec)
    }

    /// Registered ids with formatted titles, in registration order.
    pub fn list(&self) -> Vec<VisualizationEntry> {
        self.loaders
            .iter()
            .map(|(id, _)| VisualizationEntry {
                id: id.clone(),
                title: format_title(id),
            })
            .collect()
    }

    /// Load into the cache, logging instead of returning failures.
    pub fn preload(&mut self, id: &str) {
        if let Err(err) = self.load(id) {
            tracing::error!(id, error = %err, "preload failed");
        }
    }

    /// `true` when `id` is cached.
    pub fn is_cached(&self, id: &str) -> bool {
        self.cache.contains_key(id)
    }

    /// Drop every cached spec; loaders stay registered.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

impl std::fmt::Debug for SpecRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpecRegistry")
            .field("ids", &self.loaders.iter().map(|(k, _)| k).collect::<Vec<_>>())
            .field("cached", &self.cache.len())
            .finish()
    }
}

/// `js-runtime` -> `JavaScript Runtime`.
pub fn format_title(id: &str) -> String {
    id.split('-')
        .map(|word| match word.to_lowercase().as_str() {
            "js" => "JavaScript".to_string(),
            "ts" => "TypeScript".to_string(),
            "css" => "CSS".to_string(),
            "html" => "HTML".to_string(),
            _ => {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "../../tests/unit/spec/registry.rs"]
mod tests;
