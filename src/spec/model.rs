use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    foundation::error::SceneryResult,
    scene::graph::SceneGraphOptions,
    scene::model::{CanvasConfig, SceneDefinition},
    spec::validate::validate_spec,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// A complete visualization document: metadata, scene, explanations, behavior and
/// rendering hints.
pub struct VisualizationSpec {
    /// Registry id, e.g. `js-runtime`.
    pub id: String,
    /// Semantic version of the document.
    pub version: String,
    /// Display title.
    pub title: String,
    /// One-paragraph summary.
    pub description: String,
    /// Filter/search tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// What to draw.
    pub scene: SceneDefinition,
    /// Explanation panel content.
    pub explanations: ExplanationMap,
    /// Interaction behavior.
    pub interactions: InteractionConfig,
    /// Canvas and performance hints.
    pub rendering: RenderingConfig,
}

impl VisualizationSpec {
    /// Validate a JSON document and deserialize it.
    pub fn from_json_value(value: serde_json::Value) -> SceneryResult<Self> {
        validate_spec(&value)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Parse, validate and deserialize JSON text.
    pub fn from_json_str(s: &str) -> SceneryResult<Self> {
        Self::from_json_value(serde_json::from_str(s)?)
    }

    /// Explanation for the selected node, or the global explanation when nothing is selected
    /// or the node has no entry.
    pub fn explanation_for(&self, selected: Option<&str>) -> ExplanationView {
        if let Some(id) = selected
            && let Some(e) = self.explanations.nodes.get(id)
        {
            return ExplanationView {
                kind: ExplanationKind::Component,
                title: e.title.clone(),
                description: e.content.clone(),
                details: e.details.clone(),
                component: Some(id.to_string()),
            };
        }
        let global = &self.explanations.global;
        ExplanationView {
            kind: ExplanationKind::Global,
            title: global.title.clone(),
            description: global.content.clone(),
            details: global.details.clone(),
            component: None,
        }
    }

    /// Scene graph options derived from the rendering hints.
    pub fn graph_options(&self) -> SceneGraphOptions {
        SceneGraphOptions::from(&self.rendering)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
/// Global explanation plus per-node explanations keyed by node id.
pub struct ExplanationMap {
    /// Shown when no node is selected.
    pub global: Explanation,
    /// Keyed by node id.
    #[serde(default)]
    pub nodes: BTreeMap<String, Explanation>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// One explanation panel entry.
pub struct Explanation {
    /// Heading.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Bullet details.
    #[serde(default)]
    pub details: Vec<String>,
    /// Annotated code sample.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_example: Option<String>,
    /// Key takeaways.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key_points: Vec<String>,
    /// Common pitfalls.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub common_mistakes: Vec<String>,
    /// Interactive suggestion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub try_this: Option<String>,
}

/// Which explanation an [`ExplanationView`] came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExplanationKind {
    /// The global explanation.
    Global,
    /// A node's explanation.
    Component,
}

/// Resolved explanation panel content.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExplanationView {
    /// Source of the content.
    pub kind: ExplanationKind,
    /// Heading.
    pub title: String,
    /// Body text.
    pub description: String,
    /// Bullet details.
    pub details: Vec<String>,
    /// Node id for component explanations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Declared interaction behavior. Carried as data; the scene graph implements `select` and
/// `highlight`.
pub struct InteractionConfig {
    /// Click behavior: `select`, `expand`, `navigate` or `custom`.
    #[serde(default = "default_on_click")]
    pub on_click: String,
    /// Hover behavior: `highlight`, `tooltip`, `preview` or `none`.
    #[serde(default = "default_on_hover")]
    pub on_hover: String,
    /// Key to action name.
    #[serde(default)]
    pub keyboard_shortcuts: BTreeMap<String, String>,
    /// Event-driven animation hooks.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub animation_triggers: Vec<AnimationTrigger>,
}

fn default_on_click() -> String {
    "select".to_string()
}

fn default_on_hover() -> String {
    "highlight".to_string()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// One animation hook.
pub struct AnimationTrigger {
    /// Triggering event name.
    pub event: String,
    /// Target node id.
    pub target: String,
    /// Animation name.
    pub animation: String,
}

/// Expected rendering cost.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    /// Few nodes, no animation.
    #[default]
    Low,
    /// Moderate.
    Medium,
    /// Many nodes or animated edges.
    High,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Canvas configuration and performance hints.
pub struct RenderingConfig {
    /// Canvas dimensions.
    #[serde(default)]
    pub canvas: CanvasConfig,
    /// Expected rendering cost.
    #[serde(default)]
    pub complexity: Complexity,
    /// Declared node count.
    #[serde(default)]
    pub node_count: u32,
}

impl From<&RenderingConfig> for SceneGraphOptions {
    fn from(rendering: &RenderingConfig) -> Self {
        Self {
            canvas: rendering.canvas.clone(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/spec/model.rs"]
mod tests;
