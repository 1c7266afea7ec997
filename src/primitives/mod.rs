//! Retained-mode render descriptions for scene nodes.
//!
//! A [`Primitive`] is a group of [`Shape`]s in node-local coordinates, anchored at the
//! node's origin. Factories in [`builtin`] turn a [`crate::SceneNode`] into one;
//! [`registry::PrimitiveRegistry`] maps primitive tags to factories.

pub(crate) mod builtin;
pub(crate) mod registry;

use crate::{
    foundation::core::{Point, Rect},
    scene::model::PrimitiveKind,
};

/// One drawable shape, in coordinates relative to the owning [`Primitive::origin`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Shape {
    /// Filled and/or stroked rectangle.
    Rect {
        /// Local geometry.
        rect: Rect,
        /// Fill color; `None` leaves the interior transparent.
        fill: Option<String>,
        /// Stroke color.
        stroke: Option<String>,
        /// Stroke width in pixels.
        stroke_width: f64,
        /// Corner radius in pixels.
        corner_radius: f64,
        /// Stroke dash pattern.
        dash: Option<Vec<f64>>,
    },
    /// Filled and stroked circle.
    Circle {
        /// Local center.
        center: Point,
        /// Radius in pixels.
        radius: f64,
        /// Fill color.
        fill: String,
        /// Stroke color.
        stroke: Option<String>,
    },
    /// Single-style text run.
    Text {
        /// Top-left of the text box.
        at: Point,
        /// Content.
        text: String,
        /// Font size in pixels.
        font_size: f64,
        /// Bold weight.
        bold: bool,
        /// Text color.
        color: String,
        /// Wrap width; `None` never wraps.
        width: Option<f64>,
    },
    /// Open polyline.
    Line {
        /// Vertices in order.
        points: Vec<Point>,
        /// Stroke color.
        stroke: String,
        /// Stroke width in pixels.
        width: f64,
        /// Dash pattern.
        dash: Option<Vec<f64>>,
    },
    /// Polyline with an arrowhead at the final vertex.
    Arrow {
        /// Vertices in order.
        points: Vec<Point>,
        /// Stroke and head color.
        stroke: String,
        /// Stroke width in pixels.
        width: f64,
        /// Arrowhead length in pixels.
        pointer_length: f64,
        /// Arrowhead width in pixels.
        pointer_width: f64,
        /// Dash pattern.
        dash: Option<Vec<f64>>,
    },
}

impl Shape {
    /// Plain text at `at`, non-bold, not wrapped.
    pub fn text(at: Point, text: impl Into<String>, font_size: f64, color: &str) -> Self {
        Self::Text {
            at,
            text: text.into(),
            font_size,
            bold: false,
            color: color.to_string(),
            width: None,
        }
    }
}

/// Render description of one node (a group in retained-mode terms).
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Primitive {
    /// Primitive kind that produced the shapes.
    pub kind: PrimitiveKind,
    /// Group origin in scene coordinates.
    pub origin: Point,
    /// Shapes painted in order.
    pub shapes: Vec<Shape>,
}

impl Primitive {
    /// Empty group at `origin`.
    pub fn new(kind: PrimitiveKind, origin: Point) -> Self {
        Self {
            kind,
            origin,
            shapes: Vec::new(),
        }
    }

    /// Append a shape.
    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Text content of every text shape, in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.shapes.iter().filter_map(|s| match s {
            Shape::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}
