use crate::{
    foundation::core::{Point, Rect, Vec2},
    primitives::{Primitive, Shape},
    render::surface::{AnimationTicket, ElementHandle, RenderSurface},
    scene::model::{EdgeDef, EdgeKind, EdgeStyle, PrimitiveKind},
    scene::node::SceneNode,
};

/// Offsets at or below this on either axis produce a straight connector.
pub const BEND_THRESHOLD: f64 = 40.0;
/// Label displacement from the path midpoint.
pub const LABEL_OFFSET: Vec2 = Vec2::new(8.0, -20.0);
/// Dash offset advance, in pixels per elapsed millisecond, for animated edges.
pub const DASH_FLOW_RATE: f64 = 1.0 / 20.0;
/// Dash pattern applied to animated edges.
pub const DASH_FLOW_PATTERN: [f64; 2] = [10.0, 5.0];

const LABEL_FONT_SIZE: f64 = 11.0;
const LABEL_COLOR: &str = "#64748b";

/// Dash offset of an animated edge `time_ms` after its animation started.
pub fn dash_offset(time_ms: f64) -> f64 {
    -(time_ms * DASH_FLOW_RATE)
}

/// How the router decides between horizontal and vertical exits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DominanceRule {
    /// Horizontal when `|dx| > |dy| * 0.5`.
    Biased,
    /// Horizontal when `|dx| > |dy|`.
    #[default]
    Strict,
}

impl DominanceRule {
    fn horizontal(self, dx: f64, dy: f64) -> bool {
        match self {
            Self::Biased => dx > dy * 0.5,
            Self::Strict => dx > dy,
        }
    }
}

/// Box edge a connector leaves or enters through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Top edge.
    Top,
    /// Right edge.
    Right,
    /// Bottom edge.
    Bottom,
    /// Left edge.
    Left,
}

/// An orthogonal connector path.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct EdgeRoute {
    points: Vec<Point>,
    /// Side of the source box the path leaves through.
    pub exit: Side,
    /// Side of the target box the path enters through.
    pub entry: Side,
    /// Where the label's top-left goes.
    pub label_anchor: Point,
}

impl EdgeRoute {
    /// Two vertices for a straight connector, three with a bend.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Vertices flattened as `x0, y0, x1, y1, ...`.
    pub fn flat_points(&self) -> Vec<f64> {
        self.points.iter().flat_map(|p| [p.x, p.y]).collect()
    }

    /// The bend vertex, if the path has one.
    pub fn bend(&self) -> Option<Point> {
        (self.points.len() == 3).then(|| self.points[1])
    }

    /// First vertex.
    pub fn start(&self) -> Point {
        self.points[0]
    }

    /// Last vertex.
    pub fn end(&self) -> Point {
        self.points[self.points.len() - 1]
    }
}

/// Route a connector from `from` to `to` with at most one bend.
///
/// Boxes are not treated as obstacles; only the two endpoint boxes are considered.
pub fn route_orthogonal(from: Rect, to: Rect, rule: DominanceRule) -> EdgeRoute {
    let (fc, tc) = (from.center(), to.center());
    let dx = (tc.x - fc.x).abs();
    let dy = (tc.y - fc.y).abs();

    let (start, end, exit, entry) = if rule.horizontal(dx, dy) {
        if tc.x > fc.x {
            (
                Point::new(from.x1, fc.y),
                Point::new(to.x0, tc.y),
                Side::Right,
                Side::Left,
            )
        } else {
            (
                Point::new(from.x0, fc.y),
                Point::new(to.x1, tc.y),
                Side::Left,
                Side::Right,
            )
        }
    } else if tc.y > fc.y {
        (
            Point::new(fc.x, from.y1),
            Point::new(tc.x, to.y0),
            Side::Bottom,
            Side::Top,
        )
    } else {
        (
            Point::new(fc.x, from.y0),
            Point::new(tc.x, to.y1),
            Side::Top,
            Side::Bottom,
        )
    };

    let ox = (end.x - start.x).abs();
    let oy = (end.y - start.y).abs();
    let points = if ox > BEND_THRESHOLD && oy > BEND_THRESHOLD {
        let bend = if ox > oy {
            Point::new(end.x, start.y)
        } else {
            Point::new(start.x, end.y)
        };
        vec![start, bend, end]
    } else {
        vec![start, end]
    };

    let mid = match points.as_slice() {
        [_, bend, _] => *bend,
        _ => start.midpoint(end),
    };

    EdgeRoute {
        points,
        exit,
        entry,
        label_anchor: mid + LABEL_OFFSET,
    }
}

/// A constructed connector between two scene nodes.
#[derive(Debug)]
pub struct SceneEdge {
    id: String,
    from: String,
    to: String,
    layer_id: String,
    kind: EdgeKind,
    style: EdgeStyle,
    animated: bool,
    label: Option<String>,
    route: EdgeRoute,
    element: Option<ElementHandle>,
    animation: Option<AnimationTicket>,
}

impl SceneEdge {
    /// Build an edge and route it from the endpoints' current geometry.
    pub fn new(
        spec: &EdgeDef,
        from: &SceneNode,
        to: &SceneNode,
        layer_id: &str,
        rule: DominanceRule,
    ) -> Self {
        Self {
            id: spec.id.clone(),
            from: from.id().to_string(),
            to: to.id().to_string(),
            layer_id: layer_id.to_string(),
            kind: spec.kind.clone(),
            style: spec.style.clone(),
            animated: spec.animated,
            label: spec.label.clone(),
            route: route_orthogonal(from.rect(), to.rect(), rule),
            element: None,
            animation: None,
        }
    }

    /// Edge id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Source node id.
    pub fn from(&self) -> &str {
        &self.from
    }

    /// Target node id.
    pub fn to(&self) -> &str {
        &self.to
    }

    /// Id of the layer this edge belongs to.
    pub fn layer_id(&self) -> &str {
        &self.layer_id
    }

    /// Rendering type.
    pub fn kind(&self) -> &EdgeKind {
        &self.kind
    }

    /// Stroke attributes.
    pub fn style(&self) -> &EdgeStyle {
        &self.style
    }

    /// Runs the dash-flow animation.
    pub fn is_animated(&self) -> bool {
        self.animated
    }

    /// Label text.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Current route.
    pub fn route(&self) -> &EdgeRoute {
        &self.route
    }

    /// Surface element, once drawn.
    pub fn element(&self) -> Option<ElementHandle> {
        self.element
    }

    /// `true` while a dash-flow animation is registered on the surface.
    pub fn has_animation(&self) -> bool {
        self.animation.is_some()
    }

    /// Recompute the route from the endpoints' current geometry.
    pub fn reroute(&mut self, from: &SceneNode, to: &SceneNode, rule: DominanceRule) {
        self.route = route_orthogonal(from.rect(), to.rect(), rule);
    }

    /// Render description: the routed connector plus its label.
    pub fn primitive(&self) -> Primitive {
        let dash = if self.animated {
            Some(DASH_FLOW_PATTERN.to_vec())
        } else {
            self.style.dash_array.clone()
        };
        let points = self.route.points().to_vec();
        let stroke = self.style.color.clone();

        let mut p = Primitive::new(PrimitiveKind::Arrow, Point::ZERO);
        p.push(match self.kind {
            EdgeKind::Line => Shape::Line {
                points,
                stroke,
                width: self.style.width,
                dash,
            },
            // Curves and unrecognized types render as arrows.
            _ => Shape::Arrow {
                points,
                stroke,
                width: self.style.width,
                pointer_length: 10.0,
                pointer_width: 10.0,
                dash,
            },
        });
        if let Some(label) = &self.label {
            p.push(Shape::text(
                self.route.label_anchor,
                label,
                LABEL_FONT_SIZE,
                LABEL_COLOR,
            ));
        }
        p
    }

    pub(crate) fn attach(&mut self, element: ElementHandle) {
        self.element = Some(element);
    }

    pub(crate) fn attach_animation(&mut self, ticket: AnimationTicket) {
        self.animation = Some(ticket);
    }

    /// Cancel this edge's animation, if any. Safe to call more than once.
    pub fn teardown<S: RenderSurface + ?Sized>(&mut self, surface: &mut S) {
        if let Some(ticket) = self.animation.take() {
            surface.cancel_animation(ticket);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/edge.rs"]
mod tests;
