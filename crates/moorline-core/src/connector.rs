//! Connector model: waypoints and shape-to-shape connections.

use crate::shapes::{ShapeId, ShapeStyle, StrokeStyle, point_to_polyline_dist};
use kurbo::{Affine, BezPath, Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for connectors.
pub type ConnectorId = Uuid;

/// Path style for connectors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathStyle {
    /// Straight line segments (sharp corners).
    #[default]
    Direct,
    /// Smooth bezier curves through points.
    Flowing,
}

/// A point in a connector's route.
///
/// `original` carries the logical, pre-crop coordinate the user or a layout
/// algorithm intended, so editing a bend operates on logical geometry rather
/// than the rendered, cropped geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// Rendered coordinate.
    pub point: Point,
    /// Logical pre-crop coordinate, if this waypoint has been cropped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original: Option<Point>,
}

impl Waypoint {
    /// Create a waypoint with no logical anchor.
    pub fn new(point: Point) -> Self {
        Self {
            point,
            original: None,
        }
    }

    /// Create a waypoint carrying its logical anchor.
    pub fn with_original(point: Point, original: Point) -> Self {
        Self {
            point,
            original: Some(original),
        }
    }

    /// The logical coordinate: `original` if present, else the point itself.
    pub fn anchor(&self) -> Point {
        self.original.unwrap_or(self.point)
    }
}

impl From<Point> for Waypoint {
    fn from(point: Point) -> Self {
        Self::new(point)
    }
}

/// A connection between two shapes, routed through an ordered waypoint
/// sequence. Always has at least two waypoints in a well-formed diagram.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connector {
    pub(crate) id: ConnectorId,
    /// Source endpoint shape.
    pub source: ShapeId,
    /// Target endpoint shape.
    pub target: ShapeId,
    /// Route waypoints, source end first.
    pub waypoints: Vec<Waypoint>,
    /// Path style (Direct, Flowing).
    #[serde(default)]
    pub path_style: PathStyle,
    /// Stroke style (Solid, Dashed, Dotted).
    #[serde(default)]
    pub stroke_style: StrokeStyle,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Connector {
    /// Create a new connector.
    pub fn new(source: ShapeId, target: ShapeId, waypoints: Vec<Waypoint>) -> Self {
        Self {
            id: Uuid::new_v4(),
            source,
            target,
            waypoints,
            path_style: PathStyle::Direct,
            stroke_style: StrokeStyle::default(),
            style: ShapeStyle::default(),
        }
    }

    /// Create a connector from bare points.
    pub fn from_points(source: ShapeId, target: ShapeId, points: Vec<Point>) -> Self {
        Self::new(source, target, points.into_iter().map(Waypoint::new).collect())
    }

    /// Get the unique identifier.
    pub fn id(&self) -> ConnectorId {
        self.id
    }

    /// Rendered coordinates of all waypoints, in order.
    pub fn points(&self) -> Vec<Point> {
        self.waypoints.iter().map(|w| w.point).collect()
    }

    /// Get the path representation matching what a renderer draws.
    pub fn to_path(&self) -> BezPath {
        waypoint_path(&self.points(), self.path_style)
    }

    /// Get the bounding box of the route.
    pub fn bounds(&self) -> Rect {
        let points = self.points();
        let (min_x, max_x) = points.iter().fold((f64::MAX, f64::MIN), |(mn, mx), p| {
            (mn.min(p.x), mx.max(p.x))
        });
        let (min_y, max_y) = points.iter().fold((f64::MAX, f64::MIN), |(mn, mx), p| {
            (mn.min(p.y), mx.max(p.y))
        });
        Rect::new(min_x, min_y, max_x, max_y)
    }

    /// Check if a point (in world coordinates) hits this connector's route.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let points = self.points();
        if points.len() < 2 {
            return false;
        }
        point_to_polyline_dist(point, &points) <= tolerance + self.style.stroke_width / 2.0
    }

    /// Apply a transform to the route, logical anchors included.
    pub fn transform(&mut self, affine: Affine) {
        for w in &mut self.waypoints {
            w.point = affine * w.point;
            if let Some(original) = &mut w.original {
                *original = affine * *original;
            }
        }
    }
}

/// Convert an ordered point sequence into a drawable path.
///
/// `Flowing` runs a Catmull-Rom spline (tension 0.5) through the points,
/// converted to cubic beziers; `Direct` keeps straight segments. Returns an
/// empty path for fewer than two points.
pub fn waypoint_path(points: &[Point], style: PathStyle) -> BezPath {
    let mut path = BezPath::new();

    if points.len() < 2 {
        return path;
    }

    path.move_to(points[0]);

    match style {
        PathStyle::Direct => {
            for p in &points[1..] {
                path.line_to(*p);
            }
        }
        PathStyle::Flowing => {
            let tension = 0.5;
            for i in 0..points.len() - 1 {
                let p0 = points[if i == 0 { 0 } else { i - 1 }];
                let p1 = points[i];
                let p2 = points[i + 1];
                let p3 = points[if i + 2 >= points.len() {
                    points.len() - 1
                } else {
                    i + 2
                }];

                let t1x = (p2.x - p0.x) * tension;
                let t1y = (p2.y - p0.y) * tension;
                let t2x = (p3.x - p1.x) * tension;
                let t2y = (p3.y - p1.y) * tension;

                let cp1 = Point::new(p1.x + t1x / 3.0, p1.y + t1y / 3.0);
                let cp2 = Point::new(p2.x - t2x / 3.0, p2.y - t2y / 3.0);

                path.curve_to(cp1, cp2, p2);
            }
        }
    }
    path
}
