//! Polygon shape (arbitrary custom outline).

use super::{ShapeId, ShapeStyle, ShapeTrait, point_to_polyline_dist};
use kurbo::{Affine, BezPath, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A closed shape with an arbitrary outline (series of points).
///
/// Fewer than three points is a degenerate outline: the shape has no
/// renderable boundary and `to_path` is empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Polygon {
    pub(crate) id: ShapeId,
    /// Outline points, in order. The outline closes back to the first point.
    pub points: Vec<Point>,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Polygon {
    /// Create a new empty polygon.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            points: Vec::new(),
            style: ShapeStyle::default(),
        }
    }

    /// Create from existing outline points.
    pub fn from_points(points: Vec<Point>) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
            style: ShapeStyle::default(),
        }
    }

    /// Add a point to the outline.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Get the number of outline points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the outline is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Simplify the outline by removing redundant points.
    pub fn simplify(&mut self, tolerance: f64) {
        if self.points.len() < 3 {
            return;
        }

        // Ramer-Douglas-Peucker algorithm
        self.points = rdp_simplify(&self.points, tolerance);
    }

    /// Outline points with the closing point appended.
    fn closed_points(&self) -> Vec<Point> {
        let mut pts = self.points.clone();
        if let Some(&first) = pts.first() {
            pts.push(first);
        }
        pts
    }
}

impl Default for Polygon {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeTrait for Polygon {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        let (min_x, max_x) = self.points.iter().fold((f64::MAX, f64::MIN), |(mn, mx), p| {
            (mn.min(p.x), mx.max(p.x))
        });
        let (min_y, max_y) = self.points.iter().fold((f64::MAX, f64::MIN), |(mn, mx), p| {
            (mn.min(p.y), mx.max(p.y))
        });
        Rect::new(min_x, min_y, max_x, max_y)
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        if self.points.len() < 3 {
            return false;
        }
        let band = tolerance + self.style.stroke_width / 2.0;
        if point_to_polyline_dist(point, &self.closed_points()) <= band {
            return true;
        }
        if self.style.fill_color.is_some() {
            return self.to_path().contains(point);
        }
        false
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        if self.points.len() < 3 {
            return path;
        }
        path.move_to(self.points[0]);
        for p in &self.points[1..] {
            path.line_to(*p);
        }
        path.close_path();
        path
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn transform(&mut self, affine: Affine) {
        for p in &mut self.points {
            *p = affine * *p;
        }
    }
}

/// Ramer-Douglas-Peucker line simplification.
fn rdp_simplify(points: &[Point], tolerance: f64) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }

    // Find point with maximum distance from line between first and last
    let first = points[0];
    let last = points[points.len() - 1];

    let mut max_dist = 0.0;
    let mut max_index = 0;

    for (i, point) in points.iter().enumerate().skip(1).take(points.len() - 2) {
        let dist = perpendicular_distance(*point, first, last);
        if dist > max_dist {
            max_dist = dist;
            max_index = i;
        }
    }

    if max_dist > tolerance {
        // Recursively simplify
        let mut left = rdp_simplify(&points[..=max_index], tolerance);
        let right = rdp_simplify(&points[max_index..], tolerance);

        // Combine, removing duplicate point at junction
        left.pop();
        left.extend(right);
        left
    } else {
        // All points between first and last can be removed
        vec![first, last]
    }
}

/// Calculate perpendicular distance from point to line.
fn perpendicular_distance(point: Point, line_start: Point, line_end: Point) -> f64 {
    let dx = line_end.x - line_start.x;
    let dy = line_end.y - line_start.y;

    let line_len_sq = dx * dx + dy * dy;
    if line_len_sq < f64::EPSILON {
        // Line is a point
        let px = point.x - line_start.x;
        let py = point.y - line_start.y;
        return (px * px + py * py).sqrt();
    }

    // Area of triangle * 2 / base = height
    let area2 = ((point.x - line_start.x) * dy - (point.y - line_start.y) * dx).abs();
    area2 / line_len_sq.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> Polygon {
        Polygon::from_points(vec![
            Point::new(50.0, 0.0),
            Point::new(100.0, 50.0),
            Point::new(50.0, 100.0),
            Point::new(0.0, 50.0),
        ])
    }

    #[test]
    fn test_degenerate_outline_has_no_boundary() {
        let mut polygon = Polygon::new();
        assert!(polygon.to_path().elements().is_empty());
        polygon.add_point(Point::new(0.0, 0.0));
        polygon.add_point(Point::new(10.0, 0.0));
        assert!(polygon.to_path().elements().is_empty());
        polygon.add_point(Point::new(5.0, 10.0));
        assert!(!polygon.to_path().elements().is_empty());
    }

    #[test]
    fn test_hit_test_outline() {
        let polygon = diamond();
        assert!(polygon.hit_test(Point::new(75.0, 25.0), 2.0));
        assert!(!polygon.hit_test(Point::new(50.0, 50.0), 2.0)); // hollow interior
    }

    #[test]
    fn test_hit_test_filled() {
        let mut polygon = diamond();
        polygon.style.fill_color = Some(super::super::SerializableColor::white());
        assert!(polygon.hit_test(Point::new(50.0, 50.0), 0.0));
        assert!(!polygon.hit_test(Point::new(95.0, 5.0), 0.0));
    }

    #[test]
    fn test_simplify_collinear() {
        let mut polygon = Polygon::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(50.0, 0.1),
            Point::new(100.0, 0.0),
            Point::new(100.0, 100.0),
        ]);
        polygon.simplify(1.0);
        assert_eq!(polygon.len(), 3);
    }

    #[test]
    fn test_bounds() {
        let polygon = diamond();
        let bounds = polygon.bounds();
        assert!((bounds.x0 - 0.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 100.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 100.0).abs() < f64::EPSILON);
    }
}
