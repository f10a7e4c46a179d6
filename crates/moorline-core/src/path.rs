//! Graphics path provider: converts shapes and waypoint sequences into the
//! path geometry the docking engine intersects.

use crate::connector::{PathStyle, Waypoint, waypoint_path};
use crate::shapes::Shape;
use kurbo::{BezPath, Point};

/// Source of live path geometry for docking.
///
/// The docking engine never inspects shape internals; it sees only the paths
/// this trait hands out. `None` results are legal and mean "no renderable
/// geometry right now" — the engine falls back to raw waypoints.
pub trait PathProvider {
    /// Current rendered boundary for `shape`, reflecting its live position,
    /// size, and rotation.
    fn shape_path(&self, shape: &Shape) -> Option<BezPath>;

    /// Current rendered path for an ordered waypoint sequence, with the same
    /// curve smoothing the renderer applies.
    fn connection_path(&self, waypoints: &[Waypoint]) -> Option<BezPath>;
}

/// Path provider backed by the shape model's own path conversion.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPathProvider {
    /// Smoothing applied to connection paths, matching the renderer.
    pub style: PathStyle,
}

impl DefaultPathProvider {
    /// Create a provider drawing connections with the given path style.
    pub fn new(style: PathStyle) -> Self {
        Self { style }
    }
}

impl PathProvider for DefaultPathProvider {
    fn shape_path(&self, shape: &Shape) -> Option<BezPath> {
        let path = shape.to_path();
        if path.elements().is_empty() {
            None
        } else {
            Some(path)
        }
    }

    fn connection_path(&self, waypoints: &[Waypoint]) -> Option<BezPath> {
        let points: Vec<Point> = waypoints.iter().map(|w| w.point).collect();
        let path = waypoint_path(&points, self.style);
        if path.elements().is_empty() {
            None
        } else {
            Some(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Polygon, Rectangle};

    #[test]
    fn test_shape_path_present() {
        let provider = DefaultPathProvider::default();
        let shape = Shape::Rectangle(Rectangle::new(Point::new(0.0, 0.0), 100.0, 100.0));
        assert!(provider.shape_path(&shape).is_some());
    }

    #[test]
    fn test_degenerate_shape_has_no_path() {
        let provider = DefaultPathProvider::default();
        let shape = Shape::Polygon(Polygon::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
        ]));
        assert!(provider.shape_path(&shape).is_none());
    }

    #[test]
    fn test_connection_path_needs_two_waypoints() {
        let provider = DefaultPathProvider::default();
        assert!(provider.connection_path(&[Waypoint::new(Point::ZERO)]).is_none());
        assert!(
            provider
                .connection_path(&[
                    Waypoint::new(Point::ZERO),
                    Waypoint::new(Point::new(10.0, 0.0)),
                ])
                .is_some()
        );
    }
}
