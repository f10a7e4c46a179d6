//! Diagram document: shapes, connectors, and the re-crop pass.

use crate::connector::{Connector, ConnectorId};
use crate::docking::{ConnectionDocking, DockingError, DockingResult};
use crate::shapes::{Shape, ShapeId};
use kurbo::{Affine, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A diagram document containing all shapes and connectors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Diagram {
    /// All shapes in the document, keyed by ID.
    shapes: HashMap<ShapeId, Shape>,
    /// Z-order of shapes (back to front).
    z_order: Vec<ShapeId>,
    /// All connectors, keyed by ID.
    connectors: HashMap<ConnectorId, Connector>,
    /// Connector insertion order.
    connector_order: Vec<ConnectorId>,
}

impl Diagram {
    /// Create a new empty diagram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a shape to the diagram.
    pub fn add_shape(&mut self, shape: Shape) -> ShapeId {
        let id = shape.id();
        self.z_order.push(id);
        self.shapes.insert(id, shape);
        id
    }

    /// Remove a shape, detaching any connectors that reference it.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        let removed = self.shapes.remove(&id)?;
        self.z_order.retain(|&shape_id| shape_id != id);

        let detached: Vec<ConnectorId> = self
            .connector_order
            .iter()
            .copied()
            .filter(|cid| {
                self.connectors
                    .get(cid)
                    .is_some_and(|c| c.source == id || c.target == id)
            })
            .collect();
        for cid in &detached {
            self.connectors.remove(cid);
        }
        self.connector_order.retain(|cid| !detached.contains(cid));
        if !detached.is_empty() {
            log::debug!("removed shape {id} and {} attached connector(s)", detached.len());
        }

        Some(removed)
    }

    /// Get a shape by ID.
    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    /// Get a mutable shape by ID.
    pub fn shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(&id)
    }

    /// Iterate shapes in z-order (back to front).
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.z_order.iter().filter_map(|id| self.shapes.get(id))
    }

    /// Number of shapes.
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Add a connector. Both endpoints must resolve to shapes already in the
    /// diagram.
    pub fn add_connector(&mut self, connector: Connector) -> DockingResult<ConnectorId> {
        for endpoint in [connector.source, connector.target] {
            if !self.shapes.contains_key(&endpoint) {
                return Err(DockingError::MissingEndpoint(endpoint));
            }
        }
        let id = connector.id();
        self.connector_order.push(id);
        self.connectors.insert(id, connector);
        Ok(id)
    }

    /// Remove a connector.
    pub fn remove_connector(&mut self, id: ConnectorId) -> Option<Connector> {
        self.connector_order.retain(|&cid| cid != id);
        self.connectors.remove(&id)
    }

    /// Get a connector by ID.
    pub fn connector(&self, id: ConnectorId) -> Option<&Connector> {
        self.connectors.get(&id)
    }

    /// Get a mutable connector by ID.
    pub fn connector_mut(&mut self, id: ConnectorId) -> Option<&mut Connector> {
        self.connectors.get_mut(&id)
    }

    /// Iterate connectors in insertion order.
    pub fn connectors(&self) -> impl Iterator<Item = &Connector> {
        self.connector_order
            .iter()
            .filter_map(|id| self.connectors.get(id))
    }

    /// Connectors attached to a shape at either end.
    pub fn connectors_of(&self, shape: ShapeId) -> impl Iterator<Item = &Connector> {
        self.connectors()
            .filter(move |c| c.source == shape || c.target == shape)
    }

    /// Move a shape by a delta. Returns false if the shape is unknown.
    pub fn move_shape(&mut self, id: ShapeId, delta: Vec2) -> bool {
        match self.shapes.get_mut(&id) {
            Some(shape) => {
                shape.transform(Affine::translate(delta));
                true
            }
            None => false,
        }
    }

    /// Re-crop every connector through the given docking strategy.
    ///
    /// This is the layout-pass hook: call it after shapes moved or resized.
    /// Each connector's waypoints are replaced by the cropped sequence;
    /// logical anchors survive repeated passes via `Waypoint::original`.
    pub fn recrop(&mut self, docking: &impl ConnectionDocking) -> DockingResult<()> {
        let ids: Vec<ConnectorId> = self.connector_order.clone();
        for id in ids {
            let cropped = match self.connectors.get(&id) {
                Some(connector) => docking.crop_connector(connector, self)?,
                None => continue,
            };
            if let Some(connector) = self.connectors.get_mut(&id) {
                connector.waypoints = cropped;
            }
        }
        Ok(())
    }

    /// Serialize the diagram to JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Deserialize a diagram from JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::PathStyle;
    use crate::docking::CroppingDocking;
    use crate::path::DefaultPathProvider;
    use crate::shapes::{Ellipse, Rectangle};
    use kurbo::Point;

    fn two_rects() -> (Diagram, ShapeId, ShapeId) {
        let mut diagram = Diagram::new();
        let source =
            diagram.add_shape(Shape::Rectangle(Rectangle::new(Point::new(0.0, 0.0), 100.0, 100.0)));
        let target = diagram
            .add_shape(Shape::Rectangle(Rectangle::new(Point::new(200.0, 0.0), 100.0, 100.0)));
        (diagram, source, target)
    }

    #[test]
    fn test_add_and_lookup() {
        let (diagram, source, target) = two_rects();
        assert_eq!(diagram.shape_count(), 2);
        assert!(diagram.shape(source).is_some());
        // z-order iteration follows insertion order
        let ids: Vec<ShapeId> = diagram.shapes().map(|s| s.id()).collect();
        assert_eq!(ids, vec![source, target]);
    }

    #[test]
    fn test_add_connector_validates_endpoints() {
        let (mut diagram, source, target) = two_rects();
        let ok = Connector::from_points(
            source,
            target,
            vec![Point::new(50.0, 50.0), Point::new(250.0, 50.0)],
        );
        assert!(diagram.add_connector(ok).is_ok());

        let dangling = uuid::Uuid::new_v4();
        let bad = Connector::from_points(
            source,
            dangling,
            vec![Point::new(50.0, 50.0), Point::new(250.0, 50.0)],
        );
        assert!(matches!(
            diagram.add_connector(bad),
            Err(DockingError::MissingEndpoint(id)) if id == dangling
        ));
    }

    #[test]
    fn test_remove_shape_detaches_connectors() {
        let (mut diagram, source, target) = two_rects();
        let connector = Connector::from_points(
            source,
            target,
            vec![Point::new(50.0, 50.0), Point::new(250.0, 50.0)],
        );
        let cid = diagram.add_connector(connector).unwrap();

        diagram.remove_shape(target);
        assert!(diagram.connector(cid).is_none());
        assert_eq!(diagram.connectors().count(), 0);
    }

    #[test]
    fn test_remove_and_edit_connector() {
        let (mut diagram, source, target) = two_rects();
        let cid = diagram
            .add_connector(Connector::from_points(
                source,
                target,
                vec![Point::new(50.0, 50.0), Point::new(250.0, 50.0)],
            ))
            .unwrap();

        diagram
            .connector_mut(cid)
            .unwrap()
            .waypoints
            .insert(1, crate::connector::Waypoint::new(Point::new(150.0, 20.0)));
        assert_eq!(diagram.connector(cid).unwrap().waypoints.len(), 3);

        assert!(diagram.remove_connector(cid).is_some());
        assert!(diagram.connector(cid).is_none());
        assert!(!diagram.move_shape(uuid::Uuid::new_v4(), kurbo::Vec2::ZERO));
    }

    #[test]
    fn test_connectors_of() {
        let (mut diagram, source, target) = two_rects();
        let other = diagram.add_shape(Shape::Ellipse(Ellipse::circle(Point::new(500.0, 50.0), 30.0)));
        diagram
            .add_connector(Connector::from_points(
                source,
                target,
                vec![Point::new(50.0, 50.0), Point::new(250.0, 50.0)],
            ))
            .unwrap();
        diagram
            .add_connector(Connector::from_points(
                target,
                other,
                vec![Point::new(250.0, 50.0), Point::new(500.0, 50.0)],
            ))
            .unwrap();

        assert_eq!(diagram.connectors_of(source).count(), 1);
        assert_eq!(diagram.connectors_of(target).count(), 2);
    }

    #[test]
    fn test_recrop_after_move() {
        let (mut diagram, source, target) = two_rects();
        let cid = diagram
            .add_connector(Connector::from_points(
                source,
                target,
                vec![Point::new(50.0, 50.0), Point::new(250.0, 50.0)],
            ))
            .unwrap();

        let docking = CroppingDocking::new(DefaultPathProvider::new(PathStyle::Direct));
        diagram.recrop(&docking).unwrap();
        {
            let connector = diagram.connector(cid).unwrap();
            assert!((connector.waypoints[0].point - Point::new(100.0, 50.0)).hypot() < 1e-9);
            assert!((connector.waypoints[1].point - Point::new(200.0, 50.0)).hypot() < 1e-9);
        }

        // Shrink the gap and re-crop: endpoints follow the boundary, the
        // logical anchors stay where the user put them.
        diagram.move_shape(target, kurbo::Vec2::new(-50.0, 0.0));
        diagram.recrop(&docking).unwrap();
        let connector = diagram.connector(cid).unwrap();
        assert!((connector.waypoints[1].point - Point::new(150.0, 50.0)).hypot() < 1e-9);
        assert_eq!(connector.waypoints[0].original, Some(Point::new(50.0, 50.0)));
        assert_eq!(connector.waypoints[1].original, Some(Point::new(250.0, 50.0)));
    }

    #[test]
    fn test_json_round_trip() {
        let (mut diagram, source, target) = two_rects();
        diagram
            .add_connector(Connector::from_points(
                source,
                target,
                vec![Point::new(50.0, 50.0), Point::new(250.0, 50.0)],
            ))
            .unwrap();

        let json = diagram.to_json().unwrap();
        let restored = Diagram::from_json(&json).unwrap();
        assert_eq!(restored.shape_count(), 2);
        assert_eq!(restored.connectors().count(), 1);
        let connector = restored.connectors().next().unwrap();
        assert_eq!(connector.source, source);
        assert_eq!(connector.waypoints[0].point, Point::new(50.0, 50.0));
    }
}
