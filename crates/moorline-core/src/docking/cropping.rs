//! Cropping docking engine.

use super::{ConnectionDocking, DockingError, DockingPoint, DockingResult};
use crate::connector::Waypoint;
use crate::intersect::path_intersection;
use crate::path::PathProvider;
use crate::shapes::Shape;

/// Docking strategy that trims connectors to shape boundaries.
///
/// Asks the path provider for the live boundary of each endpoint shape and
/// for the rendered connection path, intersects them once per end, and
/// assembles the cropped waypoint sequence. When geometry is missing or the
/// paths do not cross, the affected end keeps its raw waypoint. Holds no
/// state between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct CroppingDocking<P> {
    provider: P,
}

impl<P: PathProvider> CroppingDocking<P> {
    /// Create a cropping strategy over the given path provider.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// The path provider this strategy reads geometry from.
    pub fn provider(&self) -> &P {
        &self.provider
    }
}

impl<P: PathProvider> ConnectionDocking for CroppingDocking<P> {
    fn docking_point(
        &self,
        waypoints: &[Waypoint],
        shape: &Shape,
        dock_start: bool,
    ) -> DockingResult<DockingPoint> {
        if waypoints.len() < 2 {
            return Err(DockingError::TooFewWaypoints(waypoints.len()));
        }
        let idx = if dock_start { 0 } else { waypoints.len() - 1 };

        let crossing = match (
            self.provider.shape_path(shape),
            self.provider.connection_path(waypoints),
        ) {
            (Some(shape_path), Some(connection_path)) => {
                path_intersection(&shape_path, &connection_path, dock_start)
            }
            _ => {
                log::trace!(
                    "no path geometry for shape {}; docking keeps the raw waypoint",
                    shape.id()
                );
                None
            }
        };

        Ok(DockingPoint {
            point: waypoints[idx],
            actual: crossing.unwrap_or(waypoints[idx].point),
            idx,
        })
    }

    fn cropped_waypoints(
        &self,
        waypoints: &[Waypoint],
        source: &Shape,
        target: &Shape,
    ) -> DockingResult<Vec<Waypoint>> {
        let source_dock = self.docking_point(waypoints, source, true)?;
        let target_dock = self.docking_point(waypoints, target, false)?;

        let mut cropped = Vec::with_capacity(waypoints.len());
        cropped.push(source_dock.to_waypoint());
        cropped.extend_from_slice(&waypoints[source_dock.idx + 1..target_dock.idx]);
        cropped.push(target_dock.to_waypoint());
        Ok(cropped)
    }
}
