//! Connection docking: strategies that decide where a connector's rendered
//! line meets its endpoint shapes.

mod cropping;

pub use cropping::CroppingDocking;

use crate::connector::{Connector, Waypoint};
use crate::diagram::Diagram;
use crate::shapes::{Shape, ShapeId};
use kurbo::Point;
use thiserror::Error;

/// Docking errors.
#[derive(Debug, Error)]
pub enum DockingError {
    #[error("connector needs at least two waypoints, got {0}")]
    TooFewWaypoints(usize),
    #[error("connector endpoint does not resolve to a shape: {0}")]
    MissingEndpoint(ShapeId),
}

/// Result type for docking operations.
pub type DockingResult<T> = Result<T, DockingError>;

/// Docking descriptor for one end of a connector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DockingPoint {
    /// Raw waypoint at the docking index.
    pub point: Waypoint,
    /// Boundary-corrected point; equals the raw waypoint when no crossing
    /// was found.
    pub actual: Point,
    /// Index of the docked end in the original waypoint sequence: 0 for the
    /// source end, `len - 1` for the target end.
    pub idx: usize,
}

impl DockingPoint {
    /// Waypoint for the cropped sequence: positioned at the corrected point,
    /// keeping the logical anchor stable across repeated croppings.
    pub fn to_waypoint(&self) -> Waypoint {
        Waypoint::with_original(self.actual, self.point.anchor())
    }
}

/// A docking strategy.
///
/// Implementations are pure: no mutation of inputs, no state between calls,
/// identical inputs give identical output.
pub trait ConnectionDocking {
    /// Compute the docking descriptor for one end of a connector.
    /// `dock_start` selects the source end (index 0); otherwise the target
    /// end (last index).
    fn docking_point(
        &self,
        waypoints: &[Waypoint],
        shape: &Shape,
        dock_start: bool,
    ) -> DockingResult<DockingPoint>;

    /// Compute the full cropped waypoint sequence for a connector with
    /// explicit endpoint shapes.
    fn cropped_waypoints(
        &self,
        waypoints: &[Waypoint],
        source: &Shape,
        target: &Shape,
    ) -> DockingResult<Vec<Waypoint>>;

    /// Crop `connector`, resolving its endpoint shapes through `diagram`.
    fn crop_connector(
        &self,
        connector: &Connector,
        diagram: &Diagram,
    ) -> DockingResult<Vec<Waypoint>> {
        let source = diagram
            .shape(connector.source)
            .ok_or(DockingError::MissingEndpoint(connector.source))?;
        let target = diagram
            .shape(connector.target)
            .ok_or(DockingError::MissingEndpoint(connector.target))?;
        self.cropped_waypoints(&connector.waypoints, source, target)
    }
}

/// No-op strategy: endpoints are taken as given, no shape geometry consulted.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityDocking;

impl ConnectionDocking for IdentityDocking {
    fn docking_point(
        &self,
        waypoints: &[Waypoint],
        _shape: &Shape,
        dock_start: bool,
    ) -> DockingResult<DockingPoint> {
        if waypoints.len() < 2 {
            return Err(DockingError::TooFewWaypoints(waypoints.len()));
        }
        let idx = if dock_start { 0 } else { waypoints.len() - 1 };
        Ok(DockingPoint {
            point: waypoints[idx],
            actual: waypoints[idx].point,
            idx,
        })
    }

    fn cropped_waypoints(
        &self,
        waypoints: &[Waypoint],
        _source: &Shape,
        _target: &Shape,
    ) -> DockingResult<Vec<Waypoint>> {
        if waypoints.len() < 2 {
            return Err(DockingError::TooFewWaypoints(waypoints.len()));
        }
        Ok(waypoints.to_vec())
    }
}
