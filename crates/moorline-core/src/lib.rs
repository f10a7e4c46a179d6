//! Moorline Core Library
//!
//! Platform-agnostic data model and connection docking engine for the
//! Moorline diagram editor. Rendering and interaction layers consume this
//! crate; they are not part of it.

pub mod connector;
pub mod diagram;
pub mod docking;
pub mod intersect;
pub mod path;
pub mod shapes;

pub use connector::{Connector, ConnectorId, PathStyle, Waypoint, waypoint_path};
pub use diagram::Diagram;
pub use docking::{
    ConnectionDocking, CroppingDocking, DockingError, DockingPoint, DockingResult,
    IdentityDocking,
};
pub use intersect::{INTERSECTION_EPSILON, path_intersection};
pub use path::{DefaultPathProvider, PathProvider};
pub use shapes::{
    Ellipse, Polygon, Rectangle, SerializableColor, Shape, ShapeId, ShapeStyle, ShapeTrait,
    StrokeStyle,
};
