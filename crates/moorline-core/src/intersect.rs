//! Path intersection primitive.
//!
//! Pure geometry: finds where an open connection path crosses the closed
//! boundary of a shape, and resolves which crossing to report when several
//! exist. Both paths are flattened to line segments first, so curved
//! boundaries and smoothed connection paths are handled uniformly.

use kurbo::{BezPath, PathEl, Point, flatten};

/// Crossings closer together than this are treated as a single crossing.
pub const INTERSECTION_EPSILON: f64 = 1e-6;

/// Tolerance used when flattening curves to line segments. Matches the
/// tolerance the shape model uses to build its paths.
const FLATTEN_TOLERANCE: f64 = 0.1;

/// Slack on segment parameters, so a crossing exactly at a segment endpoint
/// still counts.
const PARAM_EPSILON: f64 = 1e-9;

/// A boundary crossing, positioned by arc length along the connection path.
#[derive(Debug, Clone, Copy)]
struct Crossing {
    point: Point,
    position: f64,
}

/// Find the point where `path` crosses the boundary of `shape_path`.
///
/// All crossings between the open path and every closed loop of the boundary
/// are enumerated and ordered by arc-length position along the path, measured
/// from its start. `prefer_first` picks the crossing nearest the path's start
/// (source end); otherwise the one nearest its end (target end). Returns
/// `None` when the paths do not cross.
pub fn path_intersection(shape_path: &BezPath, path: &BezPath, prefer_first: bool) -> Option<Point> {
    let loops = flatten_loops(shape_path);
    let polyline = flatten_polyline(path);
    if loops.is_empty() || polyline.len() < 2 {
        return None;
    }

    let mut crossings: Vec<Crossing> = Vec::new();
    let mut offset = 0.0;
    for w in polyline.windows(2) {
        let (a, b) = (w[0], w[1]);
        let seg_len = (b - a).hypot();
        for loop_points in &loops {
            for edge in loop_points.windows(2) {
                if let Some((point, t)) = segment_intersection(a, b, edge[0], edge[1]) {
                    crossings.push(Crossing {
                        point,
                        position: offset + t * seg_len,
                    });
                }
            }
        }
        offset += seg_len;
    }

    crossings.sort_by(|x, y| x.position.total_cmp(&y.position));
    crossings.dedup_by(|next, prev| (next.point - prev.point).hypot() < INTERSECTION_EPSILON);

    let picked = if prefer_first {
        crossings.first()
    } else {
        crossings.last()
    };
    picked.map(|c| c.point)
}

/// Flatten a boundary path into closed polyline loops.
///
/// Every loop is closed back to its first point, whether or not the path
/// carried an explicit ClosePath.
fn flatten_loops(path: &BezPath) -> Vec<Vec<Point>> {
    let mut loops: Vec<Vec<Point>> = Vec::new();
    let mut current: Vec<Point> = Vec::new();
    flatten(path.elements().iter().copied(), FLATTEN_TOLERANCE, |el| match el {
        PathEl::MoveTo(p) => {
            if current.len() >= 2 {
                loops.push(std::mem::take(&mut current));
            }
            current = vec![p];
        }
        PathEl::LineTo(p) => current.push(p),
        PathEl::ClosePath => {
            if let Some(&first) = current.first() {
                current.push(first);
            }
        }
        _ => {}
    });
    if current.len() >= 2 {
        loops.push(current);
    }

    for loop_points in &mut loops {
        let first = loop_points[0];
        let last = loop_points[loop_points.len() - 1];
        if loop_points.len() >= 3 && (last - first).hypot() > INTERSECTION_EPSILON {
            loop_points.push(first);
        }
    }
    loops
}

/// Flatten an open path into a polyline.
fn flatten_polyline(path: &BezPath) -> Vec<Point> {
    let mut points = Vec::new();
    flatten(path.elements().iter().copied(), FLATTEN_TOLERANCE, |el| match el {
        PathEl::MoveTo(p) | PathEl::LineTo(p) => points.push(p),
        _ => {}
    });
    points
}

/// Intersection of segments a→b and c→d, with the parameter along a→b.
///
/// Parallel pairs (collinear overlap included) report no crossing; the
/// adjacent non-parallel edges catch endpoint touches.
fn segment_intersection(a: Point, b: Point, c: Point, d: Point) -> Option<(Point, f64)> {
    let r = b - a;
    let s = d - c;
    let denom = r.cross(s);
    if denom.abs() < 1e-12 {
        return None;
    }
    let qp = c - a;
    let t = qp.cross(s) / denom;
    let u = qp.cross(r) / denom;
    if t < -PARAM_EPSILON || t > 1.0 + PARAM_EPSILON || u < -PARAM_EPSILON || u > 1.0 + PARAM_EPSILON
    {
        return None;
    }
    let t = t.clamp(0.0, 1.0);
    Some((Point::new(a.x + t * r.x, a.y + t * r.y), t))
}
