use super::point::*;
use super::cache::*;
use super::command::*;
use crate::state::Winding;

///
/// Maximum recursion depth when subdividing a bezier curve
///
/// Subdivisions beyond this depth are discarded, which guarantees that flattening terminates even
/// for curves with pathological control points.
///
pub const MAX_BEZIER_DEPTH: usize = 10;

///
/// Tolerances used while flattening a path
///
#[derive(Clone, Copy, PartialEq, Debug)]
struct Tolerance {
    tessellation:   f32,
    distance:       f32
}

///
/// Converts a list of path commands into the flattened paths in the specified cache
///
/// Curves are subdivided until they're flat to within `tess_tol`, and points closer together than
/// `dist_tol` are merged. If the cache already contains the flattened path this does nothing: the
/// cache is only cleared when a new path is started.
///
pub fn flatten(cache: &mut PathCache, commands: &[PathCommand], tess_tol: f32, dist_tol: f32) {
    if cache.is_flattened() {
        return;
    }

    let tolerance = Tolerance { tessellation: tess_tol, distance: dist_tol };

    // Build the list of points from the path commands
    for command in commands.iter() {
        match command {
            PathCommand::MoveTo(x, y)   => {
                add_path(cache);
                add_point(cache, *x, *y, PointFlags::CORNER, &tolerance);
            }

            PathCommand::LineTo(x, y)   => {
                add_point(cache, *x, *y, PointFlags::CORNER, &tolerance);
            }

            PathCommand::BezierTo(cp1, cp2, end) => {
                if let Some(last) = last_point(cache) {
                    tessellate_bezier(cache, last, *cp1, *cp2, *end, 0, PointFlags::CORNER, &tolerance);
                }
            }

            PathCommand::ClosePath      => {
                if let Some(path) = cache.paths.last_mut() {
                    path.closed = true;
                }
            }

            PathCommand::Winding(winding) => {
                if let Some(path) = cache.paths.last_mut() {
                    path.winding = *winding;
                }
            }
        }
    }

    // Work out the directions, enforce the winding and compute the bounds
    let mut bounds = Bounds::empty();

    for path in cache.paths.iter_mut() {
        // Paths that finish at their start point are closed
        if path.count > 2 {
            let first   = cache.points[path.first];
            let last    = cache.points[path.first + path.count - 1];

            if points_equal(first.x, first.y, last.x, last.y, tolerance.distance) {
                path.count  -= 1;
                path.closed = true;
            }
        }

        let points = &mut cache.points[path.first..(path.first + path.count)];

        if points.len() > 2 {
            let area = polygon_area(points);

            let reverse = match path.winding {
                Winding::Solid  => area < 0.0,
                Winding::Hole   => area > 0.0
            };

            if reverse {
                points.reverse();
            }
        }

        // Each point stores the direction and length of the segment that starts there
        let count = points.len();
        for idx in 0..count {
            let next            = points[(idx + 1) % count];
            let point           = &mut points[idx];
            let (len, dx, dy)   = normalize(next.x - point.x, next.y - point.y);

            point.dx    = dx;
            point.dy    = dy;
            point.len   = len;

            bounds.add_point(point.x, point.y);
        }
    }

    cache.bounds    = bounds;
    cache.flattened = true;

    trace!("Flattened {} commands into {} paths ({} points)", commands.len(), cache.paths.len(), cache.points.len());
}

///
/// Starts a new path in the cache
///
fn add_path(cache: &mut PathCache) {
    let first = cache.points.len();
    cache.paths.push(FlattenedPath::new(first));
}

///
/// The last point added to the current path, if there is one
///
fn last_point(cache: &PathCache) -> Option<(f32, f32)> {
    match cache.paths.last() {
        Some(path) if path.count > 0    => cache.points.last().map(|point| (point.x, point.y)),
        _                               => None
    }
}

///
/// Adds a point to the current path, merging it with the previous point if they're too close together
///
fn add_point(cache: &mut PathCache, x: f32, y: f32, flags: PointFlags, tolerance: &Tolerance) {
    let count = match cache.paths.last() {
        Some(path)  => path.count,
        None        => { return; }
    };

    if count > 0 {
        if let Some(last) = cache.last_point_mut() {
            if points_equal(last.x, last.y, x, y, tolerance.distance) {
                last.flags |= flags;
                return;
            }
        }
    }

    cache.points.push(PathPoint::new(x, y, flags));
    if let Some(path) = cache.paths.last_mut() {
        path.count += 1;
    }
}

///
/// Subdivides a bezier curve until each section is flat enough, adding the end points of each section to the current path
///
/// Only the final point of the curve receives the supplied flags: the points generated in the middle of the curve
/// are smooth.
///
fn tessellate_bezier(cache: &mut PathCache, (x1, y1): (f32, f32), (x2, y2): (f32, f32), (x3, y3): (f32, f32), (x4, y4): (f32, f32), level: usize, flags: PointFlags, tolerance: &Tolerance) {
    if level > MAX_BEZIER_DEPTH {
        return;
    }

    let x12     = (x1+x2)*0.5;
    let y12     = (y1+y2)*0.5;
    let x23     = (x2+x3)*0.5;
    let y23     = (y2+y3)*0.5;
    let x34     = (x3+x4)*0.5;
    let y34     = (y3+y4)*0.5;
    let x123    = (x12+x23)*0.5;
    let y123    = (y12+y23)*0.5;

    // Distance of the control points from the chord (scaled by the length of the chord)
    let dx      = x4 - x1;
    let dy      = y4 - y1;
    let d2      = ((x2 - x4) * dy - (y2 - y4) * dx).abs();
    let d3      = ((x3 - x4) * dy - (y3 - y4) * dx).abs();

    if (d2 + d3)*(d2 + d3) < tolerance.tessellation * (dx*dx + dy*dy) {
        add_point(cache, x4, y4, flags, tolerance);
        return;
    }

    let x234    = (x23+x34)*0.5;
    let y234    = (y23+y34)*0.5;
    let x1234   = (x123+x234)*0.5;
    let y1234   = (y123+y234)*0.5;

    tessellate_bezier(cache, (x1, y1), (x12, y12), (x123, y123), (x1234, y1234), level+1, PointFlags::empty(), tolerance);
    tessellate_bezier(cache, (x1234, y1234), (x234, y234), (x34, y34), (x4, y4), level+1, flags, tolerance);
}
