use super::join::*;
use super::point::*;
use super::cache::*;
use crate::error::*;
use crate::state::{LineCap, LineJoin};
use crate::render::Vertex2D;

use std::f32::consts::PI;

///
/// Converts flattened paths into triangle strips outlining them
///
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct StrokeTessellator {
    /// Distance from the centre of the line to its edge (including half of the fringe when antialiasing)
    pub half_width: f32,

    /// Width of the antialiasing fringe (0 to disable antialiasing)
    pub fringe_width: f32,

    pub line_cap: LineCap,
    pub line_join: LineJoin,
    pub miter_limit: f32,

    /// Maximum distance between a curve and the line segments approximating it
    pub tess_tol: f32
}

///
/// Number of divisions needed to approximate an arc of the specified radius and angle to within the tolerance
///
pub fn curve_divisions(radius: f32, arc: f32, tolerance: f32) -> usize {
    let da = f32::acos(radius / (radius + tolerance)) * 2.0;
    let divisions = (arc / da).ceil();

    if divisions.is_finite() && divisions > 2.0 {
        divisions as usize
    } else {
        2
    }
}

impl StrokeTessellator {
    ///
    /// Generates the stroke vertices for every path in the cache
    ///
    /// Every path must contain at least two points: a path that has collapsed to a single point can't be
    /// stroked and is reported as an error (in which case the vertex buffer is left empty, and every path
    /// has empty vertex ranges).
    ///
    pub fn tessellate(&self, cache: &mut PathCache) -> Result<(), TessellationError> {
        cache.vertices.clear();

        if let Some(path) = cache.paths.iter().position(|path| path.count < 2) {
            for flattened in cache.paths.iter_mut() {
                flattened.fill      = 0..0;
                flattened.stroke    = 0..0;
            }

            return Err(TessellationError::DegenerateStroke { path });
        }

        let w           = self.half_width;
        let aa          = self.fringe_width;
        let num_cap     = curve_divisions(w, PI, self.tess_tol);
        let (u0, u1)    = if aa == 0.0 { (0.5, 0.5) } else { (0.0, 1.0) };
        let side        = OutlineSide { left_width: w, right_width: w, left_u: u0, right_u: u1 };

        calculate_joins(cache, w, self.line_join, self.miter_limit);

        let PathCache { points, paths, vertices, .. } = cache;

        for path in paths.iter_mut() {
            let points      = &points[path.first..(path.first + path.count)];
            let count       = points.len();
            let looped      = path.closed;
            let start       = vertices.len();

            path.fill       = start..start;

            // Closed paths join the last point back to the first, open paths start and end with a cap
            let (mut p0_idx, joins) = if looped {
                (count - 1, 0..count)
            } else {
                (0, 1..(count - 1))
            };

            if !looped {
                let p0          = &points[0];
                let p1          = &points[1];
                let (_, dx, dy) = normalize(p1.x - p0.x, p1.y - p0.y);

                match self.line_cap {
                    LineCap::Butt   => butt_cap_start(vertices, p0, dx, dy, w, -aa*0.5, aa, u0, u1),
                    LineCap::Square => butt_cap_start(vertices, p0, dx, dy, w, w - aa, aa, u0, u1),
                    LineCap::Round  => round_cap_start(vertices, p0, dx, dy, w, num_cap, u0, u1)
                }
            }

            for idx in joins {
                let p0 = &points[p0_idx];
                let p1 = &points[idx];

                if p1.is_bevelled() {
                    if self.line_join == LineJoin::Round {
                        round_join(vertices, p0, p1, side, num_cap);
                    } else {
                        bevel_join(vertices, p0, p1, side);
                    }
                } else {
                    vertices.push(Vertex2D::new(p1.x + p1.dmx*w, p1.y + p1.dmy*w, u0, 1.0));
                    vertices.push(Vertex2D::new(p1.x - p1.dmx*w, p1.y - p1.dmy*w, u1, 1.0));
                }

                p0_idx = idx;
            }

            if looped {
                let first   = vertices[start];
                let second  = vertices[start + 1];

                vertices.push(Vertex2D::new(first.x(), first.y(), u0, 1.0));
                vertices.push(Vertex2D::new(second.x(), second.y(), u1, 1.0));
            } else {
                let p0          = &points[count - 2];
                let p1          = &points[count - 1];
                let (_, dx, dy) = normalize(p1.x - p0.x, p1.y - p0.y);

                match self.line_cap {
                    LineCap::Butt   => butt_cap_end(vertices, p1, dx, dy, w, -aa*0.5, aa, u0, u1),
                    LineCap::Square => butt_cap_end(vertices, p1, dx, dy, w, w - aa, aa, u0, u1),
                    LineCap::Round  => round_cap_end(vertices, p1, dx, dy, w, num_cap, u0, u1)
                }
            }

            path.stroke = start..vertices.len();
        }

        trace!("Stroke tessellation: {} paths, {} vertices, {} cap divisions", paths.len(), vertices.len(), num_cap);

        Ok(())
    }
}

fn butt_cap_start(vertices: &mut Vec<Vertex2D>, p: &PathPoint, dx: f32, dy: f32, w: f32, d: f32, aa: f32, u0: f32, u1: f32) {
    let px  = p.x - dx*d;
    let py  = p.y - dy*d;
    let dlx = dy;
    let dly = -dx;

    vertices.push(Vertex2D::new(px + dlx*w - dx*aa, py + dly*w - dy*aa, u0, 0.0));
    vertices.push(Vertex2D::new(px - dlx*w - dx*aa, py - dly*w - dy*aa, u1, 0.0));
    vertices.push(Vertex2D::new(px + dlx*w, py + dly*w, u0, 1.0));
    vertices.push(Vertex2D::new(px - dlx*w, py - dly*w, u1, 1.0));
}

fn butt_cap_end(vertices: &mut Vec<Vertex2D>, p: &PathPoint, dx: f32, dy: f32, w: f32, d: f32, aa: f32, u0: f32, u1: f32) {
    let px  = p.x + dx*d;
    let py  = p.y + dy*d;
    let dlx = dy;
    let dly = -dx;

    vertices.push(Vertex2D::new(px + dlx*w, py + dly*w, u0, 1.0));
    vertices.push(Vertex2D::new(px - dlx*w, py - dly*w, u1, 1.0));
    vertices.push(Vertex2D::new(px + dlx*w + dx*aa, py + dly*w + dy*aa, u0, 0.0));
    vertices.push(Vertex2D::new(px - dlx*w + dx*aa, py - dly*w + dy*aa, u1, 0.0));
}

fn round_cap_start(vertices: &mut Vec<Vertex2D>, p: &PathPoint, dx: f32, dy: f32, w: f32, num_cap: usize, u0: f32, u1: f32) {
    let px  = p.x;
    let py  = p.y;
    let dlx = dy;
    let dly = -dx;

    for step in 0..num_cap {
        let a   = (step as f32) / ((num_cap - 1) as f32) * PI;
        let ax  = a.cos() * w;
        let ay  = a.sin() * w;

        vertices.push(Vertex2D::new(px - dlx*ax - dx*ay, py - dly*ax - dy*ay, u0, 1.0));
        vertices.push(Vertex2D::new(px, py, 0.5, 1.0));
    }

    vertices.push(Vertex2D::new(px + dlx*w, py + dly*w, u0, 1.0));
    vertices.push(Vertex2D::new(px - dlx*w, py - dly*w, u1, 1.0));
}

fn round_cap_end(vertices: &mut Vec<Vertex2D>, p: &PathPoint, dx: f32, dy: f32, w: f32, num_cap: usize, u0: f32, u1: f32) {
    let px  = p.x;
    let py  = p.y;
    let dlx = dy;
    let dly = -dx;

    vertices.push(Vertex2D::new(px + dlx*w, py + dly*w, u0, 1.0));
    vertices.push(Vertex2D::new(px - dlx*w, py - dly*w, u1, 1.0));

    for step in 0..num_cap {
        let a   = (step as f32) / ((num_cap - 1) as f32) * PI;
        let ax  = a.cos() * w;
        let ay  = a.sin() * w;

        vertices.push(Vertex2D::new(px, py, 0.5, 1.0));
        vertices.push(Vertex2D::new(px - dlx*ax + dx*ay, py - dly*ax + dy*ay, u0, 1.0));
    }
}
