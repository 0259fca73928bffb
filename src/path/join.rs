use super::point::*;
use super::cache::*;
use crate::state::LineJoin;
use crate::render::Vertex2D;

use std::f32::consts::PI;

///
/// Largest scale applied to a miter vector (limits the size of very sharp joins)
///
const MAX_MITER_SCALE: f32 = 600.0;

///
/// Works out the miter vector and the join flags for every point in the cache
///
/// `half_width` is the distance the outline will be offset from the path: inner corners where the adjacent
/// segments are too short for this offset are marked `INNER_BEVEL`, and outer corners are marked `BEVEL` if
/// the miter would exceed the miter limit or the join style is not a miter.
///
pub fn calculate_joins(cache: &mut PathCache, half_width: f32, line_join: LineJoin, miter_limit: f32) {
    let inv_width = if half_width > 0.0 { 1.0 / half_width } else { 0.0 };

    for path in cache.paths.iter_mut() {
        let points  = &mut cache.points[path.first..(path.first + path.count)];
        let count   = points.len();

        let mut num_left    = 0;
        path.bevel_count    = 0;

        for idx in 0..count {
            let p0      = points[(idx + count - 1) % count];
            let p1      = &mut points[idx];

            let dlx0    = p0.dy;
            let dly0    = -p0.dx;
            let dlx1    = p1.dy;
            let dly1    = -p1.dx;

            // Average of the two segment normals, scaled so that it reaches the offset outline
            p1.dmx      = (dlx0 + dlx1) * 0.5;
            p1.dmy      = (dly0 + dly1) * 0.5;

            let dmr2    = p1.dmx*p1.dmx + p1.dmy*p1.dmy;
            if dmr2 > 1e-6 {
                let scale = f32::min(1.0 / dmr2, MAX_MITER_SCALE);

                p1.dmx *= scale;
                p1.dmy *= scale;
            }

            p1.flags = p1.flags & PointFlags::CORNER;

            if cross(p0.dx, p0.dy, p1.dx, p1.dy) > 0.0 {
                num_left += 1;
                p1.flags |= PointFlags::LEFT;
            }

            // The inner side needs a bevel if the segments are too short for the offset
            let limit = f32::max(1.01, f32::min(p0.len, p1.len) * inv_width);
            if dmr2 * limit * limit < 1.0 {
                p1.flags |= PointFlags::INNER_BEVEL;
            }

            // Corners that would exceed the miter limit are bevelled
            if p1.flags.contains(PointFlags::CORNER) {
                if dmr2 * miter_limit * miter_limit < 1.0 || line_join == LineJoin::Bevel || line_join == LineJoin::Round {
                    p1.flags |= PointFlags::BEVEL;
                }
            }

            if p1.is_bevelled() {
                path.bevel_count += 1;
            }
        }

        path.convex = num_left == count;
    }
}

///
/// Parameters for the two sides of an outline
///
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct OutlineSide {
    /// Offset of the left side of the outline
    pub left_width: f32,

    /// Offset of the right side of the outline
    pub right_width: f32,

    /// Coverage coordinate for the left side
    pub left_u: f32,

    /// Coverage coordinate for the right side
    pub right_u: f32
}

///
/// Finds the start and end of a bevel at a point (or the miter point twice if there's no inner bevel)
///
#[inline]
pub fn choose_bevel(inner_bevel: bool, p0: &PathPoint, p1: &PathPoint, w: f32) -> ((f32, f32), (f32, f32)) {
    if inner_bevel {
        ((p1.x + p0.dy*w, p1.y - p0.dx*w), (p1.x + p1.dy*w, p1.y - p1.dx*w))
    } else {
        let miter = (p1.x + p1.dmx*w, p1.y + p1.dmy*w);
        (miter, miter)
    }
}

///
/// Emits the vertices for a bevelled join at p1
///
pub fn bevel_join(vertices: &mut Vec<Vertex2D>, p0: &PathPoint, p1: &PathPoint, side: OutlineSide) {
    let OutlineSide { left_width: lw, right_width: rw, left_u: lu, right_u: ru } = side;

    let dlx0        = p0.dy;
    let dly0        = -p0.dx;
    let dlx1        = p1.dy;
    let dly1        = -p1.dx;
    let inner_bevel = p1.flags.contains(PointFlags::INNER_BEVEL);
    let outer_bevel = p1.flags.contains(PointFlags::BEVEL);

    if p1.flags.contains(PointFlags::LEFT) {
        let ((lx0, ly0), (lx1, ly1)) = choose_bevel(inner_bevel, p0, p1, lw);

        vertices.push(Vertex2D::new(lx0, ly0, lu, 1.0));
        vertices.push(Vertex2D::new(p1.x - dlx0*rw, p1.y - dly0*rw, ru, 1.0));

        if outer_bevel {
            vertices.push(Vertex2D::new(lx0, ly0, lu, 1.0));
            vertices.push(Vertex2D::new(p1.x - dlx0*rw, p1.y - dly0*rw, ru, 1.0));

            vertices.push(Vertex2D::new(lx1, ly1, lu, 1.0));
            vertices.push(Vertex2D::new(p1.x - dlx1*rw, p1.y - dly1*rw, ru, 1.0));
        } else {
            let rx0 = p1.x - p1.dmx*rw;
            let ry0 = p1.y - p1.dmy*rw;

            vertices.push(Vertex2D::new(p1.x, p1.y, 0.5, 1.0));
            vertices.push(Vertex2D::new(p1.x - dlx0*rw, p1.y - dly0*rw, ru, 1.0));

            vertices.push(Vertex2D::new(rx0, ry0, ru, 1.0));
            vertices.push(Vertex2D::new(rx0, ry0, ru, 1.0));

            vertices.push(Vertex2D::new(p1.x, p1.y, 0.5, 1.0));
            vertices.push(Vertex2D::new(p1.x - dlx1*rw, p1.y - dly1*rw, ru, 1.0));
        }

        vertices.push(Vertex2D::new(lx1, ly1, lu, 1.0));
        vertices.push(Vertex2D::new(p1.x - dlx1*rw, p1.y - dly1*rw, ru, 1.0));
    } else {
        let ((rx0, ry0), (rx1, ry1)) = choose_bevel(inner_bevel, p0, p1, -rw);

        vertices.push(Vertex2D::new(p1.x + dlx0*lw, p1.y + dly0*lw, lu, 1.0));
        vertices.push(Vertex2D::new(rx0, ry0, ru, 1.0));

        if outer_bevel {
            vertices.push(Vertex2D::new(p1.x + dlx0*lw, p1.y + dly0*lw, lu, 1.0));
            vertices.push(Vertex2D::new(rx0, ry0, ru, 1.0));

            vertices.push(Vertex2D::new(p1.x + dlx1*lw, p1.y + dly1*lw, lu, 1.0));
            vertices.push(Vertex2D::new(rx1, ry1, ru, 1.0));
        } else {
            let lx0 = p1.x + p1.dmx*lw;
            let ly0 = p1.y + p1.dmy*lw;

            vertices.push(Vertex2D::new(p1.x + dlx0*lw, p1.y + dly0*lw, lu, 1.0));
            vertices.push(Vertex2D::new(p1.x, p1.y, 0.5, 1.0));

            vertices.push(Vertex2D::new(lx0, ly0, lu, 1.0));
            vertices.push(Vertex2D::new(lx0, ly0, lu, 1.0));

            vertices.push(Vertex2D::new(p1.x + dlx1*lw, p1.y + dly1*lw, lu, 1.0));
            vertices.push(Vertex2D::new(p1.x, p1.y, 0.5, 1.0));
        }

        vertices.push(Vertex2D::new(p1.x + dlx1*lw, p1.y + dly1*lw, lu, 1.0));
        vertices.push(Vertex2D::new(rx1, ry1, ru, 1.0));
    }
}

///
/// Emits the vertices for a rounded join at p1, using at most `num_cap` steps for a half turn
///
pub fn round_join(vertices: &mut Vec<Vertex2D>, p0: &PathPoint, p1: &PathPoint, side: OutlineSide, num_cap: usize) {
    let OutlineSide { left_width: lw, right_width: rw, left_u: lu, right_u: ru } = side;

    let dlx0        = p0.dy;
    let dly0        = -p0.dx;
    let dlx1        = p1.dy;
    let dly1        = -p1.dx;
    let inner_bevel = p1.flags.contains(PointFlags::INNER_BEVEL);

    if p1.flags.contains(PointFlags::LEFT) {
        let ((lx0, ly0), (lx1, ly1)) = choose_bevel(inner_bevel, p0, p1, lw);
        let a0      = f32::atan2(-dly0, -dlx0);
        let mut a1  = f32::atan2(-dly1, -dlx1);
        if a1 > a0 { a1 -= PI*2.0; }

        vertices.push(Vertex2D::new(lx0, ly0, lu, 1.0));
        vertices.push(Vertex2D::new(p1.x - dlx0*rw, p1.y - dly0*rw, ru, 1.0));

        let steps = round_join_steps(a0 - a1, num_cap);
        for step in 0..steps {
            let t   = (step as f32) / ((steps - 1) as f32);
            let a   = a0 + t*(a1 - a0);
            let rx  = p1.x + a.cos()*rw;
            let ry  = p1.y + a.sin()*rw;

            vertices.push(Vertex2D::new(p1.x, p1.y, 0.5, 1.0));
            vertices.push(Vertex2D::new(rx, ry, ru, 1.0));
        }

        vertices.push(Vertex2D::new(lx1, ly1, lu, 1.0));
        vertices.push(Vertex2D::new(p1.x - dlx1*rw, p1.y - dly1*rw, ru, 1.0));
    } else {
        let ((rx0, ry0), (rx1, ry1)) = choose_bevel(inner_bevel, p0, p1, -rw);
        let a0      = f32::atan2(dly0, dlx0);
        let mut a1  = f32::atan2(dly1, dlx1);
        if a1 < a0 { a1 += PI*2.0; }

        vertices.push(Vertex2D::new(p1.x + dlx0*lw, p1.y + dly0*lw, lu, 1.0));
        vertices.push(Vertex2D::new(rx0, ry0, ru, 1.0));

        let steps = round_join_steps(a1 - a0, num_cap);
        for step in 0..steps {
            let t   = (step as f32) / ((steps - 1) as f32);
            let a   = a0 + t*(a1 - a0);
            let lx  = p1.x + a.cos()*lw;
            let ly  = p1.y + a.sin()*lw;

            vertices.push(Vertex2D::new(lx, ly, lu, 1.0));
            vertices.push(Vertex2D::new(p1.x, p1.y, 0.5, 1.0));
        }

        vertices.push(Vertex2D::new(p1.x + dlx1*lw, p1.y + dly1*lw, lu, 1.0));
        vertices.push(Vertex2D::new(rx1, ry1, ru, 1.0));
    }
}

///
/// Number of steps to use for a round join that turns through the specified angle
///
#[inline]
fn round_join_steps(angle: f32, num_cap: usize) -> usize {
    let steps = ((angle / PI) * (num_cap as f32)).ceil() as usize;
    steps.max(2).min(num_cap.max(2))
}

#[cfg(test)]
mod test {
    use super::*;
    use super::super::flatten::*;
    use super::super::command::*;

    fn square() -> PathCache {
        let mut cache = PathCache::new();
        flatten(&mut cache, &[PathCommand::MoveTo(0.0, 0.0), PathCommand::LineTo(0.0, 10.0), PathCommand::LineTo(10.0, 10.0), PathCommand::LineTo(10.0, 0.0), PathCommand::ClosePath], 0.25, 0.01);
        cache
    }

    #[test]
    fn square_is_convex() {
        let mut cache = square();
        calculate_joins(&mut cache, 1.0, LineJoin::Miter, 10.0);

        assert!(cache.paths[0].convex);
        assert!(cache.paths[0].bevel_count == 0);
    }

    #[test]
    fn miter_vector_reaches_corner_offset() {
        let mut cache = square();
        calculate_joins(&mut cache, 1.0, LineJoin::Miter, 10.0);

        // A right angle has a miter of length sqrt(2)
        let p = cache.points[0];
        assert!(((p.dmx*p.dmx + p.dmy*p.dmy).sqrt() - 2.0f32.sqrt()).abs() < 0.0001);
    }

    #[test]
    fn round_join_style_bevels_corners() {
        let mut cache = square();
        calculate_joins(&mut cache, 1.0, LineJoin::Round, 10.0);

        assert!(cache.paths[0].bevel_count == 4);
        assert!(cache.points[0..4].iter().all(|p| p.flags.contains(PointFlags::BEVEL)));
    }

    #[test]
    fn tight_miter_limit_bevels_corners() {
        let mut cache = square();

        // Miter length for a right angle is sqrt(2) times the half width
        calculate_joins(&mut cache, 1.0, LineJoin::Miter, 1.3);
        assert!(cache.paths[0].bevel_count == 4);

        let mut cache = square();
        calculate_joins(&mut cache, 1.0, LineJoin::Miter, 1.5);
        assert!(cache.paths[0].bevel_count == 0);
    }

    #[test]
    fn round_join_steps_are_clamped() {
        assert!(round_join_steps(0.0, 8) == 2);
        assert!(round_join_steps(PI, 8) == 8);
        assert!(round_join_steps(PI*0.5, 8) == 4);
    }
}
