use super::join::*;
use super::point::*;
use super::cache::*;
use crate::state::LineJoin;
use crate::render::Vertex2D;

///
/// Miter limit used when offsetting the outline of a filled shape
///
const FILL_MITER_LIMIT: f32 = 2.4;

///
/// Converts flattened paths into a triangle fan for the interior and a triangle strip for the antialiasing fringe
///
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct FillTessellator {
    /// Width of the antialiasing fringe
    pub fringe_width: f32,

    /// Whether or not to generate the antialiasing fringe
    pub antialias: bool
}

impl FillTessellator {
    ///
    /// Creates a new fill tessellator
    ///
    pub fn new(fringe_width: f32, antialias: bool) -> FillTessellator {
        FillTessellator {
            fringe_width,
            antialias
        }
    }

    ///
    /// Generates the fill vertices for every path in the cache
    ///
    /// The paths must already have been flattened. The vertex buffer in the cache is replaced.
    ///
    pub fn tessellate(&self, cache: &mut PathCache) {
        let aa      = self.fringe_width;
        let w       = if self.antialias { self.fringe_width } else { 0.0 };
        let fringe  = w > 0.0;

        calculate_joins(cache, w, LineJoin::Miter, FILL_MITER_LIMIT);

        let convex  = cache.paths.len() == 1 && cache.paths[0].convex;
        let woff    = 0.5 * aa;

        let PathCache { points, paths, vertices, .. } = cache;
        vertices.clear();

        for path in paths.iter_mut() {
            let points = &points[path.first..(path.first + path.count)];
            let count  = points.len();

            if count < 3 {
                let end     = vertices.len();
                path.fill   = end..end;
                path.stroke = end..end;
                continue;
            }

            // Interior of the shape
            let fill_start = vertices.len();

            if fringe {
                for idx in 0..count {
                    let p0 = &points[(idx + count - 1) % count];
                    let p1 = &points[idx];

                    if p1.flags.contains(PointFlags::BEVEL) {
                        if p1.flags.contains(PointFlags::LEFT) {
                            vertices.push(Vertex2D::new(p1.x + p1.dmx*woff, p1.y + p1.dmy*woff, 0.5, 1.0));
                        } else {
                            let dlx0 = p0.dy;
                            let dly0 = -p0.dx;
                            let dlx1 = p1.dy;
                            let dly1 = -p1.dx;

                            vertices.push(Vertex2D::new(p1.x + dlx0*woff, p1.y + dly0*woff, 0.5, 1.0));
                            vertices.push(Vertex2D::new(p1.x + dlx1*woff, p1.y + dly1*woff, 0.5, 1.0));
                        }
                    } else {
                        vertices.push(Vertex2D::new(p1.x + p1.dmx*woff, p1.y + p1.dmy*woff, 0.5, 1.0));
                    }
                }
            } else {
                vertices.extend(points.iter().map(|point| Vertex2D::new(point.x, point.y, 0.5, 1.0)));
            }

            path.fill = fill_start..vertices.len();

            // Antialiasing fringe around the edge
            let stroke_start = vertices.len();

            if fringe {
                // Convex shapes only need the outer half of the fringe, as they are drawn without a stencil
                let side = if convex {
                    OutlineSide { left_width: woff, right_width: w - woff, left_u: 0.5, right_u: 1.0 }
                } else {
                    OutlineSide { left_width: w + woff, right_width: w - woff, left_u: 0.0, right_u: 1.0 }
                };

                for idx in 0..count {
                    let p0 = &points[(idx + count - 1) % count];
                    let p1 = &points[idx];

                    if p1.is_bevelled() {
                        bevel_join(vertices, p0, p1, side);
                    } else {
                        vertices.push(Vertex2D::new(p1.x + p1.dmx*side.left_width, p1.y + p1.dmy*side.left_width, side.left_u, 1.0));
                        vertices.push(Vertex2D::new(p1.x - p1.dmx*side.right_width, p1.y - p1.dmy*side.right_width, side.right_u, 1.0));
                    }
                }

                // Close the strip
                let first   = vertices[stroke_start];
                let second  = vertices[stroke_start + 1];
                vertices.push(Vertex2D::new(first.x(), first.y(), side.left_u, 1.0));
                vertices.push(Vertex2D::new(second.x(), second.y(), side.right_u, 1.0));
            }

            path.stroke = stroke_start..vertices.len();
        }

        trace!("Fill tessellation: {} paths, {} vertices (convex: {})", paths.len(), vertices.len(), convex);
    }
}
