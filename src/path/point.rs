use bitflags::bitflags;

bitflags! {
    ///
    /// Flags describing how a flattened point joins the segments either side of it
    ///
    #[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
    pub struct PointFlags: u8 {
        /// The point is a corner (the end of a line or curve rather than a point generated inside a curve)
        const CORNER        = 0x01;

        /// The path turns left at this point
        const LEFT          = 0x02;

        /// The outer side of the join at this point is bevelled
        const BEVEL         = 0x04;

        /// The inner side of the join at this point is bevelled
        const INNER_BEVEL   = 0x08;
    }
}

///
/// A point in a flattened path
///
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct PathPoint {
    pub x: f32,
    pub y: f32,

    /// Unit direction of the segment that starts at this point
    pub dx: f32,
    pub dy: f32,

    /// Length of the segment that starts at this point
    pub len: f32,

    /// Miter extrusion vector at this point (scaled so the offset for a half-width `w` is `dm * w`)
    pub dmx: f32,
    pub dmy: f32,

    pub flags: PointFlags
}

impl PathPoint {
    ///
    /// Creates a new point with no direction information
    ///
    pub fn new(x: f32, y: f32, flags: PointFlags) -> PathPoint {
        PathPoint {
            x:      x,
            y:      y,
            flags:  flags,
            ..PathPoint::default()
        }
    }

    ///
    /// True if this point has a bevel on either side of its join
    ///
    #[inline]
    pub fn is_bevelled(&self) -> bool {
        self.flags.intersects(PointFlags::BEVEL | PointFlags::INNER_BEVEL)
    }
}

///
/// True if two points are closer together than the tolerance
///
#[inline]
pub (crate) fn points_equal(x1: f32, y1: f32, x2: f32, y2: f32, tolerance: f32) -> bool {
    let dx = x2 - x1;
    let dy = y2 - y1;

    dx*dx + dy*dy < tolerance*tolerance
}

///
/// The squared distance from (x, y) to the line segment (px, py)-(qx, qy)
///
pub (crate) fn distance_to_segment_squared(x: f32, y: f32, px: f32, py: f32, qx: f32, qy: f32) -> f32 {
    let pqx = qx - px;
    let pqy = qy - py;
    let dx  = x - px;
    let dy  = y - py;
    let d   = pqx*pqx + pqy*pqy;
    let mut t = pqx*dx + pqy*dy;

    if d > 0.0 { t /= d; }
    let t   = t.max(0.0).min(1.0);

    let dx  = px + t*pqx - x;
    let dy  = py + t*pqy - y;

    dx*dx + dy*dy
}

///
/// Normalizes a vector, returning its original length and the unit vector (a zero vector stays zero)
///
#[inline]
pub (crate) fn normalize(x: f32, y: f32) -> (f32, f32, f32) {
    let len = f32::sqrt(x*x + y*y);

    if len > 1e-6 {
        let inv_len = 1.0 / len;
        (len, x * inv_len, y * inv_len)
    } else {
        (len, x, y)
    }
}

///
/// The z component of the cross product of two 2D vectors
///
#[inline]
pub (crate) fn cross(dx0: f32, dy0: f32, dx1: f32, dy1: f32) -> f32 {
    dx1*dy0 - dx0*dy1
}

///
/// Twice the signed area of the triangle (a, b, c)
///
#[inline]
pub (crate) fn triangle_area2(ax: f32, ay: f32, bx: f32, by: f32, cx: f32, cy: f32) -> f32 {
    let abx = bx - ax;
    let aby = by - ay;
    let acx = cx - ax;
    let acy = cy - ay;

    acx*aby - abx*acy
}

///
/// The signed area of a polygon
///
pub (crate) fn polygon_area(points: &[PathPoint]) -> f32 {
    if points.len() < 3 {
        return 0.0;
    }

    let a = &points[0];
    let mut area = 0.0;

    for idx in 2..points.len() {
        let b = &points[idx-1];
        let c = &points[idx];

        area += triangle_area2(a.x, a.y, b.x, b.y, c.x, c.y);
    }

    area * 0.5
}
