use std::f32;
use std::ops::{Mul};

///
/// Represents a 2D affine transformation matrix
///
/// The six values `[a, b, c, d, e, f]` are interpreted as the matrix:
///
/// ```text
/// [a c e]
/// [b d f]
/// [0 0 1]
/// ```
///
/// The last row is implied and never stored, so this can only ever represent an affine transform.
///
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct Transform2D(pub [f32; 6]);

impl Default for Transform2D {
    fn default() -> Transform2D {
        Transform2D::identity()
    }
}

impl Transform2D {
    ///
    /// Applies this transformation to a point, returning the transformed point
    ///
    #[inline]
    pub fn transform_point(&self, x: f32, y: f32) -> (f32, f32) {
        let Transform2D(ref t) = self;

        (
            x*t[0] + y*t[2] + t[4],
            x*t[1] + y*t[3] + t[5]
        )
    }

    ///
    /// Creates the identity transform
    ///
    pub fn identity() -> Transform2D {
        Transform2D([1.0, 0.0, 0.0, 1.0, 0.0, 0.0])
    }

    ///
    /// Creates a translation transformation
    ///
    pub fn translate(x: f32, y: f32) -> Transform2D {
        Transform2D([1.0, 0.0, 0.0, 1.0, x, y])
    }

    ///
    /// Creates a scaling transformation
    ///
    pub fn scale(scale_x: f32, scale_y: f32) -> Transform2D {
        Transform2D([scale_x, 0.0, 0.0, scale_y, 0.0, 0.0])
    }

    ///
    /// Creates a rotation transformation (angle in radians)
    ///
    pub fn rotate(radians: f32) -> Transform2D {
        let cos = f32::cos(radians);
        let sin = f32::sin(radians);

        Transform2D([cos, sin, -sin, cos, 0.0, 0.0])
    }

    ///
    /// Creates a transformation that skews along the X axis
    ///
    pub fn skew_x(radians: f32) -> Transform2D {
        Transform2D([1.0, 0.0, f32::tan(radians), 1.0, 0.0, 0.0])
    }

    ///
    /// Creates a transformation that skews along the Y axis
    ///
    pub fn skew_y(radians: f32) -> Transform2D {
        Transform2D([1.0, f32::tan(radians), 0.0, 1.0, 0.0, 0.0])
    }

    ///
    /// Returns the transform that applies this transform followed by `other`
    ///
    pub fn multiply(&self, other: &Transform2D) -> Transform2D {
        let Transform2D(t) = self;
        let Transform2D(s) = other;

        Transform2D([
            t[0]*s[0] + t[1]*s[2],
            t[0]*s[1] + t[1]*s[3],
            t[2]*s[0] + t[3]*s[2],
            t[2]*s[1] + t[3]*s[3],
            t[4]*s[0] + t[5]*s[2] + s[4],
            t[4]*s[1] + t[5]*s[3] + s[5]
        ])
    }

    ///
    /// Returns the transform that applies `other` followed by this transform
    ///
    /// This is how new transformations are combined with the current transformation matrix: the new
    /// transform acts in the local coordinate space.
    ///
    #[inline]
    pub fn premultiply(&self, other: &Transform2D) -> Transform2D {
        other.multiply(self)
    }

    ///
    /// Returns an inverted Transform2D, or None if the transform is singular
    ///
    pub fn invert(&self) -> Option<Transform2D> {
        let Transform2D(t) = self;

        // Determinant is computed at double precision as small scale factors lose too much in f32
        let det = (t[0] as f64)*(t[3] as f64) - (t[2] as f64)*(t[1] as f64);

        if det > -1e-6 && det < 1e-6 {
            return None;
        }

        let inv_det = 1.0 / det;

        Some(Transform2D([
            ((t[3] as f64) * inv_det) as f32,
            (-(t[1] as f64) * inv_det) as f32,
            (-(t[2] as f64) * inv_det) as f32,
            ((t[0] as f64) * inv_det) as f32,
            (((t[2] as f64)*(t[5] as f64) - (t[3] as f64)*(t[4] as f64)) * inv_det) as f32,
            (((t[1] as f64)*(t[4] as f64) - (t[0] as f64)*(t[5] as f64)) * inv_det) as f32
        ]))
    }

    ///
    /// The average of the scale factors along the X and Y axes
    ///
    pub fn average_scale(&self) -> f32 {
        let Transform2D(t) = self;

        let scale_x = f32::sqrt(t[0]*t[0] + t[2]*t[2]);
        let scale_y = f32::sqrt(t[1]*t[1] + t[3]*t[3]);

        (scale_x + scale_y) * 0.5
    }
}

impl Mul<Transform2D> for Transform2D {
    type Output=Transform2D;

    ///
    /// `a * b` applies `a` followed by `b`
    ///
    fn mul(self, other: Transform2D) -> Transform2D {
        self.multiply(&other)
    }
}

impl Mul<&Transform2D> for &Transform2D {
    type Output=Transform2D;

    fn mul(self, other: &Transform2D) -> Transform2D {
        self.multiply(other)
    }
}
