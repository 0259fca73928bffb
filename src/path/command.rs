use crate::state::Winding;
use crate::transform2d::*;

///
/// An instruction in a recorded path
///
/// Coordinates are stored in document space: they have already been transformed by the transform that
/// was active when the command was recorded.
///
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum PathCommand {
    /// Starts a new sub-path at the specified point
    MoveTo(f32, f32),

    /// Adds a straight line to the specified point
    LineTo(f32, f32),

    /// Adds a cubic bezier curve: (control point 1, control point 2, end point)
    BezierTo((f32, f32), (f32, f32), (f32, f32)),

    /// Closes the current sub-path
    ClosePath,

    /// Sets the winding class of the current sub-path
    Winding(Winding)
}

impl PathCommand {
    ///
    /// The end point of this command in the coordinates it was created with, if it has one
    ///
    pub fn end_point(&self) -> Option<(f32, f32)> {
        use self::PathCommand::*;

        match self {
            MoveTo(x, y)            => Some((*x, *y)),
            LineTo(x, y)            => Some((*x, *y)),
            BezierTo(_, _, end)     => Some(*end),
            ClosePath               => None,
            Winding(_)              => None
        }
    }

    ///
    /// Returns this command with its points transformed
    ///
    pub fn transform(&self, transform: &Transform2D) -> PathCommand {
        use self::PathCommand::*;

        match self {
            MoveTo(x, y)                    => { let (x, y) = transform.transform_point(*x, *y); MoveTo(x, y) }
            LineTo(x, y)                    => { let (x, y) = transform.transform_point(*x, *y); LineTo(x, y) }
            BezierTo(cp1, cp2, end)         => BezierTo(
                transform.transform_point(cp1.0, cp1.1),
                transform.transform_point(cp2.0, cp2.1),
                transform.transform_point(end.0, end.1)),
            ClosePath                       => ClosePath,
            Winding(winding)                => Winding(*winding)
        }
    }
}
