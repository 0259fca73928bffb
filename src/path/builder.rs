use super::point::*;
use super::command::*;
use crate::state::{Direction, Winding};

use smallvec::SmallVec;

use std::f32::consts::PI;

/// Length of the control points for a cubic bezier approximating a quarter circle of radius 1
pub const KAPPA90: f32 = 0.552_284_75;

/// Tangent distance beyond which an arc_to corner is treated as a straight line
const MAX_ARC_TO_TANGENT: f32 = 10000.0;

/// Default distance tolerance for path builders that aren't attached to a device
pub const DEFAULT_DISTANCE_TOLERANCE: f32 = 0.01;

///
/// A path builder provides the operations used to construct a path
///
/// Implementors only need to supply a way to record a command and report the current point: the
/// shapes (arcs, rectangles, ellipses, etc) are all built out of the basic commands.
///
pub trait PathBuilder {
    ///
    /// Adds a command to the path (coordinates are in the builder's local space)
    ///
    fn add_path_command(&mut self, command: PathCommand);

    ///
    /// The last point added to the path, in the builder's local space
    ///
    fn current_point(&self) -> Option<(f32, f32)>;

    ///
    /// True if any commands have been added to the current path
    ///
    fn has_path_commands(&self) -> bool;

    ///
    /// Points closer together than this distance are considered to be the same
    ///
    fn distance_tolerance(&self) -> f32 {
        DEFAULT_DISTANCE_TOLERANCE
    }

    ///
    /// Starts a new sub-path at the specified point
    ///
    fn move_to(&mut self, x: f32, y: f32) {
        self.add_path_command(PathCommand::MoveTo(x, y));
    }

    ///
    /// Adds a line segment from the current point to the specified point
    ///
    fn line_to(&mut self, x: f32, y: f32) {
        self.add_path_command(PathCommand::LineTo(x, y));
    }

    ///
    /// Adds a cubic bezier segment from the current point via two control points to the specified point
    ///
    fn bezier_to(&mut self, c1x: f32, c1y: f32, c2x: f32, c2y: f32, x: f32, y: f32) {
        self.add_path_command(PathCommand::BezierTo((c1x, c1y), (c2x, c2y), (x, y)));
    }

    ///
    /// Adds a quadratic bezier segment from the current point via a control point to the specified point
    ///
    fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) {
        let (x0, y0) = self.current_point().unwrap_or((0.0, 0.0));

        self.add_path_command(PathCommand::BezierTo(
            (x0 + 2.0/3.0*(cx - x0), y0 + 2.0/3.0*(cy - y0)),
            (x + 2.0/3.0*(cx - x), y + 2.0/3.0*(cy - y)),
            (x, y)));
    }

    ///
    /// Closes the current sub-path
    ///
    fn close_path(&mut self) {
        self.add_path_command(PathCommand::ClosePath);
    }

    ///
    /// Sets the winding class of the current sub-path
    ///
    fn path_winding(&mut self, winding: Winding) {
        self.add_path_command(PathCommand::Winding(winding));
    }

    ///
    /// Adds a circular arc around (cx, cy), from angle a0 to a1 (radians), swept in the specified direction
    ///
    /// The arc starts a new sub-path if the path is empty, otherwise it's joined to the current point
    /// with a line.
    ///
    fn arc(&mut self, cx: f32, cy: f32, r: f32, a0: f32, a1: f32, dir: Direction) {
        let start_with_move = !self.has_path_commands();

        // Clamp the sweep to a single turn in the requested direction
        let mut da = a1 - a0;
        match dir {
            Direction::Clockwise => {
                if da.abs() >= PI*2.0 {
                    da = PI*2.0;
                } else {
                    while da < 0.0 { da += PI*2.0; }
                }
            }

            Direction::CounterClockwise => {
                if da.abs() >= PI*2.0 {
                    da = -PI*2.0;
                } else {
                    while da > 0.0 { da -= PI*2.0; }
                }
            }
        }

        // Split the arc into segments of at most 90 degrees
        let num_divisions   = ((da.abs() / (PI*0.5) + 0.5) as i32).max(1).min(5);
        let half_angle      = da / (num_divisions as f32) / 2.0;
        let mut kappa       = if half_angle.abs() > 1e-6 {
            (4.0/3.0 * (1.0 - half_angle.cos()) / half_angle.sin()).abs()
        } else {
            0.0
        };

        if dir == Direction::CounterClockwise {
            kappa = -kappa;
        }

        let mut commands: SmallVec<[PathCommand; 6]> = SmallVec::new();
        let (mut px, mut py, mut ptanx, mut ptany) = (0.0, 0.0, 0.0, 0.0);

        for division in 0..=num_divisions {
            let angle       = a0 + da * (division as f32) / (num_divisions as f32);
            let (dy, dx)    = angle.sin_cos();
            let x           = cx + dx*r;
            let y           = cy + dy*r;
            let tanx        = -dy*r*kappa;
            let tany        = dx*r*kappa;

            if division == 0 {
                commands.push(if start_with_move { PathCommand::MoveTo(x, y) } else { PathCommand::LineTo(x, y) });
            } else {
                commands.push(PathCommand::BezierTo((px + ptanx, py + ptany), (x - tanx, y - tany), (x, y)));
            }

            px      = x;
            py      = y;
            ptanx   = tanx;
            ptany   = tany;
        }

        for command in commands {
            self.add_path_command(command);
        }
    }

    ///
    /// Adds an arc of the specified radius in the corner formed by the current point, (x1, y1) and (x2, y2)
    ///
    /// If the corner is degenerate (points too close together, collinear, or too shallow an angle) this
    /// adds a straight line to (x1, y1) instead.
    ///
    fn arc_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, radius: f32) {
        if !self.has_path_commands() {
            return;
        }

        let (x0, y0)    = match self.current_point() {
            Some(point) => point,
            None        => return
        };
        let tolerance   = self.distance_tolerance();

        if points_equal(x0, y0, x1, y1, tolerance)
            || points_equal(x1, y1, x2, y2, tolerance)
            || distance_to_segment_squared(x1, y1, x0, y0, x2, y2) < tolerance*tolerance
            || radius < tolerance {
            trace!("arc_to: degenerate corner at ({}, {}), using a line", x1, y1);
            self.line_to(x1, y1);
            return;
        }

        // Find the circle tangent to the lines (x0, y0)-(x1, y1) and (x1, y1)-(x2, y2)
        let (_, dx0, dy0)   = normalize(x0 - x1, y0 - y1);
        let (_, dx1, dy1)   = normalize(x2 - x1, y2 - y1);
        let angle           = f32::acos((dx0*dx1 + dy0*dy1).max(-1.0).min(1.0));
        let tangent         = radius / f32::tan(angle / 2.0);

        if !(tangent <= MAX_ARC_TO_TANGENT) {
            trace!("arc_to: corner at ({}, {}) is too shallow, using a line", x1, y1);
            self.line_to(x1, y1);
            return;
        }

        if cross(dx0, dy0, dx1, dy1) > 0.0 {
            let cx = x1 + dx0*tangent + dy0*radius;
            let cy = y1 + dy0*tangent - dx0*radius;
            let a0 = f32::atan2(dx0, -dy0);
            let a1 = f32::atan2(-dx1, dy1);

            self.arc(cx, cy, radius, a0, a1, Direction::Clockwise);
        } else {
            let cx = x1 + dx0*tangent - dy0*radius;
            let cy = y1 + dy0*tangent + dx0*radius;
            let a0 = f32::atan2(-dx0, dy0);
            let a1 = f32::atan2(dx1, -dy1);

            self.arc(cx, cy, radius, a0, a1, Direction::CounterClockwise);
        }
    }

    ///
    /// Adds a rectangle as a new sub-path
    ///
    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.move_to(x, y);
        self.line_to(x, y + h);
        self.line_to(x + w, y + h);
        self.line_to(x + w, y);
        self.close_path();
    }

    ///
    /// Adds a rectangle with rounded corners as a new sub-path
    ///
    fn rounded_rect(&mut self, x: f32, y: f32, w: f32, h: f32, r: f32) {
        if r < 0.1 {
            self.rect(x, y, w, h);
            return;
        }

        // The radius can't be more than half the shorter side
        let rx = f32::min(r, w.abs()*0.5) * w.signum();
        let ry = f32::min(r, h.abs()*0.5) * h.signum();
        let k  = 1.0 - KAPPA90;

        self.move_to(x, y + ry);
        self.line_to(x, y + h - ry);
        self.bezier_to(x, y + h - ry*k, x + rx*k, y + h, x + rx, y + h);
        self.line_to(x + w - rx, y + h);
        self.bezier_to(x + w - rx*k, y + h, x + w, y + h - ry*k, x + w, y + h - ry);
        self.line_to(x + w, y + ry);
        self.bezier_to(x + w, y + ry*k, x + w - rx*k, y, x + w - rx, y);
        self.line_to(x + rx, y);
        self.bezier_to(x + rx*k, y, x, y + ry*k, x, y + ry);
        self.close_path();
    }

    ///
    /// Adds an ellipse as a new sub-path
    ///
    fn ellipse(&mut self, cx: f32, cy: f32, rx: f32, ry: f32) {
        self.move_to(cx - rx, cy);
        self.bezier_to(cx - rx, cy + ry*KAPPA90, cx - rx*KAPPA90, cy + ry, cx, cy + ry);
        self.bezier_to(cx + rx*KAPPA90, cy + ry, cx + rx, cy + ry*KAPPA90, cx + rx, cy);
        self.bezier_to(cx + rx, cy - ry*KAPPA90, cx + rx*KAPPA90, cy - ry, cx, cy - ry);
        self.bezier_to(cx - rx*KAPPA90, cy - ry, cx - rx, cy - ry*KAPPA90, cx - rx, cy);
        self.close_path();
    }

    ///
    /// Adds a circle as a new sub-path
    ///
    fn circle(&mut self, cx: f32, cy: f32, r: f32) {
        self.ellipse(cx, cy, r, r);
    }
}

///
/// A Vec<PathCommand> can be used as a path builder (recording commands without any transformation)
///
impl PathBuilder for Vec<PathCommand> {
    #[inline]
    fn add_path_command(&mut self, command: PathCommand) {
        self.push(command);
    }

    fn current_point(&self) -> Option<(f32, f32)> {
        self.iter().rev()
            .filter_map(|command| command.end_point())
            .next()
    }

    #[inline]
    fn has_path_commands(&self) -> bool {
        !self.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn quad_to_lifts_control_points() {
        let mut path: Vec<PathCommand> = vec![];

        path.move_to(0.0, 0.0);
        path.quad_to(3.0, 3.0, 6.0, 0.0);

        assert!(path[1] == PathCommand::BezierTo((2.0, 2.0), (4.0, 2.0), (6.0, 0.0)));
    }

    #[test]
    fn rounded_rect_with_tiny_radius_is_rect() {
        let mut rounded: Vec<PathCommand> = vec![];
        let mut rect: Vec<PathCommand>    = vec![];

        rounded.rounded_rect(0.0, 0.0, 10.0, 20.0, 0.05);
        rect.rect(0.0, 0.0, 10.0, 20.0);

        assert!(rounded == rect);
    }

    #[test]
    fn rounded_rect_radius_is_clamped() {
        let mut path: Vec<PathCommand> = vec![];

        path.rounded_rect(0.0, 0.0, 10.0, 4.0, 100.0);

        // Radius is clamped to half the width (5) and half the height (2)
        assert!(path[0] == PathCommand::MoveTo(0.0, 2.0));
        assert!(path[1] == PathCommand::LineTo(0.0, 2.0));
        assert!(path[3] == PathCommand::LineTo(5.0, 4.0));
    }

    #[test]
    fn arc_after_path_starts_with_line() {
        let mut path: Vec<PathCommand> = vec![];

        path.move_to(0.0, 0.0);
        path.arc(10.0, 10.0, 5.0, 0.0, PI, Direction::Clockwise);

        match path[1] {
            PathCommand::LineTo(x, y)   => { assert!((x-15.0).abs() < 0.001); assert!((y-10.0).abs() < 0.001); }
            _                           => assert!(false)
        }
    }

    #[test]
    fn zero_sweep_arc_is_finite() {
        let mut path: Vec<PathCommand> = vec![];

        path.arc(0.0, 0.0, 5.0, 1.0, 1.0, Direction::Clockwise);

        assert!(path.len() == 2);
        match path[1] {
            PathCommand::BezierTo(cp1, cp2, end)    => { assert!(cp1.0.is_finite() && cp2.1.is_finite() && end.0.is_finite()); }
            _                                       => assert!(false)
        }
    }
}
