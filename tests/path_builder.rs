use flo_vg::*;
use flo_vg::path::*;

use std::f32::consts::PI;

fn approx(a: f32, b: f32) -> bool {
    f32::abs(a-b) < 0.0001
}

#[test]
fn rect_is_four_lines_and_close() {
    let mut path: Vec<PathCommand> = vec![];
    path.rect(1.0, 2.0, 3.0, 4.0);

    assert!(path == vec![
        PathCommand::MoveTo(1.0, 2.0),
        PathCommand::LineTo(1.0, 6.0),
        PathCommand::LineTo(4.0, 6.0),
        PathCommand::LineTo(4.0, 2.0),
        PathCommand::ClosePath
    ]);
}

#[test]
fn quad_is_lifted_to_cubic() {
    let mut path: Vec<PathCommand> = vec![];
    path.move_to(0.0, 0.0);
    path.quad_to(3.0, 3.0, 6.0, 0.0);

    assert!(path[1] == PathCommand::BezierTo((2.0, 2.0), (4.0, 2.0), (6.0, 0.0)));
}

#[test]
fn full_circle_arc_is_four_curves_ending_at_start() {
    let mut path: Vec<PathCommand> = vec![];
    path.arc(0.0, 0.0, 10.0, 0.0, PI*2.0, Direction::Clockwise);

    let curves = path.iter().filter(|cmd| match cmd { PathCommand::BezierTo(_, _, _) => true, _ => false }).count();

    assert!(path.len() == 5);
    assert!(curves == 4);
    assert!(path[0] == PathCommand::MoveTo(10.0, 0.0));

    let (end_x, end_y) = path[4].end_point().unwrap();
    assert!(approx(end_x, 10.0));
    assert!(approx(end_y, 0.0));
}

#[test]
fn full_circle_arc_flattens_to_closed_loop() {
    let mut path: Vec<PathCommand> = vec![];
    path.arc(0.0, 0.0, 10.0, 0.0, PI*2.0, Direction::Clockwise);

    let mut cache = PathCache::new();
    flatten(&mut cache, &path, 0.25, 0.01);

    assert!(cache.paths.len() == 1);
    assert!(cache.paths[0].closed);
    assert!(cache.paths[0].count > 4);
}

#[test]
fn quarter_arc_is_one_curve() {
    let mut path: Vec<PathCommand> = vec![];
    path.arc(0.0, 0.0, 1.0, 0.0, PI*0.5, Direction::Clockwise);

    assert!(path.len() == 2);

    match path[1] {
        PathCommand::BezierTo(_, _, (x, y))  => { assert!(approx(x, 0.0)); assert!(approx(y, 1.0)); }
        _                                   => assert!(false)
    }
}

#[test]
fn counter_clockwise_arc_sweeps_backwards() {
    let mut path: Vec<PathCommand> = vec![];
    path.arc(0.0, 0.0, 1.0, 0.0, PI*0.5, Direction::CounterClockwise);

    // Going the long way round: three quarters of a turn
    assert!(path.len() == 4);

    let (x, y) = path[1].end_point().unwrap();
    assert!(approx(x, 0.0));
    assert!(approx(y, -1.0));
}

#[test]
fn arc_to_collinear_points_is_a_line() {
    let mut path: Vec<PathCommand> = vec![];
    path.move_to(0.0, 0.0);
    path.arc_to(5.0, 0.0, 10.0, 0.0, 2.0);

    assert!(path == vec![PathCommand::MoveTo(0.0, 0.0), PathCommand::LineTo(5.0, 0.0)]);
}

#[test]
fn arc_to_zero_radius_is_a_line() {
    let mut path: Vec<PathCommand> = vec![];
    path.move_to(0.0, 0.0);
    path.arc_to(5.0, 0.0, 5.0, 5.0, 0.0);

    assert!(path == vec![PathCommand::MoveTo(0.0, 0.0), PathCommand::LineTo(5.0, 0.0)]);
}

#[test]
fn arc_to_without_current_point_does_nothing() {
    let mut path: Vec<PathCommand> = vec![];
    path.arc_to(5.0, 0.0, 5.0, 5.0, 1.0);

    assert!(path.is_empty());
}

#[test]
fn arc_to_right_angle_is_tangent_to_both_lines() {
    let mut path: Vec<PathCommand> = vec![];
    path.move_to(0.0, 0.0);
    path.arc_to(10.0, 0.0, 10.0, 10.0, 2.0);

    // Joins with a line to the first tangent point, then curves round to the second
    let (start_x, start_y) = path[1].end_point().unwrap();
    let (end_x, end_y)     = path[path.len()-1].end_point().unwrap();

    assert!(approx(start_x, 8.0));
    assert!(approx(start_y, 0.0));
    assert!(approx(end_x, 10.0));
    assert!(approx(end_y, 2.0));
}

#[test]
fn ellipse_is_closed_with_four_curves() {
    let mut path: Vec<PathCommand> = vec![];
    path.ellipse(0.0, 0.0, 4.0, 2.0);

    assert!(path.len() == 6);
    assert!(path[0] == PathCommand::MoveTo(-4.0, 0.0));
    assert!(path[5] == PathCommand::ClosePath);
}

#[test]
fn context_records_paths_in_current_transform() {
    let mut context = Context::new(ActionRecorder::new(false), ContextOptions::default());

    context.begin_path();
    context.translate(10.0, 20.0);
    context.move_to(1.0, 1.0);
    context.scale(2.0, 2.0);
    context.line_to(1.0, 1.0);

    // Changing the transform doesn't affect commands that have already been recorded
    context.reset_transform();
    context.line_to(1.0, 1.0);

    assert!(context.current_point() == Some((1.0, 1.0)));

    context.fill();

    let points = context.path_cache().points.iter().map(|p| (p.x, p.y)).collect::<Vec<_>>();
    assert!(points.contains(&(11.0, 21.0)));
    assert!(points.contains(&(12.0, 22.0)));
    assert!(points.contains(&(1.0, 1.0)));
}
