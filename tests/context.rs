use flo_vg::*;

fn context() -> Context<ActionRecorder> {
    Context::new(ActionRecorder::new(true), ContextOptions::default())
}

fn draw_rect(context: &mut Context<ActionRecorder>) {
    context.begin_path();
    context.rect(10.0, 10.0, 20.0, 20.0);
    context.fill();
}

#[test]
fn new_context_creates_backend_and_glyph_atlas() {
    let context = context();

    assert!(context.backend().is_active());
    assert!(context.backend().texture_count() == 1);

    match context.backend().actions()[0] {
        RenderAction::CreateTexture(_, TextureKind::Alpha, 512, 512, _) => { }
        ref other                                                       => panic!("Unexpected action {:?}", other)
    }
}

#[test]
fn begin_frame_sets_viewport_and_tolerances() {
    let mut context = context();

    context.begin_frame(640, 480, 2.0);

    assert!(context.backend().actions().last() == Some(&RenderAction::Viewport(640, 480)));
    assert!(context.device_pixel_ratio() == 2.0);
    assert!(context.tessellation_tolerance() == 0.125);
    assert!(context.fringe_width() == 0.5);
}

#[test]
fn begin_frame_resets_state_stack() {
    let mut context = context();

    context.save();
    context.save();
    context.set_stroke_width(3.0);
    context.begin_frame(100, 100, 1.0);

    assert!(context.state_depth() == 1);
    assert!(context.stroke_width() == 1.0);
}

#[test]
fn draw_calls_are_pending_until_end_frame() {
    let mut context = context();

    context.begin_frame(100, 100, 1.0);
    draw_rect(&mut context);

    assert!(context.backend().pending().len() == 1);
    let num_actions = context.backend().actions().len();

    context.end_frame();

    assert!(context.backend().pending().is_empty());
    assert!(context.backend().actions().len() == num_actions + 1);

    match context.backend().actions().last() {
        Some(RenderAction::Fill { .. }) => { }
        other                           => panic!("Expected a fill, got {:?}", other)
    }
}

#[test]
fn cancel_frame_discards_draw_calls() {
    let mut context = context();

    context.begin_frame(100, 100, 1.0);
    draw_rect(&mut context);
    context.cancel_frame();
    context.end_frame();

    assert!(context.backend().pending().is_empty());
    assert!(!context.backend().actions().iter().any(|action| match action { RenderAction::Fill { .. } => true, _ => false }));
}

#[test]
fn stats_count_draw_calls_and_triangles() {
    let mut context = context();

    context.begin_frame(100, 100, 1.0);
    draw_rect(&mut context);

    let stats = context.stats();

    // Fan of 4 vertices, fringe strip of 10
    assert!(stats.draw_calls == 2);
    assert!(stats.fill_triangles == 2);
    assert!(stats.stroke_triangles == 8);
    assert!(stats.total_triangles() == 10);
}

#[test]
fn stats_reset_each_frame() {
    let mut context = context();

    context.begin_frame(100, 100, 1.0);
    draw_rect(&mut context);
    context.end_frame();

    context.begin_frame(100, 100, 1.0);

    assert!(context.stats() == FrameStats::default());
}

#[test]
fn block_restores_context_state() {
    let mut context = context();

    context.set_line_join(LineJoin::Round);
    context.block(|context| {
        context.set_line_join(LineJoin::Bevel);
        context.translate(10.0, 10.0);

        assert!(context.state_depth() == 2);
    });

    assert!(context.state_depth() == 1);
    assert!(context.line_join() == LineJoin::Round);
    assert!(context.current_transform() == Transform2D::identity());
}

#[test]
fn transforms_apply_in_local_space() {
    let mut context = context();

    context.translate(10.0, 0.0);
    context.scale(2.0, 2.0);

    assert!(context.current_transform().transform_point(1.0, 1.0) == (12.0, 2.0));
}

#[test]
fn paint_transform_is_fixed_when_set() {
    let mut context = context();

    let gradient = Paint::linear_gradient(0.0, 0.0, 10.0, 0.0, Color::rgb(1.0, 0.0, 0.0), Color::rgb(0.0, 0.0, 1.0));

    context.translate(5.0, 5.0);
    context.set_fill_paint(gradient);

    let paint_transform = context.state().fill.transform;

    context.translate(100.0, 100.0);
    context.rotate(1.0);

    assert!(paint_transform == gradient.transform.multiply(&Transform2D::translate(5.0, 5.0)));
    assert!(context.state().fill.transform == paint_transform);
}

#[test]
fn scissor_is_centered_on_rectangle() {
    let mut context = context();

    context.scissor(10.0, 20.0, 30.0, 40.0);

    let scissor = context.state().scissor;
    assert!(scissor.extent == Some([15.0, 20.0]));
    assert!(scissor.transform.transform_point(0.0, 0.0) == (25.0, 40.0));
}

#[test]
fn negative_scissor_size_is_empty() {
    let mut context = context();

    context.scissor(10.0, 20.0, -30.0, 40.0);

    assert!(context.state().scissor.extent == Some([0.0, 20.0]));
}

#[test]
fn intersect_scissor_without_scissor_sets_scissor() {
    let mut context = context();

    context.intersect_scissor(0.0, 0.0, 10.0, 10.0);

    assert!(context.state().scissor.extent == Some([5.0, 5.0]));
}

#[test]
fn intersect_scissor_overlapping_rects() {
    let mut context = context();

    context.scissor(0.0, 0.0, 20.0, 20.0);
    context.intersect_scissor(10.0, 5.0, 20.0, 10.0);

    let scissor = context.state().scissor;
    assert!(scissor.extent == Some([5.0, 5.0]));
    assert!(scissor.transform.transform_point(0.0, 0.0) == (15.0, 10.0));
}

#[test]
fn intersect_scissor_disjoint_rects_is_empty() {
    let mut context = context();

    context.scissor(0.0, 0.0, 10.0, 10.0);
    context.intersect_scissor(50.0, 50.0, 10.0, 10.0);

    assert!(context.state().scissor.extent == Some([0.0, 0.0]));
}

#[test]
fn reset_scissor_disables_scissoring() {
    let mut context = context();

    context.scissor(0.0, 0.0, 10.0, 10.0);
    context.reset_scissor();

    assert!(context.state().scissor.extent.is_none());
}

#[test]
fn scissor_is_passed_to_backend() {
    let mut context = context();

    context.begin_frame(100, 100, 1.0);
    context.scissor(0.0, 0.0, 50.0, 50.0);
    draw_rect(&mut context);

    match context.backend().pending().last() {
        Some(RenderAction::Fill { scissor, .. })    => assert!(scissor.extent == Some([25.0, 25.0])),
        other                                       => panic!("Expected a fill, got {:?}", other)
    }
}

#[test]
fn create_update_and_delete_image() {
    let mut context = context();
    let pixels      = vec![255u8; 4*4*4];

    let image = context.create_image_rgba(4, 4, ImageFlags::REPEAT_X | ImageFlags::REPEAT_Y, &pixels);

    assert!(image.is_valid());
    assert!(context.image_size(image) == Ok((4, 4)));

    let new_pixels = vec![128u8; 4*4*4];
    assert!(context.update_image(image, &new_pixels) == Ok(()));
    assert!(context.backend().texture_pixels(image) == Some(&new_pixels[..]));

    context.delete_image(image);
    assert!(context.image_size(image) == Err(VgError::InvalidImage(image)));
}

#[test]
fn image_with_wrong_data_size_is_not_created() {
    let mut context = context();

    let image = context.create_image_rgba(4, 4, ImageFlags::empty(), &[0u8; 10]);

    assert!(!image.is_valid());
    assert!(image == ImageId::NONE);
}

#[test]
fn update_unknown_image_fails() {
    let mut context = context();

    assert!(context.update_image(ImageId(1234), &[0u8; 16]) == Err(VgError::InvalidImage(ImageId(1234))));
}

#[test]
fn debug_option_dumps_path_cache() {
    let _ = env_logger::try_init();

    let mut context = Context::new(ActionRecorder::new(true), ContextOptions { debug: true, ..ContextOptions::default() });

    context.begin_frame(100, 100, 1.0);
    draw_rect(&mut context);

    assert!(context.options().debug);
    assert!(context.backend().pending().len() == 1);
}

#[test]
fn antialias_option_disables_fringe() {
    let mut context = Context::new(ActionRecorder::new(true), ContextOptions { antialias: false, ..ContextOptions::default() });

    context.begin_frame(100, 100, 1.0);
    draw_rect(&mut context);

    match context.backend().pending().last() {
        Some(RenderAction::Fill { paths, .. })  => assert!(paths[0].stroke.is_empty()),
        other                                   => panic!("Expected a fill, got {:?}", other)
    }
}

#[test]
fn options_can_be_partially_deserialized() {
    let options: ContextOptions = serde_json::from_str(r#"{ "debug": true }"#).unwrap();

    assert!(options.debug);
    assert!(options.antialias);
    assert!(options.device_pixel_ratio == 1.0);
}

#[test]
fn frame_stats_serialize() {
    let stats = FrameStats { draw_calls: 3, fill_triangles: 4, stroke_triangles: 5, text_triangles: 6 };
    let json  = serde_json::to_string(&stats).unwrap();

    assert!(serde_json::from_str::<FrameStats>(&json).unwrap() == stats);
}

#[test]
fn dropping_context_releases_backend() {
    let mut recorder = ActionRecorder::new(true);

    {
        let context = Context::new(&mut recorder, ContextOptions::default());
        assert!(context.backend().is_active());
    }

    assert!(!recorder.is_active());
    assert!(recorder.texture_count() == 0);
}
