use flo_vg::*;
use flo_vg::text::*;

///
/// A font stash where every glyph is half as wide as it is tall, and occupies a fixed-size cell in the atlas
///
struct MonospaceStash {
    fonts:      Vec<String>,
    style:      Option<TextStyle>,
    cell_size:  usize,
    width:      usize,
    height:     usize,
    next_cell:  usize,
    dirty:      bool,
    pixels:     Vec<u8>
}

impl MonospaceStash {
    fn new(cell_size: usize) -> MonospaceStash {
        MonospaceStash {
            fonts:      vec![],
            style:      None,
            cell_size:  cell_size,
            width:      0,
            height:     0,
            next_cell:  0,
            dirty:      false,
            pixels:     vec![]
        }
    }

    fn size(&self) -> f32 {
        self.style.map(|style| style.size).unwrap_or(16.0)
    }

    fn advance(&self) -> f32 {
        self.size() * 0.5
    }
}

impl FontStash for MonospaceStash {
    fn add_font(&mut self, name: &str, data: Vec<u8>) -> Option<FontId> {
        if data.is_empty() {
            return None;
        }

        self.fonts.push(name.to_string());
        Some(FontId((self.fonts.len() - 1) as i32))
    }

    fn font_by_name(&self, name: &str) -> Option<FontId> {
        self.fonts.iter().position(|font| font == name).map(|idx| FontId(idx as i32))
    }

    fn font_name(&self, font: FontId) -> Option<String> {
        self.fonts.get(font.0 as usize).cloned()
    }

    fn set_style(&mut self, style: &TextStyle) {
        self.style = Some(*style);
    }

    fn glyphs(&mut self, x: f32, y: f32, text: &str) -> Vec<GlyphPosition> {
        let advance = self.advance();

        text.char_indices()
            .enumerate()
            .map(|(num, (index, character))| GlyphPosition {
                index:      index,
                character:  character,
                x:          x + (num as f32)*advance,
                y:          y,
                next_x:     x + ((num+1) as f32)*advance
            })
            .collect()
    }

    fn rasterize(&mut self, glyph: &GlyphPosition) -> Option<GlyphQuad> {
        let per_row = self.width / self.cell_size;
        let rows    = self.height / self.cell_size;

        if self.next_cell >= per_row * rows {
            return None;
        }

        let col         = self.next_cell % per_row;
        let row         = self.next_cell / per_row;
        self.next_cell  += 1;
        self.dirty      = true;

        let size        = self.size();
        let cell_w      = self.cell_size as f32 / self.width as f32;
        let cell_h      = self.cell_size as f32 / self.height as f32;

        Some(GlyphQuad {
            x0: glyph.x,
            y0: glyph.y - size,
            x1: glyph.next_x,
            y1: glyph.y,

            s0: (col as f32) * cell_w,
            t0: (row as f32) * cell_h,
            s1: ((col+1) as f32) * cell_w,
            t1: ((row+1) as f32) * cell_h
        })
    }

    fn text_bounds(&mut self, x: f32, y: f32, text: &str) -> (f32, Option<[f32; 4]>) {
        let advance = self.advance() * (text.chars().count() as f32);

        if text.is_empty() {
            (0.0, None)
        } else {
            (advance, Some([x, y - self.size(), x + advance, y]))
        }
    }

    fn line_bounds(&mut self, y: f32) -> (f32, f32) {
        (y - self.size(), y + self.size()*0.25)
    }

    fn vertical_metrics(&mut self) -> VerticalMetrics {
        VerticalMetrics {
            ascender:       self.size(),
            descender:      -self.size()*0.25,
            line_height:    self.size()*1.25
        }
    }

    fn validate_texture(&mut self) -> Option<DirtyRect> {
        if self.dirty {
            self.dirty = false;
            Some(DirtyRect { x: 0, y: 0, width: self.width, height: self.height })
        } else {
            None
        }
    }

    fn texture_data(&self) -> (&[u8], usize, usize) {
        (&self.pixels, self.width, self.height)
    }

    fn reset_atlas(&mut self, width: usize, height: usize) {
        self.width      = width;
        self.height     = height;
        self.pixels     = vec![0; width*height];
        self.next_cell  = 0;
        self.dirty      = false;
    }
}

fn text_context(cell_size: usize) -> Context<ActionRecorder> {
    let mut context = Context::new(ActionRecorder::new(true), ContextOptions::default());

    context.set_font_stash(Box::new(MonospaceStash::new(cell_size)));
    context.begin_frame(800, 600, 1.0);

    let font = context.create_font("mono", vec![1, 2, 3]);
    assert!(font == Some(FontId(0)));

    context.set_font_face("mono");
    context.set_font_size(20.0);

    context
}

fn text_draws(context: &Context<ActionRecorder>) -> Vec<(ImageId, Vec<Vertex2D>)> {
    context.backend().pending().iter()
        .filter_map(|action| match action {
            RenderAction::Triangles { paint, vertices, .. } => Some((paint.image.unwrap_or(ImageId::NONE), vertices.clone())),
            _                                               => None
        })
        .collect()
}

#[test]
fn text_without_font_stash_draws_nothing() {
    let mut context = Context::new(ActionRecorder::new(true), ContextOptions::default());
    context.begin_frame(100, 100, 1.0);

    assert!(context.create_font("mono", vec![1]).is_none());
    assert!(context.text(10.0, 10.0, "Hello") == 0.0);
    assert!(context.backend().pending().is_empty());
}

#[test]
fn text_without_font_draws_nothing() {
    let mut context = Context::new(ActionRecorder::new(true), ContextOptions::default());
    context.set_font_stash(Box::new(MonospaceStash::new(16)));
    context.begin_frame(100, 100, 1.0);

    assert!(context.font_face_id().is_none());
    assert!(context.text(10.0, 10.0, "Hello") == 0.0);
    assert!(context.backend().pending().is_empty());
}

#[test]
fn fonts_can_be_found_by_name() {
    let mut context = text_context(16);

    assert!(context.find_font("mono") == Some(FontId(0)));
    assert!(context.find_font("serif").is_none());
    assert!(context.create_font("broken", vec![]).is_none());
    assert!(context.font_face() == Some("mono".to_string()));

    context.set_font_face("serif");
    assert!(context.font_face_id().is_none());
}

#[test]
fn text_returns_position_of_next_character() {
    let mut context = text_context(16);

    assert!(context.text(10.0, 50.0, "abc") == 40.0);
}

#[test]
fn text_draws_quad_per_glyph() {
    let mut context = text_context(16);

    context.text(10.0, 50.0, "abc");

    let draws = text_draws(&context);
    assert!(draws.len() == 1);

    let (image, vertices) = &draws[0];
    assert!(vertices.len() == 12);
    assert!(image.is_valid());

    // Each glyph is a triangle strip: top right, top left, bottom right, bottom left
    assert!(vertices[0].pos == [20.0, 30.0]);
    assert!(vertices[1].pos == [10.0, 30.0]);
    assert!(vertices[2].pos == [20.0, 50.0]);
    assert!(vertices[3].pos == [10.0, 50.0]);
    assert!(vertices[1].tex_coord == [0.0, 0.0]);
}

#[test]
fn text_uploads_glyph_atlas() {
    let mut context = text_context(16);

    context.text(10.0, 50.0, "abc");

    let uploads = context.backend().actions().iter()
        .filter(|action| match action { RenderAction::UpdateTexture(_, 0, 0, 512, 512) => true, _ => false })
        .count();

    assert!(uploads == 1);
}

#[test]
fn text_counts_triangles() {
    let mut context = text_context(16);

    context.text(10.0, 50.0, "abcd");

    assert!(context.stats().draw_calls == 1);
    assert!(context.stats().text_triangles == 8);
}

#[test]
fn text_follows_transform() {
    let mut context = text_context(16);

    context.scale(2.0, 2.0);
    let next_x = context.text(10.0, 50.0, "abc");

    let draws = text_draws(&context);
    let (_, vertices) = &draws[0];

    assert!(next_x == 40.0);
    assert!(vertices[1].pos == [20.0, 60.0]);
    assert!(vertices[0].pos == [40.0, 60.0]);
}

#[test]
fn text_uses_fill_paint_and_alpha() {
    let mut context = text_context(16);

    context.set_fill_color(Color::rgba(1.0, 0.0, 0.0, 1.0));
    context.set_global_alpha(0.5);
    context.text(0.0, 20.0, "a");

    match context.backend().pending().last() {
        Some(RenderAction::Triangles { paint, .. }) => {
            assert!(paint.inner_color == Color::rgba(1.0, 0.0, 0.0, 0.5));
        }

        other => panic!("Expected triangles, got {:?}", other)
    }
}

#[test]
fn full_atlas_moves_to_larger_texture() {
    // 4 glyphs fit in the first atlas
    let mut context = text_context(256);

    let next_x = context.text(0.0, 20.0, "0123456789");

    let draws = text_draws(&context);
    assert!(next_x == 100.0);
    assert!(draws.len() == 2);
    assert!(draws[0].1.len() == 16);
    assert!(draws[1].1.len() == 24);
    assert!(draws[0].0 != draws[1].0);

    assert!(context.image_size(draws[1].0) == Ok((1024, 512)));
    assert!(context.backend().texture_count() == 2);
}

#[test]
fn end_frame_releases_smaller_atlases() {
    let mut context = text_context(256);

    context.text(0.0, 20.0, "0123456789");
    context.end_frame();

    assert!(context.backend().texture_count() == 1);

    context.begin_frame(800, 600, 1.0);
    context.text(0.0, 20.0, "a");

    let draws = text_draws(&context);
    assert!(context.image_size(draws[0].0) == Ok((1024, 512)));
}

#[test]
fn text_is_truncated_when_atlases_run_out() {
    let mut context = text_context(256);
    let text        = "x".repeat(100);

    // 4 + 8 + 16 + 32 glyphs fit in the four atlas textures
    let next_x      = context.text(0.0, 20.0, &text);
    let draws       = text_draws(&context);
    let num_glyphs  = draws.iter().map(|(_, vertices)| vertices.len() / 4).sum::<usize>();

    assert!(draws.len() == MAX_FONT_IMAGES);
    assert!(num_glyphs == 60);
    assert!(next_x == 600.0);
}

#[test]
fn text_bounds_cover_line() {
    let mut context = text_context(16);

    let (advance, bounds) = context.text_bounds(10.0, 50.0, "abcd");

    assert!(advance == 40.0);
    assert!(bounds == Some([10.0, 30.0, 50.0, 55.0]));
}

#[test]
fn empty_text_has_no_bounds() {
    let mut context = text_context(16);

    assert!(context.text_bounds(10.0, 50.0, "") == (0.0, None));
}

#[test]
fn text_metrics_are_in_local_coordinates() {
    let mut context = text_context(16);

    context.scale(2.0, 2.0);
    let metrics = context.text_metrics();

    assert!(metrics.ascender == 20.0);
    assert!(metrics.descender == -5.0);
    assert!(metrics.line_height == 25.0);
}

#[test]
fn glyph_positions_cover_each_character() {
    let mut context = text_context(16);

    let positions = context.text_glyph_positions(10.0, 50.0, "héllo");

    assert!(positions.len() == 5);
    assert!(positions[2].index == 3);
    assert!(positions[1].x == 20.0);
    assert!(positions[1].min_x == 20.0);
    assert!(positions[1].max_x == 30.0);
}

#[test]
#[should_panic]
fn negative_font_size_is_invalid() {
    let mut context = text_context(16);

    context.set_font_size(-1.0);
}

#[test]
fn text_style_is_saved_with_state() {
    let mut context = text_context(16);

    context.save();
    context.set_font_size(40.0);
    context.set_text_letter_spacing(2.0);
    context.set_text_align(TextAlign { horizontal: HorizontalAlign::Center, vertical: VerticalAlign::Middle });
    context.restore();

    assert!(context.font_size() == 20.0);
    assert!(context.text_letter_spacing() == 0.0);
    assert!(context.text_align() == TextAlign::default());
}

#[test]
fn text_breaks_into_rows_at_words() {
    let mut context = text_context(16);

    let rows = context.text_break_lines("hello world", 60.0);

    assert!(rows.len() == 2);
    assert!(rows[0].text("hello world") == "hello");
    assert!(rows[1].text("hello world") == "world");
    assert!(rows[0].next == 6);
    assert!(rows[0].width == 50.0);
    assert!(rows[1].width == 50.0);
}

#[test]
fn text_rows_are_measured_in_local_coordinates() {
    let mut context = text_context(16);

    context.scale(2.0, 2.0);
    let rows = context.text_break_lines("hello world", 60.0);

    assert!(rows.len() == 2);
    assert!(rows[0].width == 50.0);
}

#[test]
fn text_break_lines_without_font_is_empty() {
    let mut context = Context::new(ActionRecorder::new(true), ContextOptions::default());
    context.begin_frame(100, 100, 1.0);

    assert!(context.text_break_lines("hello world", 60.0).is_empty());
    assert!(context.text_box_bounds(0.0, 0.0, 60.0, "hello world").is_none());
}

#[test]
fn text_box_draws_one_run_per_row() {
    let mut context = text_context(16);

    context.text_box(10.0, 50.0, 60.0, "hello world");

    let draws = text_draws(&context);

    // Rows are a line height (25) apart
    assert!(draws.len() == 2);
    assert!(draws[0].1.len() == 20);
    assert!(draws[0].1[1].pos == [10.0, 30.0]);
    assert!(draws[1].1[1].pos == [10.0, 55.0]);
}

#[test]
fn text_box_aligns_rows_within_box() {
    let mut context = text_context(16);

    context.set_text_align(TextAlign { horizontal: HorizontalAlign::Center, vertical: VerticalAlign::Baseline });
    context.text_box(10.0, 50.0, 60.0, "hello world");

    let draws = text_draws(&context);
    assert!(draws[0].1[1].pos == [15.0, 30.0]);
    assert!(draws[1].1[1].pos == [15.0, 55.0]);

    assert!(context.text_align().horizontal == HorizontalAlign::Center);
}

#[test]
fn text_box_rows_use_line_height() {
    let mut context = text_context(16);

    context.set_text_line_height(2.0);
    context.text_box(10.0, 50.0, 60.0, "hello world");

    let draws = text_draws(&context);
    assert!(draws[1].1[1].pos == [10.0, 80.0]);
}

#[test]
fn text_box_bounds_cover_every_row() {
    let mut context = text_context(16);

    assert!(context.text_box_bounds(10.0, 50.0, 60.0, "hello world") == Some([10.0, 30.0, 60.0, 80.0]));

    context.set_text_align(TextAlign { horizontal: HorizontalAlign::Right, vertical: VerticalAlign::Baseline });
    assert!(context.text_box_bounds(10.0, 50.0, 60.0, "hello world") == Some([10.0, 30.0, 70.0, 80.0]));
}
