use super::path::*;
use super::text::*;
use super::state::*;
use super::paint::*;
use super::color::*;
use super::stats::*;
use super::error::*;
use super::render::*;
use super::options::*;
use super::transform2d::*;

///
/// A drawing context records paths and converts them into triangles for a render backend
///
/// Drawing calls update the current render state and record path commands: `fill()` and `stroke()`
/// flatten the recorded path (once per path, until `begin_path()` is called again) and hand the
/// tessellated geometry to the backend.
///
pub struct Context<Backend: RenderBackend> {
    /// Where the tessellated geometry is sent
    backend: Backend,

    /// The options this context was created with
    options: ContextOptions,

    /// The render states (the top of the stack is the current state)
    states: StateStack,

    /// The commands for the current path
    recorder: PathRecorder,

    /// The flattened version of the current path
    cache: PathCache,

    /// Tessellation tolerance for curves
    tess_tol: f32,

    /// Points closer together than this are merged
    dist_tol: f32,

    /// Width of the antialiasing fringe
    fringe_width: f32,

    device_pixel_ratio: f32,

    /// Lays out and rasterizes text, if text rendering is available
    font_stash: Option<Box<dyn FontStash>>,

    /// Textures used for the glyph atlas
    font_atlas: FontAtlas,

    /// Counters for the current frame
    stats: FrameStats
}

impl<Backend: RenderBackend> Context<Backend> {
    ///
    /// Creates a new drawing context that renders to the specified backend
    ///
    pub fn new(backend: Backend, options: ContextOptions) -> Context<Backend> {
        let mut backend = backend;

        backend.create();
        let font_atlas = FontAtlas::new(&mut backend);

        let mut context = Context {
            backend:            backend,
            options:            options,
            states:             StateStack::new(),
            recorder:           PathRecorder::new(),
            cache:              PathCache::new(),
            tess_tol:           0.25,
            dist_tol:           0.01,
            fringe_width:       1.0,
            device_pixel_ratio: 1.0,
            font_stash:         None,
            font_atlas:         font_atlas,
            stats:              FrameStats::default()
        };

        context.states.reset();
        context.set_device_pixel_ratio(options.device_pixel_ratio);

        context
    }

    ///
    /// Supplies the font stash used to render text
    ///
    pub fn set_font_stash(&mut self, font_stash: Box<dyn FontStash>) {
        let mut font_stash = font_stash;

        // The font stash's atlas should match the texture it's going to be uploaded to
        if let Ok((width, height)) = self.backend.texture_size(self.font_atlas.current_image()) {
            font_stash.reset_atlas(width, height);
        }

        self.font_stash = Some(font_stash);
    }

    ///
    /// The backend this context is rendering to
    ///
    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    ///
    /// The backend this context is rendering to
    ///
    pub fn backend_mut(&mut self) -> &mut Backend {
        &mut self.backend
    }

    pub fn options(&self) -> &ContextOptions {
        &self.options
    }

    ///
    /// Counters for the current frame
    ///
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    ///
    /// The flattened version of the current path (empty until the path is filled or stroked)
    ///
    pub fn path_cache(&self) -> &PathCache {
        &self.cache
    }

    ///
    /// Writes the path cache to the debug log
    ///
    pub fn dump_path_cache(&self) {
        self.cache.dump();
    }

    ///
    /// Sets the tolerances for a particular ratio of device pixels to logical pixels
    ///
    fn set_device_pixel_ratio(&mut self, ratio: f32) {
        self.tess_tol           = 0.25 / ratio;
        self.dist_tol           = 0.01 / ratio;
        self.fringe_width       = 1.0 / ratio;
        self.device_pixel_ratio = ratio;
    }

    pub fn device_pixel_ratio(&self) -> f32 { self.device_pixel_ratio }
    pub fn tessellation_tolerance(&self) -> f32 { self.tess_tol }
    pub fn fringe_width(&self) -> f32 { self.fringe_width }

    ///
    /// True if fills and strokes should be generated with an antialiasing fringe
    ///
    fn antialias(&self) -> bool {
        self.options.antialias && self.backend.edge_antialias()
    }

    // ---- Frames ----

    ///
    /// Starts a new frame, resetting the render state
    ///
    pub fn begin_frame(&mut self, window_width: usize, window_height: usize, device_pixel_ratio: f32) {
        self.states.reset_stack();

        self.set_device_pixel_ratio(device_pixel_ratio);
        self.backend.viewport(window_width, window_height);

        self.stats = FrameStats::default();
    }

    ///
    /// Discards the draw calls made since the frame began
    ///
    pub fn cancel_frame(&mut self) {
        self.backend.cancel();
    }

    ///
    /// Submits the frame to the backend
    ///
    pub fn end_frame(&mut self) {
        self.backend.flush();
        self.font_atlas.compact(&mut self.backend);
    }

    // ---- State ----

    ///
    /// Pushes a copy of the current render state onto the state stack
    ///
    pub fn save(&mut self) {
        self.states.save();
    }

    ///
    /// Pops the current render state from the state stack
    ///
    pub fn restore(&mut self) {
        self.states.restore();
    }

    ///
    /// Resets the current render state to its default values
    ///
    pub fn reset(&mut self) {
        self.states.reset();
    }

    ///
    /// Saves the render state, performs some actions, then restores the render state
    ///
    /// The state is restored even if the actions panic.
    ///
    pub fn block<TResult, TFn: FnOnce(&mut Context<Backend>) -> TResult>(&mut self, block: TFn) -> TResult {
        let pushed      = self.states.save();
        let mut guard   = BlockGuard { context: self, pushed: pushed };

        block(&mut *guard.context)
    }

    ///
    /// The current render state
    ///
    pub fn state(&self) -> &RenderState {
        self.states.current()
    }

    ///
    /// Number of states on the state stack
    ///
    pub fn state_depth(&self) -> usize {
        self.states.depth()
    }

    pub fn set_stroke_width(&mut self, width: f32) { self.states.current_mut().stroke_width = width; }
    pub fn stroke_width(&self) -> f32 { self.states.current().stroke_width }

    ///
    /// Sets the ratio of miter length to half the stroke width beyond which corners are bevelled
    ///
    pub fn set_miter_limit(&mut self, limit: f32) { self.states.current_mut().miter_limit = limit; }
    pub fn miter_limit(&self) -> f32 { self.states.current().miter_limit }

    pub fn set_line_cap(&mut self, cap: LineCap) { self.states.current_mut().line_cap = cap; }
    pub fn line_cap(&self) -> LineCap { self.states.current().line_cap }

    pub fn set_line_join(&mut self, join: LineJoin) { self.states.current_mut().line_join = join; }
    pub fn line_join(&self) -> LineJoin { self.states.current().line_join }

    ///
    /// Sets the alpha value that's applied to everything that's drawn
    ///
    pub fn set_global_alpha(&mut self, alpha: f32) { self.states.current_mut().alpha = alpha; }
    pub fn global_alpha(&self) -> f32 { self.states.current().alpha }

    // ---- Transforms ----

    ///
    /// Applies a transform in the current coordinate space
    ///
    pub fn set_transform(&mut self, transform: Transform2D) {
        let state       = self.states.current_mut();
        state.transform = state.transform.premultiply(&transform);
    }

    pub fn reset_transform(&mut self) {
        self.states.current_mut().transform = Transform2D::identity();
    }

    pub fn translate(&mut self, x: f32, y: f32) {
        self.set_transform(Transform2D::translate(x, y));
    }

    ///
    /// Rotates the coordinate space (angle in radians)
    ///
    pub fn rotate(&mut self, angle: f32) {
        self.set_transform(Transform2D::rotate(angle));
    }

    pub fn skew_x(&mut self, angle: f32) {
        self.set_transform(Transform2D::skew_x(angle));
    }

    pub fn skew_y(&mut self, angle: f32) {
        self.set_transform(Transform2D::skew_y(angle));
    }

    pub fn scale(&mut self, x: f32, y: f32) {
        self.set_transform(Transform2D::scale(x, y));
    }

    ///
    /// The current transformation matrix
    ///
    pub fn current_transform(&self) -> Transform2D {
        self.states.current().transform
    }

    // ---- Paints ----

    pub fn set_stroke_color(&mut self, color: Color) {
        self.states.current_mut().stroke = Paint::color(color);
    }

    ///
    /// Sets the stroke paint. The paint is fixed in place using the current transform.
    ///
    pub fn set_stroke_paint(&mut self, paint: Paint) {
        let state       = self.states.current_mut();
        state.stroke    = paint.transformed(&state.transform);
    }

    pub fn set_fill_color(&mut self, color: Color) {
        self.states.current_mut().fill = Paint::color(color);
    }

    ///
    /// Sets the fill paint. The paint is fixed in place using the current transform.
    ///
    pub fn set_fill_paint(&mut self, paint: Paint) {
        let state   = self.states.current_mut();
        state.fill  = paint.transformed(&state.transform);
    }

    // ---- Images ----

    ///
    /// Creates an image from RGBA pixel data, returning `ImageId::NONE` if it couldn't be created
    ///
    pub fn create_image_rgba(&mut self, width: usize, height: usize, flags: ImageFlags, data: &[u8]) -> ImageId {
        let image = self.backend.create_texture(TextureKind::Rgba, width, height, flags, Some(data));

        if !image.is_valid() {
            warn!("Could not create {}x{} RGBA image", width, height);
        }

        image
    }

    ///
    /// Replaces the pixels of an image
    ///
    pub fn update_image(&mut self, image: ImageId, data: &[u8]) -> Result<(), VgError> {
        let (width, height) = self.backend.texture_size(image)?;
        self.backend.update_texture(image, 0, 0, width, height, data)
    }

    pub fn image_size(&self, image: ImageId) -> Result<(usize, usize), VgError> {
        self.backend.texture_size(image)
    }

    pub fn delete_image(&mut self, image: ImageId) {
        self.backend.delete_texture(image);
    }

    // ---- Scissoring ----

    ///
    /// Sets the scissor rectangle (in the current coordinate space)
    ///
    pub fn scissor(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let state   = self.states.current_mut();
        let w       = w.max(0.0);
        let h       = h.max(0.0);

        state.scissor = Scissor {
            transform:  Transform2D::translate(x + w*0.5, y + h*0.5).multiply(&state.transform),
            extent:     Some([w*0.5, h*0.5])
        };
    }

    ///
    /// Intersects the scissor rectangle with a new rectangle (in the current coordinate space)
    ///
    /// The existing scissor rectangle is converted to the current coordinate space and its axis-aligned
    /// bounding box there is intersected with the new rectangle, so the result is always a rectangle.
    ///
    pub fn intersect_scissor(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let state = *self.states.current();

        let [ex, ey] = match state.scissor.extent {
            Some(extent)    => extent,
            None            => { self.scissor(x, y, w, h); return; }
        };

        let inverse         = state.transform.invert().unwrap_or_else(Transform2D::identity);
        let Transform2D(p)  = state.scissor.transform.multiply(&inverse);
        let tex             = ex*p[0].abs() + ey*p[2].abs();
        let tey             = ex*p[1].abs() + ey*p[3].abs();

        let (x, y, w, h)    = intersect_rects((p[4]-tex, p[5]-tey, tex*2.0, tey*2.0), (x, y, w, h));
        self.scissor(x, y, w, h);
    }

    ///
    /// Disables scissoring
    ///
    pub fn reset_scissor(&mut self) {
        self.states.current_mut().scissor = Scissor::default();
    }

    // ---- Paths ----

    ///
    /// Clears the current path
    ///
    pub fn begin_path(&mut self) {
        self.recorder.clear();
        self.cache.clear();
    }

    ///
    /// Fills the current path with the fill paint
    ///
    pub fn fill(&mut self) {
        let state       = *self.states.current();
        let antialias   = self.antialias();

        flatten(&mut self.cache, self.recorder.commands(), self.tess_tol, self.dist_tol);
        FillTessellator::new(self.fringe_width, antialias).tessellate(&mut self.cache);

        let mut paint = state.fill;
        paint.multiply_alpha(state.alpha);

        let paths = self.cache.path_vertices();
        self.backend.fill(&paint, &state.scissor, self.fringe_width, &self.cache.bounds, &paths);

        for path in self.cache.paths.iter() {
            self.stats.fill_triangles   += path.fill.len().saturating_sub(2);
            self.stats.stroke_triangles += path.stroke.len().saturating_sub(2);
            self.stats.draw_calls       += 2;
        }

        if self.options.debug {
            self.cache.dump();
        }
    }

    ///
    /// Strokes the current path with the stroke paint
    ///
    /// Strokes thinner than the fringe are drawn at the fringe width with their alpha reduced to match their
    /// coverage. A path that has collapsed to a single point can't be stroked: nothing is drawn and an error
    /// is returned.
    ///
    pub fn stroke(&mut self) -> Result<(), VgError> {
        let state               = *self.states.current();
        let antialias           = self.antialias();
        let scale               = state.transform.average_scale();
        let mut stroke_width    = (state.stroke_width * scale).max(0.0).min(200.0);
        let mut paint           = state.stroke;

        if stroke_width < self.fringe_width {
            // Coverage is proportional to area, so the alpha is scaled by the square of the width
            let alpha = (stroke_width / self.fringe_width).max(0.0).min(1.0);
            paint.multiply_alpha(alpha*alpha);
            stroke_width = self.fringe_width;
        }

        paint.multiply_alpha(state.alpha);

        flatten(&mut self.cache, self.recorder.commands(), self.tess_tol, self.dist_tol);

        let tessellator = StrokeTessellator {
            half_width:     if antialias { stroke_width*0.5 + self.fringe_width*0.5 } else { stroke_width*0.5 },
            fringe_width:   if antialias { self.fringe_width } else { 0.0 },
            line_cap:       state.line_cap,
            line_join:      state.line_join,
            miter_limit:    state.miter_limit,
            tess_tol:       self.tess_tol
        };

        if let Err(err) = tessellator.tessellate(&mut self.cache) {
            warn!("Stroke rejected: {}", err);
            return Err(err.into());
        }

        let paths = self.cache.path_vertices();
        self.backend.stroke(&paint, &state.scissor, self.fringe_width, stroke_width, &paths);

        for path in self.cache.paths.iter() {
            self.stats.stroke_triangles += path.stroke.len().saturating_sub(2);
            self.stats.draw_calls       += 2;
        }

        if self.options.debug {
            self.cache.dump();
        }

        Ok(())
    }

    // ---- Text ----

    ///
    /// Loads a font from memory
    ///
    pub fn create_font(&mut self, name: &str, data: Vec<u8>) -> Option<FontId> {
        self.font_stash.as_mut().and_then(|font_stash| font_stash.add_font(name, data))
    }

    ///
    /// Finds a font that has been loaded
    ///
    pub fn find_font(&self, name: &str) -> Option<FontId> {
        self.font_stash.as_ref().and_then(|font_stash| font_stash.font_by_name(name))
    }

    ///
    /// Sets the font size
    ///
    /// # Panics
    ///
    /// Font sizes can't be negative.
    ///
    pub fn set_font_size(&mut self, size: f32) {
        assert!(size >= 0.0, "negative font size ({}) is invalid", size);
        self.states.current_mut().font_size = size;
    }

    pub fn font_size(&self) -> f32 { self.states.current().font_size }

    pub fn set_font_blur(&mut self, blur: f32) { self.states.current_mut().font_blur = blur; }
    pub fn font_blur(&self) -> f32 { self.states.current().font_blur }

    pub fn set_text_letter_spacing(&mut self, spacing: f32) { self.states.current_mut().letter_spacing = spacing; }
    pub fn text_letter_spacing(&self) -> f32 { self.states.current().letter_spacing }

    pub fn set_text_line_height(&mut self, line_height: f32) { self.states.current_mut().line_height = line_height; }
    pub fn text_line_height(&self) -> f32 { self.states.current().line_height }

    pub fn set_text_align(&mut self, align: TextAlign) { self.states.current_mut().text_align = align; }
    pub fn text_align(&self) -> TextAlign { self.states.current().text_align }

    pub fn set_font_face_id(&mut self, font: FontId) { self.states.current_mut().font_id = Some(font); }
    pub fn font_face_id(&self) -> Option<FontId> { self.states.current().font_id }

    ///
    /// Sets the font by name (the font is cleared if no font with this name has been loaded)
    ///
    pub fn set_font_face(&mut self, name: &str) {
        let font = self.find_font(name);
        self.states.current_mut().font_id = font;
    }

    ///
    /// The name of the current font
    ///
    pub fn font_face(&self) -> Option<String> {
        let font = self.states.current().font_id?;
        self.font_stash.as_ref().and_then(|font_stash| font_stash.font_name(font))
    }

    ///
    /// Draws a string of text, returning the x position where the next character should be drawn
    ///
    pub fn text(&mut self, x: f32, y: f32, text: &str) -> f32 {
        self.with_font_stash(0.0, |context, font_stash, scale| {
            let inv_scale       = 1.0 / scale;
            let transform       = context.states.current().transform;
            let glyphs          = font_stash.glyphs(x*scale, y*scale, text);
            let mut vertices    = Vec::with_capacity(glyphs.len() * 4);
            let mut next_x      = x*scale;

            for glyph in glyphs.iter() {
                let quad = match font_stash.rasterize(glyph) {
                    Some(quad)  => quad,
                    None        => {
                        // The atlas is full: draw the glyphs already in it, then move on to a new atlas
                        Self::flush_text_texture(&mut context.backend, &context.font_atlas, font_stash);
                        context.render_text(&vertices);
                        vertices.clear();

                        if !Self::next_text_atlas(&mut context.backend, &mut context.font_atlas, font_stash) {
                            warn!("Glyph atlas is full: text truncated at character {}", glyph.index);
                            break;
                        }

                        match font_stash.rasterize(glyph) {
                            Some(quad)  => quad,
                            None        => {
                                warn!("Glyph for {:?} does not fit in an empty atlas: text truncated", glyph.character);
                                break;
                            }
                        }
                    }
                };

                next_x = glyph.next_x;

                let (x0, y0) = transform.transform_point(quad.x0*inv_scale, quad.y0*inv_scale);
                let (x1, y1) = transform.transform_point(quad.x1*inv_scale, quad.y0*inv_scale);
                let (x2, y2) = transform.transform_point(quad.x1*inv_scale, quad.y1*inv_scale);
                let (x3, y3) = transform.transform_point(quad.x0*inv_scale, quad.y1*inv_scale);

                vertices.push(Vertex2D::new(x1, y1, quad.s1, quad.t0));
                vertices.push(Vertex2D::new(x0, y0, quad.s0, quad.t0));
                vertices.push(Vertex2D::new(x2, y2, quad.s1, quad.t1));
                vertices.push(Vertex2D::new(x3, y3, quad.s0, quad.t1));
            }

            Self::flush_text_texture(&mut context.backend, &context.font_atlas, font_stash);
            context.render_text(&vertices);

            next_x * inv_scale
        })
    }

    ///
    /// Measures a string of text, returning its advance and its bounds as `[min_x, min_y, max_x, max_y]`
    ///
    pub fn text_bounds(&mut self, x: f32, y: f32, text: &str) -> (f32, Option<[f32; 4]>) {
        self.with_font_stash((0.0, None), |_context, font_stash, scale| {
            let inv_scale           = 1.0 / scale;
            let (advance, bounds)   = font_stash.text_bounds(x*scale, y*scale, text);

            let bounds = bounds.map(|bounds| {
                let (min_y, max_y) = font_stash.line_bounds(y*scale);
                [bounds[0]*inv_scale, min_y*inv_scale, bounds[2]*inv_scale, max_y*inv_scale]
            });

            (advance * inv_scale, bounds)
        })
    }

    ///
    /// The vertical metrics of the current font at the current size
    ///
    pub fn text_metrics(&mut self) -> VerticalMetrics {
        self.with_font_stash(VerticalMetrics::default(), |_context, font_stash, scale| {
            let inv_scale   = 1.0 / scale;
            let metrics     = font_stash.vertical_metrics();

            VerticalMetrics {
                ascender:       metrics.ascender * inv_scale,
                descender:      metrics.descender * inv_scale,
                line_height:    metrics.line_height * inv_scale
            }
        })
    }

    ///
    /// Works out the horizontal position of every glyph in a string of text
    ///
    pub fn text_glyph_positions(&mut self, x: f32, y: f32, text: &str) -> Vec<GlyphExtent> {
        self.with_font_stash(vec![], |context, font_stash, scale| {
            let inv_scale   = 1.0 / scale;
            let glyphs      = font_stash.glyphs(x*scale, y*scale, text);

            glyphs.iter()
                .map(|glyph| {
                    let quad = font_stash.rasterize(glyph)
                        .or_else(|| {
                            if Self::next_text_atlas(&mut context.backend, &mut context.font_atlas, font_stash) {
                                font_stash.rasterize(glyph)
                            } else {
                                None
                            }
                        })
                        .unwrap_or(GlyphQuad { x0: glyph.x, x1: glyph.next_x, ..GlyphQuad::default() });

                    GlyphExtent {
                        index:  glyph.index,
                        x:      glyph.x * inv_scale,
                        min_x:  f32::min(glyph.x, quad.x0) * inv_scale,
                        max_x:  f32::max(glyph.next_x, quad.x1) * inv_scale
                    }
                })
                .collect()
        })
    }

    ///
    /// Breaks a string into rows that fit within `break_row_width`
    ///
    /// Rows are broken at word boundaries and new lines. Widths are in local coordinates.
    ///
    pub fn text_break_lines(&mut self, text: &str, break_row_width: f32) -> Vec<TextRow> {
        self.with_font_stash(vec![], |_context, font_stash, scale| {
            let inv_scale   = 1.0 / scale;
            let glyphs      = font_stash.glyphs(0.0, 0.0, text);

            break_lines(text.len(), &glyphs, break_row_width * scale).into_iter()
                .map(|row| TextRow { width: row.width * inv_scale, ..row })
                .collect()
        })
    }

    ///
    /// Draws text wrapped to rows of the specified width
    ///
    /// The horizontal alignment positions each row within the box. Rows are spaced by the font's line
    /// height multiplied by the text line height.
    ///
    pub fn text_box(&mut self, x: f32, y: f32, break_row_width: f32, text: &str) {
        if self.font_stash.is_none() || self.font_face_id().is_none() {
            return;
        }

        let align = self.text_align();

        self.with_left_aligned_text(|context| {
            let line_height = context.text_metrics().line_height * context.text_line_height();
            let mut row_y   = y;

            for row in context.text_break_lines(text, break_row_width) {
                let dx = Self::row_offset(align.horizontal, break_row_width, row.width);

                context.text(x + dx, row_y, row.text(text));
                row_y += line_height;
            }
        })
    }

    ///
    /// Measures the text drawn by `text_box`, returning `[min_x, min_y, max_x, max_y]`
    ///
    pub fn text_box_bounds(&mut self, x: f32, y: f32, break_row_width: f32, text: &str) -> Option<[f32; 4]> {
        if self.font_stash.is_none() || self.font_face_id().is_none() {
            return None;
        }

        let align = self.text_align();

        self.with_left_aligned_text(|context| {
            let line_height             = context.text_metrics().line_height * context.text_line_height();
            let (row_min_y, row_max_y)  = context.with_font_stash((0.0, 0.0), |_context, font_stash, scale| {
                let (min_y, max_y) = font_stash.line_bounds(0.0);
                (min_y / scale, max_y / scale)
            });

            let mut bounds  = [x, y, x, y];
            let mut row_y   = y;

            for row in context.text_break_lines(text, break_row_width) {
                let dx = Self::row_offset(align.horizontal, break_row_width, row.width);

                bounds[0] = bounds[0].min(x + dx);
                bounds[1] = bounds[1].min(row_y + row_min_y);
                bounds[2] = bounds[2].max(x + dx + row.width);
                bounds[3] = bounds[3].max(row_y + row_max_y);

                row_y += line_height;
            }

            Some(bounds)
        })
    }

    ///
    /// Runs an action with the text temporarily aligned to the left (keeping the vertical alignment)
    ///
    fn with_left_aligned_text<TResult, TFn: FnOnce(&mut Context<Backend>) -> TResult>(&mut self, action: TFn) -> TResult {
        let align = self.text_align();

        self.set_text_align(TextAlign { horizontal: HorizontalAlign::Left, ..align });
        let result = action(self);
        self.set_text_align(align);

        result
    }

    ///
    /// Offset of a row of text within a text box
    ///
    fn row_offset(align: HorizontalAlign, break_row_width: f32, row_width: f32) -> f32 {
        match align {
            HorizontalAlign::Left   => 0.0,
            HorizontalAlign::Center => break_row_width*0.5 - row_width*0.5,
            HorizontalAlign::Right  => break_row_width - row_width
        }
    }

    ///
    /// Runs an action with the font stash set up for the current text style
    ///
    /// The action receives the scale factor from the local coordinate space to the font stash's coordinates. If
    /// there's no font stash or no font selected, the default value is returned instead.
    ///
    fn with_font_stash<TResult, TFn>(&mut self, default: TResult, action: TFn) -> TResult
    where TFn: FnOnce(&mut Context<Backend>, &mut dyn FontStash, f32) -> TResult {
        let state = *self.states.current();

        let font = match state.font_id {
            Some(font)  => font,
            None        => { return default; }
        };

        let mut font_stash = match self.font_stash.take() {
            Some(font_stash)    => font_stash,
            None                => { return default; }
        };

        let scale = state.font_scale() * self.device_pixel_ratio;

        font_stash.set_style(&TextStyle {
            size:       state.font_size * scale,
            spacing:    state.letter_spacing * scale,
            blur:       state.font_blur * scale,
            align:      state.text_align,
            font:       font
        });

        let result = action(self, &mut *font_stash, scale);

        self.font_stash = Some(font_stash);
        result
    }

    ///
    /// Uploads the part of the glyph atlas that has changed to the current atlas texture
    ///
    fn flush_text_texture(backend: &mut Backend, font_atlas: &FontAtlas, font_stash: &mut dyn FontStash) {
        let dirty = match font_stash.validate_texture() {
            Some(dirty) => dirty,
            None        => { return; }
        };

        let image = font_atlas.current_image();
        if image.is_valid() {
            let (data, _, _) = font_stash.texture_data();

            if let Err(err) = backend.update_texture(image, dirty.x, dirty.y, dirty.width, dirty.height, data) {
                warn!("Could not upload glyph atlas: {}", err);
            }
        }
    }

    ///
    /// Moves on to a new atlas texture once the current one is full
    ///
    fn next_text_atlas(backend: &mut Backend, font_atlas: &mut FontAtlas, font_stash: &mut dyn FontStash) -> bool {
        Self::flush_text_texture(backend, font_atlas, font_stash);

        match font_atlas.next_atlas(backend) {
            Some((width, height))   => {
                font_stash.reset_atlas(width, height);
                true
            }

            None                    => false
        }
    }

    ///
    /// Sends the vertices for some glyphs to the backend (each glyph is a 4-vertex triangle strip)
    ///
    fn render_text(&mut self, vertices: &[Vertex2D]) {
        if vertices.is_empty() {
            return;
        }

        let state       = self.states.current();
        let mut paint   = state.fill;

        paint.image = Some(self.font_atlas.current_image());
        paint.multiply_alpha(state.alpha);

        self.backend.triangles(&paint, &state.scissor, vertices);

        self.stats.draw_calls       += 1;
        self.stats.text_triangles   += (vertices.len() / 4) * 2;
    }
}

///
/// Paths are recorded in the current coordinate space
///
impl<Backend: RenderBackend> PathBuilder for Context<Backend> {
    fn add_path_command(&mut self, command: PathCommand) {
        let transform = self.states.current().transform;
        self.recorder.record(command, &transform);
    }

    fn current_point(&self) -> Option<(f32, f32)> {
        self.recorder.current_point()
    }

    fn has_path_commands(&self) -> bool {
        !self.recorder.is_empty()
    }

    fn distance_tolerance(&self) -> f32 {
        self.dist_tol
    }
}

impl<Backend: RenderBackend> Drop for Context<Backend> {
    fn drop(&mut self) {
        self.font_atlas.delete(&mut self.backend);
        self.backend.delete();
    }
}

///
/// Restores the state of a context when dropped
///
struct BlockGuard<'a, Backend: RenderBackend> {
    context:    &'a mut Context<Backend>,
    pushed:     bool
}

impl<'a, Backend: RenderBackend> Drop for BlockGuard<'a, Backend> {
    fn drop(&mut self) {
        if self.pushed {
            self.context.states.restore();
        }
    }
}

///
/// Intersection of two rectangles, as `(x, y, width, height)`
///
fn intersect_rects(a: (f32, f32, f32, f32), b: (f32, f32, f32, f32)) -> (f32, f32, f32, f32) {
    let (ax, ay, aw, ah) = a;
    let (bx, by, bw, bh) = b;

    let min_x = ax.max(bx);
    let min_y = ay.max(by);
    let max_x = (ax + aw).min(bx + bw);
    let max_y = (ay + ah).min(by + bh);

    (min_x, min_y, (max_x - min_x).max(0.0), (max_y - min_y).max(0.0))
}
