use super::vertex::*;
use crate::error::*;
use crate::paint::*;
use crate::state::*;
use crate::path::Bounds;

use bitflags::bitflags;

///
/// Identifies a texture created by a render backend
///
/// `ImageId::NONE` (0) is never a valid texture: it's what backends return when texture creation fails.
///
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord)]
pub struct ImageId(pub u32);

impl ImageId {
    /// The image ID returned when an image could not be created
    pub const NONE: ImageId = ImageId(0);

    ///
    /// True if this is not the 'no image' sentinel
    ///
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.0 != 0
    }
}

///
/// Pixel format of a texture
///
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum TextureKind {
    /// 8-bit alpha (used for the glyph atlas)
    Alpha,

    /// 8-bit RGBA
    Rgba
}

bitflags! {
    ///
    /// Options for how an image is sampled
    ///
    #[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
    pub struct ImageFlags: u32 {
        /// Generate mipmaps when the image is created
        const GENERATE_MIPMAPS  = 1 << 0;

        /// Repeat the image horizontally
        const REPEAT_X          = 1 << 1;

        /// Repeat the image vertically
        const REPEAT_Y          = 1 << 2;

        /// Flip the image vertically when rendering
        const FLIP_Y            = 1 << 3;

        /// The image data has premultiplied alpha
        const PREMULTIPLIED     = 1 << 4;
    }
}

///
/// The tessellated geometry for one sub-path, as passed to a render backend
///
/// `fill` is a triangle fan covering the interior, `stroke` is a triangle strip (the antialiasing fringe
/// for fills, or the whole stroke for strokes).
///
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct PathVertices<'a> {
    pub fill:   &'a [Vertex2D],
    pub stroke: &'a [Vertex2D],
    pub closed: bool,
    pub convex: bool
}

///
/// Trait implemented by renderers that can draw the geometry generated by a drawing context
///
/// Every call is synchronous. Draw calls arrive in the order they're issued and should be
/// submitted in that order when `flush()` is called.
///
pub trait RenderBackend {
    ///
    /// Called once when the drawing context is created
    ///
    fn create(&mut self);

    ///
    /// Called once when the drawing context is destroyed
    ///
    fn delete(&mut self);

    ///
    /// Sets the size of the render target for the frame that's starting
    ///
    fn viewport(&mut self, width: usize, height: usize);

    ///
    /// Discards the draw calls for the current frame
    ///
    fn cancel(&mut self);

    ///
    /// Submits all the draw calls for the current frame
    ///
    fn flush(&mut self);

    ///
    /// Creates a texture, returning `ImageId::NONE` if it could not be created
    ///
    fn create_texture(&mut self, kind: TextureKind, width: usize, height: usize, flags: ImageFlags, data: Option<&[u8]>) -> ImageId;

    ///
    /// Frees a texture
    ///
    fn delete_texture(&mut self, image: ImageId);

    ///
    /// Replaces a region of a texture. `data` holds the pixels for the whole texture.
    ///
    fn update_texture(&mut self, image: ImageId, x: usize, y: usize, width: usize, height: usize, data: &[u8]) -> Result<(), VgError>;

    ///
    /// Retrieves the size of a texture
    ///
    fn texture_size(&self, image: ImageId) -> Result<(usize, usize), VgError>;

    ///
    /// Draws filled paths
    ///
    fn fill(&mut self, paint: &Paint, scissor: &Scissor, fringe_width: f32, bounds: &Bounds, paths: &[PathVertices<'_>]);

    ///
    /// Draws stroked paths
    ///
    fn stroke(&mut self, paint: &Paint, scissor: &Scissor, fringe_width: f32, stroke_width: f32, paths: &[PathVertices<'_>]);

    ///
    /// Draws a set of textured quads (4 vertices per quad, in triangle strip order)
    ///
    fn triangles(&mut self, paint: &Paint, scissor: &Scissor, vertices: &[Vertex2D]);

    ///
    /// True if paths should be generated with antialiasing fringes
    ///
    fn edge_antialias(&self) -> bool;
}

///
/// A context can render to a backend it doesn't own, so the backend can be inspected after the context is gone
///
impl<'a, Backend: RenderBackend> RenderBackend for &'a mut Backend {
    fn create(&mut self) { (**self).create() }
    fn delete(&mut self) { (**self).delete() }
    fn viewport(&mut self, width: usize, height: usize) { (**self).viewport(width, height) }
    fn cancel(&mut self) { (**self).cancel() }
    fn flush(&mut self) { (**self).flush() }

    fn create_texture(&mut self, kind: TextureKind, width: usize, height: usize, flags: ImageFlags, data: Option<&[u8]>) -> ImageId {
        (**self).create_texture(kind, width, height, flags, data)
    }

    fn delete_texture(&mut self, image: ImageId) {
        (**self).delete_texture(image)
    }

    fn update_texture(&mut self, image: ImageId, x: usize, y: usize, width: usize, height: usize, data: &[u8]) -> Result<(), VgError> {
        (**self).update_texture(image, x, y, width, height, data)
    }

    fn texture_size(&self, image: ImageId) -> Result<(usize, usize), VgError> {
        (**self).texture_size(image)
    }

    fn fill(&mut self, paint: &Paint, scissor: &Scissor, fringe_width: f32, bounds: &Bounds, paths: &[PathVertices<'_>]) {
        (**self).fill(paint, scissor, fringe_width, bounds, paths)
    }

    fn stroke(&mut self, paint: &Paint, scissor: &Scissor, fringe_width: f32, stroke_width: f32, paths: &[PathVertices<'_>]) {
        (**self).stroke(paint, scissor, fringe_width, stroke_width, paths)
    }

    fn triangles(&mut self, paint: &Paint, scissor: &Scissor, vertices: &[Vertex2D]) {
        (**self).triangles(paint, scissor, vertices)
    }

    fn edge_antialias(&self) -> bool {
        (**self).edge_antialias()
    }
}
