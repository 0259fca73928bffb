use crate::state::TextAlign;

///
/// Identifies a font loaded into a font stash
///
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct FontId(pub i32);

///
/// The style used when laying out and rasterizing text
///
/// Sizes are in device pixels: the drawing context scales them by the font scale of the current transform
/// and the device pixel ratio before passing them to the font stash.
///
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct TextStyle {
    pub size:       f32,
    pub spacing:    f32,
    pub blur:       f32,
    pub align:      TextAlign,
    pub font:       FontId
}

///
/// A glyph laid out by a font stash
///
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct GlyphPosition {
    /// Byte index of the glyph's character in the string that was laid out
    pub index: usize,

    /// The character this glyph represents
    pub character: char,

    /// Position of the glyph's origin
    pub x: f32,
    pub y: f32,

    /// Position of the origin of the next glyph
    pub next_x: f32
}

///
/// The position of a rasterized glyph and its location in the atlas texture
///
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct GlyphQuad {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,

    pub s0: f32,
    pub t0: f32,
    pub s1: f32,
    pub t1: f32
}

///
/// A region of the atlas texture that has changed since it was last uploaded
///
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DirtyRect {
    pub x:      usize,
    pub y:      usize,
    pub width:  usize,
    pub height: usize
}

///
/// Vertical metrics for a font at a particular size
///
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct VerticalMetrics {
    pub ascender:       f32,
    pub descender:      f32,
    pub line_height:    f32
}

///
/// The horizontal extent of a glyph in a string of text, in the coordinates the text was measured in
///
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct GlyphExtent {
    /// Byte index of the glyph's character in the string
    pub index: usize,

    /// Position of the glyph's origin
    pub x: f32,

    /// Left and right edges of the glyph
    pub min_x: f32,
    pub max_x: f32
}

///
/// A font stash lays out text and rasterizes glyphs into an alpha atlas texture
///
/// The drawing context owns the textures that the atlas is uploaded to: it asks the font stash for the
/// dirty region of its atlas before drawing glyphs, and resets the atlas when it runs out of space.
///
pub trait FontStash {
    ///
    /// Loads a font from memory, returning its ID (or `None` if the font data can't be read)
    ///
    fn add_font(&mut self, name: &str, data: Vec<u8>) -> Option<FontId>;

    ///
    /// Finds a font that was previously loaded
    ///
    fn font_by_name(&self, name: &str) -> Option<FontId>;

    ///
    /// The name of a loaded font
    ///
    fn font_name(&self, font: FontId) -> Option<String>;

    ///
    /// Sets the style used for the following layout calls
    ///
    fn set_style(&mut self, style: &TextStyle);

    ///
    /// Lays out a string of text starting at the specified position
    ///
    fn glyphs(&mut self, x: f32, y: f32, text: &str) -> Vec<GlyphPosition>;

    ///
    /// Rasterizes a glyph into the atlas, returning its quad (or `None` if there's no room left in the atlas)
    ///
    fn rasterize(&mut self, glyph: &GlyphPosition) -> Option<GlyphQuad>;

    ///
    /// Measures a string of text, returning its advance and bounding box as `[min_x, min_y, max_x, max_y]`
    ///
    fn text_bounds(&mut self, x: f32, y: f32, text: &str) -> (f32, Option<[f32; 4]>);

    ///
    /// The top and bottom of a line of text with its baseline at `y`
    ///
    fn line_bounds(&mut self, y: f32) -> (f32, f32);

    ///
    /// The vertical metrics of the current font
    ///
    fn vertical_metrics(&mut self) -> VerticalMetrics;

    ///
    /// Returns the region of the atlas that has changed since the last call, if any
    ///
    fn validate_texture(&mut self) -> Option<DirtyRect>;

    ///
    /// The atlas pixels (one byte per pixel) and their width and height
    ///
    fn texture_data(&self) -> (&[u8], usize, usize);

    ///
    /// Clears the atlas and resizes it
    ///
    fn reset_atlas(&mut self, width: usize, height: usize);
}
