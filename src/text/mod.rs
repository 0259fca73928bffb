//!
//! # Text
//!
//! Glyph layout and rasterization are supplied by an implementation of `FontStash`. The drawing context
//! uploads the font stash's atlas to the textures tracked by `FontAtlas`, and draws each glyph as a quad.
//! Laid-out glyphs can be broken into rows of a fixed width with `break_lines`.
//!

mod font_stash;
mod atlas;
mod line_break;

pub use self::font_stash::*;
pub use self::atlas::*;
pub use self::line_break::*;
