use super::vertex::*;
use super::backend::*;
use crate::paint::*;
use crate::state::*;
use crate::path::Bounds;

///
/// The vertices for one sub-path of a recorded fill or stroke
///
#[derive(Clone, PartialEq, Debug)]
pub struct RecordedPath {
    pub fill:   Vec<Vertex2D>,
    pub stroke: Vec<Vertex2D>,
    pub closed: bool,
    pub convex: bool
}

impl<'a> From<&PathVertices<'a>> for RecordedPath {
    fn from(path: &PathVertices<'a>) -> RecordedPath {
        RecordedPath {
            fill:   path.fill.to_vec(),
            stroke: path.stroke.to_vec(),
            closed: path.closed,
            convex: path.convex
        }
    }
}

///
/// Represents a call made to a render backend
///
#[derive(Clone, PartialEq, Debug)]
pub enum RenderAction {
    ///
    /// Sets the size of the render target
    ///
    Viewport(usize, usize),

    ///
    /// Creates a texture of the specified kind and size
    ///
    CreateTexture(ImageId, TextureKind, usize, usize, ImageFlags),

    ///
    /// Frees an existing texture
    ///
    DeleteTexture(ImageId),

    ///
    /// Updates the region (x, y, width, height) of a texture
    ///
    UpdateTexture(ImageId, usize, usize, usize, usize),

    ///
    /// Fills some paths
    ///
    Fill {
        paint:          Paint,
        scissor:        Scissor,
        fringe_width:   f32,
        bounds:         Bounds,
        paths:          Vec<RecordedPath>
    },

    ///
    /// Strokes some paths
    ///
    Stroke {
        paint:          Paint,
        scissor:        Scissor,
        fringe_width:   f32,
        stroke_width:   f32,
        paths:          Vec<RecordedPath>
    },

    ///
    /// Renders textured quads (usually text)
    ///
    Triangles {
        paint:          Paint,
        scissor:        Scissor,
        vertices:       Vec<Vertex2D>
    }
}
