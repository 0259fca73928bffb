use super::render::ImageId;

use thiserror::Error;

///
/// Errors that can happen while expanding a flattened path into triangles
///
#[derive(Clone, Debug, PartialEq, Error)]
pub enum TessellationError {
    /// A path passed to the stroker had fewer than two distinct points, so it has no direction to stroke along
    #[error("path {path} has fewer than two points and cannot be stroked")]
    DegenerateStroke { path: usize }
}

///
/// Errors reported by a drawing context
///
#[derive(Clone, Debug, PartialEq, Error)]
pub enum VgError {
    /// The image handle does not refer to a texture the renderer knows about
    #[error("image {0:?} is not a valid texture")]
    InvalidImage(ImageId),

    /// The renderer could not update the contents of a texture
    #[error("could not update texture for image {0:?}")]
    TextureUpdateFailed(ImageId),

    /// A path could not be tessellated
    #[error(transparent)]
    Tessellation(#[from] TessellationError)
}
