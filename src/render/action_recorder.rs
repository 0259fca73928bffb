use super::vertex::*;
use super::backend::*;
use super::render_action::*;
use crate::error::*;
use crate::paint::*;
use crate::state::*;
use crate::path::Bounds;

use std::collections::{HashMap};

///
/// A texture stored by the action recorder
///
#[derive(Clone, Debug)]
struct RecordedTexture {
    kind:   TextureKind,
    width:  usize,
    height: usize,
    pixels: Vec<u8>
}

///
/// A render backend that records the calls made to it as a list of render actions
///
/// Draw calls are held until the frame is flushed (and thrown away if it's cancelled). Viewport and
/// texture calls take effect immediately. This is useful for testing, and for sending the tessellated
/// output of a context to a renderer that runs elsewhere.
///
pub struct ActionRecorder {
    /// Whether or not paths should be generated with antialiasing fringes
    antialias: bool,

    /// Calls that have taken effect
    actions: Vec<RenderAction>,

    /// Draw calls for the current frame
    pending: Vec<RenderAction>,

    /// The textures that have been created
    textures: HashMap<ImageId, RecordedTexture>,

    /// The next texture ID to allocate
    next_texture: u32,

    /// True between create() and delete()
    active: bool
}

impl ActionRecorder {
    ///
    /// Creates a new action recorder
    ///
    pub fn new(antialias: bool) -> ActionRecorder {
        ActionRecorder {
            antialias:      antialias,
            actions:        vec![],
            pending:        vec![],
            textures:       HashMap::new(),
            next_texture:   1,
            active:         false
        }
    }

    ///
    /// The actions that have been flushed or have taken effect immediately
    ///
    pub fn actions(&self) -> &[RenderAction] {
        &self.actions
    }

    ///
    /// The draw calls waiting for the next flush
    ///
    pub fn pending(&self) -> &[RenderAction] {
        &self.pending
    }

    ///
    /// True if the backend has been created and not yet deleted
    ///
    pub fn is_active(&self) -> bool {
        self.active
    }

    ///
    /// Number of textures that currently exist
    ///
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    ///
    /// Retrieves the pixels for a texture
    ///
    pub fn texture_pixels(&self, image: ImageId) -> Option<&[u8]> {
        self.textures.get(&image).map(|texture| &texture.pixels[..])
    }

    fn bytes_per_pixel(kind: TextureKind) -> usize {
        match kind {
            TextureKind::Alpha  => 1,
            TextureKind::Rgba   => 4
        }
    }
}

impl RenderBackend for ActionRecorder {
    fn create(&mut self) {
        self.active = true;
    }

    fn delete(&mut self) {
        self.active = false;
        self.pending.clear();
    }

    fn viewport(&mut self, width: usize, height: usize) {
        self.actions.push(RenderAction::Viewport(width, height));
    }

    fn cancel(&mut self) {
        self.pending.clear();
    }

    fn flush(&mut self) {
        self.actions.extend(self.pending.drain(..));
    }

    fn create_texture(&mut self, kind: TextureKind, width: usize, height: usize, flags: ImageFlags, data: Option<&[u8]>) -> ImageId {
        let size = width * height * Self::bytes_per_pixel(kind);

        if width == 0 || height == 0 {
            return ImageId::NONE;
        }

        let pixels = match data {
            Some(data)  => {
                if data.len() != size { return ImageId::NONE; }
                data.to_vec()
            }
            None        => vec![0; size]
        };

        let image = ImageId(self.next_texture);
        self.next_texture += 1;

        self.textures.insert(image, RecordedTexture { kind, width, height, pixels });
        self.actions.push(RenderAction::CreateTexture(image, kind, width, height, flags));

        image
    }

    fn delete_texture(&mut self, image: ImageId) {
        if self.textures.remove(&image).is_some() {
            self.actions.push(RenderAction::DeleteTexture(image));
        }
    }

    fn update_texture(&mut self, image: ImageId, x: usize, y: usize, width: usize, height: usize, data: &[u8]) -> Result<(), VgError> {
        let texture = self.textures.get_mut(&image).ok_or(VgError::InvalidImage(image))?;
        let bpp     = Self::bytes_per_pixel(texture.kind);

        if x + width > texture.width || y + height > texture.height || data.len() < texture.width * texture.height * bpp {
            return Err(VgError::TextureUpdateFailed(image));
        }

        // Copy the rows in the updated region
        for row in y..(y+height) {
            let start   = (row * texture.width + x) * bpp;
            let end     = start + width * bpp;

            texture.pixels[start..end].copy_from_slice(&data[start..end]);
        }

        self.actions.push(RenderAction::UpdateTexture(image, x, y, width, height));

        Ok(())
    }

    fn texture_size(&self, image: ImageId) -> Result<(usize, usize), VgError> {
        self.textures.get(&image)
            .map(|texture| (texture.width, texture.height))
            .ok_or(VgError::InvalidImage(image))
    }

    fn fill(&mut self, paint: &Paint, scissor: &Scissor, fringe_width: f32, bounds: &Bounds, paths: &[PathVertices<'_>]) {
        self.pending.push(RenderAction::Fill {
            paint:          *paint,
            scissor:        *scissor,
            fringe_width:   fringe_width,
            bounds:         *bounds,
            paths:          paths.iter().map(RecordedPath::from).collect()
        });
    }

    fn stroke(&mut self, paint: &Paint, scissor: &Scissor, fringe_width: f32, stroke_width: f32, paths: &[PathVertices<'_>]) {
        self.pending.push(RenderAction::Stroke {
            paint:          *paint,
            scissor:        *scissor,
            fringe_width:   fringe_width,
            stroke_width:   stroke_width,
            paths:          paths.iter().map(RecordedPath::from).collect()
        });
    }

    fn triangles(&mut self, paint: &Paint, scissor: &Scissor, vertices: &[Vertex2D]) {
        self.pending.push(RenderAction::Triangles {
            paint:      *paint,
            scissor:    *scissor,
            vertices:   vertices.to_vec()
        });
    }

    fn edge_antialias(&self) -> bool {
        self.antialias
    }
}
