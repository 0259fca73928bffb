use crate::render::*;

/// Maximum number of textures that can be used for the glyph atlas in a single frame
pub const MAX_FONT_IMAGES: usize = 4;

/// Width and height of the first glyph atlas texture
pub const INITIAL_FONT_IMAGE_SIZE: usize = 512;

/// Largest size that a glyph atlas texture can grow to
pub const MAX_FONT_IMAGE_SIZE: usize = 2048;

///
/// Tracks the textures used to store the glyph atlas
///
/// When the font stash runs out of space, a new (larger) texture is allocated and the atlas is reset. Textures
/// from earlier in the frame are kept alive until the frame ends, as glyphs drawn earlier still refer to them.
///
#[derive(Clone, Debug)]
pub struct FontAtlas {
    /// The textures allocated for the atlas (`ImageId::NONE` for unused slots)
    images: [ImageId; MAX_FONT_IMAGES],

    /// Index of the texture currently in use
    current: usize
}

impl FontAtlas {
    ///
    /// Creates the atlas, allocating its first texture from the backend
    ///
    pub fn new<Backend: RenderBackend>(backend: &mut Backend) -> FontAtlas {
        let first = backend.create_texture(TextureKind::Alpha, INITIAL_FONT_IMAGE_SIZE, INITIAL_FONT_IMAGE_SIZE, ImageFlags::empty(), None);

        if !first.is_valid() {
            warn!("Could not create the initial {}x{} glyph atlas texture", INITIAL_FONT_IMAGE_SIZE, INITIAL_FONT_IMAGE_SIZE);
        }

        let mut images  = [ImageId::NONE; MAX_FONT_IMAGES];
        images[0]       = first;

        FontAtlas {
            images:     images,
            current:    0
        }
    }

    ///
    /// The texture that glyphs are currently being rasterized into
    ///
    #[inline]
    pub fn current_image(&self) -> ImageId {
        self.images[self.current]
    }

    ///
    /// The index of the texture currently in use
    ///
    #[inline]
    pub fn current_index(&self) -> usize {
        self.current
    }

    ///
    /// The textures that are currently allocated
    ///
    pub fn images(&self) -> Vec<ImageId> {
        self.images.iter().cloned().filter(|image| image.is_valid()).collect()
    }

    ///
    /// Moves on to the next atlas texture, allocating it if necessary
    ///
    /// Returns the size of the new texture (which the font stash should be reset to), or `None` if every atlas
    /// slot is in use or the texture could not be created.
    ///
    pub fn next_atlas<Backend: RenderBackend>(&mut self, backend: &mut Backend) -> Option<(usize, usize)> {
        if self.current + 1 >= MAX_FONT_IMAGES {
            return None;
        }

        let next = self.images[self.current + 1];

        let (width, height) = if next.is_valid() {
            // Reuse the texture left over from a previous frame
            backend.texture_size(next).ok()?
        } else {
            // Double the shorter side of the current texture
            let (mut width, mut height) = backend.texture_size(self.current_image())
                .unwrap_or((INITIAL_FONT_IMAGE_SIZE, INITIAL_FONT_IMAGE_SIZE));

            if width > height {
                height *= 2;
            } else {
                width *= 2;
            }

            if width > MAX_FONT_IMAGE_SIZE || height > MAX_FONT_IMAGE_SIZE {
                width   = MAX_FONT_IMAGE_SIZE;
                height  = MAX_FONT_IMAGE_SIZE;
            }

            let image = backend.create_texture(TextureKind::Alpha, width, height, ImageFlags::empty(), None);
            if !image.is_valid() {
                return None;
            }

            debug!("Allocated {}x{} glyph atlas texture {:?}", width, height, image);
            self.images[self.current + 1] = image;

            (width, height)
        };

        self.current += 1;

        Some((width, height))
    }

    ///
    /// Called at the end of a frame: releases any textures smaller than the current one and makes the current
    /// texture the first one
    ///
    pub fn compact<Backend: RenderBackend>(&mut self, backend: &mut Backend) {
        if self.current == 0 {
            return;
        }

        let current_image = self.current_image();
        if !current_image.is_valid() {
            return;
        }

        let (width, height) = match backend.texture_size(current_image) {
            Ok(size)    => size,
            Err(_)      => { return; }
        };

        // Keep the earlier textures that are at least as large as the current one
        let mut kept = vec![];
        for image in self.images[0..self.current].iter().cloned() {
            match backend.texture_size(image) {
                Ok((w, h)) if w >= width && h >= height    => kept.push(image),
                _                                           => backend.delete_texture(image)
            }
        }

        self.images     = [ImageId::NONE; MAX_FONT_IMAGES];
        self.images[0]  = current_image;
        for (idx, image) in kept.into_iter().enumerate() {
            self.images[idx + 1] = image;
        }

        self.current    = 0;
    }

    ///
    /// Releases all of the textures used by the atlas
    ///
    pub fn delete<Backend: RenderBackend>(&mut self, backend: &mut Backend) {
        for image in self.images.iter_mut() {
            if image.is_valid() {
                backend.delete_texture(*image);
                *image = ImageId::NONE;
            }
        }

        self.current = 0;
    }
}
