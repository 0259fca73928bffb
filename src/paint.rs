use super::color::*;
use super::transform2d::*;
use super::render::ImageId;

/// Large distance used to make linear gradients behave like an infinite box
const LINEAR_GRADIENT_EXTENT: f32 = 1e5;

///
/// Describes how a fill or stroke is coloured
///
/// Every paint is a rounded box with a feathered edge in its own coordinate space: a solid colour is a
/// paint where the inner and outer colours are the same, and the gradients vary the box dimensions.
/// The paint's transform is captured by value when it's assigned to the render state, so changing the
/// current transform afterwards never alters a paint that's already been set.
///
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Paint {
    /// Transform from paint space to document space
    pub transform: Transform2D,

    /// Half-size of the paint box
    pub extent: [f32; 2],

    /// Corner radius of the paint box
    pub radius: f32,

    /// Distance over which the inner colour fades to the outer colour
    pub feather: f32,

    /// Colour inside the box
    pub inner_color: Color,

    /// Colour outside the box
    pub outer_color: Color,

    /// Image to sample, for image patterns
    pub image: Option<ImageId>
}

impl Default for Paint {
    fn default() -> Paint {
        Paint::color(Color::rgba(0.0, 0.0, 0.0, 1.0))
    }
}

impl Paint {
    ///
    /// A paint that's a single solid colour
    ///
    pub fn color(color: Color) -> Paint {
        Paint {
            transform:      Transform2D::identity(),
            extent:         [0.0, 0.0],
            radius:         0.0,
            feather:        1.0,
            inner_color:    color,
            outer_color:    color,
            image:          None
        }
    }

    ///
    /// A linear gradient running from the start point to the end point
    ///
    pub fn linear_gradient(start_x: f32, start_y: f32, end_x: f32, end_y: f32, start_color: Color, end_color: Color) -> Paint {
        let large       = LINEAR_GRADIENT_EXTENT;
        let mut dx      = end_x - start_x;
        let mut dy      = end_y - start_y;
        let d           = f32::sqrt(dx*dx + dy*dy);

        if d > 0.0001 {
            dx /= d;
            dy /= d;
        } else {
            dx = 0.0;
            dy = 1.0;
        }

        Paint {
            transform:      Transform2D([dy, -dx, dx, dy, start_x - dx*large, start_y - dy*large]),
            extent:         [large, large + d*0.5],
            radius:         0.0,
            feather:        f32::max(1.0, d),
            inner_color:    start_color,
            outer_color:    end_color,
            image:          None
        }
    }

    ///
    /// A gradient shaped like a feathered rounded rectangle, useful for drop shadows and highlights
    ///
    pub fn box_gradient(x: f32, y: f32, w: f32, h: f32, radius: f32, feather: f32, inner_color: Color, outer_color: Color) -> Paint {
        Paint {
            transform:      Transform2D::translate(x + w*0.5, y + h*0.5),
            extent:         [w*0.5, h*0.5],
            radius:         radius,
            feather:        f32::max(1.0, feather),
            inner_color:    inner_color,
            outer_color:    outer_color,
            image:          None
        }
    }

    ///
    /// A circular gradient fading between an inner and an outer radius
    ///
    pub fn radial_gradient(center_x: f32, center_y: f32, inner_radius: f32, outer_radius: f32, inner_color: Color, outer_color: Color) -> Paint {
        let radius  = (inner_radius + outer_radius) * 0.5;
        let feather = outer_radius - inner_radius;

        Paint {
            transform:      Transform2D::translate(center_x, center_y),
            extent:         [radius, radius],
            radius:         radius,
            feather:        f32::max(1.0, feather),
            inner_color:    inner_color,
            outer_color:    outer_color,
            image:          None
        }
    }

    ///
    /// A repeating image pattern. (x, y) is the top-left of the pattern, (w, h) the size of one image
    ///
    pub fn image_pattern(x: f32, y: f32, w: f32, h: f32, angle: f32, image: ImageId, alpha: f32) -> Paint {
        let Transform2D(rotate) = Transform2D::rotate(angle);
        let white               = Color::rgba(1.0, 1.0, 1.0, alpha);

        Paint {
            transform:      Transform2D([rotate[0], rotate[1], rotate[2], rotate[3], x, y]),
            extent:         [w, h],
            radius:         0.0,
            feather:        0.0,
            inner_color:    white,
            outer_color:    white,
            image:          Some(image)
        }
    }

    ///
    /// Multiplies the alpha of both colours of this paint
    ///
    pub fn multiply_alpha(&mut self, factor: f32) {
        self.inner_color = self.inner_color.multiply_alpha(factor);
        self.outer_color = self.outer_color.multiply_alpha(factor);
    }

    ///
    /// Returns this paint with its transform composed with another (applied after the paint's own transform)
    ///
    pub fn transformed(&self, transform: &Transform2D) -> Paint {
        Paint {
            transform: self.transform.multiply(transform),
            ..*self
        }
    }
}
