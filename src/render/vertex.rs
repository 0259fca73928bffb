///
/// 2D vertex representation
///
/// For paths, `tex_coord` carries the antialiasing coverage rather than a texture position: the first
/// component runs across the edge (0 at an outer fringe, 1 at the opposite fringe, 0.5 in the solid
/// part) and the second is 0 at the far end of an end-cap fringe and 1 elsewhere. Text vertices use
/// `tex_coord` as glyph atlas coordinates.
///
#[derive(Clone, Copy, PartialEq, Debug, Default)]
#[repr(C)]
pub struct Vertex2D {
    pub pos:        [f32; 2],
    pub tex_coord:  [f32; 2]
}

impl Vertex2D {
    #[inline]
    pub fn new(x: f32, y: f32, u: f32, v: f32) -> Vertex2D {
        Vertex2D {
            pos:        [x, y],
            tex_coord:  [u, v]
        }
    }

    #[inline] pub fn x(&self) -> f32 { self.pos[0] }
    #[inline] pub fn y(&self) -> f32 { self.pos[1] }
}
