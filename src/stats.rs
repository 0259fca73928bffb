///
/// Counts of the work done by a drawing context during the current frame
///
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct FrameStats {
    /// Number of draw calls sent to the backend
    pub draw_calls: usize,

    /// Triangles generated for the interior of filled shapes
    pub fill_triangles: usize,

    /// Triangles generated for strokes and antialiasing fringes
    pub stroke_triangles: usize,

    /// Triangles generated for glyphs
    pub text_triangles: usize
}

impl FrameStats {
    ///
    /// Total number of triangles generated this frame
    ///
    pub fn total_triangles(&self) -> usize {
        self.fill_triangles + self.stroke_triangles + self.text_triangles
    }
}
