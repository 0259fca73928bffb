///
/// Options used when creating a drawing context
///
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextOptions {
    /// Generate antialiasing fringes for fills and strokes (when the backend supports it)
    pub antialias: bool,

    /// Write the tessellated path cache to the debug log after every fill and stroke
    pub debug: bool,

    /// Ratio of device pixels to logical pixels (used until the first frame sets its own ratio)
    pub device_pixel_ratio: f32
}

impl Default for ContextOptions {
    fn default() -> ContextOptions {
        ContextOptions {
            antialias:          true,
            debug:              false,
            device_pixel_ratio: 1.0
        }
    }
}
