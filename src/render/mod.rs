//!
//! # Render backends
//!
//! A drawing context hands its tessellated geometry to a `RenderBackend`, which owns all of the GPU
//! resources. `ActionRecorder` is a backend that just records the calls made to it.
//!

mod vertex;
mod backend;
mod render_action;
mod action_recorder;

pub use self::vertex::*;
pub use self::backend::*;
pub use self::render_action::*;
pub use self::action_recorder::*;
