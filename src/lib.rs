//!
//! # flo_vg
//!
//! Converts 2D vector paths into antialiased triangle meshes.
//!
//! A `Context` records paths in the current coordinate space, flattens their curves into polylines and
//! expands those into triangles for filling or stroking. The triangles are handed to a `RenderBackend`,
//! which is responsible for actually drawing them: `ActionRecorder` is a backend that records what it's
//! asked to draw as a list of `RenderAction`s.
//!
//! ```
//! # use flo_vg::*;
//! let mut context = Context::new(ActionRecorder::new(true), ContextOptions::default());
//!
//! context.begin_frame(100, 100, 1.0);
//! context.begin_path();
//! context.rounded_rect(10.0, 10.0, 80.0, 40.0, 5.0);
//! context.set_fill_color(Color::rgb(0.2, 0.4, 0.8));
//! context.fill();
//! context.end_frame();
//! ```
//!
#![warn(bare_trait_objects)]

#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate log;

mod color;
mod paint;
mod state;
mod stats;
mod error;
mod options;
mod context;
mod transform2d;
pub mod path;
pub mod text;
pub mod render;

pub use self::color::*;
pub use self::paint::*;
pub use self::state::*;
pub use self::stats::*;
pub use self::error::*;
pub use self::options::*;
pub use self::context::*;
pub use self::transform2d::*;
pub use self::path::{PathBuilder, PathCommand, PathCache, Bounds};
pub use self::text::{FontId, FontStash, TextRow};
pub use self::render::*;
