//!
//! # Paths
//!
//! Paths are recorded as a list of `PathCommand`s, already transformed into document space. Before they
//! can be drawn, they're flattened into polylines in a `PathCache` and then expanded into triangles by
//! either the `FillTessellator` or the `StrokeTessellator`.
//!
//! `PathBuilder` supplies the shapes (arcs, rectangles, ellipses) in terms of the basic commands: it's
//! implemented by the drawing context and also by `Vec<PathCommand>`, which is useful for building
//! paths without a context.
//!

mod point;
mod command;
mod builder;
mod recorder;
mod cache;
mod flatten;
mod join;
mod fill;
mod stroke;

pub use self::point::{PathPoint, PointFlags};
pub use self::command::*;
pub use self::builder::*;
pub use self::recorder::*;
pub use self::cache::*;
pub use self::flatten::*;
pub use self::join::*;
pub use self::fill::*;
pub use self::stroke::*;
