//! **gridnav-core** — geometry primitives for grid-based agent navigation.
//!
//! Grid space uses integer [`Point`]s inside a half-open [`Range`]. World
//! space uses floating-point [`Vec2`]s. [`Line`] is the turn-boundary shape
//! that path steering is built on.

pub mod geom;
pub mod line;
pub mod vec2;

pub use geom::{Point, Range, RangeIter};
pub use line::Line;
pub use vec2::Vec2;
