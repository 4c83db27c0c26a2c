//! Quadrant Core
//!
//! Shared vocabulary for the Quadrant sprite batcher: the vertex format written by the
//! quad writer, packed colors, texture-coordinate rectangles, and the narrow
//! [`device::GraphicsDevice`] interface the batcher flushes into.

pub mod color;
pub mod device;
pub mod geometry;
pub mod logging;
pub mod math;
pub mod profiling;
pub mod vertex;

pub use color::Color;
pub use device::{GraphicsDevice, ShaderEffect, TextureHandle};
pub use geometry::Rect;
pub use vertex::SpriteVertex;
