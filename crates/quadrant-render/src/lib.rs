//! wgpu backend for the Quadrant sprite batcher.
//!
//! [`WgpuSpriteDevice`] implements [`quadrant_core::GraphicsDevice`]: the batcher's
//! binds, passes and draws are recorded during a flush, uploaded by
//! [`WgpuSpriteDevice::prepare`] and replayed into a `wgpu::RenderPass` by
//! [`WgpuSpriteDevice::render`].

mod context;
mod device;
mod pipeline;
mod texture;

pub use context::{GraphicsContext, GraphicsContextDescriptor, GraphicsError, GraphicsResult};
pub use device::{SpriteDeviceDescriptor, WgpuSpriteDevice};
pub use pipeline::{SPRITE_SHADER, SpritePass, sprite_vertex_layout};
pub use texture::SpriteTexture;

// Re-export wgpu so callers build passes and views against the same version.
pub use wgpu;
