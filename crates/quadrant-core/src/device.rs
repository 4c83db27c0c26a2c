//! The narrow graphics-device interface the sprite batcher flushes into.
//!
//! Everything behind this trait (resource binding, buffer uploads, the actual draw) is
//! owned by the backend. `quadrant-render` implements it on top of wgpu and
//! `quadrant-test-utils` provides a recording mock.

use crate::vertex::SpriteVertex;

/// An opaque, cheaply clonable reference to a texture.
///
/// The batcher never owns textures; it holds a clone of the handle from submission until
/// the flush that consumes it.
pub trait TextureHandle: Clone {
    /// A key that is unique per texture and stable for the texture's lifetime.
    ///
    /// Used to make runs of the same texture contiguous when sorting by texture.
    fn sort_key(&self) -> u32;

    /// Whether two handles refer to the same texture.
    fn same_texture(&self, other: &Self) -> bool {
        self.sort_key() == other.sort_key()
    }
}

/// Backend that binds textures, applies shader passes and issues indexed draws.
///
/// # Example
///
/// ```rust,no_run
/// use quadrant_core::{GraphicsDevice, SpriteVertex};
///
/// fn draw_quad<D: GraphicsDevice>(device: &mut D, texture: &D::Texture, quad: &[SpriteVertex; 4]) {
///     device.bind_texture(0, texture);
///     device.draw_indexed_triangles(quad, &[0, 1, 2, 1, 3, 2], 2);
/// }
/// ```
pub trait GraphicsDevice {
    /// Texture handle type accepted by [`bind_texture`](Self::bind_texture).
    type Texture: TextureHandle;
    /// One pass of a shader effect.
    type Pass;

    /// Bind `texture` to sampling slot `slot`.
    fn bind_texture(&mut self, slot: u32, texture: &Self::Texture);

    /// Draw `triangle_count` triangles from `vertices` using `indices`.
    ///
    /// Indices are relative to the start of `vertices`. The slices are only borrowed for
    /// the duration of the call; backends copy what they need.
    fn draw_indexed_triangles(
        &mut self,
        vertices: &[SpriteVertex],
        indices: &[u16],
        triangle_count: u32,
    );

    /// Apply a pass's render state. May change the texture bound to any slot.
    fn apply_shader_pass(&mut self, pass: &Self::Pass);
}

/// A named, ordered list of shader passes that can be disposed.
///
/// Flushing with a disposed effect is a programming error and is rejected by the batcher.
#[derive(Debug, Clone)]
pub struct ShaderEffect<P> {
    name: String,
    passes: Vec<P>,
    disposed: bool,
}

impl<P> ShaderEffect<P> {
    pub fn new(name: impl Into<String>, passes: Vec<P>) -> Self {
        Self {
            name: name.into(),
            passes,
            disposed: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn passes(&self) -> &[P] {
        &self.passes
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Release the passes. The effect must not be used afterwards.
    pub fn dispose(&mut self) {
        self.passes.clear();
        self.disposed = true;
    }
}
