//! Mock implementation of GraphicsDevice for testing.
//!
//! This module provides a device that records operations without touching a GPU.

use quadrant_core::{GraphicsDevice, SpriteVertex, TextureHandle};

/// Number of sampling slots the mock tracks.
pub const MOCK_TEXTURE_SLOTS: usize = 8;

/// Most vertices a 16-bit indexed draw can reference.
pub const MAX_VERTICES_PER_DRAW: usize = u16::MAX as usize + 1;

/// Texture handle understood by [`MockGraphicsDevice`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MockTexture {
    id: u32,
}

impl MockTexture {
    pub fn new(id: u32) -> Self {
        Self { id }
    }

    pub fn id(&self) -> u32 {
        self.id
    }
}

impl TextureHandle for MockTexture {
    fn sort_key(&self) -> u32 {
        self.id
    }
}

/// Shader pass understood by [`MockGraphicsDevice`].
///
/// A pass can optionally bind its own texture to slot 0 when applied, the way a real
/// pass with sampler state would clobber the batcher's binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockPass {
    pub name: String,
    pub binds: Option<MockTexture>,
}

impl MockPass {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            binds: None,
        }
    }

    /// A pass that binds `texture` to slot 0 as a side effect.
    pub fn binding(name: impl Into<String>, texture: MockTexture) -> Self {
        Self {
            name: name.into(),
            binds: Some(texture),
        }
    }
}

/// A draw call captured by the mock.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedDraw {
    /// Texture bound to slot 0 when the draw was issued.
    pub texture: Option<u32>,
    pub vertices: Vec<SpriteVertex>,
    pub index_count: usize,
    pub triangle_count: u32,
    /// Largest index referenced by the draw.
    pub max_index: Option<u16>,
}

impl RecordedDraw {
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    /// Depth of each quad in draw order.
    pub fn depths(&self) -> Vec<f32> {
        self.vertices.chunks(4).map(|quad| quad[0].position.z).collect()
    }

    /// Top-left x of each quad in draw order.
    pub fn quad_xs(&self) -> Vec<f32> {
        self.vertices.chunks(4).map(|quad| quad[0].position.x).collect()
    }
}

/// Records a device operation for verification in tests.
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCall {
    BindTexture { slot: u32, texture: u32 },
    ApplyPass { name: String },
    Draw(RecordedDraw),
}

/// Mock implementation of [`GraphicsDevice`] for testing.
///
/// # Example
///
/// ```rust
/// use quadrant_core::{GraphicsDevice, SpriteVertex};
/// use quadrant_test_utils::{MockGraphicsDevice, MockTexture};
///
/// let mut device = MockGraphicsDevice::new();
/// device.bind_texture(0, &MockTexture::new(3));
/// device.draw_indexed_triangles(&[SpriteVertex::default(); 4], &[0, 1, 2, 1, 3, 2], 2);
///
/// let draws = device.draws();
/// assert_eq!(draws.len(), 1);
/// assert_eq!(draws[0].texture, Some(3));
/// ```
#[derive(Debug, Default)]
pub struct MockGraphicsDevice {
    calls: Vec<DeviceCall>,
    slots: [Option<u32>; MOCK_TEXTURE_SLOTS],
    panic_on_draw: bool,
}

impl MockGraphicsDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// A device whose draws panic, for exercising interrupted flushes.
    pub fn panicking_on_draw() -> Self {
        Self {
            panic_on_draw: true,
            ..Self::default()
        }
    }

    /// All recorded calls in order.
    pub fn calls(&self) -> &[DeviceCall] {
        &self.calls
    }

    /// Recorded draws in order.
    pub fn draws(&self) -> Vec<&RecordedDraw> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DeviceCall::Draw(draw) => Some(draw),
                _ => None,
            })
            .collect()
    }

    pub fn count_draws(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, DeviceCall::Draw(_)))
            .count()
    }

    pub fn count_binds(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, DeviceCall::BindTexture { .. }))
            .count()
    }

    pub fn count_passes(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, DeviceCall::ApplyPass { .. }))
            .count()
    }

    /// Texture currently bound to `slot`.
    pub fn bound_texture(&self, slot: u32) -> Option<u32> {
        self.slots.get(slot as usize).copied().flatten()
    }

    /// Clear recorded calls (useful between frames). Bindings are kept.
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn call_count(&self) -> usize {
        self.calls.len()
    }

    fn bind(&mut self, slot: u32, texture: u32) {
        let slot_index = slot as usize;
        assert!(
            slot_index < MOCK_TEXTURE_SLOTS,
            "texture slot {slot} out of range"
        );
        self.slots[slot_index] = Some(texture);
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    type Texture = MockTexture;
    type Pass = MockPass;

    fn bind_texture(&mut self, slot: u32, texture: &MockTexture) {
        self.bind(slot, texture.id);
        self.calls.push(DeviceCall::BindTexture {
            slot,
            texture: texture.id,
        });
    }

    fn draw_indexed_triangles(
        &mut self,
        vertices: &[SpriteVertex],
        indices: &[u16],
        triangle_count: u32,
    ) {
        assert!(!self.panic_on_draw, "mock device draw failure");
        assert_eq!(
            indices.len(),
            triangle_count as usize * 3,
            "index count does not match triangle count"
        );
        assert!(
            vertices.len() <= MAX_VERTICES_PER_DRAW,
            "draw references {} vertices, more than 16-bit indices can address",
            vertices.len()
        );

        let max_index = indices.iter().copied().max();
        if let Some(max_index) = max_index {
            assert!(
                (max_index as usize) < vertices.len(),
                "index {max_index} out of bounds for {} vertices",
                vertices.len()
            );
        }

        self.calls.push(DeviceCall::Draw(RecordedDraw {
            texture: self.bound_texture(0),
            vertices: vertices.to_vec(),
            index_count: indices.len(),
            triangle_count,
            max_index,
        }));
    }

    fn apply_shader_pass(&mut self, pass: &MockPass) {
        if let Some(texture) = &pass.binds {
            self.bind(0, texture.id);
        }
        self.calls.push(DeviceCall::ApplyPass {
            name: pass.name.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_bind_and_draw() {
        let mut device = MockGraphicsDevice::new();
        device.bind_texture(0, &MockTexture::new(4));
        device.draw_indexed_triangles(&[SpriteVertex::default(); 4], &[0, 1, 2, 1, 3, 2], 2);

        assert_eq!(device.count_binds(), 1);
        assert_eq!(device.count_draws(), 1);
        let draws = device.draws();
        assert_eq!(draws[0].texture, Some(4));
        assert_eq!(draws[0].quad_count(), 1);
        assert_eq!(draws[0].max_index, Some(3));
    }

    #[test]
    fn test_pass_side_effect_rebinds_slot() {
        let mut device = MockGraphicsDevice::new();
        device.bind_texture(0, &MockTexture::new(1));
        device.apply_shader_pass(&MockPass::binding("shadow", MockTexture::new(9)));

        assert_eq!(device.bound_texture(0), Some(9));
        assert_eq!(device.count_passes(), 1);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_rejects_out_of_range_index() {
        let mut device = MockGraphicsDevice::new();
        device.draw_indexed_triangles(&[SpriteVertex::default(); 3], &[0, 1, 3], 1);
    }

    #[test]
    fn test_clear_calls() {
        let mut device = MockGraphicsDevice::new();
        device.bind_texture(0, &MockTexture::new(1));
        assert_eq!(device.call_count(), 1);

        device.clear_calls();
        assert_eq!(device.call_count(), 0);
        assert_eq!(device.bound_texture(0), Some(1));
    }
}
