use crate::color::Color;
use crate::math::{PackedVec2, PackedVec3};

/// One corner of a sprite quad.
///
/// `position.z` carries the sprite's paint-order depth; it is identical for all four
/// corners of a quad.
///
/// # Memory Layout
///
/// ```text
/// Offset | Field     | Size
/// -------|-----------|------
/// 0      | position  | 12 bytes (3 x f32)
/// 12     | color     | 4 bytes (RGBA u8)
/// 16     | tex_coord | 8 bytes (2 x f32)
/// Total: 24 bytes
/// ```
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SpriteVertex {
    pub position: PackedVec3,
    pub color: Color,
    pub tex_coord: PackedVec2,
}

impl SpriteVertex {
    /// Size of the vertex in bytes.
    pub const SIZE: u64 = std::mem::size_of::<Self>() as u64;

    pub const fn new(position: PackedVec3, color: Color, tex_coord: PackedVec2) -> Self {
        Self {
            position,
            color,
            tex_coord,
        }
    }
}

static_assertions::const_assert_eq!(std::mem::size_of::<SpriteVertex>(), 24);
