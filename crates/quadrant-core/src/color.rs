/// A packed RGBA color with one `u8` per channel.
///
/// This is the color format carried by every [`SpriteVertex`](crate::SpriteVertex). It can
/// be built from bytes, floats, or hex codes:
///
/// ```
/// use quadrant_core::Color;
///
/// let red = Color::rgb(255, 0, 0);
/// let from_hex = Color::from_hex(0xFF8800);
/// let faded = Color::from_f32(1.0, 1.0, 1.0, 0.5);
/// assert_eq!(red.to_packed(), 0xFF0000FF);
/// # let _ = (from_hex, faded);
/// ```
///
/// The struct is `#[repr(C)]` and implements `bytemuck::Pod`; on the GPU it is read as a
/// normalized `unorm8x4`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    /// Create a color from RGB bytes with full opacity.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a color from RGBA bytes.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from `0.0..=1.0` float components. Out of range values are clamped.
    pub fn from_f32(r: f32, g: f32, b: f32, a: f32) -> Self {
        fn quantize(v: f32) -> u8 {
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        Self::rgba(quantize(r), quantize(g), quantize(b), quantize(a))
    }

    /// Create a color from a 24-bit RGB hex value (e.g. `0xFF8800`).
    pub const fn from_hex(hex: u32) -> Self {
        Self::rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    /// Create a color from a 32-bit `0xRRGGBBAA` value.
    pub const fn from_packed(packed: u32) -> Self {
        Self::rgba(
            (packed >> 24) as u8,
            (packed >> 16) as u8,
            (packed >> 8) as u8,
            packed as u8,
        )
    }

    /// The color as a 32-bit `0xRRGGBBAA` value.
    pub const fn to_packed(self) -> u32 {
        ((self.r as u32) << 24) | ((self.g as u32) << 16) | ((self.b as u32) << 8) | self.a as u32
    }

    /// Return the same color with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<[u8; 4]> for Color {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::rgba(r, g, b, a)
    }
}

impl From<Color> for [u8; 4] {
    fn from(color: Color) -> Self {
        [color.r, color.g, color.b, color.a]
    }
}

static_assertions::assert_eq_size!(Color, u32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packed_round_trip() {
        let color = Color::rgba(0x12, 0x34, 0x56, 0x78);
        assert_eq!(color.to_packed(), 0x12345678);
        assert_eq!(Color::from_packed(0x12345678), color);
    }

    #[test]
    fn test_from_hex_is_opaque() {
        assert_eq!(Color::from_hex(0xFF8800), Color::rgba(255, 136, 0, 255));
    }

    #[test]
    fn test_from_f32_clamps() {
        assert_eq!(Color::from_f32(2.0, -1.0, 0.5, 1.0), Color::rgba(255, 0, 128, 255));
    }

    #[test]
    fn test_byte_layout_is_rgba() {
        let bytes: [u8; 4] = bytemuck::cast(Color::rgba(1, 2, 3, 4));
        assert_eq!(bytes, [1, 2, 3, 4]);
    }
}
