/// An axis-aligned rectangle stored as origin plus extent.
///
/// Quads take their texture coordinates as a `Rect<f32>` in normalized `0.0..=1.0` space;
/// [`Rect::normalized`] converts a pixel source rectangle into that space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect<T> {
    pub x: T,
    pub y: T,
    pub width: T,
    pub height: T,
}

impl<T> Rect<T> {
    pub const fn new(x: T, y: T, width: T, height: T) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }
}

impl Rect<f32> {
    /// The full `[0, 1] x [0, 1]` texture space.
    pub const UNIT: Rect<f32> = Rect::new(0.0, 0.0, 1.0, 1.0);

    /// Build a rectangle from its top-left and bottom-right corners.
    pub fn from_corners(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Rect::new(left, top, right - left, bottom - top)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

impl Rect<u32> {
    /// Convert a pixel rectangle inside a `texture_width x texture_height` texture into
    /// normalized texture coordinates.
    pub fn normalized(&self, texture_width: u32, texture_height: u32) -> Rect<f32> {
        let tw = texture_width.max(1) as f32;
        let th = texture_height.max(1) as f32;
        Rect::new(
            self.x as f32 / tw,
            self.y as f32 / th,
            self.width as f32 / tw,
            self.height as f32 / th,
        )
    }
}
