use quadrant_core::{Color, Rect, SpriteVertex};

use crate::quad;

/// One pending sprite draw.
///
/// Items live in the [`BatchItemPool`](crate::BatchItemPool) and are reused every frame.
/// Acquiring an item stamps its texture and clears the previous frame's vertices, so a
/// slot never leaks stale geometry even if the caller forgets to write it.
#[derive(Debug, Clone)]
pub struct BatchItem<T> {
    pub(crate) sort_key: f32,
    pub(crate) texture: Option<T>,
    pub(crate) vertices: [SpriteVertex; 4],
}

impl<T> Default for BatchItem<T> {
    fn default() -> Self {
        Self {
            sort_key: 0.0,
            texture: None,
            vertices: [SpriteVertex::default(); 4],
        }
    }
}

impl<T> BatchItem<T> {
    /// Fill the item with an axis-aligned quad. See [`quad::write_axis_aligned`].
    #[inline]
    #[allow(clippy::too_many_arguments)]
    pub fn set(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Color,
        tex_coords: Rect<f32>,
        depth: f32,
    ) -> &mut Self {
        quad::write_axis_aligned(&mut self.vertices, x, y, w, h, color, tex_coords, depth);
        self
    }

    /// Fill the item with a rotated quad. See [`quad::write_rotated`].
    #[inline]
    #[allow(clippy::too_many_arguments)]
    pub fn set_rotated(
        &mut self,
        x: f32,
        y: f32,
        dx: f32,
        dy: f32,
        w: f32,
        h: f32,
        sin: f32,
        cos: f32,
        color: Color,
        tex_coords: Rect<f32>,
        depth: f32,
    ) -> &mut Self {
        quad::write_rotated(
            &mut self.vertices,
            x,
            y,
            dx,
            dy,
            w,
            h,
            sin,
            cos,
            color,
            tex_coords,
            depth,
        );
        self
    }

    pub fn vertices(&self) -> &[SpriteVertex; 4] {
        &self.vertices
    }

    /// Direct access to the corners, for callers that compute their own geometry.
    pub fn vertices_mut(&mut self) -> &mut [SpriteVertex; 4] {
        &mut self.vertices
    }

    pub fn texture(&self) -> Option<&T> {
        self.texture.as_ref()
    }

    /// The key the last sorting flush ordered this item by.
    pub fn sort_key(&self) -> f32 {
        self.sort_key
    }

    /// Paint-order depth, read back from the Z axis of the top-left corner.
    #[inline]
    pub fn depth(&self) -> f32 {
        self.vertices[quad::TOP_LEFT].position.z
    }

    pub(crate) fn stamp(&mut self, texture: T) {
        self.sort_key = 0.0;
        self.texture = Some(texture);
        self.vertices = [SpriteVertex::default(); 4];
    }

    /// Drop the texture reference once the item has been drawn.
    pub(crate) fn release(&mut self) {
        self.texture = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stamp_clears_previous_geometry() {
        let mut item = BatchItem::default();
        item.stamp(1u32);
        item.set(1.0, 2.0, 3.0, 4.0, Color::RED, Rect::UNIT, 0.75);
        assert_eq!(item.depth(), 0.75);

        item.release();
        assert!(item.texture().is_none());

        item.stamp(2u32);
        assert_eq!(item.texture(), Some(&2));
        assert_eq!(item.vertices(), &[SpriteVertex::default(); 4]);
        assert_eq!(item.depth(), 0.0);
    }
}
