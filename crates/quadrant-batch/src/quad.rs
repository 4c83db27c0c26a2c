//! Quad writer: fills the four corners of one textured quad.
//!
//! Corners are always written top-left, top-right, bottom-left, bottom-right, matching
//! the `{0, 1, 2, 1, 3, 2}` index pattern of the [`IndexTable`](crate::IndexTable).

use quadrant_core::math::{PackedVec2, PackedVec3};
use quadrant_core::{Color, Rect, SpriteVertex};

pub const TOP_LEFT: usize = 0;
pub const TOP_RIGHT: usize = 1;
pub const BOTTOM_LEFT: usize = 2;
pub const BOTTOM_RIGHT: usize = 3;

/// Write an axis-aligned `w x h` quad whose top-left corner sits at `(x, y, depth)`.
#[inline]
#[allow(clippy::too_many_arguments)]
pub fn write_axis_aligned(
    vertices: &mut [SpriteVertex; 4],
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    color: Color,
    tex_coords: Rect<f32>,
    depth: f32,
) {
    let (right, bottom) = (x + w, y + h);
    vertices[TOP_LEFT] = corner(x, y, depth, color, tex_coords.left(), tex_coords.top());
    vertices[TOP_RIGHT] = corner(right, y, depth, color, tex_coords.right(), tex_coords.top());
    vertices[BOTTOM_LEFT] = corner(x, bottom, depth, color, tex_coords.left(), tex_coords.bottom());
    vertices[BOTTOM_RIGHT] =
        corner(right, bottom, depth, color, tex_coords.right(), tex_coords.bottom());
}

/// Write a rotated quad.
///
/// `(dx, dy)` is the offset of the top-left corner from the rotation origin at `(x, y)`;
/// every corner offset is rotated by `[cos, -sin; sin, cos]` before the translation is
/// added. Passing the precomputed `sin`/`cos` keeps trigonometry out of the hot path.
#[inline]
#[allow(clippy::too_many_arguments)]
pub fn write_rotated(
    vertices: &mut [SpriteVertex; 4],
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
) {
    let (right, bottom) = (dx + w, dy + h);
    let rotate = |ox: f32, oy: f32| (x + ox * cos - oy * sin, y + ox * sin + oy * cos);

    let (tlx, tly) = rotate(dx, dy);
    let (trx, try_) = rotate(right, dy);
    let (blx, bly) = rotate(dx, bottom);
    let (brx, bry) = rotate(right, bottom);

    vertices[TOP_LEFT] = corner(tlx, tly, depth, color, tex_coords.left(), tex_coords.top());
    vertices[TOP_RIGHT] = corner(trx, try_, depth, color, tex_coords.right(), tex_coords.top());
    vertices[BOTTOM_LEFT] = corner(blx, bly, depth, color, tex_coords.left(), tex_coords.bottom());
    vertices[BOTTOM_RIGHT] =
        corner(brx, bry, depth, color, tex_coords.right(), tex_coords.bottom());
}

#[inline(always)]
fn corner(x: f32, y: f32, z: f32, color: Color, u: f32, v: f32) -> SpriteVertex {
    SpriteVertex::new(PackedVec3::new(x, y, z), color, PackedVec2::new(u, v))
}
