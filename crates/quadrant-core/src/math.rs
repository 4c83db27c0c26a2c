/// SIMD-accelerated `glam` types for CPU-side math.
///
/// The quad writer works on plain `f32` scalars for speed; these types are used by
/// callers that compute positions, rotations and projections before submitting.
///
/// # Examples
///
/// ```
/// use quadrant_core::math::{Mat4, Vec2};
///
/// let origin = Vec2::new(16.0, 16.0);
/// let (sin, cos) = 0.5f32.sin_cos();
/// let projection = Mat4::orthographic_lh(0.0, 800.0, 600.0, 0.0, 0.0, 1.0);
/// # let _ = (origin, sin, cos, projection);
/// ```
pub mod fast {
    pub use glam::*;
}

/// Packed vector types with a guaranteed `#[repr(C)]` layout.
///
/// These are the field types of [`SpriteVertex`](crate::SpriteVertex) and can be cast to
/// bytes with [`bytemuck`] for staging uploads.
///
/// [`bytemuck`]: https://docs.rs/bytemuck
pub mod packed {
    use bytemuck::{Pod, Zeroable};

    /// A 2D vector with guaranteed `#[repr(C)]` layout for GPU uploads.
    ///
    /// # Memory Layout
    ///
    /// ```text
    /// Offset | Field | Size
    /// -------|-------|------
    /// 0      | x     | 4 bytes (f32)
    /// 4      | y     | 4 bytes (f32)
    /// Total: 8 bytes
    /// ```
    #[repr(C)]
    #[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
    pub struct Vec2 {
        pub x: f32,
        pub y: f32,
    }

    impl Vec2 {
        pub const fn new(x: f32, y: f32) -> Self {
            Self { x, y }
        }
    }

    impl From<glam::Vec2> for Vec2 {
        fn from(v: glam::Vec2) -> Self {
            Self { x: v.x, y: v.y }
        }
    }

    impl From<Vec2> for glam::Vec2 {
        fn from(v: Vec2) -> Self {
            glam::Vec2::new(v.x, v.y)
        }
    }

    /// A 3D vector with guaranteed `#[repr(C)]` layout for GPU uploads.
    ///
    /// # Memory Layout
    ///
    /// ```text
    /// Offset | Field | Size
    /// -------|-------|------
    /// 0      | x     | 4 bytes (f32)
    /// 4      | y     | 4 bytes (f32)
    /// 8      | z     | 4 bytes (f32)
    /// Total: 12 bytes
    /// ```
    #[repr(C)]
    #[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
    pub struct Vec3 {
        pub x: f32,
        pub y: f32,
        pub z: f32,
    }

    impl Vec3 {
        pub const fn new(x: f32, y: f32, z: f32) -> Self {
            Self { x, y, z }
        }
    }

    impl From<glam::Vec3> for Vec3 {
        fn from(v: glam::Vec3) -> Self {
            Self {
                x: v.x,
                y: v.y,
                z: v.z,
            }
        }
    }

    impl From<Vec3> for glam::Vec3 {
        fn from(v: Vec3) -> Self {
            glam::Vec3::new(v.x, v.y, v.z)
        }
    }
}

pub use fast::*;
pub use packed::{Vec2 as PackedVec2, Vec3 as PackedVec3};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packed_sizes() {
        assert_eq!(std::mem::size_of::<PackedVec2>(), 8);
        assert_eq!(std::mem::size_of::<PackedVec3>(), 12);
    }

    #[test]
    fn test_packed_conversion() {
        let fast = Vec3::new(1.0, 2.0, 3.0);
        let packed = PackedVec3::from(fast);
        assert_eq!(packed, PackedVec3::new(1.0, 2.0, 3.0));
        assert_eq!(Vec3::from(packed), fast);
    }
}
