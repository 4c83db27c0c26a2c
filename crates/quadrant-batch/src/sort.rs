use quadrant_core::TextureHandle;

/// How pending sprites are ordered when the batcher flushes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SpriteSortMode {
    /// Submission order.
    #[default]
    Deferred,
    /// Submission order. The caller flushes after every sprite; the batcher treats it
    /// exactly like [`Deferred`](Self::Deferred).
    Immediate,
    /// Grouped by texture so each texture is bound once.
    Texture,
    /// Highest depth first.
    BackToFront,
    /// Lowest depth first.
    FrontToBack,
}

impl SpriteSortMode {
    /// Whether the live items must be reordered before batching.
    pub fn requires_sort(self) -> bool {
        matches!(self, Self::Texture | Self::BackToFront | Self::FrontToBack)
    }

    /// Ascending sort key of an item under this mode.
    ///
    /// Back-to-front negates depth so that every mode sorts ascending. Depth keys are
    /// normalized so `-0.0` and `0.0` compare equal.
    #[inline]
    pub fn sort_key<T: TextureHandle>(self, texture: Option<&T>, depth: f32) -> f32 {
        match self {
            Self::Texture => texture.map_or(0.0, |texture| texture.sort_key() as f32),
            Self::BackToFront => 0.0 - depth,
            Self::FrontToBack => depth + 0.0,
            Self::Deferred | Self::Immediate => 0.0,
        }
    }
}

impl std::fmt::Display for SpriteSortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpriteSortMode::Deferred => write!(f, "Deferred"),
            SpriteSortMode::Immediate => write!(f, "Immediate"),
            SpriteSortMode::Texture => write!(f, "Texture"),
            SpriteSortMode::BackToFront => write!(f, "BackToFront"),
            SpriteSortMode::FrontToBack => write!(f, "FrontToBack"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct Key(u32);

    impl TextureHandle for Key {
        fn sort_key(&self) -> u32 {
            self.0
        }
    }

    #[test]
    fn test_requires_sort() {
        assert!(!SpriteSortMode::Deferred.requires_sort());
        assert!(!SpriteSortMode::Immediate.requires_sort());
        assert!(SpriteSortMode::Texture.requires_sort());
        assert!(SpriteSortMode::BackToFront.requires_sort());
        assert!(SpriteSortMode::FrontToBack.requires_sort());
    }

    #[test]
    fn test_depth_keys() {
        let key = Key(9);
        assert_eq!(SpriteSortMode::BackToFront.sort_key(Some(&key), 0.25), -0.25);
        assert_eq!(SpriteSortMode::FrontToBack.sort_key(Some(&key), 0.25), 0.25);
        assert_eq!(SpriteSortMode::Texture.sort_key(Some(&key), 0.25), 9.0);
    }

    #[test]
    fn test_signed_zero_depths_share_a_key() {
        let key = Key(1);
        for mode in [SpriteSortMode::BackToFront, SpriteSortMode::FrontToBack] {
            let positive = mode.sort_key(Some(&key), 0.0);
            let negative = mode.sort_key(Some(&key), -0.0);
            assert_eq!(positive.to_bits(), negative.to_bits());
        }
    }
}
