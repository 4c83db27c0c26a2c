//! Precomputed quad index buffer.

pub const VERTICES_PER_QUAD: usize = 4;
pub const INDICES_PER_QUAD: usize = 6;

/// Most quads a single draw can address with 16-bit indices (`65536 / 4`).
pub const MAX_QUADS_PER_DRAW: usize = (u16::MAX as usize + 1) / VERTICES_PER_QUAD;

/// Two triangles per quad over the corners `TL, TR, BL, BR`.
pub const QUAD_PATTERN: [u16; INDICES_PER_QUAD] = [0, 1, 2, 1, 3, 2];

/// Triangle-list indices for consecutive quads.
///
/// Quad `i` uses `QUAD_PATTERN + 4 * i`. The content of a slot depends only on its
/// position, so the table is written once, extended on demand and never shrunk or
/// rewritten.
#[derive(Debug, Default, Clone)]
pub struct IndexTable {
    indices: Vec<u16>,
}

impl IndexTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quad_capacity(quad_count: usize) -> Self {
        let mut table = Self::new();
        table.ensure_capacity(quad_count);
        table
    }

    /// Make sure the table covers `quad_count` quads.
    ///
    /// Requests are clamped to [`MAX_QUADS_PER_DRAW`]; slots past that limit are not
    /// addressable with 16-bit indices. Only the missing suffix is generated. Returns
    /// whether the table grew.
    pub fn ensure_capacity(&mut self, quad_count: usize) -> bool {
        let target = quad_count.min(MAX_QUADS_PER_DRAW);
        let current = self.quad_capacity();
        if target <= current {
            return false;
        }

        self.indices.reserve_exact((target - current) * INDICES_PER_QUAD);
        for quad in current..target {
            let base = (quad * VERTICES_PER_QUAD) as u16;
            self.indices.extend(QUAD_PATTERN.map(|offset| base + offset));
        }

        tracing::debug!("Extended quad index table from {} to {} quads", current, target);
        true
    }

    /// Number of quads the table currently covers.
    pub fn quad_capacity(&self) -> usize {
        self.indices.len() / INDICES_PER_QUAD
    }

    /// Indices for the first `quad_count` quads.
    ///
    /// # Panics
    ///
    /// Panics if the table does not cover `quad_count` quads.
    pub fn quads(&self, quad_count: usize) -> &[u16] {
        &self.indices[..quad_count * INDICES_PER_QUAD]
    }

    pub fn as_slice(&self) -> &[u16] {
        &self.indices
    }
}
