/// Statistics for the most recent flush.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushStats {
    /// Sprites drawn.
    pub sprites: usize,
    /// Indexed draw calls issued.
    pub draw_calls: u32,
    /// Runs that ended because the texture changed.
    pub texture_switches: u32,
    /// Runs that ended because they reached the per-draw quad limit.
    pub index_limit_splits: u32,
}
