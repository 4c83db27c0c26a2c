//! The sprite batcher: turns accumulated batch items into as few draw calls as the
//! texture and index-width constraints allow.

use quadrant_core::profiling::{profile_function, profile_scope};
use quadrant_core::{GraphicsDevice, ShaderEffect, SpriteVertex, TextureHandle};

use crate::error::{BatchError, BatchResult};
use crate::index::{IndexTable, MAX_QUADS_PER_DRAW, VERTICES_PER_QUAD};
use crate::item::BatchItem;
use crate::pool::{BatchItemHandle, BatchItemPool, INITIAL_CAPACITY};
use crate::sort::SpriteSortMode;
use crate::stats::FlushStats;

/// Sampling slot every run's texture is bound to.
pub const TEXTURE_SLOT: u32 = 0;

/// Configuration for a [`SpriteBatcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteBatcherDescriptor {
    /// Pool slots allocated up front.
    pub initial_capacity: usize,
    /// Upper bound on quads per draw call. Clamped to `1..=MAX_QUADS_PER_DRAW`.
    pub max_quads_per_draw: usize,
}

impl Default for SpriteBatcherDescriptor {
    fn default() -> Self {
        Self {
            initial_capacity: INITIAL_CAPACITY,
            max_quads_per_draw: MAX_QUADS_PER_DRAW,
        }
    }
}

/// Lifecycle of a batcher within a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatcherState {
    /// Items are being acquired and written.
    Accumulating,
    /// A flush is sorting and emitting draws.
    Flushing,
}

/// Accumulates sprites and flushes them as batched indexed draws.
///
/// # Frame lifecycle
///
/// ```rust,ignore
/// let mut batcher = SpriteBatcher::new();
///
/// // Accumulate
/// batcher
///     .get_item(texture.clone())
///     .set(x, y, w, h, Color::WHITE, Rect::UNIT, depth);
///
/// // Emit draw calls and rewind the pool
/// batcher.flush(&mut device, SpriteSortMode::BackToFront, None)?;
/// ```
///
/// The batcher is single-threaded and lock-free; callers that submit from several
/// threads must serialize access themselves.
#[derive(Debug)]
pub struct SpriteBatcher<T> {
    pool: BatchItemPool<T>,
    index_table: IndexTable,
    staging: Vec<SpriteVertex>,
    max_quads_per_draw: usize,
    state: BatcherState,
    sprite_count: u64,
    flush_count: u64,
    last_flush: FlushStats,
}

impl<T: TextureHandle> SpriteBatcher<T> {
    pub fn new() -> Self {
        Self::with_descriptor(SpriteBatcherDescriptor::default())
    }

    pub fn with_descriptor(descriptor: SpriteBatcherDescriptor) -> Self {
        let max_quads_per_draw = descriptor.max_quads_per_draw.clamp(1, MAX_QUADS_PER_DRAW);
        let pool = BatchItemPool::with_capacity(descriptor.initial_capacity);
        let run_capacity = pool.capacity().min(max_quads_per_draw);

        Self {
            index_table: IndexTable::with_quad_capacity(run_capacity),
            staging: Vec::with_capacity(run_capacity * VERTICES_PER_QUAD),
            pool,
            max_quads_per_draw,
            state: BatcherState::Accumulating,
            sprite_count: 0,
            flush_count: 0,
            last_flush: FlushStats::default(),
        }
    }

    /// Acquire a slot for one sprite drawn with `texture`.
    ///
    /// The borrow ends before the next flush, so the slot cannot be retained across a
    /// pool growth. Use [`acquire`](Self::acquire) for an index-based handle instead.
    ///
    /// # Panics
    ///
    /// Panics if the batcher is still in the middle of a flush, which only happens after
    /// a device call panicked and the unwind was caught.
    #[inline]
    pub fn get_item(&mut self, texture: T) -> &mut BatchItem<T> {
        self.acquire_slot(texture).1
    }

    /// Acquire a slot and return a handle that stays valid until the next flush.
    pub fn acquire(&mut self, texture: T) -> BatchItemHandle {
        self.acquire_slot(texture).0
    }

    pub fn item(&self, handle: BatchItemHandle) -> Option<&BatchItem<T>> {
        self.pool.get(handle)
    }

    /// Resolve a handle acquired since the last flush.
    pub fn item_mut(&mut self, handle: BatchItemHandle) -> Option<&mut BatchItem<T>> {
        self.pool.get_mut(handle)
    }

    fn acquire_slot(&mut self, texture: T) -> (BatchItemHandle, &mut BatchItem<T>) {
        assert!(
            self.state == BatcherState::Accumulating,
            "Invalid operation: sprite acquired while the batch is flushing"
        );

        let (handle, item) = self.pool.acquire();
        item.stamp(texture);
        (handle, item)
    }

    /// Emit every pending sprite to `device` and rewind the pool.
    ///
    /// Sorting modes reorder items by a stable sort; runs are then split whenever the
    /// texture changes or the run reaches the per-draw quad limit. Each run becomes one
    /// texture bind, the effect's passes (re-binding the texture after each), and exactly
    /// one indexed draw.
    ///
    /// Flushing with nothing pending is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::EffectDisposed`] if `effect` has been disposed. Nothing is
    /// drawn and the pending sprites are kept.
    pub fn flush<D>(
        &mut self,
        device: &mut D,
        sort_mode: SpriteSortMode,
        effect: Option<&ShaderEffect<D::Pass>>,
    ) -> BatchResult<()>
    where
        D: GraphicsDevice<Texture = T>,
    {
        profile_function!();

        if self.pool.is_empty() {
            return Ok(());
        }

        if let Some(effect) = effect
            && effect.is_disposed()
        {
            tracing::error!("Sprite batch flushed with disposed effect '{}'", effect.name());
            return Err(BatchError::EffectDisposed {
                effect: effect.name().to_string(),
            });
        }

        self.state = BatcherState::Flushing;
        self.index_table
            .ensure_capacity(self.pool.capacity().min(self.max_quads_per_draw));

        if sort_mode.requires_sort() {
            profile_scope!("sort");
            let items = self.pool.live_mut();
            for item in items.iter_mut() {
                item.sort_key = sort_mode.sort_key(item.texture.as_ref(), item.depth());
            }
            if sort_mode == SpriteSortMode::Texture {
                // f32 keys cannot tell texture ids above 2^24 apart.
                items.sort_by_key(|item| item.texture.as_ref().map(TextureHandle::sort_key));
            } else {
                items.sort_by(|a, b| a.sort_key.total_cmp(&b.sort_key));
            }
        }

        let items = self.pool.live();
        let mut stats = FlushStats {
            sprites: items.len(),
            ..Default::default()
        };

        let mut start = 0;
        for end in 1..=items.len() {
            let boundary = if end == items.len() {
                true
            } else if !same_texture(&items[end - 1], &items[end]) {
                stats.texture_switches += 1;
                true
            } else if end - start == self.max_quads_per_draw {
                stats.index_limit_splits += 1;
                true
            } else {
                false
            };

            if boundary {
                draw_run(
                    device,
                    &items[start..end],
                    &mut self.staging,
                    &self.index_table,
                    effect,
                );
                stats.draw_calls += 1;
                start = end;
            }
        }

        for item in self.pool.live_mut() {
            item.release();
        }
        self.pool.reset();

        self.sprite_count += stats.sprites as u64;
        self.flush_count += 1;
        self.last_flush = stats;
        self.state = BatcherState::Accumulating;

        tracing::trace!(
            "Flushed {} sprites in {} draw calls ({})",
            stats.sprites,
            stats.draw_calls,
            sort_mode
        );
        Ok(())
    }

    /// Drop every pending sprite without drawing and return to accumulating.
    ///
    /// This is also the way to recover a batcher whose flush was interrupted by a panic.
    pub fn discard(&mut self) {
        for item in self.pool.live_mut() {
            item.release();
        }
        self.pool.reset();
        self.state = BatcherState::Accumulating;
    }

    /// Sprites waiting for the next flush.
    pub fn pending(&self) -> usize {
        self.pool.len()
    }

    /// Total sprites drawn over the batcher's lifetime.
    pub fn sprite_count(&self) -> u64 {
        self.sprite_count
    }

    /// Number of flushes that drew at least one sprite.
    pub fn flush_count(&self) -> u64 {
        self.flush_count
    }

    pub fn last_flush_stats(&self) -> FlushStats {
        self.last_flush
    }

    pub fn state(&self) -> BatcherState {
        self.state
    }

    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    pub fn max_quads_per_draw(&self) -> usize {
        self.max_quads_per_draw
    }

    pub fn index_table(&self) -> &IndexTable {
        &self.index_table
    }
}

impl<T: TextureHandle> Default for SpriteBatcher<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn same_texture<T: TextureHandle>(a: &BatchItem<T>, b: &BatchItem<T>) -> bool {
    match (a.texture.as_ref(), b.texture.as_ref()) {
        (Some(a), Some(b)) => a.same_texture(b),
        (None, None) => true,
        _ => false,
    }
}

fn draw_run<T, D>(
    device: &mut D,
    run: &[BatchItem<T>],
    staging: &mut Vec<SpriteVertex>,
    index_table: &IndexTable,
    effect: Option<&ShaderEffect<D::Pass>>,
) where
    T: TextureHandle,
    D: GraphicsDevice<Texture = T>,
{
    let Some(texture) = run[0].texture.as_ref() else {
        unreachable!("batch items are stamped with a texture when acquired");
    };

    staging.clear();
    staging.extend(run.iter().flat_map(|item| item.vertices));

    device.bind_texture(TEXTURE_SLOT, texture);
    if let Some(effect) = effect {
        for pass in effect.passes() {
            device.apply_shader_pass(pass);
            device.bind_texture(TEXTURE_SLOT, texture);
        }
    }

    let quads = run.len();
    device.draw_indexed_triangles(staging, index_table.quads(quads), (quads * 2) as u32);
}
