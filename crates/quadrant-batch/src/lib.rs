//! Quadrant Batch
//!
//! The draw-call batching engine: sprites are written into pooled [`BatchItem`]s and
//! flushed as texture-contiguous runs of indexed quads, split wherever 16-bit indices
//! would overflow.
//!
//! | Piece | Role |
//! |-------|------|
//! | [`quad`] | Writes the four corners of an axis-aligned or rotated quad |
//! | [`BatchItemPool`] | Reusable item slots with amortized O(1) acquisition |
//! | [`IndexTable`] | Incrementally extended `{0,1,2,1,3,2}` index pattern |
//! | [`SpriteBatcher`] | Sorts, partitions and emits draws to a [`GraphicsDevice`](quadrant_core::GraphicsDevice) |

pub mod quad;

mod batcher;
mod error;
mod index;
mod item;
mod pool;
mod sort;
mod stats;

pub use batcher::{BatcherState, SpriteBatcher, SpriteBatcherDescriptor, TEXTURE_SLOT};
pub use error::{BatchError, BatchResult};
pub use index::{
    INDICES_PER_QUAD, IndexTable, MAX_QUADS_PER_DRAW, QUAD_PATTERN, VERTICES_PER_QUAD,
};
pub use item::BatchItem;
pub use pool::{BatchItemHandle, BatchItemPool, GROWTH_CHUNK, INITIAL_CAPACITY, next_capacity};
pub use sort::SpriteSortMode;
pub use stats::FlushStats;
