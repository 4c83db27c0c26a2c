//! Growable pool of reusable [`BatchItem`] slots.

use crate::item::BatchItem;

/// Slots allocated up front by [`BatchItemPool::new`].
pub const INITIAL_CAPACITY: usize = 256;

/// Capacity is always grown to a multiple of this many slots.
pub const GROWTH_CHUNK: usize = 256;

/// Index-based reference to a slot acquired this frame.
///
/// Handles carry the pool generation they were issued in; once the pool is reset they
/// no longer resolve, so a handle can never observe another frame's item.
///
/// The generation is a wrapping `u32`: a handle kept across 2^32 resets resolves again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BatchItemHandle {
    generation: u32,
    index: usize,
}

impl BatchItemHandle {
    /// Position of the slot in submission order.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// Contiguous storage of batch items plus a cursor of how many are live this frame.
///
/// Invariant: `len() <= capacity()`. Storage never shrinks; [`reset`](Self::reset) only
/// rewinds the cursor.
#[derive(Debug)]
pub struct BatchItemPool<T> {
    items: Vec<BatchItem<T>>,
    count: usize,
    generation: u32,
}

impl<T> BatchItemPool<T> {
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let mut items = Vec::with_capacity(capacity);
        items.resize_with(capacity, BatchItem::default);
        Self {
            items,
            count: 0,
            generation: 0,
        }
    }

    /// Take the next free slot, growing the pool first if it is full.
    ///
    /// The returned slot still holds whatever the previous frame wrote into it.
    pub fn acquire(&mut self) -> (BatchItemHandle, &mut BatchItem<T>) {
        if self.count == self.items.len() {
            self.grow();
        }

        let index = self.count;
        self.count += 1;
        let handle = BatchItemHandle {
            generation: self.generation,
            index,
        };
        (handle, &mut self.items[index])
    }

    pub fn get(&self, handle: BatchItemHandle) -> Option<&BatchItem<T>> {
        self.resolve(handle).map(|index| &self.items[index])
    }

    pub fn get_mut(&mut self, handle: BatchItemHandle) -> Option<&mut BatchItem<T>> {
        self.resolve(handle).map(|index| &mut self.items[index])
    }

    /// Rewind the cursor for the next frame. Storage is kept.
    ///
    /// Advances the generation, wrapping to zero after `u32::MAX`.
    pub fn reset(&mut self) {
        self.count = 0;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Number of live items this frame.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of allocated slots.
    pub fn capacity(&self) -> usize {
        self.items.len()
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// The items acquired this frame, in submission order.
    pub fn live(&self) -> &[BatchItem<T>] {
        &self.items[..self.count]
    }

    pub fn live_mut(&mut self) -> &mut [BatchItem<T>] {
        &mut self.items[..self.count]
    }

    fn resolve(&self, handle: BatchItemHandle) -> Option<usize> {
        (handle.generation == self.generation && handle.index < self.count)
            .then_some(handle.index)
    }

    fn grow(&mut self) {
        let old = self.items.len();
        let new = next_capacity(old);
        tracing::debug!("Growing sprite batch pool from {} to {} items", old, new);

        self.items.reserve_exact(new - old);
        self.items.resize_with(new, BatchItem::default);
    }
}

impl<T> Default for BatchItemPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Capacity after one growth step: 1.5x, rounded up to a whole [`GROWTH_CHUNK`].
pub fn next_capacity(old: usize) -> usize {
    let grown = (old + old / 2).max(old + 1);
    grown.div_ceil(GROWTH_CHUNK) * GROWTH_CHUNK
}
