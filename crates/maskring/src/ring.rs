//! Fixed-capacity ring buffer with inline storage.
//!
//! [`RingBuffer<T, N, S>`] embeds its `N` slots directly in the struct. There
//! is no heap allocation and no pointer indirection. `N` must be a power of
//! two, so a logical position maps to a slot by masking with `N - 1`.
//!
//! # Cursors
//!
//! Two free-running [`Cursor`] counters track the ring:
//!
//! ```text
//!            output                    input
//!              │                         │
//!   ┌────┬────┬▼───┬────┬────┬────┬────┬▼───┐
//!   │    │    │ v0 │ v1 │ v2 │ v3 │ v4 │    │   N = 8, count = 5
//!   └────┴────┴────┴────┴────┴────┴────┴────┘
//!              oldest              newest
//! ```
//!
//! `count = input - output` under wrapping subtraction. Equal cursors mean
//! empty. A distance of `N` means full. No separate flag is needed. The
//! counters are never masked; they wrap through `wrapping_add` at
//! `Cursor::MAX`, and only the storage index is reduced with `& (N - 1)`.
//!
//! # Logical removal
//!
//! [`pop_back`](RingBuffer::pop_back) only advances `output`. The vacated
//! slot keeps its value until a later push wraps around and overwrites it.

use crate::capacity::{check_capacity, mask, AssertCapacity, Cursor};
use crate::error::RingError;
use crate::invariants::{
    debug_assert_bounded_count, debug_assert_output_not_past_input, debug_assert_single_step,
    debug_assert_slot_in_bounds,
};
use crate::strategy::{DirectStore, InsertSite, InsertStrategy};

use std::fmt;
use std::iter::FusedIterator;

/// A fixed-capacity FIFO ring buffer.
///
/// # Type Parameters
///
/// - `T`: element type. Every slot always holds an initialized `T`, seeded
///   with `T::default()` at construction.
/// - `N`: capacity. Must be a non-zero power of two no larger than
///   [`MAX_CAPACITY`](crate::MAX_CAPACITY). The infallible constructors reject
///   anything else at compile time. The `try_*` constructors reject it at
///   run time.
/// - `S`: insertion strategy, [`DirectStore`] by default.
///
/// # Example
///
/// ```
/// use maskring_rs::RingBuffer;
///
/// let mut ring: RingBuffer<u32, 8> = RingBuffer::new();
/// for v in 1..=5 {
///     assert!(ring.push_front(v));
/// }
/// for _ in 0..3 {
///     assert!(ring.pop_back());
/// }
///
/// assert_eq!(ring.count(), 2);
/// assert_eq!(ring.peek(0), Some(&4));
/// assert_eq!(ring.peek(1), Some(&5));
/// assert_eq!(ring.peek(2), None);
/// ```
#[derive(Clone)]
pub struct RingBuffer<T, const N: usize, S = DirectStore> {
    /// Producer cursor.
    input: Cursor,
    /// Consumer cursor.
    output: Cursor,
    storage: [T; N],
    strategy: Option<S>,
}

impl<T: Default, const N: usize> RingBuffer<T, N, DirectStore> {
    /// Creates an empty ring buffer with no insertion strategy.
    ///
    /// An invalid `N` is a compile-time error at the call site.
    pub fn new() -> Self {
        Self::init(None)
    }

    /// Creates an empty ring buffer, validating `N` at run time.
    ///
    /// # Example
    ///
    /// ```
    /// use maskring_rs::{RingBuffer, RingError};
    ///
    /// assert!(RingBuffer::<u8, 16>::try_new().is_ok());
    /// assert!(matches!(
    ///     RingBuffer::<u8, 12>::try_new(),
    ///     Err(RingError::InvalidCapacity { capacity: 12, .. })
    /// ));
    /// ```
    pub fn try_new() -> Result<Self, RingError> {
        Self::try_init(None)
    }
}

impl<T: Default, const N: usize, S: InsertStrategy<T>> RingBuffer<T, N, S> {
    /// Creates an empty ring buffer that routes every push through `strategy`.
    pub fn with_strategy(strategy: S) -> Self {
        Self::init(Some(strategy))
    }

    /// Run-time validated variant of [`with_strategy`](Self::with_strategy).
    pub fn try_with_strategy(strategy: S) -> Result<Self, RingError> {
        Self::try_init(Some(strategy))
    }

    /// Creates an empty ring buffer with an optional strategy.
    pub fn init(strategy: Option<S>) -> Self {
        let () = AssertCapacity::<N>::OK;
        Self::from_parts(strategy)
    }

    /// Run-time validated variant of [`init`](Self::init).
    pub fn try_init(strategy: Option<S>) -> Result<Self, RingError> {
        check_capacity(N)?;
        Ok(Self::from_parts(strategy))
    }

    fn from_parts(strategy: Option<S>) -> Self {
        Self {
            input: 0,
            output: 0,
            storage: std::array::from_fn(|_| T::default()),
            strategy,
        }
    }
}

impl<T, const N: usize, S: InsertStrategy<T>> RingBuffer<T, N, S> {
    const MASK: usize = mask(N);

    #[inline]
    fn slot_index(pos: Cursor) -> usize {
        let idx = (pos as usize) & Self::MASK;
        debug_assert_slot_in_bounds!(idx, N);
        idx
    }

    // =========================================================================
    // STATUS
    // =========================================================================

    /// Returns the ring buffer capacity.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of live elements.
    #[inline]
    pub fn count(&self) -> usize {
        self.input.wrapping_sub(self.output) as usize
    }

    /// True if no elements are live.
    #[inline]
    pub fn empty(&self) -> bool {
        self.count() == 0
    }

    /// True if all `N` slots are live.
    #[inline]
    pub fn full(&self) -> bool {
        self.count() == N
    }

    /// Alias for [`count`](Self::count).
    #[inline]
    pub fn len(&self) -> usize {
        self.count()
    }

    /// Alias for [`empty`](Self::empty).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.empty()
    }

    /// Alias for [`full`](Self::full).
    #[inline]
    pub fn is_full(&self) -> bool {
        self.full()
    }

    /// Raw `(input, output)` cursors.
    #[inline]
    pub fn cursors(&self) -> (Cursor, Cursor) {
        (self.input, self.output)
    }

    // =========================================================================
    // PRODUCER API
    // =========================================================================

    /// Push `value` at the producer end.
    ///
    /// Returns `false` without touching the cursors if the ring is full or the
    /// strategy rejects the value.
    #[inline]
    pub fn push_front(&mut self, value: T) -> bool {
        self.try_push_front(value).is_ok()
    }

    /// Push `value` at the producer end, reporting why it failed.
    pub fn try_push_front(&mut self, value: T) -> Result<(), RingError> {
        if self.full() {
            log::trace!("push_front refused: ring full ({N} slots)");
            return Err(RingError::Full);
        }

        let input = self.input;
        match self.strategy.as_mut() {
            Some(strategy) => {
                let site = InsertSite::new(&mut self.storage, input, self.output);
                if !strategy.insert(site, value) {
                    log::trace!("push_front refused: strategy rejected value at cursor {input}");
                    return Err(RingError::Rejected);
                }
            }
            None => self.storage[Self::slot_index(input)] = value,
        }

        let new_input = input.wrapping_add(1);
        debug_assert_single_step!("input", input, new_input);
        self.input = new_input;
        debug_assert_bounded_count!(self.count(), N);

        Ok(())
    }

    // =========================================================================
    // CONSUMER API
    // =========================================================================

    /// Drop the oldest element from the consumer end.
    ///
    /// Returns `false` if the ring is empty. The slot's value is left in place.
    #[inline]
    pub fn pop_back(&mut self) -> bool {
        self.try_pop_back().is_ok()
    }

    /// Drop the oldest element, reporting [`RingError::Empty`] on an empty ring.
    pub fn try_pop_back(&mut self) -> Result<(), RingError> {
        if self.empty() {
            return Err(RingError::Empty);
        }

        let output = self.output;
        let new_output = output.wrapping_add(1);
        debug_assert_single_step!("output", output, new_output);
        debug_assert_output_not_past_input!(output, new_output, self.input);
        self.output = new_output;

        Ok(())
    }

    /// Copy out the oldest element and pop it.
    pub fn take_back(&mut self) -> Option<T>
    where
        T: Clone,
    {
        let item = self.peek(0)?.clone();
        self.pop_back();
        Some(item)
    }

    /// Element at `offset` from the oldest, if live.
    #[inline]
    pub fn peek(&self, offset: usize) -> Option<&T> {
        if offset >= self.count() {
            return None;
        }
        let pos = self.output.wrapping_add(offset as Cursor);
        Some(&self.storage[Self::slot_index(pos)])
    }

    /// Mutable access to the element at `offset` from the oldest.
    #[inline]
    pub fn peek_mut(&mut self, offset: usize) -> Option<&mut T> {
        if offset >= self.count() {
            return None;
        }
        let pos = self.output.wrapping_add(offset as Cursor);
        Some(&mut self.storage[Self::slot_index(pos)])
    }

    /// Like [`peek`](Self::peek), distinguishing an empty ring from a short one.
    pub fn try_peek(&self, offset: usize) -> Result<&T, RingError> {
        let count = self.count();
        if count == 0 {
            return Err(RingError::Empty);
        }
        self.peek(offset)
            .ok_or(RingError::OutOfRange { offset, count })
    }

    /// The most recently pushed live element.
    #[inline]
    pub fn newest(&self) -> Option<&T> {
        self.count().checked_sub(1).and_then(|last| self.peek(last))
    }

    /// Iterate live elements, oldest to newest.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T, N> {
        Iter {
            storage: &self.storage,
            front: self.output,
            back: self.input,
        }
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    /// Logically remove every element.
    #[inline]
    pub fn clear(&mut self) {
        self.output = self.input;
    }

    /// Reset both cursors to zero and replace the strategy.
    ///
    /// Storage is not rewritten; old values are simply no longer live.
    pub fn reinit(&mut self, strategy: Option<S>) {
        self.input = 0;
        self.output = 0;
        self.strategy = strategy;
    }

    /// The installed strategy, if any.
    #[inline]
    pub fn strategy(&self) -> Option<&S> {
        self.strategy.as_ref()
    }

    /// Mutable access to the installed strategy.
    #[inline]
    pub fn strategy_mut(&mut self) -> Option<&mut S> {
        self.strategy.as_mut()
    }

    #[cfg(test)]
    pub(crate) fn set_cursors(&mut self, input: Cursor, output: Cursor) {
        self.input = input;
        self.output = output;
    }
}

impl<T: Default, const N: usize> Default for RingBuffer<T, N, DirectStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, const N: usize, S: InsertStrategy<T>> fmt::Debug for RingBuffer<T, N, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingBuffer")
            .field("count", &self.count())
            .field("capacity", &N)
            .field("input", &self.input)
            .field("output", &self.output)
            .field("live", &DebugLive(self))
            .finish_non_exhaustive()
    }
}

struct DebugLive<'a, T, const N: usize, S>(&'a RingBuffer<T, N, S>);

impl<T: fmt::Debug, const N: usize, S: InsertStrategy<T>> fmt::Debug for DebugLive<'_, T, N, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl<T, const N: usize, S: InsertStrategy<T>> Extend<T> for RingBuffer<T, N, S> {
    /// Pushes every item, silently dropping those that do not fit or are rejected.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push_front(item);
        }
    }
}

impl<'a, T, const N: usize, S: InsertStrategy<T>> IntoIterator for &'a RingBuffer<T, N, S> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// ITERATOR
// =============================================================================

/// Borrowing iterator over live elements, oldest first.
#[derive(Clone)]
pub struct Iter<'a, T, const N: usize> {
    storage: &'a [T; N],
    front: Cursor,
    back: Cursor,
}

impl<'a, T, const N: usize> Iterator for Iter<'a, T, N> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let idx = (self.front as usize) & mask(N);
        self.front = self.front.wrapping_add(1);
        Some(&self.storage[idx])
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back.wrapping_sub(self.front) as usize;
        (len, Some(len))
    }
}

impl<T, const N: usize> DoubleEndedIterator for Iter<'_, T, N> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back = self.back.wrapping_sub(1);
        Some(&self.storage[(self.back as usize) & mask(N)])
    }
}

impl<T, const N: usize> ExactSizeIterator for Iter<'_, T, N> {}

impl<T, const N: usize> FusedIterator for Iter<'_, T, N> {}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{DedupNewest, Filter, FnStrategy};

    #[test]
    fn test_capacity_must_be_power_of_two() {
        // These should compile fine
        let _ring: RingBuffer<u64, 1> = RingBuffer::new();
        let _ring: RingBuffer<u64, 4> = RingBuffer::new();
        let _ring: RingBuffer<u64, 16> = RingBuffer::new();
        let _ring: RingBuffer<u64, 1024> = RingBuffer::new();
    }

    #[test]
    fn test_try_new_rejects_bad_capacity() {
        assert!(matches!(
            RingBuffer::<u8, 0>::try_new(),
            Err(RingError::InvalidCapacity { capacity: 0, .. })
        ));
        assert!(matches!(
            RingBuffer::<u8, 3>::try_new(),
            Err(RingError::InvalidCapacity { capacity: 3, .. })
        ));
        assert!(matches!(
            RingBuffer::<u8, 6, DedupNewest>::try_with_strategy(DedupNewest),
            Err(RingError::InvalidCapacity { capacity: 6, .. })
        ));
        assert!(RingBuffer::<u8, 8>::try_new().is_ok());
    }

    #[test]
    fn test_fresh_ring_is_empty() {
        let ring: RingBuffer<u32, 8> = RingBuffer::new();
        assert_eq!(ring.count(), 0);
        assert!(ring.empty());
        assert!(!ring.full());
        assert_eq!(ring.capacity(), 8);
        assert_eq!(ring.cursors(), (0, 0));
        assert!(ring.strategy().is_none());
    }

    #[test]
    fn test_fill_then_overflow() {
        let mut ring: RingBuffer<u32, 4> = RingBuffer::new();
        for i in 0..4 {
            assert!(ring.push_front(i), "push {} failed", i);
        }
        assert!(ring.full());
        assert!(!ring.push_front(99));
        assert_eq!(ring.try_push_front(99), Err(RingError::Full));
        assert_eq!(ring.count(), 4);
        assert_eq!(ring.cursors(), (4, 0));
    }

    #[test]
    fn test_push_pop_peek_example() {
        let mut ring: RingBuffer<u32, 8> = RingBuffer::new();
        for v in 1..=5 {
            assert!(ring.push_front(v));
        }
        for _ in 0..3 {
            assert!(ring.pop_back());
        }

        assert_eq!(ring.count(), 2);
        assert_eq!(ring.peek(0), Some(&4));
        assert_eq!(ring.peek(1), Some(&5));
        assert_eq!(ring.peek(2), None);
        assert_eq!(
            ring.try_peek(2),
            Err(RingError::OutOfRange {
                offset: 2,
                count: 2
            })
        );
    }

    #[test]
    fn test_pop_empty_leaves_cursors() {
        let mut ring: RingBuffer<u32, 4> = RingBuffer::new();
        assert!(!ring.pop_back());
        assert_eq!(ring.try_pop_back(), Err(RingError::Empty));
        assert_eq!(ring.try_peek(0), Err(RingError::Empty));
        assert_eq!(ring.cursors(), (0, 0));

        ring.push_front(1);
        ring.pop_back();
        assert!(!ring.pop_back());
        assert_eq!(ring.cursors(), (1, 1));
    }

    #[test]
    fn test_pop_leaves_slot_value() {
        let mut ring: RingBuffer<u32, 2> = RingBuffer::new();
        ring.push_front(7);
        ring.pop_back();
        assert!(ring.empty());
        // slot 0 still holds 7 until overwritten
        assert_eq!(ring.storage, [7, 0]);

        ring.push_front(8);
        ring.push_front(9);
        assert_eq!(ring.storage, [9, 8]);
    }

    #[test]
    fn test_wrap_around_masking() {
        let mut ring: RingBuffer<u64, 8> = RingBuffer::new();

        for i in 0..6 {
            assert!(ring.push_front(i));
        }
        for _ in 0..4 {
            assert!(ring.pop_back());
        }
        for i in 10..14 {
            assert!(ring.push_front(i));
        }

        let values: Vec<u64> = ring.iter().copied().collect();
        assert_eq!(values, vec![4, 5, 10, 11, 12, 13]);
        assert_eq!(ring.peek(2), Some(&10));
    }

    #[test]
    fn test_cursor_overflow_wraps() {
        let mut ring: RingBuffer<u32, 4> = RingBuffer::new();
        let origin = Cursor::MAX - 1;
        ring.set_cursors(origin, origin);

        for v in 0..4 {
            assert!(ring.push_front(v));
        }
        assert!(ring.full());
        assert_eq!(ring.cursors(), (origin.wrapping_add(4), origin));
        assert_eq!(ring.cursors().0, 2);
        assert!(!ring.push_front(4));

        assert_eq!(ring.peek(0), Some(&0));
        assert_eq!(ring.peek(3), Some(&3));
        assert_eq!(ring.newest(), Some(&3));

        let drained: Vec<u32> = std::iter::from_fn(|| ring.take_back()).collect();
        assert_eq!(drained, vec![0, 1, 2, 3]);
        assert!(ring.empty());
        assert_eq!(ring.cursors(), (2, 2));
    }

    #[test]
    fn test_strategy_rejection_keeps_input() {
        let mut ring: RingBuffer<u32, 4, _> = RingBuffer::with_strategy(Filter(|v: &u32| *v < 10));
        assert!(ring.push_front(1));
        assert!(!ring.push_front(11));
        assert_eq!(ring.try_push_front(12), Err(RingError::Rejected));
        assert!(ring.push_front(2));

        assert_eq!(ring.cursors(), (2, 0));
        assert_eq!(ring.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_strategy_side_effect_survives_rejection() {
        // Writes a marker into the slot but only commits even values
        let strategy = FnStrategy::new(|mut site: InsertSite<'_, u32>, v: u32| {
            site.store(v + 100);
            v % 2 == 0
        });
        let mut ring: RingBuffer<u32, 2, _> = RingBuffer::with_strategy(strategy);

        assert!(!ring.push_front(1));
        assert!(ring.empty());
        assert_eq!(ring.storage[0], 101);

        assert!(ring.push_front(2));
        assert_eq!(ring.peek(0), Some(&102));
    }

    #[test]
    fn test_full_check_precedes_strategy() {
        let calls = std::cell::Cell::new(0);
        let strategy = FnStrategy::new(|mut site: InsertSite<'_, u8>, v: u8| {
            calls.set(calls.get() + 1);
            site.store(v);
            true
        });
        let mut ring: RingBuffer<u8, 1, _> = RingBuffer::with_strategy(strategy);

        assert!(ring.push_front(1));
        assert!(!ring.push_front(2));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_reinit_resets_cursors_and_strategy() {
        let mut ring: RingBuffer<u8, 4, DedupNewest> = RingBuffer::init(None);
        ring.push_front(1);
        assert!(ring.push_front(1));

        ring.reinit(Some(DedupNewest));
        assert!(ring.empty());
        assert_eq!(ring.cursors(), (0, 0));
        assert!(ring.push_front(5));
        assert!(!ring.push_front(5));
        assert_eq!(ring.count(), 1);
    }

    #[test]
    fn test_clear() {
        let mut ring: RingBuffer<u8, 4> = RingBuffer::new();
        ring.extend([1, 2, 3]);
        ring.clear();
        assert!(ring.empty());
        assert_eq!(ring.cursors(), (3, 3));
        assert_eq!(ring.peek(0), None);
    }

    #[test]
    fn test_peek_mut_and_newest() {
        let mut ring: RingBuffer<u8, 4> = RingBuffer::new();
        assert_eq!(ring.newest(), None);
        ring.extend([1, 2, 3]);
        *ring.peek_mut(1).unwrap() = 20;
        assert!(ring.peek_mut(3).is_none());
        assert_eq!(ring.newest(), Some(&3));
        assert_eq!(ring.iter().rev().copied().collect::<Vec<_>>(), vec![3, 20, 1]);
    }

    #[test]
    fn test_iter_exact_size() {
        let mut ring: RingBuffer<u8, 8> = RingBuffer::new();
        ring.extend(0..5);
        let mut iter = ring.iter();
        assert_eq!(iter.len(), 5);
        iter.next();
        iter.next_back();
        assert_eq!(iter.len(), 3);
    }

    #[test]
    fn test_debug_shows_live_only() {
        let mut ring: RingBuffer<u8, 4> = RingBuffer::new();
        ring.extend([1, 2, 3]);
        ring.pop_back();
        let out = format!("{:?}", ring);
        assert!(out.contains("live: [2, 3]"), "{out}");
        assert!(out.contains("count: 2"), "{out}");
    }
}
