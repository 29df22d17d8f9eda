//! Insertion strategies for [`RingBuffer`](crate::RingBuffer).
//!
//! A strategy decides how, and whether, a value offered to
//! [`push_front`](crate::RingBuffer::push_front) lands in storage. It sees the
//! buffer through an [`InsertSite`] positioned at the next free slot. When it
//! returns `true` the ring commits the slot by advancing its input cursor. When
//! it returns `false` the push fails and the cursor stays put, though anything
//! the strategy already wrote into the slot stays there.

use crate::capacity::{mask, Cursor};

/// Pluggable insertion behavior.
pub trait InsertStrategy<T> {
    /// Decide whether to accept `value`, storing it through `site` if so.
    fn insert(&mut self, site: InsertSite<'_, T>, value: T) -> bool;
}

/// View of a ring buffer at the moment of insertion.
///
/// Holds the input slot mutably and the live elements read-only.
pub struct InsertSite<'a, T> {
    storage: &'a mut [T],
    input: Cursor,
    output: Cursor,
}

impl<'a, T> InsertSite<'a, T> {
    #[inline]
    pub(crate) fn new(storage: &'a mut [T], input: Cursor, output: Cursor) -> Self {
        Self {
            storage,
            input,
            output,
        }
    }

    #[inline]
    fn index(&self, pos: Cursor) -> usize {
        (pos as usize) & mask(self.storage.len())
    }

    /// Write `value` into the input slot.
    #[inline]
    pub fn store(&mut self, value: T) {
        let idx = self.index(self.input);
        self.storage[idx] = value;
    }

    /// The input slot itself, holding whatever was last written there.
    #[inline]
    pub fn slot_mut(&mut self) -> &mut T {
        let idx = self.index(self.input);
        &mut self.storage[idx]
    }

    /// Number of live elements before this insertion.
    #[inline]
    pub fn len(&self) -> usize {
        self.input.wrapping_sub(self.output) as usize
    }

    /// True if no elements are live.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ring capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Live element at `offset` from the oldest.
    #[inline]
    pub fn get(&self, offset: usize) -> Option<&T> {
        if offset >= self.len() {
            return None;
        }
        let idx = self.index(self.output.wrapping_add(offset as Cursor));
        Some(&self.storage[idx])
    }

    /// Most recently pushed live element.
    #[inline]
    pub fn newest(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        let idx = self.index(self.input.wrapping_sub(1));
        Some(&self.storage[idx])
    }
}

/// Stores every value. Equivalent to having no strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectStore;

impl<T> InsertStrategy<T> for DirectStore {
    #[inline]
    fn insert(&mut self, mut site: InsertSite<'_, T>, value: T) -> bool {
        site.store(value);
        true
    }
}

/// Calls a closure for each insertion.
///
/// Construct with [`FnStrategy::new`] so the closure gets a signature that
/// works for every [`InsertSite`] lifetime.
#[derive(Debug, Clone, Copy)]
pub struct FnStrategy<F>(pub F);

impl<F> FnStrategy<F> {
    /// Wrap a closure as a strategy.
    pub fn new<T>(f: F) -> Self
    where
        F: FnMut(InsertSite<'_, T>, T) -> bool,
    {
        Self(f)
    }
}

impl<T, F> InsertStrategy<T> for FnStrategy<F>
where
    F: FnMut(InsertSite<'_, T>, T) -> bool,
{
    #[inline]
    fn insert(&mut self, site: InsertSite<'_, T>, value: T) -> bool {
        (self.0)(site, value)
    }
}

/// Stores a value only if the predicate accepts it.
#[derive(Debug, Clone, Copy)]
pub struct Filter<P>(pub P);

impl<T, P> InsertStrategy<T> for Filter<P>
where
    P: FnMut(&T) -> bool,
{
    #[inline]
    fn insert(&mut self, mut site: InsertSite<'_, T>, value: T) -> bool {
        if !(self.0)(&value) {
            return false;
        }
        site.store(value);
        true
    }
}

/// Rejects a value equal to the newest live element.
///
/// Collapses runs of repeated input such as key bounce or repeated status
/// codes. Once the ring drains, the next value is always accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DedupNewest;

impl<T: PartialEq> InsertStrategy<T> for DedupNewest {
    #[inline]
    fn insert(&mut self, mut site: InsertSite<'_, T>, value: T) -> bool {
        if site.newest() == Some(&value) {
            return false;
        }
        site.store(value);
        true
    }
}
