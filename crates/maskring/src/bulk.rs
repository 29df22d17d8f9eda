//! Bulk "string" transfers built on the scalar ring API.
//!
//! Every operation here is a loop over [`push_front`](RingBuffer::push_front),
//! [`peek`](RingBuffer::peek) and [`pop_back`](RingBuffer::pop_back). None of
//! them touch cursors or storage directly, and none allocate.
//!
//! The destination slice length is the transfer limit. The C-string variants
//! reserve the last slot they reach for a `T::default()` terminator.

use crate::ring::RingBuffer;
use crate::strategy::InsertStrategy;

/// What [`RingBuffer::pop_cstring_cond`] does with an element the predicate matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnMatch {
    /// Consume the element without copying it, then keep going.
    Skip,
    /// Stop before the element, leaving it in the ring.
    Halt,
}

impl<T, const N: usize, S: InsertStrategy<T>> RingBuffer<T, N, S> {
    /// Push elements of `src` in order until `src` runs out or the ring fills.
    ///
    /// Returns the number of elements accepted. An element the strategy
    /// rejects is not counted, and the loop moves on to the next one.
    ///
    /// # Example
    ///
    /// ```
    /// use maskring_rs::RingBuffer;
    ///
    /// let mut ring: RingBuffer<u8, 4> = RingBuffer::new();
    /// ring.push_front(0);
    /// assert_eq!(ring.push_string(b"hello"), 3);
    /// assert_eq!(ring.iter().copied().collect::<Vec<_>>(), b"\0hel");
    /// ```
    pub fn push_string(&mut self, src: &[T]) -> usize
    where
        T: Clone,
    {
        let mut accepted = 0;
        for item in src {
            if self.full() {
                break;
            }
            if self.push_front(item.clone()) {
                accepted += 1;
            }
        }
        accepted
    }

    /// [`push_string`](Self::push_string) over any iterator.
    ///
    /// Stops pulling from `iter` once the ring is full, so the remaining items
    /// stay in the iterator.
    pub fn push_iter<I>(&mut self, iter: I) -> usize
    where
        I: IntoIterator<Item = T>,
    {
        let mut iter = iter.into_iter();
        let mut accepted = 0;
        while !self.full() {
            let Some(item) = iter.next() else {
                break;
            };
            if self.push_front(item) {
                accepted += 1;
            }
        }
        accepted
    }

    /// Move up to `dest.len()` of the oldest elements into `dest`.
    ///
    /// No terminator is written. Default-valued elements are copied like any
    /// other.
    pub fn pop_string(&mut self, dest: &mut [T]) -> usize
    where
        T: Clone,
    {
        let mut written = 0;
        for slot in dest.iter_mut() {
            let Some(item) = self.peek(0) else {
                break;
            };
            slot.clone_from(item);
            self.pop_back();
            written += 1;
        }
        written
    }

    /// Like [`pop_string`](Self::pop_string), but writes a `T::default()`
    /// terminator after the copied elements.
    ///
    /// At most `dest.len() - 1` elements move. An empty `dest` receives nothing,
    /// not even the terminator.
    ///
    /// # Example
    ///
    /// ```
    /// use maskring_rs::RingBuffer;
    ///
    /// let mut ring: RingBuffer<u8, 8> = RingBuffer::new();
    /// ring.push_string(b"abcd");
    ///
    /// let mut dest = [0xffu8; 3];
    /// assert_eq!(ring.pop_cstring(&mut dest), 2);
    /// assert_eq!(&dest, b"ab\0");
    /// assert_eq!(ring.peek(0), Some(&b'c'));
    /// ```
    pub fn pop_cstring(&mut self, dest: &mut [T]) -> usize
    where
        T: Clone + Default,
    {
        let Some(limit) = dest.len().checked_sub(1) else {
            return 0;
        };
        let written = self.pop_string(&mut dest[..limit]);
        dest[written] = T::default();
        written
    }

    /// [`pop_cstring`](Self::pop_cstring) with a per-element early-stop policy.
    ///
    /// `predicate` runs on each oldest element before it is copied. For a match,
    /// `on_match` decides whether to [skip](OnMatch::Skip) it or
    /// [halt](OnMatch::Halt). The limit counts copied elements only, so skipped
    /// elements do not use up `dest`. The terminator is written however the
    /// loop ends.
    ///
    /// # Example
    ///
    /// ```
    /// use maskring_rs::{OnMatch, RingBuffer};
    ///
    /// let mut ring: RingBuffer<u8, 8> = RingBuffer::new();
    /// ring.push_string(&[1, 0, 2]);
    ///
    /// let mut dest = [9u8; 8];
    /// let n = ring.pop_cstring_cond(&mut dest, |v| *v == 0, OnMatch::Skip);
    /// assert_eq!(n, 2);
    /// assert_eq!(&dest[..3], &[1, 2, 0]);
    /// assert!(ring.empty());
    /// ```
    pub fn pop_cstring_cond<P>(&mut self, dest: &mut [T], mut predicate: P, on_match: OnMatch) -> usize
    where
        T: Clone + Default,
        P: FnMut(&T) -> bool,
    {
        let Some(limit) = dest.len().checked_sub(1) else {
            return 0;
        };

        let mut written = 0;
        while written < limit {
            let Some(item) = self.peek(0) else {
                break;
            };
            if predicate(item) {
                match on_match {
                    OnMatch::Skip => {
                        self.pop_back();
                        continue;
                    }
                    OnMatch::Halt => {
                        log::trace!("pop_cstring_cond halted after {written} elements");
                        break;
                    }
                }
            }
            dest[written].clone_from(item);
            self.pop_back();
            written += 1;
        }

        dest[written] = T::default();
        written
    }

    /// Pop one delimited record, such as a line, into `dest` as a C string.
    ///
    /// Copies up to the first `delimiter`, or until `dest` is full or the
    /// ring is empty. The delimiter is consumed, but not copied, when it comes
    /// right after the copied elements. Returns the number of elements copied.
    pub fn pop_cstring_until(&mut self, dest: &mut [T], delimiter: &T) -> usize
    where
        T: Clone + Default + PartialEq,
    {
        let written = self.pop_cstring_cond(dest, |v| v == delimiter, OnMatch::Halt);
        if !dest.is_empty() && self.peek(0) == Some(delimiter) {
            self.pop_back();
        }
        written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::Filter;

    #[test]
    fn test_push_string_into_partial_ring() {
        // The loop must continue while the ring is NOT full.
        let mut ring: RingBuffer<u8, 8> = RingBuffer::new();
        ring.extend([1, 2, 3]);

        assert_eq!(ring.push_string(&[4, 5, 6, 7, 8, 9, 10]), 5);
        assert!(ring.full());
        assert_eq!(ring.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_push_string_into_full_ring() {
        let mut ring: RingBuffer<u8, 2> = RingBuffer::new();
        ring.extend([1, 2]);
        assert_eq!(ring.push_string(&[3]), 0);
        assert_eq!(ring.cursors(), (2, 0));
    }

    #[test]
    fn test_push_string_counts_only_accepted() {
        let mut ring: RingBuffer<u8, 4, _> = RingBuffer::with_strategy(Filter(|v: &u8| *v != 0));
        assert_eq!(ring.push_string(&[1, 0, 2, 0, 3]), 3);
        assert_eq!(ring.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_push_iter_leaves_remainder() {
        let mut ring: RingBuffer<u32, 4> = RingBuffer::new();
        let mut source = 0..10;
        assert_eq!(ring.push_iter(&mut source), 4);
        assert_eq!(source.next(), Some(4));
    }

    #[test]
    fn test_pop_string_copies_defaults_verbatim() {
        let mut ring: RingBuffer<u8, 8> = RingBuffer::new();
        ring.push_string(&[0, 1, 0, 2]);

        let mut dest = [9u8; 6];
        assert_eq!(ring.pop_string(&mut dest), 4);
        assert_eq!(dest, [0, 1, 0, 2, 9, 9]);
        assert!(ring.empty());
    }

    #[test]
    fn test_pop_string_respects_limit() {
        let mut ring: RingBuffer<u8, 8> = RingBuffer::new();
        ring.push_string(&[1, 2, 3, 4]);

        let mut dest = [0u8; 10];
        assert_eq!(ring.pop_string(&mut dest[..3]), 3);
        assert_eq!(ring.count(), 1);
        assert_eq!(ring.peek(0), Some(&4));
    }

    #[test]
    fn test_pop_cstring_empty_ring_still_terminates() {
        let mut ring: RingBuffer<u8, 4> = RingBuffer::new();
        let mut dest = [7u8; 2];
        assert_eq!(ring.pop_cstring(&mut dest), 0);
        assert_eq!(dest, [0, 7]);
    }

    #[test]
    fn test_pop_cstring_zero_length_dest() {
        let mut ring: RingBuffer<u8, 4> = RingBuffer::new();
        ring.push_front(1);
        assert_eq!(ring.pop_cstring(&mut []), 0);
        assert_eq!(ring.pop_cstring_cond(&mut [], |_| false, OnMatch::Skip), 0);
        assert_eq!(ring.count(), 1);
    }

    #[test]
    fn test_pop_cstring_single_slot_dest() {
        let mut ring: RingBuffer<u8, 4> = RingBuffer::new();
        ring.push_front(1);
        let mut dest = [5u8];
        assert_eq!(ring.pop_cstring(&mut dest), 0);
        assert_eq!(dest, [0]);
        assert_eq!(ring.count(), 1);
    }

    #[test]
    fn test_cond_halt_leaves_match() {
        let mut ring: RingBuffer<u8, 8> = RingBuffer::new();
        ring.push_string(b"ab*cd");

        let mut dest = [0xffu8; 8];
        let n = ring.pop_cstring_cond(&mut dest, |v| *v == b'*', OnMatch::Halt);
        assert_eq!(n, 2);
        assert_eq!(&dest[..3], b"ab\0");
        assert_eq!(ring.peek(0), Some(&b'*'));
        assert_eq!(ring.count(), 3);
    }

    #[test]
    fn test_cond_skip_does_not_spend_limit() {
        let mut ring: RingBuffer<u8, 8> = RingBuffer::new();
        ring.push_string(&[0, 0, 0, 1, 2, 3]);

        let mut dest = [9u8; 3];
        let n = ring.pop_cstring_cond(&mut dest, |v| *v == 0, OnMatch::Skip);
        assert_eq!(n, 2);
        assert_eq!(dest, [1, 2, 0]);
        assert_eq!(ring.peek(0), Some(&3));
    }

    #[test]
    fn test_pop_cstring_until_consumes_delimiter() {
        let mut ring: RingBuffer<u8, 16> = RingBuffer::new();
        ring.push_string(b"ls\ncd /\n");

        let mut line = [0u8; 8];
        assert_eq!(ring.pop_cstring_until(&mut line, &b'\n'), 2);
        assert_eq!(&line[..3], b"ls\0");
        assert_eq!(ring.pop_cstring_until(&mut line, &b'\n'), 4);
        assert_eq!(&line[..5], b"cd /\0");
        assert!(ring.empty());
    }

    #[test]
    fn test_pop_cstring_until_partial_record() {
        let mut ring: RingBuffer<u8, 16> = RingBuffer::new();
        ring.push_string(b"abc");

        let mut line = [0u8; 8];
        assert_eq!(ring.pop_cstring_until(&mut line, &b'\n'), 3);
        assert_eq!(&line[..4], b"abc\0");
        assert!(ring.empty());
    }
}
