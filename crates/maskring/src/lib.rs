//! maskring - Fixed-Capacity Ring Buffer with Power-of-Two Masking
//!
//! A single-threaded FIFO ring buffer whose `N` slots live inline in the
//! struct. Free-running cursors tell full from empty without a flag, and
//! physical slots are found by masking with `N - 1`.
//!
//! # Key Features
//!
//! - Inline `[T; N]` storage, no allocation
//! - Compile-time capacity check, plus a run-time `try_*` path
//! - Pluggable [`InsertStrategy`] able to transform or reject pushes
//! - Bulk string transfers with C-string termination and skip/halt predicates
//!
//! # Example
//!
//! ```
//! use maskring_rs::{OnMatch, RingBuffer};
//!
//! let mut rx: RingBuffer<u8, 64> = RingBuffer::new();
//! rx.push_string(b"AT+OK\r\n");
//!
//! let mut line = [0u8; 16];
//! let n = rx.pop_cstring_cond(&mut line, |b| *b == b'\r' || *b == b'\n', OnMatch::Skip);
//! assert_eq!(&line[..=n], b"AT+OK\0");
//! ```
//!
//! # Concurrency
//!
//! There is no internal synchronization. Mutation needs `&mut self`, so
//! sharing a ring between threads means wrapping it in a lock.

mod bulk;
mod capacity;
mod error;
mod invariants;
mod ring;
mod strategy;

pub use bulk::OnMatch;
pub use capacity::{
    check_capacity, is_valid_capacity, mask, Cursor, RingBuffer16, RingBuffer1K, RingBuffer256,
    RingBuffer64, MAX_CAPACITY,
};
pub use error::RingError;
pub use ring::{Iter, RingBuffer};
pub use strategy::{DedupNewest, DirectStore, Filter, FnStrategy, InsertSite, InsertStrategy};
