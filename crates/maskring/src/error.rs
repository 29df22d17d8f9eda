//! Error types for ring buffer operations.

use thiserror::Error;

/// Errors reported by the `try_*` ring operations and the fallible constructors.
///
/// None of these leave the buffer in a modified state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RingError {
    /// The ring buffer is at capacity.
    #[error("ring buffer is full")]
    Full,

    /// The insertion strategy declined the value.
    #[error("insertion strategy rejected the value")]
    Rejected,

    /// The ring buffer holds no elements.
    #[error("ring buffer is empty")]
    Empty,

    /// A peek offset at or beyond the current element count.
    #[error("offset {offset} is out of range (count {count})")]
    OutOfRange {
        /// Requested offset from the oldest element.
        offset: usize,
        /// Number of live elements at the time of the call.
        count: usize,
    },

    /// Capacity is zero, not a power of two, or too large for the cursor width.
    #[error("invalid capacity {capacity}: must be a non-zero power of two no larger than {max}")]
    InvalidCapacity {
        /// The rejected capacity.
        capacity: usize,
        /// The largest accepted capacity.
        max: usize,
    },
}

impl RingError {
    /// Returns `true` for conditions the caller can retry or branch on.
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        !self.is_config()
    }

    /// Returns `true` if this is a construction-time configuration error.
    #[inline]
    pub fn is_config(&self) -> bool {
        matches!(self, Self::InvalidCapacity { .. })
    }
}
