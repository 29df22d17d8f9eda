//! Capacity rules and cursor width.
//!
//! Cursors are fixed-width unsigned counters that grow without bound and wrap
//! through `wrapping_add`. Only the storage index is masked. For the modular
//! difference `input - output` to name a unique count in `0..=N`, `N` must
//! stay well below the cursor range, so capacities are capped at
//! [`MAX_CAPACITY`].

use crate::error::RingError;
use crate::ring::RingBuffer;

/// Producer/consumer cursor type.
pub type Cursor = u32;

/// Largest capacity whose counts stay unambiguous with a [`Cursor`]-wide counter.
pub const MAX_CAPACITY: usize = 1 << (Cursor::BITS - 1);

/// Returns true if `n` is a usable ring capacity.
#[inline]
pub const fn is_valid_capacity(n: usize) -> bool {
    n.is_power_of_two() && n <= MAX_CAPACITY
}

/// Validates `n` at run time.
///
/// # Example
///
/// ```
/// use maskring_rs::{check_capacity, RingError};
///
/// assert!(check_capacity(64).is_ok());
/// assert!(matches!(check_capacity(48), Err(RingError::InvalidCapacity { capacity: 48, .. })));
/// ```
pub fn check_capacity(n: usize) -> Result<(), RingError> {
    if is_valid_capacity(n) {
        Ok(())
    } else {
        log::warn!("rejecting ring capacity {n}: not a non-zero power of two <= {MAX_CAPACITY}");
        Err(RingError::InvalidCapacity {
            capacity: n,
            max: MAX_CAPACITY,
        })
    }
}

/// Index mask for a valid capacity: `n - 1`.
#[inline]
pub const fn mask(n: usize) -> usize {
    n.wrapping_sub(1)
}

/// Compile-time capacity check, referenced by the infallible constructors.
pub(crate) struct AssertCapacity<const N: usize>;

impl<const N: usize> AssertCapacity<N> {
    pub(crate) const OK: () = {
        assert!(N > 0, "RingBuffer capacity must be > 0");
        assert!(N.is_power_of_two(), "RingBuffer capacity must be a power of 2");
        assert!(N <= MAX_CAPACITY, "RingBuffer capacity exceeds cursor range");
    };
}

// =============================================================================
// TYPE ALIASES FOR COMMON CONFIGURATIONS
// =============================================================================

/// 16 slots - small command/line buffers.
pub type RingBuffer16<T> = RingBuffer<T, 16>;

/// 64 slots - typical UART/character FIFO.
pub type RingBuffer64<T> = RingBuffer<T, 64>;

/// 256 slots.
pub type RingBuffer256<T> = RingBuffer<T, 256>;

/// 1K slots.
pub type RingBuffer1K<T> = RingBuffer<T, 1024>;
