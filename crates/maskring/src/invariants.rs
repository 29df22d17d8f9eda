//! Debug assertion macros for ring buffer invariants.
//!
//! Only active with `debug_assertions`; release builds carry no checks.
//! Cursors wrap, so every comparison is made on the modular distance rather
//! than on raw cursor values.

// =============================================================================
// Bounded Count
// =============================================================================

/// Assert that the live count does not exceed capacity.
///
/// **Invariant**: `0 ≤ input.wrapping_sub(output) ≤ N`
///
/// Used in: `push_front()` after advancing `input`
macro_rules! debug_assert_bounded_count {
    ($count:expr, $capacity:expr) => {
        debug_assert!(
            $count <= $capacity,
            "bounded count violated: count {} exceeds capacity {}",
            $count,
            $capacity
        )
    };
}

/// Assert that `output` does not advance past `input`.
///
/// **Invariant**: `new_output.wrapping_sub(old_output) ≤ input.wrapping_sub(old_output)`
///
/// Used in: `pop_back()` before storing the new output cursor
macro_rules! debug_assert_output_not_past_input {
    ($old_output:expr, $new_output:expr, $input:expr) => {
        debug_assert!(
            $new_output.wrapping_sub($old_output) <= $input.wrapping_sub($old_output),
            "cursor order violated: advancing output {} -> {} beyond input {}",
            $old_output,
            $new_output,
            $input
        )
    };
}

// =============================================================================
// Single-step Progress
// =============================================================================

/// Assert that a cursor moved forward by exactly one slot (modulo wrap).
///
/// Used in: `push_front()` for `input`, `pop_back()` for `output`
macro_rules! debug_assert_single_step {
    ($name:literal, $old:expr, $new:expr) => {
        debug_assert!(
            $new.wrapping_sub($old) == 1,
            "{} moved from {} to {} (expected a single step)",
            $name,
            $old,
            $new
        )
    };
}

// =============================================================================
// Masked Index
// =============================================================================

/// Assert that a masked storage index lands inside the backing array.
///
/// Used in: slot lookups
macro_rules! debug_assert_slot_in_bounds {
    ($idx:expr, $capacity:expr) => {
        debug_assert!(
            $idx < $capacity,
            "masked index {} outside storage of {} slots",
            $idx,
            $capacity
        )
    };
}

pub(crate) use debug_assert_bounded_count;
pub(crate) use debug_assert_output_not_past_input;
pub(crate) use debug_assert_single_step;
pub(crate) use debug_assert_slot_in_bounds;
