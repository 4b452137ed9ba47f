//! # Numerical precision
//!
//! Helpers for values that should be non-negative or zero but drift because of round-off.
use num_traits::Float;

/// What happened to a value that should not be negative.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Clamped {
    /// The value was not negative and was left alone.
    No,
    /// The value was negative but within the tolerance, and was set to zero.
    WithinTolerance,
    /// The value was more negative than the tolerance, and was still set to zero.
    BeyondTolerance,
}

/// Set a value that should be non-negative to zero if it is negative.
///
/// # Arguments
///
/// * `value`: Value to correct in place.
/// * `epsilon`: Positive tolerance used only to classify the correction.
pub fn clamp_non_negative<F: Float>(value: &mut F, epsilon: F) -> Clamped {
    debug_assert!(epsilon > F::zero());

    if *value >= F::zero() {
        Clamped::No
    } else {
        let clamped = if -*value <= epsilon {
            Clamped::WithinTolerance
        } else {
            Clamped::BeyondTolerance
        };
        *value = F::zero();
        clamped
    }
}

/// Value, or zero if its magnitude is below `epsilon`.
pub fn round_to_zero<F: Float>(value: F, epsilon: F) -> F {
    if value.abs() < epsilon {
        F::zero()
    } else {
        value
    }
}
