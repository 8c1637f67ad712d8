//! Tolerance constants shared by every assembly step
//!
//! Section boundaries and probabilities coming from independent assessments
//! carry floating-point roundoff. Probabilities are compared relative to their
//! magnitude with [`is_negligible_difference`]. Section boundaries are
//! compared with the fixed distance [`SECTION_BOUNDARY_TOLERANCE`] through
//! [`boundaries_coincide`], so a short section far along the reference line is
//! as distinct as one near its start.

use std::cmp::Ordering;

/// Lower bound of the scale used for relative comparisons
pub const ABSOLUTE_TOLERANCE: f64 = 1e-9;

/// Relative tolerance applied to the larger magnitude of two values
pub const RELATIVE_TOLERANCE: f64 = 1e-6;

/// Largest distance (in metres) at which two section boundaries are the same boundary
pub const SECTION_BOUNDARY_TOLERANCE: f64 = 1e-8;

/// Check whether two values differ by a negligible amount
///
/// `|a - b| <= RELATIVE_TOLERANCE * max(|a|, |b|, ABSOLUTE_TOLERANCE)`.
/// NaN is never negligibly different from anything.
pub fn is_negligible_difference(a: f64, b: f64) -> bool {
    if a.is_nan() || b.is_nan() {
        return false;
    }
    let scale = a.abs().max(b.abs()).max(ABSOLUTE_TOLERANCE);
    (a - b).abs() <= RELATIVE_TOLERANCE * scale
}

/// Check whether two positions on the reference line are the same boundary
///
/// Non-finite positions never coincide.
pub fn boundaries_coincide(a: f64, b: f64) -> bool {
    a.is_finite() && b.is_finite() && (a - b).abs() <= SECTION_BOUNDARY_TOLERANCE
}

/// Compare two values, treating negligible differences as equal
///
/// Returns `None` when either value is NaN.
pub fn tolerant_cmp(a: f64, b: f64) -> Option<Ordering> {
    if a.is_nan() || b.is_nan() {
        None
    } else if is_negligible_difference(a, b) {
        Some(Ordering::Equal)
    } else {
        a.partial_cmp(&b)
    }
}
