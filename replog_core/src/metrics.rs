//! Strength metric derivation.
//!
//! The one-rep-max estimate uses the Epley formula:
//! `weight * (1 + reps / 30)`, truncated to a whole number.

/// Estimate a one-rep-max from a submaximal weight/reps pair.
///
/// Defined for reps > 0. With reps = 0 the formula degenerates to the
/// weight itself, which is returned rather than treated as an error.
pub fn estimate_one_rep_max(weight: f64, reps: u32) -> u32 {
    (weight * (1.0 + reps as f64 / 30.0)) as u32
}
