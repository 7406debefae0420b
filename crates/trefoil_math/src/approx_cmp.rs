//! Approximate comparison functions that automatically use [`EPSILON`].

pub use approx::AbsDiffEq;

use crate::{EPSILON, Float};

/// Compares two numbers, but considers them equal if they are separated by less
/// than `EPSILON`.
///
/// Handles infinity specially.
pub fn approx_eq<T: AbsDiffEq<Epsilon = Float>>(a: &T, b: &T) -> bool {
    // use native float equality to handle infinities
    a == b || approx::abs_diff_eq!(a, b, epsilon = EPSILON)
}

/// Returns whether one number is less than another by at least `EPSILON`.
pub fn approx_lt(a: Float, b: Float) -> bool {
    a < b && !approx_eq(&a, &b)
}
/// Returns whether one number is greater than another by at least `EPSILON`.
pub fn approx_gt(a: Float, b: Float) -> bool {
    a > b && !approx_eq(&a, &b)
}
/// Returns whether one number is less than another or within `EPSILON` of it.
pub fn approx_lt_eq(a: Float, b: Float) -> bool {
    a < b || approx_eq(&a, &b)
}
/// Returns whether one number is greater than another or within `EPSILON` of
/// it.
pub fn approx_gt_eq(a: Float, b: Float) -> bool {
    a > b || approx_eq(&a, &b)
}

/// Returns the sign of `x` as `-1`, `0`, or `1`, treating anything within
/// `EPSILON` of zero as zero.
pub fn approx_signum(x: Float) -> i32 {
    if approx_gt(x, 0.0) {
        1
    } else if approx_lt(x, 0.0) {
        -1
    } else {
        0
    }
}

/// Returns `f` rounded to the nearest integer if it is approximately equal to
/// one.
pub fn to_approx_integer(f: Float) -> Option<i64> {
    let i = f.round() as i64;
    approx_eq(&f, &(i as Float)).then_some(i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approx_comparisons() {
        assert!(approx_eq(&1.0, &1.005));
        assert!(!approx_eq(&1.0, &1.02));
        assert!(approx_lt(1.0, 1.02));
        assert!(!approx_lt(1.0, 1.005));
        assert!(approx_lt_eq(1.0, 1.005));
        assert!(approx_gt_eq(1.005, 1.0));
        assert_eq!(approx_signum(-0.005), 0);
        assert_eq!(approx_signum(-0.5), -1);
        assert_eq!(to_approx_integer(2.999), Some(3));
        assert_eq!(to_approx_integer(2.5), None);
    }
}
