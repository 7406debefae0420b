//! Rotations about cardinal axes and arbitrary unit axes.

use cgmath::InnerSpace;

use crate::{Float, Vec3};

/// Returns the two coordinate indices perpendicular to a cardinal `axis`, in
/// cyclic order (X → (Y, Z), Y → (Z, X), Z → (X, Y)).
///
/// Rotating from the first to the second is a positive (counterclockwise)
/// rotation about `axis` by the right-hand rule.
pub const fn perpendicular_axes(axis: u8) -> (usize, usize) {
    match axis % 3 {
        0 => (1, 2),
        1 => (2, 0),
        _ => (0, 1),
    }
}

/// Returns the unit vector along a cardinal `axis`.
pub fn cardinal_vector(axis: u8) -> Vec3 {
    let mut ret = Vec3::new(0.0, 0.0, 0.0);
    ret[axis as usize % 3] = 1.0;
    ret
}

/// Rotates `v` by `dir` quarter turns about a cardinal `axis`.
///
/// Each quarter turn maps the perpendicular coordinates `(a, b)` to `(-b, a)`,
/// which only ever negates and swaps numbers, so repeated application
/// accumulates no floating-point error.
pub fn rotate_cardinal(mut v: Vec3, axis: u8, dir: i32) -> Vec3 {
    let (i, j) = perpendicular_axes(axis);
    match dir.rem_euclid(4) {
        0 => (),
        1 => (v[i], v[j]) = (-v[j], v[i]),
        2 => (v[i], v[j]) = (-v[i], -v[j]),
        _ => (v[i], v[j]) = (v[j], -v[i]),
    }
    v
}

/// Rotates `v` by `angle` radians about the unit vector `axis` using
/// Rodrigues' rotation formula.
///
/// Positive angles are counterclockwise when looking down `axis` toward the
/// origin.
pub fn rotate_about_axis(v: Vec3, axis: Vec3, angle: Float) -> Vec3 {
    let (sin, cos) = angle.sin_cos();
    v * cos + axis.cross(v) * sin + axis * (axis.dot(v) * (1.0 - cos))
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use approx::assert_abs_diff_eq;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_cardinal_quarter_turns() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        // Positive quarter turn about Z sends +X to +Y.
        assert_eq!(rotate_cardinal(v, 2, 1), Vec3::new(-2.0, 1.0, 3.0));
        assert_eq!(rotate_cardinal(v, 0, 1), Vec3::new(1.0, -3.0, 2.0));
        assert_eq!(rotate_cardinal(v, 1, -1), Vec3::new(-3.0, 2.0, 1.0));
        for axis in 0..3 {
            assert_eq!(rotate_cardinal(v, axis, 4), v);
            assert_eq!(rotate_cardinal(rotate_cardinal(v, axis, 1), axis, -1), v);
        }
    }

    #[test]
    fn test_rodrigues_matches_cardinal() {
        let v = Vec3::new(0.3, -1.5, 2.25);
        for axis in 0..3 {
            for dir in [-1, 1, 2] {
                let expected = rotate_cardinal(v, axis, dir);
                let actual = rotate_about_axis(v, cardinal_vector(axis), FRAC_PI_2 * dir as Float);
                assert_abs_diff_eq!(expected, actual, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_rodrigues_preserves_length() {
        let axis = Vec3::new(1.0, 1.0, 1.0).normalize();
        let v = Vec3::new(1.0, 0.0, 0.0);
        let w = rotate_about_axis(v, axis, 2.0 * PI / 3.0);
        assert_abs_diff_eq!(w, Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-9);
        assert_abs_diff_eq!(w.magnitude(), 1.0, epsilon = 1e-12);
    }
}
