//! Circle geometry for the trefoil diagram.

use std::f64::consts::PI;

use cgmath::InnerSpace;

use crate::{EPSILON, Float, TAU, Vec2};

/// Circle in the plane.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Circle {
    /// Center of the circle.
    pub center: Vec2,
    /// Radius of the circle.
    pub radius: Float,
}
impl Circle {
    /// Constructs a circle.
    pub fn new(center: Vec2, radius: Float) -> Self {
        Self { center, radius }
    }

    /// Returns the point on the circle at `angle` radians, measured from the
    /// +X axis toward +Y.
    pub fn point_at_angle(self, angle: Float) -> Vec2 {
        self.center + Vec2::new(angle.cos(), angle.sin()) * self.radius
    }

    /// Returns the angle of `point` around the center of the circle.
    pub fn angle_of(self, point: Vec2) -> Float {
        let d = point - self.center;
        d.y.atan2(d.x)
    }

    /// Returns whether `point` is inside or on the circle.
    pub fn contains(self, point: Vec2) -> bool {
        (point - self.center).magnitude2() <= self.radius * self.radius
    }
}

/// Returns one of the two intersection points of two circles.
///
/// If `pick_inner` is `true`, returns the solution closer to `reference`;
/// otherwise returns the one farther from it. Nearly concentric circles return
/// the center of the first circle. Circles that do not touch are treated as
/// tangent, which puts the result on the line between the centers.
pub fn circle_intersection(
    c1: Vec2,
    r1: Float,
    c2: Vec2,
    r2: Float,
    pick_inner: bool,
    reference: Vec2,
) -> Vec2 {
    let delta = c2 - c1;
    let d = delta.magnitude();
    if d < EPSILON {
        return c1;
    }

    // Distance from `c1` along the center line to the radical line.
    let a = (r1 * r1 - r2 * r2 + d * d) / (2.0 * d);
    let h = (r1 * r1 - a * a).max(0.0).sqrt();

    let unit = delta / d;
    let base = c1 + unit * a;
    let perp = Vec2::new(-unit.y, unit.x) * h;
    let p1 = base + perp;
    let p2 = base - perp;

    let p1_is_closer = (p1 - reference).magnitude2() <= (p2 - reference).magnitude2();
    if p1_is_closer == pick_inner { p1 } else { p2 }
}

/// Normalizes an angle to the range `(-PI, PI]`.
pub fn normalize_angle(angle: Float) -> Float {
    let ret = (angle + PI).rem_euclid(TAU) - PI;
    if ret <= -PI { ret + TAU } else { ret }
}

/// Returns the signed angle of the shortest rotation from `from` to `to`.
pub fn shortest_angle_delta(from: Float, to: Float) -> Float {
    normalize_angle(to - from)
}

/// Makes every nonzero delta in `deltas` sweep in the same direction as the
/// majority of them, by adding or subtracting a full turn from those that
/// disagree.
///
/// Stickers that rotate together can independently compute shortest paths
/// with opposite signs (a half turn is ambiguous, and floating-point noise can
/// push either way), so this keeps them visually in sync. Zero deltas are not
/// counted and never changed. If there is a tie, there is no majority and
/// nothing changes.
pub fn majority_vote_arcs(deltas: &mut [Float]) {
    let positive = deltas.iter().filter(|&&d| d > 0.0).count();
    let negative = deltas.iter().filter(|&&d| d < 0.0).count();

    if positive > negative {
        for d in deltas.iter_mut().filter(|d| **d < 0.0) {
            *d += TAU;
        }
    } else if negative > positive {
        for d in deltas.iter_mut().filter(|d| **d > 0.0) {
            *d -= TAU;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_circle_intersection_branches() {
        let origin = Vec2::new(0.0, 0.0);
        let c1 = Vec2::new(-1.0, 0.0);
        let c2 = Vec2::new(1.0, 0.0);
        let r = 2.0_f64.sqrt();

        let inner = circle_intersection(c1, r, c2, r, true, Vec2::new(0.0, 5.0));
        let outer = circle_intersection(c1, r, c2, r, false, Vec2::new(0.0, 5.0));
        assert_abs_diff_eq!(inner, Vec2::new(0.0, 1.0), epsilon = 1e-9);
        assert_abs_diff_eq!(outer, Vec2::new(0.0, -1.0), epsilon = 1e-9);

        // Concentric circles fall back to the first center.
        assert_eq!(circle_intersection(c1, 1.0, c1, 2.0, true, origin), c1);

        // Disjoint circles land on the center line.
        let p = circle_intersection(c1, 0.5, c2, 0.5, true, origin);
        assert_abs_diff_eq!(p, Vec2::new(0.0, 0.0), epsilon = 1e-9);
    }

    proptest! {
        #[test]
        fn proptest_circle_intersection_is_on_both_circles(
            x1 in -5.0..5.0_f64, y1 in -5.0..5.0_f64,
            x2 in -5.0..5.0_f64, y2 in -5.0..5.0_f64,
            t in 0.2..0.8_f64, slack in 0.05..2.0_f64,
            rx in -5.0..5.0_f64, ry in -5.0..5.0_f64,
            pick_inner: bool,
        ) {
            let c1 = Vec2::new(x1, y1);
            let c2 = Vec2::new(x2, y2);
            let d = (c2 - c1).magnitude();
            prop_assume!(d > 0.1);
            // Choose radii that are guaranteed to intersect.
            let r1 = d * t + slack;
            let r2 = d * (1.0 - t) + slack;
            let reference = Vec2::new(rx, ry);

            let p = circle_intersection(c1, r1, c2, r2, pick_inner, reference);
            prop_assert!(((p - c1).magnitude() - r1).abs() < 1e-6);
            prop_assert!(((p - c2).magnitude() - r2).abs() < 1e-6);

            let q = circle_intersection(c1, r1, c2, r2, !pick_inner, reference);
            let p_dist = (p - reference).magnitude();
            let q_dist = (q - reference).magnitude();
            if pick_inner {
                prop_assert!(p_dist <= q_dist + 1e-9);
            } else {
                prop_assert!(p_dist + 1e-9 >= q_dist);
            }
        }
    }

    #[test]
    fn test_shortest_angle_delta() {
        assert_abs_diff_eq!(shortest_angle_delta(0.0, FRAC_PI_2), FRAC_PI_2, epsilon = 1e-12);
        assert_abs_diff_eq!(shortest_angle_delta(3.0, -3.0), TAU - 6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(shortest_angle_delta(0.0, PI), PI);
        assert_abs_diff_eq!(shortest_angle_delta(0.0, -PI), PI);
    }

    #[test]
    fn test_majority_vote_arcs() {
        let mut deltas = [FRAC_PI_2, FRAC_PI_2, -PI, 0.0];
        majority_vote_arcs(&mut deltas);
        assert_abs_diff_eq!(deltas[2], PI, epsilon = 1e-12);
        assert_eq!(deltas[3], 0.0);
        assert!(deltas.iter().all(|&d| d >= 0.0));

        let mut deltas = [-0.5, -0.25, PI];
        majority_vote_arcs(&mut deltas);
        assert_abs_diff_eq!(deltas[2], -PI, epsilon = 1e-12);

        // Unanimous input is untouched.
        let unanimous = [0.1, 0.2, PI];
        let mut deltas = unanimous;
        majority_vote_arcs(&mut deltas);
        assert_eq!(deltas, unanimous);

        // Ties have no majority.
        let tied = [0.5, -0.5];
        let mut deltas = tied;
        majority_vote_arcs(&mut deltas);
        assert_eq!(deltas, tied);
    }

    proptest! {
        #[test]
        fn proptest_majority_vote_shares_sign(
            mut deltas in proptest::collection::vec(-PI..PI, 1..20),
        ) {
            let positive = deltas.iter().filter(|&&d| d > 0.0).count();
            let negative = deltas.iter().filter(|&&d| d < 0.0).count();
            majority_vote_arcs(&mut deltas);
            if positive > negative {
                prop_assert!(deltas.iter().all(|&d| d >= 0.0));
            } else if negative > positive {
                prop_assert!(deltas.iter().all(|&d| d <= 0.0));
            }
        }
    }
}
