//! Vector, rotation, projection, and circle geometry primitives.
//!
//! Everything in this crate is a pure function of its inputs. Puzzle state
//! lives in `trefoil_puzzle`; this crate only knows about points.

pub use {approx, cgmath};

/// Floating-point type used for geometry.
pub type Float = f64;

/// 3D vector used for piece positions and vertices.
pub type Vec3 = cgmath::Vector3<Float>;
/// 2D vector used for screen-space and trefoil-diagram positions.
pub type Vec2 = cgmath::Vector2<Float>;
/// 3x3 matrix used for camera transforms.
pub type Mat3 = cgmath::Matrix3<Float>;

/// Tolerance used for layer membership and vertex classification.
///
/// This is deliberately coarse: piece coordinates are multiples of 1/2 on the
/// cube and well separated on the other puzzles, so anything within 0.01 of a
/// boundary is on it.
pub const EPSILON: Float = 0.01;

/// Full turn, in radians.
pub const TAU: Float = std::f64::consts::TAU;

/// Asserts that both arguments are approximately equal, using a much tighter
/// tolerance than [`EPSILON`].
#[macro_export]
macro_rules! assert_approx_eq {
    ($a:expr, $b:expr $(,)?) => {
        $crate::approx::assert_abs_diff_eq!($a, $b, epsilon = 1e-9)
    };
}

pub mod approx_cmp;
pub mod circle;
pub mod interpolate;
pub mod polygon;
pub mod projection;
pub mod rotation;

/// Structs, traits, functions, and constants.
pub mod prelude {
    pub use cgmath::{InnerSpace, Matrix, SquareMatrix, Zero};

    pub use crate::approx_cmp::*;
    pub use crate::circle::*;
    pub use crate::interpolate::InterpolateFn;
    pub use crate::polygon::*;
    pub use crate::projection::*;
    pub use crate::rotation::*;
    pub use crate::{EPSILON, Float, Mat3, TAU, Vec2, Vec3};
}
pub use prelude::*;
