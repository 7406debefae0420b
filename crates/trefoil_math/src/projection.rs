//! Camera rotation and perspective projection.

use cgmath::{Deg, Matrix3};

use crate::{Float, Mat3, Vec3};

/// Perspective divisors smaller than this are considered behind the camera.
const Z_NEAR_CLIPPING_DIVISOR: Float = 0.0;

/// Returns the view rotation for a camera orbiting the origin.
///
/// `yaw` rotates about +Y and is applied first; `pitch` rotates about +X. Both
/// are in degrees. Positive pitch tilts the top of the puzzle toward the
/// viewer.
pub fn view_rotation(yaw: Float, pitch: Float) -> Mat3 {
    Matrix3::from_angle_x(Deg(pitch)) * Matrix3::from_angle_y(Deg(yaw))
}

/// Returns the perspective factor for a field of view in degrees.
pub fn perspective_factor(fov: Float) -> Float {
    (fov.to_radians() / 2.0).tan()
}

/// Projects a 3D point according to the perspective projection.
///
/// `point` is in view space, normalized so that the whole puzzle fits in the
/// unit ball, with +Z toward the camera. The divisor keeps Z=1 fixed
/// regardless of the FOV, so the front of the puzzle stays the same size as
/// the FOV changes. Returns `None` for points behind the camera.
///
/// The returned Z coordinate is the view-space depth; larger is nearer.
pub fn project_perspective(point: Vec3, perspective_factor: Float) -> Option<Vec3> {
    let divisor = 1.0 + (1.0 - point.z) * perspective_factor;

    // Clip geometry that is behind the camera.
    if divisor <= Z_NEAR_CLIPPING_DIVISOR {
        return None;
    }

    Some(Vec3::new(point.x / divisor, point.y / divisor, point.z))
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use cgmath::InnerSpace;

    use super::*;

    #[test]
    fn test_view_rotation() {
        let identity = view_rotation(0.0, 0.0);
        assert_abs_diff_eq!(identity * Vec3::unit_x(), Vec3::unit_x(), epsilon = 1e-12);

        // Yaw of 90 degrees brings +Z (front) to +X (right).
        let yawed = view_rotation(90.0, 0.0);
        assert_abs_diff_eq!(yawed * Vec3::unit_z(), Vec3::unit_x(), epsilon = 1e-12);

        // Positive pitch brings +Y (top) toward +Z (camera).
        let pitched = view_rotation(0.0, 30.0);
        assert!((pitched * Vec3::unit_y()).z > 0.0);
        assert_abs_diff_eq!((pitched * Vec3::unit_y()).magnitude(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_project_perspective() {
        let f = perspective_factor(30.0);
        let front = project_perspective(Vec3::new(0.5, 0.5, 1.0), f).unwrap();
        assert_abs_diff_eq!(front, Vec3::new(0.5, 0.5, 1.0), epsilon = 1e-12);

        // Farther points appear smaller.
        let back = project_perspective(Vec3::new(0.5, 0.5, -1.0), f).unwrap();
        assert!(back.x < 0.5 && back.y < 0.5);

        // Points behind the camera are clipped.
        assert_eq!(project_perspective(Vec3::new(0.0, 0.0, 100.0), f), None);
    }
}
