//! Polygon utilities: winding, normals, and hit testing.

use cgmath::InnerSpace;
use itertools::Itertools;

use crate::{Float, Vec2, Vec3};

/// Returns twice the signed area of a 2D polygon. The result is positive if
/// the vertices are in counterclockwise order (with +Y up).
pub fn signed_area_2x(verts: &[Vec2]) -> Float {
    verts
        .iter()
        .circular_tuple_windows()
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum()
}

/// Returns the signed area of a 2D polygon. The result is positive if the
/// vertices are in counterclockwise order (with +Y up).
pub fn signed_area(verts: &[Vec2]) -> Float {
    signed_area_2x(verts) / 2.0
}

/// Returns whether `point` is inside a simple polygon, using an even-odd ray
/// cast toward +X.
pub fn point_in_polygon(point: Vec2, verts: &[Vec2]) -> bool {
    let mut inside = false;
    for (a, b) in verts.iter().circular_tuple_windows() {
        if (a.y > point.y) != (b.y > point.y) {
            let x_at_y = a.x + (point.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if point.x < x_at_y {
                inside = !inside;
            }
        }
    }
    inside
}

/// Returns the unnormalized normal of a planar 3D polygon using Newell's
/// method. For counterclockwise vertices, the normal points toward the viewer.
pub fn polygon_normal(verts: impl IntoIterator<Item = Vec3>) -> Vec3 {
    let verts = verts.into_iter().collect_vec();
    verts
        .iter()
        .circular_tuple_windows()
        .map(|(a, b)| {
            Vec3::new(
                (a.y - b.y) * (a.z + b.z),
                (a.z - b.z) * (a.x + b.x),
                (a.x - b.x) * (a.y + b.y),
            )
        })
        .fold(Vec3::new(0.0, 0.0, 0.0), |acc, n| acc + n)
}

/// Returns the unit normal of a planar 3D polygon, or `None` if it is
/// degenerate.
pub fn polygon_unit_normal(verts: impl IntoIterator<Item = Vec3>) -> Option<Vec3> {
    let n = polygon_normal(verts);
    let mag = n.magnitude();
    (mag > Float::EPSILON).then(|| n / mag)
}

/// Returns the average of a set of points.
pub fn centroid(verts: impl IntoIterator<Item = Vec3>) -> Vec3 {
    let mut count = 0;
    let mut sum = Vec3::new(0.0, 0.0, 0.0);
    for v in verts {
        sum += v;
        count += 1;
    }
    if count == 0 {
        sum
    } else {
        sum / count as Float
    }
}

/// Reverses `face` in place if its normal points toward `inside` rather than
/// away from it, so that the vertices wind counterclockwise when seen from
/// outside the solid.
pub fn orient_face_outward(face: &mut [usize], verts: &[Vec3], inside: Vec3) {
    let normal = polygon_normal(face.iter().map(|&i| verts[i]));
    let face_center = centroid(face.iter().map(|&i| verts[i]));
    if normal.dot(face_center - inside) < 0.0 {
        face.reverse();
    }
}
