use serde::{Deserialize, Serialize};
use trefoil_math::prelude::*;

use crate::ViewPreferences;

/// Maximum pitch in either direction, in degrees.
const MAX_PITCH: Float = 90.0;

/// Camera orbiting the puzzle.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Camera {
    /// Rotation about the vertical axis, in degrees.
    pub yaw: Float,
    /// Rotation about the horizontal axis, in degrees.
    pub pitch: Float,
    /// Field of view, in degrees.
    pub fov: Float,
    /// Size of the puzzle relative to the view.
    pub scale: Float,
    /// Degrees of rotation per unit of drag.
    pub drag_sensitivity: Float,
}
impl Default for Camera {
    fn default() -> Self {
        Self::from_prefs(&ViewPreferences::default())
    }
}
impl Camera {
    /// Constructs a camera from view preferences.
    pub fn from_prefs(prefs: &ViewPreferences) -> Self {
        Self {
            yaw: prefs.yaw,
            pitch: prefs.pitch.clamp(-MAX_PITCH, MAX_PITCH),
            fov: prefs.fov,
            scale: prefs.scale,
            drag_sensitivity: prefs.drag_sensitivity,
        }
    }

    /// Returns the rotation from world space to view space.
    pub fn rotation(&self) -> Mat3 {
        view_rotation(self.yaw, self.pitch)
    }

    /// Rotates the camera in response to a mouse drag. Positive `dx` turns
    /// the front of the puzzle right and positive `dy` tilts it up.
    pub fn drag(&mut self, dx: Float, dy: Float) {
        if !(dx.is_finite() && dy.is_finite()) {
            return;
        }
        self.yaw = (self.yaw + dx * self.drag_sensitivity).rem_euclid(360.0);
        self.pitch = (self.pitch - dy * self.drag_sensitivity).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Projects a world-space point onto the screen, with +Y up. `radius` is
    /// the radius of the puzzle, which is scaled to fit the view.
    ///
    /// The Z coordinate of the result is the view-space depth; larger is
    /// nearer. Returns `None` for points behind the camera.
    pub fn project(&self, point: Vec3, radius: Float) -> Option<Vec3> {
        let radius = if radius > EPSILON { radius } else { 1.0 };
        let view = self.rotation() * (point / radius);
        let p = project_perspective(view, perspective_factor(self.fov))?;
        Some(Vec3::new(p.x * self.scale, p.y * self.scale, p.z))
    }

    /// Converts a direction on the screen (+Y up) to a direction in world
    /// space, ignoring perspective.
    pub fn screen_to_world(&self, direction: Vec2) -> Vec3 {
        self.rotation().transpose() * Vec3::new(direction.x, direction.y, 0.0)
    }
}
