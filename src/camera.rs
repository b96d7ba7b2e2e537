//! The fixed scene camera.
//!
//! The chair is viewed from a single hard-coded vantage point; there is no
//! runtime camera control. The view matrix never changes, and the projection
//! only changes when the window aspect ratio does.

use glam::{Mat4, Vec3};

/// A fixed perspective camera.
///
/// Holds the eye/target/up configuration plus the vertical field of view and
/// clip planes. The combined view-projection matrix is recomputed only when
/// the aspect ratio changes.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    /// Eye position in world space.
    pub eye: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
    /// Up vector.
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Near clip plane distance.
    pub near: f32,
    /// Far clip plane distance.
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(8.0, 8.0, 15.0),
            target: Vec3::new(0.0, 2.0, 0.0),
            up: Vec3::Y,
            fov_y: 45.0_f32.to_radians(),
            near: 1.0,
            far: 100.0,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// The world-to-camera view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// The camera-to-clip projection matrix for the given aspect ratio.
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, aspect, self.near, self.far)
    }

    /// The combined view-projection matrix for the given aspect ratio.
    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_proj_is_finite_and_deterministic() {
        let camera = Camera::new();
        let a = camera.view_proj(16.0 / 9.0);
        let b = camera.view_proj(16.0 / 9.0);
        assert_eq!(a, b);
        assert!(a.to_cols_array().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn view_matrix_maps_target_onto_negative_z() {
        let camera = Camera::new();
        let target_in_view = camera.view_matrix().transform_point3(camera.target);
        assert!(target_in_view.x.abs() < 1e-4);
        assert!(target_in_view.y.abs() < 1e-4);
        assert!(target_in_view.z < 0.0);
    }
}
