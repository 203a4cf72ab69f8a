use glam::{EulerRot, Mat4, Quat, Vec3};
use spellbook_common::CameraPose;

/// Perspective camera with an Euler-angle pose.
///
/// The pose is public so effects can borrow it mutably between frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    pub pose: CameraPose,
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self {
            pose: CameraPose::at(Vec3::new(0.0, 2.0, 10.0)),
            fov_degrees: 90.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl PerspectiveCamera {
    pub fn orientation(&self) -> Quat {
        let r = self.pose.rotation;
        Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z)
    }

    /// Looking direction. The unrotated camera looks down -Z.
    pub fn forward(&self) -> Vec3 {
        self.orientation() * Vec3::NEG_Z
    }

    pub fn set_aspect(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation(), self.pose.position).inverse()
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
