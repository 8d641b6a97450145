//! Seated cockpit camera with restricted look.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};

/// Horizontal look limit: the pilot can turn their head ±36°.
pub const MAX_YAW: f32 = std::f32::consts::PI / 5.0;
/// Vertical look limits for the seated view
/// (polar angle between π/2.3 and π/1.7, expressed here as pitch).
pub const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 - std::f32::consts::PI / 2.3;
pub const MIN_PITCH: f32 = std::f32::consts::FRAC_PI_2 - std::f32::consts::PI / 1.7;

/// Camera fixed in the pilot seat; only yaw/pitch within a narrow window,
/// no translation (the pilot stays strapped in).
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    /// Field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Aspect ratio (width / height).
    pub aspect: f32,
    /// Mouse sensitivity for look controls.
    pub sensitivity: f32,
    pitch: f32,
    yaw: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 2.0),
            fov_degrees: 65.0,
            near: 0.1,
            far: 1000.0,
            aspect: 16.0 / 9.0,
            sensitivity: 0.0005,
            pitch: 0.0,
            yaw: 0.0,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update aspect ratio (call on window resize).
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    /// Process mouse movement; yaw and pitch are clamped to the seat's
    /// look window so the pilot can never face away from the canopy.
    pub fn process_mouse(&mut self, delta_x: f32, delta_y: f32) {
        self.yaw = (self.yaw - delta_x * self.sensitivity).clamp(-MAX_YAW, MAX_YAW);
        self.pitch = (self.pitch - delta_y * self.sensitivity).clamp(MIN_PITCH, MAX_PITCH);
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(self.pitch)
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation() * -Vec3::Z
    }

    pub fn view_matrix(&self) -> Mat4 {
        let target = self.position + self.forward();
        Mat4::look_at_rh(self.position, target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Camera uniform data for GPU.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub position: [f32; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 4],
        }
    }

    pub fn update(&mut self, camera: &Camera) {
        self.view_proj = camera.view_projection_matrix().to_cols_array_2d();
        let pos = camera.position;
        self.position = [pos.x, pos.y, pos.z, 1.0];
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaw_clamps_to_seat_window() {
        let mut camera = Camera::new();
        camera.process_mouse(1e6, 0.0);
        assert!((camera.yaw() + MAX_YAW).abs() < 1e-6);
        camera.process_mouse(-2e6, 0.0);
        assert!((camera.yaw() - MAX_YAW).abs() < 1e-6);
    }

    #[test]
    fn pitch_window_is_asymmetric() {
        // Looking up is allowed slightly more than looking down.
        assert!(MAX_PITCH > 0.0);
        assert!(MIN_PITCH < 0.0);
        assert!(MAX_PITCH.abs() < MIN_PITCH.abs());
        let mut camera = Camera::new();
        camera.process_mouse(0.0, -1e6);
        assert!((camera.pitch() - MAX_PITCH).abs() < 1e-6);
    }

    #[test]
    fn level_camera_faces_negative_z() {
        let camera = Camera::new();
        assert!((camera.forward() - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-6);
    }
}
