//! Transform type for positioning scene nodes.

use glam::{Mat4, Quat, Vec3};

/// Position, rotation and scale of one scene node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Builder-style scale, used when laying out cockpit geometry.
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Model matrix for this transform.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Forward direction (negative Z, right-handed).
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::Z
    }

    /// Compose with a parent transform (parent applied first).
    pub fn mul_transform(&self, child: &Transform) -> Transform {
        Transform {
            position: self.position + self.rotation * (child.position * self.scale),
            rotation: self.rotation * child.rotation,
            scale: self.scale * child.scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_compose_is_noop() {
        let t = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        let composed = Transform::default().mul_transform(&t);
        assert_eq!(composed, t);
    }

    #[test]
    fn compose_translates_in_parent_space() {
        let parent = Transform::from_position_rotation(
            Vec3::new(0.0, 1.0, 0.0),
            Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
        );
        let child = Transform::from_position(Vec3::new(1.0, 0.0, 0.0));
        let composed = parent.mul_transform(&child);
        // +X rotated 90° about Y lands on -Z.
        assert!((composed.position - Vec3::new(0.0, 1.0, -1.0)).length() < 1e-5);
    }
}
