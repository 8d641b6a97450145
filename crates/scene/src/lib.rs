//! Scene content: the starfield, the cockpit interior, and the space
//! outside the canopy.
//!
//! Everything except the starfield is described as draw items, a flat
//! list of (mesh, material, transform) produced fresh each frame. The
//! animated rigs are pure functions of elapsed time, so a frame can be
//! rebuilt for any instant without accumulated state.

pub mod cockpit;
pub mod planets;
pub mod warp_stars;

use engine_core::transform::Transform;
use glam::{Mat4, Quat, Vec3};
use renderer::{InstanceData, PassKind};

/// The fixed set of GPU meshes the scene draws. The app builds one
/// `Mesh` per id at startup; draw items reference them by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshId {
    /// Unit cube, scaled per node.
    Cube,
    /// Unit sphere, scaled per node.
    Sphere,
    /// Unit dodecahedron, scaled per node.
    Dodecahedron,
    /// Unit cylinder (radius 1, height 1), scaled per node.
    Cylinder,
    /// Four-sided cone for the ship schematic hologram.
    ShipCone,
    /// Tapered frustum for the radar projection beam.
    HoloBeam,
    /// Diagnostic hologram rings.
    TorusMedium,
    TorusThin,
    /// The planet's ring, inner 18 / outer 28.
    PlanetRing,
}

/// One mesh instance to draw this frame.
#[derive(Debug, Clone, Copy)]
pub struct DrawItem {
    pub mesh: MeshId,
    pub pass: PassKind,
    pub instance: InstanceData,
}

impl DrawItem {
    fn new(mesh: MeshId, pass: PassKind, model: Mat4, color: [f32; 4], emissive: [f32; 4]) -> Self {
        Self {
            mesh,
            pass,
            instance: InstanceData {
                model: model.to_cols_array_2d(),
                color,
                emissive,
            },
        }
    }
}

/// 0xRRGGBB with alpha 1.
pub(crate) fn rgb(hex: u32) -> [f32; 4] {
    rgba(hex, 1.0)
}

pub(crate) fn rgba(hex: u32, alpha: f32) -> [f32; 4] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        alpha,
    ]
}

/// Emissive term for lit surfaces.
pub(crate) fn glow(hex: u32, intensity: f32) -> [f32; 4] {
    let c = rgb(hex);
    [c[0] * intensity, c[1] * intensity, c[2] * intensity, 0.0]
}

/// Marks an unlit surface (flat color plus emissive, no shading).
pub(crate) const UNLIT: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

pub(crate) fn srt(scale: Vec3, rotation: Quat, translation: Vec3) -> Mat4 {
    Transform {
        position: translation,
        rotation,
        scale,
    }
    .to_matrix()
}

/// Euler rotation applied X then Y then Z.
pub(crate) fn euler(x: f32, y: f32, z: f32) -> Quat {
    Quat::from_euler(glam::EulerRot::XYZ, x, y, z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_decodes_channels() {
        let c = rgb(0x06b6d4);
        assert!((c[0] - 6.0 / 255.0).abs() < 1e-6);
        assert!((c[1] - 182.0 / 255.0).abs() < 1e-6);
        assert!((c[2] - 212.0 / 255.0).abs() < 1e-6);
        assert_eq!(c[3], 1.0);
    }
}
