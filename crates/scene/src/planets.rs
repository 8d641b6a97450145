//! The view outside the canopy: planet Aethra with its purple rings,
//! and a distant sun. Both sit far beyond the cockpit and never move;
//! only the planet's spin and ring roll animate.

use glam::{Mat4, Quat, Vec3};
use renderer::PassKind;

use crate::{euler, glow, rgb, rgba, srt, DrawItem, MeshId, UNLIT};

const PLANET_POS: Vec3 = Vec3::new(30.0, 8.0, -70.0);
const SUN_POS: Vec3 = Vec3::new(-120.0, 30.0, -200.0);

/// Build the exterior draw list for elapsed time `t` (seconds).
pub fn draw_items(t: f32) -> Vec<DrawItem> {
    let planet = Mat4::from_translation(PLANET_POS);
    let sun = Mat4::from_translation(SUN_POS);

    vec![
        // Planet body, slow spin
        DrawItem::new(
            MeshId::Sphere,
            PassKind::Opaque,
            planet * srt(Vec3::splat(14.0), Quat::from_rotation_y(t * 0.03), Vec3::ZERO),
            rgb(0x2563eb),
            [0.0; 4],
        ),
        // Atmosphere shell
        DrawItem::new(
            MeshId::Sphere,
            PassKind::Transparent,
            planet * Mat4::from_scale(Vec3::splat(15.5)),
            rgba(0x60a5fa, 0.15),
            UNLIT,
        ),
        // Rings: tilted, counter-rolling
        DrawItem::new(
            MeshId::PlanetRing,
            PassKind::Transparent,
            planet * Mat4::from_quat(euler(1.4, 0.0, -t * 0.01)),
            rgba(0xa855f7, 0.7),
            glow(0x7e22ce, 0.2),
        ),
        // Sun disc and halo, both unlit
        DrawItem::new(
            MeshId::Sphere,
            PassKind::Opaque,
            sun * Mat4::from_scale(Vec3::splat(8.0)),
            rgb(0xfdba74),
            UNLIT,
        ),
        DrawItem::new(
            MeshId::Sphere,
            PassKind::Transparent,
            sun * Mat4::from_scale(Vec3::splat(12.0)),
            rgba(0xfb923c, 0.3),
            UNLIT,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planet_spins_in_place() {
        let at = |t: f32| {
            let items = draw_items(t);
            Mat4::from_cols_array_2d(&items[0].instance.model)
        };
        let m0 = at(0.0);
        let m1 = at(50.0);
        // Translation fixed, orientation changed.
        assert_eq!(m0.w_axis, m1.w_axis);
        assert_ne!(m0.x_axis, m1.x_axis);
        assert_eq!(m0.w_axis.truncate(), PLANET_POS);
    }

    #[test]
    fn ring_is_translucent() {
        let items = draw_items(0.0);
        let ring = items.iter().find(|i| i.mesh == MeshId::PlanetRing).unwrap();
        assert_eq!(ring.pass, PassKind::Transparent);
        assert!((ring.instance.color[3] - 0.7).abs() < 1e-6);
    }
}
