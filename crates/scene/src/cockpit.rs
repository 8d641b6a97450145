//! Cockpit interior: dashboard, hologram panels, hull framing, seats,
//! and the center navigation console.
//!
//! The whole interior bobs gently to sell ship idle motion, and four
//! sub-rigs spin continuously. All of it is rebuilt per frame from the
//! elapsed time alone.

use glam::{Mat4, Quat, Vec3};
use renderer::PassKind;

use crate::{euler, glow, rgb, rgba, srt, DrawItem, MeshId, UNLIT};

const HULL: u32 = 0x111827;
const PANEL: u32 = 0x1f2937;
const CYAN: u32 = 0x06b6d4;
const ORANGE: u32 = 0xf97316;
const DECK: u32 = 0x0f172a;
const SEAT_BASE: u32 = 0x374151;
const SLANT: u32 = 0x2d3748;
const PROJECTOR: u32 = 0x1e293b;

const NO_GLOW: [f32; 4] = [0.0, 0.0, 0.0, 0.0];

struct Builder {
    items: Vec<DrawItem>,
}

impl Builder {
    fn push(
        &mut self,
        mesh: MeshId,
        pass: PassKind,
        parent: Mat4,
        local: Mat4,
        color: [f32; 4],
        emissive: [f32; 4],
    ) {
        self.items.push(DrawItem::new(mesh, pass, parent * local, color, emissive));
    }

    fn cube(&mut self, parent: Mat4, dims: Vec3, rot: Quat, pos: Vec3, color: [f32; 4]) {
        self.push(
            MeshId::Cube,
            PassKind::Opaque,
            parent,
            srt(dims, rot, pos),
            color,
            NO_GLOW,
        );
    }
}

/// Build the cockpit's draw list for elapsed time `t` (seconds).
pub fn draw_items(t: f32) -> Vec<DrawItem> {
    let mut b = Builder { items: Vec::with_capacity(48) };

    // Idle hover
    let root = Mat4::from_translation(Vec3::new(0.0, -0.5 + (t * 0.5).sin() * 0.02, 0.0));

    // Main dashboard console
    b.cube(
        root,
        Vec3::new(9.0, 1.5, 3.0),
        euler(-0.2, 0.0, 0.0),
        Vec3::new(0.0, -2.0, -2.5),
        rgb(PANEL),
    );

    left_panel(&mut b, root, t);
    center_radar(&mut b, root);
    right_panel(&mut b, root, t);

    // Toggle switch row, alternating green/red status lights
    for i in 0..8 {
        let lamp = if i % 2 == 0 { 0x008000 } else { 0xff0000 };
        b.push(
            MeshId::Cube,
            PassKind::Opaque,
            root,
            srt(
                Vec3::splat(0.1),
                euler(-0.2, 0.0, 0.0),
                Vec3::new(-1.0 + i as f32 * 0.3, -1.3, -1.8),
            ),
            rgb(0xffffff),
            glow(lamp, 1.0),
        );
    }

    // Hull structure
    b.cube(
        root,
        Vec3::new(10.0, 0.5, 4.0),
        euler(0.1, 0.0, 0.0),
        Vec3::new(0.0, 3.2, -1.0),
        rgb(HULL),
    );
    b.cube(
        root,
        Vec3::new(0.8, 7.0, 1.0),
        euler(0.0, 0.0, 0.15),
        Vec3::new(-5.0, 0.0, -2.0),
        rgb(HULL),
    );
    b.cube(
        root,
        Vec3::new(0.8, 7.0, 1.0),
        euler(0.0, 0.0, -0.15),
        Vec3::new(5.0, 0.0, -2.0),
        rgb(HULL),
    );
    b.cube(
        root,
        Vec3::new(10.0, 0.5, 6.0),
        Quat::IDENTITY,
        Vec3::new(0.0, -3.5, 0.0),
        rgb(DECK),
    );

    // Pilot and co-pilot seats
    for side in [-1.0f32, 1.0] {
        let seat = root * Mat4::from_translation(Vec3::new(side * 2.5, -3.2, 1.0));
        b.cube(
            seat,
            Vec3::new(2.2, 0.5, 2.2),
            Quat::IDENTITY,
            Vec3::new(0.0, 0.25, 0.0),
            rgb(SEAT_BASE),
        );
        b.cube(
            seat,
            Vec3::new(2.0, 3.5, 0.5),
            euler(-0.1, 0.0, 0.0),
            Vec3::new(0.0, 2.0, 1.0),
            rgb(PANEL),
        );
    }

    nav_console(&mut b, root, t);

    b.items
}

/// Left display: rotating wireframe ship schematic.
fn left_panel(b: &mut Builder, root: Mat4, t: f32) {
    let panel = root
        * srt(
            Vec3::ONE,
            euler(-0.4, 0.3, 0.0),
            Vec3::new(-2.8, -1.3, -2.2),
        );

    b.cube(
        panel,
        Vec3::new(2.0, 0.1, 1.0),
        Quat::IDENTITY,
        Vec3::new(0.0, -0.1, 0.0),
        rgb(PANEL),
    );
    b.push(
        MeshId::Cube,
        PassKind::Transparent,
        panel,
        srt(
            Vec3::new(1.8, 0.05, 0.8),
            Quat::IDENTITY,
            Vec3::new(0.0, -0.05, 0.0),
        ),
        rgba(CYAN, 0.1),
        UNLIT,
    );

    // Schematic rig: continuous yaw plus a sinusoidal rock
    let schematic = panel
        * srt(
            Vec3::ONE,
            euler(0.0, -t * 0.4, t.sin() * 0.05),
            Vec3::new(0.0, 0.4, 0.0),
        );
    b.push(
        MeshId::ShipCone,
        PassKind::Hologram,
        schematic,
        Mat4::from_quat(euler(std::f32::consts::FRAC_PI_2, 0.0, 0.0)),
        rgba(CYAN, 1.0),
        UNLIT,
    );
    b.push(
        MeshId::Cube,
        PassKind::Hologram,
        schematic,
        srt(
            Vec3::new(0.8, 0.02, 0.3),
            Quat::IDENTITY,
            Vec3::new(0.0, 0.0, -0.1),
        ),
        rgba(CYAN, 1.0),
        UNLIT,
    );
    // Engine glow
    b.push(
        MeshId::Sphere,
        PassKind::Opaque,
        schematic,
        srt(Vec3::splat(0.05), Quat::IDENTITY, Vec3::new(0.0, 0.0, 0.4)),
        rgb(0xffffff),
        UNLIT,
    );

    // Scanning line
    b.push(
        MeshId::Cube,
        PassKind::Transparent,
        panel,
        srt(
            Vec3::new(1.5, 0.02, 0.02),
            Quat::IDENTITY,
            Vec3::new(0.0, 0.1, 0.4),
        ),
        rgba(CYAN, 0.5),
        UNLIT,
    );
}

/// Center radar: emissive drum plus a projection beam frustum.
fn center_radar(b: &mut Builder, root: Mat4) {
    b.push(
        MeshId::Cylinder,
        PassKind::Opaque,
        root,
        srt(
            Vec3::new(0.8, 0.2, 0.8),
            euler(0.2, 0.0, 0.0),
            Vec3::new(0.0, -1.4, -2.1),
        ),
        rgb(DECK),
        glow(CYAN, 0.5),
    );
    b.push(
        MeshId::HoloBeam,
        PassKind::Transparent,
        root,
        srt(
            Vec3::ONE,
            euler(0.2, 0.0, 0.0),
            Vec3::new(0.0, -1.25, -2.1),
        ),
        rgba(CYAN, 0.3),
        UNLIT,
    );
}

/// Right display: spinning diagnostic rings around an orange core.
fn right_panel(b: &mut Builder, root: Mat4, t: f32) {
    let panel = root
        * srt(
            Vec3::ONE,
            euler(-0.4, -0.3, 0.0),
            Vec3::new(2.8, -1.3, -2.2),
        );

    b.cube(
        panel,
        Vec3::new(2.0, 0.1, 1.0),
        Quat::IDENTITY,
        Vec3::new(0.0, -0.1, 0.0),
        rgb(PANEL),
    );
    b.push(
        MeshId::Cube,
        PassKind::Transparent,
        panel,
        srt(
            Vec3::new(1.8, 0.05, 0.8),
            Quat::IDENTITY,
            Vec3::new(0.0, -0.05, 0.0),
        ),
        rgba(ORANGE, 0.1),
        UNLIT,
    );

    let holo = panel * Mat4::from_translation(Vec3::new(0.0, 0.4, 0.0));
    let rings = holo * Mat4::from_quat(euler(t * 0.3, t * 0.2, 0.0));
    b.push(
        MeshId::TorusMedium,
        PassKind::Hologram,
        rings,
        Mat4::IDENTITY,
        rgba(ORANGE, 1.0),
        UNLIT,
    );
    b.push(
        MeshId::TorusThin,
        PassKind::Hologram,
        rings,
        Mat4::from_quat(euler(std::f32::consts::FRAC_PI_2, 0.0, 0.0)),
        rgba(ORANGE, 0.5),
        UNLIT,
    );
    b.push(
        MeshId::Sphere,
        PassKind::Transparent,
        holo,
        Mat4::from_scale(Vec3::splat(0.12)),
        rgba(ORANGE, 0.8),
        UNLIT,
    );
}

/// Center navigation console with the holographic star map.
fn nav_console(b: &mut Builder, root: Mat4, t: f32) {
    let console = root * Mat4::from_translation(Vec3::new(0.0, -2.8, 1.0));

    b.cube(
        console,
        Vec3::new(1.5, 0.8, 2.0),
        Quat::IDENTITY,
        Vec3::ZERO,
        rgb(PANEL),
    );
    b.cube(
        console,
        Vec3::new(1.3, 0.1, 1.8),
        euler(0.1, 0.0, 0.0),
        Vec3::new(0.0, 0.45, 0.0),
        rgb(SLANT),
    );
    b.push(
        MeshId::Cylinder,
        PassKind::Opaque,
        console,
        srt(
            Vec3::new(0.3, 0.1, 0.3),
            Quat::IDENTITY,
            Vec3::new(0.0, 0.5, 0.2),
        ),
        rgb(PROJECTOR),
        NO_GLOW,
    );

    // Holographic star map, continuous yaw
    b.push(
        MeshId::Sphere,
        PassKind::Hologram,
        console,
        srt(
            Vec3::splat(0.6),
            Quat::from_rotation_y(t * 0.5),
            Vec3::new(0.0, 1.2, 0.2),
        ),
        rgba(CYAN, 0.3),
        UNLIT,
    );
    b.push(
        MeshId::Dodecahedron,
        PassKind::Opaque,
        console,
        srt(Vec3::splat(0.2), Quat::IDENTITY, Vec3::new(0.0, 1.2, 0.2)),
        rgb(ORANGE),
        UNLIT,
    );

    // Console buttons
    let buttons: [(f32, u32, u32); 3] = [
        (-0.4, 0xff0000, 0xef4444),
        (0.0, 0xffff00, 0xeab308),
        (0.4, 0x0000ff, 0x3b82f6),
    ];
    for (x, color, emissive) in buttons {
        b.push(
            MeshId::Cube,
            PassKind::Opaque,
            console,
            srt(
                Vec3::new(0.2, 0.05, 0.2),
                euler(0.1, 0.0, 0.0),
                Vec3::new(x, 0.5, -0.4),
            ),
            rgb(color),
            glow(emissive, 0.8),
        );
    }
    b.push(
        MeshId::Cube,
        PassKind::Transparent,
        console,
        srt(
            Vec3::new(0.3, 0.02, 0.8),
            euler(0.1, 0.0, 0.0),
            Vec3::new(0.4, 0.51, 0.4),
        ),
        rgba(CYAN, 0.2),
        UNLIT,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rebuild_is_idempotent_for_same_instant() {
        let a = draw_items(12.75);
        let b = draw_items(12.75);
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.instance.model, y.instance.model);
        }
    }

    #[test]
    fn item_count_is_stable_over_time() {
        assert_eq!(draw_items(0.0).len(), draw_items(100.0).len());
    }

    #[test]
    fn hover_amplitude_stays_within_two_centimeters() {
        for i in 0..200 {
            let t = i as f32 * 0.37;
            let items = draw_items(t);
            // Dashboard is the first item; root bob shows in its translation.
            let y = items[0].instance.model[3][1];
            // Root offset -0.5 plus dashboard local -2.0, bob within ±0.02.
            assert!((y + 2.5).abs() <= 0.0201, "y = {y}");
        }
    }

    #[test]
    fn star_map_yaw_advances_with_time() {
        // Star map sphere is the only hologram sphere on the nav console.
        let find = |t: f32| -> Mat4 {
            let items = draw_items(t);
            let item = items
                .iter()
                .find(|i| i.mesh == MeshId::Sphere && i.pass == PassKind::Hologram)
                .unwrap();
            Mat4::from_cols_array_2d(&item.instance.model)
        };
        let m0 = find(0.0);
        let m1 = find(1.0);
        assert_ne!(m0.to_cols_array(), m1.to_cols_array());
    }
}
