//! Warp starfield: a fixed pool of stars streaming past the canopy.
//!
//! Stars advance along +Z toward (and past) the camera. A star crossing
//! the near plane is recycled to the far plane with fresh lateral
//! position, so the field never thins out and never allocates after
//! construction.

use glam::Mat4;
use rand::Rng;
use renderer::StarInstance;

pub const STAR_COUNT: usize = 5000;

/// Lateral (x, y) and initial depth spread: ±100.
const FIELD_HALF_EXTENT: f32 = 100.0;
/// Depth at which a star has passed the camera and recycles.
const NEAR_PLANE: f32 = 100.0;
/// Depth a recycled star respawns at.
const FAR_PLANE: f32 = -200.0;
/// Constant forward creep applied every frame, scaled by warp factor.
const BASE_DRIFT: f32 = 0.1;
/// Multiplier turning a star's drift factor into units per second.
const SPEED_SCALE: f32 = 100.0;
/// Field roll rate in radians per second.
const ROLL_RATE: f32 = 0.001;

/// Point size and opacity of the rendered field.
pub const STAR_POINT_SIZE: f32 = 0.5;
pub const STAR_OPACITY: f32 = 0.8;

/// Warp speed maps to star velocity: a slow idle drift at zero, double
/// the speed value when engaged.
fn warp_factor(speed: f32) -> f32 {
    if speed > 0.0 {
        speed * 2.0
    } else {
        0.1
    }
}

pub struct WarpStars {
    positions: Vec<StarInstance>,
    /// Per-star drift speed factor, fixed at construction.
    factors: Vec<f32>,
    roll: f32,
}

impl WarpStars {
    pub fn new(rng: &mut impl Rng) -> Self {
        let mut positions = Vec::with_capacity(STAR_COUNT);
        let mut factors = Vec::with_capacity(STAR_COUNT);
        for _ in 0..STAR_COUNT {
            positions.push(StarInstance {
                position: [
                    rng.gen_range(-FIELD_HALF_EXTENT..FIELD_HALF_EXTENT),
                    rng.gen_range(-FIELD_HALF_EXTENT..FIELD_HALF_EXTENT),
                    rng.gen_range(-FIELD_HALF_EXTENT..FIELD_HALF_EXTENT),
                ],
            });
            factors.push(0.01 + rng.gen_range(0.0..1.0) / 200.0);
        }
        Self {
            positions,
            factors,
            roll: 0.0,
        }
    }

    /// Advance every star and the field roll. Mutates in place, no
    /// allocation.
    pub fn update(&mut self, speed: f32, dt: f32, rng: &mut impl Rng) {
        let scaled = warp_factor(speed);
        for (star, factor) in self.positions.iter_mut().zip(&self.factors) {
            let mut z = star.position[2];
            z += BASE_DRIFT * scaled + factor * SPEED_SCALE * scaled * dt;
            if z > NEAR_PLANE {
                z = FAR_PLANE;
                star.position[0] = rng.gen_range(-FIELD_HALF_EXTENT..FIELD_HALF_EXTENT);
                star.position[1] = rng.gen_range(-FIELD_HALF_EXTENT..FIELD_HALF_EXTENT);
            }
            star.position[2] = z;
        }
        self.roll += ROLL_RATE * dt;
    }

    pub fn positions(&self) -> &[StarInstance] {
        &self.positions
    }

    /// Field transform: the slow roll around the view axis.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_z(self.roll)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn field() -> (WarpStars, StdRng) {
        let mut rng = StdRng::seed_from_u64(7);
        let stars = WarpStars::new(&mut rng);
        (stars, rng)
    }

    #[test]
    fn pool_size_is_fixed() {
        let (stars, _) = field();
        assert_eq!(stars.positions().len(), STAR_COUNT);
    }

    #[test]
    fn idle_depth_is_non_decreasing_and_wraps() {
        let (mut stars, mut rng) = field();
        let dt = 1.0 / 60.0;
        let mut wrapped = false;
        for _ in 0..2_000 {
            let before: Vec<f32> = stars.positions().iter().map(|s| s.position[2]).collect();
            stars.update(0.0, dt, &mut rng);
            for (s, &prev) in stars.positions().iter().zip(&before) {
                let z = s.position[2];
                if z < prev {
                    // only a recycle may move a star backwards
                    assert_eq!(z, FAR_PLANE);
                    wrapped = true;
                } else {
                    assert!(z <= NEAR_PLANE + 1.0);
                }
            }
        }
        assert!(wrapped, "no star recycled after 2k idle frames");
    }

    #[test]
    fn warp_advances_faster_than_idle() {
        let dt = 1.0 / 60.0;
        let (mut idle, mut rng_a) = field();
        let mut rng_b = StdRng::seed_from_u64(7);
        let mut warp = WarpStars::new(&mut rng_b);

        let idle_before = idle.positions()[0].position[2];
        let warp_before = warp.positions()[0].position[2];
        idle.update(0.0, dt, &mut rng_a);
        warp.update(5.0, dt, &mut rng_b);
        let idle_step = idle.positions()[0].position[2] - idle_before;
        let warp_step = warp.positions()[0].position[2] - warp_before;
        assert!(warp_step > idle_step);
    }

    #[test]
    fn recycle_rerandomizes_lateral_position() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut stars = WarpStars::new(&mut rng);
        // Park one star just short of the near plane.
        stars.positions[0].position = [12.5, -40.0, NEAR_PLANE - 0.01];
        stars.update(5.0, 0.1, &mut rng);
        let s = stars.positions()[0].position;
        assert_eq!(s[2], FAR_PLANE);
        assert!(s[0] != 12.5 || s[1] != -40.0);
        assert!(s[0].abs() <= FIELD_HALF_EXTENT && s[1].abs() <= FIELD_HALF_EXTENT);
    }

    #[test]
    fn roll_accumulates_with_time() {
        let (mut stars, mut rng) = field();
        stars.update(0.0, 2.0, &mut rng);
        let m = stars.model_matrix();
        let rotated = m.transform_point3(glam::Vec3::X);
        let expected = Mat4::from_rotation_z(ROLL_RATE * 2.0).transform_point3(glam::Vec3::X);
        assert!((rotated - expected).length() < 1e-6);
    }
}
