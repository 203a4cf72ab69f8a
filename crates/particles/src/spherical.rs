use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Angle pair locating a particle on its sphere.
///
/// `theta` is the azimuth around Z, `phi` the polar angle measured from +Z.
/// Both accumulate without wrapping and are stored as f64 so a 0.01 step
/// still lands exactly after days of frames.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SphericalAngles {
    pub theta: f64,
    pub phi: f64,
}

impl SphericalAngles {
    pub fn new(theta: f64, phi: f64) -> Self {
        Self { theta, phi }
    }

    /// Sample a direction uniformly over the sphere's surface.
    ///
    /// `phi` comes from `acos(u)` with `u` uniform in `[-1, 1]`; sampling `phi`
    /// uniformly would bunch points at the poles.
    pub fn sample_uniform<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let theta = rng.gen_range(0.0..TAU);
        let phi = rng.gen_range(-1.0f64..=1.0).acos();
        Self { theta, phi }
    }

    /// Advance both angles by the same step.
    pub fn advance(&mut self, step: f64) {
        self.theta += step;
        self.phi += step;
    }
}

/// `x = r·sinφ·cosθ`, `y = r·sinφ·sinθ`, `z = r·cosφ`.
///
/// Trigonometry runs on the f64 angles; only the unit direction is narrowed
/// to f32.
pub fn spherical_to_cartesian(radius: f32, angles: SphericalAngles) -> Vec3 {
    let (sin_phi, cos_phi) = angles.phi.sin_cos();
    let (sin_theta, cos_theta) = angles.theta.sin_cos();
    let dir = Vec3::new(
        (sin_phi * cos_theta) as f32,
        (sin_phi * sin_theta) as f32,
        cos_phi as f32,
    );
    radius * dir
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn poles_and_equator() {
        let north = spherical_to_cartesian(2.0, SphericalAngles::new(0.0, 0.0));
        assert!((north - Vec3::new(0.0, 0.0, 2.0)).length() < 1e-6);

        let south = spherical_to_cartesian(2.0, SphericalAngles::new(0.0, PI));
        assert!((south - Vec3::new(0.0, 0.0, -2.0)).length() < 1e-5);

        let y_axis = spherical_to_cartesian(1.0, SphericalAngles::new(FRAC_PI_2, FRAC_PI_2));
        assert!((y_axis - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn sampled_angles_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            let a = SphericalAngles::sample_uniform(&mut rng);
            assert!((0.0..TAU).contains(&a.theta));
            assert!((0.0..=PI).contains(&a.phi));
        }
    }

    #[test]
    fn sampling_is_uniform_in_cos_phi() {
        // Uniform on the sphere means z = cos(phi) is uniform in [-1, 1],
        // so roughly half the samples land in |z| < 0.5.
        let mut rng = StdRng::seed_from_u64(11);
        let n = 20_000;
        let band = (0..n)
            .map(|_| SphericalAngles::sample_uniform(&mut rng))
            .filter(|a| a.phi.cos().abs() < 0.5)
            .count();
        let fraction = band as f64 / n as f64;
        assert!((fraction - 0.5).abs() < 0.03, "fraction was {fraction}");
    }

    #[test]
    fn advance_moves_both_angles() {
        let mut a = SphericalAngles::new(1.0, 2.0);
        a.advance(0.25);
        assert_eq!(a, SphericalAngles::new(1.25, 2.25));
    }

    #[test]
    fn advance_keeps_small_steps_on_large_angles() {
        // About five days of frames at 60 fps.
        let mut a = SphericalAngles::new(300_000.0, 300_000.0);
        for _ in 0..1000 {
            a.advance(0.01);
        }
        assert!((a.theta - 300_010.0).abs() < 1e-6, "theta was {}", a.theta);
        assert!((a.phi - 300_010.0).abs() < 1e-6, "phi was {}", a.phi);
    }
}
