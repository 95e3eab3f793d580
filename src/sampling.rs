//! Random sampling for particle generation.
//!
//! Every random draw in the crate goes through a [`Sampler`]. Emitters own one,
//! and distribution functors borrow it while initializing a particle. Seed it
//! with [`Sampler::seeded`] to make a run reproducible.
//!
//! ```ignore
//! let mut rng = Sampler::seeded(7);
//! let lifetime = rng.approx_normal(2.0, 0.25);
//! let spawn = rng.point_on_sphere(1.0, Vec3::ZERO);
//! let ring = rng.point_on_circle(3.0, Vec3::ZERO, Vec3::Y);
//! ```
//!
//! # Known biases
//!
//! Two samplers are not uniform over their shape:
//!
//! - [`Sampler::point_on_sphere`] draws the polar angle uniformly, so points
//!   bunch up near the poles instead of covering the surface evenly.
//! - [`Sampler::point_in_disk`] scales the radius by a uniform draw, so points
//!   cluster toward the center of the disk.

use glam::{Quat, Vec3};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::{PI, TAU};

/// Number of uniform draws summed by [`Sampler::approx_normal`].
const NORMAL_TERMS: u32 = 6;

/// Injectable source of randomness with helpers for particle spawning.
#[derive(Debug, Clone)]
pub struct Sampler {
    rng: SmallRng,
}

impl Sampler {
    /// Create a sampler with a fixed seed. Same seed, same sequence.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Create a sampler seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    // ========== Scalars ==========

    /// Random f32 in `[0, 1)`.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random f32 linearly remapped into `[min, max)`.
    ///
    /// Unlike `gen_range`, an empty or inverted range does not panic.
    #[inline]
    pub fn uniform(&mut self, min: f32, max: f32) -> f32 {
        min + self.random() * (max - min)
    }

    /// Random index into a collection of `len` elements.
    ///
    /// Returns 0 for an empty collection; callers are expected to have
    /// rejected that case at configuration time.
    #[inline]
    pub fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len.max(1))
    }

    /// Approximately normal sample built from the sum of six uniform draws.
    ///
    /// The result always lies within `mean ± 3·sigma`.
    pub fn approx_normal(&mut self, mean: f32, sigma: f32) -> f32 {
        let sum: f32 = (0..NORMAL_TERMS).map(|_| self.random()).sum();
        mean + (sum - NORMAL_TERMS as f32 / 2.0) * sigma
    }

    // ========== Geometry ==========

    /// Point at distance `radius` from `center`.
    ///
    /// Polar angle is uniform in `[0, π]`, azimuth uniform in `[0, 2π)`.
    pub fn point_on_sphere(&mut self, radius: f32, center: Vec3) -> Vec3 {
        let theta = PI * self.random();
        let phi = TAU * self.random();

        center
            + Vec3::new(
                radius * theta.sin() * phi.cos(),
                radius * theta.sin() * phi.sin(),
                radius * theta.cos(),
            )
    }

    /// Point on the circle of `radius` around `center`, lying in the plane
    /// perpendicular to `up`.
    pub fn point_on_circle(&mut self, radius: f32, center: Vec3, up: Vec3) -> Vec3 {
        center + self.circle_direction(up) * radius
    }

    /// Point inside the disk of `radius` around `center`, perpendicular to `up`.
    pub fn point_in_disk(&mut self, radius: f32, center: Vec3, up: Vec3) -> Vec3 {
        let dir = self.circle_direction(up);
        center + dir * (radius * self.random())
    }

    /// Random unit vector, uniform over the sphere.
    pub fn unit_vector(&mut self) -> Vec3 {
        let z = self.uniform(-1.0, 1.0);
        let phi = TAU * self.random();
        let r = (1.0 - z * z).max(0.0).sqrt();
        Vec3::new(r * phi.cos(), r * phi.sin(), z)
    }

    /// Unit vector perpendicular to `up`, rotated a random angle around it.
    fn circle_direction(&mut self, up: Vec3) -> Vec3 {
        let axis = up.try_normalize().unwrap_or(Vec3::Y);
        let (start, _) = orthonormal_basis(axis);
        let angle = self.uniform(0.0, 360.0).to_radians();
        Quat::from_axis_angle(axis, angle) * start
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::from_entropy()
    }
}

/// Build two unit vectors orthogonal to `up` and to each other.
///
/// The world axis least aligned with `up` is projected onto the plane
/// perpendicular to it, which keeps the projection far from zero length.
/// A zero `up` is treated as +Y.
pub fn orthonormal_basis(up: Vec3) -> (Vec3, Vec3) {
    let n = up.try_normalize().unwrap_or(Vec3::Y);
    let abs = n.abs();

    let seed = if abs.x <= abs.y && abs.x <= abs.z {
        Vec3::X
    } else if abs.y <= abs.z {
        Vec3::Y
    } else {
        Vec3::Z
    };

    let first = (seed - n * seed.dot(n)).normalize();
    let second = n.cross(first);
    (first, second)
}
