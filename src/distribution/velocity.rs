use super::FALLBACK_DIRECTION;
use crate::error::ConfigError;
use crate::sampling::{orthonormal_basis, Sampler};
use glam::Vec3;
use std::fmt::Debug;

/// Chooses a new particle's initial velocity.
///
/// Receives the particle's spawn position and the emitter's position, in
/// that order.
pub trait VelocityDistribution: Debug {
    /// Draw an initial velocity.
    fn sample(&self, rng: &mut Sampler, particle_pos: Vec3, emitter_pos: Vec3) -> Vec3;
}

/// Direction from the emitter out to the particle.
///
/// A particle spawned on top of the emitter gets [`FALLBACK_DIRECTION`].
fn outward(particle_pos: Vec3, emitter_pos: Vec3) -> Vec3 {
    (particle_pos - emitter_pos)
        .try_normalize()
        .unwrap_or(FALLBACK_DIRECTION)
}

/// Same velocity for every particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedVelocity(pub Vec3);

impl VelocityDistribution for FixedVelocity {
    fn sample(&self, _rng: &mut Sampler, _particle_pos: Vec3, _emitter_pos: Vec3) -> Vec3 {
        self.0
    }
}

/// Straight out from the emitter, speed drawn around `mean`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadialVelocity {
    pub mean: f32,
    pub sigma: f32,
}

impl RadialVelocity {
    /// Outward speed around `mean` with spread `sigma`.
    pub fn new(mean: f32, sigma: f32) -> Self {
        Self { mean, sigma }
    }
}

impl VelocityDistribution for RadialVelocity {
    fn sample(&self, rng: &mut Sampler, particle_pos: Vec3, emitter_pos: Vec3) -> Vec3 {
        outward(particle_pos, emitter_pos) * rng.approx_normal(self.mean, self.sigma)
    }
}

/// Outward direction bent toward `up`.
///
/// `up_bias` blends the two directions: 0 is purely radial, 1 is purely
/// `up`. Speed is drawn around `mean`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConeVelocity {
    pub up: Vec3,
    pub up_bias: f32,
    pub mean: f32,
    pub sigma: f32,
}

impl ConeVelocity {
    /// Outward direction pulled toward `up` by `up_bias`.
    pub fn new(up: Vec3, up_bias: f32, mean: f32, sigma: f32) -> Self {
        Self {
            up,
            up_bias,
            mean,
            sigma,
        }
    }
}

impl VelocityDistribution for ConeVelocity {
    fn sample(&self, rng: &mut Sampler, particle_pos: Vec3, emitter_pos: Vec3) -> Vec3 {
        let up = self.up.try_normalize().unwrap_or(FALLBACK_DIRECTION);
        let radial = outward(particle_pos, emitter_pos);
        let dir = ((1.0 - self.up_bias) * radial + self.up_bias * up)
            .try_normalize()
            .unwrap_or(up);

        dir * rng.approx_normal(self.mean, self.sigma)
    }
}

/// Tangent to a circle around `up` through the particle: `up × outward`.
///
/// Paired with [`CircleLocation`](super::CircleLocation) on the same axis
/// this makes particles swirl around the emitter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TangentVelocity {
    pub up: Vec3,
    pub mean: f32,
    pub sigma: f32,
}

impl TangentVelocity {
    /// Swirl around `up` at a speed around `mean`.
    pub fn new(up: Vec3, mean: f32, sigma: f32) -> Self {
        Self { up, mean, sigma }
    }
}

impl VelocityDistribution for TangentVelocity {
    fn sample(&self, rng: &mut Sampler, particle_pos: Vec3, emitter_pos: Vec3) -> Vec3 {
        let up = self.up.try_normalize().unwrap_or(FALLBACK_DIRECTION);
        let dir = up
            .cross(outward(particle_pos, emitter_pos))
            .try_normalize()
            .unwrap_or_else(|| orthonormal_basis(up).0);

        dir * rng.approx_normal(self.mean, self.sigma)
    }
}

/// Weighted blend of two velocity strategies.
///
/// Returns `weight * first + (1 - weight) * second`. Both strategies are
/// owned and dropped together with the combiner.
#[derive(Debug)]
pub struct LinearVelocityCombiner {
    weight: f32,
    first: Box<dyn VelocityDistribution>,
    second: Box<dyn VelocityDistribution>,
}

impl LinearVelocityCombiner {
    /// Combine two strategies. Fails if `weight` is NaN or infinite.
    pub fn new(
        weight: f32,
        first: impl VelocityDistribution + 'static,
        second: impl VelocityDistribution + 'static,
    ) -> Result<Self, ConfigError> {
        Self::from_boxed(weight, Box::new(first), Box::new(second))
    }

    /// Combine two already boxed strategies.
    pub fn from_boxed(
        weight: f32,
        first: Box<dyn VelocityDistribution>,
        second: Box<dyn VelocityDistribution>,
    ) -> Result<Self, ConfigError> {
        if !weight.is_finite() {
            return Err(ConfigError::InvalidWeight(weight));
        }
        Ok(Self {
            weight,
            first,
            second,
        })
    }

    /// Weight given to the first strategy.
    pub fn weight(&self) -> f32 {
        self.weight
    }
}

impl VelocityDistribution for LinearVelocityCombiner {
    fn sample(&self, rng: &mut Sampler, particle_pos: Vec3, emitter_pos: Vec3) -> Vec3 {
        let a = self.first.sample(rng, particle_pos, emitter_pos);
        let b = self.second.sample(rng, particle_pos, emitter_pos);
        self.weight * a + (1.0 - self.weight) * b
    }
}
