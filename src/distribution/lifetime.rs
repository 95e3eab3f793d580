use crate::sampling::Sampler;
use std::fmt::Debug;

/// Chooses how long a new particle lives, in seconds.
pub trait LifetimeDistribution: Debug {
    /// Draw a lifetime in seconds.
    fn sample(&self, rng: &mut Sampler) -> f32;
}

/// Every particle gets the same lifetime.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantLifetime(pub f32);

impl LifetimeDistribution for ConstantLifetime {
    fn sample(&self, _rng: &mut Sampler) -> f32 {
        self.0
    }
}

/// Lifetime drawn around `mean` with spread `sigma`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalLifetime {
    pub mean: f32,
    pub sigma: f32,
}

impl NormalLifetime {
    /// Lifetimes around `mean` seconds with spread `sigma`.
    pub fn new(mean: f32, sigma: f32) -> Self {
        Self { mean, sigma }
    }
}

impl LifetimeDistribution for NormalLifetime {
    fn sample(&self, rng: &mut Sampler) -> f32 {
        rng.approx_normal(self.mean, self.sigma)
    }
}
