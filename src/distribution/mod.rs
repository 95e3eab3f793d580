//! Distribution functors used to initialize freshly spawned particles.
//!
//! An [`Emitter`](crate::Emitter) owns one functor per attribute family and
//! calls each exactly once for every particle it creates:
//!
//! | Family | Trait | Built-in strategies |
//! |--------|-------|---------------------|
//! | Lifetime | [`LifetimeDistribution`] | [`ConstantLifetime`], [`NormalLifetime`] |
//! | Location | [`LocationDistribution`] | [`PointLocation`], [`SphereLocation`], [`CircleLocation`], [`DiskLocation`] |
//! | Velocity | [`VelocityDistribution`] | [`FixedVelocity`], [`RadialVelocity`], [`ConeVelocity`], [`TangentVelocity`], [`LinearVelocityCombiner`] |
//! | Color | [`ColorDistribution`] | [`ConstantColor`], [`NormalColor`], [`PaletteColor`] |
//!
//! Location is sampled before velocity, so velocity strategies receive the
//! particle's spawn position along with the emitter's position.
//!
//! Every family is a trait, so effects can plug in their own strategy:
//!
//! ```ignore
//! #[derive(Debug)]
//! struct Upward;
//!
//! impl VelocityDistribution for Upward {
//!     fn sample(&self, _: &mut Sampler, _: Vec3, _: Vec3) -> Vec3 {
//!         Vec3::Y
//!     }
//! }
//!
//! emitter.set_velocity(Upward);
//! ```

mod color;
mod lifetime;
mod location;
mod velocity;

pub use color::{ColorDistribution, ConstantColor, NormalColor, PaletteColor};
pub use lifetime::{ConstantLifetime, LifetimeDistribution, NormalLifetime};
pub use location::{CircleLocation, DiskLocation, LocationDistribution, PointLocation, SphereLocation};
pub use velocity::{
    ConeVelocity, FixedVelocity, LinearVelocityCombiner, RadialVelocity, TangentVelocity,
    VelocityDistribution,
};

use glam::Vec3;

/// Direction used when a sampled direction has zero length.
pub const FALLBACK_DIRECTION: Vec3 = Vec3::Y;
