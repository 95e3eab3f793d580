//! # Ember - emitter, action and distribution core for particle effects
//!
//! CPU-side particle simulation with a small, declarative API.
//!
//! Ember decides *when* particles are born, *what* they look like at birth and
//! *how* they move afterwards. Storage and rendering stay with the host: particles
//! are written into a [`ParticlePool`] and read back out as [`ParticleInstance`]
//! records ready for upload.
//!
//! ## Quick Start
//!
//! ```ignore
//! use ember::prelude::*;
//!
//! let mut system = ParticleSystem::new()
//!     .with_emitter(
//!         Emitter::new()
//!             .with_output_group("smoke")
//!             .with_rate(120.0)
//!             .with_lifetime(NormalLifetime::new(2.0, 0.3))
//!             .with_velocity(ConeVelocity::new(Vec3::Y, 0.8, 1.5, 0.2))
//!             .with_action(Action::gravity(-0.5)),
//!     )
//!     .with_action(Action::Drag(0.3));
//!
//! loop {
//!     system.advance(frame_delta);
//!     upload(system.instances("smoke"));
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Emitters
//!
//! An [`Emitter`] turns a rate in particles per second into whole spawns per
//! tick. The fractional remainder carries over, so 30 particles per second
//! at 60 ticks per second spawns one particle every other tick. Each new
//! particle is configured by four pluggable distributions:
//!
//! - lifetime ([`distribution::LifetimeDistribution`])
//! - spawn position ([`distribution::LocationDistribution`])
//! - initial velocity ([`distribution::VelocityDistribution`])
//! - color ([`distribution::ColorDistribution`])
//!
//! ### Actions
//!
//! [`Action`]s change particles every tick. They run in registration order:
//!
//! ```ignore
//! .with_action(Action::gravity(9.8))                  // Apply forces
//! .with_action(Action::Drag(0.5))                     // Friction
//! .with_action(Action::bounce(Vec3::ZERO, Vec3::Y, 0.6)) // Collisions
//! .with_action(Action::PointSink { .. })              // Removal
//! ```
//!
//! Sinks never remove particles themselves. They set the lifetime to
//! [`EXPIRED`] and the pool drops the particle afterwards.
//!
//! ## Feature Overview
//!
//! | Category | Actions |
//! |----------|---------|
//! | Forces | [`Action::ConstantForce`], [`Action::Attractor`], [`Action::Centripetal`] |
//! | Damping | [`Action::Drag`], [`Action::SpeedLimit`] |
//! | Collision | [`Action::PlaneBounce`] |
//! | Removal | [`Action::PointSink`], [`Action::PlaneSink`] |
//! | Grouping | [`Action::Composite`] |

pub mod action;
pub mod distribution;
mod emitter;
pub mod error;
mod particle;
pub mod pool;
pub mod presets;
pub mod sampling;
mod system;
pub mod time;

pub use action::{Action, Falloff};
pub use bytemuck;
pub use emitter::{Emitter, EmitterAction, EmitterStatus, TrackedPosition, DEFAULT_GROUP};
pub use error::ConfigError;
pub use glam::{Vec3, Vec4};
pub use particle::{Particle, ParticleInstance, EXPIRED};
pub use pool::{ParticleGroups, ParticlePool};
pub use sampling::Sampler;
pub use system::{ParticleSystem, StepReport};
pub use time::{SimClock, StepPlan};

/// Convenient re-exports for common usage.
///
/// # Usage
///
/// ```ignore
/// use ember::prelude::*;
/// ```
///
/// This imports:
/// - [`ParticleSystem`] - the simulation driver
/// - [`Emitter`] and [`EmitterAction`] - particle sources
/// - [`Action`] - all available particle actions
/// - every built-in distribution
/// - [`Vec3`], [`Vec4`] - glam vector types
pub mod prelude {
    pub use crate::action::{Action, Falloff};
    pub use crate::distribution::*;
    pub use crate::emitter::{Emitter, EmitterAction, EmitterStatus, TrackedPosition};
    pub use crate::error::ConfigError;
    pub use crate::particle::{Particle, ParticleInstance};
    pub use crate::pool::{ParticleGroups, ParticlePool};
    pub use crate::presets;
    pub use crate::sampling::Sampler;
    pub use crate::system::{ParticleSystem, StepReport};
    pub use crate::time::SimClock;
    pub use crate::{Vec3, Vec4};
}
