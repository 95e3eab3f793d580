//! Particle emitters.
//!
//! An [`Emitter`] spawns particles into a [`ParticlePool`] at a steady rate.
//! It owns one distribution functor for each particle attribute, the
//! [`Action`]s its particles should receive over their lives, and a list of
//! [`EmitterAction`]s that move the emitter itself around.
//!
//! # Tick
//!
//! Each call to [`Emitter::tick`]:
//!
//! 1. applies every emitter action, in registration order;
//! 2. counts down the remaining emission time;
//! 3. adds `rate * dt` to a fractional budget;
//! 4. spawns the whole-number part of that budget;
//! 5. keeps the fractional remainder for the next tick.
//!
//! Carrying the remainder means a rate of 30 particles per second at 60
//! ticks per second spawns one particle every other tick instead of none at
//! all.
//!
//! # Example
//!
//! ```ignore
//! let mut emitter = Emitter::new()
//!     .with_position(Vec3::new(0.0, 1.0, 0.0))
//!     .with_rate(250.0)
//!     .with_lifetime(NormalLifetime::new(1.5, 0.2))
//!     .with_location(CircleLocation::new(0.5, Vec3::Y))
//!     .with_velocity(TangentVelocity::new(Vec3::Y, 2.0, 0.1))
//!     .with_action(Action::gravity(9.8))
//!     .with_time_remaining(3.0);
//!
//! let mut pool = ParticleGroups::new();
//! let spawned = emitter.tick(1.0 / 60.0, &mut pool);
//! ```

use crate::action::Action;
use crate::distribution::{
    ColorDistribution, ConstantLifetime, LifetimeDistribution, LocationDistribution, NormalColor,
    RadialVelocity, SphereLocation, VelocityDistribution,
};
use crate::particle::Particle;
use crate::pool::ParticlePool;
use crate::sampling::Sampler;
use glam::{Vec3, Vec4};
use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, trace, warn};

/// Output group used when none is configured.
pub const DEFAULT_GROUP: &str = "default";

/// Whether an emitter is still producing particles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmitterStatus {
    /// Unbounded, or emission time left.
    Active,
    /// Emission time used up. The emitter spawns nothing more and can be
    /// dropped once its particles are gone.
    Exhausted,
}

/// Shared handle to a position tracked by [`EmitterAction::Follow`].
///
/// Clone it, hand one copy to the emitter action and keep the other to
/// update the target (from a cursor, another object, ...) between ticks.
#[derive(Clone, Debug, Default)]
pub struct TrackedPosition(Rc<Cell<Vec3>>);

impl TrackedPosition {
    /// Create a handle starting at `position`.
    pub fn new(position: Vec3) -> Self {
        Self(Rc::new(Cell::new(position)))
    }

    /// Move the tracked position. Every clone sees the change.
    #[inline]
    pub fn set(&self, position: Vec3) {
        self.0.set(position);
    }

    /// Current tracked position.
    #[inline]
    pub fn get(&self) -> Vec3 {
        self.0.get()
    }
}

/// Behaviors applied to the emitter itself at the start of every tick.
#[derive(Clone, Debug)]
pub enum EmitterAction {
    /// Move the emitter onto a tracked position plus a fixed offset.
    ///
    /// With `depth` set, the target is treated as 2D: its x and y are kept
    /// and z is pinned to `depth` before the offset is added.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let cursor = TrackedPosition::default();
    /// emitter.add_emitter_action(EmitterAction::Follow {
    ///     target: cursor.clone(),
    ///     offset: Vec3::new(0.0, 0.2, 0.0),
    ///     depth: Some(-5.0),
    /// });
    /// // every frame
    /// cursor.set(Vec3::new(mouse_x, mouse_y, 0.0));
    /// ```
    Follow {
        target: TrackedPosition,
        offset: Vec3,
        depth: Option<f32>,
    },

    /// Nudge the emitter by an approximately normal offset on each axis.
    ///
    /// `spread` is the per-axis sigma, in world units per tick.
    Jitter { spread: f32 },
}

impl EmitterAction {
    /// Apply this action to an emitter for a step of `dt` seconds.
    pub fn apply(&self, emitter: &mut Emitter, _dt: f32) {
        match self {
            EmitterAction::Follow {
                target,
                offset,
                depth,
            } => {
                let mut at = target.get();
                if let Some(z) = depth {
                    at.z = *z;
                }
                emitter.position = at + *offset;
            }

            EmitterAction::Jitter { spread } => {
                let rng = &mut emitter.sampler;
                let nudge = Vec3::new(
                    rng.approx_normal(0.0, *spread),
                    rng.approx_normal(0.0, *spread),
                    rng.approx_normal(0.0, *spread),
                );
                emitter.position += nudge;
            }
        }
    }
}

/// A rate-controlled source of particles.
#[derive(Debug)]
pub struct Emitter {
    output_group: String,
    lifetime: Box<dyn LifetimeDistribution>,
    velocity: Box<dyn VelocityDistribution>,
    location: Box<dyn LocationDistribution>,
    color: Box<dyn ColorDistribution>,
    actions: Vec<Action>,
    emitter_actions: Vec<EmitterAction>,
    position: Vec3,
    rate: f32,
    size: f32,
    /// `None` emits forever.
    time_remaining: Option<f32>,
    accumulator: f32,
    sampler: Sampler,
}

impl Emitter {
    /// Create an emitter with default settings.
    ///
    /// 400 particles per second into the `"default"` group, spawned on a
    /// sphere of radius 10 around the origin, flying outward, living 0.3
    /// seconds, white at brightness 0.8 ± 0.2, size 1, no time limit.
    pub fn new() -> Self {
        Self {
            output_group: DEFAULT_GROUP.to_owned(),
            lifetime: Box::new(ConstantLifetime(0.3)),
            velocity: Box::new(RadialVelocity::new(2.0, 0.5)),
            location: Box::new(SphereLocation::new(10.0)),
            color: Box::new(NormalColor::new(Vec4::new(1.0, 1.0, 1.0, 0.0), 0.8, 0.2)),
            actions: Vec::new(),
            emitter_actions: Vec::new(),
            position: Vec3::ZERO,
            rate: 400.0,
            size: 1.0,
            time_remaining: None,
            accumulator: 0.0,
            sampler: Sampler::from_entropy(),
        }
    }

    // =========================================================================
    // BUILDER METHODS
    // =========================================================================

    /// Set the pool partition new particles are placed in.
    pub fn with_output_group(mut self, group: impl Into<String>) -> Self {
        self.output_group = group.into();
        self
    }

    /// Set the world position.
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Set the emission rate in particles per second.
    pub fn with_rate(mut self, rate: f32) -> Self {
        self.set_rate(rate);
        self
    }

    /// Set the uniform size given to every spawned particle.
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Limit emission to `seconds`.
    pub fn with_time_remaining(mut self, seconds: f32) -> Self {
        self.time_remaining = Some(seconds);
        self
    }

    /// Use a specific random source, e.g. a seeded one for replays.
    pub fn with_sampler(mut self, sampler: Sampler) -> Self {
        self.sampler = sampler;
        self
    }

    /// Shorthand for `with_sampler(Sampler::seeded(seed))`.
    pub fn with_seed(self, seed: u64) -> Self {
        self.with_sampler(Sampler::seeded(seed))
    }

    /// Set the lifetime strategy.
    pub fn with_lifetime(mut self, f: impl LifetimeDistribution + 'static) -> Self {
        self.lifetime = Box::new(f);
        self
    }

    /// Set the initial velocity strategy.
    pub fn with_velocity(mut self, f: impl VelocityDistribution + 'static) -> Self {
        self.velocity = Box::new(f);
        self
    }

    /// Set the spawn location strategy.
    pub fn with_location(mut self, f: impl LocationDistribution + 'static) -> Self {
        self.location = Box::new(f);
        self
    }

    /// Set the color strategy.
    pub fn with_color(mut self, f: impl ColorDistribution + 'static) -> Self {
        self.color = Box::new(f);
        self
    }

    /// Register an action for this emitter's particles.
    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Register an action applied to the emitter every tick.
    pub fn with_emitter_action(mut self, action: EmitterAction) -> Self {
        self.emitter_actions.push(action);
        self
    }

    // =========================================================================
    // SETTERS
    // =========================================================================

    /// Replace the lifetime strategy. The previous one is dropped.
    pub fn set_lifetime(&mut self, f: impl LifetimeDistribution + 'static) -> &mut Self {
        self.set_lifetime_boxed(Box::new(f))
    }

    /// Replace the lifetime strategy with an already boxed one.
    pub fn set_lifetime_boxed(&mut self, f: Box<dyn LifetimeDistribution>) -> &mut Self {
        debug!(group = %self.output_group, lifetime = ?f, "replacing lifetime distribution");
        self.lifetime = f;
        self
    }

    /// Replace the velocity strategy. The previous one is dropped.
    pub fn set_velocity(&mut self, f: impl VelocityDistribution + 'static) -> &mut Self {
        self.set_velocity_boxed(Box::new(f))
    }

    /// Replace the velocity strategy with an already boxed one.
    pub fn set_velocity_boxed(&mut self, f: Box<dyn VelocityDistribution>) -> &mut Self {
        debug!(group = %self.output_group, velocity = ?f, "replacing velocity distribution");
        self.velocity = f;
        self
    }

    /// Replace the location strategy. The previous one is dropped.
    pub fn set_location(&mut self, f: impl LocationDistribution + 'static) -> &mut Self {
        self.set_location_boxed(Box::new(f))
    }

    /// Replace the location strategy with an already boxed one.
    pub fn set_location_boxed(&mut self, f: Box<dyn LocationDistribution>) -> &mut Self {
        debug!(group = %self.output_group, location = ?f, "replacing location distribution");
        self.location = f;
        self
    }

    /// Replace the color strategy. The previous one is dropped.
    pub fn set_color(&mut self, f: impl ColorDistribution + 'static) -> &mut Self {
        self.set_color_boxed(Box::new(f))
    }

    /// Replace the color strategy with an already boxed one.
    pub fn set_color_boxed(&mut self, f: Box<dyn ColorDistribution>) -> &mut Self {
        debug!(group = %self.output_group, color = ?f, "replacing color distribution");
        self.color = f;
        self
    }

    /// Move the emitter.
    pub fn set_position(&mut self, position: Vec3) -> &mut Self {
        self.position = position;
        self
    }

    /// Set the emission rate. A negative rate is kept but emits nothing.
    pub fn set_rate(&mut self, rate: f32) -> &mut Self {
        if rate < 0.0 {
            warn!(group = %self.output_group, rate, "negative emission rate, emitter will stay silent");
        }
        self.rate = rate;
        self
    }

    /// Set the uniform size given to particles spawned from now on.
    pub fn set_size(&mut self, size: f32) -> &mut Self {
        self.size = size;
        self
    }

    /// Set the remaining emission time. `None` removes the limit.
    pub fn set_time_remaining(&mut self, seconds: Option<f32>) -> &mut Self {
        self.time_remaining = seconds;
        self
    }

    /// Append an action for this emitter's particles.
    pub fn add_action(&mut self, action: Action) -> &mut Self {
        self.actions.push(action);
        self
    }

    /// Append an action applied to the emitter every tick.
    pub fn add_emitter_action(&mut self, action: EmitterAction) -> &mut Self {
        self.emitter_actions.push(action);
        self
    }

    /// Stop emitting right away.
    pub fn cancel(&mut self) {
        self.time_remaining = Some(-1.0);
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// Pool partition new particles are placed in.
    pub fn output_group(&self) -> &str {
        &self.output_group
    }

    /// Current world position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Emission rate in particles per second.
    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// Uniform size given to spawned particles.
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Seconds of emission left, or `None` when unbounded.
    pub fn time_remaining(&self) -> Option<f32> {
        self.time_remaining
    }

    /// Fraction of a particle carried over to the next tick.
    pub fn pending(&self) -> f32 {
        self.accumulator
    }

    /// Actions meant for this emitter's particles.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Actions applied to the emitter itself, in order.
    pub fn emitter_actions(&self) -> &[EmitterAction] {
        &self.emitter_actions
    }

    /// The random source used for spawning.
    pub fn sampler_mut(&mut self) -> &mut Sampler {
        &mut self.sampler
    }

    /// Whether the emitter is still emitting.
    pub fn status(&self) -> EmitterStatus {
        match self.time_remaining {
            Some(t) if t <= 0.0 => EmitterStatus::Exhausted,
            _ => EmitterStatus::Active,
        }
    }

    /// Shorthand for `status() == EmitterStatus::Exhausted`.
    pub fn is_done(&self) -> bool {
        self.status() == EmitterStatus::Exhausted
    }

    // =========================================================================
    // SIMULATION
    // =========================================================================

    /// Advance the emitter by `dt` seconds, spawning into `pool`.
    ///
    /// Returns the number of particles spawned. An exhausted emitter spawns
    /// nothing and leaves its state untouched.
    pub fn tick<P: ParticlePool + ?Sized>(&mut self, dt: f32, pool: &mut P) -> usize {
        if self.is_done() {
            return 0;
        }

        // Actions may register more actions; keep both
        let mut emitter_actions = std::mem::take(&mut self.emitter_actions);
        for action in &emitter_actions {
            action.apply(self, dt);
        }
        emitter_actions.append(&mut self.emitter_actions);
        self.emitter_actions = emitter_actions;

        if let Some(t) = self.time_remaining.as_mut() {
            *t -= dt;
            if *t <= 0.0 {
                debug!(group = %self.output_group, "emitter exhausted");
            }
        }

        self.accumulator += (self.rate * dt).max(0.0);
        if !self.accumulator.is_finite() {
            warn!(group = %self.output_group, "emission budget overflowed, resetting");
            self.accumulator = 0.0;
        }

        let count = self.accumulator.floor() as usize;
        self.accumulator -= count as f32;

        for _ in 0..count {
            self.spawn_into(pool);
        }

        trace!(group = %self.output_group, count, pending = self.accumulator, "emitted");
        count
    }

    /// Spawn one particle, initialized by the four distributions.
    fn spawn_into<P: ParticlePool + ?Sized>(&mut self, pool: &mut P) {
        let lifetime = self.lifetime.sample(&mut self.sampler);
        let position = self.location.sample(&mut self.sampler, self.position);
        let velocity = self.velocity.sample(&mut self.sampler, position, self.position);
        let color = self.color.sample(&mut self.sampler);

        *pool.acquire(&self.output_group) = Particle {
            position,
            velocity,
            size: Vec3::splat(self.size),
            color,
            lifetime,
        };
    }

    /// Apply this emitter's particle actions to `particles`, in order.
    pub fn apply_actions(&self, particles: &mut [Particle], dt: f32) {
        for action in &self.actions {
            action.apply_all(particles, dt);
        }
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}
