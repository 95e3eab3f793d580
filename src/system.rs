//! Simulation driver.
//!
//! [`ParticleSystem`] owns a set of emitters, the particles each of them
//! spawned, and a clock, and runs complete ticks. Everything it does can also
//! be done by hand with [`Emitter::tick`], [`Action::apply`] and
//! [`Particle::update`]; this is the ordering the crate recommends.
//!
//! Every emitter keeps its own particle store. An emitter's actions therefore
//! reach only the particles it emitted, even when several emitters share an
//! output group. Reads by group ([`particles`](ParticleSystem::particles),
//! [`instances`](ParticleSystem::instances)) merge all emitters writing to
//! that group.
//!
//! # Tick order
//!
//! 1. Every active emitter ticks (emitter actions, countdown, spawning).
//! 2. Global actions run on every live particle, then each emitter's own
//!    actions run on the particles it emitted. Particles spawned in step 1
//!    are included.
//! 3. Every particle is integrated.
//! 4. Expired particles are removed. Exhausted emitters are dropped once
//!    their last particle is gone, so their actions keep acting on the
//!    particles they already emitted.
//!
//! # Example
//!
//! ```ignore
//! let mut system = ParticleSystem::new()
//!     .with_emitter(presets::fountain(Vec3::ZERO, 300.0))
//!     .with_action(Action::Drag(0.1));
//!
//! loop {
//!     system.advance(frame_delta);
//!     upload(system.instances("fountain"));
//! }
//! ```

use crate::action::Action;
use crate::emitter::Emitter;
use crate::particle::{Particle, ParticleInstance};
use crate::pool::ParticleGroups;
use crate::time::SimClock;
use std::collections::BTreeSet;
use tracing::{debug, trace};

/// What happened during one or more ticks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Ticks run.
    pub steps: u32,
    /// Particles spawned.
    pub spawned: usize,
    /// Particles removed after expiring.
    pub expired: usize,
    /// Emitters removed after exhausting.
    pub emitters_removed: usize,
}

impl StepReport {
    fn merge(&mut self, other: StepReport) {
        self.steps += other.steps;
        self.spawned += other.spawned;
        self.expired += other.expired;
        self.emitters_removed += other.emitters_removed;
    }
}

/// An emitter and the particles it has spawned.
#[derive(Debug)]
struct Source {
    emitter: Emitter,
    particles: ParticleGroups,
}

impl Source {
    fn new(emitter: Emitter) -> Self {
        Self {
            emitter,
            particles: ParticleGroups::new(),
        }
    }
}

/// Emitters, their particles and the actions shared by all of them.
///
/// Use method chaining to configure, then call [`step`](Self::step) or
/// [`advance`](Self::advance) every frame.
#[derive(Debug, Default)]
pub struct ParticleSystem {
    sources: Vec<Source>,
    actions: Vec<Action>,
    clock: SimClock,
}

impl ParticleSystem {
    /// Create an empty system with a variable-step clock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an emitter.
    pub fn with_emitter(mut self, emitter: Emitter) -> Self {
        self.add_emitter(emitter);
        self
    }

    /// Add an action applied to every particle regardless of emitter.
    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Replace the clock used by [`advance`](Self::advance).
    pub fn with_clock(mut self, clock: SimClock) -> Self {
        self.clock = clock;
        self
    }

    /// Add an emitter to a running system.
    pub fn add_emitter(&mut self, emitter: Emitter) {
        self.sources.push(Source::new(emitter));
    }

    /// Add a global action to a running system.
    pub fn add_action(&mut self, action: Action) {
        self.actions.push(action);
    }

    /// Registered emitters, in insertion order.
    pub fn emitters(&self) -> impl Iterator<Item = &Emitter> {
        self.sources.iter().map(|s| &s.emitter)
    }

    /// Mutable access to the registered emitters, e.g. to move them.
    pub fn emitters_mut(&mut self) -> impl Iterator<Item = &mut Emitter> {
        self.sources.iter_mut().map(|s| &mut s.emitter)
    }

    /// Number of registered emitters, exhausted ones still draining included.
    pub fn emitter_count(&self) -> usize {
        self.sources.len()
    }

    /// Global actions, in application order.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// The clock driving [`advance`](Self::advance).
    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// Mutable clock access, for pausing or changing the time scale.
    pub fn clock_mut(&mut self) -> &mut SimClock {
        &mut self.clock
    }

    /// Number of live particles.
    pub fn particle_count(&self) -> usize {
        self.sources.iter().map(|s| s.particles.len()).sum()
    }

    /// Live particles in `group`, across every emitter writing to it.
    pub fn particles<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a Particle> + 'a {
        self.sources
            .iter()
            .flat_map(move |s| s.particles.group(group).iter())
    }

    /// Every live particle, in emitter order.
    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.sources.iter().flat_map(|s| s.particles.iter())
    }

    /// Names of the groups that currently hold particles.
    pub fn groups(&self) -> BTreeSet<&str> {
        self.sources
            .iter()
            .flat_map(|s| s.particles.groups())
            .filter(|g| self.particles(g).next().is_some())
            .collect()
    }

    /// Instance records for `group`, ready to upload.
    pub fn instances(&self, group: &str) -> Vec<ParticleInstance> {
        self.particles(group).map(Particle::to_instance).collect()
    }

    /// Run one tick of `dt` seconds.
    pub fn step(&mut self, dt: f32) -> StepReport {
        let mut report = StepReport {
            steps: 1,
            ..Default::default()
        };

        for source in self.sources.iter_mut() {
            report.spawned += source.emitter.tick(dt, &mut source.particles);
        }

        for action in &self.actions {
            for source in self.sources.iter_mut() {
                for p in source.particles.iter_mut() {
                    action.apply(p, dt);
                }
            }
        }
        for source in self.sources.iter_mut() {
            for action in source.emitter.actions() {
                for p in source.particles.iter_mut() {
                    action.apply(p, dt);
                }
            }
        }

        for source in self.sources.iter_mut() {
            source.particles.iter_mut().for_each(|p| p.update(dt));
            report.expired += source.particles.remove_expired();
        }

        let before = self.sources.len();
        self.sources
            .retain(|s| !(s.emitter.is_done() && s.particles.is_empty()));
        report.emitters_removed = before - self.sources.len();
        if report.emitters_removed > 0 {
            debug!(removed = report.emitters_removed, "dropped exhausted emitters");
        }

        trace!(
            spawned = report.spawned,
            expired = report.expired,
            live = self.particle_count(),
            "step"
        );
        report
    }

    /// Feed one frame's delta through the clock and run the resulting ticks.
    pub fn advance(&mut self, frame_dt: f32) -> StepReport {
        let plan = self.clock.advance(frame_dt);
        let mut report = StepReport::default();
        for _ in 0..plan.count {
            report.merge(self.step(plan.dt));
        }
        report
    }

    /// Whether there is nothing left to simulate.
    pub fn is_finished(&self) -> bool {
        self.sources.is_empty()
    }
}
