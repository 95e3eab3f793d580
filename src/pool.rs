//! Particle storage.
//!
//! The simulation core never owns particles. Emitters ask a [`ParticlePool`]
//! for a fresh record and fill it in; the pool decides where it lives and
//! when it goes away. [`ParticleGroups`] is a straightforward pool keyed by
//! output group name, good enough for tests and small effects.

use crate::particle::{Particle, ParticleInstance};
use std::collections::BTreeMap;

/// Storage that hands out particle records by output group.
pub trait ParticlePool {
    /// Return a record for a new particle in `group`.
    ///
    /// The record's contents are unspecified; the caller overwrites every
    /// field.
    fn acquire(&mut self, group: &str) -> &mut Particle;
}

/// Growable pool with one `Vec` per output group.
#[derive(Clone, Debug, Default)]
pub struct ParticleGroups {
    groups: BTreeMap<String, Vec<Particle>>,
}

impl ParticleGroups {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Live particles in `group`, or an empty slice for an unknown group.
    pub fn group(&self, group: &str) -> &[Particle] {
        self.groups.get(group).map(Vec::as_slice).unwrap_or_default()
    }

    /// Mutable particles in `group`, or `None` if it never received one.
    pub fn group_mut(&mut self, group: &str) -> Option<&mut [Particle]> {
        self.groups.get_mut(group).map(Vec::as_mut_slice)
    }

    /// Names of all groups that have ever received a particle.
    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Total number of particles across all groups.
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Whether no group holds a live particle.
    pub fn is_empty(&self) -> bool {
        self.groups.values().all(Vec::is_empty)
    }

    /// Every particle, group by group in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.groups.values().flatten()
    }

    /// Mutable iterator over every particle.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Particle> {
        self.groups.values_mut().flatten()
    }

    /// Drop every expired particle. Returns how many were removed.
    pub fn remove_expired(&mut self) -> usize {
        let mut removed = 0;
        for particles in self.groups.values_mut() {
            let before = particles.len();
            particles.retain(|p| !p.is_expired());
            removed += before - particles.len();
        }
        removed
    }

    /// Remove every particle from every group.
    pub fn clear(&mut self) {
        for particles in self.groups.values_mut() {
            particles.clear();
        }
    }

    /// Instance records for `group`, ready to upload.
    pub fn instances(&self, group: &str) -> Vec<ParticleInstance> {
        self.group(group).iter().map(Particle::to_instance).collect()
    }
}

impl ParticlePool for ParticleGroups {
    fn acquire(&mut self, group: &str) -> &mut Particle {
        let particles = self.groups.entry(group.to_owned()).or_default();
        particles.push(Particle::default());
        let last = particles.len() - 1;
        &mut particles[last]
    }
}
