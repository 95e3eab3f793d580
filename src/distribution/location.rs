use crate::sampling::Sampler;
use glam::Vec3;
use std::fmt::Debug;

/// Chooses where a new particle appears, given the emitter's position.
pub trait LocationDistribution: Debug {
    /// Draw a spawn position for an emitter at `emitter_pos`.
    fn sample(&self, rng: &mut Sampler, emitter_pos: Vec3) -> Vec3;
}

/// Spawn exactly at the emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointLocation;

impl LocationDistribution for PointLocation {
    fn sample(&self, _rng: &mut Sampler, emitter_pos: Vec3) -> Vec3 {
        emitter_pos
    }
}

/// Spawn on the surface of a sphere centered on the emitter.
///
/// Inherits the pole bias of [`Sampler::point_on_sphere`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphereLocation {
    pub radius: f32,
}

impl SphereLocation {
    /// Sphere of `radius` around the emitter.
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }
}

impl LocationDistribution for SphereLocation {
    fn sample(&self, rng: &mut Sampler, emitter_pos: Vec3) -> Vec3 {
        rng.point_on_sphere(self.radius, emitter_pos)
    }
}

/// Spawn on a ring around the emitter, perpendicular to `up`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircleLocation {
    pub radius: f32,
    pub up: Vec3,
}

impl CircleLocation {
    /// Ring of `radius` perpendicular to `up`.
    pub fn new(radius: f32, up: Vec3) -> Self {
        Self { radius, up }
    }
}

impl LocationDistribution for CircleLocation {
    fn sample(&self, rng: &mut Sampler, emitter_pos: Vec3) -> Vec3 {
        rng.point_on_circle(self.radius, emitter_pos, self.up)
    }
}

/// Spawn inside a disk around the emitter, perpendicular to `up`.
///
/// Denser toward the center, see [`Sampler::point_in_disk`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiskLocation {
    pub radius: f32,
    pub up: Vec3,
}

impl DiskLocation {
    /// Disk of `radius` perpendicular to `up`.
    pub fn new(radius: f32, up: Vec3) -> Self {
        Self { radius, up }
    }
}

impl LocationDistribution for DiskLocation {
    fn sample(&self, rng: &mut Sampler, emitter_pos: Vec3) -> Vec3 {
        rng.point_in_disk(self.radius, emitter_pos, self.up)
    }
}
