//! The simulated particle record.
//!
//! Particles are plain data. Emitters fill them in at spawn time, actions
//! nudge their velocity and position each tick, and [`Particle::update`]
//! integrates them. Removal is up to whoever stores them: the core only
//! reports expiry through [`Particle::is_expired`].

use glam::{Vec3, Vec4};

/// Remaining lifetime written by [`Particle::kill`].
///
/// Any negative value counts as expired.
pub const EXPIRED: f32 = -1.0;

/// A single particle.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Particle {
    /// World-space position.
    pub position: Vec3,
    /// Velocity in units per second.
    pub velocity: Vec3,
    /// Rendered scale along each axis.
    pub size: Vec3,
    /// RGBA color. The fourth channel doubles as glow.
    pub color: Vec4,
    /// Seconds left to live. Below zero means expired.
    pub lifetime: f32,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            size: Vec3::ONE,
            color: Vec4::ONE,
            lifetime: 0.0,
        }
    }
}

impl Particle {
    /// Advance the particle by `dt` seconds.
    ///
    /// First-order Euler step: `position += velocity * dt`, and the remaining
    /// lifetime drops by `dt`. Forces must already have been applied.
    #[inline]
    pub fn update(&mut self, dt: f32) {
        self.position += self.velocity * dt;
        self.lifetime -= dt;
    }

    /// Whether the remaining lifetime has dropped below zero.
    #[inline]
    pub fn is_expired(&self) -> bool {
        self.lifetime < 0.0
    }

    /// Flag the particle for removal by the owning pool.
    #[inline]
    pub fn kill(&mut self) {
        self.lifetime = EXPIRED;
    }

    /// Render-side view of this particle.
    pub fn to_instance(&self) -> ParticleInstance {
        ParticleInstance {
            position: self.position.to_array(),
            _pad0: 0.0,
            size: self.size.to_array(),
            _pad1: 0.0,
            color: self.color.to_array(),
        }
    }
}

/// GPU-compatible per-instance record for the renderer.
///
/// Laid out with the 16-byte alignment WGSL expects for `vec3<f32>` fields.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleInstance {
    pub position: [f32; 3],
    _pad0: f32,
    pub size: [f32; 3],
    _pad1: f32,
    pub color: [f32; 4],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_integrates_position() {
        let mut p = Particle {
            velocity: Vec3::new(1.0, -2.0, 0.5),
            lifetime: 1.0,
            ..Default::default()
        };
        p.update(0.5);
        assert_eq!(p.position, Vec3::new(0.5, -1.0, 0.25));
        assert_eq!(p.velocity, Vec3::new(1.0, -2.0, 0.5));
        assert!((p.lifetime - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_expiry() {
        let mut p = Particle {
            lifetime: 0.1,
            ..Default::default()
        };
        assert!(!p.is_expired());
        p.update(0.1);
        assert!(!p.is_expired());
        p.update(0.05);
        assert!(p.is_expired());
    }

    #[test]
    fn test_kill_marks_expired() {
        let mut p = Particle {
            lifetime: 10.0,
            ..Default::default()
        };
        p.kill();
        assert!(p.is_expired());
        p.update(1.0 / 60.0);
        assert!(p.is_expired());
    }

    #[test]
    fn test_instance_layout() {
        assert_eq!(std::mem::size_of::<ParticleInstance>(), 48);

        let p = Particle {
            position: Vec3::new(1.0, 2.0, 3.0),
            color: Vec4::new(0.1, 0.2, 0.3, 0.4),
            ..Default::default()
        };
        let instance = p.to_instance();
        let bytes: &[u8] = bytemuck::bytes_of(&instance);
        assert_eq!(bytes.len(), 48);
        assert_eq!(instance.position, [1.0, 2.0, 3.0]);
        assert_eq!(instance.color, [0.1, 0.2, 0.3, 0.4]);
    }
}
