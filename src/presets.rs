//! Ready-made emitter configurations.
//!
//! Common effects available as one-liners. Each preset returns a fully
//! configured [`Emitter`], including the actions its particles need, which
//! can be tweaked further with the usual builder methods:
//!
//! ```ignore
//! let fountain = presets::fountain(Vec3::ZERO, 800.0).with_seed(42);
//! let sparks = presets::sparks(Vec3::new(0.0, 2.0, 0.0), 2000.0, 0.5);
//! let halo = presets::ring(Vec3::ZERO, 3.0, 400.0);
//! ```

use crate::action::Action;
use crate::distribution::{
    CircleLocation, ConeVelocity, DiskLocation, NormalColor, NormalLifetime, PaletteColor,
    RadialVelocity, SphereLocation, TangentVelocity,
};
use crate::emitter::{Emitter, EmitterAction, TrackedPosition};
use crate::error::ConfigError;
use glam::{Vec3, Vec4};

/// Fountain: particles shoot up, arc over and bounce on the ground.
///
/// The ground plane passes through `position`.
///
/// # Arguments
///
/// * `position` - Nozzle position
/// * `rate` - Particles per second
pub fn fountain(position: Vec3, rate: f32) -> Emitter {
    Emitter::new()
        .with_output_group("fountain")
        .with_position(position)
        .with_rate(rate)
        .with_size(0.05)
        .with_lifetime(NormalLifetime::new(2.5, 0.3))
        .with_location(DiskLocation::new(0.1, Vec3::Y))
        .with_velocity(ConeVelocity::new(Vec3::Y, 0.9, 6.0, 0.5))
        .with_color(NormalColor::new(Vec4::new(0.6, 0.8, 1.0, 0.2), 1.0, 0.1))
        .with_action(Action::gravity(9.8))
        .with_action(Action::bounce(position, Vec3::Y, 0.4))
}

/// Ring: particles swirl around a vertical axis and hold a fixed radius.
///
/// # Arguments
///
/// * `position` - Center of the ring
/// * `radius` - Ring radius
/// * `rate` - Particles per second
pub fn ring(position: Vec3, radius: f32, rate: f32) -> Emitter {
    Emitter::new()
        .with_output_group("ring")
        .with_position(position)
        .with_rate(rate)
        .with_size(0.08)
        .with_lifetime(NormalLifetime::new(1.5, 0.2))
        .with_location(CircleLocation::new(radius, Vec3::Y))
        .with_velocity(TangentVelocity::new(Vec3::Y, 2.0, 0.2))
        .with_color(NormalColor::new(Vec4::new(0.8, 0.4, 1.0, 0.6), 0.9, 0.1))
        .with_action(Action::Centripetal {
            center: position,
            axis: Vec3::Y,
            radius,
            strength: 3.0,
        })
}

/// Sparks: a short burst of hot, fast particles that slow and fall.
///
/// # Arguments
///
/// * `position` - Burst center
/// * `rate` - Particles per second while active
/// * `duration` - Seconds of emission
pub fn sparks(position: Vec3, rate: f32, duration: f32) -> Emitter {
    Emitter::new()
        .with_output_group("sparks")
        .with_position(position)
        .with_rate(rate)
        .with_size(0.02)
        .with_time_remaining(duration)
        .with_lifetime(NormalLifetime::new(0.6, 0.1))
        .with_location(SphereLocation::new(0.02))
        .with_velocity(RadialVelocity::new(4.0, 1.0))
        .with_color(NormalColor::new(Vec4::new(1.0, 0.7, 0.2, 1.0), 1.0, 0.2))
        .with_action(Action::Drag(1.5))
        .with_action(Action::gravity(4.0))
}

/// Confetti: pieces in a fixed set of colors, drifting down.
///
/// Fails if `colors` is empty.
pub fn confetti(
    position: Vec3,
    rate: f32,
    colors: impl IntoIterator<Item = Vec4>,
) -> Result<Emitter, ConfigError> {
    let palette = PaletteColor::new(colors)?;

    Ok(Emitter::new()
        .with_output_group("confetti")
        .with_position(position)
        .with_rate(rate)
        .with_size(0.04)
        .with_lifetime(NormalLifetime::new(4.0, 0.5))
        .with_location(DiskLocation::new(1.0, Vec3::Y))
        .with_velocity(ConeVelocity::new(Vec3::Y, 0.5, 1.5, 0.5))
        .with_color(palette)
        .with_action(Action::gravity(1.0))
        .with_action(Action::Drag(0.8)))
}

/// Trail: particles shed from an emitter that tracks `target`.
///
/// Update `target` every frame; the emitter snaps onto it and wobbles
/// slightly so the trail does not look ruled.
pub fn trail(target: TrackedPosition, rate: f32) -> Emitter {
    let start = target.get();
    Emitter::new()
        .with_output_group("trail")
        .with_position(start)
        .with_rate(rate)
        .with_size(0.03)
        .with_emitter_action(EmitterAction::Follow {
            target,
            offset: Vec3::ZERO,
            depth: None,
        })
        .with_emitter_action(EmitterAction::Jitter { spread: 0.01 })
        .with_lifetime(NormalLifetime::new(0.8, 0.1))
        .with_location(SphereLocation::new(0.05))
        .with_velocity(RadialVelocity::new(0.3, 0.1))
        .with_color(NormalColor::new(Vec4::new(1.0, 1.0, 1.0, 0.5), 0.7, 0.15))
        .with_action(Action::Drag(2.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::ParticleGroups;

    #[test]
    fn test_fountain_preset() {
        let emitter = fountain(Vec3::ZERO, 500.0);
        assert_eq!(emitter.output_group(), "fountain");
        assert_eq!(emitter.rate(), 500.0);
        assert!(emitter
            .actions()
            .iter()
            .any(|a| matches!(a, Action::PlaneBounce { .. })));
    }

    #[test]
    fn test_fountain_sprays_upward() {
        let mut pool = ParticleGroups::new();
        let mut emitter = fountain(Vec3::ZERO, 1000.0).with_seed(5);
        emitter.tick(0.1, &mut pool);
        assert!(!pool.group("fountain").is_empty());
        assert!(pool.group("fountain").iter().all(|p| p.velocity.y > 0.0));
    }

    #[test]
    fn test_sparks_are_time_limited() {
        let emitter = sparks(Vec3::ZERO, 100.0, 0.5);
        assert_eq!(emitter.time_remaining(), Some(0.5));
    }

    #[test]
    fn test_ring_spawns_on_radius() {
        let mut pool = ParticleGroups::new();
        let mut emitter = ring(Vec3::new(0.0, 1.0, 0.0), 3.0, 100.0).with_seed(2);
        emitter.tick(0.5, &mut pool);
        for p in pool.group("ring") {
            let offset = p.position - Vec3::new(0.0, 1.0, 0.0);
            assert!((offset.length() - 3.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_confetti_rejects_empty_palette() {
        assert!(matches!(
            confetti(Vec3::ZERO, 10.0, Vec::<Vec4>::new()),
            Err(ConfigError::EmptyPalette)
        ));
        assert!(confetti(Vec3::ZERO, 10.0, [Vec4::ONE]).is_ok());
    }

    #[test]
    fn test_trail_follows_target() {
        let target = TrackedPosition::new(Vec3::ZERO);
        let mut pool = ParticleGroups::new();
        let mut emitter = trail(target.clone(), 60.0).with_seed(1);

        target.set(Vec3::new(10.0, 0.0, 0.0));
        emitter.tick(1.0 / 60.0, &mut pool);
        assert!(emitter.position().distance(Vec3::new(10.0, 0.0, 0.0)) < 0.1);
    }
}
