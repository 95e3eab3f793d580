//! Integration tests for the public simulation API.
//!
//! These tests drive emitters, actions and distributions the way a host
//! application would, through the crate's re-exports only.

use ember::prelude::*;

const DT: f32 = 1.0 / 60.0;

fn quiet_emitter(rate: f32) -> Emitter {
    Emitter::new()
        .with_seed(11)
        .with_rate(rate)
        .with_lifetime(ConstantLifetime(100.0))
        .with_location(PointLocation)
        .with_velocity(FixedVelocity(Vec3::ZERO))
}

// ============================================================================
// Emission
// ============================================================================

#[test]
fn test_cumulative_emission_tracks_rate() {
    let mut pool = ParticleGroups::new();
    let mut emitter = quiet_emitter(37.0);

    let mut total = 0;
    for n in 1..=600 {
        total += emitter.tick(DT, &mut pool);
        let expected = 37.0 * n as f32 * DT;
        assert!(
            (total as f32 - expected).abs() <= 1.0,
            "after {} ticks spawned {} expected ~{}",
            n,
            total,
            expected
        );
    }
    assert_eq!(pool.len(), total);
}

#[test]
fn test_fractional_rate_spawns_every_other_tick() {
    let mut pool = ParticleGroups::new();
    let mut emitter = quiet_emitter(30.0);

    let counts: Vec<usize> = (0..4).map(|_| emitter.tick(DT, &mut pool)).collect();
    assert_eq!(counts.iter().sum::<usize>(), 2);
    assert!(counts.iter().all(|&c| c <= 1));
}

#[test]
fn test_zero_rate_never_spawns() {
    let mut pool = ParticleGroups::new();
    let mut emitter = quiet_emitter(0.0);
    for _ in 0..100 {
        assert_eq!(emitter.tick(DT, &mut pool), 0);
    }
    assert!(pool.is_empty());
}

#[test]
fn test_countdown_exhausts() {
    let mut pool = ParticleGroups::new();
    let mut emitter = quiet_emitter(1.0).with_time_remaining(2.0);

    emitter.tick(1.0, &mut pool);
    assert_eq!(emitter.status(), EmitterStatus::Active);

    emitter.tick(1.0, &mut pool);
    assert_eq!(emitter.status(), EmitterStatus::Exhausted);

    let before = pool.len();
    assert_eq!(emitter.tick(1.0, &mut pool), 0);
    assert_eq!(pool.len(), before);
}

#[test]
fn test_spawn_writes_every_field() {
    let mut pool = ParticleGroups::new();
    let mut emitter = Emitter::new()
        .with_seed(4)
        .with_output_group("sparks")
        .with_position(Vec3::new(1.0, 2.0, 3.0))
        .with_rate(60.0)
        .with_size(0.25)
        .with_lifetime(ConstantLifetime(1.5))
        .with_location(PointLocation)
        .with_velocity(FixedVelocity(Vec3::X))
        .with_color(ConstantColor(Vec4::new(1.0, 0.5, 0.0, 1.0)));

    assert_eq!(emitter.tick(DT, &mut pool), 1);
    let p = pool.group("sparks")[0];
    assert_eq!(p.position, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(p.velocity, Vec3::X);
    assert_eq!(p.size, Vec3::splat(0.25));
    assert_eq!(p.color, Vec4::new(1.0, 0.5, 0.0, 1.0));
    assert_eq!(p.lifetime, 1.5);
}

// ============================================================================
// Distributions
// ============================================================================

#[test]
fn test_approx_normal_mean_and_bounds() {
    let mut rng = Sampler::seeded(99);
    let n = 20_000;
    let mut sum = 0.0;
    for _ in 0..n {
        let v = rng.approx_normal(5.0, 2.0);
        assert!((-1.0..=11.0).contains(&v));
        sum += v;
    }
    let mean = sum / n as f32;
    assert!((mean - 5.0).abs() < 0.1, "mean was {}", mean);
}

#[test]
fn test_sphere_points_at_radius() {
    let mut rng = Sampler::seeded(5);
    let center = Vec3::new(-2.0, 4.0, 1.0);
    let location = SphereLocation::new(3.0);
    for _ in 0..1_000 {
        let at = location.sample(&mut rng, center);
        assert!((at.distance(center) - 3.0).abs() < 1e-3);
    }
}

#[test]
fn test_combiner_midpoint() {
    let combiner =
        LinearVelocityCombiner::new(0.5, FixedVelocity(Vec3::X), FixedVelocity(Vec3::Y)).unwrap();
    let mut rng = Sampler::seeded(0);
    let v = combiner.sample(&mut rng, Vec3::ZERO, Vec3::ZERO);
    assert!((v - Vec3::new(0.5, 0.5, 0.0)).length() < 1e-6);
}

#[test]
fn test_combiner_rejects_nan_weight() {
    let result =
        LinearVelocityCombiner::new(f32::NAN, FixedVelocity(Vec3::X), FixedVelocity(Vec3::Y));
    assert!(matches!(result, Err(ConfigError::InvalidWeight(_))));
}

#[test]
fn test_radial_velocity_points_away_from_emitter() {
    let mut pool = ParticleGroups::new();
    let mut emitter = Emitter::new()
        .with_seed(21)
        .with_position(Vec3::new(0.0, 5.0, 0.0))
        .with_rate(600.0)
        .with_location(SphereLocation::new(1.0))
        .with_velocity(RadialVelocity::new(3.0, 0.0));

    emitter.tick(0.1, &mut pool);
    assert!(!pool.is_empty());
    for p in pool.iter() {
        let out = (p.position - emitter.position()).normalize();
        assert!(out.dot(p.velocity.normalize()) > 0.999);
        assert!((p.velocity.length() - 3.0).abs() < 1e-3);
    }
}

// ============================================================================
// Actions
// ============================================================================

#[test]
fn test_plane_bounce_reflects() {
    let mut p = Particle {
        position: Vec3::new(0.0, 0.01, 0.0),
        velocity: Vec3::new(0.0, -5.0, 0.0),
        lifetime: 1.0,
        ..Default::default()
    };
    Action::bounce(Vec3::ZERO, Vec3::Y, 1.0).apply(&mut p, 0.1);
    assert!((p.velocity - Vec3::new(0.0, 5.0, 0.0)).length() < 1e-6);
}

#[test]
fn test_composite_order_matters() {
    let push = Action::ConstantForce {
        direction: Vec3::X,
        magnitude: 2.0,
    };
    let limit = Action::SpeedLimit { min: 0.0, max: 1.0 };

    let mut a = Particle::default();
    Action::composite([push.clone(), limit.clone()]).apply(&mut a, 1.0);

    let mut b = Particle::default();
    Action::composite([limit, push]).apply(&mut b, 1.0);

    assert_eq!(a.velocity, Vec3::new(1.0, 0.0, 0.0));
    assert_eq!(b.velocity, Vec3::new(2.0, 0.0, 0.0));
}

#[test]
fn test_sinks_only_mark_particles() {
    let mut particles = vec![
        Particle {
            position: Vec3::ZERO,
            lifetime: 1.0,
            ..Default::default()
        },
        Particle {
            position: Vec3::new(5.0, 0.0, 0.0),
            lifetime: 1.0,
            ..Default::default()
        },
    ];

    let sink = Action::PointSink {
        position: Vec3::ZERO,
        tolerance: 0.1,
    };
    sink.apply_all(&mut particles, DT);

    assert_eq!(particles.len(), 2);
    assert!(particles[0].is_expired());
    assert!(!particles[1].is_expired());
}

// ============================================================================
// Driver
// ============================================================================

#[test]
fn test_system_runs_burst_to_completion() {
    let mut system = ParticleSystem::new()
        .with_emitter(presets::sparks(Vec3::ZERO, 500.0, 0.2).with_seed(8));

    let mut spawned = 0;
    for _ in 0..600 {
        spawned += system.step(DT).spawned;
        if system.is_finished() {
            break;
        }
    }

    assert!(spawned > 0);
    assert!(system.is_finished());
}

#[test]
fn test_shared_group_actions_scoped_to_emitter() {
    let mut system = ParticleSystem::new()
        .with_emitter(quiet_emitter(10.0).with_action(Action::gravity(10.0)))
        .with_emitter(quiet_emitter(10.0).with_action(Action::gravity(10.0)))
        .with_emitter(
            quiet_emitter(10.0)
                .with_position(Vec3::new(0.0, 50.0, 0.0))
                .with_action(Action::ConstantForce {
                    direction: Vec3::X,
                    magnitude: 5.0,
                }),
        );

    system.step(0.1);

    let particles: Vec<Particle> = system.particles(ember::DEFAULT_GROUP).copied().collect();
    assert_eq!(particles.len(), 3);
    for p in &particles[..2] {
        assert!((p.velocity.y + 1.0).abs() < 1e-6, "vy was {}", p.velocity.y);
        assert_eq!(p.velocity.x, 0.0);
    }
    assert!((particles[2].velocity.x - 0.5).abs() < 1e-6);
    assert_eq!(particles[2].velocity.y, 0.0);
}

#[test]
fn test_idle_neighbour_does_not_change_fountain() {
    let mut alone =
        ParticleSystem::new().with_emitter(presets::fountain(Vec3::ZERO, 100.0).with_seed(5));
    let mut paired = ParticleSystem::new()
        .with_emitter(presets::fountain(Vec3::ZERO, 100.0).with_seed(5))
        .with_emitter(presets::fountain(Vec3::new(3.0, 0.0, 0.0), 0.0));

    for _ in 0..10 {
        alone.step(DT);
        paired.step(DT);
    }

    let a: Vec<Particle> = alone.particles("fountain").copied().collect();
    let b: Vec<Particle> = paired.particles("fountain").copied().collect();
    assert!(!a.is_empty());
    assert_eq!(a, b);
}

#[test]
fn test_exhausted_emitter_dropped_while_sibling_fills_group() {
    let burst = quiet_emitter(10.0)
        .with_lifetime(ConstantLifetime(0.25))
        .with_time_remaining(0.1);
    let mut system = ParticleSystem::new()
        .with_emitter(burst)
        .with_emitter(quiet_emitter(10.0));

    let mut removed = 0;
    for _ in 0..3 {
        removed += system.step(0.1).emitters_removed;
    }

    assert_eq!(removed, 1);
    assert_eq!(system.emitter_count(), 1);
    assert!(system.emitters().all(|e| e.status() == EmitterStatus::Active));
    assert_eq!(system.particles(ember::DEFAULT_GROUP).count(), 3);
}

#[test]
fn test_instances_match_particles() {
    let mut system = ParticleSystem::new().with_emitter(quiet_emitter(120.0));
    system.step(0.1);

    let instances = system.instances(ember::DEFAULT_GROUP);
    assert_eq!(instances.len(), system.particle_count());

    let bytes: &[u8] = ember::bytemuck::cast_slice(&instances);
    assert_eq!(bytes.len(), instances.len() * 48);
}

#[cfg(feature = "serde")]
#[test]
fn test_action_serde_round_trip() {
    let action = Action::composite([
        Action::gravity(9.8),
        Action::Attractor {
            position: Vec3::new(1.0, 2.0, 3.0),
            strength: 4.0,
            falloff: Falloff::InverseSquare,
        },
    ]);
    let json = serde_json::to_string(&action).unwrap();
    let back: Action = serde_json::from_str(&json).unwrap();
    assert_eq!(action, back);
}
