//! Per-particle behaviors applied every tick.
//!
//! An [`Action`] mutates one particle's velocity (and sometimes its position
//! or lifetime) for one time step. Actions hold only their own parameters,
//! so the same action can be applied to any number of particles.
//!
//! # Action Categories
//!
//! - **Forces**: ConstantForce, Centripetal, Attractor
//! - **Damping**: Drag, SpeedLimit
//! - **Removal**: PointSink, PlaneSink
//! - **Collision**: PlaneBounce
//! - **Grouping**: Composite
//!
//! Actions must run before [`Particle::update`] in a tick for their effect to
//! show up in that tick's integration.
//!
//! ```ignore
//! let actions = vec![
//!     Action::gravity(9.8),
//!     Action::bounce(Vec3::ZERO, Vec3::Y, 0.6),
//!     Action::PlaneSink { point: Vec3::new(0.0, -5.0, 0.0), normal: Vec3::Y, tolerance: 0.0 },
//! ];
//! for action in &actions {
//!     action.apply(&mut particle, dt);
//! }
//! particle.update(dt);
//! ```

use crate::particle::Particle;
use crate::sampling::orthonormal_basis;
use glam::Vec3;

/// Distance falloff for attractor forces.
///
/// Controls how an attractor's pull changes with distance from its position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Falloff {
    /// Same pull at every distance; only the direction changes.
    #[default]
    Constant,

    /// Pull = 1/distance (with softening).
    Inverse,

    /// Pull = 1/distance² (gravity-like).
    InverseSquare,
}

impl Falloff {
    /// Scale factor for a force at `dist` from its source.
    #[inline]
    pub fn factor(&self, dist: f32) -> f32 {
        match self {
            Falloff::Constant => 1.0,
            Falloff::Inverse => 1.0 / (dist + 0.01),
            Falloff::InverseSquare => 1.0 / (dist * dist + 0.0001),
        }
    }
}

/// Behaviors applied to live particles every tick.
///
/// Each variant modifies velocity, position or remaining lifetime in place.
/// Nothing is returned and nothing is deleted: removal actions only mark the
/// particle expired, and the pool that owns it does the rest.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    /// Does nothing.
    #[default]
    None,

    /// Constant acceleration along a direction.
    ///
    /// `velocity += direction * magnitude * dt`
    ///
    /// # Example
    ///
    /// ```ignore
    /// Action::ConstantForce { direction: Vec3::X, magnitude: 2.0 }  // wind
    /// Action::gravity(9.8)                                          // same thing, pointing down
    /// ```
    ConstantForce {
        /// Direction of the force. Used as given; normalize it for a pure heading.
        direction: Vec3,
        /// Acceleration in units per second squared.
        magnitude: f32,
    },

    /// Pull particles onto a cylinder around an axis.
    ///
    /// Particles farther than `radius` from the axis accelerate toward it,
    /// closer ones are pushed out. The push grows with the distance from the
    /// cylinder surface.
    ///
    /// # Example
    ///
    /// ```ignore
    /// // Tornado funnel around the Y axis
    /// Action::Centripetal { center: Vec3::ZERO, axis: Vec3::Y, radius: 2.0, strength: 4.0 }
    /// ```
    Centripetal {
        /// Any point on the axis.
        center: Vec3,
        /// Axis direction.
        axis: Vec3,
        /// Radius of the cylinder particles settle on.
        radius: f32,
        /// Acceleration per unit of distance from the cylinder.
        strength: f32,
    },

    /// Accelerate toward a point.
    ///
    /// With [`Falloff::Constant`] only the direction depends on where the
    /// particle is. A particle sitting exactly on the point is left alone.
    Attractor {
        /// Point particles are drawn to.
        position: Vec3,
        /// Acceleration (negative repels).
        strength: f32,
        /// How the pull changes with distance.
        falloff: Falloff,
    },

    /// Expire particles that come within `tolerance` of a point.
    PointSink {
        /// Center of the sink.
        position: Vec3,
        /// Capture radius.
        tolerance: f32,
    },

    /// Expire particles behind a plane, or less than `tolerance` in front of it.
    PlaneSink {
        /// Any point on the plane.
        point: Vec3,
        /// Plane normal. The front side is where it points.
        normal: Vec3,
        /// Extra margin in front of the plane that also kills.
        tolerance: f32,
    },

    /// Bounce particles off a plane.
    ///
    /// A particle in front of the plane whose next Euler step would carry it
    /// behind has its velocity reflected. The normal component is reversed
    /// and scaled by `elasticity`; the tangential one is scaled by
    /// `1 - friction`.
    ///
    /// # Example
    ///
    /// ```ignore
    /// Action::bounce(Vec3::ZERO, Vec3::Y, 0.8)  // bouncy floor
    /// ```
    PlaneBounce {
        /// Any point on the plane.
        point: Vec3,
        /// Plane normal, facing the side particles bounce back into.
        normal: Vec3,
        /// Fraction of normal speed kept after the bounce, in `[0, 1]`.
        elasticity: f32,
        /// Fraction of tangential speed lost on the bounce, in `[0, 1]`.
        friction: f32,
    },

    /// Linear velocity damping.
    ///
    /// `velocity *= 1 - drag * dt`, never flipping the direction.
    Drag(f32),

    /// Clamp speed into `[min, max]`, keeping the direction.
    ///
    /// A particle at rest stays at rest.
    SpeedLimit {
        /// Minimum speed.
        min: f32,
        /// Maximum speed.
        max: f32,
    },

    /// Apply several actions in order.
    ///
    /// Sub-actions run in insertion order against the same particle and
    /// `dt`, so each sees the changes made by the ones before it.
    Composite(Vec<Action>),
}

impl Action {
    /// Downward acceleration of `g` along -Y.
    pub fn gravity(g: f32) -> Self {
        Action::ConstantForce {
            direction: Vec3::NEG_Y,
            magnitude: g,
        }
    }

    /// Attractor with no distance falloff.
    pub fn attract_to(position: Vec3, strength: f32) -> Self {
        Action::Attractor {
            position,
            strength,
            falloff: Falloff::Constant,
        }
    }

    /// Frictionless plane bounce.
    pub fn bounce(point: Vec3, normal: Vec3, elasticity: f32) -> Self {
        Action::PlaneBounce {
            point,
            normal,
            elasticity,
            friction: 0.0,
        }
    }

    /// Group actions into one, preserving their order.
    pub fn composite(actions: impl IntoIterator<Item = Action>) -> Self {
        Action::Composite(actions.into_iter().collect())
    }

    /// Apply this action to one particle for a step of `dt` seconds.
    pub fn apply(&self, p: &mut Particle, dt: f32) {
        match self {
            Action::None => {}

            Action::ConstantForce {
                direction,
                magnitude,
            } => {
                p.velocity += *direction * *magnitude * dt;
            }

            Action::Centripetal {
                center,
                axis,
                radius,
                strength,
            } => {
                let axis = axis.try_normalize().unwrap_or(Vec3::Y);
                let rel = p.position - *center;
                let radial = rel - axis * rel.dot(axis);
                let dist = radial.length();
                // On the axis itself any perpendicular direction will do
                let outward = radial
                    .try_normalize()
                    .unwrap_or_else(|| orthonormal_basis(axis).0);
                p.velocity += outward * (*radius - dist) * *strength * dt;
            }

            Action::Attractor {
                position,
                strength,
                falloff,
            } => {
                let delta = *position - p.position;
                if let Some(dir) = delta.try_normalize() {
                    let pull = *strength * falloff.factor(delta.length());
                    p.velocity += dir * pull * dt;
                }
            }

            Action::PointSink {
                position,
                tolerance,
            } => {
                if p.position.distance(*position) <= *tolerance {
                    p.kill();
                }
            }

            Action::PlaneSink {
                point,
                normal,
                tolerance,
            } => {
                let n = normal.try_normalize().unwrap_or(Vec3::Y);
                if (p.position - *point).dot(n) < *tolerance {
                    p.kill();
                }
            }

            Action::PlaneBounce {
                point,
                normal,
                elasticity,
                friction,
            } => {
                let Some(n) = normal.try_normalize() else {
                    return;
                };
                let normal_speed = p.velocity.dot(n);
                if normal_speed >= 0.0 {
                    return;
                }

                let dist = (p.position - *point).dot(n);
                let next_dist = dist + normal_speed * dt;
                if dist >= 0.0 && next_dist < 0.0 {
                    let normal_part = n * normal_speed;
                    let tangent_part = p.velocity - normal_part;
                    p.velocity = tangent_part * (1.0 - friction.clamp(0.0, 1.0))
                        - normal_part * elasticity.clamp(0.0, 1.0);
                }
            }

            Action::Drag(d) => {
                p.velocity *= (1.0 - *d * dt).max(0.0);
            }

            Action::SpeedLimit { min, max } => {
                let speed = p.velocity.length();
                if speed > *max {
                    p.velocity *= *max / speed;
                } else if speed > 0.0 && speed < *min {
                    p.velocity *= *min / speed;
                }
            }

            Action::Composite(actions) => {
                for action in actions {
                    action.apply(p, dt);
                }
            }
        }
    }

    /// Apply this action to every particle in a slice.
    pub fn apply_all(&self, particles: &mut [Particle], dt: f32) {
        for p in particles {
            self.apply(p, dt);
        }
    }

    /// Returns `true` if this action can expire particles.
    pub fn removes_particles(&self) -> bool {
        match self {
            Action::PointSink { .. } | Action::PlaneSink { .. } => true,
            Action::Composite(actions) => actions.iter().any(Action::removes_particles),
            _ => false,
        }
    }
}
