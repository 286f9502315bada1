//! Semi-implicit (symplectic) Euler integration.
//!
//! The velocity is updated first from the acceleration, and the position is then moved with the
//! *updated* velocity:
//!
//! ```text
//! a = F / m
//! v' = v + a * dt
//! x' = x + v' * dt
//! ```
//!
//! No guard is applied to `dt`: zero leaves a body in place, negative values integrate backwards.

use glam::DVec2;

use crate::body::Kinematic;

/// Returns the position and velocity of a body after one step of duration `dt` under `force`.
///
/// This is a pure function of its inputs and gives bit-for-bit identical results for identical
/// inputs.
///
/// # Example
///
/// ```
/// use gravitree::integrator::euler;
/// use glam::DVec2;
///
/// let (position, velocity) = euler(DVec2::ZERO, DVec2::ZERO, 2.0, DVec2::new(4.0, 0.0), 0.5);
///
/// assert_eq!(velocity, DVec2::new(1.0, 0.0));
/// assert_eq!(position, DVec2::new(0.5, 0.0));
/// ```
#[inline]
pub fn euler(position: DVec2, velocity: DVec2, mass: f64, force: DVec2, dt: f64) -> (DVec2, DVec2) {
    let acceleration = force / mass;
    let velocity = velocity + acceleration * dt;

    (position + velocity * dt, velocity)
}

/// Advances `body` by one step of duration `dt` under `force` and stores the force on it.
#[inline]
pub fn advance<P: Kinematic>(body: &mut P, force: DVec2, dt: f64) {
    let (position, velocity) = euler(body.position(), body.velocity(), body.mass(), force, dt);
    body.set_state(position, velocity, force);
}
