use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Newton's law of universal gravitation with a cutoff distance.
///
/// Pairs closer than `softening` do not interact at all: the force is skipped rather than
/// smoothed, which loses a little accuracy for close encounters but never divides by a
/// near-zero distance.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Newtonian {
    /// Gravitational constant.
    pub g: f64,
    /// Distance under which two point masses are considered coincident and do not interact.
    pub softening: f64,
}

impl Newtonian {
    /// Creates a new [`Newtonian`] gravity with the given constant and cutoff distance.
    #[inline]
    pub const fn new(g: f64, softening: f64) -> Self {
        Self { g, softening }
    }

    /// Returns the force exerted on the point mass `(position, mass)` by the point mass
    /// `(other, other_mass)`.
    ///
    /// The magnitude is `G * mass * other_mass / d²`, directed from `position` towards `other`.
    /// Returns zero if `d` is below the cutoff distance, or if both positions are equal.
    ///
    /// ```
    /// use gravitree::gravity::Newtonian;
    /// use glam::DVec2;
    ///
    /// let gravity = Newtonian::new(1.0, 1e-9);
    /// let force = gravity.force(DVec2::new(-1.0, 0.0), 1.0, DVec2::new(1.0, 0.0), 1.0);
    ///
    /// assert_eq!(force, DVec2::new(0.25, 0.0));
    /// ```
    #[inline]
    pub fn force(&self, position: DVec2, mass: f64, other: DVec2, other_mass: f64) -> DVec2 {
        let dir = other - position;
        let mag_2 = dir.length_squared();
        let mag = mag_2.sqrt();

        if mag_2 == 0.0 || mag < self.softening {
            return DVec2::ZERO;
        }

        dir * (self.g * mass * other_mass / (mag_2 * mag))
    }
}

impl Default for Newtonian {
    /// Unit gravitational constant with a cutoff of `1e-9`.
    #[inline]
    fn default() -> Self {
        Self::new(1.0, 1e-9)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverse_square_magnitude() {
        let gravity = Newtonian::new(2.0, 1e-9);
        let force = gravity.force(DVec2::ZERO, 3.0, DVec2::new(0.0, 4.0), 5.0);

        assert!(force.abs_diff_eq(DVec2::new(0.0, 2.0 * 3.0 * 5.0 / 16.0), 1e-15));
    }

    #[test]
    fn pairs_are_opposite() {
        let gravity = Newtonian::default();
        let (a, b) = (DVec2::new(0.3, -1.2), DVec2::new(-2.0, 0.7));

        assert_eq!(gravity.force(a, 2.0, b, 5.0), -gravity.force(b, 5.0, a, 2.0));
    }

    #[test]
    fn closer_than_softening_is_skipped() {
        let gravity = Newtonian::new(1.0, 0.1);

        assert_eq!(gravity.force(DVec2::ZERO, 1.0, DVec2::new(0.05, 0.0), 1.0), DVec2::ZERO);
        assert_ne!(gravity.force(DVec2::ZERO, 1.0, DVec2::new(0.2, 0.0), 1.0), DVec2::ZERO);
    }

    #[test]
    fn coincident_without_softening_is_finite() {
        let gravity = Newtonian::new(1.0, 0.0);

        assert_eq!(gravity.force(DVec2::ONE, 1.0, DVec2::ONE, 1.0), DVec2::ZERO);
    }
}
