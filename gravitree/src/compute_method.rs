use glam::DVec2;

use crate::error::Result;

/// Trait for algorithms computing the net gravitational force on every body of a slice.
///
/// # Example
///
/// ```
/// # use gravitree::prelude::*;
/// # use glam::DVec2;
/// struct NoGravity;
///
/// impl<P> ComputeMethod<P> for NoGravity {
///     fn compute(&mut self, bodies: &[P]) -> gravitree::Result<Vec<DVec2>> {
///         Ok(vec![DVec2::ZERO; bodies.len()])
///     }
/// }
/// ```
pub trait ComputeMethod<P> {
    /// Computes the net force on each body.
    ///
    /// The returned vector has one force per body, in the same order as `bodies`. On error no
    /// force is returned and the bodies are left for the caller to retry or abandon the step.
    fn compute(&mut self, bodies: &[P]) -> Result<Vec<DVec2>>;

    /// Number of bodies that did not exert any force during the last computation because they were
    /// outside of the simulated region.
    #[inline]
    fn dropped(&self) -> usize {
        0
    }
}

impl<P, C: ComputeMethod<P>> ComputeMethod<P> for &mut C {
    #[inline]
    fn compute(&mut self, bodies: &[P]) -> Result<Vec<DVec2>> {
        (**self).compute(bodies)
    }

    #[inline]
    fn dropped(&self) -> usize {
        (**self).dropped()
    }
}
