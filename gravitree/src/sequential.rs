use glam::DVec2;

use crate::{
    body::{Mass, Position},
    config::SimulationConfig,
    error::Result,
    gravity::Newtonian,
    tree::{Quadtree, Region},
    ComputeMethod,
};

/// A brute-force [`ComputeMethod`] using one CPU thread.
///
/// Sums every pair exactly, in `O(n²)`. Only useful as a reference for [`BarnesHut`] and for small
/// systems.
#[derive(Clone, Copy, Debug, Default)]
pub struct BruteForce {
    /// Gravity law between each pair of bodies.
    pub gravity: Newtonian,
}

impl BruteForce {
    /// Creates a new [`BruteForce`] with the given gravity law.
    #[inline]
    pub const fn new(gravity: Newtonian) -> Self {
        Self { gravity }
    }
}

impl<P: Position + Mass> ComputeMethod<P> for BruteForce {
    fn compute(&mut self, bodies: &[P]) -> Result<Vec<DVec2>> {
        let point_masses: Vec<_> = bodies.iter().map(|b| (b.position(), b.mass())).collect();
        let len = point_masses.len();

        let mut forces = vec![DVec2::ZERO; len];

        for i in 0..len {
            let (p1, m1) = point_masses[i];

            for j in (i + 1)..len {
                let (p2, m2) = point_masses[j];
                let force = self.gravity.force(p1, m1, p2, m2);

                forces[i] += force;
                forces[j] -= force;
            }
        }

        Ok(forces)
    }
}

/// [Barnes-Hut](https://en.wikipedia.org/wiki/Barnes%E2%80%93Hut_simulation) [`ComputeMethod`]
/// using one CPU thread.
///
/// Every computation builds a [`Quadtree`] over `region`, aggregates it, evaluates the force on
/// each body, then releases the nodes. The node storage is kept between computations.
#[derive(Clone, Debug)]
pub struct BarnesHut {
    /// Opening angle. If 0, behaves the same as [`BruteForce`] for bodies inside `region`.
    pub theta: f64,
    /// Gravity law between a body and a body or a node.
    pub gravity: Newtonian,
    /// Region covered by the root of the tree. Bodies outside of it exert no force.
    pub region: Region,
    tree: Quadtree,
    dropped: usize,
}

impl BarnesHut {
    /// Creates a new [`BarnesHut`] with the given opening angle, gravity law, region and depth cap.
    #[inline]
    pub const fn new(theta: f64, gravity: Newtonian, region: Region, max_depth: u32) -> Self {
        Self {
            theta,
            gravity,
            region,
            tree: Quadtree::new(max_depth),
            dropped: 0,
        }
    }

    /// Creates a new [`BarnesHut`] from the run-wide constants of a [`SimulationConfig`].
    #[inline]
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(
            config.theta,
            config.gravity(),
            config.region,
            config.max_depth,
        )
    }

    pub(crate) fn build<P: Position + Mass>(&mut self, bodies: &[P]) -> Result<&Quadtree> {
        if let Err(e) = self.tree.rebuild(self.region, bodies) {
            self.tree.clear();
            return Err(e);
        }
        self.tree.aggregate(bodies);
        self.dropped = self.tree.dropped();

        Ok(&self.tree)
    }

    pub(crate) fn release(&mut self) {
        self.tree.clear();
    }
}

impl<P: Position + Mass> ComputeMethod<P> for BarnesHut {
    fn compute(&mut self, bodies: &[P]) -> Result<Vec<DVec2>> {
        let (theta, gravity) = (self.theta, self.gravity);
        let tree = self.build(bodies)?;

        let forces = (0..bodies.len())
            .map(|id| tree.force_on(bodies, id, theta, &gravity))
            .collect();

        self.release();
        Ok(forces)
    }

    #[inline]
    fn dropped(&self) -> usize {
        self.dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute_method::tests;

    #[test]
    fn brute_force() {
        tests::force_computation(BruteForce::new(tests::GRAVITY));
    }

    #[test]
    fn barnes_hut() {
        tests::force_computation(BarnesHut::new(
            0.0,
            tests::GRAVITY,
            Region::centered(10.0),
            32,
        ));
    }

    #[test]
    fn barnes_hut_reports_dropped_bodies() {
        let mut cm = BarnesHut::new(0.5, tests::GRAVITY, Region::centered(1.0), 32);
        let bodies = [(DVec2::ZERO, 1.0), (DVec2::new(5.0, 0.0), 1.0)];

        let forces = cm.compute(&bodies).unwrap();

        assert_eq!(ComputeMethod::<(DVec2, f64)>::dropped(&cm), 1);
        assert_eq!(forces[0], DVec2::ZERO);
        assert_ne!(forces[1], DVec2::ZERO);
    }
}
