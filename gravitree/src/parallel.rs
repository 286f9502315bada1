use glam::DVec2;
use rayon::prelude::*;

use crate::{
    body::{Mass, Position},
    config::SimulationConfig,
    error::Result,
    gravity::Newtonian,
    sequential,
    tree::Region,
    ComputeMethod,
};

/// A brute-force [`ComputeMethod`] using multiple CPU threads with [rayon].
///
/// Each thread sums the forces on its share of bodies, so every pair is evaluated twice.
#[derive(Clone, Copy, Debug, Default)]
pub struct BruteForce {
    /// Gravity law between each pair of bodies.
    pub gravity: Newtonian,
}

impl BruteForce {
    /// Creates a new parallel [`BruteForce`] with the given gravity law.
    #[inline]
    pub const fn new(gravity: Newtonian) -> Self {
        Self { gravity }
    }
}

impl<P: Position + Mass + Sync> ComputeMethod<P> for BruteForce {
    fn compute(&mut self, bodies: &[P]) -> Result<Vec<DVec2>> {
        let point_masses: Vec<_> = bodies.iter().map(|b| (b.position(), b.mass())).collect();
        let gravity = self.gravity;

        Ok(point_masses
            .par_iter()
            .enumerate()
            .map(|(id, &(position, mass))| {
                point_masses
                    .iter()
                    .enumerate()
                    .filter(|&(other, _)| other != id)
                    .fold(DVec2::ZERO, |force, (_, &(p, m))| {
                        force + gravity.force(position, mass, p, m)
                    })
            })
            .collect())
    }
}

/// [Barnes-Hut](https://en.wikipedia.org/wiki/Barnes%E2%80%93Hut_simulation) [`ComputeMethod`]
/// using multiple CPU threads with [rayon].
///
/// The tree is built and aggregated on the calling thread. Only the traversals run in parallel.
#[derive(Clone, Debug)]
pub struct BarnesHut {
    inner: sequential::BarnesHut,
}

impl BarnesHut {
    /// Creates a new parallel [`BarnesHut`] with the given opening angle, gravity law, region and
    /// depth cap.
    #[inline]
    pub const fn new(theta: f64, gravity: Newtonian, region: Region, max_depth: u32) -> Self {
        Self {
            inner: sequential::BarnesHut::new(theta, gravity, region, max_depth),
        }
    }

    /// Creates a new parallel [`BarnesHut`] from the run-wide constants of a [`SimulationConfig`].
    #[inline]
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            inner: sequential::BarnesHut::from_config(config),
        }
    }
}

impl<P: Position + Mass + Sync> ComputeMethod<P> for BarnesHut {
    fn compute(&mut self, bodies: &[P]) -> Result<Vec<DVec2>> {
        let (theta, gravity) = (self.inner.theta, self.inner.gravity);
        let tree = self.inner.build(bodies)?;

        let forces = (0..bodies.len())
            .into_par_iter()
            .map(|id| tree.force_on(bodies, id, theta, &gravity))
            .collect();

        self.inner.release();
        Ok(forces)
    }

    #[inline]
    fn dropped(&self) -> usize {
        ComputeMethod::<P>::dropped(&self.inner)
    }
}
