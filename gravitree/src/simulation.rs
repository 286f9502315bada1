use log::{debug, warn};

use crate::{
    body::Kinematic,
    config::SimulationConfig,
    error::{Error, Result},
    integrator,
    sequential::{BarnesHut, BruteForce},
    trajectory::TrajectoryRecorder,
    ComputeMethod,
};

/// Outcome of a successful [`Simulation::step`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepReport {
    /// Number of steps completed so far, this one included.
    pub frame: u64,
    /// Simulated time after this step.
    pub time: f64,
    /// Number of bodies outside of the simulated region during this step.
    pub dropped: usize,
}

/// Drives a simulation: computes the forces on every body, then integrates all of them and samples
/// their trajectories.
///
/// # Example
///
/// ```
/// use gravitree::prelude::*;
/// use glam::DVec2;
///
/// let mut bodies = [
///     Body::new(DVec2::new(-1.0, 0.0), 1.0),
///     Body::new(DVec2::new(1.0, 0.0), 1.0),
/// ];
/// let mut simulation = Simulation::barnes_hut(SimulationConfig::default())?;
///
/// let report = simulation.step(&mut bodies)?;
/// assert_eq!(report.frame, 1);
/// assert!(bodies[0].velocity.x > 0.0);
/// # Ok::<(), gravitree::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct Simulation<C> {
    config: SimulationConfig,
    method: C,
    recorder: TrajectoryRecorder,
    frame: u64,
    time: f64,
}

impl Simulation<BarnesHut> {
    /// Creates a new [`Simulation`] using a sequential [`BarnesHut`] built from `config`.
    pub fn barnes_hut(config: SimulationConfig) -> Result<Self> {
        let method = BarnesHut::from_config(&config);
        Self::new(config, method)
    }
}

impl Simulation<BruteForce> {
    /// Creates a new [`Simulation`] using a sequential [`BruteForce`] with the gravity of `config`.
    pub fn brute_force(config: SimulationConfig) -> Result<Self> {
        let method = BruteForce::new(config.gravity());
        Self::new(config, method)
    }
}

impl<C> Simulation<C> {
    /// Creates a new [`Simulation`] after validating `config`.
    ///
    /// Only `dt` and the trajectory settings of `config` are used by the simulation itself. The
    /// gravitational constant, softening, opening angle, region and depth cap belong to `method`,
    /// which should be built from the same configuration, as [`Simulation::barnes_hut`] and
    /// [`Simulation::brute_force`] do.
    pub fn new(config: SimulationConfig, method: C) -> Result<Self> {
        config.validate()?;

        let trajectory = &config.trajectory;
        let recorder = TrajectoryRecorder::new(
            trajectory.capacity,
            trajectory.interval,
            trajectory.tracked.clone(),
        );

        Ok(Self {
            config,
            method,
            recorder,
            frame: 0,
            time: 0.0,
        })
    }

    /// Advances every body by one step.
    ///
    /// All forces are computed before any body moves. If the bodies are invalid or the force
    /// computation fails, no body is modified and the frame counter does not advance.
    pub fn step<P>(&mut self, bodies: &mut [P]) -> Result<StepReport>
    where
        P: Kinematic,
        C: ComputeMethod<P>,
    {
        if let Some(id) = bodies
            .iter()
            .position(|b| !(b.mass().is_finite() && b.mass() > 0.0))
        {
            return Err(Error::InvalidBody(id));
        }

        let forces = self.method.compute(bodies).map_err(|e| {
            warn!("step {} aborted: {e}", self.frame);
            e
        })?;
        let dropped = self.method.dropped();

        let dt = self.config.dt;
        for (body, force) in bodies.iter_mut().zip(forces) {
            integrator::advance(body, force, dt);
        }

        self.recorder.record(self.frame, bodies);
        self.frame += 1;
        self.time += dt;

        debug!(
            "step {} done at t = {:.3}: {} bodies, {dropped} dropped",
            self.frame,
            self.time,
            bodies.len()
        );

        Ok(StepReport {
            frame: self.frame,
            time: self.time,
            dropped,
        })
    }

    /// Configuration of the simulation.
    #[inline]
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Compute method used for the forces.
    #[inline]
    pub const fn method(&self) -> &C {
        &self.method
    }

    /// Recorded trajectories.
    #[inline]
    pub const fn trajectories(&self) -> &TrajectoryRecorder {
        &self.recorder
    }

    /// Number of steps completed.
    #[inline]
    pub const fn frame(&self) -> u64 {
        self.frame
    }

    /// Simulated time.
    #[inline]
    pub const fn time(&self) -> f64 {
        self.time
    }
}
