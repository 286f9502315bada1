use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::{
    body::BodyID,
    error::{Error, Result},
    gravity::Newtonian,
    tree::{Region, DEFAULT_MAX_DEPTH},
};

/// Run-wide constants of a simulation.
///
/// Every field has a default, so a configuration file only needs to list the values it changes.
/// The defaults are `G = 1`, `theta = 0.5` and a softening of `1e-9` over a ±50 AU square, with
/// `dt = 0.001` and one trajectory sample every 10 steps.
///
/// # Example
///
/// ```
/// use gravitree::config::SimulationConfig;
///
/// let config = SimulationConfig::default();
/// assert_eq!(config.theta, 0.5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Gravitational constant.
    pub g: f64,
    /// Opening angle of the Barnes-Hut approximation.
    pub theta: f64,
    /// Distance under which two point masses do not interact.
    pub softening: f64,
    /// Region covered by the quadtree. Bodies outside of it exert no force.
    pub region: Region,
    /// Duration of a step.
    pub dt: f64,
    /// Cap on the depth of the quadtree.
    pub max_depth: u32,
    /// Trajectory sampling.
    pub trajectory: TrajectoryConfig,
}

/// Trajectory sampling settings of a [`SimulationConfig`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrajectoryConfig {
    /// Maximum number of points kept per body.
    pub capacity: usize,
    /// Number of steps between two samples.
    pub interval: u64,
    /// Bodies to track. Every body is tracked if absent.
    pub tracked: Option<Vec<BodyID>>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            g: 1.0,
            theta: 0.5,
            softening: 1e-9,
            region: Region::centered(50.0),
            dt: 0.001,
            max_depth: DEFAULT_MAX_DEPTH,
            trajectory: TrajectoryConfig::default(),
        }
    }
}

impl Default for TrajectoryConfig {
    fn default() -> Self {
        Self {
            capacity: 1000,
            interval: 10,
            tracked: None,
        }
    }
}

impl SimulationConfig {
    /// Returns the gravity law described by this configuration.
    #[inline]
    pub const fn gravity(&self) -> Newtonian {
        Newtonian::new(self.g, self.softening)
    }

    /// Checks that every value is in its valid range.
    pub fn validate(&self) -> Result<()> {
        let check = |ok: bool, reason| if ok { Ok(()) } else { Err(Error::InvalidConfig(reason)) };

        check(self.g.is_finite(), "g must be finite")?;
        check(
            self.theta.is_finite() && self.theta >= 0.0,
            "theta must be finite and non-negative",
        )?;
        check(
            self.softening.is_finite() && self.softening >= 0.0,
            "softening must be finite and non-negative",
        )?;
        check(self.dt.is_finite() && self.dt > 0.0, "dt must be finite and positive")?;
        check(
            self.region.origin.is_finite()
                && self.region.size.is_finite()
                && self.region.size.cmpgt(DVec2::ZERO).all(),
            "region must be finite with a positive size",
        )?;
        check(self.trajectory.capacity > 0, "trajectory capacity must be positive")?;
        check(self.trajectory.interval > 0, "trajectory interval must be positive")?;

        Ok(())
    }
}
