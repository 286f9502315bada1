#![warn(missing_docs)]
//! # Gravitree
//!
//! Gravitree is a crate simulating the gravitational interaction of many bodies in the plane with
//! the [Barnes-Hut](https://en.wikipedia.org/wiki/Barnes%E2%80%93Hut_simulation) approximation.
//!
//! Every step, a [`Quadtree`](tree::Quadtree) is built over a fixed region, the mass and center of
//! mass of each of its nodes are aggregated, and the net force on each body is evaluated by
//! treating distant groups of bodies as single point masses. The bodies are then moved with a
//! semi-implicit Euler integrator and their trajectories are sampled into bounded histories.
//!
//! ### Computation algorithms
//!
//! There are 2 algorithms:
//! [Brute-force](https://en.wikipedia.org/wiki/N-body_problem#Simulation) and Barnes-Hut.
//!
//! The Brute-force algorithm is exact but runs in `O(n²)`. The Barnes-Hut algorithm runs in
//! `O(n log n)` and allows trading accuracy for speed by increasing the `theta` parameter. With
//! `theta = 0` both give the same forces.
//!
//! Gravitree uses [rayon](https://github.com/rayon-rs/rayon) for parallelization. Enable the
//! `parallel` feature to access the [`parallel`] module.
//!
//! ## Using Gravitree
//!
//! ### Getting started
//!
//! The [`Position`] and [`Mass`] traits are all the tree and the force evaluation need from a body.
//! When a type has fields named `position` and `mass`, or fields marked with `#[position]` and
//! `#[mass]`, you can derive them.
//!
//! ```
//! use gravitree::prelude::*;
//! use glam::DVec2;
//!
//! #[derive(Position, Mass)]
//! struct Planet {
//!     position: DVec2,
//!     velocity: DVec2,
//!     mass: f64,
//! }
//! ```
//!
//! Tuples of a position and a mass implement both traits, which is enough to compute forces:
//!
//! ```
//! use gravitree::prelude::*;
//! use glam::DVec2;
//!
//! let bodies = [(DVec2::new(-1.0, 0.0), 1.0), (DVec2::new(1.0, 0.0), 1.0)];
//! let mut barnes_hut = BarnesHut::from_config(&SimulationConfig::default());
//!
//! let forces = barnes_hut.compute(&bodies)?;
//! assert_eq!(forces, [DVec2::new(0.25, 0.0), DVec2::new(-0.25, 0.0)]);
//! # Ok::<(), gravitree::Error>(())
//! ```
//!
//! ### Running a simulation
//!
//! Types implementing [`Kinematic`] can also be moved. [`Body`] is provided for convenience, and a
//! [`Simulation`] drives the whole step: forces first, then integration, then trajectory sampling.
//!
//! ```
//! use gravitree::{prelude::*, scenario};
//!
//! let mut system = scenario::solar_system(1.0);
//! let mut simulation = Simulation::barnes_hut(SimulationConfig::default())?;
//!
//! for _ in 0..20 {
//!     let report = simulation.step(&mut system.bodies)?;
//!     assert_eq!(report.dropped, 0);
//! }
//!
//! let earth = simulation.trajectories().get(3).unwrap();
//! assert_eq!(earth.len(), 2);
//! # Ok::<(), gravitree::Error>(())
//! ```
//!
//! Bodies outside of [`SimulationConfig::region`] are not an error: they keep feeling the bodies
//! inside of it but do not exert any force, and are counted in [`StepReport::dropped`].
//!
//! [`Position`]: body::Position
//! [`Mass`]: body::Mass
//! [`Kinematic`]: body::Kinematic
//! [`Body`]: body::Body
//! [`Simulation`]: simulation::Simulation
//! [`StepReport::dropped`]: simulation::StepReport::dropped
//! [`SimulationConfig::region`]: config::SimulationConfig::region

/// Force evaluation over an aggregated quadtree.
pub mod barnes_hut;
/// Bodies and the traits describing them.
pub mod body;
/// Interface of the algorithms computing forces.
pub mod compute_method;
/// Run-wide constants.
pub mod config;
/// Errors of fallible operations.
pub mod error;
/// Newtonian gravity between point masses.
pub mod gravity;
pub mod integrator;
/// Algorithms that use multiple CPU threads.
#[cfg(feature = "parallel")]
pub mod parallel;
pub mod record;
pub mod scenario;
/// Algorithms that use one CPU thread.
pub mod sequential;
/// Step driver.
pub mod simulation;
/// Bounded position histories.
pub mod trajectory;
/// Quadtree space partitioning.
pub mod tree;

pub use compute_method::ComputeMethod;
pub use error::{Error, Result};

/// Most commonly used items.
pub mod prelude {
    // Common traits and their derive macros.
    pub use crate::body::{Body, BodyID, Kinematic, Mass, Position};
    pub use gravitree_derive::{Mass, Position};

    pub use crate::{
        config::SimulationConfig,
        sequential::{BarnesHut, BruteForce},
        simulation::{Simulation, StepReport},
        ComputeMethod,
    };
}
