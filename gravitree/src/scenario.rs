//! Initial conditions of the solar system and of its main asteroid belt.
//!
//! Distances are in astronomical units and masses in solar masses. Velocities are those of circular
//! orbits around a unit-mass Sun at the origin, for the given gravitational constant.

use std::f64::consts::TAU;

use glam::DVec2;
use rand::Rng;

use crate::body::Body;

/// Names, semi-major axes and masses of the Sun and the eight planets.
pub const PLANETS: [(&str, f64, f64); 9] = [
    ("Sun", 0.0, 1.0),
    ("Mercury", 0.387, 1.659e-7),
    ("Venus", 0.723, 2.447e-6),
    ("Earth", 1.0, 3.003e-6),
    ("Mars", 1.524, 3.227e-7),
    ("Jupiter", 5.203, 9.545e-4),
    ("Saturn", 9.539, 2.856e-4),
    ("Uranus", 19.191, 4.365e-5),
    ("Neptune", 30.069, 5.127e-5),
];

/// Inner and outer radius of the asteroid belt, between Mars and Jupiter.
pub const BELT: (f64, f64) = (2.2, 3.2);

const SUN_MASS: f64 = 1.0;

/// Named bodies ready to be simulated.
///
/// Names and bodies are stored separately so that `bodies` can be handed to a
/// [`Simulation`](crate::simulation::Simulation) as is.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scenario {
    /// Name of each body, by index.
    pub names: Vec<String>,
    /// The bodies.
    pub bodies: Vec<Body>,
}

impl Scenario {
    /// Number of bodies.
    #[inline]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Returns true if the scenario has no body.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Appends the bodies of `other` after the bodies of this scenario.
    pub fn extend(&mut self, other: Scenario) {
        self.names.extend(other.names);
        self.bodies.extend(other.bodies);
    }

    /// Iterates over the names and bodies.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Body)> {
        self.names.iter().map(String::as_str).zip(&self.bodies)
    }
}

fn circular_speed(g: f64, radius: f64) -> f64 {
    (g * SUN_MASS / radius).sqrt()
}

/// Returns the Sun at rest at the origin followed by the planets, each on the positive x axis at
/// its semi-major axis and moving along +y at its circular orbit speed.
///
/// # Example
///
/// ```
/// use gravitree::scenario::solar_system;
///
/// let system = solar_system(1.0);
/// assert_eq!(system.names[3], "Earth");
/// assert_eq!(system.bodies[3].velocity.y, 1.0);
/// ```
pub fn solar_system(g: f64) -> Scenario {
    let (names, bodies) = PLANETS
        .iter()
        .map(|&(name, a, mass)| {
            let body = if a == 0.0 {
                Body::new(DVec2::ZERO, mass).with_radius(25.0)
            } else {
                Body::new(DVec2::new(a, 0.0), mass)
                    .with_velocity(DVec2::new(0.0, circular_speed(g, a)))
                    .with_radius(15.0)
            };
            (name.to_owned(), body)
        })
        .unzip();

    Scenario { names, bodies }
}

/// Returns `count` asteroids named `Ast0`, `Ast1`, ... spread uniformly in radius and angle over
/// the [`BELT`].
///
/// Each asteroid has a mass in `[1e-10, 1.1e-9)` and a prograde velocity within 5% of the circular
/// orbit speed at its radius.
pub fn asteroid_belt<R: Rng + ?Sized>(rng: &mut R, count: usize, g: f64) -> Scenario {
    let (inner, outer) = BELT;

    let (names, bodies) = (0..count)
        .map(|i| {
            let radius = rng.gen_range(inner..outer);
            let angle = rng.gen_range(0.0..TAU);
            let mass = 1e-10 + 1e-9 * rng.gen::<f64>();
            let speed = circular_speed(g, radius) * (0.95 + 0.1 * rng.gen::<f64>());

            let direction = DVec2::from_angle(angle);
            let body = Body::new(direction * radius, mass)
                .with_velocity(direction.perp() * speed)
                .with_radius(3.0);

            (format!("Ast{i}"), body)
        })
        .unzip();

    Scenario { names, bodies }
}
