use glam::DVec2;
use gravitree_derive::{Mass, Position};

/// Index of a body in the slice it was passed in.
///
/// Bodies are identified by their index and never by their value, since two bodies can share the
/// same position and mass.
pub type BodyID = usize;

/// Trait for types that can be located in the plane.
///
/// You can derive this trait if your type has a `DVec2` field named `position` or a field marked
/// with `#[position]`.
pub trait Position {
    /// Returns the position of a body.
    fn position(&self) -> DVec2;
}

/// Trait for an object that defines a mass.
///
/// # Example
///
/// ## Manual implementation
///
/// ```
/// use gravitree::prelude::*;
/// use glam::DVec2;
///
/// #[derive(Position)]
/// struct Asteroid {
///     position: DVec2,
///     kilograms: f64,
/// }
///
/// impl Mass for Asteroid {
///     fn mass(&self) -> f64 {
///         self.kilograms / 1.989e30
///     }
/// }
/// ```
///
/// ## Deriving
///
/// The derive macro requires the struct to have a field named `mass` or a field marked with
/// `#[mass]`.
///
/// ```
/// use gravitree::prelude::*;
/// use glam::DVec2;
///
/// #[derive(Position, Mass)]
/// struct Planet {
///     #[position]
///     centre: DVec2,
///     #[mass]
///     solar_masses: f64,
/// }
///
/// let earth = Planet { centre: DVec2::X, solar_masses: 3.003e-6 };
/// assert_eq!(earth.position(), DVec2::X);
/// assert_eq!(earth.mass(), 3.003e-6);
/// ```
pub trait Mass {
    /// Returns the mass of a body.
    fn mass(&self) -> f64;
}

/// Trait for bodies that can be moved by the [`integrator`](crate::integrator).
///
/// The step driver only ever reads the state through these methods and writes it back once per
/// step through [`Kinematic::set_state`].
pub trait Kinematic: Position + Mass {
    /// Returns the velocity of the body.
    fn velocity(&self) -> DVec2;

    /// Overwrites the position and velocity of the body and stores the net force that produced
    /// them.
    fn set_state(&mut self, position: DVec2, velocity: DVec2, force: DVec2);
}

/// A point mass with its kinematic state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Position, Mass)]
pub struct Body {
    /// Position of the body.
    pub position: DVec2,
    /// Velocity of the body.
    pub velocity: DVec2,
    /// Mass of the body, strictly positive.
    pub mass: f64,
    /// Radius of the body, only used for display.
    pub radius: f64,
    /// Net force computed during the last step.
    pub force: DVec2,
}

impl Body {
    /// Creates a new [`Body`] at rest with no recorded force.
    #[inline]
    pub const fn new(position: DVec2, mass: f64) -> Self {
        Self {
            position,
            velocity: DVec2::ZERO,
            mass,
            radius: 0.0,
            force: DVec2::ZERO,
        }
    }

    /// Returns this [`Body`] with the given velocity.
    #[inline]
    pub fn with_velocity(mut self, velocity: DVec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Returns this [`Body`] with the given display radius.
    #[inline]
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }
}

impl Kinematic for Body {
    #[inline]
    fn velocity(&self) -> DVec2 {
        self.velocity
    }

    #[inline]
    fn set_state(&mut self, position: DVec2, velocity: DVec2, force: DVec2) {
        self.position = position;
        self.velocity = velocity;
        self.force = force;
    }
}

impl Position for (DVec2, f64) {
    #[inline]
    fn position(&self) -> DVec2 {
        self.0
    }
}

impl Mass for (DVec2, f64) {
    #[inline]
    fn mass(&self) -> f64 {
        self.1
    }
}

impl<P: Position + ?Sized> Position for &P {
    #[inline]
    fn position(&self) -> DVec2 {
        (**self).position()
    }
}

impl<P: Mass + ?Sized> Mass for &P {
    #[inline]
    fn mass(&self) -> f64 {
        (**self).mass()
    }
}

impl<P: Position + ?Sized> Position for &mut P {
    #[inline]
    fn position(&self) -> DVec2 {
        (**self).position()
    }
}

impl<P: Mass + ?Sized> Mass for &mut P {
    #[inline]
    fn mass(&self) -> f64 {
        (**self).mass()
    }
}
