use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Position of a child relative to its parent, in the order children are stored.
///
/// North is the half with the smaller `y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// `x < mid.x`, `y < mid.y`.
    NorthWest = 0,
    /// `x >= mid.x`, `y < mid.y`.
    NorthEast = 1,
    /// `x < mid.x`, `y >= mid.y`.
    SouthWest = 2,
    /// `x >= mid.x`, `y >= mid.y`.
    SouthEast = 3,
}

impl Quadrant {
    /// All quadrants in storage order.
    pub const ALL: [Self; 4] = [
        Self::NorthWest,
        Self::NorthEast,
        Self::SouthWest,
        Self::SouthEast,
    ];

    /// Index of the quadrant in an orthant array.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// An axis-aligned rectangle given by its origin (minimum corner) and size.
///
/// Containment is half-open: a region contains `p` when `origin <= p < origin + size` on both
/// axes, so that the four children of a subdivided region never overlap.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Minimum corner of the region.
    pub origin: DVec2,
    /// Width and height of the region.
    pub size: DVec2,
}

impl Region {
    /// Creates a new [`Region`] with the given origin, width and height.
    #[inline]
    pub const fn new(origin: DVec2, size: DVec2) -> Self {
        Self { origin, size }
    }

    /// Creates a square [`Region`] of side `2 * half_extent` centered on the origin.
    #[inline]
    pub fn centered(half_extent: f64) -> Self {
        Self::new(DVec2::splat(-half_extent), DVec2::splat(2.0 * half_extent))
    }

    /// Returns the maximum corner of the region (excluded from it).
    #[inline]
    pub fn max(&self) -> DVec2 {
        self.origin + self.size
    }

    /// Returns the geometric center of the region.
    #[inline]
    pub fn center(&self) -> DVec2 {
        self.origin + self.size / 2.0
    }

    /// Returns the larger of the width and the height.
    #[inline]
    pub fn extent(&self) -> f64 {
        self.size.max_element()
    }

    /// Returns `true` if the position lies inside the region.
    #[inline]
    pub fn contains(&self, position: DVec2) -> bool {
        let max = self.max();
        position.x >= self.origin.x
            && position.x < max.x
            && position.y >= self.origin.y
            && position.y < max.y
    }

    /// Returns the quadrant of the region the position falls into.
    ///
    /// The `y` midpoint is tested first, then the `x` midpoint. A coordinate equal to the midpoint
    /// goes south or east, matching the half-open children returned by [`Region::subdivide`].
    #[inline]
    pub fn quadrant_of(&self, position: DVec2) -> Quadrant {
        let mid = self.center();
        match (position.y < mid.y, position.x < mid.x) {
            (true, true) => Quadrant::NorthWest,
            (true, false) => Quadrant::NorthEast,
            (false, true) => Quadrant::SouthWest,
            (false, false) => Quadrant::SouthEast,
        }
    }

    /// Subdivides this region into four equally-sized children, in [`Quadrant`] order.
    #[inline]
    pub fn subdivide(&self) -> [Self; 4] {
        let half = self.size / 2.0;
        let Self { origin, .. } = *self;

        [
            Self::new(origin, half),
            Self::new(DVec2::new(origin.x + half.x, origin.y), half),
            Self::new(DVec2::new(origin.x, origin.y + half.y), half),
            Self::new(origin + half, half),
        ]
    }
}

impl Default for Region {
    /// A square of ±50 AU around the origin.
    #[inline]
    fn default() -> Self {
        Self::centered(50.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_open_containment() {
        let region = Region::new(DVec2::ZERO, DVec2::new(4.0, 2.0));

        assert!(region.contains(DVec2::ZERO));
        assert!(region.contains(DVec2::new(3.999, 1.999)));
        assert!(!region.contains(DVec2::new(4.0, 1.0)));
        assert!(!region.contains(DVec2::new(1.0, 2.0)));
        assert!(!region.contains(DVec2::new(-0.001, 1.0)));
        assert!(!region.contains(DVec2::new(f64::NAN, 1.0)));
    }

    #[test]
    fn midpoint_ties_go_south_east() {
        let region = Region::centered(1.0);

        assert_eq!(region.quadrant_of(DVec2::ZERO), Quadrant::SouthEast);
        assert_eq!(region.quadrant_of(DVec2::new(-0.5, 0.0)), Quadrant::SouthWest);
        assert_eq!(region.quadrant_of(DVec2::new(0.0, -0.5)), Quadrant::NorthEast);
        assert_eq!(region.quadrant_of(DVec2::new(-0.5, -0.5)), Quadrant::NorthWest);
    }

    #[test]
    fn quadrant_matches_child_containment() {
        let region = Region::new(DVec2::new(-3.0, 1.0), DVec2::new(8.0, 8.0));
        let children = region.subdivide();

        for position in [
            DVec2::new(-3.0, 1.0),
            DVec2::new(1.0, 5.0),
            DVec2::new(0.9, 5.0),
            DVec2::new(1.0, 4.9),
            DVec2::new(4.99, 8.99),
        ] {
            let quadrant = region.quadrant_of(position);
            for (i, child) in children.iter().enumerate() {
                assert_eq!(child.contains(position), i == quadrant.index());
            }
        }
    }

    #[test]
    fn subdivision_halves_the_size() {
        let region = Region::new(DVec2::new(2.0, -2.0), DVec2::new(4.0, 8.0));

        for child in region.subdivide() {
            assert_eq!(child.size, DVec2::new(2.0, 4.0));
        }
        assert_eq!(region.extent(), 8.0);
        assert_eq!(region.center(), DVec2::new(4.0, 2.0));
    }
}
