//! CSV records of the state of named bodies.
//!
//! Rows have the columns `time,name,x,y,vx,vy,fx,fy,mass`. Time is printed with three decimals,
//! positions and velocities with six, forces and masses in scientific notation.

use std::io::{self, Write};

use crate::body::Body;

/// Header line of a record.
pub const HEADER: &str = "time,name,x,y,vx,vy,fx,fy,mass";

/// Only one in this many asteroids is logged.
pub const ASTEROID_STRIDE: usize = 20;

/// Writes the [`HEADER`] line.
pub fn write_header<W: Write>(w: &mut W) -> io::Result<()> {
    writeln!(w, "{HEADER}")
}

/// Writes the state of `body` at `time` as one row.
///
/// ```
/// use gravitree::{prelude::*, record::write_row};
/// use glam::DVec2;
///
/// let body = Body::new(DVec2::new(1.0, 0.0), 3.003e-6).with_velocity(DVec2::Y);
/// let mut out = Vec::new();
/// write_row(&mut out, 0.01, "Earth", &body)?;
///
/// assert_eq!(
///     String::from_utf8(out).unwrap(),
///     "0.010,Earth,1.000000,0.000000,0.000000,1.000000,0.000000e0,0.000000e0,3.003000e-6\n"
/// );
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn write_row<W: Write>(w: &mut W, time: f64, name: &str, body: &Body) -> io::Result<()> {
    writeln!(
        w,
        "{time:.3},{name},{:.6},{:.6},{:.6},{:.6},{:.6e},{:.6e},{:.6e}",
        body.position.x,
        body.position.y,
        body.velocity.x,
        body.velocity.y,
        body.force.x,
        body.force.y,
        body.mass,
    )
}

/// Returns true if the body at `index` should be logged: every planet, and one in
/// [`ASTEROID_STRIDE`] of the bodies after them.
#[inline]
pub const fn should_log(index: usize, planet_count: usize) -> bool {
    index < planet_count || index % ASTEROID_STRIDE == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    #[test]
    fn logs_planets_and_a_subset_of_asteroids() {
        let logged: Vec<_> = (0..50).filter(|&i| should_log(i, 9)).collect();

        assert_eq!(logged, [0, 1, 2, 3, 4, 5, 6, 7, 8, 20, 40]);
    }

    #[test]
    fn header_then_rows() {
        let mut body = Body::new(DVec2::new(-2.5, 0.125), 1e-10);
        body.force = DVec2::new(-1.5e-12, 0.0);

        let mut out = Vec::new();
        write_header(&mut out).unwrap();
        write_row(&mut out, 12.3456, "Ast0", &body).unwrap();

        let out = String::from_utf8(out).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], HEADER);
        assert_eq!(
            lines[1],
            "12.346,Ast0,-2.500000,0.125000,0.000000,0.000000,-1.500000e-12,0.000000e0,1.000000e-10"
        );
    }
}
