use glam::DVec2;

use crate::{
    body::{BodyID, Mass, Position},
    gravity::Newtonian,
    tree::{Node, NodeID, Quadtree},
};

impl Quadtree {
    /// Computes the net force exerted by the bodies of the tree on the body `id` using the
    /// [Barnes-Hut](https://en.wikipedia.org/wiki/Barnes%E2%80%93Hut_simulation) approximation.
    ///
    /// An internal node whose extent `s` (largest side of its region) and distance `d` to its
    /// centroid satisfy `s / d < theta` is treated as a single point mass, unless its region
    /// contains the body. Otherwise its children are visited. With `theta = 0` every leaf is
    /// visited and the result equals the brute-force sum.
    ///
    /// The tree must have been built and [aggregated](Quadtree::aggregate) from `bodies`. The body
    /// never interacts with itself, even with bodies merged in the same leaf.
    ///
    /// # Example
    ///
    /// ```
    /// use gravitree::{gravity::Newtonian, tree::{Quadtree, Region}};
    /// use glam::DVec2;
    ///
    /// let bodies = [(DVec2::new(-1.0, 0.0), 1.0), (DVec2::new(1.0, 0.0), 1.0)];
    /// let mut tree = Quadtree::build(Region::centered(4.0), &bodies, 16)?;
    /// tree.aggregate(&bodies);
    ///
    /// let force = tree.force_on(&bodies, 0, 0.0, &Newtonian::new(1.0, 1e-9));
    /// assert_eq!(force, DVec2::new(0.25, 0.0));
    /// # Ok::<(), gravitree::Error>(())
    /// ```
    pub fn force_on<P>(&self, bodies: &[P], id: BodyID, theta: f64, gravity: &Newtonian) -> DVec2
    where
        P: Position + Mass,
    {
        if self.is_empty() {
            return DVec2::ZERO;
        }

        let body = &bodies[id];
        let probe = Probe {
            id,
            position: body.position(),
            mass: body.mass(),
        };

        self.force_from(self.root(), bodies, &probe, theta, gravity)
    }

    fn force_from<P>(
        &self,
        node: NodeID,
        bodies: &[P],
        probe: &Probe,
        theta: f64,
        gravity: &Newtonian,
    ) -> DVec2
    where
        P: Position + Mass,
    {
        let data = self.data(node);
        if data.mass == 0.0 {
            return DVec2::ZERO;
        }

        match self.node(node) {
            Node::Empty => DVec2::ZERO,
            Node::Leaf(_) => self
                .bodies_in(node)
                .filter(|&other| other != probe.id)
                .fold(DVec2::ZERO, |force, other| {
                    let other = &bodies[other];
                    let (position, mass) = (other.position(), other.mass());
                    force + gravity.force(probe.position, probe.mass, position, mass)
                }),
            Node::Internal(children) => {
                let region = self.region(node);
                let distance = probe.position.distance(data.centroid);

                // A node holding the body would fold its own mass into the force.
                if !region.contains(probe.position) && region.extent() / distance < theta {
                    gravity.force(probe.position, probe.mass, data.centroid, data.mass)
                } else {
                    children.iter().fold(DVec2::ZERO, |force, &child| {
                        force + self.force_from(child, bodies, probe, theta, gravity)
                    })
                }
            }
        }
    }
}

/// The body a force is being computed for.
struct Probe {
    id: BodyID,
    position: DVec2,
    mass: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Region;

    const GRAVITY: Newtonian = Newtonian::new(1.0, 1e-9);

    fn build(bodies: &[(DVec2, f64)]) -> Quadtree {
        let mut tree = Quadtree::build(Region::centered(16.0), bodies, 32).unwrap();
        tree.aggregate(bodies);
        tree
    }

    fn brute_force(bodies: &[(DVec2, f64)], id: BodyID) -> DVec2 {
        let (position, mass) = bodies[id];
        bodies
            .iter()
            .enumerate()
            .filter(|&(other, _)| other != id)
            .fold(DVec2::ZERO, |force, (_, &(p, m))| {
                force + GRAVITY.force(position, mass, p, m)
            })
    }

    #[test]
    fn lone_body_feels_nothing() {
        let bodies = [(DVec2::new(3.0, -2.0), 5.0)];
        let tree = build(&bodies);

        assert_eq!(tree.force_on(&bodies, 0, 0.5, &GRAVITY), DVec2::ZERO);
    }

    #[test]
    fn zero_theta_is_exact() {
        let bodies = [
            (DVec2::new(-8.0, 3.0), 2.0),
            (DVec2::new(5.0, 5.0), 1.0),
            (DVec2::new(6.0, 4.5), 3.0),
            (DVec2::new(-1.0, -7.0), 0.5),
            (DVec2::new(0.25, 0.25), 4.0),
        ];
        let tree = build(&bodies);

        for id in 0..bodies.len() {
            let approximated = tree.force_on(&bodies, id, 0.0, &GRAVITY);
            assert!(approximated.abs_diff_eq(brute_force(&bodies, id), 1e-12));
        }
    }

    #[test]
    fn distant_cluster_is_one_point_mass() {
        let bodies = [
            (DVec2::new(-15.0, -15.0), 1.0),
            (DVec2::new(14.0, 14.0), 1.0),
            (DVec2::new(15.0, 14.0), 1.0),
            (DVec2::new(14.0, 15.0), 1.0),
            (DVec2::new(15.0, 15.0), 1.0),
        ];
        let tree = build(&bodies);

        let Node::Internal(children) = tree.node(tree.root()) else {
            panic!("root should be internal");
        };
        let cluster = tree.data(children[3]);
        assert!(cluster.centroid.abs_diff_eq(DVec2::splat(14.5), 1e-12));
        assert_eq!(cluster.mass, 4.0);

        let approximated = tree.force_on(&bodies, 0, 0.5, &GRAVITY);
        let expected = GRAVITY.force(bodies[0].0, 1.0, cluster.centroid, cluster.mass);
        assert!(approximated.abs_diff_eq(expected, 1e-15));
        assert!(!approximated.abs_diff_eq(brute_force(&bodies, 0), 1e-15));
    }

    #[test]
    fn wide_theta_never_approximates_the_enclosing_node() {
        let bodies = [(DVec2::splat(0.99), 1.0), (DVec2::splat(-0.99), 1.0)];
        let mut tree = Quadtree::build(Region::centered(1.0), &bodies, 32).unwrap();
        tree.aggregate(&bodies);

        for theta in [0.7, 1.5, 10.0] {
            let force = tree.force_on(&bodies, 0, theta, &GRAVITY);
            assert!(force.abs_diff_eq(brute_force(&bodies, 0), 1e-15));
        }
    }

    #[test]
    fn merged_bodies_do_not_attract_themselves() {
        let bodies = [
            (DVec2::splat(1.0), 1.0),
            (DVec2::splat(1.0), 1.0),
            (DVec2::new(-3.0, 1.0), 2.0),
        ];
        let tree = build(&bodies);
        let force = tree.force_on(&bodies, 0, 0.0, &GRAVITY);

        assert_eq!(force, GRAVITY.force(bodies[0].0, 1.0, bodies[2].0, 2.0));
    }

    #[test]
    fn bodies_outside_the_region_still_feel_the_tree() {
        let bodies = [(DVec2::ZERO, 1.0), (DVec2::new(20.0, 0.0), 1.0)];
        let tree = build(&bodies);

        assert_eq!(tree.force_on(&bodies, 0, 0.5, &GRAVITY), DVec2::ZERO);
        assert_eq!(
            tree.force_on(&bodies, 1, 0.5, &GRAVITY),
            GRAVITY.force(bodies[1].0, 1.0, DVec2::ZERO, 1.0)
        );
    }
}
