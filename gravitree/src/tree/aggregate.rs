use glam::DVec2;

use super::{Node, Quadtree, Region};
use crate::body::{Mass, Position};

/// Total mass and center of mass of the bodies under a node.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aggregate {
    /// Sum of the masses of the bodies under the node.
    pub mass: f64,
    /// Mass-weighted average position of the bodies under the node, or the center of its region if
    /// it has no mass.
    pub centroid: DVec2,
}

impl Aggregate {
    /// Returns the aggregate of a node without mass covering the given region.
    #[inline]
    pub fn empty(region: &Region) -> Self {
        Self {
            mass: 0.0,
            centroid: region.center(),
        }
    }

    /// Returns the aggregate of a single point mass.
    #[inline]
    pub const fn point(position: DVec2, mass: f64) -> Self {
        Self {
            mass,
            centroid: position,
        }
    }

    /// Combines point masses into their aggregate, falling back to the center of `region` when the
    /// total mass is zero.
    ///
    /// Point masses without mass do not contribute to the centroid.
    pub fn combine<I>(point_masses: I, region: &Region) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        let (mass, moment) = point_masses
            .into_iter()
            .filter(|p| p.mass > 0.0)
            .fold((0.0, DVec2::ZERO), |(mass, moment), p| {
                (mass + p.mass, moment + p.centroid * p.mass)
            });

        if mass > 0.0 {
            Self::point(moment / mass, mass)
        } else {
            Self::empty(region)
        }
    }
}

impl Quadtree {
    /// Computes the [`Aggregate`] of every node, children before parents.
    ///
    /// Must be called with the same bodies the tree was built from. Since children are always
    /// stored after their parent, sweeping the arena backwards visits the nodes in post-order.
    pub fn aggregate<P: Position + Mass>(&mut self, bodies: &[P]) {
        for id in (0..self.nodes.len()).rev() {
            let region = &self.regions[id];

            self.data[id] = match self.nodes[id] {
                Node::Empty => Aggregate::empty(region),
                // Keeps the position of a lone body exact.
                Node::Leaf(head) if self.merged[head].is_none() => {
                    Aggregate::point(bodies[head].position(), bodies[head].mass())
                }
                Node::Leaf(head) => Aggregate::combine(
                    std::iter::successors(Some(head), |&b| self.merged[b])
                        .map(|b| Aggregate::point(bodies[b].position(), bodies[b].mass())),
                    region,
                ),
                Node::Internal(children) => {
                    Aggregate::combine(children.map(|child| self.data[child as usize]), region)
                }
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::NodeID;

    fn aggregated(bodies: &[(DVec2, f64)], region: Region) -> Quadtree {
        let mut tree = Quadtree::build(region, bodies, 32).unwrap();
        tree.aggregate(bodies);
        tree
    }

    #[test]
    fn empty_node_reports_its_center() {
        let region = Region::new(DVec2::new(2.0, 2.0), DVec2::new(2.0, 4.0));

        assert_eq!(
            Aggregate::empty(&region),
            Aggregate::point(DVec2::new(3.0, 4.0), 0.0)
        );
        assert_eq!(
            Aggregate::combine([Aggregate::point(DVec2::ONE, 0.0)], &region),
            Aggregate::empty(&region)
        );
    }

    #[test]
    fn single_body_centroid_is_exact() {
        let position = DVec2::new(0.1234567, -3.3333333);
        let tree = aggregated(&[(position, 7.5)], Region::centered(10.0));

        assert_eq!(tree.data(tree.root()), Aggregate::point(position, 7.5));
    }

    #[test]
    fn internal_nodes_sum_their_children() {
        let bodies = [
            (DVec2::new(-3.0, -3.0), 1.0),
            (DVec2::new(3.0, -3.0), 2.0),
            (DVec2::new(-3.0, 3.0), 3.0),
            (DVec2::new(2.0, 2.5), 4.0),
            (DVec2::new(2.5, 2.0), 5.0),
        ];
        let tree = aggregated(&bodies, Region::centered(4.0));

        for id in 0..tree.len() as NodeID {
            if let Node::Internal(children) = tree.node(id) {
                let sum: f64 = children.iter().map(|&c| tree.data(c).mass).sum();
                assert!((tree.data(id).mass - sum).abs() < 1e-12);
            }
        }

        let root = tree.data(tree.root());
        let expected = bodies.iter().map(|(p, m)| *p * *m).sum::<DVec2>() / 15.0;
        assert_eq!(root.mass, 15.0);
        assert!(root.centroid.abs_diff_eq(expected, 1e-12));
    }

    #[test]
    fn sparse_subtrees_fall_back_to_region_centers() {
        let bodies = [(DVec2::new(0.5, 0.5), 1.0), (DVec2::new(0.75, 0.75), 1.0)];
        let tree = aggregated(&bodies, Region::centered(1.0));

        for id in 0..tree.len() as NodeID {
            if tree.node(id) == Node::Empty {
                assert_eq!(tree.data(id).centroid, tree.region(id).center());
                assert_eq!(tree.data(id).mass, 0.0);
            }
        }
    }

    #[test]
    fn merged_leaf_aggregates_all_bodies() {
        let bodies = [(DVec2::splat(0.5), 1.0), (DVec2::splat(0.5), 3.0)];
        let tree = aggregated(&bodies, Region::centered(1.0));
        let leaf = tree.leaf_of(1).unwrap();

        assert_eq!(tree.data(leaf), Aggregate::point(DVec2::splat(0.5), 4.0));
    }
}
