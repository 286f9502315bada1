/// Mass and center of mass of the nodes of a [`Quadtree`].
pub mod aggregate;
/// Rectangular regions and their subdivision.
pub mod region;

use glam::DVec2;

use crate::{
    body::{BodyID, Position},
    error::{Error, Result},
};

pub use aggregate::Aggregate;
pub use region::{Quadrant, Region};

/// Index of a [`Node`] in a [`Quadtree`].
pub type NodeID = u32;

/// Default cap on the number of subdivisions between the root and a leaf.
pub const DEFAULT_MAX_DEPTH: u32 = 48;

/// Occupancy of a node of a [`Quadtree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Node {
    /// Node without a body nor children.
    Empty,
    /// Node holding one body, and the bodies merged behind it at the depth cap.
    Leaf(BodyID),
    /// Node with exactly four children, in [`Quadrant`] order.
    Internal([NodeID; 4]),
}

/// Quadtree over a fixed region, stored as an arena.
///
/// The `nodes`, `regions` and `data` vectors are parallel: the `i`-th element of each describes
/// node `i`. Children are always pushed after their parent, so any node has a smaller index than
/// all of its descendants, and the root is node `0`.
///
/// Dropping the tree (or calling [`Quadtree::clear`]) releases every node at once. The tree only
/// holds [`BodyID`]s and never owns or mutates the bodies it was built from.
#[derive(Clone, Debug)]
pub struct Quadtree {
    nodes: Vec<Node>,
    regions: Vec<Region>,
    data: Vec<Aggregate>,
    merged: Vec<Option<BodyID>>,
    max_depth: u32,
    dropped: usize,
    merges: usize,
}

impl Quadtree {
    /// Creates a new empty [`Quadtree`] that subdivides at most `max_depth` times.
    #[inline]
    pub const fn new(max_depth: u32) -> Self {
        Self {
            nodes: Vec::new(),
            regions: Vec::new(),
            data: Vec::new(),
            merged: Vec::new(),
            max_depth,
            dropped: 0,
            merges: 0,
        }
    }

    /// Builds a [`Quadtree`] covering `region` from the given bodies.
    ///
    /// The returned tree is not aggregated yet, see [`Quadtree::aggregate`].
    ///
    /// # Example
    ///
    /// ```
    /// use gravitree::tree::{Node, Quadtree, Region};
    /// use glam::DVec2;
    ///
    /// let bodies = [(DVec2::new(-1.0, -1.0), 1.0), (DVec2::new(1.0, 1.0), 1.0)];
    /// let tree = Quadtree::build(Region::centered(10.0), &bodies, 16)?;
    ///
    /// assert!(matches!(tree.node(tree.root()), Node::Internal(_)));
    /// assert_eq!(tree.leaf_of(0), Some(1));
    /// assert_eq!(tree.leaf_of(1), Some(4));
    /// # Ok::<(), gravitree::Error>(())
    /// ```
    pub fn build<P: Position>(region: Region, bodies: &[P], max_depth: u32) -> Result<Self> {
        let mut tree = Self::new(max_depth);
        tree.rebuild(region, bodies)?;
        Ok(tree)
    }

    /// Discards the current nodes and rebuilds the tree from the given bodies, reusing the
    /// allocated storage.
    ///
    /// Bodies are inserted in slice order. Bodies outside of `region` are skipped and counted in
    /// [`Quadtree::dropped`].
    pub fn rebuild<P: Position>(&mut self, region: Region, bodies: &[P]) -> Result<()> {
        self.clear();

        self.merged.try_reserve(bodies.len())?;
        self.merged.resize(bodies.len(), None);
        self.push_node(region)?;

        for (id, body) in bodies.iter().enumerate() {
            let position = body.position();
            if region.contains(position) {
                self.insert(id, position, bodies)?;
            } else {
                self.dropped += 1;
            }
        }

        if self.dropped > 0 {
            log::debug!("{} bodies outside of {region:?} were left out", self.dropped);
        }
        if self.merges > 0 {
            log::warn!(
                "{} bodies merged into leaves at the depth cap of {}",
                self.merges,
                self.max_depth
            );
        }
        log::trace!("built quadtree of {} nodes", self.nodes.len());

        Ok(())
    }

    /// Releases every node of the tree, keeping the allocated storage.
    #[inline]
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.regions.clear();
        self.data.clear();
        self.merged.clear();
        self.dropped = 0;
        self.merges = 0;
    }

    /// Returns the root of the tree. The root is always node `0` once the tree is built.
    #[inline]
    pub const fn root(&self) -> NodeID {
        0
    }

    /// Returns the number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree has not been built.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the occupancy of the given node.
    #[inline]
    pub fn node(&self, id: NodeID) -> Node {
        self.nodes[id as usize]
    }

    /// Returns the region covered by the given node.
    #[inline]
    pub fn region(&self, id: NodeID) -> Region {
        self.regions[id as usize]
    }

    /// Returns the aggregate mass and centroid of the given node.
    #[inline]
    pub fn data(&self, id: NodeID) -> Aggregate {
        self.data[id as usize]
    }

    /// Returns the cap on the number of subdivisions between the root and a leaf.
    #[inline]
    pub const fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Returns the number of bodies left out of the last build because they were outside of the
    /// root region.
    #[inline]
    pub const fn dropped(&self) -> usize {
        self.dropped
    }

    /// Returns the number of bodies merged into an occupied leaf at the depth cap during the last
    /// build.
    #[inline]
    pub const fn merges(&self) -> usize {
        self.merges
    }

    /// Iterates over the bodies held by a leaf, starting with the one that created it.
    ///
    /// Yields nothing for empty and internal nodes.
    pub fn bodies_in(&self, id: NodeID) -> impl Iterator<Item = BodyID> + '_ {
        let head = match self.node(id) {
            Node::Leaf(body) => Some(body),
            _ => None,
        };
        std::iter::successors(head, |&body| self.merged[body])
    }

    /// Returns the leaf holding the given body, if it was inserted.
    pub fn leaf_of(&self, body: BodyID) -> Option<NodeID> {
        (0..self.nodes.len() as NodeID).find(|&id| self.bodies_in(id).any(|b| b == body))
    }

    /// Returns the number of subdivisions between the root and the deepest node.
    pub fn depth(&self) -> u32 {
        if self.is_empty() {
            return 0;
        }

        let mut deepest = 0;
        let mut stack = vec![(self.root(), 0)];
        while let Some((id, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            if let Node::Internal(children) = self.node(id) {
                stack.extend(children.map(|child| (child, depth + 1)));
            }
        }
        deepest
    }

    fn push_node(&mut self, region: Region) -> Result<NodeID> {
        let id = NodeID::try_from(self.nodes.len()).map_err(|_| Error::TooManyNodes)?;

        self.nodes.try_reserve(1)?;
        self.regions.try_reserve(1)?;
        self.data.try_reserve(1)?;

        self.nodes.push(Node::Empty);
        self.regions.push(region);
        self.data.push(Aggregate::empty(&region));

        Ok(id)
    }

    fn subdivide(&mut self, id: usize) -> Result<[NodeID; 4]> {
        let [nw, ne, sw, se] = self.regions[id].subdivide();

        Ok([
            self.push_node(nw)?,
            self.push_node(ne)?,
            self.push_node(sw)?,
            self.push_node(se)?,
        ])
    }

    fn insert<P: Position>(&mut self, body: BodyID, position: DVec2, bodies: &[P]) -> Result<()> {
        let mut id = self.root() as usize;
        let mut depth = 0;

        loop {
            let node = self.nodes[id];
            match node {
                Node::Empty => {
                    self.nodes[id] = Node::Leaf(body);
                    return Ok(());
                }
                Node::Internal(children) => {
                    let quadrant = self.regions[id].quadrant_of(position);
                    id = children[quadrant.index()] as usize;
                    depth += 1;
                }
                // Coincident (or nearly coincident) bodies would otherwise subdivide forever.
                Node::Leaf(held) if depth >= self.max_depth => {
                    self.merged[body] = self.merged[held];
                    self.merged[held] = Some(body);
                    self.merges += 1;
                    return Ok(());
                }
                Node::Leaf(held) => {
                    // Leaves above the depth cap hold a single body.
                    let children = self.subdivide(id)?;
                    let quadrant = self.regions[id].quadrant_of(bodies[held].position());

                    self.nodes[children[quadrant.index()] as usize] = Node::Leaf(held);
                    self.nodes[id] = Node::Internal(children);
                }
            }
        }
    }
}

impl Default for Quadtree {
    #[inline]
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaves(tree: &Quadtree) -> Vec<Vec<BodyID>> {
        (0..tree.len() as NodeID)
            .map(|id| tree.bodies_in(id).collect::<Vec<_>>())
            .filter(|bodies| !bodies.is_empty())
            .collect()
    }

    #[test]
    fn single_body_is_a_leaf_root() {
        let tree = Quadtree::build(Region::centered(1.0), &[(DVec2::ZERO, 1.0)], 8).unwrap();

        assert_eq!(tree.len(), 1);
        assert_eq!(tree.node(tree.root()), Node::Leaf(0));
    }

    #[test]
    fn second_body_subdivides_the_leaf() {
        let bodies = [(DVec2::new(-0.5, 0.5), 1.0), (DVec2::new(0.5, -0.5), 2.0)];
        let tree = Quadtree::build(Region::centered(1.0), &bodies, 8).unwrap();

        assert_eq!(tree.node(0), Node::Internal([1, 2, 3, 4]));
        assert_eq!(tree.node(1), Node::Empty);
        assert_eq!(tree.node(2), Node::Leaf(1));
        assert_eq!(tree.node(3), Node::Leaf(0));
        assert_eq!(tree.node(4), Node::Empty);
    }

    #[test]
    fn close_bodies_subdivide_until_separated() {
        let bodies = [(DVec2::new(0.1, 0.1), 1.0), (DVec2::new(0.2, 0.2), 1.0)];
        let tree = Quadtree::build(Region::centered(1.0), &bodies, 16).unwrap();

        assert!(tree.depth() > 1);
        assert_ne!(tree.leaf_of(0), tree.leaf_of(1));
        assert_eq!(leaves(&tree), vec![vec![0], vec![1]]);
    }

    #[test]
    fn out_of_region_bodies_are_dropped() {
        let bodies = [
            (DVec2::new(0.0, 0.0), 1.0),
            (DVec2::new(2.0, 0.0), 1.0),
            (DVec2::new(0.0, -1.5), 1.0),
            (DVec2::new(1.0, 0.0), 1.0),
        ];
        let tree = Quadtree::build(Region::centered(1.0), &bodies, 8).unwrap();

        assert_eq!(tree.dropped(), 3);
        assert_eq!(tree.leaf_of(1), None);
        assert_eq!(tree.leaf_of(3), None);
        assert_eq!(tree.node(0), Node::Leaf(0));
    }

    #[test]
    fn coincident_bodies_merge_at_depth_cap() {
        let bodies = [(DVec2::splat(0.25), 1.0); 3];
        let tree = Quadtree::build(Region::centered(1.0), &bodies, 5).unwrap();

        assert_eq!(tree.depth(), 5);
        assert_eq!(tree.merges(), 2);
        assert_eq!(leaves(&tree).len(), 1);

        let mut merged = tree.bodies_in(tree.leaf_of(0).unwrap()).collect::<Vec<_>>();
        merged.sort_unstable();
        assert_eq!(merged, vec![0, 1, 2]);
    }

    #[test]
    fn zero_depth_cap_keeps_a_single_leaf() {
        let bodies = [(DVec2::new(-0.5, 0.0), 1.0), (DVec2::new(0.5, 0.0), 1.0)];
        let tree = Quadtree::build(Region::centered(1.0), &bodies, 0).unwrap();

        assert_eq!(tree.len(), 1);
        assert_eq!(tree.bodies_in(0).count(), 2);
    }

    #[test]
    fn rebuild_discards_previous_nodes() {
        let mut tree = Quadtree::default();
        let region = Region::centered(4.0);

        tree.rebuild(region, &[(DVec2::ONE, 1.0), (DVec2::NEG_ONE, 1.0)])
            .unwrap();
        assert_eq!(tree.len(), 5);

        tree.rebuild(region, &[(DVec2::ONE, 1.0)]).unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.leaf_of(0), Some(0));

        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.depth(), 0);
    }
}
