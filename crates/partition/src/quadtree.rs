//! Density-adaptive quadtree stored as a node arena.

use hpfr_proximity::Point;
use tracing::debug;

use crate::bounds::Bounds;
use crate::error::PartitionError;

/// Handle of a node inside a [`QuadTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Position in [`QuadTree::nodes`].
    pub fn index(&self) -> usize {
        self.0
    }
}

/// One quadtree node. Internal nodes hand all members down to their children.
#[derive(Debug, Clone)]
pub struct QuadNode {
    bounds: Bounds,
    depth: usize,
    members: Vec<usize>,
    children: Option<[NodeId; 4]>,
}

impl QuadNode {
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Point indices held by this node (empty for internal nodes).
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// Children in SW, SE, NW, NE order, if split.
    pub fn children(&self) -> Option<[NodeId; 4]> {
        self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

/// Quadtree over the tight bounding box of S.
///
/// A node splits into four equal quadrants iff it holds more than `capacity`
/// points, its depth is below `max_depth`, and its members are not all at one
/// location. Points on a split line go to the lower-x / lower-y child. Leaves
/// partition S exactly.
#[derive(Debug, Clone)]
pub struct QuadTree {
    nodes: Vec<QuadNode>,
    capacity: usize,
    max_depth: usize,
}

impl QuadTree {
    /// Builds the tree top-down.
    ///
    /// # Errors
    ///
    /// Returns [`PartitionError::InvalidCapacity`] for `capacity == 0` and
    /// [`PartitionError::EmptyInputSet`] for an empty slice.
    pub fn build(points: &[Point], capacity: usize, max_depth: usize) -> Result<Self, PartitionError> {
        if capacity == 0 {
            return Err(PartitionError::InvalidCapacity { capacity });
        }
        let bounds = Bounds::of_points(points).ok_or(PartitionError::EmptyInputSet)?;
        let mut tree = Self {
            nodes: vec![QuadNode {
                bounds,
                depth: 0,
                members: (0..points.len()).collect(),
                children: None,
            }],
            capacity,
            max_depth,
        };

        let mut pending = vec![0usize];
        while let Some(idx) = pending.pop() {
            let node = &tree.nodes[idx];
            if node.members.len() <= capacity
                || node.depth >= max_depth
                || coincident(points, &node.members)
            {
                continue;
            }
            let depth = node.depth + 1;
            let quads = node.bounds.quadrants();
            let (cx, cy) = node.bounds.center();

            let mut split: [Vec<usize>; 4] = Default::default();
            for i in std::mem::take(&mut tree.nodes[idx].members) {
                let p = &points[i];
                let q = usize::from(p.x() > cx) + 2 * usize::from(p.y() > cy);
                split[q].push(i);
            }

            let first = tree.nodes.len();
            for (bounds, members) in quads.into_iter().zip(split) {
                tree.nodes.push(QuadNode {
                    bounds,
                    depth,
                    members,
                    children: None,
                });
            }
            tree.nodes[idx].children = Some([
                NodeId(first),
                NodeId(first + 1),
                NodeId(first + 2),
                NodeId(first + 3),
            ]);
            pending.extend(first..first + 4);
        }

        debug!(
            capacity,
            max_depth,
            n_nodes = tree.nodes.len(),
            "quadtree built"
        );
        Ok(tree)
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &QuadNode {
        &self.nodes[id.0]
    }

    /// The whole arena.
    pub fn nodes(&self) -> &[QuadNode] {
        &self.nodes
    }

    /// Leaves in depth-first SW, SE, NW, NE order, including empty ones.
    pub fn leaves(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            match self.node(id).children {
                Some(children) => stack.extend(children.iter().rev()),
                None => out.push(id),
            }
        }
        out
    }

    /// Depth of the deepest leaf.
    pub fn height(&self) -> usize {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

/// `true` when every member sits at the same coordinate.
fn coincident(points: &[Point], members: &[usize]) -> bool {
    match members.split_first() {
        Some((&first, rest)) => {
            let (x, y) = (points[first].x(), points[first].y());
            rest.iter().all(|&i| points[i].x() == x && points[i].y() == y)
        }
        None => true,
    }
}
