use crate::bounding_volume::BoundingVolume;
use smallvec::SmallVec;
use std::collections::VecDeque;

/// Workspace data for various operations on the tree.
///
/// This is all temporary data that can be freed at any time without affecting
/// results. The main reason to reuse the same instance of this over time is to
/// lower the cost of internal allocations.
#[derive(Clone, Default)]
pub struct BvhWorkspace {
    pub(super) refit_queue: VecDeque<u32>,
}

/// A single node of a [`Bvh`].
///
/// A node owns its bounding volume and the indices of its children; the
/// parent link is a non-owning back-reference used only for upward traversal
/// during refits. A node is a leaf iff it has no children, in which case it
/// carries the index of the geometric primitive it bounds.
#[derive(Clone, Debug)]
pub struct BvhNode<B> {
    pub(super) volume: B,
    pub(super) children: SmallVec<[u32; 4]>,
    pub(super) parent: Option<u32>,
    pub(super) leaf_data: Option<u32>,
}

impl<B> BvhNode<B> {
    /// The bounding volume of this node.
    #[inline]
    pub fn volume(&self) -> &B {
        &self.volume
    }

    /// The indices of this node's children. Empty iff this node is a leaf.
    #[inline]
    pub fn children(&self) -> &[u32] {
        &self.children
    }

    /// The index of this node's parent, or `None` for the root.
    #[inline]
    pub fn parent(&self) -> Option<u32> {
        self.parent
    }

    /// Is this node a leaf?
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// If this node is a leaf, returns the index of the geometric primitive
    /// it was associated to at construction time.
    #[inline]
    pub fn leaf_data(&self) -> Option<u32> {
        self.leaf_data
    }
}

/// A bounding volume hierarchy generic over its volume type.
///
/// The tree is stored in an arena: nodes refer to each other by index, so the
/// parent back-reference never creates an ownership cycle. Topology is
/// immutable after construction; only the volumes are mutated in place by
/// [`Bvh::refit`].
#[derive(Clone, Debug, Default)]
pub struct Bvh<B> {
    pub(super) nodes: Vec<BvhNode<B>>,
    pub(super) root: Option<u32>,
}

impl<B: BoundingVolume> Bvh<B> {
    /// An empty hierarchy.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
        }
    }

    /// The index of the root node, or `None` if the hierarchy is empty.
    #[inline]
    pub fn root(&self) -> Option<u32> {
        self.root
    }

    /// Does this hierarchy contain no node at all?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The total number of nodes of this hierarchy.
    ///
    /// This always equals the number of nodes reached by a full traversal
    /// from the root.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The number of leaves of this hierarchy.
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Reference to the node at the given index.
    ///
    /// Panics if the index was not obtained from this hierarchy.
    #[inline]
    pub fn node(&self, id: u32) -> &BvhNode<B> {
        &self.nodes[id as usize]
    }

    /// Collects the indices of all the nodes of this hierarchy, in
    /// breadth-first order starting at the root.
    ///
    /// A parent always appears before any of its descendants. Returns an
    /// empty vector for an empty hierarchy.
    pub fn collect_nodes(&self) -> Vec<u32> {
        let mut result = Vec::with_capacity(self.nodes.len());
        let mut queue = VecDeque::new();
        queue.extend(self.root);

        while let Some(id) = queue.pop_front() {
            result.push(id);
            queue.extend(self.nodes[id as usize].children.iter().copied());
        }

        result
    }

    /// Collects the indices of all the leaves of this hierarchy, in
    /// breadth-first order.
    ///
    /// The traversal stops descending at any node classified as a leaf.
    /// Returns an empty vector for an empty hierarchy.
    pub fn collect_leaves(&self) -> Vec<u32> {
        let mut result = Vec::new();
        let mut queue = VecDeque::new();
        queue.extend(self.root);

        while let Some(id) = queue.pop_front() {
            let node = &self.nodes[id as usize];
            if node.is_leaf() {
                result.push(id);
            } else {
                queue.extend(node.children.iter().copied());
            }
        }

        result
    }

    /// The bounding volume enclosing everything contained by this hierarchy,
    /// or `None` if it is empty.
    pub fn root_volume(&self) -> Option<&B> {
        self.root.map(|id| &self.nodes[id as usize].volume)
    }
}
