use crate::bounding_volume::BoundingVolume;
use crate::math::Isometry;
use crate::partitioning::Bvh;
use crate::query::{ContactPoint, LeafPairFilter, NarrowPhase};
use std::collections::HashMap;

/// Traversal of a hierarchy against itself.
///
/// Enumerates every unordered pair of distinct leaves whose bounding volumes
/// overlap. Each internal node is the unit of work: it is responsible for
/// finding collisions *within* each of its child subtrees (by recursing into
/// them), and collisions *across* every unordered pair of its children (by a
/// simultaneous descent of the two subtrees). Both subtrees live in the same
/// coordinate frame so no transform is involved.
///
/// The query owns a monotonically increasing time-stamp incremented once per
/// [`Self::run`]. Subtree pairs are stamped when first tested so the same
/// unordered pair is never tested twice within one run. On a pure tree a
/// pair can only be reached through one recursive path, making the stamp
/// redundant there, but derived structures whose nodes are reachable through
/// several paths rely on it.
#[derive(Clone, Debug, Default)]
pub struct SelfCollisionQuery {
    timestamp: u64,
    visited: HashMap<(u32, u32), u64>,
}

impl SelfCollisionQuery {
    /// Creates a new query with a fresh time-stamp counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the query, resolving every overlapping leaf pair into contacts
    /// appended to `contacts`.
    ///
    /// Pairs excluded by `filter` are skipped before reaching the narrow
    /// phase. Returns `true` iff at least one contact was appended. An empty
    /// hierarchy yields no contact.
    pub fn run<B: BoundingVolume>(
        &mut self,
        tree: &Bvh<B>,
        filter: &impl LeafPairFilter,
        narrow_phase: &mut impl NarrowPhase,
        contacts: &mut Vec<ContactPoint>,
    ) -> bool {
        let pos12 = Isometry::identity();
        let before = contacts.len();
        self.run_with(tree, filter, &mut |leaf1, leaf2| {
            narrow_phase.leaf_pair(leaf1, leaf2, &pos12, contacts)
        });
        contacts.len() > before
    }

    /// Runs the query, invoking `f` on the leaf-data of every overlapping,
    /// non-excluded leaf pair.
    pub fn run_with<B: BoundingVolume>(
        &mut self,
        tree: &Bvh<B>,
        filter: &impl LeafPairFilter,
        f: &mut impl FnMut(u32, u32),
    ) {
        self.timestamp += 1;

        if let Some(root) = tree.root() {
            self.traverse_node(tree, root, filter, f);
        }
    }

    // Finds collisions inside the subtree rooted at `id`: recurse into each
    // internal child, then collide every unordered pair of distinct children.
    fn traverse_node<B: BoundingVolume>(
        &mut self,
        tree: &Bvh<B>,
        id: u32,
        filter: &impl LeafPairFilter,
        f: &mut impl FnMut(u32, u32),
    ) {
        let node = tree.node(id);

        for &child in node.children() {
            if !tree.node(child).is_leaf() {
                self.traverse_node(tree, child, filter, f);
            }
        }

        for (i, &first) in node.children().iter().enumerate() {
            for &second in &node.children()[i + 1..] {
                self.traverse_pair(tree, first, second, filter, f);
            }
        }
    }

    // Simultaneous descent of two disjoint subtrees of the same tree.
    fn traverse_pair<B: BoundingVolume>(
        &mut self,
        tree: &Bvh<B>,
        id1: u32,
        id2: u32,
        filter: &impl LeafPairFilter,
        f: &mut impl FnMut(u32, u32),
    ) {
        let key = if id1 <= id2 { (id1, id2) } else { (id2, id1) };
        if self.visited.insert(key, self.timestamp) == Some(self.timestamp) {
            // This unordered subtree pair was already tested during this run.
            return;
        }

        let node1 = tree.node(id1);
        let node2 = tree.node(id2);

        if !node1.volume().intersects(node2.volume()) {
            return;
        }

        match (node1.is_leaf(), node2.is_leaf()) {
            (true, true) => {
                if let (Some(leaf1), Some(leaf2)) = (node1.leaf_data(), node2.leaf_data()) {
                    if !filter.excluded(leaf1, leaf2) {
                        f(leaf1, leaf2);
                    }
                }
            }
            (leaf1, leaf2) => {
                // Subdivide the non-leaf side; with two internal nodes,
                // subdivide the one with the larger volume first.
                let subdivide_first = !leaf1
                    && (leaf2 || node1.volume().measure() >= node2.volume().measure());

                if subdivide_first {
                    for &child in node1.children() {
                        self.traverse_pair(tree, child, id2, filter, f);
                    }
                } else {
                    for &child in node2.children() {
                        self.traverse_pair(tree, id1, child, filter, f);
                    }
                }
            }
        }
    }
}
