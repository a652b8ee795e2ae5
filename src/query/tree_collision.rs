use crate::bounding_volume::BoundingVolume;
use crate::math::{Isometry, Real};
use crate::partitioning::Bvh;
use crate::query::{ContactPoint, NarrowPhase};
use std::collections::HashMap;

/// Simultaneous traversal of two hierarchies under a relative rigid
/// transform ("model vs. model" collision).
///
/// Both hierarchies must have been refit since their geometry last changed;
/// the query trusts the enclosure invariant and does not re-validate it.
///
/// Traversal always starts from the smaller hierarchy: unless the first tree
/// has strictly fewer nodes than the second, the relative transform is
/// inverted and the roles are swapped internally (reported pairs keep their
/// original roles).
/// At each step the descent subdivides the non-leaf node with the larger
/// volume, shrinking the bigger box first to maximize pruning; node pairs
/// whose volumes don't overlap under the relative transform are pruned with
/// no further work.
#[derive(Clone, Debug, Default)]
pub struct TreeCollisionQuery {
    timestamp: u64,
    visited: HashMap<(u32, u32), u64>,
}

impl TreeCollisionQuery {
    /// Creates a new query with a fresh time-stamp counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the query, resolving every overlapping leaf pair into contacts
    /// appended to `contacts`.
    ///
    /// `pos12` maps `tree2`'s coordinate frame into `tree1`'s frame. Returns
    /// `true` iff at least one contact was appended. If either hierarchy is
    /// empty, or the root volumes don't overlap, returns `false` immediately.
    pub fn run<B: BoundingVolume>(
        &mut self,
        pos12: &Isometry<Real>,
        tree1: &Bvh<B>,
        tree2: &Bvh<B>,
        narrow_phase: &mut impl NarrowPhase,
        contacts: &mut Vec<ContactPoint>,
    ) -> bool {
        let before = contacts.len();
        let _ = self.run_with(pos12, tree1, tree2, &mut |leaf1, leaf2| {
            narrow_phase.leaf_pair(leaf1, leaf2, pos12, contacts)
        });
        contacts.len() > before
    }

    /// Runs the query, invoking `f` on the leaf-data of every overlapping
    /// leaf pair. The first argument of `f` always belongs to `tree1`.
    ///
    /// Returns `true` iff at least one pair was reported.
    pub fn run_with<B: BoundingVolume>(
        &mut self,
        pos12: &Isometry<Real>,
        tree1: &Bvh<B>,
        tree2: &Bvh<B>,
        f: &mut impl FnMut(u32, u32),
    ) -> bool {
        self.timestamp += 1;

        let (Some(root1), Some(root2)) = (tree1.root(), tree2.root()) else {
            return false;
        };

        // Always descend starting from the smaller tree so the recursion
        // preferentially opens up the larger tree's branches; equal sizes
        // swap too. The node counts are maintained by the trees, so this is
        // a one-time O(1) decision.
        if tree1.node_count() < tree2.node_count() {
            self.traverse_pair(pos12, tree1, tree2, root1, root2, &mut |a, b| f(a, b))
        } else {
            let pos21 = pos12.inverse();
            self.traverse_pair(&pos21, tree2, tree1, root2, root1, &mut |a, b| f(b, a))
        }
    }

    fn traverse_pair<B: BoundingVolume>(
        &mut self,
        pos12: &Isometry<Real>,
        tree1: &Bvh<B>,
        tree2: &Bvh<B>,
        id1: u32,
        id2: u32,
        f: &mut impl FnMut(u32, u32),
    ) -> bool {
        if self.visited.insert((id1, id2), self.timestamp) == Some(self.timestamp) {
            // This node pair was already tested during this run.
            return false;
        }

        let node1 = tree1.node(id1);
        let node2 = tree2.node(id2);

        if !node1.volume().intersects_transformed(node2.volume(), pos12) {
            return false;
        }

        match (node1.is_leaf(), node2.is_leaf()) {
            (true, true) => {
                if let (Some(leaf1), Some(leaf2)) = (node1.leaf_data(), node2.leaf_data()) {
                    f(leaf1, leaf2);
                    true
                } else {
                    false
                }
            }
            (leaf1, leaf2) => {
                // Subdivide the non-leaf side; with two internal nodes,
                // subdivide the one with the larger volume first.
                let subdivide_first = !leaf1
                    && (leaf2 || node1.volume().measure() >= node2.volume().measure());
                let mut result = false;

                if subdivide_first {
                    for &child in node1.children() {
                        result |= self.traverse_pair(pos12, tree1, tree2, child, id2, f);
                    }
                } else {
                    for &child in node2.children() {
                        result |= self.traverse_pair(pos12, tree1, tree2, id1, child, f);
                    }
                }

                result
            }
        }
    }
}
