use super::{Bvh, BvhWorkspace};
use crate::bounding_volume::BoundingVolume;
use crate::math::Real;

impl<B: BoundingVolume> Bvh<B> {
    /// Updates the bounding volumes after leaf geometry changes, without
    /// rebuilding the tree topology.
    ///
    /// `leaves` is the set of leaf nodes whose underlying geometry moved.
    /// Each is recomputed from its geometry through the `leaf_volume`
    /// callback (called with the leaf-data index provided at construction
    /// time), and the change is propagated upward: every ancestor recomputes
    /// its volume as the union of its children's current volumes. On return,
    /// every ancestor of an input leaf encloses the union of its children's
    /// volumes exactly (plus `margin`).
    ///
    /// `margin` enlarges every recomputed volume on each extent, providing
    /// slack against small subsequent motions so that frequent tiny
    /// deformations don't all require a refit.
    ///
    /// Propagation uses a FIFO queue seeded with the input leaves. A parent
    /// is re-enqueued once per child that changed, so it may be recomputed
    /// several times within one call; the union of the children's volumes is
    /// an idempotent read, so repeated recomputation converges to the same
    /// result and only costs extra work.
    ///
    /// An empty `leaves` slice is a no-op. A leaf that is also the root
    /// terminates right after its own recomputation. The input nodes are
    /// trusted to be leaves of this hierarchy; this is only checked in debug
    /// builds.
    pub fn refit(
        &mut self,
        workspace: &mut BvhWorkspace,
        leaves: &[u32],
        margin: Real,
        mut leaf_volume: impl FnMut(u32) -> B,
    ) {
        #[cfg(debug_assertions)]
        for id in leaves {
            debug_assert!(
                self.nodes[*id as usize].is_leaf(),
                "refit must be seeded with leaf nodes only"
            );
        }

        workspace.refit_queue.clear();
        workspace.refit_queue.extend(leaves.iter().copied());

        // TODO PERF: deduplicate the queue (e.g. an already-enqueued bit per
        //            node) to recompute shared ancestors only once per call.

        while let Some(id) = workspace.refit_queue.pop_front() {
            let (leaf_data, parent) = {
                let node = &self.nodes[id as usize];
                (node.leaf_data, node.parent)
            };

            let mut volume = match leaf_data {
                Some(data) => leaf_volume(data),
                None => {
                    let node = &self.nodes[id as usize];
                    let mut children = node.children.iter();
                    // An internal node always has at least one child; it is
                    // only reached here through propagation from one of them.
                    let Some(&first) = children.next() else {
                        continue;
                    };

                    let mut volume = self.nodes[first as usize].volume.clone();
                    for &child in children {
                        volume.merge(&self.nodes[child as usize].volume);
                    }
                    volume
                }
            };

            if margin > 0.0 {
                volume.loosen(margin);
            }

            self.nodes[id as usize].volume = volume;

            if let Some(parent) = parent {
                workspace.refit_queue.push_back(parent);
            }
        }
    }
}
