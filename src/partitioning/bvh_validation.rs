use super::Bvh;
use crate::bounding_volume::BoundingVolume;
use std::collections::HashSet;

impl<B: BoundingVolume> Bvh<B> {
    /// Counts the number of leaves that can be reached from the node at
    /// index `id`.
    ///
    /// This is mostly a utility for debugging.
    pub fn reachable_leaf_count(&self, id: u32) -> usize {
        let node = &self.nodes[id as usize];
        if node.is_leaf() {
            1
        } else {
            node.children
                .iter()
                .map(|child| self.reachable_leaf_count(*child))
                .sum()
        }
    }

    /// Panics if the tree isn't well-formed.
    ///
    /// The tree is well-formed if it is topologically correct (every node is
    /// reachable from the root through exactly one child chain, and every
    /// parent link points back to the actual parent) and geometrically
    /// correct (every parent volume encloses the volumes of its children).
    pub fn assert_well_formed(&self) {
        self.assert_well_formed_topology_only();

        for (id, node) in self.nodes.iter().enumerate() {
            for &child in node.children.iter() {
                assert!(
                    node.volume.contains(&self.nodes[child as usize].volume),
                    "volume of node {} does not enclose the volume of its child {}",
                    id,
                    child
                );
            }
        }
    }

    /// Similar to [`Self::assert_well_formed`] but doesn't check the
    /// geometry (i.e. it won't check that parent volumes enclose child
    /// volumes).
    ///
    /// This can be useful for checking intermediate states of the tree after
    /// a geometry mutation but before the refit that restores the enclosure
    /// invariant.
    pub fn assert_well_formed_topology_only(&self) {
        let Some(root) = self.root else {
            assert!(self.nodes.is_empty(), "an empty hierarchy owns no node");
            return;
        };

        assert!(
            self.nodes[root as usize].parent.is_none(),
            "the root must not have a parent"
        );

        let mut visited = HashSet::new();
        self.assert_well_formed_recurse(root, &mut visited);
        assert_eq!(
            visited.len(),
            self.nodes.len(),
            "every node must be reachable from the root"
        );
    }

    fn assert_well_formed_recurse(&self, id: u32, visited: &mut HashSet<u32>) {
        assert!(
            visited.insert(id),
            "detected loop: node {} visited twice",
            id
        );

        let node = &self.nodes[id as usize];
        assert_eq!(
            node.is_leaf(),
            node.leaf_data.is_some(),
            "a node carries leaf data iff it has no children"
        );

        for &child in node.children.iter() {
            assert_eq!(
                self.nodes[child as usize].parent,
                Some(id),
                "the parent link of node {} does not point back to its parent {}",
                child,
                id
            );
            self.assert_well_formed_recurse(child, visited);
        }
    }
}
