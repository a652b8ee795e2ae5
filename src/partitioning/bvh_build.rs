use super::{Bvh, BvhNode};
use crate::bounding_volume::BoundingVolume;
use crate::math::{Point, Real, DIM};
use smallvec::{smallvec, SmallVec};

/// Error indicating that a hierarchy could not be built from the given leaves.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum BvhBuildError {
    /// A leaf volume contains a NaN or infinite coordinate.
    #[error("the bounding volume of leaf {leaf} has non-finite coordinates")]
    NonFiniteLeafVolume {
        /// Index of the offending leaf in the input slice.
        leaf: usize,
    },
}

impl<B: BoundingVolume> Bvh<B> {
    /// Creates a new hierarchy from a slice of leaf bounding volumes.
    ///
    /// Each leaf is associated the index equal to its position in the slice:
    /// the volume `leaves[42]` becomes the leaf with leaf-data 42. The tree is
    /// built top-down by splitting at the median of the widest centroid axis.
    /// The exact split heuristic only affects tree quality, never the results
    /// of refits or queries.
    ///
    /// An empty slice yields an empty hierarchy.
    pub fn from_leaves(leaves: &[B]) -> Self {
        let mut result = Self::new();
        if leaves.is_empty() {
            return result;
        }

        let centers: Vec<Point<Real>> = leaves.iter().map(|leaf| leaf.center()).collect();
        let mut ids: Vec<u32> = (0..leaves.len() as u32).collect();
        result.nodes.reserve(leaves.len() * 2 - 1);
        let root = result.build_range(leaves, &centers, &mut ids);
        result.root = Some(root);
        result
    }

    /// Same as [`Self::from_leaves`] but rejects leaves with non-finite
    /// bounding volumes instead of propagating NaNs into the tree.
    pub fn try_from_leaves(leaves: &[B]) -> Result<Self, BvhBuildError> {
        for (i, leaf) in leaves.iter().enumerate() {
            if !leaf.is_finite() {
                log::debug!("rejecting hierarchy construction: leaf {i} has a non-finite volume");
                return Err(BvhBuildError::NonFiniteLeafVolume { leaf: i });
            }
        }

        Ok(Self::from_leaves(leaves))
    }

    fn build_range(&mut self, leaves: &[B], centers: &[Point<Real>], range: &mut [u32]) -> u32 {
        if range.len() == 1 {
            let leaf = range[0];
            let id = self.nodes.len() as u32;
            self.nodes.push(BvhNode {
                volume: leaves[leaf as usize].clone(),
                children: SmallVec::new(),
                parent: None,
                leaf_data: Some(leaf),
            });
            return id;
        }

        // Split at the median of the widest axis of the centroid bounds.
        let mut mins = centers[range[0] as usize].coords;
        let mut maxs = mins;
        for &i in range.iter() {
            mins = mins.inf(&centers[i as usize].coords);
            maxs = maxs.sup(&centers[i as usize].coords);
        }

        let extents = maxs - mins;
        let mut axis = 0;
        for i in 1..DIM {
            if extents[i] > extents[axis] {
                axis = i;
            }
        }

        range.sort_unstable_by(|a, b| {
            centers[*a as usize][axis].total_cmp(&centers[*b as usize][axis])
        });

        let mid = range.len() / 2;
        let (lo, hi) = range.split_at_mut(mid);
        let left = self.build_range(leaves, centers, lo);
        let right = self.build_range(leaves, centers, hi);

        let volume = self.nodes[left as usize]
            .volume
            .merged(&self.nodes[right as usize].volume);
        let id = self.nodes.len() as u32;
        self.nodes[left as usize].parent = Some(id);
        self.nodes[right as usize].parent = Some(id);
        self.nodes.push(BvhNode {
            volume,
            children: smallvec![left, right],
            parent: None,
            leaf_data: None,
        });
        id
    }
}
