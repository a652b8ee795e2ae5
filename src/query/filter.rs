//! Leaf-pair exclusion policies for self-collision queries.
//!
//! Deformable meshes produce spurious self-collision candidates between
//! primitives that are topological neighbors (two triangles sharing an edge
//! always have overlapping bounding volumes). The exclusion rule is not fixed
//! by the traversal algorithm: it is a predicate injected by the caller.

use std::collections::HashSet;

/// A predicate excluding leaf pairs from self-collision reports.
pub trait LeafPairFilter {
    /// Returns `true` if the pair of primitives `(leaf1, leaf2)` must be
    /// skipped instead of reported.
    fn excluded(&self, leaf1: u32, leaf2: u32) -> bool;
}

/// The filter that excludes nothing: every overlapping pair is reported.
#[derive(Clone, Debug, Default)]
pub struct NoExclusion;

impl LeafPairFilter for NoExclusion {
    #[inline]
    fn excluded(&self, _leaf1: u32, _leaf2: u32) -> bool {
        false
    }
}

/// Excludes pairs of triangles sharing at least one mesh vertex.
///
/// Pre-computes, for each triangle, the set of triangles it shares a vertex
/// with. Lookup during the query is a single hash probe.
#[derive(Clone, Debug)]
pub struct SharedVertexExclusion {
    excluded: Vec<HashSet<u32>>,
}

impl SharedVertexExclusion {
    /// Builds the exclusion sets from a triangle index buffer.
    ///
    /// `triangles[i]` holds the three vertex indices of the triangle with
    /// leaf-data index `i`.
    pub fn from_triangles(triangles: &[[u32; 3]]) -> Self {
        let num_vertices = triangles
            .iter()
            .flat_map(|tri| tri.iter().copied())
            .max()
            .map(|max| max as usize + 1)
            .unwrap_or(0);

        let mut triangles_of_vertex = vec![Vec::new(); num_vertices];
        for (tri_id, tri) in triangles.iter().enumerate() {
            for vid in tri {
                triangles_of_vertex[*vid as usize].push(tri_id as u32);
            }
        }

        let mut excluded = vec![HashSet::new(); triangles.len()];
        for (tri_id, tri) in triangles.iter().enumerate() {
            for vid in tri {
                for other in &triangles_of_vertex[*vid as usize] {
                    if *other != tri_id as u32 {
                        let _ = excluded[tri_id].insert(*other);
                    }
                }
            }
        }

        Self { excluded }
    }
}

impl LeafPairFilter for SharedVertexExclusion {
    #[inline]
    fn excluded(&self, leaf1: u32, leaf2: u32) -> bool {
        self.excluded[leaf1 as usize].contains(&leaf2)
    }
}
