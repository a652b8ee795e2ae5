//! Definition of the triangle shape.

use crate::math::{Isometry, Point, Real};

/// A triangle shape, the typical leaf primitive of a deformable-mesh tree.
///
/// The vertices are plain positions: the crate does not own or manage mesh
/// topology, callers copy the current positions in whenever a bounding volume
/// must be recomputed.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
#[repr(C)]
pub struct Triangle {
    /// The triangle's first point.
    pub a: Point<Real>,
    /// The triangle's second point.
    pub b: Point<Real>,
    /// The triangle's third point.
    pub c: Point<Real>,
}

impl Triangle {
    /// Creates a triangle from three points.
    #[inline]
    pub fn new(a: Point<Real>, b: Point<Real>, c: Point<Real>) -> Triangle {
        Triangle { a, b, c }
    }

    /// Computes the triangle with all points transformed by `m`.
    #[inline]
    pub fn transformed(&self, m: &Isometry<Real>) -> Self {
        Triangle::new(m * self.a, m * self.b, m * self.c)
    }

    /// The center of this triangle.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        ((self.a.coords + self.b.coords + self.c.coords) / 3.0).into()
    }
}

impl From<[Point<Real>; 3]> for Triangle {
    #[inline]
    fn from(arr: [Point<Real>; 3]) -> Self {
        Triangle::new(arr[0], arr[1], arr[2])
    }
}
