use crate::bounding_volume::Aabb;
use crate::math::{Isometry, Real};
use crate::shape::Triangle;

impl Triangle {
    /// Computes the world-space AABB of this triangle, transformed by `pos`.
    #[inline]
    pub fn aabb(&self, pos: &Isometry<Real>) -> Aabb {
        self.transformed(pos).local_aabb()
    }

    /// Computes the local-space AABB of this triangle.
    #[inline]
    pub fn local_aabb(&self) -> Aabb {
        Aabb::from_points([self.a, self.b, self.c])
    }
}
