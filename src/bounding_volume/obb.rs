//! Oriented Bounding Box.

use crate::bounding_volume::{Aabb, BoundingVolume};
use crate::math::{Isometry, Point, Real, Vector, DEFAULT_EPSILON, DIM};

/// An Oriented Bounding Box.
///
/// An OBB is a box with an arbitrary orientation: a pose (center and three
/// orthonormal axes, stored as an isometry) and half-extents measured along
/// the box's own axes. It bounds rotated rigid geometry much more tightly
/// than an AABB at the price of a more expensive overlap test (the 15-axis
/// separating-axis test).
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Clone)]
pub struct Obb {
    /// The position and orientation of the box. The box's axes are the columns
    /// of the pose's rotation matrix.
    pub pose: Isometry<Real>,
    /// The half-extents of the box along its own axes.
    pub half_extents: Vector<Real>,
}

impl Obb {
    /// Creates a new OBB from its pose and half-extents.
    #[inline]
    pub fn new(pose: Isometry<Real>, half_extents: Vector<Real>) -> Self {
        Self { pose, half_extents }
    }

    /// Creates an axis-aligned OBB from an AABB.
    #[inline]
    pub fn from_aabb(aabb: &Aabb) -> Self {
        let center = aabb.center();
        Self {
            pose: Isometry::translation(center.x, center.y, center.z),
            half_extents: aabb.half_extents(),
        }
    }

    /// The center of this OBB.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        self.pose.translation.vector.into()
    }

    /// The eight corners of this OBB.
    pub fn vertices(&self) -> [Point<Real>; 8] {
        let he = self.half_extents;
        [
            self.pose * Point::new(-he.x, -he.y, -he.z),
            self.pose * Point::new(he.x, -he.y, -he.z),
            self.pose * Point::new(he.x, he.y, -he.z),
            self.pose * Point::new(-he.x, he.y, -he.z),
            self.pose * Point::new(-he.x, -he.y, he.z),
            self.pose * Point::new(he.x, -he.y, he.z),
            self.pose * Point::new(he.x, he.y, he.z),
            self.pose * Point::new(-he.x, he.y, he.z),
        ]
    }

    /// The tightest AABB enclosing this OBB.
    pub fn to_aabb(&self) -> Aabb {
        let abs_rot = self.pose.rotation.to_rotation_matrix().into_inner().abs();
        Aabb::from_half_extents(self.center(), abs_rot * self.half_extents)
    }

    /// The volume of this OBB.
    #[inline]
    pub fn volume(&self) -> Real {
        8.0 * self.half_extents.x * self.half_extents.y * self.half_extents.z
    }
}

/// Tests two oriented boxes for overlap with the separating-axis theorem.
///
/// `pose12` maps the second box's local frame into the first box's local
/// frame. The 15 candidate axes are the three face normals of each box and
/// the nine pairwise edge cross-products; the boxes are disjoint iff at least
/// one of them separates the projections.
///
/// A small epsilon is folded into the absolute rotation matrix so near
/// parallel edge pairs (whose cross product degenerates) do not produce a
/// spurious separation.
pub fn obb_obb_intersect(
    half_extents1: &Vector<Real>,
    half_extents2: &Vector<Real>,
    pose12: &Isometry<Real>,
) -> bool {
    let rot = pose12.rotation.to_rotation_matrix().into_inner();
    let t = pose12.translation.vector;
    let abs_rot = rot.abs().add_scalar(DEFAULT_EPSILON);

    // Face normals of the first box.
    for i in 0..DIM {
        let ra = half_extents1[i];
        let rb = abs_rot[(i, 0)] * half_extents2[0]
            + abs_rot[(i, 1)] * half_extents2[1]
            + abs_rot[(i, 2)] * half_extents2[2];
        if t[i].abs() > ra + rb {
            return false;
        }
    }

    // Face normals of the second box.
    for j in 0..DIM {
        let ra = abs_rot[(0, j)] * half_extents1[0]
            + abs_rot[(1, j)] * half_extents1[1]
            + abs_rot[(2, j)] * half_extents1[2];
        let rb = half_extents2[j];
        let tp = t[0] * rot[(0, j)] + t[1] * rot[(1, j)] + t[2] * rot[(2, j)];
        if tp.abs() > ra + rb {
            return false;
        }
    }

    // Cross products of an edge of each box.
    for i in 0..DIM {
        let i1 = (i + 1) % 3;
        let i2 = (i + 2) % 3;
        for j in 0..DIM {
            let j1 = (j + 1) % 3;
            let j2 = (j + 2) % 3;
            let ra =
                half_extents1[i1] * abs_rot[(i2, j)] + half_extents1[i2] * abs_rot[(i1, j)];
            let rb =
                half_extents2[j1] * abs_rot[(i, j2)] + half_extents2[j2] * abs_rot[(i, j1)];
            let tp = t[i2] * rot[(i1, j)] - t[i1] * rot[(i2, j)];
            if tp.abs() > ra + rb {
                return false;
            }
        }
    }

    true
}

impl BoundingVolume for Obb {
    #[inline]
    fn center(&self) -> Point<Real> {
        self.center()
    }

    #[inline]
    fn contains_point(&self, pt: &Point<Real>) -> bool {
        let local = self.pose.inverse_transform_point(pt);
        for i in 0..DIM {
            if local[i].abs() > self.half_extents[i] {
                return false;
            }
        }

        true
    }

    #[inline]
    fn intersects(&self, other: &Obb) -> bool {
        let pose12 = self.pose.inv_mul(&other.pose);
        obb_obb_intersect(&self.half_extents, &other.half_extents, &pose12)
    }

    #[inline]
    fn intersects_transformed(&self, other: &Obb, pos12: &Isometry<Real>) -> bool {
        let pose12 = self.pose.inv_mul(&(pos12 * other.pose));
        obb_obb_intersect(&self.half_extents, &other.half_extents, &pose12)
    }

    fn contains(&self, other: &Obb) -> bool {
        // A box is convex, so containing all its corners contains the box.
        other.vertices().iter().all(|pt| self.contains_point(pt))
    }

    fn merge(&mut self, other: &Obb) {
        *self = self.merged(other);
    }

    fn merged(&self, other: &Obb) -> Obb {
        // The merge keeps the orientation of `self` and encloses the corners
        // of both boxes expressed in `self`'s local frame.
        let mut local = Aabb::from_half_extents(Point::origin(), self.half_extents);
        for pt in other.vertices() {
            local.take_point(self.pose.inverse_transform_point(&pt));
        }

        Obb {
            pose: self.pose * crate::math::Translation::from(local.center().coords),
            half_extents: local.half_extents(),
        }
    }

    #[inline]
    fn loosen(&mut self, amount: Real) {
        debug_assert!(amount >= 0.0, "The loosening margin must be positive.");
        self.half_extents += Vector::repeat(amount);
    }

    #[inline]
    fn loosened(&self, amount: Real) -> Obb {
        debug_assert!(amount >= 0.0, "The loosening margin must be positive.");
        Obb {
            pose: self.pose,
            half_extents: self.half_extents + Vector::repeat(amount),
        }
    }

    #[inline]
    fn measure(&self) -> Real {
        self.volume()
    }

    #[inline]
    fn is_finite(&self) -> bool {
        self.half_extents.iter().all(|x| x.is_finite())
            && self.pose.translation.vector.iter().all(|x| x.is_finite())
            && self.pose.rotation.quaternion().coords.iter().all(|x| x.is_finite())
    }
}
