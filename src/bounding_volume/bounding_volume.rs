use crate::math::{Isometry, Point, Real};

/// Trait of bounding volumes.
///
/// Bounding volumes are coarse approximations of shapes. They have constant-time
/// intersection and inclusion tests. Two bounding volumes must also be mergeable
/// into a bigger bounding volume enclosing both.
///
/// A hierarchy ([`crate::partitioning::Bvh`]) is generic over this trait so the
/// same refit and collision-query algorithms run over axis-aligned boxes
/// ([`super::Aabb`], deformable geometry) and oriented boxes ([`super::Obb`],
/// rigid bodies).
pub trait BoundingVolume: Clone {
    /// Returns a point inside of this bounding volume. This is ideally its center.
    fn center(&self) -> Point<Real>;

    /// Checks if this bounding volume encloses the given point.
    fn contains_point(&self, pt: &Point<Real>) -> bool;

    /// Checks if this bounding volume intersects another one living in the same
    /// coordinate frame.
    fn intersects(&self, other: &Self) -> bool;

    /// Checks if this bounding volume intersects `other`, where `pos12` maps
    /// `other`'s coordinate frame into the frame of `self`.
    ///
    /// Implementations may be conservative (they may report an intersection for
    /// volumes that are in fact disjoint) but must never miss one.
    fn intersects_transformed(&self, other: &Self, pos12: &Isometry<Real>) -> bool;

    /// Checks if this bounding volume contains another one.
    fn contains(&self, other: &Self) -> bool;

    /// Merges this bounding volume with another one. The merge is done in-place.
    fn merge(&mut self, other: &Self);

    /// Merges this bounding volume with another one.
    fn merged(&self, other: &Self) -> Self;

    /// Enlarges this bounding volume by `amount` on each extent.
    fn loosen(&mut self, amount: Real);

    /// Creates a new, enlarged version, of this bounding volume.
    fn loosened(&self, amount: Real) -> Self;

    /// A size metric for this volume (e.g. its volume or extent sum).
    ///
    /// Collision queries descend into the node with the larger measure first.
    /// Only the relative ordering of measures matters.
    fn measure(&self) -> Real;

    /// Checks that every coordinate defining this volume is a finite number.
    fn is_finite(&self) -> bool;
}
