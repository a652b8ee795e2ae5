use crate::math::{Isometry, Point, Real, Vector};
use nalgebra::Unit;
use std::mem;

/// Geometric description of a contact between two leaves.
#[derive(Debug, PartialEq, Copy, Clone)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ContactPoint {
    /// Leaf-data index of the first primitive involved in the contact.
    pub leaf1: u32,
    /// Leaf-data index of the second primitive involved in the contact.
    pub leaf2: u32,
    /// Position of the contact, expressed in the local space of the first
    /// hierarchy.
    pub point: Point<Real>,
    /// Contact normal, pointing towards the exterior of the first primitive.
    pub normal: Unit<Vector<Real>>,
    /// Distance between the two primitives along the normal.
    ///
    /// If this is negative, this contact represents a penetration.
    pub dist: Real,
}

impl ContactPoint {
    /// Creates a new contact point.
    #[inline]
    pub fn new(
        leaf1: u32,
        leaf2: u32,
        point: Point<Real>,
        normal: Unit<Vector<Real>>,
        dist: Real,
    ) -> Self {
        ContactPoint {
            leaf1,
            leaf2,
            point,
            normal,
            dist,
        }
    }

    /// Swaps the roles of the two primitives of this contact.
    #[inline]
    pub fn flip(&mut self) {
        mem::swap(&mut self.leaf1, &mut self.leaf2);
        self.normal = -self.normal;
    }

    /// Returns a new contact with the roles of the two primitives swapped.
    #[inline]
    pub fn flipped(mut self) -> Self {
        self.flip();
        self
    }
}

/// Trait implemented by narrow-phase resolvers consuming the leaf pairs
/// produced by the collision queries.
///
/// The queries are conservative: they emit every pair of leaves whose
/// bounding volumes overlap. A narrow phase turns such a pair into zero or
/// more exact contact points using the primitives' actual geometry, which
/// this crate does not own.
pub trait NarrowPhase {
    /// Resolves the pair of leaves `(leaf1, leaf2)` into contact points.
    ///
    /// `pos12` maps the second hierarchy's frame into the frame of the first
    /// one; it is the identity for self-collision queries.
    fn leaf_pair(
        &mut self,
        leaf1: u32,
        leaf2: u32,
        pos12: &Isometry<Real>,
        out: &mut Vec<ContactPoint>,
    );
}

/// The trivial narrow phase: every candidate leaf pair becomes one contact.
///
/// The geometric fields of the emitted contacts are inert placeholders
/// (origin point, `+Y` normal, zero distance); only the pair identity is
/// meaningful. Use this when the pair list itself is the result.
#[derive(Clone, Debug, Default)]
pub struct ReportLeafPairs;

impl NarrowPhase for ReportLeafPairs {
    fn leaf_pair(
        &mut self,
        leaf1: u32,
        leaf2: u32,
        _pos12: &Isometry<Real>,
        out: &mut Vec<ContactPoint>,
    ) {
        out.push(ContactPoint::new(
            leaf1,
            leaf2,
            Point::origin(),
            Vector::y_axis(),
            0.0,
        ));
    }
}
