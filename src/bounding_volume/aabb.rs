//! Axis Aligned Bounding Box.

use crate::bounding_volume::{obb_obb_intersect, BoundingVolume};
use crate::math::{Isometry, Point, Real, Translation, Vector, DIM};
use approx::{AbsDiffEq, RelativeEq};
use num_traits::Bounded;

/// An Axis-Aligned Bounding Box.
///
/// An AABB is the simplest bounding volume, defined by its minimum and maximum
/// corners. Its edges are always parallel to the coordinate axes, making
/// intersection tests and merges a handful of coordinate comparisons. It is
/// the volume of choice for deformable geometry since it is cheap to recompute
/// after every deformation.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
#[repr(C)]
pub struct Aabb {
    /// The point with the smallest coordinates on each axis.
    pub mins: Point<Real>,
    /// The point with the largest coordinates on each axis.
    pub maxs: Point<Real>,
}

impl Aabb {
    /// Creates a new AABB from its minimum and maximum corners.
    ///
    /// Each component of `mins` should be smaller than or equal to the
    /// corresponding component of `maxs`.
    #[inline]
    pub fn new(mins: Point<Real>, maxs: Point<Real>) -> Aabb {
        Aabb { mins, maxs }
    }

    /// Creates an invalid AABB with `mins` components set to `Real::MAX` and
    /// `maxs` components set to `-Real::MAX`.
    ///
    /// This is a useless AABB per se, but it serves as the initial accumulator
    /// for point-cloud bounds: enclosing any point into it yields that point.
    #[inline]
    pub fn new_invalid() -> Self {
        Self::new(
            Vector::repeat(Real::max_value()).into(),
            Vector::repeat(-Real::max_value()).into(),
        )
    }

    /// Creates a new AABB from its center and half-extents.
    #[inline]
    pub fn from_half_extents(center: Point<Real>, half_extents: Vector<Real>) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// Creates a new AABB that tightly encloses a set of points.
    pub fn from_points<I>(pts: I) -> Self
    where
        I: IntoIterator<Item = Point<Real>>,
    {
        let mut result = Self::new_invalid();
        for pt in pts {
            result.take_point(pt);
        }
        result
    }

    /// The center of this AABB.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        ((self.mins.coords + self.maxs.coords) * 0.5).into()
    }

    /// The half-extents of this AABB.
    #[inline]
    pub fn half_extents(&self) -> Vector<Real> {
        (self.maxs - self.mins) * 0.5
    }

    /// The extents of this AABB.
    #[inline]
    pub fn extents(&self) -> Vector<Real> {
        self.maxs - self.mins
    }

    /// The volume of this AABB.
    #[inline]
    pub fn volume(&self) -> Real {
        let extents = self.extents();
        extents.x * extents.y * extents.z
    }

    /// Enlarges this AABB so it also contains the point `pt`.
    pub fn take_point(&mut self, pt: Point<Real>) {
        self.mins = self.mins.coords.inf(&pt.coords).into();
        self.maxs = self.maxs.coords.sup(&pt.coords).into();
    }

    /// Computes the AABB bounding `self` transformed by `m`.
    ///
    /// The result is the tightest axis-aligned box around the rotated box, so
    /// it is conservative: it may be strictly larger than the transformed
    /// geometry it bounds.
    #[inline]
    pub fn transform_by(&self, m: &Isometry<Real>) -> Self {
        let center = m * self.center();
        let abs_rot = m.rotation.to_rotation_matrix().into_inner().abs();
        let ws_half_extents = abs_rot * self.half_extents();
        Aabb::from_half_extents(center, ws_half_extents)
    }

    /// Computes the AABB bounding `self` translated by `translation`.
    #[inline]
    pub fn translated(mut self, translation: &Vector<Real>) -> Self {
        self.mins += translation;
        self.maxs += translation;
        self
    }

    /// Does this AABB contain the given point?
    #[inline]
    pub fn contains_local_point(&self, point: &Point<Real>) -> bool {
        for i in 0..DIM {
            if point[i] < self.mins[i] || point[i] > self.maxs[i] {
                return false;
            }
        }

        true
    }
}

impl BoundingVolume for Aabb {
    #[inline]
    fn center(&self) -> Point<Real> {
        self.center()
    }

    #[inline]
    fn contains_point(&self, pt: &Point<Real>) -> bool {
        self.contains_local_point(pt)
    }

    #[inline]
    fn intersects(&self, other: &Aabb) -> bool {
        // Axis-wise interval overlap on the three independent axes.
        for i in 0..DIM {
            if self.mins[i] > other.maxs[i] || other.mins[i] > self.maxs[i] {
                return false;
            }
        }

        true
    }

    #[inline]
    fn intersects_transformed(&self, other: &Aabb, pos12: &Isometry<Real>) -> bool {
        // Both boxes are axis-aligned cuboids in their own frames, so the
        // exact separating-axis test applies with the composed
        // center-to-center pose. The exact test is symmetric in its operands,
        // unlike enclosing the transformed box in a new axis-aligned one.
        let pose12 = Translation::from(-self.center().coords)
            * pos12
            * Translation::from(other.center().coords);
        obb_obb_intersect(&self.half_extents(), &other.half_extents(), &pose12)
    }

    #[inline]
    fn contains(&self, other: &Aabb) -> bool {
        for i in 0..DIM {
            if self.mins[i] > other.mins[i] || self.maxs[i] < other.maxs[i] {
                return false;
            }
        }

        true
    }

    #[inline]
    fn merge(&mut self, other: &Aabb) {
        self.mins = self.mins.coords.inf(&other.mins.coords).into();
        self.maxs = self.maxs.coords.sup(&other.maxs.coords).into();
    }

    #[inline]
    fn merged(&self, other: &Aabb) -> Aabb {
        Aabb {
            mins: self.mins.coords.inf(&other.mins.coords).into(),
            maxs: self.maxs.coords.sup(&other.maxs.coords).into(),
        }
    }

    #[inline]
    fn loosen(&mut self, amount: Real) {
        debug_assert!(amount >= 0.0, "The loosening margin must be positive.");
        self.mins += Vector::repeat(-amount);
        self.maxs += Vector::repeat(amount);
    }

    #[inline]
    fn loosened(&self, amount: Real) -> Aabb {
        debug_assert!(amount >= 0.0, "The loosening margin must be positive.");
        Aabb {
            mins: self.mins + Vector::repeat(-amount),
            maxs: self.maxs + Vector::repeat(amount),
        }
    }

    #[inline]
    fn measure(&self) -> Real {
        self.volume()
    }

    #[inline]
    fn is_finite(&self) -> bool {
        self.mins.coords.iter().all(|x| x.is_finite())
            && self.maxs.coords.iter().all(|x| x.is_finite())
    }
}

impl AbsDiffEq for Aabb {
    type Epsilon = Real;

    fn default_epsilon() -> Self::Epsilon {
        Real::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.mins.abs_diff_eq(&other.mins, epsilon) && self.maxs.abs_diff_eq(&other.maxs, epsilon)
    }
}

impl RelativeEq for Aabb {
    fn default_max_relative() -> Self::Epsilon {
        Real::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.mins.relative_eq(&other.mins, epsilon, max_relative)
            && self.maxs.relative_eq(&other.maxs, epsilon, max_relative)
    }
}
