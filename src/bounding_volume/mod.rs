//! Bounding volumes.

#[doc(inline)]
pub use self::aabb::Aabb;
#[doc(inline)]
pub use self::bounding_volume::BoundingVolume;
#[doc(inline)]
pub use self::obb::{obb_obb_intersect, Obb};

#[doc(hidden)]
pub mod aabb;
mod aabb_triangle;
#[doc(hidden)]
pub mod bounding_volume;
#[doc(hidden)]
pub mod obb;
