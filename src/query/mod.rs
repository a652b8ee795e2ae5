//! Collision queries over bounding volume hierarchies.

pub use self::contact::{ContactPoint, NarrowPhase, ReportLeafPairs};
pub use self::filter::{LeafPairFilter, NoExclusion, SharedVertexExclusion};
pub use self::self_collision::SelfCollisionQuery;
pub use self::tree_collision::TreeCollisionQuery;

mod contact;
mod filter;
mod self_collision;
mod tree_collision;
