//! Spatial partitioning tools.

pub use self::bvh_build::BvhBuildError;
pub use self::bvh_tree::{Bvh, BvhNode, BvhWorkspace};

mod bvh_build;
mod bvh_refit;
#[cfg(test)]
mod bvh_tests;
mod bvh_tree;
mod bvh_validation;
