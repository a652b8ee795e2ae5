/*!
bvtree
======

**bvtree** is a bounding-volume-hierarchy collision core. It provides a
generic tree of bounding volumes with bottom-up refitting after geometry
deformation, a self-collision query (one tree against itself), and a
pairwise tree-vs-tree query under a relative rigid transform. Two concrete
bounding volumes are provided: axis-aligned boxes for deformable geometry
and oriented boxes for rigid bodies.

*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]

#[cfg(feature = "serde-serialize")]
#[macro_use]
extern crate serde;

pub use nalgebra as na;

pub mod bounding_volume;
pub mod math;
pub mod partitioning;
pub mod query;
pub mod shape;
