//! Aliases for the mathematical types used throughout this crate.

/// The scalar type used throughout this crate.
pub type Real = f32;

/// The default tolerance used for geometric operations.
pub const DEFAULT_EPSILON: Real = Real::EPSILON;

/// The dimension of the space.
pub const DIM: usize = 3;

/// The point type.
pub use nalgebra::Point3 as Point;

/// The vector type.
pub use nalgebra::Vector3 as Vector;

/// The transformation matrix type.
pub use nalgebra::Isometry3 as Isometry;

/// The translation type.
pub use nalgebra::Translation3 as Translation;
