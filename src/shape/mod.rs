//! Leaf geometry primitives.

pub use self::triangle::Triangle;

mod triangle;
