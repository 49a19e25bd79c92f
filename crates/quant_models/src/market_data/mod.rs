//! Market data containers.

mod curve;

pub use curve::Curve;
