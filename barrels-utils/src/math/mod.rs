//! Small math types used for positions and spatial checks.

mod bounding_box;
mod vector3;

pub use bounding_box::BoundingBox;
pub use vector3::Vector3;
