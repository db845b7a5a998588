//! Homogeneous math types for the projection pipeline.

pub mod mat4;
pub mod point2;
pub mod vec3;
pub mod vec4;

pub use mat4::Mat4;
pub use point2::Point2;
pub use vec3::Vec3;
pub use vec4::Vec4;
