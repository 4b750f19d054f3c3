#[cfg(test)]
#[macro_use]
mod approx;

mod color;
mod flat;
mod matrix3;
mod matrix4;
mod number;
mod space2;
mod vector2;
mod vector3;
mod viewport;

pub use color::Color;
pub use flat::FlatBuffer;
pub use matrix3::Matrix3;
pub use matrix4::Matrix4;
pub use number::{degrees_to_radians, number_in_range};
pub use space2::Space2;
pub use vector2::Vector2;
pub use vector3::Vector3;
pub use viewport::Viewport;
