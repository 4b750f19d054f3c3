use crate::flat::impl_flat_buffer;

/// A mutable 2D vector.
///
/// Mutating operations work in place and return `&mut Self`, so they chain:
/// `position.set(10.0, 0.0).add(&offset)`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector2 {
    data: [f32; 2],
}

impl_flat_buffer!(Vector2);

impl Vector2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { data: [x, y] }
    }

    pub const fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    pub const fn one() -> Self {
        Self::new(1.0, 1.0)
    }

    pub fn x(&self) -> f32 {
        self.data[0]
    }

    pub fn y(&self) -> f32 {
        self.data[1]
    }

    pub fn set_x(&mut self, x: f32) -> &mut Self {
        self.data[0] = x;
        self
    }

    pub fn set_y(&mut self, y: f32) -> &mut Self {
        self.data[1] = y;
        self
    }

    pub fn set(&mut self, x: f32, y: f32) -> &mut Self {
        self.data = [x, y];
        self
    }

    /// Adds `other` component-wise into this vector.
    pub fn add(&mut self, other: &Vector2) -> &mut Self {
        self.data[0] += other.data[0];
        self.data[1] += other.data[1];
        self
    }

    pub fn length(&self) -> f32 {
        self.data[0].hypot(self.data[1])
    }
}
