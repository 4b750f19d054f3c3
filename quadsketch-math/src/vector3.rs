use crate::flat::impl_flat_buffer;

const X: usize = 0;
const Y: usize = 1;
const Z: usize = 2;

/// A mutable 3D vector.
///
/// Like [`Vector2`](crate::Vector2), every mutating operation returns `&mut Self`.
/// The `*_vectors` variants overwrite `self` with a result computed purely from
/// their arguments, which lets a scratch vector be reused without allocation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector3 {
    data: [f32; 3],
}

impl_flat_buffer!(Vector3);

impl Vector3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { data: [x, y, z] }
    }

    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// The world up direction, `(0, 1, 0)`.
    pub const fn up() -> Self {
        Self::new(0.0, 1.0, 0.0)
    }

    pub fn x(&self) -> f32 {
        self.data[X]
    }

    pub fn y(&self) -> f32 {
        self.data[Y]
    }

    pub fn z(&self) -> f32 {
        self.data[Z]
    }

    pub fn set_x(&mut self, x: f32) -> &mut Self {
        self.data[X] = x;
        self
    }

    pub fn set_y(&mut self, y: f32) -> &mut Self {
        self.data[Y] = y;
        self
    }

    pub fn set_z(&mut self, z: f32) -> &mut Self {
        self.data[Z] = z;
        self
    }

    pub fn set(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.data = [x, y, z];
        self
    }

    pub fn add(&mut self, other: &Vector3) -> &mut Self {
        self.data.iter_mut().zip(other.data).for_each(|(a, b)| *a += b);
        self
    }

    pub fn subtract(&mut self, other: &Vector3) -> &mut Self {
        self.data.iter_mut().zip(other.data).for_each(|(a, b)| *a -= b);
        self
    }

    /// Sets `self = a - b`.
    pub fn subtract_vectors(&mut self, a: &Vector3, b: &Vector3) -> &mut Self {
        self.set(a.x() - b.x(), a.y() - b.y(), a.z() - b.z())
    }

    /// Sets `self = a × b`.
    pub fn cross_vectors(&mut self, a: &Vector3, b: &Vector3) -> &mut Self {
        let (ax, ay, az) = (a.x(), a.y(), a.z());
        let (bx, by, bz) = (b.x(), b.y(), b.z());
        self.set(ay * bz - az * by, az * bx - ax * bz, ax * by - ay * bx)
    }

    pub fn scale(&mut self, factor: f32) -> &mut Self {
        self.data.iter_mut().for_each(|c| *c *= factor);
        self
    }

    pub fn dot(&self, other: &Vector3) -> f32 {
        self.data.iter().zip(other.data).map(|(a, b)| a * b).sum()
    }

    pub fn length(&self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Scales this vector to unit length.
    ///
    /// The vector must be non-zero: normalizing `(0, 0, 0)` divides by zero and
    /// leaves NaN components behind.
    pub fn normalize(&mut self) -> &mut Self {
        let length = self.length();
        self.data.iter_mut().for_each(|c| *c /= length);
        self
    }
}
