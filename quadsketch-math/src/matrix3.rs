use crate::{flat::impl_flat_buffer, Vector2};

/// A 3x3 transform over 2D homogeneous coordinates, stored column-major.
///
/// # Memory Layout
/// ```text
/// | 0  3  6 |     | a  c  tx |
/// | 1  4  7 |  =  | b  d  ty |
/// | 2  5  8 |     | 0  0  1  |
/// ```
///
/// # Composition Order
/// [`translate`](Self::translate), [`rotate`](Self::rotate) and
/// [`scale`](Self::scale) multiply the elementary transform in on the right
/// (`self = self * T`). The most recently added transform is therefore applied
/// to a point first, in local space:
///
/// ```
/// use quadsketch_math::{Matrix3, Vector2};
///
/// let mut m = Matrix3::identity();
/// m.translate(&Vector2::new(10.0, 0.0)).scale(&Vector2::new(2.0, 1.0));
///
/// assert_eq!(m.transform_point(&Vector2::new(1.0, 0.0)), Vector2::new(12.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix3 {
    data: [f32; 9],
}

impl_flat_buffer!(Matrix3);

impl Default for Matrix3 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix3 {
    #[rustfmt::skip]
    const IDENTITY: [f32; 9] = [
        1.0, 0.0, 0.0,
        0.0, 1.0, 0.0,
        0.0, 0.0, 1.0,
    ];

    pub const fn identity() -> Self {
        Self { data: Self::IDENTITY }
    }

    /// Creates a matrix from nine column-major values.
    pub const fn from_values(data: [f32; 9]) -> Self {
        Self { data }
    }

    /// Resets this matrix to the identity transform.
    pub fn set_identity(&mut self) -> &mut Self {
        self.data = Self::IDENTITY;
        self
    }

    /// Replaces this matrix with a pixel-space to clip-space projection.
    ///
    /// Pixel `(0, 0)` maps to the top-left corner `(-1, 1)` and
    /// `(width, height)` to the bottom-right corner `(1, -1)`; the Y axis is
    /// flipped so screen rows grow downward.
    #[rustfmt::skip]
    pub fn projection(&mut self, width: f32, height: f32) -> &mut Self {
        self.data = [
            2.0 / width, 0.0,           0.0,
            0.0,         -2.0 / height, 0.0,
            -1.0,        1.0,           1.0,
        ];
        self
    }

    /// Sets `self = self * T(by)`.
    pub fn translate(&mut self, by: &Vector2) -> &mut Self {
        let a = &mut self.data;
        let (x, y) = (by.x(), by.y());
        a[6] += x * a[0] + y * a[3];
        a[7] += x * a[1] + y * a[4];
        a[8] += x * a[2] + y * a[5];
        self
    }

    /// Sets `self = self * S(by)`.
    pub fn scale(&mut self, by: &Vector2) -> &mut Self {
        let (x, y) = (by.x(), by.y());
        self.data[0..3].iter_mut().for_each(|c| *c *= x);
        self.data[3..6].iter_mut().for_each(|c| *c *= y);
        self
    }

    /// Sets `self = self * R(radians)`, rotating counter-clockwise in a Y-up frame.
    pub fn rotate(&mut self, radians: f32) -> &mut Self {
        let (s, c) = radians.sin_cos();
        let a = self.data;
        for i in 0..3 {
            self.data[i] = c * a[i] + s * a[i + 3];
            self.data[i + 3] = c * a[i + 3] - s * a[i];
        }
        self
    }

    /// Sets `self = self * other`.
    pub fn multiply(&mut self, other: &Matrix3) -> &mut Self {
        self.data = multiply(&self.data, &other.data);
        self
    }

    /// Inverts this matrix in place.
    ///
    /// Returns `false` and leaves the matrix untouched when it is singular
    /// (zero or non-finite determinant) or when its inverse does not fit in
    /// `f32`. The result must be checked before the matrix is trusted as an
    /// inverse.
    #[must_use]
    pub fn inverse(&mut self) -> bool {
        // f64 keeps tiny but nonzero determinants representable
        let a = self.data.map(f64::from);
        let (a00, a01, a02) = (a[0], a[1], a[2]);
        let (a10, a11, a12) = (a[3], a[4], a[5]);
        let (a20, a21, a22) = (a[6], a[7], a[8]);

        let b01 = a22 * a11 - a12 * a21;
        let b11 = -a22 * a10 + a12 * a20;
        let b21 = a21 * a10 - a11 * a20;

        let det = a00 * b01 + a01 * b11 + a02 * b21;
        if det == 0.0 || !det.is_finite() {
            return false;
        }
        let inv = 1.0 / det;

        let inverse = [
            b01 * inv,
            (-a22 * a01 + a02 * a21) * inv,
            (a12 * a01 - a02 * a11) * inv,
            b11 * inv,
            (a22 * a00 - a02 * a20) * inv,
            (-a12 * a00 + a02 * a10) * inv,
            b21 * inv,
            (-a21 * a00 + a01 * a20) * inv,
            (a11 * a00 - a01 * a10) * inv,
        ]
        .map(|v| v as f32);
        if !inverse.iter().all(|v| v.is_finite()) {
            return false;
        }

        self.data = inverse;
        true
    }

    /// Overwrites this matrix with the values of `src`.
    pub fn copy_from(&mut self, src: &Matrix3) -> &mut Self {
        self.data = src.data;
        self
    }

    /// Transforms the point `(x, y, 1)` and returns the projected `(x, y)`.
    pub fn transform_point(&self, point: &Vector2) -> Vector2 {
        let a = &self.data;
        let (x, y) = (point.x(), point.y());
        let w = a[2] * x + a[5] * y + a[8];
        Vector2::new((a[0] * x + a[3] * y + a[6]) / w, (a[1] * x + a[4] * y + a[7]) / w)
    }
}

fn multiply(a: &[f32; 9], b: &[f32; 9]) -> [f32; 9] {
    let mut out = [0.0; 9];
    for col in 0..3 {
        for row in 0..3 {
            out[col * 3 + row] = (0..3).map(|k| a[k * 3 + row] * b[col * 3 + k]).sum();
        }
    }
    out
}
