use crate::{flat::impl_flat_buffer, Matrix3, Vector3};

/// A 4x4 transform over 3D homogeneous coordinates, stored column-major.
///
/// Indices 12, 13 and 14 hold the translation. As with [`Matrix3`],
/// [`translate`](Self::translate) and [`scale`](Self::scale) compose on the
/// right (`self = self * T`).
///
/// Unlike [`Matrix3::inverse`], [`invert`](Self::invert) does not report
/// failure: inverting a singular matrix silently fills it with non-finite values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix4 {
    data: [f32; 16],
}

impl_flat_buffer!(Matrix4);

impl Default for Matrix4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix4 {
    #[rustfmt::skip]
    const IDENTITY: [f32; 16] = [
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ];

    pub const fn identity() -> Self {
        Self { data: Self::IDENTITY }
    }

    /// Creates a matrix from sixteen column-major values.
    pub const fn from_values(data: [f32; 16]) -> Self {
        Self { data }
    }

    /// Creates a translation matrix.
    pub fn from_translation(translation: &Vector3) -> Self {
        let mut m = Self::identity();
        m.set_from_translation(translation);
        m
    }

    /// Creates a perspective projection; see [`set_perspective`](Self::set_perspective).
    pub fn perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut m = Self::identity();
        m.set_perspective(fov, aspect, near, far);
        m
    }

    /// Creates an orthographic projection; see [`set_ortho`](Self::set_ortho).
    pub fn ortho(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let mut m = Self::identity();
        m.set_ortho(left, right, bottom, top, near, far);
        m
    }

    /// Embeds a 2D homogeneous transform, passing `z` through unchanged.
    ///
    /// A point `(x, y, z, 1)` is mapped by `m` in its `x`/`y`/`w` components,
    /// which lets a [`Viewport`](crate::Viewport) drive a 4x4 shader uniform.
    #[rustfmt::skip]
    pub fn from_matrix3(m: &Matrix3) -> Self {
        use crate::FlatBuffer;

        let a = m.as_slice();
        Self::from_values([
            a[0], a[1], 0.0, a[2],
            a[3], a[4], 0.0, a[5],
            0.0,  0.0,  1.0, 0.0,
            a[6], a[7], 0.0, a[8],
        ])
    }

    pub fn set_identity(&mut self) -> &mut Self {
        self.data = Self::IDENTITY;
        self
    }

    /// Replaces this matrix with a pure translation.
    pub fn set_from_translation(&mut self, translation: &Vector3) -> &mut Self {
        self.data = Self::IDENTITY;
        self.data[12] = translation.x();
        self.data[13] = translation.y();
        self.data[14] = translation.z();
        self
    }

    /// Same as [`set_from_translation`](Self::set_from_translation).
    pub fn set_position(&mut self, position: &Vector3) -> &mut Self {
        self.set_from_translation(position)
    }

    /// Replaces this matrix with a right-handed perspective projection.
    ///
    /// `fov` is the vertical field of view in radians. An infinite `far` plane
    /// produces the infinite-projection limit.
    pub fn set_perspective(&mut self, fov: f32, aspect: f32, near: f32, far: f32) -> &mut Self {
        let f = 1.0 / (fov / 2.0).tan();
        self.data = [0.0; 16];
        self.data[0] = f / aspect;
        self.data[5] = f;
        self.data[11] = -1.0;

        if far.is_finite() {
            let nf = 1.0 / (near - far);
            self.data[10] = (far + near) * nf;
            self.data[14] = 2.0 * far * near * nf;
        } else {
            self.data[10] = -1.0;
            self.data[14] = -2.0 * near;
        }
        self
    }

    /// Replaces this matrix with an orthographic projection of the given box.
    pub fn set_ortho(
        &mut self,
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> &mut Self {
        let lr = 1.0 / (left - right);
        let bt = 1.0 / (bottom - top);
        let nf = 1.0 / (near - far);

        self.data = [0.0; 16];
        self.data[0] = -2.0 * lr;
        self.data[5] = -2.0 * bt;
        self.data[10] = 2.0 * nf;
        self.data[12] = (left + right) * lr;
        self.data[13] = (top + bottom) * bt;
        self.data[14] = (far + near) * nf;
        self.data[15] = 1.0;
        self
    }

    /// Sets `self = self * T(by)`.
    pub fn translate(&mut self, by: &Vector3) -> &mut Self {
        let (x, y, z) = (by.x(), by.y(), by.z());
        let a = &mut self.data;
        for row in 0..4 {
            a[12 + row] += a[row] * x + a[4 + row] * y + a[8 + row] * z;
        }
        self
    }

    /// Sets `self = self * S(by)`.
    pub fn scale(&mut self, by: &Vector3) -> &mut Self {
        let factors = [by.x(), by.y(), by.z()];
        for (col, factor) in factors.into_iter().enumerate() {
            self.data[col * 4..col * 4 + 4].iter_mut().for_each(|c| *c *= factor);
        }
        self
    }

    /// Sets `self = self * other`.
    pub fn multiply(&mut self, other: &Matrix4) -> &mut Self {
        self.data = multiply(&self.data, &other.data);
        self
    }

    /// Sets `self = a * b`.
    pub fn multiply_matrices(&mut self, a: &Matrix4, b: &Matrix4) -> &mut Self {
        self.data = multiply(&a.data, &b.data);
        self
    }

    /// Inverts this matrix in place.
    ///
    /// The matrix must be invertible; a singular matrix is overwritten with
    /// NaN/infinite values and no failure is reported.
    pub fn invert(&mut self) -> &mut Self {
        self.data = inverse(&self.data);
        self
    }

    /// Writes the inverse of this matrix into `out`, leaving `self` unchanged.
    ///
    /// Carries the same precondition as [`invert`](Self::invert).
    pub fn inverse_into<'a>(&self, out: &'a mut Matrix4) -> &'a mut Matrix4 {
        out.data = inverse(&self.data);
        out
    }

    /// Replaces this matrix with the camera-to-world transform of a camera at
    /// `eye` looking at `target`.
    ///
    /// The basis is right-handed with the camera looking down its local `-z`:
    /// - `z = normalize(eye - target)`
    /// - `x = normalize(up × z)`
    /// - `y = normalize(z × x)`
    ///
    /// Columns are `[x, 0]`, `[y, 0]`, `[z, 0]` and `[eye, 1]`. This is not yet a
    /// view matrix; [`invert`](Self::invert) it for that. `eye` must differ from
    /// `target` and `up` must not be parallel to the viewing direction, otherwise
    /// the basis degenerates to NaN.
    pub fn look_at(&mut self, eye: &Vector3, target: &Vector3, up: &Vector3) -> &mut Self {
        let mut z_axis = Vector3::zero();
        z_axis.subtract_vectors(eye, target).normalize();
        let mut x_axis = Vector3::zero();
        x_axis.cross_vectors(up, &z_axis).normalize();
        let mut y_axis = Vector3::zero();
        y_axis.cross_vectors(&z_axis, &x_axis).normalize();

        #[rustfmt::skip]
        let data = [
            x_axis.x(), x_axis.y(), x_axis.z(), 0.0,
            y_axis.x(), y_axis.y(), y_axis.z(), 0.0,
            z_axis.x(), z_axis.y(), z_axis.z(), 0.0,
            eye.x(),    eye.y(),    eye.z(),    1.0,
        ];
        self.data = data;
        self
    }

    /// Transforms the point `(x, y, z, 1)` and divides by the resulting `w`.
    pub fn transform_point(&self, point: &Vector3) -> Vector3 {
        let a = &self.data;
        let (x, y, z) = (point.x(), point.y(), point.z());
        let row = |r: usize| a[r] * x + a[4 + r] * y + a[8 + r] * z + a[12 + r];
        let w = row(3);
        Vector3::new(row(0) / w, row(1) / w, row(2) / w)
    }
}

fn multiply(a: &[f32; 16], b: &[f32; 16]) -> [f32; 16] {
    let mut out = [0.0; 16];
    for col in 0..4 {
        for row in 0..4 {
            out[col * 4 + row] = (0..4).map(|k| a[k * 4 + row] * b[col * 4 + k]).sum();
        }
    }
    out
}

fn inverse(a: &[f32; 16]) -> [f32; 16] {
    let (a00, a01, a02, a03) = (a[0], a[1], a[2], a[3]);
    let (a10, a11, a12, a13) = (a[4], a[5], a[6], a[7]);
    let (a20, a21, a22, a23) = (a[8], a[9], a[10], a[11]);
    let (a30, a31, a32, a33) = (a[12], a[13], a[14], a[15]);

    let b00 = a00 * a11 - a01 * a10;
    let b01 = a00 * a12 - a02 * a10;
    let b02 = a00 * a13 - a03 * a10;
    let b03 = a01 * a12 - a02 * a11;
    let b04 = a01 * a13 - a03 * a11;
    let b05 = a02 * a13 - a03 * a12;
    let b06 = a20 * a31 - a21 * a30;
    let b07 = a20 * a32 - a22 * a30;
    let b08 = a20 * a33 - a23 * a30;
    let b09 = a21 * a32 - a22 * a31;
    let b10 = a21 * a33 - a23 * a31;
    let b11 = a22 * a33 - a23 * a32;

    // singular input divides by zero here; callers guarantee invertibility
    let det = 1.0 / (b00 * b11 - b01 * b10 + b02 * b09 + b03 * b08 - b04 * b07 + b05 * b06);

    [
        (a11 * b11 - a12 * b10 + a13 * b09) * det,
        (a02 * b10 - a01 * b11 - a03 * b09) * det,
        (a31 * b05 - a32 * b04 + a33 * b03) * det,
        (a22 * b04 - a21 * b05 - a23 * b03) * det,
        (a12 * b08 - a10 * b11 - a13 * b07) * det,
        (a00 * b11 - a02 * b08 + a03 * b07) * det,
        (a32 * b02 - a30 * b05 - a33 * b01) * det,
        (a20 * b05 - a22 * b02 + a23 * b01) * det,
        (a10 * b10 - a11 * b08 + a13 * b06) * det,
        (a01 * b08 - a00 * b10 - a03 * b06) * det,
        (a30 * b04 - a31 * b02 + a33 * b00) * det,
        (a21 * b02 - a20 * b04 - a23 * b00) * det,
        (a11 * b07 - a10 * b09 - a12 * b06) * det,
        (a00 * b09 - a01 * b07 + a02 * b06) * det,
        (a31 * b01 - a30 * b03 - a32 * b00) * det,
        (a20 * b03 - a21 * b01 + a22 * b00) * det,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FlatBuffer, Vector2};

    #[test]
    fn look_at_builds_camera_basis() {
        let mut m = Matrix4::identity();
        m.look_at(&Vector3::new(0.0, 0.0, 5.0), &Vector3::zero(), &Vector3::up());

        #[rustfmt::skip]
        let expected = [
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 5.0, 1.0,
        ];
        assert_approx_eq!(m, expected);
        assert_approx_eq!([m.as_slice()[8], m.as_slice()[9], m.as_slice()[10]], [0.0, 0.0, 1.0]);
    }

    #[test]
    fn inverted_look_at_moves_target_in_front_of_camera() {
        let eye = Vector3::new(3.0, 4.0, 5.0);
        let target = Vector3::new(-1.0, 0.5, 0.0);
        let mut view = Matrix4::identity();
        view.look_at(&eye, &target, &Vector3::up()).invert();

        let mut to_target = Vector3::zero();
        to_target.subtract_vectors(&target, &eye);

        let in_view = view.transform_point(&target);
        assert_approx_eq!(in_view, Vector3::new(0.0, 0.0, -to_target.length()), 1e-4);
        assert_approx_eq!(view.transform_point(&eye), Vector3::zero(), 1e-4);
    }

    #[test]
    fn translate_then_scale_applies_scale_first() {
        let mut m = Matrix4::from_translation(&Vector3::new(10.0, 0.0, -2.0));
        m.scale(&Vector3::new(2.0, 3.0, 4.0));

        assert_eq!(m.transform_point(&Vector3::new(1.0, 1.0, 1.0)), Vector3::new(12.0, 3.0, 2.0));
    }

    #[test]
    fn translate_accumulates() {
        let mut m = Matrix4::identity();
        m.translate(&Vector3::new(1.0, 2.0, 3.0)).translate(&Vector3::new(1.0, 0.0, -3.0));

        assert_eq!(m, Matrix4::from_translation(&Vector3::new(2.0, 2.0, 0.0)));
    }

    #[test]
    fn set_position_aliases_from_translation() {
        let position = Vector3::new(-4.0, 0.5, 9.0);
        let mut m = Matrix4::perspective(1.0, 1.0, 0.1, 10.0);
        m.set_position(&position);

        assert_eq!(m, Matrix4::from_translation(&position));
    }

    #[test]
    fn inverse_composes_to_identity() {
        let mut m = Matrix4::perspective(std::f32::consts::FRAC_PI_3, 16.0 / 9.0, 0.1, 100.0);
        m.translate(&Vector3::new(1.0, -2.0, -10.0)).scale(&Vector3::new(0.5, 2.0, 1.0));

        let mut inv = Matrix4::identity();
        m.inverse_into(&mut inv);

        let mut product = Matrix4::identity();
        product.multiply_matrices(&m, &inv);
        assert_approx_eq!(product, Matrix4::identity(), 1e-4);
    }

    #[test]
    fn singular_invert_degrades_to_non_finite() {
        let mut m = Matrix4::identity();
        m.scale(&Vector3::new(1.0, 0.0, 1.0)).invert();

        assert!(m.as_slice().iter().any(|c| !c.is_finite()));
    }

    #[test]
    fn ortho_maps_box_to_clip_cube() {
        let m = Matrix4::ortho(0.0, 800.0, 600.0, 0.0, -1.0, 1.0);

        assert_approx_eq!(m.transform_point(&Vector3::zero()), Vector3::new(-1.0, 1.0, 0.0));
        assert_approx_eq!(
            m.transform_point(&Vector3::new(800.0, 600.0, 0.0)),
            Vector3::new(1.0, -1.0, 0.0)
        );
    }

    #[test]
    fn perspective_maps_near_and_far_planes() {
        let m = Matrix4::perspective(std::f32::consts::FRAC_PI_2, 2.0, 1.0, 10.0);

        assert_approx_eq!(m.transform_point(&Vector3::new(0.0, 0.0, -1.0)).z(), -1.0);
        assert_approx_eq!(m.transform_point(&Vector3::new(0.0, 0.0, -10.0)).z(), 1.0, 1e-4);
        assert_approx_eq!(
            m.transform_point(&Vector3::new(2.0, 1.0, -1.0)),
            Vector3::new(1.0, 1.0, -1.0)
        );
    }

    #[test]
    fn infinite_far_plane() {
        let m = Matrix4::perspective(std::f32::consts::FRAC_PI_2, 1.0, 0.5, f32::INFINITY);

        assert_eq!(m.as_slice()[10], -1.0);
        assert_eq!(m.as_slice()[14], -1.0);
    }

    #[test]
    fn embedded_matrix3_matches_2d_transform() {
        let mut m3 = Matrix3::identity();
        m3.projection(800.0, 600.0).translate(&Vector2::new(40.0, 30.0)).rotate(0.3);
        let m4 = Matrix4::from_matrix3(&m3);

        let p2 = m3.transform_point(&Vector2::new(12.0, -7.0));
        let p3 = m4.transform_point(&Vector3::new(12.0, -7.0, 0.25));
        assert_approx_eq!([p3.x(), p3.y(), p3.z()], [p2.x(), p2.y(), 0.25]);
    }
}
