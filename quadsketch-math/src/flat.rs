/// A fixed-length run of `f32` components with direct access to its storage.
///
/// Every math type in this crate is backed by a plain float array, laid out
/// exactly as the GPU expects it (column-major for matrices). Implementors only
/// provide slice access; packing into larger buffers comes for free.
///
/// # Buffer Packing
/// [`FlatBuffer::copy_to_array`] is the primitive used to interleave many
/// instances into one contiguous vertex buffer:
///
/// ```
/// use quadsketch_math::{Color, FlatBuffer, Matrix3};
///
/// let mut packed = [0.0; 13];
/// Matrix3::identity().copy_to_array(&mut packed, 0);
/// Color::new(1.0, 0.5, 0.0, 1.0).copy_to_array(&mut packed, 9);
///
/// assert_eq!(&packed[9..], &[1.0, 0.5, 0.0, 1.0]);
/// ```
pub trait FlatBuffer {
    /// Raw components, in upload order.
    fn as_slice(&self) -> &[f32];

    /// Mutable raw components, in upload order.
    fn as_mut_slice(&mut self) -> &mut [f32];

    /// Number of components; fixed per type.
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Writes all components into `target[offset..offset + self.len()]`.
    ///
    /// Values outside that range are left untouched.
    ///
    /// # Panics
    /// Panics if `target` is shorter than `offset + self.len()`.
    fn copy_to_array(&self, target: &mut [f32], offset: usize) {
        let src = self.as_slice();
        target[offset..offset + src.len()].copy_from_slice(src);
    }

    /// Copies the leading `min(self.len(), source.len())` components from `source`.
    ///
    /// Components beyond the end of a shorter `source` keep their current values.
    fn copy_from_array(&mut self, source: &[f32]) {
        let dst = self.as_mut_slice();
        let n = dst.len().min(source.len());
        dst[..n].copy_from_slice(&source[..n]);
    }
}

macro_rules! impl_flat_buffer {
    ($ty:ty) => {
        impl crate::FlatBuffer for $ty {
            fn as_slice(&self) -> &[f32] {
                &self.data
            }

            fn as_mut_slice(&mut self) -> &mut [f32] {
                &mut self.data
            }
        }
    };
}

pub(crate) use impl_flat_buffer;

#[cfg(test)]
mod tests {
    use crate::{Color, FlatBuffer, Matrix4, Vector2, Vector3};

    #[test]
    fn copy_to_array_leaves_surrounding_values_untouched() {
        let mut target = [-1.0; 8];
        Vector3::new(1.0, 2.0, 3.0).copy_to_array(&mut target, 2);

        assert_eq!(target, [-1.0, -1.0, 1.0, 2.0, 3.0, -1.0, -1.0, -1.0]);
    }

    #[test]
    fn copy_to_array_packs_consecutive_instances() {
        let colors = [Color::new(1.0, 0.0, 0.0, 1.0), Color::new(0.0, 1.0, 0.0, 0.5)];
        let mut target = vec![0.0; colors.len() * 4];
        for (i, color) in colors.iter().enumerate() {
            color.copy_to_array(&mut target, i * color.len());
        }

        assert_eq!(target, vec![1.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.5]);
    }

    #[test]
    #[should_panic]
    fn copy_to_array_panics_on_short_target() {
        let mut target = [0.0; 15];
        Matrix4::identity().copy_to_array(&mut target, 0);
    }

    #[test]
    fn copy_from_array_copies_only_the_overlap() {
        let mut v = Vector3::new(7.0, 8.0, 9.0);
        v.copy_from_array(&[1.0, 2.0]);
        assert_eq!(v, Vector3::new(1.0, 2.0, 9.0));

        let mut w = Vector2::zero();
        w.copy_from_array(&[3.0, 4.0, 5.0, 6.0]);
        assert_eq!(w, Vector2::new(3.0, 4.0));
    }

    #[test]
    fn raw_access_is_writable() {
        let mut color = Color::default();
        color.as_mut_slice()[1] = 0.25;

        assert_eq!(color.g(), 0.25);
        assert_eq!(color.len(), 4);
    }
}
