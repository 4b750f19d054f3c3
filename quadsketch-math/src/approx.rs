use crate::{Color, Matrix3, Matrix4, Vector2, Vector3};

pub(crate) const EPSILON: f32 = 1e-5;

/// Flattens a value into its float components for tolerance comparisons.
pub(crate) trait Components {
    fn components(&self) -> Vec<f32>;
}

impl Components for f32 {
    fn components(&self) -> Vec<f32> {
        vec![*self]
    }
}

impl<const N: usize> Components for [f32; N] {
    fn components(&self) -> Vec<f32> {
        self.to_vec()
    }
}

macro_rules! impl_components {
    ($($ty:ty),*) => {
        $(
            impl Components for $ty {
                fn components(&self) -> Vec<f32> {
                    crate::FlatBuffer::as_slice(self).to_vec()
                }
            }
        )*
    };
}

impl_components!(Vector2, Vector3, Color, Matrix3, Matrix4);

pub(crate) fn approx_eq(left: &[f32], right: &[f32], epsilon: f32) -> bool {
    left.len() == right.len() && left.iter().zip(right).all(|(l, r)| (l - r).abs() <= epsilon)
}

macro_rules! assert_approx_eq {
    ($left:expr, $right:expr) => {
        assert_approx_eq!($left, $right, crate::approx::EPSILON)
    };
    ($left:expr, $right:expr, $epsilon:expr) => {{
        use crate::approx::Components;
        let (left, right) = ($left.components(), $right.components());
        assert!(
            crate::approx::approx_eq(&left, &right, $epsilon),
            "assertion failed: `left ≈ right` (ε = {})\n  left: {:?}\n right: {:?}",
            $epsilon,
            left,
            right,
        );
    }};
}
