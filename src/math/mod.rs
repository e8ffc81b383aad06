//! Vector, matrix and quaternion types for transforms and projections
//!
//! Every type here is a plain `Copy` value: operations return new values and
//! equality is exact. Use the [`approx`] traits when a tolerance is needed.
//!
//! Matrices follow the engine convention where `rows[3]` is the translation
//! row and `Matrix4::transform` computes `result[i] = Σ rows[k][i] * v[k]`.

/// Implements the `approx` comparison traits by viewing `$ty` as `[f32; $n]`.
macro_rules! impl_approx_eq {
    ($ty:ty, $n:literal) => {
        impl approx::AbsDiffEq for $ty {
            type Epsilon = f32;

            fn default_epsilon() -> f32 {
                <f32 as approx::AbsDiffEq>::default_epsilon()
            }

            fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
                let lhs: &[f32; $n] = bytemuck::cast_ref(self);
                let rhs: &[f32; $n] = bytemuck::cast_ref(other);
                lhs.iter()
                    .zip(rhs)
                    .all(|(a, b)| approx::AbsDiffEq::abs_diff_eq(a, b, epsilon))
            }
        }

        impl approx::RelativeEq for $ty {
            fn default_max_relative() -> f32 {
                <f32 as approx::RelativeEq>::default_max_relative()
            }

            fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
                let lhs: &[f32; $n] = bytemuck::cast_ref(self);
                let rhs: &[f32; $n] = bytemuck::cast_ref(other);
                lhs.iter().zip(rhs).all(|(a, b)| {
                    approx::RelativeEq::relative_eq(a, b, epsilon, max_relative)
                })
            }
        }

        impl approx::UlpsEq for $ty {
            fn default_max_ulps() -> u32 {
                <f32 as approx::UlpsEq>::default_max_ulps()
            }

            fn ulps_eq(&self, other: &Self, epsilon: f32, max_ulps: u32) -> bool {
                let lhs: &[f32; $n] = bytemuck::cast_ref(self);
                let rhs: &[f32; $n] = bytemuck::cast_ref(other);
                lhs.iter()
                    .zip(rhs)
                    .all(|(a, b)| approx::UlpsEq::ulps_eq(a, b, epsilon, max_ulps))
            }
        }
    };
}

/// Component indexing and array conversions for the flat float tuples.
macro_rules! impl_components {
    ($ty:ident, $n:literal) => {
        impl $ty {
            /// Views the components as a fixed-size array.
            #[must_use]
            pub fn as_array(&self) -> &[f32; $n] {
                bytemuck::cast_ref(self)
            }

            /// Returns the component at `index`, or `None` when out of range.
            #[must_use]
            pub fn get(&self, index: usize) -> Option<f32> {
                self.as_array().get(index).copied()
            }
        }

        impl std::ops::Index<usize> for $ty {
            type Output = f32;

            fn index(&self, index: usize) -> &f32 {
                &self.as_array()[index]
            }
        }

        impl std::ops::IndexMut<usize> for $ty {
            fn index_mut(&mut self, index: usize) -> &mut f32 {
                let components: &mut [f32; $n] = bytemuck::cast_mut(self);
                &mut components[index]
            }
        }

        impl From<[f32; $n]> for $ty {
            fn from(components: [f32; $n]) -> Self {
                bytemuck::cast(components)
            }
        }

        impl From<$ty> for [f32; $n] {
            fn from(value: $ty) -> Self {
                bytemuck::cast(value)
            }
        }
    };
}

pub mod error;
mod matrix3;
mod matrix4;
mod quaternion;
mod transform;
mod vector;

pub use error::{MathError, Result};
pub use matrix3::Matrix3;
pub use matrix4::Matrix4;
pub use quaternion::Quaternion;
pub use transform::Transform;
pub use vector::{Vector2, Vector3, Vector4};

/// Converts degrees to radians.
#[must_use]
pub fn radians(degrees: f32) -> f32 {
    degrees.to_radians()
}

/// Converts radians to degrees.
#[must_use]
pub fn degrees(radians: f32) -> f32 {
    radians.to_degrees()
}
