use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Componentwise arithmetic shared by every vector size.
macro_rules! impl_vector_common {
    ($ty:ident, $name:literal, $($field:ident),+) => {
        impl $ty {
            /// All components set to `0`.
            pub const ZERO: Self = Self { $($field: 0.0),+ };
            /// All components set to `1`.
            pub const ONE: Self = Self { $($field: 1.0),+ };

            /// Creates a vector with every component set to `value`.
            #[must_use]
            pub const fn splat(value: f32) -> Self {
                Self { $($field: value),+ }
            }

            #[must_use]
            pub fn add(&self, other: &Self) -> Self {
                Self { $($field: self.$field + other.$field),+ }
            }

            #[must_use]
            pub fn subtract(&self, other: &Self) -> Self {
                Self { $($field: self.$field - other.$field),+ }
            }

            /// Componentwise product.
            #[must_use]
            pub fn multiply(&self, other: &Self) -> Self {
                Self { $($field: self.$field * other.$field),+ }
            }

            /// Componentwise quotient. A zero component in `other` yields `inf` or `NaN`.
            #[must_use]
            pub fn divide(&self, other: &Self) -> Self {
                Self { $($field: self.$field / other.$field),+ }
            }

            #[must_use]
            pub fn scale(&self, factor: f32) -> Self {
                Self { $($field: self.$field * factor),+ }
            }

            #[must_use]
            pub fn negate(&self) -> Self {
                Self { $($field: -self.$field),+ }
            }

            #[must_use]
            pub fn dot(&self, other: &Self) -> f32 {
                0.0 $(+ self.$field * other.$field)+
            }

            #[must_use]
            pub fn length_squared(&self) -> f32 {
                self.dot(self)
            }

            #[must_use]
            pub fn length(&self) -> f32 {
                self.length_squared().sqrt()
            }

            /// Returns the unit vector in the same direction, or [`Self::ZERO`]
            /// when the length is zero so that callers never see `NaN`.
            #[must_use]
            pub fn normalize(&self) -> Self {
                let length = self.length();
                if length == 0.0 {
                    Self::ZERO
                } else {
                    self.scale(1.0 / length)
                }
            }

            #[must_use]
            pub fn distance_squared(&self, other: &Self) -> f32 {
                self.subtract(other).length_squared()
            }

            #[must_use]
            pub fn distance(&self, other: &Self) -> f32 {
                self.subtract(other).length()
            }

            /// Linear interpolation, `t = 0` gives `self` and `t = 1` gives `other`.
            #[must_use]
            pub fn lerp(&self, other: &Self, t: f32) -> Self {
                Self { $($field: self.$field + (other.$field - self.$field) * t),+ }
            }

            #[must_use]
            pub fn min(&self, other: &Self) -> Self {
                Self { $($field: self.$field.min(other.$field)),+ }
            }

            #[must_use]
            pub fn max(&self, other: &Self) -> Self {
                Self { $($field: self.$field.max(other.$field)),+ }
            }

            /// Angle in radians between two vectors, `0` if either is zero length.
            #[must_use]
            pub fn angle(&self, other: &Self) -> f32 {
                let lengths = self.length() * other.length();
                if lengths == 0.0 {
                    return 0.0;
                }
                (self.dot(other) / lengths).clamp(-1.0, 1.0).acos()
            }
        }

        impl std::ops::Add for $ty {
            type Output = Self;

            fn add(self, rhs: Self) -> Self {
                Self::add(&self, &rhs)
            }
        }

        impl std::ops::Sub for $ty {
            type Output = Self;

            fn sub(self, rhs: Self) -> Self {
                self.subtract(&rhs)
            }
        }

        impl std::ops::Mul for $ty {
            type Output = Self;

            fn mul(self, rhs: Self) -> Self {
                self.multiply(&rhs)
            }
        }

        impl std::ops::Div for $ty {
            type Output = Self;

            fn div(self, rhs: Self) -> Self {
                self.divide(&rhs)
            }
        }

        impl std::ops::Mul<f32> for $ty {
            type Output = Self;

            fn mul(self, rhs: f32) -> Self {
                self.scale(rhs)
            }
        }

        impl std::ops::Mul<$ty> for f32 {
            type Output = $ty;

            fn mul(self, rhs: $ty) -> $ty {
                rhs.scale(self)
            }
        }

        impl std::ops::Div<f32> for $ty {
            type Output = Self;

            fn div(self, rhs: f32) -> Self {
                Self { $($field: self.$field / rhs),+ }
            }
        }

        impl std::ops::Neg for $ty {
            type Output = Self;

            fn neg(self) -> Self {
                self.negate()
            }
        }

        impl std::ops::AddAssign for $ty {
            fn add_assign(&mut self, rhs: Self) {
                *self = Self::add(self, &rhs);
            }
        }

        impl std::ops::SubAssign for $ty {
            fn sub_assign(&mut self, rhs: Self) {
                *self = self.subtract(&rhs);
            }
        }

        impl std::ops::MulAssign<f32> for $ty {
            fn mul_assign(&mut self, rhs: f32) {
                *self = self.scale(rhs);
            }
        }

        impl std::ops::DivAssign<f32> for $ty {
            fn div_assign(&mut self, rhs: f32) {
                *self = *self / rhs;
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let components = [$(self.$field),+];
                write!(f, "{}(", $name)?;
                for (i, component) in components.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{component}")?;
                }
                write!(f, ")")
            }
        }
    };
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Four component vector. Points carry `w = 1`, directions `w = 0`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vector4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl_vector_common!(Vector2, "Vector2", x, y);
impl_vector_common!(Vector3, "Vector3", x, y, z);
impl_vector_common!(Vector4, "Vector4", x, y, z, w);

impl_components!(Vector2, 2);
impl_components!(Vector3, 3);
impl_components!(Vector4, 4);

impl_approx_eq!(Vector2, 2);
impl_approx_eq!(Vector3, 3);
impl_approx_eq!(Vector4, 4);

impl Vector2 {
    pub const LEFT: Self = Self::new(-1.0, 0.0);
    pub const RIGHT: Self = Self::new(1.0, 0.0);
    pub const UP: Self = Self::new(0.0, 1.0);
    pub const DOWN: Self = Self::new(0.0, -1.0);

    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Vector3 {
    pub const LEFT: Self = Self::new(-1.0, 0.0, 0.0);
    pub const RIGHT: Self = Self::new(1.0, 0.0, 0.0);
    pub const UP: Self = Self::new(0.0, 1.0, 0.0);
    pub const DOWN: Self = Self::new(0.0, -1.0, 0.0);
    pub const FRONT: Self = Self::new(0.0, 0.0, 1.0);
    pub const BACK: Self = Self::new(0.0, 0.0, -1.0);

    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Right-handed cross product.
    #[must_use]
    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    #[must_use]
    pub const fn xy(&self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }
}

impl Vector4 {
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    #[must_use]
    pub const fn from_vector3(v: Vector3, w: f32) -> Self {
        Self::new(v.x, v.y, v.z, w)
    }

    /// Drops the `w` component.
    #[must_use]
    pub const fn xyz(&self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }
}

impl From<Vector2> for Vector3 {
    fn from(v: Vector2) -> Self {
        Self::new(v.x, v.y, 0.0)
    }
}

impl From<Vector4> for Vector3 {
    fn from(v: Vector4) -> Self {
        v.xyz()
    }
}

impl From<Vector3> for Vector4 {
    /// Treats `v` as a point (`w = 1`).
    fn from(v: Vector3) -> Self {
        Self::from_vector3(v, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_componentwise_arithmetic() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(4.0, 5.0, 6.0);

        assert_eq!(a.add(&b), Vector3::new(5.0, 7.0, 9.0));
        assert_eq!(b.subtract(&a), Vector3::new(3.0, 3.0, 3.0));
        assert_eq!(a.multiply(&b), Vector3::new(4.0, 10.0, 18.0));
        assert_eq!(b.divide(&a), Vector3::new(4.0, 2.5, 2.0));
        assert_eq!(a + b, a.add(&b));
        assert_eq!(-a, Vector3::new(-1.0, -2.0, -3.0));
        assert_eq!(2.0 * a, a * 2.0);
    }

    #[test]
    fn test_divide_by_zero_is_not_an_error() {
        let v = Vector2::new(1.0, 0.0).divide(&Vector2::ZERO);
        assert!(v.x.is_infinite());
        assert!(v.y.is_nan());
    }

    #[test]
    fn test_dot_and_cross() {
        assert_eq!(Vector3::RIGHT.dot(&Vector3::UP), 0.0);
        assert_eq!(Vector3::RIGHT.cross(&Vector3::UP), Vector3::FRONT);
        assert_eq!(Vector3::UP.cross(&Vector3::RIGHT), Vector3::BACK);
        assert_eq!(Vector4::new(1.0, 2.0, 3.0, 4.0).dot(&Vector4::ONE), 10.0);
    }

    #[test]
    fn test_length_and_normalize() {
        let v = Vector3::new(3.0, 0.0, 4.0);
        assert_eq!(v.length_squared(), 25.0);
        assert_eq!(v.length(), 5.0);
        assert_abs_diff_eq!(v.normalize(), Vector3::new(0.6, 0.0, 0.8), epsilon = 1e-6);
    }

    #[test]
    fn test_normalize_zero_returns_zero() {
        assert_eq!(Vector2::ZERO.normalize(), Vector2::ZERO);
        assert_eq!(Vector3::ZERO.normalize(), Vector3::ZERO);
        assert_eq!(Vector4::ZERO.normalize(), Vector4::ZERO);
    }

    #[test]
    fn test_indexing() {
        let mut v = Vector4::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(v[0], 1.0);
        assert_eq!(v[3], 4.0);
        v[2] = 7.0;
        assert_eq!(v.z, 7.0);
        assert_eq!(v.get(4), None);
        assert_eq!(Vector2::new(5.0, 6.0).get(1), Some(6.0));
    }

    #[test]
    #[should_panic]
    fn test_index_out_of_range_panics() {
        let v = Vector3::ZERO;
        let _ = v[3];
    }

    #[test]
    fn test_conversions() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(Vector4::from(v), Vector4::new(1.0, 2.0, 3.0, 1.0));
        assert_eq!(Vector3::from(Vector4::new(1.0, 2.0, 3.0, 9.0)), v);
        assert_eq!(Vector3::from(Vector2::new(1.0, 2.0)), Vector3::new(1.0, 2.0, 0.0));
        assert_eq!(<[f32; 3]>::from(v), [1.0, 2.0, 3.0]);
        assert_eq!(Vector3::from([1.0, 2.0, 3.0]), v);
    }

    #[test]
    fn test_angle_lerp_distance() {
        assert_abs_diff_eq!(
            Vector3::RIGHT.angle(&Vector3::UP),
            std::f32::consts::FRAC_PI_2,
            epsilon = 1e-6
        );
        assert_eq!(Vector3::ZERO.angle(&Vector3::UP), 0.0);
        assert_eq!(
            Vector2::ZERO.lerp(&Vector2::new(2.0, 4.0), 0.5),
            Vector2::new(1.0, 2.0)
        );
        assert_eq!(Vector3::ZERO.distance(&Vector3::new(0.0, 3.0, 4.0)), 5.0);
    }

    #[test]
    fn test_exact_equality() {
        let a = Vector3::new(0.1, 0.2, 0.3);
        let b = Vector3::new(0.1, 0.2, 0.3 + 1e-6);
        assert_ne!(a, b);
        assert_abs_diff_eq!(a, b, epsilon = 1e-5);
    }

    #[test]
    fn test_display() {
        assert_eq!(Vector3::new(1.0, 2.5, -3.0).to_string(), "Vector3(1, 2.5, -3)");
    }
}
