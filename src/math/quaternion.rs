use super::{degrees, radians, MathError, Matrix4, Result, Vector3};
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rotation stored as `(x, y, z, w)` with `w` the scalar part.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quaternion {
    /// The identity rotation.
    pub const W_ONE: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Rotation of `angle` radians around `axis`. The axis is normalized here.
    ///
    /// # Errors
    /// [`MathError::DegenerateDirection`] when `axis` has zero length.
    pub fn from_axis_angle(axis: &Vector3, angle: f32) -> Result<Self> {
        let axis = axis.normalize();
        if axis == Vector3::ZERO {
            return Err(MathError::DegenerateDirection("rotation axis has zero length"));
        }

        let (sin, cos) = (angle / 2.0).sin_cos();
        Ok(Self::new(axis.x * sin, axis.y * sin, axis.z * sin, cos))
    }

    /// Builds the rotation that [`Matrix4::rotate_euler`] produces for the same
    /// angles: X, then Y, then Z, in degrees.
    #[must_use]
    pub fn from_euler(rotation: &Vector3) -> Self {
        let (sx, cx) = (radians(rotation.x) / 2.0).sin_cos();
        let (sy, cy) = (radians(rotation.y) / 2.0).sin_cos();
        let (sz, cz) = (radians(rotation.z) / 2.0).sin_cos();

        let qx = Self::new(sx, 0.0, 0.0, cx);
        let qy = Self::new(0.0, sy, 0.0, cy);
        let qz = Self::new(0.0, 0.0, sz, cz);
        qx.multiply(&qy).multiply(&qz)
    }

    /// Euler angles in degrees, inverse of [`Quaternion::from_euler`].
    ///
    /// Lossy: as the Y angle approaches ±90° the X and Z angles collapse into
    /// one degree of freedom and the returned split between them is unstable.
    /// The Y term is clamped so rounding never produces `NaN`.
    #[must_use]
    pub fn to_euler(&self) -> Vector3 {
        let Self { x, y, z, w } = *self;

        let pitch = (2.0 * (x * w - y * z)).atan2(1.0 - 2.0 * (x * x + y * y));
        let yaw = (2.0 * (x * z + y * w)).clamp(-1.0, 1.0).asin();
        let roll = (2.0 * (z * w - x * y)).atan2(1.0 - 2.0 * (y * y + z * z));

        Vector3::new(degrees(pitch), degrees(yaw), degrees(roll))
    }

    /// Hamilton product. The result rotates by `other` first, then by `self`.
    #[must_use]
    pub fn multiply(&self, other: &Self) -> Self {
        Self::new(
            self.w * other.x + self.x * other.w + self.y * other.z - self.z * other.y,
            self.w * other.y - self.x * other.z + self.y * other.w + self.z * other.x,
            self.w * other.z + self.x * other.y - self.y * other.x + self.z * other.w,
            self.w * other.w - self.x * other.x - self.y * other.y - self.z * other.z,
        )
    }

    #[must_use]
    pub fn conjugate(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    #[must_use]
    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    #[must_use]
    pub fn length_squared(&self) -> f32 {
        self.dot(self)
    }

    #[must_use]
    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Unit quaternion, or [`Quaternion::W_ONE`] for a zero quaternion.
    #[must_use]
    pub fn normalize(&self) -> Self {
        let length = self.length();
        if length == 0.0 {
            return Self::W_ONE;
        }
        let inverse = 1.0 / length;
        Self::new(
            self.x * inverse,
            self.y * inverse,
            self.z * inverse,
            self.w * inverse,
        )
    }

    /// Spherical interpolation along the shortest arc.
    #[must_use]
    pub fn slerp(&self, other: &Self, t: f32) -> Self {
        let mut cos_theta = self.dot(other);
        let mut end = *other;
        if cos_theta < 0.0 {
            cos_theta = -cos_theta;
            end = Self::new(-end.x, -end.y, -end.z, -end.w);
        }

        let (a, b) = if cos_theta > 0.9995 {
            (1.0 - t, t)
        } else {
            let theta = cos_theta.acos();
            let sin_theta = theta.sin();
            (
                ((1.0 - t) * theta).sin() / sin_theta,
                (t * theta).sin() / sin_theta,
            )
        };

        Self::new(
            self.x * a + end.x * b,
            self.y * a + end.y * b,
            self.z * a + end.z * b,
            self.w * a + end.w * b,
        )
        .normalize()
    }

    /// Rotates `v` by this unit quaternion.
    #[must_use]
    pub fn rotate_vector(&self, v: &Vector3) -> Vector3 {
        let axis = Vector3::new(self.x, self.y, self.z);
        let t = axis.cross(v).scale(2.0);
        v.add(&t.scale(self.w)).add(&axis.cross(&t))
    }

    #[must_use]
    pub fn to_matrix(&self) -> Matrix4 {
        Matrix4::IDENTITY.rotate_quaternion(self)
    }

    /// Exact comparison against [`Quaternion::W_ONE`].
    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::W_ONE
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::W_ONE
    }
}

impl std::ops::Mul for Quaternion {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl std::ops::MulAssign for Quaternion {
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.multiply(&rhs);
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Quaternion({}, {}, {}, {})", self.x, self.y, self.z, self.w)
    }
}

impl_components!(Quaternion, 4);
impl_approx_eq!(Quaternion, 4);

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_identity() {
        assert!(Quaternion::default().is_identity());
        assert!(!Quaternion::new(0.0, 0.0, 0.0, -1.0).is_identity());
        assert_eq!(Quaternion::W_ONE.to_euler(), Vector3::ZERO);
        assert_eq!(Quaternion::W_ONE.to_matrix(), Matrix4::IDENTITY);
    }

    #[test]
    fn test_from_axis_angle() -> Result<()> {
        let q = Quaternion::from_axis_angle(&Vector3::new(0.0, 0.0, 2.0), FRAC_PI_2)?;
        assert_abs_diff_eq!(q.length(), 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(
            q.rotate_vector(&Vector3::RIGHT),
            Vector3::UP,
            epsilon = 1e-6
        );
        Ok(())
    }

    #[test]
    fn test_from_axis_angle_zero_axis() {
        assert_eq!(
            Quaternion::from_axis_angle(&Vector3::ZERO, 1.0),
            Err(MathError::DegenerateDirection("rotation axis has zero length"))
        );
    }

    #[test]
    fn test_euler_round_trip() {
        let angles = Vector3::new(25.0, -40.0, 70.0);
        let back = Quaternion::from_euler(&angles).to_euler();
        assert_abs_diff_eq!(back, angles, epsilon = 1e-3);
    }

    #[test]
    fn test_from_euler_matches_matrix_rotation() {
        let angles = Vector3::new(10.0, 20.0, 30.0);
        let q = Quaternion::from_euler(&angles);
        assert_abs_diff_eq!(
            q.to_matrix(),
            Matrix4::IDENTITY.rotate_euler(&angles),
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_to_euler_at_pole_stays_finite() {
        let q = Quaternion::from_euler(&Vector3::new(30.0, 90.0, 45.0));
        let euler = q.to_euler();

        // X and Z collapse into one angle at the pole; only Y is recoverable.
        assert!(euler.x.is_finite());
        assert!(euler.z.is_finite());
        assert_abs_diff_eq!(euler.y, 90.0, epsilon = 0.1);
    }

    #[test]
    fn test_multiply_composes_rotations() -> Result<()> {
        let a = Quaternion::from_axis_angle(&Vector3::UP, 0.3)?;
        let b = Quaternion::from_axis_angle(&Vector3::UP, 0.5)?;
        let c = Quaternion::from_axis_angle(&Vector3::UP, 0.8)?;
        assert_abs_diff_eq!(a * b, c, epsilon = 1e-6);

        let q = Quaternion::from_axis_angle(&Vector3::RIGHT, 1.1)?;
        assert_abs_diff_eq!(q.multiply(&q.conjugate()), Quaternion::W_ONE, epsilon = 1e-6);
        Ok(())
    }

    #[test]
    fn test_normalize() {
        assert_eq!(Quaternion::ZERO.normalize(), Quaternion::W_ONE);
        let q = Quaternion::new(0.0, 0.0, 3.0, 4.0).normalize();
        assert_abs_diff_eq!(q, Quaternion::new(0.0, 0.0, 0.6, 0.8), epsilon = 1e-6);
    }

    #[test]
    fn test_slerp_endpoints_and_midpoint() -> Result<()> {
        let start = Quaternion::W_ONE;
        let end = Quaternion::from_axis_angle(&Vector3::FRONT, FRAC_PI_2)?;
        let half = Quaternion::from_axis_angle(&Vector3::FRONT, FRAC_PI_2 / 2.0)?;

        assert_abs_diff_eq!(start.slerp(&end, 0.0), start, epsilon = 1e-6);
        assert_abs_diff_eq!(start.slerp(&end, 1.0), end, epsilon = 1e-6);
        assert_abs_diff_eq!(start.slerp(&end, 0.5), half, epsilon = 1e-6);
        Ok(())
    }

    #[test]
    fn test_rotate_vector_matches_matrix() -> Result<()> {
        let q = Quaternion::from_axis_angle(&Vector3::new(1.0, 1.0, 0.0), 0.9)?;
        let v = Vector3::new(0.3, -2.0, 1.5);
        let via_matrix = q.to_matrix().transform(&v.into());
        assert_abs_diff_eq!(q.rotate_vector(&v), via_matrix.xyz(), epsilon = 1e-5);
        Ok(())
    }

    #[test]
    fn test_indexing() {
        let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(q[3], 4.0);
        assert_eq!(q.get(4), None);
    }
}
