use super::{Matrix4, Quaternion, Vector3};
use serde::{Deserialize, Serialize};

/// Position, rotation and scale of an object, composed as `T * R * S`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vector3,
    pub rotation: Quaternion,
    pub scale: Vector3,
}

impl Transform {
    #[must_use]
    pub const fn new(position: Vector3, rotation: Quaternion, scale: Vector3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Rotation given as Euler angles in degrees, applied X, then Y, then Z.
    #[must_use]
    pub fn from_euler(position: Vector3, rotation: Vector3, scale: Vector3) -> Self {
        Self::new(position, Quaternion::from_euler(&rotation), scale)
    }

    #[must_use]
    pub const fn identity() -> Self {
        Self::new(Vector3::ZERO, Quaternion::W_ONE, Vector3::ONE)
    }

    #[must_use]
    pub fn to_matrix(&self) -> Matrix4 {
        Matrix4::transformation_matrix_quaternion(&self.position, &self.rotation, &self.scale)
    }

    /// World matrix of this transform under a parent's world matrix.
    #[must_use]
    pub fn world_matrix(&self, parent: &Matrix4) -> Matrix4 {
        parent.multiply(&self.to_matrix())
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
