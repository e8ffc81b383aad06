use super::Vector3;
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 3×3 matrix stored as three rows.
///
/// Mostly used as the rotation block that [`super::Matrix4::rotate`] layers onto
/// the upper-left corner of a 4×4 transform, and as the minor of a 4×4 entry.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
#[serde(from = "Matrix3Rows", into = "Matrix3Rows")]
pub struct Matrix3 {
    pub rows: [Vector3; 3],
}

/// Serialized form: one child node per row.
#[derive(Clone, Serialize, Deserialize)]
struct Matrix3Rows {
    m0: Vector3,
    m1: Vector3,
    m2: Vector3,
}

impl From<Matrix3Rows> for Matrix3 {
    fn from(rows: Matrix3Rows) -> Self {
        Self::from_rows([rows.m0, rows.m1, rows.m2])
    }
}

impl From<Matrix3> for Matrix3Rows {
    fn from(matrix: Matrix3) -> Self {
        let [m0, m1, m2] = matrix.rows;
        Self { m0, m1, m2 }
    }
}

impl Matrix3 {
    pub const IDENTITY: Self = Self::from_rows([
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0),
        Vector3::new(0.0, 0.0, 1.0),
    ]);

    pub const ZERO: Self = Self::from_rows([Vector3::ZERO; 3]);

    /// Identity matrix, the starting point for building a rotation block.
    #[must_use]
    pub const fn new() -> Self {
        Self::IDENTITY
    }

    #[must_use]
    pub const fn from_rows(rows: [Vector3; 3]) -> Self {
        Self { rows }
    }

    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        Self::from_rows(std::array::from_fn(|row| self.rows[row].add(&other.rows[row])))
    }

    #[must_use]
    pub fn subtract(&self, other: &Self) -> Self {
        Self::from_rows(std::array::from_fn(|row| {
            self.rows[row].subtract(&other.rows[row])
        }))
    }

    #[must_use]
    pub fn scale(&self, factor: f32) -> Self {
        Self::from_rows(self.rows.map(|row| row.scale(factor)))
    }

    #[must_use]
    pub fn negate(&self) -> Self {
        Self::from_rows(self.rows.map(|row| row.negate()))
    }

    /// Same index convention as `Matrix4::multiply`:
    /// `result[row][col] = Σ_k self[k][col] * other[row][k]`.
    #[must_use]
    pub fn multiply(&self, other: &Self) -> Self {
        let mut result = Self::ZERO;
        for row in 0..3 {
            for col in 0..3 {
                result[row][col] = (0..3).map(|k| self[k][col] * other[row][k]).sum();
            }
        }
        result
    }

    #[must_use]
    pub fn transform(&self, v: &Vector3) -> Vector3 {
        let mut result = Vector3::ZERO;
        for i in 0..3 {
            result[i] = self[0][i] * v.x + self[1][i] * v.y + self[2][i] * v.z;
        }
        result
    }

    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut result = Self::ZERO;
        for row in 0..3 {
            for col in 0..3 {
                result[row][col] = self[col][row];
            }
        }
        result
    }

    /// Cofactor expansion along the first row.
    #[must_use]
    pub fn determinant(&self) -> f32 {
        let [r0, r1, r2] = &self.rows;
        r0.x * (r1.y * r2.z - r1.z * r2.y) - r0.y * (r1.x * r2.z - r1.z * r2.x)
            + r0.z * (r1.x * r2.y - r1.y * r2.x)
    }
}

impl Default for Matrix3 {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for Matrix3 {
    type Output = Vector3;

    fn index(&self, index: usize) -> &Vector3 {
        &self.rows[index]
    }
}

impl std::ops::IndexMut<usize> for Matrix3 {
    fn index_mut(&mut self, index: usize) -> &mut Vector3 {
        &mut self.rows[index]
    }
}

impl std::ops::Mul for Matrix3 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl fmt::Display for Matrix3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r0, r1, r2] = &self.rows;
        write!(
            f,
            "Matrix3({}, {}, {}, {}, {}, {}, {}, {}, {})",
            r0.x, r0.y, r0.z, r1.x, r1.y, r1.z, r2.x, r2.y, r2.z
        )
    }
}

impl_approx_eq!(Matrix3, 9);
