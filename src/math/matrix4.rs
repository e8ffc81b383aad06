use super::{radians, MathError, Matrix3, Quaternion, Result, Vector2, Vector3, Vector4};
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 4×4 transform matrix stored as four [`Vector4`] rows.
///
/// `rows[3]` is the translation row. [`Matrix4::transform`] applies the matrix
/// with `result[i] = Σ_k rows[k][i] * v[k]`, so each stored row acts as a basis
/// column and `a.multiply(&b)` applies `b` first, then `a`. Chaining
/// `translate`, `rotate` and `scale` on [`Matrix4::IDENTITY`] therefore builds
/// `T * R * S`.
///
/// The in-memory layout is 16 consecutive `f32`, row 0 first, which is what
/// the renderer uploads as a uniform block.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
#[serde(from = "Matrix4Rows", into = "Matrix4Rows")]
pub struct Matrix4 {
    pub rows: [Vector4; 4],
}

/// Serialized form: one child node per row, `m0` through `m3`.
#[derive(Clone, Serialize, Deserialize)]
struct Matrix4Rows {
    m0: Vector4,
    m1: Vector4,
    m2: Vector4,
    m3: Vector4,
}

impl From<Matrix4Rows> for Matrix4 {
    fn from(rows: Matrix4Rows) -> Self {
        Self::from_rows([rows.m0, rows.m1, rows.m2, rows.m3])
    }
}

impl From<Matrix4> for Matrix4Rows {
    fn from(matrix: Matrix4) -> Self {
        let [m0, m1, m2, m3] = matrix.rows;
        Self { m0, m1, m2, m3 }
    }
}

impl Matrix4 {
    pub const IDENTITY: Self = Self::from_diagonal(1.0);
    pub const ZERO: Self = Self::from_rows([Vector4::ZERO; 4]);

    #[must_use]
    pub const fn new() -> Self {
        Self::IDENTITY
    }

    #[must_use]
    pub const fn from_diagonal(diagonal: f32) -> Self {
        Self::from_rows([
            Vector4::new(diagonal, 0.0, 0.0, 0.0),
            Vector4::new(0.0, diagonal, 0.0, 0.0),
            Vector4::new(0.0, 0.0, diagonal, 0.0),
            Vector4::new(0.0, 0.0, 0.0, diagonal),
        ])
    }

    #[must_use]
    pub const fn from_rows(rows: [Vector4; 4]) -> Self {
        Self { rows }
    }

    /// Builds a matrix from 16 floats, row 0 first.
    #[must_use]
    pub fn from_array(values: [f32; 16]) -> Self {
        bytemuck::cast(values)
    }

    #[must_use]
    pub fn to_array(&self) -> [f32; 16] {
        bytemuck::cast(*self)
    }

    /// Raw bytes for uniform upload.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
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

    /// Matrix product, `result[row][col] = Σ_k self[k][col] * other[row][k]`.
    #[must_use]
    pub fn multiply(&self, other: &Self) -> Self {
        let mut result = Self::ZERO;
        for row in 0..4 {
            for col in 0..4 {
                result[row][col] = self[0][col] * other[row][0]
                    + self[1][col] * other[row][1]
                    + self[2][col] * other[row][2]
                    + self[3][col] * other[row][3];
            }
        }
        result
    }

    /// `result[row][col] = Σ_k self[k][col] / other[row][k]`.
    ///
    /// This is the engine's historical definition and is not multiplication by
    /// the inverse of `other`. Use [`Matrix4::invert`] for that.
    #[must_use]
    pub fn divide(&self, other: &Self) -> Self {
        let mut result = Self::ZERO;
        for row in 0..4 {
            for col in 0..4 {
                result[row][col] = self[0][col] / other[row][0]
                    + self[1][col] / other[row][1]
                    + self[2][col] / other[row][2]
                    + self[3][col] / other[row][3];
            }
        }
        result
    }

    /// Same operation as [`Matrix4::transform`].
    #[must_use]
    pub fn multiply_vector(&self, v: &Vector4) -> Vector4 {
        self.transform(v)
    }

    #[must_use]
    pub fn transform(&self, v: &Vector4) -> Vector4 {
        let mut result = Vector4::ZERO;
        for i in 0..4 {
            result[i] = self[0][i] * v.x + self[1][i] * v.y + self[2][i] * v.z + self[3][i] * v.w;
        }
        result
    }

    /// Translates in the matrix's current local frame.
    #[must_use]
    pub fn translate(&self, translation: &Vector3) -> Self {
        let mut result = *self;
        for col in 0..4 {
            result[3][col] += self[0][col] * translation.x
                + self[1][col] * translation.y
                + self[2][col] * translation.z;
        }
        result
    }

    #[must_use]
    pub fn translate_2d(&self, translation: &Vector2) -> Self {
        let mut result = *self;
        for col in 0..4 {
            result[3][col] += self[0][col] * translation.x + self[1][col] * translation.y;
        }
        result
    }

    /// Scales rows 0–2 by the matching component of `scale`.
    #[must_use]
    pub fn scale(&self, scale: &Vector3) -> Self {
        let mut result = *self;
        for row in 0..3 {
            result[row] = self[row].scale(scale[row]);
        }
        result
    }

    /// Scales every row, including the translation row.
    #[must_use]
    pub fn scale_4d(&self, scale: &Vector4) -> Self {
        let mut result = *self;
        for row in 0..4 {
            result[row] = self[row].scale(scale[row]);
        }
        result
    }

    /// Rotates by `angle` radians around `axis`. The axis must already be unit
    /// length; it is not validated.
    #[must_use]
    pub fn rotate(&self, angle: f32, axis: &Vector3) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        let o = 1.0 - c;
        let xy = axis.x * axis.y;
        let yz = axis.y * axis.z;
        let xz = axis.x * axis.z;
        let xs = axis.x * s;
        let ys = axis.y * s;
        let zs = axis.z * s;

        let block = Matrix3::from_rows([
            Vector3::new(axis.x * axis.x * o + c, xy * o + zs, xz * o - ys),
            Vector3::new(xy * o - zs, axis.y * axis.y * o + c, yz * o + xs),
            Vector3::new(xz * o + ys, yz * o - xs, axis.z * axis.z * o + c),
        ]);
        self.compose_rotation(&block)
    }

    /// Rotates by a unit quaternion; the quaternion is not normalized here.
    #[must_use]
    pub fn rotate_quaternion(&self, quaternion: &Quaternion) -> Self {
        let Quaternion { x, y, z, w } = *quaternion;
        let (x2, y2, z2) = (x + x, y + y, z + z);
        let (xx2, xy2, xz2) = (x * x2, x * y2, x * z2);
        let (yy2, yz2, zz2) = (y * y2, y * z2, z * z2);
        let (xw2, yw2, zw2) = (w * x2, w * y2, w * z2);

        let block = Matrix3::from_rows([
            Vector3::new(1.0 - yy2 - zz2, xy2 + zw2, xz2 - yw2),
            Vector3::new(xy2 - zw2, 1.0 - xx2 - zz2, yz2 + xw2),
            Vector3::new(xz2 + yw2, yz2 - xw2, 1.0 - xx2 - yy2),
        ]);
        self.compose_rotation(&block)
    }

    fn compose_rotation(&self, block: &Matrix3) -> Self {
        let mut result = *self;
        for row in 0..3 {
            for col in 0..4 {
                result[row][col] = self[0][col] * block[row][0]
                    + self[1][col] * block[row][1]
                    + self[2][col] * block[row][2];
            }
        }
        result
    }

    #[must_use]
    pub fn negate(&self) -> Self {
        Self::from_rows(self.rows.map(|row| row.negate()))
    }

    /// Inverse by the adjugate method: every entry is the signed minor of the
    /// transposed position divided by the determinant.
    ///
    /// # Errors
    /// [`MathError::SingularMatrix`] when the determinant is exactly zero.
    pub fn invert(&self) -> Result<Self> {
        let determinant = self.determinant();
        if determinant == 0.0 {
            return Err(MathError::SingularMatrix { determinant });
        }

        let mut result = Self::ZERO;
        for j in 0..4 {
            for i in 0..4 {
                // Minor of [j][i], not [i][j]: this is where the transpose happens.
                let minor = self.submatrix(j, i).determinant();
                let factor = if (i + j) % 2 == 1 { -1.0 } else { 1.0 };
                result[i][j] = factor * minor / determinant;
            }
        }
        Ok(result)
    }

    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut result = Self::ZERO;
        for row in 0..4 {
            for col in 0..4 {
                result[row][col] = self[col][row];
            }
        }
        result
    }

    /// Cofactor expansion along row 0.
    #[must_use]
    pub fn determinant(&self) -> f32 {
        (0..4)
            .map(|i| {
                let factor = if i % 2 == 1 { -1.0 } else { 1.0 };
                factor * self[0][i] * self.submatrix(0, i).determinant()
            })
            .sum()
    }

    /// The 3×3 matrix left after deleting `row` and `col`.
    fn submatrix(&self, row: usize, col: usize) -> Matrix3 {
        let mut result = Matrix3::ZERO;
        let mut row_count = 0;
        for i in (0..4).filter(|&i| i != row) {
            let mut col_count = 0;
            for j in (0..4).filter(|&j| j != col) {
                result[row_count][col_count] = self[i][j];
                col_count += 1;
            }
            row_count += 1;
        }
        result
    }

    /// Translation, then rotation around X, Y and Z (degrees), then scale.
    #[must_use]
    pub fn transformation_matrix(translation: &Vector3, rotation: &Vector3, scale: &Vector3) -> Self {
        let mut result = Self::IDENTITY;

        if translation.length_squared() != 0.0 {
            result = result.translate(translation);
        }

        if rotation.length_squared() != 0.0 {
            result = result.rotate_euler(rotation);
        }

        if *scale != Vector3::ONE {
            result = result.scale(scale);
        }

        result
    }

    /// Translation, then quaternion rotation, then scale.
    #[must_use]
    pub fn transformation_matrix_quaternion(
        translation: &Vector3,
        rotation: &Quaternion,
        scale: &Vector3,
    ) -> Self {
        let mut result = Self::IDENTITY;

        if translation.length_squared() != 0.0 {
            result = result.translate(translation);
        }

        if !rotation.is_identity() {
            result = result.rotate_quaternion(rotation);
        }

        if *scale != Vector3::ONE {
            result = result.scale(scale);
        }

        result
    }

    /// X, then Y, then Z rotation from Euler angles in degrees.
    #[must_use]
    pub fn rotate_euler(&self, rotation: &Vector3) -> Self {
        self.rotate(radians(rotation.x), &Vector3::RIGHT)
            .rotate(radians(rotation.y), &Vector3::UP)
            .rotate(radians(rotation.z), &Vector3::FRONT)
    }

    /// Right-handed perspective projection with a vertical field of view in
    /// degrees. Y is flipped for the engine's Y-down clip space.
    #[must_use]
    pub fn perspective_matrix(fov: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        let y_scale = 1.0 / radians(fov / 2.0).tan();
        let x_scale = y_scale / aspect_ratio;
        let length = far - near;

        let mut result = Self::ZERO;
        result[0][0] = x_scale;
        result[1][1] = -y_scale;
        result[2][2] = -((far + near) / length);
        result[2][3] = -1.0;
        result[3][2] = -((2.0 * near * far) / length);
        result[3][3] = 0.0;
        result
    }

    #[must_use]
    pub fn orthographic_matrix(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> Self {
        let mut result = Self::ZERO;
        result[0][0] = 2.0 / (right - left);
        result[1][1] = 2.0 / (top - bottom);
        result[2][2] = -2.0 / (far - near);
        result[3][0] = -(right + left) / (right - left);
        result[3][1] = -(top + bottom) / (top - bottom);
        result[3][2] = -(far + near) / (far - near);
        result[3][3] = 1.0;
        result
    }

    /// Inverse camera transform from a position and Euler rotation in degrees:
    /// rotate X, then the negated Y, then Z, then translate by `-position`.
    #[must_use]
    pub fn view_matrix(position: &Vector3, rotation: &Vector3) -> Self {
        let mut result = Self::IDENTITY;

        if rotation.length_squared() != 0.0 {
            result = result
                .rotate(radians(rotation.x), &Vector3::RIGHT)
                .rotate(radians(-rotation.y), &Vector3::UP)
                .rotate(radians(rotation.z), &Vector3::FRONT);
        }

        if position.length_squared() != 0.0 {
            result = result.translate(&position.negate());
        }

        result
    }

    /// [`Matrix4::view_matrix`] with the rotation given as a quaternion. The
    /// quaternion goes through [`Quaternion::to_euler`] and inherits its pole
    /// instability.
    #[must_use]
    pub fn view_matrix_quaternion(position: &Vector3, rotation: &Quaternion) -> Self {
        let euler = if rotation.is_identity() {
            Vector3::ZERO
        } else {
            rotation.to_euler()
        };
        Self::view_matrix(position, &euler)
    }

    /// View matrix looking from `eye` towards `target`.
    ///
    /// The basis (right, true up, backward) is written first and the result is
    /// then multiplied by the translation to `-eye`. Each basis vector fills a
    /// column (`result[i][0] = right[i]`), the transpose of a row-wise basis, so
    /// that [`Matrix4::transform`] maps world points into eye space.
    ///
    /// # Errors
    /// [`MathError::DegenerateDirection`] when `eye == target` or `up` is zero or
    /// parallel to the viewing direction.
    pub fn look_at(eye: &Vector3, target: &Vector3, up: &Vector3) -> Result<Self> {
        let forward = target.subtract(eye).normalize();
        if forward == Vector3::ZERO {
            return Err(MathError::DegenerateDirection("look_at eye and target coincide"));
        }

        let right = forward.cross(&up.normalize()).normalize();
        if right == Vector3::ZERO {
            return Err(MathError::DegenerateDirection(
                "look_at up vector is zero or parallel to the view direction",
            ));
        }
        let true_up = right.cross(&forward);

        let mut result = Self::IDENTITY;
        for i in 0..3 {
            result[i][0] = right[i];
            result[i][1] = true_up[i];
            result[i][2] = -forward[i];
        }

        result *= Self::IDENTITY.translate(&eye.negate());
        Ok(result)
    }

    /// Transforms `world` through `view` and then `projection`, dividing x and y
    /// by the resulting z.
    #[must_use]
    pub fn world_to_screen_space(world: &Vector3, view: &Self, projection: &Self) -> Vector3 {
        let point = Vector4::from_vector3(*world, 1.0);
        let point = projection.transform(&view.transform(&point));

        let mut result = point.xyz();
        result.x /= result.z;
        result.y /= result.z;
        result
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for Matrix4 {
    type Output = Vector4;

    fn index(&self, index: usize) -> &Vector4 {
        &self.rows[index]
    }
}

impl std::ops::IndexMut<usize> for Matrix4 {
    fn index_mut(&mut self, index: usize) -> &mut Vector4 {
        &mut self.rows[index]
    }
}

impl std::ops::Add for Matrix4 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::add(&self, &rhs)
    }
}

impl std::ops::Sub for Matrix4 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.subtract(&rhs)
    }
}

impl std::ops::Mul for Matrix4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl std::ops::Div for Matrix4 {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        self.divide(&rhs)
    }
}

impl std::ops::Mul<f32> for Matrix4 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        self.scale_4d(&Vector4::splat(rhs))
    }
}

impl std::ops::Div<f32> for Matrix4 {
    type Output = Self;

    fn div(self, rhs: f32) -> Self {
        self.scale_4d(&Vector4::splat(1.0 / rhs))
    }
}

impl std::ops::Neg for Matrix4 {
    type Output = Self;

    fn neg(self) -> Self {
        self.negate()
    }
}

impl std::ops::AddAssign for Matrix4 {
    fn add_assign(&mut self, rhs: Self) {
        *self = Self::add(self, &rhs);
    }
}

impl std::ops::SubAssign for Matrix4 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = self.subtract(&rhs);
    }
}

impl std::ops::MulAssign for Matrix4 {
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.multiply(&rhs);
    }
}

impl fmt::Display for Matrix4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Matrix4(")?;
        for (i, value) in self.to_array().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value}")?;
        }
        write!(f, ")")
    }
}

impl_approx_eq!(Matrix4, 16);
