//! 3x3 and 4x4 row-major matrices with row-vector semantics

use std::ops::{Add, Mul};

use super::vector::{Vec3, Vec4};

/// A 3x3 row-major matrix.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Mat3 {
    pub rows: [Vec3; 3],
}

/// A 4x4 row-major matrix.
///
/// Vectors apply on the left: `v' = v · M` via [`Mat4::mul_vec4`].
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Mat4 {
    pub rows: [Vec4; 4],
}

impl Mat3 {
    pub const IDENTITY: Mat3 = Mat3 {
        rows: [
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        ],
    };

    #[inline]
    pub const fn from_rows(r0: Vec3, r1: Vec3, r2: Vec3) -> Mat3 {
        Mat3 { rows: [r0, r1, r2] }
    }

    #[inline]
    pub fn row(&self, i: usize) -> Vec3 {
        self.rows[i]
    }

    #[inline]
    pub fn column(&self, j: usize) -> Vec3 {
        match j {
            0 => Vec3::new(self.rows[0].x, self.rows[1].x, self.rows[2].x),
            1 => Vec3::new(self.rows[0].y, self.rows[1].y, self.rows[2].y),
            _ => Vec3::new(self.rows[0].z, self.rows[1].z, self.rows[2].z),
        }
    }

    pub fn transpose(&self) -> Mat3 {
        Mat3::from_rows(self.column(0), self.column(1), self.column(2))
    }

    pub fn determinant(&self) -> f32 {
        let [r0, r1, r2] = self.rows;
        r0.x * (r1.y * r2.z - r1.z * r2.y) - r0.y * (r1.x * r2.z - r1.z * r2.x)
            + r0.z * (r1.x * r2.y - r1.y * r2.x)
    }

    /// Transpose of the cofactor matrix.
    pub fn adjugate(&self) -> Mat3 {
        let [r0, r1, r2] = self.rows;
        Mat3::from_rows(
            Vec3::new(
                r1.y * r2.z - r1.z * r2.y,
                -(r0.y * r2.z - r0.z * r2.y),
                r0.y * r1.z - r0.z * r1.y,
            ),
            Vec3::new(
                -(r1.x * r2.z - r1.z * r2.x),
                r0.x * r2.z - r0.z * r2.x,
                -(r0.x * r1.z - r0.z * r1.x),
            ),
            Vec3::new(
                r1.x * r2.y - r1.y * r2.x,
                -(r0.x * r2.y - r0.y * r2.x),
                r0.x * r1.y - r0.y * r1.x,
            ),
        )
    }

    /// Inverse via adjugate over determinant. Undefined for singular
    /// matrices; callers check the determinant where singularity is a
    /// reachable state.
    pub fn inverse(&self) -> Mat3 {
        (1.0 / self.determinant()) * self.adjugate()
    }

    /// Row-vector application `v · M`.
    #[inline]
    pub fn mul_vec3(&self, v: Vec3) -> Vec3 {
        Vec3::new(v.dot(self.column(0)), v.dot(self.column(1)), v.dot(self.column(2)))
    }

    pub fn multiply(&self, rhs: &Mat3) -> Mat3 {
        Mat3::from_rows(
            rhs.mul_vec3(self.rows[0]),
            rhs.mul_vec3(self.rows[1]),
            rhs.mul_vec3(self.rows[2]),
        )
    }
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        rows: [
            Vec4::new(1.0, 0.0, 0.0, 0.0),
            Vec4::new(0.0, 1.0, 0.0, 0.0),
            Vec4::new(0.0, 0.0, 1.0, 0.0),
            Vec4::new(0.0, 0.0, 0.0, 1.0),
        ],
    };

    #[inline]
    pub const fn from_rows(r0: Vec4, r1: Vec4, r2: Vec4, r3: Vec4) -> Mat4 {
        Mat4 { rows: [r0, r1, r2, r3] }
    }

    #[inline]
    pub fn row(&self, i: usize) -> Vec4 {
        self.rows[i]
    }

    #[inline]
    pub fn column(&self, j: usize) -> Vec4 {
        match j {
            0 => Vec4::new(self.rows[0].x, self.rows[1].x, self.rows[2].x, self.rows[3].x),
            1 => Vec4::new(self.rows[0].y, self.rows[1].y, self.rows[2].y, self.rows[3].y),
            2 => Vec4::new(self.rows[0].z, self.rows[1].z, self.rows[2].z, self.rows[3].z),
            _ => Vec4::new(self.rows[0].w, self.rows[1].w, self.rows[2].w, self.rows[3].w),
        }
    }

    /// The upper-left 3x3 block.
    pub fn mat3(&self) -> Mat3 {
        Mat3::from_rows(self.rows[0].xyz(), self.rows[1].xyz(), self.rows[2].xyz())
    }

    pub fn transpose(&self) -> Mat4 {
        Mat4::from_rows(self.column(0), self.column(1), self.column(2), self.column(3))
    }

    /// The 3x3 matrix left after erasing row `i` and column `j`.
    pub fn minor(&self, i: usize, j: usize) -> Mat3 {
        let mut rows = [Vec3::ZERO; 3];
        let mut out = 0;
        for r in 0..4 {
            if r == i {
                continue;
            }
            let row = self.rows[r];
            let full = [row.x, row.y, row.z, row.w];
            let mut v = [0.0f32; 3];
            let mut c = 0;
            for (k, value) in full.iter().enumerate() {
                if k == j {
                    continue;
                }
                v[c] = *value;
                c += 1;
            }
            rows[out] = Vec3::new(v[0], v[1], v[2]);
            out += 1;
        }
        Mat3 { rows }
    }

    /// Cofactor `(-1)^(i+j) · det(minor(i, j))`.
    #[inline]
    fn cofactor(&self, i: usize, j: usize) -> f32 {
        let sign = if (i + j) % 2 == 0 { 1.0 } else { -1.0 };
        sign * self.minor(i, j).determinant()
    }

    pub fn determinant(&self) -> f32 {
        let r0 = self.rows[0];
        r0.x * self.cofactor(0, 0) + r0.y * self.cofactor(0, 1) + r0.z * self.cofactor(0, 2)
            + r0.w * self.cofactor(0, 3)
    }

    /// Transpose of the cofactor matrix.
    pub fn adjugate(&self) -> Mat4 {
        Mat4::from_rows(
            Vec4::new(self.cofactor(0, 0), self.cofactor(1, 0), self.cofactor(2, 0), self.cofactor(3, 0)),
            Vec4::new(self.cofactor(0, 1), self.cofactor(1, 1), self.cofactor(2, 1), self.cofactor(3, 1)),
            Vec4::new(self.cofactor(0, 2), self.cofactor(1, 2), self.cofactor(2, 2), self.cofactor(3, 2)),
            Vec4::new(self.cofactor(0, 3), self.cofactor(1, 3), self.cofactor(2, 3), self.cofactor(3, 3)),
        )
    }

    /// Inverse via adjugate over determinant. Undefined for singular
    /// matrices.
    pub fn inverse(&self) -> Mat4 {
        (1.0 / self.determinant()) * self.adjugate()
    }

    /// Row-vector application `v · M`.
    #[inline]
    pub fn mul_vec4(&self, v: Vec4) -> Vec4 {
        Vec4::new(
            v.dot(self.column(0)),
            v.dot(self.column(1)),
            v.dot(self.column(2)),
            v.dot(self.column(3)),
        )
    }

    /// `self · rhs`, so that `v · self.multiply(&rhs) = (v · self) · rhs`.
    pub fn multiply(&self, rhs: &Mat4) -> Mat4 {
        Mat4::from_rows(
            rhs.mul_vec4(self.rows[0]),
            rhs.mul_vec4(self.rows[1]),
            rhs.mul_vec4(self.rows[2]),
            rhs.mul_vec4(self.rows[3]),
        )
    }
}

impl Add for Mat3 {
    type Output = Mat3;
    fn add(self, rhs: Mat3) -> Mat3 {
        Mat3::from_rows(
            self.rows[0] + rhs.rows[0],
            self.rows[1] + rhs.rows[1],
            self.rows[2] + rhs.rows[2],
        )
    }
}

impl Add for Mat4 {
    type Output = Mat4;
    fn add(self, rhs: Mat4) -> Mat4 {
        Mat4::from_rows(
            self.rows[0] + rhs.rows[0],
            self.rows[1] + rhs.rows[1],
            self.rows[2] + rhs.rows[2],
            self.rows[3] + rhs.rows[3],
        )
    }
}

impl Mul<Mat3> for f32 {
    type Output = Mat3;
    fn mul(self, m: Mat3) -> Mat3 {
        Mat3::from_rows(self * m.rows[0], self * m.rows[1], self * m.rows[2])
    }
}

impl Mul<Mat4> for f32 {
    type Output = Mat4;
    fn mul(self, m: Mat4) -> Mat4 {
        Mat4::from_rows(self * m.rows[0], self * m.rows[1], self * m.rows[2], self * m.rows[3])
    }
}
