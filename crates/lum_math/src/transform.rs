// Affine transforms for surfaces, lights and cameras.
//
// A Transform carries its matrix together with the inverse so rays can be
// moved into a surface's local frame without inverting per query.

use std::ops::Mul;

use glam::{Mat3, Mat4, Vec3};

use crate::{Aabb, Ray};

/// Extension trait for Mat4 to provide additional transform utilities
pub trait Mat4Ext {
    /// Transform an axis-aligned bounding box.
    /// Computes the bounding box of all 8 transformed corners.
    fn transform_aabb(&self, aabb: &Aabb) -> Aabb;
}

impl Mat4Ext for Mat4 {
    fn transform_aabb(&self, aabb: &Aabb) -> Aabb {
        if aabb.is_empty() {
            return Aabb::EMPTY;
        }

        let (lo, hi) = (aabb.min(), aabb.max());
        let corners = (0..8).map(|i| {
            let corner = Vec3::new(
                if i & 1 == 0 { lo.x } else { hi.x },
                if i & 2 == 0 { lo.y } else { hi.y },
                if i & 4 == 0 { lo.z } else { hi.z },
            );
            self.transform_point3(corner)
        });

        Aabb::enclosing(corners)
    }
}

/// A local-to-world affine transform and its inverse.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    matrix: Mat4,
    inverse: Mat4,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        matrix: Mat4::IDENTITY,
        inverse: Mat4::IDENTITY,
    };

    /// Wrap a matrix, computing its inverse.
    ///
    /// The matrix must be invertible; callers building transforms from user
    /// input check the determinant first.
    pub fn new(matrix: Mat4) -> Self {
        Self {
            matrix,
            inverse: matrix.inverse(),
        }
    }

    pub fn from_translation(offset: Vec3) -> Self {
        Self {
            matrix: Mat4::from_translation(offset),
            inverse: Mat4::from_translation(-offset),
        }
    }

    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    pub fn inverse_matrix(&self) -> Mat4 {
        self.inverse
    }

    /// The world-to-local transform.
    pub fn inverse(&self) -> Transform {
        Transform {
            matrix: self.inverse,
            inverse: self.matrix,
        }
    }

    #[inline]
    pub fn point(&self, p: Vec3) -> Vec3 {
        self.matrix.transform_point3(p)
    }

    /// Transform a direction (no translation).
    #[inline]
    pub fn vector(&self, v: Vec3) -> Vec3 {
        self.matrix.transform_vector3(v)
    }

    /// Transform a surface normal by the inverse-transpose and renormalize.
    #[inline]
    pub fn normal(&self, n: Vec3) -> Vec3 {
        let normal_matrix = Mat3::from_mat4(self.inverse).transpose();
        (normal_matrix * n).normalize()
    }

    /// Transform a ray. The direction keeps its transformed length so the
    /// parameter window `[mint, maxt]` means the same points in both frames.
    #[inline]
    pub fn ray(&self, r: &Ray) -> Ray {
        Ray {
            origin: self.point(r.origin),
            direction: self.vector(r.direction),
            ..*r
        }
    }

    /// Move a world-space ray into this transform's local frame.
    #[inline]
    pub fn inverse_ray(&self, r: &Ray) -> Ray {
        Ray {
            origin: self.inverse.transform_point3(r.origin),
            direction: self.inverse.transform_vector3(r.direction),
            ..*r
        }
    }

    /// Conservative world box of a local box.
    pub fn aabb(&self, b: &Aabb) -> Aabb {
        self.matrix.transform_aabb(b)
    }
}

impl Mul for Transform {
    type Output = Transform;

    /// `a * b` applies `b` first, then `a`.
    fn mul(self, rhs: Transform) -> Transform {
        Transform {
            matrix: self.matrix * rhs.matrix,
            inverse: rhs.inverse * self.inverse,
        }
    }
}

impl From<Mat4> for Transform {
    fn from(matrix: Mat4) -> Self {
        Transform::new(matrix)
    }
}
