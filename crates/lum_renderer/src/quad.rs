//! Axis-aligned square in the local z = 0 plane.

use lum_math::{Aabb, Ray, Transform, Vec2, Vec3};

use crate::ShapeHit;

/// A square spanning `[-width, width]` in local x and y, facing local +z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub width: f32,
}

impl Quad {
    pub fn new(width: f32) -> Self {
        Self { width }
    }

    pub fn local_bbox(&self) -> Aabb {
        Aabb::from_points(
            Vec3::new(-self.width, -self.width, 0.0),
            Vec3::new(self.width, self.width, 0.0),
        )
    }

    pub fn intersect(&self, xform: &Transform, ray: &Ray) -> Option<ShapeHit> {
        let local = xform.inverse_ray(ray);

        // parallel to the plane
        if local.direction.z.abs() < 1e-8 {
            return None;
        }

        let t = -local.origin.z / local.direction.z;
        if !local.accepts(t) {
            return None;
        }

        let local_p = local.at(t);
        let w = self.width;
        if local_p.x.abs() > w || local_p.y.abs() > w {
            return None;
        }

        let normal = xform.normal(Vec3::Z);
        Some(ShapeHit {
            t,
            p: xform.point(local_p),
            gn: normal,
            sn: normal,
            uv: Vec2::new((local_p.x + w) / (2.0 * w), (local_p.y + w) / (2.0 * w)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lum_math::Mat4;

    #[test]
    fn test_quad_hit_and_uv() {
        let quad = Quad::new(2.0);
        let ray = Ray::new(Vec3::new(1.0, -1.0, 5.0), Vec3::new(0.0, 0.0, -1.0));

        let hit = quad.intersect(&Transform::IDENTITY, &ray).unwrap();
        assert!((hit.t - 5.0).abs() < 1e-5);
        assert!((hit.p - Vec3::new(1.0, -1.0, 0.0)).length() < 1e-5);
        assert_eq!(hit.gn, Vec3::Z);
        assert!((hit.uv - Vec2::new(0.75, 0.25)).length() < 1e-5);
    }

    #[test]
    fn test_quad_outside_extent_misses() {
        let quad = Quad::new(1.0);
        let ray = Ray::new(Vec3::new(1.5, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(quad.intersect(&Transform::IDENTITY, &ray).is_none());
    }

    #[test]
    fn test_quad_parallel_ray_misses() {
        let quad = Quad::new(1.0);
        let ray = Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::X);
        assert!(quad.intersect(&Transform::IDENTITY, &ray).is_none());
    }

    #[test]
    fn test_quad_respects_window() {
        let quad = Quad::new(1.0);
        let ray = Ray::with_segment(Vec3::new(0.0, 0.0, 5.0), -Vec3::Z, 0.0, 4.0);
        assert!(quad.intersect(&Transform::IDENTITY, &ray).is_none());
    }

    #[test]
    fn test_ground_plane_frame() {
        // local +z maps to world +y, plane at y = -1
        let xform = Transform::new(Mat4::from_cols(
            Vec3::X.extend(0.0),
            Vec3::new(0.0, 0.0, -1.0).extend(0.0),
            Vec3::Y.extend(0.0),
            Vec3::new(0.0, -1.0, 0.0).extend(1.0),
        ));
        let quad = Quad::new(100.0);
        let ray = Ray::new(Vec3::new(0.0, 3.0, 2.0), Vec3::new(0.0, -1.0, 0.0));

        let hit = quad.intersect(&xform, &ray).unwrap();
        assert!((hit.t - 4.0).abs() < 1e-4);
        assert!((hit.gn - Vec3::Y).length() < 1e-5);
        assert!(xform.aabb(&quad.local_bbox()).contains_point(hit.p));
    }
}
