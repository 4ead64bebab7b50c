//! Sphere primitive.

use std::f32::consts::PI;

use lum_math::{Aabb, Ray, Transform, Vec2, Vec3};

use crate::ShapeHit;

/// A sphere of `radius` centered at the origin of its local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub radius: f32,
}

impl Sphere {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }

    pub fn local_bbox(&self) -> Aabb {
        Aabb::from_points(Vec3::splat(-self.radius), Vec3::splat(self.radius))
    }

    /// Intersect a world-space ray with the sphere placed by `xform`.
    ///
    /// Takes the nearer root inside `[mint, maxt]`, or the farther one when
    /// the nearer lies before `mint`.
    pub fn intersect(&self, xform: &Transform, ray: &Ray) -> Option<ShapeHit> {
        let local = xform.inverse_ray(ray);
        let (o, d) = (local.origin, local.direction);

        let a = d.dot(d);
        let b = 2.0 * o.dot(d);
        let c = o.dot(o) - self.radius * self.radius;
        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 || a == 0.0 {
            return None;
        }

        let sqrt_d = discriminant.sqrt();
        let near = (-b - sqrt_d) / (2.0 * a);
        let far = (-b + sqrt_d) / (2.0 * a);
        let t = if local.accepts(near) {
            near
        } else if local.accepts(far) {
            far
        } else {
            return None;
        };

        let local_p = local.at(t);
        let normal = xform.normal(local_p);
        let (u, v) = get_sphere_uv(local_p / self.radius);
        Some(ShapeHit {
            t,
            p: xform.point(local_p),
            gn: normal,
            sn: normal,
            uv: Vec2::new(u, v),
        })
    }
}

/// Spherical coordinates of a point on the unit sphere, mapped to [0, 1]^2.
fn get_sphere_uv(p: Vec3) -> (f32, f32) {
    // theta: angle down from +Y
    // phi: angle around Y axis from +X
    let theta = (-p.y).clamp(-1.0, 1.0).acos();
    let phi = (-p.z).atan2(p.x) + PI;

    (phi / (2.0 * PI), theta / PI)
}
