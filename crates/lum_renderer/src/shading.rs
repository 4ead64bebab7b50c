//! Whitted shading: direct Blinn-Phong lighting with hard shadows, plus
//! recursive mirror reflection and refraction.

use lum_core::Color;
use lum_math::{Ray, Vec3};

use crate::{Intersection, RayStats, Scene};

/// Secondary rays are only spawned from rays shallower than this.
pub const MAX_DEPTH: u32 = 5;

/// Offset keeping shadow rays off both the shaded surface and the light.
const SHADOW_EPSILON: f32 = 5e-5;

/// Mirror `d` about the shading normal `n`.
#[inline]
pub fn reflect(d: Vec3, n: Vec3) -> Vec3 {
    (2.0 * n * n.dot(-d) + d).normalize()
}

/// Refract the unit direction `d` through a surface with shading normal `n`
/// and index of refraction `ior`.
///
/// A ray travelling along `n` is leaving the medium. Returns `None` on total
/// internal reflection.
pub fn refract(d: Vec3, n: Vec3, ior: f32) -> Option<Vec3> {
    let (ratio, normal) = if d.dot(n) > 0.0 {
        (ior, -n)
    } else {
        (1.0 / ior, n)
    };

    let cos_i = -d.dot(normal);
    let disc = 1.0 - ratio * ratio * (1.0 - cos_i * cos_i);
    if disc < 0.0 {
        return None;
    }
    Some((ratio * (cos_i * normal + d) - normal * disc.sqrt()).normalize())
}

/// Radiance leaving the hit `its` back along `ray`.
pub fn shade(scene: &Scene, ray: &Ray, its: &Intersection<'_>, stats: &mut RayStats) -> Color {
    let material = its.material;
    let d = ray.direction.normalize();
    let mut result = Color::ZERO;

    for light in scene.lights() {
        let l = light.position - its.p;
        let dist2 = l.length_squared();
        let l_n = l.normalize();

        let shadow_ray = Ray::with_segment(its.p, l_n, SHADOW_EPSILON, dist2.sqrt() - SHADOW_EPSILON);
        let mut blocker = Intersection::default();
        if scene.intersect(&shadow_ray, &mut blocker, stats) {
            continue;
        }

        let diffuse = material.kd * light.intensity * l_n.dot(its.sn).max(0.0) / dist2;
        let h = (l_n - d).normalize();
        let specular =
            material.ks * light.intensity * its.sn.dot(h).max(0.0).powf(material.exponent) / dist2;
        result += diffuse + specular;
    }

    if ray.depth < MAX_DEPTH {
        if material.is_reflective() {
            let reflected = ray.spawn(its.p, reflect(d, its.sn));
            result += material.kr * scene.radiance(&reflected, stats);
        }

        if material.is_transmissive() {
            if let Some(t) = refract(d, its.sn, material.ior) {
                let refracted = ray.spawn(its.p, t);
                result += material.kt * scene.radiance(&refracted, stats);
            }
        }
    }

    result
}
