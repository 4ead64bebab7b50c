//! Ray-triangle intersection and the triangle mesh shape.

use lum_core::Mesh;
use lum_math::{Aabb, Ray, Transform, Vec2, Vec3};

use crate::ShapeHit;

/// Intersect a ray with the triangle `(v0, v1, v2)`.
///
/// The hit point is found on the triangle's plane and accepted if it lies on
/// the inner side of all three edges. Barycentric weights come from the
/// areas of the sub-triangles opposite each vertex and are used to blend the
/// optional vertex normals and UVs. Without UVs the weights of `v1` and `v2`
/// are returned as the surface coordinates.
pub fn intersect_triangle(
    ray: &Ray,
    v: [Vec3; 3],
    n: Option<[Vec3; 3]>,
    uv: Option<[Vec2; 3]>,
) -> Option<ShapeHit> {
    let [p0, p1, p2] = v;
    let e10 = p1 - p0;
    let e20 = p2 - p0;
    let area = e10.cross(e20);

    let denom = area.dot(ray.direction);
    if denom == 0.0 {
        return None;
    }

    let t = area.dot(p0 - ray.origin) / denom;
    if !ray.accepts(t) {
        return None;
    }

    let x = ray.at(t);
    let c2 = e10.cross(x - p0);
    let c0 = (p2 - p1).cross(x - p1);
    let c1 = (p0 - p2).cross(x - p2);
    if c2.dot(area) < 0.0 || c0.dot(area) < 0.0 || c1.dot(area) < 0.0 {
        return None;
    }

    let area_len = area.length();
    if area_len == 0.0 {
        return None;
    }
    // weight of v1 is the area opposite it, spanned by (v0, v2, x)
    let b1 = e20.cross(x - p0).length() / area_len;
    let b2 = c2.length() / area_len;
    let b0 = 1.0 - b1 - b2;

    let gn = area / area_len;
    let sn = match n {
        Some([n0, n1, n2]) => {
            let blended = (b0 * n0 + b1 * n1 + b2 * n2).normalize_or_zero();
            if blended == Vec3::ZERO {
                gn
            } else {
                blended
            }
        }
        None => gn,
    };
    let uv = match uv {
        Some([t0, t1, t2]) => b0 * t0 + b1 * t1 + b2 * t2,
        None => Vec2::new(b1, b2),
    };

    Some(ShapeHit { t, p: x, gn, sn, uv })
}

/// A triangle mesh in world space. Each triangle is one primitive.
#[derive(Debug, Clone)]
pub struct TriangleMesh {
    mesh: Mesh,
}

impl TriangleMesh {
    pub fn new(mesh: Mesh) -> Self {
        Self { mesh }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn triangle_count(&self) -> usize {
        self.mesh.triangle_count()
    }

    pub fn world_bbox(&self, index: usize) -> Aabb {
        self.mesh.triangle_bounds(index)
    }

    /// Bounds of triangle `index` in the frame of `xform`.
    pub fn local_bbox(&self, xform: &Transform, index: usize) -> Aabb {
        let to_local = xform.inverse();
        Aabb::enclosing(self.mesh.triangle_vertices(index).map(|p| to_local.point(p)))
    }

    pub fn intersect(&self, index: usize, ray: &Ray) -> Option<ShapeHit> {
        let tri = self.mesh.indices[index].map(|i| i as usize);
        let normals = self
            .mesh
            .normals
            .as_ref()
            .map(|n| tri.map(|i| n[i]));
        let uvs = self.mesh.uvs.as_ref().map(|uv| tri.map(|i| uv[i]));

        intersect_triangle(ray, tri.map(|i| self.mesh.positions[i]), normals, uvs)
    }
}
