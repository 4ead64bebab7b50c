//! Surfaces: geometry with a transform and a shared material.

use std::sync::Arc;

use lum_core::{Geometry, Material, SurfaceDef};
use lum_math::{Aabb, Ray, Transform};

use crate::{Intersection, Quad, ShapeHit, Sphere, TriangleMesh};

/// The geometric shape of a surface.
#[derive(Debug, Clone)]
pub enum Shape {
    Sphere(Sphere),
    Quad(Quad),
    Mesh(TriangleMesh),
}

impl From<Geometry> for Shape {
    fn from(geometry: Geometry) -> Self {
        match geometry {
            Geometry::Sphere { radius } => Shape::Sphere(Sphere::new(radius)),
            Geometry::Quad { width } => Shape::Quad(Quad::new(width)),
            Geometry::Mesh(mesh) => Shape::Mesh(TriangleMesh::new(mesh)),
        }
    }
}

/// An intersectable object made of one or more primitives.
///
/// Spheres and quads are a single implicit primitive; a mesh has one
/// primitive per triangle.
#[derive(Debug, Clone)]
pub struct Surface {
    shape: Shape,
    transform: Transform,
    material: Arc<Material>,
}

impl From<SurfaceDef> for Surface {
    fn from(def: SurfaceDef) -> Self {
        Surface::new(def.geometry.into(), def.transform, def.material)
    }
}

impl Surface {
    pub fn new(shape: Shape, transform: Transform, material: Arc<Material>) -> Self {
        Self {
            shape,
            transform,
            material,
        }
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn num_primitives(&self) -> usize {
        match &self.shape {
            Shape::Sphere(_) | Shape::Quad(_) => 1,
            Shape::Mesh(mesh) => mesh.triangle_count(),
        }
    }

    /// Bounds of primitive `index` in the surface's local frame.
    pub fn local_bbox(&self, index: usize) -> Aabb {
        match &self.shape {
            Shape::Sphere(sphere) => sphere.local_bbox(),
            Shape::Quad(quad) => quad.local_bbox(),
            Shape::Mesh(mesh) => mesh.local_bbox(&self.transform, index),
        }
    }

    /// Bounds of primitive `index` in world space.
    pub fn world_bbox(&self, index: usize) -> Aabb {
        match &self.shape {
            Shape::Sphere(sphere) => self.transform.aabb(&sphere.local_bbox()),
            Shape::Quad(quad) => self.transform.aabb(&quad.local_bbox()),
            Shape::Mesh(mesh) => mesh.world_bbox(index),
        }
    }

    /// Bounds of every primitive of the surface.
    pub fn bounding_box(&self) -> Aabb {
        (0..self.num_primitives()).fold(Aabb::EMPTY, |acc, i| {
            Aabb::surrounding(&acc, &self.world_bbox(i))
        })
    }

    /// Intersect primitive `index` with a world-space ray.
    ///
    /// On a hit within the ray's window, overwrites `its` and returns true.
    pub fn intersect<'a>(&'a self, index: usize, ray: &Ray, its: &mut Intersection<'a>) -> bool {
        let hit: Option<ShapeHit> = match &self.shape {
            Shape::Sphere(sphere) => sphere.intersect(&self.transform, ray),
            Shape::Quad(quad) => quad.intersect(&self.transform, ray),
            Shape::Mesh(mesh) => mesh.intersect(index, ray),
        };

        match hit {
            Some(hit) => {
                *its = Intersection::new(hit, &self.material, self);
                true
            }
            None => false,
        }
    }
}
