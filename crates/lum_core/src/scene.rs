//! Resolved scene description handed to the renderer.
//!
//! Everything here is validated: transforms are invertible, material names
//! are resolved to shared materials, and OBJ meshes are loaded.

use std::sync::Arc;

use lum_math::{Transform, Vec3};

use crate::material::{Color, Material};
use crate::mesh::Mesh;
use crate::settings::AcceleratorSettings;

/// Pinhole camera placement and image plane.
///
/// The camera looks down its local -z axis at an image plane of size
/// `width x height` placed at distance `dist`.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraSettings {
    pub transform: Transform,
    pub width: f32,
    pub height: f32,
    pub dist: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            transform: Transform::IDENTITY,
            width: 1.0,
            height: 1.0,
            dist: 1.0,
        }
    }
}

/// Point light source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub intensity: Color,
}

impl PointLight {
    /// A light at the origin of `transform`.
    pub fn new(transform: &Transform, intensity: Color) -> Self {
        Self {
            position: transform.point(Vec3::ZERO),
            intensity,
        }
    }
}

/// The shape of a surface.
#[derive(Clone, Debug)]
pub enum Geometry {
    /// Sphere of `radius` centered at the local origin
    Sphere { radius: f32 },

    /// Square `[-width, width]^2` in the local z = 0 plane
    Quad { width: f32 },

    /// Triangle mesh already placed in world space
    Mesh(Mesh),
}

/// A surface: geometry, its local-to-world transform, and its material.
#[derive(Clone, Debug)]
pub struct SurfaceDef {
    pub geometry: Geometry,
    pub transform: Transform,
    pub material: Arc<Material>,
}

/// A complete, validated scene.
#[derive(Clone, Debug)]
pub struct SceneDescription {
    pub camera: CameraSettings,
    pub image_width: u32,
    pub image_height: u32,
    /// Samples per pixel along each axis
    pub image_samples: u32,
    pub background: Color,
    pub surfaces: Vec<SurfaceDef>,
    pub lights: Vec<PointLight>,
    pub accelerator: AcceleratorSettings,
}

impl Default for SceneDescription {
    fn default() -> Self {
        Self {
            camera: CameraSettings::default(),
            image_width: 512,
            image_height: 512,
            image_samples: 1,
            background: Color::splat(0.2),
            surfaces: Vec::new(),
            lights: Vec::new(),
            accelerator: AcceleratorSettings::Naive,
        }
    }
}

impl SceneDescription {
    /// Total number of intersectable primitives across all surfaces.
    pub fn primitive_count(&self) -> usize {
        self.surfaces
            .iter()
            .map(|s| match &s.geometry {
                Geometry::Sphere { .. } | Geometry::Quad { .. } => 1,
                Geometry::Mesh(mesh) => mesh.triangle_count(),
            })
            .sum()
    }
}
