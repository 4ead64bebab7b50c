//! Intersection records for ray-surface queries.

use lum_core::{Material, DEFAULT_MATERIAL};
use lum_math::{Vec2, Vec3};

use crate::Surface;

/// Geometry of a hit, as computed by a primitive routine.
///
/// Surfaces attach their material and identity to this to form an
/// [`Intersection`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeHit {
    /// Ray parameter of the hit
    pub t: f32,
    /// World-space hit point
    pub p: Vec3,
    /// Geometric normal (unit length)
    pub gn: Vec3,
    /// Shading normal (unit length, possibly interpolated)
    pub sn: Vec3,
    /// Surface coordinates
    pub uv: Vec2,
}

/// Record of the closest ray-surface intersection found so far.
#[derive(Clone)]
pub struct Intersection<'a> {
    /// Ray parameter of the hit
    pub t: f32,
    /// World-space hit point
    pub p: Vec3,
    /// Geometric normal
    pub gn: Vec3,
    /// Shading normal
    pub sn: Vec3,
    /// Surface coordinates
    pub uv: Vec2,
    /// Material of the hit surface
    pub material: &'a Material,
    /// The hit surface, if any
    pub surface: Option<&'a Surface>,
}

impl<'a> Default for Intersection<'a> {
    fn default() -> Self {
        Self {
            t: f32::INFINITY,
            p: Vec3::ZERO,
            gn: Vec3::ZERO,
            sn: Vec3::ZERO,
            uv: Vec2::ZERO,
            material: &DEFAULT_MATERIAL,
            surface: None,
        }
    }
}

impl<'a> Intersection<'a> {
    pub fn new(hit: ShapeHit, material: &'a Material, surface: &'a Surface) -> Self {
        Self {
            t: hit.t,
            p: hit.p,
            gn: hit.gn,
            sn: hit.sn,
            uv: hit.uv,
            material,
            surface: Some(surface),
        }
    }
}

impl std::fmt::Debug for Intersection<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Intersection")
            .field("t", &self.t)
            .field("p", &self.p)
            .field("gn", &self.gn)
            .field("sn", &self.sn)
            .field("uv", &self.uv)
            .field("material", &self.material.name)
            .finish()
    }
}
