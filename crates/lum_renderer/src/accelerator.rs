//! Accelerator contract and the naive linear-scan accelerator.

use lum_math::{Aabb, Ray};

use crate::{Intersection, RayStats, Surface};

/// Reference to one primitive: a surface and the primitive's index within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Primitive {
    pub surface: u32,
    pub index: u32,
}

/// A structure that finds the closest ray-surface intersection.
///
/// Surfaces are registered with [`Accelerator::add_surface`], then
/// [`Accelerator::build`] is called once before any query. Queries never
/// mutate the structure, so it can be shared across threads.
pub trait Accelerator: Send + Sync {
    /// Register a surface, expanding it into one primitive per element.
    fn add_surface(&mut self, surface: Surface);

    /// Prepare the structure for queries.
    fn build(&mut self);

    /// Find the closest hit along `ray` within its `[mint, maxt]` window.
    ///
    /// Returns true and fills `its` if anything was hit.
    fn intersect<'a>(&'a self, ray: &Ray, its: &mut Intersection<'a>, stats: &mut RayStats) -> bool;

    /// World bounds of every registered primitive.
    fn bounding_box(&self) -> Aabb;

    /// Remove all surfaces and primitives.
    fn clear(&mut self);

    fn primitive_count(&self) -> usize;

    fn surfaces(&self) -> &[Surface];
}

/// Registered surfaces and their flattened primitive list.
///
/// Shared storage for the accelerators.
#[derive(Debug, Default, Clone)]
pub struct PrimitiveSet {
    surfaces: Vec<Surface>,
    primitives: Vec<Primitive>,
}

impl PrimitiveSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_surface(&mut self, surface: Surface) {
        let surface_index = self.surfaces.len() as u32;
        self.primitives
            .extend((0..surface.num_primitives() as u32).map(|index| Primitive {
                surface: surface_index,
                index,
            }));
        self.surfaces.push(surface);
    }

    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn clear(&mut self) {
        self.surfaces.clear();
        self.primitives.clear();
    }

    pub fn world_bbox(&self, prim: Primitive) -> Aabb {
        self.surfaces[prim.surface as usize].world_bbox(prim.index as usize)
    }

    pub fn bounding_box(&self) -> Aabb {
        self.primitives.iter().fold(Aabb::EMPTY, |acc, &prim| {
            Aabb::surrounding(&acc, &self.world_bbox(prim))
        })
    }

    /// Test one primitive. On a hit, `ray.maxt` shrinks to the hit distance
    /// so later tests only accept closer hits.
    #[inline]
    pub fn intersect<'a>(
        &'a self,
        prim: Primitive,
        ray: &mut Ray,
        its: &mut Intersection<'a>,
        stats: &mut RayStats,
    ) -> bool {
        stats.primitives_intersected += 1;
        let surface = &self.surfaces[prim.surface as usize];
        if surface.intersect(prim.index as usize, ray, its) {
            ray.maxt = its.t;
            true
        } else {
            false
        }
    }
}

/// Tests every primitive for every ray.
#[derive(Debug, Default, Clone)]
pub struct NaiveAccel {
    prims: PrimitiveSet,
    bbox: Aabb,
}

impl NaiveAccel {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accelerator for NaiveAccel {
    fn add_surface(&mut self, surface: Surface) {
        self.prims.add_surface(surface);
    }

    fn build(&mut self) {
        self.bbox = self.prims.bounding_box();
        log::debug!("Naive accelerator over {} primitives", self.prims.len());
    }

    fn intersect<'a>(&'a self, ray: &Ray, its: &mut Intersection<'a>, stats: &mut RayStats) -> bool {
        let mut ray = *ray;
        let mut hit_anything = false;

        for &prim in self.prims.primitives() {
            if self.prims.intersect(prim, &mut ray, its, stats) {
                hit_anything = true;
            }
        }
        hit_anything
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }

    fn clear(&mut self) {
        self.prims.clear();
        self.bbox = Aabb::EMPTY;
    }

    fn primitive_count(&self) -> usize {
        self.prims.len()
    }

    fn surfaces(&self) -> &[Surface] {
        self.prims.surfaces()
    }
}
