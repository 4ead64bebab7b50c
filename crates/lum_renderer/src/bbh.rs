//! Bounding-box hierarchy (BBH) acceleration structure.
//!
//! A binary tree of nested axis-aligned boxes over the scene's primitives.
//! Each level sorts its primitives by box centroid along one axis (cycling
//! x, y, z with depth) and splits them in two using the configured
//! [`SplitMethod`]. Traversal skips any subtree whose box the ray misses and
//! visits the nearer child first so hits found there shrink the ray before
//! the farther child is tested.

use std::cmp::Ordering;

use lum_core::{SplitMethod, DEFAULT_MAX_PRIMS_IN_NODE};
use lum_math::{Aabb, Ray, Vec3};

use crate::{Accelerator, Intersection, Primitive, PrimitiveSet, RayStats, Surface};

/// A primitive with its world bounds cached for building and traversal.
#[derive(Debug, Clone, Copy)]
pub struct BoundedPrimitive {
    pub prim: Primitive,
    pub bbox: Aabb,
    pub centroid: Vec3,
}

/// BBH node - either an interior node with two children or a leaf with
/// primitives.
#[derive(Debug)]
pub enum BbhNode {
    /// Internal node with two children.
    Interior {
        left: Box<BbhNode>,
        right: Box<BbhNode>,
        bbox: Aabb,
    },
    /// Leaf node holding at least one primitive.
    Leaf {
        prims: Vec<BoundedPrimitive>,
        bbox: Aabb,
    },
    /// Tree over zero primitives.
    Empty,
}

impl BbhNode {
    pub fn bounding_box(&self) -> Aabb {
        match self {
            BbhNode::Empty => Aabb::EMPTY,
            BbhNode::Leaf { bbox, .. } => *bbox,
            BbhNode::Interior { bbox, .. } => *bbox,
        }
    }

    /// Number of nodes in this subtree.
    pub fn node_count(&self) -> usize {
        match self {
            BbhNode::Empty => 0,
            BbhNode::Leaf { .. } => 1,
            BbhNode::Interior { left, right, .. } => 1 + left.node_count() + right.node_count(),
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            BbhNode::Empty => 0,
            BbhNode::Leaf { .. } => 1,
            BbhNode::Interior { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    /// Levels in this subtree (a lone leaf has depth 1).
    pub fn depth(&self) -> usize {
        match self {
            BbhNode::Empty => 0,
            BbhNode::Leaf { .. } => 1,
            BbhNode::Interior { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

/// Bounding-box hierarchy accelerator.
#[derive(Debug)]
pub struct Bbh {
    prims: PrimitiveSet,
    max_prims_in_node: usize,
    split_method: SplitMethod,
    root: BbhNode,
    built: bool,
}

impl Default for Bbh {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PRIMS_IN_NODE, SplitMethod::Sah)
    }
}

impl Bbh {
    /// Create an empty hierarchy. A leaf capacity of zero is treated as one.
    pub fn new(max_prims_in_node: u8, split_method: SplitMethod) -> Self {
        Self {
            prims: PrimitiveSet::new(),
            max_prims_in_node: max_prims_in_node.max(1) as usize,
            split_method,
            root: BbhNode::Empty,
            built: false,
        }
    }

    pub fn split_method(&self) -> SplitMethod {
        self.split_method
    }

    pub fn max_prims_in_node(&self) -> usize {
        self.max_prims_in_node
    }

    pub fn root(&self) -> &BbhNode {
        &self.root
    }

    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Recursive construction over `items` (non-empty).
    fn build_node(&self, mut items: Vec<BoundedPrimitive>, axis: usize) -> BbhNode {
        let n = items.len();

        if n <= self.max_prims_in_node {
            let bbox = items
                .iter()
                .fold(Aabb::EMPTY, |acc, item| Aabb::surrounding(&acc, &item.bbox));
            return BbhNode::Leaf { prims: items, bbox };
        }

        items.sort_unstable_by(|a, b| a.centroid[axis].total_cmp(&b.centroid[axis]));

        let split = match self.split_method {
            SplitMethod::EqualCounts => n / 2,
            SplitMethod::Middle => split_middle(&items, axis),
            SplitMethod::Sah => split_sah(&items),
        };
        debug_assert!(split > 0 && split < n);

        let right_items = items.split_off(split);
        let next_axis = (axis + 1) % 3;
        let left = self.build_node(items, next_axis);
        let right = self.build_node(right_items, next_axis);

        let bbox = Aabb::surrounding(&left.bounding_box(), &right.bounding_box());
        BbhNode::Interior {
            left: Box::new(left),
            right: Box::new(right),
            bbox,
        }
    }

    fn intersect_node<'a>(
        &'a self,
        node: &'a BbhNode,
        ray: &mut Ray,
        its: &mut Intersection<'a>,
        stats: &mut RayStats,
    ) -> bool {
        match node {
            BbhNode::Empty => false,

            BbhNode::Leaf { prims, bbox } => {
                if !bbox.hit(ray) {
                    return false;
                }

                let mut hit_anything = false;
                for item in prims {
                    if item.bbox.hit(ray) && self.prims.intersect(item.prim, ray, its, stats) {
                        hit_anything = true;
                    }
                }
                hit_anything
            }

            BbhNode::Interior { left, right, bbox } => {
                if !bbox.hit(ray) {
                    return false;
                }

                let left_entry = left.bounding_box().clip_ray(ray).map(|i| i.min);
                let right_entry = right.bounding_box().clip_ray(ray).map(|i| i.min);

                let (first, second) = match (left_entry, right_entry) {
                    (None, None) => return false,
                    (Some(_), None) => return self.intersect_node(left, ray, its, stats),
                    (None, Some(_)) => return self.intersect_node(right, ray, its, stats),
                    (Some(l), Some(r)) if r < l => (right, left),
                    _ => (left, right),
                };

                let hit_first = self.intersect_node(first, ray, its, stats);
                // the first child's hit has already shrunk ray.maxt
                let hit_second = self.intersect_node(second, ray, its, stats);
                hit_first || hit_second
            }
        }
    }
}

impl Accelerator for Bbh {
    fn add_surface(&mut self, surface: Surface) {
        if self.built {
            log::warn!("Surface added to a built BBH; the tree is discarded until the next build()");
            self.root = BbhNode::Empty;
            self.built = false;
        }
        self.prims.add_surface(surface);
    }

    fn build(&mut self) {
        let items: Vec<BoundedPrimitive> = self
            .prims
            .primitives()
            .iter()
            .map(|&prim| {
                let bbox = self.prims.world_bbox(prim);
                BoundedPrimitive {
                    prim,
                    bbox,
                    centroid: bbox.centroid(),
                }
            })
            .collect();

        log::info!(
            "Building BBH over {} primitives ({:?}, max {} per leaf)",
            items.len(),
            self.split_method,
            self.max_prims_in_node
        );

        self.root = if items.is_empty() {
            BbhNode::Empty
        } else {
            self.build_node(items, 0)
        };
        self.built = true;

        log::info!(
            "BBH built: {} nodes, {} leaves, depth {}",
            self.node_count(),
            self.leaf_count(),
            self.depth()
        );
    }

    fn intersect<'a>(&'a self, ray: &Ray, its: &mut Intersection<'a>, stats: &mut RayStats) -> bool {
        let mut ray = *ray;
        self.intersect_node(&self.root, &mut ray, its, stats)
    }

    fn bounding_box(&self) -> Aabb {
        self.root.bounding_box()
    }

    fn clear(&mut self) {
        self.prims.clear();
        self.root = BbhNode::Empty;
        self.built = false;
    }

    fn primitive_count(&self) -> usize {
        self.prims.len()
    }

    fn surfaces(&self) -> &[Surface] {
        self.prims.surfaces()
    }
}

/// First index whose centroid lies at or past the midpoint of the centroid
/// range along `axis`. Falls back to an even split when every centroid
/// lands on one side.
///
/// Splitting at the spatial midpoint rather than at N/2 is deliberate; the
/// N/2 split is [`SplitMethod::EqualCounts`].
fn split_middle(items: &[BoundedPrimitive], axis: usize) -> usize {
    let n = items.len();
    let lo = items[0].centroid[axis];
    let hi = items[n - 1].centroid[axis];
    let mid = 0.5 * (lo + hi);

    match items.partition_point(|item| item.centroid[axis] < mid) {
        0 => n / 2,
        split if split == n => n / 2,
        split => split,
    }
}

/// Split index in `1..n` minimizing `area(L) * |L| + area(R) * |R|` over the
/// sorted items. Ties go to the candidate closest to the middle.
fn split_sah(items: &[BoundedPrimitive]) -> usize {
    let n = items.len();

    // right_area[i]: surface area of the union of items[i..]
    let mut right_area = vec![0.0_f32; n];
    let mut acc = Aabb::EMPTY;
    for i in (1..n).rev() {
        acc = Aabb::surrounding(&acc, &items[i].bbox);
        right_area[i] = acc.surface_area();
    }

    let mut best_split = n / 2;
    let mut best_cost = f32::INFINITY;
    let mut left = Aabb::EMPTY;
    for i in 1..n {
        left = Aabb::surrounding(&left, &items[i - 1].bbox);
        let cost = left.surface_area() * i as f32 + right_area[i] * (n - i) as f32;

        let better = match cost.total_cmp(&best_cost) {
            Ordering::Less => true,
            Ordering::Equal => i.abs_diff(n / 2) < best_split.abs_diff(n / 2),
            Ordering::Greater => false,
        };
        if better {
            best_cost = cost;
            best_split = i;
        }
    }
    best_split
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NaiveAccel, Quad, Shape, Sphere};
    use lum_core::{Material, Mesh};
    use lum_math::{Mat4, Transform};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::sync::Arc;

    const ALL_METHODS: [SplitMethod; 3] = [SplitMethod::Sah, SplitMethod::Middle, SplitMethod::EqualCounts];

    fn sphere_at(center: Vec3, radius: f32) -> Surface {
        Surface::new(
            Shape::Sphere(Sphere::new(radius)),
            Transform::from_translation(center),
            Arc::new(Material::default()),
        )
    }

    fn random_vec(rng: &mut StdRng, lo: f32, hi: f32) -> Vec3 {
        Vec3::new(rng.gen_range(lo..hi), rng.gen_range(lo..hi), rng.gen_range(lo..hi))
    }

    /// Spheres, quads and a triangle mesh scattered in a 20-unit cube.
    fn random_scene(rng: &mut StdRng) -> Vec<Surface> {
        let mut surfaces: Vec<Surface> = (0..60)
            .map(|_| {
                let center = random_vec(rng, -10.0, 10.0);
                sphere_at(center, rng.gen_range(0.2..1.0))
            })
            .collect();

        for _ in 0..5 {
            let xform = Transform::new(
                Mat4::from_translation(random_vec(rng, -8.0, 8.0))
                    * Mat4::from_axis_angle(random_vec(rng, -1.0, 1.0).normalize(), rng.gen_range(0.0..3.0)),
            );
            surfaces.push(Surface::new(
                Shape::Quad(Quad::new(rng.gen_range(0.5..2.0))),
                xform,
                Arc::new(Material::default()),
            ));
        }

        let positions: Vec<Vec3> = (0..90).map(|_| random_vec(rng, -10.0, 10.0)).collect();
        let indices: Vec<[u32; 3]> = (0..30).map(|i| [3 * i, 3 * i + 1, 3 * i + 2]).collect();
        surfaces.push(Surface::from(lum_core::SurfaceDef {
            geometry: lum_core::Geometry::Mesh(Mesh::new(positions, indices, None)),
            transform: Transform::IDENTITY,
            material: Arc::new(Material::default()),
        }));

        surfaces
    }

    fn build_both(surfaces: &[Surface], max_prims: u8, method: SplitMethod) -> (NaiveAccel, Bbh) {
        let mut naive = NaiveAccel::new();
        let mut bbh = Bbh::new(max_prims, method);
        for s in surfaces {
            naive.add_surface(s.clone());
            bbh.add_surface(s.clone());
        }
        naive.build();
        bbh.build();
        (naive, bbh)
    }

    /// Every primitive's world box lies inside every node box above it, and
    /// every primitive is in exactly one leaf.
    fn check_boxes(node: &BbhNode, seen: &mut Vec<Primitive>) -> Aabb {
        match node {
            BbhNode::Empty => Aabb::EMPTY,
            BbhNode::Leaf { prims, bbox } => {
                assert!(!prims.is_empty());
                for item in prims {
                    assert!(bbox.contains_box(&item.bbox));
                    seen.push(item.prim);
                }
                *bbox
            }
            BbhNode::Interior { left, right, bbox } => {
                let l = check_boxes(left, seen);
                let r = check_boxes(right, seen);
                assert!(bbox.contains_box(&l));
                assert!(bbox.contains_box(&r));
                *bbox
            }
        }
    }

    #[test]
    fn test_bbh_empty() {
        let mut bbh = Bbh::default();
        bbh.build();

        assert!(matches!(bbh.root(), BbhNode::Empty));
        assert!(bbh.bounding_box().is_empty());
        assert_eq!(bbh.node_count(), 0);

        let mut its = Intersection::default();
        let mut stats = RayStats::new();
        assert!(!bbh.intersect(&Ray::new(Vec3::ZERO, Vec3::Z), &mut its, &mut stats));
        assert_eq!(stats.primitives_intersected, 0);
    }

    #[test]
    fn test_bbh_single_sphere() {
        let mut bbh = Bbh::default();
        bbh.add_surface(sphere_at(Vec3::new(0.0, 0.0, -1.0), 0.5));
        bbh.build();

        // Should create a leaf
        assert!(matches!(bbh.root(), BbhNode::Leaf { .. }));

        let mut its = Intersection::default();
        let mut stats = RayStats::new();
        assert!(bbh.intersect(&Ray::new(Vec3::ZERO, -Vec3::Z), &mut its, &mut stats));
        assert!((its.t - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_bbh_row_of_spheres() {
        for method in ALL_METHODS {
            let mut bbh = Bbh::new(2, method);
            for i in 0..10 {
                bbh.add_surface(sphere_at(Vec3::new(i as f32, 0.0, -5.0), 0.4));
            }
            bbh.build();

            assert!(bbh.leaf_count() >= 5);
            assert_eq!(bbh.node_count(), 2 * bbh.leaf_count() - 1);

            // Ray that hits the sphere at x=5
            let ray = Ray::new(Vec3::new(5.0, 0.0, 0.0), -Vec3::Z);
            let mut its = Intersection::default();
            let mut stats = RayStats::new();
            assert!(bbh.intersect(&ray, &mut its, &mut stats));
            assert!((its.p.z - (-4.6)).abs() < 1e-4);
            // pruning skips most of the row
            assert!(stats.primitives_intersected < 10);
        }
    }

    #[test]
    fn test_box_invariant_and_partition() {
        let mut rng = StdRng::seed_from_u64(42);
        let surfaces = random_scene(&mut rng);

        for method in ALL_METHODS {
            let (_, bbh) = build_both(&surfaces, 3, method);

            let mut seen = Vec::new();
            let root_box = check_boxes(bbh.root(), &mut seen);
            assert!(root_box.contains_box(&bbh.prims.bounding_box()));

            seen.sort_by_key(|p| (p.surface, p.index));
            let mut expected = bbh.prims.primitives().to_vec();
            expected.sort_by_key(|p| (p.surface, p.index));
            assert_eq!(seen, expected);
        }
    }

    #[test]
    fn test_bbh_matches_naive() {
        let mut rng = StdRng::seed_from_u64(42);
        let surfaces = random_scene(&mut rng);

        let rays: Vec<Ray> = (0..500)
            .map(|_| {
                let origin = random_vec(&mut rng, -15.0, 15.0);
                let target = random_vec(&mut rng, -8.0, 8.0);
                Ray::new(origin, target - origin)
            })
            .collect();

        for method in ALL_METHODS {
            for max_prims in [1, 4, 10] {
                let (naive, bbh) = build_both(&surfaces, max_prims, method);
                let mut hits = 0;

                for ray in &rays {
                    let mut expected = Intersection::default();
                    let mut actual = Intersection::default();
                    let mut stats = RayStats::new();

                    let naive_hit = naive.intersect(ray, &mut expected, &mut stats);
                    let bbh_hit = bbh.intersect(ray, &mut actual, &mut stats);
                    assert_eq!(naive_hit, bbh_hit, "{:?} disagrees on {:?}", method, ray);

                    if naive_hit {
                        hits += 1;
                        assert!((expected.t - actual.t).abs() < 1e-5, "{:?}: {:?} vs {:?}", method, expected, actual);
                        assert!((expected.p - actual.p).length() < 1e-4);
                        assert!((expected.gn - actual.gn).length() < 1e-5);
                        assert!((expected.sn - actual.sn).length() < 1e-5);
                    }
                }
                assert!(hits > 0);
            }
        }
    }

    #[test]
    fn test_bbh_prunes() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut bbh = Bbh::new(4, SplitMethod::Sah);
        let mut naive = NaiveAccel::new();
        for _ in 0..400 {
            let s = sphere_at(random_vec(&mut rng, -50.0, 50.0), 0.5);
            bbh.add_surface(s.clone());
            naive.add_surface(s);
        }
        bbh.build();
        naive.build();

        let ray = Ray::new(Vec3::new(-60.0, 0.3, 0.2), Vec3::X);
        let (mut bbh_stats, mut naive_stats) = (RayStats::new(), RayStats::new());
        bbh.intersect(&ray, &mut Intersection::default(), &mut bbh_stats);
        naive.intersect(&ray, &mut Intersection::default(), &mut naive_stats);

        assert_eq!(naive_stats.primitives_intersected, 400);
        assert!(bbh_stats.primitives_intersected < 100);
    }

    #[test]
    fn test_intersect_is_idempotent() {
        let mut rng = StdRng::seed_from_u64(3);
        let surfaces = random_scene(&mut rng);
        let (_, bbh) = build_both(&surfaces, 4, SplitMethod::Sah);

        for _ in 0..50 {
            let origin = random_vec(&mut rng, -15.0, 15.0);
            let ray = Ray::new(origin, -origin);

            let mut first = Intersection::default();
            let mut second = Intersection::default();
            let mut stats = RayStats::new();
            let hit_first = bbh.intersect(&ray, &mut first, &mut stats);
            let hit_second = bbh.intersect(&ray, &mut second, &mut stats);

            assert_eq!(hit_first, hit_second);
            assert_eq!(first.t, second.t);
            assert_eq!(first.p, second.p);
            assert_eq!(first.gn, second.gn);
        }
    }

    #[test]
    fn test_add_after_build_discards_tree() {
        let mut bbh = Bbh::default();
        bbh.add_surface(sphere_at(Vec3::ZERO, 1.0));
        bbh.build();
        assert_eq!(bbh.node_count(), 1);

        bbh.add_surface(sphere_at(Vec3::new(0.0, 0.0, -5.0), 1.0));
        assert!(matches!(bbh.root(), BbhNode::Empty));
        assert_eq!(bbh.primitive_count(), 2);

        bbh.build();
        let mut its = Intersection::default();
        let ray = Ray::new(Vec3::new(0.0, 0.0, -10.0), Vec3::Z);
        assert!(bbh.intersect(&ray, &mut its, &mut RayStats::new()));
        assert!((its.t - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_clear() {
        let mut bbh = Bbh::default();
        bbh.add_surface(sphere_at(Vec3::ZERO, 1.0));
        bbh.build();
        bbh.clear();

        assert_eq!(bbh.primitive_count(), 0);
        assert!(bbh.surfaces().is_empty());
        assert!(bbh.bounding_box().is_empty());
    }

    #[test]
    fn test_split_never_empty_for_identical_boxes() {
        let items: Vec<BoundedPrimitive> = (0..8)
            .map(|i| {
                let bbox = Aabb::from_points(Vec3::ZERO, Vec3::ONE);
                BoundedPrimitive {
                    prim: Primitive { surface: 0, index: i },
                    bbox,
                    centroid: bbox.centroid(),
                }
            })
            .collect();

        assert_eq!(split_sah(&items), 4);
        assert_eq!(split_middle(&items, 0), 4);
    }

    #[test]
    fn test_sah_separates_clusters() {
        // three boxes near x=0 and five near x=100
        let items: Vec<BoundedPrimitive> = [0.0, 0.5, 1.0, 100.0, 100.5, 101.0, 101.5, 102.0]
            .iter()
            .enumerate()
            .map(|(i, &x)| {
                let bbox = Aabb::from_points(Vec3::new(x, 0.0, 0.0), Vec3::new(x + 0.5, 0.5, 0.5));
                BoundedPrimitive {
                    prim: Primitive { surface: 0, index: i as u32 },
                    bbox,
                    centroid: bbox.centroid(),
                }
            })
            .collect();

        assert_eq!(split_sah(&items), 3);
        assert_eq!(split_middle(&items, 0), 3);
    }

    #[test]
    fn test_far_axis_aligned_quad() {
        for z in [100.0, 1000.0, 2000.0, 5000.0] {
            let quad = Surface::new(
                Shape::Quad(Quad::new(1.0)),
                Transform::from_translation(Vec3::new(0.0, 0.0, z)),
                Arc::new(Material::default()),
            );
            let (naive, bbh) = build_both(&[quad], 1, SplitMethod::Sah);
            let ray = Ray::new(Vec3::new(0.25, 0.25, 0.0), Vec3::Z);

            let mut expected = Intersection::default();
            let mut actual = Intersection::default();
            let mut stats = RayStats::new();
            assert!(naive.intersect(&ray, &mut expected, &mut stats));
            assert!(bbh.intersect(&ray, &mut actual, &mut stats), "quad at z = {z} missed");
            assert_eq!(expected.t, actual.t);
        }
    }

    /// Axis-aligned quads and flat triangles around `offset`. Edges sit at
    /// least 0.25 away from any half-integer coordinate.
    fn axis_aligned_scene(rng: &mut StdRng, offset: Vec3) -> Vec<Surface> {
        let material = Arc::new(Material::default());
        let grid = |rng: &mut StdRng| rng.gen_range(-3..=3) as f32;
        let mut surfaces = Vec::new();

        for k in 0..8 {
            let depth = k as f32 * 1.5 - 5.0;
            let (a, b) = (grid(rng), grid(rng));
            // faces +z, +x and +y in turn
            let frame = match k % 3 {
                0 => Mat4::from_cols(Vec3::X.extend(0.0), Vec3::Y.extend(0.0), Vec3::Z.extend(0.0), Vec3::new(a, b, depth).extend(1.0)),
                1 => Mat4::from_cols(Vec3::Y.extend(0.0), Vec3::Z.extend(0.0), Vec3::X.extend(0.0), Vec3::new(depth, a, b).extend(1.0)),
                _ => Mat4::from_cols(Vec3::Z.extend(0.0), Vec3::X.extend(0.0), Vec3::Y.extend(0.0), Vec3::new(b, depth, a).extend(1.0)),
            };
            surfaces.push(Surface::new(
                Shape::Quad(Quad::new(0.75)),
                Transform::new(Mat4::from_translation(offset) * frame),
                material.clone(),
            ));
        }

        let mut positions = Vec::new();
        for k in 0..6 {
            let y = offset.y + k as f32 * 1.25 - 3.3;
            let (x, z) = (offset.x + grid(rng), offset.z + grid(rng));
            positions.extend([Vec3::new(x, y, z), Vec3::new(x + 2.0, y, z), Vec3::new(x, y, z + 1.0)]);
        }
        let indices = (0..6).map(|i| [3 * i, 3 * i + 1, 3 * i + 2]).collect();
        surfaces.push(Surface::from(lum_core::SurfaceDef {
            geometry: lum_core::Geometry::Mesh(Mesh::new(positions, indices, None)),
            transform: Transform::IDENTITY,
            material,
        }));

        surfaces
    }

    #[test]
    fn test_bbh_matches_naive_far_from_origin() {
        let directions = [Vec3::X, -Vec3::X, Vec3::Y, -Vec3::Y, Vec3::Z, -Vec3::Z];

        for offset in [Vec3::ZERO, Vec3::splat(1000.0), Vec3::splat(10000.0), Vec3::new(-20000.0, 5000.0, 30000.0)] {
            let mut rng = StdRng::seed_from_u64(7);
            let surfaces = axis_aligned_scene(&mut rng, offset);

            for method in ALL_METHODS {
                let (naive, bbh) = build_both(&surfaces, 2, method);
                let mut hits = 0;

                for _ in 0..400 {
                    let cell = Vec3::new(
                        rng.gen_range(-6..6) as f32,
                        rng.gen_range(-6..6) as f32,
                        rng.gen_range(-6..6) as f32,
                    );
                    let ray = Ray::new(offset + cell + Vec3::splat(0.5), directions[rng.gen_range(0..6)]);

                    let mut expected = Intersection::default();
                    let mut actual = Intersection::default();
                    let mut stats = RayStats::new();
                    let naive_hit = naive.intersect(&ray, &mut expected, &mut stats);
                    let bbh_hit = bbh.intersect(&ray, &mut actual, &mut stats);

                    assert_eq!(naive_hit, bbh_hit, "{:?} at {:?} disagrees on {:?}", method, offset, ray);
                    if naive_hit {
                        hits += 1;
                        assert_eq!(expected.t, actual.t, "{:?} at {:?}: {:?} vs {:?}", method, offset, expected, actual);
                    }
                }
                assert!(hits > 0);
            }
        }
    }
}
