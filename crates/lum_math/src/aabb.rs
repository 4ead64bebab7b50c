use crate::{Interval, Ray, Vec3};

/// Axis-aligned bounding box used by the acceleration structures.
///
/// A box is three intervals, one per axis. A box with any empty axis is
/// empty; `Aabb::EMPTY` is the identity for [`Aabb::surrounding`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Aabb {
    /// Create a new AABB from three intervals.
    pub fn new(x: Interval, y: Interval, z: Interval) -> Self {
        let mut aabb = Self { x, y, z };
        aabb.pad_to_minimums();
        aabb
    }

    /// Create an AABB from two corner points.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        let x = Interval::new(a.x.min(b.x), a.x.max(b.x));
        let y = Interval::new(a.y.min(b.y), a.y.max(b.y));
        let z = Interval::new(a.z.min(b.z), a.z.max(b.z));

        let mut aabb = Self { x, y, z };
        aabb.pad_to_minimums();
        aabb
    }

    /// Smallest box containing every point; empty for no points.
    pub fn enclosing<I: IntoIterator<Item = Vec3>>(points: I) -> Self {
        let mut points = points.into_iter();
        let Some(first) = points.next() else {
            return Self::EMPTY;
        };
        let (lo, hi) = points.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Self::from_points(lo, hi)
    }

    /// Create an AABB that surrounds two other AABBs.
    pub fn surrounding(box0: &Aabb, box1: &Aabb) -> Self {
        Self {
            x: Interval::surrounding(&box0.x, &box1.x),
            y: Interval::surrounding(&box0.y, &box1.y),
            z: Interval::surrounding(&box0.z, &box1.z),
        }
    }

    /// Get the interval for a specific axis (0=X, 1=Y, 2=Z).
    pub fn axis_interval(&self, n: usize) -> Interval {
        match n {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    pub fn min(&self) -> Vec3 {
        Vec3::new(self.x.min, self.y.min, self.z.min)
    }

    pub fn max(&self) -> Vec3 {
        Vec3::new(self.x.max, self.y.max, self.z.max)
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty() || self.y.is_empty() || self.z.is_empty()
    }

    /// Center point of the box.
    pub fn centroid(&self) -> Vec3 {
        Vec3::new(self.x.center(), self.y.center(), self.z.center())
    }

    /// Total area of the six faces. Zero for an empty box.
    pub fn surface_area(&self) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        let (dx, dy, dz) = (self.x.size(), self.y.size(), self.z.size());
        2.0 * (dx * dy + dy * dz + dz * dx)
    }

    pub fn contains_point(&self, p: Vec3) -> bool {
        self.x.contains(p.x) && self.y.contains(p.y) && self.z.contains(p.z)
    }

    /// Returns true if `other` lies entirely inside this box.
    pub fn contains_box(&self, other: &Aabb) -> bool {
        other.is_empty()
            || (self.x.contains_interval(&other.x)
                && self.y.contains_interval(&other.y)
                && self.z.contains_interval(&other.z))
    }

    /// Slab test against the infinite line of the ray.
    ///
    /// Returns the entry and exit parameters `(min_t, max_t)` when
    /// `min_t < max_t`. The ray's own `[mint, maxt]` window is not applied.
    /// A zero direction component is parallel to that slab: the ray hits the
    /// slab only if its origin lies inside it.
    pub fn ray_intersect(&self, r: &Ray) -> Option<(f32, f32)> {
        let mut min_t = f32::NEG_INFINITY;
        let mut max_t = f32::INFINITY;

        for axis in 0..3 {
            let slab = self.axis_interval(axis);
            let orig = r.origin[axis];
            let dir = r.direction[axis];

            if dir == 0.0 {
                if !slab.contains(orig) {
                    return None;
                }
                continue;
            }

            let adinv = 1.0 / dir;
            let mut t0 = (slab.min - orig) * adinv;
            let mut t1 = (slab.max - orig) * adinv;
            if adinv < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }
            min_t = min_t.max(t0);
            max_t = max_t.min(t1);
        }

        (min_t < max_t).then_some((min_t, max_t))
    }

    /// The part of the ray's `[mint, maxt]` window that lies inside the box.
    pub fn clip_ray(&self, r: &Ray) -> Option<Interval> {
        let (t0, t1) = self.ray_intersect(r)?;
        let clipped = Interval::intersection(&Interval::new(t0, t1), &r.interval());
        (!clipped.is_empty()).then_some(clipped)
    }

    /// Test if a ray intersects this AABB within the ray's current window.
    pub fn hit(&self, r: &Ray) -> bool {
        self.clip_ray(r).is_some()
    }

    /// Pad intervals to avoid zero-width AABBs (degenerate cases).
    fn pad_to_minimums(&mut self) {
        self.x = pad_axis(self.x);
        self.y = pad_axis(self.y);
        self.z = pad_axis(self.z);
    }

    /// An empty AABB (contains nothing).
    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };

    /// A universe AABB (contains everything).
    pub const UNIVERSE: Aabb = Aabb {
        x: Interval::UNIVERSE,
        y: Interval::UNIVERSE,
        z: Interval::UNIVERSE,
    };
}

/// Thinnest extent a non-empty box axis may have.
const MIN_AXIS_SIZE: f32 = 0.0001;

/// Widen a thin axis so the slab test sees a positive thickness.
///
/// The padding grows with the magnitude of the coordinates: far from the
/// origin a fixed offset falls below one ulp and rounds away.
fn pad_axis(axis: Interval) -> Interval {
    if axis.is_empty() {
        return axis;
    }
    let magnitude = axis.min.abs().max(axis.max.abs());
    let delta = MIN_AXIS_SIZE.max(4.0 * f32::EPSILON * magnitude);
    if axis.size() < delta {
        axis.expand(delta)
    } else {
        axis
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slab_box() -> Aabb {
        Aabb::from_points(Vec3::new(-2.0, -2.0, 1.0), Vec3::new(2.0, 2.0, 5.0))
    }

    #[test]
    fn test_aabb_from_points_orders_corners() {
        let aabb = Aabb::from_points(Vec3::new(1.0, 2.0, 3.0), Vec3::new(-1.0, -2.0, -3.0));

        assert_eq!(aabb.min(), Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(aabb.max(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(aabb.centroid(), Vec3::ZERO);
    }

    #[test]
    fn test_aabb_flat_box_is_padded() {
        let aabb = Aabb::from_points(Vec3::new(-1.0, -1.0, 0.0), Vec3::new(1.0, 1.0, 0.0));

        assert!(aabb.z.size() > 0.0);
        assert!(aabb.contains_point(Vec3::ZERO));
    }

    #[test]
    fn test_flat_box_far_from_origin_keeps_thickness() {
        for z in [100.0, 2000.0, 10000.0, 1.0e6] {
            let aabb = Aabb::from_points(Vec3::new(-1.0, -1.0, z), Vec3::new(1.0, 1.0, z));
            assert!(aabb.z.min < z && aabb.z.max > z, "flat box at z = {z} lost its padding");

            let ray = Ray::new(Vec3::new(0.25, 0.25, 0.0), Vec3::Z);
            let (t0, t1) = aabb.ray_intersect(&ray).expect("ray should hit flat box");
            assert!(t0 <= z && z <= t1);
            assert!(aabb.hit(&ray));
        }
    }

    #[test]
    fn test_empty_intervals_stay_empty() {
        let aabb = Aabb::new(Interval::EMPTY, Interval::new(0.0, 1.0), Interval::new(0.0, 1.0));
        assert!(aabb.is_empty());
        assert!(!aabb.x.min.is_nan());
    }

    #[test]
    fn test_slab_test_axis_aligned_ray() {
        let ray = Ray::new(Vec3::new(-0.5, -1.0, -5.0), Vec3::new(0.0, 0.0, 1.0));
        let (min_t, max_t) = slab_box().ray_intersect(&ray).expect("ray should hit box");

        assert!((min_t - 6.0).abs() < 1e-5);
        assert!((max_t - 10.0).abs() < 1e-5);

        let entry = ray.at(min_t);
        assert!((entry - Vec3::new(-0.5, -1.0, 1.0)).length() < 1e-5);
    }

    #[test]
    fn test_slab_test_parallel_ray_outside_slab_misses() {
        // Parallel to x and y, but x is outside [-2, 2]
        let ray = Ray::new(Vec3::new(3.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(slab_box().ray_intersect(&ray).is_none());
        assert!(!slab_box().hit(&ray));
    }

    #[test]
    fn test_slab_test_negative_direction() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0));
        let (min_t, max_t) = slab_box().ray_intersect(&ray).expect("ray should hit box");

        assert!((min_t - 5.0).abs() < 1e-5);
        assert!((max_t - 9.0).abs() < 1e-5);
    }

    #[test]
    fn test_slab_test_oblique_miss() {
        let ray = Ray::new(Vec3::new(-5.0, -5.0, 0.0), Vec3::new(1.0, -1.0, 0.3));
        assert!(slab_box().ray_intersect(&ray).is_none());
    }

    #[test]
    fn test_hit_respects_ray_window() {
        let origin = Vec3::new(0.0, 0.0, -5.0);
        let dir = Vec3::new(0.0, 0.0, 1.0);

        assert!(slab_box().hit(&Ray::with_segment(origin, dir, 0.0, 7.0)));
        // Box starts at t = 6
        assert!(!slab_box().hit(&Ray::with_segment(origin, dir, 0.0, 5.0)));
        // Box ends at t = 10
        assert!(!slab_box().hit(&Ray::with_segment(origin, dir, 11.0, 20.0)));

        let clipped = slab_box()
            .clip_ray(&Ray::with_segment(origin, dir, 7.0, 20.0))
            .expect("window overlaps box");
        assert!((clipped.min - 7.0).abs() < 1e-5);
        assert!((clipped.max - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_empty_box() {
        let empty = Aabb::EMPTY;
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.3, 0.4, 0.5));

        assert!(empty.is_empty());
        assert_eq!(empty.surface_area(), 0.0);
        assert!(empty.ray_intersect(&ray).is_none());
        assert!(Aabb::enclosing(std::iter::empty()).is_empty());

        let unit = Aabb::from_points(Vec3::ZERO, Vec3::ONE);
        assert_eq!(Aabb::surrounding(&empty, &unit), unit);
        assert!(unit.contains_box(&empty));
    }

    #[test]
    fn test_surface_area_and_containment() {
        let aabb = Aabb::from_points(Vec3::ZERO, Vec3::new(1.0, 2.0, 3.0));
        assert!((aabb.surface_area() - 22.0).abs() < 1e-5);

        let outer = Aabb::from_points(Vec3::splat(-1.0), Vec3::splat(4.0));
        assert!(outer.contains_box(&aabb));
        assert!(!aabb.contains_box(&outer));
    }

    #[test]
    fn test_enclosing_points() {
        let aabb = Aabb::enclosing([
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(-1.0, 3.0, 0.5),
            Vec3::new(0.0, -2.0, -0.5),
        ]);

        assert_eq!(aabb.min(), Vec3::new(-1.0, -2.0, -0.5));
        assert_eq!(aabb.max(), Vec3::new(1.0, 3.0, 0.5));
    }
}
