use crate::{Interval, Vec3};

/// Default lower bound of a ray's parameter window. Keeps secondary rays from
/// re-hitting the surface they start on.
pub const RAY_EPSILON: f32 = 1e-4;

/// A ray segment `origin + t * direction` for `t` in `[mint, maxt]`.
///
/// `maxt` is shrunk by intersection routines as closer hits are found, so a
/// later test only reports hits in front of the current closest one. `depth`
/// counts the bounces that led to this ray (0 for camera rays).
///
/// The direction is not required to be normalized.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    pub mint: f32,
    pub maxt: f32,
    pub depth: u32,
}

impl Ray {
    /// Create a new ray with the default window `[RAY_EPSILON, inf)`.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self::with_segment(origin, direction, RAY_EPSILON, f32::INFINITY)
    }

    /// Create a ray restricted to `[mint, maxt]`.
    pub fn with_segment(origin: Vec3, direction: Vec3, mint: f32, maxt: f32) -> Self {
        Self {
            origin,
            direction,
            mint,
            maxt,
            depth: 0,
        }
    }

    /// A secondary ray one bounce deeper than `self`.
    pub fn spawn(&self, origin: Vec3, direction: Vec3) -> Self {
        Self {
            depth: self.depth + 1,
            ..Self::new(origin, direction)
        }
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// The valid parameter window as an interval.
    #[inline]
    pub fn interval(&self) -> Interval {
        Interval::new(self.mint, self.maxt)
    }

    /// Returns true if `t` lies inside the ray's current window.
    #[inline]
    pub fn accepts(&self, t: f32) -> bool {
        self.interval().contains(t)
    }
}
