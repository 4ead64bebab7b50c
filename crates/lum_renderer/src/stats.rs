//! Ray tracing counters.

use std::ops::AddAssign;

/// Counters collected while tracing.
///
/// Passed by `&mut` through intersection and shading so each render call
/// owns its own totals.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RayStats {
    /// Rays intersected against the scene (camera, shadow and secondary)
    pub rays_traced: u64,
    /// Ray-primitive intersection tests performed
    pub primitives_intersected: u64,
}

impl RayStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mean number of primitive tests per traced ray.
    pub fn average_intersections_per_ray(&self) -> f64 {
        if self.rays_traced == 0 {
            0.0
        } else {
            self.primitives_intersected as f64 / self.rays_traced as f64
        }
    }
}

impl AddAssign for RayStats {
    fn add_assign(&mut self, rhs: RayStats) {
        self.rays_traced += rhs.rays_traced;
        self.primitives_intersected += rhs.primitives_intersected;
    }
}
