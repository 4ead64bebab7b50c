//! Pinhole camera for primary ray generation.

use lum_core::CameraSettings;
use lum_math::{Ray, Transform, Vec3};

/// A pinhole camera looking down its local -z axis.
///
/// The image plane has size `width x height` and sits at distance `dist`
/// in front of the eye.
#[derive(Debug, Clone)]
pub struct Camera {
    transform: Transform,
    width: f32,
    height: f32,
    dist: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(&CameraSettings::default())
    }
}

impl Camera {
    pub fn new(settings: &CameraSettings) -> Self {
        Self {
            transform: settings.transform,
            width: settings.width,
            height: settings.height,
            dist: settings.dist,
        }
    }

    /// Set the image plane size.
    pub fn with_image_plane(mut self, width: f32, height: f32, dist: f32) -> Self {
        self.width = width;
        self.height = height;
        self.dist = dist;
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Ray through image-plane location `(u, v)`, both in `[0, 1]` with
    /// `(0, 0)` at the top-left corner of the image.
    pub fn generate_ray(&self, u: f32, v: f32) -> Ray {
        let local_dir = Vec3::new(
            -0.5 * self.width + u * self.width,
            0.5 * self.height - v * self.height,
            -self.dist,
        );
        Ray::new(
            self.transform.point(Vec3::ZERO),
            self.transform.vector(local_dir).normalize(),
        )
    }
}
