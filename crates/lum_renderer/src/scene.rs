//! Renderable scene: accelerator, lights, camera and image settings.

use lum_core::{AcceleratorSettings, Color, PointLight, SceneDescription};
use lum_math::Ray;

use crate::{shade, Accelerator, Bbh, Camera, ImageBuffer, Intersection, NaiveAccel, RayStats, Surface};

/// A scene ready for ray queries.
///
/// The accelerator is built once in [`Scene::from_description`]; after that
/// the scene is read-only and every query carries its own [`RayStats`].
pub struct Scene {
    camera: Camera,
    accelerator: Box<dyn Accelerator>,
    lights: Vec<PointLight>,
    background: Color,
    image_width: u32,
    image_height: u32,
    image_samples: u32,
}

impl Scene {
    /// Register every surface of `desc` with the configured accelerator and
    /// build it.
    pub fn from_description(desc: SceneDescription) -> Self {
        let mut accelerator: Box<dyn Accelerator> = match desc.accelerator {
            AcceleratorSettings::Naive => Box::new(NaiveAccel::new()),
            AcceleratorSettings::Bbh {
                max_prims_in_node,
                split_method,
            } => Box::new(Bbh::new(max_prims_in_node, split_method)),
        };

        for def in desc.surfaces {
            accelerator.add_surface(Surface::from(def));
        }
        accelerator.build();

        log::info!(
            "Scene ready: {} primitives, {} lights, {}x{} @ {} spp",
            accelerator.primitive_count(),
            desc.lights.len(),
            desc.image_width,
            desc.image_height,
            desc.image_samples * desc.image_samples
        );

        Self {
            camera: Camera::new(&desc.camera),
            accelerator,
            lights: desc.lights,
            background: desc.background,
            image_width: desc.image_width,
            image_height: desc.image_height,
            image_samples: desc.image_samples.max(1),
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn accelerator(&self) -> &dyn Accelerator {
        self.accelerator.as_ref()
    }

    pub fn lights(&self) -> &[PointLight] {
        &self.lights
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn image_size(&self) -> (u32, u32) {
        (self.image_width, self.image_height)
    }

    /// Samples per pixel along each axis.
    pub fn image_samples(&self) -> u32 {
        self.image_samples
    }

    /// Closest hit along `ray`. Counts one traced ray.
    pub fn intersect<'a>(&'a self, ray: &Ray, its: &mut Intersection<'a>, stats: &mut RayStats) -> bool {
        stats.rays_traced += 1;
        self.accelerator.intersect(ray, its, stats)
    }

    /// Radiance arriving along `ray`; the background when it escapes.
    pub fn radiance(&self, ray: &Ray, stats: &mut RayStats) -> Color {
        let mut its = Intersection::default();
        if self.intersect(ray, &mut its, stats) {
            shade(self, ray, &its, stats)
        } else {
            self.background
        }
    }

    /// Render the full image.
    ///
    /// Each pixel averages `image_samples x image_samples` stratified camera
    /// rays through the pixel.
    pub fn raytrace(&self) -> (ImageBuffer, RayStats) {
        let (width, height) = self.image_size();
        let n = self.image_samples;
        let inv_samples = 1.0 / (n * n) as f32;
        let sub_width = (width * n) as f32;
        let sub_height = (height * n) as f32;

        let mut image = ImageBuffer::new(width, height);
        let mut stats = RayStats::new();
        let report_every = (height / 10).max(1);

        for y in 0..height {
            for x in 0..width {
                let mut color = Color::ZERO;
                for i in 0..n {
                    for j in 0..n {
                        let u = ((x * n + i) as f32 + 0.5) / sub_width;
                        let v = ((y * n + j) as f32 + 0.5) / sub_height;
                        let ray = self.camera.generate_ray(u, v);
                        color += self.radiance(&ray, &mut stats);
                    }
                }
                image.set(x, y, color * inv_samples);
            }

            if (y + 1) % report_every == 0 || y + 1 == height {
                log::info!("Rendered {}/{} rows", y + 1, height);
            }
        }

        (image, stats)
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("camera", &self.camera)
            .field("primitives", &self.accelerator.primitive_count())
            .field("lights", &self.lights.len())
            .field("background", &self.background)
            .field("image_width", &self.image_width)
            .field("image_height", &self.image_height)
            .field("image_samples", &self.image_samples)
            .finish()
    }
}
