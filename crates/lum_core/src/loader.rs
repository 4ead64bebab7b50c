//! JSON scene loading and the built-in test scenes.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use lum_math::Vec3;
use serde_json::json;
use thiserror::Error;

use crate::desc::{transform_or_identity, AcceleratorDesc, MaterialRef, SceneDesc, SurfaceDesc};
use crate::material::{Color, Material};
use crate::mesh::Mesh;
use crate::scene::{CameraSettings, Geometry, PointLight, SceneDescription, SurfaceDef};
use crate::settings::{AcceleratorSettings, SplitMethod, DEFAULT_MAX_PRIMS_IN_NODE};

/// Errors that can occur during scene loading.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to load OBJ {path}: {source}")]
    Obj {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },

    #[error("Unknown accelerator type \"{0}\"")]
    UnknownAccelerator(String),

    #[error("Unknown surface type \"{0}\"")]
    UnknownSurfaceType(String),

    #[error("Surface of type \"obj\" is missing \"filename\"")]
    MissingFilename,

    #[error("Invalid transform: {0}")]
    InvalidTransform(String),

    #[error("Unknown test scene {0}")]
    UnknownTestScene(u32),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Load a scene file. OBJ paths are resolved relative to the file's directory.
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<SceneDescription> {
    let path = path.as_ref();
    log::info!("Loading scene {}", path.display());

    let contents = std::fs::read_to_string(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    load_scene_from_str(&contents, base_dir)
}

/// Parse a scene from a JSON string.
pub fn load_scene_from_str(json: &str, base_dir: &Path) -> LoadResult<SceneDescription> {
    let desc: SceneDesc = serde_json::from_str(json)?;
    resolve(desc, base_dir)
}

/// Parse a scene from an already parsed JSON value.
pub fn load_scene_from_value(value: serde_json::Value, base_dir: &Path) -> LoadResult<SceneDescription> {
    let desc: SceneDesc = serde_json::from_value(value)?;
    resolve(desc, base_dir)
}

fn resolve(desc: SceneDesc, base_dir: &Path) -> LoadResult<SceneDescription> {
    let camera = match &desc.camera {
        Some(cam) => CameraSettings {
            transform: transform_or_identity(&cam.transform)?,
            width: cam.width,
            height: cam.height,
            dist: cam.dist,
        },
        None => CameraSettings::default(),
    };

    let materials: HashMap<String, Arc<Material>> = desc
        .materials
        .into_iter()
        .map(|m| (m.name.clone(), Arc::new(m)))
        .collect();
    let default_material = Arc::new(Material::default());

    let surfaces = desc
        .surfaces
        .iter()
        .map(|s| resolve_surface(s, &materials, &default_material, base_dir))
        .collect::<LoadResult<Vec<_>>>()?;

    let lights = desc
        .lights
        .iter()
        .map(|l| -> LoadResult<PointLight> {
            Ok(PointLight::new(&transform_or_identity(&l.transform)?, l.intensity))
        })
        .collect::<LoadResult<Vec<_>>>()?;

    let accelerator = match &desc.accelerator {
        Some(accel) => resolve_accelerator(accel)?,
        None => AcceleratorSettings::Naive,
    };

    let scene = SceneDescription {
        camera,
        image_width: desc.image_width,
        image_height: desc.image_height,
        image_samples: desc.image_samples.max(1),
        background: desc.background,
        surfaces,
        lights,
        accelerator,
    };

    log::info!(
        "Scene: {} surfaces ({} primitives), {} lights, {} materials, {}x{} @ {} spp",
        scene.surfaces.len(),
        scene.primitive_count(),
        scene.lights.len(),
        materials.len(),
        scene.image_width,
        scene.image_height,
        scene.image_samples * scene.image_samples
    );

    Ok(scene)
}

fn resolve_surface(
    desc: &SurfaceDesc,
    materials: &HashMap<String, Arc<Material>>,
    default_material: &Arc<Material>,
    base_dir: &Path,
) -> LoadResult<SurfaceDef> {
    let transform = transform_or_identity(&desc.transform)?;

    let material = match &desc.material {
        None => Arc::clone(default_material),
        Some(MaterialRef::Inline(m)) => Arc::new(m.clone()),
        Some(MaterialRef::Named(name)) => match materials.get(name) {
            Some(m) => Arc::clone(m),
            None => {
                log::warn!("Unknown material \"{}\", using the default material", name);
                Arc::clone(default_material)
            }
        },
    };

    let geometry = match desc.kind.as_str() {
        "sphere" => Geometry::Sphere {
            radius: desc.radius,
        },
        "quad" => Geometry::Quad { width: desc.width },
        "obj" => {
            let filename = desc.filename.as_ref().ok_or(LoadError::MissingFilename)?;
            let path = base_dir.join(filename);
            log::info!("Loading OBJ {}", path.display());
            Geometry::Mesh(Mesh::load_obj(&path, &transform)?)
        }
        other => return Err(LoadError::UnknownSurfaceType(other.to_string())),
    };

    Ok(SurfaceDef {
        geometry,
        transform,
        material,
    })
}

fn resolve_accelerator(desc: &AcceleratorDesc) -> LoadResult<AcceleratorSettings> {
    match desc.kind.to_ascii_lowercase().as_str() {
        "bbh" | "bvh" => {
            let split_method = desc
                .split_method
                .as_deref()
                .map_or(SplitMethod::Sah, SplitMethod::from_name);
            let max_prims = desc
                .max_prims_in_node
                .unwrap_or(DEFAULT_MAX_PRIMS_IN_NODE as i64);
            Ok(AcceleratorSettings::bbh(max_prims, split_method))
        }
        other => Err(LoadError::UnknownAccelerator(other.to_string())),
    }
}

/// One of the built-in test scenes.
///
/// * 0 - a single diffuse sphere
/// * 1 - a sphere resting on a large quad
/// * 2 - the "Steinbach screw": 1600 small spheres on a parametric surface
pub fn test_scene(kind: u32) -> LoadResult<SceneDescription> {
    let value = match kind {
        0 => json!({
            "camera": { "transform": { "o": [0, 0, 2.5] } },
            "surfaces": [
                {
                    "type": "sphere",
                    "material": { "kd": [1, 1, 1], "ks": [0, 0, 0], "n": 100 }
                }
            ],
            "lights": [
                { "transform": { "o": [0, 0, 5] }, "intensity": [10, 10, 10] }
            ],
            "image_samples": 1,
            "image_width": 512,
            "image_height": 512,
            "background": [0.1, 0.1, 0.1]
        }),
        1 => json!({
            "camera": { "transform": { "o": [0, 0, 4] } },
            "surfaces": [
                {
                    "type": "sphere",
                    "radius": 1,
                    "material": { "kd": [1, 0.75, 0.75], "ks": [0, 0, 0], "n": 100 }
                },
                {
                    "type": "quad",
                    "transform": { "o": [0, -1, 0], "x": [1, 0, 0], "y": [0, 0, -1], "z": [0, 1, 0] },
                    "width": 100,
                    "material": { "kd": [1, 1, 1], "ks": [0, 0, 0], "n": 100 }
                }
            ],
            "lights": [
                { "transform": { "translate": [6, 12, 6] }, "intensity": [100, 100, 100] }
            ],
            "image_samples": 1,
            "image_width": 512,
            "image_height": 512,
            "background": [0.2, 0.2, 0.2]
        }),
        2 => steinbach_screw(),
        other => return Err(LoadError::UnknownTestScene(other)),
    };

    load_scene_from_value(value, Path::new("."))
}

fn steinbach_screw() -> serde_json::Value {
    const NUM_I: usize = 40;
    const NUM_J: usize = 40;
    let radius = 0.5;

    let lerp = |a: Color, b: Color, t: f32| a + (b - a) * t;

    let mut surfaces = Vec::with_capacity(NUM_I * NUM_J);
    for i in 0..NUM_I {
        for j in 0..NUM_J {
            let s = (i as f32 + 0.5) / NUM_I as f32;
            let t = (j as f32 + 0.5) / NUM_J as f32;
            let u = s * 8.0 - 4.0;
            let v = t * 6.25;
            let center = Vec3::new(-u * v.cos(), v * u.cos() * 0.75, u * v.sin());

            let kd = 0.35
                * lerp(
                    lerp(Color::X, Color::Y, t),
                    lerp(Color::Z, Color::ZERO, t),
                    s,
                );

            surfaces.push(json!({
                "type": "sphere",
                "radius": radius,
                "transform": { "o": [center.x, center.y, center.z] },
                "material": { "kd": [kd.x, kd.y, kd.z], "ks": [2, 2, 2], "n": 200 }
            }));
        }
    }

    json!({
        "camera": {
            "transform": { "from": [5, 15, -25], "at": [0, 0, 0], "up": [0, 1, 0] },
            "width": 6,
            "height": 6,
            "dist": 15
        },
        "surfaces": surfaces,
        "lights": [
            { "transform": { "o": [0, 10, -10] }, "intensity": [500, 500, 500] }
        ],
        "image_samples": 1,
        "image_width": 512,
        "image_height": 512,
        "background": [0.2, 0.2, 0.2],
        "accelerator": { "type": "bbh" }
    })
}
