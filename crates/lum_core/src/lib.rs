//! Lumen Core - scene description for the Lumen ray tracer.
//!
//! This crate provides:
//!
//! - **Scene types**: `SceneDescription`, `SurfaceDef`, `Material`, `PointLight`, `Mesh`
//! - **Scene loading**: JSON scene files, OBJ meshes, and built-in test scenes
//! - **Accelerator settings**: which acceleration structure to build and how
//!
//! # Example
//!
//! ```ignore
//! use lum_core::load_scene;
//!
//! let scene = load_scene("scenes/spheres.json")?;
//! println!("Loaded {} surfaces, {} lights",
//!     scene.surfaces.len(),
//!     scene.lights.len());
//! ```

pub mod desc;
pub mod loader;
pub mod material;
pub mod mesh;
pub mod scene;
pub mod settings;

// Re-export commonly used types
pub use loader::{load_scene, load_scene_from_str, load_scene_from_value, test_scene, LoadError, LoadResult};
pub use material::{Color, Material, DEFAULT_MATERIAL};
pub use mesh::Mesh;
pub use scene::{CameraSettings, Geometry, PointLight, SceneDescription, SurfaceDef};
pub use settings::{AcceleratorSettings, SplitMethod, DEFAULT_MAX_PRIMS_IN_NODE};
