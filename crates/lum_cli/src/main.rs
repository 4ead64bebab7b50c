use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use lum_core::{load_scene, test_scene, SceneDescription};
use lum_renderer::Scene;

/// Render a scene with the Lumen ray tracer and write a PNG.
#[derive(Parser, Debug)]
#[command(name = "lumen", version)]
struct Args {
    /// Scene file (JSON), or `testsceneN` for a built-in scene
    scene: String,

    /// Output image (defaults to the scene name with a .png extension)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Built-in test scene index, if `name` is of the form `testsceneN`.
fn test_scene_index(name: &str) -> Option<u32> {
    name.strip_prefix("testscene")?.parse().ok()
}

fn default_output(scene: &str) -> PathBuf {
    Path::new(scene).with_extension("png")
}

fn load(scene: &str) -> Result<SceneDescription> {
    match test_scene_index(scene) {
        Some(index) => test_scene(index).with_context(|| format!("Failed to build {scene}")),
        None => load_scene(scene).with_context(|| format!("Failed to load scene {scene}")),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let output = args.output.unwrap_or_else(|| default_output(&args.scene));

    let start = Instant::now();
    let desc = load(&args.scene)?;
    let scene = Scene::from_description(desc);
    log::info!("Scene built in {:.2?}", start.elapsed());

    let start = Instant::now();
    let (image, stats) = scene.raytrace();
    log::info!("Rendered in {:.2?}", start.elapsed());
    log::info!(
        "Traced {} rays, {} primitive intersections, {:.2} intersections per ray",
        stats.rays_traced,
        stats.primitives_intersected,
        stats.average_intersections_per_ray()
    );

    image
        .save_png(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    Ok(())
}
