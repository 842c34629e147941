#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

mod camera;
mod options;
mod renderer;
mod scene;

use options::OPTIONS;
use renderer::*;
use rt_core::film::Film;
use rt_core::pbrt::Float;
use rt_core::reflection::bsdf_names;
use scene::Scene;

/// BVH leaf size used for the demo scene.
const MAX_PRIMS_IN_NODE: usize = 2;

fn main() {
    // Initialize `env_logger`.
    env_logger::init();

    if let Err(e) = run() {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    OPTIONS.validate()?;
    debug!("Registered BSDFs: {}", bsdf_names().collect::<Vec<_>>().join(", "));

    let aspect = OPTIONS.width as Float / OPTIONS.height as Float;
    let scene = Scene::demo(aspect, MAX_PRIMS_IN_NODE, OPTIONS.split.into());
    let film = Film::new(OPTIONS.width, OPTIONS.height, false);

    let settings = RenderSettings {
        max_depth: OPTIONS.max_depth,
        samples_per_pixel: OPTIONS.samples_per_pixel,
        tile_size: OPTIONS.tile_size,
        threads: OPTIONS.threads(),
        seed: OPTIONS.seed,
        packets: OPTIONS.packets,
        quiet: OPTIONS.quiet,
    };
    let counters = PathTracer::new(&scene, &film, settings).render()?;
    info!("{counters}");

    write_image(&film, &OPTIONS.image_file, 1.0 / OPTIONS.samples_per_pixel as Float)
}

/// Tonemap the film and write it as an 8-bit image.
///
/// * `film`  - The film.
/// * `path`  - Output path; the format follows the extension.
/// * `scale` - Scale applied to the accumulated sums.
fn write_image(film: &Film, path: &str, scale: Float) -> Result<(), String> {
    let (width, height) = (film.width() as u32, film.height() as u32);
    info!("Writing image {path} with resolution {width}x{height}");

    let imgbuf = image::RgbImage::from_raw(width, height, film.to_rgb8(scale))
        .ok_or_else(|| format!("Invalid image buffer for {path}."))?;
    imgbuf
        .save(path)
        .map_err(|err| format!("Error saving output image {path}: {err}."))
}
