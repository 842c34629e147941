//! Tile based path tracer

use crate::scene::*;
use indicatif::{ProgressBar, ProgressStyle};
use materials::*;
use rt_core::film::*;
use rt_core::geometry::*;
use rt_core::interaction::*;
use rt_core::light::*;
use rt_core::pbrt::*;
use rt_core::reflection::*;
use rt_core::sampling::*;
use rt_core::simd::*;
use rt_core::spectrum::*;
use rt_core::traversal::*;

/// Paths longer than this are terminated by Russian roulette.
const RUSSIAN_ROULETTE_DEPTH: usize = 3;

/// Render settings.
#[derive(Copy, Clone, Debug)]
pub struct RenderSettings {
    /// Maximum number of path vertices.
    pub max_depth: usize,

    /// Samples per pixel.
    pub samples_per_pixel: usize,

    /// Tile edge length in pixels.
    pub tile_size: usize,

    /// Number of worker threads.
    pub threads: usize,

    /// Base seed for per tile random number generators.
    pub seed: u64,

    /// Trace primary rays in packets.
    pub packets: bool,

    /// Hide the progress bar.
    pub quiet: bool,
}

/// Unidirectional path tracer with next event estimation and multiple
/// importance sampling of light and BSDF samples.
pub struct PathTracer<'a> {
    scene: &'a Scene,
    film: &'a Film,
    settings: RenderSettings,
}

/// Returns a point just off the surface on the side `dir` points to.
///
/// * `isect` - Surface point.
/// * `dir`   - Direction leaving the surface.
fn offset_origin(isect: &IntersectionData, dir: &Vector3f) -> Point3f {
    let sign = if isect.normal.dot(dir) >= 0.0 { 1.0 } else { -1.0 };
    isect.position + isect.normal * (sign * RAY_EPSILON)
}

/// Create a progress bar.
///
/// * `len`   - Number of steps.
/// * `quiet` - Returns a hidden progress bar if true.
fn create_progress_reporter(len: u64, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let style = ProgressStyle::with_template("{msg} [{elapsed_precise}] [{wide_bar}] {pos}/{len} ({eta})")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    let progress = ProgressBar::new(len);
    progress.set_style(style);
    progress
}

impl<'a> PathTracer<'a> {
    /// Create a new path tracer.
    ///
    /// * `scene`    - The scene.
    /// * `film`     - Film receiving the samples.
    /// * `settings` - Render settings.
    pub fn new(scene: &'a Scene, film: &'a Film, settings: RenderSettings) -> Self {
        Self { scene, film, settings }
    }

    /// Render the scene into the film. Returns the merged ray tracing counters
    /// of all workers.
    pub fn render(&self) -> Result<RayTracingCounters, String> {
        let tile_size = self.settings.tile_size;
        let tiles_x = (self.film.width() + tile_size - 1) / tile_size;
        let tiles_y = (self.film.height() + tile_size - 1) / tile_size;
        let tile_count = tiles_x * tiles_y;
        let threads = self.settings.threads.max(1);

        info!("Rendering {}x{} tiles on {} threads", tiles_x, tiles_y, threads);

        let progress = create_progress_reporter(tile_count as u64, self.settings.quiet);
        progress.set_message("Rendering scene");

        let counters = crossbeam::scope(|scope| -> Result<RayTracingCounters, String> {
            let (tx, rx) = crossbeam_channel::bounded(threads);

            // Spawn worker threads.
            let workers: Vec<_> = (0..threads)
                .map(|_| {
                    let rxc = rx.clone();
                    let progress = &progress;
                    scope.spawn(move |_| {
                        let mut counters = RayTracingCounters::default();
                        for tile_idx in rxc.iter() {
                            let seed = self
                                .settings
                                .seed
                                .wrapping_mul(tile_count as u64)
                                .wrapping_add(tile_idx as u64);
                            let mut context = RenderingContext::new(seed);
                            self.render_tile(tile_idx, tiles_x, &mut context);
                            counters += &context.counters;
                            progress.inc(1);
                        }
                        counters
                    })
                })
                .collect();
            drop(rx); // Drop extra rx since we've cloned one for each woker.

            // Send work.
            for tile_idx in 0..tile_count {
                if tx.send(tile_idx).is_err() {
                    break;
                }
            }
            drop(tx);

            let mut total = RayTracingCounters::default();
            for worker in workers {
                let counters = worker.join().map_err(|_| "Render worker panicked.".to_string())?;
                total += &counters;
            }
            Ok(total)
        })
        .map_err(|_| "Render worker panicked.".to_string())??;

        progress.finish_with_message("Render complete");
        Ok(counters)
    }

    /// Render an image tile.
    ///
    /// * `tile_idx` - Unique tile index.
    /// * `tiles_x`  - Number of tiles in x direction.
    /// * `context`  - Thread state.
    fn render_tile(&self, tile_idx: usize, tiles_x: usize, context: &mut RenderingContext) {
        let (width, height) = (self.film.width(), self.film.height());
        let tile_size = self.settings.tile_size;
        let x0 = (tile_idx % tiles_x) * tile_size;
        let y0 = (tile_idx / tiles_x) * tile_size;
        let x1 = min(x0 + tile_size, width);
        let y1 = min(y0 + tile_size, height);

        debug!("Starting image tile {tile_idx} -> ({x0}, {y0})..({x1}, {y1})");

        for y in y0..y1 {
            for x in x0..x1 {
                let mut remaining = self.settings.samples_per_pixel;
                while remaining > 0 {
                    let count = min(remaining, SIMD_WIDTH);

                    // Row 0 is at the top of the film; film positions have y up.
                    let rays: [Ray; SIMD_WIDTH] = std::array::from_fn(|_| {
                        let u = context.rng.uniform_point2f();
                        let film_pos = Point2f::new(
                            (x as Float + u.x) / width as Float,
                            ((height - 1 - y) as Float + u.y) / height as Float,
                        );
                        self.scene.camera.generate_ray(&film_pos)
                    });

                    let hits: [Option<HitPoint>; SIMD_WIDTH] = if self.settings.packets {
                        let ray8 = Ray8::from_rays(&rays);
                        let mut hit8 = HitPoint8::default();
                        self.scene
                            .aggregate
                            .traverse_packet(&mut PacketTraversalContext::new(&ray8, &mut hit8, context));
                        std::array::from_fn(|lane| Some(hit8.lane(lane)))
                    } else {
                        [None; SIMD_WIDTH]
                    };

                    for (ray, hit) in rays.iter().zip(hits).take(count) {
                        let color = self.radiance(ray, hit, context);
                        self.film.accumulate_color(x, y, &color);
                    }
                    remaining -= count;
                }
            }
        }
    }

    /// Estimate the radiance arriving along a camera ray.
    ///
    /// * `primary`     - Camera ray.
    /// * `primary_hit` - Closest hit of the camera ray if already traced.
    /// * `context`     - Thread state.
    pub fn radiance(&self, primary: &Ray, primary_hit: Option<HitPoint>, context: &mut RenderingContext) -> RayColor {
        let u = context.rng.uniform_float();
        context.wavelength.randomize(u);

        let scene = self.scene;
        let light_pick_prob = 1.0 / scene.lights.len().max(1) as Float;

        let mut ray = *primary;
        let mut next_hit = primary_hit;
        let mut throughput = RayColor::one();
        let mut result = RayColor::zero();
        let mut last_pdf_w = 1.0;
        let mut last_specular = true;

        for depth in 0..self.settings.max_depth {
            let hit_point = next_hit.take().unwrap_or_else(|| {
                let mut hit_point = HitPoint::default();
                scene
                    .aggregate
                    .traverse(&mut SingleTraversalContext::new(&ray, &mut hit_point, context));
                hit_point
            });

            let isect = match scene.aggregate.evaluate_intersection(&ray, &hit_point) {
                Some(isect) => isect,
                None => {
                    for light in scene.background_lights() {
                        let r = light.get_radiance(&RadianceParam {
                            ray: &ray,
                            hit_point: ray.at(BACKGROUND_LIGHT_DISTANCE),
                            normal: -ray.dir,
                            wavelength: &context.wavelength,
                        });
                        let weight = if last_specular {
                            1.0
                        } else {
                            power_heuristic(last_pdf_w, r.direct_pdf_w * light_pick_prob)
                        };
                        result += throughput * r.radiance * weight;
                    }
                    break;
                }
            };

            let material = scene.material(hit_point.object_id);
            if !material.get_mask_value(&isect.tex_coord) {
                ray = Ray::new(offset_origin(&isect, &ray.dir), ray.dir);
                continue;
            }

            let mut shading = ShadingData {
                intersection: isect,
                outgoing_dir_world: -ray.dir,
                material_params: MaterialParams::default(),
            };
            material.evaluate_shading_data(&mut shading);

            // Emission.
            match scene.object_light(hit_point.object_id) {
                Some(light) => {
                    let r = light.get_radiance(&RadianceParam {
                        ray: &ray,
                        hit_point: isect.position,
                        normal: isect.normal,
                        wavelength: &context.wavelength,
                    });
                    if !r.radiance.is_black() {
                        let weight = if depth == 0 || last_specular {
                            1.0
                        } else {
                            power_heuristic(last_pdf_w, r.direct_pdf_w * light_pick_prob)
                        };
                        result += throughput * r.radiance * weight;
                    }
                }
                None => result += throughput * shading.material_params.emission_color,
            }

            if depth + 1 == self.settings.max_depth {
                break;
            }

            if !material.is_delta() {
                result += throughput * self.sample_light(material, &shading, light_pick_prob, context);
            }

            let u = context.rng.uniform_float3();
            let sample = material.sample(&mut context.wavelength, &shading, u);
            if !sample.is_valid() || sample.pdf <= 0.0 {
                break;
            }
            throughput *= sample.color;
            last_specular = sample.event.is_specular();
            last_pdf_w = sample.pdf;

            if depth >= RUSSIAN_ROULETTE_DEPTH {
                let q = min(throughput.max(), 0.95);
                if context.rng.uniform_float() >= q {
                    break;
                }
                throughput = throughput / q;
            }

            let dir = sample.incoming_dir_world;
            ray = Ray::new(offset_origin(&shading.intersection, &dir), dir);
        }

        result
    }

    /// Next event estimation: pick one light uniformly, sample it and weight
    /// the unoccluded contribution against BSDF sampling.
    ///
    /// * `material`        - Material at the shading point.
    /// * `shading`         - Shading point.
    /// * `light_pick_prob` - Probability of picking any one light.
    /// * `context`         - Thread state.
    fn sample_light(
        &self,
        material: &Material,
        shading: &ShadingData,
        light_pick_prob: Float,
        context: &mut RenderingContext,
    ) -> RayColor {
        let lights = &self.scene.lights;
        if lights.is_empty() {
            return RayColor::zero();
        }
        let index = context.rng.bounded_uniform_u32(0, lights.len() as u32);
        let light = lights[index as usize].as_ref();

        let sample = context.rng.uniform_float3();
        let illum = match light.illuminate(&IlluminateParam {
            intersection: &shading.intersection,
            wavelength: &context.wavelength,
            sample,
        }) {
            Some(illum) if illum.direct_pdf_w > 0.0 && !illum.radiance.is_black() => illum,
            _ => return RayColor::zero(),
        };

        let eval = material.evaluate(&context.wavelength, shading, &illum.direction_to_light);
        if eval.color.is_black() {
            return RayColor::zero();
        }

        let dir = illum.direction_to_light;
        let shadow_ray = Ray::new(offset_origin(&shading.intersection, &dir), dir);
        let mut hit_point = HitPoint::with_max_distance(illum.distance - 2.0 * RAY_EPSILON);
        if self
            .scene
            .aggregate
            .traverse_shadow(&mut SingleTraversalContext::new(&shadow_ray, &mut hit_point, context))
        {
            return RayColor::zero();
        }

        let weight = if light.is_delta() {
            1.0
        } else {
            power_heuristic(illum.direct_pdf_w * light_pick_prob, eval.direct_pdf_w)
        };
        let cos = abs(dir.dot(&shading.intersection.normal));
        illum.radiance * eval.color * (weight * cos / (illum.direct_pdf_w * light_pick_prob))
    }
}
