//! Film

use crate::geometry::*;
use crate::pbrt::*;
use crate::rng::RNG;
use crate::spectrum::*;
use parking_lot::Mutex;

/// Accumulated pixel data.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FilmPixel {
    /// Running sum of all samples.
    pub sum: RayColor,

    /// Running sum of samples into the secondary buffer.
    pub secondary_sum: RayColor,
}

/// Per-pixel accumulation buffer shared by all rendering threads. Each pixel
/// has its own lock so writes to different pixels never contend.
pub struct Film {
    /// Width in pixels.
    width: usize,

    /// Height in pixels.
    height: usize,

    /// Whether `secondary_sum` is accumulated.
    has_secondary: bool,

    /// Pixels in row-major order, row 0 at the top.
    pixels: Vec<Mutex<FilmPixel>>,
}

impl Film {
    /// Create a new film with all pixels set to zero.
    ///
    /// * `width`         - Width in pixels.
    /// * `height`        - Height in pixels.
    /// * `has_secondary` - Also accumulate into the secondary buffer.
    pub fn new(width: usize, height: usize, has_secondary: bool) -> Self {
        let pixels = (0..width * height).map(|_| Mutex::new(FilmPixel::default())).collect();
        Self {
            width,
            height,
            has_secondary,
            pixels,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns true if the secondary buffer is accumulated.
    pub fn has_secondary(&self) -> bool {
        self.has_secondary
    }

    /// Reset all pixels to zero. Used between passes.
    pub fn clear(&self) {
        for pixel in self.pixels.iter() {
            *pixel.lock() = FilmPixel::default();
        }
    }

    /// Returns a copy of a pixel.
    ///
    /// * `x` - Column.
    /// * `y` - Row.
    pub fn get_pixel(&self, x: usize, y: usize) -> FilmPixel {
        *self.pixels[y * self.width + x].lock()
    }

    /// Add a sample to a pixel. Non-finite samples are dropped.
    ///
    /// * `x`     - Column.
    /// * `y`     - Row.
    /// * `color` - Sample value.
    pub fn accumulate_color(&self, x: usize, y: usize, color: &RayColor) {
        debug_assert!(x < self.width && y < self.height);
        if !color.is_valid() {
            warn!("Dropping invalid sample {:?} at pixel ({}, {})", color, x, y);
            return;
        }

        let mut pixel = self.pixels[y * self.width + x].lock();
        pixel.sum += *color;
        if self.has_secondary {
            pixel.secondary_sum += *color;
        }
    }

    /// Add a sample at a continuous film position in [0, 1)², y pointing up.
    /// The pixel is chosen by rounding each coordinate up with probability
    /// equal to its fractional part, which acts as a stochastic box filter.
    /// Samples that map outside the film are dropped.
    ///
    /// * `pos`   - Film position.
    /// * `color` - Sample value.
    /// * `rng`   - Random number generator for the jitter.
    pub fn accumulate_color_at(&self, pos: &Point2f, color: &RayColor, rng: &mut RNG) {
        if let Some((x, y)) = self.film_to_pixel(pos, &rng.uniform_point2f()) {
            self.accumulate_color(x, y, color);
        }
    }

    /// Map a film position to a pixel.
    ///
    /// * `pos` - Film position.
    /// * `u`   - Uniform random values for the jitter.
    pub fn film_to_pixel(&self, pos: &Point2f, u: &Point2f) -> Option<(usize, usize)> {
        let fx = pos.x * self.width as Float;
        let fy = pos.y * self.height as Float;
        if !(fx.is_finite() && fy.is_finite()) {
            return None;
        }

        let jitter = |f: Float, u: Float| {
            let i = f.floor();
            if u < f - i {
                i as i64 + 1
            } else {
                i as i64
            }
        };
        let x = jitter(fx, u.x);
        let y = self.height as i64 - 1 - jitter(fy, u.y);

        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            Some((x as usize, y as usize))
        } else {
            None
        }
    }

    /// Convert the accumulated sums to 8-bit sRGB, row 0 at the top.
    ///
    /// * `scale` - Multiplier applied before clamping (e.g. 1 / spp).
    pub fn to_rgb8(&self, scale: Float) -> Vec<u8> {
        let mut out = Vec::with_capacity(3 * self.pixels.len());
        for pixel in self.pixels.iter() {
            let rgb = (pixel.lock().sum * scale).to_rgb();
            for c in rgb {
                out.push((255.0 * gamma_correct(clamp(c, 0.0, 1.0)) + 0.5) as u8);
            }
        }
        out
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn concurrent_accumulation_loses_nothing() {
        let film = Film::new(4, 4, true);
        crossbeam::scope(|scope| {
            for _ in 0..64 {
                scope.spawn(|_| {
                    for _ in 0..1000 {
                        film.accumulate_color(2, 1, &RayColor::one());
                    }
                });
            }
        })
        .unwrap();

        let pixel = film.get_pixel(2, 1);
        assert_eq!(pixel.sum, RayColor::splat(64000.0));
        assert_eq!(pixel.secondary_sum, RayColor::splat(64000.0));
        assert_eq!(film.get_pixel(1, 2).sum, RayColor::zero());
    }

    #[test]
    fn invalid_samples_are_dropped() {
        let film = Film::new(2, 2, false);
        film.accumulate_color(0, 0, &RayColor::new(Float::NAN, 0.0, 0.0));
        film.accumulate_color(0, 0, &RayColor::new(-1.0, 0.0, 0.0));
        film.accumulate_color(0, 0, &RayColor::new(0.5, 0.5, 0.5));
        assert_eq!(film.get_pixel(0, 0).sum, RayColor::splat(0.5));
        assert_eq!(film.get_pixel(0, 0).secondary_sum, RayColor::zero());
        film.clear();
        assert_eq!(film.get_pixel(0, 0).sum, RayColor::zero());
    }

    #[test]
    fn film_position_maps_with_y_up() {
        let film = Film::new(10, 5, false);
        let no_jitter = Point2f::new(1.0, 1.0);
        assert_eq!(film.film_to_pixel(&Point2f::new(0.05, 0.1), &no_jitter), Some((0, 4)));
        assert_eq!(film.film_to_pixel(&Point2f::new(0.95, 0.9), &no_jitter), Some((9, 0)));
        assert_eq!(film.film_to_pixel(&Point2f::new(0.35, 0.5), &Point2f::new(0.0, 0.0)), Some((4, 1)));
        assert_eq!(film.film_to_pixel(&Point2f::new(-0.2, 0.5), &no_jitter), None);
        assert_eq!(film.film_to_pixel(&Point2f::new(0.5, 1.5), &no_jitter), None);
    }

    #[test]
    fn film_space_samples_split_between_neighbours() {
        let film = Film::new(4, 2, false);
        let mut rng = RNG::new(7);
        for _ in 0..10000 {
            film.accumulate_color_at(&Point2f::new(0.325, 0.25), &RayColor::one(), &mut rng);
        }

        let column = |x: usize| (0..2).map(|y| film.get_pixel(x, y).sum.r()).sum::<Float>();
        let row = |y: usize| (0..4).map(|x| film.get_pixel(x, y).sum.r()).sum::<Float>();
        assert_eq!(column(0) + column(3), 0.0);
        assert_eq!(column(1) + column(2), 10000.0);
        assert!((column(1) - 7000.0).abs() < 300.0);
        assert!((row(0) - 5000.0).abs() < 300.0);
        assert!((row(1) - 5000.0).abs() < 300.0);
    }

    #[test]
    fn film_space_samples_past_the_edge_are_dropped() {
        let film = Film::new(3, 1, false);
        let mut rng = RNG::new(11);
        for _ in 0..10000 {
            film.accumulate_color_at(&Point2f::new(0.5, 0.5), &RayColor::one(), &mut rng);
        }

        let kept: Float = (0..3).map(|x| film.get_pixel(x, 0).sum.r()).sum();
        assert_eq!(film.get_pixel(0, 0).sum, RayColor::zero());
        assert!((kept - 5000.0).abs() < 300.0);
    }

    #[test]
    fn rgb8_output_is_clamped_and_gamma_corrected() {
        let film = Film::new(2, 1, false);
        film.accumulate_color(0, 0, &RayColor::new(4.0, 0.0, 1.0));
        let rgb = film.to_rgb8(0.5);
        assert_eq!(rgb.len(), 6);
        assert_eq!(&rgb[0..3], &[255, 0, 188]);
        assert_eq!(&rgb[3..6], &[0, 0, 0]);
    }

    proptest! {
        #[test]
        fn mapped_pixels_stay_in_range(
            x in -0.5f32..1.5,
            y in -0.5f32..1.5,
            ux in 0.0f32..1.0,
            uy in 0.0f32..1.0,
        ) {
            let film = Film::new(7, 3, false);
            if let Some((px, py)) = film.film_to_pixel(&Point2f::new(x, y), &Point2f::new(ux, uy)) {
                prop_assert!(px < 7 && py < 3);
                let fx = x * 7.0;
                prop_assert!((px as f32 - fx.floor()).abs() <= 1.0);
            }
        }
    }
}
