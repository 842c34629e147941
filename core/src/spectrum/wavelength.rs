//! Wavelength

use super::RayColor;
use crate::pbrt::*;

/// Shortest wavelength (in micrometres) sampled by a ray.
pub const WAVELENGTH_LOWER: Float = 0.38;

/// Longest wavelength (in micrometres) sampled by a ray.
pub const WAVELENGTH_HIGHER: Float = 0.72;

const WAVELENGTH_RANGE: Float = WAVELENGTH_HIGHER - WAVELENGTH_LOWER;

/// Peaks of the triangular red, green and blue responses.
const RESPONSE_CENTERS: [Float; 3] = [0.62, 0.55, 0.47];

/// Half-width of each response. Every tent lies fully inside the sampled
/// range, so each has area `RESPONSE_HALF_WIDTH`.
const RESPONSE_HALF_WIDTH: Float = 0.09;

/// Wavelength carried by a ray.
///
/// A ray starts out carrying all channels; once it passes through a
/// dispersive interface it is collapsed to a single wavelength and from then
/// on only transports the colour that wavelength responds to.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Wavelength {
    /// Wavelength in micrometres.
    pub value: Float,

    /// True once the ray has been collapsed to `value`.
    pub is_single: bool,
}

impl Default for Wavelength {
    fn default() -> Self {
        Self {
            value: 0.5 * (WAVELENGTH_LOWER + WAVELENGTH_HIGHER),
            is_single: false,
        }
    }
}

impl Wavelength {
    /// Pick a new wavelength uniformly over the visible range and reset the
    /// single-wavelength flag.
    ///
    /// * `u` - Uniform random sample in [0, 1).
    pub fn randomize(&mut self, u: Float) {
        self.value = WAVELENGTH_LOWER + u * WAVELENGTH_RANGE;
        self.is_single = false;
    }

    /// Colour weight of the current wavelength. Averaged over uniformly
    /// sampled wavelengths it equals white.
    pub fn rgb_weight(&self) -> RayColor {
        let scale = WAVELENGTH_RANGE / RESPONSE_HALF_WIDTH;
        let tent = |center: Float| {
            max(0.0, 1.0 - abs(self.value - center) / RESPONSE_HALF_WIDTH) * scale
        };
        RayColor::new(
            tent(RESPONSE_CENTERS[0]),
            tent(RESPONSE_CENTERS[1]),
            tent(RESPONSE_CENTERS[2]),
        )
    }

    /// Collapse to a single wavelength. Returns the colour weight to apply to
    /// the path throughput, which is white if the ray was already collapsed.
    pub fn make_single(&mut self) -> RayColor {
        if self.is_single {
            RayColor::one()
        } else {
            self.is_single = true;
            self.rgb_weight()
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    #[test]
    fn rgb_weight_averages_to_white() {
        let n = 100_000;
        let mut sum = [0.0_f64; 3];
        let mut wavelength = Wavelength::default();
        for i in 0..n {
            wavelength.randomize((i as Float + 0.5) / n as Float);
            let w = wavelength.rgb_weight();
            for (c, s) in sum.iter_mut().enumerate() {
                *s += w[c] as f64;
            }
        }
        for s in sum.iter() {
            assert!(approx_eq!(f64, s / n as f64, 1.0, epsilon = 1e-2), "{:?}", sum);
        }
    }

    #[test]
    fn make_single_weights_once() {
        let mut wavelength = Wavelength::default();
        wavelength.randomize(0.5);
        let first = wavelength.make_single();
        assert!(wavelength.is_single);
        assert!(!first.is_black());
        assert_eq!(wavelength.make_single(), RayColor::one());

        wavelength.randomize(0.1);
        assert!(!wavelength.is_single);
    }
}
