//! BSDF

use super::*;

/// Inputs to `BSDF::evaluate`.
pub struct EvaluationContext<'a> {
    /// Parameters resolved at the shading point.
    pub params: &'a MaterialParams,

    /// Wavelength carried by the ray.
    pub wavelength: &'a Wavelength,

    /// Direction towards the viewer.
    pub outgoing_dir: Vector3f,

    /// Direction towards the light.
    pub incoming_dir: Vector3f,
}

impl<'a> EvaluationContext<'a> {
    /// Create a new `EvaluationContext`.
    ///
    /// * `params`       - Parameters resolved at the shading point.
    /// * `wavelength`   - Wavelength carried by the ray.
    /// * `outgoing_dir` - Direction towards the viewer.
    /// * `incoming_dir` - Direction towards the light.
    pub fn new(
        params: &'a MaterialParams,
        wavelength: &'a Wavelength,
        outgoing_dir: Vector3f,
        incoming_dir: Vector3f,
    ) -> Self {
        Self {
            params,
            wavelength,
            outgoing_dir,
            incoming_dir,
        }
    }
}

/// Inputs to `BSDF::sample`. The wavelength is mutable because dispersive
/// interfaces collapse it.
pub struct SamplingContext<'a> {
    /// Parameters resolved at the shading point.
    pub params: &'a MaterialParams,

    /// Wavelength carried by the ray.
    pub wavelength: &'a mut Wavelength,

    /// Direction towards the viewer.
    pub outgoing_dir: Vector3f,

    /// Uniform random numbers in [0, 1). The first two pick a direction within
    /// a lobe and the third picks the lobe.
    pub sample: [Float; 3],
}

impl<'a> SamplingContext<'a> {
    /// Create a new `SamplingContext`.
    ///
    /// * `params`       - Parameters resolved at the shading point.
    /// * `wavelength`   - Wavelength carried by the ray.
    /// * `outgoing_dir` - Direction towards the viewer.
    /// * `sample`       - Uniform random numbers in [0, 1).
    pub fn new(
        params: &'a MaterialParams,
        wavelength: &'a mut Wavelength,
        outgoing_dir: Vector3f,
        sample: [Float; 3],
    ) -> Self {
        Self {
            params,
            wavelength,
            outgoing_dir,
            sample,
        }
    }

    /// Returns the first two random numbers.
    pub fn sample_2d(&self) -> Point2f {
        Point2f::new(self.sample[0], self.sample[1])
    }

    /// Reborrows as an evaluation context for the given incoming direction.
    ///
    /// * `incoming_dir` - Direction towards the light.
    pub fn to_evaluation(&self, incoming_dir: Vector3f) -> EvaluationContext<'_> {
        EvaluationContext::new(self.params, &*self.wavelength, self.outgoing_dir, incoming_dir)
    }
}

/// Result of `BSDF::sample`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BSDFSample {
    /// BSDF value times the cosine of the incoming direction divided by
    /// `pdf`.
    pub weight: RayColor,

    /// Sampled direction towards the light.
    pub incoming_dir: Vector3f,

    /// Density of the sampled direction (solid angle), or the discrete
    /// probability of the chosen lobe for specular events.
    pub pdf: Float,

    /// What kind of event was sampled.
    pub event: BSDFEvent,
}

impl BSDFSample {
    /// Create a new `BSDFSample`.
    ///
    /// * `weight`       - Importance weighted throughput.
    /// * `incoming_dir` - Sampled direction towards the light.
    /// * `pdf`          - Density of the sampled direction.
    /// * `event`        - Sampled event.
    pub fn new(weight: RayColor, incoming_dir: Vector3f, pdf: Float, event: BSDFEvent) -> Self {
        debug_assert!(weight.is_valid(), "invalid BSDF weight {:?}", weight);
        debug_assert!(pdf.is_finite() && pdf >= 0.0, "invalid BSDF pdf {}", pdf);
        Self {
            weight,
            incoming_dir,
            pdf,
            event,
        }
    }
}

/// Result of `BSDF::evaluate`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BSDFEvaluation {
    /// BSDF value (not multiplied by any cosine).
    pub color: RayColor,

    /// Density with which `sample` produces the incoming direction.
    pub direct_pdf_w: Float,

    /// Density with which `sample` produces the outgoing direction when the
    /// roles of both directions are swapped.
    pub reverse_pdf_w: Float,
}

impl BSDFEvaluation {
    /// Create a new `BSDFEvaluation`.
    ///
    /// * `color`         - BSDF value.
    /// * `direct_pdf_w`  - Forward density.
    /// * `reverse_pdf_w` - Reverse density.
    pub fn new(color: RayColor, direct_pdf_w: Float, reverse_pdf_w: Float) -> Self {
        debug_assert!(color.is_valid(), "invalid BSDF value {:?}", color);
        Self {
            color,
            direct_pdf_w,
            reverse_pdf_w,
        }
    }

    /// Zero contribution.
    pub const fn zero() -> Self {
        Self {
            color: RayColor::zero(),
            direct_pdf_w: 0.0,
            reverse_pdf_w: 0.0,
        }
    }
}

/// Which density `BSDF::pdf` returns.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PdfDirection {
    /// Density of sampling the incoming direction from the outgoing one.
    Forward,

    /// Density of sampling the outgoing direction from the incoming one.
    Reverse,
}

/// Scattering behaviour of a surface.
pub trait BSDF: Send + Sync {
    /// Short identifying name, the key used by the BSDF registry.
    fn name(&self) -> &'static str;

    /// Returns true if the BSDF is a delta distribution and so can only be
    /// reached through `sample`.
    fn is_delta(&self) -> bool {
        false
    }

    /// Importance sample an incoming direction. Returns `None` when the
    /// outgoing direction is below the horizon or the sample is degenerate.
    ///
    /// * `ctx` - Sampling inputs.
    fn sample(&self, ctx: &mut SamplingContext) -> Option<BSDFSample>;

    /// Evaluate the BSDF for a known pair of directions.
    ///
    /// * `ctx` - Evaluation inputs.
    fn evaluate(&self, ctx: &EvaluationContext) -> BSDFEvaluation;

    /// Returns the sampling density for a known pair of directions.
    ///
    /// * `ctx` - Evaluation inputs.
    /// * `dir` - Which of the two densities to return.
    fn pdf(&self, ctx: &EvaluationContext, dir: PdfDirection) -> Float {
        let evaluation = self.evaluate(ctx);
        match dir {
            PdfDirection::Forward => evaluation.direct_pdf_w,
            PdfDirection::Reverse => evaluation.reverse_pdf_w,
        }
    }
}
