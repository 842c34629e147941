//! Properties shared by every BSDF variant.

use super::*;
use crate::rng::RNG;
use float_cmp::*;

const ROUGHNESS: [Float; 4] = [0.05, 0.3, 0.6, 1.0];
const GRID: usize = 512;

fn params(roughness: Float) -> MaterialParams {
    MaterialParams {
        base_color: RayColor::new(1.0, 0.8, 0.5),
        roughness,
        ior: 1.5,
        k: 3.0,
        ..MaterialParams::default()
    }
}

fn direction(theta_degrees: Float) -> Vector3f {
    let theta = theta_degrees.to_radians();
    Vector3f::new(theta.sin(), 0.0, theta.cos())
}

/// Deterministic quadrature of `evaluate * |cos|` over the whole sphere.
fn integrate(bsdf: &dyn BSDF, params: &MaterialParams, wo: Vector3f) -> [f64; 3] {
    let wavelength = Wavelength::default();
    let mut sum = [0.0_f64; 3];
    for i in 0..GRID {
        for j in 0..GRID {
            let u = Point2f::new(
                (i as Float + 0.5) / GRID as Float,
                (j as Float + 0.5) / GRID as Float,
            );
            let wi = uniform_sample_sphere(&u);
            let ctx = EvaluationContext::new(params, &wavelength, wo, wi);
            let value = bsdf.evaluate(&ctx).color * abs(wi.z);
            for (c, s) in sum.iter_mut().enumerate() {
                *s += value[c] as f64;
            }
        }
    }
    let cell = 1.0 / (uniform_sphere_pdf() as f64 * (GRID * GRID) as f64);
    sum.map(|s| s * cell)
}

/// Monte Carlo mean of the sampling weights of non-specular events.
fn mean_weight(bsdf: &dyn BSDF, params: &MaterialParams, wo: Vector3f, n: usize) -> [f64; 3] {
    let mut rng = RNG::new(42);
    let mut sum = [0.0_f64; 3];
    for _ in 0..n {
        let mut wavelength = Wavelength::default();
        let mut ctx = SamplingContext::new(params, &mut wavelength, wo, rng.uniform_float3());
        if let Some(sample) = bsdf.sample(&mut ctx) {
            if !sample.event.is_specular() {
                for (c, s) in sum.iter_mut().enumerate() {
                    *s += sample.weight[c] as f64;
                }
            }
        }
    }
    sum.map(|s| s / n as f64)
}

fn all_bsdfs() -> Vec<Box<dyn BSDF>> {
    bsdf_names().filter_map(create_bsdf).collect()
}

#[test]
fn energy_is_conserved() {
    for bsdf in all_bsdfs() {
        for roughness in ROUGHNESS {
            for theta in [0.0, 30.0, 60.0, 80.0] {
                let integral = integrate(bsdf.as_ref(), &params(roughness), direction(theta));
                for value in integral {
                    assert!(
                        value <= 1.01,
                        "{} roughness {} theta {}: {:?}",
                        bsdf.name(),
                        roughness,
                        theta,
                        integral
                    );
                }
            }
        }
    }
}

#[test]
fn sampling_agrees_with_evaluation() {
    for bsdf in all_bsdfs() {
        for roughness in [0.45, 0.7, 1.0] {
            for theta in [20.0, 55.0] {
                let params = params(roughness);
                let wo = direction(theta);
                let expected = integrate(bsdf.as_ref(), &params, wo);
                let estimate = mean_weight(bsdf.as_ref(), &params, wo, 200_000);
                for c in 0..3 {
                    assert!(
                        approx_eq!(f64, estimate[c], expected[c], epsilon = 0.02),
                        "{} roughness {} theta {}: sampled {:?} integrated {:?}",
                        bsdf.name(),
                        roughness,
                        theta,
                        estimate,
                        expected
                    );
                }
            }
        }
    }
}

#[test]
fn sampled_pdf_matches_evaluated_pdf() {
    let mut rng = RNG::new(3);
    for bsdf in all_bsdfs().iter().filter(|b| !b.is_delta()) {
        let params = params(0.5);
        let wo = direction(40.0);
        for _ in 0..1000 {
            let mut wavelength = Wavelength::default();
            let mut ctx = SamplingContext::new(&params, &mut wavelength, wo, rng.uniform_float3());
            let sample = match bsdf.sample(&mut ctx) {
                Some(sample) if !sample.event.is_specular() => sample,
                _ => continue,
            };
            let wavelength = Wavelength::default();
            let ctx = EvaluationContext::new(&params, &wavelength, wo, sample.incoming_dir);
            let evaluation = bsdf.evaluate(&ctx);
            assert!(
                abs(evaluation.direct_pdf_w / sample.pdf - 1.0) < 1e-3,
                "{}: {} vs {}",
                bsdf.name(),
                evaluation.direct_pdf_w,
                sample.pdf
            );
            assert!(evaluation.color.is_valid());
        }
    }
}

#[test]
fn below_horizon_evaluates_to_zero() {
    let wavelength = Wavelength::default();
    let above = direction(30.0);
    let below = Vector3f::new(0.5, 0.0, -0.866);
    let grazing = Vector3f::new(1.0, 0.0, 0.0);
    for bsdf in all_bsdfs() {
        for roughness in ROUGHNESS {
            let params = params(roughness);
            let transmissive = matches!(bsdf.name(), "dielectric" | "roughDielectric");
            let mut pairs = vec![(above, grazing), (grazing, above)];
            if !transmissive {
                pairs.push((above, below));
                pairs.push((below, above));
                pairs.push((below, below));
            }
            for (wo, wi) in pairs {
                let ctx = EvaluationContext::new(&params, &wavelength, wo, wi);
                assert_eq!(
                    bsdf.evaluate(&ctx).color,
                    RayColor::zero(),
                    "{} roughness {}",
                    bsdf.name(),
                    roughness
                );
            }
        }
    }
}

#[test]
fn sampling_below_horizon_fails() {
    let below = Vector3f::new(0.5, 0.0, -0.866);
    for bsdf in all_bsdfs() {
        if matches!(bsdf.name(), "dielectric" | "roughDielectric") {
            continue;
        }
        let params = params(0.5);
        let mut wavelength = Wavelength::default();
        let mut ctx = SamplingContext::new(&params, &mut wavelength, below, [0.3, 0.6, 0.5]);
        assert!(bsdf.sample(&mut ctx).is_none(), "{}", bsdf.name());
    }
}

#[test]
fn rough_plastic_is_continuous_at_threshold() {
    let wavelength = Wavelength::default();
    let wo = direction(30.0);
    let wi = direction(45.0);
    let below = params(SPECULAR_EVENT_ROUGHNESS_THRESHOLD - 0.0001);
    let above = params(SPECULAR_EVENT_ROUGHNESS_THRESHOLD + 0.0001);

    let smooth = RoughPlasticBSDF.evaluate(&EvaluationContext::new(&below, &wavelength, wo, wi));
    let rough = RoughPlasticBSDF.evaluate(&EvaluationContext::new(&above, &wavelength, wo, wi));
    for c in 0..3 {
        assert!(abs(smooth.color[c] - rough.color[c]) < 1e-3);
    }
}

#[test]
fn smooth_metal_reflects_mirror_direction() {
    let params = params(0.0);
    let wo = direction(35.0);
    let mut wavelength = Wavelength::default();
    let mut ctx = SamplingContext::new(&params, &mut wavelength, wo, [0.5, 0.5, 0.5]);
    let sample = MetalBSDF.sample(&mut ctx).unwrap();
    assert_eq!(sample.incoming_dir, reflect_z(&wo));
    assert_eq!(sample.event, BSDFEvent::SPECULAR_REFLECTION);
    let f = fresnel_metal(wo.z, params.ior, params.k);
    assert_eq!(sample.weight, params.base_color * f);
}

#[test]
fn smooth_dielectric_splits_by_fresnel() {
    let params = params(0.0);
    let wo = direction(0.0);
    let f = fresnel_dielectric(1.0, params.ior);

    let mut wavelength = Wavelength::default();
    let mut ctx = SamplingContext::new(&params, &mut wavelength, wo, [0.5, 0.5, f * 0.5]);
    let reflected = DielectricBSDF.sample(&mut ctx).unwrap();
    assert_eq!(reflected.event, BSDFEvent::SPECULAR_REFLECTION);
    assert_eq!(reflected.pdf, f);

    let mut ctx = SamplingContext::new(&params, &mut wavelength, wo, [0.5, 0.5, 0.9]);
    let refracted = DielectricBSDF.sample(&mut ctx).unwrap();
    assert_eq!(refracted.event, BSDFEvent::SPECULAR_TRANSMISSION);
    assert!(approx_eq!(f32, refracted.incoming_dir.z, -1.0, epsilon = 1e-6));
    assert_eq!(refracted.weight, params.base_color);
}

#[test]
fn dispersion_collapses_wavelength() {
    let mut params = params(0.0);
    let wo = direction(40.0);

    let mut wavelength = Wavelength::default();
    let mut ctx = SamplingContext::new(&params, &mut wavelength, wo, [0.5, 0.5, 0.9]);
    DielectricBSDF.sample(&mut ctx).unwrap();
    assert!(!wavelength.is_single);

    params.dispersion.enable = true;
    let mut blue = Wavelength::default();
    blue.randomize(0.2);
    let mut red = Wavelength::default();
    red.randomize(0.8);

    let mut ctx = SamplingContext::new(&params, &mut blue, wo, [0.5, 0.5, 0.9]);
    let blue_sample = DielectricBSDF.sample(&mut ctx).unwrap();
    let mut ctx = SamplingContext::new(&params, &mut red, wo, [0.5, 0.5, 0.9]);
    let red_sample = DielectricBSDF.sample(&mut ctx).unwrap();

    assert!(blue.is_single && red.is_single);
    assert!(params.ior_at(&blue) > params.ior_at(&red));

    // Shorter wavelengths bend more towards the normal.
    assert!(abs(blue_sample.incoming_dir.x) < abs(red_sample.incoming_dir.x));
    assert!(blue_sample.weight.b() > blue_sample.weight.r());
    assert!(red_sample.weight.r() > red_sample.weight.b());
}
