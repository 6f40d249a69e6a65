//! Lenia stepping: FFT convolution followed by a growth update.

use rayon::prelude::*;
use rustfft::num_complex::Complex;
use serde::{Deserialize, Serialize};

use super::fft::{forward_real, inverse_real};
use super::grid::ScalarField;
use super::kernel::{bell, Kernel};
use crate::error::{LeniaError, Result};

/// Maps the local convolution response to a signed update in `[-1, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthFunction {
    /// `2·exp(-((x - m) / s)² / 2) - 1`
    #[default]
    Gaussian,
    /// `2·max(0, 1 - (x - m)² / (9s²))⁴ - 1`
    Polynomial,
    /// `+1` inside `|x - m| <= s`, `-1` outside.
    Step,
}

impl GrowthFunction {
    #[inline]
    pub fn apply(self, x: f64, mean: f64, stdev: f64) -> f64 {
        match self {
            GrowthFunction::Gaussian => 2.0 * bell(x, mean, stdev) - 1.0,
            GrowthFunction::Polynomial => {
                let d = x - mean;
                let base = (1.0 - d * d / (9.0 * stdev * stdev)).max(0.0);
                2.0 * base.powi(4) - 1.0
            }
            GrowthFunction::Step => {
                if (x - mean).abs() <= stdev {
                    1.0
                } else {
                    -1.0
                }
            }
        }
    }
}

/// Gaussian growth, the default Lenia rule.
#[inline]
pub fn growth(x: f64, mean: f64, stdev: f64) -> f64 {
    GrowthFunction::Gaussian.apply(x, mean, stdev)
}

/// Advance the field by one sub-step of `1/substeps` time units using the
/// Gaussian growth rule.
///
/// Calling this `substeps` times with the same parameters integrates one
/// unit of simulated time.
pub fn step(
    field: &mut ScalarField,
    kernel: &Kernel,
    substeps: u32,
    mean: f64,
    stdev: f64,
) -> Result<()> {
    step_with(field, kernel, substeps, GrowthFunction::Gaussian, mean, stdev)
}

/// Same as [`step`] with an explicit growth function.
pub fn step_with(
    field: &mut ScalarField,
    kernel: &Kernel,
    substeps: u32,
    growth_fn: GrowthFunction,
    mean: f64,
    stdev: f64,
) -> Result<()> {
    validate_step(field, kernel, substeps, mean, stdev)?;

    let n = field.size();
    let potential = convolve(field, kernel, n);
    let dt = 1.0 / substeps as f64;

    field
        .cells
        .par_iter_mut()
        .zip(potential.par_iter())
        .for_each(|(cell, &u)| {
            *cell = (*cell + dt * growth_fn.apply(u, mean, stdev)).clamp(0.0, 1.0);
        });

    Ok(())
}

/// Circular convolution `Re(IFFT(K · FFT(field)))`.
fn convolve(field: &ScalarField, kernel: &Kernel, n: usize) -> Vec<f64> {
    let mut spectrum = forward_real(&field.cells, n);
    spectrum
        .par_iter_mut()
        .zip(kernel.spectrum().par_iter())
        .for_each(|(f, k): (&mut Complex<f64>, &Complex<f64>)| *f *= *k);
    inverse_real(spectrum, n)
}

fn validate_step(
    field: &ScalarField,
    kernel: &Kernel,
    substeps: u32,
    mean: f64,
    stdev: f64,
) -> Result<()> {
    if substeps == 0 {
        return Err(LeniaError::invalid("substeps must be > 0"));
    }
    if !mean.is_finite() {
        return Err(LeniaError::invalid(format!("mean must be finite (got {})", mean)));
    }
    if !stdev.is_finite() || stdev <= 0.0 {
        return Err(LeniaError::invalid(format!(
            "stdev must be finite and > 0 (got {})",
            stdev
        )));
    }
    if kernel.size() != field.size() {
        return Err(LeniaError::DimensionMismatch {
            expected: kernel.size(),
            found: field.size(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::kernel::{build_kernel, build_kernel_with, spatial_kernel, KernelCore};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn noisy_field(size: usize, seed: u64) -> ScalarField {
        let mut rng = StdRng::seed_from_u64(seed);
        let cells = (0..size * size * size)
            .map(|_| if rng.gen_bool(0.3) { rng.gen::<f64>() } else { 0.0 })
            .collect();
        ScalarField::from_cells(size, cells).unwrap()
    }

    #[test]
    fn test_growth_shape() {
        assert!((growth(0.15, 0.15, 0.015) - 1.0).abs() < 1e-12);
        assert!(growth(1.0, 0.15, 0.015) + 1.0 < 1e-12);

        assert_eq!(GrowthFunction::Step.apply(0.16, 0.15, 0.015), 1.0);
        assert_eq!(GrowthFunction::Step.apply(0.2, 0.15, 0.015), -1.0);
        assert!((GrowthFunction::Polynomial.apply(0.15, 0.15, 0.015) - 1.0).abs() < 1e-12);
        assert_eq!(GrowthFunction::Polynomial.apply(0.5, 0.15, 0.015), -1.0);
    }

    #[test]
    fn test_zero_growth_leaves_field_unchanged() {
        // A constant field convolves to itself under a unit-mass kernel.
        // Pick the mean so the Gaussian growth is exactly zero there.
        let level = 0.4;
        let stdev = 0.05;
        let mean = level - stdev * (2.0 * std::f64::consts::LN_2).sqrt();
        assert!(growth(level, mean, stdev).abs() < 1e-12);

        let kernel = build_kernel(3.0, 8).unwrap();
        let mut field = ScalarField::from_cells(8, vec![level; 512]).unwrap();
        step(&mut field, &kernel, 10, mean, stdev).unwrap();

        for &v in &field.cells {
            assert!((v - level).abs() < 1e-9, "{} drifted from {}", v, level);
        }
    }

    #[test]
    fn test_output_stays_in_unit_interval() {
        let kernel = build_kernel(3.0, 12).unwrap();
        for seed in 0..4 {
            let mut field = noisy_field(12, seed);
            for _ in 0..3 {
                step(&mut field, &kernel, 2, 0.15, 0.03).unwrap();
                assert!(field.cells.iter().all(|&v| (0.0..=1.0).contains(&v)));
            }
        }
    }

    #[test]
    fn test_unclipped_input_is_clipped() {
        let kernel = build_kernel(2.0, 6).unwrap();
        let mut field = ScalarField::from_cells(6, vec![2.5; 216]).unwrap();
        step(&mut field, &kernel, 1, 2.5, 0.1).unwrap();
        assert!(field.cells.iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_empty_field_stays_empty() {
        let kernel = build_kernel(3.0, 8).unwrap();
        let mut field = ScalarField::new(8).unwrap();

        step(&mut field, &kernel, 10, 0.15, 0.015).unwrap();
        assert!(field.cells.iter().all(|&c| c == 0.0));
    }

    #[test]
    fn test_substeps_scale_update() {
        // Far from the mean growth is -1, so one sub-step removes 1/substeps.
        let kernel = build_kernel(2.0, 6).unwrap();
        let mut field = ScalarField::new(6).unwrap();
        field.set(3, 3, 3, 0.9);

        step(&mut field, &kernel, 4, 5.0, 0.01).unwrap();
        assert!((field.get(3, 3, 3) - 0.65).abs() < 1e-9);
    }

    /// Direct wrapped sum `U[p] = sum_q K[q] * f[p - q]` followed by the
    /// growth update, for comparison against the FFT path.
    fn direct_step(
        field: &ScalarField,
        weights: &[f64],
        substeps: u32,
        mean: f64,
        stdev: f64,
    ) -> Vec<f64> {
        let n = field.size() as i64;
        let dt = 1.0 / substeps as f64;
        let mut out = vec![0.0; field.len()];
        for (p, slot) in out.iter_mut().enumerate() {
            let [px, py, pz] = field.coord_of(p).map(|c| c as i64);
            let mut u = 0.0;
            for (q, &w) in weights.iter().enumerate() {
                if w == 0.0 {
                    continue;
                }
                let [qx, qy, qz] = field.coord_of(q).map(|c| c as i64);
                u += w * field.cells[field.wrapped_index(px - qx, py - qy, pz - qz)];
            }
            *slot = (field.cells[p] + dt * growth(u, mean, stdev)).clamp(0.0, 1.0);
        }
        out
    }

    #[test]
    fn test_matches_direct_circular_convolution() {
        let (size, radius) = (7, 2.5);
        let weights = spatial_kernel(radius, size, KernelCore::Bell, &[1.0]).unwrap();
        let kernel = build_kernel(radius, size).unwrap();
        let mut field = noisy_field(size, 21);
        let expected = direct_step(&field, &weights, 3, 0.15, 0.03);

        step(&mut field, &kernel, 3, 0.15, 0.03).unwrap();
        for (i, (&got, &want)) in field.cells.iter().zip(&expected).enumerate() {
            assert!((got - want).abs() < 1e-9, "cell {}: {} vs {}", i, got, want);
        }
    }

    #[test]
    fn test_multi_ring_kernel_matches_direct_convolution() {
        let (size, radius, peaks) = (8, 3.5, [0.5, 1.0]);
        let weights = spatial_kernel(radius, size, KernelCore::Polynomial, &peaks).unwrap();
        let kernel = build_kernel_with(radius, size, KernelCore::Polynomial, &peaks).unwrap();
        let mut field = noisy_field(size, 5);
        let expected = direct_step(&field, &weights, 2, 0.2, 0.05);

        step(&mut field, &kernel, 2, 0.2, 0.05).unwrap();
        for (&got, &want) in field.cells.iter().zip(&expected) {
            assert!((got - want).abs() < 1e-9);
        }
    }

    #[test]
    fn test_deterministic() {
        let kernel = build_kernel(3.0, 10).unwrap();
        let mut a = noisy_field(10, 7);
        let mut b = a.clone();
        step(&mut a, &kernel, 5, 0.2, 0.04).unwrap();
        step(&mut b, &kernel, 5, 0.2, 0.04).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_parameters_leave_field_untouched() {
        let kernel = build_kernel(3.0, 8).unwrap();
        let original = noisy_field(8, 3);
        let mut field = original.clone();

        assert!(matches!(
            step(&mut field, &kernel, 0, 0.15, 0.015),
            Err(LeniaError::InvalidParameter(_))
        ));
        assert!(step(&mut field, &kernel, 10, 0.15, 0.0).is_err());
        assert!(step(&mut field, &kernel, 10, f64::NAN, 0.015).is_err());

        let small = build_kernel(3.0, 6).unwrap();
        assert_eq!(
            step(&mut field, &small, 10, 0.15, 0.015),
            Err(LeniaError::DimensionMismatch {
                expected: 6,
                found: 8
            })
        );

        assert_eq!(field, original);
    }
}
