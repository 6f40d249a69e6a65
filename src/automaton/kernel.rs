//! Frequency-domain convolution kernel.
//!
//! The spatial kernel is a stack of concentric shells. The unit ball of
//! radius `R` is cut into `B = peaks.len()` equal-width rings; ring `i` holds
//! the radial profile `core(frac)` scaled by `peaks[i]`, where `frac` is the
//! position inside that ring. The default is one ring with a bell profile
//! peaking at half the radius.
//!
//! The weights are normalised to unit mass, rotated so the centre sits at the
//! index origin, and transformed once. Every step then multiplies the result
//! pointwise against the field spectrum.

use rustfft::num_complex::Complex;
use serde::{Deserialize, Serialize};

use super::fft::forward_real;
use super::grid::cell_count;
use crate::error::{LeniaError, Result};

const SHELL_PEAK: f64 = 0.5;
const SHELL_WIDTH: f64 = 0.15;
const STEP_MARGIN: f64 = 0.25;

/// Radial profile of a single ring, evaluated on `r` in `[0, 1)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KernelCore {
    /// `exp(-((r - 0.5) / 0.15)² / 2)`
    #[default]
    Bell,
    /// `(4r(1 - r))⁴`
    Polynomial,
    /// `exp(4 - 1 / (r(1 - r)))`, zero at both ends.
    ExponentialBump,
    /// `1` on `[1/4, 3/4]`, `0` elsewhere.
    Step,
    /// [`Step`](Self::Step) plus `1/2` below `1/4`.
    Staircase,
}

impl KernelCore {
    #[inline]
    pub fn apply(self, r: f64) -> f64 {
        let plateau = (STEP_MARGIN..=1.0 - STEP_MARGIN).contains(&r);
        match self {
            KernelCore::Bell => bell(r, SHELL_PEAK, SHELL_WIDTH),
            KernelCore::Polynomial => (4.0 * r * (1.0 - r)).powi(4),
            KernelCore::ExponentialBump => {
                if r <= 0.0 || r >= 1.0 {
                    0.0
                } else {
                    (4.0 - 1.0 / (r * (1.0 - r))).exp()
                }
            }
            KernelCore::Step => {
                if plateau {
                    1.0
                } else {
                    0.0
                }
            }
            KernelCore::Staircase => {
                if plateau {
                    1.0
                } else if r < STEP_MARGIN {
                    0.5
                } else {
                    0.0
                }
            }
        }
    }
}

/// Precomputed kernel spectrum for one `(radius, size)` pair.
#[derive(Debug, Clone)]
pub struct Kernel {
    size: usize,
    radius: f64,
    spectrum: Vec<Complex<f64>>,
}

impl Kernel {
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[inline]
    pub fn spectrum(&self) -> &[Complex<f64>] {
        &self.spectrum
    }
}

/// Gaussian bump `exp(-((x - m) / s)² / 2)`.
#[inline]
pub fn bell(x: f64, m: f64, s: f64) -> f64 {
    let t = (x - m) / s;
    (-t * t / 2.0).exp()
}

/// Build the single-ring bell kernel for a cubic grid of `size` cells per
/// axis.
pub fn build_kernel(radius: f64, size: usize) -> Result<Kernel> {
    build_kernel_with(radius, size, KernelCore::Bell, &[1.0])
}

/// Build a kernel with an explicit ring profile and per-ring peak heights.
pub fn build_kernel_with(
    radius: f64,
    size: usize,
    core: KernelCore,
    peaks: &[f64],
) -> Result<Kernel> {
    let spatial = spatial_kernel(radius, size, core, peaks)?;
    Ok(Kernel {
        size,
        radius,
        spectrum: forward_real(&spatial, size),
    })
}

/// Check ring heights: at least one, all finite and non-negative.
pub fn validate_peaks(peaks: &[f64]) -> Result<()> {
    if peaks.is_empty() {
        return Err(LeniaError::invalid("at least one kernel peak is required"));
    }
    if let Some(p) = peaks.iter().find(|p| !p.is_finite() || **p < 0.0) {
        return Err(LeniaError::invalid(format!(
            "kernel peaks must be finite and >= 0 (got {})",
            p
        )));
    }
    Ok(())
}

/// Normalised spatial weights with the centre already rotated to index 0.
///
/// Axis coordinate `c` maps to the centred offset `c - size/2`; that offset is
/// stored at `offset mod size`.
pub(crate) fn spatial_kernel(
    radius: f64,
    size: usize,
    core: KernelCore,
    peaks: &[f64],
) -> Result<Vec<f64>> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(LeniaError::invalid(format!(
            "radius must be finite and > 0 (got {})",
            radius
        )));
    }
    validate_peaks(peaks)?;
    let len = cell_count(size)?;

    let rings = peaks.len();
    let mid = (size / 2) as i64;
    let n = size as i64;
    let mut weights = vec![0.0; len];
    let mut total = 0.0;

    for cz in 0..n {
        for cy in 0..n {
            for cx in 0..n {
                let (dx, dy, dz) = (cx - mid, cy - mid, cz - mid);
                let d = ((dx * dx + dy * dy + dz * dz) as f64).sqrt() / radius;
                if d >= 1.0 {
                    continue;
                }
                let scaled = d * rings as f64;
                let ring = (scaled.floor() as usize).min(rings - 1);
                let w = peaks[ring] * core.apply(scaled.fract());
                let idx = ((dz.rem_euclid(n) * n + dy.rem_euclid(n)) * n + dx.rem_euclid(n))
                    as usize;
                weights[idx] = w;
                total += w;
            }
        }
    }

    if total <= 0.0 || !total.is_finite() {
        return Err(LeniaError::invalid(format!(
            "kernel has no mass inside radius {} on a {}³ grid",
            radius, size
        )));
    }
    for w in &mut weights {
        *w /= total;
    }
    Ok(weights)
}
