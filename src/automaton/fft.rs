//! Three-dimensional FFT over cubic buffers.
//!
//! Runs one 1D transform per axis. X lines are contiguous; Y lines stay inside
//! a single z slab; Z lines are gathered into a column-major scratch buffer so
//! every pass can be split across rayon workers without aliasing.

use rayon::prelude::*;
use rustfft::num_complex::Complex;
use rustfft::{FftDirection, FftPlanner};

/// In-place 3D transform of an `n³` buffer laid out in z,y,x order.
///
/// The inverse direction is normalised by `1/n³`, so
/// `fft3(Inverse)` after `fft3(Forward)` returns the input.
pub fn fft3(data: &mut [Complex<f64>], n: usize, direction: FftDirection) {
    debug_assert_eq!(data.len(), n * n * n);
    if n == 0 {
        return;
    }
    let fft = FftPlanner::new().plan_fft(n, direction);

    // X axis
    data.par_chunks_mut(n).for_each(|line| fft.process(line));

    // Y axis
    data.par_chunks_mut(n * n).for_each(|slab| {
        let mut line = vec![Complex::default(); n];
        for x in 0..n {
            for (y, v) in line.iter_mut().enumerate() {
                *v = slab[y * n + x];
            }
            fft.process(&mut line);
            for (y, v) in line.iter().enumerate() {
                slab[y * n + x] = *v;
            }
        }
    });

    // Z axis
    let mut columns = vec![Complex::default(); data.len()];
    {
        let src: &[Complex<f64>] = data;
        columns
            .par_chunks_mut(n)
            .enumerate()
            .for_each(|(yx, column)| {
                for (z, v) in column.iter_mut().enumerate() {
                    *v = src[z * n * n + yx];
                }
                fft.process(column);
            });
    }
    data.par_chunks_mut(n * n)
        .enumerate()
        .for_each(|(z, slab)| {
            for (yx, v) in slab.iter_mut().enumerate() {
                *v = columns[yx * n + z];
            }
        });

    if direction == FftDirection::Inverse {
        let scale = 1.0 / (n * n * n) as f64;
        data.par_iter_mut().for_each(|v| *v *= scale);
    }
}

/// Forward transform of a real-valued cube.
pub fn forward_real(values: &[f64], n: usize) -> Vec<Complex<f64>> {
    let mut spectrum: Vec<Complex<f64>> = values
        .par_iter()
        .map(|&v| Complex::new(v, 0.0))
        .collect();
    fft3(&mut spectrum, n, FftDirection::Forward);
    spectrum
}

/// Inverse transform keeping only the real part.
pub fn inverse_real(mut spectrum: Vec<Complex<f64>>, n: usize) -> Vec<f64> {
    fft3(&mut spectrum, n, FftDirection::Inverse);
    spectrum.into_par_iter().map(|c| c.re).collect()
}
