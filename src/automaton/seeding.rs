//! Random cluster seeding of an initial field.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::grid::ScalarField;
use crate::error::{LeniaError, Result};

/// Upper bound (exclusive) for generated seeds.
pub const SEED_RANGE: u64 = 100_000_000;

/// Fill a fresh field with `cluster_count` cubes of uniform noise.
///
/// Cluster edge lengths are drawn from the half-open `size_range`, origins
/// from `[0, grid_size)³`. Blocks wrap around every axis and overlapping
/// blocks add up; nothing is clipped here, the first step does that.
///
/// Returns the field together with the seed that produced it. When `seed` is
/// `None` a fresh one is drawn so the run can be reproduced later.
pub fn random_state(
    cluster_count: usize,
    size_range: (usize, usize),
    grid_size: usize,
    seed: Option<u64>,
) -> Result<(ScalarField, u64)> {
    let (lo, hi) = size_range;
    if lo == 0 {
        return Err(LeniaError::invalid("cluster sizes must be > 0"));
    }
    if lo >= hi {
        return Err(LeniaError::invalid(format!(
            "cluster size range must satisfy lo < hi (got {}..{})",
            lo, hi
        )));
    }
    let mut field = ScalarField::new(grid_size)?;

    let seed = seed.unwrap_or_else(|| rand::thread_rng().gen_range(0..SEED_RANGE));
    let mut rng = StdRng::seed_from_u64(seed);

    // Sizes first, then origins, then noise per block.
    let sizes: Vec<usize> = (0..cluster_count).map(|_| rng.gen_range(lo..hi)).collect();
    let origins: Vec<[usize; 3]> = (0..cluster_count)
        .map(|_| {
            [
                rng.gen_range(0..grid_size),
                rng.gen_range(0..grid_size),
                rng.gen_range(0..grid_size),
            ]
        })
        .collect();

    for (&n, origin) in sizes.iter().zip(&origins) {
        stamp_noise(&mut field, &mut rng, *origin, n);
    }

    Ok((field, seed))
}

/// Add an `n³` block of uniform `[0, 1)` noise at `origin`, wrapping per axis.
fn stamp_noise(field: &mut ScalarField, rng: &mut StdRng, origin: [usize; 3], n: usize) {
    let size = field.size();
    for dz in 0..n {
        let z = (origin[2] + dz) % size;
        for dy in 0..n {
            let y = (origin[1] + dy) % size;
            for dx in 0..n {
                let x = (origin[0] + dx) % size;
                let idx = field.index_of(x, y, z);
                field.cells[idx] += rng.gen::<f64>();
            }
        }
    }
}
