//! Dense cubic scalar field and cell access helpers.

use crate::error::{LeniaError, Result};

/// Largest edge length accepted for a field.
///
/// The surface mesh indexes the `(size + 1)³` corner lattice with `u32` and
/// stores corners as `i32`, so sizes above this bound are rejected up front.
pub const MAX_GRID_SIZE: usize = 1624;

/// Number of cells in a `size³` field, or an error if `size` is zero, above
/// [`MAX_GRID_SIZE`], or the product does not fit in `usize`.
pub fn cell_count(size: usize) -> Result<usize> {
    if size == 0 {
        return Err(LeniaError::invalid("grid size must be > 0"));
    }
    if size > MAX_GRID_SIZE {
        return Err(LeniaError::invalid(format!(
            "grid size must be <= {} (got {})",
            MAX_GRID_SIZE, size
        )));
    }
    size.checked_mul(size)
        .and_then(|sq| sq.checked_mul(size))
        .ok_or_else(|| LeniaError::invalid(format!("grid size {} overflows", size)))
}

/// Dense 3D density field over a cubic lattice.
///
/// Cells are stored in z,y,x order (z changes slowest, x changes fastest).
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField {
    size: usize,
    pub cells: Vec<f64>,
}

impl ScalarField {
    /// Create an all-zero field with `size` cells per axis.
    pub fn new(size: usize) -> Result<Self> {
        let len = cell_count(size)?;
        Ok(ScalarField {
            size,
            cells: vec![0.0; len],
        })
    }

    /// Wrap an existing buffer. `cells.len()` must equal `size³`.
    pub fn from_cells(size: usize, cells: Vec<f64>) -> Result<Self> {
        let expected = cell_count(size)?;
        if cells.len() != expected {
            return Err(LeniaError::invalid(format!(
                "expected {} cells for size {}, got {}",
                expected,
                size,
                cells.len()
            )));
        }
        Ok(ScalarField { size, cells })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&v| !is_occupied(v))
    }

    /// Calculate the linear index for a 3D coordinate.
    #[inline]
    pub fn index_of(&self, x: usize, y: usize, z: usize) -> usize {
        (z * self.size + y) * self.size + x
    }

    /// Inverse of [`index_of`](Self::index_of).
    #[inline]
    pub fn coord_of(&self, idx: usize) -> [usize; 3] {
        let n = self.size;
        [idx % n, (idx / n) % n, idx / (n * n)]
    }

    /// Check if signed coordinates are within grid bounds.
    #[inline]
    pub fn in_bounds(&self, x: i64, y: i64, z: i64) -> bool {
        let n = self.size as i64;
        x >= 0 && x < n && y >= 0 && y < n && z >= 0 && z < n
    }

    /// Index of a coordinate wrapped onto the torus.
    #[inline]
    pub fn wrapped_index(&self, x: i64, y: i64, z: i64) -> usize {
        let n = self.size as i64;
        self.index_of(
            x.rem_euclid(n) as usize,
            y.rem_euclid(n) as usize,
            z.rem_euclid(n) as usize,
        )
    }

    /// Read a cell; out-of-bounds reads return 0.
    pub fn get(&self, x: i64, y: i64, z: i64) -> f64 {
        if self.in_bounds(x, y, z) {
            self.cells[self.index_of(x as usize, y as usize, z as usize)]
        } else {
            0.0
        }
    }

    /// Write a cell. Out-of-bounds coordinates are silently ignored.
    pub fn set(&mut self, x: i64, y: i64, z: i64, value: f64) {
        if self.in_bounds(x, y, z) {
            let idx = self.index_of(x as usize, y as usize, z as usize);
            self.cells[idx] = value;
        }
    }

    /// Number of occupied voxels.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&v| is_occupied(v)).count()
    }
}

/// A voxel counts as occupied when it holds any positive density.
#[inline]
pub fn is_occupied(value: f64) -> bool {
    value > 0.0
}
