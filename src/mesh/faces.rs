//! Directional face detection.
//!
//! Each voxel gets a 6-bit code saying which of its faces border empty space.
//! The code comes from a 3×3×3 integer convolution of the occupancy grid:
//! the six axis neighbours carry one power-of-two weight each and the centre
//! carries `CENTER_WEIGHT`, which is larger than every face bit combined. The
//! raw response therefore encodes the occupied neighbours in its low bits and
//! the centre's own occupancy above them. Inverting the low bits and
//! multiplying by the centre bit leaves, for occupied voxels only, the set of
//! faces with an empty neighbour.
//!
//! Out-of-grid neighbours count as empty (zero padding). This differs from the
//! periodic topology the step engine uses, so a shape touching the grid edge
//! is closed off there instead of wrapping.

use rayon::prelude::*;

use crate::automaton::grid::{is_occupied, ScalarField};

/// Face direction bit indices.
pub const FACE_NEG_X: usize = 0;
pub const FACE_POS_X: usize = 1;
pub const FACE_NEG_Y: usize = 2;
pub const FACE_POS_Y: usize = 3;
pub const FACE_NEG_Z: usize = 4;
pub const FACE_POS_Z: usize = 5;

/// All six face bits.
pub const FACE_BITS: u8 = 0b11_1111;

/// Centre weight of the detection kernel; exceeds the sum of all face bits.
pub const CENTER_WEIGHT: u8 = 1 << 6;

/// Offset of the neighbour sharing each face.
pub const FACE_NEIGHBORS: [[i64; 3]; 6] = [
    [-1, 0, 0], // -X
    [1, 0, 0],  // +X
    [0, -1, 0], // -Y
    [0, 1, 0],  // +Y
    [0, 0, -1], // -Z
    [0, 0, 1],  // +Z
];

/// Cube corners of each face relative to the voxel's minimum corner.
///
/// Winding is counter-clockwise when viewed from outside, so
/// `(c1 - c0) × (c2 - c0)` points along the face normal.
pub const FACE_CORNERS: [[[i32; 3]; 4]; 6] = [
    [[0, 0, 0], [0, 0, 1], [0, 1, 1], [0, 1, 0]], // -X
    [[1, 0, 0], [1, 1, 0], [1, 1, 1], [1, 0, 1]], // +X
    [[0, 0, 0], [1, 0, 0], [1, 0, 1], [0, 0, 1]], // -Y
    [[0, 1, 0], [0, 1, 1], [1, 1, 1], [1, 1, 0]], // +Y
    [[0, 0, 0], [0, 1, 0], [1, 1, 0], [1, 0, 0]], // -Z
    [[0, 0, 1], [1, 0, 1], [1, 1, 1], [0, 1, 1]], // +Z
];

/// Weight of the neighbour on `face` in the detection kernel.
#[inline]
pub const fn face_weight(face: usize) -> u8 {
    1 << face
}

/// Compute per-voxel direction codes. Unoccupied voxels get 0.
pub fn detect_faces(field: &ScalarField) -> Vec<u8> {
    let n = field.size();
    let occupancy: Vec<u8> = field
        .cells
        .par_iter()
        .map(|&v| is_occupied(v) as u8)
        .collect();

    let mut codes = vec![0u8; field.len()];
    codes
        .par_chunks_mut(n * n)
        .enumerate()
        .for_each(|(z, slab)| {
            for y in 0..n {
                for x in 0..n {
                    let raw = detection_response(&occupancy, n, x, y, z);
                    // raw >> 6 is the centre occupancy
                    slab[y * n + x] = (!raw & FACE_BITS) * (raw >> 6);
                }
            }
        });
    codes
}

/// Raw 3×3×3 convolution response at one voxel, zero-padded.
#[inline]
fn detection_response(occupancy: &[u8], n: usize, x: usize, y: usize, z: usize) -> u8 {
    let at = |x: usize, y: usize, z: usize| occupancy[(z * n + y) * n + x];

    let mut raw = CENTER_WEIGHT * at(x, y, z);
    for (face, offset) in FACE_NEIGHBORS.iter().enumerate() {
        let nx = x as i64 + offset[0];
        let ny = y as i64 + offset[1];
        let nz = z as i64 + offset[2];
        let limit = n as i64;
        if nx < 0 || ny < 0 || nz < 0 || nx >= limit || ny >= limit || nz >= limit {
            continue;
        }
        raw += face_weight(face) * at(nx as usize, ny as usize, nz as usize);
    }
    raw
}

/// Count set face bits across all codes.
pub fn count_faces(codes: &[u8]) -> usize {
    codes.iter().map(|c| c.count_ones() as usize).sum()
}
