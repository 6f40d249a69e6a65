//! Connected-component partitioning ahead of meshing.
//!
//! Sparse fields tend to hold a handful of separate blobs. Each face-connected
//! blob is meshed on its own in box-local coordinates (in parallel), then the
//! pieces are shifted back by their box origin and merged through one more
//! vertex dedup pass, since blobs touching along an edge or corner share
//! lattice points.

use rayon::prelude::*;

use super::extract::{emit_voxel, Mesh, MeshBuilder};
use super::faces::{detect_faces, FACE_NEIGHBORS};
use crate::automaton::grid::{is_occupied, ScalarField};

/// One face-connected set of occupied voxels.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    /// Minimum corner of the bounding box.
    pub origin: [usize; 3],
    /// Bounding box extent per axis.
    pub extent: [usize; 3],
    /// Linear field indices of the member voxels.
    pub voxels: Vec<usize>,
}

impl Component {
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }
}

/// Label face-connected components of the occupied voxels.
///
/// Components are returned in order of their lowest linear index.
pub fn find_components(field: &ScalarField) -> Vec<Component> {
    let mut visited = vec![false; field.len()];
    let mut components = Vec::new();
    let mut stack = Vec::new();

    for start in 0..field.len() {
        if visited[start] || !is_occupied(field.cells[start]) {
            continue;
        }
        visited[start] = true;
        stack.push(start);

        let mut voxels = Vec::new();
        let mut lo = [usize::MAX; 3];
        let mut hi = [0usize; 3];

        while let Some(idx) = stack.pop() {
            voxels.push(idx);
            let coord = field.coord_of(idx);
            for axis in 0..3 {
                lo[axis] = lo[axis].min(coord[axis]);
                hi[axis] = hi[axis].max(coord[axis]);
            }

            for offset in &FACE_NEIGHBORS {
                let nx = coord[0] as i64 + offset[0];
                let ny = coord[1] as i64 + offset[1];
                let nz = coord[2] as i64 + offset[2];
                if !field.in_bounds(nx, ny, nz) {
                    continue;
                }
                let next = field.index_of(nx as usize, ny as usize, nz as usize);
                if !visited[next] && is_occupied(field.cells[next]) {
                    visited[next] = true;
                    stack.push(next);
                }
            }
        }

        voxels.sort_unstable();
        components.push(Component {
            origin: lo,
            extent: [hi[0] - lo[0] + 1, hi[1] - lo[1] + 1, hi[2] - lo[2] + 1],
            voxels,
        });
    }

    components
}

/// Extract the same mesh as [`extract_mesh`](super::extract_mesh), meshing
/// each component separately before merging.
///
/// Face order follows component order, so it may differ from the direct
/// extraction; the face and vertex sets are identical.
pub fn extract_mesh_clustered(field: &ScalarField) -> Mesh {
    let components = find_components(field);
    if components.is_empty() {
        return Mesh::default();
    }
    let codes = detect_faces(field);

    let locals: Vec<(Mesh, [i32; 3])> = components
        .par_iter()
        .map(|component| {
            let origin = component.origin.map(|v| v as i32);
            let faces: usize = component
                .voxels
                .iter()
                .map(|&idx| codes[idx].count_ones() as usize)
                .sum();
            let mut builder = MeshBuilder::with_capacity(faces);
            for &idx in &component.voxels {
                let [x, y, z] = field.coord_of(idx);
                let local = [
                    x as i32 - origin[0],
                    y as i32 - origin[1],
                    z as i32 - origin[2],
                ];
                emit_voxel(&mut builder, local, codes[idx], field.cells[idx]);
            }
            (builder.finish(), origin)
        })
        .collect();

    let total_faces: usize = locals.iter().map(|(mesh, _)| mesh.face_count()).sum();
    let mut merged = MeshBuilder::with_capacity(total_faces);
    for (mesh, origin) in &locals {
        for (face, &value) in mesh.faces.iter().zip(&mesh.values) {
            let corners = face.map(|i| {
                let v = mesh.vertices[i as usize];
                [v[0] + origin[0], v[1] + origin[1], v[2] + origin[2]]
            });
            merged.push_face(corners, value);
        }
    }
    merged.finish()
}
