//! Quad mesh extraction from direction codes.
//!
//! Pipeline:
//! 1. Face detection (per-voxel 6-bit codes)
//! 2. Quad emission (one quad per set bit, tagged with the voxel value)
//! 3. Vertex deduplication by exact lattice coordinate
//!
//! Interior faces never get emitted, so no cancellation pass is needed.

use std::collections::HashMap;

use super::faces::{count_faces, detect_faces, FACE_CORNERS};
use crate::automaton::grid::ScalarField;

/// Lattice corner coordinate.
pub type Vertex = [i32; 3];

/// Four vertex indices of one cube-face quad.
pub type Quad = [u32; 4];

/// Deduplicated quad mesh bounding the occupied region of a field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub faces: Vec<Quad>,
    /// Source voxel value for each face.
    pub values: Vec<f64>,
}

impl Mesh {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

/// Builds a mesh while collapsing repeated corner coordinates.
///
/// Corners come from fields no larger than
/// [`MAX_GRID_SIZE`](crate::automaton::grid::MAX_GRID_SIZE) per axis, so
/// every coordinate fits in `i32` and the `(size + 1)³` distinct corners fit
/// in `u32` indices.
#[derive(Debug, Default)]
pub(crate) struct MeshBuilder {
    mesh: Mesh,
    lookup: HashMap<Vertex, u32>,
}

impl MeshBuilder {
    pub(crate) fn with_capacity(faces: usize) -> Self {
        MeshBuilder {
            mesh: Mesh {
                vertices: Vec::with_capacity(faces),
                faces: Vec::with_capacity(faces),
                values: Vec::with_capacity(faces),
            },
            lookup: HashMap::with_capacity(faces),
        }
    }

    #[inline]
    pub(crate) fn vertex(&mut self, v: Vertex) -> u32 {
        let vertices = &mut self.mesh.vertices;
        *self.lookup.entry(v).or_insert_with(|| {
            vertices.push(v);
            (vertices.len() - 1) as u32
        })
    }

    pub(crate) fn push_face(&mut self, corners: [Vertex; 4], value: f64) {
        let quad = corners.map(|c| self.vertex(c));
        self.mesh.faces.push(quad);
        self.mesh.values.push(value);
    }

    pub(crate) fn finish(self) -> Mesh {
        self.mesh
    }
}

/// Extract the boundary quad mesh of the field's occupied voxels.
///
/// # Example
/// ```
/// use lenia3d::{extract_mesh, ScalarField};
///
/// let mut field = ScalarField::new(8).unwrap();
/// field.set(3, 3, 3, 1.0);
///
/// let mesh = extract_mesh(&field);
/// assert_eq!(mesh.vertex_count(), 8);
/// assert_eq!(mesh.face_count(), 6);
/// ```
pub fn extract_mesh(field: &ScalarField) -> Mesh {
    let codes = detect_faces(field);
    let face_total = count_faces(&codes);
    if face_total == 0 {
        return Mesh::default();
    }

    let mut builder = MeshBuilder::with_capacity(face_total);
    for (idx, &code) in codes.iter().enumerate() {
        if code == 0 {
            continue;
        }
        let [x, y, z] = field.coord_of(idx);
        emit_voxel(
            &mut builder,
            [x as i32, y as i32, z as i32],
            code,
            field.cells[idx],
        );
    }
    builder.finish()
}

/// Emit one quad per set bit of `code` for the voxel at `origin`.
pub(crate) fn emit_voxel(builder: &mut MeshBuilder, origin: Vertex, code: u8, value: f64) {
    for (face, corners) in FACE_CORNERS.iter().enumerate() {
        if code & (1 << face) == 0 {
            continue;
        }
        let absolute = corners.map(|c| [origin[0] + c[0], origin[1] + c[1], origin[2] + c[2]]);
        builder.push_face(absolute, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn field_with(size: usize, voxels: &[([i64; 3], f64)]) -> ScalarField {
        let mut field = ScalarField::new(size).unwrap();
        for (v, value) in voxels {
            field.set(v[0], v[1], v[2], *value);
        }
        field
    }

    fn sparse_random_field(size: usize, density: f64, seed: u64) -> ScalarField {
        let mut rng = StdRng::seed_from_u64(seed);
        let cells = (0..size * size * size)
            .map(|_| if rng.gen_bool(density) { rng.gen_range(0.01..1.0) } else { 0.0 })
            .collect();
        ScalarField::from_cells(size, cells).unwrap()
    }

    fn assert_well_formed(mesh: &Mesh) {
        assert_eq!(mesh.values.len(), mesh.faces.len());
        for face in &mesh.faces {
            for &i in face {
                assert!((i as usize) < mesh.vertices.len());
            }
        }
        let unique: HashSet<Vertex> = mesh.vertices.iter().copied().collect();
        assert_eq!(unique.len(), mesh.vertices.len(), "duplicate vertices");
    }

    #[test]
    fn test_largest_lattice_fits_index_types() {
        use crate::automaton::grid::MAX_GRID_SIZE;

        let corners = (MAX_GRID_SIZE as u64 + 1).pow(3);
        assert!(corners <= u32::MAX as u64);
        assert!(MAX_GRID_SIZE as u64 + 1 <= i32::MAX as u64);
    }

    #[test]
    fn test_empty_field() {
        let field = ScalarField::new(8).unwrap();
        let mesh = extract_mesh(&field);

        assert!(mesh.vertices.is_empty());
        assert!(mesh.faces.is_empty());
        assert!(mesh.values.is_empty());
    }

    #[test]
    fn test_single_voxel_is_closed_cube() {
        let field = field_with(8, &[([3, 3, 3], 1.0)]);
        let mesh = extract_mesh(&field);

        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.face_count(), 6);
        assert!(mesh.values.iter().all(|&v| v == 1.0));

        let corners: HashSet<Vertex> = mesh.vertices.iter().copied().collect();
        for x in 3..=4 {
            for y in 3..=4 {
                for z in 3..=4 {
                    assert!(corners.contains(&[x, y, z]));
                }
            }
        }
        assert_well_formed(&mesh);
    }

    #[test]
    fn test_single_voxel_anywhere() {
        for pos in [[0, 0, 0], [5, 0, 2], [1, 4, 3], [5, 5, 5]] {
            let field = field_with(6, &[(pos, 0.5)]);
            let mesh = extract_mesh(&field);
            assert_eq!(mesh.vertex_count(), 8, "voxel at {:?}", pos);
            assert_eq!(mesh.face_count(), 6, "voxel at {:?}", pos);
        }
    }

    #[test]
    fn test_face_adjacent_pair() {
        let field = field_with(8, &[([3, 3, 3], 0.25), ([3, 4, 3], 0.75)]);
        let mesh = extract_mesh(&field);

        assert_eq!(mesh.face_count(), 10);
        assert_eq!(mesh.vertex_count(), 12);
        assert_eq!(mesh.values.iter().filter(|&&v| v == 0.25).count(), 5);
        assert_eq!(mesh.values.iter().filter(|&&v| v == 0.75).count(), 5);
        assert_well_formed(&mesh);
    }

    #[test]
    fn test_edge_touching_pair_shares_vertices() {
        // Diagonal neighbours keep all 12 faces but share one edge (2 corners).
        let field = field_with(8, &[([3, 3, 3], 1.0), ([4, 4, 3], 1.0)]);
        let mesh = extract_mesh(&field);

        assert_eq!(mesh.face_count(), 12);
        assert_eq!(mesh.vertex_count(), 14);
        assert_well_formed(&mesh);
    }

    #[test]
    fn test_solid_block_surface() {
        let mut voxels = Vec::new();
        for z in 1..4 {
            for y in 1..4 {
                for x in 1..4 {
                    voxels.push(([x, y, z], 1.0));
                }
            }
        }
        let field = field_with(6, &voxels);
        let mesh = extract_mesh(&field);

        // 9 quads per side; 4³ lattice corners minus the 2³ interior ones.
        assert_eq!(mesh.face_count(), 54);
        assert_eq!(mesh.vertex_count(), 64 - 8);
        assert_well_formed(&mesh);
    }

    #[test]
    fn test_random_fields_are_well_formed() {
        for seed in 0..6 {
            let field = sparse_random_field(10, 0.2, seed);
            let mesh = extract_mesh(&field);
            assert!(!mesh.is_empty());
            assert_well_formed(&mesh);
        }
    }

    #[test]
    fn test_every_edge_shared_by_two_faces() {
        // A closed surface uses each directed edge once in each direction.
        let field = sparse_random_field(8, 0.35, 99);
        let mesh = extract_mesh(&field);

        let mut edges: HashMap<(u32, u32), i32> = HashMap::new();
        for face in &mesh.faces {
            for k in 0..4 {
                let a = face[k];
                let b = face[(k + 1) % 4];
                *edges.entry((a, b)).or_default() += 1;
            }
        }
        for (&(a, b), &count) in &edges {
            let reverse = edges.get(&(b, a)).copied().unwrap_or(0);
            assert_eq!(count, reverse, "edge {}->{} is unbalanced", a, b);
        }
    }
}
