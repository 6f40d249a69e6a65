//! Voxel surface meshing.
//!
//! Turns the occupied region of a field into a deduplicated quad mesh with
//! one intensity per face, and fan-triangulates it for renderers that only
//! take triangles.

pub mod cluster;
pub mod extract;
pub mod faces;
pub mod triangulate;

pub use cluster::{extract_mesh_clustered, find_components, Component};
pub use extract::{extract_mesh, Mesh, Quad, Vertex};
pub use faces::{detect_faces, CENTER_WEIGHT, FACE_BITS, FACE_CORNERS};
pub use triangulate::{triangle_values, triangulate};
