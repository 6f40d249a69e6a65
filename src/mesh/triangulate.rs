//! Fan triangulation of polygon faces.

use crate::error::{LeniaError, Result};

/// Split each face into a triangle fan around its first vertex.
///
/// A face with `n` vertices yields `n - 2` triangles
/// `(v0, v[i+1], v[i+2])`. Quads give exactly two triangles sharing the
/// `v0`–`v2` diagonal, and the winding of the input is preserved.
pub fn triangulate<F: AsRef<[u32]>>(faces: &[F]) -> Result<Vec<[u32; 3]>> {
    let mut triangles = Vec::with_capacity(faces.len() * 2);
    for (i, face) in faces.iter().enumerate() {
        let face = face.as_ref();
        if face.len() < 3 {
            return Err(LeniaError::DegenerateFace {
                face: i,
                vertices: face.len(),
            });
        }
        let v0 = face[0];
        triangles.extend(face[1..].windows(2).map(|pair| [v0, pair[0], pair[1]]));
    }
    Ok(triangles)
}

/// Repeat each face's value once per triangle it produced.
///
/// `faces` and `values` must line up one-to-one.
pub fn triangle_values<F: AsRef<[u32]>>(faces: &[F], values: &[f64]) -> Vec<f64> {
    faces
        .iter()
        .zip(values)
        .flat_map(|(face, &v)| {
            std::iter::repeat(v).take(face.as_ref().len().saturating_sub(2))
        })
        .collect()
}
