//! Frame building and buffer export.
//!
//! A frame is built once with `lenia_build_frame` and cached on the handle.
//! Callers size their buffers with the count queries, then copy each array
//! out. Stepping or editing cells drops the cached frame.

use log::warn;

use crate::simulation::Frame;
use crate::state::State;

/// Meshes the current field and caches the result on the handle.
///
/// # Safety
/// - `ptr` must be a valid pointer to a State
///
/// # Returns
/// 0 on success, 1 on failure (null pointer or meshing error)
#[no_mangle]
pub unsafe extern "C" fn lenia_build_frame(ptr: *mut State) -> i32 {
    if ptr.is_null() {
        return 1;
    }

    let state = &mut *ptr;
    match state.sim.frame() {
        Ok(frame) => {
            state.frame = Some(frame);
            0
        }
        Err(e) => {
            warn!("lenia_build_frame failed: {}", e);
            state.frame = None;
            1
        }
    }
}

/// Number of vertices in the cached frame (0 if none).
///
/// # Safety
/// - `ptr` must be a valid pointer to a State, or null
#[no_mangle]
pub unsafe extern "C" fn lenia_frame_vertex_count(ptr: *const State) -> u64 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).frame_vertex_count() as u64
}

/// Number of triangles in the cached frame (0 if none).
///
/// # Safety
/// - `ptr` must be a valid pointer to a State, or null
#[no_mangle]
pub unsafe extern "C" fn lenia_frame_triangle_count(ptr: *const State) -> u64 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).frame_triangle_count() as u64
}

/// Resolves the cached frame and the caller's buffer, or `None` if either is
/// missing or the buffer holds fewer than `needed(frame)` elements.
unsafe fn frame_and_buffer<'a, T>(
    ptr: *const State,
    out_buf: *mut T,
    capacity: usize,
    needed: impl Fn(&Frame) -> usize,
) -> Option<(&'a Frame, &'a mut [T])> {
    if ptr.is_null() || out_buf.is_null() {
        return None;
    }
    let frame = (*ptr).frame.as_ref()?;
    let len = needed(frame);
    if capacity < len {
        warn!("output buffer too small: need {}, got {}", len, capacity);
        return None;
    }
    Some((frame, std::slice::from_raw_parts_mut(out_buf, len)))
}

/// Copies vertex coordinates as `x, y, z` triples.
///
/// # Safety
/// - `ptr` must be a valid pointer to a State, or null
/// - `out_buf` must point to at least `capacity` writable `i32`s
///
/// # Returns
/// Number of `i32`s written (3 per vertex), or 0 on error.
#[no_mangle]
pub unsafe extern "C" fn lenia_copy_vertices(
    ptr: *const State,
    out_buf: *mut i32,
    capacity: usize,
) -> u64 {
    let Some((frame, out)) =
        frame_and_buffer(ptr, out_buf, capacity, |f| 3 * f.mesh.vertex_count())
    else {
        return 0;
    };

    for (dst, v) in out.chunks_exact_mut(3).zip(&frame.mesh.vertices) {
        dst.copy_from_slice(v);
    }
    out.len() as u64
}

/// Copies triangle vertex indices as `a, b, c` triples.
///
/// # Safety
/// - `ptr` must be a valid pointer to a State, or null
/// - `out_buf` must point to at least `capacity` writable `u32`s
///
/// # Returns
/// Number of `u32`s written (3 per triangle), or 0 on error.
#[no_mangle]
pub unsafe extern "C" fn lenia_copy_triangles(
    ptr: *const State,
    out_buf: *mut u32,
    capacity: usize,
) -> u64 {
    let Some((frame, out)) = frame_and_buffer(ptr, out_buf, capacity, |f| 3 * f.triangles.len())
    else {
        return 0;
    };

    for (dst, tri) in out.chunks_exact_mut(3).zip(&frame.triangles) {
        dst.copy_from_slice(tri);
    }
    out.len() as u64
}

/// Copies one intensity per triangle.
///
/// # Safety
/// - `ptr` must be a valid pointer to a State, or null
/// - `out_buf` must point to at least `capacity` writable `f64`s
///
/// # Returns
/// Number of values written, or 0 on error.
#[no_mangle]
pub unsafe extern "C" fn lenia_copy_triangle_values(
    ptr: *const State,
    out_buf: *mut f64,
    capacity: usize,
) -> u64 {
    let Some((frame, out)) =
        frame_and_buffer(ptr, out_buf, capacity, |f| f.triangle_values.len())
    else {
        return 0;
    };

    out.copy_from_slice(&frame.triangle_values);
    out.len() as u64
}
