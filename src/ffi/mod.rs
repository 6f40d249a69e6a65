//! C FFI layer for renderer hosts.
//!
//! This module exports C ABI functions for use from C, LuaJIT FFI, or any
//! other host that can call `extern "C"` symbols. All functions are marked
//! with `#[no_mangle]` and use `extern "C"`.
//!
//! The actual logic is in the `simulation` module. These functions are thin
//! wrappers that handle null checks, pointer safety, and C-to-Rust
//! conversions.

pub mod field;
pub mod frame;
pub mod lifecycle;

pub use field::{lenia_get_cell, lenia_occupied_count, lenia_set_cell, lenia_step};
pub use frame::{
    lenia_build_frame, lenia_copy_triangle_values, lenia_copy_triangles, lenia_copy_vertices,
    lenia_frame_triangle_count, lenia_frame_vertex_count,
};
pub use lifecycle::{lenia_create, lenia_destroy, lenia_generation, lenia_reset, lenia_seed};
