//! Core automaton logic: field storage, kernel construction, seeding and
//! stepping.
//!
//! The driver in `simulation` and the FFI layer in `ffi/` call these
//! functions.

pub mod fft;
pub mod grid;
pub mod kernel;
pub mod seeding;
pub mod stepping;

pub use grid::{is_occupied, ScalarField, MAX_GRID_SIZE};
pub use kernel::{build_kernel, build_kernel_with, Kernel, KernelCore};
pub use seeding::random_state;
pub use stepping::{growth, step, step_with, GrowthFunction};
