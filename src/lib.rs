//! Lenia 3D - continuous cellular automata on a cubic lattice
//!
//! This library steps a 3D Lenia field with an FFT convolution, turns the
//! occupied voxels into a deduplicated quad surface mesh, and exposes a C ABI
//! so a renderer host can drive it through an opaque handle.
//!
//! ```no_run
//! use lenia3d::{Simulation, SimulationConfig};
//!
//! let mut sim = Simulation::new(SimulationConfig::default())?;
//! for frame in sim.run(100)? {
//!     println!("{}: {} faces", frame.generation, frame.mesh.face_count());
//! }
//! # Ok::<(), lenia3d::LeniaError>(())
//! ```

pub mod automaton;
pub mod config;
pub mod error;
pub mod ffi;
pub mod mesh;
pub mod simulation;
pub mod state;

pub use automaton::{
    build_kernel, build_kernel_with, growth, random_state, step, step_with, GrowthFunction,
    Kernel, KernelCore, ScalarField,
};
pub use config::{LeniaParams, SeedParams, SimulationConfig};
pub use error::{LeniaError, Result};
pub use mesh::{extract_mesh, extract_mesh_clustered, triangle_values, triangulate, Mesh};
pub use simulation::{Frame, Simulation};
pub use state::State;
