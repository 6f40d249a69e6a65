//! Handle creation, destruction, and counter queries.

use log::warn;

use crate::config::{LeniaParams, SeedParams, SimulationConfig};
use crate::simulation::Simulation;
use crate::state::State;

/// Creates a seeded simulation and returns an opaque pointer.
///
/// `use_seed == 0` draws a fresh seed; query it with `lenia_seed`.
/// Returns null if any parameter is invalid.
#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub extern "C" fn lenia_create(
    grid_size: u32,
    radius: f64,
    mean: f64,
    stdev: f64,
    substeps: u32,
    cluster_count: u32,
    cluster_size_lo: u32,
    cluster_size_hi: u32,
    seed: u64,
    use_seed: u8,
) -> *mut State {
    let config = SimulationConfig {
        grid_size: grid_size as usize,
        params: LeniaParams {
            radius,
            mean,
            stdev,
            substeps,
            ..LeniaParams::default()
        },
        seeding: SeedParams {
            cluster_count: cluster_count as usize,
            cluster_size: (cluster_size_lo as usize, cluster_size_hi as usize),
            seed: if use_seed != 0 { Some(seed) } else { None },
        },
    };

    match Simulation::new(config) {
        Ok(sim) => Box::into_raw(Box::new(State::new(sim))),
        Err(e) => {
            warn!("lenia_create rejected: {}", e);
            std::ptr::null_mut()
        }
    }
}

/// Destroys a simulation and frees its memory.
///
/// # Safety
/// - `ptr` must be null or a pointer returned by `lenia_create`
/// - `ptr` must not be used after this call
#[no_mangle]
pub unsafe extern "C" fn lenia_destroy(ptr: *mut State) {
    if !ptr.is_null() {
        drop(Box::from_raw(ptr));
    }
}

/// Gets the number of sub-steps taken since seeding or the last reset.
///
/// # Safety
/// - `ptr` must be a valid pointer to a State, or null
///
/// # Returns
/// 0 if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn lenia_generation(ptr: *const State) -> u64 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).sim.generation()
}

/// Gets the seed that produced the initial field.
///
/// # Safety
/// - `ptr` must be a valid pointer to a State, or null
///
/// # Returns
/// 0 if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn lenia_seed(ptr: *const State) -> u64 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).sim.seed()
}

/// Returns the field to its starting state and clears the cached frame.
///
/// # Safety
/// - `ptr` must be a valid pointer to a State, or null
///
/// # Returns
/// 0 on success, 1 on failure (null pointer or rejected reset)
#[no_mangle]
pub unsafe extern "C" fn lenia_reset(ptr: *mut State) -> i32 {
    if ptr.is_null() {
        return 1;
    }
    let state = &mut *ptr;
    state.frame = None;
    match state.sim.reset() {
        Ok(()) => 0,
        Err(e) => {
            warn!("lenia_reset failed: {}", e);
            1
        }
    }
}
