//! Cell access and stepping.

use log::warn;

use crate::state::State;

/// Advances the field by one sub-step.
///
/// # Safety
/// - `ptr` must be a valid pointer to a State
///
/// Invalidates the cached frame.
///
/// # Returns
/// 0 on success, 1 on failure (null pointer or step error)
#[no_mangle]
pub unsafe extern "C" fn lenia_step(ptr: *mut State) -> i32 {
    if ptr.is_null() {
        return 1;
    }

    let state = &mut *ptr;
    state.frame = None;
    match state.sim.advance() {
        Ok(()) => 0,
        Err(e) => {
            warn!("lenia_step failed: {}", e);
            1
        }
    }
}

/// Sets a cell's intensity.
///
/// # Safety
/// - `ptr` must be a valid pointer to a State
///
/// Values are clamped to [0, 1]; NaN is stored as 0.
/// Out-of-bounds coordinates are silently ignored.
#[no_mangle]
pub unsafe extern "C" fn lenia_set_cell(ptr: *mut State, x: i32, y: i32, z: i32, value: f64) {
    if ptr.is_null() {
        return;
    }

    let state = &mut *ptr;
    let value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
    state.frame = None;
    state
        .sim
        .field_mut()
        .set(x as i64, y as i64, z as i64, value);
}

/// Gets a cell's intensity.
///
/// # Safety
/// - `ptr` must be a valid pointer to a State
///
/// # Returns
/// 0.0 if out of bounds or null pointer.
#[no_mangle]
pub unsafe extern "C" fn lenia_get_cell(ptr: *const State, x: i32, y: i32, z: i32) -> f64 {
    if ptr.is_null() {
        return 0.0;
    }

    let state = &*ptr;
    state.sim.field().get(x as i64, y as i64, z as i64)
}

/// Counts occupied cells.
///
/// # Safety
/// - `ptr` must be a valid pointer to a State
///
/// # Returns
/// 0 if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn lenia_occupied_count(ptr: *const State) -> u64 {
    if ptr.is_null() {
        return 0;
    }

    (*ptr).sim.field().occupied_count() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ffi::lifecycle;
    use std::ptr;

    unsafe fn small_state() -> *mut State {
        let state = lifecycle::lenia_create(8, 3.0, 0.15, 0.03, 4, 2, 2, 3, 11, 1);
        assert!(!state.is_null());
        state
    }

    #[test]
    fn test_set_and_get_cell() {
        unsafe {
            let state = small_state();

            lenia_set_cell(state, 1, 2, 3, 0.75);
            assert_eq!(lenia_get_cell(state, 1, 2, 3), 0.75);

            lenia_set_cell(state, 1, 2, 3, 4.0);
            assert_eq!(lenia_get_cell(state, 1, 2, 3), 1.0);

            lenia_set_cell(state, 1, 2, 3, -2.0);
            assert_eq!(lenia_get_cell(state, 1, 2, 3), 0.0);

            lenia_set_cell(state, 1, 2, 3, f64::NAN);
            assert_eq!(lenia_get_cell(state, 1, 2, 3), 0.0);

            lifecycle::lenia_destroy(state);
        }
    }

    #[test]
    fn test_out_of_bounds_access() {
        unsafe {
            let state = small_state();

            assert_eq!(lenia_get_cell(state, -1, 0, 0), 0.0);
            assert_eq!(lenia_get_cell(state, 8, 0, 0), 0.0);

            // Should not crash
            lenia_set_cell(state, -1, 0, 0, 1.0);
            lenia_set_cell(state, 8, 0, 0, 1.0);

            lifecycle::lenia_destroy(state);
        }
    }

    #[test]
    fn test_step() {
        unsafe {
            let state = small_state();
            assert_eq!(lifecycle::lenia_generation(state), 0);

            assert_eq!(lenia_step(state), 0);
            assert_eq!(lenia_step(state), 0);

            assert_eq!(lifecycle::lenia_generation(state), 2);
            for z in 0..8 {
                for y in 0..8 {
                    for x in 0..8 {
                        let v = lenia_get_cell(state, x, y, z);
                        assert!((0.0..=1.0).contains(&v));
                    }
                }
            }

            lifecycle::lenia_destroy(state);
        }
    }

    #[test]
    fn test_occupied_count() {
        unsafe {
            let state = small_state();
            for z in 0..8 {
                for y in 0..8 {
                    for x in 0..8 {
                        lenia_set_cell(state, x, y, z, 0.0);
                    }
                }
            }
            assert_eq!(lenia_occupied_count(state), 0);

            lenia_set_cell(state, 4, 4, 4, 0.5);
            lenia_set_cell(state, 0, 0, 0, 0.1);
            assert_eq!(lenia_occupied_count(state), 2);

            lifecycle::lenia_destroy(state);
        }
    }

    #[test]
    fn test_null_pointer_handling() {
        unsafe {
            assert_eq!(lenia_step(ptr::null_mut()), 1);
            lenia_set_cell(ptr::null_mut(), 0, 0, 0, 1.0); // Should not crash
            assert_eq!(lenia_get_cell(ptr::null(), 0, 0, 0), 0.0);
            assert_eq!(lenia_occupied_count(ptr::null()), 0);
        }
    }
}
