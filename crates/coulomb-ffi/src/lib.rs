//! C ABI for embedding the charge store and field engine in a host UI.
//!
//! The host owns one opaque [`CoulombStore`] per lab, created with
//! [`coulomb_store_new`] and released with [`coulomb_store_free`]. Every function
//! accepts a null handle and answers with `false`, `0` or `0.0`.
//!
//! Charge ids are plain `u64` values; `0` never names a charge.

use coulomblab::core::models::ids::ChargeId;
use coulomblab::core::models::store::ChargeStore;
use coulomblab::core::physics::electrostatics::{field_at, forces_on_all, potential_at};
use coulomblab::core::sampling::grid::{GridSpec, Viewport};
use nalgebra::Point2;
use std::ptr;

/// Opaque handle: a store plus the viewport drags are clamped to.
pub struct CoulombStore {
    store: ChargeStore,
    viewport: Viewport,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CoulombForce {
    pub id: u64,
    pub x: f64,
    pub y: f64,
    pub fx: f64,
    pub fy: f64,
    pub magnitude: f64,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CoulombVector {
    pub x: f64,
    pub y: f64,
}

/// # Safety
///
/// `handle` must be null or a pointer returned by [`coulomb_store_new`] that has not
/// been freed, with no other live reference to it.
unsafe fn store_mut<'a>(handle: *mut CoulombStore) -> Option<&'a mut CoulombStore> {
    // SAFETY: upheld by the caller.
    unsafe { handle.as_mut() }
}

/// # Safety
///
/// Same as [`store_mut`], for shared access.
unsafe fn store_ref<'a>(handle: *const CoulombStore) -> Option<&'a CoulombStore> {
    // SAFETY: upheld by the caller.
    unsafe { handle.as_ref() }
}

/// Creates an empty store with the default capacity and an unknown viewport.
#[unsafe(no_mangle)]
pub extern "C" fn coulomb_store_new() -> *mut CoulombStore {
    Box::into_raw(Box::new(CoulombStore {
        store: ChargeStore::new(),
        viewport: Viewport::default(),
    }))
}

/// # Safety
///
/// `handle` must be null or come from [`coulomb_store_new`]; it is invalid afterwards.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn coulomb_store_free(handle: *mut CoulombStore) {
    if !handle.is_null() {
        // SAFETY: the pointer came from Box::into_raw and is released once.
        drop(unsafe { Box::from_raw(handle) });
    }
}

/// Records the canvas size used to clamp drags.
///
/// # Safety
///
/// `handle` must be null or a live store handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn coulomb_store_set_viewport(
    handle: *mut CoulombStore,
    width: f64,
    height: f64,
) -> bool {
    let Some(lab) = (unsafe { store_mut(handle) }) else {
        return false;
    };
    lab.viewport = Viewport::new(width, height);
    true
}

/// Adds a default charge. Returns its id, or `0` if the store is full.
///
/// # Safety
///
/// `handle` must be null or a live store handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn coulomb_store_add(handle: *mut CoulombStore) -> u64 {
    unsafe { store_mut(handle) }
        .and_then(|lab| lab.store.add())
        .map_or(0, ChargeId::get)
}

/// # Safety
///
/// `handle` must be null or a live store handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn coulomb_store_remove(handle: *mut CoulombStore, id: u64) -> bool {
    unsafe { store_mut(handle) }.is_some_and(|lab| lab.store.remove(ChargeId(id)).is_some())
}

/// Moves a charge, clamped so its marker stays inside the viewport.
///
/// Returns `false` and leaves the charge alone until a viewport has been set.
///
/// # Safety
///
/// `handle` must be null or a live store handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn coulomb_store_drag(
    handle: *mut CoulombStore,
    id: u64,
    x: f64,
    y: f64,
) -> bool {
    let Some(lab) = (unsafe { store_mut(handle) }) else {
        return false;
    };
    lab.store
        .drag_to(ChargeId(id), Point2::new(x, y), &lab.viewport)
        .is_ok_and(|placed| placed.is_some())
}

/// # Safety
///
/// `handle` must be null or a live store handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn coulomb_store_set_magnitude(
    handle: *mut CoulombStore,
    id: u64,
    magnitude: f64,
) -> bool {
    unsafe { store_mut(handle) }
        .is_some_and(|lab| lab.store.set_magnitude(ChargeId(id), magnitude).is_ok())
}

/// # Safety
///
/// `handle` must be null or a live store handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn coulomb_store_toggle_polarity(handle: *mut CoulombStore, id: u64) -> bool {
    unsafe { store_mut(handle) }.is_some_and(|lab| lab.store.toggle_polarity(ChargeId(id)).is_ok())
}

/// # Safety
///
/// `handle` must be null or a live store handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn coulomb_store_len(handle: *const CoulombStore) -> usize {
    unsafe { store_ref(handle) }.map_or(0, |lab| lab.store.len())
}

/// Writes the net force on each charge, in store order, into `out`.
///
/// At most `capacity` entries are written; the return value is the number written.
///
/// # Safety
///
/// `handle` must be null or a live store handle. `out` must be null or valid for
/// writes of `capacity` consecutive [`CoulombForce`] values.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn coulomb_forces(
    handle: *const CoulombStore,
    out: *mut CoulombForce,
    capacity: usize,
) -> usize {
    let Some(lab) = (unsafe { store_ref(handle) }) else {
        return 0;
    };
    if out.is_null() || capacity == 0 {
        return 0;
    }

    let forces = forces_on_all(lab.store.snapshot());
    let count = forces.len().min(capacity);
    for (i, force) in forces.iter().take(count).enumerate() {
        let entry = CoulombForce {
            id: force.id.get(),
            x: force.position.x,
            y: force.position.y,
            fx: force.fx(),
            fy: force.fy(),
            magnitude: force.magnitude,
        };
        // SAFETY: i < count <= capacity, and the caller guarantees `out` spans capacity.
        unsafe { ptr::write(out.add(i), entry) };
    }
    count
}

/// Evaluates the electric field (N/C) at `(x, y)` into `out`.
///
/// # Safety
///
/// `handle` must be null or a live store handle. `out` must be null or valid for one
/// write of [`CoulombVector`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn coulomb_field_at(
    handle: *const CoulombStore,
    x: f64,
    y: f64,
    out: *mut CoulombVector,
) -> bool {
    let Some(lab) = (unsafe { store_ref(handle) }) else {
        return false;
    };
    if out.is_null() {
        return false;
    }
    let field = field_at(&Point2::new(x, y), lab.store.snapshot());
    // SAFETY: non-null and valid for one write per the contract above.
    unsafe {
        ptr::write(
            out,
            CoulombVector {
                x: field.x,
                y: field.y,
            },
        )
    };
    true
}

/// Electric potential (V) at `(x, y)`.
///
/// # Safety
///
/// `handle` must be null or a live store handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn coulomb_potential_at(handle: *const CoulombStore, x: f64, y: f64) -> f64 {
    unsafe { store_ref(handle) }.map_or(0.0, |lab| potential_at(&Point2::new(x, y), lab.store.snapshot()))
}

/// Number of overlay samples a `width` x `height` viewport yields at `step`.
///
/// Returns `0` for an invalid step, a viewport with no positive area, or a grid too
/// large to sample.
#[unsafe(no_mangle)]
pub extern "C" fn coulomb_grid_len(width: f64, height: f64, step: f64) -> usize {
    GridSpec::new(Viewport::new(width, height), step).map_or(0, |grid| grid.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_handles_are_tolerated() {
        let null = ptr::null_mut::<CoulombStore>();
        unsafe {
            assert_eq!(coulomb_store_add(null), 0);
            assert!(!coulomb_store_remove(null, 1));
            assert!(!coulomb_store_drag(null, 1, 0.0, 0.0));
            assert!(!coulomb_store_set_magnitude(null, 1, 5.0));
            assert!(!coulomb_store_toggle_polarity(null, 1));
            assert!(!coulomb_store_set_viewport(null, 100.0, 100.0));
            assert_eq!(coulomb_store_len(null), 0);
            assert_eq!(coulomb_potential_at(null, 0.0, 0.0), 0.0);
            let mut field = CoulombVector::default();
            assert!(!coulomb_field_at(null, 0.0, 0.0, &mut field));
            let mut buffer = [CoulombForce::default(); 2];
            assert_eq!(coulomb_forces(null, buffer.as_mut_ptr(), buffer.len()), 0);
            coulomb_store_free(null);
        }
    }

    #[test]
    fn store_lifecycle_through_the_abi() {
        let handle = coulomb_store_new();
        unsafe {
            let first = coulomb_store_add(handle);
            let second = coulomb_store_add(handle);
            assert_eq!((first, second), (1, 2));
            assert_eq!(coulomb_store_len(handle), 2);

            assert!(coulomb_store_set_viewport(handle, 360.0, 320.0));
            assert!(coulomb_store_drag(handle, first, 0.0, 150.0));
            assert!(coulomb_store_drag(handle, second, 500.0, 150.0));
            assert!(coulomb_store_toggle_polarity(handle, second));

            let mut buffer = [CoulombForce::default(); 5];
            let written = coulomb_forces(handle, buffer.as_mut_ptr(), buffer.len());
            assert_eq!(written, 2);
            assert_eq!(buffer[1].x, 340.0);
            assert!(buffer[0].fx > 0.0);
            assert!(buffer[1].fx < 0.0);
            assert!((buffer[0].magnitude - buffer[1].magnitude).abs() <= 1e-12 * buffer[0].magnitude);

            assert!(coulomb_store_remove(handle, first));
            assert!(!coulomb_store_remove(handle, first));
            assert_eq!(coulomb_store_len(handle), 1);
            assert!(!coulomb_store_set_magnitude(handle, first, 3.0));

            coulomb_store_free(handle);
        }
    }

    #[test]
    fn forces_respect_the_buffer_capacity() {
        let handle = coulomb_store_new();
        unsafe {
            for _ in 0..3 {
                coulomb_store_add(handle);
            }
            let mut buffer = [CoulombForce::default(); 1];
            assert_eq!(coulomb_forces(handle, buffer.as_mut_ptr(), 1), 1);
            assert_eq!(buffer[0].id, 1);
            assert_eq!(coulomb_forces(handle, ptr::null_mut(), 3), 0);
            coulomb_store_free(handle);
        }
    }

    #[test]
    fn field_and_potential_match_a_single_charge() {
        let handle = coulomb_store_new();
        unsafe {
            let id = coulomb_store_add(handle);
            assert_ne!(id, 0);
            // Default charge: +10 nC at (150, 150).
            let mut field = CoulombVector::default();
            assert!(coulomb_field_at(handle, 160.0, 150.0, &mut field));
            assert!(field.x > 0.0);
            assert_eq!(field.y, 0.0);
            assert!(coulomb_potential_at(handle, 160.0, 150.0) > 0.0);
            assert_eq!(coulomb_potential_at(handle, 150.0, 150.0), 0.0);
            coulomb_store_free(handle);
        }
    }

    #[test]
    fn grid_len_matches_the_overlay_grid() {
        assert_eq!(coulomb_grid_len(90.0, 90.0, 30.0), 9);
        assert_eq!(coulomb_grid_len(90.0, 90.0, 12.0), 64);
        assert_eq!(coulomb_grid_len(0.0, 90.0, 30.0), 0);
        assert_eq!(coulomb_grid_len(90.0, 90.0, 0.0), 0);
        assert_eq!(coulomb_grid_len(1e20, 1e20, 30.0), 0);
        assert_eq!(coulomb_grid_len(360.0, 320.0, 1e-300), 0);
    }

    #[test]
    fn drag_waits_for_a_viewport() {
        let handle = coulomb_store_new();
        unsafe {
            let id = coulomb_store_add(handle);
            assert!(!coulomb_store_drag(handle, id, 160.0, 170.0));

            let mut forces = [CoulombForce::default(); 1];
            assert_eq!(coulomb_forces(handle, forces.as_mut_ptr(), 1), 1);
            assert_eq!((forces[0].x, forces[0].y), (150.0, 150.0));

            assert!(coulomb_store_set_viewport(handle, 360.0, 320.0));
            assert!(coulomb_store_drag(handle, id, 160.0, 170.0));
            coulomb_forces(handle, forces.as_mut_ptr(), 1);
            assert_eq!((forces[0].x, forces[0].y), (160.0, 170.0));
            coulomb_store_free(handle);
        }
    }
}
