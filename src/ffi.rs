// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! C ABI used by the simulator runtime.
//!
//! The engine owns the frame and passes its address as a signed integer
//! together with the frame size. A [`SimcamView`] created here must be
//! released with [`simcam_view_free`].

use crate::{
    camera::CameraView,
    display::{DisplayFacility, MinifbDisplay},
    error::Error,
    foreign::ForeignHandle,
};
use std::{
    os::raw::c_int,
    panic::{catch_unwind, AssertUnwindSafe},
};
use tracing::error;

pub const SIMCAM_OK: c_int = 0;
pub const SIMCAM_ERR_NULL_VIEW: c_int = -1;
pub const SIMCAM_ERR_UNSET: c_int = -2;
pub const SIMCAM_ERR_EMPTY: c_int = -3;
pub const SIMCAM_ERR_TOO_SMALL: c_int = -4;
pub const SIMCAM_ERR_NULL_HANDLE: c_int = -5;
pub const SIMCAM_ERR_LOAD: c_int = -6;
pub const SIMCAM_ERR_WINDOW: c_int = -7;
pub const SIMCAM_ERR_PANIC: c_int = -8;
pub const SIMCAM_ERR_TOO_LARGE: c_int = -9;

/// Opaque viewer handed to the engine.
pub struct SimcamView {
    view: CameraView,
    display: Option<MinifbDisplay>,
}

pub fn error_code(err: &Error) -> c_int {
    match err {
        Error::UnsetBuffer => SIMCAM_ERR_UNSET,
        Error::EmptyImage { .. } => SIMCAM_ERR_EMPTY,
        Error::BufferTooSmall { .. } => SIMCAM_ERR_TOO_SMALL,
        Error::TooLarge { .. } => SIMCAM_ERR_TOO_LARGE,
        Error::NullHandle => SIMCAM_ERR_NULL_HANDLE,
        Error::LoadFailure { .. } => SIMCAM_ERR_LOAD,
        Error::Window(_) => SIMCAM_ERR_WINDOW,
    }
}

#[no_mangle]
pub extern "C" fn simcam_view_new() -> *mut SimcamView {
    Box::into_raw(Box::new(SimcamView {
        view: CameraView::new(),
        display: None,
    }))
}

/// # Safety
///
/// `view` must be null or a pointer returned by [`simcam_view_new`] that
/// has not been freed yet.
#[no_mangle]
pub unsafe extern "C" fn simcam_view_free(view: *mut SimcamView) {
    if !view.is_null() {
        drop(Box::from_raw(view));
    }
}

/// Assign the engine frame at `pointer`.
///
/// # Safety
///
/// `view` must be null or a live pointer from [`simcam_view_new`].
/// `pointer` must satisfy the contract of
/// [`CameraView::assign`](crate::camera::CameraView::assign).
#[no_mangle]
pub unsafe extern "C" fn simcam_view_set_image(
    view: *mut SimcamView,
    pointer: isize,
    x_size: u32,
    y_size: u32,
) {
    if let Some(view) = view.as_mut() {
        view.view.assign(ForeignHandle::from(pointer), x_size, y_size);
    }
}

/// # Safety
///
/// `view` must be null or a live pointer from [`simcam_view_new`].
#[no_mangle]
pub unsafe extern "C" fn simcam_view_is_set(view: *const SimcamView) -> bool {
    view.as_ref().is_some_and(|view| view.view.is_ready())
}

/// Show the assigned frame and block until a key is pressed.
///
/// Returns [`SIMCAM_OK`] or one of the negative `SIMCAM_ERR_*` codes.
///
/// # Safety
///
/// `view` must be null or a live pointer from [`simcam_view_new`].
#[no_mangle]
pub unsafe extern "C" fn simcam_view_show(view: *mut SimcamView) -> c_int {
    let Some(view) = view.as_mut() else {
        return SIMCAM_ERR_NULL_VIEW;
    };
    if !view.view.is_ready() {
        return SIMCAM_ERR_UNSET;
    }

    let display = view.display.get_or_insert_with(MinifbDisplay::new);
    show_with(&view.view, display)
}

/// Display `view` through `facility`, mapping the outcome to a status code.
/// Panics are caught so they never unwind into the engine.
fn show_with<D: DisplayFacility>(view: &CameraView, facility: D) -> c_int {
    let res = catch_unwind(AssertUnwindSafe(|| view.display(facility)));

    match res {
        Ok(Ok(_)) => SIMCAM_OK,
        Ok(Err(e)) => {
            error!("show failed: {}", e);
            error_code(&e)
        }
        Err(_) => {
            error!("show panicked");
            SIMCAM_ERR_PANIC
        }
    }
}
