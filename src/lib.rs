// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! # Simulator Camera Viewer Library
//!
//! Displays camera frames rendered by a separate 3D-engine runtime without
//! copying them out of the engine first. The engine passes the address of
//! its pixel array; this crate borrows the samples behind it, mirrors the
//! frame from the engine's bottom-up row order into top-down display order
//! and shows it in a named window until a key is pressed.
//!
//! ## Features
//!
//! - **Zero-copy borrow**: foreign frames are read in place and never freed
//!   or resized.
//! - **Mirroring**: vertical (default), horizontal or both.
//! - **C ABI**: the [`ffi`] module exposes the viewer to the engine runtime.
//! - **File viewer**: [`file::show_image_file`] shows a decoded image file
//!   through the same path, for checking a display setup.
//!
//! ## Example
//!
//! ```no_run
//! use simcam_view::{
//!     camera::CameraView,
//!     display::MinifbDisplay,
//!     foreign::ForeignArray,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let frame = vec![0u8; 800 * 600 * 3];
//! let array = ForeignArray::from_slice(&frame);
//!
//! let mut view = CameraView::new();
//! unsafe { view.assign(array.handle(), 800, 600) };
//! assert!(view.is_ready());
//! view.display(&mut MinifbDisplay::new())?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Safety
//!
//! Engine handles are untyped integers. All dereferences of them are
//! isolated in [`foreign`]; [`camera::CameraView::assign`] is `unsafe` and
//! documents the contract the engine must uphold.

pub mod camera;
pub mod display;
pub mod error;
pub mod ffi;
pub mod file;
pub mod foreign;
pub mod image;

pub use error::{Error, Result};
