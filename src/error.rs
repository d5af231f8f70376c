// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while bridging, transforming or displaying a frame.
#[derive(Error, Debug)]
pub enum Error {
    /// Display was requested before any buffer was assigned.
    #[error("no image buffer has been assigned")]
    UnsetBuffer,

    /// The assigned frame has a zero dimension.
    #[error("no image data ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    /// The buffer is shorter than `width * height * 3`.
    #[error("buffer too small: {required} bytes required, {available} available")]
    BufferTooSmall { required: usize, available: usize },

    /// `width * height * 3` is larger than any slice can be.
    #[error("image too large: {width}x{height}")]
    TooLarge { width: u32, height: u32 },

    /// A null address was handed to the foreign boundary.
    #[error("foreign handle is null")]
    NullHandle,

    /// An image file could not be read or decoded.
    #[error("failed to load {path}: {source}")]
    LoadFailure {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The windowing library reported a failure.
    #[error("window operation failed: {0}")]
    Window(String),
}

impl From<minifb::Error> for Error {
    fn from(err: minifb::Error) -> Self {
        Error::Window(err.to_string())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
