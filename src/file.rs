// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use crate::{
    display::{DisplayFacility, Key},
    error::{Error, Result},
    image::{load_image, Mirror},
};
use std::{path::Path, time::Duration};
use tracing::{error, instrument};

/// Show an image file with the same mirror/show/wait sequence used for
/// engine frames.
///
/// A file that cannot be loaded is reported and skipped: the function
/// returns `Ok(None)` without touching the display.
///
/// # Errors
///
/// Only display failures are returned.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn show_image_file<D: DisplayFacility>(
    path: impl AsRef<Path>,
    window: &str,
    mirror: Mirror,
    timeout: Option<Duration>,
    mut facility: D,
) -> Result<Option<Key>> {
    let mut image = match load_image(path.as_ref()) {
        Ok(image) => image,
        Err(e @ Error::LoadFailure { .. }) => {
            error!("No image data: {}", e);
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    image.mirror(mirror);
    facility.named_window(window)?;
    facility.show(window, &image.view())?;
    facility.wait_key(timeout)
}
