// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Windowed presentation of image views.

use crate::{
    error::{Error, Result},
    image::ImageView,
};
use minifb::{KeyRepeat, Window, WindowOptions};
use std::{
    collections::HashMap,
    time::{Duration, Instant},
};
use tracing::{debug, instrument, trace};

pub use minifb::Key;

/// Window name used when none is configured.
pub const DEFAULT_WINDOW: &str = "Display Image";

const TARGET_FPS: usize = 60;

/// Collaborator that puts images on screen.
///
/// Views and mirroring are built by the caller; a facility only opens
/// windows, draws into them and waits for input.
pub trait DisplayFacility {
    /// Open the window called `name`, or reuse it if it is already open.
    fn named_window(&mut self, name: &str) -> Result<()>;

    /// Draw `image` into the window called `name`.
    fn show(&mut self, name: &str, image: &ImageView<'_>) -> Result<()>;

    /// Block until a key is pressed in any open window.
    ///
    /// Returns `None` if every window was closed, or if `timeout` elapsed
    /// first. A `timeout` of `None` waits indefinitely.
    fn wait_key(&mut self, timeout: Option<Duration>) -> Result<Option<Key>>;
}

impl<D: DisplayFacility + ?Sized> DisplayFacility for &mut D {
    fn named_window(&mut self, name: &str) -> Result<()> {
        (**self).named_window(name)
    }

    fn show(&mut self, name: &str, image: &ImageView<'_>) -> Result<()> {
        (**self).show(name, image)
    }

    fn wait_key(&mut self, timeout: Option<Duration>) -> Result<Option<Key>> {
        (**self).wait_key(timeout)
    }
}

struct NamedWindow {
    window: Option<Window>,
    pixels: Vec<u32>,
    size: (usize, usize),
}

/// [`DisplayFacility`] backed by native windows.
///
/// Windows size themselves to the last image shown and are recreated when
/// the image size changes.
#[derive(Default)]
pub struct MinifbDisplay {
    windows: HashMap<String, NamedWindow>,
}

impl MinifbDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    fn open(name: &str, width: usize, height: usize) -> Result<Window> {
        let mut window = Window::new(name, width.max(1), height.max(1), WindowOptions::default())?;
        window.set_target_fps(TARGET_FPS);
        debug!("opened window \"{}\" {}x{}", name, width, height);
        Ok(window)
    }
}

/// Pack 3-channel samples into the `0RGB` words a window draws.
pub fn pack_0rgb(image: &ImageView<'_>, out: &mut Vec<u32>) {
    let order = image.order();
    out.clear();
    out.extend(
        image
            .as_slice()
            .chunks_exact(image.channels())
            .map(|px| {
                let (r, g, b) = order.rgb(px);
                (r as u32) << 16 | (g as u32) << 8 | b as u32
            }),
    );
}

impl DisplayFacility for MinifbDisplay {
    fn named_window(&mut self, name: &str) -> Result<()> {
        self.windows
            .entry(name.to_string())
            .or_insert_with(|| NamedWindow {
                window: None,
                pixels: Vec::new(),
                size: (0, 0),
            });
        Ok(())
    }

    #[instrument(skip_all, fields(window = name, image = %image))]
    fn show(&mut self, name: &str, image: &ImageView<'_>) -> Result<()> {
        self.named_window(name)?;
        let entry = self
            .windows
            .get_mut(name)
            .ok_or_else(|| Error::Window(format!("no window named \"{}\"", name)))?;

        let size = (image.width() as usize, image.height() as usize);
        let reopen = match entry.window {
            Some(ref w) => entry.size != size || !w.is_open(),
            None => true,
        };
        if reopen {
            entry.window = None;
            entry.window = Some(Self::open(name, size.0, size.1)?);
            entry.size = size;
        }

        pack_0rgb(image, &mut entry.pixels);
        if let Some(window) = entry.window.as_mut() {
            window.update_with_buffer(&entry.pixels, size.0, size.1)?;
        }
        trace!("frame presented");
        Ok(())
    }

    #[instrument(skip(self))]
    fn wait_key(&mut self, timeout: Option<Duration>) -> Result<Option<Key>> {
        let start = Instant::now();
        loop {
            let mut any_open = false;
            for (name, entry) in self.windows.iter_mut() {
                let Some(window) = entry.window.as_mut() else {
                    continue;
                };
                if !window.is_open() {
                    continue;
                }
                any_open = true;

                // redraw keeps the window responsive while we wait
                window.update();
                if let Some(key) = window.get_keys_pressed(KeyRepeat::No).into_iter().next() {
                    debug!("key {:?} pressed in \"{}\"", key, name);
                    return Ok(Some(key));
                }
            }

            if !any_open {
                debug!("all windows closed");
                return Ok(None);
            }

            if let Some(timeout) = timeout {
                if start.elapsed() >= timeout {
                    debug!("key wait timed out after {:?}", timeout);
                    return Ok(None);
                }
            }
        }
    }
}
