// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use crate::{
    display::{DisplayFacility, Key, DEFAULT_WINDOW},
    error::{Error, Result},
    foreign::{ForeignBuffer, ForeignHandle, HandleConvention},
    image::{frame_size, mirrored, ChannelOrder, ImageView, Mirror},
};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Viewer for a camera frame rendered by the simulator.
///
/// The view borrows the engine's pixel memory; it never copies, frees or
/// resizes it. A frame is assigned with [`CameraView::assign`] and put on
/// screen with [`CameraView::display`].
///
/// # Example
///
/// ```no_run
/// use simcam_view::{
///     camera::CameraView,
///     display::MinifbDisplay,
///     foreign::ForeignArray,
/// };
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let pixels = vec![0u8; 640 * 480 * 3];
/// let array = ForeignArray::from_slice(&pixels);
///
/// let mut view = CameraView::new();
/// // SAFETY: `array` and `pixels` outlive the view and are not written.
/// unsafe { view.assign(array.handle(), 640, 480) };
/// view.display(&mut MinifbDisplay::new())?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CameraView {
    buffer: Option<ForeignBuffer>,
    width: u32,
    height: u32,
    window: String,
    mirror: Mirror,
    order: ChannelOrder,
    convention: HandleConvention,
    timeout: Option<Duration>,
}

impl Default for CameraView {
    fn default() -> Self {
        Self {
            buffer: None,
            width: 0,
            height: 0,
            window: DEFAULT_WINDOW.to_string(),
            mirror: Mirror::Vertical,
            order: ChannelOrder::Bgr,
            convention: HandleConvention::ArrayObject,
            timeout: None,
        }
    }
}

impl CameraView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_window_name(mut self, name: impl Into<String>) -> Self {
        self.window = name.into();
        self
    }

    pub fn with_mirror(mut self, mirror: Mirror) -> Self {
        self.mirror = mirror;
        self
    }

    pub fn with_channel_order(mut self, order: ChannelOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_convention(mut self, convention: HandleConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Bound the key wait in [`CameraView::display`]. `None` blocks until a
    /// key is pressed.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Store a borrowed reference to the frame behind `handle`.
    ///
    /// Replaces any previous frame and its dimensions. A null handle, or a
    /// null sample pointer behind it, leaves the view unset. Zero
    /// dimensions are accepted here and reported by `display`.
    ///
    /// # Safety
    ///
    /// `handle` must resolve, under the configured [`HandleConvention`], to
    /// at least `width * height * 3` readable bytes. That memory must stay
    /// valid and unwritten until the next `assign` or until the view is
    /// dropped. None of this can be checked here; violating it is undefined
    /// behaviour.
    pub unsafe fn assign(&mut self, handle: ForeignHandle, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.buffer = match ForeignBuffer::resolve(handle, self.convention) {
            Ok(buffer) => Some(buffer),
            Err(e) => {
                warn!("handle {} not assigned: {}", handle, e);
                None
            }
        };
        debug!(
            "assigned {} {}x{} ready: {}",
            handle,
            width,
            height,
            self.buffer.is_some()
        );
    }

    /// Whether a frame has been assigned.
    pub fn is_ready(&self) -> bool {
        self.buffer.is_some()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn window_name(&self) -> &str {
        &self.window
    }

    /// Mirror the assigned frame and show it, then wait for a key.
    ///
    /// The foreign memory is only read: mirroring writes into a separate
    /// frame. Returns the key that ended the wait, or `None` if the window
    /// was closed or the timeout elapsed.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsetBuffer`] if nothing was assigned.
    /// - [`Error::EmptyImage`] if the assigned frame has a zero dimension.
    /// - [`Error::TooLarge`] if the frame size cannot be addressed.
    /// - [`Error::BufferTooSmall`] if the foreign object declares fewer
    ///   bytes than the frame needs.
    ///
    /// The facility is not called in any of these cases.
    #[instrument(skip_all, fields(window = %self.window))]
    pub fn display<D: DisplayFacility>(&self, mut facility: D) -> Result<Option<Key>> {
        let buffer = self.buffer.ok_or(Error::UnsetBuffer)?;
        if self.width == 0 || self.height == 0 {
            return Err(Error::EmptyImage {
                width: self.width,
                height: self.height,
            });
        }

        let required = frame_size(self.width, self.height)?;
        // SAFETY: the caller of `assign` guaranteed the memory stays live
        // and unwritten for as long as this frame is assigned.
        let borrowed = unsafe { buffer.borrow(required)? };
        let view = ImageView::new(borrowed.as_slice(), self.width, self.height, self.order)?;
        let frame = mirrored(&view, self.mirror);
        debug!("displaying {} mirror: {:?}", view, self.mirror);

        facility.named_window(&self.window)?;
        facility.show(&self.window, &frame.view())?;
        facility.wait_key(self.timeout)
    }
}
