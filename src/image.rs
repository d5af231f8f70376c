// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use crate::error::{Error, Result};
use core::fmt;
use std::path::Path;
use tracing::debug;

/// Samples per pixel for every image handled by this crate.
pub const CHANNELS: usize = 3;

/// Order of the three 8-bit samples within a pixel.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ChannelOrder {
    /// Blue, green, red. Engine RAM images use this order.
    #[default]
    Bgr,
    /// Red, green, blue. Decoded image files use this order.
    Rgb,
}

impl ChannelOrder {
    /// Return the (red, green, blue) samples of one pixel.
    #[inline]
    pub fn rgb(self, px: &[u8]) -> (u8, u8, u8) {
        match self {
            ChannelOrder::Bgr => (px[2], px[1], px[0]),
            ChannelOrder::Rgb => (px[0], px[1], px[2]),
        }
    }
}

impl fmt::Display for ChannelOrder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ChannelOrder::Bgr => f.write_str("BGR3"),
            ChannelOrder::Rgb => f.write_str("RGB3"),
        }
    }
}

/// Image mirroring applied before display.
///
/// The engine renders bottom-up while windows draw top-down, so frames coming
/// from the engine are shown with [`Mirror::Vertical`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Mirror {
    /// No mirroring
    None,
    /// Flip horizontally (left-right)
    Horizontal,
    /// Flip vertically (top-bottom)
    #[default]
    Vertical,
    /// Flip both horizontally and vertically (180-degree rotation)
    Both,
}

impl Mirror {
    pub fn vertical(self) -> bool {
        matches!(self, Mirror::Vertical | Mirror::Both)
    }

    pub fn horizontal(self) -> bool {
        matches!(self, Mirror::Horizontal | Mirror::Both)
    }
}

/// Bytes per row. Rows are tightly packed, there is never any padding.
pub const fn row_stride(width: u32) -> usize {
    width as usize * CHANNELS
}

/// Bytes in a `width` x `height` image, or `None` if that is larger than any
/// slice can be (`isize::MAX` bytes).
pub const fn image_size(width: u32, height: u32) -> Option<usize> {
    let size = match (width as usize).checked_mul(CHANNELS) {
        Some(stride) => stride.checked_mul(height as usize),
        None => None,
    };
    match size {
        Some(size) if size <= isize::MAX as usize => Some(size),
        _ => None,
    }
}

/// [`image_size`] as a `Result`.
///
/// # Errors
///
/// Returns [`Error::TooLarge`] if the size exceeds `isize::MAX`.
pub fn frame_size(width: u32, height: u32) -> Result<usize> {
    image_size(width, height).ok_or(Error::TooLarge { width, height })
}

/// Row-major, 3-channel view over existing memory. Never copies.
#[derive(Copy, Clone, Debug)]
pub struct ImageView<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
    order: ChannelOrder,
}

impl<'a> ImageView<'a> {
    /// Create a view of `width` x `height` pixels over `data`.
    ///
    /// Only the first `image_size(width, height)` bytes are viewed; any
    /// trailing bytes are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TooLarge`] if the image size overflows `usize`, or
    /// [`Error::BufferTooSmall`] if `data` is shorter than the image.
    pub fn new(data: &'a [u8], width: u32, height: u32, order: ChannelOrder) -> Result<Self> {
        let required = frame_size(width, height)?;
        if data.len() < required {
            return Err(Error::BufferTooSmall {
                required,
                available: data.len(),
            });
        }

        Ok(Self {
            data: &data[..required],
            width,
            height,
            order,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self) -> usize {
        row_stride(self.width)
    }

    pub fn channels(&self) -> usize {
        CHANNELS
    }

    pub fn order(&self) -> ChannelOrder {
        self.order
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn as_slice(&self) -> &'a [u8] {
        self.data
    }

    /// Bytes of row `r`, top row first.
    pub fn row(&self, r: u32) -> &'a [u8] {
        let stride = self.stride();
        let start = r as usize * stride;
        &self.data[start..start + stride]
    }

    pub fn rows(&self) -> impl Iterator<Item = &'a [u8]> + 'a {
        let stride = self.stride().max(1);
        self.data.chunks_exact(stride)
    }
}

impl fmt::Display for ImageView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}x{} {} stride:{}",
            self.width,
            self.height,
            self.order,
            self.stride()
        )
    }
}

/// Image that owns its samples, e.g. a decoded file or a mirrored copy of a
/// foreign frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnedImage {
    data: Vec<u8>,
    width: u32,
    height: u32,
    order: ChannelOrder,
}

impl OwnedImage {
    /// Allocate a zeroed image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TooLarge`] if the image size overflows `usize`.
    pub fn new(width: u32, height: u32, order: ChannelOrder) -> Result<Self> {
        Ok(Self {
            data: vec![0; frame_size(width, height)?],
            width,
            height,
            order,
        })
    }

    /// Take ownership of `data` as a `width` x `height` image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TooLarge`] if the image size overflows `usize`, or
    /// [`Error::BufferTooSmall`] if `data` is shorter than the image. Longer
    /// buffers are truncated.
    pub fn from_raw(mut data: Vec<u8>, width: u32, height: u32, order: ChannelOrder) -> Result<Self> {
        let required = frame_size(width, height)?;
        if data.len() < required {
            return Err(Error::BufferTooSmall {
                required,
                available: data.len(),
            });
        }
        data.truncate(required);

        Ok(Self {
            data,
            width,
            height,
            order,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn order(&self) -> ChannelOrder {
        self.order
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn as_slice_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    pub fn view(&self) -> ImageView<'_> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            order: self.order,
        }
    }

    /// Mirror the image in place.
    pub fn mirror(&mut self, mirror: Mirror) {
        let stride = row_stride(self.width);
        let height = self.height as usize;
        if stride == 0 || height == 0 {
            return;
        }

        if mirror.vertical() {
            let (mut top, mut bottom) = (0, height - 1);
            while top < bottom {
                let (head, tail) = self.data.split_at_mut(bottom * stride);
                head[top * stride..(top + 1) * stride].swap_with_slice(&mut tail[..stride]);
                top += 1;
                bottom -= 1;
            }
        }

        if mirror.horizontal() {
            let width = self.width as usize;
            for row in self.data.chunks_exact_mut(stride) {
                for c in 0..width / 2 {
                    let (left, right) = (c * CHANNELS, (width - 1 - c) * CHANNELS);
                    for k in 0..CHANNELS {
                        row.swap(left + k, right + k);
                    }
                }
            }
        }
    }
}

impl fmt::Display for OwnedImage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}x{} {} owned", self.width, self.height, self.order)
    }
}

/// Copy `src` into a new image with `mirror` applied.
///
/// Row `r` of a vertically mirrored result is row `height - 1 - r` of the
/// source. The source memory is only read.
pub fn mirrored(src: &ImageView<'_>, mirror: Mirror) -> OwnedImage {
    // a valid view already holds exactly `size()` bytes
    let mut dst = OwnedImage {
        data: vec![0; src.size()],
        width: src.width(),
        height: src.height(),
        order: src.order(),
    };
    let width = src.width() as usize;
    let height = src.height();

    for (r, dst_row) in dst.data.chunks_exact_mut(src.stride().max(1)).enumerate() {
        let r = r as u32;
        let src_row = if mirror.vertical() {
            src.row(height - 1 - r)
        } else {
            src.row(r)
        };

        if mirror.horizontal() {
            for (c, px) in dst_row.chunks_exact_mut(CHANNELS).enumerate() {
                let s = (width - 1 - c) * CHANNELS;
                px.copy_from_slice(&src_row[s..s + CHANNELS]);
            }
        } else {
            dst_row.copy_from_slice(src_row);
        }
    }

    dst
}

/// Decode an image file into an owned RGB buffer.
///
/// # Errors
///
/// Returns [`Error::LoadFailure`] if the file is missing or cannot be
/// decoded.
pub fn load_image(path: impl AsRef<Path>) -> Result<OwnedImage> {
    let path = path.as_ref();
    let decoded = image::open(path).map_err(|source| Error::LoadFailure {
        path: path.to_path_buf(),
        source,
    })?;
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();
    debug!("loaded {} as {}x{}", path.display(), width, height);
    OwnedImage::from_raw(rgb.into_raw(), width, height, ChannelOrder::Rgb)
}
