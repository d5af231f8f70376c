// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

mod common;

use common::{row_tagged, PATTERN_2X2};
use simcam_view::{
    image::{self, image_size, load_image, mirrored, row_stride, ChannelOrder, ImageView, Mirror, OwnedImage},
    Error,
};
use std::error::Error as StdError;

const MIRRORS: [Mirror; 4] = [Mirror::None, Mirror::Horizontal, Mirror::Vertical, Mirror::Both];

#[test]
fn test_sizes() {
    assert_eq!(row_stride(2), 6);
    assert_eq!(image_size(1920, 1080), Some(6220800));
    assert_eq!(image_size(3840, 2160), Some(24883200));
    assert_eq!(image_size(0, 1080), Some(0));
    assert_eq!(image_size(u32::MAX, u32::MAX), None);
}

#[test]
fn test_oversized_dimensions_rejected() {
    let data = [0u8; 12];
    let res = ImageView::new(&data, u32::MAX, u32::MAX, ChannelOrder::Bgr);
    assert!(matches!(
        res,
        Err(Error::TooLarge {
            width: u32::MAX,
            height: u32::MAX
        })
    ));
    assert!(matches!(
        OwnedImage::new(u32::MAX, u32::MAX, ChannelOrder::Rgb),
        Err(Error::TooLarge { .. })
    ));
    assert!(matches!(
        OwnedImage::from_raw(data.to_vec(), u32::MAX, u32::MAX, ChannelOrder::Rgb),
        Err(Error::TooLarge { .. })
    ));
}

#[test]
fn test_stride_has_no_padding() -> Result<(), Box<dyn StdError>> {
    for (width, height) in [(1, 1), (2, 2), (3, 5), (17, 4), (640, 480)] {
        let data = vec![0u8; image::frame_size(width, height)?];
        let view = ImageView::new(&data, width, height, ChannelOrder::Bgr)?;
        assert_eq!(view.stride(), width as usize * 3);
        assert_eq!(view.channels(), 3);
        assert_eq!(view.size(), view.stride() * height as usize);
        assert_eq!(view.rows().count(), height as usize);
    }
    Ok(())
}

#[test]
fn test_vertical_flip_2x2() -> Result<(), Box<dyn StdError>> {
    let view = ImageView::new(&PATTERN_2X2, 2, 2, ChannelOrder::Rgb)?;
    let flipped = mirrored(&view, Mirror::Vertical);
    let flipped = flipped.view();

    assert_eq!(flipped.row(0), &[0, 0, 255, 255, 255, 0]);
    assert_eq!(flipped.row(1), &[255, 0, 0, 0, 255, 0]);
    Ok(())
}

#[test]
fn test_vertical_flip_row_mapping() -> Result<(), Box<dyn StdError>> {
    let (width, height) = (5, 7);
    let data = row_tagged(width, height);
    let view = ImageView::new(&data, width, height, ChannelOrder::Bgr)?;
    let flipped = mirrored(&view, Mirror::Vertical);

    for r in 0..height {
        assert_eq!(flipped.view().row(r), view.row(height - 1 - r));
    }
    Ok(())
}

#[test]
fn test_horizontal_flip_keeps_pixels_intact() -> Result<(), Box<dyn StdError>> {
    let view = ImageView::new(&PATTERN_2X2, 2, 2, ChannelOrder::Rgb)?;
    let flipped = mirrored(&view, Mirror::Horizontal);

    assert_eq!(flipped.view().row(0), &[0, 255, 0, 255, 0, 0]);
    assert_eq!(flipped.view().row(1), &[255, 255, 0, 0, 0, 255]);
    Ok(())
}

#[test]
fn test_flip_is_involution() -> Result<(), Box<dyn StdError>> {
    for (width, height) in [(1, 1), (1, 4), (4, 1), (2, 2), (3, 3), (8, 5)] {
        let data = row_tagged(width, height);
        let view = ImageView::new(&data, width, height, ChannelOrder::Bgr)?;
        for mirror in MIRRORS {
            let once = mirrored(&view, mirror);
            let twice = mirrored(&once.view(), mirror);
            assert_eq!(twice.as_slice(), data.as_slice(), "{}x{} {:?}", width, height, mirror);

            let mut in_place = once.clone();
            in_place.mirror(mirror);
            assert_eq!(in_place.as_slice(), data.as_slice());
        }
    }
    Ok(())
}

#[test]
fn test_mirror_does_not_touch_source() -> Result<(), Box<dyn StdError>> {
    let data = row_tagged(4, 3);
    let before = data.clone();
    let view = ImageView::new(&data, 4, 3, ChannelOrder::Bgr)?;
    let _ = mirrored(&view, Mirror::Both);
    assert_eq!(data, before);
    Ok(())
}

#[test]
fn test_view_too_small() {
    let data = [0u8; 11];
    let res = ImageView::new(&data, 2, 2, ChannelOrder::Bgr);
    assert!(matches!(
        res,
        Err(Error::BufferTooSmall {
            required: 12,
            available: 11
        })
    ));
}

#[test]
fn test_view_ignores_trailing_bytes() -> Result<(), Box<dyn StdError>> {
    let data = [1u8; 20];
    let view = ImageView::new(&data, 2, 2, ChannelOrder::Bgr)?;
    assert_eq!(view.size(), 12);

    let owned = OwnedImage::from_raw(data.to_vec(), 2, 2, ChannelOrder::Bgr)?;
    assert_eq!(owned.as_slice().len(), 12);
    Ok(())
}

#[test]
fn test_channel_order() {
    let px = [10, 20, 30];
    assert_eq!(ChannelOrder::Bgr.rgb(&px), (30, 20, 10));
    assert_eq!(ChannelOrder::Rgb.rgb(&px), (10, 20, 30));
    assert_eq!(ChannelOrder::Bgr.to_string(), "BGR3");
}

#[test]
fn test_load_missing_file() {
    let res = load_image("/nonexistent/simcam-view/Lenna.png");
    assert!(matches!(res, Err(Error::LoadFailure { .. })));
}

#[test]
fn test_load_png() -> Result<(), Box<dyn StdError>> {
    let path = std::env::temp_dir().join(format!("simcam-view-load-{}.png", std::process::id()));
    let png = ::image::RgbImage::from_raw(2, 2, PATTERN_2X2.to_vec()).ok_or("bad pattern")?;
    png.save(&path)?;

    let loaded = image::load_image(&path);
    std::fs::remove_file(&path)?;
    let loaded = loaded?;

    assert_eq!(loaded.width(), 2);
    assert_eq!(loaded.height(), 2);
    assert_eq!(loaded.order(), ChannelOrder::Rgb);
    assert_eq!(loaded.as_slice(), &PATTERN_2X2);
    Ok(())
}
