// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

mod args;

use args::{Args, Source};
use clap::Parser;
use simcam_view::{
    camera::CameraView,
    display::MinifbDisplay,
    file::show_image_file,
    foreign::{ForeignArray, ForeignHandle, HandleConvention},
    image::{frame_size, row_stride, ChannelOrder},
};
use std::error::Error;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Layer, Registry};

fn init_tracing(args: &Args) -> Result<(), Box<dyn Error>> {
    let default = if args.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default.into())
        .from_env_lossy();

    let stdout_log = tracing_subscriber::fmt::layer().with_filter(filter);

    let journald = if args.journald {
        match tracing_journald::layer() {
            Ok(layer) => Some(layer.with_filter(default)),
            Err(e) => {
                eprintln!("journald unavailable: {e}");
                None
            }
        }
    } else {
        None
    };

    let tracy = if args.tracy {
        let _ = tracy_client::Client::start();
        Some(tracing_tracy::TracyLayer::default())
    } else {
        None
    };

    let subscriber = Registry::default()
        .with(stdout_log)
        .with(journald)
        .with(tracy);
    tracing::subscriber::set_global_default(subscriber)?;
    tracing_log::LogTracer::init()?;
    Ok(())
}

/// Gradient level of `scene_row` in a scene `height` rows tall.
fn shade(scene_row: u32, height: u32) -> u8 {
    (u64::from(scene_row) * 255 / u64::from(height.max(1))) as u8
}

/// Render a test scene the way the engine stores it: bottom row first.
///
/// The scene is sky over ground with a red marker in its top-left corner, so
/// a correctly mirrored frame shows the marker top-left and the sky on top.
fn synthesize_frame(width: u32, height: u32, order: ChannelOrder) -> simcam_view::Result<Vec<u8>> {
    let mut frame = vec![0u8; frame_size(width, height)?];
    let stride = row_stride(width).max(1);
    let marker = (width / 8).max(1);

    for (stored_row, row) in frame.chunks_exact_mut(stride).enumerate() {
        // stored row 0 is the bottom of the scene
        let scene_row = height - 1 - stored_row as u32;
        let shade = shade(scene_row, height);
        for (x, px) in row.chunks_exact_mut(3).enumerate() {
            let (r, g, b) = if scene_row < marker && (x as u32) < marker {
                (255, 0, 0)
            } else if scene_row < height / 2 {
                (60, 120, 255 - shade / 2)
            } else {
                (30, 90 + shade / 2, 30)
            };
            let bytes = match order {
                ChannelOrder::Bgr => [b, g, r],
                ChannelOrder::Rgb => [r, g, b],
            };
            px.copy_from_slice(&bytes);
        }
    }

    Ok(frame)
}


fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_tracing(&args)?;

    let mut display = MinifbDisplay::new();

    match args.source {
        Source::File => {
            info!("showing {}", args.image.display());
            let key = show_image_file(
                &args.image,
                &args.window_name,
                args.mirror.into(),
                args.timeout(),
                &mut display,
            )?;
            info!("closed with {:?}", key);
        }
        Source::Synthetic => {
            let (width, height) = args.synth_size();
            let order: ChannelOrder = args.channel_order.into();
            let convention: HandleConvention = args.handle_convention.into();
            let frame = synthesize_frame(width, height, order)?;
            let array = ForeignArray::from_slice(&frame);
            let handle = match convention {
                HandleConvention::ArrayObject => array.handle(),
                HandleConvention::RawSamples => ForeignHandle::from_ptr(frame.as_ptr()),
            };

            let mut view = CameraView::new()
                .with_window_name(args.window_name.clone())
                .with_mirror(args.mirror.into())
                .with_channel_order(order)
                .with_convention(convention)
                .with_timeout(args.timeout());

            // SAFETY: `frame` and `array` live until the end of this block and
            // are not written while the view holds them.
            unsafe { view.assign(handle, width, height) };
            info!("showing synthesized {}x{} frame at {}", width, height, handle);
            let key = view.display(&mut display)?;
            info!("closed with {:?}", key);
        }
    }

    Ok(())
}
