// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use clap::Parser;
use simcam_view::{display::DEFAULT_WINDOW, foreign::HandleConvention, image};
use std::{path::PathBuf, time::Duration};

/// Image mirroring options.
///
/// Determines how the image should be flipped before display. Engine frames
/// are stored bottom-up and need a vertical flip.
#[derive(clap::ValueEnum, Clone, Debug, PartialEq, Copy)]
pub enum MirrorSetting {
    /// No mirroring
    None,
    /// Flip horizontally (left-right)
    Horizontal,
    /// Flip vertically (top-bottom)
    Vertical,
    /// Flip both horizontally and vertically (180-degree rotation)
    Both,
}

impl From<MirrorSetting> for image::Mirror {
    fn from(value: MirrorSetting) -> Self {
        match value {
            MirrorSetting::None => image::Mirror::None,
            MirrorSetting::Horizontal => image::Mirror::Horizontal,
            MirrorSetting::Vertical => image::Mirror::Vertical,
            MirrorSetting::Both => image::Mirror::Both,
        }
    }
}

/// Sample order of synthesized frames.
#[derive(clap::ValueEnum, Clone, Debug, PartialEq, Copy)]
pub enum OrderSetting {
    /// Blue, green, red (engine RAM images)
    Bgr,
    /// Red, green, blue
    Rgb,
}

impl From<OrderSetting> for image::ChannelOrder {
    fn from(value: OrderSetting) -> Self {
        match value {
            OrderSetting::Bgr => image::ChannelOrder::Bgr,
            OrderSetting::Rgb => image::ChannelOrder::Rgb,
        }
    }
}

/// How a synthesized frame's handle is resolved.
#[derive(clap::ValueEnum, Clone, Debug, PartialEq, Copy)]
pub enum ConventionSetting {
    /// Handle points to an array-ownership object
    ArrayObject,
    /// Handle is the address of the first sample
    RawSamples,
}

impl From<ConventionSetting> for HandleConvention {
    fn from(value: ConventionSetting) -> Self {
        match value {
            ConventionSetting::ArrayObject => HandleConvention::ArrayObject,
            ConventionSetting::RawSamples => HandleConvention::RawSamples,
        }
    }
}

/// Where the displayed frame comes from.
#[derive(clap::ValueEnum, Clone, Debug, PartialEq, Copy)]
pub enum Source {
    /// Decode the file given by --image
    File,
    /// Render a bottom-up test frame in-process and show it through the
    /// engine handle path
    Synthetic,
}

/// Command-line arguments for the simulator camera viewer.
///
/// Arguments can be specified via command line or environment variables.
///
/// # Example
///
/// ```bash
/// # Show a test image
/// simcam-view --source file --image resources/Lenna.png --mirror none
///
/// # Show a synthesized engine frame
/// export SOURCE=synthetic
/// simcam-view --size 320 240
/// ```
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Frame source
    #[arg(long, env = "SOURCE", default_value = "file", value_enum)]
    pub source: Source,

    /// Image file shown by the file source
    #[arg(long, env = "IMAGE", default_value = "resources/Lenna.png")]
    pub image: PathBuf,

    /// Synthesized frame resolution in pixels (width height)
    #[arg(
        long,
        env = "SYNTH_SIZE",
        default_value = "640 480",
        value_delimiter = ' ',
        num_args = 2
    )]
    pub size: Vec<u32>,

    /// Image mirroring setting
    #[arg(long, env = "MIRROR", default_value = "vertical", value_enum)]
    pub mirror: MirrorSetting,

    /// Sample order of synthesized frames
    #[arg(long, env = "CHANNEL_ORDER", default_value = "bgr", value_enum)]
    pub channel_order: OrderSetting,

    /// How the synthesized frame's handle is resolved
    #[arg(long, env = "HANDLE_CONVENTION", default_value = "array-object", value_enum)]
    pub handle_convention: ConventionSetting,

    /// Window title
    #[arg(long, default_value = DEFAULT_WINDOW)]
    pub window_name: String,

    /// Give up waiting for a key after this many milliseconds (waits forever
    /// when omitted)
    #[arg(long, env = "WAIT_TIMEOUT_MS")]
    pub timeout_ms: Option<u64>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Also log to the systemd journal
    #[arg(long, env = "JOURNALD")]
    pub journald: bool,

    /// Enable Tracy profiler for performance analysis
    #[arg(long, env = "TRACY")]
    pub tracy: bool,
}

impl Args {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    pub fn synth_size(&self) -> (u32, u32) {
        (self.size[0], self.size[1])
    }
}
