// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

#![allow(dead_code)]

use simcam_view::{
    display::{DisplayFacility, Key},
    image::ImageView,
    Result,
};
use std::time::Duration;

/// One interaction with the display facility.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    NamedWindow(String),
    Show {
        window: String,
        width: u32,
        height: u32,
        stride: usize,
        data: Vec<u8>,
    },
    WaitKey(Option<Duration>),
}

/// Display double that records every call and answers key waits with a
/// fixed key.
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pub calls: Vec<Call>,
    pub key: Option<Key>,
}

impl RecordingDisplay {
    pub fn with_key(key: Key) -> Self {
        Self {
            calls: Vec::new(),
            key: Some(key),
        }
    }

    pub fn shows(&self) -> Vec<&Call> {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Show { .. }))
            .collect()
    }
}

impl DisplayFacility for RecordingDisplay {
    fn named_window(&mut self, name: &str) -> Result<()> {
        self.calls.push(Call::NamedWindow(name.to_string()));
        Ok(())
    }

    fn show(&mut self, name: &str, image: &ImageView<'_>) -> Result<()> {
        self.calls.push(Call::Show {
            window: name.to_string(),
            width: image.width(),
            height: image.height(),
            stride: image.stride(),
            data: image.as_slice().to_vec(),
        });
        Ok(())
    }

    fn wait_key(&mut self, timeout: Option<Duration>) -> Result<Option<Key>> {
        self.calls.push(Call::WaitKey(timeout));
        Ok(self.key)
    }
}

/// The 2x2 pattern: row 0 red, green; row 1 blue, yellow.
pub const PATTERN_2X2: [u8; 12] = [255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 0];

/// Frame whose every byte encodes its own row, so mirrored rows are easy to
/// spot.
pub fn row_tagged(width: u32, height: u32) -> Vec<u8> {
    let stride = width as usize * 3;
    (0..height as usize * stride)
        .map(|i| ((i / stride) * 7 + i % stride) as u8)
        .collect()
}
