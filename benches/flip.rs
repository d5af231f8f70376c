// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use criterion::{criterion_group, criterion_main, Criterion};
use simcam_view::image::{image_size, mirrored, ChannelOrder, ImageView, Mirror, OwnedImage};

const DIMS: [(u32, u32); 5] = [
    (320, 240),
    (640, 480),
    (960, 540),
    (1920, 1080),
    (3840, 2160),
];

pub fn benchmark_mirror(c: &mut Criterion) {
    for mirror in [Mirror::Vertical, Mirror::Both] {
        let mut group = c.benchmark_group(format!("mirror/{:?}", mirror));
        for dim in DIMS.iter() {
            let data = vec![0x5a; image_size(dim.0, dim.1).unwrap()];
            group.bench_with_input(format!("{}x{}", dim.0, dim.1), &data, |b, data| {
                let view = ImageView::new(data, dim.0, dim.1, ChannelOrder::Bgr).unwrap();
                b.iter(|| mirrored(&view, mirror))
            });
        }
    }
}

pub fn benchmark_mirror_in_place(c: &mut Criterion) {
    let mut group = c.benchmark_group("mirror_in_place");
    for dim in DIMS.iter() {
        let mut img = OwnedImage::new(dim.0, dim.1, ChannelOrder::Rgb).unwrap();
        group.bench_function(format!("{}x{}", dim.0, dim.1), |b| {
            b.iter(|| img.mirror(Mirror::Vertical))
        });
    }
}

criterion_group!(benches, benchmark_mirror, benchmark_mirror_in_place);
criterion_main!(benches);
