// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

#[macro_use]
extern crate criterion;
extern crate mandelfarm;
extern crate num;

use criterion::Criterion;
use mandelfarm::planes::PlaneMapper;
use mandelfarm::render::RowBlockRenderer;
use mandelfarm::{Config, PixelBuffer};
use num::Complex;

fn render_block(c: &mut Criterion) {
    let plane = PlaneMapper::new(256, 256, Complex::new(-0.5, 0.0), 1.0).unwrap();
    let renderer = RowBlockRenderer::new(plane, 2.0, 350, 1, 2);
    c.bench_function("render 16 rows of 256", move |b| {
        let mut buffer = PixelBuffer::new(256, 256);
        b.iter(|| renderer.render_block(&mut buffer, 16, 120))
    });
}

fn render_group(c: &mut Criterion) {
    c.bench_function("render 128x128 with 4 processes", |b| {
        let config = Config {
            width: 128,
            height: 128,
            processes: 4,
            output: None,
            ..Config::default()
        };
        b.iter(|| mandelfarm::render(&config, 8).unwrap())
    });
}

criterion_group!(benches, render_block, render_group);
criterion_main!(benches);
