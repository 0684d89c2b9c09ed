use barscan_core::preprocess;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{Rgb, RgbImage};

fn synthetic_frame(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let v = if ((x / 8) + (y / 8)) % 2 == 0 { 30 } else { 220 };
        Rgb([v, v.wrapping_add(x as u8), v.wrapping_sub(y as u8)])
    })
}

fn bench_preprocess(c: &mut Criterion) {
    let vga = synthetic_frame(640, 480);
    let full_hd = synthetic_frame(1920, 1080);

    c.bench_function("preprocess_640x480", |b| {
        b.iter(|| preprocess(black_box(&vga)))
    });
    c.bench_function("preprocess_1920x1080", |b| {
        b.iter(|| preprocess(black_box(&full_hd)))
    });
}

criterion_group!(benches, bench_preprocess);
criterion_main!(benches);
