use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sift_rs::sift::backend::CpuBackend;
use sift_rs::sift::{pyramid, GrayImage, Sift, SiftConfig};

fn gaussian_blob(size: usize, cx: f32, cy: f32, sigma: f32) -> GrayImage {
    let mut image = GrayImage::new(size, size).unwrap();
    for y in 0..size {
        for x in 0..size {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            let v = (-(dx * dx + dy * dy) / (2.0 * sigma * sigma)).exp();
            image.set(x, y, v);
        }
    }
    image
}

fn bench_pyramid_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("Gaussian Pyramid");
    let backend = CpuBackend::new();

    for size in [128usize, 256, 512].iter() {
        let config = SiftConfig::new((*size, *size));
        let image = gaussian_blob(*size, *size as f32 / 2.0, *size as f32 / 2.0, 8.0);

        group.bench_with_input(BenchmarkId::new("build_pyramid", size), size, |b, _| {
            b.iter(|| pyramid::build_pyramid(black_box(&image), black_box(&config), &backend))
        });
    }

    group.finish();
}

fn bench_detect_and_describe(c: &mut Criterion) {
    let mut group = c.benchmark_group("SIFT detect+describe");

    for size in [128usize, 256].iter() {
        let config = SiftConfig::new((*size, *size));
        let image = gaussian_blob(*size, *size as f32 / 2.0, *size as f32 / 2.0, 8.0);

        group.bench_with_input(BenchmarkId::new("detect", size), size, |b, _| {
            b.iter(|| {
                let mut sift = Sift::new(config).unwrap();
                black_box(sift.detect(black_box(&image)).unwrap())
            })
        });

        group.bench_with_input(BenchmarkId::new("detect_and_describe", size), size, |b, _| {
            b.iter(|| {
                let mut sift = Sift::new(config).unwrap();
                let keypoints = sift.detect(black_box(&image)).unwrap();
                black_box(sift.describe(&keypoints).unwrap())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pyramid_construction, bench_detect_and_describe);
criterion_main!(benches);
