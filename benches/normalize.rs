use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use image_normalizer::image_pipeline::{
    ImageNormalizer, NormalizationConfig, SourceImage, TargetFormat,
};
use std::io::Cursor;

fn generate_source(width: u32, height: u32, format: ImageFormat) -> SourceImage {
    let raster = RgbaImage::from_fn(width, height, |x, y| {
        let alpha = if (x / 32 + y / 32) % 2 == 0 { 255 } else { 96 };
        Rgba([((x + y) % 256) as u8, (x % 256) as u8, (y % 256) as u8, alpha])
    });
    let raster = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(raster).to_rgb8()),
        _ => DynamicImage::ImageRgba8(raster),
    };

    let mut data = Vec::new();
    raster
        .write_to(&mut Cursor::new(&mut data), format)
        .expect("encode benchmark source");
    SourceImage::new(data, "bench.img")
}

fn benchmark_normalize_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_by_size");

    let sizes = vec![
        (640, 480, "640x480"),
        (1600, 1200, "1600x1200"),
        (3000, 2000, "3000x2000"),
    ];

    for (width, height, label) in sizes {
        let source = generate_source(width, height, ImageFormat::Jpeg);
        let normalizer = ImageNormalizer::new(NormalizationConfig::default());

        group.bench_with_input(BenchmarkId::from_parameter(label), &source, |b, source| {
            b.iter(|| normalizer.normalize(black_box(source)));
        });
    }

    group.finish();
}

fn benchmark_target_formats(c: &mut Criterion) {
    let mut group = c.benchmark_group("target_formats");
    let source = generate_source(1600, 1200, ImageFormat::Png);

    let formats = vec![
        (TargetFormat::Jpeg, "jpeg"),
        (TargetFormat::Png, "png"),
        (TargetFormat::WebP, "webp"),
    ];

    for (format, label) in formats {
        let config = NormalizationConfig::builder()
            .target_format(Some(format))
            .build();
        let normalizer = ImageNormalizer::new(config);

        group.bench_function(label, |b| {
            b.iter(|| normalizer.normalize(black_box(&source)));
        });
    }

    group.finish();
}

fn benchmark_size_targeting(c: &mut Criterion) {
    let mut group = c.benchmark_group("size_targeting");
    let source = generate_source(1600, 1200, ImageFormat::Jpeg);

    group.bench_function("no_target", |b| {
        let normalizer = ImageNormalizer::new(NormalizationConfig::default());
        b.iter(|| normalizer.normalize(black_box(&source)));
    });

    group.bench_function("unreachable_target", |b| {
        let config = NormalizationConfig::builder()
            .max_output_size_kb(Some(1))
            .build();
        let normalizer = ImageNormalizer::new(config);
        b.iter(|| normalizer.normalize(black_box(&source)));
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_normalize_sizes,
    benchmark_target_formats,
    benchmark_size_targeting
);
criterion_main!(benches);
