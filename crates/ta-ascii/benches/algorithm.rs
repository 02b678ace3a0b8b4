use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use ta_ascii::algorithm::AsciiArtAlgorithm;
use ta_ascii::cache::BrightnessCache;
use ta_ascii::palette::CharacterPalette;
use ta_core::frame::RasterImage;

fn gradient(width: u32, height: u32) -> RasterImage {
    RasterImage::from_fn(width, height, |x, y| {
        let v = ((x + y) % 256) as u8;
        (v, v, v)
    })
}

fn palette() -> CharacterPalette {
    let mut palette = CharacterPalette::new();
    for (i, ch) in "@%#*+=-:. ".chars().enumerate() {
        palette.insert_raw(ch, i as f64 / 9.0);
    }
    palette
}

fn bench_algorithm(c: &mut Criterion) {
    let mut group = c.benchmark_group("ascii_art");
    let algo = AsciiArtAlgorithm::new();
    let palette = palette();

    for (width, height, resolution) in [(300, 200, 64), (1000, 700, 128), (1920, 1080, 256)] {
        let image = gradient(width, height);
        let id = format!("{width}x{height}@{resolution}");

        group.bench_with_input(BenchmarkId::new("cold", &id), &image, |b, img| {
            b.iter(|| {
                let mut cache = BrightnessCache::new();
                algo.run(black_box(img), resolution, &palette, &mut cache)
            });
        });

        let mut warm = BrightnessCache::new();
        assert!(algo.run(&image, resolution, &palette, &mut warm).is_ok());
        group.bench_with_input(BenchmarkId::new("cached", &id), &image, |b, img| {
            b.iter(|| algo.run(black_box(img), resolution, &palette, &mut warm));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_algorithm);
criterion_main!(benches);
