//! Benchmarks for one animation frame at the reference particle count.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use morphfield::config::PARTICLE_COUNT;
use morphfield::prelude::*;

fn bench_field_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("field_step");

    for count in [PARTICLE_COUNT / 4, PARTICLE_COUNT] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let config = FieldConfig::default().with_particle_count(count);
            let mut field = ParticleField::seeded(config, 1280.0, 600.0, 7);
            b.iter(|| {
                field.step();
                black_box(field.particles().len())
            })
        });
    }

    group.finish();
}

fn bench_field_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("field_frame");
    let config = FieldConfig::default();

    group.bench_function("recorder", |b| {
        let mut field = ParticleField::seeded(config.clone(), 1280.0, 600.0, 7);
        let mut recorder = CommandRecorder::new(1280, 600);
        b.iter(|| {
            recorder.clear();
            field.frame(&mut recorder);
            black_box(recorder.commands().len())
        })
    });

    group.bench_function("pixmap", |b| {
        let mut field = ParticleField::seeded(config.clone(), 1280.0, 600.0, 7);
        let mut canvas = PixmapCanvas::new(1280, 600).unwrap();
        b.iter(|| {
            field.frame(&mut canvas);
            black_box(canvas.data()[0])
        })
    });

    group.finish();
}

fn bench_glyph_frame(c: &mut Criterion) {
    let mask = CoverageMask::from_fn(800, 600, |x, y| {
        let (dx, dy) = (x as f32 - 400.0, y as f32 - 300.0);
        if dx.abs() < 120.0 && dy.abs() < 120.0 {
            255
        } else {
            0
        }
    });
    let mut rng = SmallRng::seed_from_u64(3);
    let mut field = GlyphField::from_mask(GlyphFieldConfig::default(), &mask, &mut rng);
    let mut canvas = PixmapCanvas::new(800, 600).unwrap();

    c.bench_function("glyph_frame", |b| {
        b.iter(|| {
            field.frame(&mut canvas);
            black_box(canvas.data()[0])
        })
    });
}

criterion_group!(benches, bench_field_step, bench_field_frame, bench_glyph_frame);
criterion_main!(benches);
