//! Benchmarks for the per-frame CPU work.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use nodefield::particle::spawn_particles;
use nodefield::physics::{self, StepParams};
use nodefield::render::{self, Recording};
use nodefield::{Canvas, FieldConfig, SurfaceSize, Vec2, Viewport};

const VIEWPORT: Viewport = Viewport {
    width: 1920.0,
    height: 1080.0,
};

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("physics_step");
    let params = StepParams::from(&FieldConfig::default());

    for count in [40usize, 180, 1000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut rng = SmallRng::seed_from_u64(1);
            let mut particles = spawn_particles(count, VIEWPORT, &mut rng);
            let pointer = Vec2::new(960.0, 540.0);
            b.iter(|| {
                physics::step(black_box(&mut particles), pointer, VIEWPORT, &params, &mut rng);
            })
        });
    }

    group.finish();
}

fn bench_links(c: &mut Criterion) {
    let mut group = c.benchmark_group("draw_links");

    for count in [40usize, 180, 1000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut rng = SmallRng::seed_from_u64(2);
            let particles = spawn_particles(count, VIEWPORT, &mut rng);
            b.iter(|| {
                let mut surface = Recording::new();
                render::draw_links(&mut surface, black_box(&particles), 140.0);
                surface
            })
        });
    }

    group.finish();
}

fn bench_raster_frame(c: &mut Criterion) {
    let config = FieldConfig::default();
    let mut rng = SmallRng::seed_from_u64(3);
    let particles = spawn_particles(180, VIEWPORT, &mut rng);
    let mut canvas = Canvas::new(SurfaceSize::for_viewport(VIEWPORT, 1.0));

    c.bench_function("raster_frame_1080p", |b| {
        b.iter(|| {
            render::draw_frame(&mut canvas, black_box(&particles), VIEWPORT, &config);
        })
    });
}

criterion_group!(benches, bench_step, bench_links, bench_raster_frame);
criterion_main!(benches);
