use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use terrain_brush::brush::{self, EllipseRadii, Falloff, Interpolation, PatchImage};
use terrain_brush::terrain::NoiseConfig;
use terrain_brush::{CircleRequest, EllipseRequest, HeightMap, PatchRequest, TerrainModifier};

fn random_patch(width: u32, height: u32) -> PatchImage {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let values: Vec<f32> = (0..width * height)
        .map(|_| rng.random_range(0.0..2.0))
        .collect();
    PatchImage::from_f32(width, height, &values)
}

fn bench_kernels(c: &mut Criterion) {
    let mut group = c.benchmark_group("Kernel Synthesis");

    for &radius in &[10.0f32, 50.0, 150.0] {
        group.bench_function(format!("circle_{}", radius), |b| {
            b.iter(|| black_box(brush::circle(radius, radius * 0.3, 1.0, Falloff::Smoothstep)));
        });

        let radii = EllipseRadii::new(radius, radius * 0.5, radius * 0.3, radius * 0.15);
        group.bench_function(format!("ellipse_{}", radius), |b| {
            b.iter(|| black_box(brush::ellipse(&radii, 1.0, Falloff::Smoothstep)));
        });
    }

    group.finish();
}

fn bench_rotation(c: &mut Criterion) {
    let mut group = c.benchmark_group("Kernel Rotation");

    for &radius in &[10.0f32, 50.0, 150.0] {
        let radii = EllipseRadii::new(radius, radius * 0.5, 0.0, 0.0);
        let kernel = brush::ellipse(&radii, 1.0, Falloff::Linear).unwrap();
        let canvas = brush::expand(kernel.view());

        group.bench_function(format!("bilinear_{}", radius), |b| {
            b.iter(|| black_box(brush::rotate(&canvas, 0.7, Interpolation::Bilinear)));
        });
        group.bench_function(format!("nearest_{}", radius), |b| {
            b.iter(|| black_box(brush::rotate(&canvas, 0.7, Interpolation::Nearest)));
        });
    }

    group.finish();
}

fn bench_modifier(c: &mut Criterion) {
    let mut group = c.benchmark_group("Terrain Modifier");
    let modifier = TerrainModifier::default();

    for &size in &[256usize, 1024] {
        let terrain = HeightMap::from_noise(size, &NoiseConfig::default());
        let center = [size as f32 * 0.5, size as f32 * 0.5];

        group.bench_function(format!("circle_{}", size), |b| {
            let request = CircleRequest::new(center, 0.1, 0.02, 1.0);
            let mut map = terrain.clone();
            b.iter(|| black_box(modifier.modify_circle(Some(&mut map), &request)));
        });

        group.bench_function(format!("ellipse_{}", size), |b| {
            let request = EllipseRequest::new(center, 0.1, 0.04, 1.0).with_orientation(0.4);
            let mut map = terrain.clone();
            b.iter(|| black_box(modifier.modify_ellipse(Some(&mut map), &request)));
        });

        group.bench_function(format!("patch_{}", size), |b| {
            let request = PatchRequest::new(center, 1.1, random_patch(64, 32));
            let mut map = terrain.clone();
            b.iter(|| black_box(modifier.modify_patch(Some(&mut map), &request)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_kernels, bench_rotation, bench_modifier);
criterion_main!(benches);
