//! Benchmarks des conversions lat/lon ⇄ UTM ⇄ MGRS

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

fn sample_points() -> Vec<(f64, f64)> {
    (0..10_000)
        .map(|i| {
            let lat = -79.0 + (i % 163) as f64;
            let lon = -179.5 + (i % 359) as f64;
            (lat, lon)
        })
        .collect()
}

fn bench_single(c: &mut Criterion) {
    let mut group = c.benchmark_group("single");

    group.bench_function("lat_lon_to_utm", |b| {
        b.iter(|| utmref::lat_lon_to_utm(black_box(48.853), black_box(2.3498)).unwrap())
    });
    group.bench_function("lat_lon_to_mgrs", |b| {
        b.iter(|| utmref::lat_lon_to_mgrs(black_box(48.853), black_box(2.3498)).unwrap())
    });
    group.bench_function("utm_to_lat_lon", |b| {
        b.iter(|| utmref::utm_to_lat_lon(black_box("31 U 452303 5411318")).unwrap())
    });
    group.bench_function("mgrs_to_lat_lon", |b| {
        b.iter(|| utmref::mgrs_to_lat_lon(black_box("31UDQ5230311318")).unwrap())
    });

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let points = sample_points();

    let mut group = c.benchmark_group("batch");
    group.throughput(Throughput::Elements(points.len() as u64));

    group.bench_function("mgrs_round_trip", |b| {
        b.iter(|| {
            let mut checksum = 0.0;
            for &(lat, lon) in &points {
                let mgrs = utmref::lat_lon_to_mgrs(black_box(lat), black_box(lon)).unwrap();
                let (lat2, _) = utmref::mgrs_to_lat_lon(&mgrs).unwrap();
                checksum += lat2;
            }
            black_box(checksum)
        })
    });

    group.finish();
}

fn bench_parallel(c: &mut Criterion) {
    use rayon::prelude::*;

    let points = sample_points();

    let mut group = c.benchmark_group("parallel");
    group.throughput(Throughput::Elements(points.len() as u64));
    group.sample_size(20);

    group.bench_function("mgrs_round_trip_parallel", |b| {
        b.iter(|| {
            let checksum: f64 = points
                .par_iter()
                .filter_map(|&(lat, lon)| utmref::lat_lon_to_mgrs(lat, lon).ok())
                .filter_map(|mgrs| utmref::mgrs_to_lat_lon(&mgrs).ok())
                .map(|(lat, _)| lat)
                .sum();
            black_box(checksum)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_single, bench_batch, bench_parallel);
criterion_main!(benches);
