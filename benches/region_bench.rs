use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nucleation_edit::Region;
use std::time::Duration;

// Corner updates rebuild the whole cell set, so cost should track volume.
fn bench_set_corner(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_corner");
    group.measurement_time(Duration::from_secs(3));

    for &size in &[8, 16, 32, 64] {
        group.bench_with_input(BenchmarkId::new("cube", size), &size, |b, &size| {
            let mut region = Region::new();
            region.set_corner_a((0, 0, 0));
            b.iter(|| {
                region.set_corner_b((size - 1, size - 1, size - 1));
                black_box(region.size());
            });
        });
    }
    group.finish();
}

fn bench_repeated_small_updates(c: &mut Criterion) {
    let mut group = c.benchmark_group("repeated_updates");
    group.measurement_time(Duration::from_secs(3));

    for &updates in &[1, 10, 100] {
        group.bench_with_input(BenchmarkId::new("8_cube", updates), &updates, |b, &updates| {
            let mut region = Region::from_corners((0, 0, 0), (7, 7, 7));
            b.iter(|| {
                for i in 0..updates {
                    region.set_corner_b((7, 7, 7 + (i % 2)));
                }
                black_box(region.size());
            });
        });
    }
    group.finish();
}

fn bench_enclosed_cells(c: &mut Criterion) {
    let mut group = c.benchmark_group("enclosed_cells");
    group.measurement_time(Duration::from_secs(3));

    for &size in &[16, 32] {
        let region = Region::from_corners((0, 0, 0), (size - 1, size - 1, size - 1));
        group.bench_function(&format!("{}_cube", size), |b| {
            b.iter(|| black_box(region.enclosed_cells().len()));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_set_corner,
    bench_repeated_small_updates,
    bench_enclosed_cells
);
criterion_main!(benches);
