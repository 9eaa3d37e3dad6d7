use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use plate_arrange::config::{ArrangeConfig, BuildVolume};
use plate_arrange::geometry::primitives::{Point, Rect};
use plate_arrange::job::{ArrangeObject, ArrangementJob, CancelToken};
use plate_arrange::placer::find_best_spot;

criterion_main!(benches);
criterion_group!(benches, find_best_spot_bench, arrange_plate_bench);

const STRIDES: [usize; 3] = [1, 10, 50];

fn square(size: f64) -> ArrangeObject {
    ArrangeObject::new(Rect::centered(size, size).corners().to_vec())
}

/// A mixed set of squares and triangles, roughly half of which fit on the default bed
fn create_objects(n: usize) -> Vec<ArrangeObject> {
    (0..n)
        .map(|i| match i % 3 {
            0 => square(20.0 + (i % 7) as f64 * 5.0),
            1 => ArrangeObject::new(vec![
                Point(-15.0, -10.0),
                Point(15.0, -10.0),
                Point(0.0, 10.0 + (i % 5) as f64 * 4.0),
            ]),
            _ => ArrangeObject::new(Rect::centered(45.0, 12.0).corners().to_vec()),
        })
        .collect()
}

/// Benchmark a single spot search on a bed that is already partially filled
fn find_best_spot_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_best_spot");
    for stride in STRIDES {
        let config = ArrangeConfig {
            stride,
            ..ArrangeConfig::default()
        };
        let job = ArrangementJob::new(BuildVolume::default(), config).unwrap();
        let (_, grid) = job
            .arrange_with_grid(
                &[],
                &create_objects(40),
                |_| {},
                || {},
                &CancelToken::new(),
            )
            .unwrap();
        let (offset_shape, _) = job.describe(&square(25.0));

        group.bench_function(BenchmarkId::from_parameter(stride), |b| {
            b.iter(|| find_best_spot(black_box(&grid), black_box(&offset_shape), 0, stride))
        });
    }
    group.finish();
}

/// Benchmark a complete arrangement, from an empty bed to the last object
fn arrange_plate_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("arrange_plate");
    group.sample_size(20);
    let fixed = vec![ArrangeObject::new(
        Rect::new(-175.0, -125.0, -125.0, -75.0).corners().to_vec(),
    )];
    let movable = create_objects(60);
    for stride in STRIDES {
        let config = ArrangeConfig {
            stride,
            ..ArrangeConfig::default()
        };
        let job = ArrangementJob::new(BuildVolume::default(), config).unwrap();
        group.bench_function(BenchmarkId::from_parameter(stride), |b| {
            b.iter(|| job.arrange_all(black_box(&fixed), black_box(&movable)).unwrap())
        });
    }
    group.finish();
}
