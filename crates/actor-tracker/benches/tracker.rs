use actor_tracker::{BoundingBox, Detection, Tracker};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// A grid of `n` well separated 50x50 boxes drifting one pixel per frame.
fn make_frame(n: usize, frame_number: u64) -> Vec<Detection> {
    let drift = frame_number as f32;
    (0..n)
        .map(|i| {
            let x = (i % 32) as f32 * 100.0 + drift;
            let y = (i / 32) as f32 * 100.0;
            let confidence = if i % 4 == 0 { 0.3 } else { 0.9 };
            Detection::new(
                None,
                "car",
                Some(confidence),
                BoundingBox::new(x, y, x + 50.0, y + 50.0),
                frame_number,
            )
        })
        .collect()
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("update");

    for n in [10, 50, 100, 250] {
        let frames = (0..30).map(|frame| make_frame(n, frame)).collect::<Vec<_>>();

        group.bench_function(format!("{n}_actors"), |b| {
            b.iter(|| {
                let mut tracker = Tracker::default();
                frames.iter().enumerate().for_each(|(frame_number, detections)| {
                    black_box(tracker.update(detections, frame_number as u64));
                });
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_update);
criterion_main!(benches);
