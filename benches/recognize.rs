use criterion::{black_box, criterion_group, criterion_main, Criterion};
use quick_gestures::mouse_gestures::{recognize, Point};
use quick_gestures::settings::RecognitionSettings;

fn zigzag(points: usize) -> Vec<Point> {
    (0..points)
        .map(|i| {
            let x = i as f64 * 3.0;
            let step = (i % 20) as f64 * 3.0;
            let y = if (i / 20) % 2 == 0 { step } else { 60.0 - step };
            Point::new(x, y, i as u64)
        })
        .collect()
}

fn bench_recognize(c: &mut Criterion) {
    let settings = RecognitionSettings::default();
    let path = zigzag(2_000);
    c.bench_function("recognize_2k_points", |b| {
        b.iter(|| recognize(black_box(&path), &settings))
    });
}

criterion_group!(benches, bench_recognize);
criterion_main!(benches);
