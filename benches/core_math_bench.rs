use criterion::{Criterion, criterion_group, criterion_main};
use plotkit::axis::{Axis, AxisPosition, LinearAxis};
use plotkit::geometry::{PlotRect, ScreenPoint, clip_line, nearest_point_on_polyline};
use plotkit::series::project_points;
use std::hint::black_box;

fn ready_axis(position: AxisPosition) -> LinearAxis {
    let mut axis = LinearAxis::new(position);
    axis.core_mut().zoom(0.0, 10_000.0).expect("valid bounds");
    axis.update_transform(PlotRect::new(0.0, 0.0, 1920.0, 1080.0).expect("plot area"));
    axis
}

fn bench_transform_round_trip(c: &mut Criterion) {
    let axis = ready_axis(AxisPosition::Bottom);

    c.bench_function("axis_transform_round_trip", |b| {
        b.iter(|| {
            let screen = axis.transform(black_box(4_321.123));
            let _ = axis.inverse_transform(black_box(screen));
        })
    });
}

fn bench_projection_10k(c: &mut Criterion) {
    let x_axis = ready_axis(AxisPosition::Bottom);
    let y_axis = ready_axis(AxisPosition::Left);
    let points: Vec<plotkit::geometry::DataPoint> = (0..10_000)
        .map(|i| {
            let t = i as f64;
            plotkit::geometry::DataPoint::new(t, 5_000.0 + (t * 0.01).sin() * 4_000.0)
        })
        .collect();

    c.bench_function("point_projection_10k", |b| {
        b.iter(|| {
            let _ = project_points(black_box(&points), &x_axis, &y_axis);
        })
    });
}

fn bench_clip_and_nearest_10k(c: &mut Criterion) {
    let bounds = PlotRect::new(0.0, 0.0, 1920.0, 1080.0).expect("plot area");
    let polyline: Vec<ScreenPoint> = (0..10_000)
        .map(|i| {
            let t = i as f64;
            ScreenPoint::new(t * 0.2 - 40.0, 540.0 + (t * 0.01).sin() * 700.0)
        })
        .collect();

    c.bench_function("clip_line_10k_segments", |b| {
        b.iter(|| {
            for pair in polyline.windows(2) {
                let _ = clip_line(black_box(bounds), pair[0], pair[1]);
            }
        })
    });

    c.bench_function("nearest_point_on_polyline_10k", |b| {
        b.iter(|| {
            let _ = nearest_point_on_polyline(
                black_box(ScreenPoint::new(960.0, 540.0)),
                black_box(&polyline),
            );
        })
    });
}

criterion_group!(
    benches,
    bench_transform_round_trip,
    bench_projection_10k,
    bench_clip_and_nearest_10k
);
criterion_main!(benches);
