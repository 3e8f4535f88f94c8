use plotkit::PlotModel;
use plotkit::axis::{Axis, AxisPosition, LinearAxis};
use plotkit::geometry::{DataPoint, ScreenPoint, Viewport};
use plotkit::interaction::{ControllerMode, PlotController};
use plotkit::model::PlotMargins;
use plotkit::render::NullRenderContext;
use plotkit::series::{LineSeries, ScatterSeries};

fn viewport() -> Viewport {
    Viewport::new(1000, 600)
}

/// Model with zero margins so screen coordinates are easy to predict:
/// x 0..10 maps to 0..1000 px and y 0..10 maps to 600..0 px.
fn simple_model(points: Vec<DataPoint>) -> PlotModel {
    let mut model = PlotModel::new().with_margins(PlotMargins {
        left: 0.0,
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
    });
    model
        .add_axis(LinearAxis::new(AxisPosition::Bottom).with_minimum(0.0).with_maximum(10.0))
        .expect("x axis");
    model
        .add_axis(LinearAxis::new(AxisPosition::Left).with_minimum(0.0).with_maximum(10.0))
        .expect("y axis");
    model.add_series(LineSeries::new().with_points(points));

    let mut context = NullRenderContext::new();
    model.render(&mut context, viewport()).expect("render");
    model
}

#[test]
fn hit_test_snaps_to_samples_without_interpolation() {
    let mut model = simple_model(vec![
        DataPoint::new(0.0, 0.0),
        DataPoint::new(5.0, 0.0),
        DataPoint::new(10.0, 0.0),
    ]);

    // Near x=5 but between samples; snapping must pick the sample itself.
    let probe = ScreenPoint::new(520.0, 600.0);
    let hit = model.hit_test(probe, false, 50.0).expect("hit");
    assert_eq!(hit.hit.data, DataPoint::new(5.0, 0.0));
    assert_eq!(hit.hit.sample_index, 1);
    assert!(!hit.hit.interpolated);
}

#[test]
fn hit_test_interpolates_between_samples() {
    let mut model = simple_model(vec![DataPoint::new(0.0, 5.0), DataPoint::new(10.0, 5.0)]);

    // y=5 maps to 300 px; probe above the middle of the segment.
    let probe = ScreenPoint::new(500.0, 280.0);
    let hit = model.hit_test(probe, true, 50.0).expect("hit");
    assert!(hit.hit.interpolated);
    assert!((hit.hit.position.x - 500.0).abs() <= 1e-9);
    assert!((hit.hit.position.y - 300.0).abs() <= 1e-9);
    assert!((hit.hit.data.x - 5.0).abs() <= 1e-9);
    assert!((hit.hit.data.y - 5.0).abs() <= 1e-9);
}

#[test]
fn hit_test_outside_tolerance_returns_none() {
    let mut model = simple_model(vec![DataPoint::new(0.0, 0.0), DataPoint::new(10.0, 0.0)]);
    // Data line sits at y=600 px; probe is 200 px away.
    assert!(model.hit_test(ScreenPoint::new(500.0, 400.0), true, 20.0).is_none());
    assert!(model.hit_test(ScreenPoint::UNDEFINED, true, 20.0).is_none());
}

#[test]
fn hit_test_picks_nearest_series() {
    let mut model = PlotModel::new().with_margins(PlotMargins {
        left: 0.0,
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
    });
    model
        .add_axis(LinearAxis::new(AxisPosition::Bottom).with_minimum(0.0).with_maximum(10.0))
        .expect("x axis");
    model
        .add_axis(LinearAxis::new(AxisPosition::Left).with_minimum(0.0).with_maximum(10.0))
        .expect("y axis");
    model.add_series(
        LineSeries::new()
            .with_title("low")
            .with_points(vec![DataPoint::new(0.0, 2.0), DataPoint::new(10.0, 2.0)]),
    );
    model.add_series(
        LineSeries::new()
            .with_title("high")
            .with_points(vec![DataPoint::new(0.0, 8.0), DataPoint::new(10.0, 8.0)]),
    );
    let mut context = NullRenderContext::new();
    model.render(&mut context, viewport()).expect("render");

    // y=8 maps to 120 px, y=2 to 480 px; probe near the top line.
    let hit = model
        .hit_test(ScreenPoint::new(500.0, 150.0), true, 1000.0)
        .expect("hit");
    assert_eq!(hit.series_index, 1);
    assert_eq!(model.series_title(hit.series_index), Some("high"));
}

#[test]
fn scatter_never_interpolates() {
    let mut model = PlotModel::new().with_margins(PlotMargins {
        left: 0.0,
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
    });
    model
        .add_axis(LinearAxis::new(AxisPosition::Bottom).with_minimum(0.0).with_maximum(10.0))
        .expect("x axis");
    model
        .add_axis(LinearAxis::new(AxisPosition::Left).with_minimum(0.0).with_maximum(10.0))
        .expect("y axis");
    model.add_series(
        ScatterSeries::new()
            .with_points(vec![DataPoint::new(2.0, 5.0), DataPoint::new(8.0, 5.0)]),
    );
    let mut context = NullRenderContext::new();
    model.render(&mut context, viewport()).expect("render");

    let hit = model
        .hit_test(ScreenPoint::new(500.0, 300.0), true, 1000.0)
        .expect("hit");
    assert!(!hit.hit.interpolated);
    assert_eq!(hit.hit.data, DataPoint::new(2.0, 5.0));
}

#[test]
fn controller_pan_moves_axes_and_round_trips() {
    let mut model = simple_model(vec![DataPoint::new(0.0, 0.0), DataPoint::new(10.0, 10.0)]);
    let mut controller = PlotController::new();

    let x_id = model.axes().resolve("", true).expect("x axis");
    let before = (
        model.axis(x_id).core().actual_minimum(),
        model.axis(x_id).core().actual_maximum(),
    );

    controller.pointer_down(ScreenPoint::new(400.0, 300.0));
    assert_eq!(controller.mode(), ControllerMode::Panning);
    controller.pointer_move(&mut model, ScreenPoint::new(500.0, 300.0));

    let panned = model.axis(x_id).core().actual_minimum();
    assert!((panned - (before.0 - 1.0)).abs() <= 1e-9);

    controller.pointer_move(&mut model, ScreenPoint::new(400.0, 300.0));
    controller.pointer_up();
    assert_eq!(controller.mode(), ControllerMode::Idle);
    assert!((model.axis(x_id).core().actual_minimum() - before.0).abs() <= 1e-9);
    assert!((model.axis(x_id).core().actual_maximum() - before.1).abs() <= 1e-9);
}

#[test]
fn controller_wheel_zoom_keeps_anchor_value() {
    let mut model = simple_model(vec![DataPoint::new(0.0, 0.0), DataPoint::new(10.0, 10.0)]);
    let mut controller = PlotController::new();

    let anchor = ScreenPoint::new(250.0, 300.0);
    let x_id = model.axes().resolve("", true).expect("x axis");
    let anchor_value = model.axis(x_id).inverse_transform(anchor.x);

    controller.wheel_zoom(&mut model, anchor, 1.0).expect("zoom");

    let x_axis = model.axis(x_id);
    let span = x_axis.core().actual_maximum() - x_axis.core().actual_minimum();
    assert!((span - 10.0 / 1.2).abs() <= 1e-9);
    assert!(x_axis.core().actual_minimum() < anchor_value);
    assert!(anchor_value < x_axis.core().actual_maximum());
}

#[test]
fn controller_tracker_updates_when_idle() {
    let mut model = simple_model(vec![DataPoint::new(0.0, 5.0), DataPoint::new(10.0, 5.0)]);
    let mut controller = PlotController::new();

    controller.pointer_move(&mut model, ScreenPoint::new(500.0, 310.0));
    assert!(controller.tracker().is_visible());
    let hit = controller.tracker().hit().expect("tracker hit");
    assert!((hit.hit.position.y - 300.0).abs() <= 1e-9);

    controller.pointer_leave();
    assert!(!controller.tracker().is_visible());
    assert!(controller.tracker().hit().is_none());
}

#[test]
fn controller_reset_restores_committed_bounds() {
    let mut model = simple_model(vec![DataPoint::new(0.0, 0.0), DataPoint::new(10.0, 10.0)]);
    let mut controller = PlotController::new();

    controller
        .wheel_zoom(&mut model, ScreenPoint::new(500.0, 300.0), 3.0)
        .expect("zoom");
    controller.reset(&mut model);

    let x_id = model.axes().resolve("", true).expect("x axis");
    assert_eq!(model.axis(x_id).core().actual_minimum(), 0.0);
    assert_eq!(model.axis(x_id).core().actual_maximum(), 10.0);
}
