use plotkit::axis::{Axis, AxisPosition, LinearAxis};
use plotkit::geometry::{PlotRect, ScreenPoint};

fn ready_axis(position: AxisPosition) -> LinearAxis {
    let mut axis = LinearAxis::new(position);
    axis.include(0.0);
    axis.include(100.0);
    axis.core_mut().commit_data_bounds();
    axis.update_transform(PlotRect::new(0.0, 0.0, 1000.0, 500.0).expect("area"));
    axis
}

#[test]
fn pan_shifts_bounds_without_changing_scale() {
    let mut axis = ready_axis(AxisPosition::Bottom);
    let scale_before = axis.core().transform().scale();

    axis.pan(ScreenPoint::new(100.0, 0.0), ScreenPoint::new(200.0, 0.0));

    // 100 px at 10 px per unit moves the window by 10 data units; content
    // follows the pointer so the bounds move the other way.
    assert!((axis.core().actual_minimum() - -10.0).abs() <= 1e-9);
    assert!((axis.core().actual_maximum() - 90.0).abs() <= 1e-9);
    assert_eq!(axis.core().transform().scale(), scale_before);
}

#[test]
fn pan_round_trip_restores_bounds() {
    let mut axis = ready_axis(AxisPosition::Bottom);
    let before = (axis.core().actual_minimum(), axis.core().actual_maximum());

    let a = ScreenPoint::new(300.0, 40.0);
    let b = ScreenPoint::new(420.0, 90.0);
    axis.pan(a, b);
    axis.pan(b, a);

    assert!((axis.core().actual_minimum() - before.0).abs() <= 1e-9);
    assert!((axis.core().actual_maximum() - before.1).abs() <= 1e-9);
}

#[test]
fn vertical_axis_pans_along_y() {
    let mut axis = ready_axis(AxisPosition::Left);
    let before = axis.core().actual_minimum();

    // A purely horizontal pointer move must not pan a vertical axis.
    axis.pan(ScreenPoint::new(0.0, 250.0), ScreenPoint::new(500.0, 250.0));
    assert!((axis.core().actual_minimum() - before).abs() <= 1e-12);

    axis.pan(ScreenPoint::new(0.0, 250.0), ScreenPoint::new(0.0, 150.0));
    assert!(axis.core().actual_minimum() != before);
}

#[test]
fn pan_on_degenerate_axis_is_a_no_op() {
    let mut axis = LinearAxis::new(AxisPosition::Bottom);
    let before = (axis.core().actual_minimum(), axis.core().actual_maximum());
    axis.pan(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(100.0, 0.0));
    assert_eq!(
        (axis.core().actual_minimum(), axis.core().actual_maximum()),
        before
    );
}

#[test]
fn zoom_sets_bounds_and_rejects_degenerate_pairs() {
    let mut axis = ready_axis(AxisPosition::Bottom);

    axis.core_mut().zoom(20.0, 60.0).expect("zoom");
    assert_eq!(axis.core().actual_minimum(), 20.0);
    assert_eq!(axis.core().actual_maximum(), 60.0);

    assert!(axis.core_mut().zoom(5.0, 5.0).is_err());
    assert!(axis.core_mut().zoom(9.0, 3.0).is_err());
    assert!(axis.core_mut().zoom(f64::NAN, 1.0).is_err());
    // Failed zooms leave bounds untouched.
    assert_eq!(axis.core().actual_minimum(), 20.0);
    assert_eq!(axis.core().actual_maximum(), 60.0);
}

#[test]
fn zoom_at_rescales_span_around_center() {
    let mut axis = ready_axis(AxisPosition::Bottom);

    axis.core_mut().zoom_at(2.0, 50.0).expect("zoom in");
    assert!((axis.core().actual_minimum() - 25.0).abs() <= 1e-9);
    assert!((axis.core().actual_maximum() - 75.0).abs() <= 1e-9);

    // The center keeps its data value.
    axis.update_transform(PlotRect::new(0.0, 0.0, 1000.0, 500.0).expect("area"));
    let center_screen = axis.transform(50.0);
    assert!((axis.inverse_transform(center_screen) - 50.0).abs() <= 1e-9);

    assert!(axis.core_mut().zoom_at(0.0, 50.0).is_err());
    assert!(axis.core_mut().zoom_at(2.0, f64::NAN).is_err());
}

#[test]
fn zoom_then_reset_restores_committed_bounds() {
    let mut axis = ready_axis(AxisPosition::Bottom);

    axis.core_mut().zoom(30.0, 40.0).expect("zoom");
    axis.core_mut().reset();

    assert_eq!(axis.core().actual_minimum(), 0.0);
    assert_eq!(axis.core().actual_maximum(), 100.0);
}

#[test]
fn recommit_captures_a_new_reset_baseline() {
    let mut axis = ready_axis(AxisPosition::Bottom);

    axis.core_mut().begin_data_update();
    axis.include(-50.0);
    axis.include(50.0);
    axis.core_mut().commit_data_bounds();

    axis.core_mut().zoom(0.0, 1.0).expect("zoom");
    axis.core_mut().reset();
    assert_eq!(axis.core().actual_minimum(), -50.0);
    assert_eq!(axis.core().actual_maximum(), 50.0);
}
