use plotkit::PlotModel;
use plotkit::annotation::{Annotation, LineAnnotation, PolygonAnnotation, TextAnnotation};
use plotkit::axis::{AxisPosition, LinearAxis};
use plotkit::geometry::{DataPoint, ScreenPoint, Viewport};
use plotkit::model::PlotMargins;
use plotkit::render::{DrawCommand, FrameRenderContext, NullRenderContext};

fn viewport() -> Viewport {
    Viewport::new(1000, 600)
}

/// Zero-margin model with x and y pinned to 0..10.
fn annotated_model() -> PlotModel {
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
    model
}

#[test]
fn horizontal_line_annotation_spans_the_plot_area() {
    let mut model = annotated_model();
    model.add_annotation(LineAnnotation::horizontal(5.0).with_label("limit"));

    let mut context = FrameRenderContext::new(viewport());
    model.render(&mut context, viewport()).expect("render");
    let frame = context.into_frame();

    // y=5 maps to 300 px, spanning x 0..1000.
    let guide = frame.commands.iter().find_map(|command| match command {
        DrawCommand::Line { points, dash, .. } if !dash.is_empty() => Some(points.clone()),
        _ => None,
    });
    let points = guide.expect("dashed guide line");
    assert_eq!(points.first(), Some(&(0.0, 300.0)));
    assert_eq!(points.last(), Some(&(1000.0, 300.0)));

    let has_label = frame
        .commands
        .iter()
        .any(|command| matches!(command, DrawCommand::Text { text, .. } if text == "limit"));
    assert!(has_label);
}

#[test]
fn line_annotation_outside_bounds_draws_nothing_and_misses() {
    let mut model = annotated_model();
    let index = model.add_annotation(LineAnnotation::horizontal(50.0));

    let mut context = NullRenderContext::new();
    model.render(&mut context, viewport()).expect("render");

    assert!(model.annotation_hit_test(ScreenPoint::new(500.0, 300.0)).is_none());
    assert_eq!(index, 0);
}

#[test]
fn line_annotation_hit_test_uses_distance_tolerance() {
    let mut model = annotated_model();
    let index = model.add_annotation(LineAnnotation::horizontal(5.0));

    let mut context = NullRenderContext::new();
    model.render(&mut context, viewport()).expect("render");

    assert_eq!(
        model.annotation_hit_test(ScreenPoint::new(500.0, 302.0)),
        Some(index)
    );
    assert!(model.annotation_hit_test(ScreenPoint::new(500.0, 320.0)).is_none());
}

#[test]
fn segment_annotation_is_clipped_to_the_plot_area() {
    let mut model = annotated_model();
    model.add_annotation(LineAnnotation::new(
        plotkit::annotation::LineAnnotationKind::Segment(
            DataPoint::new(-5.0, 5.0),
            DataPoint::new(15.0, 5.0),
        ),
    ));

    let mut context = FrameRenderContext::new(viewport());
    model.render(&mut context, viewport()).expect("render");
    let frame = context.into_frame();

    let guide = frame.commands.iter().find_map(|command| match command {
        DrawCommand::Line { points, dash, .. } if !dash.is_empty() => Some(points.clone()),
        _ => None,
    });
    let points = guide.expect("segment line");
    assert_eq!(points.first(), Some(&(0.0, 300.0)));
    assert_eq!(points.last(), Some(&(1000.0, 300.0)));
}

#[test]
fn polygon_annotation_hit_test_is_even_odd() {
    let mut model = annotated_model();
    let index = model.add_annotation(PolygonAnnotation::new(vec![
        DataPoint::new(2.0, 2.0),
        DataPoint::new(8.0, 2.0),
        DataPoint::new(8.0, 8.0),
        DataPoint::new(2.0, 8.0),
    ]));

    let mut context = NullRenderContext::new();
    model.render(&mut context, viewport()).expect("render");

    // Data (5,5) maps to (500, 300).
    assert_eq!(
        model.annotation_hit_test(ScreenPoint::new(500.0, 300.0)),
        Some(index)
    );
    // Data (9,9) is outside the polygon.
    assert!(model.annotation_hit_test(ScreenPoint::new(900.0, 60.0)).is_none());
}

#[test]
fn text_annotation_hit_bounds_follow_measured_size() {
    let mut model = annotated_model();
    let index = model.add_annotation(TextAnnotation::new(DataPoint::new(5.0, 5.0), "hello"));

    let mut context = NullRenderContext::new();
    model.render(&mut context, viewport()).expect("render");

    // Centered on (500, 300); 5 chars at 12 px estimate to 36x14.4 px.
    assert_eq!(
        model.annotation_hit_test(ScreenPoint::new(500.0, 300.0)),
        Some(index)
    );
    assert_eq!(
        model.annotation_hit_test(ScreenPoint::new(515.0, 304.0)),
        Some(index)
    );
    assert!(model.annotation_hit_test(ScreenPoint::new(560.0, 300.0)).is_none());
}

#[test]
fn unrendered_annotation_reports_no_hit() {
    let annotation = PolygonAnnotation::new(vec![
        DataPoint::new(0.0, 0.0),
        DataPoint::new(1.0, 0.0),
        DataPoint::new(0.0, 1.0),
    ]);
    assert!(!annotation.hit_test(ScreenPoint::new(0.2, 0.2)));
}

#[test]
fn topmost_annotation_wins_overlapping_hits() {
    let mut model = annotated_model();
    let bottom = model.add_annotation(PolygonAnnotation::new(vec![
        DataPoint::new(1.0, 1.0),
        DataPoint::new(9.0, 1.0),
        DataPoint::new(9.0, 9.0),
        DataPoint::new(1.0, 9.0),
    ]));
    let top = model.add_annotation(PolygonAnnotation::new(vec![
        DataPoint::new(4.0, 4.0),
        DataPoint::new(6.0, 4.0),
        DataPoint::new(6.0, 6.0),
        DataPoint::new(4.0, 6.0),
    ]));

    let mut context = NullRenderContext::new();
    model.render(&mut context, viewport()).expect("render");

    assert_eq!(
        model.annotation_hit_test(ScreenPoint::new(500.0, 300.0)),
        Some(top)
    );
    assert_eq!(
        model.annotation_hit_test(ScreenPoint::new(200.0, 300.0)),
        Some(bottom)
    );
}
