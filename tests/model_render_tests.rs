use plotkit::PlotModel;
use plotkit::annotation::PolygonAnnotation;
use plotkit::axis::{Axis, AxisPosition, CategoryAxis, ColorAxis, LinearAxis};
use plotkit::error::PlotError;
use plotkit::geometry::{DataPoint, Viewport};
use plotkit::model::PlotMargins;
use plotkit::render::{DrawCommand, FrameRenderContext, NullRenderContext};
use plotkit::series::{LineSeries, ScatterSeries};

fn viewport() -> Viewport {
    Viewport::new(800, 600)
}

fn xy_model() -> PlotModel {
    let mut model = PlotModel::new();
    model
        .add_axis(LinearAxis::new(AxisPosition::Bottom))
        .expect("x axis");
    model
        .add_axis(LinearAxis::new(AxisPosition::Left))
        .expect("y axis");
    model
}

#[test]
fn empty_model_renders_without_series() {
    let mut model = xy_model();
    let mut context = NullRenderContext::new();
    model.render(&mut context, viewport()).expect("render");

    // Axis guides still draw; the clip stack is drained.
    assert!(context.lines_drawn > 0);
    assert_eq!(context.clip_depth(), 0);
}

#[test]
fn line_series_pipeline_draws_and_fits_axes() {
    let mut model = xy_model();
    model.add_series(
        LineSeries::new().with_points(vec![
            DataPoint::new(0.0, 5.0),
            DataPoint::new(5.0, 25.0),
            DataPoint::new(10.0, 15.0),
        ]),
    );

    let mut context = NullRenderContext::new();
    model.render(&mut context, viewport()).expect("render");

    assert!(context.lines_drawn > 0);
    assert!(context.texts_drawn > 0);

    let x_id = model.axes().resolve("", true).expect("default x");
    let x_axis = model.axis(x_id);
    assert_eq!(x_axis.core().actual_minimum(), 0.0);
    assert_eq!(x_axis.core().actual_maximum(), 10.0);
}

#[test]
fn empty_data_series_is_a_no_op() {
    let mut model = xy_model();
    model.add_series(LineSeries::new());

    let mut context = NullRenderContext::new();
    model.render(&mut context, viewport()).expect("render");
    assert_eq!(context.clip_depth(), 0);
}

#[test]
fn undefined_samples_are_skipped_by_bounds_and_drawing() {
    let mut model = xy_model();
    model.add_series(LineSeries::new().with_points(vec![
        DataPoint::new(1.0, 1.0),
        DataPoint::UNDEFINED,
        DataPoint::new(3.0, 3.0),
    ]));

    let mut context = NullRenderContext::new();
    model.render(&mut context, viewport()).expect("render");

    let x_id = model.axes().resolve("", true).expect("default x");
    assert_eq!(model.axis(x_id).core().actual_minimum(), 1.0);
    assert_eq!(model.axis(x_id).core().actual_maximum(), 3.0);
}

#[test]
fn missing_axis_key_is_a_terminal_error() {
    let mut model = xy_model();
    model.add_series(
        LineSeries::new()
            .with_axis_keys("nope", "")
            .with_points(vec![DataPoint::new(0.0, 0.0), DataPoint::new(1.0, 1.0)]),
    );

    let mut context = NullRenderContext::new();
    let error = model.render(&mut context, viewport()).expect_err("missing axis");
    assert!(matches!(error, PlotError::MissingAxis { key } if key == "nope"));
}

#[test]
fn missing_default_axis_is_reported() {
    let mut model = PlotModel::new();
    model
        .add_axis(LinearAxis::new(AxisPosition::Bottom))
        .expect("x axis");
    model.add_series(LineSeries::new().with_points(vec![DataPoint::new(0.0, 0.0)]));

    let mut context = NullRenderContext::new();
    let error = model.render(&mut context, viewport()).expect_err("no y axis");
    assert!(matches!(error, PlotError::MissingAxis { .. }));
}

#[test]
fn duplicate_axis_keys_are_rejected() {
    let mut model = PlotModel::new();
    model
        .add_axis(LinearAxis::new(AxisPosition::Bottom).with_key("t"))
        .expect("first");
    let error = model
        .add_axis(LinearAxis::new(AxisPosition::Top).with_key("t"))
        .expect_err("duplicate");
    assert!(matches!(error, PlotError::InvalidData(_)));
}

#[test]
fn named_axis_keys_resolve_per_series() {
    let mut model = PlotModel::new();
    model
        .add_axis(LinearAxis::new(AxisPosition::Bottom).with_key("t"))
        .expect("x axis");
    model
        .add_axis(LinearAxis::new(AxisPosition::Left).with_key("volts"))
        .expect("y axis");
    model.add_series(
        LineSeries::new()
            .with_axis_keys("t", "volts")
            .with_points(vec![DataPoint::new(0.0, 1.0), DataPoint::new(1.0, 2.0)]),
    );

    let mut context = NullRenderContext::new();
    model.render(&mut context, viewport()).expect("render");
    assert!(context.lines_drawn > 0);
}

#[test]
fn plot_area_honors_margins() {
    let mut model = xy_model().with_margins(PlotMargins {
        left: 100.0,
        top: 50.0,
        right: 30.0,
        bottom: 60.0,
    });
    let mut context = NullRenderContext::new();
    model.render(&mut context, viewport()).expect("render");

    let area = model.plot_area();
    assert_eq!(area.left(), 100.0);
    assert_eq!(area.top(), 50.0);
    assert_eq!(area.width(), 800.0 - 100.0 - 30.0);
    assert_eq!(area.height(), 600.0 - 50.0 - 60.0);
}

#[test]
fn viewport_too_small_for_margins_is_an_error() {
    let mut model = xy_model();
    let mut context = NullRenderContext::new();
    assert!(model.render(&mut context, Viewport::new(40, 40)).is_err());
    assert!(model.render(&mut context, Viewport::new(0, 600)).is_err());
}

#[test]
fn color_mapped_scatter_draws_markers() {
    let mut model = xy_model();
    model
        .add_axis(ColorAxis::new(AxisPosition::Right).with_key("heat"))
        .expect("color axis");
    model.add_series(
        ScatterSeries::new()
            .with_color_axis_key("heat")
            .with_points_and_values(
                vec![
                    DataPoint::new(0.0, 0.0),
                    DataPoint::new(1.0, 1.0),
                    DataPoint::new(2.0, 4.0),
                ],
                vec![0.0, 5.0, 10.0],
            ),
    );

    let mut context = NullRenderContext::new();
    model.render(&mut context, viewport()).expect("render");
    assert_eq!(context.ellipses_drawn, 3);

    // The color axis tracked the value range during the update pass.
    let heat = model.axes().resolve_key("heat").expect("heat axis");
    assert_eq!(model.axis(heat).core().actual_minimum(), 0.0);
    assert_eq!(model.axis(heat).core().actual_maximum(), 10.0);
}

#[test]
fn category_axis_labels_appear_in_frame() {
    let mut model = PlotModel::new();
    model
        .add_axis(CategoryAxis::new(
            AxisPosition::Bottom,
            vec!["spring".to_owned(), "summer".to_owned(), "fall".to_owned()],
        ))
        .expect("category axis");
    model
        .add_axis(LinearAxis::new(AxisPosition::Left))
        .expect("y axis");
    model.add_series(ScatterSeries::new().with_points(vec![
        DataPoint::new(0.0, 1.0),
        DataPoint::new(1.0, 3.0),
        DataPoint::new(2.0, 2.0),
    ]));

    let mut context = FrameRenderContext::new(viewport());
    model.render(&mut context, viewport()).expect("render");
    let frame = context.into_frame();
    frame.validate().expect("valid frame");

    let labels: Vec<&str> = frame
        .commands
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    for expected in ["spring", "summer", "fall"] {
        assert!(labels.contains(&expected), "missing label {expected}");
    }
}

#[test]
fn polygon_annotation_renders_centroid_label() {
    let mut model = xy_model();
    model.add_series(LineSeries::new().with_points(vec![
        DataPoint::new(0.0, 0.0),
        DataPoint::new(10.0, 10.0),
    ]));
    model.add_annotation(
        PolygonAnnotation::new(vec![
            DataPoint::new(2.0, 2.0),
            DataPoint::new(6.0, 2.0),
            DataPoint::new(4.0, 6.0),
        ])
        .with_label("zone"),
    );

    let mut context = FrameRenderContext::new(viewport());
    model.render(&mut context, viewport()).expect("render");
    let frame = context.into_frame();

    let has_zone_label = frame.commands.iter().any(|command| {
        matches!(command, DrawCommand::Text { text, .. } if text == "zone")
    });
    assert!(has_zone_label);
}

#[test]
fn rendered_frame_is_replayable_into_another_context() {
    let mut model = xy_model().with_title("replay");
    model.add_series(LineSeries::new().with_points(vec![
        DataPoint::new(0.0, 0.0),
        DataPoint::new(1.0, 1.0),
    ]));

    let mut recorder = FrameRenderContext::new(viewport());
    model.render(&mut recorder, viewport()).expect("render");
    let frame = recorder.into_frame();
    frame.validate().expect("valid");
    assert!(frame.count_lines() > 0);
    assert!(frame.count_texts() > 0);
}
