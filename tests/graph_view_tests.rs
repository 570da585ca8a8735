use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_relative_eq;
use graph_marker::api::{
    GraphBounds, GraphReadout, GraphViewSnapshot, RulerOrientation, ZoomToggle,
};
use graph_marker::core::{AxisConfig, PixelPoint, Viewport};
use graph_marker::interaction::PressMoveEvent;
use graph_marker::render::{HeadlessSurface, NullRenderer, SharedSurface};
use graph_marker::{GraphError, GraphView, GraphViewConfig};

fn surface(width: u32, height: u32) -> SharedSurface<HeadlessSurface> {
    Rc::new(RefCell::new(HeadlessSurface::new(Viewport::new(width, height))))
}

fn default_view() -> GraphView<HeadlessSurface> {
    GraphView::new(surface(500, 400), GraphViewConfig::default()).expect("graph view")
}

#[test]
fn view_starts_with_centered_marker_and_bound_readout() {
    let view = default_view();

    assert_eq!(view.x_axis().length(), 500);
    assert_eq!(view.y_axis().length(), 400);
    assert_eq!(view.marker().pixel_position(), Some(PixelPoint::new(250.0, 200.0)));
    assert_eq!(
        view.readout(),
        GraphReadout {
            marker_x: "0.00".to_owned(),
            marker_y: "0.00".to_owned(),
            top: "4".to_owned(),
            left: "-5".to_owned(),
            bottom: "-4".to_owned(),
            right: "5".to_owned(),
        }
    );
    assert_eq!(view.zoom_toggle(), ZoomToggle::Out);
}

#[test]
fn drag_updates_marker_readout() {
    let view = default_view();

    assert!(view.press_move(PressMoveEvent::new(300.0, 150.0)));

    let readout = view.readout();
    assert_eq!(readout.marker_x, "1.00");
    assert_eq!(readout.marker_y, "1.00");
    assert_eq!(view.marker().x(), 1.0);
}

#[test]
fn readout_rounds_exact_ties_away_from_zero() {
    let view = default_view();

    view.press_move(PressMoveEvent::new(256.25, 206.25));

    let readout = view.readout();
    assert_eq!(readout.marker_x, "0.13");
    assert_eq!(readout.marker_y, "-0.13");
}

#[test]
fn toggle_zoom_alternates_between_base_and_widened_bounds() {
    let mut view = default_view();
    view.press_move(PressMoveEvent::new(300.0, 150.0));

    view.toggle_zoom();
    assert_eq!(view.zoom_toggle(), ZoomToggle::In);
    assert_eq!(view.bounds(), GraphBounds::new(-10.0, 10.0, -8.0, 8.0));
    let readout = view.readout();
    assert_eq!(readout.top, "8");
    assert_eq!(readout.left, "-10");
    assert_eq!(readout.marker_x, "1.00");
    let pixel = view.marker().pixel_position().expect("marker pixel");
    assert_relative_eq!(pixel.x, 275.0);
    assert_relative_eq!(pixel.y, 175.0);

    view.toggle_zoom();
    assert_eq!(view.zoom_toggle(), ZoomToggle::Out);
    assert_eq!(view.bounds(), GraphBounds::new(-5.0, 5.0, -4.0, 4.0));
    assert_eq!(view.marker().pixel_position(), Some(PixelPoint::new(300.0, 150.0)));
}

#[test]
fn set_bounds_resyncs_marker_and_readout() {
    let mut view = default_view();

    view.set_bounds(GraphBounds::new(0.0, 10.0, 0.0, 8.0));

    assert_eq!(view.readout().bottom, "0");
    assert_eq!(view.readout().right, "10");
    assert_eq!(view.marker().pixel_position(), Some(PixelPoint::new(0.0, 400.0)));
}

#[test]
fn configured_axis_length_overrides_viewport() {
    let config = GraphViewConfig::default()
        .with_x_axis(
            AxisConfig::new(-5.0, 5.0)
                .with_length_px(300.0)
                .with_tic_increments(1.0, 0.5),
        );
    let view = GraphView::new(surface(500, 400), config).expect("graph view");

    assert_eq!(view.x_axis().length(), 300);
    let pixel = view.marker().pixel_position().expect("marker pixel");
    assert_relative_eq!(pixel.x, 150.0);
}

#[test]
fn empty_viewport_is_rejected() {
    let result = GraphView::new(surface(0, 400), GraphViewConfig::default());
    assert_eq!(
        result.err(),
        Some(GraphError::InvalidViewport {
            width: 0,
            height: 400
        })
    );
}

#[test]
fn rulers_render_tics_and_labels() {
    let view = default_view();
    let mut renderer = NullRenderer::default();

    view.render_ruler(&mut renderer, RulerOrientation::Horizontal)
        .expect("horizontal ruler");
    assert_eq!(renderer.last_line_count, 1 + 21 + 11);
    assert_eq!(renderer.last_text_count, 11);

    view.render_ruler(&mut renderer, RulerOrientation::Vertical)
        .expect("vertical ruler");
    assert_eq!(renderer.last_line_count, 1 + 17 + 9);
    assert_eq!(renderer.last_text_count, 9);
    assert_eq!(renderer.frames_rendered, 2);

    let frame = view
        .ruler_frame(RulerOrientation::Horizontal)
        .expect("horizontal ruler");
    let labels: Vec<_> = frame.texts.iter().map(|text| text.text.as_str()).collect();
    assert_eq!(labels.first().copied(), Some("-5"));
    assert_eq!(labels.last().copied(), Some("5"));
    assert_relative_eq!(frame.texts[5].x, 250.0);
}

#[test]
fn snapshot_json_round_trips() {
    let mut view = default_view();
    view.press_move(PressMoveEvent::new(300.0, 150.0));
    view.toggle_zoom();

    let snapshot = view.snapshot();
    assert_eq!(snapshot.marker_pixel, Some(PixelPoint::new(275.0, 175.0)));
    assert_eq!(snapshot.x_axis.major_tic_labels.len(), 21);

    let json = snapshot.to_json_pretty().expect("serialize snapshot");
    assert!(json.contains("\"schema_version\": 1"));
    let parsed = GraphViewSnapshot::from_json_str(&json).expect("parse snapshot");
    assert_eq!(parsed, snapshot);

    let bare = serde_json::to_string(&snapshot).expect("bare snapshot");
    assert_eq!(
        GraphViewSnapshot::from_json_str(&bare).expect("parse bare snapshot"),
        snapshot
    );
}

#[test]
fn snapshot_with_equal_extents_round_trips() {
    let mut view = default_view();
    view.set_bounds(GraphBounds::new(2.0, 2.0, -4.0, 4.0));

    let snapshot = view.snapshot();
    assert_eq!(snapshot.x_axis.px_per_unit, None);
    assert_eq!(snapshot.y_axis.px_per_unit, Some(50.0));
    assert_eq!(snapshot.x_axis.major_tic_labels, vec!["2"]);
    assert!(snapshot.x_axis.major_tic_coordinates.is_empty());

    let json = snapshot.to_json_pretty().expect("serialize snapshot");
    let parsed = GraphViewSnapshot::from_json_str(&json).expect("parse snapshot");
    assert_eq!(parsed, snapshot);
}

#[test]
fn snapshot_rejects_unknown_schema_version() {
    let view = default_view();
    let json = view
        .snapshot()
        .to_json_pretty()
        .expect("serialize snapshot")
        .replace("\"schema_version\": 1", "\"schema_version\": 9");

    assert!(matches!(
        GraphViewSnapshot::from_json_str(&json),
        Err(GraphError::InvalidData(_))
    ));
}

#[test]
fn config_json_fills_defaults_and_validates() {
    let parsed = GraphViewConfig::from_json_str("{}").expect("empty config");
    assert_eq!(parsed, GraphViewConfig::default());

    let json = GraphViewConfig::default()
        .with_zoom_factor(3.0)
        .to_json_pretty()
        .expect("serialize config");
    let round_trip = GraphViewConfig::from_json_str(&json).expect("parse config");
    assert_eq!(round_trip.zoom_factor, 3.0);

    assert!(GraphViewConfig::from_json_str(r#"{"zoom_factor": 0.5}"#).is_err());
    assert!(GraphViewConfig::default().with_zoom_factor(0.5).validate().is_err());
}
