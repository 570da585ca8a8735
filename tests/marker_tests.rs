use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_relative_eq;
use graph_marker::GraphError;
use graph_marker::core::{AxisConfig, PixelPoint, SharedAxis, Viewport, ZoomDirection};
use graph_marker::interaction::PressMoveEvent;
use graph_marker::marker::{Marker, MarkerConfig};
use graph_marker::render::{
    HeadlessSurface, SharedSurface, Surface, dispatch_press_move,
};

struct Fixture {
    surface: SharedSurface<HeadlessSurface>,
    x_axis: SharedAxis,
    y_axis: SharedAxis,
}

impl Fixture {
    fn new() -> Self {
        Self {
            surface: Rc::new(RefCell::new(HeadlessSurface::new(Viewport::new(500, 400)))),
            x_axis: SharedAxis::from_config(AxisConfig::new(-5.0, 5.0).with_length_px(500.0)),
            y_axis: SharedAxis::from_config(AxisConfig::new(-4.0, 4.0).with_length_px(400.0)),
        }
    }

    fn marker(&self) -> Marker<HeadlessSurface> {
        let mut marker = Marker::new();
        marker
            .try_create(
                Some(Rc::clone(&self.surface)),
                Some(self.x_axis.clone()),
                Some(self.y_axis.clone()),
                MarkerConfig::new(500.0, 400.0),
            )
            .expect("marker create");
        marker
    }

    fn drag(&self, marker: &Marker<HeadlessSurface>, x: f64, y: f64) -> usize {
        let shape = marker.shape_id().expect("marker shape");
        dispatch_press_move(&self.surface, shape, PressMoveEvent::new(x, y))
    }
}

#[test]
fn create_attaches_shape_and_listener() {
    let fixture = Fixture::new();
    let marker = fixture.marker();

    let shape = marker.shape_id().expect("marker shape");
    let surface = fixture.surface.borrow();
    assert_eq!(surface.shape_count(), 1);
    assert_eq!(surface.listener_count(shape), 1);
    assert_eq!(surface.update_count(), 1);
    let circle = surface.circle(shape).expect("marker circle");
    assert_relative_eq!(circle.radius_px, 10.0);
    assert!(fixture.x_axis.has_extent_observer());
    assert!(fixture.y_axis.has_extent_observer());
}

#[test]
fn set_coordinates_map_to_pixels() {
    let fixture = Fixture::new();
    let mut marker = fixture.marker();

    marker.set_x(0.0);
    marker.set_y(0.0);

    let pixel = marker.pixel_position().expect("marker pixel");
    assert_relative_eq!(pixel.x, 250.0);
    assert_relative_eq!(pixel.y, 200.0);
    assert_eq!(marker.x(), 0.0);
    assert_eq!(marker.y(), 0.0);

    marker.set_x(2.0);
    marker.set_y(3.0);
    assert_eq!(marker.pixel_position(), Some(PixelPoint::new(350.0, 50.0)));
    assert_eq!(fixture.surface.borrow().update_count(), 5);
}

#[test]
fn drag_reports_domain_position_to_each_subscriber_once() {
    let fixture = Fixture::new();
    let mut marker = fixture.marker();
    let seen = Rc::new(RefCell::new(Vec::new()));
    for tag in ["first", "second"] {
        let sink = Rc::clone(&seen);
        marker.add_subscriber(move |x, y| sink.borrow_mut().push((tag, x, y)));
    }
    let updates_before = fixture.surface.borrow().update_count();

    assert_eq!(fixture.drag(&marker, 300.0, 150.0), 1);

    assert_eq!(marker.x(), 1.0);
    assert_eq!(marker.y(), 1.0);
    assert_eq!(marker.pixel_position(), Some(PixelPoint::new(300.0, 150.0)));
    assert_eq!(*seen.borrow(), vec![("first", 1.0, 1.0), ("second", 1.0, 1.0)]);
    assert_eq!(fixture.surface.borrow().update_count(), updates_before + 1);
}

#[test]
fn duplicate_subscribers_are_called_twice() {
    let fixture = Fixture::new();
    let mut marker = fixture.marker();
    let hits = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&hits);
    let subscriber = move |_: f64, _: f64| *counter.borrow_mut() += 1;
    marker.add_subscriber(subscriber.clone());
    marker.add_subscriber(subscriber);

    fixture.drag(&marker, 10.0, 10.0);

    assert_eq!(marker.subscriber_count(), 2);
    assert_eq!(*hits.borrow(), 2);
}

#[test]
fn drag_is_not_clamped_to_axis_bounds() {
    let fixture = Fixture::new();
    let marker = fixture.marker();

    fixture.drag(&marker, 600.0, -50.0);

    assert_relative_eq!(marker.x(), 7.0);
    assert_relative_eq!(marker.y(), 5.0);
}

#[test]
fn non_finite_drag_is_dropped() {
    let fixture = Fixture::new();
    let mut marker = fixture.marker();
    let hits = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&hits);
    marker.add_subscriber(move |_, _| *counter.borrow_mut() += 1);
    fixture.drag(&marker, 300.0, 150.0);
    let updates_before = fixture.surface.borrow().update_count();

    fixture.drag(&marker, f64::NAN, 10.0);
    fixture.drag(&marker, 10.0, f64::INFINITY);

    assert_eq!(marker.x(), 1.0);
    assert_eq!(marker.y(), 1.0);
    assert_eq!(marker.pixel_position(), Some(PixelPoint::new(300.0, 150.0)));
    assert_eq!(*hits.borrow(), 1);
    assert_eq!(fixture.surface.borrow().update_count(), updates_before);

    fixture.x_axis.set_min(-10.0);
    fixture.x_axis.set_max(10.0);
    let pixel = marker.pixel_position().expect("marker pixel");
    assert_relative_eq!(pixel.x, 275.0);
}

#[test]
fn marker_keeps_domain_point_when_extents_change() {
    let fixture = Fixture::new();
    let mut marker = fixture.marker();
    marker.set_x(1.0);
    marker.set_y(1.0);

    fixture.x_axis.set_min(-10.0);
    fixture.x_axis.set_max(10.0);
    fixture.y_axis.zoom(ZoomDirection::Out, 2.0);

    assert_eq!(marker.x(), 1.0);
    assert_eq!(marker.y(), 1.0);
    let pixel = marker.pixel_position().expect("marker pixel");
    assert_relative_eq!(pixel.x, 275.0);
    assert_relative_eq!(pixel.y, 175.0);
}

#[test]
fn subscriber_may_change_axes_during_drag() {
    let fixture = Fixture::new();
    let mut marker = fixture.marker();
    let x_axis = fixture.x_axis.clone();
    marker.add_subscriber(move |_, _| x_axis.zoom(ZoomDirection::Out, 2.0));

    fixture.drag(&marker, 300.0, 150.0);

    assert_eq!(marker.x(), 1.0);
    assert_relative_eq!(fixture.x_axis.min(), -10.0);
    assert_relative_eq!(fixture.x_axis.max(), 10.0);
    let pixel = marker.pixel_position().expect("marker pixel");
    assert_relative_eq!(pixel.x, 275.0);
    assert_relative_eq!(pixel.y, 150.0);
}

#[test]
fn missing_collaborator_leaves_marker_inert() {
    let fixture = Fixture::new();
    let mut marker: Marker<HeadlessSurface> = Marker::new();

    marker.create(
        Some(Rc::clone(&fixture.surface)),
        None,
        Some(fixture.y_axis.clone()),
        MarkerConfig::new(500.0, 400.0),
    );
    marker.set_x(3.0);

    assert!(!marker.is_created());
    assert_eq!(marker.x(), 0.0);
    assert_eq!(marker.shape_id(), None);
    assert_eq!(marker.pixel_position(), None);
    assert_eq!(fixture.surface.borrow().shape_count(), 0);
    assert!(!fixture.y_axis.has_extent_observer());
}

#[test]
fn try_create_names_the_missing_collaborator() {
    let fixture = Fixture::new();
    let mut marker: Marker<HeadlessSurface> = Marker::new();

    let missing_surface = marker.try_create(
        None,
        Some(fixture.x_axis.clone()),
        Some(fixture.y_axis.clone()),
        MarkerConfig::new(500.0, 400.0),
    );
    assert_eq!(missing_surface, Err(GraphError::MissingCollaborator("surface")));

    let missing_y = marker.try_create(
        Some(Rc::clone(&fixture.surface)),
        Some(fixture.x_axis.clone()),
        None,
        MarkerConfig::new(500.0, 400.0),
    );
    assert_eq!(missing_y, Err(GraphError::MissingCollaborator("y axis")));
}

#[test]
fn axis_lengths_below_one_pixel_are_rejected() {
    let fixture = Fixture::new();
    let mut marker: Marker<HeadlessSurface> = Marker::new();

    let result = marker.try_create(
        Some(Rc::clone(&fixture.surface)),
        Some(fixture.x_axis.clone()),
        Some(fixture.y_axis.clone()),
        MarkerConfig::new(500.0, 0.5),
    );

    assert_eq!(
        result,
        Err(GraphError::InvalidAxisLength {
            axis: "y",
            length: 0.5
        })
    );
    assert_eq!(fixture.surface.borrow().shape_count(), 0);
}

#[test]
fn second_create_is_rejected() {
    let fixture = Fixture::new();
    let mut marker = fixture.marker();

    let result = marker.try_create(
        Some(Rc::clone(&fixture.surface)),
        Some(fixture.x_axis.clone()),
        Some(fixture.y_axis.clone()),
        MarkerConfig::new(500.0, 400.0),
    );

    assert_eq!(result, Err(GraphError::AlreadyCreated));
    assert_eq!(fixture.surface.borrow().shape_count(), 1);
}

#[test]
fn non_finite_coordinates_are_ignored() {
    let fixture = Fixture::new();
    let mut marker = fixture.marker();
    marker.set_x(1.0);

    marker.set_x(f64::NAN);
    marker.set_y(f64::INFINITY);

    assert_eq!(marker.x(), 1.0);
    assert_eq!(marker.y(), 0.0);
}

#[test]
fn degenerate_axis_stores_value_but_keeps_pixel() {
    let fixture = Fixture::new();
    let mut marker = fixture.marker();
    marker.set_x(1.0);
    fixture.x_axis.set_max(-5.0);

    marker.set_x(2.0);

    assert_eq!(marker.x(), 2.0);
    let pixel = marker.pixel_position().expect("marker pixel");
    assert_relative_eq!(pixel.x, 300.0);
}

#[test]
fn dropping_marker_detaches_everything() {
    let fixture = Fixture::new();
    let marker = fixture.marker();
    let shape = marker.shape_id().expect("marker shape");

    marker.remove();

    assert!(!fixture.x_axis.has_extent_observer());
    assert!(!fixture.y_axis.has_extent_observer());
    assert_eq!(fixture.surface.borrow().shape_count(), 0);
    assert_eq!(
        dispatch_press_move(&fixture.surface, shape, PressMoveEvent::new(1.0, 1.0)),
        0
    );
    assert!(fixture.surface.borrow().shape_position(shape).is_none());
}

#[test]
fn teardown_keeps_newer_axis_observer() {
    let fixture = Fixture::new();
    let marker = fixture.marker();
    fixture.x_axis.set_extent_observer(|_, _| {});

    drop(marker);

    assert!(fixture.x_axis.has_extent_observer());
    assert!(!fixture.y_axis.has_extent_observer());
}

#[test]
fn replaced_observer_stops_marker_resync() {
    let fixture = Fixture::new();
    let mut marker = fixture.marker();
    marker.set_x(1.0);
    fixture.x_axis.set_extent_observer(|_, _| {});

    fixture.x_axis.set_min(-10.0);

    let pixel = marker.pixel_position().expect("marker pixel");
    assert_relative_eq!(pixel.x, 300.0);
}
