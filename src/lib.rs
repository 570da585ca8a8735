//! graph-marker: linear graph axes and a draggable marker synchronized to them.
//!
//! An [`Axis`](core::Axis) maps a domain range onto a pixel span and derives
//! tic marks for drawing a ruler. A [`Marker`](marker::Marker) keeps a point in
//! domain coordinates, places a circle on a [`Surface`](render::Surface) and
//! reports drags back in domain coordinates. [`GraphView`](api::GraphView)
//! wires both together for a host.
//!
//! Everything is single-threaded: shared state uses `Rc<RefCell<_>>`.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod marker;
pub mod render;
pub mod telemetry;

pub use api::{GraphView, GraphViewConfig};
pub use error::{GraphError, GraphResult};
