pub mod axis;
pub mod primitives;
pub mod shared_axis;
pub mod tics;
pub mod types;

pub use axis::{Axis, AxisConfig, ExtentObserver, ObserverId};
pub use shared_axis::SharedAxis;
pub use types::{DomainPoint, ExtentChange, PixelPoint, TicKind, Viewport, ZoomDirection};
