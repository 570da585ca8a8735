//! Host-facing graph view built from two axes and a marker.

mod graph_view;
mod ruler;
mod view_config;
mod view_snapshot;

pub use graph_view::{GraphReadout, GraphView, ZoomToggle};
pub use ruler::{RulerOrientation, RulerStyle, build_ruler_frame};
pub use view_config::{GraphBounds, GraphViewConfig};
pub use view_snapshot::{
    AxisSnapshot, GRAPH_VIEW_SNAPSHOT_JSON_SCHEMA_V1, GraphViewSnapshot,
    GraphViewSnapshotJsonContractV1,
};
