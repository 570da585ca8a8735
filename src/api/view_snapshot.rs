use serde::{Deserialize, Serialize};

use crate::core::{Axis, DomainPoint, PixelPoint, TicKind, Viewport};
use crate::error::{GraphError, GraphResult};

use super::{GraphReadout, ZoomToggle};

pub const GRAPH_VIEW_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Axis state captured for regression tests and debugging tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSnapshot {
    pub min: f64,
    pub max: f64,
    pub length: u32,
    /// `None` when the scale is infinite (equal extents).
    pub px_per_unit: Option<f64>,
    pub major_inc: f64,
    pub minor_inc: f64,
    pub major_tic_labels: Vec<String>,
    pub major_tic_coordinates: Vec<f64>,
}

impl AxisSnapshot {
    #[must_use]
    pub fn capture(axis: &Axis) -> Self {
        Self {
            min: axis.min(),
            max: axis.max(),
            length: axis.length(),
            px_per_unit: Some(axis.px_per_unit()).filter(|scale| scale.is_finite()),
            major_inc: axis.major_inc(),
            minor_inc: axis.minor_inc(),
            major_tic_labels: axis.tic_marks(TicKind::Major),
            major_tic_coordinates: axis.tic_coordinates(TicKind::Major),
        }
    }
}

/// Serializable deterministic state of a [`GraphView`](super::GraphView).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphViewSnapshot {
    pub viewport: Viewport,
    pub x_axis: AxisSnapshot,
    pub y_axis: AxisSnapshot,
    pub marker: DomainPoint,
    pub marker_pixel: Option<PixelPoint>,
    pub readout: GraphReadout,
    pub zoom_toggle: ZoomToggle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphViewSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: GraphViewSnapshot,
}

impl GraphViewSnapshot {
    pub fn to_json_pretty(&self) -> GraphResult<String> {
        let payload = GraphViewSnapshotJsonContractV1 {
            schema_version: GRAPH_VIEW_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            GraphError::InvalidData(format!("failed to serialize graph view snapshot: {e}"))
        })
    }

    /// Parses either a versioned payload or a bare snapshot.
    pub fn from_json_str(input: &str) -> GraphResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<Self>(input) {
            return Ok(snapshot);
        }
        let payload: GraphViewSnapshotJsonContractV1 =
            serde_json::from_str(input).map_err(|e| {
                GraphError::InvalidData(format!("failed to parse graph view snapshot: {e}"))
            })?;
        if payload.schema_version != GRAPH_VIEW_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(GraphError::InvalidData(format!(
                "unsupported graph view snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}
