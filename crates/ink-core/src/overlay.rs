//! Transient, per-frame visual state that is not part of the graph.

use crate::geom::Point;
use crate::id::NodeId;
use crate::model::Region;
use serde::Serialize;

/// What the in-progress ink will become when the pointer is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InkKind {
    /// Feedback while drawing on empty surface; discarded on release.
    NewNode,
    /// A handwriting stroke headed for a node's title or content.
    Annotation(Region),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InkPreview {
    pub kind: InkKind,
    /// Surface coordinates.
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Overlay {
    pub ink: Option<InkPreview>,
    /// Connector preview from the dragged node's center to the pointer.
    pub connector: Option<(Point, Point)>,
    pub selected: Option<NodeId>,
}
