//! Core data model: nodes, handwritten strokes, and directed edges.
//!
//! Strokes are stored relative to the owning node's origin at capture time.
//! Drawing a stroke always adds the node's *current* position, so moving a
//! node carries its handwriting along without rewriting any stroke.

use crate::geom::{Point, Rect, Size};
use crate::id::NodeId;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Which of a node's two stroke collections a stroke belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Title,
    Content,
}

/// One captured handwriting stroke. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    points: SmallVec<[Point; 32]>,
}

impl Stroke {
    /// Build a stroke from node-relative points. `None` if there are none.
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let points: SmallVec<[Point; 32]> = points.into_iter().collect();
        if points.is_empty() {
            None
        } else {
            Some(Self { points })
        }
    }

    /// The stored, node-relative points.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points in surface coordinates for a node currently at `origin`.
    pub fn absolute_points(&self, origin: Point) -> impl Iterator<Item = Point> + '_ {
        self.points.iter().map(move |p| origin + *p)
    }

    /// Bounding box of the relative points.
    pub fn bounds(&self) -> Rect {
        let Some((&first, rest)) = self.points.split_first() else {
            return Rect::default();
        };
        let (mut min, mut max) = (first, first);
        for p in rest {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Rect::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }
}

/// A positioned, fixed-size card with a title and two stroke collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    /// Top-left corner in surface coordinates.
    pub position: Point,
    pub size: Size,
    pub title: String,
    /// Hidden nodes keep their data and edges but are skipped by
    /// hit-testing and painting.
    pub visible: bool,
    /// While set, pointer gestures on the node write strokes instead of
    /// dragging or connecting.
    pub writing: bool,
    pub title_strokes: Vec<Stroke>,
    pub content_strokes: Vec<Stroke>,
}

impl Node {
    pub fn new(id: NodeId, position: Point, size: Size, title: impl Into<String>) -> Self {
        Self {
            id,
            position,
            size,
            title: title.into(),
            visible: true,
            writing: false,
            title_strokes: Vec::new(),
            content_strokes: Vec::new(),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    pub fn strokes(&self, region: Region) -> &[Stroke] {
        match region {
            Region::Title => &self.title_strokes,
            Region::Content => &self.content_strokes,
        }
    }

    pub fn has_strokes(&self) -> bool {
        !self.title_strokes.is_empty() || !self.content_strokes.is_empty()
    }
}

/// A directed connector between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
}
