//! In-progress stroke capture.

use ink_core::geom::Point;
use ink_core::model::{Region, Stroke};

/// What the captured points are for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InkTarget {
    /// Visual feedback while drawing a new node; never committed.
    Preview,
    /// A handwriting stroke for a node's title or content.
    Annotation(Region),
}

/// Accumulates one polyline while a gesture is active.
///
/// Annotation points are node-relative (the caller converts before
/// `append`); preview points are in surface coordinates.
#[derive(Debug, Clone, Default)]
pub struct StrokeRecorder {
    points: Vec<Point>,
    target: Option<InkTarget>,
}

impl StrokeRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh, empty capture.
    pub fn begin(&mut self, target: InkTarget) {
        self.points.clear();
        self.target = Some(target);
    }

    pub fn append(&mut self, p: Point) {
        if self.target.is_none() {
            log::trace!("stroke point ({}, {}) with no active capture", p.x, p.y);
            return;
        }
        self.points.push(p);
    }

    /// Hand back the captured annotation and reset.
    /// `None` for previews or when nothing was captured.
    pub fn commit(&mut self) -> Option<(Region, Stroke)> {
        let target = self.target.take();
        let points = std::mem::take(&mut self.points);
        match target? {
            InkTarget::Annotation(region) => Stroke::from_points(points).map(|s| (region, s)),
            InkTarget::Preview => None,
        }
    }

    pub fn discard(&mut self) {
        self.points.clear();
        self.target = None;
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn target(&self) -> Option<InkTarget> {
        self.target
    }

    pub fn is_active(&self) -> bool {
        self.target.is_some()
    }
}
