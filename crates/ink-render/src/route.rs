//! Connector geometry shared by the Vello and Canvas2D painters.

use ink_core::SceneGraph;
use ink_core::geom::Point;
use ink_core::model::Edge;

/// Length of an arrow head's sides in surface units.
pub const ARROW_SIZE: f32 = 10.0;

/// Border-to-border segment for an edge, `None` if either endpoint is
/// missing or hidden.
pub fn edge_segment(graph: &SceneGraph, edge: &Edge) -> Option<(Point, Point)> {
    let source = graph.get(edge.source).filter(|n| n.visible)?;
    let target = graph.get(edge.target).filter(|n| n.visible)?;
    let (sb, tb) = (source.bounds(), target.bounds());
    Some((sb.anchor_toward(tb.center()), tb.anchor_toward(sb.center())))
}

/// The two barb endpoints of an arrow head pointing at `tip` from `from`.
pub fn arrow_barbs(from: Point, tip: Point, size: f32) -> (Point, Point) {
    let d = tip - from;
    let len = d.length();
    if len == 0.0 {
        return (tip, tip);
    }
    let (ux, uy) = (d.x / len, d.y / len);
    // 30° either side of the shaft.
    let (sin, cos) = (0.5_f32, 0.866_025_4_f32);
    let left = Point::new(
        tip.x - size * (ux * cos - uy * sin),
        tip.y - size * (uy * cos + ux * sin),
    );
    let right = Point::new(
        tip.x - size * (ux * cos + uy * sin),
        tip.y - size * (uy * cos - ux * sin),
    );
    (left, right)
}
