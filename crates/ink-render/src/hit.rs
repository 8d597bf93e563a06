//! Hit testing: point → node, and point → region within a node.
//!
//! Node lookup walks the z-order front-to-back (topmost wins); region
//! classification is purely geometric and stateless.

use ink_core::SceneGraph;
use ink_core::config::NodeMetrics;
use ink_core::geom::{Point, Rect};
use ink_core::id::NodeId;
use ink_core::model::{Node, Region};

/// Sub-region of a node under a point. Icons win over the bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitRegion {
    PencilIcon,
    ClearIcon,
    TitleBand,
    ContentBand,
}

/// Result of resolving a surface point against the whole graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Empty,
    Node { id: NodeId, region: HitRegion },
}

/// The writing-mode toggle, anchored at the node's top-right corner.
pub fn pencil_icon_rect(node: &Node, m: &NodeMetrics) -> Rect {
    let b = node.bounds();
    Rect::new(
        b.x + b.width - m.icon_size - m.icon_inset,
        b.y + m.icon_inset,
        m.icon_size,
        m.icon_size,
    )
}

/// The clear-strokes icon, anchored at the node's bottom-right corner.
pub fn clear_icon_rect(node: &Node, m: &NodeMetrics) -> Rect {
    let b = node.bounds();
    Rect::new(
        b.x + b.width - m.icon_size - m.icon_inset,
        b.y + b.height - m.icon_size - m.icon_inset,
        m.icon_size,
        m.icon_size,
    )
}

/// Classify `p` against a single node. `None` when `p` is outside it.
pub fn classify(node: &Node, p: Point, m: &NodeMetrics) -> Option<HitRegion> {
    if !node.bounds().contains(p) {
        return None;
    }
    if pencil_icon_rect(node, m).contains(p) {
        return Some(HitRegion::PencilIcon);
    }
    if clear_icon_rect(node, m).contains(p) {
        return Some(HitRegion::ClearIcon);
    }
    if p.y - node.position.y < m.title_band {
        Some(HitRegion::TitleBand)
    } else {
        Some(HitRegion::ContentBand)
    }
}

/// Find the topmost visible node at `p` and the region hit inside it.
pub fn hit_test(graph: &SceneGraph, p: Point, m: &NodeMetrics) -> Hit {
    let Some(id) = graph.node_at(p) else {
        return Hit::Empty;
    };
    match graph.get(id).and_then(|node| classify(node, p, m)) {
        Some(region) => Hit::Node { id, region },
        None => Hit::Empty,
    }
}

/// Stroke collection a write gesture starting at `p` should feed.
///
/// Uses the title band plus a tolerance margin, so a stroke begun just
/// under the title bar still lands in the title.
pub fn stroke_region(node: &Node, p: Point, m: &NodeMetrics) -> Region {
    if p.y - node.position.y < m.title_band + m.title_tolerance {
        Region::Title
    } else {
        Region::Content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ink_core::geom::Size;
    use pretty_assertions::assert_eq;

    fn node_at(x: f32, y: f32) -> Node {
        Node::new(NodeId::from_raw(1), Point::new(x, y), Size::new(180.0, 120.0), "")
    }

    #[test]
    fn icon_rects_are_inset_from_corners() {
        let m = NodeMetrics::default();
        let n = node_at(100.0, 100.0);
        assert_eq!(pencil_icon_rect(&n, &m), Rect::new(252.0, 108.0, 20.0, 20.0));
        assert_eq!(clear_icon_rect(&n, &m), Rect::new(252.0, 192.0, 20.0, 20.0));
    }

    #[test]
    fn classify_regions() {
        let m = NodeMetrics::default();
        let n = node_at(100.0, 100.0);
        assert_eq!(classify(&n, Point::new(260.0, 115.0), &m), Some(HitRegion::PencilIcon));
        assert_eq!(classify(&n, Point::new(260.0, 200.0), &m), Some(HitRegion::ClearIcon));
        assert_eq!(classify(&n, Point::new(120.0, 110.0), &m), Some(HitRegion::TitleBand));
        assert_eq!(classify(&n, Point::new(120.0, 130.0), &m), Some(HitRegion::ContentBand));
        assert_eq!(classify(&n, Point::new(50.0, 50.0), &m), None);
    }

    #[test]
    fn icon_beats_band() {
        let m = NodeMetrics::default();
        let n = node_at(0.0, 0.0);
        // Inside the title band *and* the pencil icon.
        let p = Point::new(165.0, 10.0);
        assert!(p.y < m.title_band);
        assert_eq!(classify(&n, p, &m), Some(HitRegion::PencilIcon));
    }

    #[test]
    fn stroke_region_uses_tolerance() {
        let m = NodeMetrics::default();
        let n = node_at(100.0, 100.0);
        assert_eq!(stroke_region(&n, Point::new(120.0, 120.0), &m), Region::Title);
        // Below the title bar (30) but within the tolerance (+10).
        assert_eq!(stroke_region(&n, Point::new(120.0, 135.0), &m), Region::Title);
        assert_eq!(stroke_region(&n, Point::new(120.0, 140.0), &m), Region::Content);
    }

    #[test]
    fn hit_test_graph() {
        let m = NodeMetrics::default();
        let mut g = SceneGraph::new();
        let id = g.create_node(Point::new(100.0, 100.0), "");
        assert_eq!(
            hit_test(&g, Point::new(120.0, 180.0), &m),
            Hit::Node {
                id,
                region: HitRegion::ContentBand
            }
        );
        assert_eq!(hit_test(&g, Point::new(10.0, 10.0), &m), Hit::Empty);

        g.set_visible(id, false);
        assert_eq!(hit_test(&g, Point::new(120.0, 180.0), &m), Hit::Empty);
    }
}
