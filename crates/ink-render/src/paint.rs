//! Scene graph → Vello drawing commands.
//!
//! Paints connectors first, then every visible node bottom-to-top, then
//! the transient overlay (in-progress ink, connector preview).

use crate::hit::{clear_icon_rect, pencil_icon_rect};
use crate::route::{ARROW_SIZE, arrow_barbs, edge_segment};
use ink_core::SceneGraph;
use ink_core::config::NodeMetrics;
use ink_core::geom::{Point as InkPoint, Rect as InkRect};
use ink_core::model::{Node, Region, Stroke};
use ink_core::overlay::{InkKind, Overlay};
use kurbo::{Affine, BezPath, Cap, Circle, Join, Line, Point, Rect, Stroke as KurboStroke};
use peniko::{Color, Fill};
use vello::Scene;

const NODE_FILL: Color = Color::from_rgb8(0xFF, 0xFF, 0xFF);
const NODE_BORDER: Color = Color::from_rgb8(0x99, 0x99, 0x99);
const TITLE_BAR: Color = Color::from_rgb8(0xFA, 0xFA, 0xFA);
const WRITING_BORDER: Color = Color::from_rgb8(0xE5, 0x39, 0x35);
const ICON: Color = Color::from_rgb8(0x55, 0x55, 0x55);
const TITLE_INK: Color = Color::from_rgb8(0xE5, 0x39, 0x35);
const CONTENT_INK: Color = Color::from_rgb8(0x6A, 0x1B, 0x9A);
const PREVIEW_INK: Color = Color::from_rgb8(0x33, 0x33, 0x33);
const EDGE: Color = Color::from_rgb8(0x75, 0x75, 0x75);
const SELECTION: Color = Color::from_rgb8(0x4F, 0xC3, 0xF7);

/// Paint one frame into a freshly-cleared `Scene`.
///
/// The caller presents the scene via wgpu.
pub fn paint_scene(scene: &mut Scene, graph: &SceneGraph, overlay: &Overlay, m: &NodeMetrics) {
    for edge in graph.edges() {
        if let Some((from, to)) = edge_segment(graph, &edge) {
            paint_arrow(scene, from, to, EDGE);
        }
    }

    for node in graph.nodes().filter(|n| n.visible) {
        paint_node(scene, node, m, overlay.selected == Some(node.id));
    }

    if let Some((from, to)) = overlay.connector {
        paint_arrow(scene, from, to, SELECTION);
    }

    if let Some(ink) = &overlay.ink
        && let Some(stroke) = Stroke::from_points(ink.points.iter().copied())
    {
        let (color, width) = match ink.kind {
            InkKind::NewNode => (PREVIEW_INK, 4.0),
            InkKind::Annotation(region) => (ink_color(region), 2.0),
        };
        paint_stroke(scene, &stroke, InkPoint::ZERO, color, width);
    }
}

fn paint_node(scene: &mut Scene, node: &Node, m: &NodeMetrics, selected: bool) {
    let body = to_kurbo(node.bounds());
    scene.fill(Fill::NonZero, Affine::IDENTITY, NODE_FILL, None, &body);

    let title_bar = Rect::new(
        body.x0,
        body.y0,
        body.x1,
        body.y0 + f64::from(m.title_band),
    );
    scene.fill(Fill::NonZero, Affine::IDENTITY, TITLE_BAR, None, &title_bar);

    let border = if node.writing { WRITING_BORDER } else { NODE_BORDER };
    scene.stroke(&KurboStroke::new(1.0), Affine::IDENTITY, border, None, &body);

    paint_pencil_icon(scene, pencil_icon_rect(node, m));
    paint_clear_icon(scene, clear_icon_rect(node, m));

    if node.title_strokes.is_empty() && !node.title.is_empty() {
        log::trace!("TITLE {} {:?} at ({}, {})", node.id, node.title, body.x0, body.y0);
        // Text shaping requires a font context; the Canvas2D host draws titles.
    }

    for region in [Region::Title, Region::Content] {
        for stroke in node.strokes(region) {
            paint_stroke(scene, stroke, node.position, ink_color(region), 2.0);
        }
    }

    if selected {
        let halo = body.inflate(2.0, 2.0).to_rounded_rect(3.0);
        scene.stroke(&KurboStroke::new(2.0), Affine::IDENTITY, SELECTION, None, &halo);
    }
}

// ─── Glyphs ──────────────────────────────────────────────────────────────────

fn paint_pencil_icon(scene: &mut Scene, r: InkRect) {
    let r = to_kurbo(r);
    let style = icon_stroke();
    // Shaft from top-left to bottom-right, with a short nib tick.
    scene.stroke(&style, Affine::IDENTITY, ICON, None, &Line::new((r.x0, r.y0), (r.x1, r.y1)));
    scene.stroke(
        &style,
        Affine::IDENTITY,
        ICON,
        None,
        &Line::new((r.x1 - 6.0, r.y1), (r.x1, r.y1 - 6.0)),
    );
}

fn paint_clear_icon(scene: &mut Scene, r: InkRect) {
    let r = to_kurbo(r);
    let style = icon_stroke();
    scene.stroke(&style, Affine::IDENTITY, ICON, None, &Line::new((r.x0, r.y0), (r.x1, r.y1)));
    scene.stroke(&style, Affine::IDENTITY, ICON, None, &Line::new((r.x1, r.y0), (r.x0, r.y1)));
}

fn icon_stroke() -> KurboStroke {
    KurboStroke::new(1.5).with_caps(Cap::Round)
}

// ─── Ink & connectors ────────────────────────────────────────────────────────

/// Convert a node-relative stroke to a path at the node's current `origin`.
pub fn stroke_path(stroke: &Stroke, origin: InkPoint) -> BezPath {
    let mut path = BezPath::new();
    let mut points = stroke.absolute_points(origin).map(to_kurbo_point);
    if let Some(first) = points.next() {
        path.move_to(first);
        for p in points {
            path.line_to(p);
        }
    }
    path
}

fn paint_stroke(scene: &mut Scene, stroke: &Stroke, origin: InkPoint, color: Color, width: f64) {
    if stroke.len() == 1 {
        // A tap with no movement: a dot, since a zero-length line paints nothing.
        let center = to_kurbo_point(origin + stroke.points()[0]);
        scene.fill(Fill::NonZero, Affine::IDENTITY, color, None, &Circle::new(center, width / 2.0));
        return;
    }
    let style = KurboStroke::new(width)
        .with_caps(Cap::Round)
        .with_join(Join::Round);
    scene.stroke(&style, Affine::IDENTITY, color, None, &stroke_path(stroke, origin));
}

fn paint_arrow(scene: &mut Scene, from: InkPoint, to: InkPoint, color: Color) {
    let (left, right) = arrow_barbs(from, to, ARROW_SIZE);
    let mut path = BezPath::new();
    path.move_to(to_kurbo_point(from));
    path.line_to(to_kurbo_point(to));
    path.move_to(to_kurbo_point(left));
    path.line_to(to_kurbo_point(to));
    path.line_to(to_kurbo_point(right));
    let style = KurboStroke::new(1.5).with_caps(Cap::Round);
    scene.stroke(&style, Affine::IDENTITY, color, None, &path);
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn ink_color(region: Region) -> Color {
    match region {
        Region::Title => TITLE_INK,
        Region::Content => CONTENT_INK,
    }
}

fn to_kurbo(r: InkRect) -> Rect {
    Rect::new(
        f64::from(r.x),
        f64::from(r.y),
        f64::from(r.x + r.width),
        f64::from(r.y + r.height),
    )
}

fn to_kurbo_point(p: InkPoint) -> Point {
    Point::new(f64::from(p.x), f64::from(p.y))
}
