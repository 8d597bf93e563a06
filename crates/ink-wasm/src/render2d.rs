//! Canvas2D renderer.
//!
//! Draws the scene graph and interaction overlay to an HTML `<canvas>` via
//! `CanvasRenderingContext2d`. Geometry (icon rects, connector anchors,
//! arrow barbs) comes from `ink-render` so this matches the Vello path.

use ink_core::SceneGraph;
use ink_core::config::NodeMetrics;
use ink_core::geom::{Point, Rect};
use ink_core::model::{Node, Region, Stroke};
use ink_core::overlay::{InkKind, Overlay};
use ink_render::hit::{clear_icon_rect, pencil_icon_rect};
use ink_render::route::{ARROW_SIZE, arrow_barbs, edge_segment};
use web_sys::CanvasRenderingContext2d;

/// Horizontal inset of the fallback title text.
const TITLE_PAD: f64 = 10.0;

/// Theme-dependent colors for the canvas renderer.
pub struct CanvasTheme {
    pub bg: &'static str,
    pub node_fill: &'static str,
    pub node_border: &'static str,
    pub title_bar: &'static str,
    pub title_text: &'static str,
    pub icon: &'static str,
    pub edge: &'static str,
    pub preview_ink: &'static str,
}

impl CanvasTheme {
    /// Light theme: white cards on a paper background.
    pub fn light() -> Self {
        Self {
            bg: "#FFFFFF",
            node_fill: "#FFFFFF",
            node_border: "#999999",
            title_bar: "#FAFAFA",
            title_text: "#222222",
            icon: "#555555",
            edge: "#757575",
            preview_ink: "#333333",
        }
    }

    pub fn dark() -> Self {
        Self {
            bg: "#1C1C1E",
            node_fill: "#2C2C2E",
            node_border: "#636366",
            title_bar: "#3A3A3C",
            title_text: "#F2F2F7",
            icon: "#AEAEB2",
            edge: "#8E8E93",
            preview_ink: "#E5E5EA",
        }
    }
}

const TITLE_INK: &str = "#E53935";
const CONTENT_INK: &str = "#6A1B9A";
const WRITING_BORDER: &str = "#E53935";
const SELECTION: &str = "#4FC3F7";

/// Render one frame.
pub fn render_scene(
    ctx: &CanvasRenderingContext2d,
    graph: &SceneGraph,
    overlay: &Overlay,
    metrics: &NodeMetrics,
    canvas_width: f64,
    canvas_height: f64,
    theme: &CanvasTheme,
) {
    ctx.set_fill_style_str(theme.bg);
    ctx.fill_rect(0.0, 0.0, canvas_width, canvas_height);

    draw_edges(ctx, graph, theme);

    for node in graph.nodes().filter(|n| n.visible) {
        draw_node(ctx, node, metrics, theme);
        if overlay.selected == Some(node.id) {
            draw_selection(ctx, node.bounds());
        }
    }

    if let Some((from, to)) = overlay.connector {
        draw_connector_preview(ctx, from, to);
    }

    if let Some(ink) = &overlay.ink
        && let Some(stroke) = Stroke::from_points(ink.points.iter().copied())
    {
        let (color, width) = match ink.kind {
            InkKind::NewNode => (theme.preview_ink, 4.0),
            InkKind::Annotation(region) => (ink_color(region), 2.0),
        };
        draw_stroke(ctx, &stroke, Point::ZERO, color, width);
    }
}

fn draw_node(ctx: &CanvasRenderingContext2d, node: &Node, m: &NodeMetrics, theme: &CanvasTheme) {
    let (x, y, w, h) = xywh(node.bounds());

    ctx.set_fill_style_str(theme.node_fill);
    ctx.fill_rect(x, y, w, h);

    ctx.set_fill_style_str(theme.title_bar);
    ctx.fill_rect(x, y, w, f64::from(m.title_band));

    ctx.set_stroke_style_str(if node.writing {
        WRITING_BORDER
    } else {
        theme.node_border
    });
    ctx.set_line_width(1.0);
    ctx.stroke_rect(x, y, w, h);

    draw_icons(ctx, node, m, theme);

    // Handwritten titles replace the typed one.
    if node.title_strokes.is_empty() && !node.title.is_empty() {
        ctx.set_fill_style_str(theme.title_text);
        ctx.set_font("bold 16px sans-serif");
        ctx.set_text_align("left");
        ctx.set_text_baseline("alphabetic");
        let _ = ctx.fill_text(&node.title, x + TITLE_PAD, y + f64::from(m.title_band) - 8.0);
    }

    for region in [Region::Title, Region::Content] {
        for stroke in node.strokes(region) {
            draw_stroke(ctx, stroke, node.position, ink_color(region), 2.0);
        }
    }
}

fn draw_icons(ctx: &CanvasRenderingContext2d, node: &Node, m: &NodeMetrics, theme: &CanvasTheme) {
    ctx.save();
    ctx.set_stroke_style_str(theme.icon);
    ctx.set_line_width(1.5);
    ctx.set_line_cap("round");

    // Pencil: diagonal shaft with a nib tick.
    let (px, py, pw, ph) = xywh(pencil_icon_rect(node, m));
    ctx.begin_path();
    ctx.move_to(px, py);
    ctx.line_to(px + pw, py + ph);
    ctx.move_to(px + pw - 6.0, py + ph);
    ctx.line_to(px + pw, py + ph - 6.0);
    ctx.stroke();

    // Clear: a cross.
    let (cx, cy, cw, ch) = xywh(clear_icon_rect(node, m));
    ctx.begin_path();
    ctx.move_to(cx, cy);
    ctx.line_to(cx + cw, cy + ch);
    ctx.move_to(cx + cw, cy);
    ctx.line_to(cx, cy + ch);
    ctx.stroke();

    ctx.restore();
}

fn draw_stroke(
    ctx: &CanvasRenderingContext2d,
    stroke: &Stroke,
    origin: Point,
    color: &str,
    width: f64,
) {
    let mut points = stroke.absolute_points(origin);
    let Some(first) = points.next() else {
        return;
    };
    ctx.save();
    if stroke.len() == 1 {
        ctx.set_fill_style_str(color);
        ctx.begin_path();
        let _ = ctx.arc(
            f64::from(first.x),
            f64::from(first.y),
            width / 2.0,
            0.0,
            std::f64::consts::TAU,
        );
        ctx.fill();
        ctx.restore();
        return;
    }
    ctx.set_stroke_style_str(color);
    ctx.set_line_width(width);
    ctx.set_line_cap("round");
    ctx.set_line_join("round");
    ctx.begin_path();
    ctx.move_to(f64::from(first.x), f64::from(first.y));
    for p in points {
        ctx.line_to(f64::from(p.x), f64::from(p.y));
    }
    ctx.stroke();
    ctx.restore();
}

fn draw_edges(ctx: &CanvasRenderingContext2d, graph: &SceneGraph, theme: &CanvasTheme) {
    for edge in graph.edges() {
        let Some((from, to)) = edge_segment(graph, &edge) else {
            continue;
        };
        ctx.save();
        ctx.set_stroke_style_str(theme.edge);
        ctx.set_line_width(1.5);
        draw_arrow(ctx, from, to, theme.edge);
        ctx.restore();
    }
}

fn draw_connector_preview(ctx: &CanvasRenderingContext2d, from: Point, to: Point) {
    ctx.save();
    ctx.set_stroke_style_str(SELECTION);
    ctx.set_line_width(1.5);
    let _ = ctx.set_line_dash(&js_sys::Array::of2(
        &wasm_bindgen::JsValue::from_f64(6.0),
        &wasm_bindgen::JsValue::from_f64(4.0),
    ));
    draw_arrow(ctx, from, to, SELECTION);
    ctx.restore();
}

/// Shaft plus a filled head at `to`. Caller sets the stroke style.
fn draw_arrow(ctx: &CanvasRenderingContext2d, from: Point, to: Point, color: &str) {
    ctx.begin_path();
    ctx.move_to(f64::from(from.x), f64::from(from.y));
    ctx.line_to(f64::from(to.x), f64::from(to.y));
    ctx.stroke();

    let (left, right) = arrow_barbs(from, to, ARROW_SIZE);
    ctx.set_fill_style_str(color);
    ctx.begin_path();
    ctx.move_to(f64::from(to.x), f64::from(to.y));
    ctx.line_to(f64::from(left.x), f64::from(left.y));
    ctx.line_to(f64::from(right.x), f64::from(right.y));
    ctx.close_path();
    ctx.fill();
}

fn draw_selection(ctx: &CanvasRenderingContext2d, b: Rect) {
    let (x, y, w, h) = xywh(b);
    ctx.save();
    ctx.set_stroke_style_str(SELECTION);
    ctx.set_line_width(2.0);
    ctx.stroke_rect(x - 2.0, y - 2.0, w + 4.0, h + 4.0);
    ctx.restore();
}

// ─── Helpers ─────────────────────────────────────────────────────────────

fn ink_color(region: Region) -> &'static str {
    match region {
        Region::Title => TITLE_INK,
        Region::Content => CONTENT_INK,
    }
}

fn xywh(r: Rect) -> (f64, f64, f64, f64) {
    (
        f64::from(r.x),
        f64::from(r.y),
        f64::from(r.width),
        f64::from(r.height),
    )
}
