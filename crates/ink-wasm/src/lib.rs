//! WASM bridge for Inkmap: exposes the editor engine to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The host forwards pointer
//! and key events (with pointer capture held from down to up) and calls
//! `render` whenever a handler reports a redraw.

mod render2d;

use ink_core::config::EditorConfig;
use ink_core::geom::Point;
use ink_core::id::NodeId;
use ink_core::model::{Edge, Node};
use ink_core::overlay::Overlay;
use ink_editor::{EditorEngine, EventReport, GestureState, InputEvent};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

/// The main WASM-facing canvas controller.
#[wasm_bindgen]
pub struct InkCanvas {
    engine: EditorEngine,
    width: f64,
    height: f64,
    /// Dark mode flag: `false` = light (default), `true` = dark.
    dark_mode: bool,
}

#[wasm_bindgen]
impl InkCanvas {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64) -> Self {
        console_error_panic_hook_setup();
        Self {
            engine: EditorEngine::default(),
            width,
            height,
            dark_mode: false,
        }
    }

    /// Replace the editor configuration from JSON. Missing fields take
    /// their defaults. Returns `false` (and keeps the old config) on a
    /// parse or validation error.
    pub fn set_config(&mut self, json: &str) -> bool {
        let config = match serde_json::from_str::<EditorConfig>(json) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("rejected config: {e}");
                return false;
            }
        };
        match self.engine.set_config(config) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("rejected config: {e}");
                false
            }
        }
    }

    pub fn get_config(&self) -> String {
        serde_json::to_string(self.engine.config()).unwrap_or_default()
    }

    /// Render the scene to a Canvas2D context.
    pub fn render(&self, ctx: &CanvasRenderingContext2d) {
        let theme = if self.dark_mode {
            render2d::CanvasTheme::dark()
        } else {
            render2d::CanvasTheme::light()
        };
        let snapshot = self.engine.snapshot();
        render2d::render_scene(
            ctx,
            snapshot.graph,
            &snapshot.overlay,
            &self.engine.config().metrics,
            self.width,
            self.height,
            &theme,
        );
    }

    /// Switch between light and dark theme.
    pub fn set_theme(&mut self, is_dark: bool) {
        self.dark_mode = is_dark;
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    // ─── Pointer & keyboard ──────────────────────────────────────────────

    /// Handle pointer down. Returns true if the host should repaint.
    pub fn handle_pointer_down(&mut self, x: f32, y: f32) -> bool {
        self.engine
            .handle(&InputEvent::from_pointer_down(x, y))
            .redraw
    }

    /// Handle pointer move. Returns true if the host should repaint.
    pub fn handle_pointer_move(&mut self, x: f32, y: f32) -> bool {
        self.engine
            .handle(&InputEvent::from_pointer_move(x, y))
            .redraw
    }

    /// Handle pointer up; `time_ms` should come from `performance.now()`.
    /// Returns a JSON string:
    /// `{"changed":bool, "redraw":bool, "status":"<text>"|null}`
    pub fn handle_pointer_up(&mut self, x: f32, y: f32, time_ms: f64) -> String {
        let report = self
            .engine
            .handle(&InputEvent::from_pointer_up(x, y, time_ms));
        report_json(&report)
    }

    /// Handle a `KeyboardEvent.key`. Returns the same JSON shape as
    /// `handle_pointer_up`.
    pub fn handle_key(&mut self, key: &str) -> String {
        let report = self.engine.handle(&InputEvent::from_key(key));
        report_json(&report)
    }

    // ─── Graph access ────────────────────────────────────────────────────

    /// Create an untitled-or-titled node. Returns its numeric id.
    pub fn add_node(&mut self, x: f32, y: f32, title: &str) -> f64 {
        self.engine.add_node(Point::new(x, y), title).raw() as f64
    }

    /// Currently selected node id, or empty string if none.
    pub fn get_selected_id(&self) -> String {
        self.engine
            .selected()
            .map(|id| id.raw().to_string())
            .unwrap_or_default()
    }

    /// Name of the current gesture state, for host cursors.
    pub fn get_gesture_state(&self) -> String {
        gesture_state_name(self.engine.state()).to_string()
    }

    /// Nodes, edges, and overlay as JSON.
    pub fn snapshot_json(&self) -> String {
        let snapshot = self.engine.snapshot();
        let doc = SnapshotDoc {
            nodes: snapshot.graph.nodes().collect(),
            edges: snapshot.graph.edges(),
            overlay: &snapshot.overlay,
            state: gesture_state_name(self.engine.state()),
        };
        match serde_json::to_string(&doc) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("snapshot serialization failed: {e}");
                String::new()
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.engine.graph.node_count()
    }

    pub fn has_node(&self, id: f64) -> bool {
        self.engine.graph.contains(NodeId::from_raw(id as u64))
    }
}

#[derive(Serialize)]
struct SnapshotDoc<'a> {
    nodes: Vec<&'a Node>,
    edges: Vec<Edge>,
    overlay: &'a Overlay,
    state: &'static str,
}

fn report_json(report: &EventReport) -> String {
    let status = match report.status {
        Some(s) => serde_json::to_string(&s.to_string()).unwrap_or_else(|_| "null".to_string()),
        None => "null".to_string(),
    };
    format!(
        r#"{{"changed":{},"redraw":{},"status":{status}}}"#,
        report.changed, report.redraw
    )
}

fn gesture_state_name(state: GestureState) -> &'static str {
    match state {
        GestureState::Idle => "idle",
        GestureState::DrawingNewNode => "drawing",
        GestureState::WritingStroke { .. } => "writing",
        GestureState::MaybeDragging { .. } => "pressing",
        GestureState::Dragging { .. } => "dragging",
    }
}

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Inkmap WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
