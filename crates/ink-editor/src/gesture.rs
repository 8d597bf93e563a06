//! Gesture classification: raw pointer/keyboard events → editing intents.
//!
//! There are no tools or modes to pick. A pointer-down is resolved from its
//! initial hit-test alone; the following moves and the release (with its
//! timestamp) finish the decision:
//!
//! | Pointer-down on…           | State            | Release does…                         |
//! |----------------------------|------------------|---------------------------------------|
//! | pencil icon                | `Idle`           | nothing (writing toggled on down)     |
//! | clear icon                 | `Idle`           | nothing (strokes cleared on down)     |
//! | node in writing mode       | `WritingStroke`  | commit the stroke                     |
//! | node                       | `MaybeDragging`  | select, or toggle on double-tap       |
//! | node, moved past threshold | `Dragging`       | move, plus connect if dropped on one  |
//! | empty surface              | `DrawingNewNode` | create a node at the release point    |
//!
//! The machine only reads the graph. It returns `GraphMutation`s that the
//! engine applies before the next event is handled.

use crate::engine::GraphMutation;
use crate::input::InputEvent;
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::stroke::{InkTarget, StrokeRecorder};
use ink_core::SceneGraph;
use ink_core::config::{GestureConfig, NodeMetrics};
use ink_core::geom::Point;
use ink_core::id::NodeId;
use ink_core::model::Region;
use ink_core::overlay::{InkKind, InkPreview, Overlay};
use ink_render::hit::{Hit, HitRegion, hit_test, stroke_region};
use std::fmt;

/// Where the current gesture stands. Every pointer-up returns to `Idle`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum GestureState {
    #[default]
    Idle,
    DrawingNewNode,
    WritingStroke {
        node: NodeId,
        region: Region,
    },
    /// Pressed on a node; not yet past the drag threshold.
    MaybeDragging {
        node: NodeId,
        origin: Point,
    },
    Dragging {
        node: NodeId,
    },
}

impl GestureState {
    /// The node the gesture is acting on, if any.
    pub fn node(&self) -> Option<NodeId> {
        match *self {
            Self::WritingStroke { node, .. }
            | Self::MaybeDragging { node, .. }
            | Self::Dragging { node } => Some(node),
            Self::Idle | Self::DrawingNewNode => None,
        }
    }
}

/// What the last event did, for a host status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    WritingOn,
    WritingOff,
    StrokesCleared,
    Drawing,
    Writing(Region),
    NodeCreated,
    StrokeSaved,
    NodeSelected,
    NodeMoved,
    NodeConnected,
    NodeCollapsed,
    NodeExpanded,
    NodeDeleted,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Status::WritingOn => "Writing…",
            Status::WritingOff => "Handwriting OFF",
            Status::StrokesCleared => "Strokes cleared",
            Status::Drawing => "Drawing…",
            Status::Writing(Region::Title) => "Writing title",
            Status::Writing(Region::Content) => "Writing details",
            Status::NodeCreated => "Node created",
            Status::StrokeSaved => "Handwriting saved",
            Status::NodeSelected => "Node selected",
            Status::NodeMoved => "Node moved",
            Status::NodeConnected => "Nodes connected",
            Status::NodeCollapsed => "Node collapsed",
            Status::NodeExpanded => "Node expanded",
            Status::NodeDeleted => "Node deleted",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct TapRecord {
    node: NodeId,
    time_ms: f64,
}

/// Everything the machine remembers between events.
///
/// Per-gesture fields (`state`, `recorder`, `drag_offset`) reset on every
/// pointer-up. `selected` and the last tap outlive the gesture: the first
/// feeds keyboard delete, the second double-tap detection.
#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    pub state: GestureState,
    pub recorder: StrokeRecorder,
    /// Pointer position minus the dragged node's position at press time.
    pub drag_offset: Point,
    pub selected: Option<NodeId>,
    /// Latest pointer position, for the connector preview.
    pub pointer: Point,
    last_tap: Option<TapRecord>,
}

pub struct GestureMachine {
    interaction: InteractionState,
    metrics: NodeMetrics,
    config: GestureConfig,
    status: Option<Status>,
}

impl Default for GestureMachine {
    fn default() -> Self {
        Self::new(NodeMetrics::default(), GestureConfig::default())
    }
}

impl GestureMachine {
    pub fn new(metrics: NodeMetrics, config: GestureConfig) -> Self {
        Self {
            interaction: InteractionState::default(),
            metrics,
            config,
            status: None,
        }
    }

    pub fn reconfigure(&mut self, metrics: NodeMetrics, config: GestureConfig) {
        self.metrics = metrics;
        self.config = config;
    }

    pub fn state(&self) -> GestureState {
        self.interaction.state
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.interaction.selected
    }

    /// Status of the most recent event, `None` if it did nothing.
    pub fn status(&self) -> Option<Status> {
        self.status
    }

    /// Handle one event, returning the mutations it implies.
    pub fn handle(&mut self, event: &InputEvent, graph: &SceneGraph) -> Vec<GraphMutation> {
        self.status = None;
        let finite_time = match event {
            InputEvent::PointerUp { time_ms, .. } => time_ms.is_finite(),
            _ => true,
        };
        if let Some((x, y)) = event.position()
            && !(x.is_finite() && y.is_finite() && finite_time)
        {
            log::trace!("dropped {event:?}: non-finite input");
            return vec![];
        }
        match event {
            InputEvent::PointerDown { x, y } => self.pointer_down(Point::new(*x, *y), graph),
            InputEvent::PointerMove { x, y } => self.pointer_move(Point::new(*x, *y), graph),
            InputEvent::PointerUp { x, y, time_ms } => {
                self.pointer_up(Point::new(*x, *y), *time_ms, graph)
            }
            InputEvent::Key { key } => self.key(key),
        }
    }

    // ─── Pointer down ────────────────────────────────────────────────────

    fn pointer_down(&mut self, p: Point, graph: &SceneGraph) -> Vec<GraphMutation> {
        let ix = &mut self.interaction;
        if ix.state != GestureState::Idle {
            // A gesture owns the stream until its pointer-up.
            log::debug!("pointer-down ignored during {:?}", ix.state);
            return vec![];
        }
        ix.pointer = p;
        ix.selected = None;

        let (id, region) = match hit_test(graph, p, &self.metrics) {
            Hit::Node { id, region } => (id, region),
            Hit::Empty => {
                ix.last_tap = None;
                ix.recorder.begin(InkTarget::Preview);
                ix.recorder.append(p);
                ix.state = GestureState::DrawingNewNode;
                self.status = Some(Status::Drawing);
                log::debug!("gesture: draw new node from ({}, {})", p.x, p.y);
                return vec![];
            }
        };
        let Some(node) = graph.get(id) else {
            return vec![];
        };

        match region {
            HitRegion::PencilIcon => {
                ix.last_tap = None;
                let writing = !node.writing;
                self.status = Some(if writing {
                    Status::WritingOn
                } else {
                    Status::WritingOff
                });
                log::debug!("gesture: writing {writing} on {id}");
                vec![GraphMutation::SetWriting { id, writing }]
            }
            HitRegion::ClearIcon => {
                ix.last_tap = None;
                self.status = Some(Status::StrokesCleared);
                log::debug!("gesture: clear strokes on {id}");
                vec![GraphMutation::ClearStrokes { id }]
            }
            HitRegion::TitleBand | HitRegion::ContentBand if node.writing => {
                ix.last_tap = None;
                let region = stroke_region(node, p, &self.metrics);
                ix.recorder.begin(InkTarget::Annotation(region));
                ix.recorder.append(p - node.position);
                ix.state = GestureState::WritingStroke { node: id, region };
                self.status = Some(Status::Writing(region));
                log::debug!("gesture: write {region:?} on {id}");
                vec![]
            }
            HitRegion::TitleBand | HitRegion::ContentBand => {
                ix.drag_offset = p - node.position;
                ix.state = GestureState::MaybeDragging { node: id, origin: p };
                ix.selected = Some(id);
                self.status = Some(Status::NodeSelected);
                log::debug!("gesture: press on {id}");
                vec![]
            }
        }
    }

    // ─── Pointer move ────────────────────────────────────────────────────

    fn pointer_move(&mut self, p: Point, graph: &SceneGraph) -> Vec<GraphMutation> {
        let ix = &mut self.interaction;
        ix.pointer = p;
        match ix.state {
            GestureState::Idle => vec![],
            GestureState::DrawingNewNode => {
                ix.recorder.append(p);
                vec![]
            }
            GestureState::WritingStroke { node, .. } => {
                if let Some(n) = graph.get(node) {
                    ix.recorder.append(p - n.position);
                }
                vec![]
            }
            GestureState::MaybeDragging { node, origin } => {
                if p.distance(origin) <= self.config.drag_threshold {
                    return vec![];
                }
                log::debug!("gesture: drag {node}");
                ix.state = GestureState::Dragging { node };
                vec![GraphMutation::MoveNode {
                    id: node,
                    position: p - ix.drag_offset,
                }]
            }
            GestureState::Dragging { node } => {
                log::trace!("drag {node} to ({}, {})", p.x, p.y);
                vec![GraphMutation::MoveNode {
                    id: node,
                    position: p - ix.drag_offset,
                }]
            }
        }
    }

    // ─── Pointer up ──────────────────────────────────────────────────────

    fn pointer_up(&mut self, p: Point, time_ms: f64, graph: &SceneGraph) -> Vec<GraphMutation> {
        self.interaction.pointer = p;
        let state = std::mem::take(&mut self.interaction.state);
        let mutations = match state {
            GestureState::Idle => vec![],
            GestureState::DrawingNewNode => {
                self.interaction.last_tap = None;
                self.status = Some(Status::NodeCreated);
                vec![GraphMutation::CreateNode {
                    position: p,
                    title: String::new(),
                }]
            }
            GestureState::WritingStroke { node, .. } => {
                self.interaction.last_tap = None;
                match self.interaction.recorder.commit() {
                    Some((region, stroke)) => {
                        self.status = Some(Status::StrokeSaved);
                        vec![GraphMutation::AppendStroke {
                            id: node,
                            region,
                            stroke,
                        }]
                    }
                    None => vec![],
                }
            }
            GestureState::MaybeDragging { node, .. } => self.finish_tap(node, p, time_ms, graph),
            GestureState::Dragging { node } => self.finish_drag(node, p, graph),
        };
        self.reset_gesture();
        mutations
    }

    /// A press on a node that never crossed the drag threshold. Counts as a
    /// tap only when released inside the node.
    fn finish_tap(
        &mut self,
        node: NodeId,
        p: Point,
        time_ms: f64,
        graph: &SceneGraph,
    ) -> Vec<GraphMutation> {
        let ix = &mut self.interaction;
        self.status = Some(Status::NodeSelected);
        if !graph.get(node).is_some_and(|n| n.bounds().contains(p)) {
            ix.last_tap = None;
            return vec![];
        }
        let is_double = ix.last_tap.is_some_and(|prev| {
            let dt = time_ms - prev.time_ms;
            prev.node == node && dt >= 0.0 && dt < self.config.double_tap_ms
        });
        if !is_double {
            ix.last_tap = Some(TapRecord { node, time_ms });
            return vec![];
        }

        // The pair is consumed; a third tap starts over.
        ix.last_tap = None;
        ix.selected = None;
        let visible = !graph.get(node).is_some_and(|n| n.visible);
        self.status = Some(if visible {
            Status::NodeExpanded
        } else {
            Status::NodeCollapsed
        });
        log::debug!("gesture: double-tap {node}, visible = {visible}");
        vec![GraphMutation::SetVisible { id: node, visible }]
    }

    /// Release of a drag: final move, then connect if dropped on a node.
    fn finish_drag(&mut self, node: NodeId, p: Point, graph: &SceneGraph) -> Vec<GraphMutation> {
        self.interaction.last_tap = None;
        let mut mutations = vec![GraphMutation::MoveNode {
            id: node,
            position: p - self.interaction.drag_offset,
        }];
        match graph.node_at_excluding(p, node) {
            Some(target) => {
                log::debug!("gesture: connect {node} -> {target}");
                self.status = Some(Status::NodeConnected);
                mutations.push(GraphMutation::CreateEdge {
                    source: node,
                    target,
                });
            }
            None if self.config.drop_spawns_node => {
                log::debug!("gesture: spawn connected node from {node}");
                self.status = Some(Status::NodeConnected);
                mutations.push(GraphMutation::SpawnConnected {
                    source: node,
                    position: p,
                });
            }
            None => self.status = Some(Status::NodeMoved),
        }
        mutations
    }

    fn reset_gesture(&mut self) {
        let ix = &mut self.interaction;
        ix.state = GestureState::Idle;
        ix.recorder.discard();
        ix.drag_offset = Point::ZERO;
    }

    // ─── Keyboard ────────────────────────────────────────────────────────

    fn key(&mut self, key: &str) -> Vec<GraphMutation> {
        match ShortcutMap::resolve(key) {
            Some(ShortcutAction::DeleteSelection) => {
                let Some(id) = self.interaction.selected.take() else {
                    return vec![];
                };
                if self.interaction.state.node() == Some(id) {
                    // The gesture's subject is going away; drop the gesture.
                    self.reset_gesture();
                }
                if self.interaction.last_tap.is_some_and(|t| t.node == id) {
                    self.interaction.last_tap = None;
                }
                self.status = Some(Status::NodeDeleted);
                vec![GraphMutation::DeleteNode { id }]
            }
            None => vec![],
        }
    }

    // ─── Frame overlay ───────────────────────────────────────────────────

    /// Transient visuals for the current frame.
    pub fn overlay(&self, graph: &SceneGraph) -> Overlay {
        let ix = &self.interaction;
        let ink = match (ix.recorder.target(), ix.state) {
            (Some(InkTarget::Preview), _) => Some(InkPreview {
                kind: InkKind::NewNode,
                points: ix.recorder.points().to_vec(),
            }),
            (Some(InkTarget::Annotation(region)), GestureState::WritingStroke { node, .. }) => {
                graph.get(node).map(|n| InkPreview {
                    kind: InkKind::Annotation(region),
                    points: ix.recorder.points().iter().map(|p| n.position + *p).collect(),
                })
            }
            _ => None,
        };
        let connector = match ix.state {
            GestureState::Dragging { node } => graph
                .get(node)
                .map(|n| (n.bounds().center(), ix.pointer)),
            _ => None,
        };
        Overlay {
            ink,
            connector,
            selected: ix.selected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ink_core::model::Stroke;

    fn down(x: f32, y: f32) -> InputEvent {
        InputEvent::from_pointer_down(x, y)
    }

    fn mv(x: f32, y: f32) -> InputEvent {
        InputEvent::from_pointer_move(x, y)
    }

    fn up(x: f32, y: f32, t: f64) -> InputEvent {
        InputEvent::from_pointer_up(x, y, t)
    }

    #[test]
    fn press_on_empty_draws_then_creates() {
        let g = SceneGraph::new();
        let mut m = GestureMachine::default();

        assert!(m.handle(&down(50.0, 50.0), &g).is_empty());
        assert_eq!(m.state(), GestureState::DrawingNewNode);
        m.handle(&mv(100.0, 50.0), &g);

        let overlay = m.overlay(&g);
        let ink = overlay.ink.unwrap();
        assert_eq!(ink.kind, InkKind::NewNode);
        assert_eq!(ink.points.len(), 2);

        let muts = m.handle(&up(150.0, 50.0, 0.0), &g);
        match muts.as_slice() {
            [GraphMutation::CreateNode { position, title }] => {
                assert_eq!(*position, Point::new(150.0, 50.0));
                assert!(title.is_empty());
            }
            other => panic!("expected CreateNode, got {other:?}"),
        }
        assert_eq!(m.state(), GestureState::Idle);
        assert!(m.overlay(&g).ink.is_none());
        assert_eq!(m.status(), Some(Status::NodeCreated));
    }

    #[test]
    fn pencil_icon_toggles_writing_and_stays_idle() {
        let mut g = SceneGraph::new();
        let id = g.create_node(Point::new(100.0, 100.0), "");
        let mut m = GestureMachine::default();

        let muts = m.handle(&down(262.0, 118.0), &g);
        assert!(matches!(
            muts.as_slice(),
            [GraphMutation::SetWriting { id: got, writing: true }] if *got == id
        ));
        assert_eq!(m.state(), GestureState::Idle);
        assert_eq!(m.status(), Some(Status::WritingOn));

        // Release does nothing further.
        assert!(m.handle(&up(262.0, 118.0, 10.0), &g).is_empty());

        g.set_writing(id, true);
        let muts = m.handle(&down(262.0, 118.0), &g);
        assert!(matches!(
            muts.as_slice(),
            [GraphMutation::SetWriting { writing: false, .. }]
        ));
        assert_eq!(m.status(), Some(Status::WritingOff));
    }

    #[test]
    fn clear_icon_clears() {
        let mut g = SceneGraph::new();
        let id = g.create_node(Point::new(0.0, 0.0), "");
        g.set_writing(id, true);
        let mut m = GestureMachine::default();
        // Clear icon wins even in writing mode.
        let muts = m.handle(&down(162.0, 102.0), &g);
        assert!(matches!(
            muts.as_slice(),
            [GraphMutation::ClearStrokes { id: got }] if *got == id
        ));
        assert_eq!(m.state(), GestureState::Idle);
    }

    #[test]
    fn writing_records_relative_points() {
        let mut g = SceneGraph::new();
        let id = g.create_node(Point::new(100.0, 100.0), "");
        g.set_writing(id, true);
        let mut m = GestureMachine::default();

        m.handle(&down(120.0, 180.0), &g);
        assert_eq!(
            m.state(),
            GestureState::WritingStroke {
                node: id,
                region: Region::Content
            }
        );
        m.handle(&mv(130.0, 185.0), &g);

        let ink = m.overlay(&g).ink.unwrap();
        assert_eq!(ink.kind, InkKind::Annotation(Region::Content));
        assert_eq!(ink.points[1], Point::new(130.0, 185.0));

        let muts = m.handle(&up(130.0, 185.0, 0.0), &g);
        let expected =
            Stroke::from_points([Point::new(20.0, 80.0), Point::new(30.0, 85.0)]).unwrap();
        match muts.as_slice() {
            [GraphMutation::AppendStroke { id: got, region, stroke }] => {
                assert_eq!(*got, id);
                assert_eq!(*region, Region::Content);
                assert_eq!(*stroke, expected);
            }
            other => panic!("expected AppendStroke, got {other:?}"),
        }
    }

    #[test]
    fn tap_while_writing_commits_single_point() {
        let mut g = SceneGraph::new();
        let id = g.create_node(Point::new(0.0, 0.0), "");
        g.set_writing(id, true);
        let mut m = GestureMachine::default();
        m.handle(&down(10.0, 10.0), &g);
        let muts = m.handle(&up(10.0, 10.0, 0.0), &g);
        match muts.as_slice() {
            [GraphMutation::AppendStroke { region, stroke, .. }] => {
                assert_eq!(*region, Region::Title);
                assert_eq!(stroke.len(), 1);
            }
            other => panic!("expected AppendStroke, got {other:?}"),
        }
    }

    #[test]
    fn small_jitter_stays_a_click() {
        let mut g = SceneGraph::new();
        let id = g.create_node(Point::new(0.0, 0.0), "");
        let mut m = GestureMachine::default();

        m.handle(&down(50.0, 50.0), &g);
        assert!(m.handle(&mv(53.0, 54.0), &g).is_empty(), "distance 5 is not past 5");
        assert!(matches!(m.state(), GestureState::MaybeDragging { .. }));
        assert!(m.handle(&up(53.0, 54.0, 0.0), &g).is_empty());
        assert_eq!(m.selected(), Some(id));
    }

    #[test]
    fn crossing_threshold_moves_live() {
        let mut g = SceneGraph::new();
        let id = g.create_node(Point::new(0.0, 0.0), "");
        let mut m = GestureMachine::default();

        m.handle(&down(40.0, 50.0), &g);
        let muts = m.handle(&mv(50.0, 50.0), &g);
        assert_eq!(m.state(), GestureState::Dragging { node: id });
        assert!(matches!(
            muts.as_slice(),
            [GraphMutation::MoveNode { position, .. }] if *position == Point::new(10.0, 0.0)
        ));
        let overlay = m.overlay(&g);
        assert_eq!(overlay.connector.map(|(_, to)| to), Some(Point::new(50.0, 50.0)));
        assert_eq!(overlay.selected, Some(id));
    }

    #[test]
    fn drop_on_empty_only_moves() {
        let mut g = SceneGraph::new();
        let id = g.create_node(Point::new(0.0, 0.0), "");
        let mut m = GestureMachine::default();
        m.handle(&down(40.0, 50.0), &g);
        m.handle(&mv(400.0, 400.0), &g);
        let muts = m.handle(&up(400.0, 400.0, 0.0), &g);
        assert!(matches!(
            muts.as_slice(),
            [GraphMutation::MoveNode { id: got, .. }] if *got == id
        ));
        assert_eq!(m.status(), Some(Status::NodeMoved));
    }

    #[test]
    fn drop_spawn_is_opt_in() {
        let mut g = SceneGraph::new();
        let id = g.create_node(Point::new(0.0, 0.0), "");
        let config = GestureConfig {
            drop_spawns_node: true,
            ..GestureConfig::default()
        };
        let mut m = GestureMachine::new(NodeMetrics::default(), config);
        m.handle(&down(40.0, 50.0), &g);
        m.handle(&mv(400.0, 400.0), &g);
        let muts = m.handle(&up(400.0, 400.0, 0.0), &g);
        assert!(matches!(
            muts.as_slice(),
            [
                GraphMutation::MoveNode { .. },
                GraphMutation::SpawnConnected { source, .. }
            ] if *source == id
        ));
    }

    #[test]
    fn second_pointer_down_is_ignored_mid_gesture() {
        let mut g = SceneGraph::new();
        let id = g.create_node(Point::new(0.0, 0.0), "");
        let mut m = GestureMachine::default();
        m.handle(&down(500.0, 500.0), &g);
        assert!(m.handle(&down(262.0 - 100.0, 18.0), &g).is_empty());
        assert_eq!(m.state(), GestureState::DrawingNewNode);
        assert!(!g.get(id).unwrap().writing);
    }

    #[test]
    fn delete_without_selection_is_noop() {
        let g = SceneGraph::new();
        let mut m = GestureMachine::default();
        assert!(m.handle(&InputEvent::from_key("Delete"), &g).is_empty());
        assert_eq!(m.status(), None);
    }

    #[test]
    fn delete_mid_drag_abandons_gesture() {
        let mut g = SceneGraph::new();
        let id = g.create_node(Point::new(0.0, 0.0), "");
        let mut m = GestureMachine::default();
        m.handle(&down(40.0, 50.0), &g);
        m.handle(&mv(100.0, 100.0), &g);
        let muts = m.handle(&InputEvent::from_key("Backspace"), &g);
        assert!(matches!(
            muts.as_slice(),
            [GraphMutation::DeleteNode { id: got }] if *got == id
        ));
        assert_eq!(m.state(), GestureState::Idle);
        assert!(m.handle(&up(100.0, 100.0, 0.0), &g).is_empty());
    }

    #[test]
    fn every_pointer_down_clears_selection() {
        let mut g = SceneGraph::new();
        g.create_node(Point::new(0.0, 0.0), "");
        let mut m = GestureMachine::default();
        m.handle(&down(40.0, 50.0), &g);
        m.handle(&up(40.0, 50.0, 0.0), &g);
        assert!(m.selected().is_some());

        m.handle(&down(600.0, 600.0), &g);
        assert_eq!(m.selected(), None);
    }

    #[test]
    fn status_text() {
        assert_eq!(Status::WritingOn.to_string(), "Writing…");
        assert_eq!(Status::Writing(Region::Content).to_string(), "Writing details");
        assert_eq!(Status::NodeCollapsed.to_string(), "Node collapsed");
    }
}
