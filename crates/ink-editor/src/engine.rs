//! Editor engine: owns the scene graph and applies gesture intents.
//!
//! Every event goes through [`EditorEngine::handle`], which asks the
//! gesture machine what the event means and applies the resulting
//! mutations before returning. Hosts render from [`EditorEngine::snapshot`]
//! after every call that reports `redraw`.

use crate::gesture::{GestureMachine, GestureState, Status};
use crate::input::InputEvent;
use ink_core::SceneGraph;
use ink_core::config::EditorConfig;
use ink_core::geom::Point;
use ink_core::id::NodeId;
use ink_core::model::{Region, Stroke};
use ink_core::overlay::Overlay;

/// A single change to the scene graph.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphMutation {
    CreateNode {
        position: Point,
        title: String,
    },
    DeleteNode {
        id: NodeId,
    },
    CreateEdge {
        source: NodeId,
        target: NodeId,
    },
    /// Absolute position of the node's top-left corner.
    MoveNode {
        id: NodeId,
        position: Point,
    },
    SetVisible {
        id: NodeId,
        visible: bool,
    },
    SetWriting {
        id: NodeId,
        writing: bool,
    },
    AppendStroke {
        id: NodeId,
        region: Region,
        stroke: Stroke,
    },
    ClearStrokes {
        id: NodeId,
    },
    /// Create an untitled node at `position` and connect `source` to it.
    SpawnConnected {
        source: NodeId,
        position: Point,
    },
}

/// What one call to [`EditorEngine::handle`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventReport {
    /// At least one mutation changed the graph.
    pub changed: bool,
    /// The graph or the overlay changed; the host should repaint.
    pub redraw: bool,
    pub status: Option<Status>,
}

/// Read-only view of everything needed to paint a frame.
#[derive(Debug, Clone)]
pub struct Snapshot<'a> {
    pub graph: &'a SceneGraph,
    pub overlay: Overlay,
}

pub struct EditorEngine {
    /// The current scene graph (single source of truth).
    pub graph: SceneGraph,
    machine: GestureMachine,
    config: EditorConfig,
}

impl Default for EditorEngine {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditorEngine {
    /// Build an engine from a config that is already known to be valid
    /// (defaults, or one that passed [`EditorConfig::validate`]).
    /// Use [`try_new`](Self::try_new) for host-supplied values.
    pub fn new(config: EditorConfig) -> Self {
        Self {
            graph: SceneGraph::with_node_size(config.metrics.node_size()),
            machine: GestureMachine::new(config.metrics, config.gestures),
            config,
        }
    }

    /// Validate `config`, then build the engine.
    ///
    /// # Errors
    /// Returns the validation message naming the first offending field.
    pub fn try_new(config: EditorConfig) -> Result<Self, String> {
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Replace the configuration. Existing nodes keep their size.
    ///
    /// # Errors
    /// Returns the validation message and leaves the old config in place.
    pub fn set_config(&mut self, config: EditorConfig) -> Result<(), String> {
        config.validate()?;
        self.graph.set_node_size(config.metrics.node_size());
        self.machine.reconfigure(config.metrics, config.gestures);
        self.config = config;
        log::debug!("editor config updated: {config:?}");
        Ok(())
    }

    /// Classify the event, apply what it implies, and report.
    pub fn handle(&mut self, event: &InputEvent) -> EventReport {
        let before = self.machine.overlay(&self.graph);
        let mutations = self.machine.handle(event, &self.graph);
        let mut changed = false;
        for mutation in mutations {
            changed |= self.apply_mutation(mutation);
        }
        let redraw = changed || self.machine.overlay(&self.graph) != before;
        EventReport {
            changed,
            redraw,
            status: self.machine.status(),
        }
    }

    /// Apply one mutation. Returns `false` when it referred to a missing
    /// node or was otherwise refused.
    pub fn apply_mutation(&mut self, mutation: GraphMutation) -> bool {
        log::trace!("apply {mutation:?}");
        match mutation {
            GraphMutation::CreateNode { position, title } => {
                self.graph.create_node(position, title);
                true
            }
            GraphMutation::DeleteNode { id } => self.graph.delete_node(id).is_some(),
            GraphMutation::CreateEdge { source, target } => self.graph.create_edge(source, target),
            GraphMutation::MoveNode { id, position } => self.graph.move_node(id, position),
            GraphMutation::SetVisible { id, visible } => self.graph.set_visible(id, visible),
            GraphMutation::SetWriting { id, writing } => self.graph.set_writing(id, writing),
            GraphMutation::AppendStroke { id, region, stroke } => {
                self.graph.append_stroke(id, region, stroke)
            }
            GraphMutation::ClearStrokes { id } => self.graph.clear_strokes(id),
            GraphMutation::SpawnConnected { source, position } => {
                if !self.graph.contains(source) {
                    return false;
                }
                let target = self.graph.create_node(position, "");
                self.graph.create_edge(source, target)
            }
        }
    }

    /// Programmatic node creation for hosts (seeding a board, tests).
    pub fn add_node(&mut self, position: Point, title: impl Into<String>) -> NodeId {
        self.graph.create_node(position, title)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            graph: &self.graph,
            overlay: self.machine.overlay(&self.graph),
        }
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.machine.selected()
    }

    pub fn state(&self) -> GestureState {
        self.machine.state()
    }

    pub fn status(&self) -> Option<Status> {
        self.machine.status()
    }
}
