//! The scene graph: nodes plus directed connectors between them.
//!
//! Nodes live in a `StableDiGraph` whose graph edges *are* the diagram's
//! connectors, so removing a node drops every incident connector in the
//! same call. A separate z-order list keeps creation order for
//! topmost-wins hit-testing, because stable-graph slots are reused.

use crate::geom::{Point, Size};
use crate::id::{IdAllocator, NodeId};
use crate::model::{Edge, Node, Region, Stroke};
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableDiGraph;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct SceneGraph {
    /// Nodes and connectors (source → target).
    graph: StableDiGraph<Node, ()>,

    /// Index from NodeId → NodeIndex for fast lookup.
    id_index: HashMap<NodeId, NodeIndex>,

    /// Identities bottom-to-top; the last entry is painted last.
    z_order: Vec<NodeId>,

    ids: IdAllocator,

    /// Size given to every created node.
    node_size: Size,
}

impl SceneGraph {
    /// Create an empty graph whose nodes use the default 180×120 size.
    #[must_use]
    pub fn new() -> Self {
        Self::with_node_size(crate::config::NodeMetrics::default().node_size())
    }

    #[must_use]
    pub fn with_node_size(node_size: Size) -> Self {
        Self {
            graph: StableDiGraph::new(),
            id_index: HashMap::new(),
            z_order: Vec::new(),
            ids: IdAllocator::new(),
            node_size,
        }
    }

    pub fn node_size(&self) -> Size {
        self.node_size
    }

    /// Size for nodes created from now on. Existing nodes keep theirs.
    pub fn set_node_size(&mut self, size: Size) {
        self.node_size = size;
    }

    // ─── Nodes ───────────────────────────────────────────────────────────

    /// Add a node on top of the z-order. Always succeeds.
    pub fn create_node(&mut self, position: Point, title: impl Into<String>) -> NodeId {
        let id = self.ids.allocate();
        let node = Node::new(id, position, self.node_size, title);
        let idx = self.graph.add_node(node);
        self.id_index.insert(id, idx);
        self.z_order.push(id);
        log::debug!("create node {id} at ({}, {})", position.x, position.y);
        id
    }

    /// Remove a node together with every edge that touches it.
    /// Returns the removed node, or `None` if it was not present.
    pub fn delete_node(&mut self, id: NodeId) -> Option<Node> {
        let idx = self.id_index.remove(&id)?;
        self.z_order.retain(|z| *z != id);
        let removed = self.graph.remove_node(idx);
        log::debug!("delete node {id}");
        removed
    }

    /// Overwrite a node's position. Strokes are relative, so they follow.
    pub fn move_node(&mut self, id: NodeId, position: Point) -> bool {
        self.with_node(id, |node| node.position = position)
    }

    pub fn set_visible(&mut self, id: NodeId, visible: bool) -> bool {
        self.with_node(id, |node| node.visible = visible)
    }

    pub fn set_writing(&mut self, id: NodeId, writing: bool) -> bool {
        self.with_node(id, |node| node.writing = writing)
    }

    pub fn append_stroke(&mut self, id: NodeId, region: Region, stroke: Stroke) -> bool {
        self.with_node(id, |node| match region {
            Region::Title => node.title_strokes.push(stroke),
            Region::Content => node.content_strokes.push(stroke),
        })
    }

    /// Empty both stroke collections.
    pub fn clear_strokes(&mut self, id: NodeId) -> bool {
        self.with_node(id, |node| {
            node.title_strokes.clear();
            node.content_strokes.clear();
        })
    }

    fn with_node(&mut self, id: NodeId, f: impl FnOnce(&mut Node)) -> bool {
        match self.id_index.get(&id).copied() {
            Some(idx) => {
                f(&mut self.graph[idx]);
                true
            }
            None => false,
        }
    }

    // ─── Edges ───────────────────────────────────────────────────────────

    /// Connect `source` → `target`. Parallel edges are allowed; self-loops
    /// and dangling endpoints are refused.
    pub fn create_edge(&mut self, source: NodeId, target: NodeId) -> bool {
        if source == target {
            return false;
        }
        let (Some(s), Some(t)) = (self.index_of(source), self.index_of(target)) else {
            return false;
        };
        self.graph.add_edge(s, t, ());
        log::debug!("create edge {source} -> {target}");
        true
    }

    /// All edges, in graph storage order.
    pub fn edges(&self) -> Vec<Edge> {
        self.graph
            .edge_indices()
            .filter_map(|e| self.graph.edge_endpoints(e))
            .map(|(s, t)| Edge {
                source: self.graph[s].id,
                target: self.graph[t].id,
            })
            .collect()
    }

    /// Edges whose source or target is `id`.
    pub fn edges_of(&self, id: NodeId) -> Vec<Edge> {
        self.edges()
            .into_iter()
            .filter(|e| e.source == id || e.target == id)
            .collect()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    // ─── Lookup ──────────────────────────────────────────────────────────

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.index_of(id).map(|idx| &self.graph[idx])
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.id_index.contains_key(&id)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Nodes bottom-to-top (creation order), hidden ones included.
    pub fn nodes(&self) -> impl DoubleEndedIterator<Item = &Node> + '_ {
        self.z_order.iter().filter_map(|id| self.get(*id))
    }

    /// Topmost visible node whose bounds contain `p`.
    pub fn node_at(&self, p: Point) -> Option<NodeId> {
        self.topmost(p, None)
    }

    /// Like [`node_at`](Self::node_at) but never returns `exclude`.
    pub fn node_at_excluding(&self, p: Point, exclude: NodeId) -> Option<NodeId> {
        self.topmost(p, Some(exclude))
    }

    fn topmost(&self, p: Point, exclude: Option<NodeId>) -> Option<NodeId> {
        self.nodes()
            .rev()
            .filter(|n| n.visible && Some(n.id) != exclude)
            .find(|n| n.bounds().contains(p))
            .map(|n| n.id)
    }

    fn index_of(&self, id: NodeId) -> Option<NodeIndex> {
        self.id_index.get(&id).copied()
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}
