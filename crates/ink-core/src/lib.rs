pub mod config;
pub mod geom;
pub mod graph;
pub mod id;
pub mod model;
pub mod overlay;

pub use config::{EditorConfig, GestureConfig, NodeMetrics};
pub use geom::{Point, Rect, Size};
pub use graph::SceneGraph;
pub use id::NodeId;
pub use model::*;
pub use overlay::{InkKind, InkPreview, Overlay};
