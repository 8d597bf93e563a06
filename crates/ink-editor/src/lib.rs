pub mod engine;
pub mod gesture;
pub mod input;
pub mod shortcuts;
pub mod stroke;

pub use engine::{EditorEngine, EventReport, GraphMutation, Snapshot};
pub use gesture::{GestureMachine, GestureState, Status};
pub use input::InputEvent;
