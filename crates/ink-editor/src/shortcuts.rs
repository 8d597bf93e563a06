//! Keyboard shortcut mapping.
//!
//! The surface recognizes exactly one keyboard action; every other key is
//! unbound. The map lives in Rust so WASM and native hosts agree.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    /// Delete the selected node and every edge touching it.
    DeleteSelection,
}

pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a `KeyboardEvent.key` value to an action.
    pub fn resolve(key: &str) -> Option<ShortcutAction> {
        match key {
            "Delete" | "Backspace" => Some(ShortcutAction::DeleteSelection),
            _ => None,
        }
    }
}
