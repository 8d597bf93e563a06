//! Input abstraction layer.
//!
//! Normalizes mouse, touch, and stylus events into a unified `InputEvent`
//! consumed by the gesture machine. The host is responsible for pointer
//! capture: once a pointer goes down, its moves and its release must be
//! delivered even if it leaves the surface.

/// A normalized input event. Nothing else is recognized.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed (mouse down, touch start, pencil contact).
    PointerDown { x: f32, y: f32 },

    /// Pointer moved while the surface holds capture.
    PointerMove { x: f32, y: f32 },

    /// Pointer released.
    PointerUp {
        x: f32,
        y: f32,
        /// Monotonic timestamp in milliseconds (e.g. `performance.now()`).
        time_ms: f64,
    },

    /// Key pressed; `key` is the `KeyboardEvent.key` value.
    Key { key: String },
}

impl InputEvent {
    pub fn from_pointer_down(x: f32, y: f32) -> Self {
        Self::PointerDown { x, y }
    }

    pub fn from_pointer_move(x: f32, y: f32) -> Self {
        Self::PointerMove { x, y }
    }

    pub fn from_pointer_up(x: f32, y: f32, time_ms: f64) -> Self {
        Self::PointerUp { x, y, time_ms }
    }

    pub fn from_key(key: impl Into<String>) -> Self {
        Self::Key { key: key.into() }
    }

    /// Extract position if this is a pointer event.
    pub fn position(&self) -> Option<(f32, f32)> {
        match self {
            Self::PointerDown { x, y }
            | Self::PointerMove { x, y }
            | Self::PointerUp { x, y, .. } => Some((*x, *y)),
            Self::Key { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_of_pointer_events() {
        assert_eq!(InputEvent::from_pointer_down(1.0, 2.0).position(), Some((1.0, 2.0)));
        assert_eq!(InputEvent::from_pointer_up(3.0, 4.0, 10.0).position(), Some((3.0, 4.0)));
        assert_eq!(InputEvent::from_key("Delete").position(), None);
    }
}
