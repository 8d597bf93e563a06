use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of a node for the lifetime of a session.
///
/// Allocated monotonically by [`IdAllocator`] and never reused, so edges
/// and selections can hold a `NodeId` after the node is gone and simply
/// fail to resolve. 8 bytes, Copy, Eq, Hash in O(1).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u64);

impl NodeId {
    /// Wrap a raw identity (e.g. one received back from a JS host).
    pub const fn from_raw(raw: u64) -> Self {
        NodeId(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// Monotonic source of [`NodeId`]s, starting at 1.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn allocate(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_monotonic_and_unique() {
        let mut ids = IdAllocator::new();
        let a = ids.allocate();
        let b = ids.allocate();
        assert_ne!(a, b);
        assert!(a < b);
        assert_eq!(a.raw(), 1);
    }

    #[test]
    fn display_uses_at_prefix() {
        assert_eq!(NodeId::from_raw(7).to_string(), "@7");
        assert_eq!(format!("{:?}", NodeId::from_raw(7)), "@7");
    }

    #[test]
    fn serializes_as_plain_integer() {
        let json = serde_json::to_string(&NodeId::from_raw(42)).unwrap();
        assert_eq!(json, "42");
        let back: NodeId = serde_json::from_str("42").unwrap();
        assert_eq!(back, NodeId::from_raw(42));
    }
}
