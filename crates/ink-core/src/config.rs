//! Editor configuration: node geometry and gesture tuning.
//!
//! Every field has a documented default. Hosts may pass a partial JSON
//! object; missing fields fall back to `Default`.

use crate::geom::Size;
use serde::{Deserialize, Serialize};

// ─── Node geometry ────────────────────────────────────────────────────────

/// Geometry shared by the scene graph, hit tester, and painters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeMetrics {
    /// Width of every node. Default: **180**.
    pub width: f32,
    /// Height of every node. Default: **120**.
    pub height: f32,
    /// Height of the title bar measured from the node's top edge. Default: **30**.
    pub title_band: f32,
    /// Extra margin below the title bar that still routes a write stroke
    /// to the title collection. Default: **10**.
    pub title_tolerance: f32,
    /// Side of the square pencil and clear icons. Default: **20**.
    pub icon_size: f32,
    /// Inset of both icons from the node's right edge and from the top
    /// (pencil) or bottom (clear) edge. Default: **8**.
    pub icon_inset: f32,
}

impl Default for NodeMetrics {
    fn default() -> Self {
        Self {
            width: 180.0,
            height: 120.0,
            title_band: 30.0,
            title_tolerance: 10.0,
            icon_size: 20.0,
            icon_inset: 8.0,
        }
    }
}

impl NodeMetrics {
    pub fn node_size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

// ─── Gesture tuning ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// A pending click becomes a drag once the pointer's displacement
    /// magnitude exceeds this. Default: **5**.
    pub drag_threshold: f32,
    /// Two taps on the same node strictly closer than this many
    /// milliseconds toggle its visibility. Default: **300**.
    pub double_tap_ms: f64,
    /// Releasing a drag over empty surface spawns a new node connected
    /// from the dragged one. Default: **false** (the drag is a plain move).
    pub drop_spawns_node: bool,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            drag_threshold: 5.0,
            double_tap_ms: 300.0,
            drop_spawns_node: false,
        }
    }
}

// ─── Combined ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub metrics: NodeMetrics,
    pub gestures: GestureConfig,
}

impl EditorConfig {
    /// Check that the values describe a usable editor.
    ///
    /// # Errors
    /// Returns a message naming the first offending field.
    pub fn validate(&self) -> Result<(), String> {
        let m = &self.metrics;
        for (name, value) in [
            ("metrics.width", m.width),
            ("metrics.height", m.height),
            ("metrics.icon_size", m.icon_size),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("{name} must be a positive number, got {value}"));
            }
        }
        for (name, value) in [
            ("metrics.title_band", m.title_band),
            ("metrics.title_tolerance", m.title_tolerance),
            ("metrics.icon_inset", m.icon_inset),
            ("gestures.drag_threshold", self.gestures.drag_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{name} must be a non-negative number, got {value}"));
            }
        }
        if !self.gestures.double_tap_ms.is_finite() || self.gestures.double_tap_ms < 0.0 {
            return Err(format!(
                "gestures.double_tap_ms must be a non-negative number, got {}",
                self.gestures.double_tap_ms
            ));
        }
        if m.title_band > m.height {
            return Err(format!(
                "metrics.title_band ({}) exceeds node height ({})",
                m.title_band, m.height
            ));
        }
        let icon_extent = m.icon_size + m.icon_inset;
        if icon_extent > m.width || icon_extent * 2.0 > m.height {
            return Err(format!(
                "icons ({} + {} inset) do not fit inside a {}x{} node",
                m.icon_size, m.icon_inset, m.width, m.height
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(EditorConfig::default().validate(), Ok(()));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: EditorConfig =
            serde_json::from_str(r#"{"gestures":{"drag_threshold":12}}"#).unwrap();
        assert_eq!(config.gestures.drag_threshold, 12.0);
        assert_eq!(config.gestures.double_tap_ms, 300.0);
        assert_eq!(config.metrics, NodeMetrics::default());
    }

    #[test]
    fn rejects_zero_width() {
        let mut config = EditorConfig::default();
        config.metrics.width = 0.0;
        let err = config.validate().unwrap_err();
        assert!(err.contains("metrics.width"), "{err}");
    }

    #[test]
    fn rejects_negative_threshold() {
        let mut config = EditorConfig::default();
        config.gestures.drag_threshold = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_oversized_icons() {
        let mut config = EditorConfig::default();
        config.metrics.icon_size = 70.0;
        assert!(config.validate().is_err());
    }
}
