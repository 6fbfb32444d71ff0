//! Immutable component-tree snapshot model.
//!
//! A snapshot is captured once per query by the host collaborator and never
//! mutated by this crate; searches walk it by reference.

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// A single node of the on-screen component tree.
///
/// Bounds are floating-point device pixels. The child list is ordered; the
/// pre-order walk over it defines traversal order for locator resolution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentSnapshot {
    /// Component identifier
    pub id: String,
    /// Textual content
    pub text: String,
    /// Semantic component type (e.g. "Button", "List")
    #[serde(rename = "type")]
    pub component_type: String,
    /// Left edge in device pixels
    pub left: f32,
    /// Top edge in device pixels
    pub top: f32,
    /// Width in device pixels
    pub width: f32,
    /// Height in device pixels
    pub height: f32,
    /// Whether the component reacts to clicks
    pub clickable: bool,
    /// Whether the component reacts to long clicks
    pub long_clickable: bool,
    /// Whether the component scrolls its content
    pub scrollable: bool,
    /// Whether the component is enabled
    pub enabled: bool,
    /// Whether the component holds input focus
    pub focused: bool,
    /// Whether the component is selected
    pub selected: bool,
    /// Whether the component is checked
    pub checked: bool,
    /// Whether the component can be checked
    pub checkable: bool,
    /// Ordered child nodes
    pub children: Vec<ComponentSnapshot>,
}

impl ComponentSnapshot {
    /// Bounding rect of this node
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::from_size(self.left, self.top, self.width, self.height)
    }

    /// Number of nodes in this subtree (self included)
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }
}
