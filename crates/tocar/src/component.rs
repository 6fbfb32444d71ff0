//! Component handle produced by a successful locator match.

use crate::geometry::{Point, Rect};
use crate::snapshot::ComponentSnapshot;

/// An opaque handle to a matched component.
///
/// Holds a copy of the matched snapshot node (bounds, attributes and the
/// subtree below it) plus the bounds as first observed. The cached bounds
/// are immutable except where a gesture operation intentionally rewrites
/// them to reflect an assumed post-gesture state (pinch, text edit); the
/// first-observed bounds are never rewritten.
#[derive(Debug, Clone)]
pub struct Component {
    node: ComponentSnapshot,
    bounds: Rect,
    original_bounds: Rect,
    visible_bounds: Rect,
}

impl Component {
    /// Wrap a matched snapshot node
    #[must_use]
    pub fn new(node: ComponentSnapshot) -> Self {
        let bounds = node.rect();
        Self {
            node,
            bounds,
            original_bounds: bounds,
            visible_bounds: bounds,
        }
    }

    /// Wrap a matched snapshot node with the visible region accumulated
    /// during traversal
    #[must_use]
    pub fn with_region(node: ComponentSnapshot, visible_bounds: Rect) -> Self {
        let bounds = node.rect();
        Self {
            node,
            bounds,
            original_bounds: bounds,
            visible_bounds,
        }
    }

    /// Component identifier
    #[must_use]
    pub fn id(&self) -> &str {
        &self.node.id
    }

    /// Textual content as cached on the handle
    #[must_use]
    pub fn text(&self) -> &str {
        &self.node.text
    }

    /// Semantic component type
    #[must_use]
    pub fn component_type(&self) -> &str {
        &self.node.component_type
    }

    /// Whether the component reacts to clicks
    #[must_use]
    pub fn is_clickable(&self) -> bool {
        self.node.clickable
    }

    /// Whether the component reacts to long clicks
    #[must_use]
    pub fn is_long_clickable(&self) -> bool {
        self.node.long_clickable
    }

    /// Whether the component scrolls its content
    #[must_use]
    pub fn is_scrollable(&self) -> bool {
        self.node.scrollable
    }

    /// Whether the component is enabled
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.node.enabled
    }

    /// Whether the component holds input focus
    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.node.focused
    }

    /// Whether the component is selected
    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.node.selected
    }

    /// Whether the component is checked
    #[must_use]
    pub fn is_checked(&self) -> bool {
        self.node.checked
    }

    /// Whether the component can be checked
    #[must_use]
    pub fn is_checkable(&self) -> bool {
        self.node.checkable
    }

    /// Cached bounds, possibly rewritten by a simulated resize
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Bounds as first observed at match time
    #[must_use]
    pub const fn original_bounds(&self) -> Rect {
        self.original_bounds
    }

    /// Bounds clipped to every ancestor's region at match time.
    ///
    /// Degenerate when the component was matched off screen.
    #[must_use]
    pub const fn visible_bounds(&self) -> Rect {
        self.visible_bounds
    }

    /// Center of the cached bounds
    #[must_use]
    pub fn bounds_center(&self) -> Point {
        self.bounds.center()
    }

    /// The matched snapshot subtree (used for subtree-restricted search)
    #[must_use]
    pub const fn snapshot(&self) -> &ComponentSnapshot {
        &self.node
    }

    /// Rewrite the cached bounds to a scaled, re-centered box.
    ///
    /// Simulated effect of a pinch gesture; the host is not re-queried.
    pub(crate) fn apply_scale(&mut self, scale: f32) {
        let center = self.bounds.center();
        let new_width = self.bounds.width() * scale;
        let new_height = self.bounds.height() * scale;
        self.bounds = Rect::from_size(
            center.x - new_width / 2.0,
            center.y - new_height / 2.0,
            new_width,
            new_height,
        );
    }

    /// Rewrite the cached text after a simulated edit
    pub(crate) fn set_cached_text(&mut self, text: impl Into<String>) {
        self.node.text = text.into();
    }
}
