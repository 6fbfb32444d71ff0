//! Declarative locators: attribute predicates plus relative constraints.
//!
//! A [`Locator`] is built fluently, then evaluated against a snapshot tree
//! by [`crate::search`]. Evaluation is conjunctive over every declared
//! constraint; a locator that declares nothing matches nothing.
//!
//! Relative constraints (`precedes` / `follows` / `inside`) do not take
//! part in per-node evaluation — they reshape the candidate set before the
//! base predicate runs. A reference locator may not itself carry a relative
//! constraint; such nesting is rejected as a logged no-op.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::snapshot::ComponentSnapshot;

/// How a text constraint compares against a node's text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextPattern {
    /// Exact equality
    Equals,
    /// Substring anywhere
    Contains,
    /// Prefix match
    StartsWith,
    /// Suffix match
    EndsWith,
}

/// A relative constraint reshaping the candidate set
#[derive(Debug, Clone, PartialEq)]
pub enum RelativeConstraint {
    /// Candidates strictly before the first match of the reference
    Precedes(Box<Locator>),
    /// Candidates strictly after the last match of the reference
    Follows(Box<Locator>),
    /// Candidates that are descendants of the first match of the reference
    ContainedWithin(Box<Locator>),
}

impl RelativeConstraint {
    /// The reference locator this constraint anchors on
    #[must_use]
    pub fn reference(&self) -> &Locator {
        match self {
            Self::Precedes(l) | Self::Follows(l) | Self::ContainedWithin(l) => l,
        }
    }
}

/// A predicate specification for finding components.
///
/// Every setter narrows the same locator and returns it by value, so
/// constraints chain:
///
/// ```
/// use tocar::{Locator, TextPattern};
///
/// let on = Locator::new()
///     .component_type("Button")
///     .text("OK", TextPattern::Equals)
///     .clickable(true);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Locator {
    id: Option<String>,
    text: Option<(TextPattern, String)>,
    component_type: Option<String>,
    clickable: Option<bool>,
    long_clickable: Option<bool>,
    scrollable: Option<bool>,
    enabled: Option<bool>,
    focused: Option<bool>,
    selected: Option<bool>,
    checked: Option<bool>,
    checkable: Option<bool>,
    relative: Option<RelativeConstraint>,
}

impl Locator {
    /// Create an empty locator (matches nothing until narrowed)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require an exact component id
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Require a text match under the given pattern
    #[must_use]
    pub fn text(mut self, text: impl Into<String>, pattern: TextPattern) -> Self {
        self.text = Some((pattern, text.into()));
        self
    }

    /// Require an exact component type
    #[must_use]
    pub fn component_type(mut self, component_type: impl Into<String>) -> Self {
        self.component_type = Some(component_type.into());
        self
    }

    /// Require the clickable flag
    #[must_use]
    pub fn clickable(mut self, clickable: bool) -> Self {
        self.clickable = Some(clickable);
        self
    }

    /// Require the long-clickable flag
    #[must_use]
    pub fn long_clickable(mut self, long_clickable: bool) -> Self {
        self.long_clickable = Some(long_clickable);
        self
    }

    /// Require the scrollable flag
    #[must_use]
    pub fn scrollable(mut self, scrollable: bool) -> Self {
        self.scrollable = Some(scrollable);
        self
    }

    /// Require the enabled flag
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    /// Require the focused flag
    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = Some(focused);
        self
    }

    /// Require the selected flag
    #[must_use]
    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = Some(selected);
        self
    }

    /// Require the checked flag
    #[must_use]
    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = Some(checked);
        self
    }

    /// Require the checkable flag
    #[must_use]
    pub fn checkable(mut self, checkable: bool) -> Self {
        self.checkable = Some(checkable);
        self
    }

    /// Restrict matches to components before the first match of `reference`
    /// in traversal order.
    ///
    /// A reference that itself carries a relative constraint is invalid;
    /// the call is logged and ignored.
    #[must_use]
    pub fn precedes(self, reference: Locator) -> Self {
        self.set_relative(reference, RelativeConstraint::Precedes)
    }

    /// Restrict matches to components after the last match of `reference`
    /// in traversal order.
    #[must_use]
    pub fn follows(self, reference: Locator) -> Self {
        self.set_relative(reference, RelativeConstraint::Follows)
    }

    /// Restrict matches to descendants of the first match of `reference`.
    #[must_use]
    pub fn inside(self, reference: Locator) -> Self {
        self.set_relative(reference, RelativeConstraint::ContainedWithin)
    }

    fn set_relative(
        mut self,
        reference: Locator,
        make: fn(Box<Locator>) -> RelativeConstraint,
    ) -> Self {
        if reference.relative.is_some() {
            warn!("Locator: nested relative constraint rejected");
            return self;
        }
        if self.relative.is_some() {
            warn!("Locator: replacing previously declared relative constraint");
        }
        self.relative = Some(make(Box::new(reference)));
        self
    }

    /// The relative constraint, if one was declared
    #[must_use]
    pub fn relative(&self) -> Option<&RelativeConstraint> {
        self.relative.as_ref()
    }

    /// Whether no attribute predicate was declared.
    ///
    /// An empty base predicate never matches, even when a relative
    /// constraint is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.text.is_none()
            && self.component_type.is_none()
            && self.clickable.is_none()
            && self.long_clickable.is_none()
            && self.scrollable.is_none()
            && self.enabled.is_none()
            && self.focused.is_none()
            && self.selected.is_none()
            && self.checked.is_none()
            && self.checkable.is_none()
    }

    /// Evaluate the base predicate against one node.
    ///
    /// Conjunctive over every declared constraint; relative constraints are
    /// not evaluated here.
    #[must_use]
    pub fn matches(&self, node: &ComponentSnapshot) -> bool {
        if self.is_empty() {
            return false;
        }
        if let Some(id) = &self.id {
            if *id != node.id {
                return false;
            }
        }
        if let Some((pattern, needle)) = &self.text {
            if !compare_text(&node.text, needle, *pattern) {
                return false;
            }
        }
        if let Some(component_type) = &self.component_type {
            if *component_type != node.component_type {
                return false;
            }
        }
        let flags = [
            (self.clickable, node.clickable),
            (self.long_clickable, node.long_clickable),
            (self.scrollable, node.scrollable),
            (self.enabled, node.enabled),
            (self.focused, node.focused),
            (self.selected, node.selected),
            (self.checked, node.checked),
            (self.checkable, node.checkable),
        ];
        flags
            .iter()
            .all(|(want, have)| want.map_or(true, |w| w == *have))
    }
}

/// Text comparison under a [`TextPattern`].
///
/// `EndsWith` treats an empty needle or a needle longer than the text as a
/// guaranteed non-match rather than an ambiguous suffix position.
fn compare_text(text: &str, needle: &str, pattern: TextPattern) -> bool {
    match pattern {
        TextPattern::Equals => text == needle,
        TextPattern::Contains => text.contains(needle),
        TextPattern::StartsWith => text.starts_with(needle),
        TextPattern::EndsWith => {
            !needle.is_empty() && text.len() >= needle.len() && text.ends_with(needle)
        }
    }
}
