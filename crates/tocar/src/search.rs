//! Tree search: flatten a snapshot and evaluate a locator against it.
//!
//! The snapshot is flattened into a pre-order index sequence over borrowed
//! nodes; no subtree is copied during traversal. Relative constraints
//! reshape the candidate index set before the base predicate runs, so each
//! resolution is self-contained and reentrant.

use tracing::debug;

use crate::component::Component;
use crate::geometry::Rect;
use crate::locator::{Locator, RelativeConstraint};
use crate::snapshot::ComponentSnapshot;

/// One entry of the flattened tree: a borrowed node, its visible region
/// (clipped by every ancestor), and the end of its pre-order subtree span.
#[derive(Debug)]
struct FlatNode<'a> {
    node: &'a ComponentSnapshot,
    region: Rect,
    subtree_end: usize,
}

/// Flatten `root` in pre-order, applying the visibility filter.
///
/// A node whose rect has no contact with its parent's own rectangle is
/// pruned together with its subtree. Content that merely sits outside the
/// accumulated ancestor region (e.g. a list item scrolled off screen, whose
/// parent column still overlaps the viewport) is kept, so scroll-assisted
/// search can locate it; the accumulated region is carried on the handle
/// for callers to judge visibility.
fn flatten(root: &ComponentSnapshot) -> Vec<FlatNode<'_>> {
    let mut out = Vec::with_capacity(root.node_count());
    visit(root, root.rect(), &mut out);
    out
}

fn visit<'a>(node: &'a ComponentSnapshot, region: Rect, out: &mut Vec<FlatNode<'a>>) {
    let idx = out.len();
    out.push(FlatNode {
        node,
        region,
        subtree_end: idx + 1,
    });
    let own_rect = node.rect();
    for child in &node.children {
        let child_rect = child.rect();
        if !child_rect.touches(&own_rect) {
            continue;
        }
        visit(child, child_rect.clamped_to(&region), out);
    }
    out[idx].subtree_end = out.len();
}

/// Candidate index range after applying the locator's relative constraint.
///
/// An unmatched reference yields the empty set: the anchor must exist for
/// the constraint to be satisfiable.
fn candidate_indices(locator: &Locator, flat: &[FlatNode<'_>]) -> std::ops::Range<usize> {
    match locator.relative() {
        None => 0..flat.len(),
        Some(RelativeConstraint::Precedes(r)) => {
            // First occurrence, scanning front-to-back.
            match flat.iter().position(|f| r.matches(f.node)) {
                Some(anchor) => 0..anchor,
                None => 0..0,
            }
        }
        Some(RelativeConstraint::Follows(r)) => {
            // Last occurrence, scanning back-to-front.
            match flat.iter().rposition(|f| r.matches(f.node)) {
                Some(anchor) => anchor + 1..flat.len(),
                None => 0..0,
            }
        }
        Some(RelativeConstraint::ContainedWithin(r)) => {
            match flat.iter().position(|f| r.matches(f.node)) {
                Some(anchor) => anchor + 1..flat[anchor].subtree_end,
                None => 0..0,
            }
        }
    }
}

/// Find every component matching `locator`, in traversal order.
///
/// Degenerate geometry does not disqualify a hit; callers distinguish
/// visibility via the handle's bounds.
#[must_use]
pub fn find_all(locator: &Locator, root: &ComponentSnapshot) -> Vec<Component> {
    let flat = flatten(root);
    let range = candidate_indices(locator, &flat);
    let hits: Vec<Component> = flat[range]
        .iter()
        .filter(|f| locator.matches(f.node))
        .map(|f| Component::with_region(f.node.clone(), f.region))
        .collect();
    debug!(hits = hits.len(), "search::find_all");
    hits
}

/// Find the first component matching `locator` in traversal order.
///
/// `None` means the locator matched nothing; it is not an error.
#[must_use]
pub fn find(locator: &Locator, root: &ComponentSnapshot) -> Option<Component> {
    let flat = flatten(root);
    let range = candidate_indices(locator, &flat);
    flat[range]
        .iter()
        .find(|f| locator.matches(f.node))
        .map(|f| Component::with_region(f.node.clone(), f.region))
}
