//! The host collaborator boundary.
//!
//! Everything this crate cannot do by itself — capturing the live component
//! tree, physically delivering input events, dismissing the top view —
//! lives behind the [`UiHost`] trait. Production embeds the engine's real
//! snapshot provider and event executor; tests use a recording mock.

use crate::event::{KeyAction, PointerPrimitive};
use crate::result::TocarResult;
use crate::snapshot::ComponentSnapshot;

/// Abstract host engine interface.
///
/// Implementations must be synchronous and blocking; every synthesis
/// operation submits its primitives as one ordered batch and never
/// interleaves batches.
pub trait UiHost {
    /// Capture the root of the current on-screen component tree.
    ///
    /// # Errors
    ///
    /// Returns [`crate::TocarError::HostUnavailable`] when the snapshot
    /// provider cannot be reached.
    fn component_tree(&mut self) -> TocarResult<ComponentSnapshot>;

    /// Submit one ordered batch of pointer primitives.
    ///
    /// # Errors
    ///
    /// Returns [`crate::TocarError::HostUnavailable`] when the event
    /// executor cannot be reached.
    fn submit_pointer_primitives(&mut self, batch: &[PointerPrimitive]) -> TocarResult<()>;

    /// Submit a single key primitive.
    ///
    /// # Errors
    ///
    /// Returns [`crate::TocarError::HostUnavailable`] when the event
    /// executor cannot be reached.
    fn submit_key_primitive(
        &mut self,
        keycode: i32,
        action: KeyAction,
        modifier_mask: u32,
    ) -> TocarResult<()>;

    /// Paste text through the host clipboard.
    ///
    /// Fallback path for text input containing characters with no keycode
    /// mapping.
    ///
    /// # Errors
    ///
    /// Returns [`crate::TocarError::HostUnavailable`] when the host cannot
    /// be reached.
    fn paste_text(&mut self, text: &str) -> TocarResult<()>;

    /// Dismiss the top view (back navigation).
    ///
    /// # Errors
    ///
    /// Returns [`crate::TocarError::HostUnavailable`] when the host cannot
    /// be reached.
    fn dismiss_top_view(&mut self) -> TocarResult<()>;
}
