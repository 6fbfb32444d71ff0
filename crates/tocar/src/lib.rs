//! Tocar: UI-Tree Locator Resolution and Gesture Synthesis
//!
//! Tocar (Spanish: "to touch") is the automation core of a UI test driver:
//! it resolves declarative component locators against a captured component
//! tree and synthesizes pointer and key primitive streams for taps, swipes,
//! flings, pinches, multi-finger paths and text input.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      TOCAR Architecture                        │
//! ├────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐     ┌─────────────┐     ┌──────────────┐      │
//! │   │ Locator    │     │ UiDriver    │     │ UiHost       │      │
//! │   │ (declares) │────►│ (resolves,  │────►│ (snapshots,  │      │
//! │   │            │     │ synthesizes)│     │ delivers)    │      │
//! │   └────────────┘     └─────────────┘     └──────────────┘      │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The crate never talks to a live UI directly: everything it cannot do by
//! itself sits behind the [`UiHost`] trait, so tests drive the whole stack
//! with a recording mock.
//!
//! # Example
//!
//! ```no_run
//! use tocar::{Locator, TextPattern, UiDriver, UiHost};
//!
//! fn press_start<H: UiHost>(driver: &mut UiDriver<H>) -> tocar::TocarResult<()> {
//!     let locator = Locator::new()
//!         .text("Start", TextPattern::StartsWith)
//!         .clickable(true);
//!     if let Some(button) = driver.find_component(&locator)? {
//!         driver.click_on(&button)?;
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

pub mod component;
pub mod driver;
pub mod event;
pub mod gesture;
pub mod geometry;
pub mod host;
pub mod keys;
pub mod locator;
pub mod result;
pub mod search;
pub mod snapshot;

pub use component::Component;
pub use driver::UiDriver;
pub use event::{KeyAction, PointerKind, PointerPrimitive};
pub use gesture::{FlingDirection, PointerMatrix, UiOpArgs, MAX_FINGERS, MAX_STEPS};
pub use geometry::{Point, Rect};
pub use host::UiHost;
pub use keys::{keycode, KeyStroke, TextInputPlan, MODIFIER_CTRL, MODIFIER_SHIFT};
pub use locator::{Locator, RelativeConstraint, TextPattern};
pub use result::{TocarError, TocarResult};
pub use search::{find, find_all};
pub use snapshot::ComponentSnapshot;
