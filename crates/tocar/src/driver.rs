//! The driver facade: locator resolution and gesture/key synthesis wired
//! to a host engine.
//!
//! Every query takes a fresh snapshot from the host; every synthesis
//! operation submits its primitives as one ordered batch. Execution is
//! single-threaded and blocking - waits are explicit sleeps on the calling
//! thread.

use std::fmt;
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tracing::{debug, warn};

use crate::component::Component;
use crate::event::KeyAction;
use crate::gesture::{
    self, FlingDirection, PointerMatrix, UiOpArgs,
};
use crate::geometry::Point;
use crate::host::UiHost;
use crate::keys::{self, keycode, TextInputPlan};
use crate::locator::Locator;
use crate::result::TocarResult;
use crate::search;

/// Scroll gestures issued by the convergence loop use a slow fixed speed.
const SCROLL_SWIPE_SPEED_PPS: u32 = 200;

/// UI automation driver bound to a host engine.
pub struct UiDriver<H: UiHost> {
    host: H,
    args: UiOpArgs,
}

impl<H: UiHost> fmt::Debug for UiDriver<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiDriver").field("args", &self.args).finish_non_exhaustive()
    }
}

impl<H: UiHost> UiDriver<H> {
    /// Create a driver with default operation options
    pub fn new(host: H) -> Self {
        Self {
            host,
            args: UiOpArgs::default(),
        }
    }

    /// Create a driver with custom operation options
    pub fn with_args(host: H, args: UiOpArgs) -> Self {
        Self { host, args }
    }

    /// The operation options in effect
    #[must_use]
    pub const fn args(&self) -> &UiOpArgs {
        &self.args
    }

    /// Borrow the host (test inspection)
    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }

    fn now_ms() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }

    /// Block the calling thread for `dur` milliseconds
    pub fn delay_ms(&self, dur: u32) {
        if dur > 0 {
            thread::sleep(Duration::from_millis(u64::from(dur)));
        }
    }

    // ------------------------------------------------------------------
    // Locator resolution
    // ------------------------------------------------------------------

    /// Find the first component matching `locator` in a fresh snapshot.
    ///
    /// `Ok(None)` means the locator matched nothing; an `Err` means the
    /// snapshot provider could not be reached.
    pub fn find_component(&mut self, locator: &Locator) -> TocarResult<Option<Component>> {
        let tree = self.host.component_tree()?;
        Ok(search::find(locator, &tree))
    }

    /// Find every component matching `locator` in a fresh snapshot
    pub fn find_components(&mut self, locator: &Locator) -> TocarResult<Vec<Component>> {
        let tree = self.host.component_tree()?;
        Ok(search::find_all(locator, &tree))
    }

    /// Whether any component currently matches `locator`
    pub fn assert_component_exists(&mut self, locator: &Locator) -> TocarResult<bool> {
        Ok(self.find_component(locator)?.is_some())
    }

    /// Dismiss the top view (back navigation)
    pub fn press_back(&mut self) -> TocarResult<()> {
        debug!("UiDriver::press_back");
        self.host.dismiss_top_view()
    }

    // ------------------------------------------------------------------
    // Taps
    // ------------------------------------------------------------------

    /// Click at a point
    pub fn click(&mut self, x: f32, y: f32) -> TocarResult<()> {
        debug!(x, y, "UiDriver::click");
        let events = gesture::click_events(Point::new(x, y), Self::now_ms(), &self.args);
        self.host.submit_pointer_primitives(&events)
    }

    /// Double click at a point
    pub fn double_click(&mut self, x: f32, y: f32) -> TocarResult<()> {
        debug!(x, y, "UiDriver::double_click");
        let events = gesture::double_click_events(Point::new(x, y), Self::now_ms(), &self.args);
        self.host.submit_pointer_primitives(&events)
    }

    /// Long click at a point
    pub fn long_click(&mut self, x: f32, y: f32) -> TocarResult<()> {
        debug!(x, y, "UiDriver::long_click");
        let events = gesture::long_click_events(Point::new(x, y), Self::now_ms());
        self.host.submit_pointer_primitives(&events)
    }

    /// Click the center of a component
    pub fn click_on(&mut self, component: &Component) -> TocarResult<()> {
        let center = component.bounds_center();
        self.click(center.x, center.y)
    }

    /// Double click the center of a component
    pub fn double_click_on(&mut self, component: &Component) -> TocarResult<()> {
        let center = component.bounds_center();
        self.double_click(center.x, center.y)
    }

    /// Long click the center of a component
    pub fn long_click_on(&mut self, component: &Component) -> TocarResult<()> {
        let center = component.bounds_center();
        self.long_click(center.x, center.y)
    }

    // ------------------------------------------------------------------
    // Swipe / fling / pinch / multi-pointer
    // ------------------------------------------------------------------

    /// Swipe between two points at a requested speed (pixels/second)
    pub fn swipe(&mut self, from: Point, to: Point, speed: u32) -> TocarResult<()> {
        let events = gesture::swipe_events(from, to, speed, Self::now_ms(), &self.args);
        if events.is_empty() {
            return Ok(());
        }
        self.host.submit_pointer_primitives(&events)
    }

    /// Fling between two points with a minimum segment length
    pub fn fling(&mut self, from: Point, to: Point, step_len: u32, speed: u32) -> TocarResult<()> {
        let events = gesture::fling_events(from, to, step_len, speed, Self::now_ms(), &self.args);
        if events.is_empty() {
            return Ok(());
        }
        self.host.submit_pointer_primitives(&events)
    }

    /// Fling across the whole visible region in a direction.
    ///
    /// From/to points derive from fixed fractional offsets of the region;
    /// the segment length derives from the travel distance over the
    /// default step count.
    pub fn fling_direction(&mut self, direction: FlingDirection, speed: u32) -> TocarResult<()> {
        let root = self.host.component_tree()?;
        let (from, to) = gesture::fling_points(&root.rect(), direction);
        let step_len = (from.distance_to(&to) / f32::from(self.args.swipe_step_count)) as u32;
        self.fling(from, to, step_len.max(1), speed)
    }

    /// Pinch a component open. Requires `scale > 1`; anything else is a
    /// logged no-op. On success the handle's cached bounds are rewritten
    /// to the scaled, re-centered box (a simulated effect, not a
    /// re-query).
    pub fn pinch_out(&mut self, component: &mut Component, scale: f32) -> TocarResult<()> {
        if scale <= 1.0 {
            warn!(scale, "UiDriver::pinch_out ignored: scale must exceed 1");
            return Ok(());
        }
        self.pinch(component, scale)
    }

    /// Pinch a component closed. Requires `0.001 < scale < 1`.
    pub fn pinch_in(&mut self, component: &mut Component, scale: f32) -> TocarResult<()> {
        if scale >= 1.0 || scale <= 0.001 {
            warn!(scale, "UiDriver::pinch_in ignored: scale out of range");
            return Ok(());
        }
        self.pinch(component, scale)
    }

    fn pinch(&mut self, component: &mut Component, scale: f32) -> TocarResult<()> {
        let events = gesture::pinch_events(
            &component.original_bounds(),
            scale,
            Self::now_ms(),
            &self.args,
        );
        if events.is_empty() {
            return Ok(());
        }
        self.host.submit_pointer_primitives(&events)?;
        component.apply_scale(scale);
        Ok(())
    }

    /// Inject a recorded multi-finger gesture path.
    ///
    /// Returns `Ok(false)` without side effects when the matrix declares
    /// fewer than two steps or holds unset points.
    pub fn inject_multi_pointer(
        &mut self,
        matrix: &PointerMatrix,
        speed: u32,
    ) -> TocarResult<bool> {
        let events = gesture::multi_pointer_events(matrix, speed, Self::now_ms(), &self.args);
        if events.is_empty() {
            return Ok(false);
        }
        self.host.submit_pointer_primitives(&events)?;
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Keys and text
    // ------------------------------------------------------------------

    /// Press and release a single key
    pub fn trigger_key(&mut self, code: i32) -> TocarResult<()> {
        self.host.submit_key_primitive(code, KeyAction::Down, 0)?;
        self.host.submit_key_primitive(code, KeyAction::Up, 0)
    }

    /// Press a key combination: all keys down in order, released in
    /// reverse. An empty combination is a logged no-op.
    pub fn trigger_combine_keys(&mut self, codes: &[i32]) -> TocarResult<()> {
        if codes.is_empty() {
            warn!("UiDriver::trigger_combine_keys ignored: no keys given");
            return Ok(());
        }
        for code in codes {
            self.host.submit_key_primitive(*code, KeyAction::Down, 0)?;
        }
        for code in codes.iter().rev() {
            self.host.submit_key_primitive(*code, KeyAction::Up, 0)?;
        }
        Ok(())
    }

    /// Type text into a component, one key pair per character with the
    /// inter-key delay between them.
    ///
    /// A character outside the mappable set downgrades the whole
    /// operation to a clipboard paste. The handle's cached text is
    /// extended to reflect the assumed post-edit state.
    pub fn input_text(&mut self, component: &mut Component, text: &str) -> TocarResult<()> {
        debug!(len = text.len(), "UiDriver::input_text");
        match keys::plan_input_text(text) {
            TextInputPlan::Keys(strokes) => {
                for stroke in strokes {
                    self.host
                        .submit_key_primitive(stroke.code, KeyAction::Down, stroke.modifiers)?;
                    self.host
                        .submit_key_primitive(stroke.code, KeyAction::Up, stroke.modifiers)?;
                    self.delay_ms(self.args.inter_key_delay_ms);
                }
            }
            TextInputPlan::Paste => {
                self.host.paste_text(text)?;
            }
        }
        let mut cached = component.text().to_string();
        cached.push_str(text);
        component.set_cached_text(cached);
        Ok(())
    }

    /// Clear a component's text: move the caret to the end, then one
    /// delete pair per recorded character, each separated by the
    /// inter-key delay.
    pub fn clear_text(&mut self, component: &mut Component) -> TocarResult<()> {
        let char_count = component.text().chars().count();
        debug!(char_count, "UiDriver::clear_text");
        self.host
            .submit_key_primitive(keycode::KEY_MOVE_END, KeyAction::Down, 0)?;
        self.host
            .submit_key_primitive(keycode::KEY_MOVE_END, KeyAction::Up, 0)?;
        for _ in 0..char_count {
            self.host
                .submit_key_primitive(keycode::KEY_DEL, KeyAction::Down, 0)?;
            self.host
                .submit_key_primitive(keycode::KEY_DEL, KeyAction::Up, 0)?;
            self.delay_ms(self.args.inter_key_delay_ms);
        }
        component.set_cached_text("");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Scrolling
    // ------------------------------------------------------------------

    /// Search a scrollable component's subtree, scrolling the target into
    /// view when it sits outside the visible region.
    ///
    /// Best-effort convergence: the returned handle reflects the freshest
    /// resolution available, and the target is not guaranteed to end up
    /// centered.
    pub fn scroll_search(
        &mut self,
        scrollable: &Component,
        locator: &Locator,
    ) -> TocarResult<Option<Component>> {
        let Some(found) = search::find(locator, scrollable.snapshot()) else {
            debug!("UiDriver::scroll_search target not found in subtree");
            return Ok(None);
        };

        let region = scrollable.bounds();
        let target = found.bounds();
        if !scrollable.is_scrollable() {
            if target.overlaps(&region) {
                return Ok(Some(found));
            }
            debug!("UiDriver::scroll_search target off screen in non-scrollable component");
            return Ok(None);
        }

        let center = region.center();
        if target.top < region.top {
            let distance = region.top - target.top;
            self.scroll_by(center, distance, region.height(), 1.0)?;
        } else if target.bottom > region.bottom {
            let distance = target.bottom - region.bottom;
            self.scroll_by(center, distance, region.height(), -1.0)?;
        }

        // Re-resolve against a fresh snapshot; keep the pre-scroll match
        // if the target dropped out of the tree meanwhile.
        let tree = self.host.component_tree()?;
        Ok(search::find(locator, &tree).or(Some(found)))
    }

    /// Issue repeated vertical swipes covering `distance`, `direction`
    /// being +1 to uncover content above and -1 to uncover content below.
    fn scroll_by(
        &mut self,
        center: Point,
        distance: f32,
        region_height: f32,
        direction: f32,
    ) -> TocarResult<()> {
        let step = (distance / 2.0).min(region_height / 4.0).max(1.0);
        let iterations = (distance / step).ceil() as u32;
        debug!(distance, step, iterations, "UiDriver::scroll_by");
        for _ in 0..iterations {
            self.swipe(
                center,
                Point::new(center.x, center.y + step * direction),
                SCROLL_SWIPE_SPEED_PPS,
            )?;
            self.delay_ms(self.args.inter_key_delay_ms);
        }
        Ok(())
    }

    /// Scroll a scrollable component back to its top edge.
    ///
    /// Inspects the first grandchild to compute the deficit; already-at-top
    /// and childless components are logged no-ops.
    pub fn scroll_to_top(&mut self, scrollable: &Component, speed: u32) -> TocarResult<()> {
        let Some(first) = Self::edge_grandchild(scrollable, false) else {
            return Ok(());
        };
        let region = scrollable.bounds();
        if first.top >= region.top {
            debug!("UiDriver::scroll_to_top component is already at the top");
            return Ok(());
        }

        let step = 200.0_f32.min(region.height() / 4.0).max(1.0);
        let deficit = region.top - first.top + first.height;
        let iterations = (deficit / step).abs() as u32 + 1;
        let center = region.center();
        for _ in 0..iterations {
            self.swipe(center, Point::new(center.x, center.y + step), speed)?;
            self.delay_ms(self.args.inter_key_delay_ms);
        }
        Ok(())
    }

    /// Scroll a scrollable component to its bottom edge.
    pub fn scroll_to_bottom(&mut self, scrollable: &Component, speed: u32) -> TocarResult<()> {
        let Some(last) = Self::edge_grandchild(scrollable, true) else {
            return Ok(());
        };
        let region = scrollable.bounds();
        let last_bottom = last.top + last.height;
        if last_bottom <= region.bottom {
            debug!("UiDriver::scroll_to_bottom component is already at the bottom");
            return Ok(());
        }

        let step = 200.0_f32.min(region.height() / 4.0).max(1.0);
        let deficit = last_bottom - region.bottom + last.height;
        let iterations = (deficit / step).abs() as u32 + 1;
        let center = region.center();
        for _ in 0..iterations {
            self.swipe(center, Point::new(center.x, center.y - step), speed)?;
            self.delay_ms(self.args.inter_key_delay_ms);
        }
        Ok(())
    }

    /// The first (or last) child of the scrollable's content wrapper, as a
    /// cloned snapshot node. `None` (logged) when the component is not
    /// scrollable or the wrapper is missing or empty.
    fn edge_grandchild(
        scrollable: &Component,
        last: bool,
    ) -> Option<crate::snapshot::ComponentSnapshot> {
        if !scrollable.is_scrollable() {
            warn!("scroll ignored: component is not scrollable");
            return None;
        }
        let wrapper = scrollable.snapshot().children.first().or_else(|| {
            warn!("scroll ignored: scrollable component has no child");
            None
        })?;
        let edge = if last {
            wrapper.children.last()
        } else {
            wrapper.children.first()
        };
        if edge.is_none() {
            warn!("scroll ignored: content wrapper has no children");
        }
        edge.cloned()
    }
}
