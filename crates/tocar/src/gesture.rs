//! Gesture synthesis: high-level pointer intents to timed primitive
//! sequences.
//!
//! Every function here is pure: it takes a start timestamp and returns the
//! ordered primitive batch, or an empty batch for an invalid configuration
//! (logged, never an error). Submission to the host happens in
//! [`crate::driver`].

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::event::{PointerKind, PointerPrimitive};
use crate::geometry::{Point, Rect};

/// Options of the UI operations, initialized with system default values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiOpArgs {
    /// Upper swipe velocity bound (pixels/second)
    pub max_swipe_velocity_pps: u32,
    /// Lower swipe velocity bound (pixels/second)
    pub min_swipe_velocity_pps: u32,
    /// Velocity substituted when a requested speed is out of range
    pub default_velocity_pps: u32,
    /// Lower fling velocity bound (pixels/second)
    pub min_fling_velocity_pps: u32,
    /// Upper fling velocity bound (pixels/second)
    pub max_fling_velocity_pps: u32,
    /// Down-to-up hold for a click (milliseconds)
    pub click_hold_ms: u32,
    /// Implicit hold for a long click (milliseconds)
    pub long_click_hold_ms: u32,
    /// Interval between the two taps of a double click (milliseconds)
    pub double_click_interval_ms: u32,
    /// Fixed number of interpolation steps for a swipe
    pub swipe_step_count: u16,
    /// Sleep between key presses and scroll iterations (milliseconds)
    pub inter_key_delay_ms: u32,
}

impl Default for UiOpArgs {
    fn default() -> Self {
        Self {
            max_swipe_velocity_pps: 15_000,
            min_swipe_velocity_pps: 200,
            default_velocity_pps: 600,
            min_fling_velocity_pps: 200,
            max_fling_velocity_pps: 40_000,
            click_hold_ms: 100,
            long_click_hold_ms: 1_500,
            double_click_interval_ms: 200,
            swipe_step_count: 50,
            inter_key_delay_ms: 100,
        }
    }
}

impl UiOpArgs {
    /// Clamp a requested swipe speed, substituting the default when out of
    /// range
    #[must_use]
    pub fn clamp_swipe_speed(&self, speed: u32) -> u32 {
        if speed < self.min_swipe_velocity_pps || speed > self.max_swipe_velocity_pps {
            self.default_velocity_pps
        } else {
            speed
        }
    }

    /// Clamp a requested fling speed, substituting the default when out of
    /// range
    #[must_use]
    pub fn clamp_fling_speed(&self, speed: u32) -> u32 {
        if speed < self.min_fling_velocity_pps || speed > self.max_fling_velocity_pps {
            self.default_velocity_pps
        } else {
            speed
        }
    }
}

/// Direction of a whole-region fling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlingDirection {
    /// Content flicked toward the top
    Up,
    /// Content flicked toward the bottom
    Down,
    /// Content flicked toward the left
    Left,
    /// Content flicked toward the right
    Right,
}

/// Fractional offsets of the visible region used by a directional fling.
const FLING_NEAR_FRACTION: f32 = 1.0 / 6.0;
const FLING_FAR_FRACTION: f32 = 5.0 / 6.0;

/// Derive from/to points for a directional fling against a visible region.
#[must_use]
pub fn fling_points(region: &Rect, direction: FlingDirection) -> (Point, Point) {
    let center = region.center();
    let near_y = region.top + region.height() * FLING_NEAR_FRACTION;
    let far_y = region.top + region.height() * FLING_FAR_FRACTION;
    let near_x = region.left + region.width() * FLING_NEAR_FRACTION;
    let far_x = region.left + region.width() * FLING_FAR_FRACTION;
    match direction {
        FlingDirection::Up => (Point::new(center.x, far_y), Point::new(center.x, near_y)),
        FlingDirection::Down => (Point::new(center.x, near_y), Point::new(center.x, far_y)),
        FlingDirection::Left => (Point::new(far_x, center.y), Point::new(near_x, center.y)),
        FlingDirection::Right => (Point::new(near_x, center.y), Point::new(far_x, center.y)),
    }
}

/// Click at a point: down at `start_ms`, up after the click hold.
#[must_use]
pub fn click_events(point: Point, start_ms: u64, args: &UiOpArgs) -> Vec<PointerPrimitive> {
    vec![
        PointerPrimitive::at(start_ms, PointerKind::Down, point),
        PointerPrimitive::at(
            start_ms + u64::from(args.click_hold_ms),
            PointerKind::Up,
            point,
        ),
    ]
}

/// Double click: the down/up pair emitted twice back to back.
#[must_use]
pub fn double_click_events(point: Point, start_ms: u64, args: &UiOpArgs) -> Vec<PointerPrimitive> {
    let hold = u64::from(args.click_hold_ms);
    vec![
        PointerPrimitive::at(start_ms, PointerKind::Down, point),
        PointerPrimitive::at(start_ms + hold, PointerKind::Up, point),
        PointerPrimitive::at(start_ms + hold, PointerKind::Down, point),
        PointerPrimitive::at(start_ms + 2 * hold, PointerKind::Up, point),
    ]
}

/// Long click: a lone down primitive. The hold duration is implicit in the
/// absence of an immediate up; emitting one would cancel the long press.
#[must_use]
pub fn long_click_events(point: Point, start_ms: u64) -> Vec<PointerPrimitive> {
    vec![PointerPrimitive::at(start_ms, PointerKind::Down, point)]
}

/// Linearly interpolated down/moves/up stroke between two points.
///
/// Emits `steps + 1` primitives: a down at `from`, moves at steps
/// `1..steps`, and an up at `to` after `total_ms`.
fn stroke_events(
    from: Point,
    to: Point,
    steps: u32,
    total_ms: u64,
    start_ms: u64,
) -> Vec<PointerPrimitive> {
    let mut events = Vec::with_capacity(steps as usize + 1);
    events.push(PointerPrimitive::at(start_ms, PointerKind::Down, from));

    let dx = to.x - from.x;
    let dy = to.y - from.y;
    for step in 1..steps {
        let fraction = step as f32 / steps as f32;
        let point = Point::new(from.x + dx * fraction, from.y + dy * fraction);
        let offset_ms = total_ms * u64::from(step) / u64::from(steps);
        events.push(PointerPrimitive::at(
            start_ms + offset_ms,
            PointerKind::Move,
            point,
        ));
    }

    events.push(PointerPrimitive::at(
        start_ms + total_ms,
        PointerKind::Up,
        to,
    ));
    events
}

/// Swipe between two points at a requested speed.
///
/// Speed out of the swipe bounds falls back to the default velocity; a
/// distance under one pixel is a logged no-op yielding no primitives.
#[must_use]
pub fn swipe_events(
    from: Point,
    to: Point,
    speed: u32,
    start_ms: u64,
    args: &UiOpArgs,
) -> Vec<PointerPrimitive> {
    let speed = args.clamp_swipe_speed(speed);
    let distance = from.distance_to(&to);
    if distance < 1.0 {
        warn!("swipe ignored: distance under one pixel");
        return Vec::new();
    }
    let total_ms = (distance * 1000.0 / speed as f32) as u64;
    stroke_events(from, to, u32::from(args.swipe_step_count), total_ms, start_ms)
}

/// Fling between two points with a caller-supplied minimum segment length.
///
/// Step count is `distance / step_len` rather than the fixed swipe count;
/// a distance shorter than `step_len` is a logged no-op.
#[must_use]
pub fn fling_events(
    from: Point,
    to: Point,
    step_len: u32,
    speed: u32,
    start_ms: u64,
    args: &UiOpArgs,
) -> Vec<PointerPrimitive> {
    let speed = args.clamp_fling_speed(speed);
    let distance = from.distance_to(&to);
    if step_len == 0 || distance < step_len as f32 {
        warn!("fling ignored: step length is illegal");
        return Vec::new();
    }
    let total_ms = (distance * 1000.0 / speed as f32) as u64;
    let steps = (distance / step_len as f32) as u32;
    stroke_events(from, to, steps, total_ms, start_ms)
}

/// A fixed-size grid of recorded points indexed by (finger, step).
///
/// Declared at creation with 1..=10 fingers and 1..=1000 steps; setting a
/// point outside the declared bounds is a no-op.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerMatrix {
    fingers: usize,
    steps: usize,
    points: Vec<Option<Point>>,
}

/// Maximum declarable finger count
pub const MAX_FINGERS: usize = 10;
/// Maximum declarable step count
pub const MAX_STEPS: usize = 1000;

impl PointerMatrix {
    /// Create a matrix for `fingers` x `steps` recorded points.
    ///
    /// Returns `None` (logged) when either dimension is out of its
    /// declared range.
    #[must_use]
    pub fn new(fingers: usize, steps: usize) -> Option<Self> {
        if fingers == 0 || fingers > MAX_FINGERS || steps == 0 || steps > MAX_STEPS {
            warn!(fingers, steps, "PointerMatrix: dimensions out of range");
            return None;
        }
        Some(Self {
            fingers,
            steps,
            points: vec![None; fingers * steps],
        })
    }

    /// Declared finger count
    #[must_use]
    pub const fn fingers(&self) -> usize {
        self.fingers
    }

    /// Declared step count
    #[must_use]
    pub const fn steps(&self) -> usize {
        self.steps
    }

    /// Record a point for (finger, step). Out-of-bounds indices are a
    /// no-op.
    pub fn set_point(&mut self, finger: usize, step: usize, point: Point) {
        if finger >= self.fingers || step >= self.steps {
            warn!(finger, step, "PointerMatrix: set_point out of bounds");
            return;
        }
        self.points[finger * self.steps + step] = Some(point);
    }

    /// The recorded point for (finger, step), if any
    #[must_use]
    pub fn point(&self, finger: usize, step: usize) -> Option<Point> {
        if finger >= self.fingers || step >= self.steps {
            return None;
        }
        self.points[finger * self.steps + step]
    }

    /// Whether every declared cell holds a recorded point
    #[must_use]
    pub fn is_fully_populated(&self) -> bool {
        self.points.iter().all(Option::is_some)
    }
}

/// Plan a multi-finger injection from a recorded matrix.
///
/// Requires at least two steps and a fully populated grid; otherwise a
/// logged no-op yielding no primitives. For each consecutive step pair a
/// down/move/up triple is appended per finger, all fingers' primitives of
/// one phase emitted before the next phase, so relative finger ordering at
/// each step is preserved. Per-segment duration follows the swipe timing
/// model, paced by the slowest finger.
#[must_use]
pub fn multi_pointer_events(
    matrix: &PointerMatrix,
    speed: u32,
    start_ms: u64,
    args: &UiOpArgs,
) -> Vec<PointerPrimitive> {
    if matrix.steps() < 2 {
        warn!("multi-pointer injection ignored: fewer than two steps");
        return Vec::new();
    }
    if !matrix.is_fully_populated() {
        warn!("multi-pointer injection ignored: matrix has unset points");
        return Vec::new();
    }
    let speed = args.clamp_swipe_speed(speed);

    let mut events = Vec::new();
    let mut segment_start = start_ms;
    for step in 0..matrix.steps() - 1 {
        let mut max_distance = 0.0_f32;
        for finger in 0..matrix.fingers() {
            let from = matrix.point(finger, step).unwrap_or(Point::new(0.0, 0.0));
            let to = matrix
                .point(finger, step + 1)
                .unwrap_or(Point::new(0.0, 0.0));
            max_distance = max_distance.max(from.distance_to(&to));
        }
        let segment_ms = (max_distance * 1000.0 / speed as f32) as u64;
        let segment_end = segment_start + segment_ms;

        for finger in 0..matrix.fingers() {
            let from = matrix.point(finger, step).unwrap_or(Point::new(0.0, 0.0));
            events.push(PointerPrimitive::at(segment_start, PointerKind::Down, from));
        }
        for finger in 0..matrix.fingers() {
            let to = matrix
                .point(finger, step + 1)
                .unwrap_or(Point::new(0.0, 0.0));
            events.push(PointerPrimitive::at(segment_end, PointerKind::Move, to));
        }
        for finger in 0..matrix.fingers() {
            let to = matrix
                .point(finger, step + 1)
                .unwrap_or(Point::new(0.0, 0.0));
            events.push(PointerPrimitive::at(segment_end, PointerKind::Up, to));
        }
        segment_start = segment_end;
    }
    events
}

/// Two-finger pinch along the vertical axis of `bounds`.
///
/// `scale > 1` moves both points outward (pinch out); `0.001 < scale < 1`
/// moves them inward (pinch in). Anything else is a logged no-op. The
/// fingers start a quarter height from the center of the pre-gesture
/// bounds and travel `height * |scale - 1| / 2`.
#[must_use]
pub fn pinch_events(bounds: &Rect, scale: f32, start_ms: u64, args: &UiOpArgs) -> Vec<PointerPrimitive> {
    if scale <= 0.001 || (scale - 1.0).abs() < f32::EPSILON || scale.is_nan() {
        warn!(scale, "pinch ignored: scale out of range");
        return Vec::new();
    }
    let center = bounds.center();
    let height = bounds.height();
    let rest = height / 4.0;
    let travel = height * (scale - 1.0).abs() / 2.0;
    // Outward for scale > 1, inward otherwise.
    let signed = if scale > 1.0 { travel } else { -travel };

    let mut matrix = match PointerMatrix::new(2, 2) {
        Some(m) => m,
        None => return Vec::new(),
    };
    matrix.set_point(0, 0, Point::new(center.x, center.y - rest));
    matrix.set_point(0, 1, Point::new(center.x, center.y - rest - signed));
    matrix.set_point(1, 0, Point::new(center.x, center.y + rest));
    matrix.set_point(1, 1, Point::new(center.x, center.y + rest + signed));
    multi_pointer_events(&matrix, args.default_velocity_pps, start_ms, args)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> UiOpArgs {
        UiOpArgs::default()
    }

    mod tap_tests {
        use super::*;

        #[test]
        fn test_click_shape() {
            let events = click_events(Point::new(5.0, 5.0), 1000, &args());
            assert_eq!(events.len(), 2);
            assert_eq!(events[0].kind, PointerKind::Down);
            assert_eq!(events[1].kind, PointerKind::Up);
            assert_eq!(events[1].timestamp_ms - events[0].timestamp_ms, 100);
        }

        #[test]
        fn test_double_click_shape() {
            let events = double_click_events(Point::new(5.0, 5.0), 1000, &args());
            assert_eq!(events.len(), 4);
            let kinds: Vec<_> = events.iter().map(|e| e.kind).collect();
            assert_eq!(
                kinds,
                vec![
                    PointerKind::Down,
                    PointerKind::Up,
                    PointerKind::Down,
                    PointerKind::Up
                ]
            );
            assert!(events.windows(2).all(|w| w[0].timestamp_ms <= w[1].timestamp_ms));
        }

        #[test]
        fn test_long_click_emits_only_down() {
            let events = long_click_events(Point::new(5.0, 5.0), 1000);
            assert_eq!(events.len(), 1);
            assert_eq!(events[0].kind, PointerKind::Down);
        }
    }

    mod swipe_tests {
        use super::*;

        #[test]
        fn test_swipe_primitive_count_is_steps_plus_one() {
            let events = swipe_events(Point::new(0.0, 0.0), Point::new(0.0, 100.0), 600, 0, &args());
            // down + 49 moves + up
            assert_eq!(events.len(), 51);
            assert_eq!(events[0].kind, PointerKind::Down);
            assert_eq!(events[50].kind, PointerKind::Up);
            assert!(events[1..50].iter().all(|e| e.kind == PointerKind::Move));
        }

        #[test]
        fn test_swipe_monotonic_in_space_and_time() {
            let events = swipe_events(Point::new(0.0, 0.0), Point::new(0.0, 100.0), 600, 0, &args());
            assert!(events.windows(2).all(|w| w[0].timestamp_ms <= w[1].timestamp_ms));
            assert!(events.windows(2).all(|w| w[0].y <= w[1].y));
            assert!((events[0].y - 0.0).abs() < f32::EPSILON);
            assert!((events[50].y - 100.0).abs() < f32::EPSILON);
        }

        #[test]
        fn test_swipe_duration_from_speed() {
            let events = swipe_events(Point::new(0.0, 0.0), Point::new(0.0, 300.0), 600, 0, &args());
            // 300 px at 600 px/s = 500 ms
            assert_eq!(events.last().unwrap().timestamp_ms, 500);
        }

        #[test]
        fn test_swipe_zero_distance_is_noop() {
            let events = swipe_events(Point::new(5.0, 5.0), Point::new(5.0, 5.0), 600, 0, &args());
            assert!(events.is_empty());
        }

        #[test]
        fn test_swipe_speed_out_of_range_uses_default() {
            // 100 px at the default 600 px/s = 166 ms
            let fast = swipe_events(Point::new(0.0, 0.0), Point::new(0.0, 100.0), 99_999, 0, &args());
            let slow = swipe_events(Point::new(0.0, 0.0), Point::new(0.0, 100.0), 1, 0, &args());
            assert_eq!(fast.last().unwrap().timestamp_ms, 166);
            assert_eq!(slow.last().unwrap().timestamp_ms, 166);
        }
    }

    mod fling_tests {
        use super::*;

        #[test]
        fn test_fling_step_count_from_step_len() {
            let events = fling_events(
                Point::new(0.0, 0.0),
                Point::new(0.0, 100.0),
                20,
                600,
                0,
                &args(),
            );
            // distance/step_len = 5 steps: down + 4 moves + up
            assert_eq!(events.len(), 6);
        }

        #[test]
        fn test_fling_short_distance_is_noop() {
            let events = fling_events(
                Point::new(0.0, 0.0),
                Point::new(0.0, 10.0),
                20,
                600,
                0,
                &args(),
            );
            assert!(events.is_empty());
        }

        #[test]
        fn test_fling_clamps_to_its_own_bounds() {
            // 20_000 px/s is legal for a fling, illegal for a swipe.
            let events = fling_events(
                Point::new(0.0, 0.0),
                Point::new(0.0, 200.0),
                10,
                20_000,
                0,
                &args(),
            );
            assert_eq!(events.last().unwrap().timestamp_ms, 10);
        }

        #[test]
        fn test_fling_points_fractional_offsets() {
            let region = Rect::from_size(0.0, 0.0, 600.0, 600.0);
            let (from, to) = fling_points(&region, FlingDirection::Up);
            assert!((from.y - 500.0).abs() < f32::EPSILON);
            assert!((to.y - 100.0).abs() < f32::EPSILON);
            assert!((from.x - 300.0).abs() < f32::EPSILON);

            let (from, to) = fling_points(&region, FlingDirection::Right);
            assert!((from.x - 100.0).abs() < f32::EPSILON);
            assert!((to.x - 500.0).abs() < f32::EPSILON);
        }
    }

    mod matrix_tests {
        use super::*;

        #[test]
        fn test_matrix_dimension_limits() {
            assert!(PointerMatrix::new(1, 1).is_some());
            assert!(PointerMatrix::new(10, 1000).is_some());
            assert!(PointerMatrix::new(0, 10).is_none());
            assert!(PointerMatrix::new(11, 10).is_none());
            assert!(PointerMatrix::new(2, 0).is_none());
            assert!(PointerMatrix::new(2, 1001).is_none());
        }

        #[test]
        fn test_set_point_out_of_bounds_is_noop() {
            let mut m = PointerMatrix::new(2, 3).unwrap();
            m.set_point(5, 0, Point::new(1.0, 1.0));
            m.set_point(0, 9, Point::new(1.0, 1.0));
            assert!(m.point(0, 0).is_none());
            assert!(!m.is_fully_populated());
        }

        #[test]
        fn test_fully_populated() {
            let mut m = PointerMatrix::new(2, 2).unwrap();
            for finger in 0..2 {
                for step in 0..2 {
                    m.set_point(finger, step, Point::new(step as f32, finger as f32));
                }
            }
            assert!(m.is_fully_populated());
        }
    }

    mod multi_pointer_tests {
        use super::*;

        fn two_finger_drag() -> PointerMatrix {
            let mut m = PointerMatrix::new(2, 3).unwrap();
            for step in 0..3 {
                m.set_point(0, step, Point::new(step as f32 * 50.0, 100.0));
                m.set_point(1, step, Point::new(step as f32 * 50.0, 200.0));
            }
            m
        }

        #[test]
        fn test_single_step_matrix_is_rejected() {
            let mut m = PointerMatrix::new(2, 1).unwrap();
            m.set_point(0, 0, Point::new(1.0, 1.0));
            m.set_point(1, 0, Point::new(2.0, 2.0));
            assert!(multi_pointer_events(&m, 600, 0, &args()).is_empty());
        }

        #[test]
        fn test_unpopulated_matrix_is_rejected() {
            let m = PointerMatrix::new(2, 2).unwrap();
            assert!(multi_pointer_events(&m, 600, 0, &args()).is_empty());
        }

        #[test]
        fn test_triples_per_step_pair_per_finger() {
            let events = multi_pointer_events(&two_finger_drag(), 600, 0, &args());
            // 2 step pairs x 2 fingers x (down + move + up)
            assert_eq!(events.len(), 12);
        }

        #[test]
        fn test_finger_ordering_within_a_step() {
            let events = multi_pointer_events(&two_finger_drag(), 600, 0, &args());
            // First four primitives: both downs, then both moves.
            assert_eq!(events[0].kind, PointerKind::Down);
            assert_eq!(events[1].kind, PointerKind::Down);
            assert!((events[0].y - 100.0).abs() < f32::EPSILON);
            assert!((events[1].y - 200.0).abs() < f32::EPSILON);
            assert_eq!(events[2].kind, PointerKind::Move);
            assert_eq!(events[3].kind, PointerKind::Move);
        }

        #[test]
        fn test_timestamps_monotonic_across_segments() {
            let events = multi_pointer_events(&two_finger_drag(), 600, 0, &args());
            assert!(events.windows(2).all(|w| w[0].timestamp_ms <= w[1].timestamp_ms));
            // 50 px per segment at 600 px/s = 83 ms each.
            assert_eq!(events.last().unwrap().timestamp_ms, 166);
        }
    }

    mod pinch_tests {
        use super::*;

        #[test]
        fn test_pinch_scale_one_is_noop() {
            let bounds = Rect::from_size(0.0, 0.0, 100.0, 100.0);
            assert!(pinch_events(&bounds, 1.0, 0, &args()).is_empty());
        }

        #[test]
        fn test_pinch_tiny_scale_is_noop() {
            let bounds = Rect::from_size(0.0, 0.0, 100.0, 100.0);
            assert!(pinch_events(&bounds, 0.0005, 0, &args()).is_empty());
        }

        #[test]
        fn test_pinch_out_moves_fingers_apart() {
            let bounds = Rect::from_size(0.0, 0.0, 100.0, 100.0);
            let events = pinch_events(&bounds, 2.0, 0, &args());
            assert!(!events.is_empty());
            // Finger rest points at center +/- height/4; travel = 50.
            let downs: Vec<_> = events.iter().filter(|e| e.kind == PointerKind::Down).collect();
            let ups: Vec<_> = events.iter().filter(|e| e.kind == PointerKind::Up).collect();
            assert!((downs[0].y - 25.0).abs() < f32::EPSILON);
            assert!((downs[1].y - 75.0).abs() < f32::EPSILON);
            assert!((ups[0].y - -25.0).abs() < f32::EPSILON);
            assert!((ups[1].y - 125.0).abs() < f32::EPSILON);
        }

        #[test]
        fn test_pinch_in_moves_fingers_together() {
            let bounds = Rect::from_size(0.0, 0.0, 100.0, 100.0);
            let events = pinch_events(&bounds, 0.5, 0, &args());
            let ups: Vec<_> = events.iter().filter(|e| e.kind == PointerKind::Up).collect();
            // travel = 100 * 0.5 / 2 = 25 inward from +/-25 rest offset.
            assert!((ups[0].y - 50.0).abs() < f32::EPSILON);
            assert!((ups[1].y - 50.0).abs() < f32::EPSILON);
        }
    }
}
