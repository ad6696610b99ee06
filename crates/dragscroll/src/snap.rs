//! Snap and index engine
//!
//! Tracks which child is logically current, decides where a scroll should
//! come to rest, and drives the eased scroll animation on the shared timer
//! scheduler.
//!
//! Child boundaries are cumulative widths: `B_0 = 0`, `B_k = w_0 + .. + w_{k-1}`.

use dragscroll_animation::{ScrollTween, TimerId, TimerScheduler, TweenFrame};
use tracing::{debug, trace};

use crate::config::SnapTiming;

/// Timer payloads owned by the snap engine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnapTimer {
    /// Passive scrolling went quiet
    Settle,
    /// Next animation frame
    Frame,
    /// One tick after the last frame; clears the animating flag
    Finish,
}

/// Result of [`locate`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Located {
    pub index: usize,
    /// Offset to snap to, if the offset lies on a snappable child
    pub snap_target: Option<f32>,
}

/// Offset of the leading edge of child `index`
pub fn boundary_offset(widths: &[f32], index: usize) -> f32 {
    widths.iter().take(index).sum()
}

/// Resolve the current child for a horizontal offset.
///
/// Only the first `n - 1` children are bracketed. An offset past them lies
/// inside the last child and yields index `n` with nothing to snap to. A
/// match in the second-to-last child also reports index `n`, keeping the
/// snap target it resolved.
pub fn locate(widths: &[f32], offset: f32, at_right_end: bool) -> Located {
    let n = widths.len();
    if n <= 1 {
        return Located {
            index: 0,
            snap_target: None,
        };
    }

    let mut start = 0.0;
    for (i, &width) in widths[..n - 1].iter().enumerate() {
        let end = start + width;
        if offset >= start && offset <= end {
            let remaining = end - offset;
            let (index, target) = if remaining > width / 2.0 && !at_right_end {
                (i, start)
            } else {
                (i + 1, end)
            };
            return Located {
                index: if i == n - 2 { n } else { index },
                snap_target: Some(target),
            };
        }
        start = end;
    }

    Located {
        index: n,
        snap_target: None,
    }
}

/// Index tracking plus animation and settle timer slots
#[derive(Debug)]
pub struct SnapEngine {
    curr_index: usize,
    is_animating: bool,
    /// Sticky: refreshed on every scroll event
    scroll_reaches_right_end: bool,
    tween: Option<ScrollTween>,
    /// Pending `Frame` or `Finish` timer
    animation_timer: Option<TimerId>,
    settle_timer: Option<TimerId>,
    timing: SnapTiming,
}

impl SnapEngine {
    pub fn new(timing: SnapTiming) -> Self {
        Self {
            curr_index: 0,
            is_animating: false,
            scroll_reaches_right_end: false,
            tween: None,
            animation_timer: None,
            settle_timer: None,
            timing,
        }
    }

    pub fn current_index(&self) -> usize {
        self.curr_index
    }

    pub fn set_index(&mut self, index: usize) {
        self.curr_index = index;
    }

    pub fn is_animating(&self) -> bool {
        self.is_animating
    }

    pub fn scroll_reaches_right_end(&self) -> bool {
        self.scroll_reaches_right_end
    }

    pub fn set_right_end(&mut self, reached: bool) {
        self.scroll_reaches_right_end = reached;
    }

    pub fn timing(&self) -> SnapTiming {
        self.timing
    }

    pub fn set_timing(&mut self, timing: SnapTiming) {
        self.timing = timing;
    }

    pub fn is_settle_pending(&self) -> bool {
        self.settle_timer.is_some()
    }

    /// Target offset of the running animation
    pub fn animation_target(&self) -> Option<f32> {
        self.tween.as_ref().map(ScrollTween::target)
    }

    /// Update the index from `located`, returning the snap target
    pub fn apply(&mut self, located: Located) -> Option<f32> {
        if located.index != self.curr_index {
            trace!(from = self.curr_index, to = located.index, "current index");
        }
        self.curr_index = located.index;
        located.snap_target
    }

    /// Start an eased scroll from `start` to `target`, superseding any
    /// running animation.
    ///
    /// # Returns
    /// The first frame, which the caller applies immediately
    pub fn start_animation(
        &mut self,
        timers: &mut TimerScheduler<SnapTimer>,
        start: f32,
        target: f32,
        duration_ms: u32,
    ) -> TweenFrame {
        self.cancel_timer(timers);
        self.is_animating = true;

        let mut tween = ScrollTween::new(start, target, duration_ms, self.timing.frame_interval_ms);
        debug!(start, target, duration_ms, "scroll animation");
        let frame = tween.step();
        self.tween = Some(tween);
        self.schedule_next(timers, frame);
        frame
    }

    /// Handle a `Frame` timer
    pub fn on_frame(&mut self, timers: &mut TimerScheduler<SnapTimer>) -> Option<TweenFrame> {
        self.animation_timer = None;
        let frame = self.tween.as_mut()?.step();
        self.schedule_next(timers, frame);
        Some(frame)
    }

    /// Handle a `Finish` timer
    pub fn on_finish(&mut self) {
        self.animation_timer = None;
        self.tween = None;
        self.is_animating = false;
        trace!(index = self.curr_index, "scroll animation finished");
    }

    /// Stop the running animation where it is
    pub fn cancel_animation(&mut self, timers: &mut TimerScheduler<SnapTimer>) {
        if self.cancel_timer(timers) || self.is_animating {
            debug!("scroll animation cancelled");
        }
        self.tween = None;
        self.is_animating = false;
    }

    /// (Re)start the settle debounce
    pub fn restart_settle(&mut self, timers: &mut TimerScheduler<SnapTimer>) {
        self.cancel_settle(timers);
        self.settle_timer = Some(timers.schedule(
            u64::from(self.timing.settle_delay_ms),
            SnapTimer::Settle,
        ));
    }

    pub fn cancel_settle(&mut self, timers: &mut TimerScheduler<SnapTimer>) {
        if let Some(id) = self.settle_timer.take() {
            timers.cancel(id);
        }
    }

    /// Handle a `Settle` timer
    pub fn on_settle(&mut self) {
        self.settle_timer = None;
    }

    /// Index `move_left` navigates to, if the move is allowed
    pub fn plan_move_left(&self, snap_disabled: bool) -> Option<usize> {
        (self.curr_index != 0 || snap_disabled).then(|| self.curr_index.saturating_sub(1))
    }

    /// Index `move_right` navigates to, if the move is allowed
    pub fn plan_move_right(&self, child_count: usize) -> Option<usize> {
        let next = self.curr_index + 1;
        (!self.scroll_reaches_right_end && next < child_count).then_some(next)
    }

    /// Index `move_to` navigates to, if the move is allowed
    pub fn plan_move_to(&self, index: usize, child_count: usize) -> Option<usize> {
        (index != self.curr_index && index < child_count).then_some(index)
    }

    /// Back to the first child; timers are left alone
    pub fn reset(&mut self) {
        self.curr_index = 0;
    }

    /// Cancel every timer this engine owns
    pub fn clear(&mut self, timers: &mut TimerScheduler<SnapTimer>) {
        self.cancel_animation(timers);
        self.cancel_settle(timers);
    }

    fn schedule_next(&mut self, timers: &mut TimerScheduler<SnapTimer>, frame: TweenFrame) {
        let payload = if frame.finished {
            SnapTimer::Finish
        } else {
            SnapTimer::Frame
        };
        let delay = u64::from(self.timing.frame_interval_ms.max(1));
        self.animation_timer = Some(timers.schedule(delay, payload));
    }

    fn cancel_timer(&mut self, timers: &mut TimerScheduler<SnapTimer>) -> bool {
        match self.animation_timer.take() {
            Some(id) => timers.cancel(id).is_some(),
            None => false,
        }
    }
}
