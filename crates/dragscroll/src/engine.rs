//! Drag scroll instance
//!
//! [`DragScroll`] owns a [`Host`] and wires the pieces together:
//!
//! ```text
//! pointer / scroll / resize ──► DragEngine ─┐
//!                                           ├─► ScrollSurface ─► scroll handling ─► BoundaryNotifier
//! timers (advance) ─────────► SnapEngine ───┘                          │
//!                                 ▲                                    │
//!                                 └───────── locate / settle ◄─────────┘
//! ```
//!
//! Offsets written by the engine itself (drag, animation frames) run the
//! same scroll handling a host scroll event would, synchronously.
//!
//! Time is virtual. Nothing happens between calls; the host drives timers
//! with [`DragScroll::advance`].

use dragscroll_animation::TimerScheduler;
use dragscroll_core::{Axis, EventResponse, Overflow, Point, PointerEvent};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::bounds::{BoundaryNotifier, BoundaryState, ListenerId};
use crate::config::DragScrollConfig;
use crate::drag::DragEngine;
use crate::error::{DragScrollError, Result};
use crate::host::{Host, ListenerHandle, LISTENERS};
use crate::scrollbar::{ScrollbarManager, ScrollbarVisibility};
use crate::snap::{boundary_offset, locate, SnapEngine, SnapTimer};
use crate::surface::{reaches_right_end, ChildGeometry, SurfaceState};

/// A drag scroll container bound to one host element
pub struct DragScroll<H: Host> {
    host: H,
    config: DragScrollConfig,
    scrollbar: ScrollbarManager,
    drag: DragEngine,
    snap: SnapEngine,
    timers: TimerScheduler<SnapTimer>,
    notifier: BoundaryNotifier,
    /// Child widths, refreshed on structural change and resize
    widths: SmallVec<[f32; 16]>,
    listeners: SmallVec<[ListenerHandle; 5]>,
    attached: bool,
}

impl<H: Host> DragScroll<H> {
    /// Bind to `host`
    ///
    /// Probes the native scrollbar width, enables scrolling on both axes,
    /// registers the pointer, scroll and resize listeners, then applies
    /// `config`.
    ///
    /// # Errors
    /// [`DragScrollError::ListenerRegistration`] if the host refuses a
    /// listener. Listeners registered before the failure are removed again.
    pub fn new(mut host: H, config: DragScrollConfig) -> Result<Self> {
        let scrollbar = ScrollbarManager::probe(&mut host);
        for axis in Axis::BOTH {
            host.set_overflow(axis, Overflow::Auto);
        }

        let listeners = register_listeners(&mut host)?;

        let mut engine = Self {
            host,
            config,
            scrollbar,
            drag: DragEngine::new(),
            snap: SnapEngine::new(config.timing),
            timers: TimerScheduler::new(),
            notifier: BoundaryNotifier::new(),
            widths: SmallVec::new(),
            listeners,
            attached: true,
        };

        engine.reconfigure();
        engine.refresh_geometry();
        engine.fit_scrollbar();
        engine.refresh_right_end();
        engine.notify_bounds();
        Ok(engine)
    }

    /// Replace the configuration and re-run axis and scrollbar setup.
    /// A detached instance registers its listeners again first.
    ///
    /// # Errors
    /// [`DragScrollError::ListenerRegistration`] if re-registration fails;
    /// the instance then stays detached.
    pub fn attach(&mut self, config: DragScrollConfig) -> Result<()> {
        self.config = config;
        if !self.attached {
            self.listeners = register_listeners(&mut self.host)?;
            self.attached = true;
            self.refresh_geometry();
            self.refresh_right_end();
        }
        self.reconfigure();
        self.notify_bounds();
        Ok(())
    }

    /// Re-apply the current configuration to the host
    pub fn reconfigure(&mut self) {
        if !self.attached {
            return;
        }

        self.scrollbar
            .apply(&mut self.host, self.config.scrollbar_hidden);
        for axis in Axis::BOTH {
            let overflow = if self.config.scrolls_axis(axis) {
                Overflow::Auto
            } else {
                Overflow::Hidden
            };
            self.host.set_overflow(axis, overflow);
        }
        self.snap.set_timing(self.config.timing);
        debug!(config = ?self.config, "configuration applied");
    }

    /// Pointer pressed on the surface
    pub fn on_pointer_down(&mut self, event: PointerEvent) -> EventResponse {
        if !self.attached || !self.drag.press(event, self.config.drag_buttons) {
            return EventResponse::Ignored;
        }

        self.snap.cancel_animation(&mut self.timers);
        self.snap.cancel_settle(&mut self.timers);
        EventResponse::Handled
    }

    /// Pointer moved anywhere in the document
    ///
    /// While a drag session is open the host default action (text
    /// selection, native drag and drop) must be suppressed.
    pub fn on_pointer_move(&mut self, event: PointerEvent) -> EventResponse {
        if !self.attached
            || self.config.disabled
            || !self.drag.is_pressed()
            || !self.config.drag_buttons.accepts_index(event.button)
        {
            return EventResponse::Ignored;
        }

        let (x, y) = self.host.offsets();
        if let Some(next) = self.drag.drag_to(event, Point::new(x, y), &self.config) {
            trace!(x = next.x, y = next.y, "drag");
            self.write_offsets(next.x, next.y);
        }
        EventResponse::PreventDefault
    }

    /// Pointer released anywhere in the document
    pub fn on_pointer_up(&mut self, event: PointerEvent) -> EventResponse {
        if !self.attached {
            return EventResponse::Ignored;
        }

        match self.drag.release(event, self.config.drag_buttons) {
            Some(true) => {
                self.locate_current_index(!self.config.snap_disabled);
                EventResponse::Handled
            }
            _ => EventResponse::Ignored,
        }
    }

    /// The surface scrolled for a reason outside the engine (wheel,
    /// keyboard, native scrollbar)
    pub fn on_scroll(&mut self) -> EventResponse {
        if !self.attached {
            return EventResponse::Ignored;
        }

        self.handle_scroll();
        EventResponse::Handled
    }

    /// The window was resized
    pub fn on_resize(&mut self) -> EventResponse {
        if !self.attached {
            return EventResponse::Ignored;
        }

        self.scrollbar.mark_dimensions(&self.host);
        self.refresh_geometry();
        self.reset_scroll_location();
        self.notify_bounds();
        EventResponse::Handled
    }

    /// Compare the host's child count against the last snapshot and run
    /// [`on_structural_change`](Self::on_structural_change) if it differs
    pub fn check_structure(&mut self) -> EventResponse {
        if !self.attached || self.host.children().len() == self.widths.len() {
            return EventResponse::Ignored;
        }

        self.on_structural_change();
        EventResponse::Handled
    }

    /// Children were added or removed
    pub fn on_structural_change(&mut self) {
        if !self.attached {
            return;
        }

        self.refresh_geometry();
        self.fit_scrollbar();
        self.reset_scroll_location();
        self.notify_bounds();
    }

    /// Move the virtual clock forward by `dt_ms`, firing due timers in order
    pub fn advance(&mut self, dt_ms: u64) -> EventResponse {
        let until = self.timers.now_ms().saturating_add(dt_ms);
        let mut fired = false;

        while let Some((_, timer)) = self.timers.pop_due(until) {
            fired = true;
            trace!(?timer, now_ms = self.timers.now_ms(), "timer");
            match timer {
                SnapTimer::Settle => {
                    self.snap.on_settle();
                    self.locate_current_index(true);
                }
                SnapTimer::Frame => {
                    if let Some(frame) = self.snap.on_frame(&mut self.timers) {
                        self.write_scroll_x(frame.offset);
                    }
                }
                SnapTimer::Finish => self.snap.on_finish(),
            }
        }
        self.timers.advance_to(until);

        if fired {
            EventResponse::Handled
        } else {
            EventResponse::Ignored
        }
    }

    /// Navigate one child to the left
    ///
    /// # Returns
    /// Whether the move was allowed
    pub fn move_left(&mut self) -> bool {
        let planned = self.snap.plan_move_left(self.config.snap_disabled);
        self.navigate(planned)
    }

    /// Navigate one child to the right, unless the right end is reached
    pub fn move_right(&mut self) -> bool {
        let planned = self.snap.plan_move_right(self.widths.len());
        self.navigate(planned)
    }

    /// Navigate to child `index`
    pub fn move_to(&mut self, index: usize) -> bool {
        let planned = self.snap.plan_move_to(index, self.widths.len());
        self.navigate(planned)
    }

    /// Deregister every listener and cancel pending timers. Idempotent;
    /// also run on drop.
    pub fn detach(&mut self) {
        if !self.attached {
            return;
        }

        self.snap.clear(&mut self.timers);
        self.timers.clear();
        self.drag.cancel();
        let count = self.listeners.len();
        for handle in self.listeners.drain(..) {
            self.host.unlisten(handle);
        }
        self.attached = false;
        debug!(count, "listeners removed");
    }

    /// Register a callback receiving both bound flags
    pub fn on_boundary_change<F>(&mut self, callback: F) -> ListenerId
    where
        F: FnMut(BoundaryState) + Send + 'static,
    {
        self.notifier.on_boundary_change(callback)
    }

    /// Register a callback receiving the left bound flag
    pub fn on_left_bound<F>(&mut self, callback: F) -> ListenerId
    where
        F: FnMut(bool) + Send + 'static,
    {
        self.notifier.on_left_bound(callback)
    }

    /// Register a callback receiving the right bound flag
    pub fn on_right_bound<F>(&mut self, callback: F) -> ListenerId
    where
        F: FnMut(bool) + Send + 'static,
    {
        self.notifier.on_right_bound(callback)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.notifier.remove(id)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable host access, for simulating layout changes. Scrolling the
    /// host directly must be followed by [`on_scroll`](Self::on_scroll).
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &DragScrollConfig {
        &self.config
    }

    pub fn current_index(&self) -> usize {
        self.snap.current_index()
    }

    pub fn is_pressed(&self) -> bool {
        self.drag.is_pressed()
    }

    pub fn is_animating(&self) -> bool {
        self.snap.is_animating()
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Whether a passive scroll is waiting to settle
    pub fn is_settling(&self) -> bool {
        self.snap.is_settle_pending()
    }

    pub fn scrollbar_visibility(&self) -> ScrollbarVisibility {
        self.scrollbar.visibility()
    }

    /// Current virtual time in milliseconds
    pub fn now_ms(&self) -> u64 {
        self.timers.now_ms()
    }

    /// Bounds evaluated against the live surface
    pub fn boundary(&self) -> BoundaryState {
        let (scroll_x, _) = self.host.offsets();
        BoundaryState::evaluate(
            self.widths.len(),
            scroll_x,
            self.host.viewport_size(),
            self.host.content_size(),
        )
    }

    /// Snapshot of the surface using the cached child widths
    pub fn surface_state(&self) -> SurfaceState {
        SurfaceState::with_children(
            &self.host,
            ChildGeometry::from_widths(self.widths.iter().copied()),
        )
    }

    fn navigate(&mut self, planned: Option<usize>) -> bool {
        let Some(index) = planned else {
            return false;
        };
        if !self.attached {
            return false;
        }

        self.snap.set_index(index);
        let target = boundary_offset(&self.widths, index);
        debug!(index, target, "navigate");
        self.scroll_to(target, self.config.timing.snap_duration_ms);
        true
    }

    fn handle_scroll(&mut self) {
        self.refresh_right_end();
        self.notify_bounds();

        if !self.drag.is_pressed() && !self.snap.is_animating() && !self.config.snap_disabled {
            self.snap.restart_settle(&mut self.timers);
        } else {
            self.locate_current_index(false);
        }
    }

    fn locate_current_index(&mut self, snap: bool) {
        let (scroll_x, _) = self.host.offsets();
        let located = locate(&self.widths, scroll_x, self.snap.scroll_reaches_right_end());
        let target = self.snap.apply(located);

        if snap {
            if let Some(target) = target {
                debug!(index = located.index, target, "snap");
                self.scroll_to(target, self.config.timing.snap_duration_ms);
            }
        }
    }

    fn scroll_to(&mut self, target: f32, duration_ms: u32) {
        let (start, _) = self.host.offsets();
        let frame = self
            .snap
            .start_animation(&mut self.timers, start, target, duration_ms);
        self.write_scroll_x(frame.offset);
    }

    fn reset_scroll_location(&mut self) {
        self.scroll_to(0.0, 0);
        self.snap.reset();
        debug!("scroll location reset");
    }

    fn write_scroll_x(&mut self, x: f32) {
        let (_, y) = self.host.offsets();
        self.write_offsets(x, y);
    }

    fn write_offsets(&mut self, x: f32, y: f32) {
        let before = self.host.offsets();
        self.host.set_offsets(x, y);
        let after = self.host.offsets();
        trace!(x = after.0, y = after.1, "offsets");

        if after != before {
            self.handle_scroll();
        }
    }

    fn refresh_geometry(&mut self) {
        self.widths = self.host.children().iter().map(|child| child.width).collect();
        debug!(children = self.widths.len(), "child geometry");
    }

    fn refresh_right_end(&mut self) {
        let (scroll_x, _) = self.host.offsets();
        self.snap.set_right_end(reaches_right_end(
            scroll_x,
            self.host.viewport_size(),
            self.host.content_size(),
        ));
    }

    fn fit_scrollbar(&mut self) {
        let viewport = self.host.viewport_size();
        let content = self.host.content_size();
        self.scrollbar
            .check_scrollbar(&mut self.host, viewport, content);
    }

    fn notify_bounds(&mut self) {
        let state = self.boundary();
        trace!(left = state.left, right = state.right, "bounds");
        self.notifier.emit(state);
    }
}

fn register_listeners<H: Host>(host: &mut H) -> Result<SmallVec<[ListenerHandle; 5]>> {
    let mut listeners = SmallVec::new();
    for (target, kind) in LISTENERS {
        match host.listen(target, kind) {
            Ok(handle) => listeners.push(handle),
            Err(source) => {
                for handle in listeners.drain(..) {
                    host.unlisten(handle);
                }
                return Err(DragScrollError::ListenerRegistration {
                    target,
                    kind,
                    source,
                });
            }
        }
    }
    debug!(count = listeners.len(), "listeners registered");
    Ok(listeners)
}

impl<H: Host> Drop for DragScroll<H> {
    fn drop(&mut self) {
        self.detach();
    }
}
