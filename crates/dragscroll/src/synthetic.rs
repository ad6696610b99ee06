//! In-memory host
//!
//! [`SyntheticSurface`] lays its children out in a single horizontal row
//! (the no-wrap layout a drag scroll container forces) and clamps offsets
//! the way a browser scroll box does. It implements every host trait, so a
//! [`DragScroll`](crate::DragScroll) can run headless in tests and tools.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use dragscroll_core::{Axis, EventKind, ListenerTarget, Overflow, Size};
use rustc_hash::FxHashMap;

use crate::error::ListenerRefused;
use crate::host::{EventHost, ListenerHandle};
use crate::scrollbar::{ClipHost, ProbeMeasurement, StyleSize};
use crate::surface::{ChildGeometry, ScrollSurface};

/// Listener bookkeeping, shared so it can be inspected after the engine
/// owning the surface is gone
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    active: FxHashMap<ListenerHandle, (ListenerTarget, EventKind)>,
    next_handle: u64,
    total_registered: usize,
}

impl ListenerRegistry {
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn total_registered(&self) -> usize {
        self.total_registered
    }

    pub fn is_listening(&self, target: ListenerTarget, kind: EventKind) -> bool {
        self.active.values().any(|&entry| entry == (target, kind))
    }
}

/// Cloneable handle onto a [`ListenerRegistry`]
#[derive(Clone, Debug, Default)]
pub struct SharedListenerRegistry(Arc<Mutex<ListenerRegistry>>);

impl SharedListenerRegistry {
    pub fn lock(&self) -> MutexGuard<'_, ListenerRegistry> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Headless scroll container with fixed child widths and a settable offset
#[derive(Debug)]
pub struct SyntheticSurface {
    viewport: Size,
    content_height: f32,
    child_widths: Vec<f32>,
    scroll_x: f32,
    scroll_y: f32,
    overflow_x: Overflow,
    overflow_y: Overflow,
    displayed: bool,
    style: StyleSize,
    clip_wrapper: Option<StyleSize>,
    wrapper_insertions: usize,
    probe: ProbeMeasurement,
    listeners: SharedListenerRegistry,
    refused: Option<(ListenerTarget, EventKind)>,
}

impl SyntheticSurface {
    pub fn new(viewport: Size, child_widths: Vec<f32>) -> Self {
        Self {
            viewport,
            content_height: viewport.height,
            child_widths,
            scroll_x: 0.0,
            scroll_y: 0.0,
            overflow_x: Overflow::Auto,
            overflow_y: Overflow::Auto,
            displayed: true,
            style: StyleSize::default(),
            clip_wrapper: None,
            wrapper_insertions: 0,
            probe: ProbeMeasurement::default(),
            listeners: SharedListenerRegistry::default(),
            refused: None,
        }
    }

    /// Content taller than the viewport enables vertical scrolling
    pub fn with_content_height(mut self, height: f32) -> Self {
        self.content_height = height;
        self
    }

    pub fn with_style(mut self, style: StyleSize) -> Self {
        self.style = style;
        self
    }

    pub fn with_probe(mut self, probe: ProbeMeasurement) -> Self {
        self.probe = probe;
        self
    }

    pub fn with_displayed(mut self, displayed: bool) -> Self {
        self.displayed = displayed;
        self
    }

    /// Make `listen` fail for one target/kind pair
    pub fn refusing(mut self, target: ListenerTarget, kind: EventKind) -> Self {
        self.refused = Some((target, kind));
        self
    }

    pub fn child_widths(&self) -> &[f32] {
        &self.child_widths
    }

    /// Replace the children (insertion or removal)
    pub fn set_child_widths(&mut self, widths: Vec<f32>) {
        self.child_widths = widths;
        self.clamp();
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
        self.clamp();
    }

    /// Scroll as a wheel or native scrollbar would. The caller forwards the
    /// resulting scroll event to the engine.
    pub fn scroll_by(&mut self, dx: f32, dy: f32) {
        let (x, y) = self.offsets();
        self.set_offsets(x + dx, y + dy);
    }

    pub fn overflow(&self, axis: Axis) -> Overflow {
        match axis {
            Axis::X => self.overflow_x,
            Axis::Y => self.overflow_y,
        }
    }

    pub fn clip_wrapper(&self) -> Option<StyleSize> {
        self.clip_wrapper
    }

    pub fn wrapper_insertions(&self) -> usize {
        self.wrapper_insertions
    }

    pub fn listener_registry(&self) -> SharedListenerRegistry {
        self.listeners.clone()
    }

    fn max_offsets(&self) -> (f32, f32) {
        let content = self.content_size();
        (
            (content.width - self.viewport.width).max(0.0),
            (content.height - self.viewport.height).max(0.0),
        )
    }

    fn clamp(&mut self) {
        let (max_x, max_y) = self.max_offsets();
        self.scroll_x = self.scroll_x.clamp(0.0, max_x);
        self.scroll_y = self.scroll_y.clamp(0.0, max_y);
    }
}

impl ScrollSurface for SyntheticSurface {
    fn offsets(&self) -> (f32, f32) {
        (self.scroll_x, self.scroll_y)
    }

    fn set_offsets(&mut self, x: f32, y: f32) {
        self.scroll_x = x;
        self.scroll_y = y;
        self.clamp();
    }

    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn content_size(&self) -> Size {
        let row_width: f32 = self.child_widths.iter().map(|w| w.max(0.0)).sum();
        Size::new(
            row_width.max(self.viewport.width),
            self.content_height.max(self.viewport.height),
        )
    }

    fn children(&self) -> Vec<ChildGeometry> {
        ChildGeometry::from_widths(self.child_widths.iter().copied())
    }

    fn set_overflow(&mut self, axis: Axis, overflow: Overflow) {
        match axis {
            Axis::X => self.overflow_x = overflow,
            Axis::Y => self.overflow_y = overflow,
        }
    }
}

impl ClipHost for SyntheticSurface {
    fn is_displayed(&self) -> bool {
        self.displayed
    }

    fn style_size(&self) -> StyleSize {
        self.style
    }

    fn set_style_size(&mut self, size: StyleSize) {
        self.style = size;
    }

    fn insert_clip_wrapper(&mut self, size: StyleSize) {
        self.clip_wrapper = Some(size);
        self.wrapper_insertions += 1;
    }

    fn remove_clip_wrapper(&mut self) {
        self.clip_wrapper = None;
    }

    fn measure_scrollbar_probe(&mut self) -> ProbeMeasurement {
        self.probe
    }
}

impl EventHost for SyntheticSurface {
    fn listen(
        &mut self,
        target: ListenerTarget,
        kind: EventKind,
    ) -> Result<ListenerHandle, ListenerRefused> {
        if self.refused == Some((target, kind)) {
            return Err(ListenerRefused::new(format!("{kind:?} is not available on {target:?}")));
        }

        let mut registry = self.listeners.lock();
        let handle = ListenerHandle(registry.next_handle);
        registry.next_handle += 1;
        registry.total_registered += 1;
        registry.active.insert(handle, (target, kind));
        Ok(handle)
    }

    fn unlisten(&mut self, handle: ListenerHandle) {
        self.listeners.lock().active.remove(&handle);
    }
}
