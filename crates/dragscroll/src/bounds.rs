//! Boundary notifier
//!
//! Derives whether the viewport sits at the left and/or right bound of the
//! content and fans the result out to registered listeners. Every
//! recomputation is emitted; listeners must tolerate repeated values.

use dragscroll_core::Size;
use serde::Serialize;
use slotmap::{new_key_type, SlotMap};

use crate::surface::{reaches_right_end, SurfaceState};

new_key_type! {
    /// Registration token returned by the `on_*` methods
    pub struct ListenerId;
}

/// Left/right bound flags
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BoundaryState {
    pub left: bool,
    pub right: bool,
}

impl BoundaryState {
    /// Nothing to navigate: both bounds reached
    pub const BOTH: BoundaryState = BoundaryState {
        left: true,
        right: true,
    };

    pub const fn new(left: bool, right: bool) -> Self {
        Self { left, right }
    }

    /// Evaluate from raw measurements
    pub fn evaluate(child_count: usize, scroll_x: f32, viewport: Size, content: Size) -> Self {
        if child_count <= 1 || content.width <= viewport.width {
            Self::BOTH
        } else if reaches_right_end(scroll_x, viewport, content) {
            Self::new(false, true)
        } else if scroll_x == 0.0 {
            Self::new(true, false)
        } else {
            Self::new(false, false)
        }
    }

    /// Evaluate from a surface snapshot
    pub fn of(state: &SurfaceState) -> Self {
        Self::evaluate(
            state.children.len(),
            state.scroll_x,
            state.viewport,
            state.content,
        )
    }
}

enum Listener {
    Change(Box<dyn FnMut(BoundaryState) + Send>),
    Left(Box<dyn FnMut(bool) + Send>),
    Right(Box<dyn FnMut(bool) + Send>),
}

/// Observer registry for bound changes
#[derive(Default)]
pub struct BoundaryNotifier {
    listeners: SlotMap<ListenerId, Listener>,
    last: Option<BoundaryState>,
}

impl BoundaryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called with both flags on every recomputation
    pub fn on_boundary_change<F>(&mut self, callback: F) -> ListenerId
    where
        F: FnMut(BoundaryState) + Send + 'static,
    {
        self.listeners.insert(Listener::Change(Box::new(callback)))
    }

    /// Called with the left flag on every recomputation
    pub fn on_left_bound<F>(&mut self, callback: F) -> ListenerId
    where
        F: FnMut(bool) + Send + 'static,
    {
        self.listeners.insert(Listener::Left(Box::new(callback)))
    }

    /// Called with the right flag on every recomputation
    pub fn on_right_bound<F>(&mut self, callback: F) -> ListenerId
    where
        F: FnMut(bool) + Send + 'static,
    {
        self.listeners.insert(Listener::Right(Box::new(callback)))
    }

    /// Unregister a listener, returning whether it existed
    pub fn remove(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id).is_some()
    }

    /// Most recently emitted state
    pub fn last(&self) -> Option<BoundaryState> {
        self.last
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Deliver `state` to every listener
    pub fn emit(&mut self, state: BoundaryState) {
        self.last = Some(state);
        for listener in self.listeners.values_mut() {
            match listener {
                Listener::Change(callback) => callback(state),
                Listener::Left(callback) => callback(state.left),
                Listener::Right(callback) => callback(state.right),
            }
        }
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
    }
}
