//! Drag engine
//!
//! Turns pointer down/move/up into scroll offset updates. The engine only
//! computes offsets; writing them to the surface is left to the caller.

use dragscroll_core::{Axis, ButtonMask, Point, PointerEvent, StateMachine};
use tracing::debug;

use crate::config::DragScrollConfig;

/// Pointer press phase
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Pressed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DragInput {
    Press,
    Release,
}

/// Pointer drag session tracking
pub struct DragEngine {
    fsm: StateMachine<DragPhase, DragInput>,
    /// Last pointer position applied to the offsets
    down: Point,
}

impl Default for DragEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DragEngine {
    pub fn new() -> Self {
        Self {
            fsm: StateMachine::builder(DragPhase::Idle)
                .on(DragPhase::Idle, DragInput::Press, DragPhase::Pressed)
                // A second press (other button) restarts the session in place
                .on(DragPhase::Pressed, DragInput::Press, DragPhase::Pressed)
                .on(DragPhase::Pressed, DragInput::Release, DragPhase::Idle)
                .build(),
            down: Point::ZERO,
        }
    }

    pub fn phase(&self) -> DragPhase {
        self.fsm.current_state()
    }

    pub fn is_pressed(&self) -> bool {
        self.fsm.is_in(DragPhase::Pressed)
    }

    /// Pointer position recorded at press time, updated on every move
    pub fn down_position(&self) -> Point {
        self.down
    }

    /// Start a drag session
    ///
    /// # Returns
    /// `false` if the button is not in `mask`; the engine stays untouched
    pub fn press(&mut self, event: PointerEvent, mask: ButtonMask) -> bool {
        if !mask.accepts_index(event.button) {
            return false;
        }

        self.fsm.send(DragInput::Press);
        self.down = Point::new(event.x, event.y);
        debug!(x = event.x, y = event.y, button = event.button, "drag start");
        true
    }

    /// End a drag session
    ///
    /// # Returns
    /// `None` if the button is not in `mask`, otherwise whether a session
    /// was actually open
    pub fn release(&mut self, event: PointerEvent, mask: ButtonMask) -> Option<bool> {
        if !mask.accepts_index(event.button) {
            return None;
        }

        let was_pressed = self.fsm.send(DragInput::Release).is_some();
        if was_pressed {
            debug!(x = event.x, y = event.y, "drag end");
        }
        Some(was_pressed)
    }

    /// Drop any open session without a release event
    pub fn cancel(&mut self) {
        self.fsm.reset(DragPhase::Idle);
    }

    /// Follow the pointer
    ///
    /// # Arguments
    /// * `event` - Pointer sample
    /// * `current` - Current scroll offsets
    /// * `config` - Axis and button switches
    ///
    /// # Returns
    /// New scroll offsets, or `None` when no session is open, the button is
    /// masked out, or dragging is disabled
    pub fn drag_to(
        &mut self,
        event: PointerEvent,
        current: Point,
        config: &DragScrollConfig,
    ) -> Option<Point> {
        if !self.is_pressed() || config.disabled || !config.drag_buttons.accepts_index(event.button)
        {
            return None;
        }

        let mut next = current;
        if config.drags_axis(Axis::X) {
            next.x = current.x - (event.x - self.down.x);
            self.down.x = event.x;
        }
        if config.drags_axis(Axis::Y) {
            next.y = current.y - (event.y - self.down.y);
            self.down.y = event.y;
        }
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_release_cycle() {
        let mut drag = DragEngine::new();
        assert_eq!(drag.phase(), DragPhase::Idle);

        assert!(drag.press(PointerEvent::primary(10.0, 20.0), ButtonMask::ALL));
        assert!(drag.is_pressed());
        assert_eq!(drag.down_position(), Point::new(10.0, 20.0));

        assert_eq!(drag.release(PointerEvent::primary(0.0, 0.0), ButtonMask::ALL), Some(true));
        assert!(!drag.is_pressed());
        assert_eq!(drag.release(PointerEvent::primary(0.0, 0.0), ButtonMask::ALL), Some(false));
    }

    #[test]
    fn test_masked_button_is_ignored() {
        let mut drag = DragEngine::new();
        let left_only = ButtonMask::new(true, false, false);

        // Right button
        assert!(!drag.press(PointerEvent::new(5.0, 5.0, 2), left_only));
        assert_eq!(drag.phase(), DragPhase::Idle);

        // Unknown buttons never match
        assert!(!drag.press(PointerEvent::new(5.0, 5.0, 4), ButtonMask::ALL));

        drag.press(PointerEvent::primary(5.0, 5.0), left_only);
        assert_eq!(drag.release(PointerEvent::new(5.0, 5.0, 1), left_only), None);
        assert!(drag.is_pressed());
    }

    #[test]
    fn test_drag_moves_opposite_to_pointer() {
        let mut drag = DragEngine::new();
        let config = DragScrollConfig::default();
        drag.press(PointerEvent::primary(200.0, 50.0), config.drag_buttons);

        let next = drag
            .drag_to(PointerEvent::primary(150.0, 40.0), Point::new(100.0, 0.0), &config)
            .unwrap();
        assert_eq!(next, Point::new(150.0, 10.0));

        // Deltas are relative to the previous sample
        let next = drag
            .drag_to(PointerEvent::primary(140.0, 40.0), next, &config)
            .unwrap();
        assert_eq!(next, Point::new(160.0, 10.0));
    }

    #[test]
    fn test_axis_lock() {
        let mut drag = DragEngine::new();
        let config = DragScrollConfig {
            x_disabled: true,
            ..Default::default()
        };
        drag.press(PointerEvent::primary(100.0, 100.0), config.drag_buttons);

        let next = drag
            .drag_to(PointerEvent::primary(0.0, 70.0), Point::new(40.0, 0.0), &config)
            .unwrap();
        assert_eq!(next, Point::new(40.0, 30.0));
        // Locked axis keeps its press coordinate
        assert_eq!(drag.down_position(), Point::new(100.0, 70.0));
    }

    #[test]
    fn test_no_offsets_without_session() {
        let mut drag = DragEngine::new();
        let config = DragScrollConfig::default();
        assert!(drag
            .drag_to(PointerEvent::primary(0.0, 0.0), Point::ZERO, &config)
            .is_none());

        drag.press(PointerEvent::primary(0.0, 0.0), config.drag_buttons);
        let disabled = DragScrollConfig {
            disabled: true,
            ..Default::default()
        };
        assert!(drag
            .drag_to(PointerEvent::primary(10.0, 0.0), Point::ZERO, &disabled)
            .is_none());

        drag.cancel();
        assert!(!drag.is_pressed());
    }
}
