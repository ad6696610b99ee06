//! Pointer event types
//!
//! Host-agnostic pointer input, button masks, and the listener vocabulary the
//! engine uses to describe which host events it subscribes to.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Physical pointer button
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Left,
    Center,
    Right,
}

impl PointerButton {
    /// Map a host button index (0 = main, 1 = auxiliary, 2 = secondary)
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(PointerButton::Left),
            1 => Some(PointerButton::Center),
            2 => Some(PointerButton::Right),
            _ => None,
        }
    }

    /// Host button index for this button
    pub const fn index(self) -> u8 {
        match self {
            PointerButton::Left => 0,
            PointerButton::Center => 1,
            PointerButton::Right => 2,
        }
    }

    /// Bit used for this button in a [`ButtonMask`]
    pub const fn mask_bit(self) -> u8 {
        match self {
            PointerButton::Left => ButtonMask::LEFT,
            PointerButton::Center => ButtonMask::CENTER,
            PointerButton::Right => ButtonMask::RIGHT,
        }
    }
}

/// Raw mask value with bits outside `LEFT | CENTER | RIGHT`
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("button mask {0:#05b} has bits outside left|center|right")]
pub struct InvalidButtonMask(pub u8);

/// Set of pointer buttons allowed to start a drag
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ButtonMask {
    bits: u8,
}

impl ButtonMask {
    pub const LEFT: u8 = 0b001;
    pub const CENTER: u8 = 0b010;
    pub const RIGHT: u8 = 0b100;

    pub const NONE: ButtonMask = ButtonMask { bits: 0 };
    pub const ALL: ButtonMask = ButtonMask {
        bits: Self::LEFT | Self::CENTER | Self::RIGHT,
    };

    /// Create a mask from individual button flags
    pub const fn new(left: bool, center: bool, right: bool) -> Self {
        let mut bits = 0;
        if left {
            bits |= Self::LEFT;
        }
        if center {
            bits |= Self::CENTER;
        }
        if right {
            bits |= Self::RIGHT;
        }
        Self { bits }
    }

    /// Create from raw bits, rejecting unknown buttons
    pub const fn from_bits(bits: u8) -> Result<Self, InvalidButtonMask> {
        if bits & !Self::ALL.bits != 0 {
            return Err(InvalidButtonMask(bits));
        }
        Ok(Self { bits })
    }

    /// Raw bits
    pub const fn bits(&self) -> u8 {
        self.bits
    }

    /// Check if a button is part of the mask
    pub const fn contains(&self, button: PointerButton) -> bool {
        self.bits & button.mask_bit() != 0
    }

    /// Check a host button index; unknown indices are never accepted
    pub const fn accepts_index(&self, index: u8) -> bool {
        match PointerButton::from_index(index) {
            Some(button) => self.contains(button),
            None => false,
        }
    }
}

impl Default for ButtonMask {
    fn default() -> Self {
        Self::ALL
    }
}

impl TryFrom<u8> for ButtonMask {
    type Error = InvalidButtonMask;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        Self::from_bits(bits)
    }
}

impl From<ButtonMask> for u8 {
    fn from(mask: ButtonMask) -> u8 {
        mask.bits
    }
}

/// A pointer sample delivered by the host
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// Client-space x coordinate
    pub x: f32,
    /// Client-space y coordinate
    pub y: f32,
    /// Host button index (0 = main, 1 = auxiliary, 2 = secondary)
    pub button: u8,
}

impl PointerEvent {
    pub const fn new(x: f32, y: f32, button: u8) -> Self {
        Self { x, y, button }
    }

    /// Main-button sample
    pub const fn primary(x: f32, y: f32) -> Self {
        Self::new(x, y, 0)
    }

    pub const fn pointer_button(&self) -> Option<PointerButton> {
        PointerButton::from_index(self.button)
    }
}

/// Host event kinds the engine subscribes to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerDown,
    PointerMove,
    PointerUp,
    Scroll,
    Resize,
}

/// Where a listener is attached
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListenerTarget {
    /// The scrollable element itself
    Surface,
    /// Document-wide, so a drag can continue outside the element
    Document,
    /// The top-level window
    Window,
}

/// What the host should do with an event after the engine saw it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum EventResponse {
    /// The engine did not act on the event
    #[default]
    Ignored,
    /// The engine consumed the event
    Handled,
    /// The engine consumed the event and the host default action
    /// (text selection, native drag) must be suppressed
    PreventDefault,
}

impl EventResponse {
    pub fn default_prevented(&self) -> bool {
        matches!(self, EventResponse::PreventDefault)
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, EventResponse::Ignored)
    }
}
