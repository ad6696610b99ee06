//! Drag scroll configuration
//!
//! Options are set by the host binding layer and are read-only to the
//! engine; [`DragScroll::attach`](crate::DragScroll::attach) swaps in a new
//! set and re-runs axis and scrollbar setup.
//!
//! Configuration can also be loaded from TOML, every key is optional:
//!
//! ```toml
//! scrollbar_hidden = true
//! snap_disabled = false
//! drag_buttons = 1        # left only
//!
//! [timing]
//! snap_duration_ms = 300
//! ```

use dragscroll_core::{Axis, ButtonMask};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Animation and debounce timings, in milliseconds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapTiming {
    /// Duration of snap and navigation animations
    pub snap_duration_ms: u32,
    /// Scroll inactivity after which a passive scroll is considered settled
    pub settle_delay_ms: u32,
    /// Time between animation frames
    pub frame_interval_ms: u32,
}

impl Default for SnapTiming {
    fn default() -> Self {
        Self {
            snap_duration_ms: 500,
            settle_delay_ms: 500,
            frame_interval_ms: 20,
        }
    }
}

/// Behaviour switches for one drag scroll container
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragScrollConfig {
    /// Hide native scrollbars while keeping the content scrollable
    pub scrollbar_hidden: bool,
    /// Disable dragging and scrolling on both axes
    pub disabled: bool,
    /// Disable horizontal dragging and scrolling
    pub x_disabled: bool,
    /// Disable vertical dragging and scrolling
    pub y_disabled: bool,
    /// Disable dragging only; native scrolling keeps working
    pub drag_disabled: bool,
    /// Disable snapping to child boundaries
    pub snap_disabled: bool,
    /// Pointer buttons allowed to start a drag
    pub drag_buttons: ButtonMask,
    pub timing: SnapTiming,
}

impl DragScrollConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Config with hidden scrollbars
    pub fn hidden_scrollbar() -> Self {
        Self {
            scrollbar_hidden: true,
            ..Default::default()
        }
    }

    /// Config without snapping
    pub fn free_scroll() -> Self {
        Self {
            snap_disabled: true,
            ..Default::default()
        }
    }

    /// Replace the drag button mask from raw bits
    pub fn with_drag_buttons_bits(mut self, bits: u8) -> Result<Self> {
        self.drag_buttons = ButtonMask::from_bits(bits)?;
        Ok(self)
    }

    /// Whether pointer drags move the given axis
    pub fn drags_axis(&self, axis: Axis) -> bool {
        !self.axis_disabled(axis) && !self.drag_disabled
    }

    /// Whether native scrolling is allowed on the given axis
    pub fn scrolls_axis(&self, axis: Axis) -> bool {
        !self.axis_disabled(axis) && !self.disabled
    }

    fn axis_disabled(&self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.x_disabled,
            Axis::Y => self.y_disabled,
        }
    }
}
