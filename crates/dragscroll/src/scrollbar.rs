//! Scrollbar visibility manager
//!
//! Native scrollbars are hidden by clipping rather than by disabling
//! overflow: the element is reparented into a wrapper of its original size
//! with overflow hidden, then enlarged by the measured scrollbar width so the
//! bars fall outside the clip region. Scrolling keeps working because the
//! element itself still overflows.

use std::fmt;

use dragscroll_core::{Axis, Size, StateMachine};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Used when the probe measures no scrollbar (overlay scrollbars)
pub const FALLBACK_SCROLLBAR_WIDTH: f32 = 20.0;

/// CSS-like length for an element's declared width or height
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    #[default]
    Auto,
    Px(f32),
    Percent(f32),
    /// `calc(<percent>% + <px>px)`
    PercentPlusPx(f32, f32),
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Auto => f.write_str("auto"),
            Dimension::Px(px) => write!(f, "{px}px"),
            Dimension::Percent(pct) => write!(f, "{pct}%"),
            Dimension::PercentPlusPx(pct, px) => write!(f, "calc({pct}% + {px}px)"),
        }
    }
}

/// Declared width and height of an element
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleSize {
    pub width: Dimension,
    pub height: Dimension,
}

impl StyleSize {
    pub const fn new(width: Dimension, height: Dimension) -> Self {
        Self { width, height }
    }
}

/// Offset widths measured on a fixed-size probe container
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProbeMeasurement {
    /// Probe width without scrollbars
    pub without_scrollbar: f32,
    /// Width of a content-filling inner element with scrollbars forced on
    pub with_scrollbar: f32,
}

impl ProbeMeasurement {
    /// Native scrollbar thickness, or the fallback when nothing was measured
    pub fn scrollbar_width(&self) -> f32 {
        let delta = self.without_scrollbar - self.with_scrollbar;
        if delta > 0.0 {
            delta
        } else {
            FALLBACK_SCROLLBAR_WIDTH
        }
    }
}

/// Element tree and style operations needed to hide scrollbars
pub trait ClipHost {
    /// Whether the element is rendered at all
    fn is_displayed(&self) -> bool;

    /// Declared size of the scrollable element
    fn style_size(&self) -> StyleSize;

    fn set_style_size(&mut self, size: StyleSize);

    /// Reparent the element into a new overflow-hidden wrapper of `size`
    fn insert_clip_wrapper(&mut self, size: StyleSize);

    /// Put the element back under its original parent and drop the wrapper
    fn remove_clip_wrapper(&mut self);

    /// Create the probe container, measure it, and remove it again
    fn measure_scrollbar_probe(&mut self) -> ProbeMeasurement;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ScrollbarVisibility {
    Visible,
    Hidden,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum VisibilityCommand {
    Hide,
    Show,
}

/// Tracks whether the element is wrapped and restores it on show
pub struct ScrollbarManager {
    fsm: StateMachine<ScrollbarVisibility, VisibilityCommand>,
    scrollbar_width: f32,
    /// Declared size to restore when scrollbars are shown again
    base_size: StyleSize,
    /// Size of the clip wrapper while hidden
    wrapper: Option<StyleSize>,
}

impl ScrollbarManager {
    pub fn new(scrollbar_width: f32, base_size: StyleSize) -> Self {
        Self {
            fsm: StateMachine::builder(ScrollbarVisibility::Visible)
                .on(
                    ScrollbarVisibility::Visible,
                    VisibilityCommand::Hide,
                    ScrollbarVisibility::Hidden,
                )
                .on(
                    ScrollbarVisibility::Hidden,
                    VisibilityCommand::Show,
                    ScrollbarVisibility::Visible,
                )
                .history_limit(0)
                .build(),
            scrollbar_width,
            base_size,
            wrapper: None,
        }
    }

    /// Run the one-time scrollbar probe and record the element's size
    pub fn probe<H: ClipHost + ?Sized>(host: &mut H) -> Self {
        let measurement = host.measure_scrollbar_probe();
        let scrollbar_width = measurement.scrollbar_width();
        debug!(scrollbar_width, ?measurement, "probed native scrollbar width");
        Self::new(scrollbar_width, host.style_size())
    }

    pub fn visibility(&self) -> ScrollbarVisibility {
        self.fsm.current_state()
    }

    pub fn scrollbar_width(&self) -> f32 {
        self.scrollbar_width
    }

    pub fn base_size(&self) -> StyleSize {
        self.base_size
    }

    pub fn is_wrapped(&self) -> bool {
        self.wrapper.is_some()
    }

    /// Move to the requested visibility, returning whether anything changed
    pub fn apply<H: ClipHost + ?Sized>(&mut self, host: &mut H, hidden: bool) -> bool {
        if hidden {
            self.hide(host)
        } else {
            self.show(host)
        }
    }

    pub fn hide<H: ClipHost + ?Sized>(&mut self, host: &mut H) -> bool {
        if self.wrapper.is_some() || !host.is_displayed() {
            return false;
        }

        let original = host.style_size();
        self.base_size = original;
        host.insert_clip_wrapper(original);

        let oversized = self.oversized();
        host.set_style_size(StyleSize::new(oversized, oversized));
        self.wrapper = Some(original);
        self.fsm.send(VisibilityCommand::Hide);

        debug!(width = %original.width, height = %original.height, "scrollbars hidden");
        true
    }

    pub fn show<H: ClipHost + ?Sized>(&mut self, host: &mut H) -> bool {
        if self.wrapper.take().is_none() {
            return false;
        }

        host.set_style_size(self.base_size);
        host.remove_clip_wrapper();
        self.fsm.send(VisibilityCommand::Show);

        debug!("scrollbars shown");
        true
    }

    /// Re-fit the oversize to the scrollbars that actually exist.
    ///
    /// A horizontal bar only appears when content overflows horizontally and
    /// eats height; a vertical bar likewise eats width.
    pub fn check_scrollbar<H: ClipHost + ?Sized>(
        &mut self,
        host: &mut H,
        viewport: Size,
        content: Size,
    ) {
        if self.wrapper.is_none() {
            return;
        }

        let full = Dimension::Percent(100.0);
        let height = if viewport.fits(content, Axis::X) {
            full
        } else {
            self.oversized()
        };
        let width = if viewport.fits(content, Axis::Y) {
            full
        } else {
            self.oversized()
        };
        host.set_style_size(StyleSize::new(width, height));
    }

    /// Re-record the size to restore, read from the wrapper while hidden
    pub fn mark_dimensions<H: ClipHost + ?Sized>(&mut self, host: &H) {
        self.base_size = match self.wrapper {
            Some(wrapper) => wrapper,
            None => host.style_size(),
        };
    }

    fn oversized(&self) -> Dimension {
        Dimension::PercentPlusPx(100.0, self.scrollbar_width)
    }
}
