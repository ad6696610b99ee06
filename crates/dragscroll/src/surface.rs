//! Scroll surface adapter
//!
//! The engine never touches a rendering environment directly. Everything it
//! needs from the scrollable element (offsets, sizes, direct children) goes
//! through [`ScrollSurface`], so the logic runs unchanged against a browser
//! scroll box, a native widget, or the in-memory
//! [`SyntheticSurface`](crate::synthetic::SyntheticSurface).

use dragscroll_core::{Axis, Overflow, Size};
use serde::Serialize;

/// Width snapshot of one direct child of the surface
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ChildGeometry {
    pub index: usize,
    pub width: f32,
}

impl ChildGeometry {
    pub fn new(index: usize, width: f32) -> Self {
        // Missing or negative measurements contribute nothing
        let width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        Self { index, width }
    }

    /// Snapshot a list of widths in order
    pub fn from_widths(widths: impl IntoIterator<Item = f32>) -> Vec<Self> {
        widths
            .into_iter()
            .enumerate()
            .map(|(index, width)| Self::new(index, width))
            .collect()
    }
}

/// Accessors and the single offset mutator of a scrollable element
pub trait ScrollSurface {
    /// Current `(x, y)` scroll offsets
    fn offsets(&self) -> (f32, f32);

    /// Move the scroll position. The surface clamps to its scrollable range.
    fn set_offsets(&mut self, x: f32, y: f32);

    /// Visible area
    fn viewport_size(&self) -> Size;

    /// Full scrollable content extent (never smaller than the viewport)
    fn content_size(&self) -> Size;

    /// Direct children in document order
    fn children(&self) -> Vec<ChildGeometry>;

    /// Enable or disable native scrolling along one axis
    fn set_overflow(&mut self, axis: Axis, overflow: Overflow);
}

/// Point-in-time snapshot of a surface
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SurfaceState {
    pub scroll_x: f32,
    pub scroll_y: f32,
    pub viewport: Size,
    pub content: Size,
    pub children: Vec<ChildGeometry>,
}

impl SurfaceState {
    /// Read everything from the surface, children included
    pub fn capture<S: ScrollSurface + ?Sized>(surface: &S) -> Self {
        Self::with_children(surface, surface.children())
    }

    /// Read offsets and sizes from the surface, reusing a child snapshot
    pub fn with_children<S: ScrollSurface + ?Sized>(
        surface: &S,
        children: Vec<ChildGeometry>,
    ) -> Self {
        let (scroll_x, scroll_y) = surface.offsets();
        Self {
            scroll_x,
            scroll_y,
            viewport: surface.viewport_size(),
            content: surface.content_size(),
            children,
        }
    }

    /// Sum of the widths of the first `count` children
    pub fn cumulative_width(&self, count: usize) -> f32 {
        self.children.iter().take(count).map(|c| c.width).sum()
    }

    /// Whether the trailing edge of the viewport reached the content end
    pub fn at_right_end(&self) -> bool {
        reaches_right_end(self.scroll_x, self.viewport, self.content)
    }

    /// Whether all content is visible horizontally
    pub fn content_fits(&self) -> bool {
        self.viewport.fits(self.content, Axis::X)
    }
}

/// `scroll_x + viewport.width >= content.width`
pub fn reaches_right_end(scroll_x: f32, viewport: Size, content: Size) -> bool {
    scroll_x + viewport.width >= content.width
}
