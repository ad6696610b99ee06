//! dragscroll
//!
//! Headless drag-to-pan engine for scroll containers.
//!
//! # Features
//!
//! - **Drag to pan**: pointer drags scroll the container, per axis and per
//!   accepted pointer button
//! - **Snapping**: scrolling settles on child boundaries with an eased
//!   animation; `move_left`/`move_right`/`move_to` navigate child by child
//! - **Hidden scrollbars**: native scrollbars are clipped away while the
//!   content stays scrollable
//! - **Bound notifications**: listeners learn when the left or right end is
//!   reached, to drive previous/next controls
//!
//! The engine talks to its environment only through the [`Host`] traits.
//! [`SyntheticSurface`] implements them in memory.
//!
//! # Example
//!
//! ```rust
//! use dragscroll::{DragScroll, DragScrollConfig, Size, SyntheticSurface};
//!
//! let surface = SyntheticSurface::new(Size::new(300.0, 100.0), vec![100.0; 5]);
//! let mut scroll = DragScroll::new(surface, DragScrollConfig::default()).unwrap();
//!
//! scroll.move_right();
//! scroll.advance(1_000);
//! assert_eq!(scroll.current_index(), 1);
//! assert_eq!(scroll.surface_state().scroll_x, 100.0);
//! ```

pub mod bounds;
pub mod config;
pub mod drag;
pub mod engine;
pub mod error;
pub mod host;
pub mod scrollbar;
pub mod snap;
pub mod surface;
pub mod synthetic;

pub use bounds::{BoundaryNotifier, BoundaryState, ListenerId};
pub use config::{DragScrollConfig, SnapTiming};
pub use drag::{DragEngine, DragPhase};
pub use engine::DragScroll;
pub use error::{DragScrollError, ListenerRefused, Result};
pub use host::{EventHost, Host, ListenerHandle};
pub use scrollbar::{
    ClipHost, Dimension, ProbeMeasurement, ScrollbarManager, ScrollbarVisibility, StyleSize,
    FALLBACK_SCROLLBAR_WIDTH,
};
pub use snap::{boundary_offset, locate, Located, SnapEngine, SnapTimer};
pub use surface::{ChildGeometry, ScrollSurface, SurfaceState};
pub use synthetic::{ListenerRegistry, SharedListenerRegistry, SyntheticSurface};

pub use dragscroll_core::{
    Axis, ButtonMask, EventKind, EventResponse, ListenerTarget, Overflow, Point, PointerButton,
    PointerEvent, Size,
};
