//! Host environment seams
//!
//! A [`Host`] is everything the engine consumes from its environment: the
//! scroll surface, the clip/style operations used to hide scrollbars, and
//! listener registration for the inbound events.

use dragscroll_core::{EventKind, ListenerTarget};

use crate::error::ListenerRefused;
use crate::scrollbar::ClipHost;
use crate::surface::ScrollSurface;

/// Opaque token for a registered listener
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerHandle(pub u64);

/// Event listener registration
pub trait EventHost {
    /// Subscribe the engine to `kind` events on `target`
    fn listen(
        &mut self,
        target: ListenerTarget,
        kind: EventKind,
    ) -> Result<ListenerHandle, ListenerRefused>;

    /// Remove a listener. Unknown handles are ignored.
    fn unlisten(&mut self, handle: ListenerHandle);
}

/// Full host contract for a [`DragScroll`](crate::DragScroll) instance
pub trait Host: ScrollSurface + ClipHost + EventHost {}

impl<T: ScrollSurface + ClipHost + EventHost> Host for T {}

/// Listeners every instance registers at construction
pub(crate) const LISTENERS: [(ListenerTarget, EventKind); 5] = [
    (ListenerTarget::Surface, EventKind::PointerDown),
    (ListenerTarget::Surface, EventKind::Scroll),
    (ListenerTarget::Document, EventKind::PointerMove),
    (ListenerTarget::Document, EventKind::PointerUp),
    (ListenerTarget::Window, EventKind::Resize),
];
