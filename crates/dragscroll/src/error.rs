//! Engine error types

use dragscroll_core::{EventKind, InvalidButtonMask, ListenerTarget};
use thiserror::Error;

/// A host declined to register an event listener
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("listener refused: {reason}")]
pub struct ListenerRefused {
    pub reason: String,
}

impl ListenerRefused {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Errors raised while configuring or constructing a [`DragScroll`](crate::DragScroll)
#[derive(Error, Debug)]
pub enum DragScrollError {
    /// Configuration text could not be parsed
    #[error("invalid drag scroll configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Drag button mask with unknown bits
    #[error(transparent)]
    InvalidButtonMask(#[from] InvalidButtonMask),

    /// The host refused one of the listeners registered at construction
    #[error("failed to register {kind:?} listener on {target:?}")]
    ListenerRegistration {
        target: ListenerTarget,
        kind: EventKind,
        #[source]
        source: ListenerRefused,
    },
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, DragScrollError>;
