//! dragscroll Core
//!
//! Foundational primitives shared by the dragscroll engine crates:
//!
//! - **Pointer Events**: host-agnostic pointer input and button masks
//! - **Geometry**: points, sizes, axes and per-axis overflow
//! - **State Machines**: small typed transition tables for interaction phases
//!
//! # Example
//!
//! ```rust
//! use dragscroll_core::fsm::{StateMachine, Transition};
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq)]
//! enum Phase { Idle, Pressed }
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq)]
//! enum Input { Down, Up }
//!
//! let mut fsm = StateMachine::new(
//!     Phase::Idle,
//!     [
//!         Transition::new(Phase::Idle, Input::Down, Phase::Pressed),
//!         Transition::new(Phase::Pressed, Input::Up, Phase::Idle),
//!     ],
//! );
//!
//! assert_eq!(fsm.send(Input::Down), Some(Phase::Pressed));
//! assert_eq!(fsm.send(Input::Down), None);
//! ```

pub mod events;
pub mod fsm;
pub mod geometry;

pub use events::{
    ButtonMask, EventKind, EventResponse, InvalidButtonMask, ListenerTarget, PointerButton,
    PointerEvent,
};
pub use fsm::{StateMachine, StateMachineBuilder, Transition};
pub use geometry::{Axis, Overflow, Point, Size};
