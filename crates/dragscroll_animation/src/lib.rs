//! dragscroll Animation System
//!
//! Time-stepped animation primitives for scroll containers.
//!
//! # Features
//!
//! - **Easing**: polynomial easing curves over normalized progress
//! - **Scroll Tweens**: fixed-increment interpolation that always lands exactly on target
//! - **Timer Scheduler**: cancellable one-shot timers on a host-driven virtual clock

pub mod easing;
pub mod scheduler;
pub mod tween;

pub use easing::Easing;
pub use scheduler::{TimerId, TimerScheduler};
pub use tween::{ScrollTween, TweenFrame};
