//! Fixed-increment scroll tween
//!
//! Advances a single offset from `start` toward `target` in constant time
//! increments. The final frame is always the exact target regardless of how
//! the duration divides into increments.

use crate::easing::Easing;

/// One frame produced by [`ScrollTween::step`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenFrame {
    pub offset: f32,
    pub finished: bool,
}

/// An in-flight scroll animation
#[derive(Clone, Debug)]
pub struct ScrollTween {
    start: f32,
    target: f32,
    duration_ms: u32,
    increment_ms: u32,
    elapsed_ms: u32,
    easing: Easing,
}

impl ScrollTween {
    /// Create a tween; a zero increment is treated as 1ms
    pub fn new(start: f32, target: f32, duration_ms: u32, increment_ms: u32) -> Self {
        Self {
            start,
            target,
            duration_ms,
            increment_ms: increment_ms.max(1),
            elapsed_ms: 0,
            easing: Easing::EaseInOutQuad,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn start(&self) -> f32 {
        self.start
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn increment_ms(&self) -> u32 {
        self.increment_ms
    }

    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed_ms >= self.duration_ms && self.elapsed_ms > 0
    }

    /// Advance by one increment
    pub fn step(&mut self) -> TweenFrame {
        self.elapsed_ms = self.elapsed_ms.saturating_add(self.increment_ms);

        if self.elapsed_ms >= self.duration_ms {
            return TweenFrame {
                offset: self.target,
                finished: true,
            };
        }

        let offset = self.easing.interpolate(
            self.elapsed_ms as f32,
            self.start,
            self.target - self.start,
            self.duration_ms as f32,
        );
        TweenFrame {
            offset,
            finished: false,
        }
    }
}
