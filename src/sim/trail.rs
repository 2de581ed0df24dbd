//! Position history and trail-following math
//!
//! The head records where it has been; each body segment chases a delayed
//! sample of that record. Only the suffix `segments * gap` deep is ever
//! read, so the record is a ring trimmed to that length plus a margin
//! rather than an ever-growing list.

use glam::Vec3;
use std::collections::VecDeque;

/// Ring of past head positions, newest first
#[derive(Debug, Clone)]
pub struct PathHistory {
    samples: VecDeque<Vec3>,
    capacity: usize,
}

impl PathHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity.max(1)),
            capacity: capacity.max(1),
        }
    }

    /// Record the head's newest position, dropping the oldest past capacity
    pub fn record(&mut self, pos: Vec3) {
        self.samples.push_front(pos);
        while self.samples.len() > self.capacity {
            self.samples.pop_back();
        }
    }

    /// Raise the retained length (called when the snake grows).
    /// Capacity never shrinks mid-session; stale samples age out naturally.
    pub fn grow_capacity(&mut self, capacity: usize) {
        if capacity > self.capacity {
            self.capacity = capacity;
        }
    }

    /// Sample at `index`, clamped to the oldest entry. Segments early in a
    /// session read past the end of the short record and bunch up near the
    /// head; the clamp reproduces that.
    pub fn sample(&self, index: usize) -> Option<Vec3> {
        if self.samples.is_empty() {
            return None;
        }
        let clamped = index.min(self.samples.len() - 1);
        self.samples.get(clamped).copied()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Ease a follower toward its target by `rate * dt` of the remaining
/// distance. Exponential: the follower closes in but never lands exactly.
#[inline]
pub fn follow_sample(pos: Vec3, target: Vec3, rate: f32, dt: f32) -> Vec3 {
    pos + (target - pos) * (rate * dt)
}
