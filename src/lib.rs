//! Math Snake - a steer-the-snake arithmetic quiz game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (locomotion, trail follower, quiz, session state)
//! - `persistence`: High-score load/save behind an injectable store
//! - `tuning`: Data-driven game balance
//! - `hud`: Text surfaces for score, high score, level and question

pub mod hud;
pub mod persistence;
pub mod sim;
pub mod tuning;

pub use persistence::HighScoreStore;
pub use tuning::Tuning;

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth movement)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Arena half extents (the play field is a rectangle on the XZ plane)
    pub const ARENA_HALF_EXTENT_X: f32 = 20.0;
    pub const ARENA_HALF_EXTENT_Z: f32 = 20.0;

    /// Contact distance between the head and an answer marker
    pub const PICKUP_RADIUS: f32 = 1.0;
    /// Contact distance between the head and a body segment
    pub const SEGMENT_RADIUS: f32 = 0.5;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Forward direction on the XZ plane for a yaw about +Y (yaw 0 faces +Z)
#[inline]
pub fn yaw_to_forward(yaw: f32) -> Vec3 {
    Vec3::new(yaw.sin(), 0.0, yaw.cos())
}

/// Yaw that faces `from` toward `to` on the XZ plane.
/// Returns None when the two points coincide horizontally.
#[inline]
pub fn heading_between(from: Vec3, to: Vec3) -> Option<f32> {
    let dx = to.x - from.x;
    let dz = to.z - from.z;
    if dx * dx + dz * dz < 1e-8 {
        None
    } else {
        Some(dx.atan2(dz))
    }
}
