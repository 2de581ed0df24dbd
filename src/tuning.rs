//! Data-driven game balance
//!
//! The knobs the original designer exposed, loadable from a JSON file so
//! balance passes don't require a rebuild.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Gameplay balance knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tuning {
    /// Head forward speed (units/sec)
    pub move_speed: f32,
    /// Steering rate at full input (radians/sec)
    pub steer_speed: f32,
    /// Body segment easing rate (fraction of remaining distance per second)
    pub body_speed: f32,
    /// Spacing between consecutive segments' targets, in history samples
    pub gap: usize,
    /// Correct answers needed to advance a level
    pub answers_to_level_up: u32,
    /// Seconds a freshly spawned segment keeps its collider disabled
    pub collider_delay: f32,
    /// Height at which answer markers sit above the play field
    pub answer_height: f32,
    /// Extra history samples kept beyond what the segments read
    pub history_margin: usize,
    /// Cap on distractor draws before question generation fails
    pub max_wrong_attempts: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            steer_speed: std::f32::consts::PI, // 180 degrees/sec
            body_speed: 5.0,
            gap: 10,
            answers_to_level_up: 5,
            collider_delay: 0.5,
            answer_height: 2.0,
            history_margin: 32,
            max_wrong_attempts: 64,
        }
    }
}

impl Tuning {
    /// Load tuning from a JSON file, falling back to defaults on any miss
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Bad tuning file {}: {}, using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No tuning file at {}, using defaults", path.display());
                Self::default()
            }
        }
    }
}
