//! Math Snake entry point
//!
//! Headless native driver playing the host-engine role around the pure
//! simulation: fixed-timestep loop, proximity trigger detection, HUD
//! printing, and high-score persistence. Steering comes from a small
//! autopilot that chases the correct answer marker.

use glam::Vec3;
use std::path::Path;

use math_snake::consts::*;
use math_snake::hud::{Hud, HudSurface};
use math_snake::persistence::{HighScoreStore, JsonFileStore};
use math_snake::sim::{
    ArenaBounds, SessionState, SimEvent, TickInput, Trigger, on_trigger, tick,
};
use math_snake::{Tuning, heading_between, normalize_angle};

const TUNING_PATH: &str = "tuning.json";
const HIGH_SCORE_PATH: &str = "highscore.json";
/// Demo duration in simulated seconds when no argument is given
const DEFAULT_DEMO_SECS: u64 = 60;

fn main() {
    env_logger::init();
    log::info!("Math Snake (headless) starting...");

    let mut args = std::env::args().skip(1);
    let seed: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(rand::random);
    let demo_secs: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_DEMO_SECS);
    log::info!("seed {seed}, running {demo_secs}s of simulation");

    let tuning = Tuning::load(Path::new(TUNING_PATH));
    let mut store = JsonFileStore::new(HIGH_SCORE_PATH);
    let high_score = store.load();

    let bounds = ArenaBounds::from_volume(
        Vec3::ZERO,
        Vec3::new(ARENA_HALF_EXTENT_X, 1.0, ARENA_HALF_EXTENT_Z),
    );

    let mut state = match SessionState::new(seed, tuning, Some(bounds), high_score) {
        Ok(state) => state,
        Err(e) => {
            log::error!("failed to start session: {e}");
            std::process::exit(1);
        }
    };
    let mut hud = Hud::new(&state);
    print_hud(&hud);

    let total_ticks = (demo_secs as f64 / f64::from(SIM_DT)).round() as u64;
    for _ in 0..total_ticks {
        let input = TickInput {
            steer: autopilot_steer(&state),
        };
        tick(&mut state, &input, SIM_DT);

        if let Some(trigger) = detect_contact(&state) {
            if let Err(e) = on_trigger(&mut state, trigger) {
                log::error!("question generation failed: {e}");
                break;
            }
        }

        for event in state.drain_events() {
            match event {
                SimEvent::HighScoreChanged { high_score } => store.save(high_score),
                SimEvent::LevelUp { level } => println!("*** Level {level}! ***"),
                SimEvent::GameOver { final_score } => {
                    println!("Game over! Final score: {final_score}");
                    if let Err(e) = state.restart() {
                        log::error!("failed to restart session: {e}");
                        return;
                    }
                }
                // Spawn/destroy requests: a rendering host would mirror
                // entities here; the headless driver just traces them
                SimEvent::SegmentSpawned { index } => log::debug!("spawned segment {index}"),
                SimEvent::ColliderEnabled { index } => log::debug!("segment {index} collidable"),
                SimEvent::AnswersCleared => log::debug!("answer markers destroyed"),
                SimEvent::QuestionChanged | SimEvent::ScoreChanged { .. } => {}
            }
        }

        for surface in hud.sync(&state) {
            match surface {
                HudSurface::Score => println!("{}", hud.score_text),
                HudSurface::HighScore => println!("{}", hud.high_score_text),
                HudSurface::Level => println!("{}", hud.level_text),
                HudSurface::Question => println!("{}", hud.question_text),
            }
        }
    }

    log::info!(
        "demo finished: score {}, high score {}",
        state.score,
        state.high_score
    );
}

fn print_hud(hud: &Hud) {
    println!("{}", hud.score_text);
    println!("{}", hud.high_score_text);
    println!("{}", hud.level_text);
    println!("{}", hud.question_text);
}

/// Steer toward the correct answer marker. The driver may peek at the
/// correct flag; the sim itself never does.
fn autopilot_steer(state: &SessionState) -> f32 {
    let target = state.question_set.correct().pos;
    match heading_between(state.head.pos, target) {
        Some(desired) => {
            let delta = normalize_angle(desired - state.head.yaw);
            (delta * 4.0).clamp(-1.0, 1.0)
        }
        None => 0.0,
    }
}

/// Horizontal distance, the only axis contacts care about
fn xz_distance(a: Vec3, b: Vec3) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    (dx * dx + dz * dz).sqrt()
}

/// The host-physics stand-in: proximity checks against answer markers and
/// collision-active body segments
fn detect_contact(state: &SessionState) -> Option<Trigger> {
    for opt in &state.question_set.options {
        if xz_distance(state.head.pos, opt.pos) < PICKUP_RADIUS {
            return Some(if opt.correct {
                Trigger::CorrectAnswer
            } else {
                Trigger::WrongAnswer
            });
        }
    }
    for (i, seg) in state.segments.iter().enumerate() {
        if seg.collider_enabled && xz_distance(state.head.pos, seg.pos) < SEGMENT_RADIUS {
            return Some(Trigger::OwnBody { segment: i });
        }
    }
    None
}
