//! Per-tick update and trigger dispatch
//!
//! The host calls `tick` once per fixed simulation step and `on_trigger`
//! whenever its physics layer reports a contact. Everything runs
//! synchronously on the host's simulation thread; the only deferred work
//! is the segment collider-enable timer, counted down inside `tick`.

use crate::{heading_between, normalize_angle, yaw_to_forward};

use super::quiz::QuizError;
use super::state::{SessionPhase, SessionState, SimEvent};
use super::trail::follow_sample;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Horizontal steering axis in [-1, 1]
    pub steer: f32,
}

/// A contact reported by the host's physics layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Head touched the option that evaluates to the target
    CorrectAnswer,
    /// Head touched a distractor
    WrongAnswer,
    /// Head touched its own body segment at `segment`
    OwnBody { segment: usize },
}

/// Advance the session by one fixed timestep
pub fn tick(state: &mut SessionState, input: &TickInput, dt: f32) {
    if state.phase == SessionPhase::GameOver {
        return;
    }
    state.time_ticks += 1;

    state.refresh_high_score();

    // Move forward, then steer
    let steer = input.steer.clamp(-1.0, 1.0);
    state.head.pos += yaw_to_forward(state.head.yaw) * state.tuning.move_speed * dt;
    state.head.yaw = normalize_angle(state.head.yaw + steer * state.tuning.steer_speed * dt);

    // Record the head's path, newest first
    state.history.record(state.head.pos);

    // Each segment chases the sample `i * gap` ticks behind the head.
    // Short histories clamp to the oldest sample, so young snakes bunch
    // up near the head.
    let gap = state.tuning.gap;
    let body_speed = state.tuning.body_speed;
    let history = &state.history;
    for (i, seg) in state.segments.iter_mut().enumerate() {
        if let Some(target) = history.sample(i * gap) {
            seg.pos = follow_sample(seg.pos, target, body_speed, dt);
            if let Some(yaw) = heading_between(seg.pos, target) {
                seg.yaw = yaw;
            }
        }
    }

    // Keep the head inside the play field. Without bounds the snake roams
    // free (warned once at session start).
    if let Some(bounds) = &state.bounds {
        state.head.pos = bounds.clamp_xz(state.head.pos);
    }

    // Spawn-delay timers: re-enable colliders that have run down
    let mut enabled = Vec::new();
    for (i, seg) in state.segments.iter_mut().enumerate() {
        if !seg.collider_enabled {
            seg.enable_timer -= dt;
            if seg.enable_timer <= 0.0 {
                seg.collider_enabled = true;
                seg.enable_timer = 0.0;
                enabled.push(i);
            }
        }
    }
    for index in enabled {
        state.push_event(SimEvent::ColliderEnabled { index });
    }
}

/// Handle a contact event from the host
pub fn on_trigger(state: &mut SessionState, trigger: Trigger) -> Result<(), QuizError> {
    if state.phase != SessionPhase::Alive {
        return Ok(());
    }

    match trigger {
        Trigger::CorrectAnswer => {
            // Batch-destroy the old markers, grow, then level bookkeeping
            // before regeneration so the next question uses the new level
            state.push_event(SimEvent::AnswersCleared);
            state.grow();
            state.streak += 1;
            if state.streak >= state.tuning.answers_to_level_up {
                state.level += 1;
                state.streak = 0;
                log::info!("level up -> {}", state.level);
                state.push_event(SimEvent::LevelUp { level: state.level });
            }
            state.regenerate_question()?;
        }
        Trigger::WrongAnswer => game_over(state),
        Trigger::OwnBody { segment } => {
            // Freshly spawned segments are inert until their delay expires
            let active = state
                .segments
                .get(segment)
                .is_some_and(|s| s.collider_enabled);
            if active {
                log::debug!("head collided with body segment {segment}");
                game_over(state);
            }
        }
    }
    Ok(())
}

fn game_over(state: &mut SessionState) {
    state.refresh_high_score();
    state.phase = SessionPhase::GameOver;
    log::info!(
        "game over: score {}, high score {}",
        state.score,
        state.high_score
    );
    state.push_event(SimEvent::GameOver {
        final_score: state.score,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::arena::ArenaBounds;
    use crate::tuning::Tuning;
    use glam::Vec3;

    fn session() -> SessionState {
        SessionState::new(42, Tuning::default(), None, 0).unwrap()
    }

    fn bounded_session() -> SessionState {
        let bounds = ArenaBounds::from_volume(Vec3::ZERO, Vec3::new(5.0, 1.0, 5.0));
        SessionState::new(42, Tuning::default(), Some(bounds), 0).unwrap()
    }

    #[test]
    fn test_head_moves_forward() {
        let mut state = session();
        tick(&mut state, &TickInput::default(), SIM_DT);
        // Yaw 0 faces +Z
        let expected = state.tuning.move_speed * SIM_DT;
        assert!((state.head.pos.z - expected).abs() < 1e-5);
        assert_eq!(state.head.pos.x, 0.0);
        assert_eq!(state.head.pos.y, 0.0);
    }

    #[test]
    fn test_steering_turns_head() {
        let mut state = session();
        let input = TickInput { steer: 1.0 };
        tick(&mut state, &input, SIM_DT);
        let expected = state.tuning.steer_speed * SIM_DT;
        assert!((state.head.yaw - expected).abs() < 1e-5);

        // Out-of-range input behaves like full deflection
        let mut other = session();
        tick(&mut other, &TickInput { steer: 7.5 }, SIM_DT);
        assert!((other.head.yaw - state.head.yaw).abs() < 1e-6);
    }

    #[test]
    fn test_history_records_every_tick() {
        let mut state = session();
        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.history.len(), 10);
        // Newest sample is the current head position
        assert_eq!(state.history.sample(0), Some(state.head.pos));
    }

    #[test]
    fn test_bounds_clamp_head() {
        let mut state = bounded_session();
        // Drive straight at the far wall for two simulated seconds
        for _ in 0..240 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert!(state.head.pos.z <= 5.0 + 1e-5);
        assert!(state.bounds.unwrap().contains_xz(state.head.pos));
    }

    #[test]
    fn test_segment_trails_the_head() {
        let mut state = session();
        state.grow();
        for _ in 0..240 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        let seg = &state.segments[0];
        // Moved off the spawn pose, but still behind the head
        assert!(seg.pos.z > 0.0);
        assert!(seg.pos.z < state.head.pos.z);
        // Facing forward along the path
        assert!(seg.yaw.abs() < 0.2);
    }

    #[test]
    fn test_collider_enables_after_delay() {
        let mut state = session();
        state.grow();
        state.drain_events();
        assert!(!state.segments[0].collider_enabled);

        // 0.4s: still inert
        for _ in 0..48 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert!(!state.segments[0].collider_enabled);

        // Past 0.5s: enabled, host notified
        for _ in 0..20 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert!(state.segments[0].collider_enabled);
        let events = state.drain_events();
        assert!(events.contains(&SimEvent::ColliderEnabled { index: 0 }));
    }

    #[test]
    fn test_correct_answer_grows_and_regenerates() {
        let mut state = session();
        state.drain_events();

        on_trigger(&mut state, Trigger::CorrectAnswer).unwrap();
        assert_eq!(state.segments.len(), 1);
        assert_eq!(state.score, 1);
        assert_eq!(state.streak, 1);
        assert_eq!(state.phase, SessionPhase::Alive);
        assert_eq!(state.question_set.options.len(), 4);

        let events = state.drain_events();
        assert!(events.contains(&SimEvent::AnswersCleared));
        assert!(events.contains(&SimEvent::QuestionChanged));
    }

    #[test]
    fn test_level_up_exactly_at_threshold() {
        let mut state = session();
        let threshold = state.tuning.answers_to_level_up;

        for i in 1..threshold {
            on_trigger(&mut state, Trigger::CorrectAnswer).unwrap();
            assert_eq!(state.level, 1, "leveled early at answer {i}");
            assert_eq!(state.streak, i);
        }
        state.drain_events();

        on_trigger(&mut state, Trigger::CorrectAnswer).unwrap();
        assert_eq!(state.level, 2);
        assert_eq!(state.streak, 0);
        assert_eq!(state.segments.len() as u32, threshold);
        assert_eq!(state.score, threshold);
        let events = state.drain_events();
        assert!(events.contains(&SimEvent::LevelUp { level: 2 }));
    }

    #[test]
    fn test_wrong_answer_is_game_over() {
        let mut state = session();
        on_trigger(&mut state, Trigger::CorrectAnswer).unwrap();
        state.drain_events();

        on_trigger(&mut state, Trigger::WrongAnswer).unwrap();
        assert_eq!(state.phase, SessionPhase::GameOver);
        let events = state.drain_events();
        assert!(events.contains(&SimEvent::GameOver { final_score: 1 }));
        assert!(events.contains(&SimEvent::HighScoreChanged { high_score: 1 }));

        // Terminal: ticks and triggers are no-ops now
        let pos = state.head.pos;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.head.pos, pos);
        on_trigger(&mut state, Trigger::CorrectAnswer).unwrap();
        assert_eq!(state.segments.len(), 1);
    }

    #[test]
    fn test_self_collision_respects_collider_flag() {
        let mut state = session();
        state.grow();

        // Spawn delay still running: contact is ignored
        on_trigger(&mut state, Trigger::OwnBody { segment: 0 }).unwrap();
        assert_eq!(state.phase, SessionPhase::Alive);

        // Unknown segment index: ignored too
        on_trigger(&mut state, Trigger::OwnBody { segment: 99 }).unwrap();
        assert_eq!(state.phase, SessionPhase::Alive);

        // Let the delay run out, then the same contact kills
        for _ in 0..70 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        on_trigger(&mut state, Trigger::OwnBody { segment: 0 }).unwrap();
        assert_eq!(state.phase, SessionPhase::GameOver);
    }

    #[test]
    fn test_high_score_follows_score() {
        let mut state = session();
        on_trigger(&mut state, Trigger::CorrectAnswer).unwrap();
        state.drain_events();
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.high_score, 1);
        let events = state.drain_events();
        assert!(events.contains(&SimEvent::HighScoreChanged { high_score: 1 }));

        // A stored high score above the run's score never drops
        let mut rich = SessionState::new(1, Tuning::default(), None, 10).unwrap();
        on_trigger(&mut rich, Trigger::CorrectAnswer).unwrap();
        tick(&mut rich, &TickInput::default(), SIM_DT);
        assert_eq!(rich.high_score, 10);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut state = session();
        on_trigger(&mut state, Trigger::CorrectAnswer).unwrap();
        on_trigger(&mut state, Trigger::WrongAnswer).unwrap();
        assert_eq!(state.phase, SessionPhase::GameOver);

        state.restart().unwrap();
        assert_eq!(state.phase, SessionPhase::Alive);
        assert_eq!(state.score, 0);
        assert_eq!(state.high_score, 1);
        let pos = state.head.pos;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.head.pos != pos);
    }

    #[test]
    fn test_determinism() {
        // Two sessions with the same seed and inputs stay identical
        let mut a = session();
        let mut b = session();

        let inputs = [0.0, 1.0, -0.5, 0.25, 0.0];
        for (i, &steer) in inputs.iter().cycle().take(200).enumerate() {
            let input = TickInput { steer };
            tick(&mut a, &input, SIM_DT);
            tick(&mut b, &input, SIM_DT);
            if i == 50 {
                on_trigger(&mut a, Trigger::CorrectAnswer).unwrap();
                on_trigger(&mut b, Trigger::CorrectAnswer).unwrap();
            }
        }

        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.head.pos, b.head.pos);
        assert_eq!(a.question_set.question.text, b.question_set.question.text);
        assert_eq!(
            a.question_set.correct().text,
            b.question_set.correct().text
        );
    }
}
