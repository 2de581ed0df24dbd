//! Session state and core simulation types
//!
//! Everything the per-tick update and the trigger dispatcher mutate lives
//! here. The state is host-agnostic: the host mirrors entities and HUD by
//! draining `SimEvent`s.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::arena::ArenaBounds;
use super::quiz::{self, QuestionSet, QuizError};
use super::trail::PathHistory;
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Snake is moving and a question is live
    Alive,
    /// Run ended; waiting for the host to reload
    GameOver,
}

/// The player-controlled leading entity
#[derive(Debug, Clone, Copy)]
pub struct Head {
    pub pos: Vec3,
    /// Heading about +Y; yaw 0 faces +Z
    pub yaw: f32,
}

impl Default for Head {
    fn default() -> Self {
        Self {
            pos: Vec3::ZERO,
            yaw: 0.0,
        }
    }
}

/// A trailing body segment chasing a delayed head position
#[derive(Debug, Clone, Copy)]
pub struct BodySegment {
    pub pos: Vec3,
    pub yaw: f32,
    /// Whether the host should treat this segment as collidable
    pub collider_enabled: bool,
    /// Seconds until the collider re-enables after spawn
    pub enable_timer: f32,
}

impl BodySegment {
    /// Fresh segment at the default spawn pose, collider held off so it
    /// can't re-trigger against the head or the consumed answer
    pub fn spawned(collider_delay: f32) -> Self {
        Self {
            pos: Vec3::ZERO,
            yaw: 0.0,
            collider_enabled: false,
            enable_timer: collider_delay,
        }
    }
}

/// Host-facing notification emitted by the simulation
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    /// A new body segment exists at `index`
    SegmentSpawned { index: usize },
    /// Segment `index` finished its spawn delay; enable its collider
    ColliderEnabled { index: usize },
    /// Destroy all four answer markers
    AnswersCleared,
    /// A new question and option set replaced the old one
    QuestionChanged,
    ScoreChanged { score: u32 },
    HighScoreChanged { high_score: u32 },
    LevelUp { level: u32 },
    GameOver { final_score: u32 },
}

/// Complete state of one play session
#[derive(Debug, Clone)]
pub struct SessionState {
    pub seed: u64,
    pub phase: SessionPhase,
    pub head: Head,
    /// Trailing segments, oldest first
    pub segments: Vec<BodySegment>,
    /// Past head positions, newest first
    pub history: PathHistory,
    /// Starts at 1, only ever increases within a session
    pub level: u32,
    /// Consecutive correct answers since the last level-up
    pub streak: u32,
    pub score: u32,
    /// Best score across sessions; the host persists it
    pub high_score: u32,
    /// The live question and its four placed options
    pub question_set: QuestionSet,
    /// Play-field bounds; None degrades to an unclamped snake
    pub bounds: Option<ArenaBounds>,
    pub tuning: Tuning,
    pub time_ticks: u64,
    pub(super) rng: Pcg32,
    events: Vec<SimEvent>,
}

impl SessionState {
    /// Create a session with the first question already generated.
    /// `high_score` comes from the host's persistence store.
    pub fn new(
        seed: u64,
        tuning: Tuning,
        bounds: Option<ArenaBounds>,
        high_score: u32,
    ) -> Result<Self, QuizError> {
        if bounds.is_none() {
            log::warn!("no arena bounds set; snake will roam unclamped");
        }
        let mut rng = Pcg32::seed_from_u64(seed);
        let question_set = quiz::generate_question(1, bounds.as_ref(), &tuning, &mut rng)?;
        let history = PathHistory::new(tuning.history_margin);

        let mut state = Self {
            seed,
            phase: SessionPhase::Alive,
            head: Head::default(),
            segments: Vec::new(),
            history,
            level: 1,
            streak: 0,
            score: 0,
            high_score,
            question_set,
            bounds,
            tuning,
            time_ticks: 0,
            rng,
            events: Vec::new(),
        };
        state.push_event(SimEvent::QuestionChanged);
        Ok(state)
    }

    /// The host's "load initial scene": fresh session, high score kept,
    /// RNG stream continuing
    pub fn restart(&mut self) -> Result<(), QuizError> {
        self.phase = SessionPhase::Alive;
        self.head = Head::default();
        self.segments.clear();
        self.history = PathHistory::new(self.tuning.history_margin);
        self.level = 1;
        self.streak = 0;
        self.score = 0;
        self.time_ticks = 0;
        self.regenerate_question()?;
        self.push_event(SimEvent::ScoreChanged { score: 0 });
        Ok(())
    }

    /// Append a body segment and bump the score (one growth event)
    pub(super) fn grow(&mut self) {
        self.segments
            .push(BodySegment::spawned(self.tuning.collider_delay));
        self.score += 1;
        // Only the suffix the segments read needs retaining
        self.history
            .grow_capacity(self.segments.len() * self.tuning.gap + self.tuning.history_margin);
        let index = self.segments.len() - 1;
        self.push_event(SimEvent::SegmentSpawned { index });
        self.push_event(SimEvent::ScoreChanged { score: self.score });
    }

    /// Replace the live question with a fresh one at the current level
    pub(super) fn regenerate_question(&mut self) -> Result<(), QuizError> {
        self.question_set =
            quiz::generate_question(self.level, self.bounds.as_ref(), &self.tuning, &mut self.rng)?;
        self.push_event(SimEvent::QuestionChanged);
        Ok(())
    }

    /// Raise the high score if the current score beats it
    pub(super) fn refresh_high_score(&mut self) {
        if self.score > self.high_score {
            self.high_score = self.score;
            self.push_event(SimEvent::HighScoreChanged {
                high_score: self.high_score,
            });
        }
    }

    pub(super) fn push_event(&mut self, event: SimEvent) {
        self.events.push(event);
    }

    /// Take all events emitted since the last drain (host call)
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }
}
