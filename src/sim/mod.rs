//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod arena;
pub mod quiz;
pub mod state;
pub mod tick;
pub mod trail;

pub use arena::ArenaBounds;
pub use quiz::{AnswerOption, Operator, Question, QuestionSet, QuizError};
pub use state::{BodySegment, Head, SessionPhase, SessionState, SimEvent};
pub use tick::{TickInput, Trigger, on_trigger, tick};
pub use trail::PathHistory;
