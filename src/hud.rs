//! HUD text surfaces
//!
//! The core owns the text; the host owns the widgets. `sync` reformats
//! only the surfaces whose underlying value changed and reports which, so
//! the host redraws the minimum.

use crate::sim::SessionState;

/// Which text surface changed during a sync
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudSurface {
    Score,
    HighScore,
    Level,
    Question,
}

/// Formatted HUD strings plus the raw values they were built from
#[derive(Debug, Clone)]
pub struct Hud {
    pub score_text: String,
    pub high_score_text: String,
    pub level_text: String,
    pub question_text: String,
    last_score: u32,
    last_high_score: u32,
    last_level: u32,
}

impl Hud {
    pub fn new(state: &SessionState) -> Self {
        Self {
            score_text: format!("Score: {}", state.score),
            high_score_text: format!("High Score {}", state.high_score),
            level_text: format!("Level: {}", state.level),
            question_text: state.question_set.question.text.clone(),
            last_score: state.score,
            last_high_score: state.high_score,
            last_level: state.level,
        }
    }

    /// Refresh surfaces from the session, returning the ones that changed
    pub fn sync(&mut self, state: &SessionState) -> Vec<HudSurface> {
        let mut changed = Vec::new();

        if state.score != self.last_score {
            self.last_score = state.score;
            self.score_text = format!("Score: {}", state.score);
            changed.push(HudSurface::Score);
        }
        if state.high_score != self.last_high_score {
            self.last_high_score = state.high_score;
            self.high_score_text = format!("High Score {}", state.high_score);
            changed.push(HudSurface::HighScore);
        }
        if state.level != self.last_level {
            self.last_level = state.level;
            self.level_text = format!("Level: {}", state.level);
            changed.push(HudSurface::Level);
        }
        if state.question_set.question.text != self.question_text {
            self.question_text = state.question_set.question.text.clone();
            changed.push(HudSurface::Question);
        }

        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Trigger, on_trigger};
    use crate::tuning::Tuning;

    fn session() -> SessionState {
        SessionState::new(42, Tuning::default(), None, 3).unwrap()
    }

    #[test]
    fn test_initial_formats() {
        let state = session();
        let hud = Hud::new(&state);
        assert_eq!(hud.score_text, "Score: 0");
        assert_eq!(hud.high_score_text, "High Score 3");
        assert_eq!(hud.level_text, "Level: 1");
        assert_eq!(
            hud.question_text,
            format!("{} ?", state.question_set.question.target)
        );
    }

    #[test]
    fn test_sync_reports_only_changes() {
        let mut state = session();
        let mut hud = Hud::new(&state);
        assert!(hud.sync(&state).is_empty());

        on_trigger(&mut state, Trigger::CorrectAnswer).unwrap();
        let changed = hud.sync(&state);
        assert!(changed.contains(&HudSurface::Score));
        assert!(!changed.contains(&HudSurface::HighScore));
        assert!(!changed.contains(&HudSurface::Level));
        assert_eq!(hud.score_text, "Score: 1");

        // Nothing new on a second sync
        assert!(hud.sync(&state).is_empty());
    }
}
