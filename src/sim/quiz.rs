//! Arithmetic question and distractor generation
//!
//! Each question shows a target value ("7 ?") and four expression markers:
//! one that evaluates to the target and three that don't. Distractor
//! uniqueness is keyed on display text, not numeric value - two different
//! wrong expressions may share a (wrong) value.

use glam::Vec3;
use rand::Rng;
use std::collections::HashSet;
use std::fmt;

use super::arena::{ArenaBounds, spawn_point};
use crate::tuning::Tuning;

/// Arithmetic operator for a question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    fn pick<R: Rng>(rng: &mut R) -> Self {
        match rng.random_range(0..4u8) {
            0 => Operator::Add,
            1 => Operator::Sub,
            2 => Operator::Mul,
            _ => Operator::Div,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
        }
    }

    /// Evaluate `a op b`. Division truncates toward zero; callers keep b >= 1.
    fn apply(&self, a: i32, b: i32) -> i32 {
        match self {
            Operator::Add => a + b,
            Operator::Sub => a - b,
            Operator::Mul => a * b,
            Operator::Div => a / b,
        }
    }
}

/// The current question: target value plus its display text
#[derive(Debug, Clone)]
pub struct Question {
    pub target: i32,
    pub text: String,
}

/// One of the four answer markers in the arena
#[derive(Debug, Clone)]
pub struct AnswerOption {
    pub text: String,
    pub correct: bool,
    pub pos: Vec3,
}

/// A question together with its four placed options (correct option first)
#[derive(Debug, Clone)]
pub struct QuestionSet {
    pub question: Question,
    pub options: Vec<AnswerOption>,
}

impl QuestionSet {
    pub fn correct(&self) -> &AnswerOption {
        // Constructor always puts the correct option at index 0
        &self.options[0]
    }
}

/// Question generation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizError {
    /// The distractor retry cap was hit before four distinct texts existed
    AttemptsExhausted { attempts: u32 },
}

impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizError::AttemptsExhausted { attempts } => {
                write!(f, "gave up generating distractors after {attempts} attempts")
            }
        }
    }
}

impl std::error::Error for QuizError {}

/// Upper bound for the second divide operand, floored so the draw range
/// `1..hi` is never empty (the original faulted when max/operand1 <= 1).
#[inline]
fn div_operand_hi(max_number: i32, operand1: i32) -> i32 {
    (max_number / operand1).max(2)
}

/// Generate one question and four answer options for the given level.
///
/// Difficulty scales as `max_number = 10 * level`. Division questions are
/// built backwards (`(q * d) / d` with target `q`) so the target is always
/// an exact integer.
pub fn generate_question<R: Rng>(
    level: u32,
    bounds: Option<&ArenaBounds>,
    tuning: &Tuning,
    rng: &mut R,
) -> Result<QuestionSet, QuizError> {
    let max_number = 10 * level as i32;
    let operator = Operator::pick(rng);

    let operand1 = rng.random_range(1..max_number);
    let (correct_text, target) = match operator {
        Operator::Div => {
            let operand2 = rng.random_range(1..div_operand_hi(max_number, operand1));
            (format!("{} / {}", operand1 * operand2, operand2), operand1)
        }
        op => {
            let operand2 = rng.random_range(1..max_number);
            (
                format!("{} {} {}", operand1, op.symbol(), operand2),
                op.apply(operand1, operand2),
            )
        }
    };

    // Distinct display texts, seeded with the correct expression
    let mut texts: HashSet<String> = HashSet::new();
    texts.insert(correct_text.clone());
    let mut wrong_texts: Vec<String> = Vec::with_capacity(3);

    let mut attempts = 0u32;
    while texts.len() < 4 {
        if attempts >= tuning.max_wrong_attempts {
            log::error!(
                "distractor generation stalled at level {level} (target {target}, {} texts)",
                texts.len()
            );
            return Err(QuizError::AttemptsExhausted { attempts });
        }
        attempts += 1;

        let wrong1 = rng.random_range(1..max_number);
        let wrong2 = match operator {
            // Same range the correct draw used, anchored on the correct operand1
            Operator::Div => rng.random_range(1..div_operand_hi(max_number, operand1)),
            _ => rng.random_range(1..max_number),
        };
        if operator.apply(wrong1, wrong2) == target {
            continue;
        }
        let text = format!("{} {} {}", wrong1, operator.symbol(), wrong2);
        if texts.insert(text.clone()) {
            wrong_texts.push(text);
        }
    }

    let question = Question {
        target,
        text: format!("{target} ?"),
    };
    log::debug!("question: {} = {}", correct_text, target);

    let mut options = Vec::with_capacity(4);
    options.push(AnswerOption {
        text: correct_text,
        correct: true,
        pos: spawn_point(bounds, tuning.answer_height, rng),
    });
    for text in wrong_texts {
        options.push(AnswerOption {
            text,
            correct: false,
            pos: spawn_point(bounds, tuning.answer_height, rng),
        });
    }

    Ok(QuestionSet { question, options })
}
