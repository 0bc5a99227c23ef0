//! Math challenges presented on every player turn.
//!
//! - [`generate`] picks a problem for the player's level (pure, seeded)
//! - [`evaluate`] re-computes a question string, used to check the answer invariant

mod expression;
mod generator;

pub use expression::evaluate;
pub use generator::generate;

/// Arithmetic family of a problem.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ProblemKind {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    /// Two-step `(a + b) × c`.
    Mixed,
}

impl ProblemKind {
    /// Difficulty tier, also used as the damage bonus multiplier.
    pub const fn difficulty(&self) -> u8 {
        match self {
            Self::Addition | Self::Subtraction => 1,
            Self::Multiplication => 2,
            Self::Division => 3,
            Self::Mixed => 4,
        }
    }
}

/// A single challenge. Consumed exactly once by the answer submission.
///
/// Invariant: `answer` is the exact value of `question`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MathProblem {
    pub question: String,
    pub answer: i32,
    /// 1 (easy) to 4 (expert).
    pub difficulty: u8,
    pub kind: ProblemKind,
}

impl MathProblem {
    pub fn new(question: impl Into<String>, answer: i32, kind: ProblemKind) -> Self {
        Self {
            question: question.into(),
            answer,
            difficulty: kind.difficulty(),
            kind,
        }
    }

    pub fn is_correct(&self, answer_given: i32) -> bool {
        answer_given == self.answer
    }

    pub const fn difficulty_label(&self) -> &'static str {
        match self.difficulty {
            1 => "Easy",
            2 => "Medium",
            3 => "Hard",
            4 => "Expert",
            _ => "Normal",
        }
    }
}
