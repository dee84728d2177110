mod config;
mod rules;
mod text;

pub use config::{ScoringConfig, TextHeuristicConfig};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::domain::{Question, QuestionKind};

/// Achieved and attainable points for a single question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionScore {
    pub achieved: Decimal,
    pub max: Decimal,
}

impl QuestionScore {
    pub const ZERO: Self = Self {
        achieved: Decimal::ZERO,
        max: Decimal::ZERO,
    };

    pub fn percentage(&self) -> Decimal {
        percentage(self.achieved, self.max)
    }
}

/// Share of `max` reached by `achieved`, out of 100 and rounded to two places. Zero when
/// nothing was attainable.
pub fn percentage(achieved: Decimal, max: Decimal) -> Decimal {
    if max <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let share = match achieved.checked_mul(Decimal::ONE_HUNDRED) {
        Some(scaled) => scaled.checked_div(max),
        None => achieved
            .checked_div(max)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED)),
    };
    share.map_or(Decimal::ZERO, |share| share.round_dp(2))
}

/// Stateless scorer turning one raw answer into points for one question.
///
/// Malformed or missing answers score zero; scoring never fails.
#[derive(Debug, Clone, Default)]
pub struct QuestionScorer {
    config: ScoringConfig,
}

impl QuestionScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Highest score the question can award, independent of any answer.
    pub fn max_score(&self, question: &Question) -> Decimal {
        match &question.kind {
            QuestionKind::Choice { options } => rules::choice_max(options),
            QuestionKind::Rating | QuestionKind::Number | QuestionKind::Text => {
                rules::FIXED_MAX_SCORE
            }
            QuestionKind::Unsupported => Decimal::ZERO,
        }
    }

    pub fn score(&self, question: &Question, answer: Option<&str>) -> QuestionScore {
        let max = self.max_score(question);
        let Some(answer) = answer else {
            return QuestionScore {
                achieved: Decimal::ZERO,
                max,
            };
        };

        let achieved = match &question.kind {
            QuestionKind::Choice { options } => rules::score_choice(options, answer),
            QuestionKind::Rating => rules::score_rating(answer),
            QuestionKind::Number => rules::score_number(answer),
            QuestionKind::Text => text::score_text(answer, &self.config.text),
            QuestionKind::Unsupported => Decimal::ZERO,
        };

        QuestionScore {
            achieved: achieved.clamp(Decimal::ZERO, max),
            max,
        }
    }
}
