use rust_decimal::Decimal;

use super::config::TextHeuristicConfig;
use super::rules::FIXED_MAX_SCORE;

/// Quality signal categories detected in a free-text answer. Each category counts once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct TextSignals {
    pub quantified: bool,
    pub impact: bool,
    pub technical: bool,
}

impl TextSignals {
    pub(crate) fn detect(tokens: &[&str], config: &TextHeuristicConfig) -> Self {
        let mut signals = Self::default();

        for raw in tokens {
            if raw.chars().any(|c| c.is_ascii_digit() || c == '%') {
                signals.quantified = true;
            }

            let token = normalize(raw);
            if token.is_empty() {
                continue;
            }
            if !signals.impact && config.impact_verbs.iter().any(|verb| *verb == token) {
                signals.impact = true;
            }
            if !signals.technical && config.technical_terms.iter().any(|term| *term == token) {
                signals.technical = true;
            }
        }

        signals
    }

    pub(crate) fn count(self) -> u32 {
        [self.quantified, self.impact, self.technical]
            .into_iter()
            .filter(|present| *present)
            .count() as u32
    }
}

pub(crate) fn score_text(answer: &str, config: &TextHeuristicConfig) -> Decimal {
    let tokens: Vec<&str> = answer.split_whitespace().collect();
    if tokens.is_empty() {
        return Decimal::ZERO;
    }

    if tokens.len() < config.min_words {
        return config.fragment_score.clamp(Decimal::ZERO, FIXED_MAX_SCORE);
    }

    let length_bonus = length_bonus(tokens.len(), &config.length_steps);
    let signals = TextSignals::detect(&tokens, config);
    let signal_bonus = config
        .signal_increment
        .saturating_mul(Decimal::from(signals.count()))
        .min(config.signal_cap)
        .max(Decimal::ZERO);

    config
        .baseline
        .saturating_add(length_bonus)
        .saturating_add(signal_bonus)
        .clamp(Decimal::ZERO, FIXED_MAX_SCORE)
}

fn length_bonus(word_count: usize, steps: &[(usize, Decimal)]) -> Decimal {
    steps
        .iter()
        .filter(|(threshold, _)| word_count >= *threshold)
        .map(|(_, bonus)| (*bonus).max(Decimal::ZERO))
        .max()
        .unwrap_or(Decimal::ZERO)
}

fn normalize(token: &str) -> String {
    token
        .trim_matches(|c: char| !c.is_alphanumeric() && !matches!(c, '/' | '+' | '#'))
        .to_lowercase()
}
