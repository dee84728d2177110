use std::num::IntErrorKind;
use std::str::FromStr;

use rust_decimal::Decimal;

use super::super::domain::QuestionOption;

pub(crate) const RATING_SCALE_TOP: i64 = 5;
pub(crate) const SCALE_MULTIPLIER: Decimal = Decimal::TWO;
pub(crate) const FIXED_MAX_SCORE: Decimal = Decimal::TEN;

pub(crate) fn choice_max(options: &[QuestionOption]) -> Decimal {
    options
        .iter()
        .map(|option| option.points.max(Decimal::ZERO))
        .max()
        .unwrap_or(Decimal::ZERO)
}

pub(crate) fn score_choice(options: &[QuestionOption], answer: &str) -> Decimal {
    let answer = answer.trim();
    if answer.is_empty() {
        return Decimal::ZERO;
    }

    let wanted = answer.to_lowercase();
    options
        .iter()
        .find(|option| option.text.trim().to_lowercase() == wanted)
        .map(|option| option.points.max(Decimal::ZERO))
        .unwrap_or(Decimal::ZERO)
}

pub(crate) fn score_rating(answer: &str) -> Decimal {
    let value = match answer.trim().parse::<i64>() {
        Ok(value) => value,
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow => RATING_SCALE_TOP,
            _ => return Decimal::ZERO,
        },
    };
    Decimal::from(value.clamp(0, RATING_SCALE_TOP)) * SCALE_MULTIPLIER
}

/// Values from here up all saturate the number scale.
const NUMBER_SATURATION: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

pub(crate) fn score_number(answer: &str) -> Decimal {
    let value = match Decimal::from_str(answer.trim()) {
        Ok(value) => value,
        Err(_) => match NumericAnswer::parse(answer) {
            Some(number) => number.bounded(),
            None => return Decimal::ZERO,
        },
    };

    if value >= NUMBER_SATURATION {
        return FIXED_MAX_SCORE;
    }
    value
        .max(Decimal::ZERO)
        .checked_mul(SCALE_MULTIPLIER)
        .map_or(FIXED_MAX_SCORE, |scaled| scaled.min(FIXED_MAX_SCORE))
}

/// Plain decimal literal that `Decimal` could not represent, split into its parts.
struct NumericAnswer<'a> {
    negative: bool,
    integer: &'a str,
    fraction: &'a str,
}

impl<'a> NumericAnswer<'a> {
    fn parse(answer: &'a str) -> Option<Self> {
        let trimmed = answer.trim();
        let (negative, digits) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };
        let (integer, fraction) = digits.split_once('.').unwrap_or((digits, ""));

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (integer.is_empty() && fraction.is_empty())
            || !all_digits(integer)
            || !all_digits(fraction)
        {
            return None;
        }

        Some(Self {
            negative,
            integer,
            fraction,
        })
    }

    /// A value that scores the same as the literal. Integer parts of two or more digits collapse
    /// to ten and negatives to zero.
    fn bounded(&self) -> Decimal {
        let integer = self.integer.trim_start_matches('0');
        if self.negative {
            return Decimal::ZERO;
        }
        if integer.len() > 1 {
            return Decimal::TEN;
        }

        let integer = if integer.is_empty() { "0" } else { integer };
        let fraction = &self.fraction[..self.fraction.len().min(20)];
        let literal = if fraction.is_empty() {
            integer.to_string()
        } else {
            format!("{integer}.{fraction}")
        };
        Decimal::from_str(&literal).unwrap_or(Decimal::ZERO)
    }
}
