use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Tunable weights for the scoring rules. Only the free-text heuristic is configurable; the
/// rating and number scales are fixed by the questionnaire format.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub text: TextHeuristicConfig,
}

/// Constants for the free-text heuristic.
///
/// `length_steps` holds `(minimum words, bonus)` pairs; the highest step reached applies.
/// Keep the largest length bonus below `10 - baseline` so length alone never reaches the
/// maximum score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextHeuristicConfig {
    pub min_words: usize,
    pub fragment_score: Decimal,
    pub baseline: Decimal,
    pub length_steps: Vec<(usize, Decimal)>,
    pub signal_increment: Decimal,
    pub signal_cap: Decimal,
    pub impact_verbs: Vec<String>,
    pub technical_terms: Vec<String>,
}

impl Default for TextHeuristicConfig {
    fn default() -> Self {
        Self {
            min_words: 3,
            fragment_score: Decimal::ONE,
            baseline: Decimal::from(3),
            length_steps: vec![
                (15, Decimal::ONE),
                (40, Decimal::TWO),
                (80, Decimal::from(3)),
            ],
            signal_increment: Decimal::new(15, 1),
            signal_cap: Decimal::from(4),
            impact_verbs: words(&[
                "achieved",
                "automated",
                "built",
                "delivered",
                "designed",
                "developed",
                "drove",
                "improved",
                "implemented",
                "increased",
                "launched",
                "led",
                "managed",
                "mentored",
                "migrated",
                "optimized",
                "reduced",
                "shipped",
            ]),
            technical_terms: words(&[
                "agile",
                "api",
                "aws",
                "azure",
                "ci/cd",
                "docker",
                "excel",
                "gcp",
                "git",
                "graphql",
                "java",
                "javascript",
                "kanban",
                "kubernetes",
                "linux",
                "microservices",
                "postgres",
                "postgresql",
                "python",
                "react",
                "rust",
                "salesforce",
                "scrum",
                "sql",
                "tableau",
                "terraform",
                "typescript",
            ]),
        }
    }
}

fn words(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
