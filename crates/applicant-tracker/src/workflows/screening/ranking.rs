use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::aggregate::{ApplicationScoringEngine, PositionQuestionnaire};
use super::domain::{Application, ApplicationAnswer, ApplicationId, PositionId};

/// One candidate's place in a position's ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRanking {
    /// 1 = best.
    pub rank: usize,
    pub application_id: ApplicationId,
    pub candidate_name: String,
    pub candidate_email: String,
    pub applied_on: DateTime<Utc>,
    pub achieved: Decimal,
    pub max: Decimal,
    pub percentage: Decimal,
    pub position_id: PositionId,
}

impl CandidateRanking {
    pub fn is_best(&self) -> bool {
        self.rank == 1
    }
}

/// Orders a position's applications by percentage achieved.
///
/// Equal percentages fall back to the earlier `applied_on`, then the candidate name, then the
/// application id, so the order is total and repeatable.
#[derive(Debug, Clone, Default)]
pub struct CandidateRankingEngine {
    scoring: ApplicationScoringEngine,
}

impl CandidateRankingEngine {
    pub fn new(scoring: ApplicationScoringEngine) -> Self {
        Self { scoring }
    }

    pub fn scoring(&self) -> &ApplicationScoringEngine {
        &self.scoring
    }

    pub fn rank(
        &self,
        questionnaire: &PositionQuestionnaire,
        applications: &[Application],
        answers: &HashMap<ApplicationId, Vec<ApplicationAnswer>>,
    ) -> Vec<CandidateRanking> {
        let mut ranked: Vec<CandidateRanking> = applications
            .iter()
            .map(|application| {
                let answers = answers
                    .get(&application.id)
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                let score = self.scoring.score(questionnaire, application, answers);

                CandidateRanking {
                    rank: 0,
                    application_id: application.id.clone(),
                    candidate_name: application.applicant.name.clone(),
                    candidate_email: application.applicant.email.clone(),
                    applied_on: application.applied_on,
                    achieved: score.achieved,
                    max: score.max,
                    percentage: score.percentage,
                    position_id: questionnaire.position_id().clone(),
                }
            })
            .collect();

        ranked.sort_by(compare_candidates);
        for (index, entry) in ranked.iter_mut().enumerate() {
            entry.rank = index + 1;
        }

        ranked
    }
}

/// Compares the percentages as reported, already rounded to two places, so 33.333 and 33.334
/// tie and fall through to `applied_on`.
pub(crate) fn compare_candidates(a: &CandidateRanking, b: &CandidateRanking) -> Ordering {
    b.percentage
        .cmp(&a.percentage)
        .then_with(|| a.applied_on.cmp(&b.applied_on))
        .then_with(|| {
            a.candidate_name
                .to_lowercase()
                .cmp(&b.candidate_name.to_lowercase())
        })
        .then_with(|| a.candidate_name.cmp(&b.candidate_name))
        .then_with(|| a.application_id.cmp(&b.application_id))
}
