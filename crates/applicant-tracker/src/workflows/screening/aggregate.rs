use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::domain::{
    Application, ApplicationAnswer, ApplicationId, PositionId, PositionQuestion, Question,
    QuestionId,
};
use super::scoring::{percentage, QuestionScore, QuestionScorer};

/// Read-only questionnaire of one position: its assignments in display order and the question
/// definitions they point at. Built once per request and shared across every application.
#[derive(Debug, Clone)]
pub struct PositionQuestionnaire {
    position_id: PositionId,
    assignments: Vec<PositionQuestion>,
    questions: HashMap<QuestionId, Question>,
}

impl PositionQuestionnaire {
    pub fn new(
        position_id: PositionId,
        position_questions: impl IntoIterator<Item = PositionQuestion>,
        questions: impl IntoIterator<Item = Question>,
    ) -> Self {
        let mut assignments: Vec<PositionQuestion> = position_questions
            .into_iter()
            .filter(|assignment| assignment.position_id == position_id)
            .collect();
        assignments.sort_by_key(|assignment| assignment.order);

        let questions = questions
            .into_iter()
            .map(|question| (question.id.clone(), question))
            .collect();

        Self {
            position_id,
            assignments,
            questions,
        }
    }

    pub fn position_id(&self) -> &PositionId {
        &self.position_id
    }

    pub fn assignments(&self) -> &[PositionQuestion] {
        &self.assignments
    }

    pub fn question(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.get(id)
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

/// Per-question line of an application's score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdownEntry {
    pub question_id: QuestionId,
    pub question_text: String,
    pub kind: String,
    pub required: bool,
    pub answered: bool,
    pub achieved: Decimal,
    pub max: Decimal,
    pub percentage: Decimal,
}

/// Totals and breakdown for one application against its position's questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationScore {
    pub application_id: ApplicationId,
    pub achieved: Decimal,
    pub max: Decimal,
    pub percentage: Decimal,
    pub unanswered_required: usize,
    pub breakdown: Vec<ScoreBreakdownEntry>,
}

/// Sums question scores over every question assigned to the application's position.
#[derive(Debug, Clone, Default)]
pub struct ApplicationScoringEngine {
    scorer: QuestionScorer,
}

impl ApplicationScoringEngine {
    pub fn new(scorer: QuestionScorer) -> Self {
        Self { scorer }
    }

    pub fn scorer(&self) -> &QuestionScorer {
        &self.scorer
    }

    /// Scores an application. Answers belonging to other applications or to questions outside
    /// the questionnaire are ignored; unanswered assignments still count toward the maximum.
    pub fn score(
        &self,
        questionnaire: &PositionQuestionnaire,
        application: &Application,
        answers: &[ApplicationAnswer],
    ) -> ApplicationScore {
        if application.position_id != questionnaire.position_id {
            warn!(
                application_id = %application.id,
                application_position = %application.position_id,
                questionnaire_position = %questionnaire.position_id,
                "scoring application against another position's questionnaire"
            );
        }

        let mut answers_by_question: HashMap<&QuestionId, &str> = HashMap::new();
        for answer in answers
            .iter()
            .filter(|answer| answer.application_id == application.id)
        {
            answers_by_question
                .entry(&answer.question_id)
                .or_insert(answer.answer.as_str());
        }

        let mut achieved = Decimal::ZERO;
        let mut max = Decimal::ZERO;
        let mut unanswered_required = 0;
        let mut breakdown = Vec::with_capacity(questionnaire.len());

        for assignment in questionnaire.assignments() {
            let answer = answers_by_question.get(&assignment.question_id).copied();
            let answered = answer.is_some_and(|text| !text.trim().is_empty());
            if assignment.is_required && !answered {
                unanswered_required += 1;
            }

            let entry = match questionnaire.question(&assignment.question_id) {
                Some(question) => {
                    let score = self.scorer.score(question, answer);
                    breakdown_entry(
                        assignment,
                        question.text.clone(),
                        question.kind.label(),
                        answered,
                        score,
                    )
                }
                None => {
                    warn!(
                        question_id = %assignment.question_id,
                        position_id = %assignment.position_id,
                        "assigned question missing from catalog; scoring as zero"
                    );
                    breakdown_entry(
                        assignment,
                        String::new(),
                        "missing",
                        answered,
                        QuestionScore::ZERO,
                    )
                }
            };

            achieved = achieved.saturating_add(entry.achieved);
            max = max.saturating_add(entry.max);
            breakdown.push(entry);
        }

        ApplicationScore {
            application_id: application.id.clone(),
            achieved,
            max,
            percentage: percentage(achieved, max),
            unanswered_required,
            breakdown,
        }
    }

    /// Achieved and maximum totals only.
    pub fn totals(
        &self,
        questionnaire: &PositionQuestionnaire,
        application: &Application,
        answers: &[ApplicationAnswer],
    ) -> (Decimal, Decimal) {
        let score = self.score(questionnaire, application, answers);
        (score.achieved, score.max)
    }

    pub fn breakdown(
        &self,
        questionnaire: &PositionQuestionnaire,
        application: &Application,
        answers: &[ApplicationAnswer],
    ) -> Vec<ScoreBreakdownEntry> {
        self.score(questionnaire, application, answers).breakdown
    }
}

fn breakdown_entry(
    assignment: &PositionQuestion,
    question_text: String,
    kind: &str,
    answered: bool,
    score: QuestionScore,
) -> ScoreBreakdownEntry {
    ScoreBreakdownEntry {
        question_id: assignment.question_id.clone(),
        question_text,
        kind: kind.to_string(),
        required: assignment.is_required,
        answered,
        achieved: score.achieved,
        max: score.max,
        percentage: score.percentage(),
    }
}
