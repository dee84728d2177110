use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::debug;

use super::aggregate::{
    ApplicationScore, ApplicationScoringEngine, PositionQuestionnaire, ScoreBreakdownEntry,
};
use super::domain::{Application, ApplicationId, PositionId, Question, QuestionId};
use super::ranking::{CandidateRanking, CandidateRankingEngine};
use super::repository::{RepositoryError, ScreeningRepository};
use super::scoring::{QuestionScore, QuestionScorer, ScoringConfig};

/// Service composing the repository with the scoring and ranking engines. Every call loads the
/// reference data it needs first, then runs the pure engines over it.
pub struct ScreeningScoreService<R> {
    repository: Arc<R>,
    ranking: Arc<CandidateRankingEngine>,
}

impl<R> ScreeningScoreService<R>
where
    R: ScreeningRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: ScoringConfig) -> Self {
        let scoring = ApplicationScoringEngine::new(QuestionScorer::new(config));
        Self {
            repository,
            ranking: Arc::new(CandidateRankingEngine::new(scoring)),
        }
    }

    fn scoring(&self) -> &ApplicationScoringEngine {
        self.ranking.scoring()
    }

    pub fn scorer(&self) -> &QuestionScorer {
        self.scoring().scorer()
    }

    /// Points for a single answer. The position only scopes the log context; scoring depends on
    /// the question alone.
    pub fn calculate_question_score(
        &self,
        question: &Question,
        answer: Option<&str>,
        position_id: &PositionId,
    ) -> Decimal {
        self.question_score(question, answer, position_id).achieved
    }

    pub fn question_score(
        &self,
        question: &Question,
        answer: Option<&str>,
        position_id: &PositionId,
    ) -> QuestionScore {
        let score = self.scorer().score(question, answer);
        debug!(
            %position_id,
            question_id = %question.id,
            kind = question.kind.label(),
            achieved = %score.achieved,
            max = %score.max,
            "scored question"
        );
        score
    }

    /// Achieved total for an application already in hand.
    pub fn calculate_application_score(
        &self,
        application: &Application,
    ) -> Result<Decimal, ScreeningServiceError> {
        Ok(self.score_loaded_application(application)?.achieved)
    }

    pub fn score_application(
        &self,
        application_id: &ApplicationId,
    ) -> Result<ApplicationScore, ScreeningServiceError> {
        let application = self.load_application(application_id)?;
        self.score_loaded_application(&application)
    }

    pub fn get_score_breakdown(
        &self,
        application_id: &ApplicationId,
    ) -> Result<Vec<ScoreBreakdownEntry>, ScreeningServiceError> {
        Ok(self.score_application(application_id)?.breakdown)
    }

    pub fn rank_candidates_for_position(
        &self,
        position_id: &PositionId,
    ) -> Result<Vec<CandidateRanking>, ScreeningServiceError> {
        if self.repository.position(position_id)?.is_none() {
            return Err(ScreeningServiceError::PositionNotFound(position_id.clone()));
        }

        let applications = self.repository.applications_for_position(position_id)?;
        if applications.is_empty() {
            debug!(%position_id, "no applications to rank");
            return Ok(Vec::new());
        }

        let questionnaire = self.load_questionnaire(position_id)?;
        let mut answers = HashMap::with_capacity(applications.len());
        for application in &applications {
            answers.insert(
                application.id.clone(),
                self.repository.answers(&application.id)?,
            );
        }

        let ranked = self.ranking.rank(&questionnaire, &applications, &answers);
        debug!(
            %position_id,
            candidates = ranked.len(),
            questions = questionnaire.len(),
            "ranked candidates"
        );
        Ok(ranked)
    }

    fn score_loaded_application(
        &self,
        application: &Application,
    ) -> Result<ApplicationScore, ScreeningServiceError> {
        let questionnaire = self.load_questionnaire(&application.position_id)?;
        let answers = self.repository.answers(&application.id)?;
        let score = self.scoring().score(&questionnaire, application, &answers);
        debug!(
            application_id = %application.id,
            achieved = %score.achieved,
            max = %score.max,
            percentage = %score.percentage,
            "scored application"
        );
        Ok(score)
    }

    fn load_application(
        &self,
        application_id: &ApplicationId,
    ) -> Result<Application, ScreeningServiceError> {
        self.repository
            .application(application_id)?
            .ok_or_else(|| ScreeningServiceError::ApplicationNotFound(application_id.clone()))
    }

    fn load_questionnaire(
        &self,
        position_id: &PositionId,
    ) -> Result<PositionQuestionnaire, ScreeningServiceError> {
        let assignments = self.repository.position_questions(position_id)?;
        let ids: Vec<QuestionId> = assignments
            .iter()
            .map(|assignment| assignment.question_id.clone())
            .collect();
        let questions = self.repository.questions(&ids)?;
        Ok(PositionQuestionnaire::new(
            position_id.clone(),
            assignments,
            questions,
        ))
    }
}

/// Error raised by the screening score service.
#[derive(Debug, thiserror::Error)]
pub enum ScreeningServiceError {
    #[error("application '{0}' not found")]
    ApplicationNotFound(ApplicationId),
    #[error("position '{0}' not found")]
    PositionNotFound(PositionId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ScreeningServiceError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ScreeningServiceError::ApplicationNotFound(_)
                | ScreeningServiceError::PositionNotFound(_)
                | ScreeningServiceError::Repository(RepositoryError::NotFound)
        )
    }
}
