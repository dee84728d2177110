use super::domain::{
    Application, ApplicationAnswer, ApplicationId, Position, PositionId, PositionQuestion,
    Question, QuestionId,
};

/// Read access to the questionnaire data owned by the surrounding application. The scoring
/// engines never call this directly; the service loads everything up front.
pub trait ScreeningRepository: Send + Sync {
    /// Questions with the given ids. Unknown ids are skipped.
    fn questions(&self, ids: &[QuestionId]) -> Result<Vec<Question>, RepositoryError>;
    fn position(&self, id: &PositionId) -> Result<Option<Position>, RepositoryError>;
    /// Assignments for a position, ordered by display order.
    fn position_questions(
        &self,
        position_id: &PositionId,
    ) -> Result<Vec<PositionQuestion>, RepositoryError>;
    fn applications_for_position(
        &self,
        position_id: &PositionId,
    ) -> Result<Vec<Application>, RepositoryError>;
    fn application(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError>;
    fn answers(&self, application_id: &ApplicationId)
        -> Result<Vec<ApplicationAnswer>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
