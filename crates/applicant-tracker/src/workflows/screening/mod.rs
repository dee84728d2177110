//! Candidate scoring and ranking for position questionnaires.
//!
//! Scoring flows one way: [`QuestionScorer`] scores single answers, [`ApplicationScoringEngine`]
//! totals them over a position's questionnaire, and [`CandidateRankingEngine`] orders every
//! application of a position. The engines are pure; [`ScreeningScoreService`] performs the
//! repository reads before handing loaded data to them.

pub mod aggregate;
pub mod dataset;
pub mod domain;
pub mod ranking;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use aggregate::{
    ApplicationScore, ApplicationScoringEngine, PositionQuestionnaire, ScoreBreakdownEntry,
};
pub use dataset::{DatasetError, InMemoryScreeningRepository, ScreeningDataset};
pub use domain::{
    Applicant, ApplicantId, Application, ApplicationAnswer, ApplicationId, ApplicationStatus,
    AnswerId, OptionId, Position, PositionId, PositionQuestion, Question, QuestionId,
    QuestionKind, QuestionOption,
};
pub use ranking::{CandidateRanking, CandidateRankingEngine};
pub use repository::{RepositoryError, ScreeningRepository};
pub use router::application_router;
pub use scoring::{QuestionScore, QuestionScorer, ScoringConfig, TextHeuristicConfig};
pub use service::{ScreeningScoreService, ScreeningServiceError};
