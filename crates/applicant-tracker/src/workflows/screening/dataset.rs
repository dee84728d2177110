use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::domain::{
    Application, ApplicationAnswer, ApplicationId, Position, PositionId, PositionQuestion,
    Question, QuestionId,
};
use super::repository::{RepositoryError, ScreeningRepository};
use super::scoring::ScoringConfig;

/// Snapshot of questionnaire data exported from the tracking system.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreeningDataset {
    #[serde(default)]
    pub positions: Vec<Position>,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub position_questions: Vec<PositionQuestion>,
    #[serde(default)]
    pub applications: Vec<Application>,
    #[serde(default)]
    pub answers: Vec<ApplicationAnswer>,
    #[serde(default)]
    pub scoring: ScoringConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read screening data set: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid screening data set: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate {kind} id '{id}' in screening data set")]
    DuplicateId { kind: &'static str, id: String },
}

impl ScreeningDataset {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let dataset: Self = serde_json::from_reader(reader)?;
        dataset.validate()?;
        Ok(dataset)
    }

    fn validate(&self) -> Result<(), DatasetError> {
        ensure_unique("position", self.positions.iter().map(|p| p.id.0.as_str()))?;
        ensure_unique("question", self.questions.iter().map(|q| q.id.0.as_str()))?;
        ensure_unique(
            "application",
            self.applications.iter().map(|a| a.id.0.as_str()),
        )?;
        Ok(())
    }
}

fn ensure_unique<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), DatasetError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(DatasetError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

/// Repository over an in-memory data set, for the CLI, the demo service, and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryScreeningRepository {
    dataset: ScreeningDataset,
}

impl InMemoryScreeningRepository {
    pub fn new(dataset: ScreeningDataset) -> Self {
        Self { dataset }
    }

    pub fn dataset(&self) -> &ScreeningDataset {
        &self.dataset
    }
}

impl ScreeningRepository for InMemoryScreeningRepository {
    fn questions(&self, ids: &[QuestionId]) -> Result<Vec<Question>, RepositoryError> {
        Ok(self
            .dataset
            .questions
            .iter()
            .filter(|question| ids.contains(&question.id))
            .cloned()
            .collect())
    }

    fn position(&self, id: &PositionId) -> Result<Option<Position>, RepositoryError> {
        Ok(self
            .dataset
            .positions
            .iter()
            .find(|position| &position.id == id)
            .cloned())
    }

    fn position_questions(
        &self,
        position_id: &PositionId,
    ) -> Result<Vec<PositionQuestion>, RepositoryError> {
        let mut assignments: Vec<PositionQuestion> = self
            .dataset
            .position_questions
            .iter()
            .filter(|assignment| &assignment.position_id == position_id)
            .cloned()
            .collect();
        assignments.sort_by_key(|assignment| assignment.order);
        Ok(assignments)
    }

    fn applications_for_position(
        &self,
        position_id: &PositionId,
    ) -> Result<Vec<Application>, RepositoryError> {
        Ok(self
            .dataset
            .applications
            .iter()
            .filter(|application| &application.position_id == position_id)
            .cloned()
            .collect())
    }

    fn application(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError> {
        Ok(self
            .dataset
            .applications
            .iter()
            .find(|application| &application.id == id)
            .cloned())
    }

    fn answers(
        &self,
        application_id: &ApplicationId,
    ) -> Result<Vec<ApplicationAnswer>, RepositoryError> {
        Ok(self
            .dataset
            .answers
            .iter()
            .filter(|answer| &answer.application_id == application_id)
            .cloned()
            .collect())
    }
}
