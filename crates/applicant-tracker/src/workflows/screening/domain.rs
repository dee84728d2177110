use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for questionnaire questions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionId(pub String);

/// Identifier wrapper for choice options.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OptionId(pub String);

/// Identifier wrapper for job openings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PositionId(pub String);

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicantId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnswerId(pub String);

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for PositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A job opening with an ordered questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub id: PositionId,
    pub title: String,
}

/// Questionnaire entry. Immutable once an application has been scored against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    #[serde(default = "default_active")]
    pub active: bool,
    pub kind: QuestionKind,
}

fn default_active() -> bool {
    true
}

/// Answer format of a question. Only choice questions carry a scoring table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    Choice { options: Vec<QuestionOption> },
    Rating,
    Number,
    Text,
    /// Kinds the engine does not know how to score; they score nothing and weigh nothing.
    #[serde(other)]
    Unsupported,
}

impl QuestionKind {
    pub const fn label(&self) -> &'static str {
        match self {
            QuestionKind::Choice { .. } => "choice",
            QuestionKind::Rating => "rating",
            QuestionKind::Number => "number",
            QuestionKind::Text => "text",
            QuestionKind::Unsupported => "unsupported",
        }
    }
}

/// One row of a choice question's scoring table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub id: OptionId,
    pub question_id: QuestionId,
    pub text: String,
    pub points: Decimal,
}

/// Assignment of a question to a position's questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionQuestion {
    pub position_id: PositionId,
    pub question_id: QuestionId,
    pub order: u32,
    #[serde(default)]
    pub is_required: bool,
}

/// Display details of the person behind an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Applicant {
    pub id: ApplicantId,
    pub name: String,
    pub email: String,
}

/// A candidate's submission against one position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub applicant: Applicant,
    pub position_id: PositionId,
    pub status: ApplicationStatus,
    pub applied_on: DateTime<Utc>,
}

/// Raw answer text as captured by the questionnaire form, whatever the question kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationAnswer {
    pub id: AnswerId,
    pub application_id: ApplicationId,
    pub question_id: QuestionId,
    pub answer: String,
}

/// Pipeline status of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Submitted,
    Screening,
    Interviewing,
    Offered,
    Hired,
    Rejected,
    Withdrawn,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Submitted => "submitted",
            ApplicationStatus::Screening => "screening",
            ApplicationStatus::Interviewing => "interviewing",
            ApplicationStatus::Offered => "offered",
            ApplicationStatus::Hired => "hired",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Withdrawn => "withdrawn",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn question_kind_reads_tagged_payloads() {
        let question: Question = serde_json::from_value(json!({
            "id": "q-level",
            "text": "Experience level",
            "kind": {
                "type": "choice",
                "options": [
                    { "id": "o-1", "question_id": "q-level", "text": "Expert", "points": "10" }
                ]
            }
        }))
        .expect("choice question parses");

        assert!(question.active);
        match question.kind {
            QuestionKind::Choice { options } => {
                assert_eq!(options.len(), 1);
                assert_eq!(options[0].points, Decimal::from(10));
            }
            other => panic!("expected choice kind, got {other:?}"),
        }
    }

    #[test]
    fn unknown_question_kinds_become_unsupported() {
        let kind: QuestionKind =
            serde_json::from_value(json!({ "type": "file_upload" })).expect("kind parses");
        assert_eq!(kind, QuestionKind::Unsupported);
        assert_eq!(kind.label(), "unsupported");
    }

    #[test]
    fn status_labels_match_serialized_names() {
        let value = serde_json::to_value(ApplicationStatus::Interviewing).expect("serializes");
        assert_eq!(value, json!(ApplicationStatus::Interviewing.label()));
    }
}
