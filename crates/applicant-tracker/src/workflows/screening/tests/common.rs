use std::sync::Arc;

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde_json::Value;

use crate::workflows::screening::dataset::{InMemoryScreeningRepository, ScreeningDataset};
use crate::workflows::screening::domain::{
    AnswerId, Applicant, ApplicantId, Application, ApplicationAnswer, ApplicationId,
    ApplicationStatus, OptionId, Position, PositionId, PositionQuestion, Question, QuestionId,
    QuestionKind, QuestionOption,
};
use crate::workflows::screening::repository::{RepositoryError, ScreeningRepository};
use crate::workflows::screening::scoring::ScoringConfig;
use crate::workflows::screening::{application_router, ScreeningScoreService};

pub(super) const POSITION: &str = "pos-backend";
pub(super) const EXPERIENCE_LEVEL: &str = "q-experience-level";
pub(super) const COMMUNICATION: &str = "q-communication";
pub(super) const YEARS: &str = "q-years";
pub(super) const MOTIVATION: &str = "q-motivation";

pub(super) const DETAILED_ANSWER: &str = "I led a team of five engineers that migrated our \
    billing platform from a legacy monolith to Rust microservices on Kubernetes, which reduced \
    average invoice latency by 40% and cut cloud spend considerably. I also mentored two junior \
    developers and introduced automated testing across every service we owned.";

pub(super) fn position_id() -> PositionId {
    PositionId(POSITION.to_string())
}

pub(super) fn qid(id: &str) -> QuestionId {
    QuestionId(id.to_string())
}

pub(super) fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, day, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn experience_level() -> Question {
    let options = [
        ("Beginner", 2),
        ("Intermediate", 5),
        ("Advanced", 8),
        ("Expert", 10),
    ]
    .into_iter()
    .map(|(text, points)| QuestionOption {
        id: OptionId(format!("opt-{}", text.to_lowercase())),
        question_id: qid(EXPERIENCE_LEVEL),
        text: text.to_string(),
        points: Decimal::from(points),
    })
    .collect();

    Question {
        id: qid(EXPERIENCE_LEVEL),
        text: "What is your experience level?".to_string(),
        active: true,
        kind: QuestionKind::Choice { options },
    }
}

pub(super) fn simple_question(id: &str, text: &str, kind: QuestionKind) -> Question {
    Question {
        id: qid(id),
        text: text.to_string(),
        active: true,
        kind,
    }
}

pub(super) fn questions() -> Vec<Question> {
    vec![
        experience_level(),
        simple_question(COMMUNICATION, "Rate your communication", QuestionKind::Rating),
        simple_question(YEARS, "Years of experience", QuestionKind::Number),
        simple_question(MOTIVATION, "Describe a project you led", QuestionKind::Text),
    ]
}

pub(super) fn position_questions() -> Vec<PositionQuestion> {
    [EXPERIENCE_LEVEL, COMMUNICATION, YEARS, MOTIVATION]
        .into_iter()
        .enumerate()
        .map(|(index, id)| PositionQuestion {
            position_id: position_id(),
            question_id: qid(id),
            order: index as u32 + 1,
            is_required: id != MOTIVATION,
        })
        .collect()
}

pub(super) fn application(id: &str, name: &str, applied_on: DateTime<Utc>) -> Application {
    Application {
        id: ApplicationId(id.to_string()),
        applicant: Applicant {
            id: ApplicantId(format!("cand-{id}")),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        },
        position_id: position_id(),
        status: ApplicationStatus::Submitted,
        applied_on,
    }
}

pub(super) fn answer(application_id: &str, question_id: &str, text: &str) -> ApplicationAnswer {
    ApplicationAnswer {
        id: AnswerId(format!("ans-{application_id}-{question_id}")),
        application_id: ApplicationId(application_id.to_string()),
        question_id: qid(question_id),
        answer: text.to_string(),
    }
}

/// Answers worth 10 + 8 + 10 + 9 = 37 points out of 40.
pub(super) fn strong_answers(application_id: &str) -> Vec<ApplicationAnswer> {
    vec![
        answer(application_id, EXPERIENCE_LEVEL, "Expert"),
        answer(application_id, COMMUNICATION, "4"),
        answer(application_id, YEARS, "5"),
        answer(application_id, MOTIVATION, DETAILED_ANSWER),
    ]
}

pub(super) fn dataset() -> ScreeningDataset {
    let applications = vec![
        application("app-strong", "Grace Hopper", at(3, 9)),
        application("app-partial", "Alan Turing", at(1, 9)),
        application("app-empty", "Edsger Dijkstra", at(2, 9)),
    ];

    let mut answers = strong_answers("app-strong");
    answers.push(answer("app-partial", EXPERIENCE_LEVEL, "intermediate"));
    answers.push(answer("app-partial", COMMUNICATION, "3"));

    ScreeningDataset {
        positions: vec![
            Position {
                id: position_id(),
                title: "Backend Engineer".to_string(),
            },
            Position {
                id: PositionId("pos-empty".to_string()),
                title: "Office Manager".to_string(),
            },
        ],
        questions: questions(),
        position_questions: position_questions(),
        applications,
        answers,
        scoring: ScoringConfig::default(),
    }
}

pub(super) fn build_service() -> (
    ScreeningScoreService<InMemoryScreeningRepository>,
    Arc<InMemoryScreeningRepository>,
) {
    let repository = Arc::new(InMemoryScreeningRepository::new(dataset()));
    let service = ScreeningScoreService::new(repository.clone(), ScoringConfig::default());
    (service, repository)
}

pub(super) fn router() -> axum::Router {
    let (service, _) = build_service();
    application_router(Arc::new(service))
}

pub(super) struct UnavailableRepository;

impl ScreeningRepository for UnavailableRepository {
    fn questions(&self, _ids: &[QuestionId]) -> Result<Vec<Question>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn position(&self, _id: &PositionId) -> Result<Option<Position>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn position_questions(
        &self,
        _position_id: &PositionId,
    ) -> Result<Vec<PositionQuestion>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn applications_for_position(
        &self,
        _position_id: &PositionId,
    ) -> Result<Vec<Application>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn application(&self, _id: &ApplicationId) -> Result<Option<Application>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn answers(
        &self,
        _application_id: &ApplicationId,
    ) -> Result<Vec<ApplicationAnswer>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn decimal_field(value: &Value, field: &str) -> Decimal {
    value
        .get(field)
        .and_then(Value::as_str)
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_else(|| panic!("expected decimal string field '{field}' in {value}"))
}
