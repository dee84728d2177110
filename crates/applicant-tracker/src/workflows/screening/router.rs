use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{ApplicationId, PositionId, Question};
use super::repository::ScreeningRepository;
use super::service::{ScreeningScoreService, ScreeningServiceError};

/// Router builder exposing the read-only scoring and ranking endpoints.
pub fn application_router<R>(service: Arc<ScreeningScoreService<R>>) -> Router
where
    R: ScreeningRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/applications/:application_id/score",
            get(score_handler::<R>),
        )
        .route(
            "/api/v1/applications/:application_id/breakdown",
            get(breakdown_handler::<R>),
        )
        .route(
            "/api/v1/positions/:position_id/rankings",
            get(rankings_handler::<R>),
        )
        .route("/api/v1/questions/score", post(question_score_handler::<R>))
        .with_state(service)
}

/// Totals without the per-question detail.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationScoreView {
    pub application_id: ApplicationId,
    pub achieved: Decimal,
    pub max: Decimal,
    pub percentage: Decimal,
    pub unanswered_required: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuestionScoreRequest {
    pub question: Question,
    #[serde(default)]
    pub answer: Option<String>,
    pub position_id: PositionId,
}

pub(crate) async fn score_handler<R>(
    State(service): State<Arc<ScreeningScoreService<R>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: ScreeningRepository + 'static,
{
    match service.score_application(&ApplicationId(application_id)) {
        Ok(score) => {
            let view = ApplicationScoreView {
                application_id: score.application_id,
                achieved: score.achieved,
                max: score.max,
                percentage: score.percentage,
                unanswered_required: score.unanswered_required,
            };
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn breakdown_handler<R>(
    State(service): State<Arc<ScreeningScoreService<R>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: ScreeningRepository + 'static,
{
    match service.get_score_breakdown(&ApplicationId(application_id)) {
        Ok(breakdown) => (StatusCode::OK, axum::Json(breakdown)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn rankings_handler<R>(
    State(service): State<Arc<ScreeningScoreService<R>>>,
    Path(position_id): Path<String>,
) -> Response
where
    R: ScreeningRepository + 'static,
{
    match service.rank_candidates_for_position(&PositionId(position_id)) {
        Ok(rankings) => (StatusCode::OK, axum::Json(rankings)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn question_score_handler<R>(
    State(service): State<Arc<ScreeningScoreService<R>>>,
    axum::Json(request): axum::Json<QuestionScoreRequest>,
) -> Response
where
    R: ScreeningRepository + 'static,
{
    let score = service.question_score(
        &request.question,
        request.answer.as_deref(),
        &request.position_id,
    );
    let payload = json!({
        "question_id": request.question.id,
        "achieved": score.achieved,
        "max": score.max,
        "percentage": score.percentage(),
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

fn error_response(error: ScreeningServiceError) -> Response {
    let status = if error.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
