use std::sync::Arc;

use applicant_tracker::workflows::screening::{
    application_router, ApplicationId, DatasetError, InMemoryScreeningRepository, PositionId,
    ScreeningDataset, ScreeningScoreService, ScreeningServiceError,
};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;

const DATASET: &str = r#"{
  "positions": [
    { "id": "pos-support", "title": "Support Engineer" },
    { "id": "pos-closed", "title": "Archived Role" }
  ],
  "questions": [
    {
      "id": "q-shift",
      "text": "Which shift can you cover?",
      "kind": {
        "type": "choice",
        "options": [
          { "id": "opt-day", "question_id": "q-shift", "text": "Day", "points": "4" },
          { "id": "opt-night", "question_id": "q-shift", "text": "Night", "points": "6" },
          { "id": "opt-any", "question_id": "q-shift", "text": "Any", "points": "10" }
        ]
      }
    },
    { "id": "q-empathy", "text": "Rate your patience with customers", "kind": { "type": "rating" } },
    { "id": "q-tickets", "text": "Tickets handled per day", "kind": { "type": "number" } },
    { "id": "q-portfolio", "text": "Upload your resume", "active": false, "kind": { "type": "file_upload" } }
  ],
  "position_questions": [
    { "position_id": "pos-support", "question_id": "q-tickets", "order": 3, "is_required": true },
    { "position_id": "pos-support", "question_id": "q-shift", "order": 1, "is_required": true },
    { "position_id": "pos-support", "question_id": "q-empathy", "order": 2 },
    { "position_id": "pos-support", "question_id": "q-portfolio", "order": 4 }
  ],
  "applications": [
    {
      "id": "app-kim",
      "applicant": { "id": "cand-kim", "name": "Kim Park", "email": "kim@example.com" },
      "position_id": "pos-support",
      "status": "screening",
      "applied_on": "2025-04-02T10:00:00Z"
    },
    {
      "id": "app-lee",
      "applicant": { "id": "cand-lee", "name": "Lee Moss", "email": "lee@example.com" },
      "position_id": "pos-support",
      "status": "submitted",
      "applied_on": "2025-04-01T08:30:00Z"
    },
    {
      "id": "app-ray",
      "applicant": { "id": "cand-ray", "name": "Ray Cole", "email": "ray@example.com" },
      "position_id": "pos-support",
      "status": "submitted",
      "applied_on": "2025-04-03T12:00:00Z"
    }
  ],
  "answers": [
    { "id": "a1", "application_id": "app-kim", "question_id": "q-shift", "answer": " any " },
    { "id": "a2", "application_id": "app-kim", "question_id": "q-empathy", "answer": "5" },
    { "id": "a3", "application_id": "app-kim", "question_id": "q-tickets", "answer": "3" },
    { "id": "a4", "application_id": "app-lee", "question_id": "q-shift", "answer": "Night" },
    { "id": "a5", "application_id": "app-lee", "question_id": "q-empathy", "answer": "5" },
    { "id": "a6", "application_id": "app-lee", "question_id": "q-tickets", "answer": "12" },
    { "id": "a7", "application_id": "app-ray", "question_id": "q-shift", "answer": "Weekends" },
    { "id": "a8", "application_id": "app-ray", "question_id": "q-tickets", "answer": "many" }
  ]
}"#;

fn service() -> Arc<ScreeningScoreService<InMemoryScreeningRepository>> {
    let dataset = ScreeningDataset::from_reader(DATASET.as_bytes()).expect("data set parses");
    let config = dataset.scoring.clone();
    let repository = Arc::new(InMemoryScreeningRepository::new(dataset));
    Arc::new(ScreeningScoreService::new(repository, config))
}

#[test]
fn dataset_scores_every_question_kind() {
    let service = service();

    let kim = service
        .score_application(&ApplicationId("app-kim".to_string()))
        .expect("kim scores");
    assert_eq!(kim.achieved, Decimal::from(26));
    assert_eq!(kim.max, Decimal::from(30));
    assert_eq!(kim.breakdown.len(), 4);
    assert_eq!(kim.breakdown[3].kind, "unsupported");
    assert_eq!(kim.breakdown[3].max, Decimal::ZERO);

    let ray = service
        .score_application(&ApplicationId("app-ray".to_string()))
        .expect("ray scores");
    assert_eq!(ray.achieved, Decimal::ZERO);
    assert_eq!(ray.unanswered_required, 0);
}

#[test]
fn ranking_puts_the_highest_percentage_first() {
    let ranked = service()
        .rank_candidates_for_position(&PositionId("pos-support".to_string()))
        .expect("ranking computes");

    let names: Vec<&str> = ranked
        .iter()
        .map(|entry| entry.candidate_name.as_str())
        .collect();
    assert_eq!(names, vec!["Lee Moss", "Kim Park", "Ray Cole"]);
    assert_eq!(ranked[0].percentage, Decimal::new(8667, 2));
    assert_eq!(ranked[1].percentage, Decimal::new(8667, 2));
    assert_eq!(ranked[2].rank, 3);
}

#[test]
fn archived_position_without_applications_ranks_empty() {
    let ranked = service()
        .rank_candidates_for_position(&PositionId("pos-closed".to_string()))
        .expect("ranking computes");
    assert!(ranked.is_empty());
}

#[test]
fn missing_application_surfaces_not_found() {
    let error = service()
        .get_score_breakdown(&ApplicationId("app-unknown".to_string()))
        .expect_err("unknown application");
    assert!(matches!(error, ScreeningServiceError::ApplicationNotFound(_)));
}

#[test]
fn duplicate_ids_are_rejected() {
    let duplicated = r#"{
      "positions": [
        { "id": "pos-a", "title": "First" },
        { "id": "pos-a", "title": "Second" }
      ]
    }"#;

    match ScreeningDataset::from_reader(duplicated.as_bytes()) {
        Err(DatasetError::DuplicateId { kind, id }) => {
            assert_eq!(kind, "position");
            assert_eq!(id, "pos-a");
        }
        other => panic!("expected duplicate id error, got {other:?}"),
    }
}

#[tokio::test]
async fn rankings_endpoint_serves_the_dataset() {
    let router = application_router(service());

    let response = router
        .oneshot(
            Request::get("/api/v1/positions/pos-support/rankings")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    let payload: Value = serde_json::from_slice(&body).expect("json payload");
    let first = &payload.as_array().expect("array payload")[0];
    assert_eq!(first.get("application_id"), Some(&Value::from("app-lee")));
    assert_eq!(first.get("rank"), Some(&Value::from(1)));
}
