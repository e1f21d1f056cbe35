use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use client_core::{
    project, FixedIndicator, HttpPredictionTransport, SubmissionController, SubmissionState,
    SubmitOutcome, ViewMode,
};
use serde_json::{json, Value};
use shared::domain::{ModelId, SentimentLabel};
use tokio::net::TcpListener;

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    body: Value,
    hits: Arc<AtomicUsize>,
}

async fn predict(State(state): State<StubState>, Json(_): Json<Value>) -> (StatusCode, Json<Value>) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    (state.status, Json(state.body.clone()))
}

async fn spawn_service(status: StatusCode, body: Value) -> (String, Arc<AtomicUsize>) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route("/api/predict/", post(predict))
        .with_state(StubState {
            status,
            body,
            hits: hits.clone(),
        });
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), hits)
}

fn controller_for(base_url: &str) -> Arc<SubmissionController> {
    let transport = HttpPredictionTransport::new(base_url).expect("transport");
    SubmissionController::new(
        Arc::new(transport),
        Arc::new(FixedIndicator {
            step: 5,
            confidence: 92,
        }),
    )
}

#[tokio::test]
async fn positive_comment_on_svm_shows_result() {
    let (base_url, hits) = spawn_service(StatusCode::OK, json!({ "sentiment": "positive" })).await;
    let controller = controller_for(&base_url);

    let outcome = controller.submit("bagus sekali", "svm").await;

    assert!(matches!(
        outcome,
        SubmitOutcome::Settled(SubmissionState::Succeeded {
            sentiment: SentimentLabel::Positive,
            ..
        })
    ));
    let view = project(&controller.snapshot().await);
    assert_eq!(view.mode, ViewMode::Result);
    assert_eq!(view.label.as_deref(), Some("Positive"));
    assert_eq!(view.model, Some(ModelId::Svm));
    assert!((85..=100).contains(&view.meter));
    assert!(view.submit_enabled);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn server_error_on_knn_shows_service_message() {
    let (base_url, hits) = spawn_service(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": "model unavailable" }),
    )
    .await;
    let controller = controller_for(&base_url);

    controller.submit("jelek", "knn").await;

    let view = project(&controller.snapshot().await);
    assert_eq!(view.mode, ViewMode::Error);
    assert_eq!(view.message.as_deref(), Some("model unavailable"));
    assert_eq!(view.meter, 0);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn whitespace_comment_is_rejected_locally() {
    let (base_url, hits) = spawn_service(StatusCode::OK, json!({ "sentiment": "positive" })).await;
    let controller = controller_for(&base_url);

    let outcome = controller.submit("   ", "svm").await;

    assert!(matches!(outcome, SubmitOutcome::Rejected(_)));
    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.state, SubmissionState::Idle);
    let view = project(&snapshot);
    assert_eq!(view.mode, ViewMode::Idle);
    assert!(view.validation_message.is_some());
    assert!(!view.submit_enabled);
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn error_without_message_falls_back_to_generic_text() {
    let (base_url, _) = spawn_service(StatusCode::NOT_FOUND, json!({})).await;
    let controller = controller_for(&base_url);

    controller.submit("biasa", "decision-tree").await;

    let view = project(&controller.snapshot().await);
    assert_eq!(view.mode, ViewMode::Error);
    assert_eq!(
        view.message.as_deref(),
        Some(client_core::GENERIC_FAILURE_MESSAGE)
    );
}
