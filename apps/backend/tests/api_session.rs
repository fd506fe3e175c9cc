//! Flashcard session API tests.

mod common;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use common::fixtures;
use common::TestContext;

fn current_word(body: &Value) -> String {
    body["session"]["word_id"].as_str().unwrap().to_string()
}

/// Test health endpoint.
#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    response.assert_text("OK");
}

/// Test a fresh trainer starts on the front of a full session.
#[tokio::test]
async fn test_initial_state() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/api/state").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["view"], "flashcards");
    assert_eq!(body["session"]["phase"], "front_shown");
    assert_eq!(body["session"]["direction"], "fa2sv");
    assert_eq!(body["session"]["queue_len"], 5);
    assert_eq!(body["session"]["remaining"], 4);
    assert_eq!(body["session"]["reps_this_session"], 0);
    assert!(body["session"].get("back").is_none());
    assert_eq!(body["quiz"]["phase"], "idle");
}

/// Test reveal shows the back and hide flips it again.
#[tokio::test]
async fn test_reveal_and_hide() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.post("/api/session/reveal").await;
    response.assert_status_ok();
    let revealed: Value = response.json();
    assert_eq!(revealed["session"]["phase"], "back_revealed");
    let word_id = current_word(&revealed);
    let back = &revealed["session"]["back"];
    let expected = fixtures::word(&word_id);
    assert_eq!(back["fa"], expected.fa.as_str());
    assert_eq!(back["sv"], expected.sv.as_str());

    let again: Value = server.post("/api/session/reveal").await.json();
    assert_eq!(again["session"]["back"], revealed["session"]["back"]);

    let hidden: Value = server.post("/api/session/hide").await.json();
    assert_eq!(hidden["session"]["phase"], "front_shown");
    assert!(hidden["session"].get("back").is_none());
    assert_eq!(current_word(&hidden), word_id);
}

/// Test grading before reveal does nothing.
#[tokio::test]
async fn test_grade_requires_reveal() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/session/grade")
        .json(&fixtures::grade_request(3))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["outcome"].is_null());
    assert_eq!(body["state"]["session"]["reps_this_session"], 0);
    assert!(ctx.stored_boxes().is_none());
}

/// Test grading promotes the card and persists it to SQLite.
#[tokio::test]
async fn test_grade_easy_persists() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let revealed: Value = server.post("/api/session/reveal").await.json();
    let word_id = current_word(&revealed);

    let response = server
        .post("/api/session/grade")
        .json(&fixtures::grade_request(3))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["outcome"]["word_id"], word_id.as_str());
    assert_eq!(body["outcome"]["grade"], "easy");
    assert_eq!(body["outcome"]["entry"]["box"], 2);
    assert_eq!(body["outcome"]["persisted"], true);
    assert_eq!(body["state"]["session"]["reps_this_session"], 1);
    assert_eq!(body["state"]["session"]["phase"], "front_shown");
    assert_eq!(body["state"]["session"]["queue_len"], 6);

    let stored = ctx.stored_boxes().unwrap();
    assert_eq!(stored[format!("{word_id}|fa2sv")]["box"], 2);
}

/// Test a hard card comes straight back and never drops below box 1.
#[tokio::test]
async fn test_grade_hard_requeues_immediately() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let revealed: Value = server.post("/api/session/reveal").await.json();
    let word_id = current_word(&revealed);

    let body: Value = server
        .post("/api/session/grade")
        .json(&fixtures::grade_request(1))
        .await
        .json();

    assert_eq!(body["outcome"]["entry"]["box"], 1);
    assert_eq!(current_word(&body["state"]), word_id);
}

/// Test out-of-range grades are rejected.
#[tokio::test]
async fn test_invalid_grade() {
    let ctx = TestContext::new();
    let server = ctx.server();
    server.post("/api/session/reveal").await;

    for grade in [json!(0), json!(4), json!(256), json!(-1), json!("3")] {
        let response = server
            .post("/api/session/grade")
            .json(&json!({ "grade": grade }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "bad_request");
    }

    // card is still revealed
    let state: Value = server.get("/api/state").await.json();
    assert_eq!(state["session"]["phase"], "back_revealed");
}

/// Test custom sessions keep the requested order.
#[tokio::test]
async fn test_custom_session() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/session/custom")
        .json(&fixtures::custom_session_request(&["dog", "nope", "cat"]))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(current_word(&body), "dog");
    assert_eq!(body["session"]["queue_len"], 2);
    assert_eq!(body["session"]["remaining"], 1);
}

/// Test a custom session with no known ids falls back to the default session.
#[tokio::test]
async fn test_custom_session_unknown_ids() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let body: Value = server
        .post("/api/session/custom")
        .json(&fixtures::custom_session_request(&["ghost"]))
        .await
        .json();

    assert_eq!(body["session"]["queue_len"], 5);
}

/// Test direction toggle, explicit set and rejection of unknown values.
#[tokio::test]
async fn test_direction() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let toggled: Value = server.post("/api/session/direction").await.json();
    assert_eq!(toggled["session"]["direction"], "sv2fa");
    assert_eq!(toggled["session"]["direction_label"], "Svenska → Farsi");
    let word_id = current_word(&toggled);
    let word = fixtures::word(&word_id);
    assert_eq!(toggled["session"]["prompt"], word.sv.as_str());

    let set: Value = server
        .post("/api/session/direction")
        .json(&json!({ "direction": "fa2sv" }))
        .await
        .json();
    assert_eq!(set["session"]["direction"], "fa2sv");
    assert_eq!(set["session"]["reps_this_session"], 0);

    let response = server
        .post("/api/session/direction")
        .json(&json!({ "direction": "en2sv" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

/// Test a malformed direction body is rejected rather than toggling.
#[tokio::test]
async fn test_direction_malformed_body() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/session/direction")
        .json(&json!({ "direction": 5 }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "bad_request");

    let state: Value = server.get("/api/state").await.json();
    assert_eq!(state["session"]["direction"], "fa2sv");
}

/// Test an empty JSON object toggles like a missing body.
#[tokio::test]
async fn test_direction_empty_object_toggles() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let body: Value = server
        .post("/api/session/direction")
        .json(&json!({}))
        .await
        .json();

    assert_eq!(body["session"]["direction"], "sv2fa");
}

/// Test malformed custom session bodies get a JSON 400.
#[tokio::test]
async fn test_custom_session_malformed_body() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/session/custom")
        .json(&json!({ "word_ids": "cat" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "bad_request");
}

/// Test mastery is tracked separately per direction.
#[tokio::test]
async fn test_direction_has_own_mastery() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let revealed: Value = server.post("/api/session/reveal").await.json();
    let word_id = current_word(&revealed);
    server
        .post("/api/session/grade")
        .json(&fixtures::grade_request(3))
        .await;

    server.post("/api/session/direction").await;
    server
        .post("/api/session/custom")
        .json(&fixtures::custom_session_request(&[word_id.as_str()]))
        .await;
    server.post("/api/session/reveal").await;
    server
        .post("/api/session/grade")
        .json(&fixtures::grade_request(2))
        .await;

    let stored = ctx.stored_boxes().unwrap();
    assert_eq!(stored[format!("{word_id}|fa2sv")]["box"], 2);
    assert_eq!(stored[format!("{word_id}|sv2fa")]["box"], 1);
}

/// Test an empty catalog yields no cards and ignores card actions.
#[tokio::test]
async fn test_empty_catalog() {
    let ctx = TestContext::empty();
    let server = ctx.server();

    let state: Value = server.get("/api/state").await.json();
    assert_eq!(state["session"]["phase"], "no_cards");
    assert!(state["session"].get("word_id").is_none());

    let revealed: Value = server.post("/api/session/reveal").await.json();
    assert_eq!(revealed["session"]["phase"], "no_cards");

    let graded: Value = server
        .post("/api/session/grade")
        .json(&fixtures::grade_request(2))
        .await
        .json();
    assert!(graded["outcome"].is_null());

    let fresh: Value = server.post("/api/session/new").await.json();
    assert_eq!(fresh["session"]["phase"], "no_cards");
}

/// Test unknown paths return a JSON 404.
#[tokio::test]
async fn test_unknown_path() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/api/nowhere").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"], "not_found");
}
