//! End-to-end recording tests: build a story, record it against an
//! in-process application, persist it and read it back.

#![allow(clippy::unwrap_used)]

use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use restory_application::{RawResponse, RecordStory, TransportError};
use restory_domain::{Call, CallDiff, Story, Verb, WireRequest};
use restory_infrastructure::{InProcessTransport, StoryStore, dumps, loads};

/// A tiny application under test: one user resource with a fixed
/// collection, answering JSON for known routes and 404 otherwise.
fn user_app(request: &WireRequest) -> Result<RawResponse, TransportError> {
    let json = |status: &str, body: &str| {
        Ok(RawResponse {
            status: status.to_string(),
            headers: vec![(
                "Content-Type".to_string(),
                "application/json; charset=utf-8".to_string(),
            )],
            body: body.as_bytes().to_vec(),
        })
    };

    match (request.verb, request.url.as_str()) {
        (Verb::Get, "/users/:user_id") => json("200 OK", r#"{"id": 1, "name": "Ada"}"#),
        (Verb::Delete, "/users/:user_id") => Ok(RawResponse {
            status: "204 No Content".to_string(),
            headers: Vec::new(),
            body: Vec::new(),
        }),
        (Verb::Post, "/users") => json("201 Created", r#"{"id": 2}"#),
        _ => json("404 Not Found", r#"{"error": "no such route"}"#),
    }
}

fn user_story() -> Story {
    let mut story = Story::new(
        Call::new("get user", "/users/user_id: 1").with_description("the canonical read"),
    );

    let second = story.derive(
        "get user 2",
        CallDiff::new().with_url_parameter("user_id", "2"),
    );
    story.push(second);

    let removal = story.derive("remove user", CallDiff::new().with_verb(Verb::Delete));
    story.push(removal);

    let creation = story.derive(
        "create user",
        CallDiff::new()
            .with_url("/users")
            .with_verb(Verb::Post)
            .with_form(BTreeMap::from([("name".to_string(), "Grace".to_string())])),
    );
    story.push(creation);

    let missing = story.derive("wrong route", CallDiff::new().with_url("/nope"));
    story.push(missing);

    story
}

#[test]
fn recording_attaches_a_response_to_every_call() {
    let recorder = RecordStory::new(InProcessTransport::new(user_app));
    let recorded = recorder.record(user_story()).unwrap();

    let base_response = recorded.base_call.response().unwrap();
    assert_eq!(base_response.status_code(), 200);
    assert_eq!(base_response.content_type(), Some("application/json"));
    assert_eq!(base_response.encoding(), Some("utf-8"));
    assert_eq!(
        base_response.json().unwrap(),
        Some(serde_json::json!({"id": 1, "name": "Ada"}))
    );

    let statuses: Vec<u16> = recorded
        .calls
        .iter()
        .map(|call| call.response().unwrap().status_code())
        .collect();
    assert_eq!(statuses, vec![200, 204, 201, 404]);
}

#[test]
fn http_failures_are_captured_rather_than_raised() {
    let recorder = RecordStory::new(InProcessTransport::new(user_app));
    let recorded = recorder.record(user_story()).unwrap();

    let missing = recorded.calls.last().unwrap();
    let response = missing.response().unwrap();
    assert_eq!(response.status(), "404 Not Found");
    assert_eq!(
        response.json().unwrap(),
        Some(serde_json::json!({"error": "no such route"}))
    );
}

#[test]
fn effective_fields_resolve_against_the_base() {
    let story = user_story();

    let second = story.calls[0].call();
    assert_eq!(second.url(), "/users/:user_id");
    assert_eq!(second.verb(), Verb::Get);
    assert_eq!(
        second.url_parameters().get("user_id").map(String::as_str),
        Some("2")
    );

    let creation = story.calls[2].call();
    assert_eq!(creation.url(), "/users");
    assert_eq!(creation.verb(), Verb::Post);
}

#[test]
fn dumped_stories_reload_into_the_same_document() {
    let recorder = RecordStory::new(InProcessTransport::new(user_app));
    let recorded = recorder.record(user_story()).unwrap();

    let text = dumps(&recorded).unwrap();
    let restored = loads(&text).unwrap();

    assert_eq!(restored, recorded);
    assert_eq!(restored.to_document(), recorded.to_document());
    assert_eq!(dumps(&restored).unwrap(), text);
}

#[test]
fn dumped_stories_are_line_diffable_yaml() {
    let recorder = RecordStory::new(InProcessTransport::new(user_app));
    let recorded = recorder.record(user_story()).unwrap();

    let text = dumps(&recorded).unwrap();
    assert!(text.starts_with("base_call:"));
    assert!(text.contains("\ncalls:"));
    assert!(text.contains("title: get user 2"));
    assert!(text.contains("status: 204 No Content"));
    // Overrides keep only their diff: the base URL appears under the
    // base call and in the explicit creation override, nowhere else.
    assert_eq!(text.matches("url: /users/:user_id").count(), 1);
}

#[test]
fn stories_survive_the_file_backed_store() {
    let recorder = RecordStory::new(InProcessTransport::new(user_app));
    let recorded = recorder.record(user_story()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let store = StoryStore::open(dir.path()).unwrap();
    store.save("users", &recorded).unwrap();

    let restored = store.load("users").unwrap();
    assert_eq!(restored, recorded);
}

#[test]
fn rerecording_overwrites_previous_responses() {
    let recorder = RecordStory::new(InProcessTransport::new(user_app));
    let once = recorder.record(user_story()).unwrap();
    let twice = recorder.record(once.clone()).unwrap();
    assert_eq!(twice, once);
}
