//! Spellbook list, detail and create-flow tests.

mod common;

use async_trait::async_trait;
use axum::http::StatusCode;
use common::{build_app, location, session_cookie, test_app};
use serde_json::Value;
use spellbook_server::config::AppConfig;
use spellbook_server::models::{NewSpellbook, Spell, Spellbook};
use spellbook_server::routes::AppState;
use spellbook_server::storage::{
    MemorySessionStore, MemoryStorageBackend, StorageBackend, StorageError,
};
use std::future::IntoFuture;
use std::sync::Arc;
use uuid::Uuid;

async fn list_for(app: &common::TestApp, token: &str) -> Vec<Value> {
    let (name, value) = session_cookie(token);
    let response = app.server.get("/spellbooks").add_header(name, value).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    body["spellbooks"].as_array().unwrap().clone()
}

#[tokio::test]
async fn test_list_is_empty_for_new_user() {
    let app = test_app();
    let (_, token) = app.login().await;

    assert!(list_for(&app, &token).await.is_empty());
}

#[tokio::test]
async fn test_create_load_returns_empty_form() {
    let app = test_app();
    let (_, token) = app.login().await;
    let (name, value) = session_cookie(&token);

    let response = app
        .server
        .get("/spellbooks/create")
        .add_header(name, value)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["form"]["valid"], false);
    assert_eq!(body["form"]["posted"], false);
    assert_eq!(body["form"]["data"]["name"], "");
    assert!(body["form"]["errors"].as_object().unwrap().is_empty());
    assert_eq!(body["classes"].as_array().unwrap().len(), 9);
}

#[tokio::test]
async fn test_create_with_single_class() {
    let app = test_app();
    let (user_id, token) = app.login().await;
    let (name, value) = session_cookie(&token);

    let response = app
        .server
        .post("/spellbooks/create")
        .add_header(name, value)
        .form(&[
            ("name", "Elminster's Tome"),
            ("characterName", "Elminster"),
            ("description", "Everything worth knowing"),
            ("class1", "wizard"),
            ("class2", ""),
            ("class3", ""),
        ])
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/spellbooks");

    let spellbooks = list_for(&app, &token).await;
    assert_eq!(spellbooks.len(), 1);
    let book = &spellbooks[0];
    assert_eq!(book["spellbook_name"], "Elminster's Tome");
    assert_eq!(book["index"], "elminster-s-tome");
    assert_eq!(book["character_name"], "Elminster");
    assert_eq!(book["description"], "Everything worth knowing");
    assert_eq!(book["classes"], serde_json::json!(["wizard"]));
    assert_eq!(book["user_id"], user_id.to_string());
}

#[tokio::test]
async fn test_create_with_three_classes_keeps_order() {
    let app = test_app();
    let (_, token) = app.login().await;
    let (name, value) = session_cookie(&token);

    let response = app
        .server
        .post("/spellbooks/create")
        .add_header(name, value)
        .form(&[
            ("name", "Multiclass Notes"),
            ("characterName", "Tasha"),
            ("description", ""),
            ("class1", "warlock"),
            ("class2", "Bard"),
            ("class3", "cleric"),
        ])
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);

    let spellbooks = list_for(&app, &token).await;
    assert_eq!(
        spellbooks[0]["classes"],
        serde_json::json!(["warlock", "bard", "cleric"])
    );
}

#[tokio::test]
async fn test_create_without_class1_is_rejected() {
    let app = test_app();
    let (_, token) = app.login().await;
    let (name, value) = session_cookie(&token);

    let response = app
        .server
        .post("/spellbooks/create")
        .add_header(name, value)
        .form(&[
            ("name", "Classless"),
            ("characterName", "Nobody"),
            ("description", ""),
            ("class2", "wizard"),
        ])
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["form"]["valid"], false);
    assert_eq!(body["form"]["posted"], true);
    assert!(body["form"]["errors"]["class1"].is_array());
    assert_eq!(body["form"]["data"]["name"], "Classless");

    assert!(list_for(&app, &token).await.is_empty());
}

#[tokio::test]
async fn test_create_with_unknown_class_is_rejected() {
    let app = test_app();
    let (_, token) = app.login().await;
    let (name, value) = session_cookie(&token);

    let response = app
        .server
        .post("/spellbooks/create")
        .add_header(name, value)
        .form(&[("name", "Rage Book"), ("class1", "barbarian")])
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["form"]["errors"]["class1"].is_array());
}

#[tokio::test]
async fn test_create_with_repeated_class_is_rejected() {
    let app = test_app();
    let (_, token) = app.login().await;
    let (name, value) = session_cookie(&token);

    let response = app
        .server
        .post("/spellbooks/create")
        .add_header(name, value)
        .form(&[("name", "Twice"), ("class1", "druid"), ("class2", "druid")])
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["form"]["errors"]["class2"].is_array());
    assert!(body["form"]["errors"].get("class1").is_none());
}

#[tokio::test]
async fn test_create_with_blank_or_symbol_name_is_rejected() {
    let app = test_app();
    let (_, token) = app.login().await;

    for submitted in ["   ", "!!!"] {
        let (name, value) = session_cookie(&token);
        let response = app
            .server
            .post("/spellbooks/create")
            .add_header(name, value)
            .form(&[("name", submitted), ("class1", "wizard")])
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["form"]["valid"], false);
        assert!(body["form"]["errors"]["name"].is_array());
    }

    assert!(list_for(&app, &token).await.is_empty());
}

#[tokio::test]
async fn test_undecodable_form_body_is_rejected_as_form() {
    let app = test_app();
    let (_, token) = app.login().await;
    let (name, value) = session_cookie(&token);

    let response = app
        .server
        .post("/spellbooks/create")
        .add_header(name, value)
        .form(&[("name", "Twice"), ("class1", "wizard"), ("class1", "bard")])
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["form"]["valid"], false);
    assert_eq!(body["form"]["posted"], true);
    assert!(body["form"]["errors"]["form"].is_array());

    assert!(list_for(&app, &token).await.is_empty());
}

#[tokio::test]
async fn test_list_only_shows_own_spellbooks() {
    let app = test_app();
    let (_, alice) = app.login().await;
    let (_, bob) = app.login().await;

    let (name, value) = session_cookie(&alice);
    app.server
        .post("/spellbooks/create")
        .add_header(name, value)
        .form(&[("name", "Alice's Book"), ("class1", "bard")])
        .await;

    assert_eq!(list_for(&app, &alice).await.len(), 1);
    assert!(list_for(&app, &bob).await.is_empty());
}

#[tokio::test]
async fn test_concurrent_create_flows_attribute_to_submitter() {
    let app = test_app();
    let (alice_id, alice) = app.login().await;
    let (bob_id, bob) = app.login().await;
    let (alice_name, alice_value) = session_cookie(&alice);
    let (bob_name, bob_value) = session_cookie(&bob);

    // Both users open the form before either submits.
    let alice_load = app
        .server
        .get("/spellbooks/create")
        .add_header(alice_name.clone(), alice_value.clone())
        .await;
    let bob_load = app
        .server
        .get("/spellbooks/create")
        .add_header(bob_name.clone(), bob_value.clone())
        .await;
    assert_eq!(alice_load.status_code(), StatusCode::OK);
    assert_eq!(bob_load.status_code(), StatusCode::OK);

    let alice_submit = app
        .server
        .post("/spellbooks/create")
        .add_header(alice_name, alice_value)
        .form(&[("name", "Alice Book"), ("class1", "wizard")]);
    let bob_submit = app
        .server
        .post("/spellbooks/create")
        .add_header(bob_name, bob_value)
        .form(&[("name", "Bob Book"), ("class1", "cleric")]);
    let (alice_res, bob_res) =
        tokio::join!(alice_submit.into_future(), bob_submit.into_future());
    assert_eq!(alice_res.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(bob_res.status_code(), StatusCode::SEE_OTHER);

    let alice_books = list_for(&app, &alice).await;
    let bob_books = list_for(&app, &bob).await;
    assert_eq!(alice_books.len(), 1);
    assert_eq!(bob_books.len(), 1);
    assert_eq!(alice_books[0]["spellbook_name"], "Alice Book");
    assert_eq!(alice_books[0]["user_id"], alice_id.to_string());
    assert_eq!(bob_books[0]["spellbook_name"], "Bob Book");
    assert_eq!(bob_books[0]["user_id"], bob_id.to_string());
}

#[tokio::test]
async fn test_detail_fetches_through_api() {
    let app = test_app();
    let (user_id, token) = app.login().await;
    let (name, value) = session_cookie(&token);

    app.server
        .post("/spellbooks/create")
        .add_header(name.clone(), value.clone())
        .form(&[("name", "Detail Book"), ("class1", "paladin")])
        .await;
    let id = list_for(&app, &token).await[0]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .server
        .get(&format!("/spellbooks/{}", id))
        .add_header(name, value)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["userId"], user_id.to_string());
    assert_eq!(body["spellbookItem"]["id"], id);
    assert_eq!(body["spellbookItem"]["spellbook_name"], "Detail Book");
}

#[tokio::test]
async fn test_detail_of_other_users_spellbook_propagates_not_found() {
    let app = test_app();
    let (_, owner) = app.login().await;
    let (_, intruder) = app.login().await;

    let (name, value) = session_cookie(&owner);
    app.server
        .post("/spellbooks/create")
        .add_header(name, value)
        .form(&[("name", "Private"), ("class1", "ranger")])
        .await;
    let id = list_for(&app, &owner).await[0]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let (name, value) = session_cookie(&intruder);
    let response = app
        .server
        .get(&format!("/spellbooks/{}", id))
        .add_header(name, value)
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["status"], 404);
}

#[tokio::test]
async fn test_detail_with_malformed_id_propagates_bad_request() {
    let app = test_app();
    let (_, token) = app.login().await;
    let (name, value) = session_cookie(&token);

    let response = app
        .server
        .get("/spellbooks/not-a-uuid")
        .add_header(name, value)
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

/// Storage that accepts reads but fails every write.
struct ReadOnlyStorage;

#[async_trait]
impl StorageBackend for ReadOnlyStorage {
    async fn list_spellbooks_by_owner(
        &self,
        _user_id: Uuid,
    ) -> Result<Vec<Spellbook>, StorageError> {
        Ok(Vec::new())
    }

    async fn get_spellbook_for_owner(
        &self,
        _spellbook_id: Uuid,
        _user_id: Uuid,
    ) -> Result<Option<Spellbook>, StorageError> {
        Ok(None)
    }

    async fn create_spellbook(&self, _spellbook: NewSpellbook) -> Result<Spellbook, StorageError> {
        Err(StorageError::ConnectionError("database is read-only".to_string()))
    }

    async fn list_spells(&self) -> Result<Vec<Spell>, StorageError> {
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn test_persistence_failure_is_reported() {
    let sessions = Arc::new(MemorySessionStore::new());
    let state = AppState::with_backends(
        AppConfig::default(),
        Arc::new(ReadOnlyStorage),
        sessions.clone(),
    );
    let app = build_app(state, sessions);
    let (_, token) = app.login().await;
    let (name, value) = session_cookie(&token);

    let response = app
        .server
        .post("/spellbooks/create")
        .add_header(name, value)
        .form(&[("name", "Doomed"), ("class1", "sorcerer")])
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.headers().get("location").is_none());
    let body: Value = response.json();
    assert_eq!(body["status"], 500);
}

#[tokio::test]
async fn test_spellbooks_are_listed_in_creation_order() {
    let sessions = Arc::new(MemorySessionStore::new());
    let state = AppState::with_backends(
        AppConfig::default(),
        Arc::new(MemoryStorageBackend::new()),
        sessions.clone(),
    );
    let app = build_app(state, sessions);
    let (_, token) = app.login().await;

    for title in ["First", "Second", "Third"] {
        let (name, value) = session_cookie(&token);
        let response = app
            .server
            .post("/spellbooks/create")
            .add_header(name, value)
            .form(&[("name", title), ("class1", "wizard")])
            .await;
        assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    }

    let names: Vec<String> = list_for(&app, &token)
        .await
        .iter()
        .map(|b| b["spellbook_name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["First", "Second", "Third"]);
}
