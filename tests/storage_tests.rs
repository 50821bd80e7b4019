#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use marketing_bot::storage::chats::{ChatKind, ChatStore};
use marketing_bot::storage::keywords::KeywordStore;
use marketing_bot::storage::subscribers::SubscriberStore;
use marketing_bot::storage::templates::{MessageButton, TemplateError, TemplateStore};
use marketing_bot::storage::{Backend, FileBackend};
use tempfile::{tempdir, TempDir};

fn file_backend() -> (Backend, TempDir) {
    let dir = tempdir().unwrap();
    let backend: Backend = Arc::new(FileBackend::new(dir.path()));
    (backend, dir)
}

#[test]
fn missing_files_read_as_empty_collections() {
    let (backend, _dir) = file_backend();

    assert!(SubscriberStore::new(backend.clone()).list().unwrap().is_empty());
    assert!(ChatStore::new(backend.clone()).list().unwrap().is_empty());
    assert!(TemplateStore::new(backend.clone()).list().unwrap().is_empty());
    assert!(KeywordStore::new(backend).list().unwrap().is_empty());
}

#[test]
fn corrupt_files_read_as_empty_collections() {
    let (backend, dir) = file_backend();
    for name in ["users.json", "chats.json", "templates.json", "keywords.json"] {
        std::fs::write(dir.path().join(name), "][ not json").unwrap();
    }

    assert!(SubscriberStore::new(backend.clone()).list().unwrap().is_empty());
    assert!(ChatStore::new(backend.clone()).list().unwrap().is_empty());
    assert!(TemplateStore::new(backend.clone()).list().unwrap().is_empty());
    assert!(KeywordStore::new(backend.clone()).list().unwrap().is_empty());

    // A corrupt document is recoverable: the next write replaces it.
    let subscribers = SubscriberStore::new(backend);
    assert!(subscribers.register(1).unwrap());
    assert_eq!(subscribers.count().unwrap(), 1);
}

#[test]
fn subscriber_registration_is_idempotent_on_disk() {
    let (backend, _dir) = file_backend();
    let subscribers = SubscriberStore::new(backend);

    assert!(subscribers.register(12345).unwrap());
    assert!(!subscribers.register(12345).unwrap());
    assert_eq!(subscribers.count().unwrap(), 1);
}

#[test]
fn subscribers_persist_as_a_json_array() {
    let (backend, dir) = file_backend();
    let subscribers = SubscriberStore::new(backend);
    subscribers.register(3).unwrap();
    subscribers.register(1).unwrap();

    let raw = std::fs::read_to_string(dir.path().join("users.json")).unwrap();
    let parsed: Vec<i64> = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed.len(), 2);

    // A second store over the same directory sees the same set.
    let reopened = SubscriberStore::new(Arc::new(FileBackend::new(dir.path())));
    assert_eq!(reopened.list().unwrap(), [1, 3].into_iter().collect());
}

#[test]
fn chats_upsert_and_persist_title_and_kind() {
    let (backend, dir) = file_backend();
    let chats = ChatStore::new(backend);

    chats.register("-100777", "Launch Channel", ChatKind::Channel).unwrap();
    chats.register("-100777", "Launch Channel v2", ChatKind::Channel).unwrap();

    let raw = std::fs::read_to_string(dir.path().join("chats.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed["-100777"]["title"], "Launch Channel v2");
    assert_eq!(parsed["-100777"]["kind"], "channel");

    assert_eq!(chats.count().unwrap(), 1);
}

#[test]
fn template_round_trips_with_button_through_disk() {
    let (backend, dir) = file_backend();
    let templates = TemplateStore::new(backend);

    let button = MessageButton {
        text: "Sign up".to_string(),
        url: "https://example.com/go".to_string(),
    };
    templates
        .put("promo", "<b>Half price!</b>".to_string(), Some(button.clone()))
        .unwrap();

    let reopened = TemplateStore::new(Arc::new(FileBackend::new(dir.path())));
    let stored = reopened.get("promo").unwrap().unwrap();
    assert_eq!(stored.content, "<b>Half price!</b>");
    assert_eq!(stored.button(), Some(button));

    // Wire format is {name: {content, button_text, button_url}}.
    let raw = std::fs::read_to_string(dir.path().join("templates.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed["promo"]["content"], "<b>Half price!</b>");
    assert_eq!(parsed["promo"]["button_text"], "Sign up");
    assert_eq!(parsed["promo"]["button_url"], "https://example.com/go");
}

#[test]
fn buttonless_template_omits_button_fields_on_disk() {
    let (backend, dir) = file_backend();
    let templates = TemplateStore::new(backend);
    templates.put("plain", "no frills".to_string(), None).unwrap();

    let raw = std::fs::read_to_string(dir.path().join("templates.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert!(parsed["plain"].get("button_text").is_none());
    assert!(parsed["plain"].get("button_url").is_none());
}

#[test]
fn template_button_url_must_parse() {
    let (backend, _dir) = file_backend();
    let templates = TemplateStore::new(backend);

    let result = templates.put(
        "bad",
        "body".to_string(),
        Some(MessageButton {
            text: "Go".to_string(),
            url: "not a url".to_string(),
        }),
    );

    assert!(matches!(result, Err(TemplateError::InvalidButtonUrl(_))));
    assert!(templates.list().unwrap().is_empty());
}

#[test]
fn keyword_store_round_trips_and_deletes() {
    let (backend, _dir) = file_backend();
    let keywords = KeywordStore::new(backend);

    keywords.put("Pricing", "See https://example.com/pricing").unwrap();
    let listed = keywords.list().unwrap();
    assert_eq!(listed.get("pricing").map(String::as_str), Some("See https://example.com/pricing"));

    assert!(keywords.remove("PRICING").unwrap());
    assert!(!keywords.remove("pricing").unwrap());
    assert!(keywords.list().unwrap().is_empty());
}
