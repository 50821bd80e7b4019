use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{load_or_default, persist, Backend, StorageError};

const STORE_KEY: &str = "templates";

/// Single call-to-action button attached to a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageButton {
    pub text: String,
    pub url: String,
}

/// Reusable message template, persisted as
/// `{name: {content, [button_text, button_url]}}`.
///
/// The body may contain HTML markup; it is passed through to the transport
/// verbatim. The two button fields are either both present or both absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_url: Option<String>,
}

impl Template {
    /// Build a template, enforcing the button-pair invariant and checking
    /// that the button target is a parseable URL.
    pub fn new(content: String, button: Option<MessageButton>) -> Result<Self, TemplateError> {
        if let Some(button) = &button {
            if button.text.trim().is_empty() || button.url.trim().is_empty() {
                return Err(TemplateError::IncompleteButton);
            }
            url::Url::parse(&button.url).map_err(|_| TemplateError::InvalidButtonUrl(button.url.clone()))?;
        }
        Ok(Self {
            content,
            button_text: button.as_ref().map(|b| b.text.clone()),
            button_url: button.map(|b| b.url),
        })
    }

    /// The attached button, if the stored pair is complete.
    pub fn button(&self) -> Option<MessageButton> {
        match (&self.button_text, &self.button_url) {
            (Some(text), Some(url)) => Some(MessageButton {
                text: text.clone(),
                url: url.clone(),
            }),
            _ => None,
        }
    }
}

/// Rejections raised while validating or storing a template.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("button text and URL must both be provided")]
    IncompleteButton,
    #[error("button URL '{0}' is not a valid URL")]
    InvalidButtonUrl(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Named message templates with last-write-wins upsert semantics.
#[derive(Clone)]
pub struct TemplateStore {
    backend: Backend,
}

impl TemplateStore {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }

    /// Create or replace a template by name.
    pub fn put(&self, name: &str, content: String, button: Option<MessageButton>) -> Result<(), TemplateError> {
        let template = Template::new(content, button)?;
        let mut templates = self.list().map_err(TemplateError::Storage)?;
        templates.insert(name.to_string(), template);
        persist(&self.backend, STORE_KEY, &templates)?;
        tracing::info!("Saved template '{name}'");
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<Option<Template>, StorageError> {
        Ok(self.list()?.remove(name))
    }

    /// Delete a template by name. Returns `true` if it existed.
    pub fn delete(&self, name: &str) -> Result<bool, StorageError> {
        let mut templates = self.list()?;
        if templates.remove(name).is_none() {
            return Ok(false);
        }
        persist(&self.backend, STORE_KEY, &templates)?;
        tracing::info!("Deleted template '{name}'");
        Ok(true)
    }

    /// Snapshot of all templates. Missing or corrupt storage yields an
    /// empty map.
    pub fn list(&self) -> Result<BTreeMap<String, Template>, StorageError> {
        load_or_default(&self.backend, STORE_KEY)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::Arc;

    use super::*;
    use crate::storage::MemoryBackend;

    fn store() -> TemplateStore {
        TemplateStore::new(Arc::new(MemoryBackend::new()))
    }

    #[test]
    fn button_pair_round_trips() {
        let store = store();
        let button = MessageButton {
            text: "Join now".to_string(),
            url: "https://example.com/signup".to_string(),
        };

        store.put("promo", "<b>Sale!</b>".to_string(), Some(button.clone())).unwrap();

        let template = store.get("promo").unwrap().unwrap();
        assert_eq!(template.content, "<b>Sale!</b>");
        assert_eq!(template.button(), Some(button));
    }

    #[test]
    fn half_specified_button_is_rejected() {
        let result = Template::new(
            "body".to_string(),
            Some(MessageButton {
                text: "Click".to_string(),
                url: "  ".to_string(),
            }),
        );
        assert!(matches!(result, Err(TemplateError::IncompleteButton)));
    }

    #[test]
    fn delete_reports_existence() {
        let store = store();
        store.put("promo", "body".to_string(), None).unwrap();

        assert!(store.delete("promo").unwrap());
        assert!(!store.delete("promo").unwrap());
    }
}
