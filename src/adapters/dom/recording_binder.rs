//! Element binder that keeps the rendered surface in memory.
//!
//! Elements are addressed by path: `root`, `root/ref-name`, `root/ref-name/2`.
//! Markup placed on an element is scanned for `ref="..."` attributes when refs
//! are loaded, and every registered listener is kept so a caller can look up
//! the action a click on an element would trigger.

use async_trait::async_trait;
use regex::Regex;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::wizard::WizardAction;
use crate::ports::{ElementBinder, ElementHandle, RefCardinality, RefSpec, Refs};

/// A registered event listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listener {
    pub target: ElementHandle,
    pub event: String,
    pub action: WizardAction,
}

/// In-memory element binder.
#[derive(Default)]
pub struct RecordingBinder {
    content: RwLock<HashMap<ElementHandle, String>>,
    listeners: RwLock<Vec<Listener>>,
}

impl RecordingBinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Markup currently placed on `element`.
    pub fn content_of(&self, element: &ElementHandle) -> Option<String> {
        self.content
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(element)
            .cloned()
    }

    /// Every live listener, in registration order.
    pub fn listeners(&self) -> Vec<Listener> {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Action a `event` on `target` would trigger.
    pub fn action_for(&self, target: &ElementHandle, event: &str) -> Option<WizardAction> {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|l| &l.target == target && l.event == event)
            .map(|l| l.action)
    }

    /// Handle of the first listener bound to `action`.
    pub fn target_of(&self, action: WizardAction) -> Option<ElementHandle> {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|l| l.action == action)
            .map(|l| l.target.clone())
    }

    fn is_within(handle: &ElementHandle, root: &ElementHandle) -> bool {
        handle == root
            || handle
                .as_str()
                .strip_prefix(root.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

#[async_trait]
impl ElementBinder for RecordingBinder {
    async fn set_content(&self, element: &ElementHandle, markup: &str) -> Result<(), DomainError> {
        self.content
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(element.clone(), markup.to_string());
        Ok(())
    }

    async fn load_refs(&self, element: &ElementHandle, spec: &[RefSpec]) -> Result<Refs, DomainError> {
        let markup = self.content_of(element).ok_or_else(|| {
            DomainError::new(ErrorCode::AttachFailed, "Element has no content")
                .with_detail("element", element.as_str())
        })?;
        let pattern = Regex::new(r#"ref="([^"]+)""#)
            .map_err(|e| DomainError::new(ErrorCode::InternalError, e.to_string()))?;

        let mut found: HashMap<&str, usize> = HashMap::new();
        for capture in pattern.captures_iter(&markup) {
            if let Some(name) = capture.get(1) {
                *found.entry(name.as_str()).or_default() += 1;
            }
        }

        let mut refs = Refs::default();
        for wanted in spec {
            let count = found.get(wanted.name.as_str()).copied().unwrap_or(0);
            match wanted.cardinality {
                RefCardinality::Single if count > 0 => refs.insert_single(
                    wanted.name.clone(),
                    ElementHandle::new(format!("{}/{}", element, wanted.name)),
                ),
                RefCardinality::Single => {}
                RefCardinality::Multiple => refs.insert_multiple(
                    wanted.name.clone(),
                    (0..count)
                        .map(|i| ElementHandle::new(format!("{}/{}/{}", element, wanted.name, i)))
                        .collect(),
                ),
            }
        }
        Ok(refs)
    }

    async fn add_event_listener(
        &self,
        target: &ElementHandle,
        event: &str,
        action: WizardAction,
    ) -> Result<(), DomainError> {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Listener {
                target: target.clone(),
                event: event.to_string(),
                action,
            });
        Ok(())
    }

    async fn remove_event_listeners(&self, element: &ElementHandle) -> Result<(), DomainError> {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|l| !Self::is_within(&l.target, element));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> ElementHandle {
        ElementHandle::new("form")
    }

    const MARKUP: &str = r#"<div ref="wizard-x"></div><a ref="wizard-x-link"></a><a ref="wizard-x-link"></a><button ref="wizard-x-next"></button>"#;

    #[tokio::test]
    async fn load_refs_resolves_single_and_multiple() {
        let binder = RecordingBinder::new();
        binder.set_content(&root(), MARKUP).await.unwrap();

        let refs = binder
            .load_refs(
                &root(),
                &[
                    RefSpec::single("wizard-x-next"),
                    RefSpec::single("wizard-x-submit"),
                    RefSpec::multiple("wizard-x-link"),
                ],
            )
            .await
            .unwrap();

        assert_eq!(refs.get("wizard-x-next").unwrap().as_str(), "form/wizard-x-next");
        assert!(refs.get("wizard-x-submit").is_none());
        assert_eq!(refs.get_all("wizard-x-link")[1].as_str(), "form/wizard-x-link/1");
    }

    #[tokio::test]
    async fn load_refs_on_empty_element_fails() {
        let err = RecordingBinder::new()
            .load_refs(&root(), &[RefSpec::single("x")])
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::AttachFailed);
    }

    #[tokio::test]
    async fn listeners_can_be_looked_up_and_removed() {
        let binder = RecordingBinder::new();
        let next = ElementHandle::new("form/wizard-x-next");
        let other = ElementHandle::new("formula/next");
        binder.add_event_listener(&next, "click", WizardAction::Next).await.unwrap();
        binder.add_event_listener(&other, "click", WizardAction::Submit).await.unwrap();

        assert_eq!(binder.action_for(&next, "click"), Some(WizardAction::Next));
        assert_eq!(binder.target_of(WizardAction::Next), Some(next.clone()));
        assert_eq!(binder.action_for(&next, "keyup"), None);

        binder.remove_event_listeners(&root()).await.unwrap();
        assert_eq!(binder.listeners().len(), 1);
        assert_eq!(binder.listeners()[0].target, other);
    }
}
