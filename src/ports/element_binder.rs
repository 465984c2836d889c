//! ElementBinder port - binding rendered markup to live elements.
//!
//! The wizard never touches a document directly. It hands markup to the
//! binder, asks it for named references inside an element, and registers
//! which `WizardAction` a reference triggers.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::domain::foundation::DomainError;
use crate::domain::wizard::WizardAction;

/// Opaque reference to an element on the rendered surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementHandle(String);

impl ElementHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How many elements a reference resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefCardinality {
    Single,
    Multiple,
}

/// One named reference to resolve inside an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefSpec {
    pub name: String,
    pub cardinality: RefCardinality,
}

impl RefSpec {
    pub fn single(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cardinality: RefCardinality::Single,
        }
    }

    pub fn multiple(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cardinality: RefCardinality::Multiple,
        }
    }
}

/// Resolved references. Missing names are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Refs {
    single: HashMap<String, ElementHandle>,
    multiple: HashMap<String, Vec<ElementHandle>>,
}

impl Refs {
    pub fn insert_single(&mut self, name: impl Into<String>, handle: ElementHandle) {
        self.single.insert(name.into(), handle);
    }

    pub fn insert_multiple(&mut self, name: impl Into<String>, handles: Vec<ElementHandle>) {
        self.multiple.insert(name.into(), handles);
    }

    pub fn get(&self, name: &str) -> Option<&ElementHandle> {
        self.single.get(name)
    }

    /// Elements bound under `name`; empty when nothing matched.
    pub fn get_all(&self, name: &str) -> &[ElementHandle] {
        self.multiple.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Port for the element-binding backend.
#[async_trait]
pub trait ElementBinder: Send + Sync {
    /// Replaces the content of `element` with `markup`.
    async fn set_content(&self, element: &ElementHandle, markup: &str) -> Result<(), DomainError>;

    /// Resolves the named references inside `element`.
    async fn load_refs(&self, element: &ElementHandle, spec: &[RefSpec]) -> Result<Refs, DomainError>;

    /// Registers `action` to fire when `event` occurs on `target`.
    async fn add_event_listener(
        &self,
        target: &ElementHandle,
        event: &str,
        action: WizardAction,
    ) -> Result<(), DomainError>;

    /// Drops every listener registered under `element`.
    async fn remove_event_listeners(&self, element: &ElementHandle) -> Result<(), DomainError>;
}
