//! NavigationHooks port - embedder callbacks around page transitions.
//!
//! Every hook may reject the transition by returning an error; the first
//! rejection wins and nothing is committed.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::submission::Submission;

/// Port for transition hooks. All methods default to accepting.
#[async_trait]
pub trait NavigationHooks: Send + Sync {
    /// Runs before moving forward from `page`.
    async fn before_next(&self, _page: usize, _submission: &Submission) -> Result<(), DomainError> {
        Ok(())
    }

    /// Runs before moving back from `page`.
    async fn before_prev(&self, _page: usize, _submission: &Submission) -> Result<(), DomainError> {
        Ok(())
    }

    /// Runs before the submission is accepted.
    async fn before_submit(&self, _submission: &Submission) -> Result<(), DomainError> {
        Ok(())
    }

    /// Per-component hook run after `before_next`/`before_prev` for every
    /// live component of the active page.
    async fn component_before_page(&self, _component_key: &str, _next: bool) -> Result<(), DomainError> {
        Ok(())
    }

    /// Per-component hook run for every component of every page on submit.
    async fn component_before_submit(&self, _component_key: &str) -> Result<(), DomainError> {
        Ok(())
    }

    /// Asks the user to confirm cancelling. Declining keeps the wizard as is.
    async fn confirm_cancel(&self) -> bool {
        true
    }
}
