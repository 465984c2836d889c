//! Navigation hook adapters.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::submission::Submission;
use crate::ports::NavigationHooks;

/// Hooks that accept every transition.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAllHooks;

impl NavigationHooks for AcceptAllHooks {}

/// Points at which a hook runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookPoint {
    BeforeNext,
    BeforePrev,
    BeforeSubmit,
    ComponentBeforePage,
    ComponentBeforeSubmit,
    ConfirmCancel,
}

/// One recorded hook invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookCall {
    pub point: HookPoint,
    /// Page index or component key the hook ran for.
    pub subject: String,
}

/// Hooks whose outcome is scripted.
pub struct ScriptedHooks {
    rejections: Mutex<HashMap<HookPoint, String>>,
    confirm_cancel: AtomicBool,
    calls: Mutex<Vec<HookCall>>,
}

impl Default for ScriptedHooks {
    fn default() -> Self {
        Self {
            rejections: Mutex::new(HashMap::new()),
            confirm_cancel: AtomicBool::new(true),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl ScriptedHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every call at `point` fail with `message`.
    pub fn reject(self, point: HookPoint, message: impl Into<String>) -> Self {
        self.set_rejection(point, Some(message.into()));
        self
    }

    /// Makes `confirm_cancel` answer no.
    pub fn decline_cancel(self) -> Self {
        self.confirm_cancel.store(false, Ordering::SeqCst);
        self
    }

    /// Sets or clears the rejection at `point` on a shared instance.
    pub fn set_rejection(&self, point: HookPoint, message: Option<String>) {
        let mut rejections = self.rejections.lock().unwrap_or_else(PoisonError::into_inner);
        match message {
            Some(message) => rejections.insert(point, message),
            None => rejections.remove(&point),
        };
    }

    /// Every call so far, oldest first.
    pub fn calls(&self) -> Vec<HookCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of calls made at `point`.
    pub fn calls_to(&self, point: HookPoint) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|call| call.point == point)
            .count()
    }

    fn record(&self, point: HookPoint, subject: impl Into<String>) -> Result<(), DomainError> {
        let subject = subject.into();
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(HookCall {
                point,
                subject: subject.clone(),
            });

        let rejections = self.rejections.lock().unwrap_or_else(PoisonError::into_inner);
        match rejections.get(&point) {
            Some(message) => Err(DomainError::new(ErrorCode::HookRejected, message.clone())
                .with_detail("subject", subject)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl NavigationHooks for ScriptedHooks {
    async fn before_next(&self, page: usize, _submission: &Submission) -> Result<(), DomainError> {
        self.record(HookPoint::BeforeNext, page.to_string())
    }

    async fn before_prev(&self, page: usize, _submission: &Submission) -> Result<(), DomainError> {
        self.record(HookPoint::BeforePrev, page.to_string())
    }

    async fn before_submit(&self, _submission: &Submission) -> Result<(), DomainError> {
        self.record(HookPoint::BeforeSubmit, "form")
    }

    async fn component_before_page(&self, component_key: &str, _next: bool) -> Result<(), DomainError> {
        self.record(HookPoint::ComponentBeforePage, component_key)
    }

    async fn component_before_submit(&self, component_key: &str) -> Result<(), DomainError> {
        self.record(HookPoint::ComponentBeforeSubmit, component_key)
    }

    async fn confirm_cancel(&self) -> bool {
        // Cancel cannot be rejected, only declined.
        let _ = self.record(HookPoint::ConfirmCancel, "form");
        self.confirm_cancel.load(Ordering::SeqCst)
    }
}
