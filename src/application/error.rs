//! WizardError - the error returned by controller operations.

use thiserror::Error;

use crate::domain::component::FieldError;
use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};
use crate::domain::wizard::NavigationError;

/// Why a wizard operation was rejected.
///
/// A rejected operation never leaves a partial commit behind: the active
/// page is unchanged unless the operation succeeded.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WizardError {
    /// The page (or, on submit, the whole form) failed validation.
    #[error("Validation failed with {} error(s)", .0.len())]
    ValidationFailed(Vec<FieldError>),

    /// `set_page` asked for a page outside the wizard.
    #[error("Page not found: {requested} (wizard has {page_count} pages)")]
    PageNotFound { requested: usize, page_count: usize },

    /// The wizard has no form yet, or cannot accept the operation in its
    /// current lifecycle state.
    #[error("Wizard not ready: {0}")]
    NotReady(String),

    /// A before-hook vetoed the transition.
    #[error("Hook rejected: {0}")]
    HookRejected(DomainError),

    /// Renderer, binder, loader or publisher failed.
    #[error("Collaborator failed: {0}")]
    Collaborator(DomainError),
}

impl WizardError {
    /// Field errors carried by a validation failure; empty otherwise.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            WizardError::ValidationFailed(errors) => errors,
            _ => &[],
        }
    }

    /// Error code the failure maps to at the port boundary.
    pub fn code(&self) -> ErrorCode {
        match self {
            WizardError::ValidationFailed(_) => ErrorCode::ValidationFailed,
            WizardError::PageNotFound { .. } => ErrorCode::PageNotFound,
            WizardError::NotReady(_) => ErrorCode::NotReady,
            WizardError::HookRejected(err) | WizardError::Collaborator(err) => err.code,
        }
    }
}

impl From<NavigationError> for WizardError {
    fn from(err: NavigationError) -> Self {
        match err {
            NavigationError::PageNotFound {
                requested,
                page_count,
            } => WizardError::PageNotFound {
                requested,
                page_count,
            },
        }
    }
}

impl From<ValidationError> for WizardError {
    fn from(err: ValidationError) -> Self {
        WizardError::NotReady(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::component::ValidationRule;

    #[test]
    fn navigation_error_maps_to_page_not_found() {
        let err: WizardError = NavigationError::PageNotFound {
            requested: 7,
            page_count: 3,
        }
        .into();
        assert_eq!(
            err,
            WizardError::PageNotFound {
                requested: 7,
                page_count: 3
            }
        );
        assert_eq!(err.code(), ErrorCode::PageNotFound);
        assert_eq!(err.to_string(), "Page not found: 7 (wizard has 3 pages)");
    }

    #[test]
    fn validation_failure_exposes_field_errors() {
        let err = WizardError::ValidationFailed(vec![FieldError {
            key: "email".to_string(),
            rule: ValidationRule::Required,
            message: "Email is required".to_string(),
            page: Some(0),
        }]);
        assert_eq!(err.field_errors().len(), 1);
        assert_eq!(err.to_string(), "Validation failed with 1 error(s)");
    }

    #[test]
    fn hook_rejection_keeps_its_code() {
        let err = WizardError::HookRejected(DomainError::new(ErrorCode::HookRejected, "no"));
        assert_eq!(err.code(), ErrorCode::HookRejected);
        assert!(err.field_errors().is_empty());
    }
}
