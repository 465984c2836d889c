//! Wizard behaviour configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::wizard::{BreadcrumbSettings, ButtonSettings};
use crate::ports::RenderMode;

/// Options a wizard is constructed with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WizardOptions {
    /// Render values but refuse edits and submission
    #[serde(default)]
    pub read_only: bool,

    /// Render every page as one flattened form
    #[serde(default)]
    pub full: bool,

    /// Render with builder chrome around each component
    #[serde(default)]
    pub builder_mode: bool,

    #[serde(default)]
    pub button_settings: ButtonSettings,

    #[serde(default)]
    pub breadcrumb_settings: BreadcrumbSettings,
}

impl WizardOptions {
    pub fn read_only() -> Self {
        Self {
            read_only: true,
            ..Self::default()
        }
    }

    pub fn render_mode(&self) -> RenderMode {
        if self.builder_mode {
            RenderMode::Builder
        } else {
            RenderMode::Form
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.builder_mode && self.read_only {
            return Err(ValidationError::ReadOnlyBuilder);
        }
        Ok(())
    }
}
