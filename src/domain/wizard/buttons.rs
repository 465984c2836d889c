//! Button visibility and breadcrumb policy.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::pages::PageModel;
use super::state::WizardState;
use crate::domain::schema::SchemaNode;

fn default_true() -> bool {
    true
}

/// Wizard-wide button switches. Per-page `buttonSettings` take precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonSettings {
    #[serde(default = "default_true")]
    pub show_previous: bool,
    #[serde(default = "default_true")]
    pub show_next: bool,
    #[serde(default = "default_true")]
    pub show_submit: bool,
    /// Unset means "shown unless read-only".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_cancel: Option<bool>,
}

impl Default for ButtonSettings {
    fn default() -> Self {
        Self {
            show_previous: true,
            show_next: true,
            show_submit: true,
            show_cancel: None,
        }
    }
}

/// Breadcrumb behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreadcrumbSettings {
    #[serde(default = "default_true")]
    pub clickable: bool,
}

impl Default for BreadcrumbSettings {
    fn default() -> Self {
        Self { clickable: true }
    }
}

/// Navigation buttons of the wizard footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WizardButton {
    Cancel,
    Previous,
    Next,
    Submit,
}

impl WizardButton {
    /// Footer order.
    pub const ALL: [WizardButton; 4] = [
        WizardButton::Cancel,
        WizardButton::Previous,
        WizardButton::Next,
        WizardButton::Submit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WizardButton::Cancel => "cancel",
            WizardButton::Previous => "previous",
            WizardButton::Next => "next",
            WizardButton::Submit => "submit",
        }
    }
}

impl fmt::Display for WizardButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User intent delivered by a bound element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "action", content = "page", rename_all = "camelCase")]
pub enum WizardAction {
    Cancel,
    Previous,
    Next,
    Submit,
    /// Breadcrumb link for the given page.
    GoToPage(usize),
}

impl From<WizardButton> for WizardAction {
    fn from(button: WizardButton) -> Self {
        match button {
            WizardButton::Cancel => WizardAction::Cancel,
            WizardButton::Previous => WizardAction::Previous,
            WizardButton::Next => WizardAction::Next,
            WizardButton::Submit => WizardAction::Submit,
        }
    }
}

/// Which buttons are shown on the active page. Derived, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonVisibility {
    pub previous: bool,
    pub next: bool,
    pub cancel: bool,
    pub submit: bool,
}

impl ButtonVisibility {
    /// Applies the visibility policy to the active page and its next-page target.
    pub fn evaluate(
        state: &WizardState,
        next: Option<usize>,
        settings: &ButtonSettings,
        read_only: bool,
    ) -> Self {
        let overrides = state
            .effective_panel()
            .and_then(|panel| panel.button_settings)
            .unwrap_or_default();
        let page_count = state.page_count();

        let show_previous = overrides.previous.unwrap_or(settings.show_previous);
        let show_next = overrides.next.unwrap_or(settings.show_next);
        let show_cancel = overrides
            .cancel
            .or(settings.show_cancel)
            .unwrap_or(!read_only);
        let show_submit = overrides.submit.unwrap_or(settings.show_submit);

        let on_last = page_count > 0 && state.page() == page_count - 1;
        Self {
            previous: state.page() > 0 && show_previous,
            next: show_next && !PageModel::is_terminal(next, page_count),
            cancel: show_cancel,
            submit: show_submit && !read_only && (next.is_none() || on_last),
        }
    }

    pub fn shows(&self, button: WizardButton) -> bool {
        match button {
            WizardButton::Previous => self.previous,
            WizardButton::Next => self.next,
            WizardButton::Cancel => self.cancel,
            WizardButton::Submit => self.submit,
        }
    }

    /// Shown buttons in footer order.
    pub fn shown(&self) -> Vec<WizardButton> {
        WizardButton::ALL
            .into_iter()
            .filter(|button| self.shows(*button))
            .collect()
    }
}

/// Returns true if the breadcrumb for page `index` may be clicked.
pub fn is_clickable(state: &WizardState, index: usize, breadcrumbs: &BreadcrumbSettings) -> bool {
    if index == state.page() {
        return false;
    }
    state
        .panels()
        .get(index)
        .and_then(|panel| panel.breadcrumb_clickable)
        .unwrap_or(breadcrumbs.clickable)
}

/// Stable DOM id for a page: `key-title`, else the first child's id, else the title.
pub fn page_id(node: &SchemaNode) -> String {
    if !node.key.is_empty() {
        return format!("{}-{}", node.key, node.title.as_deref().unwrap_or_default());
    }
    match node.components.first() {
        Some(first) => page_id(first),
        None => node.title.clone().unwrap_or_default(),
    }
}
