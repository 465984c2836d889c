//! WizardState - the single owned record of navigation state.

use std::collections::BTreeSet;

use crate::domain::component::{BuiltTree, ComponentInstance};
use crate::domain::schema::SchemaNode;

/// Mutable state of one wizard.
///
/// Owned by the controller; the engine components receive it by reference.
#[derive(Debug, Clone, Default)]
pub struct WizardState {
    /// Instances per page, parallel-indexed with `panels`.
    pub(crate) pages: Vec<Vec<ComponentInstance>>,

    /// Schema nodes the pages were built from.
    pub(crate) panels: Vec<SchemaNode>,

    /// Schema position of each panel; identifies a page across rebuilds.
    pub(crate) origins: Vec<usize>,

    /// Hidden top-level components, live on every page.
    pub(crate) global_components: Vec<ComponentInstance>,

    /// Active page index.
    pub(crate) page: usize,

    /// Every page index that has been active. Only grows.
    pub(crate) seen_pages: BTreeSet<usize>,

    /// Last computed next page; `None` when the wizard ends here.
    pub(crate) current_next_page: Option<usize>,

    /// Active panel after field logic was applied.
    pub(crate) active_panel: Option<SchemaNode>,

    /// Derived from read-only mode and the active panel.
    pub(crate) disabled: bool,

    /// Number of tree builds so far.
    pub(crate) builds: u64,
}

impl WizardState {
    /// Creates an empty state on page 0.
    pub fn new() -> Self {
        let mut state = Self::default();
        state.seen_pages.insert(0);
        state
    }

    /// Installs a freshly built tree, keeping `seen_pages`.
    ///
    /// The active index is kept while the set of visible panels is unchanged.
    /// When it changed, the page follows the panel it showed before; if that
    /// panel is gone the index is clamped to the new tree.
    pub(crate) fn install(&mut self, tree: BuiltTree) {
        let active_origin = self.origins.get(self.page).copied();
        if tree.origins != self.origins {
            if let Some(index) =
                active_origin.and_then(|origin| tree.origins.iter().position(|o| *o == origin))
            {
                self.page = index;
            }
        }

        self.pages = tree.pages;
        self.panels = tree.panels;
        self.origins = tree.origins;
        self.global_components = tree.global_components;
        self.builds += 1;

        if !self.pages.is_empty() && self.page >= self.pages.len() {
            self.page = self.pages.len() - 1;
        }
        self.seen_pages.insert(self.page);
    }

    /// Captures the navigation position so a failed transition can be undone.
    pub(crate) fn cursor(&self) -> PageCursor {
        PageCursor {
            page: self.page,
            seen_pages: self.seen_pages.clone(),
            current_next_page: self.current_next_page,
            active_panel: self.active_panel.clone(),
            disabled: self.disabled,
        }
    }

    /// Puts back a position taken with `cursor`.
    pub(crate) fn restore(&mut self, cursor: PageCursor) {
        self.page = cursor.page;
        self.seen_pages = cursor.seen_pages;
        self.current_next_page = cursor.current_next_page;
        self.active_panel = cursor.active_panel;
        self.disabled = cursor.disabled;
    }

    // === Accessors ===

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn panels(&self) -> &[SchemaNode] {
        &self.panels
    }

    pub fn pages(&self) -> &[Vec<ComponentInstance>] {
        &self.pages
    }

    pub fn global_components(&self) -> &[ComponentInstance] {
        &self.global_components
    }

    pub fn seen_pages(&self) -> &BTreeSet<usize> {
        &self.seen_pages
    }

    pub fn current_next_page(&self) -> Option<usize> {
        self.current_next_page
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn build_count(&self) -> u64 {
        self.builds
    }

    /// Schema node of the active page, as originally declared.
    pub fn current_panel(&self) -> Option<&SchemaNode> {
        self.panels.get(self.page)
    }

    /// Active panel with field logic applied, falling back to the declared one.
    pub fn effective_panel(&self) -> Option<&SchemaNode> {
        self.active_panel.as_ref().or_else(|| self.current_panel())
    }

    /// Live instances of the active page.
    pub fn current_page(&self) -> &[ComponentInstance] {
        self.pages.get(self.page).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn panel_keys(&self) -> Vec<String> {
        self.panels.iter().map(|p| p.key.clone()).collect()
    }

    pub(crate) fn origins(&self) -> &[usize] {
        &self.origins
    }
}

/// Navigation fields of a `WizardState` at one point in time.
#[derive(Debug, Clone)]
pub(crate) struct PageCursor {
    page: usize,
    seen_pages: BTreeSet<usize>,
    current_next_page: Option<usize>,
    active_panel: Option<SchemaNode>,
    disabled: bool,
}
