//! NavigationEngine - page flow and the page-transition commit.
//!
//! The engine is synchronous and works on a borrowed `WizardState`. Hooks,
//! rendering and event emission are the controller's job; everything here
//! either fully commits or leaves the state untouched.

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use super::field_logic::apply_field_logic;
use super::pages::PageModel;
use super::state::WizardState;
use crate::domain::component::ComponentTree;
use crate::domain::condition::{ConditionEvaluator, EvalContext, PageSelector};
use crate::domain::schema::FormSchema;

/// Navigation request that cannot be honoured.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("Page not found: {requested} (wizard has {page_count} pages)")]
    PageNotFound { requested: usize, page_count: usize },
}

/// What a `setPage` request resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTransition {
    /// Already on the requested page; nothing to do.
    Unchanged,
    /// Redraw without changing the page (flattened mode, empty wizard, or no target).
    Redraw,
    /// Move to the given page.
    Commit(usize),
}

/// Stateless page-flow rules over a borrowed `WizardState`.
pub struct NavigationEngine;

impl NavigationEngine {
    /// Computes the page after the active one and caches it.
    ///
    /// `None` means the wizard ends on this page. A `nextPage` expression
    /// that fails to evaluate keeps the wizard on the active page.
    pub fn get_next_page(state: &mut WizardState, data: &Map<String, Value>) -> Option<usize> {
        let next = match state.effective_panel() {
            None => None,
            Some(panel) => {
                let ctx = EvalContext::new(state.page, data);
                match ConditionEvaluator::next_page(panel, &ctx) {
                    PageSelector::Sequential => Some(state.page + 1),
                    PageSelector::End => None,
                    PageSelector::Index(index) => Some(index),
                    PageSelector::Key(key) => Some(PageModel::page_index_by_key(state, &key)),
                    PageSelector::Stay => Some(state.page),
                }
            }
        };
        state.current_next_page = next;
        next
    }

    /// The page before the active one, clamped at 0.
    pub fn get_previous_page(state: &WizardState) -> usize {
        state.page.saturating_sub(1)
    }

    /// Resolves a `setPage` request without touching the state.
    ///
    /// `requested = None` asks for a plain redraw.
    pub fn plan(
        state: &WizardState,
        requested: Option<usize>,
        full: bool,
    ) -> Result<PageTransition, NavigationError> {
        let Some(requested) = requested else {
            return Ok(PageTransition::Redraw);
        };
        if requested == state.page {
            return Ok(PageTransition::Unchanged);
        }
        if !full && requested < state.pages.len() {
            return Ok(PageTransition::Commit(requested));
        }
        if full || state.pages.is_empty() {
            return Ok(PageTransition::Redraw);
        }
        Err(NavigationError::PageNotFound {
            requested,
            page_count: state.pages.len(),
        })
    }

    /// Makes `page` active: applies field logic, recomputes the disabled flag
    /// and next page, and records the page as seen.
    pub fn commit(state: &mut WizardState, page: usize, data: &Map<String, Value>, read_only: bool) {
        let from = state.page;
        state.page = page;
        Self::refresh(state, data, read_only);
        state.seen_pages.insert(page);
        debug!(from, to = page, next = ?state.current_next_page, "page committed");
    }

    /// Recomputes everything derived from the active panel and current data.
    pub fn refresh(state: &mut WizardState, data: &Map<String, Value>, read_only: bool) {
        state.active_panel = state.current_panel().map(|panel| {
            let ctx = EvalContext::new(state.page, data);
            apply_field_logic(panel, &ctx)
        });
        state.disabled = read_only || state.active_panel.as_ref().is_some_and(|p| p.disabled);
        Self::get_next_page(state, data);
    }

    /// Destroys and rebuilds the component tree.
    ///
    /// The active index survives an identical rebuild. When panels appeared
    /// or disappeared, the page follows the panel it was showing, identified
    /// by schema position; if that panel is gone the index is clamped.
    pub fn rebuild(
        state: &mut WizardState,
        schema: &FormSchema,
        data: &Map<String, Value>,
        read_only: bool,
    ) {
        ComponentTree::destroy(&mut state.pages, &mut state.global_components);
        state.install(ComponentTree::build(schema, data, state.page));
        state.active_panel = None;
        Self::refresh(state, data, read_only);
        debug!(pages = state.pages.len(), page = state.page, "component tree rebuilt");
    }

    /// Returns true when a data change altered the visible panels or the
    /// next-page target, which calls for a rebuild.
    pub fn needs_rebuild(
        state: &mut WizardState,
        schema: &FormSchema,
        data: &Map<String, Value>,
    ) -> bool {
        let previous_next = state.current_next_page;
        let visible = ComponentTree::visible_panels(schema, data, state.page);
        let next = Self::get_next_page(state, data);
        previous_next != next || visible != state.origins()
    }
}
