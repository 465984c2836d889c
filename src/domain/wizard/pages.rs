//! PageModel - page handles, last-page detection and key lookup.

use serde_json::{Map, Value};

use super::navigation::NavigationEngine;
use super::state::WizardState;
use crate::domain::component::{ComponentInstance, ComponentTree, FieldError};
use crate::domain::schema::SchemaNode;

enum PageComponents<'a> {
    Live(&'a mut Vec<ComponentInstance>),
    Fresh(Vec<ComponentInstance>),
}

/// One page as seen by page-level operations.
///
/// The active page borrows the live instances; every other page gets fresh
/// instances over the same panel so component identity never leaks across
/// pages.
pub struct PageHandle<'a> {
    index: usize,
    panel: &'a SchemaNode,
    components: PageComponents<'a>,
}

impl<'a> PageHandle<'a> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn panel(&self) -> &SchemaNode {
        self.panel
    }

    /// Returns true if this handle wraps the live instances of the active page.
    pub fn is_live(&self) -> bool {
        matches!(self.components, PageComponents::Live(_))
    }

    pub fn components(&self) -> &[ComponentInstance] {
        match &self.components {
            PageComponents::Live(live) => live.as_slice(),
            PageComponents::Fresh(fresh) => fresh.as_slice(),
        }
    }

    pub fn components_mut(&mut self) -> &mut [ComponentInstance] {
        match &mut self.components {
            PageComponents::Live(live) => live.as_mut_slice(),
            PageComponents::Fresh(fresh) => fresh.as_mut_slice(),
        }
    }

    /// Errors recorded on this page's components, in tree order.
    pub fn errors(&self) -> Vec<FieldError> {
        self.components().iter().flat_map(|c| c.errors()).collect()
    }
}

/// Stateless page queries over a borrowed `WizardState`.
pub struct PageModel;

impl PageModel {
    /// Returns page handles in page order.
    ///
    /// With `all = false` only seen pages are returned.
    pub fn get_pages(state: &mut WizardState, all: bool) -> Vec<PageHandle<'_>> {
        let active = state.page;
        let seen = &state.seen_pages;
        state
            .pages
            .iter_mut()
            .zip(state.panels.iter())
            .enumerate()
            .filter(|(index, _)| all || seen.contains(index))
            .map(|(index, (live, panel))| {
                let components = if index == active {
                    PageComponents::Live(live)
                } else {
                    PageComponents::Fresh(ComponentTree::instantiate_page(panel, index))
                };
                PageHandle {
                    index,
                    panel,
                    components,
                }
            })
            .collect()
    }

    /// Returns true when there is no page after the active one.
    pub fn is_last_page(state: &mut WizardState, data: &Map<String, Value>) -> bool {
        let next = NavigationEngine::get_next_page(state, data);
        Self::is_terminal(next, state.pages.len())
    }

    /// Returns true if `next` points past the end of the wizard.
    pub fn is_terminal(next: Option<usize>, page_count: usize) -> bool {
        match next {
            None => true,
            Some(index) => index >= page_count,
        }
    }

    /// Index of the first panel with `key`, or the active page when none matches.
    pub fn page_index_by_key(state: &WizardState, key: &str) -> usize {
        state
            .panels
            .iter()
            .position(|panel| panel.key == key)
            .unwrap_or(state.page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schema::{FormSchema, NodeType};

    fn wizard() -> WizardState {
        let schema = FormSchema::new(vec![
            SchemaNode::panel("a", vec![SchemaNode::new(NodeType::Textfield, "x")]),
            SchemaNode::panel("b", vec![SchemaNode::new(NodeType::Textfield, "y")]),
            SchemaNode::panel("c", vec![]),
        ]);
        let mut state = WizardState::new();
        NavigationEngine::rebuild(&mut state, &schema, &Map::new(), false);
        state
    }

    #[test]
    fn unseen_pages_are_skipped() {
        let mut state = wizard();
        let handles = PageModel::get_pages(&mut state, false);
        assert_eq!(handles.len(), 1);
        assert!(handles[0].is_live());
    }

    #[test]
    fn all_pages_only_active_one_is_live() {
        let mut state = wizard();
        NavigationEngine::commit(&mut state, 1, &Map::new(), false);

        let handles = PageModel::get_pages(&mut state, true);
        let live: Vec<bool> = handles.iter().map(PageHandle::is_live).collect();
        assert_eq!(live, vec![false, true, false]);
        assert_eq!(handles[0].components()[0].key(), "x");
    }

    #[test]
    fn fresh_handles_do_not_share_identity() {
        let mut state = wizard();
        let live_id = state.pages()[1][0].id();
        let handles = PageModel::get_pages(&mut state, true);
        assert_ne!(handles[1].components()[0].id(), live_id);
    }

    #[test]
    fn last_page_detection() {
        let mut state = wizard();
        assert!(!PageModel::is_last_page(&mut state, &Map::new()));
        NavigationEngine::commit(&mut state, 2, &Map::new(), false);
        assert!(PageModel::is_last_page(&mut state, &Map::new()));
    }

    #[test]
    fn terminal_rules() {
        assert!(PageModel::is_terminal(None, 3));
        assert!(PageModel::is_terminal(Some(3), 3));
        assert!(!PageModel::is_terminal(Some(2), 3));
        assert!(PageModel::is_terminal(None, 0));
        assert!(PageModel::is_terminal(Some(0), 0));
    }

    #[test]
    fn key_lookup_falls_back_to_active_page() {
        let mut state = wizard();
        NavigationEngine::commit(&mut state, 2, &Map::new(), false);
        assert_eq!(PageModel::page_index_by_key(&state, "b"), 1);
        assert_eq!(PageModel::page_index_by_key(&state, "zzz"), 2);
    }
}
