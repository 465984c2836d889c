//! ValidityAggregator - page-level and cross-page validation.

use serde_json::{Map, Value};

use super::pages::PageModel;
use super::state::WizardState;
use crate::domain::component::{ComponentInstance, FieldError};

/// Stateless validation rules over a borrowed `WizardState`.
pub struct ValidityAggregator;

impl ValidityAggregator {
    /// Checks every component; all must pass. Never short-circuits.
    pub fn check_components_validity(
        components: &mut [ComponentInstance],
        data: &Map<String, Value>,
        dirty: bool,
    ) -> bool {
        components
            .iter_mut()
            .fold(true, |valid, component| component.check_validity(data, dirty) && valid)
    }

    /// Checks the components of page `page`, or of the active page when
    /// `page` is `None`. Page 0 is a page like any other.
    ///
    /// A page index past the end has nothing to check and is valid.
    pub fn check_page_validity(
        state: &mut WizardState,
        data: &Map<String, Value>,
        dirty: bool,
        page: Option<usize>,
    ) -> bool {
        let index = page.unwrap_or(state.page);
        match state.pages.get_mut(index) {
            Some(components) => Self::check_components_validity(components, data, dirty),
            None => true,
        }
    }

    /// Checks the live instances of the active page.
    pub fn check_current_page_validity(
        state: &mut WizardState,
        data: &Map<String, Value>,
        dirty: bool,
    ) -> bool {
        Self::check_page_validity(state, data, dirty, None)
    }

    /// Checks the global components and every page.
    ///
    /// All pages are evaluated so every error is collected.
    pub fn check_pages_validity(
        state: &mut WizardState,
        data: &Map<String, Value>,
        dirty: bool,
    ) -> bool {
        let root_valid = Self::check_components_validity(&mut state.global_components, data, dirty);
        PageModel::get_pages(state, true)
            .iter_mut()
            .fold(root_valid, |valid, handle| {
                Self::check_components_validity(handle.components_mut(), data, dirty) && valid
            })
    }

    /// Checks every page while submitting, otherwise only the active page.
    pub fn check_validity(
        state: &mut WizardState,
        data: &Map<String, Value>,
        dirty: bool,
        submitting: bool,
    ) -> bool {
        if submitting {
            Self::check_pages_validity(state, data, dirty)
        } else {
            Self::check_current_page_validity(state, data, dirty)
        }
    }

    /// Errors to show the user.
    ///
    /// On the last page every page is revalidated and the errors are
    /// concatenated in page order; elsewhere only the active page's errors
    /// are reported.
    pub fn errors(state: &mut WizardState, data: &Map<String, Value>) -> Vec<FieldError> {
        if !PageModel::is_last_page(state, data) {
            return Self::current_errors(state);
        }
        Self::all_errors(state, data)
    }

    /// Revalidates the global components and every page with `dirty` set and
    /// returns their errors in page order.
    pub fn all_errors(state: &mut WizardState, data: &Map<String, Value>) -> Vec<FieldError> {
        let mut errors: Vec<FieldError> = Vec::new();
        Self::check_components_validity(&mut state.global_components, data, true);
        errors.extend(state.global_components.iter().flat_map(|c| c.errors()));

        for mut handle in PageModel::get_pages(state, true) {
            Self::check_components_validity(handle.components_mut(), data, true);
            errors.extend(handle.errors());
        }
        errors
    }

    /// Errors already recorded on the active page.
    pub fn current_errors(state: &WizardState) -> Vec<FieldError> {
        state.current_page().iter().flat_map(|c| c.errors()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schema::{FormSchema, NodeType, SchemaNode};
    use crate::domain::wizard::NavigationEngine;
    use serde_json::json;

    fn required(key: &str) -> SchemaNode {
        SchemaNode::new(NodeType::Textfield, key).required()
    }

    fn two_pages() -> (FormSchema, WizardState) {
        let schema = FormSchema::new(vec![
            SchemaNode::panel("one", vec![SchemaNode::new(NodeType::Textfield, "note")]),
            SchemaNode::panel("two", vec![required("email"), required("phone")]),
        ]);
        let mut state = WizardState::new();
        NavigationEngine::rebuild(&mut state, &schema, &Map::new(), false);
        (schema, state)
    }

    #[test]
    fn page_validity_collects_every_error() {
        let mut components = vec![
            ComponentInstance::new(&required("a"), Some(0)),
            ComponentInstance::new(&required("b"), Some(0)),
        ];
        assert!(!ValidityAggregator::check_components_validity(&mut components, &Map::new(), true));
        assert_eq!(components.iter().filter(|c| !c.errors().is_empty()).count(), 2);
    }

    #[test]
    fn page_validity_by_index() {
        let (_, mut state) = two_pages();
        NavigationEngine::commit(&mut state, 1, &Map::new(), false);

        assert!(ValidityAggregator::check_page_validity(&mut state, &Map::new(), true, Some(0)));
        assert!(!ValidityAggregator::check_page_validity(&mut state, &Map::new(), true, None));
        assert!(!ValidityAggregator::check_page_validity(&mut state, &Map::new(), true, Some(1)));
        assert!(ValidityAggregator::check_page_validity(&mut state, &Map::new(), true, Some(9)));
    }

    #[test]
    fn page_zero_is_checked_when_asked_for() {
        let schema = FormSchema::new(vec![
            SchemaNode::panel("first", vec![required("code")]),
            SchemaNode::panel("second", vec![]),
        ]);
        let mut state = WizardState::new();
        NavigationEngine::rebuild(&mut state, &schema, &Map::new(), false);
        NavigationEngine::commit(&mut state, 1, &Map::new(), false);

        assert!(ValidityAggregator::check_page_validity(&mut state, &Map::new(), true, None));
        assert!(!ValidityAggregator::check_page_validity(&mut state, &Map::new(), true, Some(0)));
    }

    #[test]
    fn current_page_only_outside_submit() {
        let (_, mut state) = two_pages();
        assert!(ValidityAggregator::check_validity(&mut state, &Map::new(), true, false));
        assert!(!ValidityAggregator::check_validity(&mut state, &Map::new(), true, true));
    }

    #[test]
    fn pages_validity_passes_with_complete_data() {
        let (_, mut state) = two_pages();
        let data = json!({"email": "a@b.io", "phone": "555"});
        assert!(ValidityAggregator::check_pages_validity(
            &mut state,
            data.as_object().unwrap(),
            true
        ));
    }

    #[test]
    fn errors_on_last_page_cover_all_pages() {
        let (_, mut state) = two_pages();
        assert!(ValidityAggregator::errors(&mut state, &Map::new()).is_empty());

        NavigationEngine::commit(&mut state, 1, &Map::new(), false);
        let keys: Vec<String> = ValidityAggregator::errors(&mut state, &Map::new())
            .into_iter()
            .map(|e| e.key)
            .collect();
        assert_eq!(keys, vec!["email", "phone"]);
        assert_eq!(ValidityAggregator::current_errors(&state).len(), 2);
    }
}
