//! ComponentTree - builds and tears down the wizard's component forest.
//!
//! Only two kinds of top-level node take part in a wizard: visible `panel`
//! nodes become pages, `hidden` nodes become global components rendered on
//! every page. Anything else at the top level is ignored.

use serde_json::{Map, Value};
use tracing::debug;

use super::instance::ComponentInstance;
use crate::domain::condition::{ConditionEvaluator, EvalContext};
use crate::domain::schema::{FormSchema, NodeType, SchemaNode};

/// Output of a build pass. `pages`, `panels` and `origins` are parallel-indexed.
#[derive(Debug, Clone, Default)]
pub struct BuiltTree {
    pub pages: Vec<Vec<ComponentInstance>>,
    pub panels: Vec<SchemaNode>,
    /// Position of each panel among the schema's top-level nodes. Panel keys
    /// may be empty or repeated, so this is what identifies a page.
    pub origins: Vec<usize>,
    pub global_components: Vec<ComponentInstance>,
}

/// Stateless builder for the component forest.
pub struct ComponentTree;

impl ComponentTree {
    /// Builds pages, panels and global components from `schema`.
    ///
    /// `page` is the active page index visibility conditions are evaluated
    /// against. A schema without panels is wrapped in a synthetic page first.
    pub fn build(schema: &FormSchema, data: &Map<String, Value>, page: usize) -> BuiltTree {
        let ctx = EvalContext::new(page, data);
        let mut tree = BuiltTree::default();

        for (origin, node) in schema.paged_components().into_iter().enumerate() {
            match node.node_type {
                NodeType::Panel => {
                    if ConditionEvaluator::is_visible(&node, &ctx) {
                        let index = tree.panels.len();
                        tree.pages.push(Self::instantiate_page(&node, index));
                        tree.panels.push(node);
                        tree.origins.push(origin);
                    }
                }
                NodeType::Hidden => tree
                    .global_components
                    .push(ComponentInstance::new(&node, None)),
                _ => {}
            }
        }

        debug!(
            pages = tree.pages.len(),
            globals = tree.global_components.len(),
            "component tree built"
        );
        tree
    }

    /// Origins of the panels that are currently visible, in schema order.
    ///
    /// Matches `BuiltTree::origins` of a build over the same input.
    pub fn visible_panels(schema: &FormSchema, data: &Map<String, Value>, page: usize) -> Vec<usize> {
        let ctx = EvalContext::new(page, data);
        schema
            .paged_components()
            .iter()
            .enumerate()
            .filter(|(_, node)| node.is_panel() && ConditionEvaluator::is_visible(node, &ctx))
            .map(|(origin, _)| origin)
            .collect()
    }

    /// Creates fresh instances for the children of `panel`, tagged with `index`.
    pub fn instantiate_page(panel: &SchemaNode, index: usize) -> Vec<ComponentInstance> {
        panel
            .components
            .iter()
            .map(|child| ComponentInstance::new(child, Some(index)))
            .collect()
    }

    /// Destroys every instance and empties both collections. Idempotent.
    pub fn destroy(
        pages: &mut Vec<Vec<ComponentInstance>>,
        global_components: &mut Vec<ComponentInstance>,
    ) {
        for instance in pages.iter_mut().flatten() {
            instance.destroy();
        }
        for instance in global_components.iter_mut() {
            instance.destroy();
        }
        pages.clear();
        global_components.clear();
    }
}
