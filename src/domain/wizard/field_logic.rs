//! Field logic - property overrides driven by data.

use crate::domain::condition::{logic, ConditionEvaluator, EvalContext};
use crate::domain::schema::{LogicAction, LogicProperty, SchemaNode};

/// Returns a copy of `node` with every triggered logic action applied.
///
/// Rules run in declaration order; later actions override earlier ones.
pub fn apply_field_logic(node: &SchemaNode, ctx: &EvalContext<'_>) -> SchemaNode {
    let mut effective = node.clone();
    for rule in &node.logic {
        if !ConditionEvaluator::conditional_holds(&node.key, &rule.trigger, node, ctx) {
            continue;
        }
        for action in &rule.actions {
            match action {
                LogicAction::Property { property, value } => match property {
                    LogicProperty::Disabled => effective.disabled = logic::truthy(value),
                    LogicProperty::Hidden => effective.hidden = logic::truthy(value),
                    LogicProperty::Title => effective.title = Some(logic::to_text(value)),
                },
            }
        }
    }
    effective
}
