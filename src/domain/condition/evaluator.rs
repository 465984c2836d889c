//! ConditionEvaluator - visibility conditions and `nextPage` selectors.
//!
//! Evaluation is a pure function of the schema node and the data it is
//! evaluated against. Malformed expressions never escape: they are logged
//! and mapped to the fail-closed default.

use serde_json::{Map, Value};
use tracing::warn;

use super::logic::{self, EvaluationError};
use crate::domain::schema::{Conditional, SchemaNode};
use crate::domain::submission::lookup;

/// Inputs a condition may read.
#[derive(Debug, Clone, Copy)]
pub struct EvalContext<'a> {
    /// Currently active page index.
    pub page: usize,
    /// Submission data.
    pub data: &'a Map<String, Value>,
    /// Row scope for nested data; the submission data at top level.
    pub row: &'a Map<String, Value>,
}

impl<'a> EvalContext<'a> {
    /// Context at the top level of the form.
    pub fn new(page: usize, data: &'a Map<String, Value>) -> Self {
        Self { page, data, row: data }
    }
}

/// Outcome of a `nextPage` evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSelector {
    /// No `nextPage` expression: advance to `page + 1`.
    Sequential,
    /// Explicit `null`: there is no next page.
    End,
    /// Numeric page index.
    Index(usize),
    /// Panel key to resolve by lookup.
    Key(String),
    /// The expression could not be evaluated; do not advance.
    Stay,
}

/// Stateless evaluator for schema expressions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConditionEvaluator;

impl ConditionEvaluator {
    /// Returns true if `node` should be visible against the context.
    ///
    /// `customConditional` takes precedence over `conditional.when`, which
    /// takes precedence over `conditional.json`. No condition means visible.
    pub fn is_visible(node: &SchemaNode, ctx: &EvalContext<'_>) -> bool {
        if let Some(rule) = &node.custom_conditional {
            return Self::rule_holds(&node.key, rule, node, ctx);
        }
        match &node.conditional {
            Some(conditional) => Self::conditional_holds(&node.key, conditional, node, ctx),
            None => true,
        }
    }

    /// Returns true if a conditional (visibility or logic trigger) holds.
    pub fn conditional_holds(
        owner: &str,
        conditional: &Conditional,
        node: &SchemaNode,
        ctx: &EvalContext<'_>,
    ) -> bool {
        if let Some(when) = conditional.when.as_deref().filter(|w| !w.is_empty()) {
            let expected = conditional.eq.as_ref().map(logic::to_text).unwrap_or_default();
            let matches = match lookup(ctx.row, when).or_else(|| lookup(ctx.data, when)) {
                Some(Value::Array(items)) => items.iter().any(|item| logic::to_text(item) == expected),
                Some(value) => logic::to_text(value) == expected,
                None => expected.is_empty(),
            };
            return if matches {
                conditional.show_flag()
            } else {
                !conditional.show_flag()
            };
        }
        match &conditional.json {
            Some(rule) => Self::rule_holds(owner, rule, node, ctx),
            None => true,
        }
    }

    /// Evaluates the `nextPage` expression of `panel`.
    pub fn next_page(panel: &SchemaNode, ctx: &EvalContext<'_>) -> PageSelector {
        let Some(expression) = &panel.next_page else {
            return PageSelector::Sequential;
        };
        match Self::selector_from(expression, panel, ctx) {
            Ok(selector) => selector,
            Err(err) => {
                warn!(panel = %panel.key, error = %err, "nextPage expression failed; staying on page");
                PageSelector::Stay
            }
        }
    }

    /// Evaluates a JSON-logic rule against the context.
    pub fn evaluate_rule(
        rule: &Value,
        node: &SchemaNode,
        ctx: &EvalContext<'_>,
    ) -> Result<Value, EvaluationError> {
        logic::apply(rule, &Self::scope(node, ctx))
    }

    fn rule_holds(owner: &str, rule: &Value, node: &SchemaNode, ctx: &EvalContext<'_>) -> bool {
        match Self::evaluate_rule(rule, node, ctx) {
            Ok(value) => logic::truthy(&value),
            Err(err) => {
                warn!(component = %owner, error = %err, "condition failed; treating as not satisfied");
                false
            }
        }
    }

    fn selector_from(
        expression: &Value,
        panel: &SchemaNode,
        ctx: &EvalContext<'_>,
    ) -> Result<PageSelector, EvaluationError> {
        match expression {
            Value::Object(_) => {
                let result = Self::evaluate_rule(expression, panel, ctx)?;
                if result.is_object() {
                    return Err(EvaluationError::InvalidSelector(result.to_string()));
                }
                Self::selector_from(&result, panel, ctx)
            }
            other => Self::literal_selector(other),
        }
    }

    fn literal_selector(value: &Value) -> Result<PageSelector, EvaluationError> {
        match value {
            Value::Null => Ok(PageSelector::End),
            Value::Number(n) => {
                let index = n.as_f64().filter(|f| f.is_finite() && *f >= 0.0);
                index
                    .map(|f| PageSelector::Index(f.trunc() as usize))
                    .ok_or_else(|| EvaluationError::InvalidSelector(n.to_string()))
            }
            Value::String(s) => match leading_integer(s) {
                Some(i) if i >= 0 => Ok(PageSelector::Index(i as usize)),
                Some(i) => Err(EvaluationError::InvalidSelector(i.to_string())),
                None => Ok(PageSelector::Key(s.clone())),
            },
            other => Err(EvaluationError::InvalidSelector(other.to_string())),
        }
    }

    fn scope(node: &SchemaNode, ctx: &EvalContext<'_>) -> Value {
        logic::scope(vec![
            ("data", Value::Object(ctx.data.clone())),
            ("row", Value::Object(ctx.row.clone())),
            ("page", Value::from(ctx.page)),
            ("next", Value::from(ctx.page + 1)),
            ("form", serde_json::to_value(node).unwrap_or(Value::Null)),
        ])
    }
}

/// Integer prefix of a string, the way `parseInt` reads it.
fn leading_integer(s: &str) -> Option<i64> {
    let trimmed = s.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}
