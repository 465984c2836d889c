//! Field validation shared by every value-holding component.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::warn;

use crate::domain::schema::{NodeType, SchemaNode};

/// Rule a field failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationRule {
    Required,
    MinLength,
    MaxLength,
    Pattern,
    Min,
    Max,
    Email,
}

impl fmt::Display for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ValidationRule::Required => "required",
            ValidationRule::MinLength => "minLength",
            ValidationRule::MaxLength => "maxLength",
            ValidationRule::Pattern => "pattern",
            ValidationRule::Min => "min",
            ValidationRule::Max => "max",
            ValidationRule::Email => "email",
        };
        write!(f, "{}", s)
    }
}

/// One validation failure on one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub key: String,
    pub rule: ValidationRule,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.message)
    }
}

/// Validates `value` against the rules declared on `node`.
///
/// Compiles the pattern on every call; components keep a `FieldValidator`
/// instead.
pub fn validate_value(node: &SchemaNode, value: Option<&Value>, page: Option<usize>) -> Vec<FieldError> {
    FieldValidator::for_node(node).validate(node, value, page)
}

/// Validation rules of one schema node with the `pattern` compiled once.
#[derive(Debug, Clone, Default)]
pub struct FieldValidator {
    pattern: Option<Regex>,
}

impl FieldValidator {
    /// Compiles the pattern declared on `node`. A pattern that does not
    /// compile is logged and ignored.
    pub fn for_node(node: &SchemaNode) -> Self {
        let source = node
            .validate
            .as_ref()
            .and_then(|rules| rules.pattern.as_deref())
            .filter(|p| !p.is_empty());
        let pattern = source.and_then(|source| match Regex::new(&format!("^(?:{})$", source)) {
            Ok(re) => Some(re),
            Err(err) => {
                warn!(component = %node.key, error = %err, "invalid validation pattern ignored");
                None
            }
        });
        Self { pattern }
    }

    pub fn has_pattern(&self) -> bool {
        self.pattern.is_some()
    }

    /// Validates `value` against the rules declared on `node`.
    ///
    /// Empty values only fail `required`; length, pattern and range rules
    /// apply to present values.
    pub fn validate(&self, node: &SchemaNode, value: Option<&Value>, page: Option<usize>) -> Vec<FieldError> {
        let label = node.label.as_deref().unwrap_or(&node.key);
        let error = |rule: ValidationRule, message: String| FieldError {
            key: node.key.clone(),
            rule,
            message,
            page,
        };

        let rules = node.validate.clone().unwrap_or_default();
        let mut errors = Vec::new();

        if is_empty(value) {
            if rules.required {
                let message = rules
                    .custom_message
                    .clone()
                    .unwrap_or_else(|| format!("{} is required", label));
                errors.push(error(ValidationRule::Required, message));
            }
            return errors;
        }
        let Some(value) = value else {
            return errors;
        };

        if let Value::String(text) = value {
            let length = text.chars().count();
            if let Some(min) = rules.min_length.filter(|min| length < *min) {
                errors.push(error(
                    ValidationRule::MinLength,
                    format!("{} must have at least {} characters", label, min),
                ));
            }
            if let Some(max) = rules.max_length.filter(|max| length > *max) {
                errors.push(error(
                    ValidationRule::MaxLength,
                    format!("{} must have no more than {} characters", label, max),
                ));
            }
            if let Some(re) = self.pattern.as_ref().filter(|re| !re.is_match(text)) {
                let pattern = rules.pattern.as_deref().unwrap_or(re.as_str());
                errors.push(error(
                    ValidationRule::Pattern,
                    format!("{} does not match the pattern {}", label, pattern),
                ));
            }
            if node.node_type == NodeType::Email && !looks_like_email(text) {
                errors.push(error(
                    ValidationRule::Email,
                    format!("{} must be a valid email", label),
                ));
            }
        }

        if let Some(number) = as_number(value) {
            if let Some(min) = rules.min.filter(|min| number < *min) {
                errors.push(error(
                    ValidationRule::Min,
                    format!("{} cannot be less than {}", label, min),
                ));
            }
            if let Some(max) = rules.max.filter(|max| number > *max) {
                errors.push(error(
                    ValidationRule::Max,
                    format!("{} cannot be greater than {}", label, max),
                ));
            }
        }

        errors
    }
}

fn is_empty(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::Bool(b)) => !b,
        _ => false,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

fn looks_like_email(text: &str) -> bool {
    match text.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.ends_with('.'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schema::ValidateRules;
    use serde_json::json;

    fn rules(rules: ValidateRules) -> SchemaNode {
        SchemaNode::new(NodeType::Textfield, "name").with_validate(rules)
    }

    #[test]
    fn required_rejects_missing_and_blank() {
        let node = SchemaNode::new(NodeType::Textfield, "name").required();
        assert_eq!(validate_value(&node, None, Some(0))[0].rule, ValidationRule::Required);
        assert_eq!(validate_value(&node, Some(&json!("")), None).len(), 1);
        assert!(validate_value(&node, Some(&json!("Ada")), None).is_empty());
    }

    #[test]
    fn required_checkbox_must_be_ticked() {
        let node = SchemaNode::new(NodeType::Checkbox, "terms").required();
        assert_eq!(validate_value(&node, Some(&json!(false)), None).len(), 1);
        assert!(validate_value(&node, Some(&json!(true)), None).is_empty());
    }

    #[test]
    fn optional_empty_value_skips_other_rules() {
        let node = rules(ValidateRules {
            min_length: Some(3),
            ..ValidateRules::default()
        });
        assert!(validate_value(&node, Some(&json!("")), None).is_empty());
    }

    #[test]
    fn length_rules_count_characters() {
        let node = rules(ValidateRules {
            min_length: Some(2),
            max_length: Some(4),
            ..ValidateRules::default()
        });
        assert_eq!(validate_value(&node, Some(&json!("å")), None)[0].rule, ValidationRule::MinLength);
        assert_eq!(validate_value(&node, Some(&json!("ååååå")), None)[0].rule, ValidationRule::MaxLength);
        assert!(validate_value(&node, Some(&json!("ååå")), None).is_empty());
    }

    #[test]
    fn pattern_is_anchored() {
        let node = rules(ValidateRules {
            pattern: Some("[0-9]{4}".to_string()),
            ..ValidateRules::default()
        });
        assert!(validate_value(&node, Some(&json!("0150")), None).is_empty());
        assert_eq!(validate_value(&node, Some(&json!("01500")), None)[0].rule, ValidationRule::Pattern);
    }

    #[test]
    fn broken_pattern_is_ignored() {
        let node = rules(ValidateRules {
            pattern: Some("([".to_string()),
            ..ValidateRules::default()
        });
        assert!(validate_value(&node, Some(&json!("x")), None).is_empty());
    }

    #[test]
    fn validator_compiles_pattern_once_and_reuses_it() {
        let node = rules(ValidateRules {
            pattern: Some("[a-z]+".to_string()),
            ..ValidateRules::default()
        });
        let validator = FieldValidator::for_node(&node);
        assert!(validator.has_pattern());

        for _ in 0..3 {
            assert!(validator.validate(&node, Some(&json!("abc")), None).is_empty());
            assert_eq!(
                validator.validate(&node, Some(&json!("ABC")), None)[0].message,
                "name does not match the pattern [a-z]+"
            );
        }
    }

    #[test]
    fn broken_pattern_compiles_to_no_rule() {
        let node = rules(ValidateRules {
            pattern: Some("([".to_string()),
            ..ValidateRules::default()
        });
        assert!(!FieldValidator::for_node(&node).has_pattern());
    }

    #[test]
    fn numeric_range() {
        let node = SchemaNode::new(NodeType::Number, "age").with_validate(ValidateRules {
            min: Some(18.0),
            max: Some(120.0),
            ..ValidateRules::default()
        });
        assert_eq!(validate_value(&node, Some(&json!(12)), None)[0].rule, ValidationRule::Min);
        assert_eq!(validate_value(&node, Some(&json!(121)), None)[0].rule, ValidationRule::Max);
        assert!(validate_value(&node, Some(&json!(40)), None).is_empty());
    }

    #[test]
    fn email_format() {
        let node = SchemaNode::new(NodeType::Email, "email");
        assert_eq!(validate_value(&node, Some(&json!("ada")), None)[0].rule, ValidationRule::Email);
        assert!(validate_value(&node, Some(&json!("ada@example.org")), None).is_empty());
    }

    #[test]
    fn custom_message_overrides_required_text() {
        let node = SchemaNode::new(NodeType::Textfield, "name").with_validate(ValidateRules {
            required: true,
            custom_message: Some("Tell us your name".to_string()),
            ..ValidateRules::default()
        });
        assert_eq!(validate_value(&node, None, None)[0].message, "Tell us your name");
    }
}
