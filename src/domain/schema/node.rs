//! Schema nodes - the declarative description of a form element.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Discriminated tag of a schema node.
///
/// Unrecognised tags deserialize to `Unknown` and are treated as plain
/// value-less components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum NodeType {
    Panel,
    Hidden,
    Textfield,
    Textarea,
    Email,
    Number,
    Checkbox,
    Select,
    PhoneNumber,
    Content,
    Html,
    Well,
    Fieldset,
    #[default]
    #[serde(other)]
    Unknown,
}

impl NodeType {
    /// Returns true for node types that hold a submission value.
    pub fn holds_value(&self) -> bool {
        matches!(
            self,
            NodeType::Hidden
                | NodeType::Textfield
                | NodeType::Textarea
                | NodeType::Email
                | NodeType::Number
                | NodeType::Checkbox
                | NodeType::Select
                | NodeType::PhoneNumber
        )
    }

    /// Returns true for node types that own child nodes.
    pub fn is_container(&self) -> bool {
        matches!(self, NodeType::Panel | NodeType::Well | NodeType::Fieldset)
    }

    /// Template name used when rendering an instance of this type.
    pub fn template_name(&self) -> &'static str {
        match self {
            NodeType::Panel => "panel",
            NodeType::Hidden => "hidden",
            NodeType::Textfield | NodeType::Email | NodeType::PhoneNumber | NodeType::Number => {
                "input"
            }
            NodeType::Textarea => "textarea",
            NodeType::Checkbox => "checkbox",
            NodeType::Select => "select",
            NodeType::Content | NodeType::Html => "html",
            NodeType::Well => "well",
            NodeType::Fieldset => "fieldset",
            NodeType::Unknown => "unknown",
        }
    }
}

/// Simple `show/when/eq` conditional, optionally carrying a JSON-logic rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Conditional {
    /// Visibility when the `when` field equals `eq`. Accepts `true`/`"true"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show: Option<Value>,

    /// Dot path of the data field to compare.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<String>,

    /// Value compared (as a string) against the `when` field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eq: Option<Value>,

    /// JSON-logic rule, used when `when` is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<Value>,
}

impl Conditional {
    /// Interprets `show` the way form builders store it.
    pub fn show_flag(&self) -> bool {
        match &self.show {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s != "false",
            _ => true,
        }
    }
}

/// Per-field validation rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRules {
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_message: Option<String>,
}

/// Per-page button overrides. `None` defers to the wizard-wide setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageButtonSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancel: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submit: Option<bool>,
}

/// Property a logic action may override on its node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LogicProperty {
    Disabled,
    Hidden,
    Title,
}

/// Effect applied when a logic rule's trigger fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LogicAction {
    Property { property: LogicProperty, value: Value },
}

/// Field logic rule: when `trigger` holds, apply `actions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicRule {
    pub trigger: Conditional,
    #[serde(default)]
    pub actions: Vec<LogicAction>,
}

/// Declarative description of one form element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaNode {
    #[serde(rename = "type", default)]
    pub node_type: NodeType,

    /// Unique within sibling scope only.
    #[serde(default)]
    pub key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<SchemaNode>,

    /// `None` when absent, `Some(Value::Null)` for an explicit end of the wizard.
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub next_page: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional: Option<Conditional>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_conditional: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validate: Option<ValidateRules>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_settings: Option<PageButtonSettings>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breadcrumb_clickable: Option<bool>,

    #[serde(default)]
    pub disabled: bool,

    #[serde(default)]
    pub hidden: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub logic: Vec<LogicRule>,
}

fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl SchemaNode {
    /// Creates a node of the given type and key.
    pub fn new(node_type: NodeType, key: impl Into<String>) -> Self {
        Self {
            node_type,
            key: key.into(),
            ..Self::default()
        }
    }

    /// Creates a panel (wizard page) holding `components`.
    pub fn panel(key: impl Into<String>, components: Vec<SchemaNode>) -> Self {
        let key = key.into();
        Self {
            node_type: NodeType::Panel,
            title: Some(key.clone()),
            key,
            components,
            ..Self::default()
        }
    }

    /// Sets the `nextPage` expression.
    pub fn with_next_page(mut self, next_page: Value) -> Self {
        self.next_page = Some(next_page);
        self
    }

    /// Sets the visibility conditional.
    pub fn with_conditional(mut self, conditional: Conditional) -> Self {
        self.conditional = Some(conditional);
        self
    }

    /// Marks the node as required.
    pub fn required(mut self) -> Self {
        self.validate.get_or_insert_with(ValidateRules::default).required = true;
        self
    }

    /// Sets the validation rules.
    pub fn with_validate(mut self, validate: ValidateRules) -> Self {
        self.validate = Some(validate);
        self
    }

    /// Returns true if this node is a wizard page.
    pub fn is_panel(&self) -> bool {
        self.node_type == NodeType::Panel
    }

    /// Title used in breadcrumbs, falling back to label then key.
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.label.as_deref())
            .unwrap_or(&self.key)
    }
}

/// Root of a form definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default)]
    pub components: Vec<SchemaNode>,
}

impl FormSchema {
    /// Creates a schema from top-level nodes.
    pub fn new(components: Vec<SchemaNode>) -> Self {
        Self {
            display: Some("wizard".to_string()),
            title: None,
            components,
        }
    }

    /// Returns the top-level nodes, wrapping them in a synthetic `page1`
    /// panel when no panel exists.
    pub fn paged_components(&self) -> Vec<SchemaNode> {
        if self.components.iter().any(SchemaNode::is_panel) {
            return self.components.clone();
        }

        vec![SchemaNode {
            node_type: NodeType::Panel,
            key: "page1".to_string(),
            title: Some("Page 1".to_string()),
            label: Some("Page 1".to_string()),
            components: self.components.clone(),
            ..SchemaNode::default()
        }]
    }
}
